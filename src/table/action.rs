use crate::Chips;
use crate::Nanos;
use crate::canister::Principal;
use crate::table::DealStage;

/// Last thing a seated player did in the current hand.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum PlayerAction {
    #[default]
    None,
    Folded,
    Checked,
    Called,
    Raised(Chips),
    AllIn,
    SittingOut,
    Joining,
}

impl PlayerAction {
    pub fn is_folded(&self) -> bool {
        matches!(self, Self::Folded)
    }
    /// Still contesting the pot this hand.
    pub fn is_live(&self) -> bool {
        !matches!(self, Self::Folded | Self::SittingOut | Self::Joining)
    }
}

/// Bet argument of `place_bet`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum BetType {
    SmallBlind,
    BigBlind,
    Called,
    Raised(Chips),
}

/// One line of the table's action log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ActionLog {
    pub user: Option<Principal>,
    pub action: ActionType,
    pub timestamp: Nanos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum ActionType {
    Join,
    Leave,
    SmallBlind(Chips),
    BigBlind(Chips),
    Call,
    Check,
    Fold,
    Raise(Chips),
    AllIn(Chips),
    Stage(DealStage),
    Win(Chips),
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Join => write!(f, "joined"),
            Self::Leave => write!(f, "left"),
            Self::SmallBlind(n) => write!(f, "posted small blind {}", n),
            Self::BigBlind(n) => write!(f, "posted big blind {}", n),
            Self::Call => write!(f, "called"),
            Self::Check => write!(f, "checked"),
            Self::Fold => write!(f, "folded"),
            Self::Raise(n) => write!(f, "raised to {}", n),
            Self::AllIn(n) => write!(f, "went all-in for {}", n),
            Self::Stage(stage) => write!(f, "dealt {}", stage),
            Self::Win(n) => write!(f, "won {}", n),
        }
    }
}
