use crate::Chips;
use crate::canister::Principal;

/// Operations the table canister has accepted but will only apply
/// between hands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum QueueItem {
    Join(Principal),
    Deposit { user: Principal, amount: Chips },
    SittingIn(Principal),
    SittingOut(Principal),
    Leave(Principal),
    UpdateBlinds { small: Chips, big: Chips },
    PauseTable,
}

impl QueueItem {
    pub fn user(&self) -> Option<&Principal> {
        match self {
            Self::Join(p)
            | Self::SittingIn(p)
            | Self::SittingOut(p)
            | Self::Leave(p)
            | Self::Deposit { user: p, .. } => Some(p),
            Self::UpdateBlinds { .. } | Self::PauseTable => None,
        }
    }
}
