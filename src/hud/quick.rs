use super::Limit;
use crate::Chips;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Preset {
    Min,
    Triple,
    HalfPot,
    Pot,
    AllIn,
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Min => write!(f, "Min"),
            Self::Triple => write!(f, "3x"),
            Self::HalfPot => write!(f, "1/2 Pot"),
            Self::Pot => write!(f, "Pot"),
            Self::AllIn => write!(f, "All-in"),
        }
    }
}

/// One-click raise shortcut.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct QuickAction {
    pub preset: Preset,
    /// Raise-to total.
    pub amount: Chips,
}

/// Everything the quick-raise row depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stakes {
    pub limit: Limit,
    pub current_bet: Chips,
    pub last_raise: Chips,
    pub big_blind: Chips,
    pub pot: Chips,
    pub committed: Chips,
    pub balance: Chips,
}

impl Stakes {
    pub fn all_in(&self) -> Chips {
        self.committed + self.balance
    }
    pub fn floor(&self) -> Chips {
        self.limit
            .floor(self.current_bet, self.last_raise, self.big_blind)
    }
}

impl QuickAction {
    /// Presets offered for these stakes, ascending and unique by amount.
    ///
    /// Every preset respects the limit's ceiling. Only all-in may use the
    /// whole stack; the rest must leave chips behind.
    pub fn presets(stakes: &Stakes) -> Vec<Self> {
        let min = stakes.floor();
        let all_in = stakes.all_in();
        let triple = 3 * stakes.current_bet.max(stakes.big_blind);
        let mut quick = std::iter::once((Preset::Min, min))
            .chain(
                [
                    (Preset::Triple, triple),
                    (Preset::HalfPot, stakes.pot / 2),
                    (Preset::Pot, stakes.pot),
                ]
                .into_iter()
                .filter(|(_, amount)| *amount > min),
            )
            .filter(|(_, amount)| *amount < all_in)
            .chain(std::iter::once((Preset::AllIn, all_in)).filter(|_| stakes.balance > 0))
            .filter(|(_, amount)| stakes.limit.admits(stakes.current_bet, *amount))
            .map(|(preset, amount)| Self { preset, amount })
            .collect::<Vec<Self>>();
        quick.sort_by_key(|q| q.amount);
        quick.dedup_by_key(|q| q.amount);
        quick
    }
}
