use crate::Chips;
use crate::table::DealStage;
use crate::table::GameType;

/// Raise bounds of a table's bet-limit rule at one point in a hand.
///
/// Amounts are raise-to totals for the current round, not increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    No,
    /// Ceiling is the pot, current-round bets included.
    Pot(Chips),
    /// Street increment: small bet early, big bet from the turn on.
    Fixed(Chips),
    Spread(Chips, Chips),
}

impl Limit {
    pub fn new(game: GameType, stage: DealStage, pot: Chips) -> Self {
        match game {
            GameType::NoLimit(_) => Self::No,
            GameType::PotLimit(_) => Self::Pot(pot),
            GameType::FixedLimit(_, big) if stage.is_late() => Self::Fixed(big),
            GameType::FixedLimit(small, _) => Self::Fixed(small),
            GameType::SpreadLimit(min, max) => Self::Spread(min, max),
        }
    }

    /// Smallest legal raise-to total.
    pub fn floor(&self, current_bet: Chips, last_raise: Chips, big_blind: Chips) -> Chips {
        match self {
            Self::No | Self::Pot(_) => current_bet.max(big_blind) + last_raise.max(big_blind),
            Self::Fixed(increment) => current_bet + increment,
            Self::Spread(min, _) => current_bet + min,
        }
    }

    /// Largest legal raise-to total, if the rule has one.
    pub fn ceiling(&self, current_bet: Chips) -> Option<Chips> {
        match self {
            Self::No => None,
            Self::Pot(pot) => Some(*pot),
            Self::Fixed(increment) => Some(current_bet + increment),
            Self::Spread(_, max) => Some(current_bet + max),
        }
    }

    pub fn admits(&self, current_bet: Chips, total: Chips) -> bool {
        self.ceiling(current_bet).is_none_or(|cap| total <= cap)
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::No => write!(f, "no limit"),
            Self::Pot(pot) => write!(f, "pot limit ({})", pot),
            Self::Fixed(increment) => write!(f, "fixed limit ({})", increment),
            Self::Spread(min, max) => write!(f, "spread limit ({}-{})", min, max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_limit_floor_respects_big_blind() {
        let limit = Limit::new(GameType::NoLimit(1), DealStage::Flop, 0);
        assert_eq!(limit.floor(0, 0, 2), 4);
        assert_eq!(limit.floor(2, 0, 2), 4);
        assert_eq!(limit.floor(4, 4, 2), 8);
        assert_eq!(limit.ceiling(4), None);
    }

    #[test]
    fn fixed_limit_switches_bets() {
        let game = GameType::FixedLimit(2, 4);
        let early = Limit::new(game, DealStage::Flop, 10);
        let late = Limit::new(game, DealStage::Turn, 10);
        assert_eq!(early, Limit::Fixed(2));
        assert_eq!(late, Limit::Fixed(4));
        assert_eq!(late.floor(4, 4, 2), 8);
        assert_eq!(late.ceiling(4), Some(8));
    }

    #[test]
    fn pot_limit_caps_at_pot() {
        let limit = Limit::new(GameType::PotLimit(1), DealStage::River, 30);
        assert!(limit.admits(10, 30));
        assert!(!limit.admits(10, 31));
    }

    #[test]
    fn spread_limit_band() {
        let limit = Limit::new(GameType::SpreadLimit(2, 10), DealStage::Flop, 0);
        assert_eq!(limit.floor(6, 0, 2), 8);
        assert_eq!(limit.ceiling(6), Some(16));
    }
}
