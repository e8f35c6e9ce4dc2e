use crate::Chips;
use crate::table::BetType;

/// One button on the HUD.
///
/// Amounts in `Raise` and `AllIn` are raise-to totals for the round;
/// `Call` carries the chips the call actually costs.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Choice {
    Check,
    Call(Chips),
    Raise(Chips),
    Fold,
    AllIn(Chips),
}

impl Choice {
    /// Bet argument for `place_bet`, when the choice goes through it.
    /// An all-in that does not top `facing` is a short call.
    pub fn bet(&self, facing: Chips) -> Option<BetType> {
        match self {
            Self::Call(_) => Some(BetType::Called),
            Self::AllIn(total) if *total <= facing => Some(BetType::Called),
            Self::Raise(total) | Self::AllIn(total) => Some(BetType::Raised(*total)),
            Self::Check | Self::Fold => None,
        }
    }
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Self::Raise(_) | Self::AllIn(_))
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::Call(n) => write!(f, "call {}", n),
            Self::Raise(n) => write!(f, "raise to {}", n),
            Self::Fold => write!(f, "fold"),
            Self::AllIn(n) => write!(f, "all-in {}", n),
        }
    }
}

impl TryFrom<&str> for Choice {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let amount = |n: &str| {
            n.trim()
                .parse::<Chips>()
                .map_err(|e| anyhow::anyhow!("invalid amount {:?}: {}", n, e))
        };
        let lower = s.trim().to_lowercase();
        match lower.split_once(' ') {
            None if lower == "check" => Ok(Self::Check),
            None if lower == "fold" => Ok(Self::Fold),
            Some(("call", n)) => Ok(Self::Call(amount(n)?)),
            Some(("raise", n)) => Ok(Self::Raise(amount(n.trim_start_matches("to "))?)),
            Some(("all-in", n)) => Ok(Self::AllIn(amount(n)?)),
            _ => Err(anyhow::anyhow!("invalid choice: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_bets() {
        assert_eq!(Choice::Call(3).bet(4), Some(BetType::Called));
        assert_eq!(Choice::Raise(8).bet(4), Some(BetType::Raised(8)));
        assert_eq!(Choice::AllIn(100).bet(4), Some(BetType::Raised(100)));
        assert_eq!(Choice::Check.bet(0), None);
        assert_eq!(Choice::Fold.bet(4), None);
    }

    #[test]
    fn short_all_in_is_a_call() {
        assert_eq!(Choice::AllIn(3).bet(10), Some(BetType::Called));
        assert_eq!(Choice::AllIn(10).bet(10), Some(BetType::Called));
        assert_eq!(Choice::AllIn(11).bet(10), Some(BetType::Raised(11)));
    }

    #[test]
    fn parses_display() {
        for choice in [
            Choice::Check,
            Choice::Fold,
            Choice::Call(2),
            Choice::Raise(12),
            Choice::AllIn(98),
        ] {
            let text = choice.to_string();
            assert_eq!(Choice::try_from(text.as_str()).unwrap(), choice);
        }
        assert!(Choice::try_from("bet 5").is_err());
        assert!(Choice::try_from("raise lots").is_err());
    }
}
