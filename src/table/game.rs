use crate::Chips;

/// Bet-limit rule of a table.
///
/// - `NoLimit(small_blind)`: any raise up to the whole stack
/// - `PotLimit(small_blind)`: raises capped by the pot
/// - `FixedLimit(small_bet, big_bet)`: one fixed increment per street
/// - `SpreadLimit(min_bet, max_bet)`: increments within a band
///
/// Text form is `Variant:a[:b]`, e.g. `NoLimit:1` or `FixedLimit:2:4`.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum GameType {
    NoLimit(Chips),
    PotLimit(Chips),
    FixedLimit(Chips, Chips),
    SpreadLimit(Chips, Chips),
}

impl Default for GameType {
    fn default() -> Self {
        Self::NoLimit(1)
    }
}

impl GameType {
    pub fn small_blind(&self) -> Chips {
        match self {
            Self::NoLimit(sb) | Self::PotLimit(sb) => *sb,
            Self::FixedLimit(small, _) => small / 2,
            Self::SpreadLimit(min, _) => min / 2,
        }
    }
    pub fn big_blind(&self) -> Chips {
        match self {
            Self::NoLimit(sb) | Self::PotLimit(sb) => sb * 2,
            Self::FixedLimit(small, _) => *small,
            Self::SpreadLimit(min, _) => *min,
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoLimit(_) => "NoLimit",
            Self::PotLimit(_) => "PotLimit",
            Self::FixedLimit(..) => "FixedLimit",
            Self::SpreadLimit(..) => "SpreadLimit",
        }
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NoLimit(a) | Self::PotLimit(a) => write!(f, "{}:{}", self.name(), a),
            Self::FixedLimit(a, b) | Self::SpreadLimit(a, b) => {
                write!(f, "{}:{}:{}", self.name(), a, b)
            }
        }
    }
}

impl TryFrom<&str> for GameType {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut parts = s.trim().split(':');
        let name = parts.next().unwrap_or_default();
        let amounts = parts
            .map(|p| {
                p.parse::<Chips>()
                    .map_err(|e| anyhow::anyhow!("invalid amount {:?}: {}", p, e))
            })
            .collect::<Result<Vec<Chips>, _>>()?;
        match (name, amounts.as_slice()) {
            ("NoLimit", [a]) => Ok(Self::NoLimit(*a)),
            ("PotLimit", [a]) => Ok(Self::PotLimit(*a)),
            ("FixedLimit", [a, b]) if a <= b => Ok(Self::FixedLimit(*a, *b)),
            ("SpreadLimit", [a, b]) if a <= b => Ok(Self::SpreadLimit(*a, *b)),
            _ => Err(anyhow::anyhow!("invalid game type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants() -> [GameType; 4] {
        [
            GameType::NoLimit(1),
            GameType::FixedLimit(2, 4),
            GameType::PotLimit(5),
            GameType::SpreadLimit(2, 10),
        ]
    }

    #[test]
    fn serde_roundtrip() {
        for game in variants() {
            let json = serde_json::to_string(&game).unwrap();
            assert_eq!(serde_json::from_str::<GameType>(&json).unwrap(), game);
        }
    }

    #[test]
    fn string_roundtrip() {
        for game in variants() {
            let text = game.to_string();
            assert_eq!(GameType::try_from(text.as_str()).unwrap(), game);
        }
    }

    #[test]
    fn wire_shape() {
        let json = serde_json::to_string(&GameType::FixedLimit(2, 4)).unwrap();
        assert_eq!(json, r#"{"FixedLimit":[2,4]}"#);
        assert_eq!(GameType::NoLimit(1).to_string(), "NoLimit:1");
    }

    #[test]
    fn rejects_malformed() {
        assert!(GameType::try_from("NoLimit").is_err());
        assert!(GameType::try_from("NoLimit:x").is_err());
        assert!(GameType::try_from("FixedLimit:4:2").is_err());
        assert!(GameType::try_from("Omaha:1").is_err());
    }

    #[test]
    fn blinds() {
        assert_eq!(GameType::NoLimit(1).big_blind(), 2);
        assert_eq!(GameType::FixedLimit(2, 4).big_blind(), 2);
        assert_eq!(GameType::FixedLimit(2, 4).small_blind(), 1);
    }
}
