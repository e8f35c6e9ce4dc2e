use super::rank::Rank;
use super::suit::Suit;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// A hole or community card. Travels over the wire in its short text
/// form (`As`, `Td`) so snapshots stay readable in fixtures.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0-51
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        u8::from(c.suit) + u8::from(c.rank) * 4
    }
}
impl TryFrom<u8> for Card {
    type Error = String;
    fn try_from(n: u8) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            rank: Rank::try_from(n / 4)?,
            suit: Suit::try_from(n % 4)?,
        })
    }
}

/// str isomorphism
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let s = s.trim();
        match (s.get(0..1), s.get(1..2), s.len()) {
            (Some(rank), Some(suit), 2) => Ok(Self {
                rank: Rank::try_from(rank)?,
                suit: Suit::try_from(suit)?,
            }),
            _ => Err(format!("invalid card str: {}", s)),
        }
    }
}
impl TryFrom<String> for Card {
    type Error = String;
    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Self::try_from(s.as_str())
    }
}
impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
