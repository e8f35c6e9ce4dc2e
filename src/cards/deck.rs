use super::card::Card;
use super::rank::Rank;
use super::suit::Suit;
use rand::seq::SliceRandom;

/// Shuffled 52-card deck. Only the sandbox deals from it; live tables
/// receive their cards from the canister.
#[derive(Debug, Clone)]
pub struct Deck(Vec<Card>);

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Deck {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop()
    }
}

impl Deck {
    pub fn new() -> Self {
        let ref mut rng = rand::rng();
        let mut cards = Rank::all()
            .into_iter()
            .flat_map(|r| Suit::all().into_iter().map(move |s| Card::from((r, s))))
            .collect::<Vec<Card>>();
        cards.shuffle(rng);
        Self(cards)
    }
    pub fn size(&self) -> usize {
        self.0.len()
    }
    /// remove two cards from the deck to deal as hole cards
    pub fn hole(&mut self) -> Vec<Card> {
        self.0.split_off(self.0.len().saturating_sub(2))
    }
}
