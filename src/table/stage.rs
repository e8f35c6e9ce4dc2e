/// Phase of the current hand as reported by the table canister.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum DealStage {
    #[default]
    Fresh,
    Opening,
    Flop,
    Turn,
    River,
    Showdown,
}

impl DealStage {
    /// Stages before any community card is out, where a hand has not
    /// really started from the player's point of view.
    pub fn is_opening(&self) -> bool {
        matches!(self, Self::Fresh | Self::Opening)
    }
    /// Fixed-limit tables switch from the small bet to the big bet here.
    pub fn is_late(&self) -> bool {
        matches!(self, Self::Turn | Self::River | Self::Showdown)
    }
}

impl std::fmt::Display for DealStage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fresh => write!(f, "fresh"),
            Self::Opening => write!(f, "opening"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::River => write!(f, "river"),
            Self::Showdown => write!(f, "showdown"),
        }
    }
}
