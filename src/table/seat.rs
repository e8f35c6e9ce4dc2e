use crate::Nanos;
use crate::canister::Principal;

/// Occupancy of one chair at the table.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum SeatStatus {
    #[default]
    Empty,
    Reserved {
        principal: Principal,
        timestamp: Nanos,
    },
    Occupied(Principal),
    QueuedForNextRound(Principal),
}

impl SeatStatus {
    pub fn occupant(&self) -> Option<&Principal> {
        match self {
            Self::Empty => None,
            Self::Reserved { principal, .. } => Some(principal),
            Self::Occupied(principal) => Some(principal),
            Self::QueuedForNextRound(principal) => Some(principal),
        }
    }
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
    /// Dealt into the current hand, as opposed to waiting for the next one.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }
}
