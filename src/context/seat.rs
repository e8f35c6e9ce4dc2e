use super::Directory;
use crate::canister::Principal;
use crate::table::*;

/// Per-seat projection of a snapshot, recomputed on every poll.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeatMetaData {
    pub status: SeatStatus,
    pub data: Option<UserTableData>,
    pub user: Option<User>,
    pub canister_id: Option<Principal>,
}

impl SeatMetaData {
    pub fn new(status: &SeatStatus, table: &PublicTable, directory: &Directory) -> Self {
        let occupant = status.occupant();
        Self {
            status: status.clone(),
            data: occupant.and_then(|p| table.data(p)).cloned(),
            user: occupant.and_then(|p| directory.user(p)).cloned(),
            canister_id: occupant.and_then(|p| directory.canister(p)).cloned(),
        }
    }
    pub fn occupant(&self) -> Option<&Principal> {
        self.status.occupant()
    }
    pub fn committed(&self) -> crate::Chips {
        self.data.as_ref().map_or(0, |d| d.current_total_bet)
    }
    /// Name to show on the seat plate.
    pub fn label(&self) -> String {
        match (&self.user, self.occupant()) {
            (Some(user), _) if !user.user_name.is_empty() => user.user_name.clone(),
            (_, Some(principal)) => principal.short(),
            (_, None) => String::from("empty"),
        }
    }
}
