use super::*;
use crate::Chips;
use crate::Position;
use crate::canister::Principal;
use crate::table::*;

/// A hand is in progress once the opening stages are over and until a
/// winner has been decided.
pub fn ongoing(table: &PublicTable) -> bool {
    !table.has_winner() && !table.deal_stage.is_opening()
}

/// Current view-model of one table, derived from a single snapshot and
/// the local identity. Nothing here fails: absent data reads as `None`,
/// `0` or `false`.
#[derive(Debug, Clone)]
pub struct TableContext {
    table: PublicTable,
    local: Option<Principal>,
    seats: Vec<SeatMetaData>,
}

impl TableContext {
    pub fn new(table: PublicTable, local: Option<Principal>, directory: &Directory) -> Self {
        let seats = table
            .seats
            .iter()
            .map(|status| SeatMetaData::new(status, &table, directory))
            .collect::<Vec<SeatMetaData>>();
        Self {
            table,
            local,
            seats,
        }
    }

    pub fn table(&self) -> &PublicTable {
        &self.table
    }
    pub fn local(&self) -> Option<&Principal> {
        self.local.as_ref()
    }
    pub fn seats(&self) -> &[SeatMetaData] {
        &self.seats
    }

    pub fn own_position(&self) -> Option<Position> {
        self.local
            .as_ref()
            .and_then(|me| self.seats.iter().position(|s| s.occupant() == Some(me)))
    }
    pub fn own(&self) -> Option<&SeatMetaData> {
        self.own_position().and_then(|i| self.seats.get(i))
    }
    pub fn own_data(&self) -> Option<&UserTableData> {
        self.own().and_then(|s| s.data.as_ref())
    }
    pub fn is_joined(&self) -> bool {
        self.own_position().is_some()
    }

    /// Largest contribution to the current betting round.
    pub fn current_bet(&self) -> Chips {
        self.seats
            .iter()
            .map(SeatMetaData::committed)
            .max()
            .unwrap_or(0)
    }
    pub fn is_ongoing(&self) -> bool {
        ongoing(&self.table)
    }
    pub fn is_my_turn(&self) -> bool {
        self.is_ongoing() && self.own_position() == Some(self.table.current_player_index)
    }
    /// The local user has an operation waiting for the next hand.
    pub fn is_queued(&self) -> bool {
        self.local
            .as_ref()
            .is_some_and(|me| self.table.queue.iter().any(|q| q.user() == Some(me)))
    }
    pub fn pot(&self) -> Chips {
        self.table.pot
    }
    pub fn big_blind(&self) -> Chips {
        self.table.big_blind
    }
}
