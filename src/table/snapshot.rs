use super::*;
use crate::Chips;
use crate::Nanos;
use crate::Position;
use crate::canister::Principal;
use crate::cards::Card;
use std::collections::BTreeMap;

/// Cash game or a table spawned by a tournament.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum TableType {
    #[default]
    Cash,
    Tournament(Principal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub game_type: GameType,
    pub seats: u8,
    /// Seconds each player gets per turn.
    pub timer_duration: u16,
    pub max_inactive_turns: u16,
    pub table_type: TableType,
    pub is_private: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            game_type: GameType::default(),
            seats: 6,
            timer_duration: crate::TURN_SECONDS,
            max_inactive_turns: 3,
            table_type: TableType::Cash,
            is_private: false,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SidePot {
    pub pot: Chips,
    pub highest_bet: Chips,
    pub user_principals: Vec<Principal>,
}

/// Full state of a table at one point in time, as returned by `get_table`.
///
/// Snapshots are immutable from the client's side: every change goes
/// through an RPC and shows up in the next poll.
#[derive(Debug, Default, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PublicTable {
    pub id: Principal,
    pub config: TableConfig,
    pub seats: Vec<SeatStatus>,
    pub users: BTreeMap<Principal, UserTableData>,
    pub community_cards: Vec<Card>,
    /// Includes the bets of the current round.
    pub pot: Chips,
    pub side_pots: Vec<SidePot>,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub deal_stage: DealStage,
    pub dealer_position: Position,
    pub current_player_index: Position,
    pub highest_bet: Chips,
    /// Size of the last raise increment this round.
    pub last_raise: Chips,
    pub winners: Option<Vec<Principal>>,
    pub action_logs: Vec<ActionLog>,
    pub queue: Vec<QueueItem>,
    pub last_timer_started_timestamp: Option<Nanos>,
}

impl PublicTable {
    pub fn data(&self, user: &Principal) -> Option<&UserTableData> {
        self.users.get(user)
    }
    pub fn position(&self, user: &Principal) -> Option<Position> {
        self.seats.iter().position(|s| s.occupant() == Some(user))
    }
    pub fn has_winner(&self) -> bool {
        self.winners.as_ref().is_some_and(|w| !w.is_empty())
    }
    /// Occupant of the seat whose turn it is.
    pub fn actor(&self) -> Option<&Principal> {
        self.seats
            .get(self.current_player_index)
            .and_then(SeatStatus::occupant)
    }
    pub fn timer_duration(&self) -> u16 {
        self.config.timer_duration
    }
    pub fn occupied(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_empty()).count()
    }
}
