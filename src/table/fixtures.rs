use super::*;
use crate::Chips;
use crate::Nanos;
use crate::canister::Principal;

/// Snapshot builder for tests.
pub struct TableBuilder(PublicTable);

impl TableBuilder {
    pub fn new(game_type: GameType) -> Self {
        Self(PublicTable {
            id: Principal::from("table-1"),
            config: TableConfig {
                name: String::from("fixture"),
                game_type,
                ..TableConfig::default()
            },
            seats: vec![SeatStatus::Empty; 6],
            small_blind: game_type.small_blind(),
            big_blind: game_type.big_blind(),
            deal_stage: DealStage::Flop,
            ..PublicTable::default()
        })
    }
    pub fn stage(mut self, stage: DealStage) -> Self {
        self.0.deal_stage = stage;
        self
    }
    pub fn seat(mut self, who: &str, committed: Chips, balance: Chips) -> Self {
        let principal = Principal::from(who);
        if let Some(slot) = self.0.seats.iter_mut().find(|s| s.is_empty()) {
            *slot = SeatStatus::Occupied(principal.clone());
        }
        self.0.users.insert(
            principal,
            UserTableData {
                current_total_bet: committed,
                total_bet: committed,
                balance,
                ..UserTableData::default()
            },
        );
        self
    }
    pub fn action(mut self, who: &str, action: PlayerAction) -> Self {
        if let Some(data) = self.0.users.get_mut(&Principal::from(who)) {
            data.player_action = action;
        }
        self
    }
    pub fn pot(mut self, pot: Chips) -> Self {
        self.0.pot = pot;
        self
    }
    pub fn last_raise(mut self, raise: Chips) -> Self {
        self.0.last_raise = raise;
        self
    }
    pub fn turn(mut self, who: &str) -> Self {
        if let Some(i) = self.0.position(&Principal::from(who)) {
            self.0.current_player_index = i;
        }
        self
    }
    pub fn timer(mut self, started: Nanos) -> Self {
        self.0.last_timer_started_timestamp = Some(started);
        self
    }
    pub fn duration(mut self, seconds: u16) -> Self {
        self.0.config.timer_duration = seconds;
        self
    }
    pub fn winners(mut self, who: &[&str]) -> Self {
        self.0.winners = Some(who.iter().map(|w| Principal::from(*w)).collect());
        self
    }
    pub fn queue(mut self, item: QueueItem) -> Self {
        self.0.queue.push(item);
        self
    }
    pub fn build(mut self) -> PublicTable {
        self.0.highest_bet = self
            .0
            .users
            .values()
            .map(|u| u.current_total_bet)
            .max()
            .unwrap_or(0);
        self.0
    }
}
