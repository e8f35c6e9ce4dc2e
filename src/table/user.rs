use super::PlayerAction;
use crate::Chips;
use crate::cards::Card;
use crate::canister::Principal;

/// Per-hand state of one seated user, owned by the table canister.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct UserTableData {
    pub player_action: PlayerAction,
    /// Chips put in during the current betting round.
    pub current_total_bet: Chips,
    /// Chips put in during the whole hand.
    pub total_bet: Chips,
    /// Chips behind, not yet committed.
    pub balance: Chips,
    pub inactive_turns: u16,
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// Profile held by a users canister.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct User {
    pub principal_id: Principal,
    pub users_canister_id: Principal,
    pub user_name: String,
    /// Wallet balance, outside any table.
    pub balance: Chips,
    pub experience_points: u64,
}
