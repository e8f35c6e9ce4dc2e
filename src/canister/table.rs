use super::Principal;
use crate::Chips;
use crate::Nanos;
use crate::cards::Card;
use crate::chat::ChatMessage;
use crate::error::TableError;
use crate::table::*;

/// RPC surface of a table canister.
///
/// Implementations carry whatever agent or transport they need; the
/// derived-state layer only sees snapshots and tagged failures.
#[async_trait::async_trait]
pub trait TableActor: Send + Sync {
    async fn get_table(&self) -> Result<PublicTable, TableError>;

    async fn place_bet(&self, user: &Principal, bet: BetType) -> Result<PublicTable, TableError>;
    async fn check(&self, user: &Principal) -> Result<PublicTable, TableError>;
    async fn fold(&self, user: &Principal) -> Result<PublicTable, TableError>;

    async fn deposit_to_table(&self, user: &Principal, amount: Chips) -> Result<(), TableError>;
    async fn withdraw_from_table(&self, user: &Principal, amount: Chips) -> Result<(), TableError>;
    async fn player_sitting_out(&self, user: &Principal) -> Result<(), TableError>;
    async fn player_sitting_in(&self, user: &Principal) -> Result<(), TableError>;

    async fn send_chat_message(&self, user: &Principal, message: String) -> Result<(), TableError>;
    /// Up to `limit` newest messages at or after `since`.
    async fn get_recent_chat_messages(
        &self,
        since: Option<Nanos>,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, TableError>;

    async fn rank_cards(&self, cards: Vec<Card>) -> Result<String, TableError>;
}
