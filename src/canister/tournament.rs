use super::Principal;
use crate::Chips;
use crate::error::TableError;
use crate::tournament::*;

/// RPC surface of a tournament canister.
#[async_trait::async_trait]
pub trait TournamentActor: Send + Sync {
    async fn get_tournament(&self) -> Result<TournamentData, TableError>;
    async fn get_leaderboard(&self) -> Result<Leaderboard, TableError>;
    async fn get_total_prize_pool(&self) -> Result<Chips, TableError>;

    async fn user_join_tournament(&self, user: &Principal) -> Result<(), TableError>;
    async fn user_rebuy_into_tournament(&self, user: &Principal) -> Result<(), TableError>;
    async fn user_reentry_into_tournament(&self, user: &Principal) -> Result<(), TableError>;
    async fn user_refill_chips(&self, user: &Principal) -> Result<(), TableError>;
    async fn deposit_prize_pool(&self, user: &Principal, amount: Chips) -> Result<(), TableError>;
}
