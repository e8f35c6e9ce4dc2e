use super::*;
use crate::Chips;
use crate::canister::Principal;
use crate::canister::TournamentActor;
use crate::error::ClientError;
use crate::error::InputError;
use crate::modal::Modal;
use crate::modal::Mutation;

/// Buys the local user into a tournament and handles the chip top-ups
/// around it.
#[derive(Debug, Clone)]
pub struct Registrar {
    user: Principal,
    mutation: Mutation,
}

impl Registrar {
    pub fn new(user: Principal, modal: Modal) -> Self {
        Self {
            user,
            mutation: Mutation::new(modal),
        }
    }
    pub fn is_pending(&self) -> bool {
        self.mutation.is_pending()
    }

    pub async fn submit(
        &self,
        actor: &dyn TournamentActor,
        join: JoinType,
    ) -> Result<bool, InputError> {
        log::info!("[registrar] {} {}", self.user.short(), join);
        let user = &self.user;
        let done = match join {
            JoinType::Join(_) => {
                self.mutation
                    .run("Join", actor.user_join_tournament(user))
                    .await?
            }
            JoinType::Late(_) => {
                self.mutation
                    .run("Late registration", actor.user_join_tournament(user))
                    .await?
            }
            JoinType::Rebuy(_) => {
                self.mutation
                    .run("Rebuy", actor.user_rebuy_into_tournament(user))
                    .await?
            }
            JoinType::Reentry(_) => {
                self.mutation
                    .run("Re-entry", actor.user_reentry_into_tournament(user))
                    .await?
            }
        };
        Ok(done.is_some())
    }

    pub async fn refill(&self, actor: &dyn TournamentActor) -> Result<bool, InputError> {
        let done = self
            .mutation
            .run("Refill", actor.user_refill_chips(&self.user))
            .await?;
        Ok(done.is_some())
    }

    pub async fn deposit_prize_pool(
        &self,
        actor: &dyn TournamentActor,
        amount: Chips,
    ) -> Result<bool, InputError> {
        if amount == 0 {
            return Err(InputError::ZeroAmount);
        }
        let done = self
            .mutation
            .run("Prize pool", actor.deposit_prize_pool(&self.user, amount))
            .await?;
        Ok(done.is_some())
    }

    /// Elimination order and prize pool, read together for the lobby.
    pub async fn standings(
        &self,
        actor: &dyn TournamentActor,
    ) -> Result<(Leaderboard, Chips), ClientError> {
        let leaderboard = actor.get_leaderboard().await?;
        let pool = actor.get_total_prize_pool().await?;
        Ok((leaderboard, pool))
    }
}

#[cfg(test)]
mod tests {
    use crate::tournament::join::fixtures::*;
    use super::*;
    use crate::canister::SandboxTournament;
    use crate::error::TableError;
    use crate::timer::ManualClock;
    use std::sync::Arc;

    fn me() -> Principal {
        Principal::from("me")
    }

    fn sandbox(state: TournamentState, now: crate::Nanos) -> SandboxTournament {
        SandboxTournament::with_clock(tournament(state), Arc::new(ManualClock::at(now)))
    }

    async fn option(actor: &SandboxTournament, now: crate::Nanos) -> Option<JoinType> {
        let data = actor.get_tournament().await.unwrap();
        let leaderboard = actor.get_leaderboard().await.unwrap();
        JoinType::derive(&data, &leaderboard, &me(), now)
    }

    #[tokio::test]
    async fn join_then_rebuy() {
        let actor = sandbox(TournamentState::Registration, 0);
        let (modal, _notices) = Modal::channel();
        let registrar = Registrar::new(me(), modal);
        let join = option(&actor, 0).await.unwrap();
        assert_eq!(registrar.submit(&actor, join).await, Ok(true));
        assert_eq!(option(&actor, 0).await, None);
        actor.start();
        actor.set_chips(&me(), 100);
        let rebuy = option(&actor, START).await.unwrap();
        assert_eq!(rebuy, JoinType::Rebuy(50));
        assert_eq!(registrar.submit(&actor, rebuy).await, Ok(true));
        let (_, pool) = registrar.standings(&actor).await.unwrap();
        assert_eq!(pool, 150);
    }

    #[tokio::test]
    async fn reentry_after_elimination() {
        let actor = sandbox(TournamentState::Registration, START);
        let (modal, _notices) = Modal::channel();
        let registrar = Registrar::new(me(), modal);
        assert_eq!(registrar.submit(&actor, JoinType::Join(100)).await, Ok(true));
        actor.start();
        actor.eliminate(&me());
        let reentry = option(&actor, START).await.unwrap();
        assert_eq!(reentry, JoinType::Reentry(80));
        assert_eq!(registrar.submit(&actor, reentry).await, Ok(true));
        let data = actor.get_tournament().await.unwrap();
        assert_eq!(data.player(&me()).map(|p| p.chips), Some(1_500));
    }

    #[tokio::test]
    async fn refusal_reaches_modal() {
        let actor = sandbox(TournamentState::Registration, 0);
        actor.fail_next(TableError::TableFull);
        let (modal, mut notices) = Modal::channel();
        let registrar = Registrar::new(me(), modal);
        assert_eq!(registrar.submit(&actor, JoinType::Join(100)).await, Ok(false));
        assert!(!registrar.is_pending());
        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.title, "Join");
        assert_eq!(notice.message, "table is full");
    }

    #[tokio::test]
    async fn prize_pool_and_refill() {
        let actor = sandbox(TournamentState::Registration, 0);
        let (modal, _notices) = Modal::channel();
        let registrar = Registrar::new(me(), modal);
        assert_eq!(
            registrar.deposit_prize_pool(&actor, 0).await,
            Err(InputError::ZeroAmount)
        );
        assert_eq!(registrar.deposit_prize_pool(&actor, 25).await, Ok(true));
        assert_eq!(registrar.refill(&actor).await, Ok(false));
        assert_eq!(actor.get_total_prize_pool().await, Ok(25));
    }

    #[tokio::test]
    async fn missing_tournament_is_reported() {
        let actor = sandbox(TournamentState::Running, 0);
        actor.vanish();
        let (modal, _notices) = Modal::channel();
        let registrar = Registrar::new(me(), modal);
        assert_eq!(
            registrar.standings(&actor).await,
            Err(ClientError::Remote(TableError::TournamentNotFound))
        );
    }
}
