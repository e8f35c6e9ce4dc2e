//! Chip movements and sit-out toggles for the local seat.
use crate::Chips;
use crate::canister::Principal;
use crate::canister::TableActor;
use crate::error::InputError;
use crate::modal::Modal;
use crate::modal::Mutation;

/// Deposits, withdrawals and sit-out toggles. Amounts are checked against
/// the balances the caller currently sees; the canister re-checks them.
#[derive(Debug, Clone)]
pub struct Seating {
    user: Principal,
    mutation: Mutation,
}

impl Seating {
    pub fn new(user: Principal, modal: Modal) -> Self {
        Self {
            user,
            mutation: Mutation::new(modal),
        }
    }
    pub fn is_pending(&self) -> bool {
        self.mutation.is_pending()
    }

    fn check(amount: Chips, available: Chips) -> Result<(), InputError> {
        match amount {
            0 => Err(InputError::ZeroAmount),
            n if n > available => Err(InputError::ExceedsBalance(available)),
            _ => Ok(()),
        }
    }

    /// Moves chips from the wallet onto the table.
    pub async fn deposit(
        &self,
        actor: &dyn TableActor,
        amount: Chips,
        wallet: Chips,
    ) -> Result<bool, InputError> {
        Self::check(amount, wallet)?;
        log::info!("[seating] {} deposits {}", self.user.short(), amount);
        let done = self
            .mutation
            .run("Deposit", actor.deposit_to_table(&self.user, amount))
            .await?;
        Ok(done.is_some())
    }

    /// Moves chips from the table back to the wallet.
    pub async fn withdraw(
        &self,
        actor: &dyn TableActor,
        amount: Chips,
        stack: Chips,
    ) -> Result<bool, InputError> {
        Self::check(amount, stack)?;
        log::info!("[seating] {} withdraws {}", self.user.short(), amount);
        let done = self
            .mutation
            .run("Withdraw", actor.withdraw_from_table(&self.user, amount))
            .await?;
        Ok(done.is_some())
    }

    pub async fn sit_out(&self, actor: &dyn TableActor) -> Result<bool, InputError> {
        let done = self
            .mutation
            .run("Sit out", actor.player_sitting_out(&self.user))
            .await?;
        Ok(done.is_some())
    }

    pub async fn sit_in(&self, actor: &dyn TableActor) -> Result<bool, InputError> {
        let done = self
            .mutation
            .run("Sit in", actor.player_sitting_in(&self.user))
            .await?;
        Ok(done.is_some())
    }
}
