use super::*;
use crate::canister::Principal;
use crate::canister::TableActor;
use crate::error::InputError;
use crate::modal::Modal;
use crate::modal::Mutation;
use crate::table::PublicTable;

/// Sends the local player's HUD choices to the table canister.
#[derive(Debug, Clone)]
pub struct Betting {
    user: Principal,
    mutation: Mutation,
}

impl Betting {
    pub fn new(user: Principal, modal: Modal) -> Self {
        Self {
            user,
            mutation: Mutation::new(modal),
        }
    }
    pub fn is_pending(&self) -> bool {
        self.mutation.is_pending()
    }

    /// Validates `choice` against `hud`, then submits it.
    ///
    /// Input problems come back as `Err`. A remote rejection is reported
    /// through the modal and yields `Ok(None)`; the caller keeps showing the
    /// previous snapshot until the next poll.
    pub async fn submit(
        &self,
        actor: &dyn TableActor,
        hud: &HudContext,
        choice: Choice,
    ) -> Result<Option<PublicTable>, InputError> {
        hud.validate(&choice)?;
        log::debug!("[betting] {} submits {}", self.user.short(), choice);
        let user = &self.user;
        let facing = hud.current_bet();
        let title = match choice {
            Choice::Check => "Check",
            Choice::Call(_) => "Call",
            Choice::Raise(_) => "Raise",
            Choice::Fold => "Fold",
            Choice::AllIn(_) => "All-in",
        };
        self.mutation
            .run(title, async move {
                match choice.bet(facing) {
                    Some(bet) => actor.place_bet(user, bet).await,
                    None if choice == Choice::Check => actor.check(user).await,
                    None => actor.fold(user).await,
                }
            })
            .await
    }
}
