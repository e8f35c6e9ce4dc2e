//! Fixed-interval snapshot refresh.
use crate::canister::TableActor;
use crate::canister::TournamentActor;
use crate::error::ClientError;
use crate::error::TableError;
use crate::table::PublicTable;
use crate::tournament::Leaderboard;
use crate::tournament::TournamentData;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Keeps the latest snapshot of something remote.
///
/// Publishes `None` until the first successful fetch. A missing table or
/// tournament ends the loop and is handed back from `join`; anything else
/// is logged and retried on the next tick. Dropping the poller stops it.
#[derive(Debug)]
pub struct Poller<T> {
    rx: watch::Receiver<Option<T>>,
    task: JoinHandle<Result<(), ClientError>>,
}

impl<T> Poller<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn spawn<F, Fut>(every: std::time::Duration, mut fetch: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, TableError>> + Send,
    {
        let (tx, rx) = watch::channel(None);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                match fetch().await {
                    Ok(next) => {
                        tx.send_if_modified(|current| match current.as_ref() == Some(&next) {
                            true => false,
                            false => {
                                *current = Some(next);
                                true
                            }
                        });
                    }
                    Err(e @ (TableError::TableNotFound | TableError::TournamentNotFound)) => {
                        log::warn!("[poll] giving up: {}", e);
                        return Err(ClientError::from(e));
                    }
                    Err(e) => log::warn!("[poll] refresh failed, retrying: {}", e),
                }
            }
        });
        Self { rx, task }
    }
    pub fn latest(&self) -> Option<T> {
        self.rx.borrow().clone()
    }
    pub fn watch(&self) -> watch::Receiver<Option<T>> {
        self.rx.clone()
    }
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
    /// Waits for the loop to end and returns why it did.
    pub async fn join(mut self) -> Result<(), ClientError> {
        (&mut self.task)
            .await
            .map_err(|e| ClientError::Environment(e.to_string()))?
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl Poller<PublicTable> {
    pub fn table(actor: Arc<dyn TableActor>, every: std::time::Duration) -> Self {
        Self::spawn(every, move || {
            let actor = actor.clone();
            async move { actor.get_table().await }
        })
    }
}

impl Poller<TournamentData> {
    pub fn tournament(actor: Arc<dyn TournamentActor>) -> Self {
        Self::spawn(crate::TOURNAMENT_POLL, move || {
            let actor = actor.clone();
            async move { actor.get_tournament().await }
        })
    }
}

impl Poller<Leaderboard> {
    pub fn leaderboard(actor: Arc<dyn TournamentActor>) -> Self {
        Self::spawn(crate::TOURNAMENT_POLL, move || {
            let actor = actor.clone();
            async move { actor.get_leaderboard().await }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canister::Sandbox;
    use crate::table::GameType;
    use crate::table::fixtures::TableBuilder;
    use std::time::Duration;

    fn sandbox() -> Arc<Sandbox> {
        Arc::new(Sandbox::new(
            TableBuilder::new(GameType::NoLimit(1))
                .seat("alice", 0, 100)
                .build(),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_snapshots() {
        let sandbox = sandbox();
        let poller = Poller::table(sandbox.clone(), crate::TABLE_POLL);
        let mut rx = poller.watch();
        rx.changed().await.unwrap();
        assert_eq!(poller.latest(), Some(sandbox.snapshot()));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures() {
        let sandbox = sandbox();
        sandbox.fail_next(TableError::CanisterCallFailed(String::from("busy")));
        let poller = Poller::table(sandbox.clone(), crate::TABLE_POLL);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(poller.latest(), None);
        tokio::time::sleep(crate::TABLE_POLL * 2).await;
        assert!(poller.latest().is_some());
        assert!(poller.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn missing_table_ends_the_loop() {
        let sandbox = sandbox();
        sandbox.vanish();
        let poller = Poller::table(sandbox.clone(), crate::TABLE_POLL);
        assert_eq!(poller.join().await, Err(ClientError::TableNotFound));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_dropped() {
        let sandbox = sandbox();
        let poller = Poller::table(sandbox.clone(), crate::TABLE_POLL);
        tokio::time::sleep(crate::TABLE_POLL * 2).await;
        drop(poller);
        tokio::task::yield_now().await;
        let calls = sandbox.calls();
        tokio::time::sleep(crate::TABLE_POLL * 5).await;
        assert_eq!(sandbox.calls(), calls);
    }
}
