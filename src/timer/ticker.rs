use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Recomputes a derived value on a fixed cadence and publishes it.
///
/// The value is computed once up front, so `latest` is meaningful before the
/// first tick. Subscribers are only woken when the value changes. The task
/// lives exactly as long as the `Ticker`: dropping it cancels the loop.
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct Ticker<T> {
    rx: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Ticker<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn spawn<F>(cadence: std::time::Duration, mut derive: F) -> Self
    where
        F: FnMut() -> T + Send + 'static,
    {
        let (tx, rx) = watch::channel(derive());
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(cadence);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let next = derive();
                tx.send_if_modified(|current| {
                    if *current != next {
                        *current = next;
                        true
                    } else {
                        false
                    }
                });
            }
        });
        Self { rx, task }
    }
    pub fn latest(&self) -> T {
        self.rx.borrow().clone()
    }
    pub fn watch(&self) -> watch::Receiver<T> {
        self.rx.clone()
    }
    pub fn cancel(self) {
        log::debug!("[ticker] cancelled");
    }
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl<T> Drop for Ticker<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
