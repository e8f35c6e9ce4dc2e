use crate::error::InputError;
use crate::error::TableError;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// A message for the shared error modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn error(title: &str, error: &impl std::fmt::Display) -> Self {
        Self {
            title: title.to_string(),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Sending half of the error modal. Every view that mutates anything holds
/// a clone; whoever renders the modal owns the receiver.
#[derive(Debug, Clone)]
pub struct Modal(UnboundedSender<Notice>);

impl Modal {
    pub fn channel() -> (Self, UnboundedReceiver<Notice>) {
        let (tx, rx) = unbounded_channel();
        (Self(tx), rx)
    }
    pub fn show(&self, notice: Notice) {
        self.0
            .send(notice)
            .err()
            .inspect(|e| log::warn!("[modal] nobody is listening: {}", e.0));
    }
}

/// Runs remote mutations for one view.
///
/// Failures are shown through the modal and swallowed; the snapshot is
/// left alone and the next poll shows whatever the canister decided. The
/// only local state touched is the pending flag, which also rejects a
/// second submission while one is in flight. Nothing is retried.
#[derive(Debug, Clone)]
pub struct Mutation {
    modal: Modal,
    pending: Arc<AtomicBool>,
}

impl Mutation {
    pub fn new(modal: Modal) -> Self {
        Self {
            modal,
            pending: Arc::new(AtomicBool::new(false)),
        }
    }
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }
    pub fn modal(&self) -> &Modal {
        &self.modal
    }
    pub async fn run<T, F>(&self, title: &str, call: F) -> Result<Option<T>, InputError>
    where
        F: Future<Output = Result<T, TableError>>,
    {
        if self.pending.swap(true, Ordering::SeqCst) {
            return Err(InputError::Pending);
        }
        let result = {
            let _release = Release(&self.pending);
            call.await
        };
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("[mutation] {} failed: {}", title, e);
                self.modal.show(Notice::error(title, &e));
                Ok(None)
            }
        }
    }
}

/// Clears the pending flag however the call ends, including when the
/// caller drops it mid-flight.
struct Release<'a>(&'a AtomicBool);

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failure_reaches_modal() {
        let (modal, mut notices) = Modal::channel();
        let mutation = Mutation::new(modal);
        let result = mutation
            .run("Deposit", async { Err::<(), _>(TableError::InsufficientFunds) })
            .await;
        assert_eq!(result, Ok(None));
        assert!(!mutation.is_pending());
        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.title, "Deposit");
        assert_eq!(notice.message, "insufficient funds");
    }

    #[tokio::test]
    async fn success_passes_through() {
        let (modal, mut notices) = Modal::channel();
        let mutation = Mutation::new(modal);
        let result = mutation.run("Check", async { Ok::<_, TableError>(3) }).await;
        assert_eq!(result, Ok(Some(3)));
        assert!(notices.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_submission_releases_pending() {
        let (modal, mut notices) = Modal::channel();
        let mutation = Mutation::new(modal);
        let abandoned = tokio::time::timeout(
            std::time::Duration::from_secs(1),
            mutation.run("Fold", std::future::pending::<Result<(), TableError>>()),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(!mutation.is_pending());
        let retry = mutation.run("Fold", async { Ok::<_, TableError>(()) }).await;
        assert_eq!(retry, Ok(Some(())));
        assert!(notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn rejects_overlapping_submissions() {
        let (modal, _notices) = Modal::channel();
        let mutation = Mutation::new(modal);
        let (release, wait) = tokio::sync::oneshot::channel::<()>();
        let first = mutation.clone();
        let slow = tokio::spawn(async move {
            first
                .run("Fold", async move {
                    wait.await.ok();
                    Ok::<_, TableError>(())
                })
                .await
        });
        while !mutation.is_pending() {
            tokio::task::yield_now().await;
        }
        let second = mutation.run("Fold", async { Ok::<_, TableError>(()) }).await;
        assert_eq!(second, Err(InputError::Pending));
        release.send(()).ok();
        assert_eq!(slow.await.unwrap(), Ok(Some(())));
        assert!(!mutation.is_pending());
    }
}
