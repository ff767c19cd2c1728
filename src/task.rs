//! Background operations started from the UI.
//!
//! Wraps a spawned tokio task so screens can poll it once per frame
//! without blocking the event loop.

use std::future::Future;
use tokio::task::JoinHandle;

/// How a background operation ended.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    Failure(anyhow::Error),
    Cancelled,
}

/// A running remote call with a success/failure outcome.
#[derive(Debug)]
pub struct PendingOp<T> {
    label: &'static str,
    handle: JoinHandle<anyhow::Result<T>>,
}

impl<T: Send + 'static> PendingOp<T> {
    /// Spawn `future` on the current tokio runtime.
    ///
    /// # Arguments
    /// * `label` - Short name used in logs and status messages
    /// * `future` - The remote call
    pub fn spawn<F>(label: &'static str, future: F) -> Self
    where
        F: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        tracing::debug!(op = label, "starting background operation");
        Self {
            label,
            handle: tokio::spawn(future),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the operation. Its outcome is dropped.
    pub fn cancel(self) {
        tracing::debug!(op = self.label, "cancelling background operation");
        self.handle.abort();
    }

    /// Wait for the operation to end.
    pub async fn join(self) -> Outcome<T> {
        match self.handle.await {
            Ok(Ok(value)) => Outcome::Success(value),
            Ok(Err(e)) => Outcome::Failure(e),
            Err(e) if e.is_cancelled() => Outcome::Cancelled,
            Err(e) => Outcome::Failure(anyhow::anyhow!("{} task panicked: {}", self.label, e)),
        }
    }
}

/// Take the outcome out of `slot` if its operation has finished.
///
/// Leaves a still-running operation in place and returns `None`.
pub async fn take_finished<T: Send + 'static>(slot: &mut Option<PendingOp<T>>) -> Option<Outcome<T>> {
    if !slot.as_ref().is_some_and(PendingOp::is_finished) {
        return None;
    }
    let op = slot.take()?;
    Some(op.join().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_join_success() {
        let op = PendingOp::spawn("add", async { Ok(2 + 2) });
        assert!(matches!(op.join().await, Outcome::Success(4)));
    }

    #[tokio::test]
    async fn test_join_failure() {
        let op: PendingOp<()> = PendingOp::spawn("fail", async { Err(anyhow::anyhow!("boom")) });
        match op.join().await {
            Outcome::Failure(e) => assert_eq!(e.to_string(), "boom"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_take_finished_leaves_running_op() {
        let mut slot = Some(PendingOp::spawn("slow", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }));
        assert!(take_finished(&mut slot).await.is_none());
        assert!(slot.is_some());
        if let Some(op) = slot.take() {
            op.cancel();
        }
    }

    #[tokio::test]
    async fn test_take_finished_empties_slot() {
        let mut slot = Some(PendingOp::spawn("quick", async { Ok("done") }));
        while !slot.as_ref().is_some_and(PendingOp::is_finished) {
            tokio::task::yield_now().await;
        }
        assert!(matches!(take_finished(&mut slot).await, Some(Outcome::Success("done"))));
        assert!(slot.is_none());
        assert!(take_finished(&mut slot).await.is_none());
    }

    #[tokio::test]
    async fn test_cancelled_join() {
        let op = PendingOp::spawn("slow", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        });
        op.handle.abort();
        assert!(matches!(op.join().await, Outcome::Cancelled));
    }
}
