use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Why an operation run under a [`Deadline`] did not produce a value
#[derive(Debug, thiserror::Error)]
pub enum DeadlineError<E> {
    #[error("Operation exceeded its {0:?} budget")]
    Elapsed(Duration),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Failed(E),
}

/// Time budget plus cancellation for a fallible future
#[derive(Debug, Clone)]
pub struct Deadline {
    budget: Duration,
    cancel: CancellationToken,
}

impl Deadline {
    pub fn new(budget: Duration, cancel: CancellationToken) -> Self {
        Self { budget, cancel }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Race `fut` against the budget and the cancellation token.
    ///
    /// The future is dropped as soon as either of them fires.
    pub async fn run<F, T, E>(&self, fut: F) -> Result<T, DeadlineError<E>>
    where
        F: Future<Output = Result<T, E>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(DeadlineError::Cancelled),
            result = tokio::time::timeout(self.budget, fut) => match result {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(DeadlineError::Failed(e)),
                Err(_) => Err(DeadlineError::Elapsed(self.budget)),
            },
        }
    }
}
