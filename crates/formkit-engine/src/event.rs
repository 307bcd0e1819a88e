//! Deferred mutations and cancellable tasks
//!
//! Rules never touch the live form from their worker task. They return a
//! [`FormEvent`], a deferred mutation the owner of the form applies on its
//! own schedule. The task wrapper memoizes its result so any number of
//! observers see the same settled outcome, and cancellation aborts the
//! worker without tearing anything else down.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};

use tokio::sync::Mutex;
use tokio::task::{AbortHandle, JoinHandle};

use formkit_model::Form;

use crate::error::FormError;

/// A deferred form mutation.
///
/// Cheap to clone and safe to replay: applying the same event to the same
/// form state produces the same result.
#[derive(Clone)]
pub struct FormEvent {
    apply: Arc<dyn Fn(&mut Form) + Send + Sync>,
}

impl FormEvent {
    /// Wrap a mutation closure.
    pub fn new(apply: impl Fn(&mut Form) + Send + Sync + 'static) -> Self {
        Self {
            apply: Arc::new(apply),
        }
    }

    /// Run the mutation against a live form.
    #[inline]
    pub fn apply(&self, form: &mut Form) {
        (self.apply)(form);
    }
}

impl fmt::Debug for FormEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEvent").finish_non_exhaustive()
    }
}

/// What a change rule decided to do.
#[derive(Debug, Clone)]
pub enum Reaction {
    /// The rule produced a deferred mutation.
    Mutate(FormEvent),
    /// The rule ran and deliberately chose to do nothing.
    Skip,
}

/// Settled result of one pipeline task, as seen by the form's owner.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Work completed with a mutation to apply.
    Applied(FormEvent),
    /// Work completed without any mutation.
    Skipped,
    /// Work failed; cancellation surfaces as `Failed(FormError::Canceled)`.
    Failed(FormError),
}

impl Outcome {
    /// Whether the outcome carries a mutation.
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Collapse a cancellation into a skip. Used by callers that superseded
    /// the task themselves: their own cancellation is not a failure.
    #[must_use]
    pub fn absorb_superseded(self) -> Self {
        match self {
            Self::Failed(err) if err.is_canceled() => Self::Skipped,
            other => other,
        }
    }
}

/// A spawned, cancellable unit of pipeline work.
///
/// The first `result` call joins the worker and memoizes what it produced;
/// later calls (and concurrent ones) observe the same value. Dropping the
/// task does not cancel it, `cancel` does.
pub struct EventTask<T> {
    handle: Mutex<Option<JoinHandle<Result<T, FormError>>>>,
    abort: AbortHandle,
    settled: OnceLock<Result<T, FormError>>,
}

impl<T> fmt::Debug for EventTask<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTask")
            .field("settled", &self.settled.get().is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + 'static> EventTask<T> {
    /// Spawn the work on the runtime.
    #[must_use]
    pub fn spawn(work: impl Future<Output = Result<T, FormError>> + Send + 'static) -> Self {
        let handle = tokio::spawn(work);
        let abort = handle.abort_handle();
        Self {
            handle: Mutex::new(Some(handle)),
            abort,
            settled: OnceLock::new(),
        }
    }

    /// Abort the worker. Safe to call at any time, including after the task
    /// already finished, and from observers that only hold a shared reference.
    pub fn cancel(&self) {
        self.abort.abort();
    }

    /// Whether the worker has run to completion or been aborted.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.abort.is_finished()
    }

    /// Await the settled result. Every observer sees the same value; an
    /// aborted worker settles as [`FormError::Canceled`].
    pub async fn result(&self) -> Result<T, FormError> {
        if let Some(settled) = self.settled.get() {
            return settled.clone();
        }
        let mut slot = self.handle.lock().await;
        if let Some(settled) = self.settled.get() {
            return settled.clone();
        }
        let Some(handle) = slot.take() else {
            // Raced with another awaiter that settled under the lock.
            return self.settled.get().cloned().unwrap_or(Err(FormError::Canceled));
        };
        let outcome = match handle.await {
            Ok(result) => result,
            Err(join) if join.is_cancelled() => Err(FormError::Canceled),
            Err(join) => Err(FormError::Other(join.to_string())),
        };
        let _ = self.settled.set(outcome.clone());
        outcome
    }
}

/// Task flavor produced by change rules.
pub type ChangeTask = EventTask<Reaction>;

/// Task flavor produced by a load round trip.
pub type LoadTask = EventTask<FormEvent>;

/// Task flavor produced by a send round trip.
pub type SendTask = EventTask<()>;

impl EventTask<Reaction> {
    /// Settle and fold into the three-way outcome.
    pub async fn outcome(&self) -> Outcome {
        match self.result().await {
            Ok(Reaction::Mutate(event)) => Outcome::Applied(event),
            Ok(Reaction::Skip) => Outcome::Skipped,
            Err(err) => Outcome::Failed(err),
        }
    }
}

impl EventTask<FormEvent> {
    /// Settle and fold into the three-way outcome. Loads always mutate on
    /// success, so a settled `Ok` is always `Applied`.
    pub async fn outcome(&self) -> Outcome {
        match self.result().await {
            Ok(event) => Outcome::Applied(event),
            Err(err) => Outcome::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn every_observer_sees_the_same_settled_value() {
        let task = Arc::new(EventTask::spawn(async { Ok(7_u32) }));
        let (a, b) = tokio::join!(task.result(), task.result());
        assert_eq!(a, Ok(7));
        assert_eq!(b, Ok(7));
        assert_eq!(task.result().await, Ok(7));
    }

    #[tokio::test]
    async fn cancel_settles_as_canceled() {
        let task: EventTask<u32> = EventTask::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        });
        task.cancel();
        assert_eq!(task.result().await, Err(FormError::Canceled));
        // Memoized, not re-joined.
        assert_eq!(task.result().await, Err(FormError::Canceled));
    }

    #[tokio::test]
    async fn cancel_after_completion_keeps_the_result() {
        let task = EventTask::spawn(async { Ok("done".to_string()) });
        assert_eq!(task.result().await, Ok("done".to_string()));
        task.cancel();
        assert_eq!(task.result().await, Ok("done".to_string()));
    }

    #[tokio::test]
    async fn change_outcomes_fold_three_ways() {
        let skip = ChangeTask::spawn(async { Ok(Reaction::Skip) });
        assert!(matches!(skip.outcome().await, Outcome::Skipped));

        let fail = ChangeTask::spawn(async { Err(FormError::Other("nope".into())) });
        assert!(matches!(fail.outcome().await, Outcome::Failed(_)));

        let mutate = ChangeTask::spawn(async { Ok(Reaction::Mutate(FormEvent::new(|_| {}))) });
        assert!(mutate.outcome().await.is_applied());
    }

    #[tokio::test]
    async fn superseded_cancellation_absorbs_into_skip() {
        let task: ChangeTask = EventTask::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Reaction::Skip)
        });
        task.cancel();
        let outcome = task.outcome().await.absorb_superseded();
        assert!(matches!(outcome, Outcome::Skipped));

        let real_failure = Outcome::Failed(FormError::Other("boom".into()));
        assert!(matches!(
            real_failure.absorb_superseded(),
            Outcome::Failed(_)
        ));
    }
}
