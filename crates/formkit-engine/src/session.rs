//! Editing session
//!
//! Owns a live form and drives the pipeline for it: edits are committed
//! immediately, rule work runs on tasks, and mutations are applied back in
//! the order the session settles them. Per input only the newest change
//! task stays pending; the one it supersedes is canceled and its
//! cancellation absorbed as a skip.

use std::collections::HashMap;
use std::sync::Arc;

use formkit_model::{Field, Form, InputId};

use crate::error::FormError;
use crate::event::{ChangeTask, Outcome, SendTask};
use crate::service::{build_change_task, build_load_task, build_send_task, FormService};

/// One user's editing session over one form.
pub struct FormSession {
    service: Arc<dyn FormService>,
    form: Form,
    pending: HashMap<InputId, Arc<ChangeTask>>,
    sending: Option<Arc<SendTask>>,
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("form", &self.form.id)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl FormSession {
    /// Open a session over an existing form instance.
    #[must_use]
    pub fn new(service: Arc<dyn FormService>, form: Form) -> Self {
        Self {
            service,
            form,
            pending: HashMap::new(),
            sending: None,
        }
    }

    /// Open a session on the integration's scratch template.
    #[must_use]
    pub fn scratch(service: Arc<dyn FormService>) -> Self {
        let form = Form::new(service.scratch_template());
        Self::new(service, form)
    }

    /// The live form.
    #[inline]
    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// The session's integration.
    #[inline]
    #[must_use]
    pub fn service(&self) -> &Arc<dyn FormService> {
        &self.service
    }

    /// Commit an edited field and dispatch it through the change rules.
    ///
    /// The edit lands on the form immediately. If a rule matches, its task
    /// becomes the pending task for that input, canceling and superseding
    /// any previous one. Returns the new pending task, `None` when no rule
    /// cared (or the field does not belong to this form).
    pub fn submit_change(&mut self, new: Field) -> Option<Arc<ChangeTask>> {
        let id = new.id();
        let old = self.form.input(id)?.clone();

        if let Some(stale) = self.pending.remove(&id) {
            tracing::trace!(input = %id, "superseding pending change task");
            stale.cancel();
        }
        self.form.inputs.upsert(new.clone());

        let task = Arc::new(build_change_task(&self.service, &self.form, &old, &new)?);
        self.pending.insert(id, Arc::clone(&task));
        Some(task)
    }

    /// Await the pending task of one input and apply what it produced.
    ///
    /// `Skipped` when nothing is pending for the input, or when the task was
    /// superseded while we waited. A task that is no longer the pending one
    /// when it settles is discarded without touching the form.
    pub async fn settle(&mut self, id: InputId) -> Outcome {
        let Some(task) = self.pending.get(&id).cloned() else {
            return Outcome::Skipped;
        };
        let outcome = task.outcome().await.absorb_superseded();

        // Only the task that is still current may mutate.
        let still_current = self
            .pending
            .get(&id)
            .is_some_and(|current| Arc::ptr_eq(current, &task));
        if !still_current {
            return Outcome::Skipped;
        }
        self.pending.remove(&id);
        self.apply(outcome)
    }

    /// Apply a settled outcome to the live form and hand it back.
    pub fn apply(&mut self, outcome: Outcome) -> Outcome {
        if let Outcome::Applied(event) = &outcome {
            event.apply(&mut self.form);
        }
        outcome
    }

    /// Run the integration's load round trip and fold the result into the
    /// form.
    pub async fn load(&mut self) -> Outcome {
        let task = build_load_task(&self.service, &self.form);
        let outcome = task.outcome().await;
        self.apply(outcome)
    }

    /// Submit the form. At most one send is in flight per session; a second
    /// call while the first is unsettled is rejected without contacting the
    /// integration.
    pub fn send(
        &mut self,
        on_success: impl FnOnce(Form) + Send + 'static,
    ) -> Result<Arc<SendTask>, FormError> {
        if let Some(previous) = &self.sending {
            if !previous.is_finished() {
                return Err(FormError::Other("a send is already in flight".into()));
            }
        }
        let task = Arc::new(build_send_task(&self.service, &self.form, on_success));
        self.sending = Some(Arc::clone(&task));
        Ok(task)
    }

    /// Cancel every pending task. The form keeps the committed edits; only
    /// the deferred rule reactions are dropped.
    pub fn cancel_pending(&mut self) {
        for (_, task) in self.pending.drain() {
            task.cancel();
        }
        if let Some(send) = self.sending.take() {
            send.cancel();
        }
    }
}

impl Drop for FormSession {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
