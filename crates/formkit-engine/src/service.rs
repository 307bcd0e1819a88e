//! Integration contract
//!
//! A [`FormService`] is one task-management integration: it describes itself,
//! provides a scratch template, implements the load/send round trips and
//! contributes the change rules that should run for its forms. The free
//! builders wrap those round trips in cancellable tasks so callers never
//! block on integration latency.

use std::sync::Arc;

use async_trait::async_trait;

use formkit_model::{Field, Form, FormIcon, FormTemplate, ServiceId};

use crate::error::FormError;
use crate::event::{ChangeTask, EventTask, FormEvent, LoadTask, SendTask};
use crate::rule::{change_task, FieldRule};

/// One integration behind the form engine.
#[async_trait]
pub trait FormService: Send + Sync {
    /// Stable integration identity.
    fn id(&self) -> ServiceId;

    /// Display name.
    fn name(&self) -> &str;

    /// Display icon.
    fn icon(&self) -> FormIcon;

    /// A blank template for starting a new form against this integration.
    fn scratch_template(&self) -> FormTemplate;

    /// The change rules to run for this integration's forms, in dispatch
    /// order.
    fn change_rules(&self) -> Vec<Arc<dyn FieldRule>>;

    /// Fetch remote state and fold it into a deferred mutation, typically
    /// refreshed option lists.
    async fn load(&self, form: &Form) -> Result<FormEvent, FormError>;

    /// Submit the form's values to the integration.
    async fn send(&self, form: &Form) -> Result<(), FormError>;
}

/// Spawn the integration's load round trip against a snapshot of the form.
#[must_use]
pub fn build_load_task(service: &Arc<dyn FormService>, form: &Form) -> LoadTask {
    let service = Arc::clone(service);
    let snapshot = form.clone();
    EventTask::spawn(async move {
        tracing::debug!(form = %snapshot.id, service = %service.id(), "load started");
        service.load(&snapshot).await
    })
}

/// Spawn the integration's send round trip against a snapshot of the form.
///
/// Validation runs inside the task: a submission with invalid fields fails
/// with [`FormError::InvalidInputs`] before the integration is contacted,
/// and `on_success` never runs. On success `on_success` receives the exact
/// snapshot that was submitted, not the possibly edited live form.
#[must_use]
pub fn build_send_task(
    service: &Arc<dyn FormService>,
    form: &Form,
    on_success: impl FnOnce(Form) + Send + 'static,
) -> SendTask {
    let service = Arc::clone(service);
    let snapshot = form.clone();
    EventTask::spawn(async move {
        let invalid = snapshot.invalid_inputs();
        if !invalid.is_empty() {
            tracing::debug!(form = %snapshot.id, count = invalid.len(), "send blocked on invalid inputs");
            return Err(FormError::InvalidInputs(invalid));
        }
        tracing::debug!(form = %snapshot.id, service = %service.id(), "send started");
        service.send(&snapshot).await?;
        on_success(snapshot);
        Ok(())
    })
}

/// Dispatch an edit through the integration's change rules. `None` when no
/// rule cares about this edit.
#[must_use]
pub fn build_change_task(
    service: &Arc<dyn FormService>,
    form: &Form,
    old: &Field,
    new: &Field,
) -> Option<ChangeTask> {
    change_task(&service.change_rules(), form, old, new)
}

/// The set of integrations an application exposes, resolvable by id.
#[derive(Default)]
pub struct Services {
    services: Vec<Arc<dyn FormService>>,
}

impl Services {
    /// Build the registry; order is presentation order.
    #[must_use]
    pub fn new(services: Vec<Arc<dyn FormService>>) -> Self {
        Self { services }
    }

    /// Resolve an integration by id.
    #[must_use]
    pub fn get(&self, id: ServiceId) -> Option<&Arc<dyn FormService>> {
        self.services.iter().find(|s| s.id() == id)
    }

    /// The integration behind a template, by its integration id.
    #[must_use]
    pub fn for_template(&self, template: &FormTemplate) -> Option<&Arc<dyn FormService>> {
        self.get(template.header.integration)
    }

    /// All registered integrations, in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn FormService>> {
        self.services.iter()
    }

    /// Number of registered integrations.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether no integration is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("len", &self.services.len())
            .finish()
    }
}
