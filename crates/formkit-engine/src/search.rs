//! Debounced typing search for option fields
//!
//! The stock change rule every integration gets for free: when the user
//! types into an option field's search box, wait out the keystroke burst,
//! then filter the visible rows by the search text. Fields without
//! `typing_search` skip instead, so remote-search integrations can register
//! their own rule ahead of this one.

use async_trait::async_trait;

use formkit_model::{Field, FieldVariant, Form, OptionsField};

use crate::config::PipelineConfig;
use crate::error::FormError;
use crate::event::{FormEvent, Reaction};
use crate::rule::ChangeRule;

/// Local, debounced option filtering keyed on the field's search text.
#[derive(Debug, Clone, Default)]
pub struct TypingSearchRule {
    config: PipelineConfig,
}

impl TypingSearchRule {
    /// A rule with the given pipeline tuning.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ChangeRule<OptionsField> for TypingSearchRule {
    fn assess(&self, old: &OptionsField, new: &OptionsField) -> bool {
        old.search != new.search
    }

    async fn execute(
        &self,
        _form: &Form,
        _old: &OptionsField,
        new: &OptionsField,
    ) -> Result<Reaction, FormError> {
        if !new.config.typing_search.value() {
            return Ok(Reaction::Skip);
        }
        tokio::time::sleep(self.config.debounce).await;

        let mut filtered = new.clone();
        filtered.value.filter_by_text(&filtered.search);
        tracing::trace!(input = %filtered.header().id, query = %filtered.search, "search filter settled");
        Ok(Reaction::Mutate(FormEvent::new(move |form: &mut Form| {
            form.inputs.upsert(filtered.clone().into_field());
        })))
    }
}
