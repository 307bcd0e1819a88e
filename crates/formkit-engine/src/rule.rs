//! Change rules
//!
//! A rule watches one field kind and reacts to edits of it. Rules are
//! written against the concrete variant ([`ChangeRule`]) and erased to a
//! uniform object ([`FieldRule`]) so an integration can hand the pipeline a
//! heterogeneous list. Dispatch is first-match: for any edit at most one
//! rule fires, in registration order.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use formkit_model::{Field, FieldVariant, Form, Tag};

use crate::error::FormError;
use crate::event::{ChangeTask, EventTask, Reaction};

/// A rule over one concrete field variant.
#[async_trait]
pub trait ChangeRule<V: FieldVariant>: Send + Sync {
    /// Cheap, synchronous gate: does this edit concern the rule at all?
    /// Runs on the caller's thread, so it must not block.
    fn assess(&self, old: &V, new: &V) -> bool;

    /// The reaction body, run on a worker task against snapshots. Returns
    /// the rule's decision; deliberate no-ops are `Reaction::Skip`, not
    /// errors.
    async fn execute(&self, form: &Form, old: &V, new: &V) -> Result<Reaction, FormError>;
}

/// A type-erased rule over the field sum type. Obtained from [`erase`];
/// an edit of a different variant never matches.
#[async_trait]
pub trait FieldRule: Send + Sync {
    /// Variant check plus the typed `assess` gate.
    fn applies(&self, old: &Field, new: &Field) -> bool;

    /// Run the typed body against owned snapshots.
    async fn run(&self, form: Form, old: Field, new: Field) -> Result<Reaction, FormError>;
}

struct Erased<V, R> {
    rule: R,
    variant: PhantomData<fn() -> V>,
}

#[async_trait]
impl<V, R> FieldRule for Erased<V, R>
where
    V: FieldVariant,
    R: ChangeRule<V>,
{
    fn applies(&self, old: &Field, new: &Field) -> bool {
        match (V::peek(old), V::peek(new)) {
            (Some(old), Some(new)) => self.rule.assess(old, new),
            _ => false,
        }
    }

    async fn run(&self, form: Form, old: Field, new: Field) -> Result<Reaction, FormError> {
        let (Some(old), Some(new)) = (V::peek(&old), V::peek(&new)) else {
            return Ok(Reaction::Skip);
        };
        self.rule.execute(&form, old, new).await
    }
}

/// Erase a typed rule into the uniform rule object.
#[must_use]
pub fn erase<V, R>(rule: R) -> Arc<dyn FieldRule>
where
    V: FieldVariant,
    R: ChangeRule<V> + 'static,
{
    Arc::new(Erased {
        rule,
        variant: PhantomData,
    })
}

/// Cross-field lookup for rule bodies that read a sibling field by tag,
/// hidden fields included. A missing field is a hard failure: the rule was
/// authored against a template shape the form no longer has.
pub fn require_by_tag(form: &Form, tag: Tag) -> Result<&Field, FormError> {
    form.input_by_tag(tag, true)
        .ok_or(FormError::MissingInput(tag))
}

/// First-match dispatch: find the first registered rule whose gate accepts
/// this edit and spawn its body against snapshots of the form and both
/// field states. `None` when no rule cares, so callers skip spawning
/// entirely.
#[must_use]
pub fn change_task(
    rules: &[Arc<dyn FieldRule>],
    form: &Form,
    old: &Field,
    new: &Field,
) -> Option<ChangeTask> {
    let rule = rules.iter().find(|rule| rule.applies(old, new))?.clone();
    tracing::debug!(input = %new.id(), kind = new.kind(), "change rule fired");
    let form = form.clone();
    let old = old.clone();
    let new = new.clone();
    Some(EventTask::spawn(
        async move { rule.run(form, old, new).await },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_model::{
        BoolField, Fields, FormHeader, FormStyle, FormTemplate, Header, ServiceId, TextField,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRule {
        fires: Arc<AtomicUsize>,
        accept: bool,
    }

    #[async_trait]
    impl ChangeRule<TextField> for CountingRule {
        fn assess(&self, old: &TextField, new: &TextField) -> bool {
            self.accept && old.value != new.value
        }

        async fn execute(
            &self,
            _form: &Form,
            _old: &TextField,
            _new: &TextField,
        ) -> Result<Reaction, FormError> {
            self.fires.fetch_add(1, Ordering::SeqCst);
            Ok(Reaction::Skip)
        }
    }

    fn form_with(field: Field) -> Form {
        let inputs: Fields = [field].into_iter().collect();
        let header = FormHeader::new(FormStyle::new("test"), ServiceId::new());
        Form::new(FormTemplate::new(header, inputs, Vec::new()))
    }

    fn edited_text() -> (Field, Field) {
        let old = TextField::new(Header::new("title", "pencil"));
        let new = old.clone().with_value("edited");
        (old.into_field(), new.into_field())
    }

    #[tokio::test]
    async fn only_the_first_matching_rule_fires() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let rules = vec![
            erase(CountingRule {
                fires: first.clone(),
                accept: false,
            }),
            erase(CountingRule {
                fires: second.clone(),
                accept: true,
            }),
            erase(CountingRule {
                fires: second.clone(),
                accept: true,
            }),
        ];

        let (old, new) = edited_text();
        let form = form_with(old.clone());
        let task = change_task(&rules, &form, &old, &new).expect("second rule matches");
        task.result().await.expect("rule body succeeds");

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn variant_mismatch_never_matches() {
        let fires = Arc::new(AtomicUsize::new(0));
        let rules = vec![erase(CountingRule {
            fires: fires.clone(),
            accept: true,
        })];

        let old = BoolField::new(Header::new("done", "check")).into_field();
        let mut toggled = old.clone();
        let focus = toggled.default_focus();
        toggled.actionate(focus);
        let form = form_with(old.clone());

        assert!(change_task(&rules, &form, &old, &toggled).is_none());
        assert_eq!(fires.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_sibling_is_a_hard_failure() {
        let tag = Tag::new();
        let tagged = TextField::new(Header::new("title", "pencil").with_tag(tag));
        let form = form_with(tagged.into_field());

        assert!(require_by_tag(&form, tag).is_ok());
        let missing = Tag::new();
        assert_eq!(
            require_by_tag(&form, missing).unwrap_err(),
            FormError::MissingInput(missing)
        );
    }

    #[test]
    fn unchanged_edit_spawns_nothing() {
        let rules = vec![erase(CountingRule {
            fires: Arc::new(AtomicUsize::new(0)),
            accept: true,
        })];
        let (old, _) = edited_text();
        let form = form_with(old.clone());
        assert!(change_task(&rules, &form, &old, &old).is_none());
    }
}
