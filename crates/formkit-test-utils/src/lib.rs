//! Testing utilities for the formkit workspace
//!
//! Shared fixtures: a realistic task-capture template, option lists and a
//! tracing bootstrap for integration tests.

#![allow(missing_docs)]

use formkit_model::{
    Field, FieldVariant, Fields, Form, FormHeader, FormStyle, FormTemplate, Header, OptionItem,
    OptionList, OptionsConfig, OptionsField, RangeField, ServiceId, Step, Tag, TextField,
};
use std::sync::Once;

/// Install a test tracing subscriber once per process. Safe to call from
/// every test; later calls are no-ops.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Tags used by [`task_template`], one per wizard step.
#[derive(Debug, Clone, Copy)]
pub struct TaskTags {
    pub basics: Tag,
    pub planning: Tag,
}

pub fn option_list(keys: &[&str]) -> OptionList {
    OptionList::new(keys.iter().map(|k| OptionItem::new(*k, *k)).collect())
}

pub fn text_field(name: &str, tag: Tag) -> TextField {
    TextField::new(Header::new(name, "pencil").with_tag(tag))
}

pub fn searchable_options(name: &str, tag: Tag, keys: &[&str]) -> OptionsField {
    OptionsField::new(
        Header::new(name, "folder").with_tag(tag),
        OptionsConfig::new().with_typing_search(true),
    )
    .with_value(option_list(keys))
}

/// A two-step task-capture template: a title and a project picker on the
/// first step, a date range on the second.
pub fn task_template(integration: ServiceId) -> (FormTemplate, TaskTags) {
    let tags = TaskTags {
        basics: Tag::new(),
        planning: Tag::new(),
    };

    let title = text_field("title", tags.basics);
    let project = searchable_options("project", tags.basics, &["inbox", "work", "home"]);
    let schedule = RangeField::new(Header::new("schedule", "calendar").with_tag(tags.planning));

    let inputs: Fields = [
        title.into_field(),
        project.into_field(),
        schedule.into_field(),
    ]
    .into_iter()
    .collect();
    let steps = vec![
        Step::new(tags.basics, "basics"),
        Step::new(tags.planning, "planning").last(),
    ];
    let header = FormHeader::new(FormStyle::new("new task"), integration);
    (FormTemplate::new(header, inputs, steps), tags)
}

/// A live form over [`task_template`].
pub fn task_form(integration: ServiceId) -> (Form, TaskTags) {
    let (template, tags) = task_template(integration);
    (Form::new(template), tags)
}

/// Look up a field by display name and hand back a typed clone, panicking
/// loudly when the fixture shape does not match the test's expectation.
pub fn typed_by_name<V: FieldVariant>(form: &Form, name: &str) -> V {
    let field = field_by_name(form, name);
    V::peek(&field)
        .unwrap_or_else(|| panic!("field {name:?} has an unexpected kind"))
        .clone()
}

/// Untyped lookup by display name, cloned.
pub fn field_by_name(form: &Form, name: &str) -> Field {
    form.inputs
        .iter()
        .find(|f| f.header().name == name)
        .unwrap_or_else(|| panic!("fixture has no field named {name:?}"))
        .clone()
}
