//! Live form instance
//!
//! A form is derived from a template by cloning its field definitions, then
//! mutated by `actionate` transitions and by the event pipeline's deferred
//! mutations. The instance is single-owner, in-process state: one session
//! edits it, nothing else aliases it.

use crate::collection::Fields;
use crate::field::{Field, Header};
use crate::identity::{FocusId, FormId, InputId, Tag};
use crate::template::{FormTemplate, Step};
use serde::{Deserialize, Serialize};

/// The mutable live object behind one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    /// Instance identity, distinct from the template's.
    pub id: FormId,
    /// The authored definition this instance was derived from.
    pub template: FormTemplate,
    /// Live field values.
    pub inputs: Fields,
}

impl Form {
    /// Derive a fresh instance from a template.
    #[must_use]
    pub fn new(template: FormTemplate) -> Self {
        let inputs = template.inputs.clone();
        Self {
            id: FormId::new(),
            template,
            inputs,
        }
    }

    /// Steps that currently have at least one visible field carrying their
    /// tag, in template order.
    #[must_use]
    pub fn available_steps(&self) -> Vec<Step> {
        self.template
            .steps
            .iter()
            .filter(|step| {
                self.inputs
                    .iter()
                    .any(|f| f.show() && f.header().tags.contains(&step.id))
            })
            .cloned()
            .collect()
    }

    /// Headers of every currently invalid field.
    #[must_use]
    pub fn invalid_inputs(&self) -> Vec<Header> {
        self.inputs
            .iter()
            .filter(|f| !f.is_valid())
            .map(|f| f.header().clone())
            .collect()
    }

    /// Visible fields of one step; with no step (or a stepless template),
    /// every visible field.
    #[must_use]
    pub fn inputs_by_step(&self, step: Option<&Step>) -> Vec<&Field> {
        let tag = step.map(|s| s.id);
        self.inputs
            .iter()
            .filter(|f| {
                if self.template.steps.is_empty() {
                    return f.show();
                }
                match tag {
                    Some(tag) => f.show() && f.header().tags.contains(&tag),
                    None => f.show(),
                }
            })
            .collect()
    }

    /// Lookup by field id.
    #[inline]
    #[must_use]
    pub fn input(&self, id: InputId) -> Option<&Field> {
        self.inputs.get(id)
    }

    /// The field currently exposing the given focus target.
    #[inline]
    #[must_use]
    pub fn input_by_focus(&self, focus: FocusId) -> Option<&Field> {
        self.inputs.by_focus(focus)
    }

    /// The first visible field carrying the tag; `include_hidden` widens the
    /// search to hidden fields.
    #[must_use]
    pub fn input_by_tag(&self, tag: Tag, include_hidden: bool) -> Option<&Field> {
        self.inputs
            .iter()
            .find(|f| (f.show() || include_hidden) && f.header().tags.contains(&tag))
    }

    /// Run a field's `actionate` transition; returns the next focus target.
    /// No-op for an unknown field id.
    pub fn actionate(&mut self, input: InputId, focus: Option<FocusId>) -> Option<FocusId> {
        self.inputs.get_mut(input)?.actionate(focus)
    }

    /// Make the current live values the template's new defaults.
    pub fn save_values_as_default(&mut self) {
        self.template.inputs = self.inputs.clone();
    }

    /// Discard live edits and re-derive the fields from the template.
    pub fn reload(&mut self) {
        self.inputs = self.template.inputs.clone();
    }

    /// The field a fresh session should focus first: the template's
    /// entrypoint when it still exists, else the first visible field.
    #[must_use]
    pub fn entry_input(&self) -> Option<InputId> {
        if let Some(id) = self.template.entrypoint {
            if self.inputs.get(id).is_some() {
                return Some(id);
            }
        }
        self.inputs.iter().find(|f| f.show()).map(Field::id)
    }

    /// The step a field belongs to, by its id.
    #[must_use]
    pub fn step_for_input(&self, id: InputId) -> Option<Step> {
        let field = self.inputs.get(id)?;
        self.template
            .steps
            .iter()
            .find(|s| field.header().tags.contains(&s.id))
            .cloned()
    }

    /// The step to show for a field: without a previous step, the first
    /// available one; otherwise the field's step with its navigation
    /// direction inferred over the available-step sequence.
    #[must_use]
    pub fn step_of(&self, field: &Field, old: Option<&Step>) -> Option<Step> {
        let new = self
            .template
            .steps
            .iter()
            .find(|s| field.header().tags.contains(&s.id))
            .cloned();
        let available = self.available_steps();
        match old {
            None => available.first().cloned(),
            Some(old) => Step::navigate(&available, old, new),
        }
    }

    /// The available step after the one tagged `from`, wrapping to the first
    /// available step past the end (or when `from` matches nothing), so
    /// overflow navigation never dead-ends.
    #[must_use]
    pub fn next_step(&self, from: Option<Tag>) -> Option<Step> {
        let available = self.available_steps();
        let position = from.and_then(|from| available.iter().position(|s| s.id == from));
        match position {
            Some(index) => available.get((index + 1) % available.len()).cloned(),
            None => available.first().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldConfig, OptionsConfig};
    use crate::field::{BoolField, FieldVariant, OptionsField, TextField};
    use crate::identity::ServiceId;
    use crate::options::{OptionItem, OptionList};
    use crate::template::{Direction, FormHeader, FormStyle};
    use pretty_assertions::assert_eq;

    fn tagged_text(name: &str, tag: Tag) -> Field {
        TextField::new(Header::new(name, "pencil").with_tag(tag)).into_field()
    }

    fn template_with_steps() -> (FormTemplate, [Tag; 3]) {
        let tags = [Tag::new(), Tag::new(), Tag::new()];
        let inputs: Fields = tags
            .iter()
            .enumerate()
            .map(|(i, tag)| tagged_text(&format!("field-{i}"), *tag))
            .collect();
        let steps = vec![
            Step::new(tags[0], "one"),
            Step::new(tags[1], "two"),
            Step::new(tags[2], "three").last(),
        ];
        let header = FormHeader::new(FormStyle::new("test"), ServiceId::new());
        (FormTemplate::new(header, inputs, steps), tags)
    }

    #[test]
    fn instance_clones_the_template_inputs() {
        let (template, _) = template_with_steps();
        let form = Form::new(template);
        assert_eq!(form.inputs.len(), 3);
        assert_eq!(form.inputs, form.template.inputs);
    }

    #[test]
    fn available_steps_track_visibility() {
        let (template, tags) = template_with_steps();
        let mut form = Form::new(template);
        assert_eq!(form.available_steps().len(), 3);

        let hidden = form.input_by_tag(tags[1], true).unwrap().id();
        form.inputs.get_mut(hidden).unwrap().set_active(false);

        let names: Vec<String> = form.available_steps().iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, ["one", "three"]);
    }

    #[test]
    fn next_step_wraps_past_the_last_available() {
        let (template, tags) = template_with_steps();
        let form = Form::new(template);

        assert_eq!(form.next_step(Some(tags[0])).unwrap().id, tags[1]);
        assert_eq!(form.next_step(Some(tags[2])).unwrap().id, tags[0]);
        assert_eq!(form.next_step(None).unwrap().id, tags[0]);
        assert_eq!(form.next_step(Some(Tag::new())).unwrap().id, tags[0]);
    }

    #[test]
    fn step_of_starts_at_the_first_available_step() {
        let (template, tags) = template_with_steps();
        let form = Form::new(template);
        let field = form.input_by_tag(tags[2], true).unwrap().clone();

        let step = form.step_of(&field, None).unwrap();
        assert_eq!(step.id, tags[0]);
        assert_eq!(step.direction, Direction::Start);
    }

    #[test]
    fn step_of_infers_the_direction() {
        let (template, tags) = template_with_steps();
        let form = Form::new(template);
        let middle = form.available_steps()[1].clone();

        let forward_field = form.input_by_tag(tags[2], true).unwrap().clone();
        let step = form.step_of(&forward_field, Some(&middle)).unwrap();
        assert_eq!(step.direction, Direction::Forward);

        let back_field = form.input_by_tag(tags[0], true).unwrap().clone();
        let step = form.step_of(&back_field, Some(&middle)).unwrap();
        assert_eq!(step.direction, Direction::Back);
    }

    #[test]
    fn reload_discards_live_edits() {
        let (template, tags) = template_with_steps();
        let mut form = Form::new(template);
        form.inputs
            .edit_by_tag::<TextField>(tags[0], |t| t.value = "edited".into());

        form.reload();
        let field = form.input_by_tag(tags[0], true).unwrap();
        assert_eq!(TextField::peek(field).unwrap().value, "");
    }

    #[test]
    fn save_values_as_default_promotes_live_edits() {
        let (template, tags) = template_with_steps();
        let mut form = Form::new(template);
        form.inputs
            .edit_by_tag::<TextField>(tags[0], |t| t.value = "kept".into());

        form.save_values_as_default();
        form.reload();
        let field = form.input_by_tag(tags[0], true).unwrap();
        assert_eq!(TextField::peek(field).unwrap().value, "kept");
    }

    #[test]
    fn entry_input_falls_back_to_the_first_visible_field() {
        let (template, _) = template_with_steps();
        let mut form = Form::new(template);
        let first = form.inputs.iter().next().unwrap().id();
        assert_eq!(form.entry_input(), Some(first));

        form.inputs.get_mut(first).unwrap().set_active(false);
        assert_ne!(form.entry_input(), Some(first));
    }

    #[test]
    fn actionate_reaches_the_addressed_field() {
        let toggle = BoolField::new(Header::new("done", "check"));
        let focus = toggle.toggle_focus();
        let id = toggle.header().id;
        let inputs: Fields = [toggle.into_field()].into_iter().collect();
        let header = FormHeader::new(FormStyle::new("test"), ServiceId::new());
        let mut form = Form::new(FormTemplate::new(header, inputs, Vec::new()));

        assert_eq!(form.actionate(id, Some(focus)), Some(focus));
        let field = form.input(id).unwrap();
        assert!(BoolField::peek(field).unwrap().value);
    }

    #[test]
    fn mandatory_options_field_reports_invalid() {
        let header = Header::new("project", "folder");
        let mut config = OptionsConfig::new().with_single_selection(false);
        config.mandatory.set(true);
        let field = OptionsField::new(header, config).with_value(OptionList::new(vec![
            OptionItem::new("a", "a"),
            OptionItem::new("b", "b"),
        ]));
        let id = field.header().id;
        let inputs: Fields = [field.into_field()].into_iter().collect();
        let header = FormHeader::new(FormStyle::new("test"), ServiceId::new());
        let mut form = Form::new(FormTemplate::new(header, inputs, Vec::new()));

        assert_eq!(form.invalid_inputs().len(), 1);

        let row = OptionsField::peek(form.input(id).unwrap()).unwrap().value.options()[0].id;
        form.inputs
            .edit_by_id::<OptionsField>(id, |f| f.value.toggle(row));
        assert!(form.invalid_inputs().is_empty());
    }
}
