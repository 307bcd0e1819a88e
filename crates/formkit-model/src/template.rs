//! Form templates and wizard steps
//!
//! A template is the immutable-by-contract authored definition of a form:
//! field definitions, wizard steps and presentation metadata. Live instances
//! are derived from it (see `form`).

use crate::collection::Fields;
use crate::identity::{InputId, ServiceId, Tag, TemplateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Presentation icon of a form or option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormIcon {
    /// A named symbol from the platform's icon set.
    Symbol(String),
    /// User-provided image data, referenced by token.
    Asset(Uuid),
    /// A bundled static image.
    Static(String),
}

impl FormIcon {
    /// The identifier the presentation layer resolves.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            FormIcon::Symbol(name) | FormIcon::Static(name) => name.clone(),
            FormIcon::Asset(token) => token.to_string(),
        }
    }
}

/// Presentation style of a form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormStyle {
    /// Display name.
    pub name: String,
    /// Display icon.
    pub icon: FormIcon,
    /// Accent color, as a hex string.
    pub color: String,
}

impl FormStyle {
    /// A style with the default icon and a white accent.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: FormIcon::Symbol("square.and.pencil".into()),
            color: "FFFFFF".into(),
        }
    }
}

/// Immutable template metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormHeader {
    /// Template identity.
    pub id: TemplateId,
    /// Presentation style.
    pub style: FormStyle,
    /// When a form of this template was last opened.
    pub last_open: Option<DateTime<Utc>>,
    /// The integration that loads and receives forms of this template.
    pub integration: ServiceId,
}

impl FormHeader {
    /// A header with a fresh template id.
    #[must_use]
    pub fn new(style: FormStyle, integration: ServiceId) -> Self {
        Self {
            id: TemplateId::new(),
            style,
            last_open: None,
            integration,
        }
    }
}

/// Navigation direction of a step change. A transient display attribute,
/// recomputed on every navigation, never persisted as meaningful state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Moving to an earlier step.
    Back,
    /// Moving to a later step.
    Forward,
    /// The initial step of a session.
    #[default]
    Start,
}

impl Direction {
    /// Infer the direction of moving from `old` to `new` within the ordered
    /// step-id sequence. A step absent from the sequence counts as position
    /// −1, so an unknown `new` yields `Forward` from anywhere; pinned
    /// behavior, see the step navigation tests.
    #[must_use]
    pub fn infer(old: Tag, new: Option<Tag>, steps: &[Tag]) -> Self {
        let position = |tag: Option<Tag>| -> isize {
            tag.and_then(|tag| steps.iter().position(|s| *s == tag))
                .map_or(-1, |i| i as isize)
        };
        if position(Some(old)) > position(new) {
            Direction::Back
        } else {
            Direction::Forward
        }
    }
}

/// One wizard step. Fields carrying the step's tag belong to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// The tag grouping fields into this step.
    pub id: Tag,
    /// Display name.
    pub name: String,
    /// Optional display description.
    pub description: Option<String>,
    /// Transient navigation direction.
    pub direction: Direction,
    /// Whether this is the final step of the wizard.
    pub is_last: bool,
}

impl Step {
    /// A step grouping the fields tagged with `id`.
    #[must_use]
    pub fn new(id: Tag, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            direction: Direction::Start,
            is_last: false,
        }
    }

    /// With a description (builder style).
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark as the final step (builder style).
    #[inline]
    #[must_use]
    pub fn last(mut self) -> Self {
        self.is_last = true;
        self
    }

    /// Resolve a step change within an ordered step sequence: the old step,
    /// untouched, when `new` is the same step; otherwise `new` with its
    /// direction recomputed against the sequence.
    #[must_use]
    pub fn navigate(steps: &[Step], old: &Step, new: Option<Step>) -> Option<Step> {
        if new.as_ref().map(|s| s.id) == Some(old.id) {
            return Some(old.clone());
        }
        let ids: Vec<Tag> = steps.iter().map(|s| s.id).collect();
        new.map(|mut step| {
            step.direction = Direction::infer(old.id, Some(step.id), &ids);
            step
        })
    }
}

/// The authored definition of a form: fields, wizard steps and metadata.
///
/// Treated as immutable input by the engine; the only sanctioned mutation is
/// a live form saving its values back as the new defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTemplate {
    /// Template metadata.
    pub header: FormHeader,
    /// Field definitions, with their default values.
    pub inputs: Fields,
    /// Wizard steps, in presentation order.
    pub steps: Vec<Step>,
    /// The field a fresh form should focus first, when set.
    pub entrypoint: Option<InputId>,
}

impl FormTemplate {
    /// A template from its parts.
    #[must_use]
    pub fn new(header: FormHeader, inputs: Fields, steps: Vec<Step>) -> Self {
        Self {
            header,
            inputs,
            steps,
            entrypoint: None,
        }
    }

    /// With an entrypoint field (builder style).
    #[inline]
    #[must_use]
    pub fn with_entrypoint(mut self, input: InputId) -> Self {
        self.entrypoint = Some(input);
        self
    }

    /// Template identity, from the header.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TemplateId {
        self.header.id
    }
}
