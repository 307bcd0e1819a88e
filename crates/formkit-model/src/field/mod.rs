//! Field-variant model
//!
//! A closed set of input kinds behind one sum type. Every variant exposes the
//! same capability surface: header, config flags, validity, focus targets and
//! an `actionate` transition that maps an activated focus target to the next
//! one while mutating only the variant's own value.

mod boolean;
mod date;
mod number;
mod options;
mod range;
mod text;

pub use boolean::BoolField;
pub use date::DateField;
pub use number::NumberField;
pub use options::OptionsField;
pub use range::{DateRange, RangeField};
pub use text::TextField;

use crate::identity::{FocusId, InputId, Tag};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Immutable per-field metadata, created once when the field is authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Field identity.
    pub id: InputId,
    /// Display name.
    pub name: String,
    /// Presentation icon name.
    pub icon: String,
    /// Tags linking the field to wizard steps and integration rules.
    pub tags: HashSet<Tag>,
}

impl Header {
    /// A header with a fresh id and no tags.
    #[must_use]
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: InputId::new(),
            name: name.into(),
            icon: icon.into(),
            tags: HashSet::new(),
        }
    }

    /// Attach a tag (builder style).
    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }
}

/// One form input: the closed polymorphic variant set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// Free text.
    Text(TextField),
    /// On/off toggle.
    Bool(BoolField),
    /// Numeric input.
    Number(NumberField),
    /// Optional single date.
    Date(DateField),
    /// Optional date range with ordering invariant.
    Range(RangeField),
    /// Selectable option list.
    Options(OptionsField),
}

impl Field {
    /// Field metadata.
    #[must_use]
    pub fn header(&self) -> &Header {
        match self {
            Field::Text(f) => f.header(),
            Field::Bool(f) => f.header(),
            Field::Number(f) => f.header(),
            Field::Date(f) => f.header(),
            Field::Range(f) => f.header(),
            Field::Options(f) => f.header(),
        }
    }

    /// Field identity, from the header.
    #[inline]
    #[must_use]
    pub fn id(&self) -> InputId {
        self.header().id
    }

    /// Variant name, for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Field::Text(_) => "text",
            Field::Bool(_) => "bool",
            Field::Number(_) => "number",
            Field::Date(_) => "date",
            Field::Range(_) => "range",
            Field::Options(_) => "options",
        }
    }

    /// Whether the current value satisfies the field's own validity rule.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Field::Text(_) | Field::Bool(_) | Field::Number(_) | Field::Date(_) => true,
            Field::Range(f) => f.is_valid(),
            Field::Options(f) => f.is_valid(),
        }
    }

    /// Whether the field must hold a valid value before the form can be sent.
    #[must_use]
    pub fn mandatory(&self) -> bool {
        match self {
            Field::Text(f) => f.config.mandatory.value(),
            Field::Bool(f) => f.config.mandatory.value(),
            Field::Number(f) => f.config.mandatory.value(),
            Field::Date(f) => f.config.mandatory.value(),
            Field::Range(f) => f.config.mandatory.value(),
            Field::Options(f) => f.config.mandatory.value(),
        }
    }

    /// Whether the field is configured active.
    #[must_use]
    pub fn active(&self) -> bool {
        match self {
            Field::Text(f) => f.config.active.value(),
            Field::Bool(f) => f.config.active.value(),
            Field::Number(f) => f.config.active.value(),
            Field::Date(f) => f.config.active.value(),
            Field::Range(f) => f.config.active.value(),
            Field::Options(f) => f.config.active.value(),
        }
    }

    /// Write the `active` flag. No-op when the template locked it.
    pub fn set_active(&mut self, active: bool) {
        match self {
            Field::Text(f) => f.config.active.set(active),
            Field::Bool(f) => f.config.active.set(active),
            Field::Number(f) => f.config.active.set(active),
            Field::Date(f) => f.config.active.set(active),
            Field::Range(f) => f.config.active.set(active),
            Field::Options(f) => f.config.active.set(active),
        }
    }

    /// Derived visibility: active, or invalid (an invalid-but-inactive field
    /// must still surface to the user).
    #[inline]
    #[must_use]
    pub fn show(&self) -> bool {
        self.active() || !self.is_valid()
    }

    /// The currently visible focus targets, in interaction order.
    #[must_use]
    pub fn focus_targets(&self) -> Vec<FocusId> {
        match self {
            Field::Text(f) => f.focus_targets(),
            Field::Bool(f) => f.focus_targets(),
            Field::Number(f) => f.focus_targets(),
            Field::Date(f) => f.focus_targets(),
            Field::Range(f) => f.focus_targets(),
            Field::Options(f) => f.focus_targets(),
        }
    }

    /// The focus target the UI should land on first, when any.
    #[must_use]
    pub fn default_focus(&self) -> Option<FocusId> {
        match self {
            Field::Text(f) => f.default_focus(),
            Field::Bool(f) => f.default_focus(),
            Field::Number(f) => f.default_focus(),
            Field::Date(f) => f.default_focus(),
            Field::Range(f) => f.default_focus(),
            Field::Options(f) => f.default_focus(),
        }
    }

    /// Activate a focus target: a pure transition keyed by which sub-target
    /// was activated, mutating only this field's value, returning the focus
    /// target the UI should move to next. Unknown targets pass through.
    pub fn actionate(&mut self, focus: Option<FocusId>) -> Option<FocusId> {
        match self {
            Field::Text(f) => f.actionate(focus),
            Field::Bool(f) => f.actionate(focus),
            Field::Number(f) => f.actionate(focus),
            Field::Date(f) => f.actionate(focus),
            Field::Range(f) => f.actionate(focus),
            Field::Options(f) => f.actionate(focus),
        }
    }
}

/// Typed projection in and out of [`Field`].
///
/// The explicit replacement for downcasting: a mismatch is an ordinary
/// `None`, which collection edits and change rules treat as "not applicable".
pub trait FieldVariant: Clone + Send + Sync + 'static {
    /// Borrow the concrete variant, if this field is of that kind.
    fn peek(field: &Field) -> Option<&Self>;
    /// Mutably borrow the concrete variant, if this field is of that kind.
    fn peek_mut(field: &mut Field) -> Option<&mut Self>;
    /// Wrap the concrete variant back into the sum type.
    fn into_field(self) -> Field;
}

macro_rules! variant {
    ($type:ty, $arm:ident) => {
        impl FieldVariant for $type {
            fn peek(field: &Field) -> Option<&Self> {
                match field {
                    Field::$arm(inner) => Some(inner),
                    _ => None,
                }
            }

            fn peek_mut(field: &mut Field) -> Option<&mut Self> {
                match field {
                    Field::$arm(inner) => Some(inner),
                    _ => None,
                }
            }

            fn into_field(self) -> Field {
                Field::$arm(self)
            }
        }

        impl From<$type> for Field {
            fn from(inner: $type) -> Field {
                Field::$arm(inner)
            }
        }
    };
}

variant!(TextField, Text);
variant!(BoolField, Bool);
variant!(NumberField, Number);
variant!(DateField, Date);
variant!(RangeField, Range);
variant!(OptionsField, Options);
