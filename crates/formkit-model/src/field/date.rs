//! Single-date field.

use crate::config::FieldConfig;
use crate::field::Header;
use crate::identity::FocusId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An optional date. Always valid.
///
/// Focus state machine: no value exposes only `add`; activating `add` sets
/// the value to now and moves to the date input. With a value, the input and
/// `remove` are exposed; activating `remove` clears the value and moves back
/// to `add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateField {
    header: Header,
    /// Settable flags.
    pub config: FieldConfig,
    /// Current date, when set.
    pub value: Option<DateTime<Utc>>,
    #[serde(skip, default = "FocusId::new")]
    add: FocusId,
    #[serde(skip, default = "FocusId::new")]
    input: FocusId,
    #[serde(skip, default = "FocusId::new")]
    remove: FocusId,
}

impl DateField {
    /// An unset date field with default config.
    #[must_use]
    pub fn new(header: Header) -> Self {
        Self {
            header,
            config: FieldConfig::default(),
            value: None,
            add: FocusId::new(),
            input: FocusId::new(),
            remove: FocusId::new(),
        }
    }

    /// With config (builder style).
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// With an initial value (builder style).
    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: DateTime<Utc>) -> Self {
        self.value = Some(value);
        self
    }

    /// Field metadata.
    #[inline]
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The "add a date" focus target.
    #[inline]
    #[must_use]
    pub fn add_focus(&self) -> FocusId {
        self.add
    }

    /// The date input's focus target.
    #[inline]
    #[must_use]
    pub fn input_focus(&self) -> FocusId {
        self.input
    }

    /// The "remove the date" focus target.
    #[inline]
    #[must_use]
    pub fn remove_focus(&self) -> FocusId {
        self.remove
    }

    /// Visible targets depend on whether a date is set.
    #[must_use]
    pub fn focus_targets(&self) -> Vec<FocusId> {
        if self.value.is_none() {
            vec![self.add]
        } else {
            vec![self.input, self.remove]
        }
    }

    /// `add` without a value, `remove` with one.
    #[must_use]
    pub fn default_focus(&self) -> Option<FocusId> {
        Some(if self.value.is_none() {
            self.add
        } else {
            self.remove
        })
    }

    /// `add` sets the value to now; `remove` clears it.
    pub fn actionate(&mut self, focus: Option<FocusId>) -> Option<FocusId> {
        if focus == Some(self.add) {
            self.value = Some(Utc::now());
            Some(self.input)
        } else if focus == Some(self.remove) {
            self.value = None;
            Some(self.add)
        } else {
            focus
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_remove_returns_to_the_empty_focus_set() {
        let mut field = DateField::new(Header::new("due", "calendar"));
        assert_eq!(field.focus_targets(), vec![field.add_focus()]);

        let next = field.actionate(Some(field.add_focus()));
        assert_eq!(next, Some(field.input_focus()));
        assert!(field.value.is_some());
        assert_eq!(
            field.focus_targets(),
            vec![field.input_focus(), field.remove_focus()]
        );
        assert_eq!(field.default_focus(), Some(field.remove_focus()));

        let next = field.actionate(Some(field.remove_focus()));
        assert_eq!(next, Some(field.add_focus()));
        assert!(field.value.is_none());
        assert_eq!(field.focus_targets(), vec![field.add_focus()]);
    }

    #[test]
    fn unknown_focus_passes_through() {
        let mut field = DateField::new(Header::new("due", "calendar"));
        let foreign = FocusId::new();
        assert_eq!(field.actionate(Some(foreign)), Some(foreign));
        assert!(field.value.is_none());
    }
}
