//! On/off toggle field.

use crate::config::FieldConfig;
use crate::field::Header;
use crate::identity::FocusId;
use serde::{Deserialize, Serialize};

/// A boolean toggle. Always valid; a single focus target that flips the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoolField {
    header: Header,
    /// Settable flags.
    pub config: FieldConfig,
    /// Current state.
    pub value: bool,
    #[serde(skip, default = "FocusId::new")]
    toggle: FocusId,
}

impl BoolField {
    /// An unset toggle with default config.
    #[must_use]
    pub fn new(header: Header) -> Self {
        Self {
            header,
            config: FieldConfig::default(),
            value: false,
            toggle: FocusId::new(),
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
    pub fn with_value(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    /// Field metadata.
    #[inline]
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The toggle's focus target.
    #[inline]
    #[must_use]
    pub fn toggle_focus(&self) -> FocusId {
        self.toggle
    }

    /// The sole focus target.
    #[must_use]
    pub fn focus_targets(&self) -> Vec<FocusId> {
        vec![self.toggle]
    }

    /// Lands on the toggle.
    #[inline]
    #[must_use]
    pub fn default_focus(&self) -> Option<FocusId> {
        Some(self.toggle)
    }

    /// Activating the toggle flips the value; anything else passes through.
    pub fn actionate(&mut self, focus: Option<FocusId>) -> Option<FocusId> {
        if focus == Some(self.toggle) {
            self.value = !self.value;
        }
        focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actionate_flips_only_on_the_toggle_target() {
        let mut field = BoolField::new(Header::new("done", "check"));
        let toggle = field.toggle_focus();

        assert_eq!(field.actionate(Some(toggle)), Some(toggle));
        assert!(field.value);

        let foreign = FocusId::new();
        assert_eq!(field.actionate(Some(foreign)), Some(foreign));
        assert!(field.value);
    }
}
