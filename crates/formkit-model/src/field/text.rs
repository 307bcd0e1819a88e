//! Free-text field.

use crate::config::FieldConfig;
use crate::field::Header;
use crate::identity::FocusId;
use serde::{Deserialize, Serialize};

/// A free-text input. Always valid; a single focus target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    header: Header,
    /// Settable flags.
    pub config: FieldConfig,
    /// Current text.
    pub value: String,
    #[serde(skip, default = "FocusId::new")]
    input: FocusId,
}

impl TextField {
    /// An empty text field with default config.
    #[must_use]
    pub fn new(header: Header) -> Self {
        Self {
            header,
            config: FieldConfig::default(),
            value: String::new(),
            input: FocusId::new(),
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
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Field metadata.
    #[inline]
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The text input's focus target.
    #[inline]
    #[must_use]
    pub fn input_focus(&self) -> FocusId {
        self.input
    }

    /// The sole focus target.
    #[must_use]
    pub fn focus_targets(&self) -> Vec<FocusId> {
        vec![self.input]
    }

    /// Lands on the text input.
    #[inline]
    #[must_use]
    pub fn default_focus(&self) -> Option<FocusId> {
        Some(self.input)
    }

    /// Text has no activation effect; the focus passes through unchanged.
    pub fn actionate(&mut self, focus: Option<FocusId>) -> Option<FocusId> {
        focus
    }
}
