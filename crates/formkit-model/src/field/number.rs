//! Numeric field.

use crate::config::FieldConfig;
use crate::field::Header;
use crate::identity::FocusId;
use serde::{Deserialize, Serialize};

/// A numeric input. Behaves like text: always valid, one focus target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberField {
    header: Header,
    /// Settable flags.
    pub config: FieldConfig,
    /// Current number, when set.
    pub value: Option<f64>,
    #[serde(skip, default = "FocusId::new")]
    input: FocusId,
}

impl NumberField {
    /// An unset number field with default config.
    #[must_use]
    pub fn new(header: Header) -> Self {
        Self {
            header,
            config: FieldConfig::default(),
            value: None,
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
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Field metadata.
    #[inline]
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The number input's focus target.
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

    /// Lands on the number input.
    #[inline]
    #[must_use]
    pub fn default_focus(&self) -> Option<FocusId> {
        Some(self.input)
    }

    /// No activation effect; the focus passes through unchanged.
    pub fn actionate(&mut self, focus: Option<FocusId>) -> Option<FocusId> {
        focus
    }
}
