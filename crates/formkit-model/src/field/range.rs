//! Date-range field.

use crate::config::FieldConfig;
use crate::field::Header;
use crate::identity::FocusId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An optional start/end date pair with an ordering invariant.
///
/// After any write either both bounds are unset or `start <= end`, enforced
/// by auto-correcting the other bound:
/// - a start written past the current end unsets the end
/// - an end written before the current start pulls the start back to it
/// - an end write with no start is a no-op
/// - clearing the start clears the whole range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// A range from bounds, run through the ordering corrections.
    #[must_use]
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        let mut range = Self::default();
        range.set_start(start);
        range.set_end(end);
        range
    }

    /// Start bound.
    #[inline]
    #[must_use]
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// End bound.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Write the start bound. An end earlier than the new start is unset;
    /// clearing the start clears the range.
    pub fn set_start(&mut self, start: Option<DateTime<Utc>>) {
        match start {
            Some(start) => {
                if self.end.is_some_and(|end| end < start) {
                    self.end = None;
                }
                self.start = Some(start);
            }
            None => {
                self.start = None;
                self.end = None;
            }
        }
    }

    /// Write the end bound. Ignored while no start is set; a start later
    /// than the new end is pulled back to it.
    pub fn set_end(&mut self, end: Option<DateTime<Utc>>) {
        match end {
            Some(end) => {
                let Some(start) = self.start else { return };
                if start > end {
                    self.start = Some(end);
                }
                self.end = Some(end);
            }
            None => self.end = None,
        }
    }

    /// Copy the start into the end, the useful default for same-day ranges.
    pub fn copy_start_into_end(&mut self) {
        self.end = self.start;
    }
}

/// A date-range input.
///
/// Four focus states driven by which bounds are set:
/// `{add_start}` → `{start, remove_start, add_end}` →
/// `{start, remove_start, end, remove_end}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeField {
    header: Header,
    /// Settable flags.
    pub config: FieldConfig,
    /// Current bounds.
    pub value: DateRange,
    #[serde(skip, default = "FocusId::new")]
    add_start: FocusId,
    #[serde(skip, default = "FocusId::new")]
    input_start: FocusId,
    #[serde(skip, default = "FocusId::new")]
    remove_start: FocusId,
    #[serde(skip, default = "FocusId::new")]
    add_end: FocusId,
    #[serde(skip, default = "FocusId::new")]
    input_end: FocusId,
    #[serde(skip, default = "FocusId::new")]
    remove_end: FocusId,
}

impl RangeField {
    /// An unset range field with default config.
    #[must_use]
    pub fn new(header: Header) -> Self {
        Self {
            header,
            config: FieldConfig::default(),
            value: DateRange::default(),
            add_start: FocusId::new(),
            input_start: FocusId::new(),
            remove_start: FocusId::new(),
            add_end: FocusId::new(),
            input_end: FocusId::new(),
            remove_end: FocusId::new(),
        }
    }

    /// With config (builder style).
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// With initial bounds (builder style).
    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: DateRange) -> Self {
        self.value = value;
        self
    }

    /// Field metadata.
    #[inline]
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Valid unless mandatory with an incomplete range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.config.mandatory.value()
            || (self.value.start().is_some() && self.value.end().is_some())
    }

    /// The "add a start date" focus target.
    #[inline]
    #[must_use]
    pub fn add_start_focus(&self) -> FocusId {
        self.add_start
    }

    /// The start input's focus target.
    #[inline]
    #[must_use]
    pub fn start_focus(&self) -> FocusId {
        self.input_start
    }

    /// The "remove the start" focus target.
    #[inline]
    #[must_use]
    pub fn remove_start_focus(&self) -> FocusId {
        self.remove_start
    }

    /// The "add an end date" focus target.
    #[inline]
    #[must_use]
    pub fn add_end_focus(&self) -> FocusId {
        self.add_end
    }

    /// The end input's focus target.
    #[inline]
    #[must_use]
    pub fn end_focus(&self) -> FocusId {
        self.input_end
    }

    /// The "remove the end" focus target.
    #[inline]
    #[must_use]
    pub fn remove_end_focus(&self) -> FocusId {
        self.remove_end
    }

    /// Visible targets depend on which bounds are set.
    #[must_use]
    pub fn focus_targets(&self) -> Vec<FocusId> {
        if self.value.start().is_none() {
            vec![self.add_start]
        } else if self.value.end().is_none() {
            vec![self.input_start, self.remove_start, self.add_end]
        } else {
            vec![
                self.input_start,
                self.remove_start,
                self.input_end,
                self.remove_end,
            ]
        }
    }

    /// `add_start` without a start, `remove_start` with one.
    #[must_use]
    pub fn default_focus(&self) -> Option<FocusId> {
        Some(if self.value.start().is_none() {
            self.add_start
        } else {
            self.remove_start
        })
    }

    /// `add_start` begins the range at now; `add_end` copies the start into
    /// the end; `remove_start` clears the whole range; `remove_end` clears
    /// only the end.
    pub fn actionate(&mut self, focus: Option<FocusId>) -> Option<FocusId> {
        if focus == Some(self.add_start) {
            self.value = DateRange::new(Some(Utc::now()), None);
            Some(self.input_start)
        } else if focus == Some(self.add_end) {
            self.value.copy_start_into_end();
            Some(self.input_end)
        } else if focus == Some(self.remove_start) {
            self.value = DateRange::default();
            Some(self.add_start)
        } else if focus == Some(self.remove_end) {
            self.value.set_end(None);
            Some(self.add_end)
        } else {
            focus
        }
    }
}
