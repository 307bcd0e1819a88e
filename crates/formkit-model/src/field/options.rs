//! Option-list field.

use crate::config::OptionsConfig;
use crate::field::Header;
use crate::identity::{FocusId, OptionId};
use crate::options::{OptionItem, OptionList};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A selectable option list with a search box.
///
/// Focus targets are the unhidden options themselves (each row is addressed
/// through its option identity); when the filter hides everything, the search
/// box is the only target. Activating an option toggles it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsField {
    header: Header,
    /// Settable flags, including selection mode and typing search.
    pub config: OptionsConfig,
    /// The option list.
    pub value: OptionList,
    /// Live search query; the debounced filter rule reads it.
    pub search: String,
    #[serde(skip, default = "FocusId::new")]
    search_box: FocusId,
}

impl OptionsField {
    /// An empty option list. The list's selection mode follows the config.
    #[must_use]
    pub fn new(header: Header, config: OptionsConfig) -> Self {
        let mut value = OptionList::default();
        value.set_single_selection(config.single_selection.value());
        Self {
            header,
            config,
            value,
            search: String::new(),
            search_box: FocusId::new(),
        }
    }

    /// With an initial list (builder style). Selection mode is re-applied
    /// from the config.
    #[must_use]
    pub fn with_value(mut self, mut value: OptionList) -> Self {
        value.set_single_selection(self.config.single_selection.value());
        self.value = value;
        self
    }

    /// Field metadata.
    #[inline]
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Valid unless mandatory with nothing selected.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.config.mandatory.value() || self.value.selected().next().is_some()
    }

    /// The search box's focus target.
    #[inline]
    #[must_use]
    pub fn search_focus(&self) -> FocusId {
        self.search_box
    }

    /// Unhidden option rows; the search box when none remain.
    #[must_use]
    pub fn focus_targets(&self) -> Vec<FocusId> {
        let rows: Vec<FocusId> = self.value.unhidden().map(|o| o.id.focus()).collect();
        if rows.is_empty() {
            vec![self.search_box]
        } else {
            rows
        }
    }

    /// The first selected option, else the first target, else the search box.
    #[must_use]
    pub fn default_focus(&self) -> Option<FocusId> {
        self.value
            .selected()
            .next()
            .map(|o| o.id.focus())
            .or_else(|| self.focus_targets().first().copied())
            .or(Some(self.search_box))
    }

    /// Activating an option row toggles it; the focus passes through.
    pub fn actionate(&mut self, focus: Option<FocusId>) -> Option<FocusId> {
        if let Some(focus) = focus {
            self.value.toggle(OptionId(focus.0));
        }
        focus
    }

    /// Reload from an integration with the default ordering (ascending by
    /// description).
    pub fn load(&mut self, options: Vec<OptionItem>, keep_selected: bool) {
        self.load_with(options, keep_selected, &[&OptionItem::by_description]);
    }

    /// Reload from an integration, then apply the comparator chain in order
    /// as stable sorts.
    pub fn load_with(
        &mut self,
        options: Vec<OptionItem>,
        keep_selected: bool,
        sorting: &[&dyn Fn(&OptionItem, &OptionItem) -> Ordering],
    ) {
        self.value.load(options, keep_selected);
        for compare in sorting {
            self.value.sort_by(compare);
        }
    }
}
