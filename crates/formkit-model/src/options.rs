//! Option engine
//!
//! Selection, filtering and de-duplication for the option-list field variant:
//! - case-insensitive text filter that never hides a selected option
//! - `load` that re-seeds the list from an integration while preserving
//!   existing selections
//! - business-key de-duplication where a later selected occurrence wins
//! - single-selection settling after every list mutation

use crate::identity::OptionId;
use crate::template::FormIcon;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// One selectable row of an option-list field.
///
/// `key` is the external business key used for de-duplication against the
/// integration; `id` is the internal identity used for focus addressing and
/// toggling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    /// Internal identity (focus addressing, toggling).
    pub id: OptionId,
    /// External business key (de-duplication).
    pub key: String,
    /// Optional presentation icon.
    pub icon: Option<FormIcon>,
    /// Human-readable description; the text filter matches against this.
    pub description: String,
    /// Whether the option is currently selected.
    pub selected: bool,
    /// Whether the text filter currently hides the option.
    pub hidden: bool,
}

impl OptionItem {
    /// A fresh, unselected, visible option.
    #[must_use]
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: OptionId::new(),
            key: key.into(),
            icon: None,
            description: description.into(),
            selected: false,
            hidden: false,
        }
    }

    /// With an icon (builder style).
    #[inline]
    #[must_use]
    pub fn with_icon(mut self, icon: FormIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Pre-selected (builder style).
    #[inline]
    #[must_use]
    pub fn preselected(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Description truncated for narrow presentation.
    #[must_use]
    pub fn short_description(&self) -> String {
        if self.description.chars().count() > 25 {
            let prefix: String = self.description.chars().take(25).collect();
            format!("{prefix}...")
        } else {
            self.description.clone()
        }
    }

    /// Default comparator chain entry: ascending by description.
    #[must_use]
    pub fn by_description(a: &OptionItem, b: &OptionItem) -> Ordering {
        a.description.cmp(&b.description)
    }
}

/// De-duplicate by business key, left to right.
///
/// The first occurrence of a key is kept, unless a later occurrence of the
/// same key is selected, in which case the later selected occurrence replaces
/// the earlier one (and takes its place at the end of the scan).
#[must_use]
pub fn dedup_by_key(options: Vec<OptionItem>) -> Vec<OptionItem> {
    let mut unique: Vec<OptionItem> = Vec::with_capacity(options.len());
    for option in options {
        if !unique.iter().any(|kept| kept.key == option.key) {
            unique.push(option);
        } else if option.selected {
            unique.retain(|kept| kept.key != option.key);
            unique.push(option);
        }
    }
    unique
}

/// The value of an option-list field.
///
/// All mutation goes through methods so the single-selection invariant can be
/// settled after every change: if `single_selection` is set and a mutation
/// leaves more than one option selected, every option that was selected both
/// before and after the mutation is deselected, leaving newly made selections
/// standing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionList {
    single_selection: bool,
    options: Vec<OptionItem>,
}

impl OptionList {
    /// A list in multi-selection mode with the given options.
    #[must_use]
    pub fn new(options: Vec<OptionItem>) -> Self {
        let mut list = Self {
            single_selection: false,
            options: Vec::new(),
        };
        list.mutate(|slots| *slots = options);
        list
    }

    /// Switch selection mode. Enabling single-selection does not retroactively
    /// demote an existing multi-selection; the next mutation settles it.
    #[inline]
    pub fn set_single_selection(&mut self, single: bool) {
        self.single_selection = single;
    }

    /// Whether the list is in single-selection mode.
    #[inline]
    #[must_use]
    pub fn single_selection(&self) -> bool {
        self.single_selection
    }

    /// All options, in display order.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &[OptionItem] {
        &self.options
    }

    /// Options the filter has not hidden. A selected option is always listed.
    pub fn unhidden(&self) -> impl Iterator<Item = &OptionItem> {
        self.options.iter().filter(|o| !o.hidden || o.selected)
    }

    /// Currently selected options, in display order.
    pub fn selected(&self) -> impl Iterator<Item = &OptionItem> {
        self.options.iter().filter(|o| o.selected)
    }

    /// Case-insensitive substring filter against the description.
    ///
    /// An empty query clears every hidden flag. A selected option is never
    /// hidden, whatever the query.
    pub fn filter_by_text(&mut self, text: &str) {
        let query = text.to_lowercase();
        self.mutate(|options| {
            for option in options.iter_mut() {
                let misses =
                    !query.is_empty() && !option.description.to_lowercase().contains(&query);
                option.hidden = misses && !option.selected;
            }
        });
    }

    /// Replace the list with `selected-from-old ++ new`, de-duplicated.
    ///
    /// Old selections are prepended so they survive even when the integration
    /// no longer returns them; with `keep_selected == false` they are first
    /// trimmed to those whose business key still exists in `new`.
    pub fn load(&mut self, new: Vec<OptionItem>, keep_selected: bool) {
        let new_keys: HashSet<&str> = new.iter().map(|o| o.key.as_str()).collect();
        let mut carried: Vec<OptionItem> = self.selected().cloned().collect();
        if !keep_selected {
            carried.retain(|o| new_keys.contains(o.key.as_str()));
        }

        let mut merged = carried;
        merged.extend(new);
        let merged = dedup_by_key(merged);
        self.mutate(|options| *options = merged);
    }

    /// Flip `selected` on the option with the given internal identity.
    /// No-op when no option matches.
    pub fn toggle(&mut self, id: OptionId) {
        self.mutate(|options| {
            for option in options.iter_mut() {
                if option.id == id {
                    option.selected = !option.selected;
                }
            }
        });
    }

    /// Drop every unselected option. Compacts transient search results before
    /// the list is persisted.
    pub fn clean(&mut self) {
        self.mutate(|options| options.retain(|o| o.selected));
    }

    /// Replace the whole list. Settles single-selection like any mutation.
    pub fn replace(&mut self, options: Vec<OptionItem>) {
        self.mutate(|slots| *slots = options);
    }

    /// Stable sort by one comparator. Order-only, selection is untouched.
    pub fn sort_by(&mut self, compare: &dyn Fn(&OptionItem, &OptionItem) -> Ordering) {
        self.options.sort_by(|a, b| compare(a, b));
    }

    fn mutate(&mut self, apply: impl FnOnce(&mut Vec<OptionItem>)) {
        let before: HashSet<String> = self.selected().map(|o| o.key.clone()).collect();
        apply(&mut self.options);
        self.settle_single_selection(&before);
    }

    /// Demote pre-existing selections when a mutation leaves several options
    /// selected in single-selection mode. Only options selected both before
    /// and after the mutation are deselected: a mutation that newly selects
    /// two options at once is deliberately left alone (callers apply one
    /// toggle per mutation).
    fn settle_single_selection(&mut self, before: &HashSet<String>) {
        if !self.single_selection {
            return;
        }
        let after: HashSet<String> = self.selected().map(|o| o.key.clone()).collect();
        if after.len() <= 1 {
            return;
        }
        for option in &mut self.options {
            if option.selected && before.contains(&option.key) {
                option.selected = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(keys: &[&str]) -> OptionList {
        OptionList::new(keys.iter().map(|k| OptionItem::new(*k, *k)).collect())
    }

    #[test]
    fn toggle_flips_only_the_matching_option() {
        let mut options = list(&["a", "b"]);
        let id = options.options()[1].id;
        options.toggle(id);
        assert!(!options.options()[0].selected);
        assert!(options.options()[1].selected);

        options.toggle(OptionId::new());
        assert!(options.options()[1].selected);
    }

    #[test]
    fn single_selection_demotes_the_previous_selection() {
        let mut options = list(&["a", "b"]);
        options.set_single_selection(true);
        let (a, b) = (options.options()[0].id, options.options()[1].id);

        options.toggle(a);
        options.toggle(b);

        let selected: Vec<&str> = options.selected().map(|o| o.key.as_str()).collect();
        assert_eq!(selected, ["b"]);
    }

    #[test]
    fn double_select_in_one_mutation_is_not_collapsed() {
        // Settling only demotes options selected both before and after a
        // mutation, so two selections made within the same mutation both
        // survive. Pinned behavior; callers toggle once per mutation.
        let mut options = list(&["a", "b"]);
        options.set_single_selection(true);
        options.replace(
            ["a", "b"]
                .iter()
                .map(|k| OptionItem::new(*k, *k).preselected())
                .collect(),
        );
        assert_eq!(options.selected().count(), 2);
    }

    #[test]
    fn filter_is_case_insensitive_and_spares_selections() {
        let mut options = list(&["tasks", "notes"]);
        let notes = options.options()[1].id;
        options.toggle(notes);

        options.filter_by_text("TASK");
        assert!(!options.options()[0].hidden);
        assert!(!options.options()[1].hidden);

        options.filter_by_text("zzz");
        assert!(options.options()[0].hidden);
        assert!(!options.options()[1].hidden);
    }

    #[test]
    fn empty_filter_clears_hidden_flags() {
        let mut options = list(&["a", "b"]);
        options.filter_by_text("a");
        options.filter_by_text("");
        assert!(options.options().iter().all(|o| !o.hidden));
    }

    #[test]
    fn load_keep_selected_prepends_missing_selections() {
        let mut options = list(&["old", "other"]);
        let old = options.options()[0].id;
        options.toggle(old);

        options.load(vec![OptionItem::new("new", "new")], true);

        let keys: Vec<&str> = options.options().iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, ["old", "new"]);
        assert!(options.options()[0].selected);
    }

    #[test]
    fn load_without_keep_drops_selections_absent_from_new() {
        let mut options = list(&["old", "kept"]);
        let (old, kept) = (options.options()[0].id, options.options()[1].id);
        options.toggle(old);
        options.toggle(kept);

        options.load(
            vec![OptionItem::new("kept", "kept"), OptionItem::new("new", "new")],
            false,
        );

        let selected: Vec<&str> = options.selected().map(|o| o.key.as_str()).collect();
        assert_eq!(selected, ["kept"]);
        assert!(!options.options().iter().any(|o| o.key == "old"));
    }

    #[test]
    fn dedup_prefers_a_later_selected_occurrence() {
        let first = OptionItem::new("k", "first");
        let second = OptionItem::new("k", "second").preselected();
        let kept = dedup_by_key(vec![first, second.clone()]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, second.id);
    }

    #[test]
    fn dedup_keeps_the_first_unselected_occurrence() {
        let first = OptionItem::new("k", "first");
        let second = OptionItem::new("k", "second");
        let kept = dedup_by_key(vec![first.clone(), second]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, first.id);
    }

    #[test]
    fn clean_drops_unselected_options() {
        let mut options = list(&["a", "b"]);
        let a = options.options()[0].id;
        options.toggle(a);
        options.clean();
        let keys: Vec<&str> = options.options().iter().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, ["a"]);
    }

    proptest! {
        #[test]
        fn single_toggles_never_leave_two_selected(toggles in prop::collection::vec(0usize..5, 0..24)) {
            let mut options = list(&["a", "b", "c", "d", "e"]);
            options.set_single_selection(true);
            for index in toggles {
                let id = options.options()[index].id;
                options.toggle(id);
                prop_assert!(options.selected().count() <= 1);
            }
        }

        #[test]
        fn dedup_is_idempotent(selected in prop::collection::vec(any::<bool>(), 1..12)) {
            let options: Vec<OptionItem> = selected
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let mut option = OptionItem::new(format!("k{}", i % 4), format!("o{i}"));
                    option.selected = *s;
                    option
                })
                .collect();
            let once = dedup_by_key(options);
            let twice = dedup_by_key(once.clone());
            prop_assert_eq!(once, twice);
        }
    }
}
