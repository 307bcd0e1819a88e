//! Per-field configuration
//!
//! Settable flags (`mandatory`, `active`, plus variant-specific flags) where
//! each flag carries a locked bit fixed at construction. Writing a locked
//! flag is a silent no-op, so template authors can freeze individual options
//! while editors still see a uniform mutable surface.

use serde::{Deserialize, Serialize};

/// A configurable value paired with a `locked` bit set at construction.
///
/// [`Lockable::set`] ignores writes while locked. Reading is unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lockable<T> {
    value: T,
    locked: bool,
}

impl<T> Lockable<T> {
    /// An unlocked flag with the given initial value.
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            locked: false,
        }
    }

    /// A locked flag: the initial value is final.
    #[inline]
    #[must_use]
    pub fn locked(value: T) -> Self {
        Self {
            value,
            locked: true,
        }
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Write the value. No-op when the flag is locked.
    #[inline]
    pub fn set(&mut self, value: T) {
        if self.locked {
            return;
        }
        self.value = value;
    }

    /// Whether writes are ignored.
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl<T: Copy> Lockable<T> {
    /// Current value, by copy.
    #[inline]
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Default> Default for Lockable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Configuration shared by every field variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldConfig {
    /// The form cannot be sent while a mandatory field is invalid.
    pub mandatory: Lockable<bool>,
    /// Inactive fields are hidden unless they are invalid.
    pub active: Lockable<bool>,
}

impl FieldConfig {
    /// Active, non-mandatory, both flags unlocked.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark mandatory (builder style).
    #[inline]
    #[must_use]
    pub fn with_mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = Lockable::new(mandatory);
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            mandatory: Lockable::new(false),
            active: Lockable::new(true),
        }
    }
}

/// Configuration of the option-list variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// See [`FieldConfig::mandatory`].
    pub mandatory: Lockable<bool>,
    /// See [`FieldConfig::active`].
    pub active: Lockable<bool>,
    /// At most one option may stay selected.
    pub single_selection: Lockable<bool>,
    /// Typing into the search box triggers the debounced filter rule.
    pub typing_search: Lockable<bool>,
    /// Presentation hint: render options without their descriptions.
    pub hide_description: Lockable<bool>,
}

impl OptionsConfig {
    /// Active, non-mandatory, single-selection, all flags unlocked.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set single-selection (builder style).
    #[inline]
    #[must_use]
    pub fn with_single_selection(mut self, single: bool) -> Self {
        self.single_selection = Lockable::new(single);
        self
    }

    /// Set typing-search (builder style).
    #[inline]
    #[must_use]
    pub fn with_typing_search(mut self, typing: bool) -> Self {
        self.typing_search = Lockable::new(typing);
        self
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            mandatory: Lockable::new(false),
            active: Lockable::new(true),
            single_selection: Lockable::new(true),
            typing_search: Lockable::new(false),
            hide_description: Lockable::new(false),
        }
    }
}
