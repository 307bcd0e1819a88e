//! Identity kit
//!
//! Opaque, uniquely generated identifiers for forms, inputs, focus targets,
//! options, templates, integrations and tags. Each kind is a distinct newtype
//! over the same token type, so they are never interchangeable; equality and
//! hashing compare the token only.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! identifier {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh, globally unique identifier.
            #[inline]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier!(
    /// Identifier of a live form instance.
    FormId
);

identifier!(
    /// Identifier of an authored form template.
    TemplateId
);

identifier!(
    /// Identifier of a field within a template or form.
    InputId
);

identifier!(
    /// Identifier of an addressable interactive sub-element within a field
    /// (a "focus target": the date field itself, its remove button, one
    /// option row, ...).
    FocusId
);

identifier!(
    /// Internal identity of one option row. Distinct from the option's
    /// business key, which de-duplicates against the external integration.
    OptionId
);

identifier!(
    /// Identifier of an external integration (a `FormService` implementor).
    ServiceId
);

identifier!(
    /// Grouping tag. Tags link fields to wizard steps and let integrations
    /// address fields without knowing their ids.
    Tag
);

impl OptionId {
    /// The focus target addressing this option row.
    #[inline]
    #[must_use]
    pub fn focus(self) -> FocusId {
        FocusId(self.0)
    }
}

impl Tag {
    /// Parse a tag from its token representation.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_unique() {
        assert_ne!(InputId::new(), InputId::new());
        assert_ne!(FocusId::new(), FocusId::new());
    }

    #[test]
    fn option_focus_shares_the_token() {
        let option = OptionId::new();
        assert_eq!(option.focus().0, option.0);
    }

    #[test]
    fn tag_parse_round_trips() {
        let tag = Tag::new();
        assert_eq!(Tag::parse(&tag.to_string()), Some(tag));
        assert_eq!(Tag::parse("not-a-token"), None);
    }
}
