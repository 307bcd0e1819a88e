//! Identity-keyed, insertion-ordered field collection.

use crate::field::{Field, FieldVariant};
use crate::identity::{FocusId, InputId, Tag};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered sequence of fields, unique by field id.
///
/// Insertion order is preserved; upserting an existing id overwrites the
/// field in place rather than duplicating or reordering it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fields {
    inner: IndexMap<InputId, Field>,
}

impl Fields {
    /// An empty collection.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the collection holds no fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Insert or overwrite by field id, preserving the position of an
    /// existing id.
    pub fn upsert(&mut self, field: impl Into<Field>) {
        let field = field.into();
        self.inner.insert(field.id(), field);
    }

    /// Lookup by field id.
    #[inline]
    #[must_use]
    pub fn get(&self, id: InputId) -> Option<&Field> {
        self.inner.get(&id)
    }

    /// Mutable lookup by field id.
    #[inline]
    pub fn get_mut(&mut self, id: InputId) -> Option<&mut Field> {
        self.inner.get_mut(&id)
    }

    /// The field currently exposing the given focus target.
    #[must_use]
    pub fn by_focus(&self, focus: FocusId) -> Option<&Field> {
        self.iter().find(|f| f.focus_targets().contains(&focus))
    }

    /// The first field carrying the given tag.
    #[must_use]
    pub fn first_by_tag(&self, tag: Tag) -> Option<&Field> {
        self.iter().find(|f| f.header().tags.contains(&tag))
    }

    /// Edit the field with the given id, only if its concrete variant is
    /// `V`. A missing field or a variant mismatch is a silent skip; the
    /// return value reports whether the edit ran.
    pub fn edit_by_id<V: FieldVariant>(&mut self, id: InputId, edit: impl FnOnce(&mut V)) -> bool {
        match self.inner.get_mut(&id).and_then(V::peek_mut) {
            Some(variant) => {
                edit(variant);
                true
            }
            None => false,
        }
    }

    /// Edit the first field carrying the given tag, only if its concrete
    /// variant is `V`. Same silent-skip contract as [`Fields::edit_by_id`].
    pub fn edit_by_tag<V: FieldVariant>(&mut self, tag: Tag, edit: impl FnOnce(&mut V)) -> bool {
        let target = self
            .iter()
            .find(|f| f.header().tags.contains(&tag))
            .map(Field::id);
        match target {
            Some(id) => self.edit_by_id(id, edit),
            None => false,
        }
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.inner.values()
    }

    /// Iterate fields mutably, in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.inner.values_mut()
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<I: IntoIterator<Item = Field>>(fields: I) -> Self {
        let mut collection = Self::new();
        for field in fields {
            collection.upsert(field);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = indexmap::map::Values<'a, InputId, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{BoolField, Header, TextField};

    fn text(name: &str) -> TextField {
        TextField::new(Header::new(name, "pencil"))
    }

    #[test]
    fn upsert_overwrites_in_place() {
        let first = text("first");
        let second = text("second");
        let mut fields: Fields = [first.clone().into_field(), second.into_field()]
            .into_iter()
            .collect();

        let replacement = first.with_value("edited");
        fields.upsert(replacement);

        assert_eq!(fields.len(), 2);
        let names: Vec<&str> = fields.iter().map(|f| f.header().name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn lookup_by_focus_target() {
        let field = text("title");
        let focus = field.input_focus();
        let fields: Fields = [field.into_field()].into_iter().collect();

        assert!(fields.by_focus(focus).is_some());
        assert!(fields.by_focus(crate::identity::FocusId::new()).is_none());
    }

    #[test]
    fn edit_by_tag_skips_on_variant_mismatch() {
        let tag = Tag::new();
        let field = TextField::new(Header::new("title", "pencil").with_tag(tag));
        let mut fields: Fields = [field.into_field()].into_iter().collect();

        let ran = fields.edit_by_tag::<BoolField>(tag, |b| b.value = true);
        assert!(!ran);

        let ran = fields.edit_by_tag::<TextField>(tag, |t| t.value = "tagged".into());
        assert!(ran);
        let edited = fields.first_by_tag(tag).unwrap();
        assert_eq!(TextField::peek(edited).unwrap().value, "tagged");
    }

    #[test]
    fn edit_by_id_skips_missing_fields() {
        let mut fields = Fields::new();
        let ran = fields.edit_by_id::<TextField>(InputId::new(), |t| t.value.clear());
        assert!(!ran);
    }
}
