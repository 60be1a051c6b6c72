use super::{FieldId, TableId};

use std::fmt;

/// A named foreign-key relationship from one table to another.
#[derive(Debug, Clone)]
pub struct Reference {
    pub id: ReferenceId,

    /// Table declaring the reference
    pub owner: TableId,

    /// Position among the owner's references
    pub index: usize,

    pub name: String,

    /// Local field holding the foreign key
    pub field: FieldId,

    /// Table the foreign key points at
    pub target: TableId,

    /// A reference is nullable when its local field is
    pub nullable: bool,

    /// Reverse collection created on the target, if any
    pub backref: Option<CollectionId>,
}

/// The reverse, one-to-many view of a [`Reference`].
#[derive(Debug, Clone)]
pub struct Collection {
    pub id: CollectionId,

    /// Table exposing the collection; the reference's target
    pub owner: TableId,

    pub name: String,

    /// Reference whose rows make up the collection
    pub reference: ReferenceId,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct ReferenceId(pub usize);

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct CollectionId(pub usize);

impl fmt::Debug for ReferenceId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ReferenceId({})", self.0)
    }
}

impl fmt::Debug for CollectionId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "CollectionId({})", self.0)
    }
}

impl From<&Reference> for ReferenceId {
    fn from(value: &Reference) -> Self {
        value.id
    }
}
