//! Handles into the catalog's entity arenas.
//!
//! A handle is the insertion index of an entity in its collection. Entities are
//! never removed, so a handle minted by a [`crate::Catalog`] stays valid for the
//! catalog's lifetime. Two books with the same title always get distinct handles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generates a handle newtype with its accessors and display form
macro_rules! entity_handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
        pub struct $name(usize);

        impl $name {
            /// Wrap a raw arena index
            #[must_use]
            pub(crate) const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Position of the entity in registration order
            #[must_use]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $prefix, self.0)
            }
        }
    };
}

entity_handle!(
    /// Handle of a registered [`crate::Author`]
    AuthorId,
    "author"
);

entity_handle!(
    /// Handle of a registered [`crate::Book`] copy
    BookId,
    "book"
);

entity_handle!(
    /// Handle of a registered [`crate::Patron`]
    PatronId,
    "patron"
);
