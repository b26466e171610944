use serde::{Deserialize, Serialize};

use crate::{
    error::{CatalogError, Result},
    ids::BookId,
    validate::Validate,
};

/// A registered borrower, holding at most one copy at a time
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Patron {
    /// Name as registered
    name: String,
    /// Copy currently held
    borrowed: Option<BookId>,
}

impl Patron {
    /// Create a patron holding nothing
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), borrowed: None }
    }

    /// Name as registered
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Copy currently held, if any
    #[must_use]
    pub fn borrowed_book(&self) -> Option<BookId> {
        self.borrowed
    }

    /// Whether the patron is holding a copy
    #[must_use]
    pub fn has_borrowed_book(&self) -> bool {
        self.borrowed.is_some()
    }

    /// Record that the patron took `book`
    pub(crate) fn take(&mut self, book: BookId) {
        self.borrowed = Some(book);
    }

    /// Clear the held copy, handing back what was held
    pub(crate) fn hand_back(&mut self) -> Option<BookId> {
        self.borrowed.take()
    }
}

impl Validate for Patron {
    fn validate(&self) -> Result<()> {
        if self.has_borrowed_book() {
            Err(CatalogError::PatronAlreadyHasBook { name: self.name.clone() })
        } else {
            Ok(())
        }
    }
}
