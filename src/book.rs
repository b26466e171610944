use serde::{Deserialize, Serialize};

use crate::{
    error::{CatalogError, Result},
    ids::{AuthorId, PatronId},
    validate::Validate,
};

/// Availability of a single copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BookStatus {
    /// On the shelf, may be borrowed
    #[default]
    Available,
    /// Out on loan to a patron
    Borrowed,
}

/// Where a copy is; the holder exists only while the copy is out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
enum LoanState {
    /// On the shelf
    #[default]
    OnShelf,
    /// Lent to the given patron
    OnLoan(PatronId),
}

/// One copy of a title
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Title as registered
    title: String,
    /// Attributed author, fixed at construction
    author: AuthorId,
    /// Current loan state
    state: LoanState,
}

impl Book {
    /// Create an available copy of `title` by `author`
    #[must_use]
    pub fn new(title: impl Into<String>, author: AuthorId) -> Self {
        Self { title: title.into(), author, state: LoanState::OnShelf }
    }

    /// Title as registered
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Handle of the attributed author
    #[must_use]
    pub fn author(&self) -> AuthorId {
        self.author
    }

    /// Current availability
    #[must_use]
    pub fn status(&self) -> BookStatus {
        match self.state {
            LoanState::OnShelf => BookStatus::Available,
            LoanState::OnLoan(_) => BookStatus::Borrowed,
        }
    }

    /// Patron currently holding this copy, if it is out
    #[must_use]
    pub fn holder(&self) -> Option<PatronId> {
        match self.state {
            LoanState::OnShelf => None,
            LoanState::OnLoan(patron) => Some(patron),
        }
    }

    /// Whether the copy is on the shelf
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status() == BookStatus::Available
    }

    /// Mark the copy as lent to `patron`
    pub(crate) fn lend_to(&mut self, patron: PatronId) {
        self.state = LoanState::OnLoan(patron);
    }

    /// Put the copy back on the shelf
    pub(crate) fn shelve(&mut self) {
        self.state = LoanState::OnShelf;
    }
}

impl Validate for Book {
    fn validate(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(CatalogError::BookUnavailable { title: self.title.clone() })
        }
    }
}
