use serde::{Deserialize, Serialize};

use crate::ids::{AuthorId, BookId, PatronId};

/// Something that changed in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CatalogEvent {
    /// An author was added
    AuthorRegistered(AuthorId),
    /// A copy was added
    BookRegistered(BookId),
    /// A patron was added
    PatronRegistered(PatronId),
    /// A copy went out on loan
    BookBorrowed {
        /// The copy lent
        book: BookId,
        /// Who took it
        patron: PatronId,
    },
    /// A copy came back
    BookReturned {
        /// The copy returned
        book: BookId,
        /// Who brought it back
        patron: PatronId,
    },
}

/// Direction of a loan transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LoanAction {
    /// Copy handed to the patron
    Borrowed,
    /// Copy handed back by the patron
    Returned,
}

/// One entry of the catalog's loan history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LoanRecord {
    /// The copy involved
    pub book: BookId,
    /// The patron involved
    pub patron: PatronId,
    /// What happened
    pub action: LoanAction,
}

impl LoanRecord {
    /// The observer event matching this record
    #[must_use]
    pub fn event(&self) -> CatalogEvent {
        match self.action {
            LoanAction::Borrowed => {
                CatalogEvent::BookBorrowed { book: self.book, patron: self.patron }
            }
            LoanAction::Returned => {
                CatalogEvent::BookReturned { book: self.book, patron: self.patron }
            }
        }
    }
}
