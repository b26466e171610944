use serde::{Deserialize, Serialize};

use crate::ids::BookId;

/// A named author and the copies attributed to them
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Author {
    /// Display name
    name: String,
    /// Attributed copies in registration order, each handle at most once
    books: Vec<BookId>,
}

impl Author {
    /// Create an author with no attributed books
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), books: Vec::new() }
    }

    /// The author's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handles of the copies attributed to this author
    #[must_use]
    pub fn books(&self) -> &[BookId] {
        &self.books
    }

    /// Attribute a copy, ignoring a handle that is already listed
    pub(crate) fn attribute(&mut self, book: BookId) {
        if !self.books.contains(&book) {
            self.books.push(book);
        }
    }
}
