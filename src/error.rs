//! Rejections raised by catalog operations.

use thiserror::Error;

/// Business-rule rejections of the catalog.
///
/// None of these are transient: retrying the same request against the same
/// catalog state yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No registered copy carries the requested title
    #[error("Book '{title}' not found.")]
    BookNotFound {
        /// Title as requested by the caller
        title: String,
    },

    /// The title exists but every copy is out on loan
    #[error("Book '{title}' is already borrowed.")]
    BookUnavailable {
        /// Title as requested by the caller
        title: String,
    },

    /// No registered patron carries the requested name
    #[error("User '{name}' not found.")]
    PatronNotFound {
        /// Name as requested by the caller
        name: String,
    },

    /// Borrow requested by a patron who is already holding a book
    #[error("User '{name}' already has a book.")]
    PatronAlreadyHasBook {
        /// Name of the patron
        name: String,
    },

    /// Return requested by a patron who holds nothing
    #[error("User '{name}' does not have a borrowed book.")]
    PatronHasNoBook {
        /// Name of the patron
        name: String,
    },
}

/// Result alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
