//! Single-branch lending catalog.
//!
//! Tracks authors, book copies and patrons, and the one-copy-per-patron loans
//! between them. All cross-entity links are handles into the [`Catalog`]'s
//! arenas; the catalog is the only component that changes them.

pub mod author;
pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod ids;
pub mod messages;
pub mod normalize;
pub mod observers;
pub mod patron;
pub mod validate;

pub use author::Author;
pub use book::{Book, BookStatus};
pub use catalog::{Catalog, CatalogSnapshot};
pub use config::{CatalogConfig, ConfigError};
pub use error::{CatalogError, Result};
pub use events::{CatalogEvent, LoanAction, LoanRecord};
pub use ids::{AuthorId, BookId, PatronId};
pub use normalize::normalize;
pub use observers::{CatalogObserver, EventLogger};
pub use patron::Patron;
pub use validate::Validate;
