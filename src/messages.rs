//! Human-readable text for catalog outcomes.
//!
//! Everything here is a pure function of its arguments; the catalog uses these
//! for its log lines and the demo binary prints them.

use crate::{
    author::Author,
    book::{Book, BookStatus},
    catalog::Catalog,
    patron::Patron,
};

/// Notice for a newly registered author
#[must_use]
pub fn author_registered(author: &Author) -> String {
    format!("Author registered: {}", author.name())
}

/// Notice for a newly registered copy
#[must_use]
pub fn book_registered(description: &str) -> String {
    format!("Book registered: {description}")
}

/// Notice for a newly registered patron
#[must_use]
pub fn patron_registered(patron: &Patron) -> String {
    format!("User registered: {}", patron.name())
}

/// Notice for a completed loan
#[must_use]
pub fn book_borrowed(description: &str) -> String {
    format!("Book successfully borrowed: {description}")
}

/// Notice for a completed return
#[must_use]
pub fn book_returned(book: &Book) -> String {
    format!("Book successfully returned: {}", book.title())
}

/// One-line description of a copy, e.g. `"Clean Code" by Robert C. Martin - Available`
#[must_use]
pub fn book_description(book: &Book, author_name: &str, holder_name: Option<&str>) -> String {
    let status = match (book.status(), holder_name) {
        (BookStatus::Borrowed, Some(holder)) => format!("Borrowed by {holder}"),
        _ => "Available".to_string(),
    };
    format!("\"{}\" by {author_name} - {status}", book.title())
}

/// What a patron is holding, e.g. `Alice has 'Clean Code'.`
#[must_use]
pub fn patron_status(patron: &Patron, borrowed_title: Option<&str>) -> String {
    match borrowed_title {
        Some(title) => format!("{} has '{title}'.", patron.name()),
        None => format!("{} has no borrowed books.", patron.name()),
    }
}

/// Section banner used by the demo
#[must_use]
pub fn section(title: &str) -> String {
    format!("========== {title} ==========")
}

/// Every copy's description, one per line, in registration order
#[must_use]
pub fn books_summary(catalog: &Catalog) -> String {
    catalog.book_ids().fold(String::new(), |mut out, id| {
        if let Some(line) = catalog.describe_book(id) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    })
}

/// Every patron's status, one per line, in registration order
#[must_use]
pub fn patrons_summary(catalog: &Catalog) -> String {
    catalog.patron_ids().fold(String::new(), |mut out, id| {
        if let Some(line) = catalog.describe_patron(id) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    })
}
