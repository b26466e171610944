use tracing::info;

use crate::events::CatalogEvent;

/// Trait for catalog change observation
pub trait CatalogObserver {
    /// Called after a change has been applied to the catalog
    fn on_event(&self, event: &CatalogEvent);
}

/// Logs every catalog change through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct EventLogger;

impl CatalogObserver for EventLogger {
    fn on_event(&self, event: &CatalogEvent) {
        match event {
            CatalogEvent::AuthorRegistered(author) => info!(%author, "observer: author registered"),
            CatalogEvent::BookRegistered(book) => info!(%book, "observer: book registered"),
            CatalogEvent::PatronRegistered(patron) => info!(%patron, "observer: patron registered"),
            CatalogEvent::BookBorrowed { book, patron } => {
                info!(%book, %patron, "observer: book borrowed");
            }
            CatalogEvent::BookReturned { book, patron } => {
                info!(%book, %patron, "observer: book returned");
            }
        }
    }
}
