use std::{collections::VecDeque, fmt};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    author::Author,
    book::Book,
    config::CatalogConfig,
    error::{CatalogError, Result},
    events::{CatalogEvent, LoanAction, LoanRecord},
    ids::{AuthorId, BookId, PatronId},
    messages,
    normalize::normalize,
    observers::CatalogObserver,
    patron::Patron,
    validate::Validate,
};

/// Placeholder used when a copy names an author that was never registered
const UNKNOWN_AUTHOR: &str = "Unknown author";

/// Point-in-time copy of every entity, in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    /// Registered authors
    pub authors: Vec<Author>,
    /// Registered copies
    pub books: Vec<Book>,
    /// Registered patrons
    pub patrons: Vec<Patron>,
}

/// Single-branch lending catalog.
///
/// Owns every author, copy and patron, and is the only place where loans are
/// created or closed. Titles and names are lookup keys compared through
/// [`normalize`]; identity is the handle returned at registration.
pub struct Catalog {
    /// Registered authors
    authors: Vec<Author>,
    /// Registered copies
    books: Vec<Book>,
    /// Registered patrons
    patrons: Vec<Patron>,
    /// Most recent loan transitions, oldest first
    history: VecDeque<LoanRecord>,
    /// Tunables
    config: CatalogConfig,
    /// Registered change observers
    observers: Vec<Box<dyn CatalogObserver>>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("authors", &self.authors)
            .field("books", &self.books)
            .field("patrons", &self.patrons)
            .field("history", &self.history)
            .field("config", &self.config)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CatalogConfig::default())
    }

    /// Create an empty catalog with the given configuration
    #[must_use]
    pub fn with_config(config: CatalogConfig) -> Self {
        Self {
            authors: Vec::new(),
            books: Vec::new(),
            patrons: Vec::new(),
            history: VecDeque::new(),
            config,
            observers: Vec::new(),
        }
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Register an observer to be notified of catalog changes
    pub fn register_observer(&mut self, observer: Box<dyn CatalogObserver>) {
        self.observers.push(observer);
    }

    /// Add an author. No duplicate check is made.
    pub fn register_author(&mut self, author: Author) -> AuthorId {
        let id = AuthorId::new(self.authors.len());
        info!(author = %id, name = author.name(), "{}", messages::author_registered(&author));
        self.authors.push(author);
        self.notify(&CatalogEvent::AuthorRegistered(id));
        id
    }

    /// Add a copy and attribute it to its author.
    ///
    /// Copies sharing a title are distinct entities. A copy whose author handle
    /// was not minted by this catalog is still registered, but no author lists it.
    pub fn register_book(&mut self, book: Book) -> BookId {
        let id = BookId::new(self.books.len());
        let author_id = book.author();
        self.books.push(book);

        if let Some(author) = self.authors.get_mut(author_id.index()) {
            author.attribute(id);
        } else {
            warn!(book = %id, author = %author_id, "book registered with an unknown author");
        }

        if let Some(description) = self.describe_book(id) {
            info!(book = %id, "{}", messages::book_registered(&description));
        }
        self.notify(&CatalogEvent::BookRegistered(id));
        id
    }

    /// Add a patron. Two patrons may share a name; lookups find the first.
    pub fn register_user(&mut self, patron: Patron) -> PatronId {
        let id = PatronId::new(self.patrons.len());
        info!(patron = %id, name = patron.name(), "{}", messages::patron_registered(&patron));
        self.patrons.push(patron);
        self.notify(&CatalogEvent::PatronRegistered(id));
        id
    }

    /// First registered patron whose name matches `name`
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PatronNotFound`] if no patron matches.
    pub fn find_patron_by_name(&self, name: &str) -> Result<&Patron> {
        let id = self.find_patron_id(name)?;
        self.patron(id).ok_or_else(|| CatalogError::PatronNotFound { name: name.to_owned() })
    }

    /// Handle of the first registered patron whose name matches `name`
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PatronNotFound`] if no patron matches.
    pub fn find_patron_id(&self, name: &str) -> Result<PatronId> {
        let key = normalize(name);
        self.patrons
            .iter()
            .position(|patron| normalize(patron.name()) == key)
            .map(PatronId::new)
            .ok_or_else(|| CatalogError::PatronNotFound { name: name.to_owned() })
    }

    /// Number of copies of `title` currently on the shelf
    #[must_use]
    pub fn available_copies(&self, title: &str) -> usize {
        let key = normalize(title);
        self.books
            .iter()
            .filter(|book| book.is_available() && normalize(book.title()) == key)
            .count()
    }

    /// Lend the first available copy of `title` to the patron named `patron_name`.
    ///
    /// The patron is resolved before the title, and the patron's own state is
    /// only checked once a copy has been secured.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::PatronNotFound`] if no patron matches `patron_name`
    /// - [`CatalogError::BookNotFound`] if no copy carries `title`
    /// - [`CatalogError::BookUnavailable`] if every copy of `title` is out
    /// - [`CatalogError::PatronAlreadyHasBook`] if the patron is holding a copy
    pub fn borrow_book(&mut self, title: &str, patron_name: &str) -> Result<BookId> {
        self.try_borrow(title, patron_name)
            .inspect_err(|err| debug!(title, patron = patron_name, %err, "borrow rejected"))
    }

    /// Checks and applies a loan; see [`Self::borrow_book`]
    fn try_borrow(&mut self, title: &str, patron_name: &str) -> Result<BookId> {
        let (patron_id, patron) = find_patron_mut(&mut self.patrons, patron_name)?;
        if !book_exists(&self.books, title) {
            return Err(CatalogError::BookNotFound { title: title.to_owned() });
        }
        let (book_id, book) = find_available_book_by_title(&mut self.books, title)?;

        book.validate()?;
        patron.validate()?;

        book.lend_to(patron_id);
        patron.take(book_id);

        if let Some(description) = self.describe_book(book_id) {
            info!(
                book = %book_id,
                patron = %patron_id,
                "{}",
                messages::book_borrowed(&description)
            );
        }
        self.record(LoanRecord { book: book_id, patron: patron_id, action: LoanAction::Borrowed });
        Ok(book_id)
    }

    /// Close the loan held by the patron named `patron_name`, returning the copy handed back.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::PatronNotFound`] if no patron matches `patron_name`
    /// - [`CatalogError::PatronHasNoBook`] if the patron holds nothing
    pub fn return_book(&mut self, patron_name: &str) -> Result<BookId> {
        self.try_return(patron_name)
            .inspect_err(|err| debug!(patron = patron_name, %err, "return rejected"))
    }

    /// Checks and applies a return; see [`Self::return_book`]
    fn try_return(&mut self, patron_name: &str) -> Result<BookId> {
        let (patron_id, patron) = find_patron_mut(&mut self.patrons, patron_name)?;
        let no_book = || CatalogError::PatronHasNoBook { name: patron_name.to_owned() };

        let book_id = patron.borrowed_book().ok_or_else(no_book)?;
        // Held handles were minted by `register_book`, so this lookup always hits
        let book = self.books.get_mut(book_id.index()).ok_or_else(no_book)?;

        book.shelve();
        patron.hand_back();

        info!(book = %book_id, patron = %patron_id, "{}", messages::book_returned(book));
        self.record(LoanRecord { book: book_id, patron: patron_id, action: LoanAction::Returned });
        Ok(book_id)
    }

    /// Append to the bounded history and notify observers
    fn record(&mut self, record: LoanRecord) {
        if self.config.history_limit > 0 {
            self.history.push_back(record);
            while self.history.len() > self.config.history_limit {
                self.history.pop_front();
            }
        }
        self.notify(&record.event());
    }

    /// Hand `event` to every observer in registration order
    fn notify(&self, event: &CatalogEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Registered author behind `id`
    #[must_use]
    pub fn author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.get(id.index())
    }

    /// Registered copy behind `id`
    #[must_use]
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(id.index())
    }

    /// Registered patron behind `id`
    #[must_use]
    pub fn patron(&self, id: PatronId) -> Option<&Patron> {
        self.patrons.get(id.index())
    }

    /// Handles of every copy in registration order
    #[must_use]
    pub fn book_ids(&self) -> impl Iterator<Item = BookId> {
        (0..self.books.len()).map(BookId::new)
    }

    /// Handles of every patron in registration order
    #[must_use]
    pub fn patron_ids(&self) -> impl Iterator<Item = PatronId> {
        (0..self.patrons.len()).map(PatronId::new)
    }

    /// Copies attributed to `author`, in registration order
    #[must_use]
    pub fn books_by_author(&self, author: AuthorId) -> Vec<&Book> {
        self.author(author)
            .map(|author| author.books().iter().filter_map(|&id| self.book(id)).collect())
            .unwrap_or_default()
    }

    /// Copy of every registered book in registration order
    #[must_use]
    pub fn list_books(&self) -> Vec<Book> {
        self.books.clone()
    }

    /// Copy of every registered author in registration order
    #[must_use]
    pub fn list_authors(&self) -> Vec<Author> {
        self.authors.clone()
    }

    /// Copy of every registered patron in registration order
    #[must_use]
    pub fn list_patrons(&self) -> Vec<Patron> {
        self.patrons.clone()
    }

    /// Recent loan transitions, oldest first
    #[must_use]
    pub fn history(&self) -> &VecDeque<LoanRecord> {
        &self.history
    }

    /// Copy of the whole catalog for reporting
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            authors: self.list_authors(),
            books: self.list_books(),
            patrons: self.list_patrons(),
        }
    }

    /// Description of the copy behind `id` with its author and holder names resolved
    #[must_use]
    pub fn describe_book(&self, id: BookId) -> Option<String> {
        let book = self.book(id)?;
        let author = self.author(book.author()).map_or(UNKNOWN_AUTHOR, Author::name);
        let holder = book.holder().and_then(|patron| self.patron(patron)).map(Patron::name);
        Some(messages::book_description(book, author, holder))
    }

    /// Status line of the patron behind `id`
    #[must_use]
    pub fn describe_patron(&self, id: PatronId) -> Option<String> {
        let patron = self.patron(id)?;
        let title = patron.borrowed_book().and_then(|book| self.book(book)).map(Book::title);
        Some(messages::patron_status(patron, title))
    }

    /// Whether every loan is recorded on both sides.
    ///
    /// A lent copy's holder must point back at that copy, and a patron's held
    /// copy must name that patron as its holder.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let books_agree = self.books.iter().enumerate().all(|(idx, book)| match book.holder() {
            None => true,
            Some(holder) => {
                self.patron(holder).and_then(Patron::borrowed_book) == Some(BookId::new(idx))
            }
        });
        let patrons_agree =
            self.patrons.iter().enumerate().all(|(idx, patron)| match patron.borrowed_book() {
                None => true,
                Some(book) => self.book(book).and_then(Book::holder) == Some(PatronId::new(idx)),
            });
        books_agree && patrons_agree
    }
}

/// Whether any copy carries `title`, lent or not
fn book_exists(books: &[Book], title: &str) -> bool {
    let key = normalize(title);
    books.iter().any(|book| normalize(book.title()) == key)
}

/// First registered copy of `title` that is on the shelf, with its handle
fn find_available_book_by_title<'a>(
    books: &'a mut [Book],
    title: &str,
) -> Result<(BookId, &'a mut Book)> {
    let key = normalize(title);
    books
        .iter_mut()
        .enumerate()
        .find(|(_, book)| book.is_available() && normalize(book.title()) == key)
        .map(|(idx, book)| (BookId::new(idx), book))
        .ok_or_else(|| CatalogError::BookUnavailable { title: title.to_owned() })
}

/// First registered patron whose name matches `name`, with its handle
fn find_patron_mut<'a>(
    patrons: &'a mut [Patron],
    name: &str,
) -> Result<(PatronId, &'a mut Patron)> {
    let key = normalize(name);
    patrons
        .iter_mut()
        .enumerate()
        .find(|(_, patron)| normalize(patron.name()) == key)
        .map(|(idx, patron)| (PatronId::new(idx), patron))
        .ok_or_else(|| CatalogError::PatronNotFound { name: name.to_owned() })
}

#[cfg(test)]
mod tests;
