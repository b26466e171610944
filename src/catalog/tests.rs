use std::{cell::RefCell, rc::Rc};

use crate::{
    author::Author,
    book::{Book, BookStatus},
    catalog::Catalog,
    config::CatalogConfig,
    error::CatalogError,
    events::{CatalogEvent, LoanAction, LoanRecord},
    ids::{AuthorId, BookId, PatronId},
    observers::{CatalogObserver, EventLogger},
    patron::Patron,
};

/// Handles of the entities registered by [`setup_test_catalog`]
struct Fixture {
    catalog: Catalog,
    martin: AuthorId,
    bloch: AuthorId,
    clean_code: BookId,
    effective_java: BookId,
    clean_code_copy: BookId,
    alice: PatronId,
    bob: PatronId,
}

/// Two authors, three copies (two of "Clean Code") and two patrons
fn setup_test_catalog() -> Fixture {
    let mut catalog = Catalog::new();

    let martin = catalog.register_author(Author::new("Robert C. Martin"));
    let bloch = catalog.register_author(Author::new("Joshua Bloch"));

    let clean_code = catalog.register_book(Book::new("Clean Code", martin));
    let effective_java = catalog.register_book(Book::new("Effective Java", bloch));
    let clean_code_copy = catalog.register_book(Book::new("Clean Code", martin));

    let alice = catalog.register_user(Patron::new("Alice"));
    let bob = catalog.register_user(Patron::new("Bob"));

    Fixture { catalog, martin, bloch, clean_code, effective_java, clean_code_copy, alice, bob }
}

/// Observer that keeps every event it sees
#[derive(Default, Clone)]
struct Recorder(Rc<RefCell<Vec<CatalogEvent>>>);

impl CatalogObserver for Recorder {
    fn on_event(&self, event: &CatalogEvent) {
        self.0.borrow_mut().push(*event);
    }
}

#[test]
fn test_registering_books_and_authors() {
    let fx = setup_test_catalog();
    assert_eq!(fx.catalog.list_authors().len(), 2);
    assert_eq!(fx.catalog.list_books().len(), 3);
    assert_eq!(fx.catalog.list_patrons().len(), 2);
}

#[test]
fn test_registration_links_books_to_authors() {
    let fx = setup_test_catalog();

    let martin = fx.catalog.author(fx.martin).map(Author::books);
    assert_eq!(martin, Some(&[fx.clean_code, fx.clean_code_copy][..]));

    let titles: Vec<&str> =
        fx.catalog.books_by_author(fx.bloch).into_iter().map(Book::title).collect();
    assert_eq!(titles, vec!["Effective Java"]);
}

#[test]
fn test_unknown_author_still_registers_book() {
    let mut catalog = Catalog::new();
    let id = catalog.register_book(Book::new("Orphan", AuthorId::new(9)));

    assert_eq!(catalog.list_books().len(), 1);
    assert!(catalog.list_authors().is_empty());
    assert_eq!(
        catalog.describe_book(id).as_deref(),
        Some("\"Orphan\" by Unknown author - Available")
    );
}

#[test]
fn test_patron_lookup_ignores_case_and_accents() {
    let mut fx = setup_test_catalog();
    let jose = fx.catalog.register_user(Patron::new("José"));

    assert_eq!(fx.catalog.find_patron_id("ALICE"), Ok(fx.alice));
    assert_eq!(fx.catalog.find_patron_id("jose"), Ok(jose));
    assert_eq!(fx.catalog.find_patron_by_name("bob").map(Patron::name), Ok("Bob"));
}

#[test]
fn test_greek_title_lookup_ignores_final_sigma_case() {
    let mut catalog = Catalog::new();
    let author = catalog.register_author(Author::new("Homer"));
    let book = catalog.register_book(Book::new("ΟΔΟΣ", author));
    let patron = catalog.register_user(Patron::new("Ὀδυσσεύς"));

    assert_eq!(catalog.borrow_book("οδος", "οδυσσευς"), Ok(book));
    assert_eq!(catalog.book(book).and_then(Book::holder), Some(patron));
}

#[test]
fn test_borrow_lends_the_resolved_copy_to_the_resolved_patron() {
    let mut fx = setup_test_catalog();
    assert!(fx.catalog.borrow_book("Clean Code", "Alice").is_ok());

    assert_eq!(fx.catalog.borrow_book("CLEAN CODE", "bob"), Ok(fx.clean_code_copy));
    assert_eq!(fx.catalog.book(fx.clean_code_copy).and_then(Book::holder), Some(fx.bob));
    assert_eq!(
        fx.catalog.patron(fx.bob).and_then(Patron::borrowed_book),
        Some(fx.clean_code_copy)
    );
    assert_eq!(fx.catalog.book(fx.effective_java).and_then(Book::holder), None);
    assert!(fx.catalog.is_consistent());
}

#[test]
fn test_duplicate_patron_names_resolve_to_first() {
    let mut fx = setup_test_catalog();
    let second_alice = fx.catalog.register_user(Patron::new("alice"));

    assert_ne!(second_alice, fx.alice);
    assert_eq!(fx.catalog.find_patron_id("Alice"), Ok(fx.alice));
    assert_eq!(fx.catalog.list_patrons().len(), 3);
}

#[test]
fn test_missing_patron() {
    let fx = setup_test_catalog();
    assert_eq!(
        fx.catalog.find_patron_by_name("Carlos"),
        Err(CatalogError::PatronNotFound { name: "Carlos".to_string() })
    );
}

#[test]
fn test_successful_borrow() {
    let mut fx = setup_test_catalog();

    let lent = fx.catalog.borrow_book("Clean Code", "Alice");
    assert_eq!(lent, Ok(fx.clean_code));

    let alice = fx.catalog.patron(fx.alice);
    assert_eq!(alice.and_then(Patron::borrowed_book), Some(fx.clean_code));

    let book = fx.catalog.book(fx.clean_code);
    assert_eq!(book.map(Book::status), Some(BookStatus::Borrowed));
    assert_eq!(book.and_then(Book::holder), Some(fx.alice));
    assert!(fx.catalog.is_consistent());
}

#[test]
fn test_borrow_with_second_copy() {
    let mut fx = setup_test_catalog();

    assert_eq!(fx.catalog.borrow_book("Clean Code", "Alice"), Ok(fx.clean_code));
    assert_eq!(fx.catalog.borrow_book("clean code", "Bob"), Ok(fx.clean_code_copy));
    assert_eq!(fx.catalog.available_copies("Clean Code"), 0);
    assert!(fx.catalog.is_consistent());
}

#[test]
fn test_borrow_unavailable_book() {
    let mut fx = setup_test_catalog();
    fx.catalog.register_user(Patron::new("Carlos"));

    assert!(fx.catalog.borrow_book("Clean Code", "Alice").is_ok());
    assert!(fx.catalog.borrow_book("Clean Code", "Bob").is_ok());

    let result = fx.catalog.borrow_book("Clean Code", "Carlos");
    assert_eq!(result, Err(CatalogError::BookUnavailable { title: "Clean Code".to_string() }));
    assert!(fx.catalog.find_patron_by_name("Carlos").is_ok_and(|p| !p.has_borrowed_book()));
}

#[test]
fn test_patron_already_has_book() {
    let mut fx = setup_test_catalog();
    assert!(fx.catalog.borrow_book("Clean Code", "Alice").is_ok());

    let result = fx.catalog.borrow_book("Effective Java", "Alice");
    assert_eq!(result, Err(CatalogError::PatronAlreadyHasBook { name: "Alice".to_string() }));

    // The rejected request leaves the second title untouched
    assert_eq!(fx.catalog.book(fx.effective_java).map(Book::status), Some(BookStatus::Available));
    assert_eq!(fx.catalog.available_copies("Effective Java"), 1);
    assert!(fx.catalog.is_consistent());
}

#[test]
fn test_book_errors_take_precedence_over_patron_state() {
    let mut fx = setup_test_catalog();
    assert!(fx.catalog.borrow_book("Effective Java", "Alice").is_ok());

    assert_eq!(
        fx.catalog.borrow_book("Java 101", "Alice"),
        Err(CatalogError::BookNotFound { title: "Java 101".to_string() })
    );
    assert_eq!(
        fx.catalog.borrow_book("Effective Java", "Alice"),
        Err(CatalogError::BookUnavailable { title: "Effective Java".to_string() })
    );
}

#[test]
fn test_borrow_nonexistent_book() {
    let mut fx = setup_test_catalog();
    let result = fx.catalog.borrow_book("Java 101", "Alice");
    assert_eq!(result, Err(CatalogError::BookNotFound { title: "Java 101".to_string() }));
}

#[test]
fn test_borrow_with_nonexistent_patron() {
    let mut fx = setup_test_catalog();

    let existing = fx.catalog.borrow_book("Effective Java", "Carlos");
    assert_eq!(existing, Err(CatalogError::PatronNotFound { name: "Carlos".to_string() }));

    // Patron resolution comes before the title check
    let missing = fx.catalog.borrow_book("Java 101", "Carlos");
    assert_eq!(missing, Err(CatalogError::PatronNotFound { name: "Carlos".to_string() }));
}

#[test]
fn test_book_return() {
    let mut fx = setup_test_catalog();
    assert!(fx.catalog.borrow_book("Effective Java", "Alice").is_ok());

    assert_eq!(fx.catalog.return_book("alice"), Ok(fx.effective_java));

    assert_eq!(fx.catalog.patron(fx.alice).and_then(Patron::borrowed_book), None);
    let book = fx.catalog.book(fx.effective_java);
    assert_eq!(book.map(Book::status), Some(BookStatus::Available));
    assert_eq!(book.and_then(Book::holder), None);
    assert!(fx.catalog.is_consistent());
}

#[test]
fn test_return_without_book() {
    let mut fx = setup_test_catalog();
    assert_eq!(
        fx.catalog.return_book("Alice"),
        Err(CatalogError::PatronHasNoBook { name: "Alice".to_string() })
    );
    assert_eq!(
        fx.catalog.return_book("Carlos"),
        Err(CatalogError::PatronNotFound { name: "Carlos".to_string() })
    );
}

#[test]
fn test_borrow_return_borrow_round_trip() {
    let mut fx = setup_test_catalog();
    let before = fx.catalog.snapshot();

    assert!(fx.catalog.borrow_book("Clean Code", "Bob").is_ok());
    assert!(fx.catalog.return_book("Bob").is_ok());
    assert_eq!(fx.catalog.snapshot(), before);

    assert_eq!(fx.catalog.borrow_book("Clean Code", "Bob"), Ok(fx.clean_code));
    assert!(fx.catalog.is_consistent());
}

#[test]
fn test_returned_copy_is_lent_first_again() {
    let mut fx = setup_test_catalog();
    assert!(fx.catalog.borrow_book("Clean Code", "Alice").is_ok());
    assert_eq!(fx.catalog.borrow_book("Clean Code", "Bob"), Ok(fx.clean_code_copy));
    assert!(fx.catalog.return_book("Alice").is_ok());

    // Registration order decides, not return order
    let carol = fx.catalog.register_user(Patron::new("Carol"));
    assert_eq!(fx.catalog.borrow_book("Clean Code", "Carol"), Ok(fx.clean_code));
    assert_eq!(fx.catalog.book(fx.clean_code).and_then(Book::holder), Some(carol));
    assert_eq!(fx.catalog.book(fx.clean_code_copy).and_then(Book::holder), Some(fx.bob));
}

#[test]
fn test_history_tracking() {
    let mut fx = setup_test_catalog();
    assert!(fx.catalog.history().is_empty());

    assert!(fx.catalog.borrow_book("Clean Code", "Alice").is_ok());
    assert!(fx.catalog.borrow_book("Clean Code", "Alice").is_err());
    assert!(fx.catalog.return_book("Alice").is_ok());

    let history: Vec<LoanRecord> = fx.catalog.history().iter().copied().collect();
    assert_eq!(
        history,
        vec![
            LoanRecord { book: fx.clean_code, patron: fx.alice, action: LoanAction::Borrowed },
            LoanRecord { book: fx.clean_code, patron: fx.alice, action: LoanAction::Returned },
        ]
    );
}

#[test]
fn test_history_limit_drops_oldest() {
    let mut catalog = Catalog::with_config(CatalogConfig { history_limit: 2 });
    let author = catalog.register_author(Author::new("Joshua Bloch"));
    let book = catalog.register_book(Book::new("Effective Java", author));
    let patron = catalog.register_user(Patron::new("Alice"));

    for _ in 0..3 {
        assert!(catalog.borrow_book("Effective Java", "Alice").is_ok());
        assert!(catalog.return_book("Alice").is_ok());
    }

    let actions: Vec<LoanAction> = catalog.history().iter().map(|r| r.action).collect();
    assert_eq!(actions, vec![LoanAction::Borrowed, LoanAction::Returned]);
    assert!(catalog.history().iter().all(|r| r.book == book && r.patron == patron));
}

#[test]
fn test_zero_history_limit_keeps_nothing() {
    let mut catalog = Catalog::with_config(CatalogConfig { history_limit: 0 });
    let author = catalog.register_author(Author::new("Robert C. Martin"));
    catalog.register_book(Book::new("Clean Code", author));
    catalog.register_user(Patron::new("Alice"));

    assert!(catalog.borrow_book("Clean Code", "Alice").is_ok());
    assert!(catalog.history().is_empty());
}

#[test]
fn test_observers_see_changes_in_order() {
    let recorder = Recorder::default();
    let mut catalog = Catalog::new();
    catalog.register_observer(Box::new(recorder.clone()));
    catalog.register_observer(Box::new(EventLogger));

    let author = catalog.register_author(Author::new("Joshua Bloch"));
    let book = catalog.register_book(Book::new("Effective Java", author));
    let patron = catalog.register_user(Patron::new("Alice"));
    assert!(catalog.borrow_book("Effective Java", "Alice").is_ok());
    assert!(catalog.borrow_book("Effective Java", "Alice").is_err());
    assert!(catalog.return_book("Alice").is_ok());

    assert_eq!(
        *recorder.0.borrow(),
        vec![
            CatalogEvent::AuthorRegistered(author),
            CatalogEvent::BookRegistered(book),
            CatalogEvent::PatronRegistered(patron),
            CatalogEvent::BookBorrowed { book, patron },
            CatalogEvent::BookReturned { book, patron },
        ]
    );
}

#[test]
fn test_listings_are_snapshots() {
    let mut fx = setup_test_catalog();
    let before = fx.catalog.list_books();

    assert!(fx.catalog.borrow_book("Clean Code", "Alice").is_ok());

    assert!(before.iter().all(Book::is_available));
    assert_eq!(fx.catalog.list_books().iter().filter(|b| !b.is_available()).count(), 1);
}

#[test]
fn test_describe_entities() {
    let mut fx = setup_test_catalog();
    assert!(fx.catalog.borrow_book("Clean Code", "Alice").is_ok());

    assert_eq!(
        fx.catalog.describe_book(fx.clean_code).as_deref(),
        Some("\"Clean Code\" by Robert C. Martin - Borrowed by Alice")
    );
    assert_eq!(fx.catalog.describe_patron(fx.alice).as_deref(), Some("Alice has 'Clean Code'."));
    assert_eq!(fx.catalog.describe_patron(fx.bob).as_deref(), Some("Bob has no borrowed books."));
    assert_eq!(fx.catalog.describe_book(BookId::new(42)), None);
}

#[test]
fn test_snapshot_serializes() {
    let mut fx = setup_test_catalog();
    assert!(fx.catalog.borrow_book("Effective Java", "Bob").is_ok());

    let json = serde_json::to_value(fx.catalog.snapshot()).unwrap_or_default();
    assert_eq!(json["books"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["patrons"][1]["name"], "Bob");
    assert_eq!(json["patrons"][1]["borrowed"], 1);
    assert_eq!(json["books"][1]["state"]["OnLoan"], 1);
}
