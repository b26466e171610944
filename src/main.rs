use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use lending_catalog::{Author, Book, Catalog, CatalogConfig, EventLogger, Patron, messages};
use tracing_subscriber::EnvFilter;

/// Walk a small lending catalog through its borrow and return rules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log every catalog change, including rejected requests
    #[arg(short, long)]
    verbose: bool,

    /// Print the final catalog as JSON after the walkthrough
    #[arg(long)]
    json: bool,

    /// Read the catalog configuration from a JSON file instead of the environment
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter =
        if args.verbose { "lending_catalog=debug" } else { "lending_catalog=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Build the catalog and run the walkthrough
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => CatalogConfig::from_json_file(path)?,
        None => CatalogConfig::from_env()?,
    };

    let mut catalog = Catalog::with_config(config);
    if args.verbose {
        catalog.register_observer(Box::new(EventLogger));
    }

    let martin = catalog.register_author(Author::new("Robert C. Martin"));
    let bloch = catalog.register_author(Author::new("Joshua Bloch"));

    // Two copies of the same title
    catalog.register_book(Book::new("Clean Code", martin));
    catalog.register_book(Book::new("Effective Java", bloch));
    catalog.register_book(Book::new("Clean Code", martin));

    catalog.register_user(Patron::new("Alice"));
    catalog.register_user(Patron::new("Bob"));

    print_section("INITIAL BOOK LIST");
    print!("{}", messages::books_summary(&catalog));

    print_section("ALICE BORROWS 'Clean Code'");
    try_to_borrow(&mut catalog, "Clean Code", "Alice");

    print_section("BOB BORROWS 'Clean Code'");
    try_to_borrow(&mut catalog, "Clean Code", "Bob");

    print_section("BOB TRIES TO BORROW 'Effective Java'");
    try_to_borrow(&mut catalog, "Effective Java", "Bob");

    print_section("ALICE RETURNS 'Clean Code'");
    try_to_return(&mut catalog, "Alice");

    print_section("ALICE BORROWS 'Effective Java'");
    try_to_borrow(&mut catalog, "Effective Java", "Alice");

    print_section("TRYING TO BORROW NON-EXISTENT BOOK");
    try_to_borrow(&mut catalog, "Java 101", "Alice");

    print_section("TRYING TO BORROW WITH NON-EXISTENT USER");
    try_to_borrow(&mut catalog, "Effective Java", "Carlos");

    print_section("FINAL BOOK LIST");
    print!("{}", messages::books_summary(&catalog));

    print_section("FINAL USER STATUS");
    print!("{}", messages::patrons_summary(&catalog));

    if args.json {
        print_section("SNAPSHOT");
        println!("{}", serde_json::to_string_pretty(&catalog.snapshot())?);
    }

    Ok(())
}

/// Attempt a loan and report the outcome
fn try_to_borrow(catalog: &mut Catalog, title: &str, patron: &str) {
    match catalog.borrow_book(title, patron) {
        Ok(book) => {
            let description = catalog.describe_book(book).unwrap_or_default();
            println!("{}", messages::book_borrowed(&description).green());
        }
        Err(e) => println!("{} {e}", "Error:".red()),
    }
}

/// Attempt a return and report the outcome
fn try_to_return(catalog: &mut Catalog, patron: &str) {
    let returned = catalog.return_book(patron);
    match returned.map(|book| catalog.book(book)) {
        Ok(Some(book)) => println!("{}", messages::book_returned(book).green()),
        Ok(None) => {}
        Err(e) => println!("{} {e}", "Error:".red()),
    }
}

/// Print a section banner
fn print_section(title: &str) {
    println!("\n{}", messages::section(title).cyan().bold());
}
