//! Book command handlers

use anyhow::{Context, Result};

use shelf_core::{Book, Operation, Store};

use crate::output::Output;

/// Add a book
pub fn add(
    store: &mut Store,
    title: String,
    author: String,
    year: String,
    genre: String,
    read: bool,
    output: &Output,
) -> Result<()> {
    let book = Book::new(title, author, year, genre, read);
    run(store, Operation::Add(book), output).context("Failed to add book")
}

/// Remove every book with the given title
pub fn remove(store: &mut Store, title: String, output: &Output) -> Result<()> {
    run(store, Operation::Remove { title }, output).context("Failed to remove book")
}

/// Search by title or author
pub fn search(store: &mut Store, field: String, term: String, output: &Output) -> Result<()> {
    let operation = Operation::search(&field, term)?;
    run(store, operation, output)
}

/// List all books
pub fn list(store: &mut Store, output: &Output) -> Result<()> {
    run(store, Operation::ListAll, output)
}

/// Show reading statistics
pub fn stats(store: &mut Store, output: &Output) -> Result<()> {
    run(store, Operation::Statistics, output)
}

fn run(store: &mut Store, operation: Operation, output: &Output) -> Result<()> {
    let outcome = store.execute(operation)?;
    output.print_outcome(&outcome)
}
