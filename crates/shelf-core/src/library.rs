//! The book collection
//!
//! `Library` is an ordered list of books. Insertion order is display order
//! and titles are not unique. Mutating projections consume or copy the
//! collection and hand back a new one; persistence is the `Store`'s job.

use serde::{Deserialize, Serialize};

use crate::models::{Book, SearchField, Statistics};

/// Ordered collection of book records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing list of books, keeping their order
    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    /// All books in stored order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    /// Append a book at the end, unvalidated
    pub fn with_book(mut self, book: Book) -> Self {
        self.books.push(book);
        self
    }

    /// Copy of the library without any book whose title matches
    ///
    /// Every case-insensitive match is dropped, not just the first.
    /// Returns the new library and the number of books removed.
    pub fn without_title(&self, title: &str) -> (Self, usize) {
        let title = title.trim();
        let books: Vec<Book> = self
            .books
            .iter()
            .filter(|b| !b.has_title(title))
            .cloned()
            .collect();
        let removed = self.books.len() - books.len();
        (Self { books }, removed)
    }

    /// Books whose `field` contains `term`, ignoring case, in stored order
    pub fn search<'a>(
        &'a self,
        field: SearchField,
        term: &str,
    ) -> impl Iterator<Item = &'a Book> + 'a {
        let term = term.trim().to_lowercase();
        self.books
            .iter()
            .filter(move |b| field.value(b).to_lowercase().contains(&term))
    }

    /// Reading statistics
    pub fn statistics(&self) -> Statistics {
        Statistics::from_books(&self.books)
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Library {
        Library::from_books(vec![
            Book::new("Dune", "Frank Herbert", "1965", "SciFi", true),
            Book::new("Emma", "Jane Austen", "1815", "Romance", false),
            Book::new("DUNE", "Someone Else", "2000", "Parody", false),
            Book::new("Persuasion", "Jane Austen", "1817", "Romance", true),
        ])
    }

    #[test]
    fn test_with_book_appends_last() {
        let library = sample();
        let before = library.len();
        let book = Book::new("Neuromancer", "Gibson", "1984", "Cyberpunk", false);

        let library = library.with_book(book.clone());

        assert_eq!(library.len(), before + 1);
        assert_eq!(library.books().last(), Some(&book));
    }

    #[test]
    fn test_with_book_allows_duplicates() {
        let book = Book::new("Dune", "Frank Herbert", "1965", "SciFi", true);
        let library = Library::new().with_book(book.clone()).with_book(book);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_without_title_removes_all_matches() {
        let library = sample();
        let (remaining, removed) = library.without_title("  dune ");

        assert_eq!(removed, 2);
        let titles: Vec<_> = remaining.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Emma", "Persuasion"]);
    }

    #[test]
    fn test_without_title_no_match_is_unchanged() {
        let library = sample();
        let (remaining, removed) = library.without_title("Ulysses");

        assert_eq!(removed, 0);
        assert_eq!(remaining, library);
    }

    #[test]
    fn test_without_title_is_not_substring() {
        let library = sample();
        let (_, removed) = library.without_title("Dun");
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_search_title_case_insensitive() {
        let library = sample();
        let hits: Vec<_> = library.search(SearchField::Title, "dun").collect();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].author, "Frank Herbert");
        assert_eq!(hits[1].author, "Someone Else");
    }

    #[test]
    fn test_search_author_preserves_order() {
        let library = sample();
        let titles: Vec<_> = library
            .search(SearchField::Author, "AUSTEN")
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Emma", "Persuasion"]);
    }

    #[test]
    fn test_search_no_match() {
        let library = sample();
        assert_eq!(library.search(SearchField::Title, "zzz").count(), 0);
    }

    #[test]
    fn test_statistics() {
        let stats = sample().statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.read, 2);
        assert_eq!(stats.unread, 2);
        assert_eq!(stats.percent_display(), "50.00");
    }

    #[test]
    fn test_serializes_as_array() {
        let library = Library::new().with_book(Book::new("Dune", "Herbert", "1965", "SciFi", true));
        let json = serde_json::to_string(&library).unwrap();
        assert!(json.starts_with('['));

        let empty = serde_json::to_string(&Library::new()).unwrap();
        assert_eq!(empty, "[]");
    }
}
