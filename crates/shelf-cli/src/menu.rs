//! Interactive menu
//!
//! Reads a choice, collects the arguments for it, hands the resulting
//! `Operation` to the store and writes the rendered outcome. Exit, or end
//! of input, stops the loop.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Result};
use tracing::{debug, warn};

use shelf_core::{Book, Operation, SearchField, Store};

use crate::output::Output;
use crate::prompt::Prompter;

const BANNER: &str = "\
========== Personal Library Manager ==========
1. Add Book
2. Remove Book
3. Search Library
4. View All Books
5. View Statistics
6. Exit
==============================================";

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Search,
    ListAll,
    Statistics,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(MenuChoice::Add),
            "2" => Ok(MenuChoice::Remove),
            "3" => Ok(MenuChoice::Search),
            "4" => Ok(MenuChoice::ListAll),
            "5" => Ok(MenuChoice::Statistics),
            "6" => Ok(MenuChoice::Exit),
            other => bail!("Invalid choice '{}'. Please enter a number from 1 to 6.", other),
        }
    }
}

/// What the loop does after a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Result of collecting an operation's arguments
#[derive(Debug)]
enum Step {
    Run(Operation),
    /// Input was rejected; nothing to execute
    Rejected,
    EndOfInput,
}

/// The menu driver
pub struct Menu<'a, R, W> {
    store: &'a mut Store,
    prompter: Prompter<R, W>,
    output: &'a Output,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a mut Store, prompter: Prompter<R, W>, output: &'a Output) -> Self {
        Self {
            store,
            prompter,
            output,
        }
    }

    /// Run menu cycles until Exit or end of input
    ///
    /// With `once`, a single cycle runs regardless of the choice.
    pub fn run(&mut self, once: bool) -> Result<()> {
        loop {
            let flow = self.cycle()?;
            if once || flow == Flow::Stop {
                return Ok(());
            }
        }
    }

    /// Consume the menu and return the prompt writer
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    fn cycle(&mut self) -> Result<Flow> {
        writeln!(self.prompter.output(), "\n{}\n", BANNER)?;

        let Some(answer) = self.prompter.ask("Enter your choice (1-6)")? else {
            return Ok(Flow::Stop);
        };

        let choice = match answer.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(e) => {
                writeln!(self.prompter.output(), "✗ {}", e)?;
                return Ok(Flow::Continue);
            }
        };
        debug!("Menu choice: {:?}", choice);

        if choice == MenuChoice::Exit {
            writeln!(
                self.prompter.output(),
                "Exiting Library Manager. Have a great day!"
            )?;
            return Ok(Flow::Stop);
        }

        let operation = match self.read_operation(choice)? {
            Step::Run(operation) => operation,
            Step::Rejected => return Ok(Flow::Continue),
            Step::EndOfInput => return Ok(Flow::Stop),
        };

        match self.store.execute(operation) {
            Ok(outcome) => {
                let text = self.output.render_outcome(&outcome)?;
                if !text.is_empty() {
                    writeln!(self.prompter.output(), "{}", text)?;
                }
            }
            Err(e) => {
                warn!("Operation failed: {}", e);
                writeln!(self.prompter.output(), "✗ {}", e)?;
                if let Some(hint) = e.recovery_suggestion() {
                    writeln!(self.prompter.output(), "  {}", hint)?;
                }
            }
        }

        Ok(Flow::Continue)
    }

    /// Collect the arguments for a choice
    fn read_operation(&mut self, choice: MenuChoice) -> Result<Step> {
        let operation = match choice {
            MenuChoice::Add => {
                writeln!(self.prompter.output(), "\nAdd New Book")?;
                let Some(book) = self.read_book()? else {
                    return Ok(Step::EndOfInput);
                };
                Operation::Add(book)
            }
            MenuChoice::Remove => {
                writeln!(self.prompter.output(), "\nRemove Book")?;
                let Some(title) = self.prompter.ask("Enter the title of the book to remove")?
                else {
                    return Ok(Step::EndOfInput);
                };
                Operation::Remove { title }
            }
            MenuChoice::Search => {
                writeln!(self.prompter.output(), "\nSearch Library")?;
                let Some(field) = self.prompter.ask("Search by 'title' or 'author'")? else {
                    return Ok(Step::EndOfInput);
                };
                let field = match field.parse::<SearchField>() {
                    Ok(field) => field,
                    Err(e) => {
                        writeln!(self.prompter.output(), "✗ {}", e)?;
                        return Ok(Step::Rejected);
                    }
                };
                let Some(term) = self.prompter.ask(&format!("Enter {}", field))? else {
                    return Ok(Step::EndOfInput);
                };
                Operation::Search { field, term }
            }
            MenuChoice::ListAll => Operation::ListAll,
            MenuChoice::Statistics => Operation::Statistics,
            MenuChoice::Exit => return Ok(Step::EndOfInput),
        };

        Ok(Step::Run(operation))
    }

    /// Prompt for every field of a new book
    fn read_book(&mut self) -> Result<Option<Book>> {
        let Some(title) = self.prompter.ask("Enter book title")? else {
            return Ok(None);
        };
        let Some(author) = self.prompter.ask("Enter author name")? else {
            return Ok(None);
        };
        let Some(year) = self.prompter.ask("Enter publication year")? else {
            return Ok(None);
        };
        let Some(genre) = self.prompter.ask("Enter genre")? else {
            return Ok(None);
        };
        let Some(read) = self.prompter.confirm("Have you read this book?")? else {
            return Ok(None);
        };

        Ok(Some(Book::new(title, author, year, genre, read)))
    }
}
