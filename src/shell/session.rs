/// Interactive session
///
/// Reads one command per line, runs it against the injected inventory and
/// writes the result. Bad input is reported and the loop keeps going.

use crate::core::{Searcher, Updater};
use crate::error::Result;
use crate::shell::render;
use crate::store::Inventory;
use std::io::{BufRead, Write};
use tracing::debug;

/// How many "did you mean" names to offer
const SUGGESTION_LIMIT: usize = 3;

const SESSION_HELP: &str = "\
Commands:
    list                   Show every card
    add <name> <count>     Add <count> to a card (negative to remove)
    search <text>          Show cards whose name contains <text>
    help                   Show this help
    quit                   Leave";

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end over any `Inventory`
pub struct Session<I: Inventory, R: BufRead, W: Write> {
    inventory: I,
    input: R,
    output: W,
    updater: Updater,
    searcher: Searcher,
}

impl<I: Inventory, R: BufRead, W: Write> Session<I, R, W> {
    /// The inventory is built by the caller and handed in here
    pub fn new(inventory: I, input: R, output: W) -> Self {
        Self {
            inventory,
            input,
            output,
            updater: Updater::new(),
            searcher: Searcher::new(),
        }
    }

    /// Run until `quit` or end of input, then flush the inventory
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "card-ledger. Type 'help' for commands.")?;
        self.show_inventory()?;

        let mut line = String::new();
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            if self.execute(&line)? == Flow::Quit {
                break;
            }
        }

        self.inventory.flush()
    }

    /// Run a single command line
    ///
    /// Only failures writing to the output are returned; everything else is
    /// printed for the user.
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "list" | "ls" => self.show_inventory()?,
            "add" | "update" => self.handle_add(rest)?,
            "search" | "find" => self.handle_search(rest)?,
            "help" | "?" => writeln!(self.output, "{}", SESSION_HELP)?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => {
                writeln!(self.output, "Unknown command: {}. Type 'help'.", other)?;
            }
        }

        Ok(Flow::Continue)
    }

    /// Give the inventory back (mostly for tests)
    pub fn into_inventory(self) -> I {
        self.inventory
    }

    fn show_inventory(&mut self) -> Result<()> {
        let records = self.inventory.list_all();
        writeln!(self.output, "{}", render::format_inventory(&records))?;
        Ok(())
    }

    // "add <name...> <count>": the count is the last word, the rest is the name
    fn handle_add(&mut self, rest: &str) -> Result<()> {
        let (name, count_text) = match rest.rsplit_once(char::is_whitespace) {
            Some((name, count)) => (name.trim(), count),
            None => (rest, ""),
        };

        match self.updater.apply(&mut self.inventory, name, count_text) {
            Ok(count) => {
                debug!(name, count, "session update");
                writeln!(self.output, "Updated {} (now {}).", name, count)?;
                // Re-render so the view matches what's stored
                self.show_inventory()?;
            }
            Err(e) => {
                writeln!(self.output, "Error: {}", e.user_message())?;
            }
        }

        Ok(())
    }

    fn handle_search(&mut self, query: &str) -> Result<()> {
        if query.is_empty() {
            writeln!(self.output, "Error: Please enter a card name.")?;
            return Ok(());
        }

        let results = self.searcher.search(&self.inventory, query);
        if !results.is_empty() {
            writeln!(self.output, "{}", render::format_records(&results))?;
            return Ok(());
        }

        writeln!(self.output, "{}", render::format_no_matches(query))?;
        let suggestions = self
            .searcher
            .suggest(&self.inventory, query, SUGGESTION_LIMIT);
        if let Some(line) = render::format_suggestions(&suggestions) {
            writeln!(self.output, "{}", line)?;
        }

        Ok(())
    }
}
