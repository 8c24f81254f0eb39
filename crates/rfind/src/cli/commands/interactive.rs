//! Implementation of `rfind interactive`.
//!
//! Reads one event per line from standard input and drives a find session over the document,
//! printing the status after each event.

use std::{
    io::{self, BufRead, IsTerminal, Write},
    process::ExitCode,
};

use rfind_engine::FindSession;
use rfind_tree::{Document, NodeId};
use tracing::debug;

use crate::cli::{
    args::InteractiveCommand,
    context::CommandContext,
    output::{dim, mark_style, match_context, print_document, report_failure, status_line, use_color},
};

/// One line of input, interpreted.
#[derive(Debug, PartialEq, Eq)]
enum Event<'a> {
    /// Search for the text.
    Query(&'a str),
    /// Move to the next match.
    Next,
    /// Move to the previous match.
    Previous,
    /// Print the highlighted document.
    Show,
    /// Open the find tool.
    Open,
    /// Close the find tool.
    Close,
    /// Leave the loop.
    Quit,
    /// An unrecognized `:` command.
    Unknown(&'a str),
}

impl<'a> Event<'a> {
    /// Parses one input line. Lines not starting with `:` are queries; a leading `::` searches
    /// for text starting with a single `:`.
    fn parse(line: &'a str) -> Self {
        let Some(command) = line.strip_prefix(':') else {
            return Self::Query(line);
        };
        if command.starts_with(':') {
            return Self::Query(command);
        }
        match command.trim() {
            "n" | "next" => Self::Next,
            "p" | "prev" | "previous" => Self::Previous,
            "show" => Self::Show,
            "open" => Self::Open,
            "close" => Self::Close,
            "q" | "quit" => Self::Quit,
            other => Self::Unknown(other),
        }
    }
}

/// State for one interactive run.
struct Repl {
    /// The document being searched.
    doc: Document,
    /// The find session.
    session: FindSession<NodeId>,
    /// Emit ANSI colors.
    color: bool,
}

impl Repl {
    /// Handles one event. Returns false when the loop should end.
    fn handle(&mut self, event: &Event<'_>) -> bool {
        match *event {
            Event::Query(_) | Event::Next | Event::Previous if !self.session.is_open() => {
                println!("{}", dim("find is closed; :open to search"));
            }
            Event::Query(query) => {
                self.session.query_changed(&mut self.doc, query);
                self.print_status();
            }
            Event::Next => {
                self.session.next(&mut self.doc);
                self.print_status();
            }
            Event::Previous => {
                self.session.previous(&mut self.doc);
                self.print_status();
            }
            Event::Show => print_document(&self.doc, &mark_style(&self.session, self.color)),
            Event::Open => {
                self.session.open();
                println!("find opened");
            }
            Event::Close => self.close(),
            Event::Quit => return false,
            Event::Unknown(command) => {
                eprintln!(
                    "unknown command ':{command}' (try :n, :p, :show, :open, :close, :q; \
                     start with :: to search for ':')"
                );
            }
        }
        true
    }

    /// Closes the tool and reports what was restored.
    fn close(&mut self) {
        let report = self.session.close(&mut self.doc);
        println!("find closed, {} highlights removed", report.restored);
        if report.mismatched > 0 || report.skipped > 0 {
            eprintln!(
                "warning: {} markers skipped, {} parents differ from their original text",
                report.skipped, report.mismatched
            );
        }
    }

    /// Prints the status line and the current match in context.
    fn print_status(&self) {
        let status = self.session.status();
        println!("{}", status_line(status, self.color));
        if let Some(failure) = status.failure() {
            report_failure(failure);
        } else if let Some(marker) = self.session.current_marker() {
            println!("  {}", match_context(&self.doc, marker));
        }
    }
}

/// Runs the interactive loop until `:q` or end of input.
pub fn run(ctx: &CommandContext, cmd: &InteractiveCommand) -> ExitCode {
    let options = ctx.find_options();
    let doc = match ctx.open_document(&cmd.file, &options) {
        Ok(doc) => doc,
        Err(code) => return code,
    };
    let mut session = FindSession::new(options);
    session.open();
    let mut repl = Repl {
        doc,
        session,
        color: use_color(cmd.no_color),
    };

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut lines = stdin.lock().lines();
    loop {
        if prompt {
            print!("find> ");
            if let Err(e) = io::stdout().flush() {
                debug!(error = %e, "could not flush prompt");
            }
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("error: failed to read input: {e}");
                repl.session.close(&mut repl.doc);
                return ExitCode::FAILURE;
            }
            None => break,
        };
        if !repl.handle(&Event::parse(&line)) {
            break;
        }
    }

    if repl.session.is_open() {
        repl.close();
    }
    ExitCode::SUCCESS
}
