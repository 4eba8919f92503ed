//! # Scanner Console
//!
//! Line-oriented stand-in for the camera screen. Each line is one event:
//! a detection, a frame capture or an edit to the scan list.
//!
//! ```text
//! > scan 8690012345678 ean13
//! Added 8690012345678, resolving product name…
//! > analyze
//! 1 new barcode(s) found.
//! > qty 1 5
//! > save
//! 2 item(s) saved to inventory.
//! ```
//!
//! List positions are 1-based on the console and 0-based in the session.

use std::path::PathBuf;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::analyzer::Analyzer;
use crate::commands::{inventory, scanner};
use crate::error::AppError;
use crate::state::{SessionState, StoreState};

const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  scan <code> [symbology]   add a detected barcode
  analyze [image-file]      run AI frame analysis
  toggle <n>                select / deselect entry n
  qty <n> <value>           set quantity of entry n
  inc <n> | dec <n>         adjust quantity of entry n
  show                      list scanned barcodes
  clear                     drop all scanned barcodes
  save                      save selected barcodes to inventory
  inventory [query]         show stored inventory
  help                      this text
  quit                      leave the console
";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Scan {
        code: String,
        symbology: Option<String>,
    },
    Analyze {
        frame: Option<PathBuf>,
    },
    Toggle(usize),
    Quantity {
        index: usize,
        input: String,
    },
    Increment(usize),
    Decrement(usize),
    Show,
    Clear,
    Save,
    Inventory {
        query: Option<String>,
    },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command `{0}` (type `help`)")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Not a list position: {0}")]
    InvalidPosition(String),
}

/// Parses one console line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "scan" => ConsoleCommand::Scan {
            code: words
                .next()
                .ok_or(ParseError::MissingArgument {
                    command: "scan",
                    argument: "a barcode",
                })?
                .to_string(),
            symbology: words.next().map(str::to_string),
        },
        "analyze" => ConsoleCommand::Analyze {
            frame: words.next().map(PathBuf::from),
        },
        "toggle" => ConsoleCommand::Toggle(position(words.next(), "toggle")?),
        "qty" => {
            let index = position(words.next(), "qty")?;
            let input = words.collect::<Vec<_>>().join(" ");
            if input.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "qty",
                    argument: "a quantity",
                });
            }
            ConsoleCommand::Quantity { index, input }
        }
        "inc" => ConsoleCommand::Increment(position(words.next(), "inc")?),
        "dec" => ConsoleCommand::Decrement(position(words.next(), "dec")?),
        "show" | "list" => ConsoleCommand::Show,
        "clear" => ConsoleCommand::Clear,
        "save" => ConsoleCommand::Save,
        "inventory" => ConsoleCommand::Inventory {
            query: words.next().map(str::to_string),
        },
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

/// 1-based console position to 0-based index.
fn position(word: Option<&str>, command: &'static str) -> Result<usize, ParseError> {
    let word = word.ok_or(ParseError::MissingArgument {
        command,
        argument: "a list position",
    })?;

    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ParseError::InvalidPosition(word.to_string())),
    }
}

/// What the loop does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(String),
    Quit,
}

/// The scanner console.
#[derive(Debug, Clone)]
pub struct Console {
    session: SessionState,
    store: StoreState,
    analyzer: Analyzer,
}

impl Console {
    pub fn new(store: StoreState, analyzer: Analyzer) -> Self {
        Console {
            session: SessionState::new(),
            store,
            analyzer,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Runs one command and returns the text to show.
    pub async fn execute(&self, command: ConsoleCommand) -> Step {
        debug!(?command, "Console command");

        let reply = match command {
            ConsoleCommand::Scan { code, symbology } => {
                match scanner::on_barcode_scanned(
                    &self.session,
                    &self.analyzer,
                    &code,
                    symbology.as_deref(),
                ) {
                    // The resolver task runs on without us
                    Ok(Some(_resolver)) => format!("Added {code}, resolving product name…"),
                    Ok(None) => format!("{code} is already in the list."),
                    Err(e) => e.message,
                }
            }
            ConsoleCommand::Analyze { frame } => match self.capture(frame).await {
                Ok(bytes) => {
                    match scanner::analyze_frame(&self.session, &self.analyzer, &bytes).await {
                        0 => "No new barcodes in the frame.".to_string(),
                        added => format!("{added} new barcode(s) found."),
                    }
                }
                Err(e) => e.message,
            },
            ConsoleCommand::Toggle(index) => {
                render(scanner::toggle_selected(&self.session, index))
            }
            ConsoleCommand::Quantity { index, input } => {
                render(scanner::set_quantity(&self.session, index, &input))
            }
            ConsoleCommand::Increment(index) => {
                render(scanner::increment_quantity(&self.session, index))
            }
            ConsoleCommand::Decrement(index) => {
                render(scanner::decrement_quantity(&self.session, index))
            }
            ConsoleCommand::Show => scanner::get_session(&self.session).to_string(),
            ConsoleCommand::Clear => {
                scanner::clear_session(&self.session);
                "Scan list cleared.".to_string()
            }
            ConsoleCommand::Save => {
                match scanner::save_to_inventory(&self.session, &self.store).await {
                    Ok(saved) => format!("{saved} item(s) saved to inventory."),
                    Err(e) => e.message,
                }
            }
            ConsoleCommand::Inventory { query } => {
                render(inventory::refresh_inventory(&self.store, query.as_deref()).await)
            }
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::Quit => return Step::Quit,
        };

        Step::Continue(reply)
    }

    /// Reads commands from `input` until `quit` or end of input.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let reply = match parse_line(&line) {
                Ok(None) => continue,
                Ok(Some(command)) => match self.execute(command).await {
                    Step::Continue(reply) => reply,
                    Step::Quit => break,
                },
                Err(e) => e.to_string(),
            };

            output.write_all(reply.as_bytes()).await?;
            if !reply.ends_with('\n') {
                output.write_all(b"\n").await?;
            }
        }

        output.flush().await
    }

    /// Frame bytes from an image file, or an empty frame.
    async fn capture(&self, frame: Option<PathBuf>) -> Result<Vec<u8>, AppError> {
        match frame {
            Some(path) => tokio::fs::read(&path).await.map_err(|e| {
                AppError::internal(format!("Could not read frame {}: {}", path.display(), e))
            }),
            None => Ok(Vec::new()),
        }
    }
}

fn render<T: ToString>(result: Result<T, AppError>) -> String {
    match result {
        Ok(view) => view.to_string(),
        Err(e) => e.message,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
