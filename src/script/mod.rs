//! Line-oriented command scripts
//!
//! One command per line:
//!
//! ```text
//! insert <key> <value>
//! search <key>
//! delete <key>
//! dump | stats | len | clear
//! ```
//!
//! Bare tokens are integers when they parse as `i64` and text otherwise.
//! Double-quoted tokens are always text and may contain spaces (`\"` and
//! `\\` escape). A `#` at the start of a token comments out the rest of the
//! line.

use std::fmt;
use std::io::{BufRead, Write};

use thiserror::Error;

use crate::scalar::Scalar;
use crate::table::{ChainedHashTable, TableConfig, TableError, TableStats};

/// Problems with a single script line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' takes {expected} argument(s), got {found}")]
    Arity {
        command: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Parse { line: usize, source: CommandError },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(Scalar, Scalar),
    Search(Scalar),
    Delete(Scalar),
    Dump,
    Stats,
    Len,
    Clear,
}

impl Command {
    /// Parse one line. Blank lines and comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut tokens = tokenize(line)?.into_iter();
        let Some(head) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<Scalar> = tokens.collect();

        let name = match &head {
            Scalar::Text(name) => name.to_ascii_lowercase(),
            Scalar::Int(n) => return Err(CommandError::Unknown(n.to_string())),
        };

        let command = match name.as_str() {
            "insert" => {
                let [key, value] = take_args::<2>("insert", args)?;
                Command::Insert(key, value)
            }
            "search" => {
                let [key] = take_args::<1>("search", args)?;
                Command::Search(key)
            }
            "delete" => {
                let [key] = take_args::<1>("delete", args)?;
                Command::Delete(key)
            }
            "dump" => {
                take_args::<0>("dump", args)?;
                Command::Dump
            }
            "stats" => {
                take_args::<0>("stats", args)?;
                Command::Stats
            }
            "len" => {
                take_args::<0>("len", args)?;
                Command::Len
            }
            "clear" => {
                take_args::<0>("clear", args)?;
                Command::Clear
            }
            _ => return Err(CommandError::Unknown(name)),
        };
        Ok(Some(command))
    }
}

fn take_args<const N: usize>(
    command: &'static str,
    args: Vec<Scalar>,
) -> Result<[Scalar; N], CommandError> {
    let found = args.len();
    args.try_into().map_err(|_| CommandError::Arity {
        command,
        expected: N,
        found,
    })
}

fn tokenize(line: &str) -> Result<Vec<Scalar>, CommandError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.peek() {
            None | Some('#') => break,
            Some('"') => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        None => return Err(CommandError::UnterminatedQuote),
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped @ ('"' | '\\')) => text.push(escaped),
                            Some(other) => {
                                text.push('\\');
                                text.push(other);
                            }
                            None => return Err(CommandError::UnterminatedQuote),
                        },
                        Some(c) => text.push(c),
                    }
                }
                tokens.push(Scalar::Text(text));
            }
            Some(_) => {
                let mut bare = String::new();
                while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                    bare.push(c);
                }
                let token = bare.parse::<Scalar>().unwrap_or_else(|never| match never {});
                tokens.push(token);
            }
        }
    }
    Ok(tokens)
}

/// How `dump` and `stats` render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Result of one executed command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Stored { previous: Option<Scalar> },
    Found(Option<Scalar>),
    Deleted(bool),
    Listing(String),
    Count(usize),
    Cleared,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Stored { previous: None } => f.write_str("ok"),
            Reply::Stored {
                previous: Some(previous),
            } => write!(f, "ok (replaced {})", previous),
            Reply::Found(Some(value)) => write!(f, "{}", value),
            Reply::Found(None) => f.write_str("not found"),
            Reply::Deleted(removed) => write!(f, "{}", removed),
            Reply::Listing(text) => f.write_str(text),
            Reply::Count(n) => write!(f, "{}", n),
            Reply::Cleared => f.write_str("cleared"),
        }
    }
}

/// Human-readable stats line
pub fn format_stats(stats: &TableStats) -> String {
    format!(
        "entries: {}, buckets: {}, occupied: {}, longest chain: {}, load factor: {:.2}",
        stats.entries,
        stats.bucket_count,
        stats.occupied_buckets,
        stats.longest_chain,
        stats.load_factor
    )
}

/// A table plus the commands run against it
pub struct Session {
    table: ChainedHashTable<Scalar, Scalar>,
    format: OutputFormat,
}

impl Session {
    pub fn new(table: ChainedHashTable<Scalar, Scalar>, format: OutputFormat) -> Self {
        Self { table, format }
    }

    pub fn from_config(config: &TableConfig, format: OutputFormat) -> Result<Self, TableError> {
        Ok(Self::new(ChainedHashTable::from_config(config)?, format))
    }

    pub fn table(&self) -> &ChainedHashTable<Scalar, Scalar> {
        &self.table
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, ScriptError> {
        let reply = match command {
            Command::Insert(key, value) => Reply::Stored {
                previous: self.table.insert(key, value),
            },
            Command::Search(key) => Reply::Found(self.table.search(&key).cloned()),
            Command::Delete(key) => Reply::Deleted(self.table.delete(&key)),
            Command::Dump => Reply::Listing(match self.format {
                OutputFormat::Text => self.table.to_string(),
                OutputFormat::Json => serde_json::to_string(&self.table.dump())?,
            }),
            Command::Stats => {
                let stats = self.table.stats();
                Reply::Listing(match self.format {
                    OutputFormat::Text => format_stats(&stats),
                    OutputFormat::Json => serde_json::to_string(&stats)?,
                })
            }
            Command::Len => Reply::Count(self.table.len()),
            Command::Clear => {
                self.table.clear();
                Reply::Cleared
            }
        };
        Ok(reply)
    }

    /// Execute every line of `input`, writing one reply per command.
    ///
    /// Stops at the first malformed line. Returns the number of commands run.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
    ) -> Result<usize, ScriptError> {
        let mut executed = 0;
        for (number, line) in input.lines().enumerate() {
            let line = line?;
            let command = Command::parse(&line).map_err(|source| ScriptError::Parse {
                line: number + 1,
                source,
            })?;
            let Some(command) = command else {
                continue;
            };

            tracing::trace!(line = number + 1, ?command, "executing");
            let reply = self.execute(command)?;
            writeln!(out, "{}", reply)?;
            executed += 1;
        }
        tracing::debug!(executed, entries = self.table.len(), "script finished");
        Ok(executed)
    }
}

#[cfg(test)]
mod tests;
