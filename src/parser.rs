//! Textual configuration grammar.
//!
//! Line-oriented; `#` starts a comment line and blank lines are ignored.
//! Sections come in order:
//!
//! ```text
//! # stocks
//! euro:100
//! # processes: name:(needs):(results):duration
//! buy:(euro:10):(item:1):5
//! sell:(item:1)::2
//! # objective
//! optimize:(item;time)
//! ```
//!
//! Needs and results are `;`-separated `name:qty` lists; the results group
//! may be empty or left out entirely. The `optimize` keyword is
//! case-insensitive.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::models::{Config, ConfigBuilder, Item, Process};

struct Grammar {
    stock: Regex,
    process: Regex,
    optimize: Regex,
    item: Regex,
}

impl Grammar {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            stock: Regex::new(r"^(?P<name>[^:#;()\s]+)\s*:\s*(?P<qty>\d+)$")?,
            process: Regex::new(
                r"^(?P<name>[^:#;()\s]+)\s*:\s*\((?P<needs>[^()]*)\)\s*:\s*(?:\((?P<results>[^()]*)\))?\s*:\s*(?P<duration>\d+)$",
            )?,
            optimize: Regex::new(r"^(?i:optimize)\s*:\s*\((?P<keys>[^()]*)\)$")?,
            item: Regex::new(r"^(?P<name>[^:#;()\s]+)\s*:\s*(?P<qty>\d+)$")?,
        })
    }
}

static GRAMMAR: OnceLock<Result<Grammar, regex::Error>> = OnceLock::new();

fn grammar() -> Result<&'static Grammar, ConfigError> {
    GRAMMAR
        .get_or_init(Grammar::compile)
        .as_ref()
        .map_err(|e| ConfigError::Pattern(e.clone()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Stocks,
    Processes,
    Optimize,
}

/// Parses configuration text into an unprepared [`ConfigBuilder`].
pub fn parse_config(text: &str) -> Result<ConfigBuilder, ConfigError> {
    let g = grammar()?;
    let mut builder = ConfigBuilder::new();
    let mut section = Section::Stocks;
    let mut stock_names: HashSet<String> = HashSet::new();
    let mut process_names: HashSet<String> = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if section == Section::Stocks {
            if let Some(caps) = g.stock.captures(trimmed) {
                let name = caps["name"].to_string();
                let qty = parse_qty(&caps["qty"], line)?;
                if !stock_names.insert(name.clone()) {
                    return Err(ConfigError::DuplicateStock { line, name });
                }
                builder = builder.with_stock(name, qty);
                continue;
            }
            if !g.process.is_match(trimmed) && !g.optimize.is_match(trimmed) {
                return Err(syntax(line, "expected stock or process"));
            }
            section = Section::Processes;
        }

        if section == Section::Processes {
            if let Some(caps) = g.process.captures(trimmed) {
                let name = caps["name"].to_string();
                if !process_names.insert(name.clone()) {
                    return Err(ConfigError::DuplicateProcess { line, name });
                }
                let mut process = Process::new(name)
                    .with_duration(parse_qty(&caps["duration"], line)? as u64);
                process.needs = parse_items(g, &caps["needs"], line)?;
                process.results = match caps.name("results") {
                    Some(m) => parse_items(g, m.as_str(), line)?,
                    None => Vec::new(),
                };
                builder = builder.with_process(process);
                continue;
            }
            if !g.optimize.is_match(trimmed) {
                return Err(syntax(line, "expected process or optimize"));
            }
            section = Section::Optimize;
        }

        let Some(caps) = g.optimize.captures(trimmed) else {
            return Err(syntax(line, "unexpected content after optimize"));
        };
        for key in caps["keys"].split(';').map(str::trim).filter(|k| !k.is_empty()) {
            builder = builder.with_objective(key);
        }
    }

    if builder.objective.is_empty() {
        return Err(ConfigError::MissingObjective);
    }
    debug!(
        stocks = builder.stocks.len(),
        processes = builder.processes.len(),
        objective = ?builder.objective,
        "configuration parsed"
    );
    Ok(builder)
}

/// Parses and prepares configuration text.
pub fn load_config_str(text: &str) -> Result<Config, ConfigError> {
    parse_config(text)?.build()
}

/// Reads, parses and prepares a configuration file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    load_config_str(&text)
}

fn parse_items(g: &Grammar, list: &str, line: usize) -> Result<Vec<Item>, ConfigError> {
    list.split(';')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            let caps = g
                .item
                .captures(tok)
                .ok_or_else(|| syntax(line, format!("bad item '{tok}'")))?;
            Ok(Item::new(&caps["name"], parse_qty(&caps["qty"], line)?))
        })
        .collect()
}

fn parse_qty(digits: &str, line: usize) -> Result<i64, ConfigError> {
    digits
        .parse()
        .map_err(|_| syntax(line, format!("quantity '{digits}' out of range")))
}

fn syntax(line: usize, message: impl Into<String>) -> ConfigError {
    ConfigError::Syntax {
        line,
        message: message.into(),
    }
}
