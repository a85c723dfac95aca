//! Console command grammar.
//!
//! ```text
//! fetch <keyword...> [country=<name>] [locality=<name>] [count=<n>]
//! filter [active] [shopify] [fast] [exclude=a,b,c]
//! upload filter|email <path>
//! extract | export | show | help | quit
//! ```
//!
//! Values containing spaces are quoted: `country="United States"`.

use leadgen_core::{FilterCriteria, SearchQuery, Stage};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Fetch(SearchQuery),
    Filter(FilterCriteria),
    Upload { stage: Stage, path: String },
    Extract,
    Export,
    Show,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help` for a list")]
    UnknownCommand(String),
    #[error("unknown option `{option}` for `{command}`")]
    UnknownOption { command: &'static str, option: String },
    #[error("count must be a whole number, got `{0}`")]
    InvalidCount(String),
    #[error("unknown stage `{0}`; expected fetch, filter or email")]
    UnknownStage(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unterminated quote")]
    UnterminatedQuote,
}

pub fn parse(line: &str) -> Result<ConsoleCommand, CommandError> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Ok(ConsoleCommand::Empty);
    };
    match head.to_lowercase().as_str() {
        "fetch" => parse_fetch(args),
        "filter" => parse_filter(args),
        "upload" => parse_upload(args),
        "extract" => no_args("extract", args, ConsoleCommand::Extract),
        "export" => no_args("export", args, ConsoleCommand::Export),
        "show" => no_args("show", args, ConsoleCommand::Show),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" => Ok(ConsoleCommand::Quit),
        _ => Err(CommandError::UnknownCommand(head.clone())),
    }
}

fn parse_fetch(args: &[String]) -> Result<ConsoleCommand, CommandError> {
    let mut keyword = Vec::new();
    let mut query = SearchQuery::new("");
    for arg in args {
        match arg.split_once('=') {
            Some(("country", value)) => query = query.with_country(value),
            Some(("locality", value)) => query = query.with_locality(value),
            Some(("count", value)) => {
                let count = value
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| CommandError::InvalidCount(value.to_string()))?;
                query = query.with_count(count);
            }
            Some((option, _)) => {
                return Err(CommandError::UnknownOption {
                    command: "fetch",
                    option: option.to_string(),
                })
            }
            None => keyword.push(arg.as_str()),
        }
    }
    query.keyword = keyword.join(" ");
    Ok(ConsoleCommand::Fetch(query))
}

fn parse_filter(args: &[String]) -> Result<ConsoleCommand, CommandError> {
    let mut criteria = FilterCriteria::default();
    for arg in args {
        if let Some(raw) = arg.strip_prefix("exclude=") {
            criteria = criteria.with_exclusions(raw);
            continue;
        }
        match arg.to_lowercase().as_str() {
            "active" | "domain-active" => criteria.domain_active = true,
            "shopify" => criteria.is_shopify = true,
            "fast" | "load-time" => criteria.load_time_check = true,
            _ => {
                return Err(CommandError::UnknownOption {
                    command: "filter",
                    option: arg.clone(),
                })
            }
        }
    }
    Ok(ConsoleCommand::Filter(criteria))
}

fn parse_upload(args: &[String]) -> Result<ConsoleCommand, CommandError> {
    const USAGE: &str = "upload filter|email <path>";
    let [stage, path] = args else {
        return Err(CommandError::Usage(USAGE));
    };
    let stage = match stage.to_lowercase().as_str() {
        "fetch" => Stage::Fetch,
        "filter" => Stage::Filter,
        "email" => Stage::Email,
        _ => return Err(CommandError::UnknownStage(stage.clone())),
    };
    Ok(ConsoleCommand::Upload {
        stage,
        path: path.clone(),
    })
}

fn no_args(
    name: &'static str,
    args: &[String],
    command: ConsoleCommand,
) -> Result<ConsoleCommand, CommandError> {
    match args.first() {
        Some(extra) => Err(CommandError::UnknownOption {
            command: name,
            option: extra.clone(),
        }),
        None => Ok(command),
    }
}

/// Whitespace split honouring single and double quotes anywhere in a token.
fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }
    if quote.is_some() {
        return Err(CommandError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
