//! Selection store demo
//!
//! Entry point for the command-line demo. Handles argument parsing,
//! logging initialization, and wiring two observers to a shared store.

use selection_store::error::{AppError, AppResult};
use selection_store::{SelectionMessage, SelectionStore, StoreConfig};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Application name for logging
const APP_NAME: &str = "selection-store";

/// Parsed command line options
#[derive(Debug, Default, PartialEq, Eq)]
struct Flags {
    /// Explicit configuration file
    config_path: Option<PathBuf>,

    /// Override for the initial selection
    initial: Option<String>,

    /// Values assigned in order
    values: Vec<String>,
}

/// What the command line asked for
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Version,
    Run(Flags),
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let flags = match parse_args(&args) {
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Ok(Command::Version) => {
            print_version();
            return Ok(());
        }
        Ok(Command::Run(flags)) => flags,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    log::info!("Starting {}", APP_NAME);

    let output = run(flags).map_err(|e| {
        if let AppError::Config(config_err) = &e {
            log::error!("{}", config_err.user_message());
        }
        e
    })?;
    println!("{}", output);

    Ok(())
}

/// Build the store, apply every value and render the final state as JSON
fn run(flags: Flags) -> AppResult<String> {
    let mut config = match &flags.config_path {
        Some(path) => StoreConfig::load_from(path)?,
        None => StoreConfig::load().unwrap_or_else(|e| {
            log::warn!("{}", e.user_message());
            StoreConfig::default()
        }),
    };
    if let Some(initial) = flags.initial {
        config.initial_selection = initial;
    }

    let store = SelectionStore::from_config(&config);

    store.subscribe(|change| {
        log::info!(
            "Selection {:?} -> {:?} ({:?})",
            change.previous,
            change.current,
            change.kind
        );
    });

    // Stand-in for a rendered component: keeps the last label it drew
    let header = Rc::new(RefCell::new(store.chosen_state()));
    let view = Rc::clone(&header);
    store.subscribe(move |change| {
        *view.borrow_mut() = change.current.clone();
    });

    for value in flags.values {
        store.update(SelectionMessage::SetGlobalVar(value));
    }

    log::debug!("Header shows {:?}", header.borrow());
    serde_json::to_string_pretty(&store.state()).map_err(|e| AppError::Unexpected(e.to_string()))
}

/// Initialize the logging system
fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,selection_store=debug"),
    )
    .format_timestamp_millis()
    .init();
}

/// Parse command line arguments (program name excluded)
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut flags = Flags::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-v" | "--version" => return Ok(Command::Version),
            "-c" | "--config" => {
                let path = args.get(i + 1).ok_or("--config requires a path argument")?;
                flags.config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "-i" | "--initial" => {
                let value = args.get(i + 1).ok_or("--initial requires a value")?;
                flags.initial = Some(value.clone());
                i += 1;
            }
            "--" => {
                flags.values.extend(args[i + 1..].iter().cloned());
                break;
            }
            arg if arg.starts_with('-') => return Err(format!("Unknown option: {}", arg)),
            value => flags.values.push(value.to_string()),
        }
        i += 1;
    }

    Ok(Command::Run(flags))
}

/// Print help message
fn print_help() {
    println!(
        r#"selection-store - Shared selection store demo

USAGE:
    selection-store [OPTIONS] [VALUES...]

OPTIONS:
    -h, --help              Show this help message
    -v, --version           Show version information
    -c, --config <PATH>     Load store configuration from PATH
    -i, --initial <VALUE>   Override the initial selection
    --                      Treat all remaining arguments as values

EXAMPLES:
    selection-store                     Print the default state
    selection-store Detail              Select "Detail"
    selection-store A B C               Last write wins: "C"
    selection-store -- -negative        Select a value starting with '-'
"#
    );
}

/// Print version information
fn print_version() {
    println!("{} {}", APP_NAME, env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn flags(list: &[&str]) -> Flags {
        match parse_args(&args(list)) {
            Ok(Command::Run(flags)) => flags,
            other => panic!("expected run flags, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_values_in_order() {
        let parsed = flags(&["A", "B", ""]);
        assert_eq!(parsed.values, vec!["A", "B", ""]);
        assert!(parsed.config_path.is_none());
    }

    #[test]
    fn test_parse_options() {
        let parsed = flags(&["-c", "/tmp/store.json", "--initial", "Weekly", "Daily"]);
        assert_eq!(parsed.config_path, Some(PathBuf::from("/tmp/store.json")));
        assert_eq!(parsed.initial.as_deref(), Some("Weekly"));
        assert_eq!(parsed.values, vec!["Daily"]);
    }

    #[test]
    fn test_parse_double_dash_passes_dashed_values() {
        let parsed = flags(&["A", "--", "-negative", "--help"]);
        assert_eq!(parsed.values, vec!["A", "-negative", "--help"]);
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(parse_args(&args(&["A", "--help"])), Ok(Command::Help));
        assert_eq!(parse_args(&args(&["-v"])), Ok(Command::Version));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&args(&["--config"])).is_err());
        assert!(parse_args(&args(&["-i"])).is_err());
        let err = parse_args(&args(&["--bogus"])).unwrap_err();
        assert!(err.contains("--bogus"));
    }

    #[test]
    fn test_run_last_value_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let output = run(flags(&[
            "-c",
            file.path().to_str().unwrap(),
            "A",
            "B",
        ]))
        .unwrap();
        let state: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(state["chosenState"], "B");
    }

    #[test]
    fn test_run_initial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let output = run(flags(&["-c", file.path().to_str().unwrap(), "-i", "Weekly"])).unwrap();
        assert!(output.contains("\"Weekly\""));
    }

    #[test]
    fn test_run_bad_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let err = run(flags(&["-c", missing.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
