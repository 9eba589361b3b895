mod app;
mod catalog;
mod config;
mod detail;
mod expand;
mod export;
mod ipc;
mod item;
mod layout;
mod legend;
mod logging;
mod scale;
mod source;
mod theme;
mod util;
mod view_state;
mod views;

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::catalog::SymbolCatalog;
use crate::expand::ViewMode;

/// Grid viewer for BLOC-annotated account activity.
#[derive(Debug, Parser)]
#[command(name = "bloc-grid", version = env!("BLOC_GRID_VERSION"))]
struct Args {
    /// Annotated items, as a JSON array or JSON lines.
    items: PathBuf,
    /// JSON object mapping each symbol to its definition.
    #[arg(long)]
    symbols: Option<PathBuf>,
    /// Account name used to link cells to posts.
    #[arg(long, value_parser = parse_user)]
    user: Option<String>,
    /// Initial view mode.
    #[arg(long, value_enum, ignore_case = true, default_value = "action")]
    mode: ViewMode,
}

fn parse_user(raw: &str) -> Result<String, String> {
    let user = raw.trim().trim_start_matches('@');
    if user.is_empty() {
        return Err("user name is empty".to_string());
    }
    Ok(user.to_string())
}

fn main() -> ExitCode {
    // Hold the handle so buffered log lines flush on exit.
    let _logger = match logging::init_logging() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("[bloc-grid] {e}");
            None
        }
    };

    let args = Args::parse();

    let config = config::load();

    let mut items = match source::load_items(&args.items) {
        Ok(items) => items,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let before = items.len();
    items.retain(|item| item.is_well_formed());
    if items.len() < before {
        log::warn!("dropped {} malformed items", before - items.len());
    }

    let definitions = match &args.symbols {
        Some(path) => match source::load_symbols(path) {
            Ok(symbols) => symbols,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => HashMap::new(),
    };

    let launch = app::Launch {
        items,
        items_path: args.items,
        catalog: SymbolCatalog::builtin().with_definitions(definitions),
        config,
        username: args.user,
        mode: args.mode,
    };

    match app::run(launch) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("viewer exited: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("bloc-grid").chain(list.iter().copied()))
    }

    #[test]
    fn items_path_alone() {
        let parsed = args(&["items.json"]).unwrap();
        assert_eq!(parsed.items, PathBuf::from("items.json"));
        assert_eq!(parsed.symbols, None);
        assert_eq!(parsed.user, None);
        assert_eq!(parsed.mode, ViewMode::Action);
    }

    #[test]
    fn all_options() {
        let parsed = args(&[
            "--mode", "Content", "items.jsonl", "--user", "@someone", "--symbols", "sym.json",
        ])
        .unwrap();
        assert_eq!(parsed.items, PathBuf::from("items.jsonl"));
        assert_eq!(parsed.symbols, Some(PathBuf::from("sym.json")));
        assert_eq!(parsed.user.as_deref(), Some("someone"));
        assert_eq!(parsed.mode, ViewMode::Content);
    }

    #[test]
    fn flag_is_not_taken_as_a_value() {
        let err = args(&["--user", "--mode", "items.json"]).unwrap_err();
        assert_ne!(err.kind(), ErrorKind::DisplayHelp);
        assert!(args(&["items.json", "--user"]).is_err());
    }

    #[test]
    fn version_flag_reports_build_stamp() {
        assert!(!env!("BLOC_GRID_VERSION").is_empty());
        assert!(!env!("BLOC_GRID_COMMIT").is_empty());
        assert_eq!(
            args(&["--version"]).unwrap_err().kind(),
            ErrorKind::DisplayVersion
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            args(&[]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            args(&["a.json", "b.json"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert_eq!(
            args(&["a.json", "--mode", "both"]).unwrap_err().kind(),
            ErrorKind::InvalidValue
        );
        assert_eq!(
            args(&["a.json", "--user", "@"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert_eq!(
            args(&["--help"]).unwrap_err().kind(),
            ErrorKind::DisplayHelp
        );
    }
}
