use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::item::AnnotatedItem;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: line {line}: {source}")]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

fn read(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load annotated items from a JSON array or a JSON-lines file.
pub fn load_items(path: &Path) -> Result<Vec<AnnotatedItem>, SourceError> {
    let content = read(path)?;
    let items = parse_items(&content).map_err(|(line, source)| SourceError::Parse {
        path: path.to_path_buf(),
        line,
        source,
    })?;
    log::info!("source: {} items from {}", items.len(), path.display());
    Ok(items)
}

/// Parse items; the error carries the 1-based line it was found on.
pub fn parse_items(content: &str) -> Result<Vec<AnnotatedItem>, (usize, serde_json::Error)> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str(content).map_err(|e| (e.line(), e));
    }
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| serde_json::from_str(line).map_err(|e| (i + 1, e)))
        .collect()
}

/// Load the symbol -> definition table.
pub fn load_symbols(path: &Path) -> Result<HashMap<char, String>, SourceError> {
    let content = read(path)?;
    let symbols = parse_symbols(&content).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        line: source.line(),
        source,
    })?;
    log::info!("source: {} symbol definitions from {}", symbols.len(), path.display());
    Ok(symbols)
}

/// Parse a JSON object keyed by symbol. Keys that are not a single character
/// are dropped with a warning.
pub fn parse_symbols(content: &str) -> Result<HashMap<char, String>, serde_json::Error> {
    let raw: HashMap<String, String> = serde_json::from_str(content)?;
    let mut symbols = HashMap::with_capacity(raw.len());
    for (key, definition) in raw {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => {
                symbols.insert(symbol, definition);
            }
            _ => log::warn!("source: skipping symbol key {key:?}"),
        }
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_json_array() {
        let content = r#"[
            {"id": "1", "created_at": 0, "action": ["p"], "content_syntactic": ["E"]},
            {"id": "2", "created_at": 60, "action": ["□", "r"], "content_syntactic": ["", "H"]}
        ]"#;
        let items = parse_items(content).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].action, vec!['□', 'r']);
    }

    #[test]
    fn parses_json_lines_skipping_blanks() {
        let content = "{\"id\": \"1\", \"created_at\": 0, \"action\": \"p\"}\n\n{\"id\": \"2\", \"created_at\": 1, \"action\": \"r\"}\n";
        let items = parse_items(content).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "2");
    }

    #[test]
    fn json_lines_error_reports_line() {
        let content = "{\"id\": \"1\", \"created_at\": 0, \"action\": \"p\"}\n{\"id\": 2\n";
        let (line, _) = parse_items(content).unwrap_err();
        assert_eq!(line, 2);
    }

    #[test]
    fn symbols_drop_multi_character_keys() {
        let symbols = parse_symbols(r#"{"p": "post", "⚀": "< 1 min", "pp": "bad"}"#).unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[&'p'], "post");
        assert_eq!(symbols[&'⚀'], "< 1 min");
    }

    #[test]
    fn load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let items_path = dir.path().join("items.json");
        let mut f = std::fs::File::create(&items_path).unwrap();
        writeln!(
            f,
            r#"[{{"id": 7, "createdAt": "2023-01-03 10:00:00", "action": "p", "contentSyntactic": "Et"}}]"#
        )
        .unwrap();
        let symbols_path = dir.path().join("symbols.json");
        std::fs::write(&symbols_path, r#"{"p": "post"}"#).unwrap();

        let items = load_items(&items_path).unwrap();
        assert_eq!(items[0].id, "7");
        let symbols = load_symbols(&symbols_path).unwrap();
        assert_eq!(symbols[&'p'], "post");
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_items(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().contains("nope.json"));
    }
}
