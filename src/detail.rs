use std::fmt;

use crate::catalog::SymbolCatalog;
use crate::expand::FlatCell;

/// What the detail panel shows for a hovered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellDetail {
    pub definition: String,
    /// Absent for pauses.
    pub timestamp: Option<String>,
    pub text: Option<String>,
    /// For two-action items: the whole action bloc and its per-symbol
    /// definitions. Not part of the `Display` form.
    pub bloc: Option<(String, String)>,
}

impl fmt::Display for CellDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.definition)?;
        if let Some(ts) = &self.timestamp {
            write!(f, "\n{ts}")?;
        }
        if let Some(text) = &self.text {
            write!(f, "\n{text}")?;
        }
        Ok(())
    }
}

pub fn describe(cell: &FlatCell<'_>, catalog: &SymbolCatalog) -> CellDetail {
    let definition = catalog.definition(cell.symbol).to_string();
    if catalog.is_pause(cell.symbol) {
        return CellDetail {
            definition,
            timestamp: None,
            text: None,
            bloc: None,
        };
    }
    let bloc = (cell.item.action.len() > 1).then(|| {
        let bloc: String = cell.item.action.iter().collect();
        let meaning = catalog.describe_bloc(&bloc);
        (bloc, meaning)
    });
    CellDetail {
        definition,
        timestamp: Some(cell.item.created_at.readable()),
        text: cell.item.text.clone().filter(|t| !t.trim().is_empty()),
        bloc,
    }
}

/// Identifier of the post behind `cell`, or `None` for pauses, which have no
/// external referent.
pub fn activate<'a>(cell: &FlatCell<'a>, catalog: &SymbolCatalog) -> Option<&'a str> {
    if catalog.is_pause(cell.symbol) {
        return None;
    }
    Some(cell.item.id.as_str())
}

pub fn post_url(username: &str, id: &str) -> String {
    format!("https://twitter.com/{username}/status/{id}")
}
