use crate::catalog::SymbolCategory;
use crate::item::AnnotatedItem;

/// Which symbol stream the grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum ViewMode {
    #[default]
    Action,
    Content,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Action, ViewMode::Content];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Action => "Action",
            ViewMode::Content => "Content",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "action" => Some(ViewMode::Action),
            "content" => Some(ViewMode::Content),
            _ => None,
        }
    }

    pub fn next(self) -> ViewMode {
        let idx = ViewMode::ALL.iter().position(|&m| m == self).unwrap_or(0);
        ViewMode::ALL[(idx + 1) % ViewMode::ALL.len()]
    }

    /// The alphabet this mode draws its non-pause symbols from.
    pub fn category(self) -> SymbolCategory {
        match self {
            ViewMode::Action => SymbolCategory::Action,
            ViewMode::Content => SymbolCategory::Content,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Content mode: emit the first action code ahead of the content cells of
    /// two-action items, reproducing output of the older grid card.
    pub legacy_content: bool,
}

/// One data cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCell<'a> {
    pub symbol: char,
    /// The record this cell was expanded from.
    pub item: &'a AnnotatedItem,
}

/// Expand the annotation sequence into one cell per symbol for `mode`.
///
/// Action mode yields one cell per action code. Content mode yields one cell
/// per character of each content string; empty strings contribute nothing.
pub fn flatten<'a>(
    items: &'a [AnnotatedItem],
    mode: ViewMode,
    options: ExpandOptions,
) -> Vec<FlatCell<'a>> {
    let mut cells = Vec::with_capacity(items.len() * 2);
    for item in items {
        debug_assert!(
            item.is_well_formed(),
            "malformed annotated item {}: {} action codes, {} content strings",
            item.id,
            item.action.len(),
            item.content_syntactic.len()
        );
        match mode {
            ViewMode::Action => {
                cells.extend(item.action.iter().map(|&symbol| FlatCell { symbol, item }));
            }
            ViewMode::Content => {
                if options.legacy_content && item.action.len() > 1 {
                    cells.push(FlatCell {
                        symbol: item.action[0],
                        item,
                    });
                }
                for content in &item.content_syntactic {
                    cells.extend(content.chars().map(|symbol| FlatCell { symbol, item }));
                }
            }
        }
    }
    cells
}
