use std::collections::{BTreeSet, HashMap};

use iced::Color;

use crate::catalog::{DISABLED_COLOR, SymbolCatalog};
use crate::expand::{FlatCell, ViewMode};

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub symbol: char,
    pub color: Color,
    pub count: usize,
    pub enabled: bool,
}

/// Distinct known symbols occurring in `cells`.
pub fn present_symbols(cells: &[FlatCell<'_>], catalog: &SymbolCatalog) -> BTreeSet<char> {
    cells
        .iter()
        .map(|c| c.symbol)
        .filter(|&s| catalog.knows(s))
        .collect()
}

/// Tracks which symbols are drawn in color.
///
/// Filtering only dims cells; it never removes them from the grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LegendFilter {
    present: BTreeSet<char>,
    enabled: BTreeSet<char>,
}

impl LegendFilter {
    pub fn new(cells: &[FlatCell<'_>], catalog: &SymbolCatalog) -> Self {
        let mut filter = Self::default();
        filter.reset(cells, catalog);
        filter
    }

    /// Re-derive the present set and enable all of it.
    pub fn reset(&mut self, cells: &[FlatCell<'_>], catalog: &SymbolCatalog) {
        self.present = present_symbols(cells, catalog);
        self.enabled = self.present.clone();
    }

    pub fn present(&self) -> &BTreeSet<char> {
        &self.present
    }

    pub fn is_enabled(&self, symbol: char) -> bool {
        self.enabled.contains(&symbol)
    }

    /// Flip `symbol` in the enabled set; returns whether it is now enabled.
    pub fn toggle(&mut self, symbol: char) -> bool {
        if self.enabled.remove(&symbol) {
            false
        } else {
            self.enabled.insert(symbol);
            true
        }
    }

    pub fn color_for(&self, symbol: char, catalog: &SymbolCatalog) -> Color {
        if !self.is_enabled(symbol) {
            return DISABLED_COLOR;
        }
        catalog.color(symbol).unwrap_or(DISABLED_COLOR)
    }

    /// Legend rows for the present symbols: the mode's legend order first,
    /// then any other present symbol in palette order.
    pub fn entries(
        &self,
        cells: &[FlatCell<'_>],
        catalog: &SymbolCatalog,
        mode: ViewMode,
    ) -> Vec<LegendEntry> {
        let mut counts: HashMap<char, usize> = HashMap::new();
        for cell in cells {
            *counts.entry(cell.symbol).or_default() += 1;
        }

        let in_legend: BTreeSet<char> = catalog.legend(mode).map(|s| s.symbol).collect();
        let ordered = catalog
            .legend(mode)
            .map(|s| s.symbol)
            .chain(catalog.symbols().filter(|s| !in_legend.contains(s)));

        ordered
            .filter(|s| self.present.contains(s))
            .map(|symbol| LegendEntry {
                symbol,
                color: catalog.color(symbol).unwrap_or(DISABLED_COLOR),
                count: counts.get(&symbol).copied().unwrap_or(0),
                enabled: self.is_enabled(symbol),
            })
            .collect()
    }
}
