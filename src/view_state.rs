use iced::Color;

use crate::catalog::SymbolCatalog;
use crate::config::GridSettings;
use crate::detail::{self, CellDetail};
use crate::expand::{FlatCell, ViewMode, flatten};
use crate::item::AnnotatedItem;
use crate::layout::{LayoutOutcome, layout, side_length};
use crate::legend::{LegendEntry, LegendFilter};
use crate::scale::{Fit, ZoomState};

/// Per-account grid state.
///
/// Derived data (flattened cells, geometry, legend rows) is recomputed on
/// read from the items and the current mode; only the enabled-symbol set,
/// the mode and the zoom are stored.
pub struct GridView {
    items: Vec<AnnotatedItem>,
    catalog: SymbolCatalog,
    settings: GridSettings,
    mode: ViewMode,
    legend: LegendFilter,
    zoom: ZoomState,
    viewport_width: f32,
}

impl GridView {
    pub fn new(
        items: Vec<AnnotatedItem>,
        catalog: SymbolCatalog,
        settings: GridSettings,
        mode: ViewMode,
        viewport_width: f32,
    ) -> Self {
        let fit = settings.metrics.fit(viewport_width, 0);
        let mut view = Self {
            items,
            catalog,
            settings,
            mode,
            legend: LegendFilter::default(),
            zoom: ZoomState::new(fit, settings.zoom_step),
            viewport_width,
        };
        view.rebuild();
        view
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn legend(&self) -> &LegendFilter {
        &self.legend
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomState {
        &mut self.zoom
    }

    pub fn fit(&self) -> Fit {
        self.zoom.fit()
    }

    pub fn cells(&self) -> Vec<FlatCell<'_>> {
        flatten(&self.items, self.mode, self.settings.expand)
    }

    pub fn geometry(&self) -> LayoutOutcome<'_> {
        layout(&self.cells(), self.settings.min_cells)
    }

    /// Switch view mode; returns false when already in `mode`.
    pub fn set_mode(&mut self, mode: ViewMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.rebuild();
        true
    }

    /// New source data for the same account.
    pub fn replace_items(&mut self, items: Vec<AnnotatedItem>) {
        self.items = items;
        self.rebuild();
    }

    pub fn toggle_symbol(&mut self, symbol: char) -> bool {
        self.legend.toggle(symbol)
    }

    /// Adopt a new available width; returns false when unchanged.
    pub fn resize(&mut self, viewport_width: f32) -> bool {
        if (self.viewport_width - viewport_width).abs() < 0.5 {
            return false;
        }
        self.viewport_width = viewport_width;
        let count = self.cells().len();
        self.refit(count);
        true
    }

    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.legend.entries(&self.cells(), &self.catalog, self.mode)
    }

    pub fn color_for(&self, symbol: char) -> Color {
        self.legend.color_for(symbol, &self.catalog)
    }

    pub fn describe_at(&self, row: usize, col: usize) -> Option<CellDetail> {
        let outcome = self.geometry();
        let cell = outcome.grid()?.cell_at(row, col)?;
        Some(detail::describe(cell, &self.catalog))
    }

    /// Post id to open for the cell at (`row`, `col`), if it has one.
    pub fn activate_at(&self, row: usize, col: usize) -> Option<String> {
        let outcome = self.geometry();
        let cell = outcome.grid()?.cell_at(row, col)?;
        detail::activate(cell, &self.catalog).map(str::to_string)
    }

    // Mode or data changed: everything derived starts over.
    fn rebuild(&mut self) {
        let count = {
            let cells = flatten(&self.items, self.mode, self.settings.expand);
            self.legend.reset(&cells, &self.catalog);
            cells.len()
        };
        self.refit(count);
        log::debug!(
            "grid: {} mode, {count} cells, {} symbols present",
            self.mode.label(),
            self.legend.present().len()
        );
    }

    fn refit(&mut self, count: usize) {
        let fit = self
            .settings
            .metrics
            .fit(self.viewport_width, side_length(count));
        self.zoom.refit(fit);
    }
}
