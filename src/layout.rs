use crate::expand::FlatCell;

/// Below this many cells the grid is not drawn; a 6x6 square is the smallest
/// shape that still reads as a calendar.
pub const MIN_GRID_CELLS: usize = 36;

/// One slot of the row-major grid: a row label or a data cell.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSlot<'a> {
    Label(String),
    Cell(FlatCell<'a>),
}

impl<'a> GridSlot<'a> {
    pub fn label(&self) -> Option<&str> {
        match self {
            GridSlot::Label(label) => Some(label),
            GridSlot::Cell(_) => None,
        }
    }

    pub fn cell(&self) -> Option<&FlatCell<'a>> {
        match self {
            GridSlot::Cell(cell) => Some(cell),
            GridSlot::Label(_) => None,
        }
    }
}

/// Square grid built from a flattened cell sequence.
///
/// Slots are stored row-major, `size + 1` per row: the row's date label
/// followed by up to `size` data cells. Only the last row may be short.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry<'a> {
    size: usize,
    slots: Vec<GridSlot<'a>>,
    data_cells: usize,
}

/// A borrowed view of one grid row.
#[derive(Debug, Clone, Copy)]
pub struct GridRow<'g, 'a> {
    pub label: &'g str,
    slots: &'g [GridSlot<'a>],
}

impl<'g, 'a> GridRow<'g, 'a> {
    pub fn cells(&self) -> impl Iterator<Item = &'g FlatCell<'a>> + 'g {
        self.slots.iter().filter_map(GridSlot::cell)
    }
}

impl<'a> GridGeometry<'a> {
    /// Side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Column count of the rendered grid, label column included.
    pub fn columns(&self) -> usize {
        self.size + 1
    }

    pub fn slots(&self) -> &[GridSlot<'a>] {
        &self.slots
    }

    pub fn data_cells(&self) -> usize {
        self.data_cells
    }

    pub fn row_count(&self) -> usize {
        self.slots.len().div_ceil(self.columns())
    }

    pub fn rows(&self) -> impl Iterator<Item = GridRow<'_, 'a>> {
        self.slots.chunks(self.columns()).map(|chunk| {
            GridRow {
                label: chunk[0].label().unwrap_or_default(),
                slots: &chunk[1..],
            }
        })
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&FlatCell<'a>> {
        if col >= self.size {
            return None;
        }
        self.slots.get(row * self.columns() + 1 + col)?.cell()
    }
}

/// Result of laying out a flattened sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome<'a> {
    Grid(GridGeometry<'a>),
    /// Too few cells to draw; the view shows `count` instead.
    Insufficient { count: usize },
}

impl<'a> LayoutOutcome<'a> {
    pub fn grid(&self) -> Option<&GridGeometry<'a>> {
        match self {
            LayoutOutcome::Grid(geometry) => Some(geometry),
            LayoutOutcome::Insufficient { .. } => None,
        }
    }
}

/// Smallest N with N * N >= count.
pub fn side_length(count: usize) -> usize {
    let mut n = (count as f64).sqrt() as usize;
    while n * n < count {
        n += 1;
    }
    while n > 0 && (n - 1) * (n - 1) >= count {
        n -= 1;
    }
    n
}

/// Arrange `cells` into an N x N grid with one date label per row.
///
/// Rows are filled from the flattened count, so trailing rows that would be
/// empty are not emitted at all.
pub fn layout<'a>(cells: &[FlatCell<'a>], min_cells: usize) -> LayoutOutcome<'a> {
    let count = cells.len();
    if count < min_cells || count == 0 {
        return LayoutOutcome::Insufficient { count };
    }

    let size = side_length(count);
    let mut slots = Vec::with_capacity(count + size);
    for row in cells.chunks(size) {
        slots.push(GridSlot::Label(row[0].item.created_at.date_label()));
        slots.extend(row.iter().copied().map(GridSlot::Cell));
    }

    LayoutOutcome::Grid(GridGeometry {
        size,
        slots,
        data_cells: count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::{ExpandOptions, ViewMode, flatten};
    use crate::item::fixtures;

    fn grid_of(len: usize) -> (Vec<crate::item::AnnotatedItem>, usize) {
        (fixtures::single_actions(len, 'p'), len)
    }

    // -----------------------------------------------------------------------
    // side_length
    // -----------------------------------------------------------------------

    #[test]
    fn side_length_is_integer_ceil_sqrt() {
        assert_eq!(side_length(0), 0);
        assert_eq!(side_length(1), 1);
        assert_eq!(side_length(35), 6);
        assert_eq!(side_length(36), 6);
        assert_eq!(side_length(37), 7);
        assert_eq!(side_length(49), 7);
        assert_eq!(side_length(50), 8);
        assert_eq!(side_length(1_000_001), 1001);
    }

    // -----------------------------------------------------------------------
    // layout
    // -----------------------------------------------------------------------

    #[test]
    fn below_threshold_is_insufficient_with_count() {
        for len in [0, 1, 20, 35] {
            let (items, _) = grid_of(len);
            let cells = flatten(&items, ViewMode::Action, ExpandOptions::default());
            assert_eq!(
                layout(&cells, MIN_GRID_CELLS),
                LayoutOutcome::Insufficient { count: len }
            );
        }
    }

    #[test]
    fn six_items_of_six_actions_make_a_six_by_seven_layout() {
        let items = fixtures::daily(6, "pp", &[]);
        let mut cells = Vec::new();
        // Three two-action passes per item gives six action cells each.
        for item in &items {
            for _ in 0..3 {
                cells.extend(flatten(
                    std::slice::from_ref(item),
                    ViewMode::Action,
                    ExpandOptions::default(),
                ));
            }
        }
        assert_eq!(cells.len(), 36);

        let outcome = layout(&cells, MIN_GRID_CELLS);
        let geometry = outcome.grid().expect("36 cells form a grid");
        assert_eq!(geometry.size(), 6);
        assert_eq!(geometry.columns(), 7);
        assert_eq!(geometry.slots().len(), 6 * 7);
        assert_eq!(geometry.row_count(), 6);
        for (i, row) in geometry.rows().enumerate() {
            assert_eq!(row.cells().count(), 6);
            assert_eq!(row.label, fixtures::daily(6, "p", &[])[i].created_at.date_label());
        }
    }

    #[test]
    fn label_slot_leads_every_row() {
        let (items, _) = grid_of(64);
        let cells = flatten(&items, ViewMode::Action, ExpandOptions::default());
        let outcome = layout(&cells, MIN_GRID_CELLS);
        let geometry = outcome.grid().unwrap();
        for (i, slot) in geometry.slots().iter().enumerate() {
            assert_eq!(slot.label().is_some(), i % geometry.columns() == 0, "slot {i}");
        }
    }

    #[test]
    fn short_last_row_keeps_every_cell() {
        let (items, len) = grid_of(40);
        let cells = flatten(&items, ViewMode::Action, ExpandOptions::default());
        let outcome = layout(&cells, MIN_GRID_CELLS);
        let geometry = outcome.grid().unwrap();
        assert_eq!(geometry.size(), 7);
        assert_eq!(geometry.data_cells(), len);
        let per_row: Vec<usize> = geometry.rows().map(|r| r.cells().count()).collect();
        assert_eq!(per_row, vec![7, 7, 7, 7, 7, 5]);
        assert_eq!(per_row.iter().sum::<usize>(), len);
    }

    #[test]
    fn trailing_empty_rows_are_not_emitted() {
        // 37 cells: N = 7 but six rows cover everything.
        let (items, _) = grid_of(37);
        let cells = flatten(&items, ViewMode::Action, ExpandOptions::default());
        let outcome = layout(&cells, MIN_GRID_CELLS);
        let geometry = outcome.grid().unwrap();
        assert_eq!(geometry.row_count(), 6);
        assert_eq!(
            geometry.slots().iter().filter(|s| s.label().is_some()).count(),
            6
        );
        assert!(geometry.rows().all(|r| r.cells().count() <= geometry.size()));
    }

    #[test]
    fn data_cells_total_matches_input_for_many_lengths() {
        for len in 36..=150 {
            let (items, _) = grid_of(len);
            let cells = flatten(&items, ViewMode::Action, ExpandOptions::default());
            let outcome = layout(&cells, MIN_GRID_CELLS);
            let geometry = outcome.grid().unwrap();
            assert_eq!(geometry.size(), side_length(len));
            assert!(geometry.row_count() <= geometry.size());
            let total: usize = geometry.rows().map(|r| r.cells().count()).sum();
            assert_eq!(total, len);
        }
    }

    #[test]
    fn row_label_comes_from_first_cell_of_row() {
        let items = fixtures::daily(49, "p", &[]);
        let cells = flatten(&items, ViewMode::Action, ExpandOptions::default());
        let outcome = layout(&cells, MIN_GRID_CELLS);
        let geometry = outcome.grid().unwrap();
        let labels: Vec<&str> = geometry.rows().map(|r| r.label).collect();
        assert_eq!(labels[0], "2023-01-03");
        assert_eq!(labels[1], "2023-01-10");
    }

    #[test]
    fn cell_at_indexes_past_the_label() {
        let (items, _) = grid_of(36);
        let cells = flatten(&items, ViewMode::Action, ExpandOptions::default());
        let outcome = layout(&cells, MIN_GRID_CELLS);
        let geometry = outcome.grid().unwrap();
        assert_eq!(geometry.cell_at(0, 0).unwrap().item.id, "0");
        assert_eq!(geometry.cell_at(1, 2).unwrap().item.id, "8");
        assert!(geometry.cell_at(0, 6).is_none());
        assert!(geometry.cell_at(6, 0).is_none());
    }

    #[test]
    fn threshold_is_configurable() {
        let (items, _) = grid_of(9);
        let cells = flatten(&items, ViewMode::Action, ExpandOptions::default());
        assert!(layout(&cells, 9).grid().is_some());
        assert_eq!(layout(&cells, 10), LayoutOutcome::Insufficient { count: 9 });
    }
}
