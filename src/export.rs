use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgba, RgbaImage};

use crate::catalog::SymbolCatalog;
use crate::expand::ViewMode;
use crate::layout::{GridGeometry, LayoutOutcome};
use crate::legend::LegendFilter;
use crate::scale::GridMetrics;
use crate::view_state::GridView;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot export grid for {count} data points")]
    Insufficient { count: usize },
    #[error("cannot write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Paint `geometry` at zoom 1.0: one `unit` square per cell, with the label
/// column left transparent.
pub fn render_image(
    geometry: &GridGeometry<'_>,
    filter: &LegendFilter,
    catalog: &SymbolCatalog,
    metrics: &GridMetrics,
) -> RgbaImage {
    let unit_w = metrics.unit_width.round().max(1.0) as u32;
    let unit_h = metrics.unit_height.round().max(1.0) as u32;
    let label_w = metrics.label_width.round().max(0.0) as u32;
    let width = label_w + geometry.size() as u32 * unit_w;
    let height = geometry.row_count() as u32 * unit_h;

    let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    for (r, row) in geometry.rows().enumerate() {
        for (c, cell) in row.cells().enumerate() {
            let fill = Rgba(filter.color_for(cell.symbol, catalog).into_rgba8());
            let x0 = label_w + c as u32 * unit_w;
            let y0 = r as u32 * unit_h;
            for y in y0..y0 + unit_h {
                for x in x0..x0 + unit_w {
                    img.put_pixel(x, y, fill);
                }
            }
        }
    }
    img
}

/// Where the toolbar export button writes: `bloc-grid-<mode>.png` in the
/// working directory.
pub fn default_path(mode: ViewMode) -> PathBuf {
    let dir = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());
    dir.join(format!("bloc-grid-{}.png", mode.label().to_lowercase()))
}

/// Write the current grid of `view` to `path` as a PNG.
pub fn export_png(view: &GridView, path: &Path) -> Result<(), ExportError> {
    let outcome = view.geometry();
    let geometry = match &outcome {
        LayoutOutcome::Grid(geometry) => geometry,
        LayoutOutcome::Insufficient { count } => {
            return Err(ExportError::Insufficient { count: *count });
        }
    };
    let img = render_image(
        geometry,
        view.legend(),
        view.catalog(),
        &view.settings().metrics,
    );
    img.save_with_format(path, ImageFormat::Png)?;
    log::info!(
        "export: {}x{} grid ({} mode) -> {}",
        geometry.size(),
        geometry.row_count(),
        view.mode().label(),
        path.display()
    );
    Ok(())
}
