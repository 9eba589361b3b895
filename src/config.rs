use std::path::PathBuf;

use crate::expand::ExpandOptions;
use crate::layout::MIN_GRID_CELLS;
use crate::scale::GridMetrics;
use crate::theme::ThemeMode;

/// Everything the grid pipeline needs besides its data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    pub metrics: GridMetrics,
    pub min_cells: usize,
    pub expand: ExpandOptions,
    pub zoom_step: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            metrics: GridMetrics::default(),
            min_cells: MIN_GRID_CELLS,
            expand: ExpandOptions::default(),
            zoom_step: 1.25,
        }
    }
}

/// Parsed viewer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub grid: GridSettings,
    pub resize_debounce_ms: u64,
    pub theme: ThemeMode,
    /// Draw each cell's symbol inside it.
    pub labels: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            resize_debounce_ms: 120,
            theme: ThemeMode::Dark,
            labels: false,
        }
    }
}

/// Return the path to the viewer config file.
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os("BLOC_GRID_CONFIG").filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".config/bloc-grid/grid.md")
}

/// Load the config file, falling back to defaults when it is missing or unreadable.
pub fn load() -> Config {
    let path = config_file_path();
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            log::info!("config: loaded {}", path.display());
            parse_config(&content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(e) => {
            log::warn!("config: cannot read {}: {e}; using defaults", path.display());
            Config::default()
        }
    }
}

/// Parse `~/.config/bloc-grid/grid.md`.
///
/// Format:
/// ```markdown
/// # layout
/// - unit: 24
/// - label-width: 80
/// - min-cells: 36
///
/// # zoom
/// - max-zoom: 2.0
/// - zoom-step: 1.25
/// ```
///
/// Headings are for the reader only. Unknown keys and bad values are skipped.
pub fn parse_config(content: &str) -> Config {
    let mut config = Config::default();

    for line in content.lines() {
        let Some(rest) = line.trim().strip_prefix("- ") else {
            continue;
        };
        let Some((key, value)) = rest.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim().to_lowercase(), value.trim());

        let applied = match key.as_str() {
            "unit" => value.parse::<f32>().ok().filter(|n| n.is_finite()).map(|n| {
                let n = n.clamp(4.0, 128.0);
                config.grid.metrics.unit_width = n;
                config.grid.metrics.unit_height = n;
            }),
            "label-width" => value
                .parse::<f32>()
                .ok()
                .filter(|n| n.is_finite())
                .map(|n| config.grid.metrics.label_width = n.clamp(0.0, 400.0)),
            "min-cells" => value
                .parse::<usize>()
                .ok()
                .map(|n| config.grid.min_cells = n.max(1)),
            "max-zoom" => value
                .parse::<f32>()
                .ok()
                .filter(|n| n.is_finite())
                .map(|n| config.grid.metrics.max_zoom = n.clamp(1.0, 8.0)),
            "zoom-step" => value
                .parse::<f32>()
                .ok()
                .filter(|n| n.is_finite())
                .map(|n| config.grid.zoom_step = n.clamp(1.01, 4.0)),
            "resize-debounce-ms" => value
                .parse::<u64>()
                .ok()
                .map(|n| config.resize_debounce_ms = n.min(2000)),
            "legacy-content" => parse_bool(value).map(|b| config.grid.expand.legacy_content = b),
            "labels" => parse_bool(value).map(|b| config.labels = b),
            "theme" => ThemeMode::parse(value).map(|m| config.theme = m),
            _ => {
                log::warn!("config: unknown key {key:?}");
                continue;
            }
        };
        if applied.is_none() {
            log::warn!("config: ignoring {key} = {value:?}");
        }
    }

    config
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(parse_config(""), Config::default());
    }

    #[test]
    fn parse_full_config() {
        let input = r#"
# layout
- unit: 16
- label-width: 60
- min-cells: 49

# zoom
- max-zoom: 3
- zoom-step: 1.5

# behavior
- resize-debounce-ms: 250
- legacy-content: yes
- labels: on
- theme: light
"#;
        let config = parse_config(input);
        assert_eq!(config.grid.metrics.unit_width, 16.0);
        assert_eq!(config.grid.metrics.unit_height, 16.0);
        assert_eq!(config.grid.metrics.label_width, 60.0);
        assert_eq!(config.grid.min_cells, 49);
        assert_eq!(config.grid.metrics.max_zoom, 3.0);
        assert_eq!(config.grid.zoom_step, 1.5);
        assert_eq!(config.resize_debounce_ms, 250);
        assert!(config.grid.expand.legacy_content);
        assert!(config.labels);
        assert_eq!(config.theme, ThemeMode::Light);
    }

    #[test]
    fn values_are_clamped() {
        let input = r#"
- unit: 1000
- max-zoom: 0.1
- zoom-step: 1
- min-cells: 0
- resize-debounce-ms: 999999
"#;
        let config = parse_config(input);
        assert_eq!(config.grid.metrics.unit_width, 128.0);
        assert_eq!(config.grid.metrics.max_zoom, 1.0);
        assert_eq!(config.grid.zoom_step, 1.01);
        assert_eq!(config.grid.min_cells, 1);
        assert_eq!(config.resize_debounce_ms, 2000);
    }

    #[test]
    fn bad_values_and_unknown_keys_are_skipped() {
        let input = r#"
- unit: wide
- theme: purple
- legacy-content: maybe
- colour: red
not a setting
- label-width 10
- unit: NaN
- label-width: nan
- max-zoom: inf
"#;
        assert_eq!(parse_config(input), Config::default());
    }
}
