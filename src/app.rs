use std::path::PathBuf;
use std::time::{Duration, Instant};

use iced::widget::{column, container};
use iced::{Element, Length, Size, Subscription, Task};

use crate::catalog::SymbolCatalog;
use crate::config::Config;
use crate::detail;
use crate::expand::ViewMode;
use crate::export;
use crate::ipc;
use crate::source;
use crate::item::AnnotatedItem;
use crate::theme::{self, ThemeColors, ThemeMode};
use crate::view_state::GridView;

pub(crate) const EDGE_MARGIN: u16 = 24;

const WINDOW_WIDTH: f32 = 1100.0;
const WINDOW_HEIGHT: f32 = 900.0;
// Horizontal space around the grid viewport: outer padding plus scrollbar.
const GRID_GUTTER: f32 = 2.0 * EDGE_MARGIN as f32 + 16.0;
const TICK_MS: u64 = 40;

/// Everything the viewer needs at boot.
#[derive(Clone)]
pub(crate) struct Launch {
    pub(crate) items: Vec<AnnotatedItem>,
    pub(crate) items_path: PathBuf,
    pub(crate) catalog: SymbolCatalog,
    pub(crate) config: Config,
    pub(crate) username: Option<String>,
    pub(crate) mode: ViewMode,
}

struct PendingResize {
    width: f32,
    at: Instant,
}

// --- Viewer State ---

pub(crate) struct Viewer {
    pub(crate) grid: GridView,
    items_path: PathBuf,
    pub(crate) username: Option<String>,
    pub(crate) theme_mode: ThemeMode,
    pub(crate) colors: ThemeColors,
    pub(crate) show_labels: bool,
    pub(crate) hovered_cell: Option<(usize, usize)>,
    pub(crate) hovered_legend: Option<char>,
    pending_resize: Option<PendingResize>,
    resize_debounce: Duration,
}

#[derive(Debug, Clone)]
pub(crate) enum Message {
    SetMode(ViewMode),
    CycleMode,
    ToggleSymbol(char),
    ToggleLabels,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    HoverCell(usize, usize),
    UnhoverCell(usize, usize),
    ActivateCell(usize, usize),
    HoverLegend(char),
    UnhoverLegend(char),
    WindowResized(f32),
    Tick,
    Reload,
    Export(PathBuf),
    ThemeSet(ThemeMode),
    ThemeToggle,
}

pub(crate) fn run(launch: Launch) -> iced::Result {
    log::info!(
        "v{} ({}) starting: {} items",
        env!("BLOC_GRID_VERSION"),
        env!("BLOC_GRID_COMMIT"),
        launch.items.len()
    );

    iced::application(move || Viewer::new(launch.clone()), Viewer::update, Viewer::view)
        .title(Viewer::title)
        .theme(Viewer::theme)
        .subscription(Viewer::subscription)
        .window_size(Size::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .run()
}

impl Viewer {
    pub(crate) fn new(launch: Launch) -> (Self, Task<Message>) {
        let Launch {
            items,
            items_path,
            catalog,
            config,
            username,
            mode,
        } = launch;
        let grid = GridView::new(items, catalog, config.grid, mode, WINDOW_WIDTH - GRID_GUTTER);
        log::info!(
            "booting -> {} mode, {} symbols present",
            mode.label(),
            grid.legend().present().len()
        );
        (
            Self {
                grid,
                items_path,
                username,
                theme_mode: config.theme,
                colors: theme::resolve(config.theme),
                show_labels: config.labels,
                hovered_cell: None,
                hovered_legend: None,
                pending_resize: None,
                resize_debounce: Duration::from_millis(config.resize_debounce_ms),
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        match &self.username {
            Some(user) => format!("bloc-grid: @{user} ({})", self.grid.mode().label()),
            None => format!("bloc-grid ({})", self.grid.mode().label()),
        }
    }

    fn theme(&self) -> iced::Theme {
        if self.colors.is_dark {
            iced::Theme::Dark
        } else {
            iced::Theme::Light
        }
    }

    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SetMode(mode) => {
                let from = self.grid.mode();
                if self.grid.set_mode(mode) {
                    self.hovered_cell = None;
                    self.hovered_legend = None;
                    log::info!("mode {} -> {}", from.label(), mode.label());
                }
            }
            Message::CycleMode => {
                let next = self.grid.mode().next();
                return self.update(Message::SetMode(next));
            }
            Message::ToggleSymbol(symbol) => {
                let enabled = self.grid.toggle_symbol(symbol);
                log::info!("symbol {symbol} -> {}", if enabled { "on" } else { "off" });
            }
            Message::ToggleLabels => {
                self.show_labels = !self.show_labels;
                log::debug!("labels -> {}", self.show_labels);
            }
            Message::ZoomIn => self.grid.zoom_mut().zoom_in(),
            Message::ZoomOut => self.grid.zoom_mut().zoom_out(),
            Message::ZoomReset => self.grid.zoom_mut().reset(),
            Message::HoverCell(row, col) => {
                self.hovered_cell = Some((row, col));
            }
            Message::UnhoverCell(row, col) => {
                if self.hovered_cell == Some((row, col)) {
                    self.hovered_cell = None;
                }
            }
            Message::ActivateCell(row, col) => self.open_post(row, col),
            Message::HoverLegend(symbol) => {
                self.hovered_legend = Some(symbol);
            }
            Message::UnhoverLegend(symbol) => {
                if self.hovered_legend == Some(symbol) {
                    self.hovered_legend = None;
                }
            }
            Message::WindowResized(width) => {
                self.pending_resize = Some(PendingResize {
                    width: (width - GRID_GUTTER).max(1.0),
                    at: Instant::now(),
                });
            }
            Message::Tick => {
                self.flush_resize(Instant::now());
            }
            Message::Reload => self.reload(),
            Message::Export(path) => {
                if let Err(e) = export::export_png(&self.grid, &path) {
                    log::error!("export to {} failed: {e}", path.display());
                }
            }
            Message::ThemeSet(mode) => {
                self.theme_mode = mode;
                self.colors = theme::resolve(mode);
                log::info!("theme -> {mode:?}");
            }
            Message::ThemeToggle => {
                let next = if self.colors.is_dark {
                    ThemeMode::Light
                } else {
                    ThemeMode::Dark
                };
                return self.update(Message::ThemeSet(next));
            }
        }
        Task::none()
    }

    /// Commit the newest pending width once the window has been quiet for
    /// the debounce interval. Returns true when the grid was refit.
    fn flush_resize(&mut self, now: Instant) -> bool {
        let Some(pending) = &self.pending_resize else {
            return false;
        };
        if now.duration_since(pending.at) < self.resize_debounce {
            return false;
        }
        let width = pending.width;
        self.pending_resize = None;
        let refit = self.grid.resize(width);
        if refit {
            log::debug!(
                "refit: width {width:.0} -> scale {:.3}",
                self.grid.fit().scale
            );
        }
        refit
    }

    /// Re-read the items file; the legend and zoom start over.
    fn reload(&mut self) {
        let mut items = match source::load_items(&self.items_path) {
            Ok(items) => items,
            Err(e) => {
                log::error!("reload failed: {e}");
                return;
            }
        };
        items.retain(AnnotatedItem::is_well_formed);
        self.hovered_cell = None;
        self.hovered_legend = None;
        self.grid.replace_items(items);
    }

    fn open_post(&self, row: usize, col: usize) {
        let Some(id) = self.grid.activate_at(row, col) else {
            return;
        };
        let Some(user) = self.username.clone() else {
            log::warn!("no --user given; cannot link post {id}");
            return;
        };
        let url = detail::post_url(&user, &id);
        std::thread::spawn(move || {
            match std::process::Command::new("xdg-open").arg(&url).status() {
                Ok(s) if s.success() => log::info!("opened {url}"),
                Ok(s) => log::warn!("xdg-open exited: {s}"),
                Err(e) => log::error!("xdg-open failed: {e}"),
            }
        });
    }

    fn view(&self) -> Element<'_, Message> {
        let body = column![
            self.view_header(),
            self.view_legend(),
            self.view_grid(),
            self.view_detail(),
        ]
        .spacing(12)
        .width(Length::Fill);

        container(body)
            .padding(EDGE_MARGIN)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(self.colors.window_style())
            .into()
    }

    fn subscription(state: &Self) -> Subscription<Message> {
        let mut subs = vec![
            Subscription::run(ipc::socket_listener),
            iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size.width)),
        ];
        if state.pending_resize.is_some() {
            subs.push(Subscription::run_with(TICK_MS, ipc::tick_stream));
        }
        Subscription::batch(subs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::fixtures;

    fn viewer(count: usize) -> Viewer {
        let launch = Launch {
            items: fixtures::single_actions(count, 'p'),
            items_path: PathBuf::from("items.json"),
            catalog: SymbolCatalog::builtin(),
            config: Config::default(),
            username: None,
            mode: ViewMode::Action,
        };
        Viewer::new(launch).0
    }

    #[test]
    fn resize_waits_for_quiet_period() {
        let mut v = viewer(64);
        let scale = v.grid.fit().scale;
        let _ = v.update(Message::WindowResized(2.0 * WINDOW_WIDTH));

        let at = v.pending_resize.as_ref().unwrap().at;
        assert!(!v.flush_resize(at));
        assert_eq!(v.grid.fit().scale, scale);

        assert!(v.flush_resize(at + Duration::from_millis(500)));
        assert!(v.pending_resize.is_none());
        assert!(v.grid.fit().scale > scale);
    }

    #[test]
    fn latest_resize_wins() {
        let mut v = viewer(64);
        let _ = v.update(Message::WindowResized(400.0));
        let _ = v.update(Message::WindowResized(1400.0));
        let at = v.pending_resize.as_ref().unwrap().at;
        v.flush_resize(at + Duration::from_secs(1));
        let expected = v.grid.settings().metrics.fit(1400.0 - GRID_GUTTER, 8);
        assert_eq!(v.grid.fit(), expected);
    }

    #[test]
    fn cycle_mode_clears_hover() {
        let mut v = viewer(64);
        let _ = v.update(Message::HoverCell(1, 1));
        let _ = v.update(Message::CycleMode);
        assert_eq!(v.grid.mode(), ViewMode::Content);
        assert_eq!(v.hovered_cell, None);
    }

    #[test]
    fn unhover_ignores_stale_cell() {
        let mut v = viewer(64);
        let _ = v.update(Message::HoverCell(0, 1));
        let _ = v.update(Message::UnhoverCell(0, 0));
        assert_eq!(v.hovered_cell, Some((0, 1)));
        let _ = v.update(Message::UnhoverCell(0, 1));
        assert_eq!(v.hovered_cell, None);
    }

    #[test]
    fn toggle_symbol_message_dims_cells() {
        let mut v = viewer(64);
        let _ = v.update(Message::ToggleSymbol('p'));
        assert!(!v.grid.legend().is_enabled('p'));
        let _ = v.update(Message::ToggleSymbol('p'));
        assert!(v.grid.legend().is_enabled('p'));
    }

    #[test]
    fn reload_picks_up_new_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.json");
        let lines: Vec<String> = (0..49)
            .map(|i| format!(r#"{{"id": "{i}", "created_at": {}, "action": "r", "content_syntactic": "E"}}"#, 60 * i))
            .collect();
        std::fs::write(&path, lines.join("\n")).unwrap();

        let mut v = viewer(64);
        v.items_path = path;
        let _ = v.update(Message::ToggleSymbol('p'));
        let _ = v.update(Message::Reload);
        assert_eq!(v.grid.geometry().grid().unwrap().size(), 7);
        assert!(v.grid.legend().is_enabled('r'));
        assert!(!v.grid.legend().present().contains(&'p'));
    }

    #[test]
    fn failed_reload_keeps_grid() {
        let mut v = viewer(64);
        v.items_path = PathBuf::from("/nonexistent/items.json");
        let _ = v.update(Message::Reload);
        assert_eq!(v.grid.geometry().grid().unwrap().size(), 8);
    }

    #[test]
    fn theme_toggle_flips_palette() {
        let mut v = viewer(64);
        assert!(v.colors.is_dark);
        let _ = v.update(Message::ThemeToggle);
        assert!(!v.colors.is_dark);
        assert_eq!(v.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn zoom_messages_respect_bounds() {
        let mut v = viewer(64);
        let min = v.grid.fit().min_zoom;
        let _ = v.update(Message::ZoomOut);
        assert_eq!(v.grid.zoom().zoom(), min);
        for _ in 0..20 {
            let _ = v.update(Message::ZoomIn);
        }
        assert_eq!(v.grid.zoom().zoom(), v.grid.fit().max_zoom);
        let _ = v.update(Message::ZoomReset);
        assert_eq!(v.grid.zoom().zoom(), min);
    }
}
