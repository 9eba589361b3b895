use iced::alignment::Vertical;
use iced::widget::text::Shaping;
use iced::widget::{column, container, mouse_area, row, scrollable, space, text};
use iced::{mouse, Element, Length};

use crate::app::{Message, Viewer};
use crate::layout::LayoutOutcome;
use crate::theme::ThemeColors;

// Room for the horizontal scrollbar under the grid.
const SCROLLBAR_ALLOWANCE: f32 = 14.0;

impl Viewer {
    pub(crate) fn view_grid(&self) -> Element<'_, Message> {
        let colors = &self.colors;
        let outcome = self.grid.geometry();
        let geometry = match &outcome {
            LayoutOutcome::Grid(geometry) => geometry,
            LayoutOutcome::Insufficient { count } => {
                return container(
                    text(format!("Cannot display grid for {count} data points."))
                        .size(colors.body_text)
                        .color(colors.text),
                )
                .padding(16)
                .width(Length::Fill)
                .style(colors.panel_style())
                .into();
            }
        };

        let metrics = self.grid.settings().metrics;
        let zoom = self.grid.zoom().zoom();
        let cell_w = metrics.unit_width * zoom;
        let cell_h = metrics.unit_height * zoom;
        let label_w = metrics.label_width * zoom;
        let catalog = self.grid.catalog();

        let mut rows = column![];
        for (r, grid_row) in geometry.rows().enumerate() {
            let label = container(
                text(grid_row.label.to_string())
                    .size((colors.small_text * zoom).max(6.0))
                    .color(colors.muted),
            )
            .width(label_w)
            .height(cell_h)
            .align_y(Vertical::Center);

            let mut cells = row![label];
            for (c, cell) in grid_row.cells().enumerate() {
                let fill = self.grid.color_for(cell.symbol);
                let hovered = self.hovered_cell == Some((r, c));
                let glyph: Element<'_, Message> = if self.show_labels {
                    text(cell.symbol.to_string())
                        .size((cell_h * 0.55).max(6.0))
                        .color(ThemeColors::ink_on(fill))
                        .shaping(Shaping::Advanced)
                        .into()
                } else {
                    space::Space::new().into()
                };
                let square = container(glyph)
                    .center_x(cell_w)
                    .center_y(cell_h)
                    .style(colors.cell_style(fill, hovered));

                let area = mouse_area(square)
                    .on_enter(Message::HoverCell(r, c))
                    .on_exit(Message::UnhoverCell(r, c));
                // Pauses have nothing to open.
                let area = if catalog.is_pause(cell.symbol) {
                    area
                } else {
                    area.on_press(Message::ActivateCell(r, c))
                        .interaction(mouse::Interaction::Pointer)
                };
                cells = cells.push(area);
            }
            rows = rows.push(cells);
        }

        let height = self.grid.fit().rendered_height.max(cell_h) + SCROLLBAR_ALLOWANCE;
        let viewport = scrollable(container(rows).style(colors.grid_style()))
            .direction(scrollable::Direction::Both {
                vertical: scrollable::Scrollbar::new(),
                horizontal: scrollable::Scrollbar::new(),
            })
            .width(Length::Fill)
            .height(height);

        column![self.view_zoom_tools(), viewport].spacing(6).into()
    }

    fn view_zoom_tools(&self) -> Element<'_, Message> {
        let colors = &self.colors;
        let zoom = self.grid.zoom();

        row![
            text(format!("zoom {:.0}%", zoom.zoom() * 100.0))
                .size(colors.small_text)
                .color(colors.muted),
            space::horizontal(),
            zoom_tool(colors, "-", zoom.can_zoom_out(), Message::ZoomOut),
            zoom_tool(colors, "+", zoom.can_zoom_in(), Message::ZoomIn),
            zoom_tool(colors, "fit", true, Message::ZoomReset),
        ]
        .spacing(6)
        .align_y(Vertical::Center)
        .into()
    }
}

fn zoom_tool<'a>(
    colors: &'a ThemeColors,
    label: &str,
    enabled: bool,
    msg: Message,
) -> Element<'a, Message> {
    let color = if enabled { colors.text } else { colors.muted };
    let body = container(text(label.to_string()).size(colors.body_text).color(color))
        .padding([2, 8])
        .style(colors.hover_style());
    if enabled {
        mouse_area(body)
            .on_press(msg)
            .interaction(mouse::Interaction::Pointer)
            .into()
    } else {
        body.into()
    }
}
