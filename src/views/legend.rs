use iced::alignment::Vertical;
use iced::widget::text::Shaping;
use iced::widget::{container, mouse_area, row, space, text};
use iced::{mouse, Element, Length};

use crate::app::{Message, Viewer};
use crate::expand::ViewMode;
use crate::export;

const SWATCH_SIZE: f32 = 12.0;

impl Viewer {
    /// Title, mode switch and the viewer-wide toggles.
    pub(crate) fn view_header(&self) -> Element<'_, Message> {
        let colors = &self.colors;
        let current = self.grid.mode();

        let title = match &self.username {
            Some(user) => format!("@{user}"),
            None => "BLOC grid".to_string(),
        };

        let mut header = row![text(title).size(colors.title_size).color(colors.text)]
            .spacing(8)
            .align_y(Vertical::Center);
        header = header.push(space::Space::new().width(12));

        for mode in ViewMode::ALL {
            let active = mode == current;
            let label = text(mode.label())
                .size(colors.body_text)
                .color(if active { colors.hover_text } else { colors.muted });
            let chip = container(label).padding([2, 8]);
            let chip = if active {
                chip.style(colors.hover_style())
            } else {
                chip
            };
            header = header.push(
                mouse_area(chip)
                    .on_press(Message::SetMode(mode))
                    .interaction(mouse::Interaction::Pointer),
            );
        }

        header = header.push(space::horizontal());

        let toggle = |label: String, msg: Message| {
            mouse_area(
                container(text(label).size(colors.small_text).color(colors.muted))
                    .padding([2, 6]),
            )
            .on_press(msg)
            .interaction(mouse::Interaction::Pointer)
        };
        header = header
            .push(toggle(
                format!("labels {}", if self.show_labels { "on" } else { "off" }),
                Message::ToggleLabels,
            ))
            .push(toggle(
                format!("theme {}", if self.colors.is_dark { "dark" } else { "light" }),
                Message::ThemeToggle,
            ))
            .push(toggle(
                "export png".to_string(),
                Message::Export(export::default_path(current)),
            ));

        header.into()
    }

    /// Present symbols with their definitions and counts; click toggles.
    pub(crate) fn view_legend(&self) -> Element<'_, Message> {
        let colors = &self.colors;
        let catalog = self.grid.catalog();

        let mut entries = row![].spacing(10);
        for entry in self.grid.legend_entries() {
            let definition = catalog.definition(entry.symbol);
            let caption = if definition.is_empty() {
                format!("{} ({})", entry.symbol, entry.count)
            } else {
                format!("{} {} ({})", entry.symbol, definition, entry.count)
            };
            let hovered = self.hovered_legend == Some(entry.symbol);
            let fg = if hovered {
                colors.hover_text
            } else if entry.enabled {
                colors.text
            } else {
                colors.muted
            };

            let swatch = container(space::Space::new())
                .width(SWATCH_SIZE)
                .height(SWATCH_SIZE)
                .style(colors.cell_style(entry.color, false));
            let body = row![
                swatch,
                text(caption)
                    .size(colors.small_text)
                    .color(fg)
                    .shaping(Shaping::Advanced),
            ]
            .spacing(4)
            .align_y(Vertical::Center);

            let chip = container(body).padding([2, 4]);
            let chip = if hovered {
                chip.style(colors.hover_style())
            } else {
                chip
            };
            entries = entries.push(
                mouse_area(chip)
                    .on_press(Message::ToggleSymbol(entry.symbol))
                    .on_enter(Message::HoverLegend(entry.symbol))
                    .on_exit(Message::UnhoverLegend(entry.symbol))
                    .interaction(mouse::Interaction::Pointer),
            );
        }

        container(entries.wrap())
            .padding(8)
            .width(Length::Fill)
            .style(colors.panel_style())
            .into()
    }
}
