use iced::widget::text::Shaping;
use iced::widget::{column, container, text};
use iced::{Element, Length};

use crate::app::{Message, Viewer};
use crate::util::{single_line, truncate_str};

const MAX_TEXT_CHARS: usize = 280;

impl Viewer {
    pub(crate) fn view_detail(&self) -> Element<'_, Message> {
        let colors = &self.colors;
        let detail = self
            .hovered_cell
            .and_then(|(row, col)| self.grid.describe_at(row, col));

        let body: Element<'_, Message> = match detail {
            Some(detail) => {
                let definition = if detail.definition.is_empty() {
                    "(no definition)".to_string()
                } else {
                    detail.definition
                };
                let mut col = column![text(definition)
                    .size(colors.body_text)
                    .color(colors.hover_text)
                    .shaping(Shaping::Advanced)]
                .spacing(4);
                if let Some((bloc, meaning)) = detail.bloc {
                    col = col.push(
                        text(format!("{bloc}: {meaning}"))
                            .size(colors.small_text)
                            .color(colors.muted)
                            .shaping(Shaping::Advanced),
                    );
                }
                if let Some(ts) = detail.timestamp {
                    col = col.push(text(ts).size(colors.small_text).color(colors.muted));
                }
                if let Some(body) = detail.text {
                    col = col.push(
                        text(truncate_str(&single_line(&body), MAX_TEXT_CHARS))
                            .size(colors.body_text)
                            .color(colors.text)
                            .shaping(Shaping::Advanced),
                    );
                }
                col.into()
            }
            None => text("Hover a cell for details.")
                .size(colors.small_text)
                .color(colors.muted)
                .into(),
        };

        container(body)
            .padding(10)
            .width(Length::Fill)
            .style(colors.panel_style())
            .into()
    }
}
