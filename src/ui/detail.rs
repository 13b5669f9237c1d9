use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Element, Length};

use crate::deep_link::{self, SHARE_BASE};
use crate::state::controller::Intent;
use crate::state::data::ArchiveItem;
use crate::Message;

const LABEL_WIDTH: f32 = 110.0;

/// Full detail of one item, looked up in the whole collection
pub fn view(item: &ArchiveItem) -> Element<'_, Message> {
    let metadata = [
        ("Date", item.display_date()),
        ("Category", item.category.name.clone()),
        ("Source", item.source.name.clone()),
        ("ID", item.id.to_string()),
        ("Format", item.metadata.format.clone()),
        ("Size", item.metadata.size.clone()),
        ("Resolution", item.metadata.resolution.clone()),
        ("Language", item.metadata.language.clone()),
        ("Image", item.image_ref.clone()),
    ]
    .into_iter()
    .fold(Column::new().spacing(6), |fields, (label, value)| {
        fields.push(
            row![
                text(label).size(13).width(Length::Fixed(LABEL_WIDTH)),
                text(value).size(14),
            ]
            .spacing(8),
        )
    });

    let actions = row![
        button("Copy share link")
            .on_press(Message::CopyShareLink(item.id))
            .padding(8),
        text(deep_link::share_link(SHARE_BASE, item.id)).size(13),
    ]
    .spacing(12);

    scrollable(
        container(
            column![
                button("← Close")
                    .on_press(Message::Intent(Intent::CloseItem))
                    .style(button::text),
                text(&item.title).size(28),
                metadata,
                text(&item.description).size(15),
                actions,
            ]
            .spacing(16),
        )
        .style(container::rounded_box)
        .padding(24)
        .width(Length::Fill),
    )
    .into()
}
