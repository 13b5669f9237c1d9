use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::controller::{Controller, Intent};
use crate::state::data::ArchiveItem;
use crate::state::preferences::ViewMode;
use crate::Message;

/// Card description length before it is cut off with "..."
const EXCERPT_CHARS: usize = 80;
const CARD_WIDTH: f32 = 260.0;

/// Current page of items plus the pagination bar
pub fn view(controller: &Controller) -> Element<'_, Message> {
    let items: Element<'_, Message> = if controller.page_items().next().is_none() {
        empty_state()
    } else {
        match controller.view_mode() {
            ViewMode::Grid => {
                let cards = controller.page_items().map(card).collect();
                Wrap::with_elements(cards).into()
            }
            ViewMode::List => controller
                .page_items()
                .fold(Column::new().spacing(8), |list, item| list.push(list_row(item)))
                .into(),
        }
    };

    column![
        scrollable(items).height(Length::Fill),
        pagination(controller),
    ]
    .spacing(12)
    .into()
}

fn card(item: &ArchiveItem) -> Element<'_, Message> {
    let content = column![
        text(&item.title).size(18),
        text(item.excerpt(EXCERPT_CHARS)).size(13),
        row![
            text(item.display_date()).size(12),
            text(&item.source.name).size(12),
        ]
        .spacing(10),
    ]
    .spacing(6);

    container(
        button(content)
            .on_press(Message::Intent(Intent::OpenItem(item.id)))
            .style(button::secondary)
            .padding(12)
            .width(Length::Fixed(CARD_WIDTH)),
    )
    .padding(6)
    .into()
}

fn list_row(item: &ArchiveItem) -> Element<'_, Message> {
    let content = row![
        column![
            text(&item.title).size(16),
            text(item.excerpt(EXCERPT_CHARS)).size(13),
        ]
        .spacing(4)
        .width(Length::Fill),
        text(item.display_date()).size(12),
        text(&item.source.name).size(12),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    button(content)
        .on_press(Message::Intent(Intent::OpenItem(item.id)))
        .style(button::secondary)
        .padding(10)
        .width(Length::Fill)
        .into()
}

fn empty_state<'a>() -> Element<'a, Message> {
    container(
        column![
            text("No items found").size(22),
            text("Try adjusting your filters or search criteria").size(14),
        ]
        .spacing(8)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(60)
    .center_x(Length::Fill)
    .into()
}

fn pagination(controller: &Controller) -> Element<'_, Message> {
    let current = controller.current_page();
    let total = controller.total_pages();

    row![
        button("◀ Prev")
            .on_press_maybe((current > 1).then_some(Message::Intent(Intent::PreviousPage)))
            .padding(8),
        text(format!("Page {} of {}", current, total)),
        button("Next ▶")
            .on_press_maybe((current < total).then_some(Message::Intent(Intent::NextPage)))
            .padding(8),
        text(format!(
            "{} of {} items",
            controller.total_matches(),
            controller.item_count()
        ))
        .size(13),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}
