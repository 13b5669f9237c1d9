use iced::widget::{button, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length, Theme};

use super::FilterDraft;
use crate::state::controller::{Controller, Intent};
use crate::state::preferences::ViewMode;
use crate::state::query::SortKey;
use crate::Message;

/// Page sizes offered in the picker
const PAGE_SIZES: [usize; 4] = [12, 24, 48, 96];

pub fn view<'a>(controller: &'a Controller, draft: &'a FilterDraft) -> Element<'a, Message> {
    let params = controller.params();

    let search = text_input("Search archives...", &draft.search)
        .on_input(Message::SearchChanged)
        .on_submit(Message::SearchSubmitted)
        .padding(8)
        .width(Length::Fill);

    let sort = pick_list(&SortKey::ALL[..], Some(params.sort_key), |key| {
        Message::Intent(Intent::SetSort(key))
    });

    let page_size = pick_list(&PAGE_SIZES[..], Some(params.items_per_page), |per_page| {
        Message::Intent(Intent::SetItemsPerPage(per_page))
    });

    row![
        search,
        button("Search").on_press(Message::SearchSubmitted).padding(8),
        text("Sort").size(14),
        sort,
        text("Per page").size(14),
        page_size,
        view_toggle(ViewMode::Grid, controller.view_mode()),
        view_toggle(ViewMode::List, controller.view_mode()),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

fn view_toggle<'a>(mode: ViewMode, current: ViewMode) -> Element<'a, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if mode == current {
        button::primary
    } else {
        button::secondary
    };

    button(text(mode.to_string()))
        .on_press(Message::Intent(Intent::SetViewMode(mode)))
        .style(style)
        .padding(8)
        .into()
}
