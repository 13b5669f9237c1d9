use iced::widget::{button, checkbox, column, row, scrollable, text, text_input, Column};
use iced::{Element, Length, Theme};

use super::FilterDraft;
use crate::state::controller::{Controller, Intent};
use crate::state::data::SourceId;
use crate::Message;

const SIDEBAR_WIDTH: f32 = 240.0;

/// Sources apply immediately; categories and dates wait for "Apply Filters"
pub fn view<'a>(controller: &'a Controller, draft: &'a FilterDraft) -> Element<'a, Message> {
    let active_source = controller.params().active_source;

    let mut sources = Column::new()
        .spacing(4)
        .push(source_button("All Sources".to_string(), None, active_source));
    for source in controller.sources() {
        sources = sources.push(source_button(source.name.clone(), Some(source.id), active_source));
    }

    let mut categories = Column::new().spacing(6);
    for category in controller.categories() {
        let id = category.id;
        categories = categories.push(
            checkbox(category.name.clone(), draft.categories.contains(&id))
                .on_toggle(move |checked| Message::CategoryToggled(id, checked)),
        );
    }

    let dates = column![
        text("From").size(14),
        text_input("YYYY-MM-DD", &draft.date_from)
            .on_input(Message::DateFromChanged)
            .padding(6),
        text("To").size(14),
        text_input("YYYY-MM-DD", &draft.date_to)
            .on_input(Message::DateToChanged)
            .padding(6),
    ]
    .spacing(4);

    let actions = row![
        button("Apply Filters").on_press(Message::ApplyFilters).padding(8),
        button("Reset")
            .on_press(Message::ResetFilters)
            .style(button::secondary)
            .padding(8),
    ]
    .spacing(8);

    scrollable(
        column![
            text("Archive Sources").size(18),
            sources,
            text("Categories").size(18),
            categories,
            text("Date Range").size(18),
            dates,
            actions,
        ]
        .spacing(12)
        .padding(4),
    )
    .width(Length::Fixed(SIDEBAR_WIDTH))
    .into()
}

fn source_button<'a>(label: String, source: Option<SourceId>, active: Option<SourceId>) -> Element<'a, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if source == active {
        button::primary
    } else {
        button::text
    };

    button(text(label))
        .on_press(Message::Intent(Intent::SelectSource(source)))
        .style(style)
        .width(Length::Fill)
        .into()
}
