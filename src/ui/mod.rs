/// User interface module
///
/// Pure view functions: each one reads the controller (and the filter
/// drafts the user is still editing) and returns widgets. All state
/// changes travel back up as `Message`s.
///
/// - `toolbar.rs` - search box, sort and page-size pickers, view toggle
/// - `sidebar.rs` - source list, category checkboxes, date range
/// - `gallery.rs` - grid/list of the current page plus pagination
/// - `detail.rs`  - full detail view of one item

pub mod detail;
pub mod gallery;
pub mod sidebar;
pub mod toolbar;

use std::collections::BTreeSet;

use iced::widget::{column, container, row, text};
use iced::{Element, Length};

use crate::state::controller::Controller;
use crate::state::data::CategoryId;
use crate::Message;

/// Filter inputs that are being edited but not yet applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterDraft {
    pub search: String,
    pub date_from: String,
    pub date_to: String,
    pub categories: BTreeSet<CategoryId>,
}

/// Build the whole window
pub fn view<'a>(controller: &'a Controller, draft: &'a FilterDraft, status: &'a str) -> Element<'a, Message> {
    let main: Element<'a, Message> = match controller.selected_item() {
        Some(item) => detail::view(item),
        None => column![toolbar::view(controller, draft), gallery::view(controller)]
            .spacing(16)
            .into(),
    };

    let body = row![
        sidebar::view(controller, draft),
        container(main).width(Length::Fill).height(Length::Fill),
    ]
    .spacing(20)
    .height(Length::Fill);

    let footer = text(status).size(14);

    container(column![body, footer].spacing(10))
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
