/// Window widgets
///
/// - `form.rs` - text fields, toggles, image controls, style pickers, export
/// - the card preview and notice bar live here

pub mod form;

use iced::widget::{button, container, row, scrollable, text};
use iced::{Alignment, Color, Element, Length};

use crate::state::notice::Notice;
use crate::Message;

/// The rendered card, or a hint while nothing has been rendered yet
pub fn preview(handle: Option<&iced::widget::image::Handle>) -> Element<'_, Message> {
    let content: Element<'_, Message> = match handle {
        Some(handle) => iced::widget::image(handle.clone()).into(),
        None => text("Preview unavailable").into(),
    };

    scrollable(container(content).padding(20).center_x(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Status line for the latest notice, with a dismiss button
pub fn notice_bar(notice: &Notice) -> Element<'_, Message> {
    let color = if notice.is_error() {
        Color::from_rgb(0.95, 0.45, 0.45)
    } else {
        Color::from_rgb(0.5, 0.85, 0.55)
    };

    container(
        row![
            text(notice.message()).color(color).width(Length::Fill),
            button(text("Dismiss")).on_press(Message::DismissNotice),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .into()
}
