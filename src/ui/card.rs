/// Expression card widgets
///
/// One card per server record: the processed GIF, editable metadata
/// fields, and Save / Delete / Download actions. Each action reports
/// into the card's own status line; cards never affect one another.

use iced::widget::{button, column, container, row, text, text_input, Column};
use iced::{Element, Length};

use crate::state::cards::ExpressionCard;
use crate::Message;

/// Build one expression card
pub fn view(card: &ExpressionCard) -> Element<'_, Message> {
    let id = card.id().to_string();

    let gif: Element<Message> = match &card.gif {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fixed(220.0))
            .into(),
        None => text("Loading GIF...").size(14).into(),
    };

    let title_id = id.clone();
    let description_id = id.clone();
    let tags_id = id.clone();

    let mut content: Column<Message> = column![
        gif,
        text_input("Title", &card.title)
            .on_input(move |value| Message::CardTitleChanged(title_id.clone(), value))
            .padding(6),
        text_input("Description", &card.description)
            .on_input(move |value| Message::CardDescriptionChanged(description_id.clone(), value))
            .padding(6),
        text_input("Tags (comma separated)", &card.tags)
            .on_input(move |value| Message::CardTagsChanged(tags_id.clone(), value))
            .padding(6),
    ]
    .spacing(8);

    // Buttons lose their on_press while their call is outstanding,
    // which renders them disabled and swallows repeat clicks
    let save = button("Save")
        .on_press_maybe((!card.save_in_flight).then(|| Message::SaveCard(id.clone())))
        .padding(6);
    let delete = button("Delete")
        .on_press_maybe((!card.delete_in_flight).then(|| Message::DeleteCard(id.clone())))
        .padding(6);
    let download = button("Download")
        .on_press_maybe((!card.download_in_flight).then(|| Message::DownloadCard(id.clone())))
        .padding(6);

    content = content.push(row![save, delete, download].spacing(8));

    if !card.status.is_empty() {
        content = content.push(text(&card.status).size(14));
    }

    container(content)
        .width(Length::Fixed(252.0))
        .padding(16)
        .into()
}
