/// Upload panel widgets

use iced::widget::{button, column, container, text, text_input, Column};
use iced::{Alignment, Element, Length};

use crate::state::upload::UploadForm;
use crate::Message;

/// Build the upload panel: file picker, metadata fields, preview,
/// submit button and the inline status line
pub fn view(form: &UploadForm) -> Element<'_, Message> {
    let file_label = match &form.selected {
        Some(selected) => selected.file_name.clone(),
        None => "No GIF selected".to_string(),
    };

    let mut content: Column<Message> = column![
        text("Upload a GIF").size(24),
        button("Choose GIF...")
            .on_press(Message::BrowseFile)
            .padding(10),
        text(file_label).size(14),
        text_input("Title", &form.title)
            .on_input(Message::UploadTitleChanged)
            .padding(8),
        text_input("Description", &form.description)
            .on_input(Message::UploadDescriptionChanged)
            .padding(8),
        text_input("Tags (comma separated)", &form.tags)
            .on_input(Message::UploadTagsChanged)
            .padding(8),
    ]
    .spacing(12);

    // Thumbnail of the selected file, shown until upload or reselect
    if let Some(handle) = form.preview.handle() {
        content = content.push(
            iced::widget::image(handle.clone())
                .width(Length::Fixed(220.0)),
        );
    }

    // Disabled while an upload call is outstanding
    let submit = button("Upload")
        .on_press_maybe((!form.in_flight).then_some(Message::SubmitUpload))
        .padding(10);

    content = content.push(submit);

    if !form.status.is_empty() {
        content = content.push(text(&form.status).size(14));
    }

    container(content.align_x(Alignment::Start))
        .width(Length::Fixed(280.0))
        .padding(16)
        .into()
}
