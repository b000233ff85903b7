use iced::widget::{column, container, row, scrollable, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use iced_aw::Wrap;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult};
use std::time::Duration;

// Declare the application modules
mod api;
mod config;
mod state;
mod tags;
mod ui;

use api::client::{self, ApiError};
use api::types::{Expression, NewExpression};
use config::ApiConfig;
use state::cards::{ExpressionCard, ListView};
use state::upload::UploadForm;

/// How long transient card status lines ("Saved!", ...) stay visible
const STATUS_CLEAR_DELAY: Duration = Duration::from_millis(2500);

/// Main application state
struct GifManager {
    /// Resolved backend location
    config: ApiConfig,
    /// The upload form and its preview resource
    upload: UploadForm,
    /// The expression list, rebuilt wholesale after every fetch
    list: ListView,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    // ----- Upload form -----
    /// User clicked "Choose GIF..."
    BrowseFile,
    UploadTitleChanged(String),
    UploadDescriptionChanged(String),
    UploadTagsChanged(String),
    /// User clicked "Upload"
    SubmitUpload,
    /// The create call resolved
    UploadFinished(Result<Expression, ApiError>),

    // ----- Expression list -----
    /// User clicked "Refresh" (also triggered after every mutation)
    ReloadExpressions,
    /// The list fetch resolved
    ExpressionsLoaded(Result<Vec<Expression>, ApiError>),
    /// A card's processed GIF arrived from the download endpoint
    CardGifLoaded(String, Result<Vec<u8>, ApiError>),

    // ----- Per-card actions -----
    CardTitleChanged(String, String),
    CardDescriptionChanged(String, String),
    CardTagsChanged(String, String),
    SaveCard(String),
    CardSaved(String, Result<(), ApiError>),
    DeleteCard(String),
    CardDeleted(String, Result<(), ApiError>),
    DownloadCard(String),
    CardDownloadFinished(String, Result<(), ApiError>),
    /// Timed clear of a card's transient status line
    CardStatusExpired(String, u64),
}

impl GifManager {
    /// Create a new instance of the application and kick off the
    /// initial list fetch
    fn new() -> (Self, Task<Message>) {
        let config = ApiConfig::from_env();
        println!("🎞️  GIF Expressions manager talking to {}", config.expressions_url());

        let manager = GifManager {
            config,
            upload: UploadForm::new(),
            list: ListView::Loading,
        };

        let initial_fetch = manager.reload();
        (manager, initial_fetch)
    }

    /// Fetch the full collection; the result replaces the list wholesale
    fn reload(&self) -> Task<Message> {
        Task::perform(
            client::fetch_expressions(self.config.clone()),
            Message::ExpressionsLoaded,
        )
    }

    /// Schedule the timed clear for a card's transient status line
    fn clear_status_later(id: String, seq: u64) -> Task<Message> {
        Task::perform(
            async move { tokio::time::sleep(STATUS_CLEAR_DELAY).await },
            move |_| Message::CardStatusExpired(id.clone(), seq),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // ----- Upload form -----
            Message::BrowseFile => {
                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Select a GIF")
                    .add_filter("GIF images", &["gif"])
                    .pick_file();

                if let Some(path) = picked {
                    match std::fs::read(&path) {
                        Ok(bytes) => {
                            // Installs the preview, releasing any previous one
                            if let Err(message) = self.upload.select_file(&path, bytes) {
                                self.upload.status = message;
                            } else {
                                self.upload.status.clear();
                            }
                        }
                        Err(error) => {
                            eprintln!("⚠️  Could not read {}: {}", path.display(), error);
                            self.upload.status = "Could not read the selected file.".to_string();
                        }
                    }
                }

                Task::none()
            }
            Message::UploadTitleChanged(value) => {
                self.upload.title = value;
                Task::none()
            }
            Message::UploadDescriptionChanged(value) => {
                self.upload.description = value;
                Task::none()
            }
            Message::UploadTagsChanged(value) => {
                self.upload.tags = value;
                Task::none()
            }
            Message::SubmitUpload => {
                if self.upload.in_flight {
                    return Task::none();
                }

                // Validation: a file must be selected; no call otherwise
                let selected = match self.upload.validate() {
                    Ok(selected) => selected,
                    Err(message) => {
                        self.upload.status = message.to_string();
                        return Task::none();
                    }
                };

                let new_expression = NewExpression {
                    file_name: selected.file_name.clone(),
                    bytes: selected.bytes.clone(),
                    title: self.upload.title.clone(),
                    description: self.upload.description.clone(),
                    tags_raw: self.upload.tags.clone(),
                };

                self.upload.in_flight = true;
                self.upload.status = "Uploading and processing...".to_string();

                Task::perform(
                    client::create_expression(self.config.clone(), new_expression),
                    Message::UploadFinished,
                )
            }
            Message::UploadFinished(result) => {
                self.upload.in_flight = false;

                match result {
                    Ok(_) => {
                        // Clear the form and release the preview,
                        // then re-fetch the authoritative list
                        self.upload.reset();
                        self.upload.status = "GIF uploaded successfully!".to_string();
                        self.reload()
                    }
                    Err(error) => {
                        // Form state stays intact so the user can retry
                        // without re-selecting the file
                        eprintln!("⚠️  Upload failed: {}", error);
                        self.upload.status = "Upload failed. Please try again.".to_string();
                        Task::none()
                    }
                }
            }

            // ----- Expression list -----
            Message::ReloadExpressions => self.reload(),
            Message::ExpressionsLoaded(Ok(mut expressions)) => {
                if expressions.is_empty() {
                    self.list = ListView::Empty;
                    return Task::none();
                }

                tags::sort_by_title(&mut expressions);

                // Rebuild every card and fetch each processed GIF
                // as its own background task
                let mut gif_fetches = Vec::with_capacity(expressions.len());
                for expression in &expressions {
                    let id = expression.id.clone();
                    let mapper_id = id.clone();
                    gif_fetches.push(Task::perform(
                        client::download_gif(self.config.clone(), id),
                        move |result| Message::CardGifLoaded(mapper_id.clone(), result),
                    ));
                }

                self.list = ListView::Loaded(
                    expressions
                        .into_iter()
                        .map(ExpressionCard::from_expression)
                        .collect(),
                );

                Task::batch(gif_fetches)
            }
            Message::ExpressionsLoaded(Err(error)) => {
                // A failed fetch is a failure signal, not an empty list
                eprintln!("⚠️  Could not load expressions: {}", error);
                self.list = ListView::LoadError;
                Task::none()
            }
            Message::CardGifLoaded(id, result) => {
                if let Some(card) = self.list.card_mut(&id) {
                    match result {
                        Ok(bytes) => {
                            card.gif = Some(iced::widget::image::Handle::from_bytes(bytes));
                        }
                        Err(error) => {
                            eprintln!("⚠️  Could not fetch GIF for {}: {}", id, error);
                            card.set_status("Could not load GIF.");
                        }
                    }
                }
                Task::none()
            }

            // ----- Per-card edits -----
            Message::CardTitleChanged(id, value) => {
                if let Some(card) = self.list.card_mut(&id) {
                    card.title = value;
                }
                Task::none()
            }
            Message::CardDescriptionChanged(id, value) => {
                if let Some(card) = self.list.card_mut(&id) {
                    card.description = value;
                }
                Task::none()
            }
            Message::CardTagsChanged(id, value) => {
                if let Some(card) = self.list.card_mut(&id) {
                    card.tags = value;
                }
                Task::none()
            }
            Message::SaveCard(id) => {
                let Some(card) = self.list.card_mut(&id) else {
                    return Task::none();
                };

                // No-op while a save for this card is outstanding
                if !card.begin_save() {
                    return Task::none();
                }

                let payload = card.update_payload();
                let mapper_id = id.clone();
                Task::perform(
                    client::update_metadata(self.config.clone(), id, payload),
                    move |result| Message::CardSaved(mapper_id.clone(), result),
                )
            }
            Message::CardSaved(id, result) => {
                let Some(card) = self.list.card_mut(&id) else {
                    return Task::none();
                };

                if let Err(error) = &result {
                    eprintln!("⚠️  Save failed for {}: {}", id, error);
                }

                // Control re-enables on both outcomes
                let seq = card.finish_save(result.is_ok());
                Self::clear_status_later(id, seq)
            }
            Message::DeleteCard(id) => {
                // Explicit confirmation before any call is made
                let confirmed = MessageDialog::new()
                    .set_title("Delete expression")
                    .set_description("Delete this expression?")
                    .set_buttons(MessageButtons::YesNo)
                    .show();

                if !matches!(confirmed, MessageDialogResult::Yes) {
                    return Task::none();
                }

                let Some(card) = self.list.card_mut(&id) else {
                    return Task::none();
                };

                if !card.begin_delete() {
                    return Task::none();
                }

                let mapper_id = id.clone();
                Task::perform(
                    client::delete_expression(self.config.clone(), id),
                    move |result| Message::CardDeleted(mapper_id.clone(), result),
                )
            }
            Message::CardDeleted(id, Ok(())) => {
                // Remove the card immediately, then re-fetch the
                // authoritative list in case local and server state
                // ever diverge
                if let Some(cards) = self.list.cards_mut() {
                    cards.retain(|card| card.id() != id);
                }
                self.reload()
            }
            Message::CardDeleted(id, Err(error)) => {
                eprintln!("⚠️  Delete failed for {}: {}", id, error);

                let Some(card) = self.list.card_mut(&id) else {
                    return Task::none();
                };

                // The card stays; the control re-enables
                let seq = card.fail_delete();
                Self::clear_status_later(id, seq)
            }
            Message::DownloadCard(id) => {
                let Some(card) = self.list.card_mut(&id) else {
                    return Task::none();
                };

                // Suggest the server-assigned processed filename
                let suggested = if card.expression.processed_filename.is_empty() {
                    "expression.gif".to_string()
                } else {
                    card.expression.processed_filename.clone()
                };

                let destination = FileDialog::new()
                    .set_title("Save GIF")
                    .set_file_name(&suggested)
                    .save_file();

                let Some(destination) = destination else {
                    return Task::none();
                };

                // No-op while a download for this card is outstanding
                if !card.begin_download() {
                    return Task::none();
                }

                let mapper_id = id.clone();
                Task::perform(
                    client::download_gif_to(self.config.clone(), id, destination),
                    move |result| Message::CardDownloadFinished(mapper_id.clone(), result),
                )
            }
            Message::CardDownloadFinished(id, result) => {
                let Some(card) = self.list.card_mut(&id) else {
                    return Task::none();
                };

                if let Err(error) = &result {
                    eprintln!("⚠️  Download failed for {}: {}", id, error);
                }

                // Control re-enables on both outcomes
                let seq = card.finish_download(result.is_ok());
                Self::clear_status_later(id, seq)
            }
            Message::CardStatusExpired(id, seq) => {
                if let Some(card) = self.list.card_mut(&id) {
                    card.clear_status_if(seq);
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            text("GIF Expressions").size(32),
            iced::widget::button("Refresh")
                .on_press(Message::ReloadExpressions)
                .padding(8),
        ]
        .spacing(16)
        .align_y(Alignment::Center);

        let list_panel: Element<Message> = match &self.list {
            ListView::Loading => text("Loading expressions...").size(16).into(),
            ListView::Empty => text("No expressions yet. Upload a GIF to get started.")
                .size(16)
                .into(),
            ListView::LoadError => {
                text("Failed to load expressions. Ensure the backend is running.")
                    .size(16)
                    .into()
            }
            ListView::Loaded(cards) => {
                let elements: Vec<Element<Message>> =
                    cards.iter().map(ui::card::view).collect();

                scrollable(
                    Wrap::with_elements(elements)
                        .spacing(16.0)
                        .line_spacing(16.0),
                )
                .height(Length::Fill)
                .into()
            }
        };

        let content: Column<Message> = column![
            header,
            row![
                ui::upload::view(&self.upload),
                container(list_panel).width(Length::Fill),
            ]
            .spacing(24),
        ]
        .spacing(24)
        .padding(24);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        "GIF Expressions",
        GifManager::update,
        GifManager::view,
    )
    .theme(GifManager::theme)
    .centered()
    .run_with(GifManager::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ExpressionMetadata;

    fn manager_with_cards(ids: &[&str]) -> GifManager {
        let cards = ids
            .iter()
            .map(|id| {
                ExpressionCard::from_expression(Expression {
                    id: id.to_string(),
                    processed_filename: String::new(),
                    metadata: ExpressionMetadata::default(),
                })
            })
            .collect();

        GifManager {
            config: ApiConfig::with_base("http://localhost:8000"),
            upload: UploadForm::new(),
            list: ListView::Loaded(cards),
        }
    }

    #[test]
    fn test_failed_gif_fetch_reports_on_card() {
        let mut manager = manager_with_cards(&["abc"]);

        let _ = manager.update(Message::CardGifLoaded(
            "abc".to_string(),
            Err(ApiError::Transport("connection refused".to_string())),
        ));

        let card = manager.list.card_mut("abc").unwrap();
        assert!(card.gif.is_none());
        assert_eq!(card.status, "Could not load GIF.");
    }

    #[test]
    fn test_download_completion_reenables_control() {
        let mut manager = manager_with_cards(&["abc"]);
        assert!(manager.list.card_mut("abc").unwrap().begin_download());

        let _ = manager.update(Message::CardDownloadFinished("abc".to_string(), Ok(())));

        let card = manager.list.card_mut("abc").unwrap();
        assert!(!card.download_in_flight);
        assert_eq!(card.status, "Saved GIF to disk.");
    }

    #[test]
    fn test_download_failure_reenables_control() {
        let mut manager = manager_with_cards(&["abc"]);
        assert!(manager.list.card_mut("abc").unwrap().begin_download());

        let _ = manager.update(Message::CardDownloadFinished(
            "abc".to_string(),
            Err(ApiError::Status(500)),
        ));

        let card = manager.list.card_mut("abc").unwrap();
        assert!(!card.download_in_flight);
        assert_eq!(card.status, "Error downloading GIF.");
    }
}
