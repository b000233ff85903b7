/// Per-card state for the expression list
///
/// Each card owns its own edit buffers and in-flight guards, so saves
/// and deletes on different cards can be outstanding at the same time
/// without touching each other. The list itself is always rebuilt
/// wholesale from the latest fetch; cards never survive a reload.

use iced::widget::image;

use crate::api::types::{Expression, MetadataUpdate};
use crate::tags;

/// The expression list as a whole.
///
/// "No records yet" and "failed to load" are distinct states rather
/// than one placeholder with swapped text, so the UI can never confuse
/// an unreachable backend with genuine emptiness.
#[derive(Debug, Default)]
pub enum ListView {
    /// Initial fetch (or a reload) has not resolved yet
    #[default]
    Loading,
    /// The backend answered with zero records
    Empty,
    /// The fetch itself failed; the backend may be down
    LoadError,
    /// One card per record, already sorted by title
    Loaded(Vec<ExpressionCard>),
}

impl ListView {
    /// Mutable access to the cards, when loaded
    pub fn cards_mut(&mut self) -> Option<&mut Vec<ExpressionCard>> {
        match self {
            ListView::Loaded(cards) => Some(cards),
            _ => None,
        }
    }

    /// Find one card by record id
    pub fn card_mut(&mut self, id: &str) -> Option<&mut ExpressionCard> {
        self.cards_mut()?.iter_mut().find(|card| card.expression.id == id)
    }
}

/// One editable card, built from a server record at render time
#[derive(Debug)]
pub struct ExpressionCard {
    pub expression: Expression,
    /// Edit buffers, seeded from the record's metadata
    pub title: String,
    pub description: String,
    /// Tags as one comma-separated line
    pub tags: String,
    /// Processed GIF image once the download endpoint has answered
    pub gif: Option<image::Handle>,
    /// Save guard: a click while true is a no-op
    pub save_in_flight: bool,
    /// Delete guard: a click while true is a no-op
    pub delete_in_flight: bool,
    /// Download guard: a click while true is a no-op
    pub download_in_flight: bool,
    /// Inline status line ("Saving metadata...", "Saved!", ...)
    pub status: String,
    /// Bumped on every status change so a stale timed clear
    /// cannot wipe a newer message
    pub status_seq: u64,
}

impl ExpressionCard {
    /// Seed a card from a server record. Missing metadata fields
    /// become empty buffers.
    pub fn from_expression(expression: Expression) -> Self {
        let title = expression.metadata.title.clone();
        let description = expression.metadata.description.clone();
        let tags = tags::join_tags(&expression.metadata.tags);

        ExpressionCard {
            expression,
            title,
            description,
            tags,
            gif: None,
            save_in_flight: false,
            delete_in_flight: false,
            download_in_flight: false,
            status: String::new(),
            status_seq: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.expression.id
    }

    /// The full-replace payload built from the current edit buffers
    pub fn update_payload(&self) -> MetadataUpdate {
        MetadataUpdate {
            title: self.title.clone(),
            description: self.description.clone(),
            tags: tags::split_tags(&self.tags),
        }
    }

    /// Mark a save as started. Returns false (and does nothing) if one
    /// is already outstanding.
    pub fn begin_save(&mut self) -> bool {
        if self.save_in_flight {
            return false;
        }
        self.save_in_flight = true;
        self.set_status("Saving metadata...");
        true
    }

    /// Record the save outcome and re-enable the control.
    /// Returns the status sequence to pass to the timed clear.
    pub fn finish_save(&mut self, succeeded: bool) -> u64 {
        self.save_in_flight = false;
        if succeeded {
            self.set_status("Saved!")
        } else {
            self.set_status("Error saving metadata.")
        }
    }

    /// Mark a delete as started. Returns false if one is already
    /// outstanding. Confirmation happens before this is called.
    pub fn begin_delete(&mut self) -> bool {
        if self.delete_in_flight {
            return false;
        }
        self.delete_in_flight = true;
        self.set_status("Deleting...");
        true
    }

    /// Record a failed delete; the card stays in the list.
    /// Returns the status sequence to pass to the timed clear.
    pub fn fail_delete(&mut self) -> u64 {
        self.delete_in_flight = false;
        self.set_status("Error deleting expression.")
    }

    /// Mark a download as started. Returns false if one is already
    /// outstanding. The save-location dialog happens before this is
    /// called.
    pub fn begin_download(&mut self) -> bool {
        if self.download_in_flight {
            return false;
        }
        self.download_in_flight = true;
        self.set_status("Downloading...");
        true
    }

    /// Record the download outcome and re-enable the control.
    /// Returns the status sequence to pass to the timed clear.
    pub fn finish_download(&mut self, succeeded: bool) -> u64 {
        self.download_in_flight = false;
        if succeeded {
            self.set_status("Saved GIF to disk.")
        } else {
            self.set_status("Error downloading GIF.")
        }
    }

    /// Set the status line and bump the sequence,
    /// invalidating any pending timed clear
    pub fn set_status(&mut self, status: &str) -> u64 {
        self.status = status.to_string();
        self.status_seq += 1;
        self.status_seq
    }

    /// Clear the status line, but only if no newer status replaced the
    /// one this clear was scheduled for
    pub fn clear_status_if(&mut self, seq: u64) {
        if self.status_seq == seq {
            self.status.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ExpressionMetadata;

    fn record(id: &str) -> Expression {
        Expression {
            id: id.to_string(),
            processed_filename: format!("{}_processed.gif", id),
            metadata: ExpressionMetadata {
                title: "Wink".to_string(),
                description: "A quick wink".to_string(),
                tags: vec!["happy".to_string(), "eye".to_string()],
            },
        }
    }

    #[test]
    fn test_card_seeds_buffers_from_record() {
        let card = ExpressionCard::from_expression(record("abc"));

        assert_eq!(card.title, "Wink");
        assert_eq!(card.description, "A quick wink");
        assert_eq!(card.tags, "happy, eye");
        assert!(!card.save_in_flight);
        assert!(!card.delete_in_flight);
    }

    #[test]
    fn test_card_seeds_empty_buffers_from_sparse_record() {
        let sparse = Expression {
            id: "abc".to_string(),
            processed_filename: String::new(),
            metadata: ExpressionMetadata::default(),
        };

        let card = ExpressionCard::from_expression(sparse);

        assert_eq!(card.title, "");
        assert_eq!(card.description, "");
        assert_eq!(card.tags, "");
    }

    #[test]
    fn test_update_payload_splits_tags() {
        let mut card = ExpressionCard::from_expression(record("abc"));
        card.tags = " happy , blink ,, ".to_string();

        let payload = card.update_payload();
        assert_eq!(payload.tags, vec!["happy", "blink"]);
        assert_eq!(payload.title, "Wink");
    }

    #[test]
    fn test_save_guard_blocks_reentry() {
        let mut card = ExpressionCard::from_expression(record("abc"));

        assert!(card.begin_save());
        // Second click while the first call is outstanding
        assert!(!card.begin_save());

        card.finish_save(true);
        assert!(!card.save_in_flight);
        assert_eq!(card.status, "Saved!");

        // Re-enabled after completion
        assert!(card.begin_save());
    }

    #[test]
    fn test_delete_guard_and_failure_keeps_card_usable() {
        let mut card = ExpressionCard::from_expression(record("abc"));

        assert!(card.begin_delete());
        assert!(!card.begin_delete());

        card.fail_delete();
        assert!(!card.delete_in_flight);
        assert_eq!(card.status, "Error deleting expression.");
        assert!(card.begin_delete());
    }

    #[test]
    fn test_download_guard_blocks_reentry() {
        let mut card = ExpressionCard::from_expression(record("abc"));

        assert!(card.begin_download());
        // Second click while the first call is outstanding
        assert!(!card.begin_download());

        card.finish_download(false);
        assert!(!card.download_in_flight);
        assert_eq!(card.status, "Error downloading GIF.");

        // Re-enabled after completion
        assert!(card.begin_download());
    }

    #[test]
    fn test_stale_timed_clear_is_ignored() {
        let mut card = ExpressionCard::from_expression(record("abc"));

        let old_seq = card.set_status("Saved!");
        card.set_status("Deleting...");

        card.clear_status_if(old_seq);
        assert_eq!(card.status, "Deleting...");

        let current = card.status_seq;
        card.clear_status_if(current);
        assert_eq!(card.status, "");
    }

    #[test]
    fn test_list_view_card_lookup() {
        let mut view = ListView::Loaded(vec![
            ExpressionCard::from_expression(record("a")),
            ExpressionCard::from_expression(record("b")),
        ]);

        assert!(view.card_mut("b").is_some());
        assert!(view.card_mut("missing").is_none());
        assert!(ListView::Empty.card_mut("a").is_none());
    }
}
