/// State management module
///
/// This module handles all application state, including:
/// - The upload form and its preview resource (upload.rs)
/// - Per-card edit buffers and in-flight guards (cards.rs)

pub mod cards;
pub mod upload;
