/// REST client for the expressions backend
///
/// This module handles:
/// - Wire types shared with the backend (types.rs)
/// - The HTTP calls themselves (client.rs)

pub mod client;
pub mod types;
