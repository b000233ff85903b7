/// UI widget builders
///
/// View functions only: each takes controller state and returns an
/// iced element wired to `crate::Message`. No state lives here.

pub mod card;
pub mod upload;
