/// Presentation shell
///
/// Terminal front end over the inventory store: rendering helpers and the
/// interactive session.

pub mod render;
pub mod session;

pub use session::{Flow, Session};
