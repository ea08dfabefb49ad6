//! Domain records shared by the stores and the session engine.

mod question;
mod score;

pub use question::{NUM_OPTIONS, Question};
pub use score::ScoreEntry;
