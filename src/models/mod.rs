mod difficulty;
mod question;

pub use difficulty::Difficulty;
pub use question::Question;
