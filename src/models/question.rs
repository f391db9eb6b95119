/// A single multiple-choice trivia question.
///
/// Built by a question source with `choices` already shuffled; the session
/// never reorders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub choices: [String; 4],
    pub correct_answer: String,
}

impl Question {
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }
}
