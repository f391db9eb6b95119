//! Quiz session state machine.
//!
//! [`Session`] owns all game state and moves through
//! `SelectingDifficulty → AwaitingAnswer ⇄ RoundScored → GameOver` via
//! explicit events. [`Controller`] wraps a session together with a
//! [`QuestionSource`] and performs the fetches; everything else is
//! synchronous and independent of any rendering or scheduling concern.

use std::fmt;

use crate::models::{Difficulty, Question};
use crate::source::{BoxedSource, SourceError};

/// Rounds in a full game.
pub const TOTAL_ROUNDS: u32 = 5;

/// Countdown allotted to each round, in seconds.
pub const ROUND_SECONDS: u32 = 30;

/// Where a session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No difficulty chosen yet; nothing has been fetched.
    SelectingDifficulty,
    /// A round is live and the countdown is running.
    AwaitingAnswer,
    /// The current round has been scored; waiting to advance.
    RoundScored,
    /// All rounds played. Terminal.
    GameOver,
}

/// One question-answer cycle within a session.
#[derive(Debug, Clone)]
pub struct Round {
    /// 1-based round number.
    pub index: u32,
    pub question: Question,
    pub time_remaining_secs: u32,
    /// What the player answered, if anything. `None` after a timeout.
    pub user_answer: Option<String>,
    /// Set exactly once; the sole arbiter against double-scoring.
    pub is_scored: bool,
}

impl Round {
    fn new(index: u32, question: Question) -> Self {
        Self {
            index,
            question,
            time_remaining_secs: ROUND_SECONDS,
            user_answer: None,
            is_scored: false,
        }
    }

    pub fn is_out_of_time(&self) -> bool {
        self.time_remaining_secs == 0
    }
}

/// The scored record of a finished round.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub index: u32,
    pub prompt: String,
    pub correct_answer: String,
    pub user_answer: Option<String>,
    pub was_correct: bool,
}

/// Error type for session operations.
#[derive(Debug)]
pub enum SessionError {
    /// `select_difficulty` was called after the session already started.
    AlreadyStarted,
    /// An operation was called outside the state it is valid in. The
    /// session is unchanged.
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
    /// The question source failed. The session keeps its previous state;
    /// the caller may retry the same operation or abandon the game.
    QuestionUnavailable(SourceError),
}

impl SessionError {
    fn invalid(operation: &'static str, state: SessionState) -> Self {
        SessionError::InvalidState { operation, state }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AlreadyStarted => {
                write!(f, "Difficulty cannot change once the session has started")
            }
            SessionError::InvalidState { operation, state } => {
                write!(f, "{} is not valid in the {:?} state", operation, state)
            }
            SessionError::QuestionUnavailable(e) => {
                write!(f, "Couldn't fetch a question: {}", e)
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::QuestionUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SourceError> for SessionError {
    fn from(err: SourceError) -> Self {
        SessionError::QuestionUnavailable(err)
    }
}

/// One complete game from difficulty selection to final score.
#[derive(Debug)]
pub struct Session {
    difficulty: Option<Difficulty>,
    current_round: Option<Round>,
    score: u32,
    history: Vec<RoundOutcome>,
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            difficulty: None,
            current_round: None,
            score: 0,
            history: Vec::new(),
            state: SessionState::SelectingDifficulty,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.as_ref()
    }

    /// Current 1-based round number, or 0 before the first round loads.
    pub fn round_number(&self) -> u32 {
        self.current_round.as_ref().map(|r| r.index).unwrap_or(0)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    /// Decrement the countdown by one second, floored at zero.
    ///
    /// Reaching zero with no answer auto-scores the round incorrect with
    /// no recorded answer. A no-op once the round is scored or the game
    /// is over, so a tick racing a submission can never double-score.
    pub fn tick(&mut self) {
        if self.state != SessionState::AwaitingAnswer {
            return;
        }
        let Some(round) = self.current_round.as_mut() else {
            return;
        };
        if round.is_scored {
            return;
        }

        round.time_remaining_secs = round.time_remaining_secs.saturating_sub(1);
        if round.time_remaining_secs == 0 {
            self.score_round(None);
        }
    }

    /// Record and score the player's answer for the live round.
    ///
    /// A choice that is not one of the round's four options is accepted
    /// and scored incorrect rather than rejected.
    pub fn submit_answer(&mut self, choice: &str) -> Result<&Round, SessionError> {
        let state = self.state;
        if state != SessionState::AwaitingAnswer {
            return Err(SessionError::invalid("submit_answer", state));
        }
        self.score_round(Some(choice.to_owned()))
            .ok_or(SessionError::invalid("submit_answer", state))
    }

    /// The final tally. Valid only once the game is over.
    pub fn final_score(&self) -> Result<u32, SessionError> {
        match self.state {
            SessionState::GameOver => Ok(self.score),
            state => Err(SessionError::invalid("final_score", state)),
        }
    }

    /// Install a freshly fetched round and open it for answers.
    fn begin_round(&mut self, round: Round) {
        self.current_round = Some(round);
        self.state = SessionState::AwaitingAnswer;
    }

    /// Score the live round exactly once. Returns `None` if there is no
    /// round or it was already scored.
    fn score_round(&mut self, user_answer: Option<String>) -> Option<&Round> {
        let mut round = self.current_round.take()?;
        if round.is_scored {
            self.current_round = Some(round);
            return None;
        }

        round.user_answer = user_answer;
        round.is_scored = true;
        let was_correct = round
            .user_answer
            .as_deref()
            .is_some_and(|choice| round.question.is_correct(choice));

        if was_correct {
            self.score += 1;
        }
        self.history.push(RoundOutcome {
            index: round.index,
            prompt: round.question.prompt.clone(),
            correct_answer: round.question.correct_answer.clone(),
            user_answer: round.user_answer.clone(),
            was_correct,
        });
        self.state = SessionState::RoundScored;

        Some(&*self.current_round.insert(round))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a [`Session`] and performs its question fetches.
pub struct Controller {
    source: BoxedSource,
    session: Session,
}

impl Controller {
    pub fn new(source: BoxedSource) -> Self {
        Self {
            source,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Commit a difficulty and load round 1.
    ///
    /// On a fetch failure the session stays in `SelectingDifficulty` and
    /// this can be called again.
    pub async fn select_difficulty(
        &mut self,
        difficulty: Difficulty,
    ) -> Result<&Session, SessionError> {
        if self.session.state != SessionState::SelectingDifficulty {
            return Err(SessionError::AlreadyStarted);
        }

        let round = self.load_round(1, difficulty).await?;
        self.session.difficulty = Some(difficulty);
        self.session.begin_round(round);
        Ok(&self.session)
    }

    /// Leave the scored round behind: load the next one, or end the game
    /// after the last round.
    ///
    /// On a fetch failure the session stays in `RoundScored` and this can
    /// be called again.
    pub async fn advance(&mut self) -> Result<&Session, SessionError> {
        let state = self.session.state;
        if state != SessionState::RoundScored {
            return Err(SessionError::invalid("advance", state));
        }

        let index = self.session.round_number();
        if index < TOTAL_ROUNDS {
            let difficulty = self
                .session
                .difficulty
                .ok_or(SessionError::invalid("advance", state))?;
            let round = self.load_round(index + 1, difficulty).await?;
            self.session.begin_round(round);
        } else {
            self.session.state = SessionState::GameOver;
        }
        Ok(&self.session)
    }

    pub fn tick(&mut self) {
        self.session.tick();
    }

    pub fn submit_answer(&mut self, choice: &str) -> Result<&Round, SessionError> {
        self.session.submit_answer(choice)
    }

    pub fn final_score(&self) -> Result<u32, SessionError> {
        self.session.final_score()
    }

    /// Throw the finished session away and start over at difficulty
    /// selection. The source is kept.
    pub fn reset(&mut self) {
        self.session = Session::new();
    }

    async fn load_round(&mut self, index: u32, difficulty: Difficulty) -> Result<Round, SessionError> {
        let question = self.source.fetch(difficulty).await.map_err(|e| {
            log::warn!("failed to load round {}: {}", index, e);
            SessionError::QuestionUnavailable(e)
        })?;
        Ok(Round::new(index, question))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::source::QuestionSource;

    use super::*;

    enum Planned {
        Question(Question),
        Failure,
    }

    struct StubSource {
        plan: Mutex<VecDeque<Planned>>,
    }

    impl StubSource {
        fn with_plan(plan: Vec<Planned>) -> BoxedSource {
            Box::new(Self {
                plan: Mutex::new(plan.into_iter().collect()),
            })
        }

        fn questions(count: u32) -> BoxedSource {
            Self::with_plan((1..=count).map(|n| Planned::Question(question(n))).collect())
        }
    }

    #[async_trait]
    impl QuestionSource for StubSource {
        async fn fetch(&self, _difficulty: Difficulty) -> Result<Question, SourceError> {
            match self.plan.lock().unwrap().pop_front() {
                Some(Planned::Question(q)) => Ok(q),
                Some(Planned::Failure) => Err(SourceError::Status(500)),
                None => Err(SourceError::Empty),
            }
        }
    }

    fn question(n: u32) -> Question {
        Question {
            prompt: format!("Question {}", n),
            choices: [
                format!("right {}", n),
                "wrong a".to_string(),
                "wrong b".to_string(),
                "wrong c".to_string(),
            ],
            correct_answer: format!("right {}", n),
        }
    }

    #[tokio::test]
    async fn select_difficulty_loads_the_first_round() {
        let mut controller = Controller::new(StubSource::questions(1));

        let session = controller
            .select_difficulty(Difficulty::Easy)
            .await
            .unwrap();

        assert_eq!(session.state(), SessionState::AwaitingAnswer);
        assert_eq!(session.difficulty(), Some(Difficulty::Easy));
        let round = session.current_round().unwrap();
        assert_eq!(round.index, 1);
        assert_eq!(round.time_remaining_secs, ROUND_SECONDS);
        assert!(!round.is_scored);
        assert!(round
            .question
            .choices
            .contains(&round.question.correct_answer));
    }

    #[tokio::test]
    async fn select_difficulty_twice_is_rejected() {
        let mut controller = Controller::new(StubSource::questions(1));
        controller.select_difficulty(Difficulty::Easy).await.unwrap();

        let err = controller
            .select_difficulty(Difficulty::Hard)
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::AlreadyStarted));
        assert_eq!(controller.session().difficulty(), Some(Difficulty::Easy));
    }

    #[tokio::test]
    async fn fetch_failure_at_start_keeps_difficulty_selection_open() {
        let mut controller = Controller::new(StubSource::with_plan(vec![
            Planned::Failure,
            Planned::Question(question(1)),
        ]));

        let err = controller
            .select_difficulty(Difficulty::Medium)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::QuestionUnavailable(_)));
        assert_eq!(
            controller.session().state(),
            SessionState::SelectingDifficulty
        );
        assert!(controller.session().current_round().is_none());

        // Retrying is allowed and succeeds.
        controller
            .select_difficulty(Difficulty::Medium)
            .await
            .unwrap();
        assert_eq!(controller.session().state(), SessionState::AwaitingAnswer);
    }

    #[tokio::test]
    async fn correct_answer_increments_the_score() {
        let mut controller = Controller::new(StubSource::questions(1));
        controller.select_difficulty(Difficulty::Easy).await.unwrap();

        let round = controller.submit_answer("right 1").unwrap();

        assert!(round.is_scored);
        assert_eq!(round.user_answer.as_deref(), Some("right 1"));
        assert_eq!(controller.session().state(), SessionState::RoundScored);
        assert_eq!(controller.session().score(), 1);
        let outcome = &controller.session().history()[0];
        assert!(outcome.was_correct);
    }

    #[tokio::test]
    async fn unknown_choice_is_scored_incorrect() {
        let mut controller = Controller::new(StubSource::questions(1));
        controller.select_difficulty(Difficulty::Easy).await.unwrap();

        let round = controller.submit_answer("not an option").unwrap();

        assert!(round.is_scored);
        assert_eq!(controller.session().score(), 0);
        assert!(!controller.session().history()[0].was_correct);
    }

    #[tokio::test]
    async fn second_submission_changes_nothing() {
        let mut controller = Controller::new(StubSource::questions(1));
        controller.select_difficulty(Difficulty::Easy).await.unwrap();
        controller.submit_answer("wrong a").unwrap();

        let err = controller.submit_answer("right 1").unwrap_err();

        assert!(matches!(err, SessionError::InvalidState { .. }));
        assert_eq!(controller.session().score(), 0);
        assert_eq!(controller.session().history().len(), 1);
        assert_eq!(
            controller
                .session()
                .current_round()
                .unwrap()
                .user_answer
                .as_deref(),
            Some("wrong a")
        );
    }

    #[tokio::test]
    async fn countdown_expiry_auto_scores_incorrect() {
        let mut controller = Controller::new(StubSource::questions(1));
        controller.select_difficulty(Difficulty::Easy).await.unwrap();

        for _ in 0..ROUND_SECONDS {
            controller.tick();
        }

        let session = controller.session();
        assert_eq!(session.state(), SessionState::RoundScored);
        assert_eq!(session.score(), 0);
        assert_eq!(session.history().len(), 1);
        let outcome = &session.history()[0];
        assert!(outcome.user_answer.is_none());
        assert!(!outcome.was_correct);
        let round = session.current_round().unwrap();
        assert!(round.is_scored);
        assert!(round.is_out_of_time());

        // A submission arriving after the timeout is a no-op.
        let err = controller.submit_answer("right 1").unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { .. }));
        assert_eq!(controller.session().score(), 0);
        assert_eq!(controller.session().history().len(), 1);
    }

    #[tokio::test]
    async fn ticks_are_inert_once_the_round_is_scored() {
        let mut controller = Controller::new(StubSource::questions(1));
        controller.select_difficulty(Difficulty::Easy).await.unwrap();
        controller.tick();
        controller.submit_answer("right 1").unwrap();

        let before = controller.session().current_round().unwrap().time_remaining_secs;
        controller.tick();
        controller.tick();

        let round = controller.session().current_round().unwrap();
        assert_eq!(round.time_remaining_secs, before);
        assert_eq!(controller.session().history().len(), 1);
    }

    #[tokio::test]
    async fn advance_reloads_the_countdown_for_the_next_round() {
        let mut controller = Controller::new(StubSource::questions(2));
        controller.select_difficulty(Difficulty::Easy).await.unwrap();
        controller.tick();
        controller.tick();
        controller.submit_answer("wrong a").unwrap();

        let session = controller.advance().await.unwrap();

        assert_eq!(session.state(), SessionState::AwaitingAnswer);
        let round = session.current_round().unwrap();
        assert_eq!(round.index, 2);
        assert_eq!(round.time_remaining_secs, ROUND_SECONDS);
        assert!(!round.is_scored);
    }

    #[tokio::test]
    async fn advance_before_scoring_is_rejected() {
        let mut controller = Controller::new(StubSource::questions(1));
        controller.select_difficulty(Difficulty::Easy).await.unwrap();

        let err = controller.advance().await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { .. }));
        assert_eq!(controller.session().state(), SessionState::AwaitingAnswer);
    }

    #[tokio::test]
    async fn fetch_failure_mid_game_leaves_the_round_scored() {
        let mut controller = Controller::new(StubSource::with_plan(vec![
            Planned::Question(question(1)),
            Planned::Failure,
            Planned::Question(question(2)),
        ]));
        controller.select_difficulty(Difficulty::Easy).await.unwrap();
        controller.submit_answer("right 1").unwrap();

        let err = controller.advance().await.unwrap_err();
        assert!(matches!(err, SessionError::QuestionUnavailable(_)));
        assert_eq!(controller.session().state(), SessionState::RoundScored);
        assert_eq!(controller.session().round_number(), 1);

        // Retrying the advance succeeds.
        controller.advance().await.unwrap();
        assert_eq!(controller.session().round_number(), 2);
    }

    #[tokio::test]
    async fn one_correct_answer_across_five_rounds_scores_one() {
        let mut controller = Controller::new(StubSource::questions(TOTAL_ROUNDS));
        controller.select_difficulty(Difficulty::Easy).await.unwrap();

        controller.submit_answer("right 1").unwrap();
        for _ in 1..TOTAL_ROUNDS {
            controller.advance().await.unwrap();
            controller.submit_answer("wrong a").unwrap();
        }
        let session = controller.advance().await.unwrap();

        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(session.history().len(), TOTAL_ROUNDS as usize);
        assert_eq!(controller.final_score().unwrap(), 1);
        assert!(controller.session().score() <= TOTAL_ROUNDS);
    }

    #[tokio::test]
    async fn final_score_is_unavailable_while_playing() {
        let mut controller = Controller::new(StubSource::questions(1));
        assert!(matches!(
            controller.final_score(),
            Err(SessionError::InvalidState { .. })
        ));

        controller.select_difficulty(Difficulty::Easy).await.unwrap();
        assert!(matches!(
            controller.final_score(),
            Err(SessionError::InvalidState { .. })
        ));
    }

    #[tokio::test]
    async fn reset_returns_to_difficulty_selection() {
        let mut controller = Controller::new(StubSource::questions(2));
        controller.select_difficulty(Difficulty::Hard).await.unwrap();
        controller.submit_answer("right 1").unwrap();

        controller.reset();

        let session = controller.session();
        assert_eq!(session.state(), SessionState::SelectingDifficulty);
        assert_eq!(session.score(), 0);
        assert!(session.history().is_empty());
        assert!(session.current_round().is_none());
        assert!(session.difficulty().is_none());
    }
}
