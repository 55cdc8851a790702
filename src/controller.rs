//! Session controller: starts, restarts and ends quiz sessions and owns the
//! only live [`SessionState`].

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::Catalog;
use crate::error::SessionError;
use crate::round;
use crate::session::{
    Difficulty, Mode, ProgressSnapshot, RoundSnapshot, SessionOutcome, SessionState, StepTarget,
};

/// What `restart` replays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LastPlayed {
    Level { unit: u32, difficulty: Difficulty },
    Endless,
}

/// Result of a player's pick, for driving feedback animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub option_index: usize,
    pub correct: bool,
}

pub struct SessionController<R: Rng = StdRng> {
    catalog: Catalog,
    rng: R,
    session: Option<SessionState>,
    last: Option<LastPlayed>,
    outcome: Option<SessionOutcome>,
}

impl SessionController<StdRng> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_rng(catalog, StdRng::from_entropy())
    }
}

impl<R: Rng> SessionController<R> {
    pub fn with_rng(catalog: Catalog, rng: R) -> Self {
        Self { catalog, rng, session: None, last: None, outcome: None }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn start_level(&mut self, unit: u32, difficulty: Difficulty) -> Result<(), SessionError> {
        let words = &self.catalog.unit(unit).ok_or(SessionError::UnknownUnit(unit))?.words;
        if words.is_empty() {
            return Err(SessionError::EmptyPool);
        }
        let total = difficulty.total_steps(words.len());
        let mut state = SessionState::new(Mode::Level, unit, difficulty, total);
        round::refill_queue(&mut state, &self.catalog, &mut self.rng);
        if let StepTarget::Bounded(n) = total {
            state.word_queue.truncate(n as usize);
        }
        log::info!("level started: unit {unit}, {difficulty:?}, target {total:?}");
        self.begin(state, LastPlayed::Level { unit, difficulty });
        Ok(())
    }

    pub fn start_endless(&mut self) -> Result<(), SessionError> {
        if self.catalog.units().iter().all(|u| u.words.is_empty()) {
            return Err(SessionError::EmptyPool);
        }
        let mut state = SessionState::new(Mode::Endless, 0, Difficulty::Endless, StepTarget::Unbounded);
        round::refill_queue(&mut state, &self.catalog, &mut self.rng);
        log::info!("endless started with {} words", state.word_queue.len());
        self.begin(state, LastPlayed::Endless);
        Ok(())
    }

    fn begin(&mut self, mut state: SessionState, last: LastPlayed) {
        round::next_round(&mut state, &self.catalog, &mut self.rng);
        self.session = Some(state);
        self.last = Some(last);
        self.outcome = None;
    }

    /// Replay the last mode with the same unit and difficulty from zero.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        match self.last.ok_or(SessionError::NothingToRestart)? {
            LastPlayed::Level { unit, difficulty } => self.start_level(unit, difficulty),
            LastPlayed::Endless => self.start_endless(),
        }
    }

    /// Pick an option in the current round. `None` when the pick is ignored.
    pub fn choose(&mut self, option_index: usize) -> Option<AnswerFeedback> {
        let Some(state) = self.session.as_mut() else {
            log::warn!("option {option_index} picked with no session");
            return None;
        };
        let Some(correct) = round::submit_answer(state, option_index) else {
            log::warn!("option {option_index} ignored");
            return None;
        };
        log::debug!("option {option_index} picked, correct: {correct}");
        if !correct {
            self.end_session(false);
        }
        Some(AnswerFeedback { option_index, correct })
    }

    /// Move on after a correct answer: win the level if the target is met,
    /// otherwise draw the next round. Returns `true` while the session is live.
    pub fn advance(&mut self) -> bool {
        let Some(state) = self.session.as_mut() else {
            return false;
        };
        if !state.is_active || state.selected_option.is_none() {
            return state.is_active;
        }
        if state.is_won() {
            self.end_session(true);
            return false;
        }
        round::next_round(state, &self.catalog, &mut self.rng)
    }

    /// Leave the game screen mid-session; counts as a loss.
    pub fn quit(&mut self) {
        if self.session.as_ref().is_some_and(|s| s.is_active) {
            self.end_session(false);
        }
    }

    pub fn end_session(&mut self, won: bool) {
        let Some(state) = self.session.as_mut() else {
            return;
        };
        state.is_active = false;
        let outcome = SessionOutcome { won, score: state.score, correct_count: state.correct_count };
        log::info!("session ended: won {won}, score {}, correct {}", outcome.score, outcome.correct_count);
        self.outcome = Some(outcome);
    }

    /// Drop the session without recording anything (back to start screen).
    pub fn discard(&mut self) {
        self.session = None;
        self.outcome = None;
    }

    pub fn progress_snapshot(&self) -> Option<ProgressSnapshot> {
        self.session.as_ref().map(SessionState::progress)
    }

    pub fn round_snapshot(&self) -> Option<RoundSnapshot> {
        self.session.as_ref().and_then(SessionState::round)
    }
}
