//! Screen flow: turns presentation intents into controller calls and exposes
//! a declarative [`Frame`] for rendering.

use rand::Rng;
use rand::rngs::StdRng;

use crate::catalog::{Catalog, UnitSummary};
use crate::controller::{AnswerFeedback, SessionController};
use crate::session::{Difficulty, ProgressSnapshot, RoundSnapshot, SessionOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    UnitSelect,
    DifficultySelect,
    Game,
    End,
}

impl Screen {
    pub fn id(self) -> &'static str {
        match self {
            Screen::Start => "start",
            Screen::UnitSelect => "unit-select",
            Screen::DifficultySelect => "difficulty-select",
            Screen::Game => "game",
            Screen::End => "end",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    ChooseLevelMode,
    ChooseEndlessMode,
    SelectUnit(u32),
    SelectDifficulty(Difficulty),
    SelectOption(usize),
    /// Feedback finished after a correct answer.
    Advance,
    /// Feedback finished after a wrong answer.
    ShowResult,
    Quit,
    PlayAgain,
    BackToStart,
    BackToUnits,
}

/// Everything the presentation layer needs to draw the current screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub screen: Screen,
    pub units: Vec<UnitSummary>,
    pub selected_unit: Option<u32>,
    pub difficulty: Option<Difficulty>,
    pub round: Option<RoundSnapshot>,
    pub progress: Option<ProgressSnapshot>,
    pub feedback: Option<AnswerFeedback>,
    pub outcome: Option<SessionOutcome>,
}

pub struct Navigator<R: Rng = StdRng> {
    controller: SessionController<R>,
    screen: Screen,
    selected_unit: Option<u32>,
    feedback: Option<AnswerFeedback>,
    /// Bumped whenever feedback starts or the session changes hands, so a
    /// delayed follow-up intent can tell whether it still applies.
    feedback_token: u64,
}

impl Navigator<StdRng> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_controller(SessionController::new(catalog))
    }
}

impl<R: Rng> Navigator<R> {
    pub fn with_controller(controller: SessionController<R>) -> Self {
        Self { controller, screen: Screen::Start, selected_unit: None, feedback: None, feedback_token: 0 }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Pending answer feedback, cleared when the follow-up intent arrives.
    pub fn feedback(&self) -> Option<AnswerFeedback> {
        self.feedback
    }

    /// Token identifying the current feedback; capture it when scheduling a
    /// delayed `Advance` or `ShowResult`.
    pub fn feedback_token(&self) -> u64 {
        self.feedback_token
    }

    /// Dispatch a delayed follow-up intent, dropping it when `token` belongs
    /// to earlier feedback or an earlier session.
    pub fn dispatch_if_current(&mut self, intent: Intent, token: u64) -> Screen {
        if token != self.feedback_token {
            log::debug!("stale {intent:?} dropped");
            return self.screen;
        }
        self.dispatch(intent)
    }

    pub fn controller(&self) -> &SessionController<R> {
        &self.controller
    }

    /// Apply one intent. Intents that do not fit the current screen are
    /// ignored and leave everything untouched.
    pub fn dispatch(&mut self, intent: Intent) -> Screen {
        use Intent::*;
        use Screen::*;

        match (self.screen, intent) {
            (Start, ChooseLevelMode) => self.screen = UnitSelect,
            (Start, ChooseEndlessMode) => {
                if self.start(|c| c.start_endless()) {
                    self.selected_unit = None;
                }
            }
            (UnitSelect, SelectUnit(unit)) if self.controller.catalog().unit(unit).is_some() => {
                self.selected_unit = Some(unit);
                self.screen = DifficultySelect;
            }
            (UnitSelect, BackToStart) => self.screen = Start,
            (DifficultySelect, SelectDifficulty(d)) if d != Difficulty::Endless => {
                if let Some(unit) = self.selected_unit {
                    self.start(|c| c.start_level(unit, d));
                }
            }
            (DifficultySelect, BackToUnits) => self.screen = UnitSelect,
            (Game, SelectOption(i)) if self.feedback.is_none() => {
                self.feedback = self.controller.choose(i);
                if self.feedback.is_some() {
                    self.feedback_token += 1;
                }
            }
            (Game, Advance) if self.feedback.is_some_and(|f| f.correct) => {
                self.feedback = None;
                if !self.controller.advance() {
                    self.screen = End;
                }
            }
            (Game, ShowResult) if self.feedback.is_some_and(|f| !f.correct) => {
                self.feedback = None;
                self.screen = End;
            }
            (Game, Quit) => {
                self.controller.quit();
                self.feedback = None;
                self.feedback_token += 1;
                self.screen = End;
            }
            (End, PlayAgain) => {
                self.start(|c| c.restart());
            }
            (End, BackToStart) => {
                self.controller.discard();
                self.feedback_token += 1;
                self.screen = Start;
            }
            (screen, intent) => log::warn!("{intent:?} ignored on {screen:?}"),
        }
        self.screen
    }

    fn start(&mut self, f: impl FnOnce(&mut SessionController<R>) -> Result<(), crate::SessionError>) -> bool {
        match f(&mut self.controller) {
            Ok(()) => {
                self.feedback = None;
                self.feedback_token += 1;
                self.screen = Screen::Game;
                true
            }
            Err(e) => {
                log::warn!("session not started: {e}");
                false
            }
        }
    }

    pub fn frame(&self) -> Frame {
        let session = self.controller.session();
        Frame {
            screen: self.screen,
            units: self.controller.catalog().unit_summaries(),
            selected_unit: session
                .filter(|s| s.mode == crate::Mode::Level)
                .map(|s| s.unit)
                .or(self.selected_unit),
            difficulty: session.map(|s| s.difficulty),
            round: self.controller.round_snapshot(),
            progress: self.controller.progress_snapshot(),
            feedback: self.feedback,
            outcome: self.controller.outcome(),
        }
    }
}
