//! Session state for one quiz run plus the read-only snapshots handed to the
//! presentation layer.

use std::collections::VecDeque;

use crate::catalog::WordEntry;

/// Points awarded per correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;
/// Options shown per round when the pool allows it.
pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Level,
    Endless,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Sentinel used by endless mode.
    Endless,
}

impl Difficulty {
    /// Correct answers needed to clear a unit of `unit_size` words.
    pub fn total_steps(self, unit_size: usize) -> StepTarget {
        match self {
            Difficulty::Easy => StepTarget::Bounded(15),
            Difficulty::Medium => StepTarget::Bounded(25),
            Difficulty::Hard => StepTarget::Bounded(unit_size as u32),
            Difficulty::Endless => StepTarget::Unbounded,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
            Difficulty::Endless => "无尽",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepTarget {
    Bounded(u32),
    Unbounded,
}

impl StepTarget {
    pub fn is_reached(self, correct: u32) -> bool {
        match self {
            StepTarget::Bounded(n) => correct >= n,
            StepTarget::Unbounded => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug)]
pub struct SessionState {
    pub mode: Mode,
    /// Only meaningful in level mode.
    pub unit: u32,
    pub difficulty: Difficulty,
    pub total_steps: StepTarget,
    pub score: u32,
    pub correct_count: u32,
    pub word_queue: VecDeque<WordEntry>,
    pub current_word: Option<WordEntry>,
    pub options: Vec<AnswerOption>,
    pub selected_option: Option<usize>,
    pub is_active: bool,
}

impl SessionState {
    pub fn new(mode: Mode, unit: u32, difficulty: Difficulty, total_steps: StepTarget) -> Self {
        Self {
            mode,
            unit,
            difficulty,
            total_steps,
            score: 0,
            correct_count: 0,
            word_queue: VecDeque::new(),
            current_word: None,
            options: Vec::new(),
            selected_option: None,
            is_active: true,
        }
    }

    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            correct_count: self.correct_count,
            total_steps: self.total_steps,
            score: self.score,
        }
    }

    pub fn round(&self) -> Option<RoundSnapshot> {
        let word = self.current_word.as_ref()?;
        Some(RoundSnapshot {
            english: word.english.clone(),
            options: self.options.iter().map(|o| o.text.clone()).collect(),
            selected: self.selected_option,
        })
    }

    /// Level mode has hit its target; checked before every new round.
    pub fn is_won(&self) -> bool {
        self.mode == Mode::Level && self.total_steps.is_reached(self.correct_count)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub correct_count: u32,
    pub total_steps: StepTarget,
    pub score: u32,
}

impl ProgressSnapshot {
    /// `3/15` in level mode, a bare count in endless mode.
    pub fn display(&self) -> String {
        match self.total_steps {
            StepTarget::Bounded(n) => format!("{}/{}", self.correct_count, n),
            StepTarget::Unbounded => self.correct_count.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub english: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub won: bool,
    pub score: u32,
    pub correct_count: u32,
}

impl SessionOutcome {
    pub fn title(&self) -> &'static str {
        if self.won { "恭喜通关！" } else { "游戏结束" }
    }

    pub fn message(&self) -> &'static str {
        if self.won { "你成功帮助青蛙过河了！" } else { "青蛙掉进河里了，再试一次吧！" }
    }

    pub fn pass_status(&self) -> &'static str {
        if self.won { "已通过" } else { "未通过" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_per_difficulty() {
        assert_eq!(Difficulty::Easy.total_steps(4), StepTarget::Bounded(15));
        assert_eq!(Difficulty::Medium.total_steps(4), StepTarget::Bounded(25));
        assert_eq!(Difficulty::Hard.total_steps(40), StepTarget::Bounded(40));
        assert_eq!(Difficulty::Endless.total_steps(40), StepTarget::Unbounded);
    }

    #[test]
    fn progress_display() {
        let mut s = SessionState::new(Mode::Level, 1, Difficulty::Easy, StepTarget::Bounded(15));
        s.correct_count = 3;
        assert_eq!(s.progress().display(), "3/15");
        s.total_steps = StepTarget::Unbounded;
        assert_eq!(s.progress().display(), "3");
    }

    #[test]
    fn endless_is_never_won() {
        let mut s = SessionState::new(Mode::Endless, 0, Difficulty::Endless, StepTarget::Unbounded);
        s.correct_count = u32::MAX;
        assert!(!s.is_won());
    }
}
