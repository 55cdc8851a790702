// Integration tests (native) for the `frog-crossing` crate.
// These drive the session controller with a seeded RNG so every run is
// deterministic and needs no browser.

use rand::SeedableRng;
use rand::rngs::StdRng;

use frog_crossing::{
    Catalog, Difficulty, Mode, SessionController, SessionError, SessionState, StepTarget, VocabularyUnit,
    WordEntry, round,
};

fn unit(id: u32, words: &[(&str, &str)]) -> VocabularyUnit {
    VocabularyUnit { unit: id, words: words.iter().map(|(e, c)| WordEntry::new(*e, *c)).collect() }
}

fn animals() -> Catalog {
    Catalog::new(vec![
        unit(1, &[("cat", "猫"), ("dog", "狗"), ("bird", "鸟"), ("fish", "鱼")]),
        unit(2, &[("sun", "太阳"), ("moon", "月亮"), ("star", "星星"), ("sky", "天空"), ("sea", "大海")]),
    ])
    .unwrap()
}

fn controller(seed: u64) -> SessionController<StdRng> {
    SessionController::with_rng(animals(), StdRng::seed_from_u64(seed))
}

fn pick(c: &SessionController<StdRng>, correct: bool) -> usize {
    let options = &c.session().unwrap().options;
    options.iter().position(|o| o.is_correct == correct).unwrap()
}

#[test]
fn total_steps_follow_difficulty() {
    let mut c = controller(1);
    for (d, expected) in [(Difficulty::Easy, 15), (Difficulty::Medium, 25), (Difficulty::Hard, 4)] {
        c.start_level(1, d).unwrap();
        assert_eq!(c.session().unwrap().total_steps, StepTarget::Bounded(expected));
    }
    c.start_endless().unwrap();
    assert_eq!(c.session().unwrap().total_steps, StepTarget::Unbounded);
    assert_eq!(c.session().unwrap().mode, Mode::Endless);
}

#[test]
fn cat_round_offers_the_whole_unit() {
    let catalog = animals();
    let mut rng = StdRng::seed_from_u64(8);
    let mut state = SessionState::new(Mode::Level, 1, Difficulty::Easy, StepTarget::Bounded(15));
    state.current_word = Some(WordEntry::new("cat", "猫"));
    for _ in 0..20 {
        round::build_options(&mut state, &catalog, &mut rng);
        let mut texts: Vec<_> = state.options.iter().map(|o| o.text.as_str()).collect();
        texts.sort_unstable();
        let mut expected = vec!["猫", "狗", "鸟", "鱼"];
        expected.sort_unstable();
        assert_eq!(texts, expected);
        assert!(state.options.iter().any(|o| o.is_correct && o.text == "猫"));
    }
}

#[test]
fn correct_answer_scores_ten() {
    let mut c = controller(2);
    c.start_level(1, Difficulty::Easy).unwrap();
    let feedback = c.choose(pick(&c, true)).unwrap();
    assert!(feedback.correct);
    let s = c.session().unwrap();
    assert_eq!((s.score, s.correct_count, s.is_active), (10, 1, true));
}

#[test]
fn wrong_answer_loses_at_any_score() {
    let mut c = controller(3);
    c.start_endless().unwrap();
    for _ in 0..5 {
        c.choose(pick(&c, true));
        assert!(c.advance());
    }
    assert!(!c.choose(pick(&c, false)).unwrap().correct);
    let s = c.session().unwrap();
    assert!(!s.is_active);
    assert_eq!(s.score, 50);
    let outcome = c.outcome().unwrap();
    assert!(!outcome.won);
    assert_eq!((outcome.score, outcome.correct_count), (50, 5));
}

#[test]
fn second_pick_in_a_round_is_ignored() {
    let mut c = controller(4);
    c.start_level(2, Difficulty::Easy).unwrap();
    c.choose(pick(&c, true)).unwrap();
    assert_eq!(c.choose(pick(&c, false)), None);
    assert!(c.session().unwrap().is_active);
}

#[test]
fn small_unit_still_reaches_easy_target() {
    // Unit 1 has 4 words but Easy needs 15: the queue refills and the win
    // lands exactly on the 15th correct answer.
    let mut c = controller(5);
    c.start_level(1, Difficulty::Easy).unwrap();
    for n in 1..=15 {
        c.choose(pick(&c, true)).unwrap();
        let live = c.advance();
        assert_eq!(live, n < 15, "after {n} correct answers");
    }
    let outcome = c.outcome().unwrap();
    assert!(outcome.won);
    assert_eq!(outcome.correct_count, 15);
    assert_eq!(outcome.score, 150);
    assert_eq!(c.progress_snapshot().unwrap().correct_count, 15);
}

#[test]
fn restart_replays_level_from_zero() {
    let mut c = controller(6);
    c.start_level(2, Difficulty::Medium).unwrap();
    c.choose(pick(&c, true));
    c.advance();
    c.choose(pick(&c, false));
    assert!(c.outcome().is_some());

    c.restart().unwrap();
    let s = c.session().unwrap();
    assert_eq!((s.mode, s.unit, s.difficulty), (Mode::Level, 2, Difficulty::Medium));
    assert_eq!((s.score, s.correct_count), (0, 0));
    assert!(s.is_active);
    assert!(c.outcome().is_none());
}

#[test]
fn endless_draws_from_every_unit() {
    let mut c = controller(7);
    c.start_endless().unwrap();
    assert_eq!(c.session().unwrap().word_queue.len(), 8);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..30 {
        seen.insert(c.session().unwrap().current_word.clone().unwrap().english);
        c.choose(pick(&c, true));
        c.advance();
    }
    assert_eq!(seen.len(), 9);
}

#[test]
fn empty_catalog_cannot_start() {
    let mut c = SessionController::with_rng(Catalog::default(), StdRng::seed_from_u64(0));
    assert_eq!(c.start_endless(), Err(SessionError::EmptyPool));
    let mut c = SessionController::with_rng(
        Catalog::new(vec![unit(1, &[])]).unwrap(),
        StdRng::seed_from_u64(0),
    );
    assert_eq!(c.start_level(1, Difficulty::Easy), Err(SessionError::EmptyPool));
}
