//! Round engine: draws the next word, builds its answer options and checks
//! the player's pick.

use std::collections::{HashSet, VecDeque};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::{Catalog, WordEntry};
use crate::session::{AnswerOption, Mode, OPTION_COUNT, POINTS_PER_CORRECT, SessionState};

/// Words a session draws from: its unit in level mode, every unit in endless mode.
pub fn word_pool<'a>(state: &SessionState, catalog: &'a Catalog) -> Vec<&'a WordEntry> {
    match state.mode {
        Mode::Level => catalog.unit(state.unit).map(|u| u.words.iter().collect()).unwrap_or_default(),
        Mode::Endless => catalog.units().iter().flat_map(|u| u.words.iter()).collect(),
    }
}

/// Replace the queue with a fresh uniform permutation of the pool.
pub fn refill_queue<R: Rng + ?Sized>(state: &mut SessionState, catalog: &Catalog, rng: &mut R) {
    let mut words: Vec<WordEntry> = word_pool(state, catalog).into_iter().cloned().collect();
    words.shuffle(rng);
    state.word_queue = VecDeque::from(words);
}

/// Pop the next word and build its options. The level win check belongs to the
/// controller and must run first. Returns `false` when nothing was drawn
/// (inactive session or empty pool).
pub fn next_round<R: Rng + ?Sized>(state: &mut SessionState, catalog: &Catalog, rng: &mut R) -> bool {
    if !state.is_active {
        return false;
    }
    if state.word_queue.is_empty() {
        refill_queue(state, catalog, rng);
    }
    state.selected_option = None;
    state.current_word = state.word_queue.pop_front();
    build_options(state, catalog, rng);
    state.current_word.is_some()
}

/// One correct option plus up to three wrong translations, in random order.
///
/// Wrong candidates exclude every pool entry whose translation equals the
/// current word's, so homonymous translations never show up as distractors.
pub fn build_options<R: Rng + ?Sized>(state: &mut SessionState, catalog: &Catalog, rng: &mut R) {
    let Some(word) = state.current_word.as_ref() else {
        state.options.clear();
        return;
    };

    let mut seen = HashSet::new();
    let wrong: Vec<&str> = word_pool(state, catalog)
        .into_iter()
        .map(|w| w.chinese.as_str())
        .filter(|text| *text != word.chinese && seen.insert(*text))
        .collect();

    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(AnswerOption { text: word.chinese.clone(), is_correct: true });
    options.extend(
        wrong
            .choose_multiple(rng, OPTION_COUNT - 1)
            .map(|text| AnswerOption { text: (*text).to_owned(), is_correct: false }),
    );
    options.shuffle(rng);
    state.options = options;
}

/// Record the player's pick. Accepted once per round; any other call
/// (inactive session, option already picked, index out of range) is ignored
/// and yields `None`. A wrong pick ends the session.
pub fn submit_answer(state: &mut SessionState, option_index: usize) -> Option<bool> {
    if !state.is_active || state.selected_option.is_some() {
        return None;
    }
    let correct = state.options.get(option_index)?.is_correct;
    state.selected_option = Some(option_index);
    if correct {
        state.score += POINTS_PER_CORRECT;
        state.correct_count += 1;
    } else {
        state.is_active = false;
    }
    Some(correct)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::VocabularyUnit;
    use crate::session::{Difficulty, StepTarget};

    fn catalog(words: &[(&str, &str)]) -> Catalog {
        Catalog::new(vec![VocabularyUnit {
            unit: 1,
            words: words.iter().map(|(e, c)| WordEntry::new(*e, *c)).collect(),
        }])
        .unwrap()
    }

    fn level_state() -> SessionState {
        SessionState::new(Mode::Level, 1, Difficulty::Easy, StepTarget::Bounded(15))
    }

    #[test]
    fn refills_when_queue_empty() {
        let cat = catalog(&[("cat", "猫"), ("dog", "狗")]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = level_state();
        assert!(next_round(&mut s, &cat, &mut rng));
        assert_eq!(s.word_queue.len(), 1);
        assert!(next_round(&mut s, &cat, &mut rng));
        assert!(s.word_queue.is_empty());
        assert!(next_round(&mut s, &cat, &mut rng));
        assert_eq!(s.word_queue.len(), 1);
    }

    #[test]
    fn one_correct_option_at_most_four() {
        let cat = catalog(&[("a", "一"), ("b", "二"), ("c", "三"), ("d", "四"), ("e", "五"), ("f", "六")]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = level_state();
        for _ in 0..50 {
            next_round(&mut s, &cat, &mut rng);
            assert_eq!(s.options.len(), 4);
            assert_eq!(s.options.iter().filter(|o| o.is_correct).count(), 1);
            let correct = s.options.iter().find(|o| o.is_correct).unwrap();
            assert_eq!(correct.text, s.current_word.as_ref().unwrap().chinese);
        }
    }

    #[test]
    fn small_pool_gives_fewer_options() {
        let cat = catalog(&[("cat", "猫"), ("dog", "狗")]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = level_state();
        next_round(&mut s, &cat, &mut rng);
        assert_eq!(s.options.len(), 2);
    }

    #[test]
    fn shared_translation_is_excluded_from_wrong_options() {
        let cat = catalog(&[("big", "大"), ("large", "大"), ("small", "小"), ("up", "上"), ("down", "下")]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut s = level_state();
        s.current_word = Some(WordEntry::new("big", "大"));
        build_options(&mut s, &cat, &mut rng);
        assert_eq!(s.options.iter().filter(|o| o.text == "大").count(), 1);
        assert_eq!(s.options.len(), 4);
    }

    #[test]
    fn duplicate_wrong_translations_count_once() {
        let cat = catalog(&[("cat", "猫"), ("bird", "鸟"), ("fowl", "鸟"), ("dog", "狗")]);
        let mut rng = StdRng::seed_from_u64(5);
        let mut s = level_state();
        s.current_word = Some(WordEntry::new("cat", "猫"));
        build_options(&mut s, &cat, &mut rng);
        assert_eq!(s.options.len(), 3);
    }

    #[test]
    fn answer_accepted_once() {
        let mut s = level_state();
        s.options = vec![
            AnswerOption { text: "猫".into(), is_correct: true },
            AnswerOption { text: "狗".into(), is_correct: false },
        ];
        assert_eq!(submit_answer(&mut s, 0), Some(true));
        assert_eq!(submit_answer(&mut s, 1), None);
        assert_eq!((s.score, s.correct_count, s.is_active), (10, 1, true));
    }

    #[test]
    fn out_of_range_pick_is_ignored() {
        let mut s = level_state();
        s.options = vec![AnswerOption { text: "猫".into(), is_correct: true }];
        assert_eq!(submit_answer(&mut s, 4), None);
        assert_eq!(s.selected_option, None);
    }

    #[test]
    fn wrong_pick_deactivates() {
        let mut s = level_state();
        s.score = 40;
        s.options = vec![AnswerOption { text: "狗".into(), is_correct: false }];
        assert_eq!(submit_answer(&mut s, 0), Some(false));
        assert!(!s.is_active);
        assert_eq!(s.score, 40);
    }
}
