// tests/learn_core.rs
use std::collections::{HashSet, VecDeque};
use std::io;

use rand::SeedableRng;
use rand::rngs::StdRng;

use wordcards::config::{SessionConfig, Weights};
use wordcards::error::{LearnError, SessionError};
use wordcards::learn::group::{busiest, group_count, not_mastered_counts};
use wordcards::learn::status::weight_of_code;
use wordcards::learn::{
    classify, reconcile, run_session, select_group, weight, Card, Flow, Judgment, LearningRecord,
    Prompter, RecordStore, Session, SessionState, Status, Summary, WorkingSet,
};
use wordcards::vocab::{ItemId, Vocabulary, VocabularyItem};

fn id(word: &str) -> ItemId {
    ItemId::new(word, "Noun")
}

fn vocab(words: &[&str]) -> Vocabulary {
    Vocabulary::new(
        words
            .iter()
            .map(|w| VocabularyItem { id: id(w), meanings: vec![format!("meaning of {w}")] })
            .collect(),
    )
}

fn store_with(words: &[&str]) -> RecordStore {
    let v = vocab(words);
    reconcile(v.ids(), RecordStore::default())
}

fn config(threshold: u32, group_size: usize) -> SessionConfig {
    SessionConfig { learn_threshold: threshold, group_size, ..SessionConfig::default() }
}

/// Plays back a fixed list of answers, then cancels at the next show.
/// `cancel_at_judgment` cancels on the judgment prompt instead.
struct Scripted {
    answers: VecDeque<bool>,
    cancel_at_judgment: bool,
    shown: Vec<ItemId>,
    reported: Option<Summary>,
}

impl Scripted {
    fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            cancel_at_judgment: false,
            shown: Vec::new(),
            reported: None,
        }
    }
}

impl Prompter for Scripted {
    fn show(&mut self, card: &Card<'_>) -> io::Result<Flow> {
        if self.answers.is_empty() && !self.cancel_at_judgment {
            return Ok(Flow::Cancel);
        }
        self.shown.push(card.id.clone());
        Ok(Flow::Continue)
    }

    fn ask_correctness(&mut self) -> io::Result<Judgment> {
        Ok(match self.answers.pop_front() {
            Some(true) => Judgment::Correct,
            Some(false) => Judgment::Incorrect,
            None => Judgment::Cancel,
        })
    }

    fn report(&mut self, summary: &Summary, _working: &WorkingSet) -> io::Result<()> {
        self.reported = Some(*summary);
        Ok(())
    }
}

#[test]
fn classify_partitions_every_streak() {
    for t in 1..=6u32 {
        for s in 0..=10u32 {
            let got = classify(s, t);
            let want = if s == 0 {
                Status::NotLearned
            } else if s >= t {
                Status::Mastered
            } else {
                Status::Learning
            };
            assert_eq!(got, want, "streak {s} threshold {t}");
            assert_eq!(classify(s, t), got);
        }
    }
}

#[test]
fn reconcile_is_idempotent_and_total() {
    let old = store_with(&["alpha", "beta", "gamma"]);
    let v = vocab(&["gamma", "delta", "alpha", "epsilon"]);

    let once = reconcile(v.ids(), old);
    let twice = reconcile(v.ids(), once.clone());
    assert_eq!(once, twice);

    let wanted: HashSet<&ItemId> = v.ids().collect();
    let got: Vec<&ItemId> = once.records().iter().map(|r| &r.id).collect();
    assert_eq!(got.len(), wanted.len());
    assert_eq!(got.iter().copied().collect::<HashSet<_>>(), wanted);

    // survivors keep their order, new items go to the end in vocabulary order
    let words: Vec<&str> = got.iter().map(|i| i.word.as_str()).collect();
    assert_eq!(words, vec!["alpha", "gamma", "delta", "epsilon"]);
}

#[test]
fn reconcile_reports_delta_and_keeps_progress() {
    let mut store = store_with(&["alpha", "beta"]);
    let mut updated = store.records()[0].clone();
    updated.answer(true, 3);
    store.merge([updated]);

    let delta = store.reconcile(vocab(&["alpha", "zeta"]).ids());
    assert_eq!((delta.added, delta.pruned), (1, 1));
    let alpha = store.get(&id("alpha")).unwrap();
    assert_eq!(alpha.current_streak, 1);
    assert_eq!(store.get(&id("zeta")).unwrap().status(), Status::NotLearned);
}

#[test]
fn answers_move_the_streak() {
    let mut r = LearningRecord::restore(id("x"), 9, 5, Status::Mastered);
    r.answer(false, 3);
    assert_eq!(r.current_streak, 0);
    assert_eq!(r.status(), Status::NotLearned);
    r.answer(true, 3);
    assert_eq!(r.current_streak, 1);
    assert_eq!(r.status(), Status::Learning);
    assert_eq!(r.attempts_total, 11);
}

#[test]
fn explicit_group_is_a_positional_slice() {
    let words: Vec<String> = (0..23).map(|i| format!("w{i:02}")).collect();
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let store = store_with(&refs);

    assert_eq!(group_count(23, 10), 3);
    let g = select_group(&store, 10, Some(2)).unwrap();
    assert_eq!(g.index, 2);
    assert_eq!(g.records.len(), 3);
    assert_eq!(g.records[0].id, id("w20"));

    let g = select_group(&store, 10, Some(1)).unwrap();
    assert_eq!(g.records.first().unwrap().id, id("w10"));
    assert_eq!(g.records.last().unwrap().id, id("w19"));

    assert_eq!(
        select_group(&store, 10, Some(3)).unwrap_err(),
        LearnError::OutOfRangeGroup { group: 3, groups: 3 }
    );
}

#[test]
fn auto_select_picks_the_busiest_group() {
    assert_eq!(busiest(&[3, 7, 2]), Some(1));

    // groups of 4: 1 not mastered, 3 not mastered, 0 not mastered
    let words: Vec<String> = (0..12).map(|i| format!("w{i:02}")).collect();
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let base = store_with(&refs);
    let mastered: Vec<LearningRecord> = base
        .records()
        .iter()
        .enumerate()
        .filter(|(i, _)| matches!(i, 0..=2 | 4 | 8..=11))
        .map(|(_, r)| LearningRecord::restore(r.id.clone(), 3, 3, Status::Mastered))
        .collect();
    let mut store = base.clone();
    store.merge(mastered);

    assert_eq!(not_mastered_counts(store.records(), 4), vec![1, 3, 0]);
    assert_eq!(select_group(&store, 4, None).unwrap().index, 1);
}

#[test]
fn empty_store_has_no_group() {
    let store = RecordStore::default();
    assert!(matches!(
        select_group(&store, 5, None),
        Err(LearnError::OutOfRangeGroup { groups: 0, .. })
    ));
}

#[test]
fn scripted_session_updates_counters() {
    for (threshold, want) in [(3, Status::Learning), (5, Status::Learning), (2, Status::Mastered)] {
        let v = vocab(&["solo"]);
        let mut store = reconcile(v.ids(), RecordStore::default());
        let cfg = config(threshold, 10);
        let mut prompter = Scripted::new(&[true, false, true, true]);
        let mut rng = StdRng::seed_from_u64(7);

        let outcome =
            run_session(&mut store, Some(0), &cfg, &v, &mut prompter, &mut rng).unwrap();

        let r = store.get(&id("solo")).unwrap();
        assert_eq!(r.current_streak, 2);
        assert_eq!(r.attempts_total, 4);
        assert_eq!(r.session_tries, 4);
        assert_eq!(r.session_correct, 3);
        assert_eq!(r.status(), want, "threshold {threshold}");

        assert_eq!(prompter.shown.len(), 4);
        let summary = prompter.reported.unwrap();
        assert_eq!(summary, outcome.summary);
        assert_eq!(
            summary,
            Summary { total_items: 1, items_attempted: 1, total_tries: 4, total_correct: 3 }
        );
    }
}

#[test]
fn cancel_before_judgment_leaves_record_alone() {
    let v = vocab(&["solo"]);
    let mut store = reconcile(v.ids(), RecordStore::default());
    let cfg = config(3, 10);

    let mut prompter = Scripted::new(&[true]);
    prompter.cancel_at_judgment = true;
    let mut rng = StdRng::seed_from_u64(1);
    run_session(&mut store, None, &cfg, &v, &mut prompter, &mut rng).unwrap();

    // one completed exchange, then a show followed by a cancelled judgment
    assert_eq!(prompter.shown.len(), 2);
    let r = store.get(&id("solo")).unwrap();
    assert_eq!(r.attempts_total, 1);
    assert_eq!(r.current_streak, 1);
    assert_eq!(r.session_tries, 1);
}

#[test]
fn session_steps_through_states() {
    let v = vocab(&["a", "b"]);
    let store = reconcile(v.ids(), RecordStore::default());
    let cfg = config(3, 10);
    let working = select_group(&store, cfg.group_size, Some(0)).unwrap();
    let mut session = Session::new(working, &cfg, &v);
    let mut prompter = Scripted::new(&[false]);
    let mut rng = StdRng::seed_from_u64(42);

    assert_eq!(session.state(), SessionState::Idle);
    let SessionState::Presenting(ix) = session.step(&mut prompter, &mut rng).unwrap() else {
        panic!("expected a card to be presented");
    };
    assert_eq!(session.step(&mut prompter, &mut rng).unwrap(), SessionState::AwaitingAnswer(ix));
    assert_eq!(
        session.step(&mut prompter, &mut rng).unwrap(),
        SessionState::Updating { ix, correct: false }
    );
    assert_eq!(session.step(&mut prompter, &mut rng).unwrap(), SessionState::Idle);
    assert_eq!(session.working_set().records[ix].attempts_total, 1);

    assert!(matches!(session.step(&mut prompter, &mut rng).unwrap(), SessionState::Presenting(_)));
    assert_eq!(session.step(&mut prompter, &mut rng).unwrap(), SessionState::Terminated);
    assert_eq!(session.step(&mut prompter, &mut rng).unwrap(), SessionState::Terminated);
}

#[test]
fn draws_favor_unlearned_items() {
    let v = vocab(&["fresh", "known"]);
    let mut store = reconcile(v.ids(), RecordStore::default());
    store.merge([LearningRecord::restore(id("known"), 5, 5, Status::Mastered)]);

    let cfg = SessionConfig {
        learn_weights: Weights { good: 1.0, neutral: 2.0, bad: 9.0 },
        ..config(3, 10)
    };
    let working = select_group(&store, cfg.group_size, None).unwrap();
    let session = Session::new(working, &cfg, &v);
    let mut rng = StdRng::seed_from_u64(2024);

    let fresh_hits = (0..1000).filter(|_| session.draw(&mut rng).unwrap() == 0).count();
    // expected share is 0.9
    assert!(fresh_hits > 800, "fresh drawn {fresh_hits} times");
}

#[test]
fn weights_follow_status() {
    let w = Weights { bad: 5.0, neutral: 2.0, good: 1.0 };
    assert_eq!(weight(Status::NotLearned, &w), 5.0);
    assert_eq!(weight(Status::Learning, &w), 2.0);
    assert_eq!(weight(Status::Mastered, &w), 1.0);
    assert_eq!(weight_of_code(-1, &w), Ok(5.0));
    assert_eq!(weight_of_code(2, &w), Err(LearnError::InvalidStatus(2)));
}

#[test]
fn merge_writes_back_by_identity() {
    let mut store = store_with(&["a", "b", "c"]);
    let mut b = store.get(&id("b")).unwrap().clone();
    b.answer(true, 3);
    let stranger = LearningRecord::new(id("zzz"));

    assert_eq!(store.merge([b.clone(), stranger]), 1);
    assert_eq!(store.get(&id("b")), Some(&b));
    assert_eq!(store.get(&id("a")).unwrap().attempts_total, 0);
    assert!(store.get(&id("zzz")).is_none());
    assert_eq!(store.len(), 3);
}

#[test]
fn invalid_config_fails_before_touching_the_store() {
    let v = vocab(&["a"]);
    let mut store = reconcile(v.ids(), RecordStore::default());
    let before = store.clone();
    let cfg = config(0, 10);
    let mut prompter = Scripted::new(&[true]);
    let mut rng = StdRng::seed_from_u64(0);

    let err = run_session(&mut store, None, &cfg, &v, &mut prompter, &mut rng).unwrap_err();
    assert!(matches!(err, SessionError::Learn(LearnError::Configuration(_))));
    assert_eq!(store, before);
    assert!(prompter.shown.is_empty());
}

#[test]
fn run_session_rederives_statuses_before_picking_a_group() {
    let v = vocab(&["a", "b", "c", "d"]);
    let mut store = reconcile(v.ids(), RecordStore::default());
    store.merge([
        LearningRecord::restore(id("a"), 3, 3, Status::Learning),
        LearningRecord::restore(id("b"), 3, 3, Status::Learning),
        LearningRecord::restore(id("d"), 9, 9, Status::Mastered),
    ]);
    let mut prompter = Scripted::new(&[]);
    let mut rng = StdRng::seed_from_u64(3);

    let outcome = run_session(&mut store, None, &config(3, 2), &v, &mut prompter, &mut rng).unwrap();
    assert_eq!(outcome.group, 1);
    assert_eq!(store.get(&id("a")).unwrap().status(), Status::Mastered);
}
