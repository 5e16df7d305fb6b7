// src/learn/session.rs
//
// The flashcard loop as an explicit state machine:
//
//   Idle -> Presenting -> AwaitingAnswer -> Updating -> Idle ...
//     any prompt may answer Cancel -> Terminated
//
// A record is only touched in `Updating`, which is entered after a judgment has
// been fully received, so a cancel at either prompt leaves the in-flight record
// exactly as it was.

use std::collections::HashMap;
use std::io;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use super::group::{select_group, WorkingSet};
use super::record::RecordStore;
use super::report::{summarize, Summary};
use super::status::{weight, Status};
use crate::config::SessionConfig;
use crate::error::{LearnError, SessionError};
use crate::vocab::{ItemId, Vocabulary};

/// What the prompter shows for one draw.
#[derive(Clone, Copy, Debug)]
pub struct Card<'a> {
    pub id: &'a ItemId,
    pub meanings: &'a [String],
    pub status: Status,
}

/// Result of the first prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Cancel,
}

/// Result of the judgment prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Judgment {
    Correct,
    Incorrect,
    Cancel,
}

/// Presentation + input. Both prompts block until the user acts; returning
/// `Cancel` from either one is the session's interruption signal.
pub trait Prompter {
    fn show(&mut self, card: &Card<'_>) -> io::Result<Flow>;

    fn ask_correctness(&mut self) -> io::Result<Judgment>;

    /// Called once after termination, before the working set is merged back.
    fn report(&mut self, _summary: &Summary, _working: &WorkingSet) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Presenting(usize),
    AwaitingAnswer(usize),
    Updating { ix: usize, correct: bool },
    Terminated,
}

pub struct Session<'a> {
    working: WorkingSet,
    config: &'a SessionConfig,
    meanings: HashMap<&'a ItemId, &'a [String]>,
    state: SessionState,
}

impl<'a> Session<'a> {
    /// Start a session on `working`. Session counters are zeroed here.
    pub fn new(mut working: WorkingSet, config: &'a SessionConfig, vocab: &'a Vocabulary) -> Self {
        for r in &mut working.records {
            r.reset_session();
        }
        let meanings = vocab
            .items()
            .iter()
            .map(|i| (&i.id, i.meanings.as_slice()))
            .collect();
        Self { working, config, meanings, state: SessionState::Idle }
    }

    pub fn state(&self) -> SessionState { self.state }
    pub fn working_set(&self) -> &WorkingSet { &self.working }

    pub fn into_working_set(self) -> WorkingSet {
        self.working
    }

    /// Pick one record index, weighted by status. Draws are with replacement.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize, LearnError> {
        let weights = &self.config.learn_weights;
        let dist = WeightedIndex::new(
            self.working.records.iter().map(|r| weight(r.status(), weights)),
        )
        .map_err(|e| LearnError::Configuration(format!("cannot draw from group: {e}")))?;
        Ok(dist.sample(rng))
    }

    fn card(&self, ix: usize) -> Card<'_> {
        let r = &self.working.records[ix];
        Card {
            id: &r.id,
            meanings: self.meanings.get(&r.id).copied().unwrap_or(&[]),
            status: r.status(),
        }
    }

    /// Advance one transition.
    pub fn step<P, R>(&mut self, prompter: &mut P, rng: &mut R) -> Result<SessionState, SessionError>
    where
        P: Prompter + ?Sized,
        R: Rng + ?Sized,
    {
        let next = match self.state {
            SessionState::Idle => SessionState::Presenting(self.draw(rng)?),
            SessionState::Presenting(ix) => match prompter.show(&self.card(ix))? {
                Flow::Continue => SessionState::AwaitingAnswer(ix),
                Flow::Cancel => SessionState::Terminated,
            },
            SessionState::AwaitingAnswer(ix) => match prompter.ask_correctness()? {
                Judgment::Correct => SessionState::Updating { ix, correct: true },
                Judgment::Incorrect => SessionState::Updating { ix, correct: false },
                Judgment::Cancel => SessionState::Terminated,
            },
            SessionState::Updating { ix, correct } => {
                let threshold = self.config.learn_threshold;
                let rec = &mut self.working.records[ix];
                rec.answer(correct, threshold);
                logd!(
                    "Answer {} for {}: streak={} attempts={} status={}",
                    if correct { "correct" } else { "incorrect" },
                    rec.id,
                    rec.current_streak,
                    rec.attempts_total,
                    rec.status()
                );
                SessionState::Idle
            }
            SessionState::Terminated => SessionState::Terminated,
        };
        self.state = next;
        Ok(next)
    }

    /// Loop until the prompter cancels.
    pub fn run<P, R>(&mut self, prompter: &mut P, rng: &mut R) -> Result<(), SessionError>
    where
        P: Prompter + ?Sized,
        R: Rng + ?Sized,
    {
        while self.step(&mut *prompter, &mut *rng)? != SessionState::Terminated {}
        logf!("Session on group {} terminated", self.working.index);
        Ok(())
    }
}

/// Where a finished session ran and how it went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub group: usize,
    pub summary: Summary,
}

/// Select a group, run the loop until cancelled, report, and merge the
/// working set back into `store` by identity.
///
/// Statuses are re-derived from streaks before the group is picked. Config
/// errors return before `store` is touched; a group error leaves only those
/// re-derived statuses behind. A failure inside the loop still merges every
/// answer that completed before it.
pub fn run_session<P, R>(
    store: &mut RecordStore,
    group_num: Option<usize>,
    config: &SessionConfig,
    vocab: &Vocabulary,
    prompter: &mut P,
    rng: &mut R,
) -> Result<SessionOutcome, SessionError>
where
    P: Prompter + ?Sized,
    R: Rng + ?Sized,
{
    config.validate()?;
    store.reclassify(config.learn_threshold);
    let working = select_group(store, config.group_size, group_num)?;
    let group = working.index;

    let mut session = Session::new(working, config, vocab);
    let ran = session.run(prompter, rng);
    let working = session.into_working_set();

    if let Err(e) = ran {
        loge!("Session on group {group} aborted: {e}");
        store.merge(working.into_records());
        return Err(e);
    }

    let summary = summarize(&working.records);
    let reported = prompter.report(&summary, &working);
    store.merge(working.into_records());
    reported?;

    logf!(
        "Session summary: {} tries, {} correct, {}/{} words attempted",
        summary.total_tries,
        summary.total_correct,
        summary.items_attempted,
        summary.total_items
    );
    Ok(SessionOutcome { group, summary })
}
