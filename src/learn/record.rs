// src/learn/record.rs
//
// Per-item learning state and the ordered store that owns it.
// Store order is positional truth for grouping, so it is kept stable:
// reconciliation preserves existing order and appends new items at the end.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::status::{classify, Status};
use crate::config::consts::{COL_COUNT, COL_CURRENT, COL_STATUS, COL_TYPE, COL_WORD};
use crate::error::{LearnError, StoreError};
use crate::table::Table;
use crate::vocab::ItemId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearningRecord {
    pub id: ItemId,
    pub attempts_total: u32,
    pub current_streak: u32,
    status: Status,
    pub session_tries: u32,
    pub session_correct: u32,
}

impl LearningRecord {
    /// Fresh record: zero counters, not learned.
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            attempts_total: 0,
            current_streak: 0,
            status: Status::NotLearned,
            session_tries: 0,
            session_correct: 0,
        }
    }

    /// Record as persisted. Session counters always start at zero.
    pub fn restore(id: ItemId, attempts_total: u32, current_streak: u32, status: Status) -> Self {
        Self {
            id,
            attempts_total,
            current_streak,
            status,
            session_tries: 0,
            session_correct: 0,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Apply one judged answer. Correct extends the streak, incorrect resets it.
    pub fn answer(&mut self, correct: bool, learn_threshold: u32) {
        self.attempts_total = self.attempts_total.saturating_add(1);
        self.session_tries = self.session_tries.saturating_add(1);
        if correct {
            self.current_streak = self.current_streak.saturating_add(1);
            self.session_correct = self.session_correct.saturating_add(1);
        } else {
            self.current_streak = 0;
        }
        self.status = classify(self.current_streak, learn_threshold);
    }

    /// Re-derive the status from the streak. Returns true if it changed.
    pub fn reclassify(&mut self, learn_threshold: u32) -> bool {
        let derived = classify(self.current_streak, learn_threshold);
        let changed = derived != self.status;
        self.status = derived;
        changed
    }

    pub fn reset_session(&mut self) {
        self.session_tries = 0;
        self.session_correct = 0;
    }
}

/// What a reconciliation pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileDelta {
    pub added: usize,
    pub pruned: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<LearningRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<LearningRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[LearningRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn get(&self, id: &ItemId) -> Option<&LearningRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Align the store with the authoritative identity list: drop records whose
    /// identity is gone, append a fresh record for every identity without one.
    /// Running it twice with the same identities changes nothing the second time.
    pub fn reconcile<'a, I>(&mut self, vocab: I) -> ReconcileDelta
    where
        I: IntoIterator<Item = &'a ItemId>,
    {
        let wanted: Vec<&ItemId> = vocab.into_iter().collect();
        let wanted_set: HashSet<&ItemId> = wanted.iter().copied().collect();

        let before = self.records.len();
        // duplicates in the store are collapsed to their first occurrence
        let mut kept: HashSet<ItemId> = HashSet::with_capacity(before);
        self.records
            .retain(|r| wanted_set.contains(&r.id) && kept.insert(r.id.clone()));
        let pruned = before - self.records.len();

        let mut added = 0;
        for id in wanted {
            if kept.insert(id.clone()) {
                self.records.push(LearningRecord::new(id.clone()));
                added += 1;
            }
        }

        if added > 0 || pruned > 0 {
            logf!("Reconciled records: +{added} new, -{pruned} stale, {} total", self.records.len());
        }
        ReconcileDelta { added, pruned }
    }

    /// Bring every status in line with its streak under `learn_threshold`.
    /// Stored codes are only trusted to be valid, not to be current.
    pub fn reclassify(&mut self, learn_threshold: u32) -> usize {
        let changed = self
            .records
            .iter_mut()
            .map(|r| r.reclassify(learn_threshold))
            .filter(|&changed| changed)
            .count();
        if changed > 0 {
            logw!("Reclassified {changed} records whose stored status disagreed with their streak");
        }
        changed
    }

    /// Write updated records back by identity. Unknown identities are ignored;
    /// records not in `updated` keep their current values.
    pub fn merge<I>(&mut self, updated: I) -> usize
    where
        I: IntoIterator<Item = LearningRecord>,
    {
        let index: HashMap<ItemId, usize> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        let mut merged = 0;
        for rec in updated {
            match index.get(&rec.id) {
                Some(&ix) => {
                    self.records[ix] = rec;
                    merged += 1;
                }
                None => logw!("Merge skipped unknown record {}", rec.id),
            }
        }
        logd!("Merged {merged} records back into the store");
        merged
    }

    /* ---------------- Table mapping ---------------- */

    pub fn from_table(t: &Table, path: &Path) -> Result<Self, StoreError> {
        let word_ix = t.require(COL_WORD, path)?;
        let kind_ix = t.require(COL_TYPE, path)?;
        let count_ix = t.require(COL_COUNT, path)?;
        let current_ix = t.require(COL_CURRENT, path)?;
        let status_ix = t.require(COL_STATUS, path)?;

        let mut records = Vec::with_capacity(t.rows.len());
        for (n, row) in t.rows.iter().enumerate() {
            // header is line 1
            let line = n + 2;
            let int = |ix: usize, col: &str| -> Result<i64, StoreError> {
                let raw = Table::cell(row, ix).trim();
                raw.parse::<i64>().map_err(|_| StoreError::BadValue {
                    path: path.display().to_string(),
                    line,
                    column: s!(col),
                    value: s!(raw),
                })
            };

            let id = ItemId::new(Table::cell(row, word_ix), Table::cell(row, kind_ix));
            let count = int(count_ix, COL_COUNT)?;
            let current = int(current_ix, COL_CURRENT)?;
            let status = Status::from_code(int(status_ix, COL_STATUS)?)?;

            if current < 0 {
                return Err(LearnError::StreakUnderflow {
                    word: id.word,
                    kind: id.kind,
                    value: current,
                }
                .into());
            }
            let narrow = |v: i64, col: &str| -> Result<u32, StoreError> {
                u32::try_from(v).map_err(|_| StoreError::BadValue {
                    path: path.display().to_string(),
                    line,
                    column: s!(col),
                    value: v.to_string(),
                })
            };
            records.push(LearningRecord::restore(
                id,
                narrow(count, COL_COUNT)?,
                narrow(current, COL_CURRENT)?,
                status,
            ));
        }
        Ok(Self { records })
    }

    pub fn to_table(&self) -> Table {
        let mut t = Table::new(row![COL_WORD, COL_TYPE, COL_COUNT, COL_CURRENT, COL_STATUS]);
        for r in &self.records {
            t.rows.push(row![
                r.id.word,
                r.id.kind,
                r.attempts_total,
                r.current_streak,
                r.status.code()
            ]);
        }
        t
    }
}

/// Reconcile as a value-in, value-out step.
pub fn reconcile<'a, I>(vocab: I, mut store: RecordStore) -> RecordStore
where
    I: IntoIterator<Item = &'a ItemId>,
{
    store.reconcile(vocab);
    store
}
