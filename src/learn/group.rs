// src/learn/group.rs
//
// Fixed-size positional groups over the record store. A session works on an
// owned copy of one group (the working set) and hands it back through
// `RecordStore::merge`, which matches by identity, never by position.

use super::record::{LearningRecord, RecordStore};
use super::status::Status;
use crate::error::LearnError;

/// Owned records of the active group plus where they came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingSet {
    pub index: usize,
    pub records: Vec<LearningRecord>,
}

impl WorkingSet {
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Give the records back, for `RecordStore::merge`.
    pub fn into_records(self) -> Vec<LearningRecord> {
        self.records
    }
}

/// Number of groups: ceil(n / size).
pub fn group_count(n: usize, group_size: usize) -> usize {
    if group_size == 0 { 0 } else { n.div_ceil(group_size) }
}

/// Not-mastered count per group, in group order.
pub fn not_mastered_counts(records: &[LearningRecord], group_size: usize) -> Vec<usize> {
    if group_size == 0 {
        return Vec::new();
    }
    records
        .chunks(group_size)
        .map(|g| g.iter().filter(|r| !r.status().is_mastered()).count())
        .collect()
}

/// Index of the largest count. Strict `>` so the first group at the max wins.
pub fn busiest(counts: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, &c) in counts.iter().enumerate() {
        match best {
            Some((_, max)) if c <= max => {}
            _ => best = Some((i, c)),
        }
    }
    best.map(|(i, _)| i)
}

/// Pick the active group and copy its records out.
/// An explicit `group_num` must be below the group count; without one, the
/// group with the most not-mastered records is chosen.
pub fn select_group(
    store: &RecordStore,
    group_size: usize,
    group_num: Option<usize>,
) -> Result<WorkingSet, LearnError> {
    if group_size == 0 {
        return Err(LearnError::Configuration(s!("group_size must be positive")));
    }
    let records = store.records();
    let groups = group_count(records.len(), group_size);

    let index = match group_num {
        Some(k) if k < groups => k,
        Some(k) => return Err(LearnError::OutOfRangeGroup { group: k, groups }),
        None => {
            let counts = not_mastered_counts(records, group_size);
            match busiest(&counts) {
                Some(i) => {
                    logd!("Not-mastered counts per group: {counts:?}");
                    i
                }
                None => return Err(LearnError::OutOfRangeGroup { group: 0, groups }),
            }
        }
    };

    let start = index * group_size;
    let end = (start + group_size).min(records.len());
    logf!("Selected group {index} of {groups} (records {start}..{end})");
    Ok(WorkingSet { index, records: records[start..end].to_vec() })
}

/// Per-group status breakdown, for the status-only view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupOverview {
    pub index: usize,
    pub size: usize,
    pub not_learned: usize,
    pub learning: usize,
    pub mastered: usize,
}

impl GroupOverview {
    pub fn not_mastered(&self) -> usize {
        self.not_learned + self.learning
    }
}

pub fn overview(store: &RecordStore, group_size: usize) -> Vec<GroupOverview> {
    if group_size == 0 {
        return Vec::new();
    }
    store
        .records()
        .chunks(group_size)
        .enumerate()
        .map(|(index, g)| {
            let mut o = GroupOverview { index, size: g.len(), ..Default::default() };
            for r in g {
                match r.status() {
                    Status::NotLearned => o.not_learned += 1,
                    Status::Learning => o.learning += 1,
                    Status::Mastered => o.mastered += 1,
                }
            }
            o
        })
        .collect()
}
