// src/learn/report.rs
use std::fmt;

use super::record::LearningRecord;
use crate::table::Table;

/// Session totals over a working set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_items: usize,
    pub items_attempted: usize,
    pub total_tries: u64,
    pub total_correct: u64,
}

pub fn summarize(records: &[LearningRecord]) -> Summary {
    records.iter().fold(
        Summary { total_items: records.len(), ..Default::default() },
        |mut s, r| {
            if r.session_tries > 0 {
                s.items_attempted += 1;
            }
            s.total_tries += u64::from(r.session_tries);
            s.total_correct += u64::from(r.session_correct);
            s
        },
    )
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total words: {}", self.total_items)?;
        writeln!(f, "Words attempted: {}", self.items_attempted)?;
        writeln!(f, "Total tries: {}", self.total_tries)?;
        write!(f, "Total correct: {}", self.total_correct)
    }
}

/// Full per-item table of a working set, session counters included.
pub fn record_table(records: &[LearningRecord]) -> Table {
    let mut t = Table::new(row![
        "Word", "Type", "Attempts", "Streak", "Status", "Session tries", "Session correct"
    ]);
    for r in records {
        t.rows.push(row![
            r.id.word,
            r.id.kind,
            r.attempts_total,
            r.current_streak,
            r.status(),
            r.session_tries,
            r.session_correct
        ]);
    }
    t
}
