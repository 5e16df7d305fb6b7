// src/vocab.rs
//
// The meanings table: one row per (word, type), meanings in "Meaning N"
// columns. Read-only to the learning core, which only needs identities and
// how many meanings there are to print.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::config::consts::{COL_MEANING_PREFIX, COL_TYPE, COL_WORD};
use crate::error::StoreError;
use crate::table::Table;

/// Stable identity of a vocabulary entry: the word plus its grammatical type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    pub word: String,
    pub kind: String,
}

impl ItemId {
    pub fn new(word: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { word: word.into(), kind: kind.into() }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.word, self.kind)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabularyItem {
    pub id: ItemId,
    pub meanings: Vec<String>,
}

/// Ordered vocabulary, in table order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
    items: Vec<VocabularyItem>,
}

impl Vocabulary {
    pub fn new(items: Vec<VocabularyItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[VocabularyItem] { &self.items }
    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter().map(|i| &i.id)
    }

    /// Distinct word texts, for "is this word already fetched?" checks.
    pub fn words(&self) -> HashSet<&str> {
        self.items.iter().map(|i| i.id.word.as_str()).collect()
    }

    pub fn push(&mut self, item: VocabularyItem) {
        self.items.push(item);
    }

    /// Largest meaning count across all items; sets the column width on save.
    pub fn max_meanings(&self) -> usize {
        self.items.iter().map(|i| i.meanings.len()).max().unwrap_or(0)
    }

    /* ---------------- Table mapping ---------------- */

    /// Build from a meanings table. Duplicate identities keep the first row.
    pub fn from_table(t: &Table, path: &Path) -> Result<Self, StoreError> {
        let word_ix = t.require(COL_WORD, path)?;
        let kind_ix = t.require(COL_TYPE, path)?;
        let meaning_cols: Vec<usize> = t
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.starts_with(COL_MEANING_PREFIX))
            .map(|(i, _)| i)
            .collect();

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(t.rows.len());
        for row in &t.rows {
            let id = ItemId::new(Table::cell(row, word_ix), Table::cell(row, kind_ix));
            if id.word.is_empty() {
                continue;
            }
            if !seen.insert(id.clone()) {
                logw!("Duplicate vocabulary row {id} in {}; keeping the first", path.display());
                continue;
            }
            // meanings stop at the first empty cell
            let meanings = meaning_cols
                .iter()
                .map(|&ix| Table::cell(row, ix))
                .take_while(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
            items.push(VocabularyItem { id, meanings });
        }
        Ok(Self { items })
    }

    pub fn to_table(&self) -> Table {
        let width = self.max_meanings();
        let mut headers = vec![s!(COL_WORD), s!(COL_TYPE)];
        headers.extend((1..=width).map(|n| format!("{COL_MEANING_PREFIX}{n}")));

        let mut t = Table::new(headers);
        for item in &self.items {
            let mut row = row![item.id.word, item.id.kind];
            row.extend(item.meanings.iter().cloned());
            row.resize(width + 2, s!());
            t.rows.push(row);
        }
        t
    }
}
