// src/store.rs
//
// Loading and saving the on-disk tables. A missing file is an empty dataset;
// a malformed one is an error naming the file.

use std::path::Path;

use crate::config::consts::COL_WORD;
use crate::error::StoreError;
use crate::learn::RecordStore;
use crate::table::{self, Table};
use crate::vocab::Vocabulary;

/// Meanings table, or an empty vocabulary when the file does not exist yet.
pub fn load_vocab(path: &Path) -> Result<Vocabulary, StoreError> {
    match table::read_table(path)? {
        Some(t) => {
            let v = Vocabulary::from_table(&t, path)?;
            logd!("Loaded {} vocabulary items from {}", v.len(), path.display());
            Ok(v)
        }
        None => {
            logw!("No meanings table at {}; starting empty", path.display());
            Ok(Vocabulary::default())
        }
    }
}

pub fn save_vocab(path: &Path, vocab: &Vocabulary) -> Result<(), StoreError> {
    table::save_table(path, &vocab.to_table())?;
    logf!("Saved {} vocabulary items to {}", vocab.len(), path.display());
    Ok(())
}

/// Records table, or an empty store on first run.
pub fn load_records(path: &Path) -> Result<RecordStore, StoreError> {
    match table::read_table(path)? {
        Some(t) => {
            let store = RecordStore::from_table(&t, path)?;
            logd!("Loaded {} records from {}", store.len(), path.display());
            Ok(store)
        }
        None => Ok(RecordStore::default()),
    }
}

pub fn save_records(path: &Path, store: &RecordStore) -> Result<(), StoreError> {
    table::save_table(path, &store.to_table())?;
    logf!("Saved {} records to {}", store.len(), path.display());
    Ok(())
}

/// The `Word` column of the input word list, blanks dropped.
pub fn load_word_list(path: &Path) -> Result<Vec<String>, StoreError> {
    let Some(t) = table::read_table(path)? else {
        return Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Word list not found: {}", path.display()),
        )));
    };
    word_column(&t, path)
}

fn word_column(t: &Table, path: &Path) -> Result<Vec<String>, StoreError> {
    let ix = t.require(COL_WORD, path)?;
    Ok(t
        .rows
        .iter()
        .map(|r| Table::cell(r, ix).trim())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect())
}
