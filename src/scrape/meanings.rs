// src/scrape/meanings.rs
use std::{
    collections::HashSet,
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
    time::Duration,
};

use crate::{
    config::consts::{JITTER_MS, REQUEST_PAUSE_MS, WORKERS},
    error::LookupError,
    progress::Progress,
    specs::dictionary::{Lookup, Sense},
    vocab::{ItemId, Vocabulary, VocabularyItem},
};

#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub workers: usize,
    pub pause: Duration,
    /// Ignore the existing table and look every word up again.
    pub reset: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            workers: WORKERS,
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
            reset: false,
        }
    }
}

/// Result of one fetch batch.
#[derive(Clone, Debug, Default)]
pub struct FetchReport {
    /// Existing items followed by the newly fetched ones.
    pub vocab: Vocabulary,
    /// Words that were looked up this run.
    pub new_words: Vec<String>,
    pub added: Vec<VocabularyItem>,
    pub not_found: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Words to look up: trimmed, de-duplicated in input order, minus words the
/// existing table already has.
pub fn new_words(words: &[String], existing: Option<&Vocabulary>) -> Vec<String> {
    let known: HashSet<&str> = existing.map(|v| v.words()).unwrap_or_default();
    let mut seen = HashSet::new();
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty() && !known.contains(w))
        .filter(|w| seen.insert(*w))
        .map(str::to_string)
        .collect()
}

/// Look up every new word and append the results to the existing vocabulary.
/// Misses and failures are reported and skipped; they never abort the batch.
pub fn collect_meanings(
    words: &[String],
    existing: Option<Vocabulary>,
    lookup: &dyn Lookup,
    opts: &FetchOptions,
    mut progress: Option<&mut dyn Progress>,
) -> FetchReport {
    let existing = if opts.reset { None } else { existing };
    let todo = new_words(words, existing.as_ref());

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Number of new words: {}", todo.len()));
        p.begin(todo.len());
    }
    logf!("Fetching meanings for {} new words", todo.len());

    // Concurrency
    type FetchOk = (usize, Vec<Sense>);
    type FetchErr = (usize, LookupError);

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<Result<FetchOk, FetchErr>>();
    let workers = opts.workers.min(todo.len()).max(1);

    let mut results: Vec<(usize, Vec<Sense>)> = Vec::new();
    let mut report = FetchReport { new_words: todo.clone(), ..Default::default() };

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let (todo, counter) = (&todo, &counter);
            scope.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= todo.len() {
                        break;
                    }
                    let result = match lookup.lookup(&todo[i]) {
                        Ok(senses) => Ok((i, senses)),
                        Err(e) => Err((i, e)),
                    };
                    if tx.send(result).is_err() {
                        break;
                    }
                    if !opts.pause.is_zero() {
                        let jitter = (i as u64) % JITTER_MS;
                        thread::sleep(opts.pause + Duration::from_millis(jitter)); // be polite
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        // Aggregate results
        for msg in res_rx.iter() {
            match msg {
                Ok((i, senses)) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&todo[i]);
                    }
                    results.push((i, senses));
                }
                Err((i, e)) => {
                    let word = &todo[i];
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(word, &e);
                    }
                    if let LookupError::NotFound(_) = e {
                        logw!("Could not find {word}");
                        report.not_found.push(word.clone());
                    } else {
                        loge!("Lookup failed for {word}: {e}");
                        report.failed.push((word.clone(), e.to_string()));
                    }
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    // back to input order so the table is deterministic
    results.sort_by_key(|(i, _)| *i);
    report.not_found.sort_by_key(|w| todo.iter().position(|t| t == w));
    report.failed.sort_by_key(|(w, _)| todo.iter().position(|t| t == w));

    let mut vocab = existing.unwrap_or_default();
    let mut have: HashSet<ItemId> = vocab.ids().cloned().collect();
    for (i, senses) in results {
        for sense in senses {
            let id = ItemId::new(todo[i].clone(), sense.kind);
            if !have.insert(id.clone()) {
                continue;
            }
            let item = VocabularyItem { id, meanings: sense.meanings };
            report.added.push(item.clone());
            vocab.push(item);
        }
    }
    logf!(
        "Fetch done: {} items added, {} not found, {} failed",
        report.added.len(),
        report.not_found.len(),
        report.failed.len()
    );

    report.vocab = vocab;
    report
}
