// src/specs/dictionary.rs
//! Scraping *spec* for the dictionary API.
//!
//! Purpose:
//! - GET `/api/v2/entries/en/<word>` and read the JSON payload.
//! - Group definitions by part of speech, first-seen order, type capitalized
//!   (`noun` → `Noun`).
//!
//! Non-Responsibilities:
//! - **No merging** into the meanings table (see `scrape::meanings`).
//! - **No retries**; a failed word is reported and skipped by the caller.

use serde::Deserialize;

use reqwest::blocking::Client;

use crate::config::consts::{DICT_HOST, DICT_PREFIX};
use crate::core::{net, sanitize};
use crate::error::LookupError;

/// All meanings of one word for one grammatical type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sense {
    pub kind: String,
    pub meanings: Vec<String>,
}

/// Word → senses. Implementations are shared across fetch workers.
pub trait Lookup: Sync {
    fn lookup(&self, word: &str) -> Result<Vec<Sense>, LookupError>;
}

/* ---------- payload ---------- */

#[derive(Deserialize)]
struct Entry {
    #[serde(default)]
    meanings: Vec<EntryMeaning>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryMeaning {
    #[serde(default)]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Deserialize)]
struct Definition {
    definition: String,
}

/// Parse an API payload into senses. Empty definitions are dropped, and so
/// are types left with no definitions.
pub fn parse_entries(json: &str) -> Result<Vec<Sense>, LookupError> {
    let entries: Vec<Entry> = serde_json::from_str(json)?;

    let mut senses: Vec<Sense> = Vec::new();
    for m in entries.into_iter().flat_map(|e| e.meanings) {
        let kind = sanitize::capitalize(&m.part_of_speech);
        if kind.is_empty() {
            continue;
        }
        let defs = m
            .definitions
            .into_iter()
            .map(|d| sanitize::normalize_ws(&d.definition))
            .filter(|d| !d.is_empty());

        match senses.iter_mut().find(|s| s.kind == kind) {
            Some(s) => s.meanings.extend(defs),
            None => senses.push(Sense { kind, meanings: defs.collect() }),
        }
    }
    senses.retain(|s| !s.meanings.is_empty());
    Ok(senses)
}

pub fn entry_url(word: &str) -> String {
    format!("{DICT_HOST}{DICT_PREFIX}{}", urlencoding::encode(word.trim()))
}

/// The public dictionary API over HTTPS.
pub struct HttpDictionary {
    client: Client,
}

impl HttpDictionary {
    pub fn new() -> Result<Self, LookupError> {
        Ok(Self { client: net::http_client()? })
    }
}

impl Lookup for HttpDictionary {
    fn lookup(&self, word: &str) -> Result<Vec<Sense>, LookupError> {
        let url = entry_url(word);
        let body = net::http_get(&self.client, &url)?
            .ok_or_else(|| LookupError::NotFound(s!(word)))?;
        let senses = parse_entries(&body)?;
        if senses.is_empty() {
            return Err(LookupError::NotFound(s!(word)));
        }
        Ok(senses)
    }
}
