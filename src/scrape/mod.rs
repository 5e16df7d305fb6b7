// src/scrape/mod.rs
mod meanings;

pub use meanings::{collect_meanings, new_words, FetchOptions, FetchReport};
