// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Each spec knows how to read one external source and nothing else:
//!
//! - `dictionary` – the dictionary JSON API: word → senses (type + meanings),
//!   plus the `Lookup` seam the fetch collector is written against.
//! - `topics` – writing-test topic pools: scraped HTML lines → topics.
//!
//! ## What does **not** live here
//! - **Persistence** – meanings and records tables are loaded and saved by `store`.
//! - **Batching / concurrency** – the fetch worker pool lives in `scrape`.
//!
//! ## Testing notes
//! - Specs are testable **offline** against captured payloads and fixture lines.
pub mod dictionary;
pub mod topics;
