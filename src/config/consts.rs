// src/config/consts.rs

// Local data
pub const DATA_DIR: &str = "data";
pub const WORDS_FILE: &str = "words.csv";
pub const MEANINGS_FILE: &str = "meanings.csv";
pub const RECORDS_FILE: &str = "flashcard_data.csv";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "debug.log";
pub const ISSUE_POOL_FILE: &str = "issue_pool.txt";
pub const ARGUMENT_POOL_FILE: &str = "argument_pool.txt";

// Table columns
pub const COL_WORD: &str = "Word";
pub const COL_TYPE: &str = "Type";
pub const COL_MEANING_PREFIX: &str = "Meaning ";
pub const COL_COUNT: &str = "count";
pub const COL_CURRENT: &str = "current";
pub const COL_STATUS: &str = "status";

// Net config
pub const DICT_HOST: &str = "https://api.dictionaryapi.dev";
pub const DICT_PREFIX: &str = "/api/v2/entries/en/";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms

// Terminal
pub const SEPARATOR_WIDTH: usize = 80;
