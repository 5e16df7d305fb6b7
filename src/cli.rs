// src/cli.rs
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{bail, Result, WrapErr};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use rand::seq::IndexedRandom;

use crate::config::consts::{DATA_DIR, SEPARATOR_WIDTH};
use crate::config::{DataPaths, SessionConfig};
use crate::error::{LearnError, LookupError, SessionError};
use crate::learn::group::{busiest, overview, GroupOverview};
use crate::learn::{self, RecordStore};
use crate::progress::Progress;
use crate::scrape::{collect_meanings, FetchOptions};
use crate::specs::dictionary::HttpDictionary;
use crate::specs::topics;
use crate::store;
use crate::term::{Palette, TerminalPrompter};

#[derive(Parser)]
#[command(name = "wordcards", about = "Vocabulary flashcards with spaced repetition", version)]
struct Cli {
    /// Directory holding the tables, config and pools
    #[arg(long, global = true, default_value = DATA_DIR)]
    data_dir: PathBuf,

    /// Config file (default: <data-dir>/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug log file (default: <data-dir>/debug.log)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a flashcard session on one group
    Learn {
        /// Group to study (0-based); the busiest group when omitted
        #[arg(short, long)]
        group: Option<usize>,
        /// Print the per-group status overview and exit
        #[arg(long)]
        status: bool,
        /// Shuffle the order meanings are shown in
        #[arg(long)]
        shuffle: bool,
        /// Disable colors
        #[arg(long)]
        no_color: bool,
        /// Dump the per-word table after the summary
        #[arg(long)]
        table: bool,
    },

    /// Look up meanings for new words and extend the meanings table
    Fetch {
        /// Extra words to look up
        #[arg(short = 'w', long = "add-words", num_args = 1..)]
        words: Vec<String>,
        /// Ignore the word list file; only use --add-words
        #[arg(long)]
        terminal_only: bool,
        /// Rebuild the meanings table from scratch
        #[arg(long)]
        reset: bool,
        /// Print the meanings of every added word
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print a random writing topic from a pool file
    Topic {
        /// Which pool to draw from
        #[arg(short = 't', long = "type", value_enum, default_value = "issue")]
        kind: TopicKind,
        /// Pool file to read instead of the default for --type
        #[arg(long)]
        pool: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TopicKind {
    Issue,
    Argument,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut paths = DataPaths::in_dir(&cli.data_dir);
    if let Some(p) = cli.config {
        paths.config = p;
    }
    if let Some(p) = cli.log_file {
        paths.log = p;
    }
    let level = if cli.debug { ::log::LevelFilter::Debug } else { ::log::LevelFilter::Info };
    crate::log::init(&paths.log, level);
    logf!("wordcards {} started", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Learn { group, status, shuffle, no_color, table } => {
            learn_cmd(&paths, group, status, shuffle, no_color, table)
        }
        Command::Fetch { words, terminal_only, reset, verbose } => {
            fetch_cmd(&paths, words, terminal_only, reset, verbose)
        }
        Command::Topic { kind, pool } => {
            let path = pool.unwrap_or(match kind {
                TopicKind::Issue => paths.issue_pool.clone(),
                TopicKind::Argument => paths.argument_pool.clone(),
            });
            topic_cmd(&path)
        }
    }
}

/* ---------------- learn ---------------- */

fn load_config(paths: &DataPaths) -> Result<SessionConfig> {
    if !paths.config.exists() {
        logw!("No config at {}; using defaults", paths.config.display());
        return Ok(SessionConfig::default());
    }
    Ok(SessionConfig::load(&paths.config)?)
}

fn learn_cmd(
    paths: &DataPaths,
    group: Option<usize>,
    status_only: bool,
    shuffle: bool,
    no_color: bool,
    dump_table: bool,
) -> Result<()> {
    let config = load_config(paths)?;
    let vocab = store::load_vocab(&paths.meanings)?;
    let mut records: RecordStore = store::load_records(&paths.records)?;

    records.reclassify(config.learn_threshold);
    let delta = records.reconcile(vocab.ids());
    if delta.added > 0 || delta.pruned > 0 {
        println!("Records updated: {} new, {} removed", delta.added, delta.pruned);
    }

    if status_only {
        print_overview(&overview(&records, config.group_size));
        store::save_records(&paths.records, &records)?;
        return Ok(());
    }

    if records.is_empty() {
        println!("Nothing to learn yet. Run `wordcards fetch` first.");
        store::save_records(&paths.records, &records)?;
        return Ok(());
    }

    let palette = if no_color { Palette::plain() } else { Palette::from_colors(&config.colors) };
    let mut prompter = TerminalPrompter::new(palette, shuffle, dump_table);
    let mut rng = rand::rng();

    match learn::run_session(&mut records, group, &config, &vocab, &mut prompter, &mut rng) {
        Ok(outcome) => {
            logd!("Session finished on group {}", outcome.group);
            store::save_records(&paths.records, &records)?;
            println!("All done. Nice.");
            Ok(())
        }
        Err(SessionError::Learn(e @ LearnError::OutOfRangeGroup { .. })) => {
            // nothing was touched; keep the file as it was
            Err(e).wrap_err("Pick a group with `wordcards learn --status`")
        }
        Err(e) => Err(e).wrap_err("Session aborted; records were not saved"),
    }
}

fn print_overview(groups: &[GroupOverview]) {
    let counts: Vec<usize> = groups.iter().map(GroupOverview::not_mastered).collect();
    let pick = busiest(&counts);
    println!("{:>5} {:>5} {:>11} {:>9} {:>9}", "Group", "Size", "Not learned", "Learning", "Mastered");
    for g in groups {
        let mark = if Some(g.index) == pick { " <" } else { "" };
        println!(
            "{:>5} {:>5} {:>11} {:>9} {:>9}{mark}",
            g.index, g.size, g.not_learned, g.learning, g.mastered
        );
    }
}

/* ---------------- fetch ---------------- */

/// One status line per word, overwritten in place.
struct CliProgress {
    total: usize,
    done: usize,
}

impl CliProgress {
    fn tick(&mut self, word: &str) {
        self.done += 1;
        let mut out = io::stdout();
        let line = format!("[{}/{}] {word}", self.done, self.total);
        let _ = queue!(out, Print("\r"), Clear(ClearType::CurrentLine), Print(line));
        let _ = out.flush();
    }
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, word: &str) {
        self.tick(word);
    }

    fn item_failed(&mut self, word: &str, error: &LookupError) {
        self.tick(word);
        println!();
        match error {
            LookupError::NotFound(_) => println!("Could not find {word}"),
            other => println!("Could not fetch {word}: {other}"),
        }
    }

    fn finish(&mut self) {
        if self.total > 0 {
            println!();
        }
    }
}

fn fetch_cmd(
    paths: &DataPaths,
    extra: Vec<String>,
    terminal_only: bool,
    reset: bool,
    verbose: bool,
) -> Result<()> {
    let mut words = if terminal_only {
        Vec::new()
    } else {
        store::load_word_list(&paths.words)
            .wrap_err_with(|| format!("Reading word list {}", paths.words.display()))?
    };
    words.extend(extra);

    let existing = if reset || !paths.meanings.exists() {
        None
    } else {
        Some(store::load_vocab(&paths.meanings)?)
    };

    let dict = HttpDictionary::new()?;
    let opts = FetchOptions { reset, ..FetchOptions::default() };
    let mut progress = CliProgress { total: 0, done: 0 };
    let report = collect_meanings(&words, existing, &dict, &opts, Some(&mut progress));

    if verbose {
        for item in &report.added {
            println!("{}", item.id);
            for (n, m) in item.meanings.iter().enumerate() {
                println!("  {}. {m}", n + 1);
            }
        }
    }

    store::save_vocab(&paths.meanings, &report.vocab)?;
    println!(
        "Added {} entries ({} not found, {} failed). Table now has {} entries.",
        report.added.len(),
        report.not_found.len(),
        report.failed.len(),
        report.vocab.len()
    );
    Ok(())
}

/* ---------------- topic ---------------- */

fn topic_cmd(path: &Path) -> Result<()> {
    let pool = topics::load_pool(path)
        .wrap_err_with(|| format!("Reading topic pool {}", path.display()))?;
    println!("Total topics built: {}", pool.len());

    let Some(topic) = pool.choose(&mut rand::rng()) else {
        bail!("No topics found in {}", path.display());
    };
    println!("\n{}\n", "-".repeat(SEPARATOR_WIDTH));
    print!("{topic}");
    Ok(())
}
