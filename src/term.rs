// src/term.rs
//
// Terminal side of a flashcard session: colored card output and line input
// where Ctrl-C / Esc cancel the prompt instead of killing the process.

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{queue, terminal};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::consts::SEPARATOR_WIDTH;
use crate::config::Colors;
use crate::learn::{Card, Flow, Judgment, Prompter, Status, Summary, WorkingSet};
use crate::learn::report::record_table;

/// Parse a color name such as `green` or `dark_red`.
pub fn parse_color(name: &str) -> Option<Color> {
    Color::try_from(name.trim().to_ascii_lowercase().as_str()).ok()
}

/// Status → color, or nothing when colors are off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    good: Option<Color>,
    neutral: Option<Color>,
    bad: Option<Color>,
}

impl Palette {
    pub fn from_colors(colors: &Colors) -> Self {
        Self {
            good: parse_color(&colors.good),
            neutral: parse_color(&colors.neutral),
            bad: parse_color(&colors.bad),
        }
    }

    pub fn plain() -> Self {
        Self::default()
    }

    pub fn for_status(&self, status: Status) -> Option<Color> {
        match status {
            Status::Mastered => self.good,
            Status::Learning => self.neutral,
            Status::NotLearned => self.bad,
        }
    }
}

/// Disables raw mode on drop, even on early return.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Read one line. `None` means the user cancelled (Ctrl-C, Esc, or EOF).
pub fn read_line_cancellable() -> io::Result<Option<String>> {
    if !io::stdin().is_terminal() {
        let mut line = s!();
        let n = io::stdin().lock().read_line(&mut line)?;
        return Ok(if n == 0 { None } else { Some(line.trim_end().to_string()) });
    }

    let _raw = RawMode::enable()?;
    let mut out = io::stdout();
    let mut buf = s!();
    loop {
        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                queue!(out, Print("^C\r\n"))?;
                out.flush()?;
                return Ok(None);
            }
            KeyCode::Char('d') if ctrl && buf.is_empty() => {
                queue!(out, Print("\r\n"))?;
                out.flush()?;
                return Ok(None);
            }
            KeyCode::Esc => {
                queue!(out, Print("\r\n"))?;
                out.flush()?;
                return Ok(None);
            }
            KeyCode::Enter => {
                queue!(out, Print("\r\n"))?;
                out.flush()?;
                return Ok(Some(buf));
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    queue!(out, Print("\x08 \x08"))?;
                }
            }
            KeyCode::Char(c) if !ctrl => {
                buf.push(c);
                queue!(out, Print(c))?;
            }
            _ => {}
        }
        out.flush()?;
    }
}

/// `0` is incorrect, any other integer is correct, anything else is not an answer.
pub fn parse_judgment(text: &str) -> Option<bool> {
    text.trim().parse::<i64>().ok().map(|n| n != 0)
}

/// Numbered meaning lines. Numbers follow the order shown, shuffled or not.
pub fn meaning_lines<R: Rng + ?Sized>(meanings: &[String], shuffle: bool, rng: &mut R) -> Vec<String> {
    let mut shown: Vec<&String> = meanings.iter().collect();
    if shuffle {
        shown.shuffle(rng);
    }
    shown
        .into_iter()
        .enumerate()
        .map(|(pos, m)| format!("Meaning {} : {m}", pos + 1))
        .collect()
}

pub struct TerminalPrompter {
    palette: Palette,
    shuffle: bool,
    dump_table: bool,
    // answer typed early at the "show meaning" prompt
    pending: Option<bool>,
}

impl TerminalPrompter {
    pub fn new(palette: Palette, shuffle: bool, dump_table: bool) -> Self {
        Self { palette, shuffle, dump_table, pending: None }
    }

    fn separator(&self) -> io::Result<()> {
        println!("\n{}\n", "-".repeat(SEPARATOR_WIDTH));
        Ok(())
    }

    fn cancelled(&mut self) -> io::Result<()> {
        self.pending = None;
        println!("Cancelled.");
        self.separator()
    }

    fn print_colored(&self, text: &str, color: Option<Color>) -> io::Result<()> {
        let mut out = io::stdout();
        match color {
            Some(c) => queue!(out, SetForegroundColor(c), Print(text), ResetColor, Print("\n"))?,
            None => queue!(out, Print(text), Print("\n"))?,
        }
        out.flush()
    }
}

impl Prompter for TerminalPrompter {
    fn show(&mut self, card: &Card<'_>) -> io::Result<Flow> {
        self.pending = None;
        self.print_colored(&card.id.word, self.palette.for_status(card.status))?;
        println!("{}", card.id.kind);
        println!("Press Enter to show meaning");

        let Some(line) = read_line_cancellable()? else {
            self.cancelled()?;
            return Ok(Flow::Cancel);
        };
        self.pending = parse_judgment(&line);

        for line in meaning_lines(card.meanings, self.shuffle, &mut rand::rng()) {
            println!("{line}");
        }
        println!();
        Ok(Flow::Continue)
    }

    fn ask_correctness(&mut self) -> io::Result<Judgment> {
        let correct = match self.pending.take() {
            Some(c) => c,
            None => {
                println!("Press 0 for incorrect, any other number for correct.");
                loop {
                    let Some(line) = read_line_cancellable()? else {
                        self.cancelled()?;
                        return Ok(Judgment::Cancel);
                    };
                    match parse_judgment(&line) {
                        Some(c) => break c,
                        None => println!("Invalid input. Please enter an integer value."),
                    }
                }
            }
        };
        self.separator()?;
        Ok(if correct { Judgment::Correct } else { Judgment::Incorrect })
    }

    fn report(&mut self, summary: &Summary, working: &WorkingSet) -> io::Result<()> {
        println!("Learning Over.");
        println!("Group {}", working.index);
        println!("{summary}");
        if self.dump_table {
            println!();
            print!("{}", crate::table::to_string(&record_table(&working.records)));
        }
        io::stdout().flush()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn judgment_parsing_follows_zero_is_wrong() {
        assert_eq!(parse_judgment("0"), Some(false));
        assert_eq!(parse_judgment(" 7 "), Some(true));
        assert_eq!(parse_judgment("-1"), Some(true));
        assert_eq!(parse_judgment(""), None);
        assert_eq!(parse_judgment("yes"), None);
    }

    #[test]
    fn color_names_are_case_insensitive() {
        assert_eq!(parse_color("Green"), Some(Color::Green));
        assert_eq!(parse_color("dark_red"), Some(Color::DarkRed));
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn plain_palette_has_no_colors() {
        let p = Palette::plain();
        assert!(Status::ALL.iter().all(|s| p.for_status(*s).is_none()));
    }

    #[test]
    fn shuffled_meanings_are_numbered_by_position() {
        let meanings: Vec<String> = (0..8).map(|i| format!("sense {i}")).collect();
        let mut rng = StdRng::seed_from_u64(11);
        let lines = meaning_lines(&meanings, true, &mut rng);

        assert_eq!(lines.len(), meanings.len());
        let mut texts = Vec::new();
        for (pos, line) in lines.iter().enumerate() {
            let prefix = format!("Meaning {} : ", pos + 1);
            let text = line.strip_prefix(&prefix).unwrap_or_else(|| panic!("bad label: {line}"));
            texts.push(text.to_string());
        }
        texts.sort();
        assert_eq!(texts, meanings);
    }

    #[test]
    fn unshuffled_meanings_keep_their_order() {
        let meanings = vec!["to lessen".to_string(), "to subside".to_string()];
        let lines = meaning_lines(&meanings, false, &mut StdRng::seed_from_u64(0));
        assert_eq!(lines, vec!["Meaning 1 : to lessen", "Meaning 2 : to subside"]);
    }
}
