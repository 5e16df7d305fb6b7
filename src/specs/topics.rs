// src/specs/topics.rs
//! Scraping *spec* for writing-test topic pools.
//!
//! A pool file is scraped HTML, one element per line. A topic is one or more
//! `<p>` statement lines, a `<div…>` line that opens the instruction block,
//! then the instruction line itself:
//!
//! ```text
//! <p>Statement one.</p>
//! <p>Statement two.</p>          (optional, any number)
//! <div class="instruction">
//! <p>Write a response in which…</p>
//! </div>
//! ```
//!
//! Unrelated to the flashcard core; shares only the HTML helpers.

use std::fmt;
use std::io;
use std::path::Path;

use crate::core::html;
use crate::file;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Para,
    Div,
    DivClose,
    Other,
}

impl LineKind {
    pub fn of(line: &str) -> Self {
        if line.starts_with("<p>") {
            LineKind::Para
        } else if line.starts_with("<div") {
            LineKind::Div
        } else if line.ends_with("</div>") {
            LineKind::DivClose
        } else {
            LineKind::Other
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Statement,
    Instruction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic {
    pub statement: Vec<String>,
    pub instruction: Option<String>,
    stage: Stage,
}

impl Default for Topic {
    fn default() -> Self {
        Self { statement: Vec::new(), instruction: None, stage: Stage::Statement }
    }
}

impl Topic {
    /// Feed one line. Returns true when the topic is complete.
    ///
    /// Statement stage collects paragraphs; once there is at least one, a
    /// `<div` line switches to the instruction stage. The first line seen in
    /// the instruction stage always completes the topic, and becomes the
    /// instruction if it is a paragraph.
    pub fn update(&mut self, line: &str) -> bool {
        let kind = LineKind::of(line);
        match self.stage {
            Stage::Statement => {
                if kind == LineKind::Para {
                    self.statement.push(html::para_text(line));
                } else if !self.statement.is_empty() && kind == LineKind::Div {
                    self.stage = Stage::Instruction;
                }
                false
            }
            Stage::Instruction => {
                if kind == LineKind::Para {
                    self.instruction = Some(html::para_text(line));
                }
                true
            }
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.statement {
            writeln!(f, "{s}")?;
        }
        writeln!(f)?;
        if let Some(i) = &self.instruction {
            writeln!(f, "{i}")?;
        }
        Ok(())
    }
}

/// Accumulates complete topics from a stream of lines.
#[derive(Clone, Debug, Default)]
pub struct TopicBuffer {
    current: Option<Topic>,
    topics: Vec<Topic>,
}

impl TopicBuffer {
    pub fn build(&mut self, line: &str) {
        let topic = self.current.get_or_insert_with(Topic::default);
        if topic.update(line) {
            if let Some(done) = self.current.take() {
                self.topics.push(done);
            }
        }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn into_topics(self) -> Vec<Topic> {
        self.topics
    }
}

/// Run every line (trailing whitespace trimmed) through a fresh buffer.
pub fn extract<'a, I>(lines: I) -> Vec<Topic>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tb = TopicBuffer::default();
    for line in lines {
        tb.build(line.trim_end());
    }
    tb.into_topics()
}

pub fn load_pool(path: &Path) -> io::Result<Vec<Topic>> {
    let lines = file::read_trimmed_lines(path)?;
    let topics = extract(lines.iter().map(String::as_str));
    logf!("Built {} topics from {}", topics.len(), path.display());
    Ok(topics)
}
