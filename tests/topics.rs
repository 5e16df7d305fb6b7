// tests/topics.rs
use std::fs;

use tempfile::tempdir;

use wordcards::specs::topics::{self, LineKind, Topic, TopicBuffer};

const POOL: &str = "\
<h2>Issue topics</h2>
<p>Governments should fund the arts.</p>
<div class=\"divider\">
<p>Write a response in which you discuss the extent to which you agree.</p>
</div>
<hr/>
<p>People who are <em>the best</em> leaders &amp; thinkers rarely follow.</p>
<p>Rules exist to be broken.</p>
<div class=\"instruction\">
<p>Discuss how the statement could be challenged.</p>
</div>
<div class=\"stray\">
<p>A statement with a broken instruction.</p>
<div>
</div>
";

#[test]
fn line_kinds() {
    assert_eq!(LineKind::of("<p>x</p>"), LineKind::Para);
    assert_eq!(LineKind::of("<div class=\"a\">"), LineKind::Div);
    assert_eq!(LineKind::of("  </div>"), LineKind::DivClose);
    assert_eq!(LineKind::of("<hr/>"), LineKind::Other);
}

#[test]
fn extracts_statement_and_instruction() {
    let topics = topics::extract(POOL.lines());
    assert_eq!(topics.len(), 3);

    assert_eq!(topics[0].statement, vec!["Governments should fund the arts."]);
    assert_eq!(
        topics[0].instruction.as_deref(),
        Some("Write a response in which you discuss the extent to which you agree.")
    );

    assert_eq!(
        topics[1].statement,
        vec!["People who are the best leaders & thinkers rarely follow.", "Rules exist to be broken."]
    );

    // the line after the div is not a paragraph: topic completes without one
    assert_eq!(topics[2].statement, vec!["A statement with a broken instruction."]);
    assert_eq!(topics[2].instruction, None);
}

#[test]
fn div_before_any_statement_is_ignored() {
    let mut t = Topic::default();
    assert!(!t.update("<div class=\"x\">"));
    assert!(!t.update("<p>Only now.</p>"));
    assert!(!t.update("<div>"));
    assert!(t.update("<p>Instruction.</p>"));
    assert_eq!(t.to_string(), "Only now.\n\nInstruction.\n");
}

#[test]
fn buffer_starts_a_fresh_topic_after_each_completion() {
    let mut tb = TopicBuffer::default();
    for line in ["<p>a</p>", "<div>", "<p>i</p>", "<p>b</p>"] {
        tb.build(line);
    }
    assert_eq!(tb.topics().len(), 1);
    tb.build("<div>");
    tb.build("<p>j</p>");
    let all = tb.into_topics();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].statement, vec!["b"]);
}

#[test]
fn load_pool_trims_trailing_whitespace() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("issue_pool.txt");
    fs::write(&path, "<p>Claim.</p>   \r\n<div>\t\n<p>Respond.</p>  \n").unwrap();

    let pool = topics::load_pool(&path).unwrap();
    assert_eq!(pool.len(), 1);
    assert_eq!(pool[0].statement, vec!["Claim."]);
    assert_eq!(pool[0].instruction.as_deref(), Some("Respond."));

    assert!(topics::load_pool(&dir.path().join("argument_pool.txt")).is_err());
}
