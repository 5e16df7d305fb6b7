// src/core/html.rs
// Line-level helpers for scraped HTML fragments. Deliberately naive: the pool
// files hold one tag-wrapped element per line.

/// Inner text of a `<p>…</p>` line. The wrapper is removed only where present.
pub fn unwrap_para(line: &str) -> &str {
    let inner = line.strip_prefix("<p>").unwrap_or(line);
    inner.strip_suffix("</p>").unwrap_or(inner)
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Visible text of a paragraph line: wrapper off, inline tags off, entities decoded.
pub fn para_text(line: &str) -> String {
    let text = super::sanitize::normalize_entities(&strip_tags(unwrap_para(line)));
    super::sanitize::normalize_ws(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_para_only_strips_what_is_there() {
        assert_eq!(unwrap_para("<p>Hello</p>"), "Hello");
        assert_eq!(unwrap_para("<p>Hello"), "Hello");
        assert_eq!(unwrap_para("Hello"), "Hello");
    }

    #[test]
    fn para_text_drops_inline_markup() {
        assert_eq!(para_text("<p>Some <em>people</em>&nbsp;believe</p>"), "Some people believe");
        assert_eq!(para_text("<p>a &lt; b</p>"), "a < b");
    }
}
