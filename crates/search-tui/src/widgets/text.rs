//! Width-aware text helpers (terminal columns, not bytes or chars).

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `width` columns, ending with `…` when cut.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Greedy word wrap into lines of at most `width` columns. Words longer than
/// a line are split. Runs of whitespace (including newlines) collapse.
pub fn wrap(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_w = 0;

    for word in s.split_whitespace() {
        let word_w = word.width();
        let sep = if current.is_empty() { 0 } else { 1 };
        if current_w + sep + word_w <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_w += sep + word_w;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_w = 0;
        }
        if word_w <= width {
            current.push_str(word);
            current_w = word_w;
            continue;
        }
        // Hard-split an over-long word.
        for ch in word.chars() {
            let w = ch.width().unwrap_or(0);
            if current_w + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_w = 0;
            }
            current.push(ch);
            current_w += w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Skip the first `cols` columns of `s`.
pub fn skip_columns(s: &str, cols: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        if used >= cols {
            return &s[idx..];
        }
        used += ch.width().unwrap_or(0);
    }
    ""
}
