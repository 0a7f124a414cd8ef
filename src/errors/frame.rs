//! Plain-text code frames for syntax errors

use crate::base::{Position, is_line_terminator};

const LINES_ABOVE: usize = 2;
const LINES_BELOW: usize = 3;

/// Render the lines around `loc` with a `>` gutter marker on the failing
/// line and a `^` under the failing column.
///
/// ```text
///   1 | function F() {
/// > 2 |   super();
///     |   ^
///   3 | }
/// ```
pub fn code_frame(text: &str, loc: Position) -> String {
    let lines = split_lines(text);
    let target = loc.line.clamp(1, lines.len().max(1));
    let first = target.saturating_sub(LINES_ABOVE).max(1);
    let last = (target + LINES_BELOW).min(lines.len());
    let width = last.to_string().len();

    let mut out = Vec::new();
    for number in first..=last {
        let line = lines[number - 1];
        let marker = if number == target { '>' } else { ' ' };
        let gutter = format!(" {number:>width$} |");
        if line.is_empty() {
            out.push(format!("{marker}{gutter}"));
        } else {
            out.push(format!("{marker}{gutter} {line}"));
        }

        if number == target {
            // Keep tabs so the caret lines up with the rendered line.
            let spacing: String = line
                .chars()
                .take(loc.column)
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            out.push(format!("  {:width$} | {spacing}^", ""));
        }
    }
    out.join("\n")
}

fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !is_line_terminator(c) {
            continue;
        }
        lines.push(&text[start..i]);
        let mut end = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                end = j + 1;
            }
        }
        start = end;
    }
    lines.push(&text[start..]);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_marks_line_and_column() {
        let frame = code_frame("function F() {\n  super();\n}", Position::new(2, 2));
        let expected = "  1 | function F() {\n> 2 |   super();\n    |   ^\n  3 | }";
        assert_eq!(frame, expected);
    }

    #[test]
    fn test_frame_limits_context() {
        let text = (1..=10).map(|n| format!("l{n}")).collect::<Vec<_>>().join("\n");
        let frame = code_frame(&text, Position::new(5, 0));
        let numbers: Vec<_> = frame
            .lines()
            .filter_map(|l| l.split('|').next())
            .map(str::trim)
            .map(|g| g.trim_start_matches('>').trim())
            .filter(|g| !g.is_empty())
            .collect();
        assert_eq!(numbers, ["3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn test_frame_pads_gutter() {
        let text = (1..=12).map(|n| format!("l{n}")).collect::<Vec<_>>().join("\n");
        let frame = code_frame(&text, Position::new(9, 1));
        assert!(frame.contains(">  9 | l9"));
        assert!(frame.contains("  10 | l10"));
        assert!(frame.contains("     |  ^"));
    }

    #[test]
    fn test_split_lines_crlf() {
        assert_eq!(split_lines("a\r\nb\rc\n"), ["a", "b", "c", ""]);
    }
}
