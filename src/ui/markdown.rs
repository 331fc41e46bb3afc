// Simple markdown rendering for terminal display

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Convert markdown text to ratatui Lines with styling
pub fn render_markdown_to_lines(markdown: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut in_code_block = false;

    for line in markdown.lines() {
        if is_code_fence(line) {
            if in_code_block {
                lines.push(Line::from(Span::styled(
                    "└──────────────────────────────────────",
                    Style::default().fg(Color::DarkGray),
                )));
            } else {
                let lang = extract_code_language(line);
                lines.push(Line::from(Span::styled(
                    format!("┌─ {} ─────────────────────────", lang.as_deref().unwrap_or("code")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            in_code_block = !in_code_block;
        } else if in_code_block {
            lines.push(Line::from(Span::styled(
                format!("  {line}"),
                Style::default().fg(Color::Green),
            )));
        } else {
            lines.push(render_markdown_line(line));
        }
    }

    lines
}

/// Check if a line is a markdown table row
pub fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed.ends_with('|') && trimmed.matches('|').count() >= 2
}

/// Check if a line is a table separator (|---|---|)
pub fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with('|') || !trimmed.ends_with('|') {
        return false;
    }

    trimmed.chars().all(|c| c == '|' || c == '-' || c == ' ' || c == ':')
}

fn render_table_row(line: &str) -> Line<'static> {
    let content = line.trim().trim_start_matches('|').trim_end_matches('|');
    let cells: Vec<&str> = content.split('|').map(str::trim).collect();

    Line::from(Span::styled(
        format!("  {}", cells.join(" | ")),
        Style::default().fg(Color::Cyan),
    ))
}

fn heading_style(level: usize) -> Style {
    let color = match level {
        1 => Color::Yellow,
        2 => Color::Cyan,
        _ => Color::Blue,
    };
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if level == 1 {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

/// Split `1. rest` into ("1.", "rest")
fn ordered_marker(line: &str) -> Option<(&str, &str)> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix(['.', ')'])?;
    let rest = rest.strip_prefix(' ')?;
    Some((&line[..=digits], rest))
}

/// Render a single line of markdown with basic styling
fn render_markdown_line(line: &str) -> Line<'static> {
    if is_table_separator(line) {
        // Separator rows are visual noise in a terminal
        return Line::from("");
    }

    if is_table_row(line) {
        return render_table_row(line);
    }

    let indent_width = line.len() - line.trim_start().len();
    let indent = " ".repeat(indent_width);
    let body = line.trim_start();

    // Headers: # ## ###
    if body.starts_with('#') {
        let level = body.chars().take_while(|&c| c == '#').count();
        let text = body[level..].trim();
        return Line::from(Span::styled(text.to_string(), heading_style(level)));
    }

    // Blockquote: > text
    if let Some(quote) = body.strip_prefix('>') {
        let quote_style = Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC);
        let mut spans = vec![
            Span::raw(indent),
            Span::styled("│ ", Style::default().fg(Color::Cyan)),
        ];
        spans.extend(
            render_inline(quote.trim_start())
                .into_iter()
                .map(|span| span.patch_style(quote_style)),
        );
        return Line::from(spans);
    }

    // List items: - item, * item, • item
    for bullet in ["- ", "* ", "• "] {
        if let Some(rest) = body.strip_prefix(bullet) {
            let mut spans = vec![
                Span::raw(indent),
                Span::styled("• ", Style::default().fg(Color::Cyan)),
            ];
            spans.extend(render_inline(rest.trim()));
            return Line::from(spans);
        }
    }

    // Ordered list items: 1. item
    if let Some((marker, rest)) = ordered_marker(body) {
        let mut spans = vec![
            Span::raw(indent),
            Span::styled(format!("{marker} "), Style::default().fg(Color::Cyan)),
        ];
        spans.extend(render_inline(rest.trim()));
        return Line::from(spans);
    }

    let spans = render_inline(line);
    if spans.is_empty() {
        Line::from("")
    } else {
        Line::from(spans)
    }
}

fn flush(spans: &mut Vec<Span<'static>>, current_text: &mut String) {
    if !current_text.is_empty() {
        spans.push(Span::raw(std::mem::take(current_text)));
    }
}

/// Style bold, italic and inline code inside a line of text.
fn render_inline(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current_text = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            // Bold: **text**
            '*' if chars.peek() == Some(&'*') => {
                chars.next();

                let mut bold_text = String::new();
                let mut found_close = false;
                while let Some(ch) = chars.next() {
                    if ch == '*' && chars.peek() == Some(&'*') {
                        chars.next();
                        found_close = true;
                        break;
                    }
                    bold_text.push(ch);
                }

                if found_close {
                    flush(&mut spans, &mut current_text);
                    spans.push(Span::styled(
                        bold_text,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ));
                } else {
                    current_text.push_str("**");
                    current_text.push_str(&bold_text);
                }
            }
            // Italic: *text* or _text_, but not `2 * 3` or snake_case
            '*' | '_'
                if chars.peek().is_some_and(|c| !c.is_whitespace())
                    && !current_text.ends_with(|c: char| c.is_alphanumeric()) =>
            {
                let mut italic_text = String::new();
                let mut found_close = false;
                for next in chars.by_ref() {
                    if next == ch {
                        found_close = true;
                        break;
                    }
                    italic_text.push(next);
                }

                if found_close && !italic_text.is_empty() {
                    flush(&mut spans, &mut current_text);
                    spans.push(Span::styled(
                        italic_text,
                        Style::default().add_modifier(Modifier::ITALIC),
                    ));
                } else {
                    current_text.push(ch);
                    current_text.push_str(&italic_text);
                    if found_close {
                        current_text.push(ch);
                    }
                }
            }
            // Inline code: `code`
            '`' => {
                let mut code_text = String::new();
                let mut found_close = false;
                for ch in chars.by_ref() {
                    if ch == '`' {
                        found_close = true;
                        break;
                    }
                    code_text.push(ch);
                }

                if found_close {
                    flush(&mut spans, &mut current_text);
                    spans.push(Span::styled(
                        code_text,
                        Style::default().fg(Color::Magenta),
                    ));
                } else {
                    current_text.push('`');
                    current_text.push_str(&code_text);
                }
            }
            _ => current_text.push(ch),
        }
    }

    flush(&mut spans, &mut current_text);
    spans
}

/// Detect if a line is a code block fence
pub fn is_code_fence(line: &str) -> bool {
    line.trim().starts_with("```")
}

/// Extract language from code fence
pub fn extract_code_language(line: &str) -> Option<String> {
    line.trim()
        .strip_prefix("```")
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn styled<'a>(line: &'a Line<'_>, content: &str) -> &'a Span<'a> {
        line.spans
            .iter()
            .find(|s| s.content == content)
            .unwrap_or_else(|| panic!("no span {content:?} in {line:?}"))
    }

    #[test]
    fn test_render_plain_text() {
        let lines = render_markdown_to_lines("Hello world");
        assert_eq!(lines.len(), 1);
        assert_eq!(text_of(&lines[0]), "Hello world");
    }

    #[test]
    fn test_render_bold_text() {
        let lines = render_markdown_to_lines("This is **bold** text");
        assert_eq!(text_of(&lines[0]), "This is bold text");
        let bold = styled(&lines[0], "bold");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_render_italic_text() {
        let lines = render_markdown_to_lines("an *italic* and _another_ word");
        assert_eq!(text_of(&lines[0]), "an italic and another word");
        assert!(styled(&lines[0], "italic")
            .style
            .add_modifier
            .contains(Modifier::ITALIC));
        assert!(styled(&lines[0], "another")
            .style
            .add_modifier
            .contains(Modifier::ITALIC));
    }

    #[test]
    fn test_unclosed_markers_are_literal() {
        let lines = render_markdown_to_lines("2 * 3 and **open and `tick");
        assert_eq!(text_of(&lines[0]), "2 * 3 and **open and `tick");
    }

    #[test]
    fn test_render_inline_code() {
        let lines = render_markdown_to_lines("Use `println!` macro");
        assert_eq!(text_of(&lines[0]), "Use println! macro");
        assert_eq!(styled(&lines[0], "println!").style.fg, Some(Color::Magenta));
    }

    #[test]
    fn test_render_headers() {
        let lines = render_markdown_to_lines("# Title\n## Section\n### Detail");
        assert_eq!(lines.len(), 3);
        assert_eq!(text_of(&lines[0]), "Title");
        assert_eq!(lines[0].spans[0].style.fg, Some(Color::Yellow));
        assert_eq!(lines[1].spans[0].style.fg, Some(Color::Cyan));
        assert_eq!(lines[2].spans[0].style.fg, Some(Color::Blue));
    }

    #[test]
    fn test_render_lists() {
        let lines = render_markdown_to_lines("- dash\n* star\n• dot\n  - nested **key**");
        assert_eq!(text_of(&lines[0]), "• dash");
        assert_eq!(text_of(&lines[1]), "• star");
        assert_eq!(text_of(&lines[2]), "• dot");
        assert_eq!(text_of(&lines[3]), "  • nested key");
    }

    #[test]
    fn test_render_ordered_list() {
        let lines = render_markdown_to_lines("1. first\n12) twelfth\n3.not a list");
        assert_eq!(text_of(&lines[0]), "1. first");
        assert_eq!(text_of(&lines[1]), "12) twelfth");
        assert_eq!(text_of(&lines[2]), "3.not a list");
    }

    #[test]
    fn test_render_blockquote() {
        let lines = render_markdown_to_lines("> Remember `fork()`");
        assert_eq!(text_of(&lines[0]), "│ Remember fork()");
        let quoted = styled(&lines[0], "Remember ");
        assert!(quoted.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_render_code_block() {
        let lines = render_markdown_to_lines("```rust\nlet x = **1**;\n```\nafter");
        assert_eq!(lines.len(), 4);
        assert!(text_of(&lines[0]).contains("rust"));
        assert_eq!(text_of(&lines[1]), "  let x = **1**;");
        assert!(text_of(&lines[2]).starts_with('└'));
        assert_eq!(text_of(&lines[3]), "after");
    }

    #[test]
    fn test_render_table() {
        let lines = render_markdown_to_lines("| A | B |\n|---|---|\n| 1 | 2 |");
        assert_eq!(text_of(&lines[0]), "  A | B");
        assert_eq!(text_of(&lines[1]), "");
        assert_eq!(text_of(&lines[2]), "  1 | 2");
    }

    #[test]
    fn test_is_code_fence() {
        assert!(is_code_fence("```"));
        assert!(is_code_fence("```python"));
        assert!(!is_code_fence("code"));
    }

    #[test]
    fn test_extract_code_language() {
        assert_eq!(extract_code_language("```python"), Some("python".to_string()));
        assert_eq!(extract_code_language("```"), None);
    }

    #[test]
    fn test_is_table_row() {
        assert!(is_table_row("| Col1 | Col2 |"));
        assert!(!is_table_row("Not a table"));
        assert!(!is_table_row("| Only one pipe"));
    }

    #[test]
    fn test_is_table_separator() {
        assert!(is_table_separator("|---|---|"));
        assert!(is_table_separator("|:---|---:|"));
        assert!(!is_table_separator("| Col1 | Col2 |"));
    }
}
