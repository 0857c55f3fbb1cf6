use anyhow::Error;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::models::Chapter;

/// Lines rendered above the first verse: name, transliteration, translation,
/// category and verse count.
pub(crate) const CHAPTER_HEADER_LINES: usize = 5;
/// Lines rendered per verse: id, original text, translation and a rule.
pub(crate) const VERSE_LINES: usize = 4;
/// Thin separator drawn under each verse.
const VERSE_RULE: &str = "────────────────────────────────────────";

/// Build the scrollable body of the chapter viewer. A chapter without verses
/// yields only the header block.
pub(crate) fn chapter_lines(chapter: &Chapter, theme: &Theme) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::with_capacity(CHAPTER_HEADER_LINES + chapter.verses.len() * VERSE_LINES);

    lines.push(Line::from(Span::styled(chapter.name.clone(), bold)).alignment(Alignment::Center));
    lines.push(
        Line::from(Span::styled(chapter.transliteration.clone(), bold))
            .alignment(Alignment::Center),
    );
    lines.push(Line::from(chapter.translation.clone()).alignment(Alignment::Center));
    lines.push(Line::from(chapter.category.clone()).alignment(Alignment::Center));
    lines.push(
        Line::from(format!("{} verses", chapter.total_verses)).alignment(Alignment::Center),
    );

    for verse in &chapter.verses {
        lines.push(
            Line::from(Span::styled(
                verse.id.to_string(),
                Style::default().fg(theme.primary),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(Line::from(verse.text.clone()).alignment(Alignment::Right));
        lines.push(Line::from(verse.translation.clone()));
        lines.push(Line::from(Span::styled(
            VERSE_RULE,
            Style::default().fg(theme.border),
        )));
    }

    lines
}

/// Screen rows `lines` occupy once word-wrapped to `width` columns, using the
/// same wrapping the chapter viewer renders with.
pub(crate) fn wrapped_rows(lines: Vec<Line<'static>>, width: u16) -> usize {
    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .line_count(width)
}

/// Column of the text cursor after `prompt` and `query`, measured in display
/// cells and kept inside `inner`.
pub(crate) fn search_cursor_x(inner: Rect, prompt: &str, query: &str) -> u16 {
    let typed = prompt.width().saturating_add(query.width());
    let typed = u16::try_from(typed).unwrap_or(u16::MAX);
    inner.x.saturating_add(typed).min(inner.right())
}

/// Two-line summary shown for a chapter in the search results.
pub(crate) fn search_result_lines(chapter: &Chapter) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!("{} {}", chapter.display_title(), chapter.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} {} verses",
            chapter.transliteration, chapter.total_verses
        )),
    ]
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Left-hand strip used by the drawer overlay.
pub(crate) fn drawer_rect(max_width: u16, area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y,
        width: max_width.min(area.width),
        height: area.height,
    }
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verse;
    use anyhow::{anyhow, Context};

    fn chapter(verses: Vec<Verse>) -> Chapter {
        Chapter {
            id: 2,
            name: "البقرة".to_string(),
            transliteration: "Al-Baqarah".to_string(),
            translation: "The Cow".to_string(),
            category: "medinan".to_string(),
            total_verses: verses.len() as u32,
            verses,
        }
    }

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn empty_chapter_renders_only_the_header() {
        let lines = chapter_lines(&chapter(Vec::new()), &Theme::default());
        assert_eq!(lines.len(), CHAPTER_HEADER_LINES);
        assert_eq!(plain(&lines[4]), "0 verses");
    }

    #[test]
    fn verses_follow_the_header_in_order() {
        let verses = vec![
            Verse {
                id: 1,
                text: "الم".to_string(),
                translation: "Alif, Lam, Meem.".to_string(),
            },
            Verse {
                id: 2,
                text: String::new(),
                translation: String::new(),
            },
        ];
        let lines = chapter_lines(&chapter(verses), &Theme::default());
        assert_eq!(lines.len(), CHAPTER_HEADER_LINES + 2 * VERSE_LINES);
        assert_eq!(plain(&lines[0]), "البقرة");
        assert_eq!(plain(&lines[1]), "Al-Baqarah");
        assert_eq!(plain(&lines[5]), "1");
        assert_eq!(plain(&lines[7]), "Alif, Lam, Meem.");
        assert_eq!(plain(&lines[9]), "2");
        assert_eq!(plain(&lines[11]), "");
    }

    #[test]
    fn search_row_shows_title_and_count() {
        let lines = search_result_lines(&chapter(Vec::new()));
        assert_eq!(plain(&lines[0]), "2. The Cow البقرة");
        assert_eq!(plain(&lines[1]), "Al-Baqarah 0 verses");
    }

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = Err::<(), _>(anyhow!("link refused"))
            .context("failed to open page")
            .unwrap_err();
        assert_eq!(surface_error(&err), "link refused");
    }

    #[test]
    fn long_verses_wrap_onto_several_rows() {
        let verses = vec![Verse {
            id: 1,
            text: String::new(),
            translation: "word ".repeat(40),
        }];
        let lines = chapter_lines(&chapter(verses), &Theme::default());
        let logical = lines.len();
        assert!(wrapped_rows(lines, 20) > logical);
    }

    #[test]
    fn cursor_counts_display_width() {
        let inner = Rect::new(1, 1, 40, 1);
        assert_eq!(search_cursor_x(inner, "Search: ", "cow"), 1 + 8 + 3);
        assert_eq!(search_cursor_x(inner, "Search: ", "漢字"), 1 + 8 + 4);
        let long = "x".repeat(70_000);
        assert_eq!(search_cursor_x(inner, "Search: ", &long), inner.right());
    }

    #[test]
    fn drawer_never_exceeds_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(drawer_rect(36, area).width, 20);
        assert_eq!(drawer_rect(12, area).width, 12);
    }
}
