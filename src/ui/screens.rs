use std::cell::Cell;

use ratatui::layout::Rect;
use ratatui::text::Line;

use crate::corpus::{filter_chapters, Corpus};
use crate::models::ChapterId;

use super::helpers::wrapped_rows;

/// State behind the search destination. `results` is the single slot that
/// every query change overwrites.
pub(crate) struct SearchScreen {
    pub(crate) query: String,
    pub(crate) results: Vec<ChapterId>,
    pub(crate) selected: usize,
}

impl SearchScreen {
    pub(crate) fn new(corpus: &Corpus) -> Self {
        let mut screen = Self {
            query: String::new(),
            results: Vec::new(),
            selected: 0,
        };
        screen.apply_query(corpus);
        screen
    }

    /// Re-run the filter over the whole corpus and replace the result slot.
    pub(crate) fn apply_query(&mut self, corpus: &Corpus) {
        self.results = filter_chapters(&self.query, corpus.chapters())
            .into_iter()
            .map(|chapter| chapter.id)
            .collect();
        self.ensure_in_bounds();
    }

    pub(crate) fn push_char(&mut self, ch: char, corpus: &Corpus) {
        self.query.push(ch);
        self.apply_query(corpus);
    }

    pub(crate) fn pop_char(&mut self, corpus: &Corpus) {
        if self.query.pop().is_some() {
            self.apply_query(corpus);
        }
    }

    pub(crate) fn current_chapter(&self) -> Option<ChapterId> {
        self.results.get(self.selected).copied()
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.results.is_empty() {
            return;
        }
        let len = self.results.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.results.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.results.is_empty() {
            self.selected = self.results.len() - 1;
        }
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.results.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.results.len() {
            self.selected = self.results.len() - 1;
        }
    }
}

/// Chapter viewer state. The chapter itself is looked up by the caller and
/// handed to the renderer; only the scroll offset and the area of the last
/// frame live here.
pub(crate) struct ChapterScreen {
    pub(crate) chapter_id: ChapterId,
    /// First visible screen row, counted after wrapping.
    pub(crate) scroll: u16,
    /// Text area of the last drawn frame. Empty until the first draw.
    pub(crate) viewport: Cell<Rect>,
}

impl ChapterScreen {
    pub(crate) fn new(chapter_id: ChapterId) -> Self {
        Self {
            chapter_id,
            scroll: 0,
            viewport: Cell::new(Rect::default()),
        }
    }

    /// Rows the chapter body occupies at the current viewport width. Before the
    /// first frame the width is unknown, so scrolling is left unbounded and the
    /// renderer clamps instead.
    pub(crate) fn content_rows(&self, lines: Vec<Line<'static>>) -> usize {
        let width = self.viewport.get().width;
        if width == 0 {
            return u16::MAX as usize;
        }
        wrapped_rows(lines, width)
    }

    /// Largest offset that still fills the viewport with content.
    pub(crate) fn max_scroll(&self, content_rows: usize) -> u16 {
        let height = self.viewport.get().height.max(1) as usize;
        content_rows.saturating_sub(height).min(u16::MAX as usize) as u16
    }

    pub(crate) fn scroll_by(&mut self, offset: isize, content_rows: usize) {
        let max = self.max_scroll(content_rows);
        let current = self.scroll.min(max) as isize;
        self.scroll = (current + offset).clamp(0, max as isize) as u16;
    }

    pub(crate) fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub(crate) fn scroll_to_bottom(&mut self, content_rows: usize) {
        self.scroll = self.max_scroll(content_rows);
    }
}

/// Yes/No prompt offering the information page.
pub(crate) struct ConfirmInfo {
    pub(crate) selection: InfoChoice,
}

impl ConfirmInfo {
    pub(crate) fn new() -> Self {
        Self {
            selection: InfoChoice::Yes,
        }
    }

    pub(crate) fn toggle(&mut self) {
        self.selection = match self.selection {
            InfoChoice::Yes => InfoChoice::No,
            InfoChoice::No => InfoChoice::Yes,
        };
    }

    pub(crate) fn labels(&self) -> [&'static str; 2] {
        ["Yes", "No"]
    }

    pub(crate) fn selected_index(&self) -> usize {
        match self.selection {
            InfoChoice::Yes => 0,
            InfoChoice::No => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum InfoChoice {
    Yes,
    No,
}
