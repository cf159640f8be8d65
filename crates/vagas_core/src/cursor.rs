use std::num::NonZeroUsize;

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// How far into a result list the display has advanced.
///
/// A cursor belongs to one result list; reset it whenever that list changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    page_size: NonZeroUsize,
    displayed: usize,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationCursor {
    /// A zero page size is raised to one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: NonZeroUsize::new(page_size).unwrap_or(NonZeroUsize::MIN),
            displayed: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed
    }

    pub fn has_more<T>(&self, source: &[T]) -> bool {
        self.displayed < source.len()
    }

    /// Next `page_size` records, clamped to the end of `source`. Returns an empty
    /// slice and leaves the cursor untouched once everything was handed out.
    pub fn next_page<'a, T>(&mut self, source: &'a [T]) -> &'a [T] {
        let start = self.displayed.min(source.len());
        let end = start.saturating_add(self.page_size.get()).min(source.len());
        self.displayed = end.max(self.displayed);
        &source[start..end]
    }

    pub fn reset(&mut self) {
        self.displayed = 0;
    }
}
