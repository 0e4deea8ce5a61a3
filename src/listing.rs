use crate::normalize::Entry;
use chrono::NaiveDate;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Desc => "desc",
            SortOrder::Asc => "asc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "desc" => Ok(SortOrder::Desc),
            "asc" => Ok(SortOrder::Asc),
            _ => Err(()),
        }
    }
}

/// Undated entries sort as if updated on 1970-01-01.
fn sort_key(entry: &Entry) -> NaiveDate {
    entry.date.unwrap_or_default()
}

/// Stable: entries with the same date keep their input order.
pub fn sort_entries(entries: &mut [Entry], order: SortOrder) {
    match order {
        SortOrder::Desc => entries.sort_by(|a, b| sort_key(b).cmp(&sort_key(a))),
        SortOrder::Asc => entries.sort_by_key(sort_key),
    }
}

/// Newest-first summary capped at `cap` entries.
pub fn take_newest(mut entries: Vec<Entry>, cap: usize) -> Vec<Entry> {
    sort_entries(&mut entries, SortOrder::Desc);
    entries.truncate(cap);
    entries
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListState {
    pub order: SortOrder,
    /// 1-indexed.
    pub page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    SetOrder(SortOrder),
    GoTo(usize),
    Prev,
    Next,
}

impl ListState {
    /// Applies one UI event. Changing the order always returns to page 1.
    pub fn apply(self, event: ListEvent, total_pages: usize) -> ListState {
        let next = match event {
            ListEvent::SetOrder(order) => ListState { order, page: 1 },
            ListEvent::GoTo(page) => ListState { page, ..self },
            ListEvent::Prev => ListState {
                page: self.page.saturating_sub(1),
                ..self
            },
            ListEvent::Next => ListState {
                page: self.page.saturating_add(1),
                ..self
            },
        };
        next.clamped(total_pages)
    }

    pub fn clamped(self, total_pages: usize) -> ListState {
        ListState {
            page: self.page.clamp(1, total_pages.max(1)),
            ..self
        }
    }
}

/// Owns the sorted entries of a paged listing and its current state.
#[derive(Debug, Clone)]
pub struct ListController {
    entries: Vec<Entry>,
    page_size: usize,
    state: ListState,
}

impl ListController {
    pub fn new(mut entries: Vec<Entry>, page_size: usize, order: SortOrder) -> Self {
        sort_entries(&mut entries, order);
        Self {
            entries,
            page_size: page_size.max(1),
            state: ListState { order, page: 1 },
        }
    }

    /// Returns whether the listing should be scrolled back into view, which
    /// is the case for page moves only.
    pub fn dispatch(&mut self, event: ListEvent) -> bool {
        let previous = self.state;
        self.state = previous.apply(event, self.total_pages());
        if self.state.order != previous.order {
            sort_entries(&mut self.entries, self.state.order);
        }
        !matches!(event, ListEvent::SetOrder(_))
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.entries.len(), self.page_size)
    }

    pub fn has_prev(&self) -> bool {
        self.state.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.state.page < self.total_pages()
    }

    pub fn window(&self) -> &[Entry] {
        let start = (self.state.page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.entries.len());
        self.entries.get(start..end).unwrap_or(&[])
    }
}
