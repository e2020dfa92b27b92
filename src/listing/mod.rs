//! Sorting, paging and selection for the entity lists.
//!
//! Every screen keeps its collection in a [`ListModel`]. The model owns the
//! raw items as loaded from the server and derives the sorted page that is
//! rendered; it never mutates the order of the underlying items.

pub mod clients;
pub mod insurance;
pub mod offers;
pub mod tours;

pub use clients::ClientSort;
pub use insurance::{InsuranceRecord, InsuranceSort};
pub use offers::OfferSort;
pub use tours::TourSort;

use crate::constants::DEFAULT_PAGE_SIZE;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// A comparable projection of one sort field
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
    /// Missing dates sort before any date
    Date(Option<NaiveDate>),
}

impl SortKey {
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Text(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Date(_) => 2,
        }
    }
}

/// The fields a list can be sorted by
pub trait SortField: Copy + PartialEq + Debug + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;

    /// The field after this one, wrapping around
    fn next(self) -> Self {
        let index = Self::ALL.iter().position(|field| *field == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

/// An item that can be shown in a [`ListModel`]
pub trait Listable: Clone {
    type Key: Clone + Eq + Hash + Debug;
    type Field: SortField;

    fn key(&self) -> Self::Key;
    fn sort_key(&self, field: Self::Field) -> SortKey;
}

/// Items, sort state, paging, selection and expanded cards of one list
#[derive(Debug, Clone)]
pub struct ListModel<T: Listable> {
    items: Vec<T>,
    search_term: String,
    sort_field: T::Field,
    sort_order: SortOrder,
    page: usize,
    page_size: usize,
    selected: usize,
    expanded: HashSet<T::Key>,
    single_expand: bool,
    generation: u64,
    loading: bool,
}

impl<T: Listable> ListModel<T> {
    pub fn new(sort_field: T::Field) -> Self {
        Self {
            items: Vec::new(),
            search_term: String::new(),
            sort_field,
            sort_order: SortOrder::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            selected: 0,
            expanded: HashSet::new(),
            single_expand: false,
            generation: 0,
            loading: false,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Allow only one expanded card at a time
    pub fn with_single_expand(mut self) -> Self {
        self.single_expand = true;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // Loading

    /// Start a load; only the returned generation will be accepted
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    /// Replace the items if `generation` is the latest load
    pub fn accept(&mut self, generation: u64, items: Vec<T>) -> bool {
        if generation != self.generation {
            log::debug!("Dropping stale list load {} (latest {})", generation, self.generation);
            return false;
        }
        self.replace(items);
        self.loading = false;
        true
    }

    /// Mark the load as finished without data
    pub fn fail(&mut self, generation: u64) {
        if generation == self.generation {
            self.loading = false;
        }
    }

    /// Replace the items outright, invalidating in-flight loads
    pub fn replace(&mut self, items: Vec<T>) {
        self.generation += 1;
        self.loading = false;
        self.items = items;
        self.page = 1;
        self.selected = 0;
        let keys: HashSet<T::Key> = self.items.iter().map(Listable::key).collect();
        self.expanded.retain(|key| keys.contains(key));
    }

    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Replace the item with the same key, or prepend it
    pub fn upsert(&mut self, item: T) {
        let key = item.key();
        match self.items.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => *existing = item,
            None => self.prepend(item),
        }
    }

    pub fn find(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == *key)
    }

    // Search and sort

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Returns true when the term changed; the list goes back to page 1
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        self.page = 1;
        self.selected = 0;
        true
    }

    pub fn sort_field(&self) -> T::Field {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort(&mut self, field: T::Field, order: SortOrder) {
        self.sort_field = field;
        self.sort_order = order;
    }

    pub fn cycle_sort_field(&mut self) {
        self.sort_field = self.sort_field.next();
    }

    pub fn toggle_sort_order(&mut self) {
        self.sort_order = self.sort_order.toggle();
    }

    /// All items in display order; equal keys keep their loaded order
    pub fn sorted(&self) -> Vec<&T> {
        let field = self.sort_field;
        let mut sorted: Vec<&T> = self.items.iter().collect();
        sorted.sort_by(|a, b| {
            let ordering = a.sort_key(field).compare(&b.sort_key(field));
            match self.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        sorted
    }

    // Paging

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages, never less than one
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    /// Items on the current page
    pub fn visible(&self) -> Vec<&T> {
        let start = (self.page - 1) * self.page_size;
        self.sorted().into_iter().skip(start).take(self.page_size).collect()
    }

    pub fn set_page(&mut self, page: usize) {
        let page = page.clamp(1, self.total_pages());
        if page != self.page {
            self.page = page;
            self.selected = 0;
        }
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    // Selection

    /// Index of the selected card within the current page
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&T> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.visible().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // Expanded cards

    pub fn is_expanded(&self, key: &T::Key) -> bool {
        self.expanded.contains(key)
    }

    pub fn toggle_expanded(&mut self, key: T::Key) {
        if self.expanded.remove(&key) {
            return;
        }
        if self.single_expand {
            self.expanded.clear();
        }
        self.expanded.insert(key);
    }

    pub fn toggle_selected(&mut self) {
        if let Some(key) = self.selected().map(Listable::key) {
            self.toggle_expanded(key);
        }
    }
}

/// An entry of the pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

/// Page numbers around `current`, with the first and last page always shown
pub fn page_window(current: usize, total: usize) -> Vec<PageMarker> {
    let mut markers = vec![PageMarker::Page(1)];
    if total <= 1 {
        return markers;
    }

    if current > 3 {
        markers.push(PageMarker::Ellipsis);
    }
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);
    for page in start..=end {
        markers.push(PageMarker::Page(page));
    }
    if current + 2 < total {
        markers.push(PageMarker::Ellipsis);
    }
    markers.push(PageMarker::Page(total));
    markers
}

pub(crate) fn text(value: &str) -> SortKey {
    SortKey::Text(value.to_string())
}

pub(crate) fn date(value: &str) -> SortKey {
    SortKey::Date(crate::utils::datetime::parse_api_date(value))
}
