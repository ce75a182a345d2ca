//! In-memory search boxes for the majors and location pickers.
//!
//! A box holds its current source entries and at most one selected result, which is what
//! the normalizer reads at submit time through [`SelectionProvider`].

use crate::form::SelectionProvider;
use crate::models::{City, Major};

pub const MAJOR_MAX_RESULTS: usize = 4;
pub const LOCATION_MAX_RESULTS: usize = 10;

/// An entry that can be listed in a search box.
pub trait Searchable {
    fn id(&self) -> i64;
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Major {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.code.as_str(), self.name.as_str()]
    }
}

impl Searchable for City {
    fn id(&self) -> i64 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

#[derive(Debug, Clone)]
pub struct SearchBox<T> {
    source: Vec<T>,
    max_results: usize,
    selected: Option<i64>,
}

impl<T: Searchable> SearchBox<T> {
    pub fn new(max_results: usize) -> Self {
        Self {
            source: Vec::new(),
            max_results,
            selected: None,
        }
    }

    /// Replaces the entries. A selection that is no longer present is dropped.
    pub fn set_source(&mut self, source: Vec<T>) {
        if let Some(id) = self.selected {
            if !source.iter().any(|entry| entry.id() == id) {
                self.selected = None;
            }
        }
        self.source = source;
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn source(&self) -> &[T] {
        &self.source
    }

    /// Case-insensitive match over each entry's search fields, capped at `max_results`.
    pub fn search(&self, query: &str) -> Vec<&T> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.source
            .iter()
            .filter(|entry| {
                entry
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            })
            .take(self.max_results)
            .collect()
    }

    /// Marks the entry with `id` as the chosen result. Returns false if it is not listed.
    pub fn select(&mut self, id: i64) -> bool {
        if self.source.iter().any(|entry| entry.id() == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&T> {
        let id = self.selected?;
        self.source.iter().find(|entry| entry.id() == id)
    }
}

impl<T> SelectionProvider for SearchBox<T> {
    fn selected_id(&self) -> Option<i64> {
        self.selected
    }
}

/// Majors: searched locally by code and name.
pub fn major_search() -> SearchBox<Major> {
    SearchBox::new(MAJOR_MAX_RESULTS)
}

/// Locations: filled from the remote city search, which does the matching.
pub fn location_search() -> SearchBox<City> {
    SearchBox::new(LOCATION_MAX_RESULTS)
}
