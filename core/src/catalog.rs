//! In-memory meal collection and the view derived from it.
//!
//! # Design
//! The catalog keeps the full collection and the latest search results side
//! by side. `displayed` picks one of them based on the search term, and
//! `featured` is the fixed-size slice shown in the primary grid.
//!
//! Mutations are applied only after the remote confirmed them. A delete in
//! flight is tracked with a pending marker so a view can dim the entry
//! without removing it.

use std::collections::HashSet;

use crate::types::Meal;

/// Number of meals shown in the primary grid.
pub const FEATURED_LIMIT: usize = 8;

pub const NO_MATCHES_MESSAGE: &str = "No meals found matching your search";
pub const NO_ITEMS_MESSAGE: &str = "No items available";

/// Why the displayed list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoMatches,
    NoItems,
}

impl EmptyState {
    pub const fn message(self) -> &'static str {
        match self {
            EmptyState::NoMatches => NO_MATCHES_MESSAGE,
            EmptyState::NoItems => NO_ITEMS_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    meals: Vec<Meal>,
    search_term: String,
    search_results: Vec<Meal>,
    pending: HashSet<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_searching(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Meal> {
        self.meals
            .iter()
            .chain(self.search_results.iter())
            .find(|meal| meal.id == id)
    }

    pub fn displayed(&self) -> &[Meal] {
        if self.is_searching() {
            &self.search_results
        } else {
            &self.meals
        }
    }

    pub fn featured(&self) -> &[Meal] {
        let displayed = self.displayed();
        &displayed[..displayed.len().min(FEATURED_LIMIT)]
    }

    /// More meals exist beyond the featured slice.
    pub fn has_more(&self) -> bool {
        self.displayed().len() > FEATURED_LIMIT
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.displayed().is_empty() {
            return None;
        }
        if self.is_searching() {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoItems)
        }
    }

    /// Replace the full collection. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, meals: Vec<Meal>) {
        self.meals = dedup(meals);
        self.pending.retain(|id| self.meals.iter().any(|meal| &meal.id == id));
    }

    /// Store the term and report whether a remote search is needed.
    ///
    /// Results of the previous term are dropped either way.
    pub fn set_search_term(&mut self, term: &str) -> bool {
        self.search_term = term.to_string();
        self.search_results.clear();
        self.is_searching()
    }

    pub fn set_search_results(&mut self, meals: Vec<Meal>) {
        self.search_results = dedup(meals);
    }

    /// Newest first. A meal already present under the same id is replaced.
    ///
    /// While searching, the meal also joins the results if its name matches
    /// the term the way the remote filter does (case-insensitive substring).
    pub fn apply_created(&mut self, mut meal: Meal) {
        meal.is_new = true;
        if self.is_searching() && matches_term(&meal.name, &self.search_term) {
            self.search_results.retain(|existing| existing.id != meal.id);
            self.search_results.insert(0, meal.clone());
        }
        self.meals.retain(|existing| existing.id != meal.id);
        self.meals.insert(0, meal);
    }

    /// Replace in place, keeping position and the `is_new` badge.
    pub fn apply_updated(&mut self, meal: Meal) -> bool {
        let mut found = false;
        for list in [&mut self.meals, &mut self.search_results] {
            if let Some(slot) = list.iter_mut().find(|existing| existing.id == meal.id) {
                let is_new = slot.is_new;
                *slot = Meal {
                    is_new,
                    ..meal.clone()
                };
                found = true;
            }
        }
        found
    }

    pub fn apply_deleted(&mut self, id: &str) -> bool {
        self.pending.remove(id);
        let before = self.meals.len() + self.search_results.len();
        self.meals.retain(|meal| meal.id != id);
        self.search_results.retain(|meal| meal.id != id);
        before != self.meals.len() + self.search_results.len()
    }

    pub fn mark_pending(&mut self, id: &str) {
        self.pending.insert(id.to_string());
    }

    pub fn clear_pending(&mut self, id: &str) {
        self.pending.remove(id);
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains(id)
    }
}

fn matches_term(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.trim().to_lowercase())
}

fn dedup(meals: Vec<Meal>) -> Vec<Meal> {
    let mut seen = HashSet::new();
    meals
        .into_iter()
        .filter(|meal| seen.insert(meal.id.clone()))
        .collect()
}
