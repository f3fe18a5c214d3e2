//! Client-session state over the fetched entry collection. This is the
//! state the single-page client keeps for one browser session, expressed
//! independently of any UI framework: the collection cache, the per-letter
//! page tracker, and the set of in-flight deletions.
//!
//! Create, edit, and delete are pessimistic: local state changes only once
//! the server confirms. The done toggle is optimistic: it flips locally
//! first and reverts if the request fails.

use std::collections::HashSet;

use uuid::Uuid;

use crate::agenda::{self, AgendaSection, PageMap};
use crate::models::Entry;

#[derive(Debug, Default)]
pub struct ClientState {
    entries: Vec<Entry>,
    page_by_letter: PageMap,
    deleting: HashSet<Uuid>,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection with a fresh server snapshot.
    pub fn load(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.reclamp();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The paged agenda view.
    pub fn agenda_sections(&self) -> Vec<AgendaSection> {
        agenda::build_agenda(&self.entries, &self.page_by_letter)
    }

    /// The unpaged search view.
    pub fn search_sections(&self, query: &str) -> Vec<AgendaSection> {
        agenda::build_search(&self.entries, query)
    }

    /// Stores the requested page as-is; derivation clamps it, and the next
    /// collection change normalizes the tracker.
    pub fn set_page(&mut self, letter: char, page: usize) {
        self.page_by_letter.insert(letter, page);
    }

    pub fn page_for(&self, letter: char) -> usize {
        self.page_by_letter.get(&letter).copied().unwrap_or(1)
    }

    /// Folds a server-confirmed create into the collection and jumps its
    /// letter group back to page 1 so the new entry is visible.
    pub fn insert_created(&mut self, entry: Entry) {
        let letter = agenda::letter_key(&entry.title);
        self.entries.insert(0, entry);
        self.page_by_letter.insert(letter, 1);
        self.reclamp();
    }

    /// Folds a server-confirmed edit into the collection.
    pub fn apply_updated(&mut self, entry: Entry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == entry.id) {
            *existing = entry;
        }
        self.reclamp();
    }

    /// Optimistically flips `done` and returns the value to send to the
    /// server, or `None` for an unknown id.
    pub fn toggle_done(&mut self, id: Uuid) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        entry.done = !entry.done;
        Some(entry.done)
    }

    /// Replaces the optimistic flip with the server's copy.
    pub fn confirm_done(&mut self, entry: Entry) {
        self.apply_updated(entry);
    }

    /// Rolls the flip back after a failed request.
    pub fn revert_done(&mut self, id: Uuid, previous: bool) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.done = previous;
        }
    }

    /// Marks a deletion as in flight so the row's controls can be
    /// disabled. Returns false if one is already pending for this id.
    pub fn begin_delete(&mut self, id: Uuid) -> bool {
        self.deleting.insert(id)
    }

    pub fn is_deleting(&self, id: Uuid) -> bool {
        self.deleting.contains(&id)
    }

    pub fn delete_succeeded(&mut self, id: Uuid) {
        self.deleting.remove(&id);
        self.entries.retain(|e| e.id != id);
        self.reclamp();
    }

    /// A failed delete leaves the entry in place; only the in-flight mark
    /// is cleared.
    pub fn delete_failed(&mut self, id: Uuid) {
        self.deleting.remove(&id);
    }

    fn reclamp(&mut self) {
        self.page_by_letter = agenda::clamp_pages(&self.entries, &self.page_by_letter);
    }
}
