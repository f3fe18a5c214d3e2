//! Pure list transforms behind the agenda and search views: letter
//! grouping, per-letter pagination, and the free-text filter. Everything
//! here is a plain function of its inputs so the client layer (and tests)
//! can derive renderable sections without touching I/O.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::Entry;

/// Entries shown per letter group before paging kicks in.
pub const PAGE_SIZE: usize = 5;

/// Current page per letter key. Transient UI state, never persisted.
pub type PageMap = HashMap<char, usize>;

/// One renderable letter group.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaSection {
    pub letter: char,
    pub visible: Vec<Entry>,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Grouping bucket for a title: `A`-`Z` for leading ASCII letters,
/// `#` for everything else (digits, accented or non-Latin characters,
/// empty titles).
pub fn letter_key(title: &str) -> char {
    match title.trim().chars().next() {
        Some(first) if first.is_ascii_alphabetic() => first.to_ascii_uppercase(),
        _ => '#',
    }
}

/// Short human date, e.g. "Aug 7, 2026". Absent dates format to the empty
/// string so they contribute nothing to the search haystack.
pub fn format_day(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => String::new(),
    }
}

pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

fn clamped_page(pages: &PageMap, letter: char, total_pages: usize) -> usize {
    pages.get(&letter).copied().unwrap_or(1).clamp(1, total_pages)
}

/// Buckets entries by letter key, each bucket ordered case-insensitively
/// by title. The `BTreeMap` keeps the groups themselves in letter order,
/// with `#` in its natural position ahead of `A`.
fn group_by_letter(entries: &[Entry]) -> BTreeMap<char, Vec<Entry>> {
    let mut groups: BTreeMap<char, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(letter_key(&entry.title))
            .or_default()
            .push(entry.clone());
    }

    for group in groups.values_mut() {
        group.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    }

    groups
}

/// Recomputes the page map after the collection changed: pages clamp into
/// `[1, total_pages]` for their group's new size, and letters whose group
/// vanished are pruned.
pub fn clamp_pages(entries: &[Entry], pages: &PageMap) -> PageMap {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(letter_key(&entry.title)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(letter, count)| (letter, clamped_page(pages, letter, total_pages(count))))
        .collect()
}

/// The agenda view: alphabetical groups, each independently paged at
/// [`PAGE_SIZE`]. Stale page numbers clamp rather than going out of range.
pub fn build_agenda(entries: &[Entry], pages: &PageMap) -> Vec<AgendaSection> {
    group_by_letter(entries)
        .into_iter()
        .map(|(letter, group)| {
            let total_pages = total_pages(group.len());
            let current_page = clamped_page(pages, letter, total_pages);
            let start = (current_page - 1) * PAGE_SIZE;
            let end = (start + PAGE_SIZE).min(group.len());
            AgendaSection {
                letter,
                visible: group[start..end].to_vec(),
                total_pages,
                current_page,
            }
        })
        .collect()
}

/// The search view: same grouping, no paging, every match visible. An
/// empty query browses the whole collection.
pub fn build_search(entries: &[Entry], query: &str) -> Vec<AgendaSection> {
    let needle = query.trim().to_lowercase();
    let matches: Vec<Entry> = entries
        .iter()
        .filter(|entry| needle.is_empty() || matches_query(entry, &needle))
        .cloned()
        .collect();

    group_by_letter(&matches)
        .into_iter()
        .map(|(letter, group)| AgendaSection {
            letter,
            visible: group,
            total_pages: 1,
            current_page: 1,
        })
        .collect()
}

/// Case-insensitive substring match over everything a card renders: title,
/// note, author, and both formatted dates. `needle` must already be
/// lowercase.
pub fn matches_query(entry: &Entry, needle: &str) -> bool {
    let haystack = [
        entry.title.clone(),
        entry.note.clone().unwrap_or_default(),
        entry.user_id.clone(),
        format_day(entry.date),
        format_timestamp(entry.created_at),
    ]
    .join(" ")
    .to_lowercase();

    haystack.contains(needle)
}
