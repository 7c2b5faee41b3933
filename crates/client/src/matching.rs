//! Fuzzy filtering and ranking of contacts by name
//!
//! Each key of a contact (`first`, then `last`) is ranked against the query;
//! the best key decides the contact's rank. From best to worst:
//!
//! | Rank | Meaning |
//! |---|---|
//! | `CaseSensitiveEqual` | identical |
//! | `Equal` | identical ignoring case |
//! | `StartsWith` | value starts with the query |
//! | `WordStartsWith` | a later word starts with the query |
//! | `Contains` | query appears inside the value |
//! | `Acronym` | query appears in the initials of the value's words |
//! | `Matches` | query characters appear in order; tighter is better |
//! | `NoMatch` | none of the above |
//!
//! Accents are removed from both sides before comparing.

use rolodex_core::Contact;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// How well a value matches a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ranking {
    /// Exactly equal, case included
    CaseSensitiveEqual,
    /// Equal ignoring case
    Equal,
    /// Prefix match
    StartsWith,
    /// Prefix of a word after the first
    WordStartsWith,
    /// Substring match
    Contains,
    /// Substring of the initials
    Acronym,
    /// In-order subsequence; the payload is in `(1, 2]`
    Matches(f64),
    /// Not a match
    NoMatch,
}

impl Ranking {
    /// Numeric score; higher is better
    pub fn score(&self) -> f64 {
        match self {
            Ranking::CaseSensitiveEqual => 7.0,
            Ranking::Equal => 6.0,
            Ranking::StartsWith => 5.0,
            Ranking::WordStartsWith => 4.0,
            Ranking::Contains => 3.0,
            Ranking::Acronym => 2.0,
            Ranking::Matches(score) => *score,
            Ranking::NoMatch => 0.0,
        }
    }

    /// Whether the value survives filtering
    pub fn is_match(&self) -> bool {
        self.score() >= 1.0
    }
}

/// Drop accents: decompose, then remove combining marks
fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// First character of every space- or hyphen-separated word
fn acronym(s: &str) -> String {
    s.split(' ')
        .flat_map(|word| word.split('-'))
        .filter_map(|part| part.chars().next())
        .collect()
}

/// Score an in-order subsequence match
///
/// `1 + (matched / query_len) * (1 / spread)` where `spread` is the distance
/// between the first and last matched positions.
fn closeness(candidate: &[char], query: &[char]) -> Ranking {
    let Some(&first_char) = query.first() else {
        return Ranking::NoMatch;
    };
    let Some(first) = candidate.iter().position(|&c| c == first_char) else {
        return Ranking::NoMatch;
    };

    let mut matched = 1usize;
    let mut last = first;
    for &q in &query[1..] {
        match candidate[last + 1..].iter().position(|&c| c == q) {
            Some(offset) => {
                last = last + 1 + offset;
                matched += 1;
            }
            None => return Ranking::NoMatch,
        }
    }

    let spread = (last - first).max(1) as f64;
    let in_order = matched as f64 / query.len() as f64;
    Ranking::Matches(1.0 + in_order * (1.0 / spread))
}

/// Rank `value` against `query`
pub fn rank(value: &str, query: &str) -> Ranking {
    let candidate = strip_diacritics(value);
    let query = strip_diacritics(query);

    if query.chars().count() > candidate.chars().count() {
        return Ranking::NoMatch;
    }
    if candidate == query {
        return Ranking::CaseSensitiveEqual;
    }

    let candidate = candidate.to_lowercase();
    let query = query.to_lowercase();
    if candidate == query {
        return Ranking::Equal;
    }
    if candidate.starts_with(&query) {
        return Ranking::StartsWith;
    }
    if candidate.contains(&format!(" {}", query)) {
        return Ranking::WordStartsWith;
    }
    if candidate.contains(&query) {
        return Ranking::Contains;
    }
    if query.chars().count() == 1 {
        return Ranking::NoMatch;
    }
    if acronym(&candidate).contains(&query) {
        return Ranking::Acronym;
    }

    let candidate: Vec<char> = candidate.chars().collect();
    let query: Vec<char> = query.chars().collect();
    closeness(&candidate, &query)
}

/// Best rank of a contact across its name keys
#[derive(Debug, Clone)]
struct Ranked {
    rank: Ranking,
    key_index: usize,
    ranked_value: String,
    position: usize,
}

fn rank_contact(contact: &Contact, query: &str, position: usize) -> Ranked {
    let keys = [contact.first.as_deref(), contact.last.as_deref()];
    let mut best = Ranked {
        rank: Ranking::NoMatch,
        key_index: 0,
        ranked_value: String::new(),
        position,
    };
    for (key_index, value) in keys.iter().enumerate() {
        let Some(value) = value else { continue };
        let rank = rank(value, query);
        // Strictly greater: on ties the earlier key wins.
        if rank.score() > best.rank.score() {
            best.rank = rank;
            best.key_index = key_index;
            best.ranked_value = value.to_string();
        }
    }
    best
}

fn compare_ranked(a: &Ranked, b: &Ranked) -> Ordering {
    b.rank
        .score()
        .total_cmp(&a.rank.score())
        .then_with(|| a.key_index.cmp(&b.key_index))
        .then_with(|| {
            a.ranked_value
                .to_lowercase()
                .cmp(&b.ranked_value.to_lowercase())
        })
        .then_with(|| a.position.cmp(&b.position))
}

/// Keep the contacts whose first or last name matches `query`, best first
///
/// Contacts with equal rank keep their relative order from `contacts`
/// unless their matched names differ.
pub fn filter_contacts(contacts: Vec<Contact>, query: &str) -> Vec<Contact> {
    let mut ranked: Vec<(Ranked, Contact)> = contacts
        .into_iter()
        .enumerate()
        .map(|(position, contact)| (rank_contact(&contact, query, position), contact))
        .filter(|(ranked, _)| ranked.rank.is_match())
        .collect();
    ranked.sort_by(|(a, _), (b, _)| compare_ranked(a, b));
    ranked.into_iter().map(|(_, contact)| contact).collect()
}
