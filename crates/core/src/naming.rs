//! Filename and name-list conventions.
//!
//! - Actor base filenames are lowercase snake_case slugs of the display name.
//! - Item filenames are `{owner_base}_{cue_slug}`, take filenames append
//!   `_take_{n}` and the audio extension.
//! - Batch create inputs are comma-separated name lists, deduplicated
//!   case-insensitively.

use std::collections::HashSet;

/// Extension of generated audio files.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Fallback slug when a name contains no usable characters.
pub const FALLBACK_SLUG: &str = "untitled";

/// Lowercase snake_case slug of `name`.
///
/// ASCII alphanumerics are kept, every other run of characters becomes a
/// single `_`, and leading/trailing underscores are dropped.
///
/// ```
/// use voxcat_core::naming::slugify;
///
/// assert_eq!(slugify("Old Man Jenkins"), "old_man_jenkins");
/// assert_eq!(slugify("  Dr. Who?! "), "dr_who");
/// assert_eq!(slugify("???"), "untitled");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Derive a base filename that does not collide with `taken`.
///
/// Collisions get `_2`, `_3`, ... appended. Comparison is case-insensitive.
pub fn unique_base_filename<'a, I>(display_name: &str, taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<String> = taken.into_iter().map(str::to_lowercase).collect();
    let base = slugify(display_name);
    if !taken.contains(&base) {
        return base;
    }
    let mut index = 2u32;
    loop {
        let candidate = format!("{base}_{index}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

/// Filename stem for a content item: `{owner_base}_{cue_slug}`.
pub fn item_filename(owner_base: &str, cue_id: &str) -> String {
    format!("{owner_base}_{}", slugify(cue_id))
}

/// Filename of the `take_number`-th take of an item.
pub fn take_filename(item_filename: &str, take_number: usize) -> String {
    format!("{item_filename}_take_{take_number}.{AUDIO_EXTENSION}")
}

/// Split a comma-separated name list, trimming entries and dropping empties.
pub fn parse_name_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Candidates split into names to create and names skipped as duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePartition {
    pub new: Vec<String>,
    /// Each skipped name once, spelled as its first skipped occurrence.
    pub duplicates: Vec<String>,
}

/// Partition `candidates` against `existing` names, case-insensitively.
///
/// A candidate is a duplicate if it matches an existing name or an earlier
/// candidate in the same list.
pub fn partition_names<'a, I>(candidates: &[String], existing: I) -> NamePartition
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<String> = existing.into_iter().map(str::to_lowercase).collect();
    let mut reported: HashSet<String> = HashSet::new();
    let mut partition = NamePartition::default();

    for name in candidates {
        let key = name.to_lowercase();
        if seen.insert(key.clone()) {
            partition.new.push(name.clone());
        } else if reported.insert(key) {
            partition.duplicates.push(name.clone());
        }
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slugify("a  -  b"), "a_b");
        assert_eq!(slugify("__x__"), "x");
        assert_eq!(slugify("Zoë"), "zo");
    }

    #[test]
    fn unique_base_filename_appends_index() {
        let taken = ["alice", "alice_2"];
        assert_eq!(unique_base_filename("Alice", taken), "alice_3");
        assert_eq!(unique_base_filename("Bob", taken), "bob");
        assert_eq!(unique_base_filename("ALICE", ["Alice"]), "alice_2");
    }

    #[test]
    fn item_and_take_filenames() {
        let item = item_filename("alice", "Cue 01");
        assert_eq!(item, "alice_cue_01");
        assert_eq!(take_filename(&item, 3), "alice_cue_01_take_3.mp3");
    }

    #[test]
    fn name_list_parsing() {
        assert_eq!(parse_name_list(" Alice, Bob ,,  "), vec!["Alice", "Bob"]);
        assert!(parse_name_list(" , ,").is_empty());
        assert!(parse_name_list("").is_empty());
    }

    #[test]
    fn partition_reports_first_occurrence_once() {
        let candidates = parse_name_list("Alice, Bob, Alice");
        let partition = partition_names(&candidates, ["alice"]);
        assert_eq!(partition.new, vec!["Bob"]);
        assert_eq!(partition.duplicates, vec!["Alice"]);
    }

    #[test]
    fn partition_catches_duplicates_within_batch() {
        let candidates = parse_name_list("Bob, bob, BOB");
        let partition = partition_names(&candidates, std::iter::empty());
        assert_eq!(partition.new, vec!["Bob"]);
        assert_eq!(partition.duplicates, vec!["bob"]);
    }

    #[test]
    fn partition_all_duplicates() {
        let candidates = parse_name_list("Alice");
        let partition = partition_names(&candidates, ["Alice"]);
        assert!(partition.new.is_empty());
        assert_eq!(partition.duplicates, vec!["Alice"]);
    }
}
