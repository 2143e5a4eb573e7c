//! Breadcrumb labels for history messages and logs.

/// Separator placed between breadcrumb segments.
pub const SEPARATOR: &str = " / ";

/// Join the non-empty, trimmed segments of an entity's ancestry.
///
/// ```
/// use voxcat_core::labels::breadcrumb;
///
/// assert_eq!(breadcrumb(["Alice", "Barks", "cue_01"]), "Alice / Barks / cue_01");
/// assert_eq!(breadcrumb(["Alice", "", "cue_01"]), "Alice / cue_01");
/// ```
pub fn breadcrumb<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .filter_map(|s| {
            let trimmed = s.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
