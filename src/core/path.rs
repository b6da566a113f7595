//! Builds and splits canonical catalog paths.

/// Separator between segments of a canonical path.
pub const PATH_SEPARATOR: char = '/';

/// Appends `name` to `prefix`, or returns `name` alone when the prefix is empty.
///
/// # Examples
/// ```
/// # use catalog_browser::core::path::join_path;
/// assert_eq!(join_path("", "Drums Pack"), "Drums Pack");
/// assert_eq!(join_path("Drums Pack/Kicks", "808 Kick"), "Drums Pack/Kicks/808 Kick");
/// ```
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{name}")
    }
}

/// Splits a canonical path into its root label and the remaining segments.
///
/// Returns `None` when the path does not name both a root and at least one
/// item beneath it, or when any segment is empty. An empty segment would
/// contain-match every sibling, so it is rejected rather than guessed.
pub fn split_path(path: &str) -> Option<(&str, Vec<&str>)> {
    let mut segments = path.split(PATH_SEPARATOR);
    let root = segments.next()?;
    let rest: Vec<&str> = segments.collect();

    if root.is_empty() || rest.is_empty() || rest.iter().any(|segment| segment.is_empty()) {
        return None;
    }
    Some((root, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path_returns_root_and_segments() {
        let (root, rest) = split_path("Drums Pack/Kicks/808 Kick").unwrap();
        assert_eq!(root, "Drums Pack");
        assert_eq!(rest, vec!["Kicks", "808 Kick"]);
    }

    #[test]
    fn test_split_path_rejects_single_segment() {
        assert!(split_path("Drums Pack").is_none());
        assert!(split_path("").is_none());
    }

    #[test]
    fn test_split_path_rejects_empty_segments() {
        assert!(split_path("Drums Pack/").is_none());
        assert!(split_path("Drums Pack//808 Kick").is_none());
        assert!(split_path("/Kicks").is_none());
    }

    #[test]
    fn test_join_then_split_is_stable() {
        let path = join_path(&join_path("Pack", "Folder"), "Item");
        assert_eq!(split_path(&path), Some(("Pack", vec!["Folder", "Item"])));
    }
}
