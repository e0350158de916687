//! Virtual-path helpers used to key the compiled-in terminal filesystem.
//!
//! Every path stored in a virtual directory table goes through [`normalize_virtual_path`] so that
//! lookups never depend on how a caller concatenated segments.

/// Normalizes a virtual filesystem path.
///
/// Trims whitespace, converts backslashes to `/`, drops empty and `.` segments, resolves `..`
/// against the preceding segment, ensures a leading slash, and returns `/` for empty or
/// fully-collapsed input.
pub fn normalize_virtual_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut segments: Vec<&str> = Vec::new();
    let unified = trimmed.replace('\\', "/");
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Joins a child name onto a directory path and normalizes the result.
///
/// A trailing `/` on `name` (as produced by directory tab-completion) is ignored.
pub fn join_virtual_path(dir: &str, name: &str) -> String {
    let name = name.trim().trim_end_matches('/');
    if name.starts_with('/') {
        return normalize_virtual_path(name);
    }
    normalize_virtual_path(&format!("{dir}/{name}"))
}

/// Returns the parent of a normalized path, or `None` for `/`.
pub fn parent_virtual_path(path: &str) -> Option<String> {
    let normalized = normalize_virtual_path(path);
    if normalized == "/" {
        return None;
    }
    match normalized.rfind('/') {
        Some(0) => Some("/".to_string()),
        Some(idx) => Some(normalized[..idx].to_string()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_separators_and_dot_segments() {
        let cases = [
            ("", "/"),
            ("   ", "/"),
            ("home/kem", "/home/kem"),
            ("/home//kem/", "/home/kem"),
            ("/home/kem/./projects/../school", "/home/kem/school"),
            ("\\home\\kem", "/home/kem"),
            ("/../../", "/"),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize_virtual_path(input), expected, "input={input:?}");
        }
    }

    #[test]
    fn join_ignores_completion_slash_and_handles_parent_segments() {
        assert_eq!(
            join_virtual_path("/home/kem", "projects/"),
            "/home/kem/projects"
        );
        assert_eq!(join_virtual_path("/home/kem/projects", ".."), "/home/kem");
        assert_eq!(join_virtual_path("/home/kem", "/etc"), "/etc");
    }

    #[test]
    fn parent_stops_at_root() {
        assert_eq!(
            parent_virtual_path("/home/kem/projects").as_deref(),
            Some("/home/kem")
        );
        assert_eq!(parent_virtual_path("/home").as_deref(), Some("/"));
        assert_eq!(parent_virtual_path("/"), None);
    }
}
