// Utility functions

/// Builds an absolute link by plain concatenation, the way the service expects its relative paths to be used.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url, path)
}

/// Last non-empty path segment of a URL path, ignoring any query or fragment.
pub fn file_name_from_url(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| *segment != "." && *segment != "..")
}
