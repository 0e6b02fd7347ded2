//! Path resolution module
//!
//! Maps a raw request path to a filesystem path under the served root.
//! The traversal guard runs after decoding and joining, never before:
//! a `%2e%2e` only becomes `..` once decoded, so checking the raw path
//! would miss it.
//!
//! Normalization is purely lexical (`.` and `..` components are resolved
//! without touching the filesystem) and the guard is a component-prefix
//! check against the root. Symlinks inside the root can still point
//! outside it; that matches the original behavior and is a recorded
//! limitation rather than something this module silently strengthens.

use crate::handler::ServeError;
use std::path::{Component, Path, PathBuf};

/// Resolve a raw (still percent-encoded) request path against the root.
///
/// Returns the normalized absolute candidate path, or `Forbidden` when it
/// would land outside the root. Malformed percent-encoding is an `Io`
/// error and surfaces as a 500, matching the original server's behavior
/// of treating a failed decode as an unexpected failure.
pub fn resolve(root: &Path, raw_path: &str) -> Result<PathBuf, ServeError> {
    let decoded = percent_decode(raw_path).ok_or_else(|| {
        ServeError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("malformed percent-encoding in '{raw_path}'"),
        ))
    })?;

    let joined = root.join(decoded.trim_start_matches('/'));
    let candidate = normalize(&joined);

    if candidate.starts_with(root) {
        Ok(candidate)
    } else {
        Err(ServeError::Forbidden)
    }
}

/// Decode `%XX` escapes, rejecting truncated or non-hex escapes and
/// byte sequences that are not valid UTF-8.
///
/// `+` is left alone: it only means space in query strings, and query
/// strings are stripped before this point.
pub fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            out.push(hi << 4 | lo);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).ok()
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Lexically normalize a path: drop `.` components and resolve `..`
/// against the preceding component. A `..` at the filesystem root stays
/// at the root, so an escape attempt ends up failing the prefix check
/// rather than wrapping around.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/site")
    }

    #[test]
    fn plain_paths_resolve_under_root() {
        assert_eq!(
            resolve(&root(), "/assets/style.css").unwrap(),
            PathBuf::from("/srv/site/assets/style.css")
        );
    }

    #[test]
    fn root_request_resolves_to_root() {
        assert_eq!(resolve(&root(), "/").unwrap(), root());
    }

    #[test]
    fn traversal_is_forbidden() {
        assert!(matches!(
            resolve(&root(), "/../../etc/passwd"),
            Err(ServeError::Forbidden)
        ));
    }

    #[test]
    fn encoded_traversal_is_forbidden() {
        assert!(matches!(
            resolve(&root(), "/%2e%2e/%2e%2e/etc/passwd"),
            Err(ServeError::Forbidden)
        ));
    }

    #[test]
    fn traversal_inside_root_is_allowed() {
        assert_eq!(
            resolve(&root(), "/assets/../index.html").unwrap(),
            PathBuf::from("/srv/site/index.html")
        );
    }

    #[test]
    fn sibling_prefix_does_not_match() {
        // /srv/site-backup shares a string prefix with /srv/site but is
        // not a descendant; component comparison catches it.
        assert!(matches!(
            resolve(&root(), "/../site-backup/secret"),
            Err(ServeError::Forbidden)
        ));
    }

    #[test]
    fn malformed_escape_is_io_error() {
        assert!(matches!(resolve(&root(), "/%zz"), Err(ServeError::Io(_))));
        assert!(matches!(resolve(&root(), "/%2"), Err(ServeError::Io(_))));
    }

    #[test]
    fn decode_handles_common_escapes() {
        assert_eq!(percent_decode("/my%20file.txt").unwrap(), "/my file.txt");
        assert_eq!(percent_decode("/caf%C3%A9").unwrap(), "/café");
        assert_eq!(percent_decode("/plain").unwrap(), "/plain");
    }

    #[test]
    fn decode_leaves_plus_alone() {
        assert_eq!(percent_decode("/a+b").unwrap(), "/a+b");
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        assert!(percent_decode("/%ff%fe").is_none());
    }

    #[test]
    fn normalize_drops_dot_and_resolves_dotdot() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
    }
}
