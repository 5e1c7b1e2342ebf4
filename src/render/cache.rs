//! Content-addressed naming of rendered images.
//!
//! An image file is named by the SHA-1 digest of the complete formatted
//! LaTeX document concatenated with the rasterizer option list. Hashing the
//! formatted document rather than the raw equation means a change to the
//! document template re-keys every equation, and hashing the options means a
//! density or quality change does too. Anything that could alter the pixels
//! is part of the address.
//!
//! Entries are written once and never updated or deleted. Concurrent filter
//! invocations sharing one output directory can race on the same key; the
//! race is left unguarded because both writers produce identical bytes for
//! an identical key, so the last write changes nothing.
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};

use crate::errors::Result;

/// Derive the cache key for a formatted document and rasterizer options.
///
/// Equal inputs always produce the equal key; any change to either input
/// produces a different key.
pub(crate) fn cache_key(document: &str, rasterizer_args: &[String]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(document.as_bytes());
    hasher.update(format!("{rasterizer_args:?}").as_bytes());

    let digest = hasher.finalize();
    let mut key = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(key, "{byte:02x}");
    }
    key
}

/// The image path for a key, relative to the invoking process's working
/// directory.
pub(crate) fn relative_path(output_dir: &Path, key: &str) -> PathBuf {
    output_dir.join(format!("{key}.png"))
}

/// Create the output directory if it does not exist yet.
///
/// An already-existing directory is the common case and not an error, and
/// neither is losing the creation race to a concurrent invocation.
pub(crate) fn ensure_output_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)?;
        log::info!("created directory {}", dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_is_stable_hex() {
        let key = cache_key("doc", &args(&["-density", "600"]));
        assert_eq!(key.len(), 40);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key, cache_key("doc", &args(&["-density", "600"])));
    }

    #[test]
    fn test_key_depends_on_document() {
        let options = args(&["-density", "600"]);
        assert_ne!(cache_key("a", &options), cache_key("b", &options));
    }

    #[test]
    fn test_key_depends_on_options() {
        assert_ne!(
            cache_key("doc", &args(&["-density", "600"])),
            cache_key("doc", &args(&["-density", "601"]))
        );
    }

    #[test]
    fn test_relative_path_shape() {
        let path = relative_path(Path::new("latex_images"), "abc123");
        assert_eq!(path, PathBuf::from("latex_images/abc123.png"));
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("images");
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
        // Second call must be a quiet no-op
        ensure_output_dir(&dir).unwrap();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_key_is_deterministic(document in ".*", options in prop::collection::vec("[-a-z0-9]{1,8}", 0..4)) {
            prop_assert_eq!(cache_key(&document, &options), cache_key(&document, &options));
        }

        #[test]
        fn prop_distinct_documents_get_distinct_keys(a in "[a-z]{1,32}", b in "[a-z]{1,32}") {
            prop_assume!(a != b);
            let options = vec!["-density".to_string(), "600".to_string()];
            prop_assert_ne!(cache_key(&a, &options), cache_key(&b, &options));
        }
    }
}
