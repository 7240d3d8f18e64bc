//! Read-only resources compiled into the binary.
//!
//! The catalog and the glass art are embedded with `include_str!`; there is no
//! configurable path to read them from.

use std::io;

/// Name of the catalog resource.
pub const CATALOG_ASSET: &str = "cocktails.json";

const BUNDLED_FILES: &[(&str, &str)] = &[(CATALOG_ASSET, include_str!("../assets/cocktails.json"))];

const BUNDLED_GLASSES: &[(&str, &str)] = &[
    ("coupe", include_str!("../assets/glasses/coupe.txt")),
    ("highball", include_str!("../assets/glasses/highball.txt")),
    ("martini", include_str!("../assets/glasses/martini.txt")),
    ("rocks", include_str!("../assets/glasses/rocks.txt")),
    ("wine", include_str!("../assets/glasses/wine.txt")),
];

/// Asset-reading facility the catalog loader reads through.
pub trait AssetSource {
    fn read_to_string(&self, name: &str) -> io::Result<String>;
}

/// Resources embedded in the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledAssets;

impl AssetSource for BundledAssets {
    fn read_to_string(&self, name: &str) -> io::Result<String> {
        BUNDLED_FILES
            .iter()
            .find(|(file, _)| *file == name)
            .map(|(_, content)| (*content).to_string())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("no bundled asset `{}`", name))
            })
    }
}

/// Resolves a recipe's `image` reference to something drawable.
pub trait ImageResolver {
    fn resolve(&self, reference: &str) -> Option<&str>;
}

/// Glass pictures embedded in the binary, as multi-line text art.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledImages;

impl ImageResolver for BundledImages {
    /// Matching ignores case, surrounding whitespace and a file extension, so
    /// `"Coupe"`, `"coupe.png"` and `" coupe "` all resolve to the same art.
    fn resolve(&self, reference: &str) -> Option<&str> {
        let key = normalize_image_ref(reference);
        if key.is_empty() {
            return None;
        }
        BUNDLED_GLASSES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, art)| *art)
    }
}

fn normalize_image_ref(reference: &str) -> String {
    let trimmed = reference.trim();
    let stem = match trimmed.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => trimmed,
    };
    stem.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_is_present() {
        let content = BundledAssets.read_to_string(CATALOG_ASSET).unwrap();
        assert!(content.trim_start().starts_with('['));
    }

    #[test]
    fn test_missing_asset_is_not_found() {
        let err = BundledAssets.read_to_string("nope.json").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_image_resolution_is_lenient() {
        assert!(BundledImages.resolve("coupe").is_some());
        assert!(BundledImages.resolve("Coupe.png").is_some());
        assert!(BundledImages.resolve("  HIGHBALL ").is_some());
        assert_eq!(BundledImages.resolve("rocks"), BundledImages.resolve("rocks.jpg"));
    }

    #[test]
    fn test_unknown_image_does_not_resolve() {
        assert!(BundledImages.resolve("hurricane").is_none());
        assert!(BundledImages.resolve("").is_none());
        assert!(BundledImages.resolve("   ").is_none());
    }
}
