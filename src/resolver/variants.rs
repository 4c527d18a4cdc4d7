//! Filename variant strategy
//!
//! Upstream systems name images by different composite keys, so each work
//! item yields three candidate base names tried in a fixed order. The unique
//! reference is tried first as the most specific, least ambiguous key.

use crate::error::ResolveResult;
use crate::resolver::ImageResolver;
use crate::types::WorkItem;
use std::path::PathBuf;

/// Suffix appended to every candidate base name
const VARIANT_SUFFIX: &str = "_a";

/// Tries candidate filenames for a work item in precedence order
#[derive(Debug, Clone)]
pub struct VariantStrategy {
    resolver: ImageResolver,
}

impl VariantStrategy {
    /// Create a strategy backed by the given resolver
    pub fn new(resolver: ImageResolver) -> Self {
        Self { resolver }
    }

    /// Candidate base names for an item, in the order they are tried:
    /// 1. `{unique_reference}_a`
    /// 2. `{base_reference}{sequence_number}{color_code}_a`
    /// 3. `{base_reference}{sequence_number}_a`
    pub fn candidates(item: &WorkItem) -> [String; 3] {
        [
            format!("{}{}", item.unique_reference, VARIANT_SUFFIX),
            format!(
                "{}{}{}{}",
                item.base_reference, item.sequence_number, item.color_code, VARIANT_SUFFIX
            ),
            format!(
                "{}{}{}",
                item.base_reference, item.sequence_number, VARIANT_SUFFIX
            ),
        ]
    }

    /// Resolve an item to an image path, stopping at the first variant
    /// that matches. Returns `Ok(None)` only if all three variants miss.
    pub fn find_image(&self, item: &WorkItem) -> ResolveResult<Option<PathBuf>> {
        for candidate in Self::candidates(item) {
            if let Some(path) = self.resolver.resolve(&candidate)? {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn item() -> WorkItem {
        WorkItem {
            unique_reference: "A1".into(),
            sequence_number: "1".into(),
            color_code: "RED".into(),
            base_reference: "BASEA".into(),
        }
    }

    #[test]
    fn test_candidate_order() {
        let candidates = VariantStrategy::candidates(&item());
        assert_eq!(candidates[0], "A1_a");
        assert_eq!(candidates[1], "BASEA1RED_a");
        assert_eq!(candidates[2], "BASEA1_a");
    }

    #[test]
    fn test_first_variant_wins_when_both_match() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("A1_a.jpg"));
        touch(&dir.path().join("BASEA1RED_a.jpg"));

        let strategy = VariantStrategy::new(ImageResolver::new(dir.path()));
        let found = strategy.find_image(&item()).unwrap().unwrap();
        assert!(found.ends_with("A1_a.jpg"));
    }

    #[test]
    fn test_falls_through_to_second_variant() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("BASEA1RED_a.jpg"));

        let strategy = VariantStrategy::new(ImageResolver::new(dir.path()));
        let found = strategy.find_image(&item()).unwrap().unwrap();
        assert!(found.ends_with("BASEA1RED_a.jpg"));
    }

    #[test]
    fn test_falls_through_to_third_variant() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("sub/BASEA1_a.png"));

        let strategy = VariantStrategy::new(ImageResolver::new(dir.path()));
        let found = strategy.find_image(&item()).unwrap().unwrap();
        assert!(found.ends_with("sub/BASEA1_a.png"));
    }

    #[test]
    fn test_all_variants_miss() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("unrelated.jpg"));

        let strategy = VariantStrategy::new(ImageResolver::new(dir.path()));
        assert_eq!(strategy.find_image(&item()).unwrap(), None);
    }
}
