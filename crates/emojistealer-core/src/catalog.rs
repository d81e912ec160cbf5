//! Lookup structures over a normalized emoji list.

use std::collections::{BTreeMap, HashMap};

use crate::emoji::Emoji;

/// Every known emoji, indexed by shortcode and grouped by category.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    emoji: Vec<Emoji>,
    by_shortcode: HashMap<String, Emoji>,
    categories: BTreeMap<String, Vec<Emoji>>,
}

impl Catalog {
    /// Build the catalog. A repeated shortcode replaces the earlier entry in
    /// the lookup map.
    pub fn new(emoji: Vec<Emoji>) -> Self {
        let mut by_shortcode = HashMap::with_capacity(emoji.len());
        let mut categories: BTreeMap<String, Vec<Emoji>> = BTreeMap::new();

        for e in &emoji {
            by_shortcode.insert(e.shortcode.clone(), e.clone());
            categories
                .entry(e.display_category().to_string())
                .or_default()
                .push(e.clone());
        }

        Self {
            emoji,
            by_shortcode,
            categories,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.emoji.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emoji.len()
    }

    /// All emoji in listing order.
    pub fn all(&self) -> &[Emoji] {
        &self.emoji
    }

    pub fn get(&self, shortcode: &str) -> Option<&Emoji> {
        self.by_shortcode.get(shortcode)
    }

    /// Emoji in a category, by display label (so `(uncategorized)` works).
    pub fn category(&self, name: &str) -> Option<&[Emoji]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Categories sorted by label.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[Emoji])> {
        self.categories
            .iter()
            .map(|(name, emoji)| (name.as_str(), emoji.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emoji::UNCATEGORIZED;

    fn emoji(shortcode: &str, category: Option<&str>, url: &str) -> Emoji {
        Emoji::new(shortcode, category.map(String::from), url, url).unwrap()
    }

    #[test]
    fn test_groups_by_category_sorted() {
        let catalog = Catalog::new(vec![
            emoji("z", Some("zeta"), "https://a/z.png"),
            emoji("a", Some("alpha"), "https://a/a.png"),
            emoji("n", None, "https://a/n.png"),
            emoji("b", Some("alpha"), "https://a/b.png"),
        ]);

        let names: Vec<&str> = catalog.categories().map(|(name, _)| name).collect();
        assert_eq!(names, vec![UNCATEGORIZED, "alpha", "zeta"]);

        let alpha: Vec<&str> = catalog
            .category("alpha")
            .unwrap()
            .iter()
            .map(|e| e.shortcode.as_str())
            .collect();
        assert_eq!(alpha, vec!["a", "b"]);
    }

    #[test]
    fn test_uncategorized_label_is_display_only() {
        let catalog = Catalog::new(vec![emoji("n", None, "https://a/n.png")]);
        let group = catalog.category(UNCATEGORIZED).unwrap();
        assert_eq!(group[0].category, None);
    }

    #[test]
    fn test_duplicate_shortcode_last_wins() {
        let catalog = Catalog::new(vec![
            emoji("dup", Some("one"), "https://a/1.png"),
            emoji("dup", Some("two"), "https://a/2.png"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("dup").unwrap().static_url, "https://a/2.png");
    }

    #[test]
    fn test_unknown_lookups() {
        let catalog = Catalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.get("nope").is_none());
        assert!(catalog.category("nope").is_none());
    }
}
