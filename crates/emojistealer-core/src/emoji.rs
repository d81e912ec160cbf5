//! The uniform emoji record every server family is normalized into.

/// Display/grouping label for emoji without a category. Never stored on an
/// [`Emoji`].
pub const UNCATEGORIZED: &str = "(uncategorized)";

/// Prefix Pleroma uses for pack tags, sometimes leaking into Mastodon-API
/// category names.
pub const PACK_PREFIX: &str = "pack:";

/// A single custom emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji {
    /// Identifier users type between colons. Never empty.
    pub shortcode: String,
    /// Category/pack, if the server reports one.
    pub category: Option<String>,
    /// Original (possibly animated) asset. Empty if unknown.
    pub original_url: String,
    /// Static asset. Empty if unknown.
    pub static_url: String,
}

/// Which asset to download when an emoji has both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UrlPreference {
    Original,
    #[default]
    Static,
}

impl Emoji {
    /// Build an emoji, rejecting records that are unusable.
    ///
    /// Returns `None` when the shortcode is empty or when neither URL is set.
    pub fn new(
        shortcode: impl Into<String>,
        category: Option<String>,
        original_url: impl Into<String>,
        static_url: impl Into<String>,
    ) -> Option<Self> {
        let emoji = Self {
            shortcode: shortcode.into(),
            category: category.filter(|c| !c.is_empty()),
            original_url: original_url.into(),
            static_url: static_url.into(),
        };
        if emoji.shortcode.is_empty() || !emoji.has_url() {
            return None;
        }
        Some(emoji)
    }

    pub fn has_url(&self) -> bool {
        !self.original_url.is_empty() || !self.static_url.is_empty()
    }

    /// The asset URL to download, falling back to whichever one is set.
    pub fn url(&self, preference: UrlPreference) -> Option<&str> {
        let (first, second) = match preference {
            UrlPreference::Original => (&self.original_url, &self.static_url),
            UrlPreference::Static => (&self.static_url, &self.original_url),
        };
        [first, second]
            .into_iter()
            .find(|url| !url.is_empty())
            .map(String::as_str)
    }

    /// Category label for listings, with [`UNCATEGORIZED`] standing in for
    /// `None`.
    pub fn display_category(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// Strip a leading `pack:` from a category name. Empty results become `None`.
pub fn strip_pack_prefix(category: Option<&str>) -> Option<String> {
    let category = category?;
    let stripped = category.strip_prefix(PACK_PREFIX).unwrap_or(category);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_shortcode() {
        assert!(Emoji::new("", None, "https://a/x.png", "").is_none());
    }

    #[test]
    fn test_new_rejects_missing_urls() {
        assert!(Emoji::new("blobcat", None, "", "").is_none());
    }

    #[test]
    fn test_new_keeps_static_only_emoji() {
        let emoji = Emoji::new("blobcat", None, "", "https://a/blobcat.png").unwrap();
        assert!(emoji.original_url.is_empty());
        assert_eq!(emoji.static_url, "https://a/blobcat.png");
    }

    #[test]
    fn test_new_drops_empty_category() {
        let emoji = Emoji::new("a", Some(String::new()), "https://a/a.png", "").unwrap();
        assert_eq!(emoji.category, None);
        assert_eq!(emoji.display_category(), UNCATEGORIZED);
    }

    #[test]
    fn test_url_preference_and_fallback() {
        let both = Emoji::new("a", None, "https://a/a.gif", "https://a/a.png").unwrap();
        assert_eq!(both.url(UrlPreference::Original), Some("https://a/a.gif"));
        assert_eq!(both.url(UrlPreference::Static), Some("https://a/a.png"));

        let original_only = Emoji::new("b", None, "https://a/b.gif", "").unwrap();
        assert_eq!(original_only.url(UrlPreference::Static), Some("https://a/b.gif"));

        let static_only = Emoji::new("c", None, "", "https://a/c.png").unwrap();
        assert_eq!(static_only.url(UrlPreference::Original), Some("https://a/c.png"));
    }

    #[test]
    fn test_strip_pack_prefix() {
        assert_eq!(strip_pack_prefix(Some("pack:blobs")), Some("blobs".into()));
        assert_eq!(strip_pack_prefix(Some("blobs")), Some("blobs".into()));
        assert_eq!(strip_pack_prefix(Some("pack:")), None);
        assert_eq!(strip_pack_prefix(Some("")), None);
        assert_eq!(strip_pack_prefix(None), None);
    }
}
