//! The `ref` query parameter. Read once and kept, never sent anywhere.

use reqwest::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralTag(String);

impl ReferralTag {
    /// Wrap a raw tag, ignoring blank values.
    pub fn new(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            None
        } else {
            Some(Self(tag.to_string()))
        }
    }

    /// Extract `ref` from a full page URL, e.g. `https://stake.example/?ref=alice`.
    pub fn from_url(url: &str) -> Option<Self> {
        let parsed = Url::parse(url).ok()?;
        let value = parsed
            .query_pairs()
            .find(|(key, _)| key == "ref")
            .map(|(_, value)| value.into_owned())?;
        Self::new(&value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferralTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_ref_from_url() {
        let tag = ReferralTag::from_url("https://stake.example/?foo=1&ref=alice%20b").unwrap();
        assert_eq!(tag.as_str(), "alice b");
    }

    #[test]
    fn missing_or_blank_ref_is_none() {
        assert!(ReferralTag::from_url("https://stake.example/?foo=1").is_none());
        assert!(ReferralTag::from_url("https://stake.example/?ref=").is_none());
        assert!(ReferralTag::from_url("not a url").is_none());
        assert!(ReferralTag::new("   ").is_none());
    }
}
