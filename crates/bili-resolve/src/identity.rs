use std::sync::LazyLock;

use regex::Regex;

// Ids live in the URL path. A BV id is the literal marker plus exactly ten
// word characters; legacy ids are `av` plus digits. Both must sit on path
// segment boundaries so look-alike tokens inside longer segments are not
// picked up.
static BV_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|/)(BV\w{10})(?:[/?#]|$)").unwrap());
static AV_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|/)av(\d+)(?:[/?#]|$)").unwrap());

/// A video as addressed by the page URL.
///
/// At least one id is present when built through [`VideoIdentity::extract`];
/// both are kept when the URL carries both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoIdentity {
    /// New-style id, case preserved exactly as it appeared.
    pub bvid: Option<String>,
    /// Legacy numeric id, digits only.
    pub avid: Option<String>,
}

impl VideoIdentity {
    /// Pulls the video ids out of a page URL or bare path.
    ///
    /// Returns `None` when the URL addresses no video, which callers treat
    /// as "not ours" rather than an error.
    pub fn extract(url: &str) -> Option<Self> {
        let bvid = BV_REGEX
            .captures(url)
            .map(|captures| captures[1].to_string());
        let avid = AV_REGEX
            .captures(url)
            .map(|captures| captures[1].to_string());

        if bvid.is_none() && avid.is_none() {
            return None;
        }
        Some(Self { bvid, avid })
    }

    /// Query parameter for the info endpoint. The BV id wins when both ids
    /// were captured.
    pub fn id_param(&self) -> (&'static str, &str) {
        match &self.bvid {
            Some(bvid) => ("bvid", bvid),
            None => ("aid", self.avid.as_deref().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bv_id() {
        let identity =
            VideoIdentity::extract("https://www.bilibili.com/video/BV1GJ411x7h7").unwrap();
        assert_eq!(identity.bvid.as_deref(), Some("BV1GJ411x7h7"));
        assert_eq!(identity.avid, None);
    }

    #[test]
    fn test_extract_bv_id_with_query_and_slash() {
        let identity =
            VideoIdentity::extract("https://www.bilibili.com/video/BV1GJ411x7h7/?p=2").unwrap();
        assert_eq!(identity.bvid.as_deref(), Some("BV1GJ411x7h7"));

        let identity =
            VideoIdentity::extract("https://www.bilibili.com/video/BV1GJ411x7h7?p=2#top").unwrap();
        assert_eq!(identity.bvid.as_deref(), Some("BV1GJ411x7h7"));
    }

    #[test]
    fn test_extract_preserves_case() {
        let identity = VideoIdentity::extract("/video/BV1aBcDeFgH2").unwrap();
        assert_eq!(identity.bvid.as_deref(), Some("BV1aBcDeFgH2"));
    }

    #[test]
    fn test_extract_rejects_wrong_length() {
        // Eleven word characters after the marker is not a BV id.
        assert_eq!(
            VideoIdentity::extract("https://www.bilibili.com/video/BV1GJ411x7h7Z"),
            None
        );
        assert_eq!(VideoIdentity::extract("/video/BV1GJ411x7"), None);
    }

    #[test]
    fn test_extract_requires_segment_boundary() {
        assert_eq!(
            VideoIdentity::extract("https://www.bilibili.com/video/xBV1GJ411x7h7"),
            None
        );
    }

    #[test]
    fn test_extract_legacy_av_id() {
        let identity = VideoIdentity::extract("https://www.bilibili.com/video/av170001").unwrap();
        assert_eq!(identity.bvid, None);
        assert_eq!(identity.avid.as_deref(), Some("170001"));
    }

    #[test]
    fn test_extract_both_ids() {
        let identity = VideoIdentity::extract("/av170001/BV1GJ411x7h7").unwrap();
        assert_eq!(identity.avid.as_deref(), Some("170001"));
        assert_eq!(identity.bvid.as_deref(), Some("BV1GJ411x7h7"));
        // Lookups go through the BV id when both are present.
        assert_eq!(identity.id_param(), ("bvid", "BV1GJ411x7h7"));
    }

    #[test]
    fn test_extract_no_id() {
        assert_eq!(VideoIdentity::extract("https://www.bilibili.com/"), None);
        assert_eq!(
            VideoIdentity::extract("https://www.bilibili.com/bangumi/play/ss12548"),
            None
        );
        assert_eq!(VideoIdentity::extract("https://example.com/watch?v=av"), None);
    }

    #[test]
    fn test_id_param_legacy_only() {
        let identity = VideoIdentity::extract("/video/av170001").unwrap();
        assert_eq!(identity.id_param(), ("aid", "170001"));
    }
}
