use serde::Deserialize;

/// Standard response envelope; `data` goes missing when `code` is non-zero.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct ViewData {
    pub bvid: String,
    pub title: String,
    #[serde(default)]
    pub pages: Vec<PageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    pub cid: u64,
}

#[derive(Debug, Deserialize)]
pub struct PlayData {
    /// Absent when the service only offers progressive previews, which
    /// happens for non-logged-in requests against paid content.
    pub dash: Option<DashInfo>,
}

#[derive(Debug, Deserialize)]
pub struct DashInfo {
    #[serde(default)]
    pub video: Vec<DashStream>,
    /// Null for videos without an audio track.
    #[serde(default)]
    pub audio: Option<Vec<DashStream>>,
}

#[derive(Debug, Deserialize)]
pub struct DashStream {
    pub id: u32,
    // The service sends both `baseUrl` and `base_url`; the rename picks the
    // first and the duplicate is ignored as an unknown field.
    #[serde(rename = "baseUrl")]
    pub base_url: String,
}
