//! The seam between resolution logic and the upstream service.
//!
//! [`VideoApi`] is everything the resolver needs from the outside world;
//! the shipped implementation is [`BiliApi`](crate::api::BiliApi) and tests
//! substitute an in-memory one.

use async_trait::async_trait;

use crate::{error::ResolveError, identity::VideoIdentity};

/// What the info endpoint tells us about a video.
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    /// Canonical BV id as reported by the service. Present even when the
    /// lookup went through a legacy av id.
    pub bvid: String,
    pub title: String,
    /// One entry per part, in part order.
    pub parts: Vec<PartMeta>,
}

#[derive(Debug, Clone)]
pub struct PartMeta {
    /// Content id of the part; play-address lookups are keyed by it.
    pub cid: u64,
}

/// Parameters of one play-address lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRequest {
    pub bvid: String,
    pub cid: u64,
    /// Capability mask, see [`format_mask`](crate::format::format_mask).
    pub fnval: u32,
    pub fourk: u8,
}

/// DASH streams currently on offer for one part.
#[derive(Debug, Clone, Default)]
pub struct PlayAddresses {
    pub video: Vec<StreamCandidate>,
    pub audio: Vec<StreamCandidate>,
}

/// One stream variant. `id` is the service's quality code (`qn`); the URL
/// is signed and expires, which is why it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamCandidate {
    pub id: u32,
    pub url: String,
}

#[async_trait]
pub trait VideoApi: Send + Sync {
    async fn video_info(&self, identity: &VideoIdentity) -> Result<VideoMetadata, ResolveError>;

    async fn play_addresses(&self, request: &PlayRequest) -> Result<PlayAddresses, ResolveError>;
}
