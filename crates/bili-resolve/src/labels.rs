//! The label bag persisted on every file descriptor.
//!
//! Labels are the only state that survives between events: the host stores
//! them with the task and hands them back verbatim, so the re-resolver must
//! be able to rebuild everything it needs from these strings alone.

use rustc_hash::FxHashMap;

use crate::error::ResolveError;

pub const PLUGIN: &str = "plugin";
pub const BVID: &str = "bvid";
pub const CID: &str = "cid";
pub const PART: &str = "part";
pub const KIND: &str = "kind";
pub const QN: &str = "qn";
pub const RESOLVED: &str = "resolved";

/// Marker value under the [`PLUGIN`] key. Files without it belong to some
/// other resolver and are never touched.
pub const PLUGIN_NAME: &str = "bilibili";

pub fn is_ours(labels: &FxHashMap<String, String>) -> bool {
    labels.get(PLUGIN).is_some_and(|value| value == PLUGIN_NAME)
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum StreamKind {
    Video,
    Audio,
}

impl StreamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Video => "video",
            StreamKind::Audio => "audio",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            StreamKind::Video => "mp4",
            StreamKind::Audio => "m4a",
        }
    }
}

/// Typed view over a descriptor's label bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLabels {
    pub bvid: String,
    pub cid: u64,
    pub part: usize,
    pub kind: StreamKind,
    /// Quality code of the last successfully chosen video stream. Absent
    /// until the first refresh, and never set on audio files.
    pub qn: Option<u32>,
    /// Whether `url` has ever held a real media address. Monotonic: once
    /// true it is never written back to false.
    pub resolved: bool,
}

impl FileLabels {
    pub fn new(bvid: String, cid: u64, part: usize, kind: StreamKind) -> Self {
        Self {
            bvid,
            cid,
            part,
            kind,
            qn: None,
            resolved: false,
        }
    }

    /// Rebuilds the typed view from a persisted bag.
    ///
    /// Fails only on bags that carry our marker but lost a required key,
    /// which means the host's task storage was tampered with.
    pub fn from_map(labels: &FxHashMap<String, String>) -> Result<Self, ResolveError> {
        let bvid = labels
            .get(BVID)
            .filter(|value| !value.is_empty())
            .ok_or(ResolveError::Label(BVID))?
            .clone();
        let cid = labels
            .get(CID)
            .and_then(|value| value.parse().ok())
            .ok_or(ResolveError::Label(CID))?;
        let part = labels
            .get(PART)
            .and_then(|value| value.parse().ok())
            .ok_or(ResolveError::Label(PART))?;
        let kind = match labels.get(KIND).map(String::as_str) {
            Some("video") => StreamKind::Video,
            Some("audio") => StreamKind::Audio,
            _ => return Err(ResolveError::Label(KIND)),
        };
        let qn = labels.get(QN).and_then(|value| value.parse().ok());
        let resolved = labels.get(RESOLVED).is_some_and(|value| value == "true");

        Ok(Self {
            bvid,
            cid,
            part,
            kind,
            qn,
            resolved,
        })
    }

    pub fn to_map(&self) -> FxHashMap<String, String> {
        let mut map = FxHashMap::default();
        map.insert(PLUGIN.to_string(), PLUGIN_NAME.to_string());
        map.insert(BVID.to_string(), self.bvid.clone());
        map.insert(CID.to_string(), self.cid.to_string());
        map.insert(PART.to_string(), self.part.to_string());
        map.insert(KIND.to_string(), self.kind.as_str().to_string());
        if let Some(qn) = self.qn {
            map.insert(QN.to_string(), qn.to_string());
        }
        map.insert(RESOLVED.to_string(), self.resolved.to_string());
        map
    }
}
