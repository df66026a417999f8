use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::{
    identity::VideoIdentity,
    labels::{FileLabels, StreamKind},
    provider::VideoMetadata,
};

/// Every media request must carry this referer or the CDN answers 403.
pub const REFERER: &str = "https://www.bilibili.com";

/// What a resolve hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Display name for the whole download, the video title.
    pub name: String,
    pub files: Vec<FileDescriptor>,
}

/// One downloadable stream.
///
/// `url` holds the original page address until the first refresh writes a
/// real media address over it; the label bag carries everything needed to
/// do that, see [`labels`](crate::labels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub url: String,
    pub headers: FxHashMap<String, String>,
    pub labels: FxHashMap<String, String>,
}

/// Builds the manifest for the selected parts.
///
/// Parts are emitted in ascending order, video before audio within a part,
/// so the host queues streams of one part adjacently. Multi-part videos get
/// a `(P{n})` suffix with the user-facing 1-based part number.
pub fn build_manifest(
    meta: &VideoMetadata,
    selection: &BTreeSet<usize>,
    original_url: &str,
    identity: &VideoIdentity,
) -> Manifest {
    // The service's canonical id is preferred so files created from a
    // legacy av URL re-resolve through the BV path.
    let bvid = if meta.bvid.is_empty() {
        identity.bvid.clone().unwrap_or_default()
    } else {
        meta.bvid.clone()
    };

    let multi_part = meta.parts.len() > 1;
    let mut files = Vec::with_capacity(selection.len() * 2);

    for &part in selection {
        let Some(part_meta) = meta.parts.get(part) else {
            continue;
        };
        let stem = if multi_part {
            format!("{}(P{})", meta.title, part + 1)
        } else {
            meta.title.clone()
        };

        for kind in [StreamKind::Video, StreamKind::Audio] {
            let labels = FileLabels::new(bvid.clone(), part_meta.cid, part, kind);
            files.push(FileDescriptor {
                name: format!("{stem}.{}.{}", kind.as_str(), kind.extension()),
                url: original_url.to_string(),
                headers: referer_headers(),
                labels: labels.to_map(),
            });
        }
    }

    Manifest {
        name: meta.title.clone(),
        files,
    }
}

fn referer_headers() -> FxHashMap<String, String> {
    let mut headers = FxHashMap::default();
    headers.insert("Referer".to_string(), REFERER.to_string());
    headers
}
