//! Event entry points driven by the hosting download manager.
//!
//! A resolve turns a page URL into a [`Manifest`]; task start and task
//! error events re-resolve the short-lived media address of a single file
//! in place. Each call works only on its own context, so one resolver can
//! serve any number of concurrent tasks.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::{
    api::{BiliApi, default_client},
    error::ResolveError,
    format::format_mask,
    identity::VideoIdentity,
    labels::{self, FileLabels, StreamKind},
    manifest::{FileDescriptor, Manifest, build_manifest},
    parts::expand_parts,
    provider::{PlayRequest, VideoApi},
    select::{pick_audio, pick_video},
    settings::Settings,
};

/// Matches any page URL of the service; hosts use it to route resolve
/// events here. Whether the URL names a video is decided later, during
/// the resolve itself.
pub static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:https?://)?(?:[\w-]+\.)*bilibili\.com/").unwrap());

/// A resolve request and its outcome.
#[derive(Debug, Default)]
pub struct ResolveContext {
    pub url: String,
    /// Set on success; left `None` when the URL is not ours.
    pub manifest: Option<Manifest>,
}

impl ResolveContext {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            manifest: None,
        }
    }
}

/// A task lifecycle event for a single file.
#[derive(Debug)]
pub struct TaskContext {
    pub file: FileDescriptor,
    /// Whether the host marked the task as previously failed, which turns
    /// the start-of-task refresh into a forced one.
    pub errored: bool,
    /// Set by the error handler to ask the host for another attempt.
    pub continue_requested: bool,
}

impl TaskContext {
    pub fn new(file: FileDescriptor) -> Self {
        Self {
            file,
            errored: false,
            continue_requested: false,
        }
    }
}

pub struct BiliResolver {
    api: Arc<dyn VideoApi>,
    settings: Settings,
}

impl BiliResolver {
    pub fn new(settings: Settings) -> Self {
        let api = BiliApi::new(default_client(), settings.cookie.clone());
        Self {
            api: Arc::new(api),
            settings,
        }
    }

    /// Same resolver against a different upstream, used by tests and by
    /// hosts that pool HTTP clients themselves.
    pub fn with_api(api: Arc<dyn VideoApi>, settings: Settings) -> Self {
        Self { api, settings }
    }

    pub fn handles(url: &str) -> bool {
        URL_REGEX.is_match(url)
    }

    /// Resolves a page URL into a manifest.
    ///
    /// URLs that carry no video id are left alone (`Ok`, no manifest) so
    /// the host can offer them to other resolvers. Upstream failures abort
    /// the whole resolve; a partial manifest is never produced.
    pub async fn on_resolve(&self, ctx: &mut ResolveContext) -> Result<(), ResolveError> {
        let Some(identity) = VideoIdentity::extract(&ctx.url) else {
            debug!(url = %ctx.url, "no video id in url, not ours to resolve");
            return Ok(());
        };

        let meta = self.api.video_info(&identity).await?;
        let selector = part_selector(&ctx.url);
        let selection = expand_parts(selector.as_deref(), meta.parts.len());
        debug!(
            title = %meta.title,
            parts = meta.parts.len(),
            selected = selection.len(),
            "resolved video"
        );

        ctx.manifest = Some(build_manifest(&meta, &selection, &ctx.url, &identity));
        Ok(())
    }

    /// Makes sure the file carries a live media address before the host
    /// starts downloading. A file that resolved before is only refreshed
    /// when the task comes back from a failure.
    pub async fn on_task_start(&self, ctx: &mut TaskContext) -> Result<(), ResolveError> {
        self.refresh_url(&mut ctx.file, ctx.errored).await
    }

    /// Handles a mid-download failure: force-refresh the address, then ask
    /// the host to retry no matter how the refresh went. A stale address is
    /// still worth one more attempt, and retries are the host's call.
    pub async fn on_task_error(&self, ctx: &mut TaskContext) -> Result<(), ResolveError> {
        let refreshed = self.refresh_url(&mut ctx.file, true).await;
        if let Err(error) = &refreshed {
            debug!(name = %ctx.file.name, error = %error, "refresh after task error failed");
        }
        ctx.continue_requested = true;
        refreshed
    }

    async fn refresh_url(
        &self,
        file: &mut FileDescriptor,
        force: bool,
    ) -> Result<(), ResolveError> {
        if !labels::is_ours(&file.labels) {
            debug!(name = %file.name, "file was created by someone else, skipping");
            return Ok(());
        }

        let bag = FileLabels::from_map(&file.labels)?;
        if bag.resolved && !force {
            debug!(name = %file.name, "media url still considered fresh");
            return Ok(());
        }

        let request = PlayRequest {
            bvid: bag.bvid.clone(),
            cid: bag.cid,
            fnval: format_mask(&self.settings),
            fourk: 1,
        };
        let addresses = self.api.play_addresses(&request).await?;

        let chosen = match bag.kind {
            StreamKind::Video => {
                let desired = bag.qn.or(self.settings.quality);
                pick_video(&addresses.video, desired, self.settings.quality_fallback)
            }
            StreamKind::Audio => pick_audio(&addresses.audio, self.settings.quality_fallback),
        }
        .ok_or(ResolveError::NoStreams)?;

        // Mutation only happens past this point: a failure above leaves the
        // descriptor exactly as it was.
        if bag.kind == StreamKind::Video {
            file.labels
                .insert(labels::QN.to_string(), chosen.id.to_string());
        }
        file.url = chosen.url.clone();
        file.labels
            .insert(labels::RESOLVED.to_string(), "true".to_string());

        debug!(name = %file.name, qn = chosen.id, "media url refreshed");
        Ok(())
    }
}

fn part_selector(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "p")
        .map(|(_, value)| value.into_owned())
}
