//! bili-resolve: turn Bilibili video page URLs into downloadable DASH
//! manifests, and keep the short-lived media URLs in those manifests fresh
//! across download retries.
//!
//! The crate is built to sit behind a download manager. The host drives
//! three events and owns everything else (task storage, retries, the
//! actual transfer):
//!
//! - [`BiliResolver::on_resolve`] - page URL in, [`Manifest`] out: one
//!   video and one audio file per selected part, named after the video and
//!   carrying a persistable label bag.
//! - [`BiliResolver::on_task_start`] - writes a live media address into a
//!   file descriptor just before the host starts downloading it.
//! - [`BiliResolver::on_task_error`] - force-refreshes the address after a
//!   mid-download failure and asks the host to retry.
//!
//! ## Core Types
//!
//! - [`BiliResolver`] - the event handlers, one instance per settings bag
//! - [`Manifest`] / [`FileDescriptor`] - what a resolve hands back
//! - [`Settings`] - host-provided options (cookie, HDR, Dolby, quality)
//! - [`VideoApi`](provider::VideoApi) - trait seam to the upstream service,
//!   implemented by [`BiliApi`](api::BiliApi)
//!
//! ## Example
//!
//! ```rust,ignore
//! use bili_resolve::{BiliResolver, ResolveContext, Settings, TaskContext};
//!
//! # async fn doc_test() -> Result<(), bili_resolve::ResolveError> {
//! let resolver = BiliResolver::new(Settings::default());
//!
//! let mut ctx = ResolveContext::new("https://www.bilibili.com/video/BV1GJ411x7h7?p=2-4");
//! resolver.on_resolve(&mut ctx).await?;
//! let manifest = ctx.manifest.expect("a video url resolves to a manifest");
//!
//! // Later, when the host is about to download one of the files:
//! let mut task = TaskContext::new(manifest.files[0].clone());
//! resolver.on_task_start(&mut task).await?;
//! assert!(task.file.url.starts_with("https://"));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod format;
pub mod identity;
pub mod labels;
pub mod manifest;
pub mod parts;
pub mod provider;
pub mod resolver;
pub mod select;
pub mod settings;

pub use error::ResolveError;
pub use identity::VideoIdentity;
pub use labels::{FileLabels, StreamKind};
pub use manifest::{FileDescriptor, Manifest};
pub use resolver::{BiliResolver, ResolveContext, TaskContext, URL_REGEX};
pub use settings::{QualityFallback, Settings};
