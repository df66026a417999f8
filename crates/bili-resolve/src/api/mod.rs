//! Reqwest-backed access to the public video API.

mod models;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use rustls::{ClientConfig, crypto::ring};
use rustls_platform_verifier::BuilderVerifierExt;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::ResolveError,
    identity::VideoIdentity,
    manifest::REFERER,
    provider::{PartMeta, PlayAddresses, PlayRequest, StreamCandidate, VideoApi, VideoMetadata},
};

use models::{ApiResponse, DashInfo, DashStream, PlayData, ViewData};

pub(crate) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

const VIEW_URL: &str = "https://api.bilibili.com/x/web-interface/view";
const PLAYURL_URL: &str = "https://api.bilibili.com/x/player/playurl";

pub fn default_client() -> Client {
    let provider = Arc::new(ring::default_provider());
    let tls_config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .expect("Failed to configure default TLS protocol versions")
        .with_platform_verifier()
        .unwrap()
        .with_no_client_auth();

    Client::builder()
        .use_preconfigured_tls(tls_config)
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client")
}

/// Client for the public web API.
///
/// Sends the caller's account cookie on every request when one was
/// configured; anonymous access works but caps the offered qualities.
#[derive(Debug, Clone)]
pub struct BiliApi {
    client: Client,
    cookie: Option<String>,
}

impl BiliApi {
    pub fn new(client: Client, cookie: Option<String>) -> Self {
        // An all-whitespace cookie box is the same as no cookie at all.
        let cookie = cookie
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self { client, cookie }
    }

    async fn get_api<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ResolveError> {
        debug!("api request: {url} {params:?}");

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::REFERER, REFERER)
            .header(reqwest::header::USER_AGENT, DEFAULT_UA)
            .query(params);
        if let Some(cookie) = &self.cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }

        let ApiResponse { code, message, data } =
            request.send().await?.json::<ApiResponse<T>>().await?;
        if code != 0 {
            return Err(ResolveError::Api { code, message });
        }
        data.ok_or(ResolveError::Api {
            code,
            message: "response carried no data".to_string(),
        })
    }
}

#[async_trait]
impl VideoApi for BiliApi {
    async fn video_info(&self, identity: &VideoIdentity) -> Result<VideoMetadata, ResolveError> {
        let (key, id) = identity.id_param();
        let params = [(key, id.to_string())];
        let data: ViewData = self.get_api(VIEW_URL, &params).await?;

        Ok(VideoMetadata {
            bvid: data.bvid,
            title: data.title,
            parts: data
                .pages
                .into_iter()
                .map(|page| PartMeta { cid: page.cid })
                .collect(),
        })
    }

    async fn play_addresses(
        &self,
        request: &PlayRequest,
    ) -> Result<PlayAddresses, ResolveError> {
        let params = [
            ("bvid", request.bvid.clone()),
            ("cid", request.cid.to_string()),
            ("fnval", request.fnval.to_string()),
            ("fourk", request.fourk.to_string()),
        ];
        let data: PlayData = self.get_api(PLAYURL_URL, &params).await?;

        let dash = data.dash.ok_or(ResolveError::NoStreams)?;
        Ok(candidates_from_dash(dash))
    }
}

fn candidates_from_dash(dash: DashInfo) -> PlayAddresses {
    let into_candidate = |stream: DashStream| StreamCandidate {
        id: stream.id,
        url: stream.base_url,
    };
    PlayAddresses {
        video: dash.video.into_iter().map(into_candidate).collect(),
        audio: dash
            .audio
            .unwrap_or_default()
            .into_iter()
            .map(into_candidate)
            .collect(),
    }
}
