use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::{sniff_mime, EnhanceError, EnhancedImage};

#[derive(Debug, Clone)]
pub struct EnhanceSettings {
    /// Full URL of the enhancement endpoint (`.../enhance`).
    pub endpoint: String,
    /// Multipart field carrying the image.
    pub field_name: String,
    pub connect_timeout: Duration,
    /// `None` waits for the server indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for EnhanceSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/enhance".to_string(),
            field_name: "file".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

impl EnhanceSettings {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait Enhancer {
    async fn enhance(&self, name: &str, bytes: &[u8]) -> Result<EnhancedImage, EnhanceError>;
}

#[derive(Debug, Deserialize)]
struct EnhanceReply {
    #[serde(alias = "enhanced_path")]
    enhanced: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorReply {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestEnhancer {
    settings: EnhanceSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestEnhancer {
    pub fn new(settings: EnhanceSettings) -> Result<Self, EnhanceError> {
        let endpoint = Url::parse(&settings.endpoint).map_err(|err| {
            EnhanceError::Transport(format!("invalid endpoint {}: {err}", settings.endpoint))
        })?;
        let client = build_client(&settings)?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    fn build_form(&self, name: &str, bytes: &[u8]) -> Result<Form, EnhanceError> {
        let part = Part::bytes(bytes.to_vec())
            .file_name(name.to_string())
            .mime_str(sniff_mime(name, bytes))
            .map_err(|err| EnhanceError::Transport(err.to_string()))?;
        Ok(Form::new().part(self.settings.field_name.clone(), part))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(settings: &EnhanceSettings) -> Result<reqwest::Client, EnhanceError> {
    let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
    if let Some(timeout) = settings.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| EnhanceError::Transport(err.to_string()))
}

// The browser owns connection handling; timeouts are not configurable there.
#[cfg(target_arch = "wasm32")]
fn build_client(_settings: &EnhanceSettings) -> Result<reqwest::Client, EnhanceError> {
    reqwest::Client::builder()
        .build()
        .map_err(|err| EnhanceError::Transport(err.to_string()))
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl Enhancer for ReqwestEnhancer {
    async fn enhance(&self, name: &str, bytes: &[u8]) -> Result<EnhancedImage, EnhanceError> {
        engine_info!(
            "Uploading '{}' ({} bytes) to {}",
            name,
            bytes.len(),
            self.endpoint
        );
        let form = self.build_form(name, bytes)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorReply>(&body)
                .ok()
                .and_then(|reply| reply.error)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| format!("Server responded with status: {}", status.as_u16()));
            engine_warn!("Endpoint replied {}: {}", status, message);
            return Err(EnhanceError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let reply: EnhanceReply = serde_json::from_slice(&body)
            .map_err(|err| EnhanceError::MalformedResponse(err.to_string()))?;
        let reference = reply.enhanced.ok_or_else(|| {
            EnhanceError::MalformedResponse("missing \"enhanced\" image reference".to_string())
        })?;
        let src = resolve_image_ref(&self.endpoint, &reference)?;
        engine_debug!("Enhanced image available at {}", truncate_for_log(&src));

        Ok(EnhancedImage { src })
    }
}

/// Makes a server-relative image reference absolute. `data:` URIs and
/// absolute URLs are returned unchanged.
pub fn resolve_image_ref(endpoint: &Url, reference: &str) -> Result<String, EnhanceError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(EnhanceError::MalformedResponse(
            "empty image reference".to_string(),
        ));
    }
    if reference
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
        || Url::parse(reference).is_ok()
    {
        return Ok(reference.to_string());
    }
    endpoint
        .join(reference)
        .map(String::from)
        .map_err(|err| EnhanceError::MalformedResponse(format!("{reference}: {err}")))
}

fn map_reqwest_error(err: reqwest::Error) -> EnhanceError {
    if err.is_timeout() {
        return EnhanceError::Transport(format!("request timed out: {err}"));
    }
    EnhanceError::Transport(err.to_string())
}

fn truncate_for_log(src: &str) -> &str {
    match src.char_indices().nth(64) {
        Some((idx, _)) => &src[..idx],
        None => src,
    }
}
