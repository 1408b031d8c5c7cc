//! REST client for the hosted generative-model service.
//!
//! Covers the two single-shot capabilities: garment analysis
//! (image + instruction in, free text out) and concept generation
//! (prompt in, one image out). Both block until the service responds;
//! failures surface inline with no retry.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::CuratorConfig;

use super::error::CuratorError;
use super::live::LiveSession;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fixed instruction for garment analysis.
const ANALYSIS_INSTRUCTION: &str =
    "Analyze this vintage garment. Identify the likely era, fabric type, construction details, \
     and historical significance. Provide styling advice for a modern context.";

/// Client for the hosted model service.
///
/// Cheaply cloneable; holds the HTTP client and model ids.
#[derive(Clone)]
pub struct CuratorClient {
    client: reqwest::Client,
    config: CuratorConfig,
}

impl CuratorClient {
    /// Create a new curator client.
    ///
    /// # Errors
    ///
    /// Returns `CuratorError::Parse` if the API key contains characters that
    /// cannot appear in a header, and `CuratorError::Http` if the HTTP
    /// client fails to build.
    pub fn new(config: &CuratorConfig) -> Result<Self, CuratorError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(|e| CuratorError::Parse(format!("invalid API key for header: {e}")))?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Analyze a garment photo and return the curator's text.
    ///
    /// # Errors
    ///
    /// Returns `CuratorError` if the request fails, the service rejects it,
    /// or the response carries no text.
    #[instrument(skip(self, image_bytes), fields(model = %self.config.analysis_model, mime = mime_type, size = image_bytes.len()))]
    pub async fn analyze(
        &self,
        image_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, CuratorError> {
        let url = format!(
            "{API_BASE_URL}/models/{}:generateContent",
            self.config.analysis_model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: mime_type.to_owned(),
                            data: BASE64.encode(image_bytes),
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(ANALYSIS_INSTRUCTION.to_owned()),
                    },
                ],
            }],
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let response = check(response).await?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CuratorError::Parse(e.to_string()))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(CuratorError::EmptyResponse(
                "analysis returned no text".to_string(),
            ));
        }
        Ok(text)
    }

    /// Generate one editorial concept render and return it as a data URI.
    ///
    /// The prompt is wrapped in the archive's editorial photography framing
    /// before it reaches the model.
    ///
    /// # Errors
    ///
    /// Returns `CuratorError` if the request fails, the service rejects it,
    /// or no image comes back.
    #[instrument(skip(self, prompt), fields(model = %self.config.image_model))]
    pub async fn generate_concept(&self, prompt: &str) -> Result<String, CuratorError> {
        let url = format!("{API_BASE_URL}/models/{}:predict", self.config.image_model);

        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: editorial_prompt(prompt),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: "3:4".to_owned(),
            },
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let response = check(response).await?;

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| CuratorError::Parse(e.to_string()))?;

        let image = body
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| CuratorError::EmptyResponse("no image generated".to_string()))?;

        let mime = if image.mime_type.is_empty() {
            "image/jpeg".to_owned()
        } else {
            image.mime_type
        };
        Ok(format!("data:{mime};base64,{}", image.bytes_base64_encoded))
    }

    /// Open a bidirectional audio session with the curator persona.
    ///
    /// # Errors
    ///
    /// Returns `CuratorError::Session` if the streaming connection or the
    /// session setup fails.
    pub async fn start_live_session(&self) -> Result<LiveSession, CuratorError> {
        LiveSession::connect(&self.config).await
    }
}

/// Wrap a concept idea in the archive's editorial photography framing.
fn editorial_prompt(prompt: &str) -> String {
    format!(
        "A professional studio editorial photograph of a high-end vintage fashion piece: \
         {prompt}. High fashion aesthetic, dramatic lighting, detailed textures, 8k resolution, \
         cinematic composition."
    )
}

/// Map a non-success response to a `CuratorError`.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, CuratorError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(CuratorError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: String,
    #[serde(default)]
    mime_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editorial_prompt_wraps_idea() {
        let wrapped = editorial_prompt("a 70s suede trench coat");
        assert!(wrapped.contains("a 70s suede trench coat"));
        assert!(wrapped.starts_with("A professional studio editorial photograph"));
    }

    #[test]
    fn test_generate_content_response_parses_text() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Likely late-80s wool."}, {"text": " Pair with wide trousers."}]}}
            ]
        }"#;
        let body: GenerateContentResponse = serde_json::from_str(raw).expect("parse");
        let text: String = body
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        assert_eq!(text, "Likely late-80s wool. Pair with wide trousers.");
    }

    #[test]
    fn test_predict_response_parses_image() {
        let raw = r#"{
            "predictions": [{"bytesBase64Encoded": "aGVsbG8=", "mimeType": "image/jpeg"}]
        }"#;
        let body: PredictResponse = serde_json::from_str(raw).expect("parse");
        let image = body.predictions.into_iter().next().expect("image");
        assert_eq!(image.bytes_base64_encoded, "aGVsbG8=");
        assert_eq!(image.mime_type, "image/jpeg");
    }
}
