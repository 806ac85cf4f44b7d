// src/gemini.rs
//! Composition client for the Gemini `generateContent` endpoint.
//!
//! One request per structure image: a fixed instruction, the structure
//! reference, then the identity reference. The part order matters because
//! the instruction refers to the "first" and "second" image.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::SwapError;

/// The fixed composition instruction. Refers to the structure image as
/// "first" and the identity image as "second"; keep in sync with the part
/// order in [`CompositionClient::compose`].
pub const COMPOSITION_PROMPT: &str = "Recreate the first image but with the model of the \
second image, keeping the outfit and body shape from the first image but with the skin \
type and tone of the second image.";

pub fn encode_image(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

// ============================================================================
// Request payload - field names match the generateContent wire format
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inline_data", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn image(data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: "image/jpeg".to_string(),
                data,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    response_modalities: Vec<String>,
    #[serde(rename = "imageConfig")]
    image_config: ImageConfig,
}

#[derive(Debug, Serialize)]
struct ImageConfig {
    #[serde(rename = "aspectRatio")]
    aspect_ratio: String,
}

// ============================================================================
// Response payload - candidates with content parts, some carrying images
// ============================================================================

/// The API replies in camelCase (`inlineData`, `mimeType`); the snake_case
/// aliases keep older response shapes parseable.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseInlineData {
    #[serde(default, rename = "mimeType", alias = "mime_type")]
    pub mime_type: Option<String>,
    pub data: String,
}

// ============================================================================
// Client
// ============================================================================

pub struct CompositionClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    aspect_ratio: String,
}

impl CompositionClient {
    pub fn new(config: &Config) -> Result<Self, SwapError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.api_timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint_for_model(&config.api_base, &config.model),
            api_key: config.api_key.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
        })
    }

    /// Sends one synchronous generation request. The identity reference is
    /// already base64-encoded (done once at startup); the structure bytes
    /// are encoded here and discarded with the request. Any failure is
    /// returned for the caller to log and skip; no retry.
    pub fn compose(
        &self,
        identity_b64: &str,
        structure: &[u8],
    ) -> Result<GenerateResponse, SwapError> {
        let request = self.build_request(encode_image(structure), identity_b64);
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SwapError::ApiStatus { status, body });
        }
        Ok(response.json::<GenerateResponse>()?)
    }

    fn build_request(&self, structure_b64: String, identity_b64: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::text(COMPOSITION_PROMPT),
                    Part::image(structure_b64),
                    Part::image(identity_b64.to_string()),
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: ImageConfig {
                    aspect_ratio: self.aspect_ratio.clone(),
                },
            },
        }
    }
}

fn endpoint_for_model(api_base: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        api_base.trim_end_matches('/'),
        model
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn test_client() -> CompositionClient {
        let config = Config {
            api_key: "test-key".to_string(),
            model: "gemini-3-pro-image-preview".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            dataset: PathBuf::from("data.csv"),
            identity_image: PathBuf::from("face.png"),
            output_dir: PathBuf::from("out"),
            aspect_ratio: "9:16".to_string(),
            column_delay: Duration::from_secs(2),
            fetch_timeout: Duration::from_secs(30),
            api_timeout: Duration::from_secs(120),
        };
        CompositionClient::new(&config).unwrap()
    }

    #[test]
    fn base64_round_trip_reproduces_bytes() {
        let original: Vec<u8> = (0..=255).collect();
        let encoded = encode_image(&original);
        let decoded = BASE64.decode(encoded.as_bytes()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        assert_eq!(
            endpoint_for_model("https://generativelanguage.googleapis.com/v1beta", "m1"),
            "https://generativelanguage.googleapis.com/v1beta/models/m1:generateContent"
        );
        // trailing slash on the base must not double up
        assert_eq!(
            endpoint_for_model("https://example.test/v1beta/", "m1"),
            "https://example.test/v1beta/models/m1:generateContent"
        );
    }

    #[test]
    fn request_parts_are_prompt_then_structure_then_identity() {
        let client = test_client();
        let request = client.build_request("U1RSVUNUVVJF".to_string(), "SURFTlRJVFk=");
        let json = serde_json::to_value(&request).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts.as_array().unwrap().len(), 3);
        assert_eq!(parts[0]["text"], COMPOSITION_PROMPT);
        assert_eq!(parts[1]["inline_data"]["data"], "U1RSVUNUVVJF");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[2]["inline_data"]["data"], "SURFTlRJVFk=");
    }

    #[test]
    fn generation_config_requests_image_only_output_at_fixed_ratio() {
        let client = test_client();
        let request = client.build_request(String::new(), "");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["generationConfig"]["responseModalities"],
            serde_json::json!(["IMAGE"])
        );
        assert_eq!(json["generationConfig"]["imageConfig"]["aspectRatio"], "9:16");
    }

    #[test]
    fn response_accepts_camel_case_inline_data() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "here you go" },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "QUJD" } }
                    ]
                }
            }]
        }))
        .unwrap();
        let inline = response.candidates[0].content.as_ref().unwrap().parts[1]
            .inline_data
            .as_ref()
            .unwrap();
        assert_eq!(inline.data, "QUJD");
        assert_eq!(inline.mime_type.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn response_accepts_snake_case_inline_data() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inline_data": { "mime_type": "image/jpeg", "data": "QUJD" } }
                    ]
                }
            }]
        }))
        .unwrap();
        assert!(response.candidates[0].content.as_ref().unwrap().parts[0]
            .inline_data
            .is_some());
    }

    #[test]
    fn response_without_candidates_parses_to_empty() {
        let response: GenerateResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(response.candidates.is_empty());
    }
}
