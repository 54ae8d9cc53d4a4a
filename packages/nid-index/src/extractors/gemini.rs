//! Gemini-backed extraction adapter.
//!
//! Sends the document inline (base64) to the Generative Language API with
//! a bilingual extraction instruction and a JSON response schema, then
//! parses the reply into [`RawExtractedRecord`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use nid_index::extractors::GeminiExtractor;
//!
//! let extractor = GeminiExtractor::from_env()?;
//! let candidates = extractor.extract(&file, SourceKind::Local).await?;
//! ```

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::security::ExtractorCredentials;
use crate::traits::DocumentExtractor;
use crate::types::{FileInput, RawExtractedRecord, SourceKind};

/// Default model for document extraction.
const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Instruction sent alongside every document.
const EXTRACTION_INSTRUCTION: &str = "\
SYSTEM INSTRUCTION: You are an Identity Record Extraction Engine.

TASK: Extract identity details from the provided document. Many documents \
will be Bengali NIDs or Voter Lists.

REQUIREMENTS:
1. BILINGUAL EXTRACTION: For Name, Father, Mother, and Address, provide BOTH \
the original Bengali text and a transliterated English version.
2. NUMBERS & DIGITS: Convert ALL Bengali digits (\u{09e6}-\u{09ef}) found in NID numbers, \
Voter Serial numbers, and Dates to standard English digits (0-9).
3. SERIAL NUMBERS: Explicitly look for 'Voter Serial', 'Serial No', or \
'\u{0995}\u{09cd}\u{09b0}\u{09ae}\u{09bf}\u{0995} \u{09a8}\u{0982}' and extract it into the voterSerial field.
4. BLOOD GROUP: Identify and extract blood group if visible.
5. VOTER LISTS: If this is a list, extract every unique person as a separate \
object in the array.
6. OUTPUT: Return a JSON array matching the schema.";

/// Extraction adapter backed by a Gemini multimodal model.
#[derive(Clone)]
pub struct GeminiExtractor {
    client: Client,
    credentials: ExtractorCredentials,
}

impl GeminiExtractor {
    /// Create an adapter with the given API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            credentials: ExtractorCredentials::new(api_key, DEFAULT_MODEL),
        }
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    ///
    /// An unset or empty variable is [`ExtractError::MissingCredential`],
    /// the same failure every extraction call would report.
    pub fn from_env() -> ExtractResult<Self> {
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(ExtractError::MissingCredential),
        }
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.credentials.model = model.into();
        self
    }

    /// Override the API base URL (for proxies or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.credentials = self.credentials.with_base_url(url);
        self
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.credentials.model
    }

    /// Response schema constraining the model to the record shape.
    fn response_schema() -> serde_json::Value {
        let string_field = |description: &str| {
            json!({ "type": "STRING", "description": description })
        };

        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "fullNameEn": string_field("Name in English."),
                    "fullNameBn": string_field("Name in Bengali."),
                    "fatherNameEn": string_field("Father's name in English."),
                    "fatherNameBn": string_field("Father's name in Bengali."),
                    "motherNameEn": string_field("Mother's name in English."),
                    "motherNameBn": string_field("Mother's name in Bengali."),
                    "addressEn": string_field("Address in English."),
                    "addressBn": string_field("Address in Bengali."),
                    "bloodGroup": string_field("Blood group (e.g. A+, B-)."),
                    "voterSerial": string_field("Voter Serial Number or Serial No."),
                    "nidNumber": string_field("NID Number (English digits)."),
                    "dateOfBirth": string_field("DOB (YYYY-MM-DD)."),
                },
                "required": ["fullNameEn", "fullNameBn", "nidNumber", "dateOfBirth"],
            },
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
enum Part {
    #[serde(rename = "inlineData", rename_all = "camelCase")]
    InlineData { mime_type: String, data: String },
    #[serde(rename = "text")]
    Text(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Strip a surrounding markdown code fence, if the model added one.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner
        .strip_suffix("```")
        .unwrap_or(inner)
        .trim()
}

#[async_trait]
impl DocumentExtractor for GeminiExtractor {
    async fn extract(
        &self,
        file: &FileInput,
        _source: SourceKind,
    ) -> ExtractResult<Vec<RawExtractedRecord>> {
        if self.credentials.api_key.is_empty() {
            return Err(ExtractError::MissingCredential);
        }

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        mime_type: file.mime_type.clone(),
                        data: BASE64.encode(&file.bytes),
                    },
                    Part::Text(EXTRACTION_INSTRUCTION.to_string()),
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: Self::response_schema(),
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.credentials.base_url, self.credentials.model
        );
        debug!(file = %file.name, model = %self.credentials.model, "extraction request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.credentials.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|err| ExtractError::Http(Box::new(err)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Service(format!(
                "{status}: {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|err| ExtractError::Http(Box::new(err)))?;

        let text = reply
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .ok_or_else(|| {
                ExtractError::MalformedResponse("no text candidate in reply".to_string())
            })?;

        let json = strip_code_fence(text);
        serde_json::from_str(json)
            .map_err(|err| ExtractError::MalformedResponse(err.to_string()))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
