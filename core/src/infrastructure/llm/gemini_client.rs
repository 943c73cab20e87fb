use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    gateway::{ports::LLMClient, value_objects::ImageUpload},
};

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

impl GenerationConfig {
    fn json(response_schema: serde_json::Value) -> Self {
        Self {
            response_mime_type: "application/json".to_string(),
            response_schema,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, `None` when there is none.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();

        if text.is_empty() { None } else { Some(text) }
    }
}

impl GeminiLLMClient {
    pub fn from_config(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            model_name: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<Option<String>, CoreError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model_name, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        let text = gemini_response.into_text();
        if text.is_none() {
            tracing::warn!(model = %self.model_name, "Gemini returned no text");
        }

        Ok(text)
    }
}

fn image_request(prompt: String, image: &ImageUpload, response_schema: serde_json::Value) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type().as_str().to_string(),
                        data: image.to_base64(),
                    },
                },
                Part::Text { text: prompt },
            ],
        }],
        generation_config: Some(GenerationConfig::json(response_schema)),
    }
}

fn text_request(prompt: String, response_schema: serde_json::Value) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![Part::Text { text: prompt }],
        }],
        generation_config: Some(GenerationConfig::json(response_schema)),
    }
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image: ImageUpload,
        response_schema: serde_json::Value,
    ) -> Result<Option<String>, CoreError> {
        self.call_gemini_api(image_request(prompt, &image, response_schema))
            .await
    }

    async fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> Result<Option<String>, CoreError> {
        self.call_gemini_api(text_request(prompt, response_schema))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_image_request_shape() {
        let image = ImageUpload::new(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A], None)
            .unwrap();
        let request = image_request("find food".to_string(), &image, json!({"type": "array"}));

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body["contents"][0]["parts"][0]["inline_data"]["mime_type"],
            "image/png"
        );
        assert_eq!(
            body["contents"][0]["parts"][0]["inline_data"]["data"],
            "iVBORw0KGgo="
        );
        assert_eq!(body["contents"][0]["parts"][1]["text"], "find food");
        assert_eq!(
            body["generation_config"]["response_mime_type"],
            "application/json"
        );
        assert_eq!(body["generation_config"]["response_schema"]["type"], "array");
    }

    #[test]
    fn test_text_request_shape() {
        let request = text_request("cook".to_string(), json!({}));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "cook");
    }

    #[test]
    fn test_response_text_is_concatenated() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[{\"name\":" }, { "text": "\"Egg\"}]" }] }
            }]
        }))
        .unwrap();

        assert_eq!(response.into_text().as_deref(), Some("[{\"name\":\"Egg\"}]"));
    }

    #[test]
    fn test_response_without_text_is_none() {
        let no_candidates: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(no_candidates.into_text(), None);

        let blocked: GeminiResponse =
            serde_json::from_value(json!({ "candidates": [{ "finishReason": "SAFETY" }] })).unwrap();
        assert_eq!(blocked.into_text(), None);
    }

    #[test]
    fn test_from_config_trims_base_url() {
        let config = LLMConfig {
            gemini_api_key: "key".to_string(),
            gemini_base_url: "http://localhost:8080/v1beta/".to_string(),
            ..LLMConfig::default()
        };

        let client = GeminiLLMClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v1beta");
        assert_eq!(client.model_name, "gemini-3-flash-preview");
    }
}
