// Copyright 2025 LocaLLM Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::chat::conversation::{Attachment, ChatMessage, Role};
use crate::common::config::{AppConfig, ChatSettings};
use crate::error::{Error, Result};

pub const EMPTY_REPLY: &str = "I apologize, but I couldn't generate a response. Please try again.";
pub const CONNECTION_FAILURE_REPLY: &str = "I apologize, but there was an error connecting to the AI service. Please check your connection and try again.";
pub const ATTACHMENT_ONLY_PROMPT: &str = "Please analyze this document and provide a summary.";

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: AppConfig::GENAI_TEMPERATURE,
            top_k: AppConfig::GENAI_TOP_K,
            top_p: AppConfig::GENAI_TOP_P,
            max_output_tokens: AppConfig::GENAI_MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// Translate a conversation into the endpoint's request body.
///
/// The attachment, when present, is inlined on the final message only and
/// only if that message comes from the user.
pub fn build_request(history: &[ChatMessage], attachment: Option<&Attachment>) -> GenerateRequest {
    let last = history.len().saturating_sub(1);

    let contents = history
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let mut parts = Vec::new();

            let text = message.text_for_model();
            let has_text = !text.trim().is_empty();
            if has_text {
                parts.push(Part::text(text.into_owned()));
            }

            if let Some(file) = attachment.filter(|_| index == last && message.role == Role::User) {
                parts.push(Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: file.mime_type.clone(),
                        data: file.to_base64(),
                    }),
                });
                if !has_text {
                    parts.insert(0, Part::text(ATTACHMENT_ONLY_PROMPT));
                }
            }

            if parts.is_empty() {
                let fallback = if message.content.is_empty() {
                    " ".to_string()
                } else {
                    message.content.clone()
                };
                parts.push(Part::text(fallback));
            }

            Content {
                role: message.role.wire_name().to_string(),
                parts,
            }
        })
        .collect();

    GenerateRequest {
        contents,
        generation_config: GenerationConfig::default(),
        safety_settings: SAFETY_CATEGORIES
            .iter()
            .map(|category| SafetySetting {
                category: category.to_string(),
                threshold: SAFETY_THRESHOLD.to_string(),
            })
            .collect(),
    }
}

/// Pick the assistant text out of a response body.
pub fn extract_reply(response: &GenerateResponse) -> String {
    let text = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.as_deref())
        .filter(|t| !t.is_empty());

    if let Some(text) = text {
        return text.to_string();
    }

    match &response.error {
        Some(error) => format!(
            "Error: {}",
            error
                .message
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or("Unknown error occurred")
        ),
        None => EMPTY_REPLY.to_string(),
    }
}

/// Client for the hosted generative-language endpoint.
#[derive(Clone)]
pub struct GenerativeClient {
    http: reqwest::Client,
    settings: ChatSettings,
}

impl GenerativeClient {
    pub fn new(settings: ChatSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn endpoint(&self) -> Result<Url> {
        let base = self.settings.base_url.trim_end_matches('/');
        let raw = format!(
            "{base}/v1beta/models/{}:generateContent",
            self.settings.model
        );
        Url::parse_with_params(&raw, &[("key", self.settings.api_key.as_str())])
            .map_err(|e| Error::Chat(format!("invalid endpoint {raw}: {e}")))
    }

    /// Send the conversation and map the body to reply text.
    ///
    /// Error bodies are decoded like successes since they carry the message
    /// shown to the user; only transport and decoding failures are errors.
    pub async fn generate(
        &self,
        history: &[ChatMessage],
        attachment: Option<&Attachment>,
    ) -> Result<String> {
        let url = self.endpoint()?;
        let body = build_request(history, attachment);

        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();
        let decoded: GenerateResponse = response.json().await?;
        if !status.is_success() {
            tracing::warn!("Model endpoint answered {status}");
        }
        Ok(extract_reply(&decoded))
    }

    /// Like [`generate`](Self::generate) but never fails.
    pub async fn reply(&self, history: &[ChatMessage], attachment: Option<&Attachment>) -> String {
        match self.generate(history, attachment).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Chat request failed: {e}");
                CONNECTION_FAILURE_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::conversation::compose_user_text;
    use mockito::{Matcher, Server};

    fn history_with_attachment(input: &str, file: &Attachment) -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(Role::Assistant, "Hello!"),
            ChatMessage::new(Role::User, compose_user_text("What is this?", Some(file))),
            ChatMessage::new(Role::Assistant, "A report."),
            ChatMessage::new(Role::User, compose_user_text(input, Some(file))),
        ]
    }

    fn client_for(base_url: String) -> GenerativeClient {
        GenerativeClient::new(ChatSettings {
            api_key: "test-key".to_string(),
            base_url,
            model: "gemini-2.0-flash".to_string(),
        })
    }

    #[test]
    fn test_build_request_inlines_attachment_on_last_message() {
        let file = Attachment::new("report.pdf", None, b"%PDF".to_vec());
        let request = build_request(&history_with_attachment("Summarise", &file), Some(&file));

        assert_eq!(request.contents.len(), 4);
        assert_eq!(request.contents[0].role, "model");
        assert_eq!(request.contents[1].role, "user");
        assert_eq!(request.contents[1].parts.len(), 1);
        assert_eq!(request.contents[1].parts[0].text.as_deref(), Some("What is this?"));

        let last = &request.contents[3];
        assert_eq!(last.parts.len(), 2);
        assert_eq!(last.parts[0].text.as_deref(), Some("Summarise"));
        let inline = last.parts[1].inline_data.as_ref().unwrap();
        assert_eq!(inline.mime_type, "application/pdf");
        assert_eq!(inline.data, "JVBERg==");
    }

    #[test]
    fn test_build_request_prompts_for_attachment_without_text() {
        let file = Attachment::new("scan.png", Some("image/png".to_string()), vec![0]);
        let request = build_request(&history_with_attachment("", &file), Some(&file));
        let last = &request.contents[3];
        assert_eq!(last.parts[0].text.as_deref(), Some(ATTACHMENT_ONLY_PROMPT));
        assert!(last.parts[1].inline_data.is_some());
    }

    #[test]
    fn test_build_request_wire_shape() {
        let history = vec![ChatMessage::new(Role::User, "")];
        let value = serde_json::to_value(build_request(&history, None)).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], " ");
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 4096);
        assert_eq!(value["generationConfig"]["temperature"], 0.7);
        assert_eq!(value["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            value["safetySettings"][3]["category"],
            "HARM_CATEGORY_DANGEROUS_CONTENT"
        );
    }

    #[test]
    fn test_extract_reply_variants() {
        let ok: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "Hi" }] } }]
        }))
        .unwrap();
        assert_eq!(extract_reply(&ok), "Hi");

        let err: GenerateResponse = serde_json::from_value(serde_json::json!({
            "error": { "code": 400, "message": "API key not valid" }
        }))
        .unwrap();
        assert_eq!(extract_reply(&err), "Error: API key not valid");

        let err_without_message: GenerateResponse =
            serde_json::from_value(serde_json::json!({ "error": { "code": 500 } })).unwrap();
        assert_eq!(
            extract_reply(&err_without_message),
            "Error: Unknown error occurred"
        );

        assert_eq!(extract_reply(&GenerateResponse::default()), EMPTY_REPLY);
    }

    #[test]
    fn test_endpoint_encodes_key() {
        let client = client_for("https://example.com/".to_string());
        let url = client.endpoint().unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/v1beta/models/gemini-2.0-flash:generateContent?key=test-key"
        );
    }

    #[tokio::test]
    async fn test_reply_from_endpoint() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Hello" }] }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Hi there"}]}}]}"#)
            .create_async()
            .await;

        let client = client_for(server.url());
        let reply = client
            .reply(&[ChatMessage::new(Role::User, "Hello")], None)
            .await;

        assert_eq!(reply, "Hi there");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_reply_surfaces_error_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"code":400,"message":"API key not valid"}}"#)
            .create_async()
            .await;

        let reply = client_for(server.url())
            .reply(&[ChatMessage::new(Role::User, "Hello")], None)
            .await;
        assert_eq!(reply, "Error: API key not valid");
    }

    #[tokio::test]
    async fn test_reply_on_undecodable_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let reply = client_for(server.url())
            .reply(&[ChatMessage::new(Role::User, "Hello")], None)
            .await;
        assert_eq!(reply, CONNECTION_FAILURE_REPLY);
    }
}
