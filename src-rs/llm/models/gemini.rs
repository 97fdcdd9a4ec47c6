use anyhow::{Context, Result};
use serde_json::{json, Value};

use crate::llm::error::ProviderError;
use crate::llm::models::chat_session::ChatSession;
use crate::llm::models::provider_base::{
    ChatConfig, GenerateRequest, GenerateResponse, ProviderClient, ResponseStream,
};
use crate::llm::models::provider_handle::AnyProviderClient;

const PROVIDER: &str = "gemini";

pub(crate) fn extract_sse_frame_from_buffer(buffer: &mut Vec<u8>) -> Option<Vec<u8>> {
    let mut delimiter_len = 0usize;
    let delimiter_pos = if let Some(pos) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
        delimiter_len = 4;
        Some(pos)
    } else {
        buffer.windows(2).position(|w| w == b"\n\n").map(|pos| {
            delimiter_len = 2;
            pos
        })
    }?;

    let frame = buffer.drain(..delimiter_pos).collect::<Vec<u8>>();
    buffer.drain(..delimiter_len);
    Some(frame)
}

pub(crate) fn sse_data_from_frame(frame: &str) -> Option<String> {
    let mut data_parts: Vec<&str> = Vec::new();

    for raw_line in frame.lines() {
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            data_parts.push(rest);
        }
    }

    if data_parts.is_empty() {
        return None;
    }
    Some(data_parts.join("\n"))
}

/// Concatenated text of the first candidate, plus its finish reason.
pub(crate) fn response_from_gemini_event(event: &Value) -> Option<GenerateResponse> {
    let candidate = event.pointer("/candidates/0")?;

    let text: String = candidate
        .pointer("/content/parts")
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect()
        })
        .unwrap_or_default();

    let finish_reason = candidate
        .get("finishReason")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    if text.is_empty() && finish_reason.is_none() {
        return None;
    }

    Some(GenerateResponse {
        text,
        finish_reason,
    })
}

pub(crate) fn build_gemini_request_body(request: &GenerateRequest) -> Value {
    let mut request_body = json!({
        "contents": request.contents,
    });

    if let Some(sys) = &request.config.system_instruction {
        request_body["systemInstruction"] = json!({
            "parts": [{ "text": sys }]
        });
    }

    let mut generation_config = serde_json::Map::new();
    if let Some(t) = request.config.temperature {
        generation_config.insert("temperature".to_string(), json!(t));
    }
    if let Some(m) = request.config.max_output_tokens {
        generation_config.insert("maxOutputTokens".to_string(), json!(m));
    }
    if !generation_config.is_empty() {
        request_body["generationConfig"] = Value::Object(generation_config);
    }

    request_body
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    pub base_url: String,
    pub api_key: String,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if method == "streamGenerateContent" {
            format!("{}/models/{}:{}?alt=sse&key={}", base, model, method, self.api_key)
        } else {
            format!("{}/models/{}:{}?key={}", base, model, method, self.api_key)
        }
    }

    async fn post(&self, url: &str, body: &Value, streaming: bool) -> Result<reqwest::Response> {
        let mut builder = self
            .http_client
            .post(url)
            .header("Content-Type", "application/json");
        if streaming {
            builder = builder.header("accept", "text/event-stream");
        }

        let response = builder
            .json(body)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Gemini API error ({}): {}", status, error_text);
            return Err(ProviderError::Api {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body: error_text,
            }
            .into());
        }

        Ok(response)
    }
}

impl ProviderClient for GeminiClient {
    async fn generate_content(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = self.endpoint(&request.model, "generateContent");
        let request_body = build_gemini_request_body(&request);

        let response = self.post(&url, &request_body, false).await?;
        let json: Value = response
            .json()
            .await
            .context("Failed to parse Gemini response JSON")?;

        if json.pointer("/candidates/0").is_none() {
            return Err(ProviderError::EmptyResponse {
                provider: PROVIDER.to_string(),
            }
            .into());
        }

        let out = response_from_gemini_event(&json).unwrap_or_default();
        log::debug!(
            "Gemini generateContent done, model={} chars={} finish={:?}",
            request.model,
            out.text.len(),
            out.finish_reason
        );
        Ok(out)
    }

    async fn generate_content_stream(&self, request: GenerateRequest) -> Result<ResponseStream> {
        let url = self.endpoint(&request.model, "streamGenerateContent");
        let request_body = build_gemini_request_body(&request);

        let response = self.post(&url, &request_body, true).await?;

        let stream = response.bytes_stream();
        let stream = tokio_stream::StreamExt::map(stream, |chunk| {
            chunk.context("Failed to read stream chunk")
        });

        let stream = Box::pin(async_stream::stream! {
            let mut raw_stream = stream;
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(chunk_result) = tokio_stream::StreamExt::next(&mut raw_stream).await {
                let bytes = chunk_result?;
                buffer.extend_from_slice(bytes.as_ref());

                while let Some(frame_bytes) = extract_sse_frame_from_buffer(&mut buffer) {
                    let frame = String::from_utf8_lossy(&frame_bytes);
                    let Some(data) = sse_data_from_frame(&frame) else {
                        continue;
                    };

                    let data_trimmed = data.trim();
                    if data_trimmed.is_empty() {
                        continue;
                    }
                    if data_trimmed == "[DONE]" {
                        return;
                    }

                    let parsed: Value = match serde_json::from_str(data_trimmed) {
                        Ok(v) => v,
                        Err(e) => {
                            log::debug!("Skipping unparsable Gemini SSE frame: {}", e);
                            continue;
                        }
                    };

                    if let Some(out) = response_from_gemini_event(&parsed) {
                        let finished = out.finish_reason.is_some();
                        yield Ok(out);
                        if finished {
                            return;
                        }
                    }
                }
            }

            // Servers that ignore alt=sse answer with one JSON array.
            if !buffer.is_empty() {
                let text = String::from_utf8_lossy(&buffer);
                let text = text.trim();
                let events = if let Some(data) = sse_data_from_frame(text) {
                    serde_json::from_str::<Value>(data.trim()).ok()
                } else {
                    serde_json::from_str::<Value>(text).ok()
                };
                match events {
                    Some(Value::Array(arr)) => {
                        for event in arr {
                            if let Some(out) = response_from_gemini_event(&event) {
                                yield Ok(out);
                            }
                        }
                    }
                    Some(event) => {
                        if let Some(out) = response_from_gemini_event(&event) {
                            yield Ok(out);
                        }
                    }
                    None => {}
                }
            }
        });

        Ok(stream)
    }

    fn create_chat(&self, config: ChatConfig) -> Result<ChatSession> {
        Ok(ChatSession::new(AnyProviderClient::Gemini(self.clone()), config))
    }
}
