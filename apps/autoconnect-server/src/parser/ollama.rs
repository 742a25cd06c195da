//! Ollama-backed bill parser

use async_trait::async_trait;
use serde_json::Value;

use super::{decode_structured, BillParser, ParserError};
use crate::config::LlmConfig;

pub struct OllamaBillParser {
    client: reqwest::Client,
    /// Ollama API URL
    base_url: String,
    /// Model name (e.g., "llama3.1", "mistral")
    model: String,
}

impl OllamaBillParser {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(&config.base_url, &config.model)
    }
}

fn build_prompt(lines: &[String], prompt: &str) -> String {
    format!("{}\n\n{}", prompt, lines.join("\n"))
}

#[async_trait]
impl BillParser for OllamaBillParser {
    async fn parse(&self, lines: &[String], prompt: &str) -> Result<Value, ParserError> {
        let url = format!("{}/api/generate", self.base_url);

        let request = serde_json::json!({
            "model": self.model,
            "prompt": build_prompt(lines, prompt),
            "format": "json",
            "stream": false
        });

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ParserError::Api(format!("Ollama returned {}: {}", status, body)));
        }

        let result: Value = response
            .json()
            .await
            .map_err(|e| ParserError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text = result["response"]
            .as_str()
            .ok_or_else(|| ParserError::InvalidResponse("missing response field".to_string()))?;

        tracing::debug!(model = %self.model, chars = text.len(), "LLM parse complete");
        decode_structured(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_appends_lines() {
        let lines = vec!["Line 1".to_string(), "Line 2".to_string()];
        assert_eq!(build_prompt(&lines, "Parse:"), "Parse:\n\nLine 1\nLine 2");
    }

    #[test]
    fn test_base_url_trimmed() {
        let parser = OllamaBillParser::new("http://localhost:11434/", "llama3.1");
        assert_eq!(parser.base_url, "http://localhost:11434");
    }
}
