use serde::{Deserialize, Serialize};

use super::GenerateOptions;

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: ModelParameters,
}

/// Sampling parameters understood by Ollama.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModelParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

/// Response of a non-streaming `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
}

/// Response of `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<LocalModel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalModel {
    pub name: String,
}

pub fn build_generate_request(
    model: &str,
    prompt: &str,
    options: &GenerateOptions,
) -> GenerateRequest {
    GenerateRequest {
        model: model.to_string(),
        prompt: prompt.to_string(),
        stream: false,
        options: ModelParameters {
            temperature: options.temperature,
            num_predict: options.max_tokens,
        },
    }
}

pub fn model_names(tags: TagsResponse) -> Vec<String> {
    tags.models.into_iter().map(|model| model.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_is_non_streaming_with_options() {
        let options = GenerateOptions {
            temperature: Some(0.3),
            max_tokens: Some(16384),
            model: None,
        };
        let body =
            serde_json::to_value(build_generate_request("llama3.2", "hello", &options)).unwrap();

        assert_eq!(body["model"], "llama3.2");
        assert_eq!(body["prompt"], "hello");
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["num_predict"], 16384);
        assert!((body["options"]["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_request_omits_unset_options() {
        let request = build_generate_request("m", "p", &GenerateOptions::default());
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(body["options"], json!({}));
    }

    #[test]
    fn test_generate_response_missing_field_is_empty() {
        let response: GenerateResponse = serde_json::from_value(json!({"done": true})).unwrap();
        assert_eq!(response.response, "");
    }

    #[test]
    fn test_model_names() {
        let tags: TagsResponse = serde_json::from_value(json!({
            "models": [{"name": "llama3.2:latest", "size": 1}, {"name": "qwen2.5:7b"}]
        }))
        .unwrap();

        assert_eq!(model_names(tags), vec!["llama3.2:latest", "qwen2.5:7b"]);
    }
}
