use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

/// Body of `POST /api/research`.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ResearchRequest {
    /// The topic or question to research.
    #[validate(length(min = 1, max = 2000))]
    pub topic: String,
    /// Asks the backend for a shorter research pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_mode: Option<bool>,
}

/// A structured report as some backend versions return it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StructuredReport {
    pub full_report: String,
    #[serde(default)]
    pub summary: Option<String>,
}

/// The `report` field is either plain markdown or a structured object.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ReportBody {
    Text(String),
    Structured(StructuredReport),
}

/// Response of `POST /api/research`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResearchResponse {
    pub report: ReportBody,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub suggested_questions: Option<Vec<String>>,
}

impl ResearchResponse {
    /// The report markdown regardless of which shape the backend used.
    pub fn report_text(&self) -> &str {
        match &self.report {
            ReportBody::Text(text) => text,
            ReportBody::Structured(report) => &report.full_report,
        }
    }

    /// Top-level summary first, then the structured report's own summary.
    pub fn summary(&self) -> Option<&str> {
        let nested = match &self.report {
            ReportBody::Structured(report) => report.summary.as_deref(),
            ReportBody::Text(_) => None,
        };
        self.summary
            .as_deref()
            .or(nested)
            .filter(|s| !s.trim().is_empty())
    }
}

/// Body of `POST /api/follow-up`. Field names follow the backend's camelCase.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    #[validate(length(min = 1))]
    pub question: String,
    pub original_topic: String,
    /// The backend rejects follow-ups without the report for context.
    #[validate(length(min = 1))]
    pub original_report: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FollowUpResponse {
    pub answer: String,
}

/// Body of `POST /api/generate-image`.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct ImageRequest {
    #[validate(length(min = 1, max = 1000))]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refine_prompt: Option<bool>,
}

/// Response of `POST /api/generate-image`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ImageResponse {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub original_prompt: Option<String>,
    #[serde(default)]
    pub refined_prompt: Option<String>,
    /// Set when the backend fell back to a placeholder image.
    #[serde(default)]
    pub fallback: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Where the generated image lives.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Url(String),
    Inline(Vec<u8>),
}

impl ImageResponse {
    /// Prefers the URL; otherwise decodes the inline base64 payload
    /// (a `data:image/...;base64,` prefix is accepted).
    pub fn source(&self) -> Result<ImageSource, AppError> {
        if let Some(url) = self.image_url.as_deref().filter(|u| !u.is_empty()) {
            return Ok(ImageSource::Url(url.to_string()));
        }

        let encoded = self
            .image_base64
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| AppError::Validation("Image response carries no image".to_string()))?;

        let payload = match encoded.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => encoded,
        };

        Ok(ImageSource::Inline(STANDARD.decode(payload.trim())?))
    }
}

/// Body and response of `POST /api/refine-prompt`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PromptRefinement {
    pub original_prompt: String,
    pub refined_prompt: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct RefinePromptRequest {
    #[validate(length(min = 1, max = 1000))]
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_report_shape() {
        let response: ResearchResponse =
            serde_json::from_value(json!({ "report": "# Title\nBody" })).unwrap();
        assert_eq!(response.report_text(), "# Title\nBody");
        assert_eq!(response.summary(), None);
    }

    #[test]
    fn test_structured_report_shape() {
        let response: ResearchResponse = serde_json::from_value(json!({
            "report": { "full_report": "Full text", "summary": "Nested" },
            "suggested_questions": ["Why?"]
        }))
        .unwrap();
        assert_eq!(response.report_text(), "Full text");
        assert_eq!(response.summary(), Some("Nested"));

        let response: ResearchResponse = serde_json::from_value(json!({
            "report": { "full_report": "Full text", "summary": "Nested" },
            "summary": "Top level"
        }))
        .unwrap();
        assert_eq!(response.summary(), Some("Top level"));
    }

    #[test]
    fn test_follow_up_request_is_camel_case() {
        let request = FollowUpRequest {
            question: "Why?".into(),
            original_topic: "Tides".into(),
            original_report: "Report".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["originalTopic"], "Tides");
        assert_eq!(value["originalReport"], "Report");
    }

    #[test]
    fn test_research_request_validation() {
        let request = ResearchRequest {
            topic: String::new(),
            fast_mode: None,
        };
        assert!(request.validate().is_err());
        let value = serde_json::to_value(ResearchRequest {
            topic: "Tides".into(),
            fast_mode: None,
        })
        .unwrap();
        assert_eq!(value, json!({ "topic": "Tides" }));
    }

    #[test]
    fn test_image_source_prefers_url() {
        let response = ImageResponse {
            image_url: Some("https://img.example/cat.png".into()),
            image_base64: Some("aGk=".into()),
            ..Default::default()
        };
        assert_eq!(
            response.source().unwrap(),
            ImageSource::Url("https://img.example/cat.png".into())
        );
    }

    #[test]
    fn test_image_source_decodes_data_uri() {
        let response = ImageResponse {
            image_base64: Some("data:image/png;base64,aGVsbG8=".into()),
            ..Default::default()
        };
        assert_eq!(response.source().unwrap(), ImageSource::Inline(b"hello".to_vec()));
    }

    #[test]
    fn test_image_source_errors() {
        assert!(matches!(
            ImageResponse::default().source(),
            Err(AppError::Validation(_))
        ));
        let bad = ImageResponse {
            image_base64: Some("!!not base64!!".into()),
            ..Default::default()
        };
        assert!(matches!(bad.source(), Err(AppError::Validation(_))));
    }
}
