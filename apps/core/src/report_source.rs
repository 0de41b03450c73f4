//! Report loading from disk
//! Supports: MD, MARKDOWN, TXT, and saved JSON research responses

use std::path::Path;

use tracing::info;

use crate::error::AppError;
use crate::models::ResearchResponse;

/// Read a report file, dispatching on its extension.
pub fn load_report(path: &Path) -> Result<String, AppError> {
    let data = std::fs::read(path)?;
    let name = path.display().to_string();
    report_from_bytes(&name, &data)
}

/// Decode report content based on the file name's extension.
pub fn report_from_bytes(file_name: &str, data: &[u8]) -> Result<String, AppError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    info!("Loading report from: {} (type: {})", file_name, extension);

    let text = match extension.as_str() {
        "md" | "markdown" | "txt" => utf8(data)?,
        // A saved /api/research response
        "json" => {
            let response: ResearchResponse = serde_json::from_slice(data)?;
            response.report_text().to_string()
        }
        _ => {
            return Err(AppError::Validation(format!(
                "Unsupported report extension: '{}'",
                extension
            )))
        }
    };

    let cleaned = clean_report_text(&text);
    info!("Report loaded: {} characters", cleaned.chars().count());
    Ok(cleaned)
}

fn utf8(data: &[u8]) -> Result<String, AppError> {
    String::from_utf8(data.to_vec())
        .map_err(|e| AppError::Validation(format!("Invalid UTF-8 content: {}", e)))
}

/// Normalize line endings and drop trailing whitespace; blank lines stay
/// because they separate markdown blocks.
fn clean_report_text(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}
