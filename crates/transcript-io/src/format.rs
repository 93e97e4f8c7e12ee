use std::path::Path;

use eyre::WrapErr;
use models::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    Json,
    Yaml,
}

impl TranscriptFormat {
    /// Pick the format from a file name: `.json`, `.yml` or `.yaml`.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn parse(self, content: &str) -> eyre::Result<Transcript> {
        match self {
            Self::Json => parse_json(content),
            Self::Yaml => parse_yaml(content),
        }
    }
}

pub fn parse_json(content: &str) -> eyre::Result<Transcript> {
    let transcript: Transcript = serde_json::from_str(content)
        .wrap_err("transcript is not valid JSON of the expected shape")?;
    transcript.validate().wrap_err("invalid transcript")?;
    Ok(transcript)
}

pub fn parse_yaml(content: &str) -> eyre::Result<Transcript> {
    let transcript: Transcript = serde_yaml::from_str(content)
        .wrap_err("transcript is not valid YAML of the expected shape")?;
    transcript.validate().wrap_err("invalid transcript")?;
    Ok(transcript)
}

pub fn export_json(transcript: &Transcript) -> eyre::Result<String> {
    serde_json::to_string_pretty(transcript).wrap_err("serialize transcript")
}

/// Read and parse a transcript file. The caller's current transcript is only
/// replaced by the returned value, so a failed import changes nothing.
pub fn import_file(path: &Path) -> eyre::Result<Transcript> {
    let format = TranscriptFormat::from_path(path).ok_or_else(|| {
        eyre::eyre!(
            "unsupported file format: {} (expected .json, .yml or .yaml)",
            path.display()
        )
    })?;
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read transcript: {}", path.display()))?;
    let transcript = format
        .parse(&content)
        .wrap_err_with(|| format!("parse transcript: {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        semesters = transcript.len(),
        "imported transcript"
    );
    Ok(transcript)
}
