use crate::vault::models::CredentialRecord;
use crate::vault::ports::VaultCodec;
use anyhow::{Context, Result};
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Compact JSON array, byte-compatible with the browser app's blob.
pub struct JsonCodec;

impl VaultCodec for JsonCodec {
    fn encode(&self, records: &[CredentialRecord]) -> Result<String> {
        Ok(serde_json::to_string(records)?)
    }

    fn decode(&self, data: &str) -> Result<Vec<CredentialRecord>> {
        serde_json::from_str(data).context("Failed to parse JSON vault content")
    }
}

pub struct RonCodec;

impl VaultCodec for RonCodec {
    fn encode(&self, records: &[CredentialRecord]) -> Result<String> {
        let pretty = PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(true);
        Ok(ron::ser::to_string_pretty(records, pretty)?)
    }

    fn decode(&self, data: &str) -> Result<Vec<CredentialRecord>> {
        ron::from_str(data).context("Failed to parse RON vault content")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    #[default]
    Json,
    Ron,
}

impl CodecKind {
    pub fn codec(self) -> Arc<dyn VaultCodec> {
        match self {
            CodecKind::Json => Arc::new(JsonCodec),
            CodecKind::Ron => Arc::new(RonCodec),
        }
    }
}

impl FromStr for CodecKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(CodecKind::Json),
            "ron" => Ok(CodecKind::Ron),
            other => Err(format!("unknown codec \"{other}\" (expected json or ron)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CredentialRecord> {
        vec![CredentialRecord {
            id: "k3j9x0a1b".into(),
            title: "Mail".into(),
            user: "a@b.com".into(),
            link: String::new(),
            secret: "x1".into(),
            masked: true,
        }]
    }

    #[test]
    fn json_uses_browser_field_names() {
        let s = JsonCodec.encode(&sample()).unwrap();
        assert!(s.contains("\"_id\":\"k3j9x0a1b\""));
        assert!(s.contains("\"isMasked\":true"));
    }

    #[test]
    fn json_decodes_browser_blob() {
        let blob = r#"[{"_id":"abc","title":"Без названия","user":"u","link":"","secret":"p","isMasked":false}]"#;
        let records = JsonCodec.decode(blob).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "abc");
        assert!(!records[0].masked);
    }

    #[test]
    fn ron_round_trips() {
        let s = RonCodec.encode(&sample()).unwrap();
        assert_eq!(RonCodec.decode(&s).unwrap(), sample());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(JsonCodec.decode("{not json").is_err());
        assert!(RonCodec.decode("((((").is_err());
    }

    #[test]
    fn codec_kind_parses_case_insensitively() {
        assert_eq!("RON".parse::<CodecKind>().unwrap(), CodecKind::Ron);
        assert!("yaml".parse::<CodecKind>().is_err());
    }
}
