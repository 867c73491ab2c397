//! JSON rendering for outlines.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, Result};
use crate::model::Outline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed with a four-space indent
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize an outline to JSON.
///
/// Non-ASCII text is written as-is rather than `\u` escaped.
pub fn to_json(outline: &Outline, format: JsonFormat) -> Result<String> {
    let bytes = match format {
        JsonFormat::Pretty => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut ser = Serializer::with_formatter(&mut buf, formatter);
            outline
                .serialize(&mut ser)
                .map(|_| buf)
                .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?
        }
        JsonFormat::Compact => serde_json::to_vec(outline)
            .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?,
    };

    String::from_utf8(bytes).map_err(|e| Error::Render(e.to_string()))
}

/// Parse an outline previously written by [`to_json`].
pub fn from_json(json: &str) -> Result<Outline> {
    serde_json::from_str(json).map_err(|e| Error::Deserialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{H1Section, H2Section, H3Section};

    fn sample() -> Outline {
        let mut h3 = H3Section::new("Détails");
        h3.body = "fine print ".to_string();
        let mut h2 = H2Section::new("Scope");
        h2.bullets.push("- one".to_string());
        h2.h3.push(h3);
        let mut h1 = H1Section::new("Intro");
        h1.body = "hello ".to_string();
        h1.h2.push(h2);
        Outline {
            title: "Report".to_string(),
            h1: vec![h1, H1Section::new("Outro")],
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.starts_with("{\n    \"title\": \"Report\""));
        assert!(json.contains("\"Détails\""));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&Outline::new(), JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"title":"","h1":[]}"#);
    }

    #[test]
    fn test_round_trip() {
        let outline = sample();
        for format in [JsonFormat::Pretty, JsonFormat::Compact] {
            let json = to_json(&outline, format).unwrap();
            assert_eq!(from_json(&json).unwrap(), outline);
        }
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        assert!(matches!(
            from_json(r#"{"title": 3}"#),
            Err(Error::Deserialize(_))
        ));
    }
}
