use serde::{Deserialize, Serialize};

/// The modality of a piece of knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Text,
    Image,
    Audio,
    Structured,
}

impl ContentType {
    /// All variants for iteration.
    pub const ALL: [ContentType; 4] = [Self::Text, Self::Image, Self::Audio, Self::Structured];
}

/// Opaque media payload for image/audio content.
///
/// Carries either raw bytes or a URI reference plus the dimensions/duration
/// used by media-quality validation. The bytes themselves are never
/// interpreted here — decoding belongs to the processors that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MediaPayload {
    /// Raw content bytes, if held inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<Vec<u8>>,
    /// URI reference, if the content lives elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Pixel width (images).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Pixel height (images).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Duration in seconds (audio).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    /// Container/encoding format label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Typed content wrapper — each modality has its own payload.
/// Serialized as a tagged enum so the modality is preserved in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum Content {
    Text(String),
    Image(MediaPayload),
    Audio(MediaPayload),
    Structured(serde_json::Value),
}

impl Content {
    /// The modality of this content.
    pub fn content_type(&self) -> ContentType {
        match self {
            Content::Text(_) => ContentType::Text,
            Content::Image(_) => ContentType::Image,
            Content::Audio(_) => ContentType::Audio,
            Content::Structured(_) => ContentType::Structured,
        }
    }

    /// Borrow the text payload, if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Borrow the media payload, if this is image or audio content.
    pub fn as_media(&self) -> Option<&MediaPayload> {
        match self {
            Content::Image(m) | Content::Audio(m) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_matches_variant() {
        assert_eq!(
            Content::Text("hi".into()).content_type(),
            ContentType::Text
        );
        assert_eq!(
            Content::Structured(serde_json::json!({"k": 1})).content_type(),
            ContentType::Structured
        );
    }

    #[test]
    fn tagged_serialization_round_trips() {
        let content = Content::Image(MediaPayload {
            uri: Some("file:///img.png".into()),
            width: Some(640),
            height: Some(480),
            ..Default::default()
        });
        let json = serde_json::to_string(&content).unwrap();
        assert!(json.contains("\"type\":\"image\""));
        let back: Content = serde_json::from_str(&json).unwrap();
        assert_eq!(back, content);
    }
}
