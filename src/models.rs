// Response types of the imgbb upload endpoint.
//
// The endpoint is not consistent about numbers: `width`, `size`, `time`
// and friends come back either as JSON numbers or as numeric strings, so
// those fields go through `number_or_string`.

use serde::{Deserialize, Deserializer, Serialize};

/// Envelope returned by `POST /1/upload`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub data: ImageData,
    pub success: bool,
    pub status: i64,
}

/// Metadata of the hosted image.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub id: String,
    pub title: String,
    pub url_viewer: String,
    /// Canonical (direct) image URL.
    pub url: String,
    pub display_url: String,
    #[serde(deserialize_with = "number_or_string")]
    pub width: u64,
    #[serde(deserialize_with = "number_or_string")]
    pub height: u64,
    /// Size in bytes.
    #[serde(deserialize_with = "number_or_string")]
    pub size: u64,
    /// Upload time, unix seconds.
    #[serde(deserialize_with = "number_or_string")]
    pub time: u64,
    /// Seconds until the image is deleted, `0` for never.
    #[serde(deserialize_with = "number_or_string")]
    pub expiration: u64,
    pub image: ImageVariant,
    pub thumb: ImageVariant,
    /// Not sent for images already smaller than the medium size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<ImageVariant>,
    pub delete_url: String,
}

/// One rendition of the uploaded image (original, medium or thumbnail).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageVariant {
    pub filename: String,
    pub name: String,
    pub mime: String,
    pub extension: String,
    pub url: String,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variant(kind: &str) -> ImageVariant {
        ImageVariant {
            filename: format!("{kind}.png"),
            name: kind.to_string(),
            mime: "image/png".to_string(),
            extension: "png".to_string(),
            url: format!("https://i.ibb.co/abc123/{kind}.png"),
        }
    }

    fn sample() -> UploadResult {
        UploadResult {
            data: ImageData {
                id: "abc123".to_string(),
                title: "cat".to_string(),
                url_viewer: "https://ibb.co/abc123".to_string(),
                url: "https://i.ibb.co/abc123/cat.png".to_string(),
                display_url: "https://i.ibb.co/abc123/cat.png".to_string(),
                width: 640,
                height: 480,
                size: 52_134,
                time: 1_552_042_565,
                expiration: 600,
                image: variant("cat"),
                thumb: variant("thumb"),
                medium: Some(variant("medium")),
                delete_url: "https://ibb.co/abc123/deadbeef".to_string(),
            },
            success: true,
            status: 200,
        }
    }

    #[test]
    fn json_round_trip_keeps_every_field() {
        let original = sample();
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: UploadResult = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["data"]["width"] = json!("640");
        value["data"]["size"] = json!("52134");
        value["data"]["expiration"] = json!("600");

        let decoded: UploadResult = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn non_numeric_string_is_rejected() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["data"]["height"] = json!("tall");
        assert!(serde_json::from_value::<UploadResult>(value).is_err());
    }

    #[test]
    fn medium_is_optional() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["data"]
            .as_object_mut()
            .unwrap()
            .remove("medium");

        let decoded: UploadResult = serde_json::from_value(value).unwrap();
        assert_eq!(decoded.data.medium, None);
        assert_eq!(decoded.data.url, "https://i.ibb.co/abc123/cat.png");
    }
}
