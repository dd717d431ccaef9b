//! Asset types returned by the photo server.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Media type of a remote asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    #[default]
    Image,
    Video,
    Audio,
    #[serde(other)]
    Other,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Image => "IMAGE",
            AssetType::Video => "VIDEO",
            AssetType::Audio => "AUDIO",
            AssetType::Other => "OTHER",
        }
    }
}

/// A person recognised in an asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Subset of EXIF data used for display decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExifInfo {
    #[serde(default)]
    pub exif_image_width: Option<u32>,
    #[serde(default)]
    pub exif_image_height: Option<u32>,
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExifInfo {
    /// Whether the stored pixels must be rotated by 90 or 270 degrees for display.
    pub fn is_rotated(&self) -> bool {
        match self.orientation.as_deref().map(str::trim) {
            Some("5" | "6" | "7" | "8") => true,
            Some(other) => other.contains("90") || other.contains("270"),
            None => false,
        }
    }
}

/// One remote asset under consideration for display.
///
/// Fields the engine does not interpret are kept in `extra` so the asset
/// re-serializes without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    #[serde(rename = "type", default)]
    pub asset_type: AssetType,
    #[serde(default)]
    pub is_trashed: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exif_info: Option<ExifInfo>,
    #[serde(default)]
    pub people: Vec<Person>,
    /// Name of the person this asset was selected for, set locally.
    #[serde(
        rename = "kioskSourceName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, asset_type: AssetType) -> Self {
        Self {
            id: id.into(),
            asset_type,
            ..Default::default()
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        let exif = self.exif_info.get_or_insert_with(ExifInfo::default);
        exif.exif_image_width = Some(width);
        exif.exif_image_height = Some(height);
        self
    }

    pub fn with_orientation(mut self, orientation: impl Into<String>) -> Self {
        self.exif_info
            .get_or_insert_with(ExifInfo::default)
            .orientation = Some(orientation.into());
        self
    }

    pub fn with_person(mut self, person: Person) -> Self {
        self.people.push(person);
        self
    }

    pub fn trashed(mut self) -> Self {
        self.is_trashed = true;
        self
    }

    pub fn archived(mut self) -> Self {
        self.is_archived = true;
        self
    }

    /// Display width and height, with axes swapped for rotated images.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let exif = self.exif_info.as_ref()?;
        let width = exif.exif_image_width?;
        let height = exif.exif_image_height?;
        if exif.is_rotated() {
            Some((height, width))
        } else {
            Some((width, height))
        }
    }

    /// Display width divided by height.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match self.dimensions()? {
            (0, _) | (_, 0) => None,
            (width, height) => Some(f64::from(width) / f64::from(height)),
        }
    }
}

/// Response of the person statistics endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonStatistics {
    pub assets: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_server_asset() {
        let json = r#"{
            "id": "a1",
            "type": "IMAGE",
            "isTrashed": false,
            "isArchived": true,
            "originalFileName": "beach.jpg",
            "exifInfo": {"exifImageWidth": 4000, "exifImageHeight": 3000, "orientation": "6", "make": "Canon"},
            "people": [{"id": "p1", "name": "Bea", "isHidden": false}]
        }"#;

        let asset: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(asset.asset_type, AssetType::Image);
        assert!(asset.is_archived);
        assert_eq!(asset.dimensions(), Some((3000, 4000)));
        assert_eq!(asset.people[0].name, "Bea");
        assert_eq!(asset.extra["originalFileName"], "beach.jpg");

        let back = serde_json::to_value(&asset).unwrap();
        assert_eq!(back["originalFileName"], "beach.jpg");
        assert_eq!(back["exifInfo"]["make"], "Canon");
        assert_eq!(back["people"][0]["isHidden"], false);
        assert!(back.get("kioskSourceName").is_none());
    }

    #[test]
    fn test_unknown_type_decodes_as_other() {
        let asset: Candidate = serde_json::from_str(r#"{"id":"x","type":"LIVE"}"#).unwrap();
        assert_eq!(asset.asset_type, AssetType::Other);
    }

    #[test]
    fn test_aspect_ratio() {
        let landscape = Candidate::new("a", AssetType::Image).with_dimensions(1920, 1080);
        assert!(landscape.aspect_ratio().unwrap() > 1.0);

        let rotated = landscape.clone().with_orientation("Rotate 90 CW");
        assert!(rotated.aspect_ratio().unwrap() < 1.0);

        let unknown = Candidate::new("b", AssetType::Image);
        assert_eq!(unknown.aspect_ratio(), None);

        let zero = Candidate::new("c", AssetType::Image).with_dimensions(0, 100);
        assert_eq!(zero.aspect_ratio(), None);
    }
}
