//! Test fixtures for server responses.

use serde_json::{Value, json};

/// Factory for asset JSON as the photo server returns it.
pub struct AssetFixture;

impl AssetFixture {
    /// A landscape image that passes every display check.
    pub fn image(id: &str) -> Value {
        json!({
            "id": id,
            "type": "IMAGE",
            "isTrashed": false,
            "isArchived": false,
            "originalFileName": format!("{}.jpg", id),
            "exifInfo": {"exifImageWidth": 4000, "exifImageHeight": 3000, "orientation": "1"},
            "people": []
        })
    }

    pub fn portrait(id: &str) -> Value {
        let mut asset = Self::image(id);
        asset["exifInfo"]["orientation"] = json!("6");
        asset
    }

    pub fn archived(id: &str) -> Value {
        let mut asset = Self::image(id);
        asset["isArchived"] = json!(true);
        asset
    }

    pub fn trashed(id: &str) -> Value {
        let mut asset = Self::image(id);
        asset["isTrashed"] = json!(true);
        asset
    }

    pub fn video(id: &str) -> Value {
        let mut asset = Self::image(id);
        asset["type"] = json!("VIDEO");
        asset
    }

    pub fn with_person(mut asset: Value, person_id: &str, name: &str) -> Value {
        if let Some(people) = asset["people"].as_array_mut() {
            people.push(json!({"id": person_id, "name": name}));
        }
        asset
    }
}
