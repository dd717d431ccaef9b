//! The logical query used to fetch and key candidates.

use crate::asset::AssetType;
use crate::config::SelectionConfig;
use crate::ids::PersonId;
use serde::Serialize;

/// Immutable description of what is being requested.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    person_id: Option<PersonId>,
    asset_type: AssetType,
    include_archived: bool,
    with_exif: bool,
    with_people: bool,
    size: u32,
}

impl FilterCriteria {
    /// Random images, with EXIF and people data, `size` per batch.
    pub fn images(size: u32) -> Self {
        Self {
            person_id: None,
            asset_type: AssetType::Image,
            include_archived: false,
            with_exif: true,
            with_people: true,
            size,
        }
    }

    pub fn from_config(config: &SelectionConfig, person: Option<PersonId>) -> Self {
        let criteria = Self::images(config.fetch_size).with_archived(config.show_archived);
        match person {
            Some(person) => criteria.with_person(person),
            None => criteria,
        }
    }

    /// Scope to one person. An empty id means no person.
    pub fn with_person(mut self, person: impl Into<PersonId>) -> Self {
        let person = person.into();
        self.person_id = if person.is_empty() { None } else { Some(person) };
        self
    }

    pub fn with_archived(mut self, include: bool) -> Self {
        self.include_archived = include;
        self
    }

    pub fn person_id(&self) -> Option<&PersonId> {
        self.person_id.as_ref()
    }

    pub fn asset_type(&self) -> AssetType {
        self.asset_type
    }

    pub fn include_archived(&self) -> bool {
        self.include_archived
    }

    pub fn includes_exif(&self) -> bool {
        self.with_exif
    }

    pub fn includes_people(&self) -> bool {
        self.with_people
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Human readable description for log lines and error messages.
    pub fn describe(&self) -> String {
        match &self.person_id {
            Some(person) => format!("person '{}'", person),
            None => "random image".to_string(),
        }
    }

    /// Body of the random search request.
    pub fn search_body(&self) -> SearchRandomBody {
        SearchRandomBody {
            person_ids: self
                .person_id
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            asset_type: self.asset_type,
            with_exif: self.with_exif,
            with_people: self.with_people,
            with_archived: self.include_archived,
            size: self.size,
        }
    }
}

/// JSON body of `POST /api/search/random`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRandomBody {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub person_ids: Vec<String>,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub with_exif: bool,
    pub with_people: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub with_archived: bool,
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_person_is_no_person() {
        let a = FilterCriteria::images(10).with_person("");
        assert_eq!(a, FilterCriteria::images(10));
        assert_eq!(a.describe(), "random image");
    }

    #[test]
    fn test_from_config() {
        let config = SelectionConfig::default()
            .with_fetch_size(25)
            .with_show_archived(true);
        let criteria = FilterCriteria::from_config(&config, Some(PersonId::new("p1")));

        assert_eq!(criteria.size(), 25);
        assert!(criteria.include_archived());
        assert_eq!(criteria.person_id().map(|p| p.as_str()), Some("p1"));
        assert_eq!(criteria.describe(), "person 'p1'");
    }

    #[test]
    fn test_search_body_wire_format() {
        let body = FilterCriteria::images(3).search_body();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "IMAGE",
                "withExif": true,
                "withPeople": true,
                "size": 3
            })
        );

        let scoped = FilterCriteria::images(3)
            .with_person("p1")
            .with_archived(true)
            .search_body();
        let json = serde_json::to_value(&scoped).unwrap();
        assert_eq!(json["personIds"], serde_json::json!(["p1"]));
        assert_eq!(json["withArchived"], true);
    }
}
