use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::wire::wire_enum;

wire_enum! {
    /// Section discriminator. This is the wire contract shared with the frontend.
    pub enum SectionType {
        Hero => "hero",
        Text => "text",
        Cards => "cards",
        List => "list",
        Image => "image",
        ContactForm => "contact_form",
        Faq => "faq",
        Projects => "projects",
        Services => "services",
    }
}

wire_enum! {
    pub enum Spacing {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

wire_enum! {
    pub enum Alignment {
        Left => "left",
        Center => "center",
        Right => "right",
    }
}

/// Top-level content document addressed by its slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<PageSeo>,
    /// Bumped on every write; compared on replace to detect concurrent edits.
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSeo {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SectionSettings>,
    #[serde(default)]
    pub sort_order: i32,
}

impl Section {
    /// A bare section of the given type.
    pub fn new(id: impl Into<String>, kind: SectionType) -> Self {
        Self {
            id: id.into(),
            kind,
            title: None,
            subtitle: None,
            content: None,
            image: None,
            items: Vec::new(),
            settings: None,
            sort_order: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Identifier of the asset at the external image host, if uploaded there.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
}

/// Presentation hints. Every field is optional; the renderer fills defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// projects/services: only pull featured entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_only: Option<bool>,
    /// projects/services: maximum number of entities to pull.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// services: show the pricing line on each card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_pricing: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MetadataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

impl Item {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Scalar allowed inside item metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataScalar {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

/// Value of an item metadata entry: a scalar or a flat list of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Scalar(MetadataScalar),
    List(Vec<MetadataScalar>),
}

impl MetadataValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Scalar(MetadataScalar::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Text entries of a list value, e.g. the feature bullets of a service.
    pub fn text_list(&self) -> Vec<&str> {
        match self {
            MetadataValue::List(values) => values
                .iter()
                .filter_map(|v| match v {
                    MetadataScalar::Text(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect(),
            MetadataValue::Scalar(MetadataScalar::Text(s)) => vec![s.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Body of `POST /admin/pages`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sections: Vec<SectionInput>,
    #[serde(default)]
    pub seo: Option<PageSeo>,
}

/// Body of `PUT /admin/pages/{id}`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePatch {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sections: Option<Vec<SectionInput>>,
    #[serde(default)]
    pub seo: Option<PageSeo>,
}

/// A section as supplied by an admin client; `id` and `sortOrder` are optional.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: SectionType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub settings: Option<SectionSettings>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

impl SectionInput {
    pub fn of_kind(kind: SectionType) -> Self {
        Self {
            id: None,
            kind,
            title: None,
            subtitle: None,
            content: None,
            image: None,
            items: Vec::new(),
            settings: None,
            sort_order: None,
        }
    }
}

/// Body of `PUT /admin/pages/{id}/sections/{sectionId}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch {
    #[serde(default, rename = "type")]
    pub kind: Option<SectionType>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    /// Replaces the whole item list when present.
    #[serde(default)]
    pub items: Option<Vec<Item>>,
    #[serde(default)]
    pub settings: Option<SectionSettings>,
    #[serde(default)]
    pub sort_order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_type_keeps_unknown_values() {
        let section: Section = serde_json::from_value(json!({
            "id": "s1",
            "type": "carousel",
            "sortOrder": 2
        }))
        .unwrap();

        assert_eq!(section.kind, SectionType::Unrecognized("carousel".into()));
        assert!(!section.kind.is_recognized());
        assert_eq!(serde_json::to_value(&section.kind).unwrap(), json!("carousel"));
    }

    #[test]
    fn section_uses_camel_case_wire_names() {
        let mut section = Section::new("s1", SectionType::ContactForm);
        section.sort_order = 4;
        let value = serde_json::to_value(&section).unwrap();

        assert_eq!(value["type"], json!("contact_form"));
        assert_eq!(value["sortOrder"], json!(4));
        assert!(value.get("title").is_none());
    }

    #[test]
    fn metadata_accepts_scalars_and_flat_lists() {
        let item: Item = serde_json::from_value(json!({
            "title": "Full renovation",
            "metadata": {
                "price": "from $12k",
                "weeks": 6,
                "features": ["Layout", "Lighting", 3]
            }
        }))
        .unwrap();

        assert_eq!(item.metadata["price"].as_text(), Some("from $12k"));
        assert_eq!(item.metadata["weeks"], MetadataValue::Scalar(MetadataScalar::Integer(6)));
        assert_eq!(item.metadata["features"].text_list(), vec!["Layout", "Lighting"]);
    }

    #[test]
    fn metadata_rejects_nested_objects() {
        let result: Result<Item, _> = serde_json::from_value(json!({
            "title": "x",
            "metadata": { "nested": { "deep": true } }
        }));
        assert!(result.is_err());
    }
}
