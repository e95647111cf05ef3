//! Registry wire shapes
//!
//! Outbound search requests and the raw JSON:API style payloads the
//! registry returns. Everything here mirrors the wire format; turning it
//! into [`Animal`](crate::models::Animal) records is the normalizer's job.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Filter operation understood by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperation {
    Equals,
    GreaterThan,
}

/// A single field filter in a search body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFilter {
    pub field_name: String,
    pub operation: FilterOperation,
    pub criteria: String,
}

impl ProviderFilter {
    pub fn equals(field_name: impl Into<String>, criteria: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            operation: FilterOperation::Equals,
            criteria: criteria.into(),
        }
    }

    pub fn greater_than(field_name: impl Into<String>, criteria: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            operation: FilterOperation::GreaterThan,
            criteria: criteria.into(),
        }
    }
}

/// Geographic constraint around a postal code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusFilter {
    pub miles: u32,
    #[serde(rename = "postalcode")]
    pub postal_code: String,
}

/// Registry search request, ready to send
///
/// `limit` travels as a query parameter; filters and radius form the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub filters: Vec<ProviderFilter>,
    pub radius: Option<RadiusFilter>,
    pub limit: u32,
}

impl SearchRequest {
    /// JSON body as the registry expects it
    pub fn body(&self) -> SearchBody<'_> {
        SearchBody {
            data: SearchBodyData {
                filters: &self.filters,
                filter_radius: self.radius.as_ref(),
            },
        }
    }

    pub fn has_filter(&self, field_name: &str) -> bool {
        self.filters.iter().any(|f| f.field_name == field_name)
    }
}

#[derive(Debug, Serialize)]
pub struct SearchBody<'a> {
    pub data: SearchBodyData<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBodyData<'a> {
    pub filters: &'a [ProviderFilter],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_radius: Option<&'a RadiusFilter>,
}

/// Raw search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResult {
    #[serde(default, deserialize_with = "one_or_many")]
    pub data: Vec<RawAnimalRecord>,
    #[serde(default)]
    pub included: Vec<IncludedRecord>,
    #[serde(default)]
    pub meta: Option<SearchMeta>,
}

impl RawSearchResult {
    /// Total matches reported by the registry, across all pages
    pub fn total_count(&self) -> Option<u64> {
        self.meta.as_ref().and_then(|meta| meta.count)
    }
}

/// Raw detail response
///
/// An empty `data` means the registry had no record for the id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDetailResult {
    #[serde(default, deserialize_with = "one_or_many")]
    pub data: Vec<RawAnimalRecord>,
    #[serde(default)]
    pub included: Vec<IncludedRecord>,
}

impl RawDetailResult {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMeta {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub count_returned: Option<u64>,
    #[serde(default)]
    pub pages: Option<u64>,
}

/// Primary animal record
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnimalRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub attributes: RawAnimalAttributes,
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

impl RawAnimalRecord {
    /// Ids of related records of the given kind, in payload order
    pub fn related_ids<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.relationships
            .get(kind)
            .into_iter()
            .flat_map(|rel| rel.data.iter())
            .filter(move |r| r.kind == kind)
            .map(|r| r.id.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnimalAttributes {
    pub name: Option<String>,
    pub age_group: Option<String>,
    pub sex: Option<String>,
    pub size_group: Option<String>,
    pub breed_string: Option<String>,
    pub distance: Option<f64>,
    pub picture_thumbnail_url: Option<String>,
    pub description_text: Option<String>,
    pub description_html: Option<String>,
    pub url: Option<String>,
    pub is_dogs_ok: Option<bool>,
    pub is_cats_ok: Option<bool>,
    pub is_kids_ok: Option<bool>,
    pub is_housetrained: Option<bool>,
    pub is_special_needs: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    #[serde(default, deserialize_with = "one_or_many")]
    pub data: Vec<ResourceRef>,
}

/// Typed reference into the `included` side table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

/// Entry of the flat `included` side table
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum IncludedRecord {
    #[serde(rename = "locations")]
    Location {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default)]
        attributes: LocationAttributes,
    },
    #[serde(rename = "pictures")]
    Picture {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default)]
        attributes: PictureAttributes,
    },
    #[serde(rename = "orgs")]
    Org {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default)]
        attributes: OrgAttributes,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationAttributes {
    pub city: Option<String>,
    pub state: Option<String>,
    pub citystate: Option<String>,
    pub postalcode: Option<String>,
    pub url: Option<String>,
    pub website: Option<String>,
    pub website_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgAttributes {
    pub name: Option<String>,
    pub url: Option<String>,
    pub website: Option<String>,
    pub website_url: Option<String>,
    pub adoption_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PictureAttributes {
    pub order: Option<i64>,
    pub original: Option<PictureVariant>,
    pub large: Option<PictureVariant>,
    pub small: Option<PictureVariant>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PictureVariant {
    pub url: Option<String>,
}

/// Accepts either a single object or an array; `null` becomes empty
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

/// Registry ids show up as strings or bare numbers depending on endpoint
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
