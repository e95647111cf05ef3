//! Raw registry payloads to canonical [`Animal`] records
//!
//! This is the only place that deals with missing or oddly shaped
//! provider fields. Everything downstream works on fully typed animals.

use crate::error::DiscoveryError;
use crate::models::provider::{
    IncludedRecord, LocationAttributes, OrgAttributes, PictureAttributes, RawAnimalAttributes,
    RawAnimalRecord,
};
use crate::models::{Animal, BehaviorFlag, BehaviorFlags, RawDetailResult, RawSearchResult};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid html tag pattern"));

/// Where an animal's outbound link may come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSource {
    /// The rescue organization's own site
    OrgWebsite,
    /// Website attached to the animal's location
    LocationWebsite,
    /// The registry's page for the record
    RecordPage,
}

/// Detail view prefers the rescue's site, where adoption applications live
pub const DETAIL_URL_PRECEDENCE: [UrlSource; 3] = [
    UrlSource::OrgWebsite,
    UrlSource::LocationWebsite,
    UrlSource::RecordPage,
];

pub const LIST_URL_PRECEDENCE: [UrlSource; 1] = [UrlSource::RecordPage];

/// Related records available when resolving a URL
#[derive(Debug, Clone, Copy)]
pub struct UrlContext<'a> {
    pub org: Option<&'a OrgAttributes>,
    pub location: Option<&'a LocationAttributes>,
    pub record: &'a RawAnimalAttributes,
}

impl UrlSource {
    pub fn extract(&self, ctx: &UrlContext<'_>) -> Option<String> {
        match self {
            UrlSource::OrgWebsite => ctx.org.and_then(|org| {
                first_non_blank([&org.url, &org.website, &org.website_url, &org.adoption_url])
            }),
            UrlSource::LocationWebsite => ctx.location.and_then(|loc| {
                first_non_blank([&loc.url, &loc.website, &loc.website_url])
            }),
            UrlSource::RecordPage => non_blank(&ctx.record.url),
        }
    }
}

/// First URL produced by the sources, in order
pub fn resolve_url(precedence: &[UrlSource], ctx: &UrlContext<'_>) -> Option<String> {
    precedence.iter().find_map(|source| source.extract(ctx))
}

/// Normalize every primary record of a search response
pub fn to_animal_list(raw: &RawSearchResult) -> Vec<Animal> {
    let index = IncludedIndex::new(&raw.included);

    raw.data
        .iter()
        .map(|record| to_animal(record, &index, &LIST_URL_PRECEDENCE))
        .collect()
}

/// Normalize the primary record of a detail response
pub fn to_animal_detail(raw: &RawDetailResult) -> Result<Animal, DiscoveryError> {
    let record = raw.data.first().ok_or_else(|| {
        DiscoveryError::NotFound("registry response contained no animal record".into())
    })?;
    let index = IncludedIndex::new(&raw.included);

    Ok(to_animal(record, &index, &DETAIL_URL_PRECEDENCE))
}

/// Lookup tables over the `included` side table
struct IncludedIndex<'a> {
    locations: HashMap<&'a str, &'a LocationAttributes>,
    pictures: HashMap<&'a str, &'a PictureAttributes>,
    orgs: HashMap<&'a str, &'a OrgAttributes>,
}

impl<'a> IncludedIndex<'a> {
    fn new(included: &'a [IncludedRecord]) -> Self {
        let mut index = Self {
            locations: HashMap::new(),
            pictures: HashMap::new(),
            orgs: HashMap::new(),
        };

        for record in included {
            match record {
                IncludedRecord::Location { id, attributes } => {
                    index.locations.insert(id.as_str(), attributes);
                }
                IncludedRecord::Picture { id, attributes } => {
                    index.pictures.insert(id.as_str(), attributes);
                }
                IncludedRecord::Org { id, attributes } => {
                    index.orgs.insert(id.as_str(), attributes);
                }
                IncludedRecord::Other => {}
            }
        }

        index
    }

    fn first_location(&self, record: &RawAnimalRecord) -> Option<&'a LocationAttributes> {
        record
            .related_ids("locations")
            .find_map(|id| self.locations.get(id).copied())
    }

    fn first_org(&self, record: &RawAnimalRecord) -> Option<&'a OrgAttributes> {
        record
            .related_ids("orgs")
            .find_map(|id| self.orgs.get(id).copied())
    }

    /// Related pictures ordered by their `order` attribute, payload order for ties
    fn ordered_pictures(&self, record: &RawAnimalRecord) -> Vec<&'a PictureAttributes> {
        let mut pictures: Vec<&PictureAttributes> = record
            .related_ids("pictures")
            .filter_map(|id| self.pictures.get(id).copied())
            .collect();
        pictures.sort_by_key(|p| p.order.unwrap_or(i64::MAX));
        pictures
    }
}

fn to_animal(record: &RawAnimalRecord, index: &IncludedIndex<'_>, url_precedence: &[UrlSource]) -> Animal {
    let attrs = &record.attributes;
    let location = index.first_location(record);
    let (city, state) = location.map(city_state).unwrap_or((None, None));

    let pictures = index.ordered_pictures(record);
    let photo_urls = pictures
        .iter()
        .filter_map(|p| full_size_url(p).or_else(|| thumbnail_url(p)))
        .collect();

    let url = resolve_url(
        url_precedence,
        &UrlContext {
            org: index.first_org(record),
            location,
            record: attrs,
        },
    );

    Animal {
        id: record.id.clone(),
        name: non_blank(&attrs.name),
        age_group: non_blank(&attrs.age_group),
        sex: non_blank(&attrs.sex),
        size_group: non_blank(&attrs.size_group),
        breed_string: attrs.breed_string.clone().unwrap_or_default(),
        city,
        state,
        distance_miles: attrs.distance,
        primary_photo_url: primary_photo(attrs, &pictures),
        photo_urls,
        description_text: description(attrs),
        url,
        behavior_flags: behavior_flags(attrs),
    }
}

fn city_state(location: &LocationAttributes) -> (Option<String>, Option<String>) {
    let city = non_blank(&location.city);
    let state = non_blank(&location.state);
    if city.is_some() || state.is_some() {
        return (city, state);
    }

    // "Ipswich, MA" style fallback
    match location.citystate.as_deref().and_then(|cs| cs.split_once(',')) {
        Some((city, state)) => (trimmed(city), trimmed(state)),
        None => (non_blank(&location.citystate), None),
    }
}

/// First full-size picture, else a thumbnail, else nothing
fn primary_photo(attrs: &RawAnimalAttributes, pictures: &[&PictureAttributes]) -> Option<String> {
    pictures
        .iter()
        .find_map(|p| full_size_url(p))
        .or_else(|| non_blank(&attrs.picture_thumbnail_url))
        .or_else(|| pictures.iter().find_map(|p| thumbnail_url(p)))
}

fn full_size_url(picture: &PictureAttributes) -> Option<String> {
    [&picture.large, &picture.original]
        .into_iter()
        .find_map(|variant| variant.as_ref().and_then(|v| non_blank(&v.url)))
}

fn thumbnail_url(picture: &PictureAttributes) -> Option<String> {
    picture.small.as_ref().and_then(|v| non_blank(&v.url))
}

fn description(attrs: &RawAnimalAttributes) -> Option<String> {
    non_blank(&attrs.description_text).or_else(|| {
        attrs
            .description_html
            .as_deref()
            .map(strip_html)
            .filter(|text| !text.is_empty())
    })
}

/// Best-effort tag stripping for display text; not a sanitizer
pub fn strip_html(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, " ");
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn behavior_flags(attrs: &RawAnimalAttributes) -> BehaviorFlags {
    [
        (BehaviorFlag::GoodWithDogs, attrs.is_dogs_ok),
        (BehaviorFlag::GoodWithCats, attrs.is_cats_ok),
        (BehaviorFlag::GoodWithKids, attrs.is_kids_ok),
        (BehaviorFlag::Housetrained, attrs.is_housetrained),
        (BehaviorFlag::SpecialNeeds, attrs.is_special_needs),
    ]
    .into_iter()
    .filter_map(|(flag, value)| value.map(|v| (flag, v)))
    .collect()
}

fn first_non_blank<const N: usize>(candidates: [&Option<String>; N]) -> Option<String> {
    candidates.into_iter().find_map(non_blank)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().and_then(trimmed)
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
