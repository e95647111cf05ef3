use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Favorite counts keyed by animal id
///
/// A read-only snapshot for one ranking pass. Ids missing from the map
/// are treated as never favorited.
pub type FavoriteCounts = HashMap<String, u64>;

/// Sex filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Value the registry expects in an `equals` filter
    pub fn provider_value(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

/// Age group filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Baby,
    Young,
    Adult,
    Senior,
}

impl AgeGroup {
    pub fn provider_value(&self) -> &'static str {
        match self {
            AgeGroup::Baby => "Baby",
            AgeGroup::Young => "Young",
            AgeGroup::Adult => "Adult",
            AgeGroup::Senior => "Senior",
        }
    }
}

/// Size group filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeGroup {
    Small,
    Medium,
    Large,
    #[serde(alias = "x-large")]
    XLarge,
}

impl SizeGroup {
    pub fn provider_value(&self) -> &'static str {
        match self {
            SizeGroup::Small => "Small",
            SizeGroup::Medium => "Medium",
            SizeGroup::Large => "Large",
            SizeGroup::XLarge => "X-Large",
        }
    }
}

/// Named behavior/compatibility flags shared by filters and animals
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BehaviorFlag {
    GoodWithDogs,
    GoodWithCats,
    GoodWithKids,
    Housetrained,
    SpecialNeeds,
}

impl BehaviorFlag {
    pub const ALL: [BehaviorFlag; 5] = [
        BehaviorFlag::GoodWithDogs,
        BehaviorFlag::GoodWithCats,
        BehaviorFlag::GoodWithKids,
        BehaviorFlag::Housetrained,
        BehaviorFlag::SpecialNeeds,
    ];

    /// Registry field name used when filtering on this flag
    pub fn provider_field(&self) -> &'static str {
        match self {
            BehaviorFlag::GoodWithDogs => "animals.isDogsOk",
            BehaviorFlag::GoodWithCats => "animals.isCatsOk",
            BehaviorFlag::GoodWithKids => "animals.isKidsOk",
            BehaviorFlag::Housetrained => "animals.isHousetrained",
            BehaviorFlag::SpecialNeeds => "animals.isSpecialNeeds",
        }
    }
}

pub type BehaviorFlags = BTreeMap<BehaviorFlag, bool>;

/// Canonical search criteria
///
/// `breeds` is OR-ed: an animal passes when it matches at least one
/// selected breed. An empty list means no breed filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default = "default_radius_miles")]
    pub radius_miles: u32,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub age_group: Option<AgeGroup>,
    #[serde(default)]
    pub size_group: Option<SizeGroup>,
    #[serde(default)]
    pub behavior_flags: BehaviorFlags,
    #[serde(default)]
    pub breeds: Vec<String>,
}

pub const DEFAULT_RADIUS_MILES: u32 = 50;

fn default_radius_miles() -> u32 {
    DEFAULT_RADIUS_MILES
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            postal_code: None,
            radius_miles: DEFAULT_RADIUS_MILES,
            sex: None,
            age_group: None,
            size_group: None,
            behavior_flags: BehaviorFlags::new(),
            breeds: Vec::new(),
        }
    }
}

impl FilterSpec {
    pub fn has_breed_filter(&self) -> bool {
        !self.breeds.is_empty()
    }
}

/// Canonical adoptable animal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: String,
    pub name: Option<String>,
    pub age_group: Option<String>,
    pub sex: Option<String>,
    pub size_group: Option<String>,
    /// Raw breed text as the registry reported it, kept for display
    pub breed_string: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub distance_miles: Option<f64>,
    pub primary_photo_url: Option<String>,
    pub photo_urls: Vec<String>,
    pub description_text: Option<String>,
    pub url: Option<String>,
    pub behavior_flags: BehaviorFlags,
}

impl Animal {
    /// Bare record with only an id, every optional field empty
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            age_group: None,
            sex: None,
            size_group: None,
            breed_string: String::new(),
            city: None,
            state: None,
            distance_miles: None,
            primary_photo_url: None,
            photo_urls: Vec::new(),
            description_text: None,
            url: None,
            behavior_flags: BehaviorFlags::new(),
        }
    }
}

/// The requesting user as far as the spotlight cares
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotlightUser {
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl SpotlightUser {
    pub fn located(postal_code: impl Into<String>) -> Self {
        Self {
            postal_code: Some(postal_code.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Postal code if one is set and non-blank
    pub fn location(&self) -> Option<&str> {
        self.postal_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}
