use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{AgeGroup, BehaviorFlags, FilterSpec, Sex, SizeGroup, SpotlightUser, DEFAULT_RADIUS_MILES};

/// Request to search adoptable animals
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchAnimalsRequest {
    #[validate(length(min = 3, max = 10))]
    #[serde(alias = "postal_code", rename = "postalCode", default)]
    pub postal_code: Option<String>,
    #[validate(range(min = 1, max = 500))]
    #[serde(alias = "radius_miles", rename = "radiusMiles", default = "default_radius")]
    pub radius_miles: u32,
    #[serde(default)]
    pub sex: Option<Sex>,
    #[serde(alias = "age_group", rename = "ageGroup", default)]
    pub age_group: Option<AgeGroup>,
    #[serde(alias = "size_group", rename = "sizeGroup", default)]
    pub size_group: Option<SizeGroup>,
    #[serde(alias = "behavior_flags", rename = "behaviorFlags", default)]
    pub behavior_flags: BehaviorFlags,
    #[validate(length(max = 20))]
    #[serde(default)]
    pub breeds: Vec<String>,
}

fn default_radius() -> u32 {
    DEFAULT_RADIUS_MILES
}

impl SearchAnimalsRequest {
    /// Canonical filter; blank postal codes and blank breed entries are dropped
    pub fn into_filter_spec(self) -> FilterSpec {
        let postal_code = self
            .postal_code
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty());

        let breeds = self
            .breeds
            .into_iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();

        FilterSpec {
            postal_code,
            radius_miles: self.radius_miles,
            sex: self.sex,
            age_group: self.age_group,
            size_group: self.size_group,
            behavior_flags: self.behavior_flags,
            breeds,
        }
    }
}

/// Query string for the spotlight endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotlightQuery {
    #[serde(alias = "postal_code", rename = "postalCode", default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SpotlightQuery {
    pub fn user(&self) -> SpotlightUser {
        SpotlightUser {
            postal_code: self.postal_code.clone(),
        }
    }
}
