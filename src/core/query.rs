use crate::models::{BehaviorFlag, FilterSpec, ProviderFilter, RadiusFilter, SearchRequest};

/// Encoding of `true` for boolean registry filters
pub const PROVIDER_TRUE: &str = "1";

pub const DEFAULT_PAGE_SIZE: u32 = 150;
pub const DEFAULT_BREED_PAGE_SIZE: u32 = 200;

/// Translates a [`FilterSpec`] into a registry search request
///
/// Breed is never sent upstream; it is filtered locally after
/// normalization, so a larger page is requested when breeds are selected.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    page_size: u32,
    breed_page_size: u32,
}

impl QueryBuilder {
    pub fn new(page_size: u32, breed_page_size: u32) -> Self {
        Self {
            page_size,
            breed_page_size,
        }
    }

    pub fn build(&self, filter: &FilterSpec) -> SearchRequest {
        let mut filters = Vec::new();

        if let Some(sex) = filter.sex {
            filters.push(ProviderFilter::equals("animals.sex", sex.provider_value()));
        }
        if let Some(age) = filter.age_group {
            filters.push(ProviderFilter::equals("animals.ageGroup", age.provider_value()));
        }
        if let Some(size) = filter.size_group {
            filters.push(ProviderFilter::equals("animals.sizeGroup", size.provider_value()));
        }

        // Only true flags are sent; false and absent both mean "don't care"
        for flag in BehaviorFlag::ALL {
            if filter.behavior_flags.get(&flag).copied().unwrap_or(false) {
                filters.push(ProviderFilter::equals(flag.provider_field(), PROVIDER_TRUE));
            }
        }

        let limit = if filter.has_breed_filter() {
            self.breed_page_size
        } else {
            self.page_size
        };

        SearchRequest {
            filters,
            radius: radius_for(filter.postal_code.as_deref(), filter.radius_miles),
            limit,
        }
    }

    /// Request behind the located spotlight: wide radius, photos only
    pub fn spotlight(&self, postal_code: &str, radius_miles: u32, limit: u32) -> SearchRequest {
        SearchRequest {
            filters: vec![ProviderFilter::greater_than("animals.pictureCount", "0")],
            radius: radius_for(Some(postal_code), radius_miles),
            limit,
        }
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_BREED_PAGE_SIZE)
    }
}

fn radius_for(postal_code: Option<&str>, miles: u32) -> Option<RadiusFilter> {
    postal_code
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| RadiusFilter {
            miles,
            postal_code: code.to_string(),
        })
}
