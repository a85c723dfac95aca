/// A website as produced by a source, CSV import or filter. Opaque to the core.
pub type WebsiteId = String;

/// Count used when the caller does not pick one.
pub const DEFAULT_FETCH_COUNT: u32 = 100;
/// Largest count a single fetch may request.
pub const MAX_FETCH_COUNT: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub country: Option<String>,
    pub locality: Option<String>,
    pub count: u32,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            country: None,
            locality: None,
            count: DEFAULT_FETCH_COUNT,
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = non_blank(country.into());
        self
    }

    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = non_blank(locality.into());
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Trimmed keyword and blank optional fields collapsed to `None`.
    pub fn normalized(&self) -> Self {
        Self {
            keyword: self.keyword.trim().to_string(),
            country: self.country.clone().and_then(non_blank),
            locality: self.locality.clone().and_then(non_blank),
            count: self.count,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Checks a filter pass applies. Every enabled flag keeps only sites passing that check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub domain_active: bool,
    pub is_shopify: bool,
    pub load_time_check: bool,
    pub excluded_substrings: Vec<String>,
}

impl FilterCriteria {
    /// Splits a comma separated exclusion list. Blank entries are dropped: an empty
    /// substring would match, and therefore exclude, every site.
    pub fn parse_exclusions(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    pub fn with_exclusions(mut self, raw: &str) -> Self {
        self.excluded_substrings = Self::parse_exclusions(raw);
        self
    }

    /// True when `site` contains any exclusion, ignoring case.
    pub fn excludes(&self, site: &str) -> bool {
        let site = site.to_lowercase();
        self.excluded_substrings
            .iter()
            .filter(|needle| !needle.is_empty())
            .any(|needle| site.contains(&needle.to_lowercase()))
    }

    pub fn has_checks(&self) -> bool {
        self.domain_active || self.is_shopify || self.load_time_check
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRecord {
    pub website: WebsiteId,
    pub emails: Vec<String>,
}

impl EmailRecord {
    pub fn new(website: impl Into<String>, emails: Vec<String>) -> Self {
        Self {
            website: website.into(),
            emails,
        }
    }
}
