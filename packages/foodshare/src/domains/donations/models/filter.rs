use serde::{Deserialize, Serialize};

use super::donation::{Donation, DonationStatus, FoodCategory};

/// Browse filter over donation listings.
///
/// Every criterion is optional; `None` means "all". Criteria combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonationFilter {
    /// Case-insensitive substring matched against title or location.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<FoodCategory>,
    #[serde(default)]
    pub status: Option<DonationStatus>,
}

impl DonationFilter {
    /// Create an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter used by the map view: only listings that can still be reserved.
    pub fn map_view(category: Option<FoodCategory>) -> Self {
        Self {
            search: None,
            category,
            status: Some(DonationStatus::Available),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: FoodCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: DonationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, donation: &Donation) -> bool {
        self.matches_search(donation)
            && self.category.map_or(true, |c| donation.category == c)
            && self.status.map_or(true, |s| donation.status == s)
    }

    fn matches_search(&self, donation: &Donation) -> bool {
        let query = match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return true,
        };

        donation.title.to_lowercase().contains(&query)
            || donation.location.to_lowercase().contains(&query)
    }

    /// Matching listings, in input order.
    pub fn apply<'a>(&self, donations: &'a [Donation]) -> Vec<&'a Donation> {
        donations.iter().filter(|d| self.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::donations::data::mock_donations;

    fn titles(found: &[&Donation]) -> Vec<String> {
        found.iter().map(|d| d.title.clone()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let donations = mock_donations();
        assert_eq!(DonationFilter::new().apply(&donations).len(), donations.len());

        let blank = DonationFilter::new().with_search("   ");
        assert_eq!(blank.apply(&donations).len(), donations.len());
    }

    #[test]
    fn test_search_matches_title_case_insensitive() {
        let donations = mock_donations();
        let found = DonationFilter::new().with_search("PÃES").apply(&donations);
        assert_eq!(titles(&found), vec!["Pães do Dia"]);
    }

    #[test]
    fn test_search_matches_location() {
        let donations = mock_donations();
        let found = DonationFilter::new().with_search("verde vida").apply(&donations);
        assert_eq!(titles(&found), vec!["Vegetais Orgânicos"]);
    }

    #[test]
    fn test_category_and_status_combine() {
        let donations = mock_donations();

        let vegetables = DonationFilter::new().with_category(FoodCategory::Vegetables);
        assert_eq!(vegetables.apply(&donations).len(), 1);

        let available_vegetables = vegetables.with_status(DonationStatus::Available);
        assert!(available_vegetables.apply(&donations).is_empty());
    }

    #[test]
    fn test_map_view_only_available() {
        let donations = mock_donations();
        let found = DonationFilter::map_view(None).apply(&donations);

        assert_eq!(found.len(), 4);
        assert!(found.iter().all(|d| d.status.is_available()));
    }

    #[test]
    fn test_apply_preserves_input_order() {
        let donations = mock_donations();
        let found = DonationFilter::new()
            .with_status(DonationStatus::Available)
            .apply(&donations);

        let positions: Vec<usize> = found
            .iter()
            .map(|f| donations.iter().position(|d| d.id == f.id).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }
}
