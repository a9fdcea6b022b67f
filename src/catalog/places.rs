// 📍 Place Directory - Qatar places with category filter + text search
//
// The directory is fixed at construction and never mutated. Search is a linear
// case-insensitive substring match over name and description, in catalog order.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// PLACE CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Business,
    Dining,
    Transport,
    Housing,
    Services,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 5] = [
        PlaceCategory::Business,
        PlaceCategory::Dining,
        PlaceCategory::Transport,
        PlaceCategory::Housing,
        PlaceCategory::Services,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PlaceCategory::Business => "business",
            PlaceCategory::Dining => "dining",
            PlaceCategory::Transport => "transport",
            PlaceCategory::Housing => "housing",
            PlaceCategory::Services => "services",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaceCategory::Business => "Business",
            PlaceCategory::Dining => "Dining",
            PlaceCategory::Transport => "Transport",
            PlaceCategory::Housing => "Housing",
            PlaceCategory::Services => "Services",
        }
    }
}

/// Category selector: everything, or a single category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(PlaceCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: PlaceCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.label(),
        }
    }

    /// All → Business → … → Services → All
    pub fn next(&self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(PlaceCategory::ALL[0]),
            CategoryFilter::Only(c) => {
                let pos = PlaceCategory::ALL.iter().position(|x| x == c).unwrap_or(0);
                PlaceCategory::ALL
                    .get(pos + 1)
                    .map(|next| CategoryFilter::Only(*next))
                    .unwrap_or(CategoryFilter::All)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted.is_empty() || wanted == "all" {
            return Ok(CategoryFilter::All);
        }
        PlaceCategory::ALL
            .iter()
            .find(|c| c.id() == wanted)
            .map(|c| CategoryFilter::Only(*c))
            .ok_or(UnknownCategory(s.to_string()))
    }
}

// ============================================================================
// PLACE RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub category: PlaceCategory,
    pub description: String,
    pub location: String,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub rating: Option<f32>,
    pub tags: Vec<String>,
    pub website: Option<String>,
}

impl PlaceRecord {
    fn new(name: &str, category: PlaceCategory, description: &str, location: &str) -> Self {
        PlaceRecord {
            name: name.to_string(),
            category,
            description: description.to_string(),
            location: location.to_string(),
            phone: None,
            hours: None,
            rating: None,
            tags: Vec::new(),
            website: None,
        }
    }

    fn phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    fn hours(mut self, hours: &str) -> Self {
        self.hours = Some(hours.to_string());
        self
    }

    fn rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    fn website(mut self, website: &str) -> Self {
        self.website = Some(website.to_string());
        self
    }

    fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Case-insensitive substring match on name or description.
    /// `needle` must already be lowercase.
    fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// CSV row shape for exports (tags joined with "; ")
#[derive(Debug, Serialize)]
struct PlaceRow<'a> {
    name: &'a str,
    category: &'a str,
    location: &'a str,
    phone: &'a str,
    hours: &'a str,
    rating: String,
    tags: String,
    website: &'a str,
}

impl<'a> From<&'a PlaceRecord> for PlaceRow<'a> {
    fn from(p: &'a PlaceRecord) -> Self {
        PlaceRow {
            name: &p.name,
            category: p.category.id(),
            location: &p.location,
            phone: p.phone.as_deref().unwrap_or(""),
            hours: p.hours.as_deref().unwrap_or(""),
            rating: p.rating.map(|r| format!("{:.1}", r)).unwrap_or_default(),
            tags: p.tags.join("; "),
            website: p.website.as_deref().unwrap_or(""),
        }
    }
}

// ============================================================================
// QUICK ACCESS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickAccessEntry {
    pub name: String,
    pub category: String,
    pub urgent: bool,
}

// ============================================================================
// PLACE DIRECTORY
// ============================================================================

pub struct PlaceDirectory {
    places: Vec<PlaceRecord>,
    quick_access: Vec<QuickAccessEntry>,
}

impl PlaceDirectory {
    /// Directory preloaded with the known Qatar places
    pub fn new() -> Self {
        let mut directory = PlaceDirectory {
            places: Vec::new(),
            quick_access: Vec::new(),
        };
        directory.register_default_places();
        directory.register_quick_access();
        directory
    }

    fn register_default_places(&mut self) {
        use PlaceCategory::*;

        self.places = vec![
            PlaceRecord::new(
                "Hamad Medical City",
                Business,
                "Qatar's premier medical facility providing world-class healthcare services",
                "Doha",
            )
            .phone("+974 4439 9999")
            .hours("24/7")
            .rating(4.5)
            .tags(&["Healthcare", "Emergency", "Specialist Care"])
            .website("www.hamad.qa"),
            PlaceRecord::new(
                "Souq Waqif",
                Dining,
                "Traditional marketplace with authentic Qatari dining and shopping experiences",
                "Old Doha",
            )
            .hours("10:00 AM - 12:00 AM")
            .rating(4.7)
            .tags(&["Traditional", "Shopping", "Cultural", "Restaurants"]),
            PlaceRecord::new(
                "Doha Metro",
                Transport,
                "Qatar's modern rail network connecting major areas across Doha",
                "Multiple stations",
            )
            .hours("5:00 AM - 12:00 AM")
            .rating(4.6)
            .tags(&["Public Transport", "Modern", "Efficient"])
            .website("www.qr.com.qa"),
            PlaceRecord::new(
                "Qatar National Bank",
                Business,
                "Leading financial institution in Qatar offering comprehensive banking services",
                "Multiple branches",
            )
            .phone("+974 4440 7777")
            .hours("8:00 AM - 4:00 PM")
            .rating(4.2)
            .tags(&["Banking", "Finance", "ATM"]),
            PlaceRecord::new(
                "The Pearl-Qatar",
                Housing,
                "Luxury residential and commercial development with premium amenities",
                "West Bay",
            )
            .rating(4.8)
            .tags(&["Luxury", "Residential", "Marina", "Shopping"]),
            PlaceRecord::new(
                "Villagio Mall",
                Dining,
                "Italian-inspired shopping mall with diverse dining and entertainment options",
                "Aspire Zone",
            )
            .hours("10:00 AM - 10:00 PM")
            .rating(4.4)
            .tags(&["Shopping", "Dining", "Entertainment", "Family"]),
            PlaceRecord::new(
                "Qatar Airways",
                Transport,
                "National carrier of Qatar offering global connectivity",
                "Hamad International Airport",
            )
            .phone("+974 4023 0000")
            .hours("24/7")
            .rating(4.9)
            .tags(&["Airlines", "International", "Premium"])
            .website("www.qatarairways.com"),
            PlaceRecord::new(
                "IKEA Qatar",
                Housing,
                "Swedish furniture retailer for all your home furnishing needs",
                "Al Rayyan",
            )
            .hours("10:00 AM - 10:00 PM")
            .rating(4.3)
            .tags(&["Furniture", "Home Decor", "Affordable"]),
            PlaceRecord::new(
                "Ministry of Interior",
                Services,
                "Government services for residency, visas, and official documentation",
                "Various locations",
            )
            .phone("+974 4433 4444")
            .hours("7:00 AM - 2:00 PM")
            .tags(&["Government", "Legal", "Documentation"]),
            PlaceRecord::new(
                "Carrefour",
                Services,
                "Major hypermarket chain for groceries and household items",
                "Multiple locations",
            )
            .hours("8:00 AM - 12:00 AM")
            .rating(4.1)
            .tags(&["Groceries", "Shopping", "Household"]),
        ];
    }

    fn register_quick_access(&mut self) {
        let entries = [
            ("Qatar ID Services", "Government", true),
            ("Emergency Services", "Emergency", true),
            ("Hamad Medical City", "Healthcare", false),
            ("Qatar Airways", "Travel", false),
            ("Karwa Taxi", "Transport", false),
            ("Qatar Rail (Metro)", "Transport", false),
        ];

        self.quick_access = entries
            .iter()
            .map(|(name, category, urgent)| QuickAccessEntry {
                name: name.to_string(),
                category: category.to_string(),
                urgent: *urgent,
            })
            .collect();
    }

    pub fn all(&self) -> &[PlaceRecord] {
        &self.places
    }

    pub fn quick_access(&self) -> &[QuickAccessEntry] {
        &self.quick_access
    }

    /// Places whose name or description contains `term` (case-insensitive)
    /// and whose category passes `filter`. Empty term matches everything.
    pub fn search(&self, term: &str, filter: CategoryFilter) -> Vec<&PlaceRecord> {
        let needle = term.trim().to_lowercase();
        self.places
            .iter()
            .filter(|p| filter.matches(p.category) && p.matches_text(&needle))
            .collect()
    }

    /// Exact name lookup, ignoring case
    pub fn find(&self, name: &str) -> Option<&PlaceRecord> {
        let wanted = name.trim().to_lowercase();
        self.places.iter().find(|p| p.name.to_lowercase() == wanted)
    }

    pub fn count_by_category(&self, category: PlaceCategory) -> usize {
        self.places.iter().filter(|p| p.category == category).count()
    }

    /// Write places as CSV (with header row)
    pub fn export_csv<W: Write>(writer: W, places: &[&PlaceRecord]) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for place in places {
            wtr.serialize(PlaceRow::from(*place))
                .with_context(|| format!("Failed to write CSV row for {}", place.name))?;
        }
        wtr.flush().context("Failed to flush CSV output")?;
        Ok(())
    }
}

impl Default for PlaceDirectory {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names(places: &[&PlaceRecord]) -> Vec<String> {
        places.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_directory_loaded() {
        let dir = PlaceDirectory::new();
        assert_eq!(dir.all().len(), 10);
        assert_eq!(dir.quick_access().len(), 6);
        assert_eq!(dir.count_by_category(PlaceCategory::Transport), 2);
    }

    #[test]
    fn test_empty_search_returns_all_in_order() {
        let dir = PlaceDirectory::new();
        let results = dir.search("", CategoryFilter::All);
        assert_eq!(results.len(), 10);
        assert_eq!(results[0].name, "Hamad Medical City");
        assert_eq!(results[9].name, "Carrefour");
    }

    #[test]
    fn test_search_name_or_description_case_insensitive() {
        let dir = PlaceDirectory::new();
        assert_eq!(names(&dir.search("METRO", CategoryFilter::All)), vec!["Doha Metro"]);
        // "banking" only appears in a description
        assert_eq!(
            names(&dir.search("banking", CategoryFilter::All)),
            vec!["Qatar National Bank"]
        );
    }

    #[test]
    fn test_search_combines_with_category() {
        let dir = PlaceDirectory::new();
        let dining = dir.search("shopping", CategoryFilter::Only(PlaceCategory::Dining));
        assert_eq!(names(&dining), vec!["Souq Waqif", "Villagio Mall"]);

        let none = dir.search("shopping", CategoryFilter::Only(PlaceCategory::Transport));
        assert!(none.is_empty());
    }

    #[test]
    fn test_category_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!("".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "Housing".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(PlaceCategory::Housing))
        );
        let err = "nightlife".parse::<CategoryFilter>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category 'nightlife'");
    }

    #[test]
    fn test_category_filter_cycle() {
        let mut filter = CategoryFilter::All;
        for _ in 0..=PlaceCategory::ALL.len() {
            filter = filter.next();
        }
        assert_eq!(filter, CategoryFilter::All);
    }

    #[test]
    fn test_find_ignores_case() {
        let dir = PlaceDirectory::new();
        let place = dir.find("souq waqif").unwrap();
        assert_eq!(place.rating, Some(4.7));
        assert_eq!(place.phone, None);
        assert!(dir.find("Souq").is_none());
    }

    #[test]
    fn test_export_csv() {
        let dir = PlaceDirectory::new();
        let places = dir.search("airways", CategoryFilter::All);
        let mut out = Vec::new();
        PlaceDirectory::export_csv(&mut out, &places).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("name,category,location,phone,hours,rating,tags,website")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Qatar Airways,transport,Hamad International Airport"));
        assert!(row.contains("Airlines; International; Premium"));
    }
}
