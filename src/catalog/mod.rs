// Static Catalog - read-only listings behind the directory and listing pages
//
// Everything here is built once at startup and never mutated.

pub mod guide;
pub mod places;
pub mod services;
pub mod software;

pub use guide::{emergency_contacts, living_tips, ContactRecord, TipGroup};
pub use places::{CategoryFilter, PlaceCategory, PlaceDirectory, PlaceRecord, QuickAccessEntry};
pub use services::{company_stats, services, testimonials, CompanyStat, ServiceOffering, Testimonial};
pub use software::{BusinessTool, SoftwareRecord, SoftwareRegistry, TemplateRecord};

/// All catalog data in one place
pub struct Catalog {
    pub places: PlaceDirectory,
    pub software: SoftwareRegistry,
    pub emergency_contacts: Vec<ContactRecord>,
    pub living_tips: Vec<TipGroup>,
    pub services: Vec<ServiceOffering>,
    pub testimonials: Vec<Testimonial>,
    pub stats: Vec<CompanyStat>,
}

impl Catalog {
    pub fn load() -> Self {
        let catalog = Catalog {
            places: PlaceDirectory::new(),
            software: SoftwareRegistry::new(),
            emergency_contacts: emergency_contacts(),
            living_tips: living_tips(),
            services: services(),
            testimonials: testimonials(),
            stats: company_stats(),
        };

        tracing::debug!(
            places = catalog.places.all().len(),
            software = catalog.software.all().len(),
            templates = catalog.software.templates().len(),
            "catalog loaded"
        );

        catalog
    }

    /// Lookup a service offering by id
    pub fn service(&self, id: &str) -> Option<&ServiceOffering> {
        self.services.iter().find(|s| s.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_load() {
        let catalog = Catalog::load();
        assert_eq!(catalog.places.all().len(), 10);
        assert_eq!(catalog.emergency_contacts.len(), 6);
        assert_eq!(catalog.service("pos").map(|s| s.title.as_str()), Some("POS Systems"));
        assert!(catalog.service("blockchain").is_none());
    }
}
