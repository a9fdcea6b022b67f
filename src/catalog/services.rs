// Digital services offered on the business services page

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: String,
    pub title: String,
    pub description: String,
    pub features: Vec<String>,
    pub price: String,
    pub duration: Option<String>,
    /// Core offerings get their own cards; the rest are listed as add-ons
    pub core: bool,
    pub popular: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub company: String,
    pub role: String,
    pub content: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyStat {
    pub label: String,
    pub value: String,
}

#[allow(clippy::too_many_arguments)]
fn offering(
    id: &str,
    title: &str,
    description: &str,
    features: &[&str],
    price: &str,
    duration: Option<&str>,
    core: bool,
    popular: bool,
) -> ServiceOffering {
    ServiceOffering {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        price: price.to_string(),
        duration: duration.map(str::to_string),
        core,
        popular,
    }
}

pub fn services() -> Vec<ServiceOffering> {
    vec![
        offering(
            "erpnext",
            "ERPNext Implementation",
            "Complete open-source ERP solution with comprehensive modules for modern businesses.",
            &[
                "Accounting & Financial Management",
                "Human Resources & Payroll",
                "Inventory & Warehouse Management",
                "Project Management & CRM",
                "Manufacturing & Quality Control",
                "Custom Module Development",
            ],
            "Starting from QAR 15,000",
            Some("4-8 weeks implementation"),
            true,
            false,
        ),
        offering(
            "pos",
            "POS Systems",
            "Qatar VAT compliant Point of Sale systems for various business types.",
            &[
                "Retail POS with Inventory Management",
                "Restaurant POS with Kitchen Display",
                "Laundry POS with Service Tracking",
                "Service POS for Professional Services",
                "Real-time Sales Analytics",
                "Qatar VAT Compliance & Reporting",
            ],
            "Starting from QAR 8,000",
            Some("2-4 weeks setup"),
            true,
            false,
        ),
        offering(
            "web-branding",
            "Web & Branding",
            "Professional websites and brand identity solutions",
            &["Responsive Web Design", "E-commerce Development", "Brand Identity", "SEO Optimization"],
            "QAR 5,000 - 25,000",
            None,
            false,
            true,
        ),
        offering(
            "mobile-cloud",
            "Mobile & Cloud Apps",
            "Custom mobile applications and cloud solutions",
            &["iOS & Android Apps", "Cloud Infrastructure", "API Development", "System Integration"],
            "QAR 20,000 - 50,000",
            None,
            false,
            false,
        ),
        offering(
            "digital-marketing",
            "Digital Marketing",
            "Comprehensive digital marketing strategies",
            &["Social Media Marketing", "Google Ads Management", "Content Marketing", "Analytics & Reporting"],
            "QAR 2,000/month",
            None,
            false,
            true,
        ),
        offering(
            "business-setup",
            "Business Setup & Compliance",
            "Complete business setup and compliance services",
            &["Trade License Renewal", "Company Setup", "Bookkeeping Services", "VAT Filing & Compliance"],
            "QAR 3,000 - 8,000",
            None,
            false,
            false,
        ),
    ]
}

pub fn testimonials() -> Vec<Testimonial> {
    [
        (
            "Ahmed Al-Mansouri",
            "Al-Mansouri Trading",
            "Managing Director",
            "Noor Digital transformed our business with their ERPNext implementation. Our operations are now 50% more efficient.",
        ),
        (
            "Fatima Hassan",
            "Hassan Retail Group",
            "Operations Manager",
            "The POS system they developed for our retail chain is excellent. VAT compliance is now automated and seamless.",
        ),
        (
            "Mohammed Al-Thani",
            "Digital Qatar Solutions",
            "CEO",
            "Their web development team created an outstanding e-commerce platform. Sales increased by 200% in 6 months.",
        ),
    ]
    .iter()
    .map(|(name, company, role, content)| Testimonial {
        name: name.to_string(),
        company: company.to_string(),
        role: role.to_string(),
        content: content.to_string(),
        rating: 5,
    })
    .collect()
}

pub fn company_stats() -> Vec<CompanyStat> {
    [
        ("Projects Completed", "250+"),
        ("Happy Clients", "150+"),
        ("Years Experience", "8+"),
        ("Success Rate", "98%"),
    ]
    .iter()
    .map(|(label, value)| CompanyStat {
        label: label.to_string(),
        value: value.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_services_first() {
        let all = services();
        assert_eq!(all.len(), 6);
        assert!(all[0].core && all[1].core);
        assert!(all[2..].iter().all(|s| !s.core));
        assert_eq!(all.iter().filter(|s| s.popular).count(), 2);
    }

    #[test]
    fn test_service_ids_unique() {
        let all = services();
        let mut ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all.len());
    }

    #[test]
    fn test_testimonials_and_stats() {
        assert!(testimonials().iter().all(|t| t.rating == 5));
        assert_eq!(company_stats()[3].value, "98%");
    }
}
