// 💼 Software & Templates - accounting software listings, document templates
// and business tools for the accounting tab

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareRecord {
    pub name: String,
    pub description: String,
    pub pricing: String,
    pub features: Vec<String>,
    pub trial: String,
    pub website: Option<String>,
    pub category: Option<String>,
    pub is_free: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessTool {
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// SOFTWARE REGISTRY
// ============================================================================

pub struct SoftwareRegistry {
    /// Starter list shown on the calculators tab
    basic: Vec<SoftwareRecord>,
    /// Curated business software on the advanced tab
    advanced: Vec<SoftwareRecord>,
    templates: Vec<TemplateRecord>,
    tools: Vec<BusinessTool>,
}

impl SoftwareRegistry {
    pub fn new() -> Self {
        let mut registry = SoftwareRegistry {
            basic: Vec::new(),
            advanced: Vec::new(),
            templates: Vec::new(),
            tools: Vec::new(),
        };
        registry.register_basic_software();
        registry.register_advanced_software();
        registry.register_templates();
        registry.register_tools();
        registry
    }

    fn register_basic_software(&mut self) {
        let listings: [(&str, &str, &str, [&str; 5], &str); 6] = [
            (
                "Wave Accounting",
                "Complete accounting software for small businesses with invoicing, payroll, and payments.",
                "Free",
                ["Invoicing and payments", "Financial reporting", "Receipt scanning", "Bank connections", "Multi-currency support"],
                "Free forever plan available",
            ),
            (
                "ZipBooks",
                "Smart accounting software with time tracking and project management features.",
                "Free",
                ["Smart insights", "Time tracking", "Project management", "Invoicing", "Financial reports"],
                "Free starter plan",
            ),
            (
                "SlickPie",
                "Free online accounting software for small businesses and freelancers.",
                "Free",
                ["Automated data entry", "Multi-currency", "Bank reconciliation", "Financial reporting", "Invoice creation"],
                "Free for unlimited users",
            ),
            (
                "QuickBooks Online",
                "Comprehensive accounting solution for businesses of all sizes.",
                "$15-$180/month",
                ["Full accounting suite", "Payroll integration", "Tax preparation", "Inventory tracking", "Advanced reporting"],
                "30-day free trial",
            ),
            (
                "Xero",
                "Beautiful, easy-to-use accounting software for small businesses.",
                "$13-$70/month",
                ["Bank connections", "Invoicing", "Expense claims", "Financial reporting", "Third-party integrations"],
                "30-day free trial",
            ),
            (
                "FreshBooks",
                "Time tracking and invoicing software for service-based businesses.",
                "$17-$55/month",
                ["Time tracking", "Project management", "Invoicing", "Expense tracking", "Client portal"],
                "30-day free trial",
            ),
        ];

        self.basic = listings
            .iter()
            .map(|(name, description, pricing, features, trial)| SoftwareRecord {
                name: name.to_string(),
                description: description.to_string(),
                pricing: pricing.to_string(),
                features: strings(features),
                trial: trial.to_string(),
                website: None,
                category: None,
                is_free: *pricing == "Free",
            })
            .collect();
    }

    fn register_advanced_software(&mut self) {
        let advanced = |name: &str,
                        description: &str,
                        website: &str,
                        features: &[&str],
                        pricing: &str,
                        trial: &str,
                        category: &str,
                        is_free: bool| SoftwareRecord {
            name: name.to_string(),
            description: description.to_string(),
            pricing: pricing.to_string(),
            features: strings(features),
            trial: trial.to_string(),
            website: Some(website.to_string()),
            category: Some(category.to_string()),
            is_free,
        };

        self.advanced = vec![
            advanced(
                "Zoho Books",
                "Comprehensive accounting software for growing businesses. Send invoices, generate 1099 reports, and manage expenses, projects, & inventory.",
                "https://www.zoho.com/us/books/",
                &["Receivables", "Payables", "Inventory management", "Project management", "Multi-currency support"],
                "FREE Plan available for small businesses",
                "14-day free trial for paid plans",
                "Full Accounting Suite",
                true,
            ),
            advanced(
                "Wave Accounting",
                "100% free accounting software for small businesses. Includes invoicing, payments, and financial reporting.",
                "https://www.waveapps.com/",
                &["Free invoicing", "Free accounting", "Receipt scanning", "Financial reports", "Bank connections"],
                "100% FREE forever",
                "No trial needed - completely free",
                "Free Accounting Suite",
                true,
            ),
            advanced(
                "Melio",
                "Specializes in accounts payable, streamlining vendor payments and optimizing cash flow. Integrates with QuickBooks and Xero.",
                "https://meliopayments.com/",
                &["Accounts payable", "Vendor payments", "QuickBooks integration", "Xero integration", "Cash flow optimization"],
                "FREE Forever plan available",
                "Free Trial available",
                "Accounts Payable",
                true,
            ),
            advanced(
                "GnuCash",
                "Free, open-source personal and small-business financial-accounting software. Double-entry bookkeeping system.",
                "https://www.gnucash.org/",
                &["Double-entry bookkeeping", "Stock/bond/mutual fund accounts", "Small-business accounting", "Reports and graphs"],
                "100% FREE and open-source",
                "No trial needed - completely free",
                "Open Source Accounting",
                true,
            ),
            advanced(
                "Manager",
                "Free accounting software for small businesses. Desktop and cloud versions available.",
                "https://www.manager.io/",
                &["Multi-currency", "Inventory tracking", "Financial statements", "Tax compliance", "Bank reconciliation"],
                "FREE for desktop version",
                "Cloud version has free trial",
                "Free Desktop Accounting",
                true,
            ),
            advanced(
                "Oracle NetSuite ERP",
                "A cloud-based ERP solution that includes accounting functionality, automating core processes and providing real-time visibility.",
                "https://www.netsuite.com/",
                &["Cloud-based ERP", "Accounting functionality", "Automation", "Real-time visibility"],
                "Contact for pricing",
                "Product tour available",
                "Enterprise ERP",
                false,
            ),
            advanced(
                "Sage Accounting",
                "Offers a modern, user-friendly solution to streamline financial management for businesses of all sizes.",
                "https://www.sage.com/",
                &["Financial management", "Invoicing", "Expense tracking", "Reporting"],
                "Paid plans starting from $25/month",
                "30-day free trial",
                "Full Accounting Suite",
                false,
            ),
            advanced(
                "Synder",
                "AI-driven accounting infrastructure for retail, e-commerce, and SaaS businesses. Synchronizes data from e-commerce to accounting software.",
                "https://synder.com/",
                &["Multi-platform sync", "Accrual basis syncing", "Duplicate detection", "Sales reconciliation"],
                "Starting from $35/month",
                "15-day free trial",
                "E-commerce Integration",
                false,
            ),
            advanced(
                "Patriot Accounting",
                "Primarily a payroll software that offers basic and full-service payroll solutions, including payroll calculations and tax filings.",
                "https://www.patriotsoftware.com/",
                &["Payroll solutions", "Tax filings", "Direct deposit", "HR tools"],
                "Starting from $17/month",
                "Free trial available",
                "Payroll & Basic Accounting",
                false,
            ),
        ];
    }

    fn register_templates(&mut self) {
        let templates = [
            // Accounting templates
            ("Income Statement Template", "Financial Reports", "Professional profit and loss statement template for businesses"),
            ("Balance Sheet Template", "Financial Reports", "Standard balance sheet format for small to medium businesses"),
            ("Cash Flow Statement", "Financial Reports", "Track cash inflows and outflows with this comprehensive template"),
            ("Budget Planning Worksheet", "Budgeting", "Annual budget planning template with monthly breakdowns"),
            ("Expense Tracking Sheet", "Expense Management", "Daily expense tracker with category-wise breakdown"),
            ("Invoice Template", "Billing", "Professional invoice template with Qatar-specific fields"),
            ("Payroll Calculator", "Payroll", "Calculate employee salaries with Qatar labor law compliance"),
            ("Tax Preparation Checklist", "Tax Planning", "Comprehensive checklist for Qatar business tax preparation"),
            // Document templates
            ("Business Proposal Generator", "Business Documents", "Professional business proposal templates with Qatar-specific formatting"),
            ("Rental Agreement Template", "Legal Documents", "Qatar legal rental agreement generator with terms and conditions"),
            ("Invoice Templates", "Billing", "Professional invoice templates with VAT-ready formatting"),
            ("MOCI Forms", "Government", "Ministry of Commerce and Industry forms and templates"),
            ("Employment Contracts", "HR Documents", "Qatar labor law compliant employment contract templates"),
            ("Financial Reports", "Financial Reports", "Standard financial reporting templates for Qatar businesses"),
            ("Tax Documents", "Tax Planning", "Tax preparation and filing document templates"),
            ("Budget Planner", "Budgeting", "Comprehensive budget planning worksheets and templates"),
            ("Cash Flow Projections", "Financial Planning", "Cash flow analysis and projection templates"),
        ];

        self.templates = templates
            .iter()
            .map(|(name, category, description)| TemplateRecord {
                name: name.to_string(),
                category: category.to_string(),
                description: description.to_string(),
            })
            .collect();
    }

    fn register_tools(&mut self) {
        let tools: [(&str, &str, [&str; 4]); 6] = [
            (
                "Business Plan Builder",
                "Step-by-step business plan creation tool with Qatar market insights",
                ["Market analysis", "Financial projections", "Executive summary", "Implementation timeline"],
            ),
            (
                "Salary Calculator",
                "Calculate salaries according to Qatar labor law and WPS requirements",
                ["WPS compliance", "End-of-service benefits", "Leave calculations", "Overtime calculations"],
            ),
            (
                "Currency Converter",
                "Real-time currency conversion with QAR and international rates",
                ["Real-time rates", "Historical data", "Multi-currency", "Rate alerts"],
            ),
            (
                "Project Timeline Creator",
                "Create professional project timelines and Gantt charts",
                ["Gantt charts", "Milestone tracking", "Resource allocation", "Progress monitoring"],
            ),
            (
                "Marketing Strategy Planner",
                "Develop comprehensive marketing strategies for Qatar market",
                ["Target audience analysis", "Channel planning", "Budget allocation", "ROI tracking"],
            ),
            (
                "Event Planner",
                "Professional event planning tool with Qatar venue database",
                ["Venue database", "Budget tracking", "Guest management", "Timeline planning"],
            ),
        ];

        self.tools = tools
            .iter()
            .map(|(name, description, features)| BusinessTool {
                name: name.to_string(),
                description: description.to_string(),
                features: strings(features),
            })
            .collect();
    }

    pub fn basic(&self) -> &[SoftwareRecord] {
        &self.basic
    }

    pub fn advanced(&self) -> &[SoftwareRecord] {
        &self.advanced
    }

    /// Every listing, basic first
    pub fn all(&self) -> Vec<&SoftwareRecord> {
        self.basic.iter().chain(self.advanced.iter()).collect()
    }

    pub fn free_only(&self) -> Vec<&SoftwareRecord> {
        self.all().into_iter().filter(|s| s.is_free).collect()
    }

    pub fn templates(&self) -> &[TemplateRecord] {
        &self.templates
    }

    /// Templates grouped by category (categories sorted)
    pub fn templates_by_category(&self) -> BTreeMap<&str, Vec<&TemplateRecord>> {
        let mut groups: BTreeMap<&str, Vec<&TemplateRecord>> = BTreeMap::new();
        for template in &self.templates {
            groups.entry(template.category.as_str()).or_default().push(template);
        }
        groups
    }

    pub fn tools(&self) -> &[BusinessTool] {
        &self.tools
    }
}

impl Default for SoftwareRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_counts() {
        let registry = SoftwareRegistry::new();
        assert_eq!(registry.basic().len(), 6);
        assert_eq!(registry.advanced().len(), 9);
        assert_eq!(registry.all().len(), 15);
        assert_eq!(registry.templates().len(), 17);
        assert_eq!(registry.tools().len(), 6);
    }

    #[test]
    fn test_free_only() {
        let registry = SoftwareRegistry::new();
        let free = registry.free_only();
        // 3 free starter listings + 5 free advanced listings
        assert_eq!(free.len(), 8);
        assert!(free.iter().all(|s| s.is_free));
        assert!(!free.iter().any(|s| s.name == "Xero"));
    }

    #[test]
    fn test_templates_grouped() {
        let registry = SoftwareRegistry::new();
        let groups = registry.templates_by_category();
        assert_eq!(groups["Financial Reports"].len(), 4);
        assert_eq!(groups["Billing"].len(), 2);
        assert_eq!(groups.keys().next(), Some(&"Billing"));
    }
}
