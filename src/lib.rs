// Qatar Business & Life Hub - Core Library
// Exposes all modules for use in the CLI/TUI, the API server, and tests

pub mod errors;
pub mod input;
pub mod notify;
pub mod calculators;    // VAT, P&L, ROI, break-even
pub mod catalog;        // Qatar guide, software, templates, services
pub mod document;       // Resume editor model + export
pub mod uploads;
pub mod pdf_editor;     // Mock PDF editor state
pub mod contact;
pub mod config;
pub mod logging;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use errors::{HubError, Result};
pub use input::{format_money, format_percent, round2, CURRENCY};
pub use notify::{Notification, NotificationCenter, Variant};
pub use calculators::{
    Calculator, CalculatorKind, CalculatorState,
    Vat, VatInput, VatMode, VatResult,
    ProfitLoss, ProfitLossInput, ProfitLossResult,
    Roi, RoiInput, RoiResult,
    BreakEven, BreakEvenInput, BreakEvenResult,
};
pub use catalog::{
    Catalog, CategoryFilter, PlaceCategory, PlaceDirectory, PlaceRecord,
    SoftwareRegistry, SoftwareRecord, TemplateRecord, ServiceOffering,
};
pub use document::{
    Block, Document, DocumentEditor, ExportFormat, Format, Mark, SectionId, Span,
};
pub use uploads::{FileUpload, UploadKind};
pub use pdf_editor::{PdfEditor, Tool};
pub use contact::{ContactForm, ContactSubmission};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
