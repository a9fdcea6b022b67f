// Sample resume loaded into the document editor on startup

use super::{Block, Document, Section, SectionId, Span};

fn job(title: &str, employer: &str, duties: &[&str]) -> Vec<Block> {
    vec![
        Block::Heading(vec![Span::bold(title)]),
        Block::paragraph(employer),
        Block::bullets(duties),
    ]
}

pub fn resume() -> Document {
    let title = Section {
        id: SectionId::Title,
        blocks: vec![Block::Heading(vec![Span::plain(
            "Shahid Afreedi - Professional Resume",
        )])],
    };

    let summary = Section {
        id: SectionId::ProfileSummary,
        blocks: vec![Block::paragraph(
            "Accomplished Accountant with 6+ years of progressive experience in Qatar's F&B, \
             Medical, and Trading sectors. Proven expertise in full cycle accounting operations, \
             including accounts payable/receivable, payroll (WPS), bank reconciliations, financial \
             reporting, budgeting, and trade finance. Highly skilled in streamlining financial \
             processes, ensuring regulatory compliance, and delivering accurate, timely reports to \
             support strategic business decisions. Proficient in ERP systems and MS Office, with \
             strong analytical and problem-solving abilities that consistently add value.",
        )],
    };

    let mut experience = Vec::new();
    experience.extend(job(
        "Senior Accountant",
        "CAN International Group (03/2022 - Present) - DOHA, QATAR",
        &[
            "Managed the full accounting cycle, including general ledger entries, accounts payable/receivable, reconciliations, and month-end closings of 10 divisions like Indian coffee house and Micro health laboratories.",
            "Handling supplier invoices, verifying GRNs, and ensuring timely vendor payments.",
            "Preparing monthly profit & loss accounts, budget forecasts, and cost analysis reports.",
            "Coordinating with restaurant managers for stock verification and cost control.",
            "Filing VAT returns, managing tax compliance, and liaising with auditors.",
            "Maintaining asset registers, depreciation schedules, and utility cost tracking.",
            "Supervising daily sales reconciliation (POS, online platforms, walk-ins).",
            "Supporting internal controls for petty cash, advance settlements, and payroll disbursement.",
            "Preparing salary sheets, gratuity, leave salary, and end-of-service benefits.",
            "Monitoring food cost, wastage reports, and pilferage trends.",
            "Handling month-end and year-end closing, preparing MIS reports for management.",
            "Ensuring software backups, account closing entries, and ledger maintenance.",
            "Supporting inter-branch reconciliation and group-level financial consolidation.",
            "Streamlined the monthly closing process, reducing it from ten days to six.",
            "Developed a budgeting model that cut overspending across the organization by 15%.",
            "Implemented a financial reporting system that gave management faster, clearer data.",
            "Trained and mentored junior accountants on financial analysis practices.",
        ],
    ));
    experience.extend(job(
        "Accountant",
        "ANORA GOLD AND DIAMONDS LLP (03/2021-02/2022) - KUTTIADY, KERALA",
        &[
            "Responsible for entire Accounting / Document management and clerical job of the company.",
            "Managing the cash flow and billing of client invoices in compliance with firm policy.",
            "Recording of expenses & purchase and material delivery.",
            "Make profit & loss report and submit to manager.",
            "Keep and track all company related documents like proposals, purchase orders and sales orders.",
            "Installation and back of software.",
            "Managed the monthly financial closing process for timely and accurate reporting.",
            "Automated accounts payable tracking, reducing processing time by 30%.",
        ],
    ));
    experience.extend(job(
        "Junior Accountant",
        "VIBEX INTERNATIONAL CARGO LTD (10/2019-03/2020) - UAE",
        &[
            "Assist with the preparation, analysis and verification of accounting records, financial statements and reports.",
            "Managing the cash flow and billing of client invoices in compliance with firm policy.",
            "Maintain the general ledger operations.",
            "Support the month end close process.",
            "Audit, process and pay vendor invoices in an accurate and timely manner.",
            "Assisted in the preparation of monthly financial statements.",
            "Collaborated with the auditing team during annual audits.",
            "Implemented a spreadsheet tracking system for expense reports, reducing processing time by 20%.",
        ],
    ));
    experience.extend(job(
        "Accountant",
        "BOMBAY DYIENG (11/2018-05/2019) - ERNAKULAM, KERALA",
        &[
            "Prepare monthly financial statements for company.",
            "Ensure accurate and timely monthly close activities.",
            "Prepare monthly account reconciliations.",
            "Review and verify accuracy of reported data.",
            "Present all monthly and year-end financial reports.",
            "Analyse and interpret financial reports and records.",
            "Ensure compliance with all statutory and company requirements.",
            "Review accounts payable and accounts receivable.",
            "Prepare tax schedules.",
            "Prepare for and coordinate internal and external audit processes.",
            "Manage fixed asset process and policy.",
        ],
    ));

    let education = Section {
        id: SectionId::EducationSkills,
        blocks: vec![
            Block::Heading(vec![Span::bold("Education")]),
            Block::bullets(&[
                "B. Com - University of Calicut (2015-2018)",
                "SAP, FICO, Tally, Peachtree, Quickbooks, Zoho - Axinoz Institute of Accountancy (2018-2019)",
            ]),
            Block::Heading(vec![Span::bold("Core Competencies")]),
            Block::bullets(&[
                "Full cycle accounting operations",
                "Financial reporting",
                "Streamlining financial processes",
                "General ledger entries",
                "Asset registers",
                "Daily sales reconciliation",
                "Bank reconciliations",
                "Budgeting",
                "Analytical and problem-solving abilities",
                "Month-end closings",
                "Utility cost tracking",
                "Internal controls",
                "Payroll (WPS)",
                "Trade finance",
                "Regulatory compliance",
                "Cost analysis",
                "Depreciation schedules",
                "Document management",
                "Profit & loss reports",
            ]),
            Block::Heading(vec![Span::bold("Languages")]),
            Block::bullets(&["Arabic", "English", "Malayalam", "Tamil", "Hindi"]),
        ],
    };

    Document {
        sections: vec![
            title,
            summary,
            Section {
                id: SectionId::Experience,
                blocks: experience,
            },
            education,
        ],
    }
}
