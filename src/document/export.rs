// Document export - plain text and Markdown renderings

use super::{Block, Document, Mark, SectionId, Span};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Text => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

pub fn render(document: &Document, format: ExportFormat) -> String {
    let mut out: Vec<String> = Vec::new();

    for section in &document.sections {
        if section.id == SectionId::Title {
            let title = document.title();
            match format {
                ExportFormat::Markdown => out.push(format!("# {}", title)),
                ExportFormat::Text => {
                    out.push(format!("{}\n{}", title, "=".repeat(title.chars().count())))
                }
            }
            continue;
        }

        let label = section.id.label();
        match format {
            ExportFormat::Markdown => out.push(format!("## {}", label)),
            ExportFormat::Text => out.push(format!("{}\n{}", label, "-".repeat(label.len()))),
        }

        for block in &section.blocks {
            out.push(render_block(block, format));
        }
    }

    let mut text = out.join("\n\n");
    text.push('\n');
    text
}

fn render_block(block: &Block, format: ExportFormat) -> String {
    match (block, format) {
        (Block::Heading(spans), ExportFormat::Markdown) => format!("### {}", render_spans(spans, format)),
        (Block::Heading(spans), ExportFormat::Text) => render_spans(spans, format).to_uppercase(),
        (Block::Paragraph(spans), _) => render_spans(spans, format),
        (Block::BulletList(items), _) => {
            let bullet = match format {
                ExportFormat::Markdown => "-",
                ExportFormat::Text => "*",
            };
            items
                .iter()
                .map(|item| format!("{} {}", bullet, render_spans(item, format)))
                .collect::<Vec<_>>()
                .join("\n")
        }
        (Block::Image(image), ExportFormat::Markdown) => {
            format!("![{}]({})", image.alt, image.file_name)
        }
        (Block::Image(image), ExportFormat::Text) => format!("[image: {}]", image.file_name),
    }
}

fn render_spans(spans: &[Span], format: ExportFormat) -> String {
    spans.iter().map(|span| render_span(span, format)).collect()
}

fn render_span(span: &Span, format: ExportFormat) -> String {
    if format == ExportFormat::Text || span.text.trim().is_empty() {
        return span.text.clone();
    }

    // Keep surrounding whitespace outside the markers
    let leading = &span.text[..span.text.len() - span.text.trim_start().len()];
    let trailing = &span.text[span.text.trim_end().len()..];
    let mut inner = span.text.trim().to_string();

    if span.has(Mark::Italic) {
        inner = format!("*{}*", inner);
    }
    if span.has(Mark::Bold) {
        inner = format!("**{}**", inner);
    }
    if span.has(Mark::Underline) {
        inner = format!("<u>{}</u>", inner);
    }

    format!("{}{}{}", leading, inner, trailing)
}

#[cfg(test)]
mod tests {
    use super::super::{Block, Section, Span};
    use super::*;

    fn doc() -> Document {
        Document {
            sections: vec![
                Section {
                    id: SectionId::Title,
                    blocks: vec![Block::Heading(vec![Span::plain("Jane Doe - Resume")])],
                },
                Section {
                    id: SectionId::Experience,
                    blocks: vec![
                        Block::Heading(vec![Span::bold("Senior Accountant")]),
                        Block::Paragraph(vec![
                            Span::plain("Led the "),
                            Span::plain("month-end").with(Mark::Italic),
                            Span::plain(" close"),
                        ]),
                        Block::bullets(&["Filed VAT returns", "Ran payroll (WPS)"]),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_markdown() {
        let md = render(&doc(), ExportFormat::Markdown);
        let expected = "# Jane Doe - Resume\n\n\
                        ## Professional Experience\n\n\
                        ### **Senior Accountant**\n\n\
                        Led the *month-end* close\n\n\
                        - Filed VAT returns\n- Ran payroll (WPS)\n";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_text() {
        let text = render(&doc(), ExportFormat::Text);
        assert!(text.starts_with("Jane Doe - Resume\n=================\n\n"));
        assert!(text.contains("SENIOR ACCOUNTANT"));
        assert!(text.contains("* Filed VAT returns"));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_whitespace_stays_outside_markers() {
        let span = Span::bold(" total ");
        assert_eq!(render_span(&span, ExportFormat::Markdown), " **total** ");
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("md".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
        assert_eq!("TEXT".parse::<ExportFormat>(), Ok(ExportFormat::Text));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
