// 📝 Document Model - ordered, typed content blocks per section
//
// Formatting is explicit data (marks on spans, block kinds) rather than
// whatever the host editing surface happens to do, so a document can be
// exported deterministically.

pub mod export;
pub mod resume;

pub use export::ExportFormat;
pub use resume::resume;

use crate::errors::{HubError, Result};
use crate::notify::Notification;
use crate::uploads::{self, FileUpload, UploadKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// CONTENT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub marks: BTreeSet<Mark>,
}

impl Span {
    pub fn plain(text: &str) -> Self {
        Span {
            text: text.to_string(),
            marks: BTreeSet::new(),
        }
    }

    pub fn bold(text: &str) -> Self {
        Span::plain(text).with(Mark::Bold)
    }

    pub fn with(mut self, mark: Mark) -> Self {
        self.marks.insert(mark);
        self
    }

    pub fn has(&self, mark: Mark) -> bool {
        self.marks.contains(&mark)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub file_name: String,
    pub mime: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Block {
    Heading(Vec<Span>),
    Paragraph(Vec<Span>),
    BulletList(Vec<Vec<Span>>),
    Image(ImageBlock),
}

impl Block {
    pub fn paragraph(text: &str) -> Self {
        Block::Paragraph(vec![Span::plain(text)])
    }

    pub fn bullets(items: &[&str]) -> Self {
        Block::BulletList(items.iter().map(|i| vec![Span::plain(i)]).collect())
    }

    /// Plain text of the block (list items joined by newlines)
    pub fn text(&self) -> String {
        match self {
            Block::Heading(spans) | Block::Paragraph(spans) => join_spans(spans),
            Block::BulletList(items) => items
                .iter()
                .map(|item| join_spans(item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Image(image) => image.alt.clone(),
        }
    }

    fn spans_mut(&mut self) -> Vec<&mut Span> {
        match self {
            Block::Heading(spans) | Block::Paragraph(spans) => spans.iter_mut().collect(),
            Block::BulletList(items) => items.iter_mut().flat_map(|i| i.iter_mut()).collect(),
            Block::Image(_) => Vec::new(),
        }
    }
}

fn join_spans(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Title,
    ProfileSummary,
    Experience,
    EducationSkills,
}

impl SectionId {
    pub const ALL: [SectionId; 4] = [
        SectionId::Title,
        SectionId::ProfileSummary,
        SectionId::Experience,
        SectionId::EducationSkills,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SectionId::Title => "Document Title",
            SectionId::ProfileSummary => "Profile Summary",
            SectionId::Experience => "Professional Experience",
            SectionId::EducationSkills => "Education & Skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// Text of the title section
    pub fn title(&self) -> String {
        self.section(SectionId::Title)
            .map(|s| s.blocks.iter().map(Block::text).collect::<Vec<_>>().join(" "))
            .unwrap_or_default()
    }

    pub fn export(&self, format: ExportFormat) -> String {
        export::render(self, format)
    }
}

// ============================================================================
// EDITOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Bold,
    Italic,
    Underline,
    BulletList,
}

impl Format {
    pub fn label(&self) -> &'static str {
        match self {
            Format::Bold => "bold",
            Format::Italic => "italic",
            Format::Underline => "underline",
            Format::BulletList => "bullet list",
        }
    }

    fn mark(&self) -> Option<Mark> {
        match self {
            Format::Bold => Some(Mark::Bold),
            Format::Italic => Some(Mark::Italic),
            Format::Underline => Some(Mark::Underline),
            Format::BulletList => None,
        }
    }
}

/// Editing session over one document. Every edit targets the focused section.
#[derive(Debug, Clone)]
pub struct DocumentEditor {
    document: Document,
    focused: Option<SectionId>,
}

impl DocumentEditor {
    pub fn new(document: Document) -> Self {
        DocumentEditor {
            document,
            focused: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn focus(&mut self, section: SectionId) {
        self.focused = Some(section);
    }

    pub fn focused(&self) -> Option<SectionId> {
        self.focused
    }

    fn focused_section(&mut self) -> Result<&mut Section> {
        let id = self
            .focused
            .ok_or_else(|| HubError::validation("section", "select a section first"))?;
        self.document
            .section_mut(id)
            .ok_or_else(|| HubError::validation("section", "section not found in document"))
    }

    fn block_mut(&mut self, index: usize) -> Result<&mut Block> {
        self.focused_section()?
            .blocks
            .get_mut(index)
            .ok_or_else(|| HubError::validation("block", "no block at that position"))
    }

    /// Toggle a mark on every span of a block, or toggle it between a
    /// paragraph and a bullet list
    pub fn apply_format(&mut self, format: Format, index: usize) -> Result<Notification> {
        match format.mark() {
            Some(mark) => {
                let block = self.block_mut(index)?;
                if matches!(block, Block::Image(_)) {
                    return Err(HubError::validation("block", "images cannot be formatted"));
                }
                let mut spans = block.spans_mut();
                let all_marked = !spans.is_empty() && spans.iter().all(|s| s.has(mark));
                for span in spans.iter_mut() {
                    if all_marked {
                        span.marks.remove(&mark);
                    } else {
                        span.marks.insert(mark);
                    }
                }
            }
            None => self.toggle_list(index)?,
        }

        Ok(Notification::info(
            "Text Formatted",
            format!("Applied {} formatting", format.label()),
        )
        .with_duration(2))
    }

    fn toggle_list(&mut self, index: usize) -> Result<()> {
        let section = self.focused_section()?;
        let block = section
            .blocks
            .get(index)
            .cloned()
            .ok_or_else(|| HubError::validation("block", "no block at that position"))?;

        match block {
            Block::Paragraph(spans) => {
                section.blocks[index] = Block::BulletList(vec![spans]);
            }
            Block::Heading(_) => {
                // A list only turns back into paragraphs
                return Err(HubError::validation("block", "headings cannot become lists"));
            }
            Block::BulletList(items) => {
                // Each item becomes its own paragraph, in place
                let paragraphs: Vec<Block> = items.into_iter().map(Block::Paragraph).collect();
                section.blocks.splice(index..=index, paragraphs);
            }
            Block::Image(_) => {
                return Err(HubError::validation("block", "images cannot be formatted"));
            }
        }
        Ok(())
    }

    /// Replace the text of a block. Lists take one item per line.
    pub fn edit_text(&mut self, index: usize, text: &str) -> Result<()> {
        let block = self.block_mut(index)?;
        let replacement = match &*block {
            Block::Heading(_) => Block::Heading(vec![Span::plain(text)]),
            Block::Paragraph(_) => Block::Paragraph(vec![Span::plain(text)]),
            Block::BulletList(_) => Block::BulletList(
                text.lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(|l| vec![Span::plain(l.trim())])
                    .collect(),
            ),
            Block::Image(_) => {
                return Err(HubError::validation("block", "images have no editable text"));
            }
        };
        *block = replacement;
        Ok(())
    }

    /// Append a paragraph to the focused section
    pub fn add_paragraph(&mut self, text: &str) -> Result<()> {
        self.focused_section()?.blocks.push(Block::paragraph(text));
        Ok(())
    }

    /// Append an uploaded image to the focused section. Only image types are
    /// accepted and the file itself is never read.
    pub fn insert_image(&mut self, upload: FileUpload) -> Result<Notification> {
        // Focus is checked first so the user learns where the image would go
        self.focused_section()?;
        let upload = uploads::accept(UploadKind::Image, upload)?;

        let section = self.focused_section()?;
        section.blocks.push(Block::Image(ImageBlock {
            alt: "Uploaded Image".to_string(),
            file_name: upload.name,
            mime: upload.mime,
        }));

        Ok(Notification::info(
            "Image Added",
            "Image has been inserted into the document",
        ))
    }

    pub fn export(&self, format: ExportFormat) -> (String, Notification) {
        let rendered = self.document.export(format);
        let notification = Notification::info(
            "Document Exported",
            format!("Document exported as 'professional_document.{}'", format.extension()),
        );
        (rendered, notification)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document {
            sections: vec![
                Section {
                    id: SectionId::Title,
                    blocks: vec![Block::Heading(vec![Span::plain("My CV")])],
                },
                Section {
                    id: SectionId::ProfileSummary,
                    blocks: vec![
                        Block::paragraph("Accountant in Doha"),
                        Block::bullets(&["VAT", "WPS"]),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_edits_require_focus() {
        let mut editor = DocumentEditor::new(sample());
        let err = editor.apply_format(Format::Bold, 0).unwrap_err();
        assert_eq!(err.field(), Some("section"));

        let err = editor.insert_image(FileUpload::new("me.png", "image/png", 1)).unwrap_err();
        assert_eq!(err.field(), Some("section"));
    }

    #[test]
    fn test_bold_toggles() {
        let mut editor = DocumentEditor::new(sample());
        editor.focus(SectionId::ProfileSummary);

        editor.apply_format(Format::Bold, 0).unwrap();
        let block = &editor.document().section(SectionId::ProfileSummary).unwrap().blocks[0];
        assert_eq!(block, &Block::Paragraph(vec![Span::bold("Accountant in Doha")]));

        editor.apply_format(Format::Bold, 0).unwrap();
        let block = &editor.document().section(SectionId::ProfileSummary).unwrap().blocks[0];
        assert_eq!(block, &Block::paragraph("Accountant in Doha"));
    }

    #[test]
    fn test_marks_apply_to_list_items() {
        let mut editor = DocumentEditor::new(sample());
        editor.focus(SectionId::ProfileSummary);
        editor.apply_format(Format::Italic, 1).unwrap();

        let section = editor.document().section(SectionId::ProfileSummary).unwrap();
        match &section.blocks[1] {
            Block::BulletList(items) => {
                assert!(items.iter().flatten().all(|s| s.has(Mark::Italic)));
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_bullet_list_toggle() {
        let mut editor = DocumentEditor::new(sample());
        editor.focus(SectionId::ProfileSummary);

        // List → paragraphs, in place
        editor.apply_format(Format::BulletList, 1).unwrap();
        let blocks = &editor.document().section(SectionId::ProfileSummary).unwrap().blocks;
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2], Block::paragraph("WPS"));

        // Paragraph → single-item list
        editor.apply_format(Format::BulletList, 0).unwrap();
        let blocks = &editor.document().section(SectionId::ProfileSummary).unwrap().blocks;
        assert_eq!(blocks[0], Block::bullets(&["Accountant in Doha"]));
    }

    #[test]
    fn test_heading_stays_a_heading() {
        let mut editor = DocumentEditor::new(sample());
        editor.focus(SectionId::Title);

        let err = editor.apply_format(Format::BulletList, 0).unwrap_err();
        assert_eq!(err.field(), Some("block"));
        let blocks = &editor.document().section(SectionId::Title).unwrap().blocks;
        assert_eq!(blocks[0], Block::Heading(vec![Span::plain("My CV")]));
    }

    #[test]
    fn test_out_of_range_block() {
        let mut editor = DocumentEditor::new(sample());
        editor.focus(SectionId::Title);
        let err = editor.apply_format(Format::Underline, 5).unwrap_err();
        assert_eq!(err.field(), Some("block"));
    }

    #[test]
    fn test_insert_image() {
        let mut editor = DocumentEditor::new(sample());
        editor.focus(SectionId::ProfileSummary);

        let err = editor.insert_image(FileUpload::new("cv.pdf", "application/pdf", 1)).unwrap_err();
        assert!(matches!(err, HubError::UnsupportedFileType { .. }));

        editor.insert_image(FileUpload::new("me.png", "image/png", 1)).unwrap();
        let blocks = &editor.document().section(SectionId::ProfileSummary).unwrap().blocks;
        assert!(matches!(blocks.last(), Some(Block::Image(img)) if img.file_name == "me.png"));

        // Images refuse text formatting
        let last = blocks.len() - 1;
        assert!(editor.apply_format(Format::Bold, last).is_err());
    }

    #[test]
    fn test_edit_text() {
        let mut editor = DocumentEditor::new(sample());
        editor.focus(SectionId::ProfileSummary);
        editor.edit_text(1, "Payroll\n\nBudgeting\n").unwrap();

        let blocks = &editor.document().section(SectionId::ProfileSummary).unwrap().blocks;
        assert_eq!(blocks[1], Block::bullets(&["Payroll", "Budgeting"]));

        editor.focus(SectionId::Title);
        editor.edit_text(0, "New Title").unwrap();
        assert_eq!(editor.document().title(), "New Title");
    }

    #[test]
    fn test_add_paragraph() {
        let mut editor = DocumentEditor::new(sample());
        assert!(editor.add_paragraph("x").is_err());
        editor.focus(SectionId::ProfileSummary);
        editor.add_paragraph("Available immediately").unwrap();
        let blocks = &editor.document().section(SectionId::ProfileSummary).unwrap().blocks;
        assert_eq!(blocks.last(), Some(&Block::paragraph("Available immediately")));
    }
}
