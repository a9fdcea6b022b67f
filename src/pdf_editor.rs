// 📄 PDF Editor (mock) - toolbar, zoom, paging and upload state
// Nothing here reads or writes PDF bytes: save/download only confirm.

use crate::errors::Result;
use crate::notify::Notification;
use crate::uploads::{self, FileUpload, UploadKind};
use serde::Serialize;

pub const MIN_ZOOM: u16 = 50;
pub const MAX_ZOOM: u16 = 200;
pub const ZOOM_STEP: u16 = 25;
pub const PREVIEW_PAGES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Select,
    Text,
    Image,
    Rectangle,
    Circle,
    Pen,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Select,
        Tool::Text,
        Tool::Image,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Pen,
        Tool::Eraser,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Text => "Text",
            Tool::Image => "Image",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Pen => "Draw",
            Tool::Eraser => "Eraser",
        }
    }
}

/// Feature blurbs shown next to the editor
pub const FEATURES: [&str; 6] = [
    "Professional PDF editing tools",
    "Arabic & English text support",
    "Qatar government form templates",
    "Secure cloud processing",
    "Multiple format support",
    "Real-time collaboration",
];

#[derive(Debug, Clone, Serialize)]
pub struct PdfEditor {
    pub tool: Tool,
    pub zoom: u16,
    pub page: u32,
    pub total_pages: u32,
    pub drag_active: bool,
    pub document: Option<FileUpload>,
}

impl Default for PdfEditor {
    fn default() -> Self {
        PdfEditor {
            tool: Tool::Select,
            zoom: 100,
            page: 1,
            total_pages: PREVIEW_PAGES,
            drag_active: false,
            document: None,
        }
    }
}

impl PdfEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn next_page(&mut self) {
        if self.page < self.total_pages {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn drag_enter(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Drop ends the drag regardless of whether the file is accepted
    pub fn drop_file(&mut self, file: FileUpload) -> Result<Notification> {
        self.drag_active = false;
        self.upload(file)
    }

    /// Load a PDF into the editor. Anything else is rejected and the
    /// current document stays loaded.
    pub fn upload(&mut self, file: FileUpload) -> Result<Notification> {
        let file = uploads::accept(UploadKind::Pdf, file)?;
        let notification = Notification::info(
            "File Uploaded Successfully",
            format!("{} ({})", file.name, file.size_label()),
        );
        self.document = Some(file);
        self.page = 1;
        Ok(notification)
    }

    pub fn save(&self) -> Notification {
        Notification::info("Document Saved", "Your PDF has been saved successfully")
    }

    pub fn download(&self) -> Notification {
        Notification::info(
            "Download Started",
            "Your edited PDF is being prepared for download",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::HubError;

    #[test]
    fn test_zoom_is_clamped() {
        let mut editor = PdfEditor::new();
        for _ in 0..10 {
            editor.zoom_in();
        }
        assert_eq!(editor.zoom, MAX_ZOOM);
        for _ in 0..10 {
            editor.zoom_out();
        }
        assert_eq!(editor.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_paging_is_clamped() {
        let mut editor = PdfEditor::new();
        editor.previous_page();
        assert_eq!(editor.page, 1);
        for _ in 0..5 {
            editor.next_page();
        }
        assert_eq!(editor.page, PREVIEW_PAGES);
    }

    #[test]
    fn test_drop_pdf() {
        let mut editor = PdfEditor::new();
        editor.drag_enter();
        assert!(editor.drag_active);

        let n = editor
            .drop_file(FileUpload::new("visa.pdf", "application/pdf", 1_048_576))
            .unwrap();
        assert!(!editor.drag_active);
        assert_eq!(n.description, "visa.pdf (1.0 MB)");
        assert_eq!(editor.document.as_ref().map(|d| d.name.as_str()), Some("visa.pdf"));
    }

    #[test]
    fn test_rejected_upload_keeps_current_document() {
        let mut editor = PdfEditor::new();
        editor.upload(FileUpload::new("a.pdf", "", 1)).unwrap();
        editor.drag_enter();

        let err = editor.drop_file(FileUpload::new("b.png", "image/png", 1)).unwrap_err();
        assert!(matches!(err, HubError::UnsupportedFileType { .. }));
        assert!(!editor.drag_active);
        assert_eq!(editor.document.as_ref().map(|d| d.name.as_str()), Some("a.pdf"));
    }

    #[test]
    fn test_tools() {
        let mut editor = PdfEditor::new();
        editor.select_tool(Tool::Pen);
        assert_eq!(editor.tool.label(), "Draw");
        assert_eq!(Tool::ALL.len(), 7);
    }
}
