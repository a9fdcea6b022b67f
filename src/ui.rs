use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::Path;
use std::time::Duration;

use qatar_hub::calculators::{BreakEven, CalculatorKind, CalculatorState, ProfitLoss, Roi, Vat};
use qatar_hub::catalog::{Catalog, CategoryFilter, PlaceRecord};
use qatar_hub::document::{self, Block as DocBlock, DocumentEditor, Format, Mark, SectionId};
use qatar_hub::pdf_editor::{self, PdfEditor, Tool};
use qatar_hub::uploads::FileUpload;
use qatar_hub::{
    Config, ContactForm, ContactSubmission, ExportFormat, HubError, Notification,
    NotificationCenter,
};

// ============================================================================
// PAGES & MODES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    DocumentEditor,
    AccountingTools,
    QatarGuide,
    PdfEditor,
    BusinessServices,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::DocumentEditor,
        Page::AccountingTools,
        Page::QatarGuide,
        Page::PdfEditor,
        Page::BusinessServices,
    ];

    pub fn next(&self) -> Self {
        match self {
            Page::DocumentEditor => Page::AccountingTools,
            Page::AccountingTools => Page::QatarGuide,
            Page::QatarGuide => Page::PdfEditor,
            Page::PdfEditor => Page::BusinessServices,
            Page::BusinessServices => Page::DocumentEditor,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::DocumentEditor => Page::BusinessServices,
            Page::AccountingTools => Page::DocumentEditor,
            Page::QatarGuide => Page::AccountingTools,
            Page::PdfEditor => Page::QatarGuide,
            Page::BusinessServices => Page::PdfEditor,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::DocumentEditor => "Document Editor",
            Page::AccountingTools => "Accounting Tools",
            Page::QatarGuide => "Qatar Guide",
            Page::PdfEditor => "PDF Editor",
            Page::BusinessServices => "Business Services",
        }
    }
}

/// What keystrokes are currently typed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editing {
    CalculatorField,
    PlaceSearch,
    BlockText,
    NewParagraph,
    ImagePath,
    PdfPath,
    ContactField,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing(Editing),
}

/// Form values in effect when an in-place prompt opened, put back on Esc
#[derive(Debug, Clone)]
enum Saved {
    Calculator(Vec<String>),
    Search(String),
    Contact(ContactForm),
}

const CONTACT_FIELDS: [&str; 6] = ["Name *", "Email *", "Phone", "Company", "Service", "Message *"];

fn contact_value_mut(form: &mut ContactForm, field: usize) -> Option<&mut String> {
    match field {
        0 => Some(&mut form.name),
        1 => Some(&mut form.email),
        2 => Some(&mut form.phone),
        3 => Some(&mut form.company),
        4 => Some(&mut form.service),
        5 => Some(&mut form.message),
        _ => None,
    }
}

fn contact_values(form: &ContactForm) -> [&str; 6] {
    [
        form.name.as_str(),
        form.email.as_str(),
        form.phone.as_str(),
        form.company.as_str(),
        form.service.as_str(),
        form.message.as_str(),
    ]
}

// ============================================================================
// CALCULATOR PANEL
// ============================================================================

/// The four calculators, each keeping its own form and result
pub struct CalculatorPanel {
    pub kind: CalculatorKind,
    pub field: usize,
    pub vat: CalculatorState<Vat>,
    pub profit_loss: CalculatorState<ProfitLoss>,
    pub roi: CalculatorState<Roi>,
    pub break_even: CalculatorState<BreakEven>,
    default_vat_rate: String,
}

impl CalculatorPanel {
    pub fn new(default_vat_rate: String) -> Self {
        let mut vat = CalculatorState::<Vat>::new();
        vat.input.rate = default_vat_rate.clone();

        Self {
            kind: CalculatorKind::Vat,
            field: 0,
            vat,
            profit_loss: CalculatorState::new(),
            roi: CalculatorState::new(),
            break_even: CalculatorState::new(),
            default_vat_rate,
        }
    }

    pub fn switch(&mut self, kind: CalculatorKind) {
        self.kind = kind;
        self.field = 0;
    }

    pub fn next_field(&mut self) {
        let n = self.kind.fields().len();
        self.field = (self.field + 1) % n;
    }

    pub fn previous_field(&mut self) {
        let n = self.kind.fields().len();
        self.field = (self.field + n - 1) % n;
    }

    /// Current values of the visible form, in field order
    pub fn values(&self) -> Vec<&str> {
        let fields: Vec<&String> = match self.kind {
            CalculatorKind::Vat => vec![&self.vat.input.amount, &self.vat.input.rate],
            CalculatorKind::ProfitLoss => {
                let i = &self.profit_loss.input;
                vec![&i.revenue, &i.cogs, &i.expenses, &i.other_income, &i.other_expenses]
            }
            CalculatorKind::Roi => {
                let i = &self.roi.input;
                vec![&i.investment, &i.final_value, &i.time_period]
            }
            CalculatorKind::BreakEven => {
                let i = &self.break_even.input;
                vec![&i.fixed_costs, &i.variable_cost, &i.selling_price]
            }
        };
        fields.into_iter().map(String::as_str).collect()
    }

    pub fn value_mut(&mut self) -> Option<&mut String> {
        let field = self.field;
        match self.kind {
            CalculatorKind::Vat => {
                let i = &mut self.vat.input;
                match field {
                    0 => Some(&mut i.amount),
                    1 => Some(&mut i.rate),
                    _ => None,
                }
            }
            CalculatorKind::ProfitLoss => {
                let i = &mut self.profit_loss.input;
                match field {
                    0 => Some(&mut i.revenue),
                    1 => Some(&mut i.cogs),
                    2 => Some(&mut i.expenses),
                    3 => Some(&mut i.other_income),
                    4 => Some(&mut i.other_expenses),
                    _ => None,
                }
            }
            CalculatorKind::Roi => {
                let i = &mut self.roi.input;
                match field {
                    0 => Some(&mut i.investment),
                    1 => Some(&mut i.final_value),
                    2 => Some(&mut i.time_period),
                    _ => None,
                }
            }
            CalculatorKind::BreakEven => {
                let i = &mut self.break_even.input;
                match field {
                    0 => Some(&mut i.fixed_costs),
                    1 => Some(&mut i.variable_cost),
                    2 => Some(&mut i.selling_price),
                    _ => None,
                }
            }
        }
    }

    /// Put back values captured with `values()`, in field order
    pub fn restore(&mut self, values: &[String]) {
        let current = self.field;
        for (i, value) in values.iter().enumerate() {
            self.field = i;
            if let Some(field) = self.value_mut() {
                *field = value.clone();
            }
        }
        self.field = current;
    }

    pub fn toggle_vat_mode(&mut self) {
        self.vat.input.mode = self.vat.input.mode.toggle();
    }

    pub fn calculate(&mut self) -> Notification {
        match self.kind {
            CalculatorKind::Vat => self.vat.calculate(),
            CalculatorKind::ProfitLoss => self.profit_loss.calculate(),
            CalculatorKind::Roi => self.roi.calculate(),
            CalculatorKind::BreakEven => self.break_even.calculate(),
        }
    }

    pub fn reset(&mut self) {
        match self.kind {
            CalculatorKind::Vat => {
                self.vat.reset();
                self.vat.input.rate = self.default_vat_rate.clone();
            }
            CalculatorKind::ProfitLoss => self.profit_loss.reset(),
            CalculatorKind::Roi => self.roi.reset(),
            CalculatorKind::BreakEven => self.break_even.reset(),
        }
        self.field = 0;
    }

    pub fn summary(&self) -> Vec<(&'static str, String)> {
        match self.kind {
            CalculatorKind::Vat => self.vat.summary(),
            CalculatorKind::ProfitLoss => self.profit_loss.summary(),
            CalculatorKind::Roi => self.roi.summary(),
            CalculatorKind::BreakEven => self.break_even.summary(),
        }
    }

    pub fn error(&self) -> Option<&HubError> {
        match self.kind {
            CalculatorKind::Vat => self.vat.error(),
            CalculatorKind::ProfitLoss => self.profit_loss.error(),
            CalculatorKind::Roi => self.roi.error(),
            CalculatorKind::BreakEven => self.break_even.error(),
        }
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct App {
    pub current_page: Page,
    pub mode: InputMode,
    /// Shared buffer for path and text prompts
    pub input: String,
    saved: Option<Saved>,
    pub catalog: Catalog,
    pub notifications: NotificationCenter,

    // Document editor
    pub editor: DocumentEditor,
    pub block: usize,

    // Accounting tools
    pub calculators: CalculatorPanel,

    // Qatar guide
    pub search: String,
    pub filter: CategoryFilter,
    pub places_state: TableState,

    // PDF editor
    pub pdf: PdfEditor,

    // Business services
    pub services_state: TableState,
    pub contact: ContactForm,
    pub contact_field: usize,
    pub last_submission: Option<ContactSubmission>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut places_state = TableState::default();
        places_state.select(Some(0));

        let mut services_state = TableState::default();
        services_state.select(Some(0));

        Self {
            current_page: Page::DocumentEditor,
            mode: InputMode::Normal,
            input: String::new(),
            saved: None,
            catalog: Catalog::load(),
            notifications: NotificationCenter::with_default_duration(config.notification_secs),
            editor: DocumentEditor::new(document::resume()),
            block: 0,
            calculators: CalculatorPanel::new(config.vat_rate_field()),
            search: String::new(),
            filter: CategoryFilter::All,
            places_state,
            pdf: PdfEditor::new(),
            services_state,
            contact: ContactForm::default(),
            contact_field: 0,
            last_submission: None,
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn report(&mut self, result: qatar_hub::Result<Notification>) {
        let notification = match result {
            Ok(n) => n,
            Err(err) => Notification::from(&err),
        };
        self.notify(notification);
    }

    /// Places matching the current search and category filter
    pub fn places(&self) -> Vec<&PlaceRecord> {
        self.catalog.places.search(&self.search, self.filter)
    }

    pub fn selected_place(&self) -> Option<&PlaceRecord> {
        self.places_state
            .selected()
            .and_then(|i| self.places().get(i).copied())
    }

    fn focused_blocks(&self) -> &[DocBlock] {
        self.editor
            .focused()
            .and_then(|id| self.editor.document().section(id))
            .map(|s| s.blocks.as_slice())
            .unwrap_or(&[])
    }

    fn selected_block(&self) -> Option<&DocBlock> {
        self.focused_blocks().get(self.block)
    }

    // ------------------------------------------------------------------------
    // Key handling
    // ------------------------------------------------------------------------

    /// Returns true when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            InputMode::Editing(target) => {
                self.handle_editing(target, key);
                false
            }
            InputMode::Normal => self.handle_normal(key),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.previous_page();
                } else {
                    self.next_page();
                }
            }
            KeyCode::BackTab => self.previous_page(),
            _ => match self.current_page {
                Page::DocumentEditor => self.document_key(key.code),
                Page::AccountingTools => self.accounting_key(key.code),
                Page::QatarGuide => self.guide_key(key.code),
                Page::PdfEditor => self.pdf_key(key.code),
                Page::BusinessServices => self.services_key(key.code),
            },
        }
        false
    }

    fn document_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('s') => {
                let next = match self.editor.focused() {
                    None => SectionId::ALL[0],
                    Some(current) => {
                        let pos = SectionId::ALL.iter().position(|s| *s == current).unwrap_or(0);
                        SectionId::ALL[(pos + 1) % SectionId::ALL.len()]
                    }
                };
                self.editor.focus(next);
                self.block = 0;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.focused_blocks().len();
                if len > 0 {
                    self.block = (self.block + 1) % len;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = self.focused_blocks().len();
                if len > 0 {
                    self.block = (self.block + len - 1) % len;
                }
            }
            KeyCode::Char('b') => self.format_block(Format::Bold),
            KeyCode::Char('i') => self.format_block(Format::Italic),
            KeyCode::Char('u') => self.format_block(Format::Underline),
            KeyCode::Char('l') => self.format_block(Format::BulletList),
            KeyCode::Char('e') => {
                let text = match self.selected_block() {
                    Some(block @ DocBlock::BulletList(_)) => Some(block.text().replace('\n', "; ")),
                    Some(block) => Some(block.text()),
                    None => None,
                };
                match text {
                    Some(text) => {
                        self.input = text;
                        self.begin_editing(Editing::BlockText);
                    }
                    None => self.notify(Notification::from(&HubError::validation(
                        "section",
                        "select a section first",
                    ))),
                }
            }
            KeyCode::Char('a') => self.start_prompt(Editing::NewParagraph),
            KeyCode::Char('g') => self.start_prompt(Editing::ImagePath),
            KeyCode::Char('x') => self.export_document(ExportFormat::Markdown),
            KeyCode::Char('t') => self.export_document(ExportFormat::Text),
            _ => {}
        }
    }

    fn format_block(&mut self, format: Format) {
        let result = self.editor.apply_format(format, self.block);
        self.report(result);
        // List → paragraphs can change the block count
        let len = self.focused_blocks().len();
        if self.block >= len {
            self.block = len.saturating_sub(1);
        }
    }

    fn export_document(&mut self, format: ExportFormat) {
        let (rendered, notification) = self.editor.export(format);
        let file_name = format!("professional_document.{}", format.extension());
        match std::fs::write(&file_name, rendered) {
            Ok(()) => self.notify(notification),
            Err(err) => self.notify(Notification::destructive(
                "Export Failed",
                format!("{}: {}", file_name, err),
            )),
        }
    }

    fn accounting_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Right | KeyCode::Char('l') => {
                let next = self.calculators.kind.next();
                self.calculators.switch(next);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let previous = self.calculators.kind.previous();
                self.calculators.switch(previous);
            }
            KeyCode::Down | KeyCode::Char('j') => self.calculators.next_field(),
            KeyCode::Up | KeyCode::Char('k') => self.calculators.previous_field(),
            KeyCode::Enter | KeyCode::Char('e') => {
                self.begin_editing(Editing::CalculatorField);
            }
            KeyCode::Char('c') => {
                let notification = self.calculators.calculate();
                self.notify(notification);
            }
            KeyCode::Char('r') => self.calculators.reset(),
            KeyCode::Char('m') if self.calculators.kind == CalculatorKind::Vat => {
                self.calculators.toggle_vat_mode();
            }
            _ => {}
        }
    }

    fn guide_key(&mut self, code: KeyCode) {
        let len = self.places().len();
        match code {
            KeyCode::Char('/') => self.begin_editing(Editing::PlaceSearch),
            KeyCode::Char('f') => {
                self.filter = self.filter.next();
                self.reset_place_selection();
            }
            KeyCode::Char('x') => {
                self.search.clear();
                self.filter = CategoryFilter::All;
                self.reset_place_selection();
            }
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                let i = self.places_state.selected().map(|i| (i + 1) % len).unwrap_or(0);
                self.places_state.select(Some(i));
            }
            KeyCode::Up | KeyCode::Char('k') if len > 0 => {
                let i = self
                    .places_state
                    .selected()
                    .map(|i| (i + len - 1) % len)
                    .unwrap_or(0);
                self.places_state.select(Some(i));
            }
            _ => {}
        }
    }

    fn reset_place_selection(&mut self) {
        if self.places().is_empty() {
            self.places_state.select(None);
        } else {
            self.places_state.select(Some(0));
        }
    }

    fn pdf_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                self.pdf.select_tool(Tool::ALL[index]);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.pdf.zoom_in(),
            KeyCode::Char('-') => self.pdf.zoom_out(),
            KeyCode::Right | KeyCode::Char('n') => self.pdf.next_page(),
            KeyCode::Left | KeyCode::Char('p') => self.pdf.previous_page(),
            KeyCode::Char('o') => {
                self.pdf.drag_enter();
                self.start_prompt(Editing::PdfPath);
            }
            KeyCode::Char('s') => {
                let notification = self.pdf.save();
                self.notify(notification);
            }
            KeyCode::Char('d') => {
                let notification = self.pdf.download();
                self.notify(notification);
            }
            _ => {}
        }
    }

    fn services_key(&mut self, code: KeyCode) {
        let len = self.catalog.services.len();
        match code {
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                let i = self.services_state.selected().map(|i| (i + 1) % len).unwrap_or(0);
                self.services_state.select(Some(i));
            }
            KeyCode::Up | KeyCode::Char('k') if len > 0 => {
                let i = self
                    .services_state
                    .selected()
                    .map(|i| (i + len - 1) % len)
                    .unwrap_or(0);
                self.services_state.select(Some(i));
            }
            KeyCode::Enter => {
                // Esc backs out of the prefilled service too
                self.begin_editing(Editing::ContactField);
                // Enquire about the highlighted service
                if let Some(service) = self
                    .services_state
                    .selected()
                    .and_then(|i| self.catalog.services.get(i))
                {
                    self.contact.service = service.title.clone();
                }
                self.contact_field = 0;
            }
            KeyCode::Char('e') => self.begin_editing(Editing::ContactField),
            KeyCode::Char('s') => self.submit_contact(),
            _ => {}
        }
    }

    fn submit_contact(&mut self) {
        match self.contact.submit() {
            Ok((submission, notification)) => {
                self.last_submission = Some(submission);
                self.contact_field = 0;
                self.notify(notification);
            }
            Err(err) => {
                // Jump to the first missing field
                if let Some(pos) = err
                    .field()
                    .and_then(|f| ["name", "email", "phone", "company", "service", "message"]
                        .iter()
                        .position(|c| *c == f))
                {
                    self.contact_field = pos;
                }
                self.notify(Notification::from(&err));
            }
        }
    }

    fn start_prompt(&mut self, target: Editing) {
        self.input.clear();
        self.begin_editing(target);
    }

    fn begin_editing(&mut self, target: Editing) {
        self.saved = match target {
            Editing::CalculatorField => Some(Saved::Calculator(
                self.calculators.values().into_iter().map(String::from).collect(),
            )),
            Editing::PlaceSearch => Some(Saved::Search(self.search.clone())),
            Editing::ContactField => Some(Saved::Contact(self.contact.clone())),
            Editing::BlockText | Editing::NewParagraph | Editing::ImagePath | Editing::PdfPath => {
                None
            }
        };
        self.mode = InputMode::Editing(target);
    }

    fn edit_buffer(&mut self, target: Editing) -> Option<&mut String> {
        match target {
            Editing::CalculatorField => self.calculators.value_mut(),
            Editing::PlaceSearch => Some(&mut self.search),
            Editing::ContactField => contact_value_mut(&mut self.contact, self.contact_field),
            Editing::BlockText | Editing::NewParagraph | Editing::ImagePath | Editing::PdfPath => {
                Some(&mut self.input)
            }
        }
    }

    fn handle_editing(&mut self, target: Editing, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.cancel_editing(target),
            KeyCode::Enter => self.commit_editing(target),
            KeyCode::Tab | KeyCode::Down if target == Editing::CalculatorField => {
                self.calculators.next_field()
            }
            KeyCode::BackTab | KeyCode::Up if target == Editing::CalculatorField => {
                self.calculators.previous_field()
            }
            KeyCode::Tab | KeyCode::Down if target == Editing::ContactField => {
                self.contact_field = (self.contact_field + 1) % CONTACT_FIELDS.len();
            }
            KeyCode::BackTab | KeyCode::Up if target == Editing::ContactField => {
                self.contact_field =
                    (self.contact_field + CONTACT_FIELDS.len() - 1) % CONTACT_FIELDS.len();
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.edit_buffer(target) {
                    buffer.pop();
                }
                if target == Editing::PlaceSearch {
                    self.reset_place_selection();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = self.edit_buffer(target) {
                    buffer.push(c);
                }
                if target == Editing::PlaceSearch {
                    self.reset_place_selection();
                }
            }
            _ => {}
        }
    }

    fn cancel_editing(&mut self, target: Editing) {
        if target == Editing::PdfPath {
            self.pdf.drag_leave();
        }
        match self.saved.take() {
            Some(Saved::Calculator(values)) => self.calculators.restore(&values),
            Some(Saved::Search(search)) => {
                self.search = search;
                self.reset_place_selection();
            }
            Some(Saved::Contact(form)) => self.contact = form,
            None => {}
        }
        self.input.clear();
        self.mode = InputMode::Normal;
    }

    fn commit_editing(&mut self, target: Editing) {
        self.mode = InputMode::Normal;
        self.saved = None;
        let input = std::mem::take(&mut self.input);

        match target {
            Editing::CalculatorField => {
                let notification = self.calculators.calculate();
                self.notify(notification);
            }
            Editing::PlaceSearch | Editing::ContactField => {}
            Editing::BlockText => {
                let text = match self.selected_block() {
                    Some(DocBlock::BulletList(_)) => input.replace("; ", "\n"),
                    _ => input,
                };
                if let Err(err) = self.editor.edit_text(self.block, &text) {
                    self.notify(Notification::from(&err));
                }
            }
            Editing::NewParagraph => match self.editor.add_paragraph(&input) {
                Ok(()) => self.block = self.focused_blocks().len().saturating_sub(1),
                Err(err) => self.notify(Notification::from(&err)),
            },
            Editing::ImagePath => match local_upload(&input) {
                Ok(upload) => {
                    let result = self.editor.insert_image(upload);
                    self.report(result);
                }
                Err(notification) => self.notify(notification),
            },
            Editing::PdfPath => match local_upload(&input) {
                Ok(upload) => {
                    let result = self.pdf.drop_file(upload);
                    self.report(result);
                }
                Err(notification) => {
                    self.pdf.drag_leave();
                    self.notify(notification);
                }
            },
        }
    }
}

/// Describe a local file as an upload. Only its metadata is read.
fn local_upload(raw: &str) -> std::result::Result<FileUpload, Notification> {
    let path = Path::new(raw.trim());
    match std::fs::metadata(path) {
        Ok(meta) => Ok(FileUpload::from_path(path, meta.len())),
        Err(err) => Err(Notification::destructive(
            "File Not Found",
            format!("{}: {}", path.display(), err),
        )),
    }
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.notifications.prune(Utc::now());
        terminal.draw(|f| ui(f, app))?;

        // Poll so expired notifications disappear without a keypress
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Some terminals also report key releases
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::DocumentEditor => render_document(f, chunks[1], app),
        Page::AccountingTools => render_accounting(f, chunks[1], app),
        Page::QatarGuide => render_guide(f, chunks[1], app),
        Page::PdfEditor => render_pdf(f, chunks[1], app),
        Page::BusinessServices => render_services(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn header_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn key_hint(spans: &mut Vec<Span<'static>>, key: &'static str, label: &'static str) {
    if !spans.is_empty() {
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(format!(" {}", label)));
}

fn bordered<'a, T: Into<Title<'a>>>(title: T, color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        "🇶🇦 Qatar Hub  ",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )];

    for (i, page) in Page::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let now = Utc::now();

    let status_spans = if let Some(n) = app.notifications.latest(now) {
        let color = if n.is_error() { Color::Red } else { Color::Green };
        vec![
            Span::styled(
                format!(" {} ", n.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(n.description.clone()),
        ]
    } else if let InputMode::Editing(target) = app.mode {
        let mut spans = Vec::new();
        if matches!(target, Editing::CalculatorField | Editing::ContactField) {
            key_hint(&mut spans, "Tab/↑↓", "Field");
        }
        key_hint(&mut spans, "Enter", "Done");
        key_hint(&mut spans, "Esc", "Cancel");
        spans
    } else {
        let mut spans = Vec::new();
        match app.current_page {
            Page::DocumentEditor => {
                key_hint(&mut spans, "s", "Section");
                key_hint(&mut spans, "↑/↓", "Block");
                key_hint(&mut spans, "b/i/u/l", "Format");
                key_hint(&mut spans, "e", "Edit");
                key_hint(&mut spans, "a", "Add");
                key_hint(&mut spans, "g", "Image");
                key_hint(&mut spans, "x/t", "Export");
            }
            Page::AccountingTools => {
                key_hint(&mut spans, "←/→", "Calculator");
                key_hint(&mut spans, "↑/↓", "Field");
                key_hint(&mut spans, "Enter", "Edit");
                key_hint(&mut spans, "c", "Calculate");
                key_hint(&mut spans, "r", "Reset");
                if app.calculators.kind == CalculatorKind::Vat {
                    key_hint(&mut spans, "m", "Mode");
                }
            }
            Page::QatarGuide => {
                key_hint(&mut spans, "/", "Search");
                key_hint(&mut spans, "f", "Category");
                key_hint(&mut spans, "x", "Clear");
                key_hint(&mut spans, "↑/↓", "Nav");
            }
            Page::PdfEditor => {
                key_hint(&mut spans, "1-7", "Tool");
                key_hint(&mut spans, "+/-", "Zoom");
                key_hint(&mut spans, "←/→", "Page");
                key_hint(&mut spans, "o", "Open");
                key_hint(&mut spans, "s", "Save");
                key_hint(&mut spans, "d", "Download");
            }
            Page::BusinessServices => {
                key_hint(&mut spans, "↑/↓", "Service");
                key_hint(&mut spans, "Enter", "Enquire");
                key_hint(&mut spans, "e", "Edit form");
                key_hint(&mut spans, "s", "Send");
            }
        }
        key_hint(&mut spans, "Tab", "Page");
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" Quit"));
        spans
    };

    let status_bar = Paragraph::new(vec![Line::from(status_spans)])
        .block(bordered("", Color::White));

    f.render_widget(status_bar, area);
}

/// Prompt line with a trailing cursor, shown while a prompt is open
fn prompt_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {}: ", label), header_style()),
        Span::raw(value.to_string()),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ])
}

// ----------------------------------------------------------------------------
// Document editor
// ----------------------------------------------------------------------------

fn doc_spans(spans: &[document::Span], base: Style) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|s| {
            let mut style = base;
            if s.has(Mark::Bold) {
                style = style.add_modifier(Modifier::BOLD);
            }
            if s.has(Mark::Italic) {
                style = style.add_modifier(Modifier::ITALIC);
            }
            if s.has(Mark::Underline) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            Span::styled(s.text.clone(), style)
        })
        .collect()
}

fn block_lines(block: &DocBlock, selected: bool) -> Vec<Line<'static>> {
    let marker = if selected {
        Span::styled("→ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("  ")
    };

    match block {
        DocBlock::Heading(spans) => {
            let mut line = vec![marker];
            line.extend(doc_spans(spans, Style::default().fg(Color::Cyan)));
            vec![Line::from(line)]
        }
        DocBlock::Paragraph(spans) => {
            let mut line = vec![marker];
            line.extend(doc_spans(spans, Style::default()));
            vec![Line::from(line)]
        }
        DocBlock::BulletList(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let lead = if i == 0 { marker.clone() } else { Span::raw("  ") };
                let mut line = vec![lead, Span::raw("• ")];
                line.extend(doc_spans(item, Style::default()));
                Line::from(line)
            })
            .collect(),
        DocBlock::Image(image) => vec![Line::from(vec![
            marker,
            Span::styled(
                format!("[🖼  {} - {}]", image.alt, image.file_name),
                Style::default().fg(Color::Magenta),
            ),
        ])],
    }
}

fn render_document(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.editor.focused();
    let mut lines: Vec<Line> = Vec::new();

    if let InputMode::Editing(target) = app.mode {
        let label = match target {
            Editing::BlockText => "Edit block (list items separated by '; ')",
            Editing::NewParagraph => "New paragraph",
            Editing::ImagePath => "Image file path",
            _ => "Input",
        };
        lines.push(prompt_line(label, &app.input));
        lines.push(Line::from(""));
    }

    for section in &app.editor.document().sections {
        let is_focused = focused == Some(section.id);
        let style = if is_focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(format!("▌{}", section.id.label()), style)));

        for (i, block) in section.blocks.iter().enumerate() {
            lines.extend(block_lines(block, is_focused && i == app.block));
        }
        lines.push(Line::from(""));
    }

    let title = match focused {
        Some(id) => format!(" Resume - editing {} ", id.label()),
        None => " Resume - press s to select a section ".to_string(),
    };

    let doc = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(bordered(title, Color::White));

    f.render_widget(doc, area);
}

// ----------------------------------------------------------------------------
// Accounting tools
// ----------------------------------------------------------------------------

fn render_accounting(f: &mut Frame, area: Rect, app: &App) {
    let panel = &app.calculators;
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Calculator tabs + form
    let mut tabs = Vec::new();
    for (i, kind) in CalculatorKind::ALL.iter().enumerate() {
        if i > 0 {
            tabs.push(Span::raw(" │ "));
        }
        let style = if *kind == panel.kind {
            header_style()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tabs.push(Span::styled(kind.title().to_string(), style));
    }

    let editing = app.mode == InputMode::Editing(Editing::CalculatorField);
    let mut lines = vec![Line::from(tabs), Line::from("")];

    for (i, (label, value)) in panel.kind.fields().iter().zip(panel.values()).enumerate() {
        let selected = i == panel.field;
        let marker = if selected { "→ " } else { "  " };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Green)),
            Span::styled(format!("{:<26}", label), Style::default().fg(Color::White)),
            Span::styled(
                value.to_string(),
                if selected {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                },
            ),
        ];
        if selected && editing {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(spans));
    }

    if panel.kind == CalculatorKind::Vat {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("  Mode: "),
            Span::styled(panel.vat.input.mode.label(), Style::default().fg(Color::Cyan)),
        ]));
    }

    let form = Paragraph::new(lines).block(bordered(" Calculator ", Color::White));
    f.render_widget(form, content_chunks[0]);

    // Result panel
    if let Some(err) = panel.error() {
        let error = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", err.title()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("  {}", err)),
        ])
        .block(bordered(" Result ", Color::Red));
        f.render_widget(error, content_chunks[1]);
        return;
    }

    let summary = panel.summary();
    if summary.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Fill in the form and press c to calculate",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )),
        ])
        .block(bordered(" Result ", Color::White));
        f.render_widget(empty, content_chunks[1]);
        return;
    }

    let rows = summary.into_iter().map(|(label, value)| {
        let color = if value.starts_with('-') { Color::Red } else { Color::Green };
        Row::new(vec![
            Cell::from(label),
            Cell::from(value).style(Style::default().fg(color)),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(26), Constraint::Min(10)])
        .block(bordered(" Result ", Color::Green));
    f.render_widget(table, content_chunks[1]);
}

// ----------------------------------------------------------------------------
// Qatar guide
// ----------------------------------------------------------------------------

fn render_guide(f: &mut Frame, area: Rect, app: &mut App) {
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(content_chunks[0]);

    // Search line
    let search_line = if app.mode == InputMode::Editing(Editing::PlaceSearch) {
        prompt_line("Search", &app.search)
    } else {
        Line::from(vec![
            Span::styled("  Search: ", header_style()),
            Span::raw(app.search.clone()),
            Span::raw("   "),
            Span::styled("Category: ", header_style()),
            Span::styled(app.filter.label(), Style::default().fg(Color::Cyan)),
        ])
    };
    f.render_widget(Paragraph::new(search_line).block(bordered("", Color::White)), left[0]);

    // Places table
    let header = Row::new(
        ["Name", "Category", "Location", "Rating"]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    )
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let places = app.places();
    let count = places.len();
    let rows: Vec<Row> = places
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(truncate(&p.name, 28)),
                Cell::from(p.category.label()),
                Cell::from(truncate(&p.location, 22)),
                Cell::from(p.rating.map(|r| format!("★ {:.1}", r)).unwrap_or_default())
                    .style(Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(30),
            Constraint::Length(12),
            Constraint::Length(24),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(bordered(format!(" Places ({}) ", count), Color::White))
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, left[1], &mut app.places_state);

    // Detail + emergency numbers
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(content_chunks[1]);

    let detail_lines = match app.selected_place() {
        Some(place) => {
            let mut lines = vec![
                Line::from(Span::styled(format!("  {}", place.name), header_style())),
                Line::from(""),
                Line::from(format!("  {}", place.description)),
                Line::from(""),
                Line::from(format!("  📍 {}", place.location)),
            ];
            if let Some(phone) = &place.phone {
                lines.push(Line::from(format!("  📞 {}", phone)));
            }
            if let Some(hours) = &place.hours {
                lines.push(Line::from(format!("  🕒 {}", hours)));
            }
            if let Some(website) = &place.website {
                lines.push(Line::from(format!("  🌐 {}", website)));
            }
            if !place.tags.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("  {}", place.tags.join(" · ")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "  No places match the current search",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))],
    };
    let detail = Paragraph::new(detail_lines)
        .wrap(Wrap { trim: false })
        .block(bordered(" Details ", Color::Yellow));
    f.render_widget(detail, right[0]);

    let rows = app.catalog.emergency_contacts.iter().map(|c| {
        Row::new(vec![
            Cell::from(c.service.clone()),
            Cell::from(c.number.clone()).style(Style::default().fg(Color::Red)),
        ])
    });
    let contacts = Table::new(rows, [Constraint::Length(26), Constraint::Min(10)])
        .block(bordered(" 🚨 Emergency ", Color::Red));
    f.render_widget(contacts, right[1]);
}

// ----------------------------------------------------------------------------
// PDF editor
// ----------------------------------------------------------------------------

fn render_pdf(f: &mut Frame, area: Rect, app: &App) {
    let pdf = &app.pdf;
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let mut tools = vec![Span::raw("  ")];
    for (i, tool) in Tool::ALL.iter().enumerate() {
        let style = if *tool == pdf.tool {
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        tools.push(Span::styled(format!(" {} {} ", i + 1, tool.label()), style));
    }

    let mut lines = vec![
        Line::from(tools),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Zoom: ", header_style()),
            Span::raw(format!("{}%", pdf.zoom)),
            Span::raw("    "),
            Span::styled("Page: ", header_style()),
            Span::raw(format!("{} of {}", pdf.page, pdf.total_pages)),
        ]),
        Line::from(""),
    ];

    if app.mode == InputMode::Editing(Editing::PdfPath) {
        lines.push(prompt_line("PDF file path", &app.input));
    } else {
        match &pdf.document {
            Some(doc) => lines.push(Line::from(vec![
                Span::styled("  📄 ", Style::default()),
                Span::styled(doc.name.clone(), Style::default().fg(Color::Green)),
                Span::raw(format!("  ({})", doc.size_label())),
            ])),
            None => lines.push(Line::from(Span::styled(
                "  No PDF loaded - press o to open one",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))),
        }
    }

    let border = if pdf.drag_active { Color::Green } else { Color::White };
    let editor = Paragraph::new(lines).block(bordered(" PDF Editor ", border));
    f.render_widget(editor, content_chunks[0]);

    let features: Vec<Line> = pdf_editor::FEATURES
        .iter()
        .map(|feat| Line::from(format!("  ✓ {}", feat)))
        .collect();
    let features = Paragraph::new(features).block(bordered(" Features ", Color::Cyan));
    f.render_widget(features, content_chunks[1]);
}

// ----------------------------------------------------------------------------
// Business services
// ----------------------------------------------------------------------------

fn render_services(f: &mut Frame, area: Rect, app: &mut App) {
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let header = Row::new(
        ["Service", "Price", ""]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    )
    .style(Style::default().bg(Color::DarkGray))
    .height(1);

    let rows: Vec<Row> = app
        .catalog
        .services
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(s.title.clone()),
                Cell::from(s.price.clone()).style(Style::default().fg(Color::Green)),
                Cell::from(if s.popular { "⭐" } else { "" }),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(30), Constraint::Length(26), Constraint::Length(3)],
    )
    .header(header)
    .block(bordered(" Our Services ", Color::White))
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, content_chunks[0], &mut app.services_state);

    // Contact form
    let editing = app.mode == InputMode::Editing(Editing::ContactField);
    let mut lines = vec![Line::from("")];
    for (i, (label, value)) in CONTACT_FIELDS.iter().zip(contact_values(&app.contact)).enumerate() {
        let selected = editing && i == app.contact_field;
        let mut spans = vec![
            Span::styled(if selected { "→ " } else { "  " }, Style::default().fg(Color::Green)),
            Span::styled(format!("{:<11}", label), Style::default().fg(Color::White)),
            Span::raw(value.to_string()),
        ];
        if selected {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(spans));
    }

    if let Some(submission) = &app.last_submission {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  ✓ Last enquiry: {}", submission.id),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let form = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(bordered(" Get In Touch ", Color::Yellow));
    f.render_widget(form, content_chunks[1]);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn latest(app: &App) -> Notification {
        app.notifications.latest(Utc::now()).cloned().unwrap()
    }

    #[test]
    fn test_page_cycle() {
        let mut app = App::new(&Config::default());
        for _ in 0..Page::ALL.len() {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.current_page, Page::DocumentEditor);

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current_page, Page::BusinessServices);
    }

    #[test]
    fn test_quit_only_in_normal_mode() {
        let mut app = App::new(&Config::default());
        app.current_page = Page::QatarGuide;
        press(&mut app, KeyCode::Char('/'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.search, "q");
        press(&mut app, KeyCode::Esc);
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_esc_discards_calculator_edits() {
        let mut app = App::new(&Config::default());
        app.current_page = Page::AccountingTools;

        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "999");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "0");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.calculators.vat.input.amount, "");
        assert_eq!(app.calculators.vat.input.rate, "5");
        assert_eq!(app.calculators.field, 1);
        assert!(app.calculators.summary().is_empty());
    }

    #[test]
    fn test_esc_restores_search_and_contact() {
        let mut app = App::new(&Config::default());
        app.current_page = Page::QatarGuide;
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "souq");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "zzz");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.search, "souq");
        assert!(app.places_state.selected().is_some());

        app.current_page = Page::BusinessServices;
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Mariam");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.contact, ContactForm::default());
    }

    #[test]
    fn test_vat_from_keys() {
        let mut app = App::new(&Config::default());
        app.current_page = Page::AccountingTools;

        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "1000");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(latest(&app).title, "VAT Calculated");
        let summary = app.calculators.summary();
        assert_eq!(summary[2], ("Total Amount", "QAR 1,050.00".to_string()));
    }

    #[test]
    fn test_calculator_error_keeps_form() {
        let mut app = App::new(&Config::default());
        app.current_page = Page::AccountingTools;
        press(&mut app, KeyCode::Right); // Profit & Loss
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Enter);

        assert!(latest(&app).is_error());
        assert_eq!(app.calculators.values()[0], "abc");
        assert!(app.calculators.summary().is_empty());
    }

    #[test]
    fn test_reset_restores_configured_rate() {
        let config = Config {
            default_vat_rate: 7.5,
            ..Config::default()
        };
        let mut app = App::new(&config);
        app.calculators.vat.input.rate = "12".to_string();
        app.calculators.reset();
        assert_eq!(app.calculators.vat.input.rate, "7.5");
    }

    #[test]
    fn test_guide_search_and_filter() {
        let mut app = App::new(&Config::default());
        app.current_page = Page::QatarGuide;

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "metro");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.places().len(), 1);
        assert_eq!(app.selected_place().map(|p| p.name.as_str()), Some("Doha Metro"));

        // Business filter excludes the metro
        press(&mut app, KeyCode::Char('f'));
        assert!(app.places().is_empty());
        assert!(app.selected_place().is_none());

        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.places().len(), app.catalog.places.all().len());
    }

    #[test]
    fn test_document_format_requires_section() {
        let mut app = App::new(&Config::default());

        press(&mut app, KeyCode::Char('b'));
        assert!(latest(&app).is_error());

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.editor.focused(), Some(SectionId::Title));
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(latest(&app).title, "Text Formatted");
    }

    #[test]
    fn test_add_paragraph_selects_it() {
        let mut app = App::new(&Config::default());
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('s')); // Profile Summary
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "Open to relocation");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.selected_block(), Some(&DocBlock::paragraph("Open to relocation")));
    }

    #[test]
    fn test_pdf_controls() {
        let mut app = App::new(&Config::default());
        app.current_page = Page::PdfEditor;

        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.pdf.zoom, 125);
        assert_eq!(app.pdf.tool, Tool::Pen);
        assert_eq!(app.pdf.page, 2);

        press(&mut app, KeyCode::Char('o'));
        assert!(app.pdf.drag_active);
        press(&mut app, KeyCode::Esc);
        assert!(!app.pdf.drag_active);
    }

    #[test]
    fn test_contact_submit_from_keys() {
        let mut app = App::new(&Config::default());
        app.current_page = Page::BusinessServices;

        press(&mut app, KeyCode::Char('s'));
        assert!(latest(&app).is_error());
        assert_eq!(app.contact_field, 0);

        press(&mut app, KeyCode::Enter); // enquire about the first service
        assert_eq!(app.contact.service, "ERPNext Implementation");
        type_text(&mut app, "Mariam");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "mariam@example.qa");
        for _ in 0..4 {
            press(&mut app, KeyCode::Tab);
        }
        type_text(&mut app, "Please call me");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('s'));

        assert_eq!(latest(&app).title, "Message Sent Successfully!");
        assert!(app.last_submission.is_some());
        assert_eq!(app.contact, ContactForm::default());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Souq Waqif", 20), "Souq Waqif");
        assert_eq!(truncate("Hamad International Airport", 10), "Hamad I...");
    }
}
