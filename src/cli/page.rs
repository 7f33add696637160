use std::path::Path;

use crossterm::event::KeyCode;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::cli::list::format_stats;
use crate::error::AppError;
use crate::fmt::fill;
use crate::forms::{FieldKind, FieldSpec, FormErrors, FormMode};
use crate::i18n::Language;
use crate::pages::{Editor, FieldChoice, PageEntity, RecordForm};
use crate::session::Session;
use crate::store::Collection;
use crate::table::{DataTable, SortDirection};
use crate::tui::{
    chrome, hints, truncate, wrap_text, PageView, ViewAction, FOCUS_STYLE, FOOTER_STYLE,
    SELECTED_STYLE,
};
use crate::upload::{CsvRow, CsvUpload};

const MAX_COL_WIDTH: usize = 28;

enum Screen<E> {
    List,
    Search,
    Form(FormState<E>),
    ConfirmDelete(String),
    Import(String),
    Details(String),
}

struct FormState<E> {
    form: Box<dyn RecordForm<E>>,
    focused: usize,
    /// Id of the record being edited; `None` when creating.
    editing: Option<String>,
    errors: FormErrors,
}

impl<E> FormState<E> {
    fn field(&self) -> &'static FieldSpec {
        &self.form.fields()[self.focused]
    }
}

/// One list page: the table, its search/sort/paging controls, and the
/// add/edit/delete/import flows for pages that have a form.
///
/// Records live only as long as the manager. Opening the page again starts
/// from the seeded list.
pub struct PageManager<E: PageEntity> {
    lang: Language,
    header: String,
    /// An accountant must pick a client before the page shows anything.
    gated: bool,
    records: Collection<E>,
    table: DataTable<E>,
    editor: Option<Editor<E>>,
    selection: usize,
    screen: Screen<E>,
    status_message: Option<String>,
    /// Remaining keypresses before the status message is cleared.
    status_ttl: u8,
}

impl<E: PageEntity> PageManager<E> {
    pub fn new(session: &Session, page_size: usize) -> Self {
        let lang = session.language();
        Self {
            lang,
            header: page_header(session),
            gated: E::KIND.needs_client() && session.requires_client_selection(),
            records: Collection::new(E::seed()),
            table: E::table(lang, page_size),
            editor: E::editor(),
            selection: 0,
            screen: Screen::List,
            status_message: None,
            status_ttl: 0,
        }
    }

    fn t(&self, key: &str) -> String {
        self.lang.t(key)
    }

    fn set_status(&mut self, msg: String) {
        self.status_message = Some(msg);
        self.status_ttl = 3;
    }

    fn page_rows(&self) -> usize {
        self.table.view(self.records.as_slice()).rows.len()
    }

    fn selected_id(&self) -> Option<String> {
        let view = self.table.view(self.records.as_slice());
        view.rows.get(self.selection).map(|r| r.id().to_string())
    }

    fn clamp_selection(&mut self) {
        self.selection = self.selection.min(self.page_rows().saturating_sub(1));
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    fn draw_list(&self, frame: &mut Frame) {
        let (content_area, hints_area) = chrome(frame, &self.header);
        let kind = E::KIND;
        let lang = self.lang;
        let data = self.records.as_slice();
        let view = self.table.view(data);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!(" {}", kind.t(lang, "title")),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", kind.t(lang, "subtitle")), FOOTER_STYLE),
            ]),
        ];
        let cards = E::stats(data);
        if !cards.is_empty() {
            lines.push(Line::from(format!(" {}", format_stats(lang, &cards))));
        }
        let searching = matches!(self.screen, Screen::Search);
        if searching || !self.table.search().is_empty() {
            let cursor = if searching { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::raw(format!(" {}: ", self.table.search_placeholder())),
                Span::styled(
                    format!("{}{cursor}", self.table.search()),
                    if searching { FOCUS_STYLE } else { Style::default() },
                ),
            ]));
        }
        lines.push(Line::from(""));

        if view.is_empty() {
            lines.push(Line::from(format!("   {}", self.t("common.noResults"))));
        } else {
            let cells = self.table.cells(&view);
            let headers: Vec<String> = self
                .table
                .columns()
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let arrow = match self.table.sort() {
                        Some(s) if s.column == c.key => match s.direction {
                            SortDirection::Ascending => " \u{25b2}",
                            SortDirection::Descending => " \u{25bc}",
                        },
                        _ => "",
                    };
                    format!("{} {}{arrow}", i + 1, c.header)
                })
                .collect();
            let widths: Vec<usize> = (0..headers.len())
                .map(|i| {
                    cells
                        .iter()
                        .map(|row| row[i].chars().count())
                        .chain(std::iter::once(headers[i].chars().count()))
                        .max()
                        .unwrap_or(0)
                        .min(MAX_COL_WIDTH)
                })
                .collect();

            lines.push(Line::from(Span::styled(
                format!("   {}", pad_row(&headers, &widths)),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )));
            for (i, row) in cells.iter().enumerate() {
                let selected = i == self.selection;
                let marker = if selected { " > " } else { "   " };
                let style = if selected { SELECTED_STYLE } else { Style::default() };
                lines.push(Line::from(Span::styled(
                    format!("{marker}{}", pad_row(row, &widths)),
                    style,
                )));
            }

            let pager = fill(
                &self.t("common.page"),
                &[
                    ("page", (view.page + 1).to_string()),
                    ("pages", view.page_count.to_string()),
                ],
            );
            let records = fill(
                &self.t("common.records"),
                &[("count", view.total_rows.to_string())],
            );
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("   {pager}  ({records})"),
                FOOTER_STYLE,
            )));
        }

        match &self.screen {
            Screen::ConfirmDelete(id) => {
                let label = self.records.get(id).map(|r| r.label()).unwrap_or_default();
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("   {label}: {}", self.t("common.confirmDelete")),
                    Style::default().fg(Color::Yellow),
                )));
            }
            Screen::Import(path) => {
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::raw(format!("   {}: ", self.t("upload.prompt"))),
                    Span::styled(format!("{path}_"), FOCUS_STYLE),
                ]));
            }
            _ => {}
        }

        frame.render_widget(Paragraph::new(lines), content_area);

        let keys = match (&self.screen, self.editor.is_some()) {
            (Screen::ConfirmDelete(_), _) => "y=confirm  n=cancel",
            (Screen::Search, _) => "type to filter  Enter/Esc=done",
            (Screen::Import(_), _) => "Enter=upload  Esc=cancel",
            (_, true) => concat!(
                "a=add  e=edit  d=delete  i=import  /=search  1-9=sort  ",
                "\u{2190}/\u{2192}=page  Esc=back"
            ),
            (_, false) => "Enter=details  /=search  1-9=sort  \u{2190}/\u{2192}=page  Esc=back",
        };
        hints(frame, hints_area, self.status_message.as_deref(), keys);
    }

    fn draw_form(&self, frame: &mut Frame, state: &FormState<E>) {
        let (content_area, hints_area) = chrome(frame, &self.header);
        let title_key = match state.form.mode() {
            FormMode::Create => "add",
            FormMode::Edit => "edit",
        };
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(" {}", E::KIND.t(self.lang, title_key)),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, field) in state.form.fields().iter().enumerate() {
            let is_focused = i == state.focused;
            let label_style = if is_focused {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let value_style = if is_focused { FOCUS_STYLE } else { Style::default() };
            let required = if field.required { "*" } else { " " };
            let label = format!("   {:<18}{required} ", truncate(&self.t(field.label), 18));
            let raw = state.form.value(field.key);

            let shown = match (field.kind, E::field_choices(&*state.form, field.key)) {
                (FieldKind::Choice(_), _) => Some(if raw.is_empty() {
                    self.t("form.selectType")
                } else {
                    raw.clone()
                }),
                (_, Some(choices)) => Some(
                    choices
                        .iter()
                        .find(|c| c.value == raw)
                        .map(|c| c.label.clone())
                        .unwrap_or_else(|| raw.clone()),
                ),
                _ => None,
            };
            let value = match shown {
                Some(text) if is_focused => format!("< {text} >"),
                Some(text) => format!("  {text}  "),
                None if is_focused => format!("{raw}_"),
                None => raw,
            };
            lines.push(Line::from(vec![
                Span::styled(label, label_style),
                Span::styled(value, value_style),
            ]));
            if let Some(msg) = state.errors.get(field.key) {
                lines.push(Line::from(Span::styled(
                    format!("{:>23}{msg}", ""),
                    Style::default().fg(Color::Red),
                )));
            }
        }

        frame.render_widget(Paragraph::new(lines), content_area);
        hints(
            frame,
            hints_area,
            self.status_message.as_deref(),
            "Tab=next field  \u{2190}/\u{2192}=choose  Enter=save  Esc=cancel",
        );
    }

    fn draw_details(&self, frame: &mut Frame, id: &str) {
        let (content_area, hints_area) = chrome(frame, &self.header);
        let mut lines = vec![Line::from("")];
        match self.records.get(id).and_then(|r| r.details(self.lang).map(|d| (r.label(), d))) {
            Some((title, details)) => {
                lines.push(Line::from(Span::styled(
                    format!(" {title}"),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                let width = content_area.width.saturating_sub(20) as usize;
                for (label, value) in details {
                    let (wrapped, _) = wrap_text(&value, width);
                    for (n, part) in wrapped.lines().enumerate() {
                        let label = if n == 0 { label.as_str() } else { "" };
                        lines.push(Line::from(format!("   {label:<16} {part}")));
                    }
                }
            }
            None => lines.push(Line::from(format!(" {}", self.t("clients.notFound")))),
        }
        frame.render_widget(Paragraph::new(lines), content_area);
        hints(frame, hints_area, None, "Esc=back");
    }

    fn draw_gated(&self, frame: &mut Frame) {
        let (content_area, hints_area) = chrome(frame, &self.header);
        frame.render_widget(
            Paragraph::new(format!("\n {}", E::KIND.t(self.lang, "selectClient"))),
            content_area,
        );
        hints(frame, hints_area, None, "Esc=back");
    }

    // -----------------------------------------------------------------------
    // Keys
    // -----------------------------------------------------------------------

    fn handle_list_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Up => self.selection = self.selection.saturating_sub(1),
            KeyCode::Down => {
                self.selection = (self.selection + 1).min(self.page_rows().saturating_sub(1))
            }
            KeyCode::Left | KeyCode::PageUp => {
                self.table.prev_page();
                self.selection = 0;
            }
            KeyCode::Right | KeyCode::PageDown => {
                self.table.next_page(self.records.as_slice());
                self.selection = 0;
            }
            KeyCode::Char('/') if self.table.search_enabled() => self.screen = Screen::Search,
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(key) = self.table.columns().get(idx).map(|col| col.key) {
                    self.table.toggle_sort(key);
                    self.selection = 0;
                }
            }
            KeyCode::Char('a') => self.open_create(),
            KeyCode::Char('e') => self.open_edit(),
            KeyCode::Enter => {
                if self.editor.is_some() {
                    self.open_edit();
                } else if let Some(id) = self.selected_id() {
                    self.screen = Screen::Details(id);
                }
            }
            KeyCode::Char('d') => {
                if self.editor.is_some() {
                    if let Some(id) = self.selected_id() {
                        self.screen = Screen::ConfirmDelete(id);
                    }
                }
            }
            KeyCode::Char('i') => {
                if self.editor.is_some() {
                    self.screen = Screen::Import(String::new());
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            _ => {}
        }
        ViewAction::Continue
    }

    fn open_create(&mut self) {
        if let Some(editor) = &self.editor {
            self.screen = Screen::Form(FormState {
                form: (editor.create)(),
                focused: 0,
                editing: None,
                errors: FormErrors::new(),
            });
        }
    }

    fn open_edit(&mut self) {
        let Some(editor) = &self.editor else {
            return;
        };
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some(record) = self.records.get(&id) {
            self.screen = Screen::Form(FormState {
                form: (editor.edit)(record),
                focused: 0,
                editing: Some(id),
                errors: FormErrors::new(),
            });
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        let mut text = self.table.search().to_string();
        match code {
            KeyCode::Enter | KeyCode::Esc => {
                self.screen = Screen::List;
                return;
            }
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => return,
        }
        self.table.set_search(&text);
        self.selection = 0;
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let Screen::Form(state) = &mut self.screen else {
            return;
        };
        let count = state.form.fields().len();
        match code {
            KeyCode::Esc => {
                if let Screen::Form(state) = std::mem::replace(&mut self.screen, Screen::List) {
                    state.form.discard();
                }
            }
            KeyCode::Tab | KeyCode::Down => state.focused = (state.focused + 1) % count,
            KeyCode::BackTab | KeyCode::Up => {
                state.focused = if state.focused == 0 {
                    count - 1
                } else {
                    state.focused - 1
                };
            }
            KeyCode::Left | KeyCode::Right => {
                let delta = if code == KeyCode::Left { -1 } else { 1 };
                let field = state.field();
                let options: Option<Vec<String>> = match field.kind {
                    FieldKind::Choice(literals) => {
                        Some(literals.iter().map(|s| s.to_string()).collect())
                    }
                    _ => E::field_choices(&*state.form, field.key)
                        .map(|choices| choices.into_iter().map(|c: FieldChoice| c.value).collect()),
                };
                if let Some(options) = options {
                    let next = cycle(&options, &state.form.value(field.key), delta);
                    state.form.set(field.key, &next);
                }
            }
            KeyCode::Char(c) => {
                let field = state.field();
                if is_typed(field, &*state.form) {
                    let mut value = state.form.value(field.key);
                    value.push(c);
                    state.form.set(field.key, &value);
                }
            }
            KeyCode::Backspace => {
                let field = state.field();
                if is_typed(field, &*state.form) {
                    let mut value = state.form.value(field.key);
                    value.pop();
                    state.form.set(field.key, &value);
                }
            }
            KeyCode::Enter => {
                let saved = state.form.save(&mut self.records, state.editing.as_deref());
                match saved {
                    Ok(id) => {
                        let key = if state.editing.is_some() {
                            "toast.updated"
                        } else {
                            "toast.created"
                        };
                        let label = self.records.get(&id).map(|r| r.label()).unwrap_or_default();
                        self.screen = Screen::List;
                        self.clamp_selection();
                        self.set_status(format!("{}: {label}", self.t(key)));
                    }
                    Err(AppError::Form(errors)) => {
                        let first = errors.iter().next().map(|e| e.message.clone());
                        state.errors = errors;
                        if let Some(msg) = first {
                            self.set_status(msg);
                        }
                    }
                    Err(e) => self.set_status(e.to_string()),
                }
            }
            _ => {}
        }
    }

    fn handle_delete_key(&mut self, code: KeyCode) {
        let Screen::ConfirmDelete(id) = &self.screen else {
            return;
        };
        match code {
            KeyCode::Char('y') => {
                let result = self.records.delete(id);
                self.screen = Screen::List;
                match result {
                    Ok(removed) => {
                        self.clamp_selection();
                        let msg = format!("{}: {}", self.t("toast.deleted"), removed.label());
                        self.set_status(msg);
                    }
                    Err(e) => self.set_status(e.to_string()),
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => self.screen = Screen::List,
            _ => {}
        }
    }

    fn handle_import_key(&mut self, code: KeyCode) {
        let Screen::Import(path) = &mut self.screen else {
            return;
        };
        match code {
            KeyCode::Esc => self.screen = Screen::List,
            KeyCode::Char(c) => path.push(c),
            KeyCode::Backspace => {
                path.pop();
            }
            KeyCode::Enter => {
                let path = path.trim().to_string();
                self.screen = Screen::List;
                let msg = self.import_file(Path::new(&path));
                self.set_status(msg);
            }
            _ => {}
        }
    }

    /// Upload `path` and append the rows that validate. Returns the status
    /// line to show either way.
    fn import_file(&mut self, path: &Path) -> String {
        let Some(editor) = &self.editor else {
            return String::new();
        };
        let mut panel = CsvUpload::new(self.lang);
        let mut rows: Vec<CsvRow> = Vec::new();
        let uploaded = panel
            .select(path, None)
            .and_then(|()| panel.upload(|parsed| rows = parsed));
        match uploaded {
            Ok(notice) => {
                let outcome = (editor.import)(&mut self.records, &rows);
                let summary = fill(
                    &self.t("toast.imported"),
                    &[
                        ("count", outcome.added.to_string()),
                        ("rejected", outcome.rejected.len().to_string()),
                    ],
                );
                format!("{}: {summary}", notice.title)
            }
            Err(_) => {
                let notice = panel.failure_notice();
                let inline = panel.error().unwrap_or_default().to_string();
                format!("{}: {inline}", notice.title)
            }
        }
    }
}

impl<E: PageEntity> PageView for PageManager<E> {
    fn draw(&mut self, frame: &mut Frame) {
        if self.gated {
            self.draw_gated(frame);
            return;
        }
        match &self.screen {
            Screen::Form(state) => self.draw_form(frame, state),
            Screen::Details(id) => self.draw_details(frame, id),
            _ => self.draw_list(frame),
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        if self.status_ttl > 0 {
            self.status_ttl -= 1;
            if self.status_ttl == 0 {
                self.status_message = None;
            }
        }
        if self.gated {
            return match code {
                KeyCode::Char('q') | KeyCode::Esc => ViewAction::Close,
                _ => ViewAction::Continue,
            };
        }

        match &self.screen {
            Screen::List => return self.handle_list_key(code),
            Screen::Search => self.handle_search_key(code),
            Screen::Form(_) => self.handle_form_key(code),
            Screen::ConfirmDelete(_) => self.handle_delete_key(code),
            Screen::Import(_) => self.handle_import_key(code),
            Screen::Details(_) => {
                if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) {
                    self.screen = Screen::List;
                }
            }
        }
        ViewAction::Continue
    }
}

/// `Finance Hub: Acme Corporation`, or the welcome line with no client.
pub fn page_header(session: &Session) -> String {
    let context = session
        .selected_client()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| session.t("dashboard.welcome"));
    format!("{}: {context}", session.t("login.title"))
}

/// Free-text fields take typed characters; choice fields are only cycled.
fn is_typed<E: PageEntity>(field: &FieldSpec, form: &dyn RecordForm<E>) -> bool {
    !matches!(field.kind, FieldKind::Choice(_)) && E::field_choices(form, field.key).is_none()
}

/// Step through `options` from `current`. An unset value starts at the first
/// option going forward and at the last going back.
fn cycle(options: &[String], current: &str, delta: isize) -> String {
    if options.is_empty() {
        return current.to_string();
    }
    let len = options.len() as isize;
    let next = match options.iter().position(|o| o == current) {
        Some(i) => (i as isize + delta).rem_euclid(len),
        None if delta < 0 => len - 1,
        None => 0,
    };
    options[next as usize].clone()
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<w$}", truncate(cell, *w), w = *w))
        .collect::<Vec<_>>()
        .join("  ")
}
