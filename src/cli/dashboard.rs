use clap::ValueEnum;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::cli::cashflow::{month_label, CashflowView};
use crate::cli::list::format_stats;
use crate::cli::page::{page_header, PageManager};
use crate::cli::status::OPENING_BALANCE;
use crate::error::{AppError, Result};
use crate::models::Role;
use crate::pages::EntityKind;
use crate::reports::{self, get_cashflow, StatCard};
use crate::routes::{nav_items, resolve, Resolution, Route};
use crate::seed;
use crate::session::Session;
use crate::tui::{money_span, PageView, ViewAction, FOOTER_STYLE, HEADER_STYLE, STATUS_STYLE};
use crate::with_entity;

enum DashboardScreen {
    Login { selection: usize },
    Home,
    Page(Box<dyn PageView>),
}

struct HomeData {
    cards: Vec<StatCard>,
    total_income: f64,
    total_expense: f64,
    net: f64,
    ending_balance: f64,
    balances: Vec<(String, f64)>,
    cashflow_labels: Vec<String>,
    cashflow_income: Vec<u64>,
    cashflow_expenses: Vec<u64>,
}

/// One sidebar entry: a page path, or the logout action when `path` is
/// `None`.
struct MenuEntry {
    label: &'static str,
    path: Option<&'static str>,
}

struct Dashboard {
    session: Session,
    page_size: usize,
    screen: DashboardScreen,
    menu_selection: usize,
    home_data: Option<HomeData>,
    status_message: Option<String>,
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Accountant => "login.accountant",
        Role::ClientAdmin => "login.clientAdmin",
        Role::ClientUser => "login.clientUser",
    }
}

impl Dashboard {
    fn new(session: Session, page_size: usize) -> Self {
        let screen = if session.is_authenticated() {
            DashboardScreen::Home
        } else {
            DashboardScreen::Login { selection: 0 }
        };
        let mut dashboard = Self {
            session,
            page_size,
            screen,
            menu_selection: 0,
            home_data: None,
            status_message: None,
        };
        dashboard.load_data();
        dashboard
    }

    /// Home figures come from the fixed lists. An accountant without a
    /// client gets none.
    fn load_data(&mut self) {
        if !self.session.is_authenticated() || self.session.requires_client_selection() {
            self.home_data = None;
            return;
        }
        let transactions = seed::transactions();
        let accounts = seed::accounts();
        let cashflow = get_cashflow(&transactions, OPENING_BALANCE);

        let mut cards = reports::invoice_stats(&seed::invoices());
        cards.extend(reports::account_stats(&accounts));

        self.home_data = Some(HomeData {
            cards,
            total_income: cashflow.summary.total_income,
            total_expense: cashflow.summary.total_expense,
            net: cashflow.summary.net,
            ending_balance: cashflow.summary.ending_balance,
            balances: accounts.iter().map(|a| (a.name.clone(), a.balance)).collect(),
            cashflow_labels: cashflow.months.iter().map(|m| month_label(&m.month)).collect(),
            cashflow_income: cashflow.months.iter().map(|m| m.income.max(0.0) as u64).collect(),
            cashflow_expenses: cashflow
                .months
                .iter()
                .map(|m| m.expense.max(0.0) as u64)
                .collect(),
        });
    }

    fn menu(&self) -> Vec<MenuEntry> {
        let Some(role) = self.session.role() else {
            return Vec::new();
        };
        let mut entries: Vec<MenuEntry> = nav_items(role)
            .into_iter()
            .map(|item| MenuEntry {
                label: item.label,
                path: Some(item.path),
            })
            .collect();
        entries.push(MenuEntry {
            label: "nav.logout",
            path: None,
        });
        entries
    }

    fn set_session(&mut self, session: Session) {
        self.session = session;
        self.load_data();
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    fn draw(&mut self, frame: &mut Frame) {
        match &mut self.screen {
            DashboardScreen::Page(view) => view.draw(frame),
            DashboardScreen::Login { selection } => {
                let selection = *selection;
                self.draw_login(frame, selection);
            }
            DashboardScreen::Home => self.draw_home(frame),
        }
    }

    fn draw_login(&self, frame: &mut Frame, selection: usize) {
        let area = frame.area();
        let [header_area, sep, content_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" {}", self.session.t("login.title"))).style(HEADER_STYLE),
            header_area,
        );
        let sep_line = "━".repeat(area.width as usize);
        frame.render_widget(
            Paragraph::new(sep_line.as_str()).style(Style::default().fg(Color::DarkGray)),
            sep,
        );

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(" {}", self.session.t("login.subtitle")),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (i, role) in Role::value_variants().iter().enumerate() {
            let marker = if i == selection { ">" } else { " " };
            let style = if i == selection {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!(" {marker} {}", self.session.t(role_label(*role))),
                style,
            )));
        }
        frame.render_widget(Paragraph::new(lines), content_area);
        self.draw_hints(frame, hints_area, " Up/Down=navigate  Enter=sign in  L=language  q=quit");
    }

    fn draw_hints(&self, frame: &mut Frame, area: ratatui::layout::Rect, keys: &str) {
        if let Some(msg) = &self.status_message {
            frame.render_widget(Paragraph::new(format!(" {msg}")).style(STATUS_STYLE), area);
        } else {
            frame.render_widget(Paragraph::new(keys).style(FOOTER_STYLE), area);
        }
    }

    fn draw_home(&self, frame: &mut Frame) {
        let area = frame.area();
        let lang = self.session.language();
        let border_style = Style::default().fg(Color::DarkGray);
        let menu = self.menu();
        let left_count = menu.len().div_ceil(2);

        let [header_area, sep1, stats_area, sep2, charts_area, sep3, menu_area, hints_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(7),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(left_count as u16 + 1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" {}", page_header(&self.session))).style(HEADER_STYLE),
            header_area,
        );

        let sep_line = "━".repeat(area.width as usize);
        let sep_widget = Paragraph::new(sep_line.as_str()).style(border_style);
        frame.render_widget(sep_widget.clone(), sep1);
        frame.render_widget(sep_widget.clone(), sep2);
        frame.render_widget(sep_widget, sep3);

        match &self.home_data {
            None => {
                frame.render_widget(
                    Paragraph::new(format!("\n {}", self.session.t("common.selectClient"))),
                    stats_area,
                );
            }
            Some(data) => {
                let [left_area, right_area] =
                    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .areas(stats_area);

                let row = |key: &str, value: f64| {
                    Line::from(vec![
                        Span::raw(format!(" {:<18} ", self.session.t(key))),
                        money_span(value, lang),
                    ])
                };
                let stats_lines = vec![
                    row("cashflow.totalIncome", data.total_income),
                    row("cashflow.totalExpense", -data.total_expense),
                    row("cashflow.netCashflow", data.net),
                    row("cashflow.endingBalance", data.ending_balance),
                    Line::from(""),
                    Line::from(format!(" {}", format_stats(lang, &data.cards))),
                ];
                frame.render_widget(Paragraph::new(stats_lines), left_area);

                let mut balance_lines = vec![Line::from(Span::styled(
                    format!(" {}", self.session.t("accounts.title")),
                    Style::default().add_modifier(Modifier::BOLD),
                ))];
                for (name, bal) in &data.balances {
                    balance_lines.push(Line::from(vec![
                        Span::raw(format!(" {:<24}", name)),
                        money_span(*bal, lang),
                    ]));
                }
                frame.render_widget(Paragraph::new(balance_lines), right_area);

                if !data.cashflow_labels.is_empty() {
                    self.draw_chart(frame, charts_area, data);
                }
            }
        }

        let [menu_left, menu_right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(menu_area);
        let lines = |range: std::ops::Range<usize>| -> Vec<Line<'static>> {
            range.map(|i| self.menu_item_line(&menu[i], i)).collect()
        };
        frame.render_widget(Paragraph::new(lines(0..left_count)), menu_left);
        frame.render_widget(Paragraph::new(lines(left_count..menu.len())), menu_right);

        let keys = if self.session.role() == Some(Role::Accountant) {
            " Up/Down=navigate  Enter=open  c=client  L=language  o=logout  q=quit"
        } else {
            " Up/Down=navigate  Enter=open  L=language  o=logout  q=quit"
        };
        self.draw_hints(frame, hints_area, keys);
    }

    fn draw_chart(&self, frame: &mut Frame, area: ratatui::layout::Rect, data: &HomeData) {
        let income_style = Style::default().fg(Color::Rgb(80, 220, 100));
        let expense_style = Style::default().fg(Color::Red);

        let max_val = data
            .cashflow_income
            .iter()
            .chain(data.cashflow_expenses.iter())
            .copied()
            .max()
            .unwrap_or(1) as f64;

        let (top_tick, mid_tick) = y_axis_ticks(max_val);
        let top_label = format_k(top_tick);
        let mid_label = format_k(mid_tick);
        let y_label_width = top_label.len().max(mid_label.len()) as u16 + 1;

        let [y_axis_area, bar_area] =
            Layout::horizontal([Constraint::Length(y_label_width), Constraint::Fill(1)])
                .areas(area);

        // title row and month labels take two rows
        let inner_height = bar_area.height.saturating_sub(2);
        let mid_row = inner_height / 2;
        let mut y_lines: Vec<Line> = vec![Line::from("")];
        for row in 0..inner_height {
            let label = if row == 0 {
                Some(&top_label)
            } else if row == mid_row {
                Some(&mid_label)
            } else {
                None
            };
            y_lines.push(match label {
                Some(l) => Line::from(Span::styled(
                    format!("{:>width$}", l, width = y_label_width as usize),
                    FOOTER_STYLE,
                )),
                None => Line::from(""),
            });
        }
        frame.render_widget(Paragraph::new(y_lines), y_axis_area);

        let mut chart = BarChart::default()
            .block(
                Block::default()
                    .title(self.session.t("cashflow.title"))
                    .title_style(Style::default().add_modifier(Modifier::BOLD))
                    .borders(Borders::NONE),
            )
            .bar_width(3)
            .bar_gap(0)
            .group_gap(2);
        for (i, label) in data.cashflow_labels.iter().enumerate() {
            let inc = data.cashflow_income.get(i).copied().unwrap_or(0);
            let exp = data.cashflow_expenses.get(i).copied().unwrap_or(0);
            let bars = vec![
                Bar::default().value(inc).style(income_style),
                Bar::default().value(exp).style(expense_style),
            ];
            chart = chart.data(
                BarGroup::default()
                    .label(Line::from(label.as_str()))
                    .bars(&bars),
            );
        }
        frame.render_widget(chart, bar_area);
    }

    fn menu_item_line(&self, entry: &MenuEntry, i: usize) -> Line<'static> {
        let selected = i == self.menu_selection;
        let marker = if selected { ">" } else { " " };
        let style = if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(Span::styled(
            format!(" {marker} {}", self.session.t(entry.label)),
            style,
        ))
    }

    // -----------------------------------------------------------------------
    // Keys
    // -----------------------------------------------------------------------

    /// Returns true when the dashboard should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if let DashboardScreen::Page(view) = &mut self.screen {
            if let ViewAction::Close = view.handle_key(code) {
                self.screen = DashboardScreen::Home;
                self.load_data();
            }
            return false;
        }

        self.status_message = None;
        if code == KeyCode::Char('L') {
            let lang = self.session.language().toggled();
            self.set_session(self.session.with_language(lang));
            return false;
        }

        match self.screen {
            DashboardScreen::Login { selection } => self.handle_login_key(code, selection),
            DashboardScreen::Home => self.handle_home_key(code),
            DashboardScreen::Page(_) => false,
        }
    }

    fn handle_login_key(&mut self, code: KeyCode, selection: usize) -> bool {
        match code {
            KeyCode::Up => {
                self.screen = DashboardScreen::Login {
                    selection: selection.saturating_sub(1),
                }
            }
            KeyCode::Down => {
                self.screen = DashboardScreen::Login {
                    selection: (selection + 1).min(Role::value_variants().len() - 1),
                }
            }
            KeyCode::Enter => {
                if let Some(role) = Role::value_variants().get(selection) {
                    self.set_session(self.session.login(*role));
                    self.menu_selection = 0;
                    self.screen = DashboardScreen::Home;
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn handle_home_key(&mut self, code: KeyCode) -> bool {
        let menu_len = self.menu().len();
        match code {
            KeyCode::Up => self.menu_selection = self.menu_selection.saturating_sub(1),
            KeyCode::Down => {
                self.menu_selection = (self.menu_selection + 1).min(menu_len.saturating_sub(1))
            }
            KeyCode::Char('c') if self.session.role() == Some(Role::Accountant) => {
                self.set_session(self.session.cycle_client());
            }
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('q') => return true,
            KeyCode::Enter => {
                let path = self.menu().get(self.menu_selection).map(|e| e.path);
                match path {
                    Some(Some(path)) => self.open(path),
                    Some(None) => self.logout(),
                    None => {}
                }
            }
            _ => {}
        }
        false
    }

    fn logout(&mut self) {
        let (session, notice) = self.session.logout();
        self.set_session(session);
        self.menu_selection = 0;
        self.screen = DashboardScreen::Login { selection: 0 };
        self.status_message = Some(format!("{}. {}", notice.title, notice.description));
    }

    fn open(&mut self, path: &str) {
        match self.page_for(path) {
            Ok(Some(view)) => self.screen = DashboardScreen::Page(view),
            Ok(None) => {}
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// The view behind a sidebar path. `None` means stay on the home screen.
    fn page_for(&self, path: &str) -> Result<Option<Box<dyn PageView>>> {
        let route = match resolve(path, self.session.role()) {
            Resolution::Render(route) => route,
            Resolution::Redirect(to) => {
                return Err(AppError::Access(format!("{path} -> {}", to.path())))
            }
            Resolution::NotFound => return Err(AppError::Other(self.session.t("route.notFound"))),
        };
        let view: Box<dyn PageView> = match route {
            Route::Dashboard | Route::Login => return Ok(None),
            Route::Cashflow => {
                let data = (!self.session.requires_client_selection())
                    .then(|| get_cashflow(&seed::transactions(), OPENING_BALANCE));
                Box::new(CashflowView::new(self.session.language(), data))
            }
            other => {
                let Some(kind) = EntityKind::from_route(&other) else {
                    return Ok(None);
                };
                tracing::debug!(page = %kind, "opening page");
                with_entity!(kind, E => {
                    Box::new(PageManager::<E>::new(&self.session, self.page_size))
                        as Box<dyn PageView>
                })
            }
        };
        Ok(Some(view))
    }
}

/// Pick nice round y-axis tick values (top and mid) given a max data value.
fn y_axis_ticks(max_val: f64) -> (f64, f64) {
    let steps = [
        1000.0, 2500.0, 5000.0, 10000.0, 25000.0, 50000.0, 100000.0, 250000.0, 500000.0,
        1000000.0, 2500000.0, 5000000.0, 10000000.0,
    ];
    let top = steps
        .iter()
        .copied()
        .find(|&s| s >= max_val)
        .unwrap_or(max_val);
    (top, top / 2.0)
}

/// Compact axis label: `$2.5k`, `$10k`, `$1M`.
fn format_k(val: f64) -> String {
    if val >= 1_000_000.0 {
        let m = val / 1_000_000.0;
        if m == m.floor() {
            format!("${}M", m as u64)
        } else {
            format!("${:.1}M", m)
        }
    } else if val >= 1000.0 {
        let k = val / 1000.0;
        if k == k.floor() {
            format!("${}k", k as u64)
        } else {
            format!("${:.1}k", k)
        }
    } else {
        format!("${}", val as u64)
    }
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

pub fn run(session: Session, page_size: usize) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut dashboard = Dashboard::new(session, page_size);
    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| dashboard.draw(frame)) {
            break Err(e.into());
        }
        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                if dashboard.handle_key(key.code) {
                    break Ok(());
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    fn labels(d: &Dashboard) -> Vec<&'static str> {
        d.menu().iter().map(|e| e.label).collect()
    }

    #[test]
    fn test_y_axis_ticks() {
        assert_eq!(y_axis_ticks(800.0), (1000.0, 500.0));
        assert_eq!(y_axis_ticks(18_000.0), (25000.0, 12500.0));
    }

    #[test]
    fn test_format_k() {
        assert_eq!(format_k(500.0), "$500");
        assert_eq!(format_k(2500.0), "$2.5k");
        assert_eq!(format_k(10000.0), "$10k");
        assert_eq!(format_k(1_000_000.0), "$1M");
    }

    #[test]
    fn test_login_then_menu_by_role() {
        let mut d = Dashboard::new(Session::new(Language::En), 10);
        assert!(matches!(d.screen, DashboardScreen::Login { .. }));
        assert!(d.menu().is_empty());

        d.handle_key(KeyCode::Down);
        d.handle_key(KeyCode::Enter);
        assert_eq!(d.session.role(), Some(Role::ClientAdmin));
        assert!(matches!(d.screen, DashboardScreen::Home));
        assert!(d.home_data.is_some());
        let menu = labels(&d);
        assert!(!menu.contains(&"nav.clients"));
        assert_eq!(menu.last(), Some(&"nav.logout"));
    }

    #[test]
    fn test_accountant_needs_client_for_home_data() {
        let mut d = Dashboard::new(Session::new(Language::En).login(Role::Accountant), 10);
        assert!(d.home_data.is_none());
        assert!(labels(&d).contains(&"nav.clients"));

        d.handle_key(KeyCode::Char('c'));
        assert_eq!(d.session.selected_client().map(|c| c.id.as_str()), Some("1"));
        assert!(d.home_data.is_some());
    }

    #[test]
    fn test_open_page_and_close_back_home() {
        let mut d = Dashboard::new(Session::new(Language::En).login(Role::ClientUser), 10);
        let idx = d
            .menu()
            .iter()
            .position(|e| e.path == Some("/categories"))
            .unwrap();
        d.menu_selection = idx;
        d.handle_key(KeyCode::Enter);
        assert!(matches!(d.screen, DashboardScreen::Page(_)));
        d.handle_key(KeyCode::Esc);
        assert!(matches!(d.screen, DashboardScreen::Home));
    }

    #[test]
    fn test_logout_and_language_toggle() {
        let mut d = Dashboard::new(Session::new(Language::En).login(Role::ClientAdmin), 10);
        d.handle_key(KeyCode::Char('L'));
        assert_eq!(d.session.language(), Language::Pt);

        d.handle_key(KeyCode::Char('o'));
        assert!(!d.session.is_authenticated());
        assert_eq!(d.session.language(), Language::Pt);
        assert!(matches!(d.screen, DashboardScreen::Login { selection: 0 }));
        assert!(d
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Deslogado com sucesso")));
    }

    #[test]
    fn test_dashboard_entry_stays_home() {
        let d = Dashboard::new(Session::new(Language::En).login(Role::ClientAdmin), 10);
        assert!(d.page_for("/dashboard").unwrap().is_none());
        assert!(d.page_for("/cashflow").unwrap().is_some());
        assert!(d.page_for("/clients").is_err());
    }
}
