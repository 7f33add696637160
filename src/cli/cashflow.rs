use colored::Colorize;
use comfy_table::{Cell as TextCell, Table as TextTable};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::fmt::money_in;
use crate::i18n::Language;
use crate::reports::CashflowReport;
use crate::tui::{
    chrome, hints, money_span, PageView, ViewAction, AMOUNT_NEG_STYLE, AMOUNT_POS_STYLE,
};

const MONTH_ABBR: &[&str] = &[
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const HEADER_ROW_STYLE: Style = Style::new()
    .fg(ratatui::style::Color::DarkGray)
    .add_modifier(Modifier::BOLD);

/// `2025-03` as `Mar`; anything else unchanged.
pub fn month_label(month: &str) -> String {
    month
        .split_once('-')
        .and_then(|(_, m)| m.parse::<usize>().ok())
        .and_then(|m| MONTH_ABBR.get(m.wrapping_sub(1)))
        .map(|s| s.to_string())
        .unwrap_or_else(|| month.to_string())
}

pub fn format_cashflow(lang: Language, data: &CashflowReport) -> String {
    let mut table = TextTable::new();
    table.set_header(vec![
        lang.t("cashflow.month"),
        lang.t("cashflow.income"),
        lang.t("cashflow.expense"),
        lang.t("cashflow.net"),
        lang.t("cashflow.balance"),
    ]);
    for m in &data.months {
        let net_str = if m.net >= 0.0 {
            money_in(m.net, lang).green().to_string()
        } else {
            money_in(m.net, lang).red().to_string()
        };
        table.add_row(vec![
            TextCell::new(&m.month),
            TextCell::new(money_in(m.income, lang)),
            TextCell::new(money_in(m.expense, lang)),
            TextCell::new(net_str),
            TextCell::new(money_in(m.running_balance, lang)),
        ]);
    }

    let s = &data.summary;
    let summary = [
        ("cashflow.startingBalance", s.starting_balance),
        ("cashflow.totalIncome", s.total_income),
        ("cashflow.totalExpense", s.total_expense),
        ("cashflow.netCashflow", s.net),
        ("cashflow.endingBalance", s.ending_balance),
    ]
    .iter()
    .map(|(key, value)| format!("{:<18} {}", lang.t(key), money_in(*value, lang)))
    .collect::<Vec<_>>()
    .join("\n");

    format!("{}\n{table}\n{summary}", lang.t("cashflow.title"))
}

/// The `/cashflow` page in the dashboard.
pub struct CashflowView {
    lang: Language,
    data: Option<CashflowReport>,
    offset: usize,
    visible_count: usize,
}

impl CashflowView {
    /// `None` data means an accountant has not picked a client yet.
    pub fn new(lang: Language, data: Option<CashflowReport>) -> Self {
        Self {
            lang,
            data,
            offset: 0,
            visible_count: 12,
        }
    }
}

impl PageView for CashflowView {
    fn draw(&mut self, frame: &mut Frame) {
        let lang = self.lang;
        let (content_area, hints_area) = chrome(frame, &lang.t("cashflow.title"));
        hints(frame, hints_area, None, "\u{2191}/\u{2193}=scroll  q/Esc=close");

        let Some(data) = &self.data else {
            frame.render_widget(
                Paragraph::new(format!("\n {}", lang.t("cashflow.selectClient"))),
                content_area,
            );
            return;
        };

        let [table_area, summary_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(6)]).areas(content_area);

        let visible = table_area.height.saturating_sub(2) as usize;
        self.visible_count = visible.max(1);

        let header = Row::new([
            lang.t("cashflow.month"),
            lang.t("cashflow.income"),
            lang.t("cashflow.expense"),
            lang.t("cashflow.net"),
            lang.t("cashflow.balance"),
        ])
        .style(HEADER_ROW_STYLE)
        .bottom_margin(1);

        let rows: Vec<Row> = data
            .months
            .iter()
            .skip(self.offset)
            .take(visible)
            .map(|m| {
                Row::new([
                    Cell::from(m.month.clone()),
                    Cell::from(Span::styled(money_in(m.income, lang), AMOUNT_POS_STYLE)),
                    Cell::from(Span::styled(money_in(m.expense, lang), AMOUNT_NEG_STYLE)),
                    Cell::from(money_span(m.net, lang)),
                    Cell::from(money_in(m.running_balance, lang)),
                ])
            })
            .collect();
        let widths = [
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(16),
        ];
        frame.render_widget(
            Table::new(rows, widths).header(header).column_spacing(2),
            table_area,
        );

        let s = &data.summary;
        let line = |key: &str, value: f64| {
            Line::from(vec![
                Span::raw(format!(" {:<18} ", lang.t(key))),
                money_span(value, lang),
            ])
        };
        let summary = vec![
            Line::from(""),
            line("cashflow.totalIncome", s.total_income),
            line("cashflow.totalExpense", -s.total_expense),
            line("cashflow.netCashflow", s.net),
            line("cashflow.endingBalance", s.ending_balance),
        ];
        frame.render_widget(Paragraph::new(summary), summary_area);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        let total = self.data.as_ref().map_or(0, |d| d.months.len());
        let max = total.saturating_sub(self.visible_count);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            KeyCode::Up => self.offset = self.offset.saturating_sub(1),
            KeyCode::Down => self.offset = (self.offset + 1).min(max),
            _ => {}
        }
        ViewAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::get_cashflow;
    use crate::seed;

    #[test]
    fn test_month_label() {
        assert_eq!(month_label("2023-05"), "May");
        assert_eq!(month_label("2023-12"), "Dec");
        assert_eq!(month_label("2023-00"), "2023-00");
        assert_eq!(month_label("soon"), "soon");
    }

    #[test]
    fn test_format_cashflow_from_seed() {
        colored::control::set_override(false);
        let report = get_cashflow(&seed::transactions(), 0.0);
        let text = format_cashflow(Language::En, &report);
        assert!(text.starts_with("Cashflow\n"));
        assert!(text.contains("2023-04"));
        assert!(text.contains("2023-05"));
        // April: utilities only; the marketing campaign is still pending
        assert!(text.contains("-$312.45"));
        assert!(text.contains("Ending Balance"));
    }

    #[test]
    fn test_view_closes_on_escape() {
        let mut view = CashflowView::new(Language::En, None);
        assert!(matches!(view.handle_key(KeyCode::Down), ViewAction::Continue));
        assert!(matches!(view.handle_key(KeyCode::Esc), ViewAction::Close));
    }
}
