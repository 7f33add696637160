use comfy_table::{Cell, Table};

use crate::cli::{open_page, ViewArgs};
use crate::error::Result;
use crate::fmt::{fill, money_in};
use crate::i18n::Language;
use crate::pages::{EntityKind, PageEntity};
use crate::reports::{StatCard, StatValue};
use crate::session::Session;
use crate::table::DataTable;
use crate::with_entity;

pub fn run(
    session: &Session,
    kind: EntityKind,
    view: &ViewArgs,
    page: usize,
    page_size: usize,
) -> Result<()> {
    if !open_page(session, kind)? {
        return Ok(());
    }
    let lang = session.language();
    let text = with_entity!(kind, E => {
        let data = E::seed();
        let mut table = E::table(lang, page_size);
        view.apply(&mut table)?;
        table.set_page(page.saturating_sub(1));
        format_page(lang, &table, &data)
    });
    println!("{text}");
    Ok(())
}

/// `Total Categories: 5  Income Categories: 2  ...`
pub fn format_stats(lang: Language, cards: &[StatCard]) -> String {
    cards
        .iter()
        .map(|card| {
            let value = match card.value {
                StatValue::Count(n) => n.to_string(),
                StatValue::Money(m) => money_in(m, lang),
            };
            format!("{}: {value}", lang.t(card.label))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Title, stats cards, the current page of the table, and the pager line.
pub fn format_page<E: PageEntity>(lang: Language, table: &DataTable<E>, data: &[E]) -> String {
    let kind = E::KIND;
    let mut out = format!("{}\n{}\n", kind.t(lang, "title"), kind.t(lang, "subtitle"));

    let cards = E::stats(data);
    if !cards.is_empty() {
        out.push_str(&format_stats(lang, &cards));
        out.push('\n');
    }

    let view = table.view(data);
    if view.is_empty() {
        out.push_str(&lang.t("common.noResults"));
        return out;
    }

    let mut grid = Table::new();
    grid.set_header(table.headers());
    for row in table.cells(&view) {
        grid.add_row(row.into_iter().map(Cell::new).collect::<Vec<_>>());
    }
    out.push_str(&grid.to_string());
    out.push('\n');

    let pager = fill(
        &lang.t("common.page"),
        &[
            ("page", (view.page + 1).to_string()),
            ("pages", view.page_count.to_string()),
        ],
    );
    let records = fill(&lang.t("common.records"), &[("count", view.total_rows.to_string())]);
    out.push_str(&format!("{pager}  ({records})"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, Category, Partner};
    use crate::reports::account_stats;
    use crate::seed;

    #[test]
    fn test_format_page_with_stats_and_pager() {
        let data = seed::categories();
        let table = Category::table(Language::En, 2);
        let text = format_page(Language::En, &table, &data);
        assert!(text.starts_with("Categories\n"));
        assert!(text.contains("Total Categories: 5  Income Categories: 2  Expense Categories: 3"));
        assert!(text.contains("Rent"));
        assert!(!text.contains("Sales Revenue"));
        assert!(text.ends_with("Page 1 of 3  (5 records)"));
    }

    #[test]
    fn test_search_without_hits_shows_empty_state() {
        let data = seed::partners();
        let mut table = Partner::table(Language::Pt, 10);
        table.set_search("zzz");
        let text = format_page(Language::Pt, &table, &data);
        assert!(text.ends_with("Nenhum resultado."));
    }

    #[test]
    fn test_money_stats_follow_language() {
        let cards = account_stats(&seed::accounts());
        assert_eq!(format_stats(Language::En, &cards), "Total Balance: $286,749.25");
        let text = format_page(Language::En, &Account::table(Language::En, 10), &seed::accounts());
        assert!(text.contains("-$3,250.75"));
    }
}
