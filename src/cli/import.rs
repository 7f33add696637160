use std::path::Path;

use colored::Colorize;

use crate::cli::{open_page, print_notice};
use crate::error::Result;
use crate::fmt::fill;
use crate::i18n::Language;
use crate::pages::{import_rows, EditablePage, EntityKind, ImportOutcome};
use crate::session::Session;
use crate::store::Collection;
use crate::upload::{CsvRow, CsvUpload};
use crate::with_editable;

pub fn run(session: &Session, kind: EntityKind, file: &Path) -> Result<()> {
    if !open_page(session, kind)? {
        return Ok(());
    }
    let lang = session.language();

    let mut panel = CsvUpload::new(lang);
    let mut rows: Vec<CsvRow> = Vec::new();
    let uploaded = panel.select(file, None).and_then(|()| {
        if let Some(selected) = panel.file() {
            println!("{} {}", selected.name.bold(), format!("({})", selected.size_kb()).dimmed());
        }
        panel.upload(|parsed| rows = parsed)
    });
    let notice = match uploaded {
        Ok(notice) => notice,
        Err(e) => {
            print_notice(&panel.failure_notice());
            return Err(e.into());
        }
    };
    print_notice(&notice);

    let (outcome, total) = with_editable!(kind, E => Ok(import_into::<E>(&rows)))?;
    println!("{}", format_outcome(lang, &outcome));
    println!("{}: {total}", kind.t(lang, "title"));
    Ok(())
}

/// Import into a fresh copy of the page's records. Returns the outcome and
/// how many records the page holds afterwards.
fn import_into<E: EditablePage>(rows: &[CsvRow]) -> (ImportOutcome, usize) {
    let mut records = Collection::new(E::seed());
    let outcome = import_rows(&mut records, rows);
    (outcome, records.len())
}

pub fn format_outcome(lang: Language, outcome: &ImportOutcome) -> String {
    let mut out = fill(
        &lang.t("toast.imported"),
        &[
            ("count", outcome.added.to_string()),
            ("rejected", outcome.rejected.len().to_string()),
        ],
    );
    for rejected in &outcome.rejected {
        out.push_str(&format!(
            "\n  {} {}",
            format!("row {}:", rejected.row).red(),
            rejected.reason
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Invoice;
    use crate::upload::parse_csv;

    #[test]
    fn test_import_into_seeded_page() {
        let rows = parse_csv(
            "number,date,dueDate,amount,partnerId\n\
             INV-010,2024-07-01,2024-07-31,99.90,2\n\
             INV-011,2024-07-01,,10,2",
        );
        let (outcome, total) = import_into::<Invoice>(&rows);
        assert_eq!(outcome.added, 1);
        assert_eq!(total, 5);

        colored::control::set_override(false);
        let text = format_outcome(Language::En, &outcome);
        assert!(text.starts_with("1 records imported, 1 rejected"));
        assert!(text.contains("row 2: dueDate: Due date is required"));
    }
}
