use std::io::Write;
use std::path::Path;

use crate::cli::{open_page, ViewArgs};
use crate::error::Result;
use crate::pages::{EntityKind, PageEntity};
use crate::session::Session;
use crate::table::DataTable;
use crate::with_entity;

pub fn run(
    session: &Session,
    kind: EntityKind,
    view: &ViewArgs,
    output: Option<&Path>,
) -> Result<()> {
    if !open_page(session, kind)? {
        return Ok(());
    }
    let lang = session.language();
    with_entity!(kind, E => {
        let data = E::seed();
        let mut table = E::table(lang, data.len().max(1));
        view.apply(&mut table)?;
        match output {
            Some(path) => {
                let file = std::fs::File::create(path)?;
                let count = write_rows(file, &table, &data)?;
                println!("Exported {count} rows to {}", path.display());
            }
            None => {
                write_rows(std::io::stdout().lock(), &table, &data)?;
            }
        }
    });
    Ok(())
}

/// Write every row matching the table's search, in its sort order, ignoring
/// pagination. Headers are the column keys; cells are the raw values, not
/// the localised display text.
pub fn write_rows<E: PageEntity, W: Write>(
    out: W,
    table: &DataTable<E>,
    data: &[E],
) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    let columns = table.columns();
    writer.write_record(columns.iter().map(|c| c.key))?;
    let rows = table.all_rows(data);
    for row in &rows {
        writer.write_record(columns.iter().map(|c| c.value(row).to_string()))?;
    }
    writer.flush()?;
    tracing::info!(kind = %E::KIND, rows = rows.len(), "exported");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::models::Partner;
    use crate::seed;
    use crate::table::SortDirection;

    #[test]
    fn test_export_filtered_sorted_view() {
        let data = seed::partners();
        let mut table = Partner::table(Language::En, 1);
        table.set_search("co");
        table.set_sort("name", SortDirection::Descending);

        let mut buf = Vec::new();
        let count = write_rows(&mut buf, &table, &data).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(count, 3);
        assert_eq!(lines[0], "name,type,email,phone");
        assert!(lines[1].starts_with("Office Supply Co,supplier,"));
        assert!(lines[3].starts_with("Acme Corporation,supplier,"));
    }

    #[test]
    fn test_export_ignores_pagination() {
        let data = seed::cost_centers();
        let table = crate::models::CostCenter::table(Language::En, 2);
        let mut buf = Vec::new();
        assert_eq!(write_rows(&mut buf, &table, &data).unwrap(), 5);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("Finance & Accounting,Financial operations and accounting"));
    }
}
