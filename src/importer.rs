use crate::forms::{EntityForm, FieldKind, FieldSpec};
use crate::upload::CsvRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based position among the data rows.
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport<P> {
    pub accepted: Vec<P>,
    pub rejected: Vec<RejectedRow>,
}

/// The value for `field` in `row`, matched against the field key or any of
/// its aliases regardless of case. Empty cells count as missing.
pub fn lookup<'a>(row: &'a CsvRow, field: &FieldSpec) -> Option<&'a str> {
    let names = std::iter::once(field.key).chain(field.aliases.iter().copied());
    for name in names {
        let hit = row
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty());
        if hit.is_some() {
            return hit;
        }
    }
    None
}

/// Build a create-mode form from one row.
///
/// Choice fields are lowercased and fall back to the form's own default when
/// the column is missing. Every other required field must come from the row;
/// a form default (today's date, say) is never silently substituted.
pub fn form_from_row<F: EntityForm + Default>(row: &CsvRow) -> F {
    let mut form = F::default();
    for field in F::FIELDS {
        match (lookup(row, field), field.kind) {
            (Some(v), FieldKind::Choice(_)) => form.set(field.key, &v.to_lowercase()),
            (Some(v), _) => form.set(field.key, v),
            (None, FieldKind::Choice(_)) => {}
            (None, _) => form.set(field.key, ""),
        }
    }
    form
}

pub fn map_rows<F: EntityForm + Default>(rows: &[CsvRow]) -> ImportReport<F::Payload> {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        match form_from_row::<F>(row).validate() {
            Ok(payload) => accepted.push(payload),
            Err(errors) => rejected.push(RejectedRow {
                row: i + 1,
                reason: errors.to_string(),
            }),
        }
    }
    tracing::info!(
        accepted = accepted.len(),
        rejected = rejected.len(),
        "mapped CSV rows"
    );
    ImportReport { accepted, rejected }
}

/// Header line of the downloadable template: the field keys in form order.
pub fn template_headers<F: EntityForm>() -> Vec<&'static str> {
    F::FIELDS.iter().map(|f| f.key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{CategoryForm, InvoiceForm, PartnerForm, TransactionForm};
    use crate::models::{InvoiceStatus, PartnerType, TransactionStatus};
    use crate::upload::parse_csv;

    #[test]
    fn test_partner_rows_with_labels_and_mixed_case() {
        let rows = parse_csv("Name,Type,Email\nAcme,SUPPLIER,a@acme.com\nGlobex,,\n,customer,");
        let report = map_rows::<PartnerForm>(&rows);
        assert_eq!(report.accepted.len(), 2);
        assert_eq!(report.accepted[0].partner_type, PartnerType::Supplier);
        assert_eq!(report.accepted[1].partner_type, PartnerType::Customer);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].row, 3);
        assert!(report.rejected[0].reason.contains("Partner name is required"));
    }

    #[test]
    fn test_invoice_aliases_and_default_status() {
        let rows = parse_csv(
            "Invoice Number,Date,Due Date,Amount,Partner ID,Description\n\
             INV-9,2024-06-01,2024-06-30,120.5,2,Design",
        );
        let report = map_rows::<InvoiceForm>(&rows);
        assert!(report.rejected.is_empty(), "{:?}", report.rejected);
        let inv = &report.accepted[0];
        assert_eq!(inv.number, "INV-9");
        assert_eq!(inv.due_date, "2024-06-30");
        assert_eq!(inv.amount, 120.5);
        assert_eq!(inv.status, InvoiceStatus::Draft);
    }

    #[test]
    fn test_unparseable_amount_is_rejected_not_zeroed() {
        let rows = parse_csv(
            "number,date,dueDate,amount,partnerId\n\
             INV-1,2024-06-01,2024-06-30,abc,1",
        );
        let report = map_rows::<InvoiceForm>(&rows);
        assert!(report.accepted.is_empty());
        assert!(report.rejected[0].reason.contains("amount"));
    }

    #[test]
    fn test_transaction_needs_date_from_row() {
        let rows = parse_csv(
            "amount,description,type,accountId,categoryId\n10,Coffee beans,expense,1,1",
        );
        let report = map_rows::<TransactionForm>(&rows);
        assert_eq!(report.rejected.len(), 1);
        assert!(report.rejected[0].reason.starts_with("date:"));

        let rows = parse_csv(
            "date,amount,description,type,accountId,categoryId\n\
             2023-05-01,10,Coffee beans,Expense,1,1",
        );
        let report = map_rows::<TransactionForm>(&rows);
        assert_eq!(report.accepted[0].status, TransactionStatus::Pending);
    }

    #[test]
    fn test_category_type_is_required() {
        let rows = parse_csv("name,description\nRent,Monthly");
        let report = map_rows::<CategoryForm>(&rows);
        assert!(report.accepted.is_empty());
        assert_eq!(report.rejected.len(), 1);
    }

    #[test]
    fn test_template_headers_follow_fields() {
        assert_eq!(template_headers::<CategoryForm>(), vec!["name", "type", "description"]);
        let headers = template_headers::<InvoiceForm>();
        assert_eq!(headers[0], "number");
        assert!(headers.contains(&"dueDate"));
    }
}
