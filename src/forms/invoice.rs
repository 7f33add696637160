use crate::forms::{
    choice, date, format_amount, positive_amount, required, DateInput, EntityForm, FieldKind,
    FieldSpec, FormErrors, FormMode,
};
use crate::models::{Invoice, InvoiceDraft, InvoiceStatus};

#[derive(Debug, Clone)]
pub struct InvoiceForm {
    mode: FormMode,
    pub number: String,
    pub date: DateInput,
    pub due_date: DateInput,
    pub amount: String,
    pub status: String,
    pub partner_id: String,
    pub description: String,
    pub notes: String,
}

impl InvoiceForm {
    /// Blank form; status defaults to draft.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            number: String::new(),
            date: DateInput::default(),
            due_date: DateInput::default(),
            amount: String::new(),
            status: InvoiceStatus::Draft.as_str().to_string(),
            partner_id: String::new(),
            description: String::new(),
            notes: String::new(),
        }
    }

    pub fn edit(invoice: &Invoice) -> Self {
        Self {
            mode: FormMode::Edit,
            number: invoice.number.clone(),
            date: DateInput::from(invoice.date.as_str()),
            due_date: DateInput::from(invoice.due_date.as_str()),
            amount: format_amount(invoice.amount),
            status: invoice.status.as_str().to_string(),
            partner_id: invoice.partner_id.clone(),
            description: invoice.description.clone(),
            notes: invoice.notes.clone(),
        }
    }
}

impl Default for InvoiceForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityForm for InvoiceForm {
    type Payload = InvoiceDraft;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            key: "number",
            label: "invoices.number",
            aliases: &["Invoice Number", "Number"],
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            key: "date",
            label: "invoices.date",
            aliases: &["Date"],
            kind: FieldKind::Date,
            required: true,
        },
        FieldSpec {
            key: "dueDate",
            label: "invoices.dueDate",
            aliases: &["Due Date", "due_date"],
            kind: FieldKind::Date,
            required: true,
        },
        FieldSpec {
            key: "amount",
            label: "invoices.amount",
            aliases: &["Amount"],
            kind: FieldKind::Amount,
            required: true,
        },
        FieldSpec {
            key: "status",
            label: "common.status",
            aliases: &["Status"],
            kind: FieldKind::Choice(InvoiceStatus::LITERALS),
            required: true,
        },
        FieldSpec {
            key: "partnerId",
            label: "invoices.partner",
            aliases: &["Partner ID", "partner_id"],
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            key: "description",
            label: "common.description",
            aliases: &["Description"],
            kind: FieldKind::Text,
            required: false,
        },
        FieldSpec {
            key: "notes",
            label: "invoices.notes",
            aliases: &["Notes"],
            kind: FieldKind::Text,
            required: false,
        },
    ];

    fn mode(&self) -> FormMode {
        self.mode
    }

    fn value(&self, key: &str) -> String {
        match key {
            "number" => self.number.clone(),
            "date" => self.date.raw(),
            "dueDate" => self.due_date.raw(),
            "amount" => self.amount.clone(),
            "status" => self.status.clone(),
            "partnerId" => self.partner_id.clone(),
            "description" => self.description.clone(),
            "notes" => self.notes.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "number" => self.number = value.to_string(),
            "date" => self.date = DateInput::from(value),
            "dueDate" => self.due_date = DateInput::from(value),
            "amount" => self.amount = value.to_string(),
            "status" => self.status = value.to_string(),
            "partnerId" => self.partner_id = value.to_string(),
            "description" => self.description = value.to_string(),
            "notes" => self.notes = value.to_string(),
            _ => {}
        }
    }

    fn validate(&self) -> Result<InvoiceDraft, FormErrors> {
        let mut errors = FormErrors::new();
        let number = required(&mut errors, "number", &self.number, "Invoice number is required");
        let issued = date(&mut errors, "date", &self.date, "Invoice date is required");
        let due_date = date(&mut errors, "dueDate", &self.due_date, "Due date is required");
        let amount = positive_amount(
            &mut errors,
            "amount",
            &self.amount,
            "Amount must be greater than 0",
        );
        let status = choice(
            &mut errors,
            "status",
            &self.status,
            InvoiceStatus::parse,
            "Please select an invoice status",
        );
        let partner_id =
            required(&mut errors, "partnerId", &self.partner_id, "Partner is required");
        let Some(status) = status.filter(|_| errors.is_empty()) else {
            return Err(errors);
        };
        Ok(InvoiceDraft {
            number,
            date: issued,
            due_date,
            amount,
            status,
            partner_id,
            description: self.description.trim().to_string(),
            notes: self.notes.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid() -> InvoiceForm {
        let mut form = InvoiceForm::new();
        form.set("number", "INV-005");
        form.set("date", "2024-06-01");
        form.set("dueDate", "2024-06-30");
        form.set("amount", "1500");
        form.set("partnerId", "1");
        form
    }

    #[test]
    fn test_zero_amount_blocks_submit() {
        let mut form = valid();
        form.set("amount", "0");
        let mut called = false;
        let errors = form.submit(|_| called = true).unwrap_err();
        assert!(!called);
        assert_eq!(errors.get("amount"), Some("Amount must be greater than 0"));
    }

    #[test]
    fn test_one_cent_submits() {
        let mut form = valid();
        form.set("amount", "0.01");
        let mut submitted = None;
        form.submit(|d| submitted = Some(d)).unwrap();
        assert_eq!(submitted.unwrap().amount, 0.01);
    }

    #[test]
    fn test_non_numeric_amount() {
        let mut form = valid();
        form.set("amount", "abc");
        assert_eq!(form.validate().unwrap_err().get("amount"), Some("Amount must be a number"));
    }

    #[test]
    fn test_dates_normalised_from_date_or_text() {
        let mut form = valid();
        form.date = DateInput::Date(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
        form.set("dueDate", "2024-08-03T00:00:00.000Z");
        let draft = form.validate().unwrap();
        assert_eq!(draft.date, "2024-07-04");
        assert_eq!(draft.due_date, "2024-08-03");
    }

    #[test]
    fn test_missing_dates_and_partner() {
        let mut form = valid();
        form.set("date", "");
        form.set("dueDate", "");
        form.set("partnerId", " ");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("date"), Some("Invoice date is required"));
        assert_eq!(errors.get("dueDate"), Some("Due date is required"));
        assert_eq!(errors.get("partnerId"), Some("Partner is required"));
    }

    #[test]
    fn test_status_defaults_to_draft_and_rejects_unknown() {
        assert_eq!(valid().validate().unwrap().status, InvoiceStatus::Draft);
        let mut form = valid();
        form.set("status", "cancelled");
        assert!(form.validate().unwrap_err().get("status").is_some());
    }

    #[test]
    fn test_edit_round_trips_amount() {
        let draft = valid().validate().unwrap();
        let invoice = crate::store::Draft::into_record(draft, "7".into());
        let form = InvoiceForm::edit(&invoice);
        assert_eq!(form.value("amount"), "1500");
        assert_eq!(form.validate().unwrap().amount, 1500.0);
    }
}
