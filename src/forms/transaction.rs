use chrono::Local;

use crate::forms::{
    choice, date, format_amount, optional, positive_amount, required, DateInput, EntityForm,
    FieldKind, FieldSpec, FormErrors, FormMode,
};
use crate::models::{
    Category, CategoryType, Transaction, TransactionDraft, TransactionStatus, TransactionType,
};

const MIN_DESCRIPTION: usize = 3;

#[derive(Debug, Clone)]
pub struct TransactionForm {
    mode: FormMode,
    pub date: DateInput,
    pub amount: String,
    pub description: String,
    pub transaction_type: String,
    pub account_id: String,
    pub category_id: String,
    pub cost_center_id: String,
    pub partner_id: String,
    pub notes: String,
    pub status: String,
}

impl TransactionForm {
    /// Blank expense dated today, pending until someone marks it completed.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            date: DateInput::Date(Local::now().date_naive()),
            amount: String::new(),
            description: String::new(),
            transaction_type: TransactionType::Expense.as_str().to_string(),
            account_id: String::new(),
            category_id: String::new(),
            cost_center_id: String::new(),
            partner_id: String::new(),
            notes: String::new(),
            status: TransactionStatus::Pending.as_str().to_string(),
        }
    }

    pub fn edit(tx: &Transaction) -> Self {
        Self {
            mode: FormMode::Edit,
            date: DateInput::from(tx.date.as_str()),
            amount: format_amount(tx.amount),
            description: tx.description.clone(),
            transaction_type: tx.transaction_type.as_str().to_string(),
            account_id: tx.account_id.clone(),
            category_id: tx.category_id.clone(),
            cost_center_id: tx.cost_center_id.clone().unwrap_or_default(),
            partner_id: tx.partner_id.clone().unwrap_or_default(),
            notes: tx.notes.clone().unwrap_or_default(),
            status: tx.status.as_str().to_string(),
        }
    }

    /// Categories offered for the current transaction type. Income and
    /// expense narrow to categories of the same type; anything else offers
    /// the whole list.
    pub fn category_choices<'a>(&self, categories: &'a [Category]) -> Vec<&'a Category> {
        let wanted = match TransactionType::parse(self.transaction_type.trim()) {
            Some(TransactionType::Income) => Some(CategoryType::Income),
            Some(TransactionType::Expense) => Some(CategoryType::Expense),
            _ => None,
        };
        categories
            .iter()
            .filter(|c| wanted.map_or(true, |t| c.category_type == t))
            .collect()
    }
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityForm for TransactionForm {
    type Payload = TransactionDraft;

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            key: "date",
            label: "transactions.date",
            aliases: &["Date"],
            kind: FieldKind::Date,
            required: true,
        },
        FieldSpec {
            key: "amount",
            label: "transactions.amount",
            aliases: &["Amount"],
            kind: FieldKind::Amount,
            required: true,
        },
        FieldSpec {
            key: "description",
            label: "common.description",
            aliases: &["Description"],
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            key: "type",
            label: "common.type",
            aliases: &["Type"],
            kind: FieldKind::Choice(TransactionType::LITERALS),
            required: true,
        },
        FieldSpec {
            key: "accountId",
            label: "transactions.account",
            aliases: &["Account ID", "account_id"],
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            key: "categoryId",
            label: "transactions.category",
            aliases: &["Category ID", "category_id"],
            kind: FieldKind::Text,
            required: true,
        },
        FieldSpec {
            key: "costCenterId",
            label: "transactions.costCenter",
            aliases: &["Cost Center ID", "cost_center_id"],
            kind: FieldKind::Text,
            required: false,
        },
        FieldSpec {
            key: "partnerId",
            label: "transactions.partner",
            aliases: &["Partner ID", "partner_id"],
            kind: FieldKind::Text,
            required: false,
        },
        FieldSpec {
            key: "notes",
            label: "transactions.notes",
            aliases: &["Notes"],
            kind: FieldKind::Text,
            required: false,
        },
        FieldSpec {
            key: "status",
            label: "common.status",
            aliases: &["Status"],
            kind: FieldKind::Choice(TransactionStatus::LITERALS),
            required: true,
        },
    ];

    fn mode(&self) -> FormMode {
        self.mode
    }

    fn value(&self, key: &str) -> String {
        match key {
            "date" => self.date.raw(),
            "amount" => self.amount.clone(),
            "description" => self.description.clone(),
            "type" => self.transaction_type.clone(),
            "accountId" => self.account_id.clone(),
            "categoryId" => self.category_id.clone(),
            "costCenterId" => self.cost_center_id.clone(),
            "partnerId" => self.partner_id.clone(),
            "notes" => self.notes.clone(),
            "status" => self.status.clone(),
            _ => String::new(),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "date" => self.date = DateInput::from(value),
            "amount" => self.amount = value.to_string(),
            "description" => self.description = value.to_string(),
            "type" => self.transaction_type = value.to_string(),
            "accountId" => self.account_id = value.to_string(),
            "categoryId" => self.category_id = value.to_string(),
            "costCenterId" => self.cost_center_id = value.to_string(),
            "partnerId" => self.partner_id = value.to_string(),
            "notes" => self.notes = value.to_string(),
            "status" => self.status = value.to_string(),
            _ => {}
        }
    }

    fn validate(&self) -> Result<TransactionDraft, FormErrors> {
        let mut errors = FormErrors::new();
        let day = date(&mut errors, "date", &self.date, "Please pick a date.");
        let amount = positive_amount(
            &mut errors,
            "amount",
            &self.amount,
            "Amount must be a positive number",
        );
        let description = self.description.trim().to_string();
        if description.chars().count() < MIN_DESCRIPTION {
            errors.push("description", "Description must be at least 3 characters.");
        }
        let transaction_type = choice(
            &mut errors,
            "type",
            &self.transaction_type,
            TransactionType::parse,
            "Please select a transaction type.",
        );
        let account_id = required(
            &mut errors,
            "accountId",
            &self.account_id,
            "Please select an account.",
        );
        let category_id =
            required(&mut errors, "categoryId", &self.category_id, "Please select a category.");
        let status = choice(
            &mut errors,
            "status",
            &self.status,
            TransactionStatus::parse,
            "Please select a status.",
        );
        let (Some(transaction_type), Some(status)) = (transaction_type, status) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(TransactionDraft {
            date: day,
            amount,
            description,
            transaction_type,
            account_id,
            category_id,
            cost_center_id: optional(&self.cost_center_id),
            partner_id: optional(&self.partner_id),
            notes: optional(&self.notes),
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> TransactionForm {
        let mut form = TransactionForm::new();
        form.set("date", "2023-05-10");
        form.set("amount", "250.50");
        form.set("description", "Office rent");
        form.set("accountId", "1");
        form.set("categoryId", "1");
        form
    }

    fn category(id: &str, kind: CategoryType) -> Category {
        Category {
            id: id.into(),
            name: format!("Category {id}"),
            category_type: kind,
            description: String::new(),
        }
    }

    #[test]
    fn test_new_transaction_is_pending_expense() {
        let draft = valid().validate().unwrap();
        assert_eq!(draft.status, TransactionStatus::Pending);
        assert_eq!(draft.transaction_type, TransactionType::Expense);
        assert_eq!(draft.date, "2023-05-10");
        assert_eq!(draft.cost_center_id, None);
    }

    #[test]
    fn test_edit_keeps_existing_status() {
        let mut tx = crate::store::Draft::into_record(valid().validate().unwrap(), "9".into());
        tx.status = TransactionStatus::Completed;
        let mut form = TransactionForm::edit(&tx);
        form.set("amount", "300");
        let draft = form.validate().unwrap();
        assert_eq!(draft.status, TransactionStatus::Completed);
        assert_eq!(draft.amount, 300.0);
    }

    #[test]
    fn test_short_description_rejected() {
        let mut form = valid();
        form.set("description", " ab ");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("description"), Some("Description must be at least 3 characters."));
        form.set("description", "abc");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_account_and_category_required() {
        let mut form = valid();
        form.set("accountId", "");
        form.set("categoryId", "");
        form.set("amount", "-5");
        let mut called = false;
        let errors = form.submit(|_| called = true).unwrap_err();
        assert!(!called);
        assert_eq!(errors.get("accountId"), Some("Please select an account."));
        assert_eq!(errors.get("categoryId"), Some("Please select a category."));
        assert_eq!(errors.get("amount"), Some("Amount must be a positive number"));
    }

    #[test]
    fn test_optional_references_kept_when_present() {
        let mut form = valid();
        form.set("costCenterId", "2");
        form.set("partnerId", " 3 ");
        form.set("notes", "  ");
        let draft = form.validate().unwrap();
        assert_eq!(draft.cost_center_id.as_deref(), Some("2"));
        assert_eq!(draft.partner_id.as_deref(), Some("3"));
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn test_category_choices_follow_type() {
        let categories = vec![
            category("1", CategoryType::Expense),
            category("2", CategoryType::Income),
            category("3", CategoryType::Expense),
        ];
        let mut form = valid();
        let ids = |f: &TransactionForm| -> Vec<String> {
            f.category_choices(&categories).iter().map(|c| c.id.clone()).collect()
        };
        assert_eq!(ids(&form), vec!["1", "3"]);
        form.set("type", "income");
        assert_eq!(ids(&form), vec!["2"]);
        form.set("type", "transfer");
        assert_eq!(ids(&form).len(), 3);
    }
}
