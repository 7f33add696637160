pub mod category;
pub mod cost_center;
pub mod invoice;
pub mod partner;
pub mod transaction;

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

pub use category::CategoryForm;
pub use cost_center::CostCenterForm;
pub use invoice::InvoiceForm;
pub use partner::PartnerForm;
pub use transaction::TransactionForm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// The message for `field`, if that field failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// One of a closed set of literals.
    Choice(&'static [&'static str]),
    /// A calendar date, normalised to `YYYY-MM-DD`.
    Date,
    Amount,
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// The key used by `value`/`set` and as the CSV header.
    pub key: &'static str,
    /// Translation key for the field's label.
    pub label: &'static str,
    /// Extra CSV header spellings accepted on import.
    pub aliases: &'static [&'static str],
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

pub trait EntityForm: Sized {
    /// What a valid form produces: the entity minus its id.
    type Payload;

    const FIELDS: &'static [FieldSpec];

    fn mode(&self) -> FormMode;

    /// Current raw text of `key`; unknown keys read as empty.
    fn value(&self, key: &str) -> String;

    /// Overwrite the raw text of `key`; unknown keys are ignored.
    fn set(&mut self, key: &str, value: &str);

    fn validate(&self) -> Result<Self::Payload, FormErrors>;

    /// Validate and, only if every field passes, hand the payload to
    /// `on_submit`. On failure the callback is never invoked.
    fn submit(&self, on_submit: impl FnOnce(Self::Payload)) -> Result<(), FormErrors> {
        match self.validate() {
            Ok(payload) => {
                on_submit(payload);
                Ok(())
            }
            Err(errors) => {
                tracing::debug!(%errors, "form submit blocked");
                Err(errors)
            }
        }
    }

    /// Abandon the form. The draft is dropped; nothing is emitted.
    fn cancel(self, on_cancel: impl FnOnce()) {
        on_cancel();
    }
}

/// A date as a caller may hand it over: already a date, or text that may
/// carry a time suffix (`2024-06-01T00:00:00Z`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
}

impl Default for DateInput {
    fn default() -> Self {
        DateInput::Text(String::new())
    }
}

impl From<NaiveDate> for DateInput {
    fn from(d: NaiveDate) -> Self {
        DateInput::Date(d)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl DateInput {
    /// The `YYYY-MM-DD` form, or `None` when empty or not a real date.
    pub fn normalize(&self) -> Option<String> {
        match self {
            DateInput::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            DateInput::Text(s) => {
                let day = s.trim().split(&['T', ' '][..]).next().unwrap_or("");
                NaiveDate::parse_from_str(day, "%Y-%m-%d")
                    .ok()
                    .map(|d| d.format("%Y-%m-%d").to_string())
            }
        }
    }

    /// Raw text for display in an input box.
    pub fn raw(&self) -> String {
        match self {
            DateInput::Text(s) => s.clone(),
            other => other.normalize().unwrap_or_default(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, DateInput::Text(s) if s.trim().is_empty())
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

pub fn is_valid_email(raw: &str) -> bool {
    email_pattern().is_match(raw)
}

// ---------------------------------------------------------------------------
// Field checks shared by the entity forms
// ---------------------------------------------------------------------------

fn required(errors: &mut FormErrors, field: &'static str, raw: &str, message: &str) -> String {
    let v = raw.trim();
    if v.is_empty() {
        errors.push(field, message);
    }
    v.to_string()
}

fn choice<T>(
    errors: &mut FormErrors,
    field: &'static str,
    raw: &str,
    parse: fn(&str) -> Option<T>,
    message: &str,
) -> Option<T> {
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        errors.push(field, message);
    }
    parsed
}

fn date(errors: &mut FormErrors, field: &'static str, input: &DateInput, message: &str) -> String {
    if input.is_blank() {
        errors.push(field, message);
        return String::new();
    }
    match input.normalize() {
        Some(d) => d,
        None => {
            errors.push(field, "Enter a date as YYYY-MM-DD");
            String::new()
        }
    }
}

/// Parse a positive amount. `message` is used for zero or negative values.
fn positive_amount(errors: &mut FormErrors, field: &'static str, raw: &str, message: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        Ok(_) => {
            errors.push(field, message);
            0.0
        }
        Err(_) => {
            errors.push(field, "Amount must be a number");
            0.0
        }
    }
}

fn optional(raw: &str) -> Option<String> {
    let v = raw.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

fn format_amount(amount: f64) -> String {
    if amount == 0.0 {
        String::new()
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date_from_any_input() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(DateInput::Date(d).normalize().as_deref(), Some("2024-06-01"));
        assert_eq!(
            DateInput::from("2024-06-01 13:45:00").normalize().as_deref(),
            Some("2024-06-01")
        );
        assert_eq!(DateInput::from("2024-06-01").normalize().as_deref(), Some("2024-06-01"));
        assert_eq!(
            DateInput::from("2024-06-01T00:00:00.000Z").normalize().as_deref(),
            Some("2024-06-01")
        );
        assert_eq!(DateInput::from(" 2024-06-01 ").normalize().as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn test_normalize_rejects_impossible_dates() {
        assert_eq!(DateInput::from("2024-02-30").normalize(), None);
        assert_eq!(DateInput::from("06/01/2024").normalize(), None);
        assert_eq!(DateInput::from("").normalize(), None);
        assert!(DateInput::from("  ").is_blank());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("contact@acme.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(!is_valid_email("contact@acme"));
        assert!(!is_valid_email("no at sign.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_form_errors_display_and_lookup() {
        let mut errors = FormErrors::new();
        errors.push("name", "Name is required");
        errors.push("amount", "Amount must be greater than 0");
        assert_eq!(errors.iter().count(), 2);
        assert_eq!(errors.get("amount"), Some("Amount must be greater than 0"));
        assert_eq!(errors.get("type"), None);
        assert_eq!(
            errors.to_string(),
            "name: Name is required; amount: Amount must be greater than 0"
        );
    }
}
