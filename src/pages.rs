use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::forms::{
    CategoryForm, CostCenterForm, EntityForm, FieldSpec, FormMode, InvoiceForm, PartnerForm,
    TransactionForm,
};
use crate::fmt::{date_in, money_in};
use crate::i18n::Language;
use crate::importer::{map_rows, ImportReport, RejectedRow};
use crate::models::*;
use crate::reports::{self, StatCard};
use crate::routes::Route;
use crate::seed;
use crate::store::{Collection, Draft, Record};
use crate::table::{CellValue, Column, DataTable};
use crate::upload::CsvRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum EntityKind {
    Categories,
    CostCenters,
    Partners,
    Invoices,
    Transactions,
    Accounts,
    Clients,
}

impl EntityKind {
    pub fn route(&self) -> Route {
        match self {
            EntityKind::Categories => Route::Categories,
            EntityKind::CostCenters => Route::CostCenters,
            EntityKind::Partners => Route::Partners,
            EntityKind::Invoices => Route::Invoices,
            EntityKind::Transactions => Route::Transactions,
            EntityKind::Accounts => Route::Accounts,
            EntityKind::Clients => Route::Clients,
        }
    }

    pub fn from_route(route: &Route) -> Option<EntityKind> {
        let kind = match route {
            Route::Categories => EntityKind::Categories,
            Route::CostCenters => EntityKind::CostCenters,
            Route::Partners => EntityKind::Partners,
            Route::Invoices => EntityKind::Invoices,
            Route::Transactions => EntityKind::Transactions,
            Route::Accounts => EntityKind::Accounts,
            Route::Clients => EntityKind::Clients,
            _ => return None,
        };
        Some(kind)
    }

    /// Translation-key prefix for the page's strings.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            EntityKind::Categories => "categories",
            EntityKind::CostCenters => "costCenters",
            EntityKind::Partners => "partners",
            EntityKind::Invoices => "invoices",
            EntityKind::Transactions => "transactions",
            EntityKind::Accounts => "accounts",
            EntityKind::Clients => "clients",
        }
    }

    /// Name used on the command line and in exported file names.
    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Categories => "categories",
            EntityKind::CostCenters => "cost-centers",
            EntityKind::Partners => "partners",
            EntityKind::Invoices => "invoices",
            EntityKind::Transactions => "transactions",
            EntityKind::Accounts => "accounts",
            EntityKind::Clients => "clients",
        }
    }

    /// Client data pages stay empty for an accountant until a client is
    /// chosen. The client list itself is not one of them.
    pub fn needs_client(&self) -> bool {
        !matches!(self, EntityKind::Clients)
    }

    pub fn t(&self, lang: Language, suffix: &str) -> String {
        lang.t(&format!("{}.{suffix}", self.key_prefix()))
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Choose the record type for `kind` and evaluate `body` with it bound to
/// the type alias `$e`.
#[macro_export]
macro_rules! with_entity {
    ($kind:expr, $e:ident => $body:expr) => {
        match $kind {
            $crate::pages::EntityKind::Categories => {
                type $e = $crate::models::Category;
                $body
            }
            $crate::pages::EntityKind::CostCenters => {
                type $e = $crate::models::CostCenter;
                $body
            }
            $crate::pages::EntityKind::Partners => {
                type $e = $crate::models::Partner;
                $body
            }
            $crate::pages::EntityKind::Invoices => {
                type $e = $crate::models::Invoice;
                $body
            }
            $crate::pages::EntityKind::Transactions => {
                type $e = $crate::models::Transaction;
                $body
            }
            $crate::pages::EntityKind::Accounts => {
                type $e = $crate::models::Account;
                $body
            }
            $crate::pages::EntityKind::Clients => {
                type $e = $crate::models::ClientCompany;
                $body
            }
        }
    };
}

/// Like [`with_entity!`] but only for pages with a form; the read-only pages
/// yield [`AppError::NotImportable`].
#[macro_export]
macro_rules! with_editable {
    ($kind:expr, $e:ident => $body:expr) => {
        match $kind {
            $crate::pages::EntityKind::Categories => {
                type $e = $crate::models::Category;
                $body
            }
            $crate::pages::EntityKind::CostCenters => {
                type $e = $crate::models::CostCenter;
                $body
            }
            $crate::pages::EntityKind::Partners => {
                type $e = $crate::models::Partner;
                $body
            }
            $crate::pages::EntityKind::Invoices => {
                type $e = $crate::models::Invoice;
                $body
            }
            $crate::pages::EntityKind::Transactions => {
                type $e = $crate::models::Transaction;
                $body
            }
            other => Err($crate::error::AppError::NotImportable(other.to_string())),
        }
    };
}

/// One selectable value for a form field: what gets stored and what is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChoice {
    pub value: String,
    pub label: String,
}

impl FieldChoice {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub trait PageEntity: Record + Clone + 'static {
    const KIND: EntityKind;
    /// Column the search box filters on.
    const SEARCH_COLUMN: &'static str;

    fn seed() -> Vec<Self>;

    fn columns(lang: Language) -> Vec<Column<Self>>;

    /// Short name for status lines and delete confirmations.
    fn label(&self) -> String;

    fn stats(_items: &[Self]) -> Vec<StatCard> {
        Vec::new()
    }

    /// Label/value pairs for a details view, if the page has one.
    fn details(&self, _lang: Language) -> Option<Vec<(String, String)>> {
        None
    }

    /// The create/edit/import operations, for pages that have a form.
    fn editor() -> Option<Editor<Self>> {
        None
    }

    /// Values a text field may be picked from, narrowed by what is already
    /// on `form` (a transaction's type narrows its categories, say).
    fn field_choices(_form: &dyn RecordForm<Self>, _key: &str) -> Option<Vec<FieldChoice>> {
        None
    }

    fn table(lang: Language, page_size: usize) -> DataTable<Self> {
        DataTable::new(Self::columns(lang))
            .with_search(Self::SEARCH_COLUMN, lang.t("common.search"))
            .with_page_size(page_size)
    }
}

/// A page whose records come from a form.
pub trait EditablePage: PageEntity {
    type Draft: Draft<Record = Self>;
    type Form: EntityForm<Payload = Self::Draft> + Default + 'static;

    fn edit_form(&self) -> Self::Form;
}

/// An [`EntityForm`] with its payload type erased, so one page widget can
/// drive any of the forms.
pub trait RecordForm<E> {
    fn fields(&self) -> &'static [FieldSpec];
    fn mode(&self) -> FormMode;
    fn value(&self, key: &str) -> String;
    fn set(&mut self, key: &str, value: &str);

    /// Validate and write into `records`: a new record in create mode, or a
    /// replacement for `id` in edit mode. Returns the saved record's id.
    fn save(&self, records: &mut Collection<E>, id: Option<&str>) -> Result<String>;

    /// Drop the form without saving.
    fn discard(self: Box<Self>);
}

impl<F, D> RecordForm<D::Record> for F
where
    F: EntityForm<Payload = D>,
    D: Draft,
{
    fn fields(&self) -> &'static [FieldSpec] {
        F::FIELDS
    }

    fn mode(&self) -> FormMode {
        EntityForm::mode(self)
    }

    fn value(&self, key: &str) -> String {
        EntityForm::value(self, key)
    }

    fn set(&mut self, key: &str, value: &str) {
        EntityForm::set(self, key, value)
    }

    fn save(&self, records: &mut Collection<D::Record>, id: Option<&str>) -> Result<String> {
        let mode = EntityForm::mode(self);
        let mut saved = Err(AppError::Other("form produced no record".into()));
        self.submit(|draft| {
            saved = match (mode, id) {
                (FormMode::Edit, Some(id)) => {
                    records.update(id, draft).map(|r| r.id().to_string())
                }
                (FormMode::Edit, None) => {
                    Err(AppError::Other("edit form without a record id".into()))
                }
                (FormMode::Create, _) => Ok(records.create(draft).id().to_string()),
            };
        })?;
        saved
    }

    fn discard(self: Box<Self>) {
        EntityForm::cancel(*self, || tracing::debug!("form cancelled"));
    }
}

/// Summary of one CSV import into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub added: usize,
    pub rejected: Vec<RejectedRow>,
}

pub struct Editor<E> {
    pub create: fn() -> Box<dyn RecordForm<E>>,
    pub edit: fn(&E) -> Box<dyn RecordForm<E>>,
    pub import: fn(&mut Collection<E>, &[CsvRow]) -> ImportOutcome,
}

impl<E: EditablePage> Editor<E> {
    pub fn new() -> Self {
        Self {
            create: blank_form::<E>,
            edit: edit_form::<E>,
            import: import_rows::<E>,
        }
    }
}

impl<E: EditablePage> Default for Editor<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn blank_form<E: EditablePage>() -> Box<dyn RecordForm<E>> {
    Box::new(E::Form::default())
}

fn edit_form<E: EditablePage>(record: &E) -> Box<dyn RecordForm<E>> {
    Box::new(record.edit_form())
}

/// Validate every row through the page's form and append the ones that pass.
pub fn import_rows<E: EditablePage>(records: &mut Collection<E>, rows: &[CsvRow]) -> ImportOutcome {
    let ImportReport { accepted, rejected } = map_rows::<E::Form>(rows);
    let added = records.create_many(accepted);
    ImportOutcome { added, rejected }
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

fn amount(v: f64) -> CellValue {
    CellValue::Number(v)
}

/// Translated label for a literal, e.g. `partners.customer`; the literal
/// itself when no translation exists.
fn literal_label(lang: Language, prefix: &str, literal: &str) -> String {
    let key = format!("{prefix}.{literal}");
    let label = lang.t(&key);
    if label == key {
        literal.to_string()
    } else {
        label
    }
}

fn name_lookup<T>(items: Vec<T>, f: impl Fn(T) -> (String, String)) -> HashMap<String, String> {
    items.into_iter().map(f).collect()
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

impl PageEntity for Category {
    const KIND: EntityKind = EntityKind::Categories;
    const SEARCH_COLUMN: &'static str = "name";

    fn seed() -> Vec<Self> {
        seed::categories()
    }

    fn columns(lang: Language) -> Vec<Column<Self>> {
        vec![
            Column::new("name", lang.t("common.name"), |c: &Category| CellValue::text(&c.name)),
            Column::new("type", lang.t("common.type"), |c: &Category| {
                CellValue::text(c.category_type.as_str())
            })
            .with_renderer(move |c| literal_label(lang, "categories", c.category_type.as_str())),
            Column::new("description", lang.t("common.description"), |c: &Category| {
                CellValue::text(&c.description)
            }),
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn stats(items: &[Self]) -> Vec<StatCard> {
        reports::category_stats(items)
    }

    fn editor() -> Option<Editor<Self>> {
        Some(Editor::new())
    }
}

impl EditablePage for Category {
    type Draft = CategoryDraft;
    type Form = CategoryForm;

    fn edit_form(&self) -> CategoryForm {
        CategoryForm::edit(self)
    }
}

impl PageEntity for CostCenter {
    const KIND: EntityKind = EntityKind::CostCenters;
    const SEARCH_COLUMN: &'static str = "name";

    fn seed() -> Vec<Self> {
        seed::cost_centers()
    }

    fn columns(lang: Language) -> Vec<Column<Self>> {
        vec![
            Column::new("name", lang.t("common.name"), |c: &CostCenter| CellValue::text(&c.name)),
            Column::new("description", lang.t("common.description"), |c: &CostCenter| {
                CellValue::text(&c.description)
            }),
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn stats(items: &[Self]) -> Vec<StatCard> {
        reports::cost_center_stats(items)
    }

    fn editor() -> Option<Editor<Self>> {
        Some(Editor::new())
    }
}

impl EditablePage for CostCenter {
    type Draft = CostCenterDraft;
    type Form = CostCenterForm;

    fn edit_form(&self) -> CostCenterForm {
        CostCenterForm::edit(self)
    }
}

impl PageEntity for Partner {
    const KIND: EntityKind = EntityKind::Partners;
    const SEARCH_COLUMN: &'static str = "name";

    fn seed() -> Vec<Self> {
        seed::partners()
    }

    fn columns(lang: Language) -> Vec<Column<Self>> {
        vec![
            Column::new("name", lang.t("common.name"), |p: &Partner| CellValue::text(&p.name)),
            Column::new("type", lang.t("common.type"), |p: &Partner| {
                CellValue::text(p.partner_type.as_str())
            })
            .with_renderer(move |p| literal_label(lang, "partners", p.partner_type.as_str())),
            Column::new("email", lang.t("partners.email"), |p: &Partner| CellValue::text(&p.email)),
            Column::new("phone", lang.t("partners.phone"), |p: &Partner| CellValue::text(&p.phone)),
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn stats(items: &[Self]) -> Vec<StatCard> {
        reports::partner_stats(items)
    }

    fn editor() -> Option<Editor<Self>> {
        Some(Editor::new())
    }
}

impl EditablePage for Partner {
    type Draft = PartnerDraft;
    type Form = PartnerForm;

    fn edit_form(&self) -> PartnerForm {
        PartnerForm::edit(self)
    }
}

impl PageEntity for Invoice {
    const KIND: EntityKind = EntityKind::Invoices;
    const SEARCH_COLUMN: &'static str = "number";

    fn seed() -> Vec<Self> {
        seed::invoices()
    }

    fn columns(lang: Language) -> Vec<Column<Self>> {
        let partners = name_lookup(seed::partners(), |p| (p.id, p.name));
        vec![
            Column::new("number", lang.t("invoices.number"), |i: &Invoice| {
                CellValue::text(&i.number)
            }),
            Column::new("date", lang.t("invoices.date"), |i: &Invoice| CellValue::text(&i.date))
                .with_renderer(move |i| date_in(&i.date, lang)),
            Column::new("dueDate", lang.t("invoices.dueDate"), |i: &Invoice| {
                CellValue::text(&i.due_date)
            })
            .with_renderer(move |i| date_in(&i.due_date, lang)),
            Column::new("partner", lang.t("invoices.partner"), |i: &Invoice| {
                CellValue::text(&i.partner_id)
            })
            .with_renderer(move |i| {
                partners
                    .get(&i.partner_id)
                    .cloned()
                    .unwrap_or_else(|| i.partner_id.clone())
            }),
            Column::new("amount", lang.t("invoices.amount"), |i: &Invoice| amount(i.amount))
                .with_renderer(move |i| money_in(i.amount, lang)),
            Column::new("status", lang.t("common.status"), |i: &Invoice| {
                CellValue::text(i.status.as_str())
            })
            .with_renderer(move |i| literal_label(lang, "invoices", i.status.as_str())),
        ]
    }

    fn label(&self) -> String {
        self.number.clone()
    }

    fn stats(items: &[Self]) -> Vec<StatCard> {
        reports::invoice_stats(items)
    }

    fn editor() -> Option<Editor<Self>> {
        Some(Editor::new())
    }

    fn field_choices(_form: &dyn RecordForm<Self>, key: &str) -> Option<Vec<FieldChoice>> {
        match key {
            "partnerId" => Some(
                seed::partners()
                    .into_iter()
                    .map(|p| FieldChoice::new(p.id, p.name))
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl EditablePage for Invoice {
    type Draft = InvoiceDraft;
    type Form = InvoiceForm;

    fn edit_form(&self) -> InvoiceForm {
        InvoiceForm::edit(self)
    }
}

impl PageEntity for Transaction {
    const KIND: EntityKind = EntityKind::Transactions;
    const SEARCH_COLUMN: &'static str = "description";

    fn seed() -> Vec<Self> {
        seed::transactions()
    }

    /// Category and account cells show names where the id resolves and the
    /// stored value otherwise; sorting uses the stored value.
    fn columns(lang: Language) -> Vec<Column<Self>> {
        let categories = name_lookup(seed::categories(), |c| (c.id, c.name));
        let accounts = name_lookup(seed::accounts(), |a| (a.id, a.name));
        vec![
            Column::new("date", lang.t("transactions.date"), |t: &Transaction| {
                CellValue::text(&t.date)
            })
            .with_renderer(move |t| date_in(&t.date, lang)),
            Column::new("description", lang.t("common.description"), |t: &Transaction| {
                CellValue::text(&t.description)
            }),
            Column::new("category", lang.t("transactions.category"), |t: &Transaction| {
                CellValue::text(&t.category_id)
            })
            .with_renderer(move |t| {
                categories
                    .get(&t.category_id)
                    .cloned()
                    .unwrap_or_else(|| t.category_id.clone())
            }),
            Column::new("account", lang.t("transactions.account"), |t: &Transaction| {
                CellValue::text(&t.account_id)
            })
            .with_renderer(move |t| {
                accounts
                    .get(&t.account_id)
                    .cloned()
                    .unwrap_or_else(|| t.account_id.clone())
            }),
            Column::new("type", lang.t("common.type"), |t: &Transaction| {
                CellValue::text(t.transaction_type.as_str())
            }),
            Column::new("amount", lang.t("transactions.amount"), |t: &Transaction| amount(t.amount))
                .with_renderer(move |t| match t.transaction_type {
                    TransactionType::Expense => money_in(-t.amount, lang),
                    _ => money_in(t.amount, lang),
                }),
            Column::new("status", lang.t("common.status"), |t: &Transaction| {
                CellValue::text(t.status.as_str())
            }),
        ]
    }

    fn label(&self) -> String {
        self.description.clone()
    }

    fn editor() -> Option<Editor<Self>> {
        Some(Editor::new())
    }

    fn field_choices(form: &dyn RecordForm<Self>, key: &str) -> Option<Vec<FieldChoice>> {
        let optional = |rest: Vec<FieldChoice>| {
            let mut all = vec![FieldChoice::new("", "-")];
            all.extend(rest);
            all
        };
        match key {
            "categoryId" => {
                let mut probe = TransactionForm::new();
                EntityForm::set(&mut probe, "type", &form.value("type"));
                let categories = seed::categories();
                let choices = probe
                    .category_choices(&categories)
                    .into_iter()
                    .map(|c| FieldChoice::new(c.id.clone(), c.name.clone()))
                    .collect();
                Some(choices)
            }
            "accountId" => Some(
                seed::accounts()
                    .into_iter()
                    .map(|a| FieldChoice::new(a.id, a.name))
                    .collect(),
            ),
            "costCenterId" => Some(optional(
                seed::cost_centers()
                    .into_iter()
                    .map(|c| FieldChoice::new(c.id, c.name))
                    .collect(),
            )),
            "partnerId" => Some(optional(
                seed::partners()
                    .into_iter()
                    .map(|p| FieldChoice::new(p.id, p.name))
                    .collect(),
            )),
            _ => None,
        }
    }
}

impl EditablePage for Transaction {
    type Draft = TransactionDraft;
    type Form = TransactionForm;

    fn edit_form(&self) -> TransactionForm {
        TransactionForm::edit(self)
    }
}

impl PageEntity for Account {
    const KIND: EntityKind = EntityKind::Accounts;
    const SEARCH_COLUMN: &'static str = "name";

    fn seed() -> Vec<Self> {
        seed::accounts()
    }

    fn columns(lang: Language) -> Vec<Column<Self>> {
        vec![
            Column::new("name", lang.t("accounts.name"), |a: &Account| CellValue::text(&a.name)),
            Column::new("type", lang.t("common.type"), |a: &Account| {
                CellValue::text(a.account_type.as_str())
            }),
            Column::new("institution", lang.t("accounts.institution"), |a: &Account| {
                CellValue::text(&a.institution)
            }),
            Column::new("balance", lang.t("accounts.balance"), |a: &Account| amount(a.balance))
                .with_renderer(move |a| money_in(a.balance, lang)),
            Column::new("currency", lang.t("accounts.currency"), |a: &Account| {
                CellValue::text(&a.currency)
            }),
            Column::new("status", lang.t("common.status"), |a: &Account| {
                CellValue::text(a.status.as_str())
            })
            .with_renderer(move |a| literal_label(lang, "common", a.status.as_str())),
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn stats(items: &[Self]) -> Vec<StatCard> {
        reports::account_stats(items)
    }
}

impl PageEntity for ClientCompany {
    const KIND: EntityKind = EntityKind::Clients;
    const SEARCH_COLUMN: &'static str = "name";

    fn seed() -> Vec<Self> {
        seed::clients()
    }

    fn columns(lang: Language) -> Vec<Column<Self>> {
        vec![
            Column::new("name", lang.t("common.name"), |c: &ClientCompany| {
                CellValue::text(&c.name)
            }),
            Column::new("email", lang.t("clients.email"), |c: &ClientCompany| {
                CellValue::text(&c.email)
            }),
            Column::new("industry", lang.t("clients.industry"), |c: &ClientCompany| {
                CellValue::text(&c.industry)
            }),
            Column::new("taxId", lang.t("clients.taxId"), |c: &ClientCompany| {
                CellValue::text(&c.tax_id)
            }),
            Column::new("status", lang.t("common.status"), |c: &ClientCompany| {
                CellValue::text(c.status.as_str())
            })
            .with_renderer(move |c| literal_label(lang, "common", c.status.as_str())),
            Column::new("createdAt", lang.t("clients.createdAt"), |c: &ClientCompany| {
                CellValue::text(&c.created_at)
            })
            .with_renderer(move |c| date_in(&c.created_at, lang)),
        ]
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn details(&self, lang: Language) -> Option<Vec<(String, String)>> {
        Some(client_details(self, lang))
    }
}

/// The `/clients/:id` view of one client.
pub fn client_details(client: &ClientCompany, lang: Language) -> Vec<(String, String)> {
    vec![
        (lang.t("common.name"), client.name.clone()),
        (lang.t("clients.email"), client.email.clone()),
        (lang.t("clients.phone"), client.phone.clone()),
        (
            lang.t("clients.address"),
            client.address.clone().unwrap_or_default(),
        ),
        (lang.t("clients.taxId"), client.tax_id.clone()),
        (lang.t("clients.industry"), client.industry.clone()),
        (
            lang.t("common.status"),
            literal_label(lang, "common", client.status.as_str()),
        ),
        (lang.t("clients.createdAt"), date_in(&client.created_at, lang)),
        (lang.t("clients.notes"), client.notes.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SortDirection;
    use crate::upload::parse_csv;

    #[test]
    fn test_kind_route_round_trip() {
        for kind in <EntityKind as clap::ValueEnum>::value_variants() {
            assert_eq!(EntityKind::from_route(&kind.route()), Some(*kind));
        }
        assert_eq!(EntityKind::from_route(&Route::Cashflow), None);
        assert_eq!(EntityKind::CostCenters.slug(), "cost-centers");
        assert_eq!(EntityKind::CostCenters.t(Language::En, "title"), "Cost Centers");
    }

    #[test]
    fn test_only_form_pages_have_editors() {
        assert!(Category::editor().is_some());
        assert!(Transaction::editor().is_some());
        assert!(Account::editor().is_none());
        assert!(ClientCompany::editor().is_none());
    }

    #[test]
    fn test_create_and_edit_through_erased_form() {
        let editor = Partner::editor().unwrap();
        let mut records = Collection::new(Partner::seed());

        let mut form = (editor.create)();
        form.set("name", "Initech");
        form.set("email", "hello@initech.com");
        let id = form.save(&mut records, None).unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(records.get(&id).unwrap().partner_type, PartnerType::Customer);

        let mut form = (editor.edit)(records.get("3").unwrap());
        assert_eq!(form.mode(), FormMode::Edit);
        form.set("name", "Metro Consulting Group");
        form.save(&mut records, Some("3")).unwrap();
        assert_eq!(records.get("3").unwrap().name, "Metro Consulting Group");
        assert_eq!(records.len(), 6);
    }

    #[test]
    fn test_invalid_form_leaves_records_alone() {
        let editor = Invoice::editor().unwrap();
        let mut records = Collection::new(Invoice::seed());
        let mut form = (editor.create)();
        form.set("number", "INV-005");
        form.set("amount", "0");
        let err = form.save(&mut records, None).unwrap_err();
        let AppError::Form(errors) = err else {
            panic!("expected form errors");
        };
        assert_eq!(errors.get("amount"), Some("Amount must be greater than 0"));
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_import_appends_valid_rows() {
        let mut records = Collection::new(CostCenter::seed());
        let rows = parse_csv("Name,Description\nLegal,Contracts\n,Missing name\nOps,");
        let outcome = import_rows(&mut records, &rows);
        assert_eq!(outcome.added, 2);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].row, 2);
        assert_eq!(records.len(), 7);
    }

    #[test]
    fn test_transaction_category_choices_follow_type() {
        let mut form = (Transaction::editor().unwrap().create)();
        let ids = |form: &dyn RecordForm<Transaction>| -> Vec<String> {
            Transaction::field_choices(form, "categoryId")
                .unwrap()
                .into_iter()
                .map(|c| c.value)
                .collect()
        };
        assert_eq!(ids(form.as_ref()), vec!["1", "2", "5"]);
        form.set("type", "income");
        assert_eq!(ids(form.as_ref()), vec!["3", "4"]);
        form.set("type", "transfer");
        assert_eq!(ids(form.as_ref()).len(), 5);
        let centers = Transaction::field_choices(form.as_ref(), "costCenterId").unwrap();
        assert_eq!(centers[0].value, "");
    }

    #[test]
    fn test_invoice_table_renders_names_and_money() {
        let data = Invoice::seed();
        let mut table = Invoice::table(Language::Pt, 10);
        table.set_sort("amount", SortDirection::Descending);
        let view = table.view(&data);
        let cells = table.cells(&view);
        assert_eq!(cells[0][0], "INV-004");
        assert_eq!(cells[0][1], "03/06/2024");
        assert_eq!(cells[0][3], "Acme Corporation");
        assert_eq!(cells[0][4], "US$ 3.200,00");
        assert_eq!(cells[0][5], "Rascunho");
    }

    #[test]
    fn test_transactions_keep_unresolved_category_labels() {
        let data = Transaction::seed();
        let table = Transaction::table(Language::En, 10);
        let cells = table.cells(&table.view(&data));
        assert_eq!(cells[0][2], "Office Supplies");
        assert_eq!(cells[0][5], "-$249.99");
        assert_eq!(cells[1][2], "Sales Revenue");
    }

    #[test]
    fn test_client_details() {
        let client = &ClientCompany::seed()[2];
        let details = client.details(Language::En).unwrap();
        assert_eq!(details[0], ("Name".to_string(), "StartupXYZ".to_string()));
        assert_eq!(details[3].1, "");
    }
}
