use serde::{Deserialize, Serialize};

use crate::store::{Draft, Record};

/// Declares a closed set of string literals. `as_str` yields the literal used
/// in forms, CSV files and JSON; `parse` is the inverse and rejects anything
/// outside the set.
macro_rules! literal_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $lit:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
        pub enum $name {
            $(#[serde(rename = $lit)] $variant),+
        }

        impl $name {
            pub const LITERALS: &'static [&'static str] = &[$($lit),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $lit),+
                }
            }

            pub fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $($lit => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

literal_enum!(CategoryType {
    Income => "income",
    Expense => "expense",
});

literal_enum!(PartnerType {
    Customer => "customer",
    Supplier => "supplier",
    Vendor => "vendor",
});

literal_enum!(InvoiceStatus {
    Draft => "draft",
    Sent => "sent",
    Paid => "paid",
    Overdue => "overdue",
});

literal_enum!(TransactionType {
    Income => "income",
    Expense => "expense",
    Transfer => "transfer",
});

literal_enum!(TransactionStatus {
    Completed => "completed",
    Pending => "pending",
});

literal_enum!(AccountType {
    Checking => "checking",
    Savings => "savings",
    Credit => "credit",
    Investment => "investment",
    Cash => "cash",
});

literal_enum!(RecordStatus {
    Active => "active",
    Inactive => "inactive",
});

literal_enum!(
    /// Who is signed in. Client admins and client users see the same pages;
    /// only accountants manage the client list.
    Role {
        Accountant => "accountant",
        ClientAdmin => "client-admin",
        ClientUser => "client-user",
    }
);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub category_type: CategoryType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    pub category_type: CategoryType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenter {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterDraft {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub partner_type: PartnerType,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerDraft {
    pub name: String,
    pub partner_type: PartnerType,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// `partner_id` is a soft reference; nothing checks that the partner exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub date: String,
    pub due_date: String,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub partner_id: String,
    pub description: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub number: String,
    pub date: String,
    pub due_date: String,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub partner_id: String,
    pub description: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: String,
    pub amount: f64,
    pub description: String,
    pub transaction_type: TransactionType,
    pub account_id: String,
    pub category_id: String,
    pub cost_center_id: Option<String>,
    pub partner_id: Option<String>,
    pub notes: Option<String>,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: String,
    pub amount: f64,
    pub description: String,
    pub transaction_type: TransactionType,
    pub account_id: String,
    pub category_id: String,
    pub cost_center_id: Option<String>,
    pub partner_id: Option<String>,
    pub notes: Option<String>,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_type: AccountType,
    pub institution: String,
    pub balance: f64,
    pub currency: String,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientCompany {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub tax_id: String,
    pub industry: String,
    pub status: RecordStatus,
    pub created_at: String,
    pub notes: String,
}

macro_rules! impl_record {
    ($($ty:ty),+) => {
        $(impl Record for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })+
    };
}

impl_record!(Category, CostCenter, Partner, Invoice, Transaction, Account, ClientCompany);

impl Draft for CategoryDraft {
    type Record = Category;

    fn into_record(self, id: String) -> Category {
        Category {
            id,
            name: self.name,
            category_type: self.category_type,
            description: self.description,
        }
    }
}

impl Draft for CostCenterDraft {
    type Record = CostCenter;

    fn into_record(self, id: String) -> CostCenter {
        CostCenter {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

impl Draft for PartnerDraft {
    type Record = Partner;

    fn into_record(self, id: String) -> Partner {
        Partner {
            id,
            name: self.name,
            partner_type: self.partner_type,
            email: self.email,
            phone: self.phone,
            address: self.address,
        }
    }
}

impl Draft for InvoiceDraft {
    type Record = Invoice;

    fn into_record(self, id: String) -> Invoice {
        Invoice {
            id,
            number: self.number,
            date: self.date,
            due_date: self.due_date,
            amount: self.amount,
            status: self.status,
            partner_id: self.partner_id,
            description: self.description,
            notes: self.notes,
        }
    }
}

impl Draft for TransactionDraft {
    type Record = Transaction;

    fn into_record(self, id: String) -> Transaction {
        Transaction {
            id,
            date: self.date,
            amount: self.amount,
            description: self.description,
            transaction_type: self.transaction_type,
            account_id: self.account_id,
            category_id: self.category_id,
            cost_center_id: self.cost_center_id,
            partner_id: self.partner_id,
            notes: self.notes,
            status: self.status,
        }
    }
}
