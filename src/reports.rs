use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{
    Account, Category, CategoryType, CostCenter, Invoice, InvoiceStatus, Partner, PartnerType,
    Transaction, TransactionStatus, TransactionType,
};

// ---------------------------------------------------------------------------
// Stats cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    Count(usize),
    Money(f64),
}

/// One summary card above a list. `label` is a translation key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: StatValue,
}

fn count(label: &'static str, n: usize) -> StatCard {
    StatCard {
        label,
        value: StatValue::Count(n),
    }
}

pub fn category_stats(categories: &[Category]) -> Vec<StatCard> {
    let of = |t: CategoryType| categories.iter().filter(|c| c.category_type == t).count();
    vec![
        count("categories.total", categories.len()),
        count("categories.incomeCount", of(CategoryType::Income)),
        count("categories.expenseCount", of(CategoryType::Expense)),
    ]
}

pub fn cost_center_stats(centers: &[CostCenter]) -> Vec<StatCard> {
    vec![count("costCenters.total", centers.len())]
}

pub fn partner_stats(partners: &[Partner]) -> Vec<StatCard> {
    let of = |t: PartnerType| partners.iter().filter(|p| p.partner_type == t).count();
    vec![
        count("partners.total", partners.len()),
        count("partners.customers", of(PartnerType::Customer)),
        count("partners.suppliers", of(PartnerType::Supplier)),
    ]
}

/// "Pending" counts invoices that are sent but not yet paid.
pub fn invoice_stats(invoices: &[Invoice]) -> Vec<StatCard> {
    let of = |s: InvoiceStatus| invoices.iter().filter(|i| i.status == s).count();
    vec![
        count("invoices.total", invoices.len()),
        count("invoices.pending", of(InvoiceStatus::Sent)),
        count("invoices.paid", of(InvoiceStatus::Paid)),
        count("invoices.overdue", of(InvoiceStatus::Overdue)),
    ]
}

pub fn account_stats(accounts: &[Account]) -> Vec<StatCard> {
    vec![StatCard {
        label: "accounts.totalBalance",
        value: StatValue::Money(accounts.iter().map(|a| a.balance).sum()),
    }]
}

// ---------------------------------------------------------------------------
// Cash Flow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CashflowMonth {
    /// `YYYY-MM`
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub running_balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashflowSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net: f64,
    pub starting_balance: f64,
    pub ending_balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashflowReport {
    pub months: Vec<CashflowMonth>,
    pub summary: CashflowSummary,
}

/// Group completed income and expense transactions by calendar month.
/// Transfers move money between accounts and are left out; pending
/// transactions have not moved cash yet. Amounts are positive in the data,
/// so expenses are reported as positive outflows and subtracted for `net`.
pub fn get_cashflow(transactions: &[Transaction], starting_balance: f64) -> CashflowReport {
    let mut by_month: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for tx in transactions {
        if tx.status != TransactionStatus::Completed {
            continue;
        }
        let Ok(day) = NaiveDate::parse_from_str(&tx.date, "%Y-%m-%d") else {
            tracing::warn!(id = %tx.id, date = %tx.date, "skipping transaction with bad date");
            continue;
        };
        let entry = by_month.entry(day.format("%Y-%m").to_string()).or_default();
        match tx.transaction_type {
            TransactionType::Income => entry.0 += tx.amount,
            TransactionType::Expense => entry.1 += tx.amount,
            TransactionType::Transfer => {}
        }
    }

    let mut months = Vec::with_capacity(by_month.len());
    let mut running = starting_balance;
    let (mut total_income, mut total_expense) = (0.0f64, 0.0f64);
    for (month, (income, expense)) in by_month {
        let net = income - expense;
        running += net;
        total_income += income;
        total_expense += expense;
        months.push(CashflowMonth {
            month,
            income,
            expense,
            net,
            running_balance: running,
        });
    }

    CashflowReport {
        months,
        summary: CashflowSummary {
            total_income,
            total_expense,
            net: total_income - total_expense,
            starting_balance,
            ending_balance: running,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn tx(date: &str, amount: f64, t: TransactionType, status: TransactionStatus) -> Transaction {
        Transaction {
            id: date.into(),
            date: date.into(),
            amount,
            description: "test".into(),
            transaction_type: t,
            account_id: "1".into(),
            category_id: "1".into(),
            cost_center_id: None,
            partner_id: None,
            notes: None,
            status,
        }
    }

    #[test]
    fn test_cashflow_by_month() {
        use TransactionStatus::Completed;
        let data = vec![
            tx("2025-02-10", 10.0, TransactionType::Expense, Completed),
            tx("2025-01-15", 1000.0, TransactionType::Income, Completed),
            tx("2025-01-20", 50.0, TransactionType::Expense, Completed),
            tx("2025-01-21", 500.0, TransactionType::Transfer, Completed),
        ];
        let report = get_cashflow(&data, 100.0);
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[0].month, "2025-01");
        assert_eq!(report.months[0].net, 950.0);
        assert_eq!(report.months[0].running_balance, 1050.0);
        assert_eq!(report.months[1].expense, 10.0);
        assert_eq!(report.months[1].running_balance, 1040.0);
        assert_eq!(report.summary.total_income, 1000.0);
        assert_eq!(report.summary.total_expense, 60.0);
        assert_eq!(report.summary.net, 940.0);
        assert_eq!(report.summary.ending_balance, 1040.0);
    }

    #[test]
    fn test_cashflow_skips_pending_and_bad_dates() {
        let data = vec![
            tx("2025-03-01", 75.0, TransactionType::Expense, TransactionStatus::Pending),
            tx("03/01/2025", 20.0, TransactionType::Income, TransactionStatus::Completed),
        ];
        let report = get_cashflow(&data, 0.0);
        assert!(report.months.is_empty());
        assert_eq!(report.summary.ending_balance, 0.0);
    }

    #[test]
    fn test_seed_stats() {
        let cards = category_stats(&seed::categories());
        assert_eq!(cards[0].value, StatValue::Count(5));
        assert_eq!(cards[1].value, StatValue::Count(2));
        assert_eq!(cards[2].value, StatValue::Count(3));

        let cards = invoice_stats(&seed::invoices());
        let values: Vec<StatValue> = cards.iter().map(|c| c.value).collect();
        assert_eq!(
            values,
            vec![
                StatValue::Count(4),
                StatValue::Count(1),
                StatValue::Count(1),
                StatValue::Count(1)
            ]
        );

        let cards = partner_stats(&seed::partners());
        assert_eq!(cards[1].value, StatValue::Count(2));
        assert_eq!(cards[2].value, StatValue::Count(2));
    }

    #[test]
    fn test_account_total_balance() {
        let cards = account_stats(&seed::accounts());
        let StatValue::Money(total) = cards[0].value else {
            panic!("expected money");
        };
        assert!((total - 286749.25).abs() < 1e-6);
    }
}
