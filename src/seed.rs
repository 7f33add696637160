use crate::models::*;

fn category(id: &str, name: &str, category_type: CategoryType, description: &str) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
        category_type,
        description: description.into(),
    }
}

pub fn categories() -> Vec<Category> {
    vec![
        category("1", "Rent", CategoryType::Expense, "Monthly rental expenses"),
        category("2", "Salaries", CategoryType::Expense, "Employee salaries"),
        category("3", "Sales Revenue", CategoryType::Income, "Income from product sales"),
        category("4", "Interest Income", CategoryType::Income, "Income from interest payments"),
        category(
            "5",
            "Marketing Expenses",
            CategoryType::Expense,
            "Expenses related to marketing activities",
        ),
    ]
}

pub fn cost_centers() -> Vec<CostCenter> {
    [
        ("1", "Marketing Department", "All marketing and advertising activities"),
        ("2", "Sales Team", "Sales operations and customer acquisition"),
        ("3", "IT Department", "Information technology and infrastructure"),
        ("4", "Human Resources", "HR operations and employee management"),
        ("5", "Finance & Accounting", "Financial operations and accounting"),
    ]
    .into_iter()
    .map(|(id, name, description)| CostCenter {
        id: id.into(),
        name: name.into(),
        description: description.into(),
    })
    .collect()
}

pub fn partners() -> Vec<Partner> {
    [
        (
            "1",
            "Acme Corporation",
            PartnerType::Supplier,
            "contact@acme.com",
            "+1-555-0123",
            "123 Business St, City, State 12345",
        ),
        (
            "2",
            "Global Tech Solutions",
            PartnerType::Customer,
            "info@globaltech.com",
            "+1-555-0456",
            "456 Tech Ave, City, State 67890",
        ),
        ("3", "Metro Consulting", PartnerType::Vendor, "hello@metro.com", "+1-555-0789", ""),
        (
            "4",
            "Digital Innovations Inc",
            PartnerType::Customer,
            "contact@digitalinc.com",
            "+1-555-0321",
            "789 Innovation Blvd, City, State 54321",
        ),
        (
            "5",
            "Office Supply Co",
            PartnerType::Supplier,
            "orders@officesupply.com",
            "+1-555-0654",
            "",
        ),
    ]
    .into_iter()
    .map(|(id, name, partner_type, email, phone, address)| Partner {
        id: id.into(),
        name: name.into(),
        partner_type,
        email: email.into(),
        phone: phone.into(),
        address: address.into(),
    })
    .collect()
}

pub fn invoices() -> Vec<Invoice> {
    [
        (
            "1",
            "INV-001",
            "2024-06-01",
            "2024-06-30",
            1500.00,
            InvoiceStatus::Paid,
            "1",
            "Consulting services",
            "Payment received on time",
        ),
        (
            "2",
            "INV-002",
            "2024-06-02",
            "2024-07-02",
            2750.50,
            InvoiceStatus::Sent,
            "2",
            "Software development",
            "",
        ),
        (
            "3",
            "INV-003",
            "2024-05-15",
            "2024-06-15",
            890.00,
            InvoiceStatus::Overdue,
            "3",
            "Design services",
            "Follow up required",
        ),
        (
            "4",
            "INV-004",
            "2024-06-03",
            "2024-07-03",
            3200.00,
            InvoiceStatus::Draft,
            "1",
            "Monthly retainer",
            "",
        ),
    ]
    .into_iter()
    .map(
        |(id, number, date, due_date, amount, status, partner_id, description, notes)| Invoice {
            id: id.into(),
            number: number.into(),
            date: date.into(),
            due_date: due_date.into(),
            amount,
            status,
            partner_id: partner_id.into(),
            description: description.into(),
            notes: notes.into(),
        },
    )
    .collect()
}

/// Category references that have no matching seeded category keep the
/// category's label; lists show the label as-is.
pub fn transactions() -> Vec<Transaction> {
    use TransactionStatus::{Completed, Pending};
    use TransactionType::{Expense, Income};
    [
        (
            "1",
            "2023-05-12",
            "Office supplies purchase",
            249.99,
            Expense,
            "Office Supplies",
            "1",
            Completed,
        ),
        ("2", "2023-05-10", "Client payment - ABC Corp", 1500.00, Income, "3", "1", Completed),
        ("3", "2023-05-08", "Monthly rent", 2000.00, Expense, "1", "1", Completed),
        ("4", "2023-05-05", "Software subscription", 49.99, Expense, "Software", "3", Completed),
        ("5", "2023-05-01", "Client retainer - XYZ Ltd", 2500.00, Income, "3", "1", Completed),
        ("6", "2023-04-28", "Marketing campaign", 750.00, Expense, "5", "3", Pending),
        ("7", "2023-04-25", "Utility bills", 312.45, Expense, "Utilities", "1", Completed),
    ]
    .into_iter()
    .map(|(id, date, description, amount, transaction_type, category_id, account_id, status)| {
        Transaction {
            id: id.into(),
            date: date.into(),
            amount,
            description: description.into(),
            transaction_type,
            account_id: account_id.into(),
            category_id: category_id.into(),
            cost_center_id: None,
            partner_id: None,
            notes: None,
            status,
        }
    })
    .collect()
}

pub fn accounts() -> Vec<Account> {
    [
        ("1", "Business Checking", AccountType::Checking, "First National Bank", 24500.00),
        ("2", "Business Savings", AccountType::Savings, "First National Bank", 85000.00),
        ("3", "Company Credit Card", AccountType::Credit, "Chase", -3250.75),
        ("4", "Investment Account", AccountType::Investment, "Vanguard", 150000.00),
        ("5", "Petty Cash", AccountType::Cash, "Office", 500.00),
        ("6", "Tax Reserve", AccountType::Savings, "First National Bank", 30000.00),
    ]
    .into_iter()
    .map(|(id, name, account_type, institution, balance)| Account {
        id: id.into(),
        name: name.into(),
        account_type,
        institution: institution.into(),
        balance,
        currency: "USD".into(),
        status: RecordStatus::Active,
    })
    .collect()
}

pub fn clients() -> Vec<ClientCompany> {
    [
        (
            "1",
            "Acme Corporation",
            "contact@acme.com",
            "+1-555-0123",
            Some("123 Business St, City, State 12345"),
            "TAX123456",
            "Technology",
            "2024-01-15",
            "Major technology client",
        ),
        (
            "2",
            "Global Industries",
            "info@global.com",
            "+1-555-0456",
            Some("456 Industrial Ave, City, State 67890"),
            "TAX789012",
            "Manufacturing",
            "2024-02-01",
            "Manufacturing company",
        ),
        (
            "3",
            "StartupXYZ",
            "hello@startupxyz.com",
            "+1-555-0789",
            None,
            "TAX345678",
            "Software",
            "2024-03-10",
            "Growing startup",
        ),
    ]
    .into_iter()
    .map(
        |(id, name, email, phone, address, tax_id, industry, created_at, notes)| ClientCompany {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            address: address.map(String::from),
            tax_id: tax_id.into(),
            industry: industry.into(),
            status: RecordStatus::Active,
            created_at: created_at.into(),
            notes: notes.into(),
        },
    )
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_sizes() {
        assert_eq!(categories().len(), 5);
        assert_eq!(cost_centers().len(), 5);
        assert_eq!(partners().len(), 5);
        assert_eq!(invoices().len(), 4);
        assert_eq!(transactions().len(), 7);
        assert_eq!(accounts().len(), 6);
        assert_eq!(clients().len(), 3);
    }

    #[test]
    fn test_seeded_partners_validate() {
        use crate::forms::{EntityForm, PartnerForm};
        for p in partners() {
            assert!(PartnerForm::edit(&p).validate().is_ok(), "{}", p.name);
        }
    }

    #[test]
    fn test_seed_is_fresh_each_call() {
        let mut first = categories();
        first.clear();
        assert_eq!(categories().len(), 5);
    }
}
