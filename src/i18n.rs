use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Pt,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    pub fn toggled(&self) -> Language {
        match self {
            Language::En => Language::Pt,
            Language::Pt => Language::En,
        }
    }

    /// Look `key` up for this language. A missing key comes back unchanged.
    pub fn t(&self, key: &str) -> String {
        table(*self)
            .get(key)
            .map(|s| s.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

fn table(lang: Language) -> &'static HashMap<&'static str, &'static str> {
    static EN_TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static PT_TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match lang {
        Language::En => EN_TABLE.get_or_init(|| EN.iter().copied().collect()),
        Language::Pt => PT_TABLE.get_or_init(|| PT.iter().copied().collect()),
    }
}

const EN: &[(&str, &str)] = &[
    // Navigation
    ("nav.dashboard", "Dashboard"),
    ("nav.clients", "Clients"),
    ("nav.cashflow", "Cashflow"),
    ("nav.transactions", "Transactions"),
    ("nav.accounts", "Accounts"),
    ("nav.categories", "Categories"),
    ("nav.costCenters", "Cost Centers"),
    ("nav.partners", "Partners"),
    ("nav.invoices", "Invoices"),
    ("nav.settings", "Settings"),
    ("nav.logout", "Logout"),
    // Common
    ("common.client", "Client"),
    ("common.selectClient", "Select a client"),
    ("common.add", "Add"),
    ("common.edit", "Edit"),
    ("common.delete", "Delete"),
    ("common.cancel", "Cancel"),
    ("common.save", "Save"),
    ("common.create", "Create"),
    ("common.update", "Update"),
    ("common.name", "Name"),
    ("common.description", "Description"),
    ("common.type", "Type"),
    ("common.status", "Status"),
    ("common.actions", "Actions"),
    ("common.search", "Search"),
    ("common.filter", "Filter"),
    ("common.export", "Export"),
    ("common.import", "Import"),
    ("common.upload", "Upload CSV"),
    ("common.downloadTemplate", "Download Template"),
    ("common.noResults", "No results."),
    ("common.page", "Page {page} of {pages}"),
    ("common.records", "{count} records"),
    ("common.confirmDelete", "Delete this record? (y/n)"),
    ("common.active", "Active"),
    ("common.inactive", "Inactive"),
    // Forms
    ("form.required", "This field is required"),
    ("form.selectType", "Select type"),
    ("form.enterName", "Enter name"),
    ("form.enterDescription", "Enter description"),
    ("form.optional", "Optional"),
    // Categories
    ("categories.title", "Categories"),
    ("categories.subtitle", "Manage your income and expense categories"),
    ("categories.add", "Add Category"),
    ("categories.edit", "Edit Category"),
    ("categories.create", "Create Category"),
    ("categories.update", "Update Category"),
    ("categories.name", "Category Name"),
    ("categories.income", "Income"),
    ("categories.expense", "Expense"),
    ("categories.total", "Total Categories"),
    ("categories.incomeCount", "Income Categories"),
    ("categories.expenseCount", "Expense Categories"),
    ("categories.selectClient", "Please select a client to view categories"),
    // Cost Centers
    ("costCenters.title", "Cost Centers"),
    ("costCenters.subtitle", "Manage your cost centers"),
    ("costCenters.add", "Add Cost Center"),
    ("costCenters.edit", "Edit Cost Center"),
    ("costCenters.create", "Create Cost Center"),
    ("costCenters.update", "Update Cost Center"),
    ("costCenters.name", "Cost Center Name"),
    ("costCenters.total", "Total Cost Centers"),
    ("costCenters.active", "Active"),
    ("costCenters.inactive", "Inactive"),
    ("costCenters.selectClient", "Please select a client to view cost centers"),
    // Partners
    ("partners.title", "Partners"),
    ("partners.subtitle", "Manage your business partners"),
    ("partners.add", "Add Partner"),
    ("partners.edit", "Edit Partner"),
    ("partners.create", "Create Partner"),
    ("partners.update", "Update Partner"),
    ("partners.name", "Partner Name"),
    ("partners.email", "Email"),
    ("partners.phone", "Phone"),
    ("partners.address", "Address"),
    ("partners.total", "Total Partners"),
    ("partners.customers", "Customers"),
    ("partners.suppliers", "Suppliers"),
    ("partners.selectClient", "Please select a client to view partners"),
    ("partners.customer", "Customer"),
    ("partners.supplier", "Supplier"),
    ("partners.vendor", "Vendor"),
    // Invoices
    ("invoices.title", "Invoices"),
    ("invoices.subtitle", "Manage your invoices"),
    ("invoices.add", "Add Invoice"),
    ("invoices.edit", "Edit Invoice"),
    ("invoices.create", "Create Invoice"),
    ("invoices.update", "Update Invoice"),
    ("invoices.number", "Invoice Number"),
    ("invoices.amount", "Amount"),
    ("invoices.date", "Date"),
    ("invoices.dueDate", "Due Date"),
    ("invoices.client", "Client"),
    ("invoices.partner", "Partner"),
    ("invoices.notes", "Notes"),
    ("invoices.total", "Total Invoices"),
    ("invoices.pending", "Pending"),
    ("invoices.paid", "Paid"),
    ("invoices.draft", "Draft"),
    ("invoices.sent", "Sent"),
    ("invoices.overdue", "Overdue"),
    ("invoices.selectClient", "Please select a client to view invoices"),
    // Transactions
    ("transactions.title", "Transactions"),
    ("transactions.subtitle", "Record and review your transactions"),
    ("transactions.add", "Add Transaction"),
    ("transactions.edit", "Edit Transaction"),
    ("transactions.date", "Date"),
    ("transactions.amount", "Amount"),
    ("transactions.account", "Account"),
    ("transactions.category", "Category"),
    ("transactions.costCenter", "Cost Center"),
    ("transactions.partner", "Partner"),
    ("transactions.notes", "Notes"),
    ("transactions.selectClient", "Please select a client to view transactions"),
    // Accounts
    ("accounts.title", "Accounts"),
    ("accounts.subtitle", "Your bank accounts and balances"),
    ("accounts.name", "Account Name"),
    ("accounts.institution", "Institution"),
    ("accounts.balance", "Balance"),
    ("accounts.currency", "Currency"),
    ("accounts.totalBalance", "Total Balance"),
    ("accounts.selectClient", "Please select a client to view accounts"),
    // Clients
    ("clients.title", "Clients"),
    ("clients.subtitle", "Manage your client companies"),
    ("clients.email", "Email"),
    ("clients.phone", "Phone"),
    ("clients.address", "Address"),
    ("clients.taxId", "Tax ID"),
    ("clients.industry", "Industry"),
    ("clients.createdAt", "Client Since"),
    ("clients.notes", "Notes"),
    ("clients.notFound", "Client not found"),
    // Cashflow
    ("cashflow.title", "Cashflow"),
    ("cashflow.subtitle", "Monthly income and expenses"),
    ("cashflow.month", "Month"),
    ("cashflow.income", "Income"),
    ("cashflow.expense", "Expenses"),
    ("cashflow.net", "Net"),
    ("cashflow.balance", "Balance"),
    ("cashflow.totalIncome", "Total Income"),
    ("cashflow.totalExpense", "Total Expenses"),
    ("cashflow.netCashflow", "Net Cashflow"),
    ("cashflow.startingBalance", "Starting Balance"),
    ("cashflow.endingBalance", "Ending Balance"),
    ("cashflow.selectClient", "Please select a client to view cashflow"),
    // Dashboard and login
    ("dashboard.title", "Dashboard"),
    ("dashboard.welcome", "Welcome back"),
    ("login.title", "Finance Hub"),
    ("login.subtitle", "Choose how you want to sign in"),
    ("login.accountant", "Accountant"),
    ("login.clientAdmin", "Client Admin"),
    ("login.clientUser", "Client User"),
    ("route.notFound", "Page not found"),
    // Language
    ("language.toggle", "Language"),
    ("language.english", "English"),
    ("language.portuguese", "Portuguese"),
    // Upload
    ("upload.title", "Upload CSV"),
    ("upload.prompt", "Path to a CSV file"),
    ("upload.notCsv", "Please upload a CSV file"),
    ("upload.noFile", "Select a CSV file first"),
    ("upload.failed", "Failed to process the CSV file. Please check the format."),
    ("upload.processed", "CSV File Processed"),
    ("upload.processedDesc", "{count} records were successfully processed."),
    ("upload.errorTitle", "Error Processing File"),
    (
        "upload.errorDesc",
        "There was an error processing your CSV file. Please check the format and try again.",
    ),
    // Toast messages
    ("toast.loggedOut", "Logged out successfully"),
    ("toast.loggedOutDesc", "You have been logged out of your account."),
    ("toast.created", "Record created"),
    ("toast.updated", "Record updated"),
    ("toast.deleted", "Record deleted"),
    ("toast.imported", "{count} records imported, {rejected} rejected"),
];

const PT: &[(&str, &str)] = &[
    // Navigation
    ("nav.dashboard", "Painel"),
    ("nav.clients", "Clientes"),
    ("nav.cashflow", "Fluxo de Caixa"),
    ("nav.transactions", "Transações"),
    ("nav.accounts", "Contas"),
    ("nav.categories", "Categorias"),
    ("nav.costCenters", "Centros de Custo"),
    ("nav.partners", "Parceiros"),
    ("nav.invoices", "Faturas"),
    ("nav.settings", "Configurações"),
    ("nav.logout", "Sair"),
    // Common
    ("common.client", "Cliente"),
    ("common.selectClient", "Selecionar um cliente"),
    ("common.add", "Adicionar"),
    ("common.edit", "Editar"),
    ("common.delete", "Excluir"),
    ("common.cancel", "Cancelar"),
    ("common.save", "Salvar"),
    ("common.create", "Criar"),
    ("common.update", "Atualizar"),
    ("common.name", "Nome"),
    ("common.description", "Descrição"),
    ("common.type", "Tipo"),
    ("common.status", "Status"),
    ("common.actions", "Ações"),
    ("common.search", "Pesquisar"),
    ("common.filter", "Filtrar"),
    ("common.export", "Exportar"),
    ("common.import", "Importar"),
    ("common.upload", "Carregar CSV"),
    ("common.downloadTemplate", "Baixar Modelo"),
    ("common.noResults", "Nenhum resultado."),
    ("common.page", "Página {page} de {pages}"),
    ("common.records", "{count} registros"),
    ("common.confirmDelete", "Excluir este registro? (s/n)"),
    ("common.active", "Ativo"),
    ("common.inactive", "Inativo"),
    // Forms
    ("form.required", "Este campo é obrigatório"),
    ("form.selectType", "Selecionar tipo"),
    ("form.enterName", "Digite o nome"),
    ("form.enterDescription", "Digite a descrição"),
    ("form.optional", "Opcional"),
    // Categories
    ("categories.title", "Categorias"),
    ("categories.subtitle", "Gerencie suas categorias de receita e despesa"),
    ("categories.add", "Adicionar Categoria"),
    ("categories.edit", "Editar Categoria"),
    ("categories.create", "Criar Categoria"),
    ("categories.update", "Atualizar Categoria"),
    ("categories.name", "Nome da Categoria"),
    ("categories.income", "Receita"),
    ("categories.expense", "Despesa"),
    ("categories.total", "Total de Categorias"),
    ("categories.incomeCount", "Categorias de Receita"),
    ("categories.expenseCount", "Categorias de Despesa"),
    ("categories.selectClient", "Por favor, selecione um cliente para ver as categorias"),
    // Cost Centers
    ("costCenters.title", "Centros de Custo"),
    ("costCenters.subtitle", "Gerencie seus centros de custo"),
    ("costCenters.add", "Adicionar Centro de Custo"),
    ("costCenters.edit", "Editar Centro de Custo"),
    ("costCenters.create", "Criar Centro de Custo"),
    ("costCenters.update", "Atualizar Centro de Custo"),
    ("costCenters.name", "Nome do Centro de Custo"),
    ("costCenters.total", "Total de Centros de Custo"),
    ("costCenters.active", "Ativo"),
    ("costCenters.inactive", "Inativo"),
    (
        "costCenters.selectClient",
        "Por favor, selecione um cliente para ver os centros de custo",
    ),
    // Partners
    ("partners.title", "Parceiros"),
    ("partners.subtitle", "Gerencie seus parceiros de negócios"),
    ("partners.add", "Adicionar Parceiro"),
    ("partners.edit", "Editar Parceiro"),
    ("partners.create", "Criar Parceiro"),
    ("partners.update", "Atualizar Parceiro"),
    ("partners.name", "Nome do Parceiro"),
    ("partners.email", "Email"),
    ("partners.phone", "Telefone"),
    ("partners.address", "Endereço"),
    ("partners.total", "Total de Parceiros"),
    ("partners.customers", "Clientes"),
    ("partners.suppliers", "Fornecedores"),
    ("partners.selectClient", "Por favor, selecione um cliente para ver os parceiros"),
    ("partners.customer", "Cliente"),
    ("partners.supplier", "Fornecedor"),
    ("partners.vendor", "Prestador"),
    // Invoices
    ("invoices.title", "Faturas"),
    ("invoices.subtitle", "Gerencie suas faturas"),
    ("invoices.add", "Adicionar Fatura"),
    ("invoices.edit", "Editar Fatura"),
    ("invoices.create", "Criar Fatura"),
    ("invoices.update", "Atualizar Fatura"),
    ("invoices.number", "Número da Fatura"),
    ("invoices.amount", "Valor"),
    ("invoices.date", "Data"),
    ("invoices.dueDate", "Data de Vencimento"),
    ("invoices.client", "Cliente"),
    ("invoices.partner", "Parceiro"),
    ("invoices.notes", "Observações"),
    ("invoices.total", "Total de Faturas"),
    ("invoices.pending", "Pendente"),
    ("invoices.paid", "Pago"),
    ("invoices.draft", "Rascunho"),
    ("invoices.sent", "Enviada"),
    ("invoices.overdue", "Vencido"),
    ("invoices.selectClient", "Por favor, selecione um cliente para ver as faturas"),
    // Transactions
    ("transactions.title", "Transações"),
    ("transactions.subtitle", "Registre e revise suas transações"),
    ("transactions.add", "Adicionar Transação"),
    ("transactions.edit", "Editar Transação"),
    ("transactions.date", "Data"),
    ("transactions.amount", "Valor"),
    ("transactions.account", "Conta"),
    ("transactions.category", "Categoria"),
    ("transactions.costCenter", "Centro de Custo"),
    ("transactions.partner", "Parceiro"),
    ("transactions.notes", "Observações"),
    (
        "transactions.selectClient",
        "Por favor, selecione um cliente para ver as transações",
    ),
    // Accounts
    ("accounts.title", "Contas"),
    ("accounts.subtitle", "Suas contas bancárias e saldos"),
    ("accounts.name", "Nome da Conta"),
    ("accounts.institution", "Instituição"),
    ("accounts.balance", "Saldo"),
    ("accounts.currency", "Moeda"),
    ("accounts.totalBalance", "Saldo Total"),
    ("accounts.selectClient", "Por favor, selecione um cliente para ver as contas"),
    // Clients
    ("clients.title", "Clientes"),
    ("clients.subtitle", "Gerencie suas empresas clientes"),
    ("clients.email", "Email"),
    ("clients.phone", "Telefone"),
    ("clients.address", "Endereço"),
    ("clients.taxId", "CNPJ"),
    ("clients.industry", "Setor"),
    ("clients.createdAt", "Cliente desde"),
    ("clients.notes", "Observações"),
    ("clients.notFound", "Cliente não encontrado"),
    // Cashflow
    ("cashflow.title", "Fluxo de Caixa"),
    ("cashflow.subtitle", "Receitas e despesas mensais"),
    ("cashflow.month", "Mês"),
    ("cashflow.income", "Receitas"),
    ("cashflow.expense", "Despesas"),
    ("cashflow.net", "Líquido"),
    ("cashflow.balance", "Saldo"),
    ("cashflow.totalIncome", "Receita Total"),
    ("cashflow.totalExpense", "Despesa Total"),
    ("cashflow.netCashflow", "Fluxo Líquido"),
    ("cashflow.startingBalance", "Saldo Inicial"),
    ("cashflow.endingBalance", "Saldo Final"),
    (
        "cashflow.selectClient",
        "Por favor, selecione um cliente para ver o fluxo de caixa",
    ),
    // Dashboard and login
    ("dashboard.title", "Painel"),
    ("dashboard.welcome", "Bem-vindo de volta"),
    ("login.title", "Finance Hub"),
    ("login.subtitle", "Escolha como deseja entrar"),
    ("login.accountant", "Contador"),
    ("login.clientAdmin", "Administrador do Cliente"),
    ("login.clientUser", "Usuário do Cliente"),
    ("route.notFound", "Página não encontrada"),
    // Language
    ("language.toggle", "Idioma"),
    ("language.english", "Inglês"),
    ("language.portuguese", "Português"),
    // Upload
    ("upload.title", "Carregar CSV"),
    ("upload.prompt", "Caminho para um arquivo CSV"),
    ("upload.notCsv", "Por favor, carregue um arquivo CSV"),
    ("upload.noFile", "Selecione um arquivo CSV primeiro"),
    ("upload.failed", "Falha ao processar o arquivo CSV. Verifique o formato."),
    ("upload.processed", "Arquivo CSV processado"),
    ("upload.processedDesc", "{count} registros foram processados com sucesso."),
    ("upload.errorTitle", "Erro ao processar arquivo"),
    (
        "upload.errorDesc",
        "Houve um erro ao processar seu arquivo CSV. Verifique o formato e tente novamente.",
    ),
    // Toast messages
    ("toast.loggedOut", "Deslogado com sucesso"),
    ("toast.loggedOutDesc", "Você foi deslogado da sua conta."),
    ("toast.created", "Registro criado"),
    ("toast.updated", "Registro atualizado"),
    ("toast.deleted", "Registro excluído"),
    ("toast.imported", "{count} registros importados, {rejected} rejeitados"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_returns_key() {
        assert_eq!(Language::En.t("nonexistent.key"), "nonexistent.key");
        assert_eq!(Language::Pt.t("nonexistent.key"), "nonexistent.key");
        assert_eq!(Language::En.t(""), "");
    }

    #[test]
    fn test_lookup_per_language() {
        assert_eq!(Language::En.t("nav.cashflow"), "Cashflow");
        assert_eq!(Language::Pt.t("nav.cashflow"), "Fluxo de Caixa");
        assert_eq!(Language::Pt.t("toast.loggedOut"), "Deslogado com sucesso");
    }

    #[test]
    fn test_both_tables_share_keys() {
        let en: Vec<&str> = EN.iter().map(|(k, _)| *k).collect();
        let pt: Vec<&str> = PT.iter().map(|(k, _)| *k).collect();
        assert_eq!(en, pt);
        assert_eq!(table(Language::En).len(), EN.len());
    }

    #[test]
    fn test_toggle_and_serde() {
        assert_eq!(Language::En.toggled(), Language::Pt);
        assert_eq!(serde_json::to_string(&Language::Pt).unwrap(), "\"pt\"");
        assert_eq!(Language::default(), Language::En);
    }
}
