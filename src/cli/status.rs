use crate::cli::cashflow::format_cashflow;
use crate::cli::list::format_stats;
use crate::error::Result;
use crate::pages::{EntityKind, PageEntity};
use crate::reports::get_cashflow;
use crate::seed;
use crate::session::Session;
use crate::settings::settings_path;
use crate::with_entity;

/// Cash flow starts from zero; balances come only from the transactions.
pub const OPENING_BALANCE: f64 = 0.0;

pub fn run(session: &Session) -> Result<()> {
    println!("{}", format_status(session));
    Ok(())
}

pub fn format_status(session: &Session) -> String {
    let lang = session.language();
    let role = session.role().map_or("(signed out)".to_string(), |r| r.to_string());
    let client = session
        .selected_client()
        .map_or("(none)".to_string(), |c| format!("{} ({})", c.name, c.id));

    let mut out = String::new();
    out.push_str(&format!("Language:   {}\n", lang.code()));
    out.push_str(&format!("Role:       {role}\n"));
    out.push_str(&format!("Client:     {client}\n"));
    out.push_str(&format!("Settings:   {}\n", settings_path().display()));

    if !session.is_authenticated() {
        return out;
    }
    if session.requires_client_selection() {
        out.push('\n');
        out.push_str(&lang.t("common.selectClient"));
        return out;
    }

    for kind in [
        EntityKind::Categories,
        EntityKind::CostCenters,
        EntityKind::Partners,
        EntityKind::Invoices,
        EntityKind::Accounts,
    ] {
        let cards = with_entity!(kind, E => E::stats(&E::seed()));
        out.push_str(&format!("\n{:<14} {}", kind.t(lang, "title"), format_stats(lang, &cards)));
    }

    let report = get_cashflow(&seed::transactions(), OPENING_BALANCE);
    out.push_str("\n\n");
    out.push_str(&format_cashflow(lang, &report));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::models::Role;

    #[test]
    fn test_signed_out_status_is_short() {
        let text = format_status(&Session::new(Language::En));
        assert!(text.contains("(signed out)"));
        assert!(!text.contains("Cashflow"));
    }

    #[test]
    fn test_accountant_without_client_is_prompted() {
        let s = Session::new(Language::En).login(Role::Accountant);
        assert!(format_status(&s).ends_with("Select a client"));
    }

    #[test]
    fn test_client_status_has_cards_and_cashflow() {
        colored::control::set_override(false);
        let s = Session::new(Language::En).login(Role::ClientAdmin);
        let text = format_status(&s);
        assert!(text.contains("Role:       client-admin"));
        assert!(text.contains("Total Invoices: 4"));
        assert!(text.contains("Total Balance: $286,749.25"));
        assert!(text.contains("Net Cashflow"));
    }
}
