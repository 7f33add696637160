use crate::error::{AppError, Result};
use crate::pages::client_details;
use crate::routes::{nav_items, resolve, Resolution, Route};
use crate::session::Session;

pub fn run(session: &Session, path: &str) -> Result<()> {
    println!("{}", describe(session, path)?);
    Ok(())
}

/// What `path` shows for this session: the page heading and sidebar, the
/// redirect target, or a not-found error.
pub fn describe(session: &Session, path: &str) -> Result<String> {
    let lang = session.language();
    let route = match resolve(path, session.role()) {
        Resolution::NotFound => {
            return Err(AppError::Other(format!("{} ({path})", lang.t("route.notFound"))))
        }
        Resolution::Redirect(to) => return Ok(format!("{path} -> {to}")),
        Resolution::Render(route) => route,
    };

    let mut out = format!("{} {}", route.path(), lang.t(route.title_key()));
    if let Route::ClientDetails(id) = &route {
        let client = session
            .client(id)
            .ok_or_else(|| AppError::Other(format!("{} ({id})", lang.t("clients.notFound"))))?;
        for (label, value) in client_details(client, lang) {
            out.push_str(&format!("\n  {label:<14} {value}"));
        }
    }

    if let Some(role) = session.role() {
        out.push('\n');
        for item in nav_items(role) {
            let current = item.route().is_some_and(|r| r.title_key() == route.title_key());
            let marker = if current { ">" } else { " " };
            out.push_str(&format!("\n {marker} {:<14} {}", lang.t(item.label), item.path));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::models::Role;

    #[test]
    fn test_signed_out_redirects() {
        let s = Session::new(Language::En);
        assert_eq!(describe(&s, "/invoices").unwrap(), "/invoices -> /");
    }

    #[test]
    fn test_client_details_and_sidebar() {
        let s = Session::new(Language::En).login(Role::Accountant);
        let text = describe(&s, "/clients/2").unwrap();
        assert!(text.starts_with("/clients/2 Clients"));
        assert!(text.contains("Global Industries"));
        assert!(text.contains("> Clients"));

        let err = describe(&s, "/clients/42").unwrap_err();
        assert!(err.to_string().contains("Client not found"));
    }

    #[test]
    fn test_client_roles_lose_clients_entry() {
        let s = Session::new(Language::Pt).login(Role::ClientAdmin);
        assert_eq!(describe(&s, "/clients").unwrap(), "/clients -> /dashboard");
        let text = describe(&s, "/partners/").unwrap();
        assert!(text.starts_with("/partners Parceiros"));
        assert!(!text.contains("/clients"));
        assert!(describe(&s, "/settings").is_err());
    }
}
