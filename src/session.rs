use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::i18n::Language;
use crate::models::{ClientCompany, Role};
use crate::seed;
use crate::upload::Notice;

#[derive(Debug, Clone)]
pub struct Session {
    role: Option<Role>,
    language: Language,
    selected_client: Option<String>,
    clients: Arc<[ClientCompany]>,
}

impl Session {
    /// Signed out, no client selected, the fixed client list loaded.
    pub fn new(language: Language) -> Self {
        Self::with_clients(language, seed::clients())
    }

    pub fn with_clients(language: Language, clients: Vec<ClientCompany>) -> Self {
        Self {
            role: None,
            language,
            selected_client: None,
            clients: clients.into(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn client(&self, id: &str) -> Option<&ClientCompany> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn selected_client(&self) -> Option<&ClientCompany> {
        self.selected_client.as_deref().and_then(|id| self.client(id))
    }

    pub fn t(&self, key: &str) -> String {
        self.language.t(key)
    }

    pub fn login(&self, role: Role) -> Session {
        tracing::info!(role = %role, "logged in");
        Session {
            role: Some(role),
            ..self.clone()
        }
    }

    /// Sign out and forget the selected client. The language survives.
    pub fn logout(&self) -> (Session, Notice) {
        tracing::info!("logged out");
        let next = Session {
            role: None,
            selected_client: None,
            ..self.clone()
        };
        let notice = Notice::success(self.t("toast.loggedOut"), self.t("toast.loggedOutDesc"));
        (next, notice)
    }

    pub fn with_language(&self, language: Language) -> Session {
        Session {
            language,
            ..self.clone()
        }
    }

    /// Select a client by id, or clear the selection with `None`.
    pub fn with_selected_client(&self, id: Option<&str>) -> Result<Session> {
        if let Some(id) = id {
            if self.client(id).is_none() {
                return Err(AppError::UnknownClient(id.to_string()));
            }
        }
        Ok(Session {
            selected_client: id.map(String::from),
            ..self.clone()
        })
    }

    /// The next client in list order, wrapping around; the first client
    /// when none is selected.
    pub fn cycle_client(&self) -> Session {
        let next = match self.selected_client.as_deref() {
            None => self.clients.first(),
            Some(current) => {
                let pos = self.clients.iter().position(|c| c.id == current);
                pos.and_then(|i| self.clients.get((i + 1) % self.clients.len()))
            }
        };
        Session {
            selected_client: next.map(|c| c.id.clone()),
            ..self.clone()
        }
    }

    /// Accountants work across clients, so their pages stay empty until a
    /// client is chosen. Client roles only ever see their own company.
    pub fn requires_client_selection(&self) -> bool {
        self.role == Some(Role::Accountant) && self.selected_client().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accountant_must_pick_client() {
        let s = Session::new(Language::En).login(Role::Accountant);
        assert!(s.requires_client_selection());
        let s = s.with_selected_client(Some("2")).unwrap();
        assert!(!s.requires_client_selection());
        assert_eq!(s.selected_client().unwrap().name, "Global Industries");
    }

    #[test]
    fn test_client_roles_are_never_gated() {
        let s = Session::new(Language::En).login(Role::ClientUser);
        assert!(!s.requires_client_selection());
        assert!(!Session::new(Language::En).requires_client_selection());
    }

    #[test]
    fn test_unknown_client_rejected() {
        let s = Session::new(Language::En);
        assert!(matches!(
            s.with_selected_client(Some("99")),
            Err(AppError::UnknownClient(_))
        ));
        assert!(s.with_selected_client(None).is_ok());
    }

    #[test]
    fn test_changes_leave_original_untouched() {
        let s = Session::new(Language::En);
        let pt = s.with_language(Language::Pt);
        assert_eq!(s.language(), Language::En);
        assert_eq!(pt.t("nav.partners"), "Parceiros");
    }

    #[test]
    fn test_logout_clears_role_and_client() {
        let s = Session::new(Language::Pt)
            .login(Role::Accountant)
            .with_selected_client(Some("1"))
            .unwrap();
        let (out, notice) = s.logout();
        assert!(!out.is_authenticated());
        assert!(out.selected_client().is_none());
        assert_eq!(out.language(), Language::Pt);
        assert_eq!(notice.title, "Deslogado com sucesso");
    }

    #[test]
    fn test_cycle_client_wraps() {
        let s = Session::new(Language::En);
        let ids: Vec<String> =
            std::iter::successors(Some(s.cycle_client()), |s| Some(s.cycle_client()))
                .take(4)
                .map(|s| s.selected_client().unwrap().id.clone())
                .collect();
        assert_eq!(ids, vec!["1", "2", "3", "1"]);
    }
}
