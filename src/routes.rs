use std::fmt;

use crate::models::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Clients,
    ClientDetails(String),
    Cashflow,
    Transactions,
    Accounts,
    Categories,
    CostCenters,
    Partners,
    Invoices,
}

impl Route {
    /// Parse a path. A trailing slash is ignored; anything unknown is `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let p = match trimmed.trim_end_matches('/') {
            "" if trimmed.starts_with('/') => "/",
            other => other,
        };
        let route = match p {
            "/" => Route::Login,
            "/dashboard" => Route::Dashboard,
            "/clients" => Route::Clients,
            "/cashflow" => Route::Cashflow,
            "/transactions" => Route::Transactions,
            "/accounts" => Route::Accounts,
            "/categories" => Route::Categories,
            "/cost-centers" => Route::CostCenters,
            "/partners" => Route::Partners,
            "/invoices" => Route::Invoices,
            other => {
                let id = other.strip_prefix("/clients/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Route::ClientDetails(id.to_string())
            }
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".into(),
            Route::Dashboard => "/dashboard".into(),
            Route::Clients => "/clients".into(),
            Route::ClientDetails(id) => format!("/clients/{id}"),
            Route::Cashflow => "/cashflow".into(),
            Route::Transactions => "/transactions".into(),
            Route::Accounts => "/accounts".into(),
            Route::Categories => "/categories".into(),
            Route::CostCenters => "/cost-centers".into(),
            Route::Partners => "/partners".into(),
            Route::Invoices => "/invoices".into(),
        }
    }

    /// Translation key for the page heading.
    pub fn title_key(&self) -> &'static str {
        match self {
            Route::Login => "login.title",
            Route::Dashboard => "nav.dashboard",
            Route::Clients | Route::ClientDetails(_) => "nav.clients",
            Route::Cashflow => "nav.cashflow",
            Route::Transactions => "nav.transactions",
            Route::Accounts => "nav.accounts",
            Route::Categories => "nav.categories",
            Route::CostCenters => "nav.costCenters",
            Route::Partners => "nav.partners",
            Route::Invoices => "nav.invoices",
        }
    }

    fn accountant_only(&self) -> bool {
        matches!(self, Route::Clients | Route::ClientDetails(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(Route),
    NotFound,
}

/// Decide what `path` shows for a visitor signed in as `role` (or not signed
/// in at all).
pub fn resolve(path: &str, role: Option<Role>) -> Resolution {
    let Some(route) = Route::parse(path) else {
        tracing::debug!(%path, "no such route");
        return Resolution::NotFound;
    };
    let resolution = match (route, role) {
        (Route::Login, Some(_)) => Resolution::Redirect(Route::Dashboard),
        (Route::Login, None) => Resolution::Render(Route::Login),
        (_, None) => Resolution::Redirect(Route::Login),
        (r, Some(role)) if r.accountant_only() && role != Role::Accountant => {
            Resolution::Redirect(Route::Dashboard)
        }
        (r, Some(_)) => Resolution::Render(r),
    };
    if let Resolution::Redirect(to) = &resolution {
        tracing::debug!(%path, to = %to, "redirect");
    }
    resolution
}

/// One sidebar entry. `label` is a translation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub accountant_only: bool,
}

impl NavItem {
    pub fn route(&self) -> Option<Route> {
        Route::parse(self.path)
    }
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { path: "/dashboard", label: "nav.dashboard", accountant_only: false },
    NavItem { path: "/clients", label: "nav.clients", accountant_only: true },
    NavItem { path: "/cashflow", label: "nav.cashflow", accountant_only: false },
    NavItem { path: "/transactions", label: "nav.transactions", accountant_only: false },
    NavItem { path: "/accounts", label: "nav.accounts", accountant_only: false },
    NavItem { path: "/categories", label: "nav.categories", accountant_only: false },
    NavItem { path: "/cost-centers", label: "nav.costCenters", accountant_only: false },
    NavItem { path: "/partners", label: "nav.partners", accountant_only: false },
    NavItem { path: "/invoices", label: "nav.invoices", accountant_only: false },
];

/// The sidebar for `role`, in display order.
pub fn nav_items(role: Role) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| !item.accountant_only || role == Role::Accountant)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_redirects_when_signed_in() {
        assert_eq!(resolve("/", None), Resolution::Render(Route::Login));
        assert_eq!(
            resolve("/", Some(Role::ClientUser)),
            Resolution::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn test_signed_out_goes_to_login() {
        for path in ["/dashboard", "/invoices", "/clients", "/clients/1", "/cost-centers"] {
            assert_eq!(resolve(path, None), Resolution::Redirect(Route::Login), "{path}");
        }
    }

    #[test]
    fn test_clients_are_accountant_only() {
        assert_eq!(
            resolve("/clients", Some(Role::Accountant)),
            Resolution::Render(Route::Clients)
        );
        assert_eq!(
            resolve("/clients/2", Some(Role::ClientAdmin)),
            Resolution::Redirect(Route::Dashboard)
        );
        assert_eq!(
            resolve("/clients/2", Some(Role::Accountant)),
            Resolution::Render(Route::ClientDetails("2".into()))
        );
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(resolve("/settings", Some(Role::Accountant)), Resolution::NotFound);
        assert_eq!(resolve("/clients/1/edit", Some(Role::Accountant)), Resolution::NotFound);
        assert_eq!(resolve("dashboard", Some(Role::Accountant)), Resolution::NotFound);
    }

    #[test]
    fn test_trailing_slash_and_round_trip() {
        assert_eq!(Route::parse("/partners/"), Some(Route::Partners));
        for item in NAV_ITEMS {
            let route = item.route().unwrap();
            assert_eq!(route.path(), item.path);
        }
    }

    #[test]
    fn test_sidebar_filtered_by_role() {
        let accountant: Vec<&str> = nav_items(Role::Accountant).iter().map(|i| i.path).collect();
        assert_eq!(accountant.len(), 9);
        assert!(accountant.contains(&"/clients"));
        let client = nav_items(Role::ClientAdmin);
        assert_eq!(client.len(), 8);
        assert!(client.iter().all(|i| i.path != "/clients"));
    }
}
