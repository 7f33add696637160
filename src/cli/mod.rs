pub mod cashflow;
pub mod dashboard;
pub mod export;
pub mod import;
pub mod list;
pub mod page;
pub mod route;
pub mod settings;
pub mod status;
pub mod template;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::error::{AppError, Result};
use crate::i18n::Language;
use crate::models::Role;
use crate::pages::EntityKind;
use crate::routes::{resolve, Resolution, Route};
use crate::session::Session;
use crate::settings::Settings;
use crate::table::{DataTable, SortDirection};
use crate::upload::{Notice, NoticeLevel};

#[derive(Parser)]
#[command(
    name = "tesouraria",
    version,
    about = "Finance back-office for accountants and their clients."
)]
pub struct Cli {
    /// Interface language (default: saved setting)
    #[arg(long, global = true, value_enum)]
    pub lang: Option<Language>,
    /// Sign in as this role (default: saved setting)
    #[arg(long, global = true, value_enum)]
    pub role: Option<Role>,
    /// Work on this client's books (client id)
    #[arg(long, global = true)]
    pub client: Option<String>,
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of a list.
    List {
        entity: EntityKind,
        #[command(flatten)]
        view: ViewArgs,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Open one list page interactively.
    Browse { entity: EntityKind },
    /// Import records from a CSV file.
    Import {
        entity: EntityKind,
        /// Path to a .csv file
        file: PathBuf,
    },
    /// Write the CSV header template for an importable list.
    Template {
        entity: EntityKind,
        /// Output path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Export the filtered, sorted list to CSV.
    Export {
        entity: EntityKind,
        #[command(flatten)]
        view: ViewArgs,
        /// Output path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Resolve a navigable path, e.g. /clients/2.
    Route { path: String },
    /// Show the session, summary cards, and cash flow.
    Status,
    /// Show or change saved defaults.
    Settings {
        /// Default interface language
        #[arg(long, value_enum)]
        language: Option<Language>,
        /// Role to sign in as when --role is not given
        #[arg(long = "default-role", value_enum)]
        default_role: Option<Role>,
        /// Forget the saved role
        #[arg(long = "clear-role", conflicts_with = "default_role")]
        clear_role: bool,
        /// Rows per page
        #[arg(long = "page-size")]
        page_size: Option<usize>,
    },
    /// Print shell completions.
    Completions { shell: clap_complete::Shell },
}

/// Search and sort flags shared by `list` and `export`.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ViewArgs {
    /// Filter on the page's search column
    #[arg(long)]
    pub search: Option<String>,
    /// Sort by this column key
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

impl ViewArgs {
    /// Apply search and sort to `table`. An unknown column is an error rather
    /// than a silent no-op.
    pub fn apply<T>(&self, table: &mut DataTable<T>) -> Result<()> {
        if let Some(text) = &self.search {
            table.set_search(text);
        }
        if let Some(key) = &self.sort {
            let known: Vec<&str> = table
                .columns()
                .iter()
                .map(|c| c.key)
                .collect();
            if !known.contains(&key.as_str()) {
                return Err(AppError::Other(format!(
                    "unknown column '{key}' (expected one of: {})",
                    known.join(", ")
                )));
            }
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            table.set_sort(key, direction);
        }
        Ok(())
    }
}

/// Build the session for this run: flags first, then saved settings.
pub fn session(cli: &Cli, settings: &Settings) -> Result<Session> {
    let mut session = Session::new(cli.lang.unwrap_or(settings.language));
    if let Some(role) = cli.role.or(settings.role) {
        session = session.login(role);
    }
    if let Some(id) = cli.client.as_deref() {
        session = session.with_selected_client(Some(id))?;
    }
    Ok(session)
}

/// Check that `kind`'s page is reachable for this session. Returns false,
/// after printing the prompt, while an accountant still has to pick a client.
pub(crate) fn open_page(session: &Session, kind: EntityKind) -> Result<bool> {
    let path = kind.route().path();
    match resolve(&path, session.role()) {
        Resolution::Render(_) => {}
        Resolution::Redirect(Route::Login) => {
            return Err(AppError::Access(format!(
                "{path} requires signing in (pass --role)"
            )))
        }
        Resolution::Redirect(_) | Resolution::NotFound => {
            return Err(AppError::Access(format!(
                "{path} is only available to accountants"
            )))
        }
    }
    if kind.needs_client() && session.requires_client_selection() {
        println!("{}", kind.t(session.language(), "selectClient"));
        return Ok(false);
    }
    Ok(true)
}

pub(crate) fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => {
            println!("{}", notice.title.green().bold());
            println!("{}", notice.description);
        }
        NoticeLevel::Error => {
            eprintln!("{}", notice.title.red().bold());
            eprintln!("{}", notice.description);
        }
    }
}
