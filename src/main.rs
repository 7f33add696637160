mod cli;
mod error;
mod fmt;
mod forms;
mod i18n;
mod importer;
mod models;
mod pages;
mod reports;
mod routes;
mod seed;
mod session;
mod settings;
mod store;
mod table;
mod tui;
mod upload;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cli::page::PageManager;
use cli::settings::SettingsChange;
use cli::{Cli, Commands};
use error::Result;
use settings::load_settings;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings();
    let session = cli::session(&cli, &settings)?;
    let page_size = settings.page_size;

    match cli.command {
        None => cli::dashboard::run(session, page_size),
        Some(Commands::List { entity, view, page }) => {
            cli::list::run(&session, entity, &view, page, page_size)
        }
        Some(Commands::Browse { entity }) => {
            if !cli::open_page(&session, entity)? {
                return Ok(());
            }
            with_entity!(entity, E => {
                let mut page = PageManager::<E>::new(&session, page_size);
                tui::run_view(&mut page)
            })
        }
        Some(Commands::Import { entity, file }) => cli::import::run(&session, entity, &file),
        Some(Commands::Template { entity, output }) => {
            cli::template::run(entity, output.as_deref())
        }
        Some(Commands::Export {
            entity,
            view,
            output,
        }) => cli::export::run(&session, entity, &view, output.as_deref()),
        Some(Commands::Route { path }) => cli::route::run(&session, &path),
        Some(Commands::Status) => cli::status::run(&session),
        Some(Commands::Settings {
            language,
            default_role,
            clear_role,
            page_size,
        }) => cli::settings::run(&SettingsChange {
            language,
            role: default_role,
            clear_role,
            page_size,
        }),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tesouraria", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
