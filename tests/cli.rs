use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with its settings pointed at an empty temp directory, so no
/// saved role or language leaks in from the machine running the tests.
fn tesouraria(config: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tesouraria").expect("bin");
    cmd.env("TESOURARIA_CONFIG_DIR", config.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn list_shows_first_page_with_cards() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["--role", "client-admin", "list", "categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Categories"))
        .stdout(predicate::str::contains("Total Categories: 5"))
        .stdout(predicate::str::contains("Interest Income"))
        .stdout(predicate::str::contains("Page 1 of 1  (5 records)"));
}

#[test]
fn list_search_with_no_match_shows_empty_state() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["--role", "client-user", "list", "partners", "--search", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results."));
}

#[test]
fn list_rejects_unknown_sort_column() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["--role", "client-user", "list", "categories", "--sort", "budget"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown column 'budget'"));
}

#[test]
fn signed_out_pages_are_refused() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["list", "invoices"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires signing in"));
}

#[test]
fn accountant_is_asked_for_a_client() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["--role", "accountant", "list", "invoices"])
        .assert()
        .success()
        .stdout(predicate::str::contains("select a client to view invoices"));

    tesouraria(&config)
        .args(["--role", "accountant", "--client", "2", "list", "invoices"])
        .assert()
        .success()
        .stdout(predicate::str::contains("INV-001"));
}

#[test]
fn unknown_entity_is_a_usage_error() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["--role", "client-user", "list", "budgets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'budgets'"));
}

#[test]
fn import_reports_added_and_rejected_rows() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("categories.csv");
    fs::write(
        &path,
        "Name,Type,Description\nTravel,expense,Trips\nBonus,windfall,\n",
    )
    .unwrap();

    tesouraria(&config)
        .args(["--role", "client-admin", "import", "categories"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("categories.csv (0.06 KB)"))
        .stdout(predicate::str::contains("CSV File Processed"))
        .stdout(predicate::str::contains("1 records imported, 1 rejected"))
        .stdout(predicate::str::contains("row 2:"))
        .stdout(predicate::str::contains("Categories: 6"));
}

#[test]
fn import_rejects_non_csv_file() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "name\nx\n").unwrap();

    tesouraria(&config)
        .args(["--role", "client-admin", "import", "partners"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error Processing File"))
        .stderr(predicate::str::contains("Please upload a CSV file"));
}

#[test]
fn read_only_pages_cannot_import() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["template", "accounts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be imported"));
}

#[test]
fn template_prints_header_row() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["template", "categories"])
        .assert()
        .success()
        .stdout("name,type,description\n");
}

#[test]
fn export_writes_sorted_filtered_rows() {
    let config = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("centers.csv");

    tesouraria(&config)
        .args([
            "--role",
            "client-admin",
            "export",
            "cost-centers",
            "--sort",
            "name",
            "--desc",
            "--output",
        ])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 5 rows"));

    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("name,description"));
    assert!(lines.next().unwrap().starts_with("Sales Team,"));
}

#[test]
fn route_resolves_and_redirects() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["--role", "accountant", "route", "/clients/3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("StartupXYZ"))
        .stdout(predicate::str::contains("> Clients"));

    tesouraria(&config)
        .args(["--role", "client-user", "route", "/clients"])
        .assert()
        .success()
        .stdout("/clients -> /dashboard\n");

    tesouraria(&config)
        .args(["--role", "client-user", "route", "/reports"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Page not found"));
}

#[test]
fn status_in_portuguese() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["--lang", "pt", "--role", "client-admin", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Language:   pt"))
        .stdout(predicate::str::contains("Fluxo de Caixa"));
}

#[test]
fn settings_are_saved_and_used() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["settings", "--language", "pt", "--default-role", "client-user", "--page-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Role:       client-user"));
    assert!(config.path().join("settings.json").exists());

    tesouraria(&config)
        .args(["list", "categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Categorias"))
        .stdout(predicate::str::contains("1 de 3"));

    tesouraria(&config)
        .args(["settings", "--page-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page size must be at least 1"));
}

#[test]
fn unknown_client_flag_fails() {
    let config = TempDir::new().unwrap();
    tesouraria(&config)
        .args(["--role", "accountant", "--client", "42", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown client: 42"));
}
