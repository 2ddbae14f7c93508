use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{day, journal_in, pl, setup_test_home, temp_out};
use piecelog::db::journal::insert_record;
use piecelog::db::pool::DbPool;
use piecelog::models::record::PersistedRecord;

fn record(id: &str, job: &str, product: &str, qty: f64, price: f64) -> PersistedRecord {
    PersistedRecord {
        record_id: id.to_string(),
        worker_code: "W01".into(),
        job_code: job.to_string(),
        product: product.to_string(),
        process: "Cut".into(),
        work_date: day(),
        quantity: qty,
        unit_price: price,
        amount: qty * price,
    }
}

/// Journal with two records on 2026-10-16 and one on 2026-10-17.
fn populate_journal(path: &str) {
    let pool = DbPool::open_journal(path).expect("open journal");
    insert_record(&pool.conn, &record("r1", "J1", "Widget", 3.0, 100.0), "2026/10/16 09:00:00")
        .expect("insert");
    insert_record(&pool.conn, &record("r2", "J5", "Gadget", 2.0, 12.5), "2026/10/16 09:05:00")
        .expect("insert");

    let mut later = record("r3", "J2", "Sprocket", 1.0, 200.0);
    later.work_date = day().succ_opt().unwrap();
    insert_record(&pool.conn, &later, "2026/10/17 08:00:00").expect("insert");
}

#[test]
fn test_init_creates_journal() {
    let home = setup_test_home("init_journal");
    let journal = journal_in(&home);

    pl(&home)
        .args(["--journal", &journal, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Journal initialized"));

    assert!(fs::metadata(&journal).is_ok());
}

#[test]
fn test_init_writes_config_file() {
    let home = setup_test_home("init_config");

    pl(&home).args(["init"]).assert().success();

    let conf = home.join(".piecelog").join("piecelog.conf");
    let content = fs::read_to_string(&conf).expect("config file");
    assert!(content.contains("timezone: Asia/Tokyo"));
    assert!(content.contains("journal:"));

    pl(&home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("store_url"))
        .stdout(contains("Asia/Tokyo"));
}

#[test]
fn test_config_print_masks_api_key() {
    let home = setup_test_home("config_mask");
    let dir = home.join(".piecelog");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("piecelog.conf"),
        "store_url: https://example.invalid/exec\napi_key: s3cret-key\n",
    )
    .unwrap();

    pl(&home)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("https://example.invalid/exec"))
        .stdout(contains("********"))
        .stdout(contains("s3cret-key").not());
}

#[test]
fn test_list_empty_journal() {
    let home = setup_test_home("list_empty");
    let journal = journal_in(&home);

    pl(&home)
        .args(["--journal", &journal, "list"])
        .assert()
        .success()
        .stdout(contains("No records in the journal."));
}

#[test]
fn test_list_shows_records_and_total() {
    let home = setup_test_home("list_records");
    let journal = journal_in(&home);
    populate_journal(&journal);

    pl(&home)
        .args(["--journal", &journal, "list"])
        .assert()
        .success()
        .stdout(contains("Widget"))
        .stdout(contains("Sprocket"))
        .stdout(contains("3 record(s), total amount 525"));

    pl(&home)
        .args(["--journal", &journal, "list", "--date", "2026-10-16"])
        .assert()
        .success()
        .stdout(contains("Gadget"))
        .stdout(contains("Sprocket").not())
        .stdout(contains("2 record(s), total amount 325"));
}

#[test]
fn test_list_rejects_bad_date() {
    let home = setup_test_home("list_bad_date");
    let journal = journal_in(&home);

    pl(&home)
        .args(["--journal", &journal, "list", "--date", "16/10/2026"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_export_csv() {
    let home = setup_test_home("export_csv");
    let journal = journal_in(&home);
    populate_journal(&journal);
    let out = temp_out("export_csv", "csv");

    pl(&home)
        .args([
            "--journal", &journal, "export", "--format", "csv", "--file", &out, "--force",
        ])
        .assert()
        .success()
        .stdout(contains("CSV export completed: 3 record(s)"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("record_id,worker_code,job_code"));
    assert!(content.contains("r1,W01,J1,Widget,Cut,2026-10-16"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn test_export_json_for_one_date() {
    let home = setup_test_home("export_json");
    let journal = journal_in(&home);
    populate_journal(&journal);
    let out = temp_out("export_json", "json");

    pl(&home)
        .args([
            "--journal", &journal, "export", "--format", "json", "--file", &out, "--date",
            "2026-10-17",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&content).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["job_code"], "J2");
    assert_eq!(rows[0]["registered_at"], "2026/10/17 08:00:00");
}

#[test]
fn test_log_print_after_init() {
    let home = setup_test_home("log_print");
    let journal = journal_in(&home);

    pl(&home)
        .args(["--journal", &journal, "--test", "init"])
        .assert()
        .success();

    pl(&home)
        .args(["--journal", &journal, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init (journal)"))
        .stdout(contains("migration_applied"));
}

#[test]
fn test_add_without_store_url_fails() {
    let home = setup_test_home("add_no_store");
    let journal = journal_in(&home);

    pl(&home)
        .args(["--journal", &journal, "add", "--job", "J1", "--worker", "W01", "--qty", "3"])
        .assert()
        .failure()
        .stderr(contains("store_url is not set"));
}

#[test]
fn test_add_rejects_bad_date_before_network() {
    let home = setup_test_home("add_bad_date");

    pl(&home)
        .args(["add", "--job", "J1", "--date", "2026-13-40", "--qty", "3"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format: 2026-13-40"));
}

#[test]
fn test_add_job_conflicts_with_product() {
    let home = setup_test_home("add_conflict");

    pl(&home)
        .args(["add", "--job", "J1", "--product", "Widget", "--qty", "3"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn test_add_scan_conflicts_with_field_picks() {
    let home = setup_test_home("add_scan_conflict");

    for field in ["--product", "--process", "--part"] {
        pl(&home)
            .args(["add", "--scan", field, "Widget", "--qty", "3"])
            .assert()
            .failure()
            .stderr(contains("cannot be used with"));
    }
}

#[test]
fn test_export_existing_file_kept_when_declined() {
    let home = setup_test_home("export_declined");
    let journal = journal_in(&home);
    populate_journal(&journal);
    let out = temp_out("export_declined", "csv");
    fs::write(&out, "previous export").unwrap();

    pl(&home)
        .args(["--journal", &journal, "export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "previous export");
}

#[test]
fn test_export_existing_file_replaced_when_confirmed() {
    let home = setup_test_home("export_confirmed");
    let journal = journal_in(&home);
    populate_journal(&journal);
    let out = temp_out("export_confirmed", "csv");
    fs::write(&out, "previous export").unwrap();

    pl(&home)
        .args(["--journal", &journal, "export", "--format", "csv", "--file", &out])
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(contains("Previous export will be replaced."))
        .stdout(contains("CSV export completed: 3 record(s)"));

    assert!(fs::read_to_string(&out).unwrap().starts_with("record_id,"));
}
