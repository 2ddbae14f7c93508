mod common;
use common::{MemoryStore, day, sample_catalog};
use piecelog::core::catalog::Catalog;
use piecelog::core::session::{Input, Session};
use piecelog::errors::AppError;
use piecelog::models::work_item::WorkItemRecord;
use piecelog::models::worker::WorkerRecord;

fn widget_only_session() -> Session {
    let catalog = Catalog::new(
        vec![WorkerRecord::new("W01", "Sato")],
        vec![WorkItemRecord::new("J1", "Widget", "Cut", "", 100.0)],
    );
    Session::new(catalog, day())
}

#[tokio::test]
async fn test_pick_fields_enter_quantity_submit() {
    let store = MemoryStore::default();
    let mut s = widget_only_session();

    s.apply(Input::Worker("W01".into())).unwrap();
    s.apply(Input::Product("Widget".into())).unwrap();
    assert!(s.draft().job_code.is_empty());
    s.apply(Input::Process("Cut".into())).unwrap();

    assert_eq!(s.draft().job_code, "J1");
    assert_eq!(s.draft().unit_price, 100.0);

    s.apply(Input::Quantity("3".into())).unwrap();
    assert_eq!(s.draft().amount, 300.0);

    let record = s.submit(&store).await.unwrap().unwrap();
    assert_eq!(record.job_code, "J1");
    assert_eq!(record.quantity, 3.0);
    assert_eq!(record.unit_price, 100.0);
    assert_eq!(record.amount, 300.0);
    assert_eq!(store.records().len(), 1);

    let notice = s.notice().unwrap();
    assert!(notice.contains("2026-10-16 / Widget / Cut / qty: 3"));
}

#[tokio::test]
async fn test_submit_resets_for_next_entry() {
    let store = MemoryStore::default();
    let mut s = Session::new(sample_catalog(), day());

    s.apply(Input::Worker("W02".into())).unwrap();
    s.apply(Input::JobCode("J2".into())).unwrap();
    s.apply(Input::Quantity("4".into())).unwrap();
    let before = s.draft().clone();

    s.submit(&store).await.unwrap().unwrap();

    let after = s.draft();
    assert_eq!(after.worker_code, "W02");
    assert_eq!(after.work_date, before.work_date);
    assert_ne!(after.record_id, before.record_id);
    assert!(!after.record_id.is_empty());
    assert!(after.job_code.is_empty());
    assert!(after.product.is_empty());
    assert!(after.process.is_empty());
    assert!(after.part_no.is_empty());
    assert!(after.quantity.is_empty());
    assert_eq!(after.unit_price, 0.0);
    assert_eq!(after.amount, 0.0);
}

#[tokio::test]
async fn test_store_failure_keeps_draft() {
    let store = MemoryStore {
        fail_write: Some("quota exceeded".into()),
        ..Default::default()
    };
    let mut s = Session::new(sample_catalog(), day());
    s.apply(Input::Worker("W01".into())).unwrap();
    s.apply(Input::JobCode("J5".into())).unwrap();
    s.apply(Input::Quantity("2".into())).unwrap();
    let before = s.draft().clone();

    let err = s.submit(&store).await.unwrap_err();

    assert!(matches!(err, AppError::Store(_)));
    assert_eq!(s.error(), Some("quota exceeded"));
    assert_eq!(s.draft(), &before);
    assert!(!s.submitter().is_submitting());
}

#[tokio::test]
async fn test_validation_failure_sets_error() {
    let store = MemoryStore::default();
    let mut s = Session::new(sample_catalog(), day());
    s.apply(Input::JobCode("J1".into())).unwrap();
    s.apply(Input::Quantity("5".into())).unwrap();

    assert!(s.submit(&store).await.is_err());
    assert_eq!(s.error(), Some("Worker code is required."));
    assert_eq!(store.calls(), 0);
}

#[test]
fn test_fields_locked_while_job_code_present() {
    let mut s = Session::new(sample_catalog(), day());
    s.apply(Input::JobCode("J1".into())).unwrap();

    let err = s.apply(Input::Product("Gadget".into())).unwrap_err();
    assert!(matches!(err, AppError::FieldLocked("product")));
    assert!(s.error().is_some());
    assert_eq!(s.draft().product, "Widget");

    assert!(s.apply(Input::Process("Paint".into())).is_err());
    assert!(s.apply(Input::PartNo("A".into())).is_err());
    assert_eq!(s.draft().job_code, "J1");
}

#[test]
fn test_clearing_code_reenables_fields_lookup() {
    let mut s = Session::new(sample_catalog(), day());
    s.apply(Input::JobCode("J2".into())).unwrap();
    assert_eq!(s.draft().part_no, "A");

    // product/process/part still name J2's row, so the lookup finds it again
    s.apply(Input::ClearJobCode).unwrap();
    assert_eq!(s.draft().job_code, "J2");
    assert_eq!(s.draft().unit_price, 200.0);
}

#[test]
fn test_unknown_code_then_valid_code_clears_error() {
    let mut s = Session::new(sample_catalog(), day());
    s.apply(Input::Quantity("10".into())).unwrap();

    assert!(s.apply(Input::JobCode("J404".into())).is_err());
    assert!(s.error().unwrap().contains("J404"));
    assert_eq!(s.draft().unit_price, 0.0);
    assert_eq!(s.draft().amount, 0.0);

    s.apply(Input::JobCode("J5".into())).unwrap();
    assert_eq!(s.error(), None);
    assert_eq!(s.draft().amount, 125.0);
}

#[test]
fn test_scanned_text_is_trimmed_job_code() {
    let mut s = Session::new(sample_catalog(), day());
    s.apply(Input::Scanned("  J3\r\n".into())).unwrap();

    assert_eq!(s.draft().job_code, "J3");
    assert_eq!(s.draft().product, "Widget");
    assert_eq!(s.draft().part_no, "B");
}

#[test]
fn test_part_before_process_selects_that_part() {
    let mut s = Session::new(sample_catalog(), day());
    s.apply(Input::Product("Widget".into())).unwrap();
    s.apply(Input::PartNo("C".into())).unwrap();
    s.apply(Input::Process("Fold".into())).unwrap();

    assert_eq!(s.draft().job_code, "J4");
    assert_eq!(s.draft().unit_price, 60.0);
}

#[test]
fn test_reset_keeps_worker_and_date() {
    let mut s = Session::new(sample_catalog(), day());
    s.apply(Input::Worker("W01".into())).unwrap();
    s.apply(Input::JobCode("J1".into())).unwrap();
    let id = s.draft().record_id.clone();

    s.apply(Input::Reset).unwrap();

    assert_eq!(s.draft().worker_code, "W01");
    assert_eq!(s.draft().work_date, Some(day()));
    assert!(s.draft().job_code.is_empty());
    assert_ne!(s.draft().record_id, id);
}
