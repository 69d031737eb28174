//! Integration tests for the object code catalog repository.

mod common;

use finoffice_core::catalog::{CatalogError, LevelInput, ObjectCodeInput, parse_import};
use finoffice_db::CatalogRepository;

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_level_in_use_cannot_be_deactivated() {
    let db = common::setup().await;
    let repo = CatalogRepository::new(db);

    let level = repo
        .create_level(LevelInput {
            code: common::unique("L"),
            name: "Administration".to_string(),
            parent_id: None,
        })
        .await
        .unwrap();
    let code = repo
        .create_object_code(ObjectCodeInput {
            code: common::unique("A0"),
            head_of_account: "Pay of Staff".to_string(),
            level_id: Some(level.id),
        })
        .await
        .unwrap();

    let result = repo.deactivate_level(level.id).await;
    assert!(matches!(
        result,
        Err(CatalogError::LevelInUse {
            active_children: 0,
            active_codes: 1
        })
    ));
    let levels = repo.list_levels(false).await.unwrap();
    assert!(levels.iter().any(|l| l.id == level.id));

    repo.deactivate_object_code(code.id).await.unwrap();
    repo.deactivate_level(level.id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_code_rejected() {
    let db = common::setup().await;
    let repo = CatalogRepository::new(db.clone());
    let existing = common::object_code(&db).await;

    let result = repo
        .create_object_code(ObjectCodeInput {
            code: existing.code.clone(),
            head_of_account: "Other".to_string(),
            level_id: None,
        })
        .await;
    assert!(matches!(result, Err(CatalogError::DuplicateCode(_))));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_import_skips_existing_codes() {
    let db = common::setup().await;
    let repo = CatalogRepository::new(db.clone());
    let existing = common::object_code(&db).await;
    let fresh = common::unique("B0");

    let text = format!("{}\tAlready there\n{fresh} - Travel allowance\nnotacode\n", existing.code);
    let report = parse_import(&text);
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.issues.len(), 1);

    let outcome = repo.import_object_codes(&report, None).await.unwrap();
    assert_eq!(outcome.existing, vec![existing.code]);
    assert_eq!(outcome.created.len(), 1);
    assert_eq!(outcome.created[0].code, fresh);
    assert_eq!(outcome.created[0].head_of_account, "Travel allowance");
}
