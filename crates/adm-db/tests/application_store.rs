//! Store adapter integration tests.
//!
//! - Intake: create/get roundtrip, aliases, blank normalization
//! - Listing: newest first
//! - Status writes: every status, strictly advancing `updated_at`
//! - Identifier validation and missing rows
//! - Durability across reopen

use adm_core::entities::NewApplication;
use adm_core::enums::ApplicationStatus;
use adm_core::errors::CoreError;
use adm_db::AdmDb;
use adm_db::error::DatabaseError;
use adm_db::service::AdmService;
use pretty_assertions::assert_eq;
use rstest::rstest;

async fn test_service() -> AdmService {
    AdmService::from_db(AdmDb::open_local(":memory:").await.unwrap())
}

fn full_submission() -> NewApplication {
    NewApplication {
        university_name: Some("University of Lagos".into()),
        full_name: Some("Chidi Okafor".into()),
        email: Some("chidi@example.com".into()),
        whatsapp: Some("+234 801 234 5678".into()),
        nationality: Some("Nigeria".into()),
        current_country: Some("Nigeria".into()),
        degree: Some("Bachelor".into()),
        majors: Some("Computer Science".into()),
        china_major_1: Some("Software Engineering".into()),
        china_major_2: Some("Data Science".into()),
        china_major_3: None,
        status: None,
    }
}

// ---------------------------------------------------------------------------
// Intake
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_after_create_returns_submitted_fields() {
    let svc = test_service().await;
    let created = svc.create_application(full_submission()).await.unwrap();
    let fetched = svc.get_application(&created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.full_name, "Chidi Okafor");
    assert_eq!(fetched.university_name.as_deref(), Some("University of Lagos"));
    assert_eq!(fetched.majors.as_deref(), Some("Computer Science"));
    assert_eq!(fetched.china_major_3, None);
    assert_eq!(fetched.status, ApplicationStatus::Submitted);
}

#[tokio::test]
async fn form_aliases_reach_the_store() {
    let svc = test_service().await;
    let body = serde_json::json!({
        "full_name": "Amina Diallo",
        "university": "Université Cheikh Anta Diop",
        "major": "Medicine",
    });
    let new: NewApplication = serde_json::from_value(body).unwrap();
    let created = svc.create_application(new).await.unwrap();
    assert_eq!(
        created.university_name.as_deref(),
        Some("Université Cheikh Anta Diop")
    );
    assert_eq!(created.majors.as_deref(), Some("Medicine"));
}

#[tokio::test]
async fn blank_optional_fields_read_back_as_absent() {
    let svc = test_service().await;
    let created = svc
        .create_application(NewApplication {
            email: Some(String::new()),
            ..full_submission()
        })
        .await
        .unwrap();
    assert_eq!(created.email, None);
}

#[tokio::test]
async fn no_dedup_on_identical_submissions() {
    let svc = test_service().await;
    let a = svc.create_application(full_submission()).await.unwrap();
    let b = svc.create_application(full_submission()).await.unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(svc.list_applications().await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_is_empty_without_rows() {
    let svc = test_service().await;
    assert!(svc.list_applications().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_newest_first() {
    let svc = test_service().await;
    let mut ids = Vec::new();
    for name in ["First", "Second", "Third"] {
        let app = svc
            .create_application(NewApplication {
                full_name: Some(name.into()),
                ..Default::default()
            })
            .await
            .unwrap();
        ids.push(app.id);
    }
    // Pin distinct creation times so ordering does not depend on the clock.
    for (i, id) in ids.iter().enumerate() {
        svc.db()
            .conn()
            .execute(
                "UPDATE applications SET created_at = ?1 WHERE id = ?2",
                libsql::params![format!("2026-03-0{}T10:00:00.000Z", i + 1), id.as_str()],
            )
            .await
            .unwrap();
    }

    let names: Vec<_> = svc
        .list_applications()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.full_name)
        .collect();
    assert_eq!(names, ["Third", "Second", "First"]);
}

// ---------------------------------------------------------------------------
// Status writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn every_status_update_strictly_advances_updated_at() {
    let svc = test_service().await;
    let mut current = svc.create_application(full_submission()).await.unwrap();

    for status in ApplicationStatus::ALL.into_iter().chain(ApplicationStatus::ALL) {
        let updated = svc
            .update_application_status(&current.id, status)
            .await
            .unwrap();
        assert_eq!(updated.status, status);
        assert!(
            updated.updated_at > current.updated_at,
            "{} should be after {}",
            updated.updated_at,
            current.updated_at
        );
        assert_eq!(updated.created_at, current.created_at);
        assert_eq!(updated.full_name, current.full_name);
        current = updated;
    }

    assert_eq!(svc.get_application(&current.id).await.unwrap(), current);
}

#[tokio::test]
async fn update_on_missing_row_is_not_found() {
    let svc = test_service().await;
    let err = svc
        .update_application_status("app-0000000000000000", ApplicationStatus::Approved)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DatabaseError::Domain(CoreError::NotFound { ref id, .. }) if id == "app-0000000000000000"
    ));
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[rstest]
#[case("")]
#[case("undefined")]
#[case("{uuid}")]
#[case("<id>")]
#[tokio::test]
async fn invalid_identifiers_are_rejected(#[case] id: &str) {
    let svc = test_service().await;
    assert!(matches!(
        svc.get_application(id).await,
        Err(DatabaseError::Domain(CoreError::InvalidIdentifier(_)))
    ));
    assert!(matches!(
        svc.update_application_status(id, ApplicationStatus::Approved)
            .await,
        Err(DatabaseError::Domain(CoreError::InvalidIdentifier(_)))
    ));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let svc = test_service().await;
    let err = svc.get_application("app-ffffffffffffffff").await.unwrap_err();
    assert!(!err.is_store_failure());
    assert!(matches!(err, DatabaseError::Domain(CoreError::NotFound { .. })));
}

// ---------------------------------------------------------------------------
// Durability
// ---------------------------------------------------------------------------

#[tokio::test]
async fn writes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admissions.db");
    let path = path.to_str().unwrap();

    let id = {
        let svc = AdmService::new_local(path).await.unwrap();
        let app = svc.create_application(full_submission()).await.unwrap();
        svc.update_application_status(&app.id, ApplicationStatus::Rejected)
            .await
            .unwrap();
        app.id
    };

    let svc = AdmService::new_local(path).await.unwrap();
    let app = svc.get_application(&id).await.unwrap();
    assert_eq!(app.status, ApplicationStatus::Rejected);
}
