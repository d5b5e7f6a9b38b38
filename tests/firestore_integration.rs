// SPDX-License-Identifier: MIT

//! Firestore integration tests.
//!
//! These run only against the Firestore emulator
//! (`FIRESTORE_EMULATOR_HOST` must be set) and are skipped otherwise.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use fitspot_backend::models::{
    Account, AccountStats, Activity, Challenge, ChallengeUnit, Favorite, FavoriteKind,
};
use tower::ServiceExt;

mod common;

fn test_account(id: &str, email: &str) -> Account {
    Account {
        id: id.to_string(),
        first_name: "Alice".to_string(),
        last_name: "Martin".to_string(),
        email: email.to_string(),
        password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
        consent: true,
        consent_at: Some("2024-01-01T00:00:00Z".to_string()),
        policy_version: Some("v1.0".to_string()),
        is_business_user: false,
        business_owner: None,
        goals: vec![],
        badges: vec![],
        stats: AccountStats::default(),
        profile_picture: None,
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[tokio::test]
async fn test_account_round_trip_and_email_lookup() {
    require_emulator!();
    let db = common::test_db().await;

    let account = test_account("it-user-1", "it-user-1@example.com");
    db.upsert_user(&account).await.unwrap();

    let by_id = db.get_user("it-user-1").await.unwrap().unwrap();
    assert_eq!(by_id.email, "it-user-1@example.com");

    let by_email = db
        .find_user_by_email("it-user-1@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, "it-user-1");

    db.delete_user("it-user-1").await.unwrap();
    assert!(db.get_user("it-user-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_activities_scoped_to_owner() {
    require_emulator!();
    let db = common::test_db().await;

    let activity = Activity {
        id: "it-act-1".to_string(),
        user_id: "it-user-2".to_string(),
        name: "Morning run".to_string(),
        activity_type: "Run".to_string(),
        date: "2024-05-01".to_string(),
        time: None,
        duration: 1.5,
        challenge_id: None,
        created_at: "2024-05-01T07:00:00Z".to_string(),
    };
    db.upsert_activity(&activity).await.unwrap();

    let mine = db.list_activities_for_user("it-user-2").await.unwrap();
    assert!(mine.iter().any(|a| a.id == "it-act-1"));

    let theirs = db.list_activities_for_user("it-user-3").await.unwrap();
    assert!(!theirs.iter().any(|a| a.id == "it-act-1"));

    db.delete_activity("it-act-1").await.unwrap();
}

#[tokio::test]
async fn test_favorite_duplicate_lookup() {
    require_emulator!();
    let db = common::test_db().await;

    let favorite = Favorite {
        id: "it-fav-1".to_string(),
        user_id: "it-user-4".to_string(),
        item_id: "spot-42".to_string(),
        kind: FavoriteKind::Spot,
        name: "Climbing wall".to_string(),
        address: None,
        lat: None,
        lng: None,
        price: None,
        created_at: "2024-05-01T07:00:00Z".to_string(),
    };
    db.upsert_favorite(&favorite).await.unwrap();

    let found = db
        .find_favorite("it-user-4", "spot-42", "spot")
        .await
        .unwrap();
    assert!(found.is_some());

    let wrong_kind = db
        .find_favorite("it-user-4", "spot-42", "event")
        .await
        .unwrap();
    assert!(wrong_kind.is_none());

    db.delete_favorite("it-fav-1").await.unwrap();
}

fn delete_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_foreign_activity_delete_rejected_and_record_kept() {
    require_emulator!();
    let (app, state) = common::create_emulator_app().await;
    let db = &state.db;

    let owner = test_account("own-act-a", "own-act-a@example.com");
    let intruder = test_account("own-act-b", "own-act-b@example.com");
    db.upsert_user(&owner).await.unwrap();
    db.upsert_user(&intruder).await.unwrap();

    let activity = Activity {
        id: "own-act-1".to_string(),
        user_id: owner.id.clone(),
        name: "Evening ride".to_string(),
        activity_type: "Ride".to_string(),
        date: "2024-06-01".to_string(),
        time: None,
        duration: 2.0,
        challenge_id: None,
        created_at: "2024-06-01T18:00:00Z".to_string(),
    };
    db.upsert_activity(&activity).await.unwrap();

    let token = common::create_test_jwt(&state, &intruder.id);
    let response = app
        .oneshot(delete_request("/api/activities/own-act-1", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(db.get_activity("own-act-1").await.unwrap().is_some());

    db.delete_activity("own-act-1").await.unwrap();
    db.delete_user(&owner.id).await.unwrap();
    db.delete_user(&intruder.id).await.unwrap();
}

#[tokio::test]
async fn test_foreign_challenge_delete_rejected_and_record_kept() {
    require_emulator!();
    let (app, state) = common::create_emulator_app().await;
    let db = &state.db;

    let mut owner = test_account("own-chal-a", "own-chal-a@example.com");
    owner.is_business_user = true;
    let mut intruder = test_account("own-chal-b", "own-chal-b@example.com");
    intruder.is_business_user = true;
    db.upsert_user(&owner).await.unwrap();
    db.upsert_user(&intruder).await.unwrap();

    let challenge = Challenge {
        id: "own-chal-1".to_string(),
        business_id: owner.id.clone(),
        name: "June steps".to_string(),
        description: String::new(),
        goal: 100000.0,
        unit: ChallengeUnit::Steps,
        start_date: "2024-06-01".to_string(),
        end_date: "2024-06-30".to_string(),
        participants: vec![],
        progress: 0.0,
        created_at: "2024-06-01T00:00:00Z".to_string(),
    };
    db.upsert_challenge(&challenge).await.unwrap();

    let token = common::create_test_jwt(&state, &intruder.id);
    let response = app
        .oneshot(delete_request("/api/challenges/own-chal-1", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(db.get_challenge("own-chal-1").await.unwrap().is_some());

    db.delete_challenge("own-chal-1").await.unwrap();
    db.delete_user(&owner.id).await.unwrap();
    db.delete_user(&intruder.id).await.unwrap();
}

#[tokio::test]
async fn test_foreign_employee_delete_rejected_and_record_kept() {
    require_emulator!();
    let (app, state) = common::create_emulator_app().await;
    let db = &state.db;

    let mut owner = test_account("own-emp-a", "own-emp-a@example.com");
    owner.is_business_user = true;
    let mut intruder = test_account("own-emp-b", "own-emp-b@example.com");
    intruder.is_business_user = true;
    db.upsert_user(&owner).await.unwrap();
    db.upsert_user(&intruder).await.unwrap();

    let mut employee = test_account("own-emp-1", "own-emp-1@example.com");
    employee.business_owner = Some(owner.id.clone());
    db.upsert_user(&employee).await.unwrap();

    let token = common::create_test_jwt(&state, &intruder.id);
    let response = app
        .oneshot(delete_request("/api/employees/own-emp-1", &token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(db.get_user("own-emp-1").await.unwrap().is_some());

    db.delete_user("own-emp-1").await.unwrap();
    db.delete_user(&owner.id).await.unwrap();
    db.delete_user(&intruder.id).await.unwrap();
}

#[tokio::test]
async fn test_employee_listing_by_business() {
    require_emulator!();
    let db = common::test_db().await;

    let mut employee = test_account("it-emp-1", "it-emp-1@example.com");
    employee.business_owner = Some("it-biz-1".to_string());
    db.upsert_user(&employee).await.unwrap();

    let employees = db.list_employees("it-biz-1").await.unwrap();
    assert!(employees.iter().any(|e| e.id == "it-emp-1"));

    let other = db.list_employees("it-biz-2").await.unwrap();
    assert!(!other.iter().any(|e| e.id == "it-emp-1"));

    db.delete_user("it-emp-1").await.unwrap();
}
