//! Integration tests for the HTTP surface.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::NaiveDateTime;
use club_booking::adapters::records::json::JsonRecordSource;
use club_booking::adapters::records::memory::MemoryRecords;
use club_booking::domain::{Club, Competition, DATE_FORMAT};
use club_booking::http::{create_app, AppState};
use club_booking::ports::records::RecordPort;
use tower::ServiceExt;

fn date(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, DATE_FORMAT).unwrap()
}

fn records() -> MemoryRecords {
    MemoryRecords::new(
        vec![
            Club::new("Simply Lift", "john@simplylift.co", 13),
            Club::new("Iron Temple", "admin@irontemple.com", 4),
            Club::new("She Lifts", "kate@shelifts.co.uk", 12),
        ],
        vec![
            Competition::new("Spring Festival", date("2020-03-27 10:00:00"), 25),
            Competition::new("Fall Classic", date("2020-10-22 13:30:00"), 13),
            Competition::new("Summer Open", date("2999-07-14 09:00:00"), 30),
        ],
    )
}

fn setup() -> (axum::Router, MemoryRecords) {
    let records = records();
    let app = create_app(AppState::new(records.clone(), None));
    (app, records)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_index() {
    let (app, _) = setup();

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_valid_email() {
    let (app, _) = setup();

    let response = app
        .oneshot(post_form("/showSummary", "email=john%40simplylift.co"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["club"]["name"], "Simply Lift");
    assert_eq!(json["club"]["points"], 13);
    assert_eq!(json["competitions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (app, _) = setup();

    for form in ["email=invalid%40example.com", "email="] {
        let response = app
            .clone()
            .oneshot(post_form("/showSummary", form))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["message"], "No account related to this email.");
        assert_eq!(json["category"], "error");
    }
}

#[tokio::test]
async fn test_login_without_email() {
    let (app, _) = setup();

    let response = app
        .clone()
        .oneshot(post_form("/showSummary", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // No form at all
    let request = Request::builder()
        .method("POST")
        .uri("/showSummary")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_form_pages_redirect() {
    let (app, _) = setup();

    for uri in ["/showSummary", "/purchasePlaces", "/logout"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();

        assert!(response.status().is_redirection(), "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/");
    }
}

#[tokio::test]
async fn test_book_past_competition() {
    let (app, _) = setup();

    let response = app
        .oneshot(get("/book/Spring%20Festival/Simply%20Lift"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "Error: can not purchase a place for past competitions"
    );
}

#[tokio::test]
async fn test_book_future_competition() {
    let (app, _) = setup();

    let response = app
        .oneshot(get("/book/Summer%20Open/Simply%20Lift"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["competition"]["name"], "Summer Open");
    assert_eq!(json["competition"]["date"], "2999-07-14 09:00:00");
    assert_eq!(json["club"]["name"], "Simply Lift");
}

#[tokio::test]
async fn test_book_unknown() {
    let (app, _) = setup();

    let response = app
        .oneshot(get("/book/Winter%20Cup/Simply%20Lift"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_purchase_success() {
    let (app, records) = setup();

    let response = app
        .oneshot(post_form(
            "/purchasePlaces",
            "competition=Spring+Festival&club=Simply+Lift&places=3",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Great-booking complete!");
    assert_eq!(json["club"]["points"], 10);
    assert_eq!(json["competitions"][0]["numberOfPlaces"], 22);

    assert_eq!(records.ledger_total("Spring Festival").await.unwrap(), 3);
}

#[tokio::test]
async fn test_purchase_status_codes() {
    let cases = [
        ("competition=Invalid&club=Simply+Lift&places=3", StatusCode::NOT_FOUND),
        ("competition=Spring+Festival&club=Invalid&places=3", StatusCode::NOT_FOUND),
        ("club=Simply+Lift&places=3", StatusCode::NOT_FOUND),
        ("competition=Spring+Festival&club=Iron+Temple&places=20", StatusCode::FORBIDDEN),
        ("competition=Spring+Festival&club=Simply+Lift&places=-3", StatusCode::BAD_REQUEST),
        ("competition=Spring+Festival&club=Simply+Lift&places=", StatusCode::BAD_REQUEST),
        ("competition=Spring+Festival&club=Simply+Lift", StatusCode::BAD_REQUEST),
        ("competition=Spring+Festival&club=Simply+Lift&places=abc", StatusCode::BAD_REQUEST),
        ("competition=Spring+Festival&club=Simply+Lift&places=13", StatusCode::FORBIDDEN),
        ("competition=Spring+Festival&club=Simply+Lift&places=30", StatusCode::FORBIDDEN),
        ("competition=Fall+Classic&club=Simply+Lift&places=14", StatusCode::FORBIDDEN),
    ];

    for (form, expected) in cases {
        let (app, records) = setup();

        let response = app
            .oneshot(post_form("/purchasePlaces", form))
            .await
            .unwrap();

        assert_eq!(response.status(), expected, "{form}");
        // Nothing was booked
        assert_eq!(records.snapshot().unwrap(), self::records().snapshot().unwrap());
    }
}

#[tokio::test]
async fn test_purchase_insufficient_capacity() {
    let records = MemoryRecords::new(
        vec![Club::new("Simply Lift", "john@simplylift.co", 13)],
        vec![Competition::new("Fall Classic", date("2020-10-22 13:30:00"), 5)],
    );
    let app = create_app(AppState::new(records, None));

    let response = app
        .oneshot(post_form(
            "/purchasePlaces",
            "competition=Fall+Classic&club=Simply+Lift&places=6",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["competition"]["numberOfPlaces"], 5);
}

#[tokio::test]
async fn test_purchase_ledger_cap() {
    let (app, records) = setup();

    let response = app
        .clone()
        .oneshot(post_form(
            "/purchasePlaces",
            "competition=Spring+Festival&club=Simply+Lift&places=10",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Going over the cap is only a warning, and nothing is booked
    let response = app
        .clone()
        .oneshot(post_form(
            "/purchasePlaces",
            "competition=Spring+Festival&club=She+Lifts&places=3",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["message"],
        "You can't book more than 12 places for this competition."
    );
    assert_eq!(json["club"]["points"], 12);
    assert_eq!(records.ledger_total("Spring Festival").await.unwrap(), 10);

    // Reaching the cap exactly is allowed, anything after that is refused
    let response = app
        .clone()
        .oneshot(post_form(
            "/purchasePlaces",
            "competition=Spring+Festival&club=She+Lifts&places=2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let response = app
        .oneshot(post_form(
            "/purchasePlaces",
            "competition=Spring+Festival&club=Iron+Temple&places=1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(records.ledger_total("Spring Festival").await.unwrap(), 12);
}

#[tokio::test]
async fn test_purchase_persists_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let clubs_path = dir.path().join("clubs.json");
    let competitions_path = dir.path().join("competitions.json");
    std::fs::write(
        &clubs_path,
        r#"{"clubs": [{"name": "Simply Lift", "email": "john@simplylift.co", "points": "13"}]}"#,
    )
    .unwrap();
    std::fs::write(
        &competitions_path,
        r#"{"competitions": [{"name": "Spring Festival", "date": "2020-03-27 10:00:00", "numberOfPlaces": "25"}]}"#,
    )
    .unwrap();
    let source = JsonRecordSource::new(&clubs_path, &competitions_path);
    let records = source.load().await.unwrap();
    let app = create_app(AppState::new(records, Some(source)));

    let response = app
        .oneshot(post_form(
            "/purchasePlaces",
            "competition=Spring+Festival&club=Simply+Lift&places=3",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let saved: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&clubs_path).unwrap()).unwrap();
    assert_eq!(saved["clubs"][0]["points"], "10");
}

#[tokio::test]
async fn test_points_board() {
    let (app, _) = setup();

    let response = app.oneshot(get("/pointsBoard")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names = json["clubs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|club| club["name"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, ["Simply Lift", "She Lifts", "Iron Temple"]);
}

#[tokio::test]
async fn test_state_is_per_instance() {
    let (app, _) = setup();
    app.oneshot(post_form(
        "/purchasePlaces",
        "competition=Spring+Festival&club=Simply+Lift&places=3",
    ))
    .await
    .unwrap();

    // A fresh application starts from its own records
    let (_, other) = setup();
    assert_eq!(other.ledger_total("Spring Festival").await.unwrap(), 0);
}
