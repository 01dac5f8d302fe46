//! End-to-end API tests against the real router and an in-memory store.

use asha_api::db::alerts::NewAlert;
use asha_api::{app, AppConfig, AppState, Store};
use asha_core::AlertCategory;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

const JWT_SECRET: &str = "integration-test-secret";

async fn spawn_server() -> (SocketAddr, Store) {
    let store = Store::in_memory().await.expect("in-memory store");
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        cors_origins: "*".to_string(),
    };
    let state = Arc::new(AppState {
        store: store.clone(),
        config,
    });
    let router = app(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    (addr, store)
}

async fn send_json(
    addr: SocketAddr,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> (u16, Value) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let payload = body.map(|b| b.to_string()).unwrap_or_default();
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if let Some(token) = token {
        req.push_str(&format!("Authorization: Bearer {token}\r\n"));
    }
    if body.is_some() {
        req.push_str("Content-Type: application/json\r\n");
    }
    req.push_str(&format!("Content-Length: {}\r\n\r\n", payload.len()));
    req.push_str(&payload);
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    let body = serde_json::from_str(body).unwrap_or(Value::Null);
    (status, body)
}

async fn register(addr: SocketAddr, name: &str, phone: &str, aadhaar: &str) -> (u16, Value) {
    send_json(
        addr,
        "POST",
        "/api/register",
        None,
        Some(&json!({
            "name": name,
            "phone_number": phone,
            "place": "Rampur",
            "aadhaar_number": aadhaar,
            "password": "s3cret-pass",
        })),
    )
    .await
}

async fn login(addr: SocketAddr, username: &str) -> String {
    let (status, body) = send_json(
        addr,
        "POST",
        "/api/login",
        None,
        Some(&json!({ "username": username, "password": "s3cret-pass" })),
    )
    .await;
    assert_eq!(status, 200, "login failed: {body}");
    body["access_token"]
        .as_str()
        .expect("access token")
        .to_string()
}

fn survey_payload(household: &str) -> Value {
    json!({
        "household_id": household,
        "members_list": "[{\"name\":\"Ram\",\"age\":34}]",
        "sanitation": "improved",
        "chronic_illnesses": "none",
    })
}

fn pregnancy_payload(patient: &str) -> Value {
    json!({
        "lmp": "2026-01-10",
        "edd": "2026-10-17",
        "gravida": 2,
        "para": 1,
        "anc_checkups": "[]",
        "risk_factors": "",
        "patient_name": patient,
        "patient_phone": "9876500010",
    })
}

fn vaccination_payload(child: &str) -> Value {
    json!({
        "child_name": child,
        "child_dob": "2025-11-02",
        "vaccine_schedule": "[{\"vaccine\":\"BCG\",\"given\":true}]",
        "missed_doses": "",
        "next_due": "2026-09-01",
        "parent_name": "Lakshmi",
        "parent_phone": "9876500011",
    })
}

fn pnc_payload(mother: &str) -> Value {
    json!({
        "pnc_visits": "[]",
        "mother_health": "stable",
        "baby_health": "stable",
        "counselling": "breastfeeding",
        "mother_name": mother,
        "delivery_date": "2026-07-20",
    })
}

fn leprosy_payload(patient: &str) -> Value {
    json!({
        "patient_name": patient,
        "leprosy_type": "paucibacillary",
        "treatment": "MDT started",
        "follow_ups": "[]",
        "household_contacts": "3 screened",
    })
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let (addr, _store) = spawn_server().await;
    let (status, body) = send_json(addr, "GET", "/health", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn duplicate_display_names_get_distinct_usernames() {
    let (addr, _store) = spawn_server().await;

    let (status, first) = register(addr, "Priya Sharma", "9000000001", "111122223333").await;
    assert_eq!(status, 200, "first register: {first}");
    assert_eq!(first["username"], "priyasharma");
    assert!(first.get("id").and_then(Value::as_str).is_some());
    assert!(first.get("aadhaar_number").is_none());

    let (status, second) = register(addr, "Priya Sharma", "9000000002", "111122224444").await;
    assert_eq!(status, 200, "second register: {second}");
    assert_eq!(second["username"], "priyasharma1");
}

#[tokio::test]
async fn duplicate_phone_or_aadhaar_is_rejected() {
    let (addr, _store) = spawn_server().await;
    let (status, _) = register(addr, "Anil Kumar", "9000000010", "222233334444").await;
    assert_eq!(status, 200);

    let (status, body) = register(addr, "Someone Else", "9000000010", "555566667777").await;
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Phone number already registered");

    let (status, body) = register(addr, "Someone Else", "9000000011", "222233334444").await;
    assert_eq!(status, 400);
    assert_eq!(body["detail"], "Aadhaar number already registered");
}

#[tokio::test]
async fn login_round_trips_to_the_same_worker() {
    let (addr, _store) = spawn_server().await;
    let (_, registered) = register(addr, "Sita Verma", "9000000020", "333344445555").await;
    let token = login(addr, "sitaverma").await;

    let (status, body) = send_json(addr, "GET", "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, 200, "dashboard: {body}");

    let (status, surveys) = send_json(addr, "GET", "/api/family-surveys", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(surveys, json!([]));

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/login",
        None,
        Some(&json!({ "username": "sitaverma", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(body["detail"], "Incorrect username or password");

    let _ = registered;
}

#[tokio::test]
async fn bad_tokens_are_rejected_uniformly() {
    let (addr, _store) = spawn_server().await;
    register(addr, "Geeta Singh", "9000000030", "444455556666").await;
    let token = login(addr, "geetasingh").await;

    let expired = asha_api::auth::create_token_with_expiry(
        "geetasingh",
        JWT_SECRET,
        Utc::now() - Duration::hours(2),
    )
    .expect("expired token");
    let tampered = format!("{token}x");
    let unknown_worker =
        asha_api::auth::create_token("ghostworker", JWT_SECRET).expect("valid token");

    for path in [
        "/api/family-surveys",
        "/api/pregnancy-reports",
        "/api/alerts",
        "/api/dashboard",
    ] {
        let (status, _) = send_json(addr, "GET", path, None, None).await;
        assert_eq!(status, 401, "missing token on {path}");

        let (status, _) = send_json(addr, "GET", path, Some(&expired), None).await;
        assert_eq!(status, 401, "expired token on {path}");

        let (status, _) = send_json(addr, "GET", path, Some(&tampered), None).await;
        assert_eq!(status, 401, "tampered token on {path}");

        let (status, _) = send_json(addr, "GET", path, Some(&unknown_worker), None).await;
        assert_eq!(status, 401, "unknown-worker token on {path}");
    }
}

#[tokio::test]
async fn workers_never_see_each_others_records() {
    let (addr, _store) = spawn_server().await;
    register(addr, "Worker A", "9000000040", "555566667788").await;
    register(addr, "Worker B", "9000000041", "555566667799").await;
    let token_a = login(addr, "workera").await;
    let token_b = login(addr, "workerb").await;

    let (status, created) = send_json(
        addr,
        "POST",
        "/api/family-surveys",
        Some(&token_a),
        Some(&survey_payload("HH-001")),
    )
    .await;
    assert_eq!(status, 200, "create survey: {created}");
    assert_eq!(created["household_id"], "HH-001");
    assert_eq!(created["synced"], false);

    let (_, reports) = send_json(
        addr,
        "POST",
        "/api/pregnancy-reports",
        Some(&token_a),
        Some(&pregnancy_payload("Sunita Devi")),
    )
    .await;
    let _ = reports;

    for path in ["/api/family-surveys", "/api/pregnancy-reports"] {
        let (status, mine) = send_json(addr, "GET", path, Some(&token_a), None).await;
        assert_eq!(status, 200);
        assert_eq!(mine.as_array().map(Vec::len), Some(1), "owner list {path}");

        let (status, theirs) = send_json(addr, "GET", path, Some(&token_b), None).await;
        assert_eq!(status, 200);
        assert_eq!(theirs, json!([]), "cross-worker leakage on {path}");
    }

    // Alerts seeded by A's pregnancy report stay invisible to B.
    let (_, alerts_b) = send_json(addr, "GET", "/api/alerts", Some(&token_b), None).await;
    assert_eq!(alerts_b, json!([]));
}

#[tokio::test]
async fn create_only_forms_return_messages_and_lists() {
    let (addr, _store) = spawn_server().await;
    register(addr, "Kamla Bai", "9000000050", "666677778888").await;
    let token = login(addr, "kamlabai").await;

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/child-vaccinations",
        Some(&token),
        Some(&vaccination_payload("Ravi")),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Child vaccination record created successfully");

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/postnatal-care",
        Some(&token),
        Some(&pnc_payload("Radha")),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Postnatal care record created successfully");

    let (status, body) = send_json(
        addr,
        "POST",
        "/api/leprosy-reports",
        Some(&token),
        Some(&leprosy_payload("Mohan")),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Leprosy report created successfully");

    let (status, vaccinations) =
        send_json(addr, "GET", "/api/child-vaccinations", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(vaccinations[0]["child_name"], "Ravi");

    let (status, pnc) = send_json(addr, "GET", "/api/postnatal-care", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(pnc[0]["mother_name"], "Radha");

    let (status, leprosy) =
        send_json(addr, "GET", "/api/leprosy-reports", Some(&token), None).await;
    assert_eq!(status, 200);
    assert_eq!(leprosy[0]["patient_name"], "Mohan");
}

#[tokio::test]
async fn validation_failures_name_the_offending_fields() {
    let (addr, _store) = spawn_server().await;
    register(addr, "Meena Kumari", "9000000060", "777788889999").await;
    let token = login(addr, "meenakumari").await;

    let mut bad = pregnancy_payload("Sunita Devi");
    bad["lmp"] = json!("never");
    bad["gravida"] = json!(-2);
    let (status, body) = send_json(
        addr,
        "POST",
        "/api/pregnancy-reports",
        Some(&token),
        Some(&bad),
    )
    .await;
    assert_eq!(status, 400);
    let fields = body["fields"].as_array().expect("fields list");
    assert!(fields.contains(&json!("lmp")), "fields: {fields:?}");
    assert!(fields.contains(&json!("gravida")), "fields: {fields:?}");

    // Missing keys are reported too, through the payload decode.
    let (status, body) = send_json(
        addr,
        "POST",
        "/api/family-surveys",
        Some(&token),
        Some(&json!({ "members_list": "[]" })),
    )
    .await;
    assert_eq!(status, 400);
    assert!(body["detail"].as_str().expect("detail").contains("household_id"));
}

#[tokio::test]
async fn alert_mark_read_is_idempotent_and_owner_scoped() {
    let (addr, store) = spawn_server().await;
    let (_, worker_a) = register(addr, "Asha Devi", "9000000070", "888899990000").await;
    register(addr, "Rekha Devi", "9000000071", "888899990011").await;
    let token_a = login(addr, "ashadevi").await;
    let token_b = login(addr, "rekhadevi").await;

    let owner_a = Uuid::parse_str(worker_a["id"].as_str().expect("worker id")).expect("uuid");
    let alert = store
        .insert_alert(
            owner_a,
            NewAlert {
                title: "PNC visit due".to_string(),
                message: "Second postnatal visit for Radha".to_string(),
                category: AlertCategory::Pnc,
                patient_id: None,
                patient_name: "Radha".to_string(),
                due_date: Utc::now() + Duration::days(3),
            },
        )
        .await
        .expect("insert alert");

    let read_path = format!("/api/alerts/{}/read", alert.id);

    // Another worker cannot touch it.
    let (status, _) = send_json(addr, "PUT", &read_path, Some(&token_b), None).await;
    assert_eq!(status, 404);

    let (status, body) = send_json(addr, "PUT", &read_path, Some(&token_a), None).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Alert marked as read");

    // Second call still succeeds and the flag stays set.
    let (status, _) = send_json(addr, "PUT", &read_path, Some(&token_a), None).await;
    assert_eq!(status, 200);

    let (_, alerts) = send_json(addr, "GET", "/api/alerts", Some(&token_a), None).await;
    assert_eq!(alerts[0]["is_read"], true);

    // A fabricated id is indistinguishable from someone else's alert.
    let missing = format!("/api/alerts/{}/read", Uuid::new_v4());
    let (status, _) = send_json(addr, "PUT", &missing, Some(&token_a), None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn alerts_list_newest_first() {
    let (addr, store) = spawn_server().await;
    let (_, worker) = register(addr, "Savita Patil", "9000000080", "999900001111").await;
    let token = login(addr, "savitapatil").await;
    let owner = Uuid::parse_str(worker["id"].as_str().expect("worker id")).expect("uuid");

    for title in ["first", "second", "third"] {
        store
            .insert_alert(
                owner,
                NewAlert {
                    title: title.to_string(),
                    message: "follow up".to_string(),
                    category: AlertCategory::Followup,
                    patient_id: None,
                    patient_name: "Gita".to_string(),
                    due_date: Utc::now(),
                },
            )
            .await
            .expect("insert alert");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (status, alerts) = send_json(addr, "GET", "/api/alerts", Some(&token), None).await;
    assert_eq!(status, 200);
    let titles: Vec<&str> = alerts
        .as_array()
        .expect("alert array")
        .iter()
        .map(|a| a["title"].as_str().expect("title"))
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn dashboard_counts_match_creates_exactly() {
    let (addr, _store) = spawn_server().await;
    register(addr, "Lata Jadhav", "9000000090", "121212121212").await;
    let token = login(addr, "latajadhav").await;

    for i in 0..2 {
        let (status, _) = send_json(
            addr,
            "POST",
            "/api/family-surveys",
            Some(&token),
            Some(&survey_payload(&format!("HH-{i}"))),
        )
        .await;
        assert_eq!(status, 200);
    }
    send_json(
        addr,
        "POST",
        "/api/pregnancy-reports",
        Some(&token),
        Some(&pregnancy_payload("Sunita Devi")),
    )
    .await;
    send_json(
        addr,
        "POST",
        "/api/child-vaccinations",
        Some(&token),
        Some(&vaccination_payload("Ravi")),
    )
    .await;
    send_json(
        addr,
        "POST",
        "/api/postnatal-care",
        Some(&token),
        Some(&pnc_payload("Radha")),
    )
    .await;

    let (status, body) = send_json(addr, "GET", "/api/dashboard", Some(&token), None).await;
    assert_eq!(status, 200, "dashboard: {body}");
    assert_eq!(body["total_surveys"], 2);
    assert_eq!(body["total_pregnancies"], 1);
    assert_eq!(body["total_vaccinations"], 1);
    assert_eq!(body["total_pnc"], 1);
    // One reminder each from the pregnancy and vaccination submissions.
    assert_eq!(body["unread_alerts"], 2);
    assert_eq!(body["incentives_earned"], 2 * 50 + 100);
}

#[tokio::test]
async fn sync_inserts_recognized_and_skips_unrecognized() {
    let (addr, _store) = spawn_server().await;
    register(addr, "Nirmala Joshi", "9000000100", "131313131313").await;
    let token = login(addr, "nirmalajoshi").await;

    let batch = json!({
        "family_surveys": [survey_payload("HH-SYNC-1")],
        "quantum_forms": [{ "anything": true }],
    });
    let (status, body) = send_json(addr, "POST", "/api/sync", Some(&token), Some(&batch)).await;
    assert_eq!(status, 200, "sync: {body}");
    assert_eq!(body["inserted_count"], 1);
    assert_eq!(body["message"], "Synced 1 records successfully");

    let (_, surveys) = send_json(addr, "GET", "/api/family-surveys", Some(&token), None).await;
    assert_eq!(surveys.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn sync_replay_with_client_ids_is_idempotent() {
    let (addr, _store) = spawn_server().await;
    register(addr, "Pushpa Rao", "9000000110", "141414141414").await;
    let token = login(addr, "pushparao").await;

    let mut record = survey_payload("HH-SYNC-2");
    record["id"] = json!(Uuid::new_v4().to_string());
    let batch = json!({ "family_surveys": [record] });

    let (status, body) = send_json(addr, "POST", "/api/sync", Some(&token), Some(&batch)).await;
    assert_eq!(status, 200);
    assert_eq!(body["inserted_count"], 1);

    let (status, body) = send_json(addr, "POST", "/api/sync", Some(&token), Some(&batch)).await;
    assert_eq!(status, 200, "replay: {body}");
    assert_eq!(body["inserted_count"], 0);
    assert_eq!(body["message"], "Synced 0 records successfully");

    let (_, surveys) = send_json(addr, "GET", "/api/family-surveys", Some(&token), None).await;
    assert_eq!(surveys.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn sync_covers_every_recognized_form_type() {
    let (addr, _store) = spawn_server().await;
    register(addr, "Shanta Gaikwad", "9000000120", "151515151515").await;
    let token = login(addr, "shantagaikwad").await;

    let batch = json!({
        "family_surveys": [survey_payload("HH-ALL")],
        "pregnancy_reports": [pregnancy_payload("Sunita Devi")],
        "child_vaccinations": [vaccination_payload("Ravi")],
        "postnatal_care": [pnc_payload("Radha")],
        "leprosy_reports": [leprosy_payload("Mohan")],
    });
    let (status, body) = send_json(addr, "POST", "/api/sync", Some(&token), Some(&batch)).await;
    assert_eq!(status, 200, "sync: {body}");
    assert_eq!(body["inserted_count"], 5);

    let (_, dashboard) = send_json(addr, "GET", "/api/dashboard", Some(&token), None).await;
    assert_eq!(dashboard["total_surveys"], 1);
    assert_eq!(dashboard["total_pregnancies"], 1);
    assert_eq!(dashboard["total_vaccinations"], 1);
    assert_eq!(dashboard["total_pnc"], 1);
    // Sync replays never seed reminder alerts.
    assert_eq!(dashboard["unread_alerts"], 0);
}

#[tokio::test]
async fn sync_rejects_malformed_records_with_field_context() {
    let (addr, _store) = spawn_server().await;
    register(addr, "Vimala Nair", "9000000130", "161616161616").await;
    let token = login(addr, "vimalanair").await;

    let batch = json!({ "leprosy_reports": [{ "patient_name": "X" }] });
    let (status, body) = send_json(addr, "POST", "/api/sync", Some(&token), Some(&batch)).await;
    assert_eq!(status, 400);
    let fields = body["fields"].as_array().expect("fields");
    assert!(fields[0]
        .as_str()
        .expect("field entry")
        .starts_with("leprosy_reports[0]"));
}
