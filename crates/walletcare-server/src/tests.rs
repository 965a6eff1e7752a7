//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use walletcare_core::{Category, NewExpense};

fn setup_test_app() -> (TempDir, DeviceStore, Router) {
    let dir = TempDir::new().unwrap();
    let store = DeviceStore::open(dir.path()).unwrap();
    let app = create_router(store.clone(), None, ServerConfig::default()).unwrap();
    (dir, store, app)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

// ========== Device Scope Tests ==========

#[tokio::test]
async fn test_missing_device_id_is_rejected() {
    let (_dir, _store, app) = setup_test_app();

    for uri in [
        "/api/config",
        "/api/expenses",
        "/api/dashboard",
        "/api/investments",
        "/api/insights",
        "/api/report",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let json = get_body_json(response).await;
        assert_eq!(json["error"], "device_id required");
    }
}

#[tokio::test]
async fn test_invalid_device_id_is_rejected() {
    let (dir, _store, app) = setup_test_app();

    let response = app
        .oneshot(get("/api/expenses?device_id=..%2Fescape"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!dir.path().join("..").join("escape").exists());
}

#[tokio::test]
async fn test_reset_requires_device_id() {
    let (_dir, _store, app) = setup_test_app();

    let response = app
        .oneshot(post_json("/api/reset-expenses", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Config API Tests ==========

#[tokio::test]
async fn test_get_config_defaults() {
    let (_dir, _store, app) = setup_test_app();

    let response = app.oneshot(get("/api/config?device_id=phone")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["monthly_income"], 0.0);
    assert_eq!(json["first_access"], true);
    assert_eq!(json["theme"], "claro");
}

#[tokio::test]
async fn test_update_config_partial() {
    let (_dir, store, app) = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/config",
            serde_json::json!({
                "device_id": "phone",
                "monthly_income": 3000,
                "primeiro_acesso": false
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["config"]["monthly_income"], 3000.0);
    assert_eq!(json["config"]["first_access"], false);
    assert_eq!(json["config"]["theme"], "claro");

    let config = store.load_config("phone").unwrap();
    assert_eq!(config.monthly_income, 3000.0);
}

// ========== Expense API Tests ==========

#[tokio::test]
async fn test_create_and_list_expenses() {
    let (_dir, _store, app) = setup_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/expenses",
            serde_json::json!({
                "device_id": "phone",
                "amount": 42.5,
                "category": "entertainment",
                "description": "cinema"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["expense"]["id"], 1);
    assert_eq!(json["expense"]["category"], "entertainment");

    let response = app
        .oneshot(get("/api/expenses?device_id=phone"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let expenses = json.as_array().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["amount"], 42.5);
    assert_eq!(expenses[0]["description"], "cinema");
}

#[tokio::test]
async fn test_create_expense_accepts_legacy_fields() {
    let (_dir, store, app) = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/expenses",
            serde_json::json!({
                "device_id": "phone",
                "valor": 15,
                "categoria": "bebidas",
                "descricao": "suco",
                "eh_impulsivo": false
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let expenses = store.list_expenses("phone").unwrap();
    assert_eq!(expenses[0].category, Category::Drinks);
    assert_eq!(expenses[0].amount, 15.0);
}

#[tokio::test]
async fn test_reset_expenses() {
    let (_dir, store, app) = setup_test_app();
    store
        .add_expense(
            "phone",
            NewExpense {
                amount: 10.0,
                ..Default::default()
            },
        )
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/reset-expenses",
            serde_json::json!({ "device_id": "phone" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Gastos resetados com sucesso");
    assert!(store.list_expenses("phone").unwrap().is_empty());
}

// ========== Chat API Tests ==========

#[tokio::test]
async fn test_chat_detects_and_saves_expense() {
    let (_dir, store, app) = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/chat",
            serde_json::json!({
                "message": "Gastei R$ 25 com lanche",
                "device_id": "phone"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["detected"], true);
    assert_eq!(json["expense"]["amount"], 25.0);
    assert_eq!(json["expense"]["category"], "food");
    assert_eq!(
        json["reply"],
        "🍽️ R$ 25.00 em alimentação registrado! Gasto controlado, parabéns! 👏"
    );

    let expenses = store.list_expenses("phone").unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].id, 1);
    assert_eq!(expenses[0].description, "Gastei R$ 25 com lanche");
}

#[tokio::test]
async fn test_chat_without_amount() {
    let (_dir, store, app) = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/chat",
            serde_json::json!({ "mensagem": "oi", "device_id": "phone" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["detected"], false);
    assert!(json.get("expense").is_none());
    assert!(store.list_expenses("phone").unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_without_device_does_not_persist() {
    let (dir, _store, app) = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/chat",
            serde_json::json!({ "message": "gastei 30 reais no cinema" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["detected"], true);
    assert_eq!(json["expense"]["category"], "entertainment");

    // No device directory was created
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// ========== Summary API Tests ==========

#[tokio::test]
async fn test_insights_endpoint() {
    let (_dir, store, app) = setup_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/insights?device_id=phone"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(
        json["insights"],
        serde_json::json!(["Ainda não há gastos para analisar"])
    );

    store
        .add_expense(
            "phone",
            NewExpense {
                amount: 1200.0,
                category: Category::Games,
                description: "console".to_string(),
                is_impulsive: true,
                timestamp: None,
            },
        )
        .unwrap();

    let response = app
        .oneshot(get("/api/insights?device_id=phone"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let insights = json["insights"].as_array().unwrap();
    assert_eq!(insights.len(), 3);
    assert_eq!(
        insights[0],
        "🚨 100.0% dos seus gastos foram impulsivos (R$ 1200.00)"
    );
    assert_eq!(
        insights[2],
        "⚠️ Gastos altos este mês. Considere revisar seu orçamento!"
    );
}

#[tokio::test]
async fn test_dashboard_counts_current_month_only() {
    let (_dir, store, app) = setup_test_app();

    store
        .add_expense(
            "phone",
            NewExpense {
                amount: 20.0,
                category: Category::NonEssential,
                ..Default::default()
            },
        )
        .unwrap();
    store
        .add_expense(
            "phone",
            NewExpense {
                amount: 500.0,
                category: Category::Food,
                timestamp: Some("2001-01-01T12:00:00".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let response = app
        .oneshot(get("/api/dashboard?device_id=phone"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["total_spent"], 20.0);
    assert_eq!(json["potential_savings"], 20.0);
    assert_eq!(json["month_expenses"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_investments_endpoint() {
    let (_dir, store, app) = setup_test_app();

    store
        .update_config(
            "phone",
            walletcare_core::ConfigUpdate {
                monthly_income: Some(1000.0),
                ..Default::default()
            },
        )
        .unwrap();
    store
        .add_expense(
            "phone",
            NewExpense {
                amount: 400.0,
                ..Default::default()
            },
        )
        .unwrap();

    let response = app
        .oneshot(get("/api/investments?device_id=phone"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["monthly_surplus"], 600.0);
    assert!((json["suggested_investment"].as_f64().unwrap() - 420.0).abs() < 1e-9);
    assert_eq!(json["tips"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_report_is_plain_text() {
    let (_dir, _store, app) = setup_test_app();

    let response = app
        .oneshot(get("/api/report?device_id=phone"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/plain; charset=utf-8"
    );

    let text = get_body_text(response).await;
    assert!(text.starts_with("WalletCare - Relatório Financeiro"));
    assert!(text.contains("Nenhum gasto registrado"));
}

// ========== Misc Tests ==========

#[tokio::test]
async fn test_manifest_and_security_headers() {
    let (_dir, _store, app) = setup_test_app();

    let response = app.oneshot(get("/manifest.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");

    let json = get_body_json(response).await;
    assert_eq!(json["name"], "WalletCare");
    assert_eq!(json["display"], "standalone");
}

#[test]
fn test_require_device_id() {
    assert_eq!(require_device_id(Some(" phone ")).ok(), Some("phone"));
    assert!(require_device_id(None).is_err());
    assert!(require_device_id(Some("")).is_err());
    assert!(require_device_id(Some("a/b")).is_err());
}
