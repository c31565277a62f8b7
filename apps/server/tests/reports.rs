use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use rentcalc_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn build_test_router() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("test.db").to_string_lossy().to_string();
    let config = Config::from_lookup(|key| (key == "RC_DB_PATH").then(|| db_path.clone())).unwrap();
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config).unwrap(), tmp)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Form-style payload: title-case keys and string values.
fn sample_inputs() -> Value {
    json!({
        "Sale price": "300000",
        "Down payment percent": "20",
        "Mortgage rate": "6",
        "Loan term years": "30",
        "Closing costs": "5000",
        "Pmi rate": "0.5",
        "Property tax rate": "1.2",
        "Annual homeowners insurance": "1200",
        "Annual hoa fees": "0",
        "Upfront repairs": "2000",
        "Projected monthly rent": "2200",
        "Vacancy rate annual": "5",
        "Monthly maintenance and repairs": "100",
        "Capex": "50",
        "Monthly management fees": "150",
        "Horizon": "5",
        "Annualized appreciation": "3"
    })
}

#[tokio::test]
async fn create_show_and_list_report() {
    let (app, _tmp) = build_test_router().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/reports",
        Some(json!({ "name": "Elm St", "description": "Duplex", "inputs": sample_inputs() })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Elm St");
    assert!(created["location"].as_str().unwrap().starts_with("reports/"));

    let (status, tables) = send(&app, Method::GET, "/api/v1/reports/Elm%20St/tables", None).await;
    assert_eq!(status, StatusCode::OK);
    let sections = tables["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 5);
    assert_eq!(sections[0]["title"], "Deal terms");
    assert_eq!(sections[0]["rows"][2]["value"], "6.00%");
    assert_eq!(sections[4]["rows"][2]["label"], "Monthly cashflow");
    assert_eq!(sections[4]["rows"][2]["value"], "$(49)");

    let (status, index) = send(&app, Method::GET, "/api/v1/reports", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(index.as_array().unwrap().len(), 1);
    assert_eq!(index[0]["location"], created["location"]);
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let (app, _tmp) = build_test_router().await;
    let body = json!({ "name": "Elm St", "inputs": sample_inputs() });

    let (status, _) = send(&app, Method::POST, "/api/v1/reports", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, error) = send(&app, Method::POST, "/api/v1/reports", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], 409);
}

#[tokio::test]
async fn invalid_inputs_are_rejected() {
    let (app, _tmp) = build_test_router().await;
    let mut inputs = sample_inputs();
    inputs["Mortgage rate"] = json!("six");

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/v1/reports",
        Some(json!({ "name": "Elm St", "inputs": inputs })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("mortgage_rate"));

    let (_, index) = send(&app, Method::GET, "/api/v1/reports", None).await;
    assert!(index.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_replaces_inputs() {
    let (app, _tmp) = build_test_router().await;
    send(
        &app,
        Method::POST,
        "/api/v1/reports",
        Some(json!({ "name": "Elm St", "inputs": sample_inputs() })),
    )
    .await;

    let mut inputs = sample_inputs();
    inputs["Down payment percent"] = json!(10);
    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/v1/reports/Elm%20St",
        Some(json!({ "inputs": inputs })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["metrics"]["pmi_payment"], json!(112.5));
    assert_eq!(updated["inputs"]["down_payment_percent"], json!(10.0));
}

#[tokio::test]
async fn unknown_report_is_not_found() {
    let (app, _tmp) = build_test_router().await;
    let (status, error) = send(&app, Method::GET, "/api/v1/reports/Nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], 404);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/reports/Nowhere",
        Some(json!({ "inputs": sample_inputs() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preview_and_fields() {
    let (app, _tmp) = build_test_router().await;

    let (status, preview) = send(
        &app,
        Method::POST,
        "/api/v1/preview",
        Some(json!({ "inputs": sample_inputs() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preview["metrics"]["down_payment"], json!(60000.0));
    assert_eq!(preview["sections"].as_array().unwrap().len(), 5);

    let (status, fields) = send(&app, Method::GET, "/api/v1/fields", None).await;
    assert_eq!(status, StatusCode::OK);
    let fields = fields.as_array().unwrap();
    assert_eq!(fields.len(), 29);
    assert_eq!(fields[0]["name"], "sale_price");
    assert_eq!(fields[0]["kind"], "CURRENCY");

    let (_, index) = send(&app, Method::GET, "/api/v1/reports", None).await;
    assert!(index.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn preview_rejects_sale_price_beyond_currency_limit() {
    let (app, _tmp) = build_test_router().await;
    let mut inputs = sample_inputs();
    inputs["Sale price"] = json!("70000000000000000000000000000");

    let (status, error) = send(
        &app,
        Method::POST,
        "/api/v1/preview",
        Some(json!({ "inputs": inputs })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], 400);
    assert!(error["message"].as_str().unwrap().contains("sale_price"));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (app, _tmp) = build_test_router().await;

    for uri in ["/api/v1/preview", "/api/v1/reports"] {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"inputs\": "))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error["code"], 400);
        assert!(!error["message"].as_str().unwrap().is_empty());
    }

    let (status, error) = send(
        &app,
        Method::PUT,
        "/api/v1/reports/Elm%20St",
        Some(json!({ "description": "no inputs" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], 400);
    assert!(error["message"].as_str().unwrap().contains("inputs"));
}
