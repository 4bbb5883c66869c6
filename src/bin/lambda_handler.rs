//! AWS Lambda handler for bridge scenario evaluation
//!
//! Accepts a scenario request as JSON and returns the evaluated result.
//! Supports Lambda Function URLs for direct HTTP access.

use std::collections::HashMap;
use std::sync::Arc;

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::Serialize;
use serde_json::json;

use cpp_bridge::{ScenarioRequest, ScenarioRunner};

/// Function URL response in the proxy integration shape
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UrlResponse {
    status_code: u16,
    headers: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    is_base64_encoded: bool,
}

impl UrlResponse {
    fn new(status_code: u16, body: Option<String>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    fn json(status_code: u16, value: &serde_json::Value) -> Self {
        Self::new(status_code, Some(value.to_string()))
    }

    fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, &json!({ "error": message }))
    }

    fn preflight() -> Self {
        let mut response = Self::new(200, None);
        response.headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            "GET, POST, OPTIONS".to_string(),
        );
        response.headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        );
        response
    }
}

fn calculate(runner: &ScenarioRunner, body: &str) -> UrlResponse {
    let request: ScenarioRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return UrlResponse::error(400, &format!("Invalid JSON: {}", e)),
    };

    match runner.evaluate(&request) {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(value) => UrlResponse::json(200, &value),
            Err(e) => UrlResponse::error(500, &format!("Failed to serialize result: {}", e)),
        },
        Err(e) => match e.field() {
            Some(field) => {
                warn!("Rejected request: {}", e);
                UrlResponse::json(422, &json!({ "error": e.to_string(), "field": field }))
            }
            None => UrlResponse::error(500, &e.to_string()),
        },
    }
}

/// Dispatch a Function URL request
///
/// Only plain JSON bodies are accepted; base64-encoded bodies get a 400.
fn route(
    runner: &ScenarioRunner,
    method: &str,
    path: &str,
    body: Option<&str>,
    base64: bool,
) -> UrlResponse {
    match (method, path) {
        ("OPTIONS", _) => UrlResponse::preflight(),
        ("GET", "/health") => UrlResponse::json(200, &json!({ "status": "ok" })),
        ("POST", "/v1/calculate") => {
            if base64 {
                return UrlResponse::error(
                    400,
                    "Invalid JSON: base64-encoded bodies are not supported",
                );
            }
            calculate(runner, body.unwrap_or("{}"))
        }
        _ => UrlResponse::error(404, "Not found"),
    }
}

async fn handler(
    runner: Arc<ScenarioRunner>,
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<UrlResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    let method = request
        .request_context
        .http
        .method
        .as_deref()
        .unwrap_or("GET")
        .to_ascii_uppercase();
    let path = request.raw_path.as_deref().unwrap_or("/");

    let response = route(
        &runner,
        &method,
        path,
        request.body.as_deref(),
        request.is_base64_encoded,
    );

    info!(
        "{} {} -> {} in {}ms",
        method,
        path,
        response.status_code,
        start.elapsed().as_millis()
    );
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let runner = Arc::new(ScenarioRunner::new());

    run(service_fn(move |event| {
        let runner = Arc::clone(&runner);
        async move { handler(runner, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn body_json(response: &UrlResponse) -> Value {
        serde_json::from_str(response.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn test_calculate_returns_result() {
        let runner = ScenarioRunner::new();
        let body = r#"{
            "current_age": 65,
            "cpp_estimate_at_65": 1000.0,
            "rrsp_savings": 0.0,
            "real_rate_of_return": 0.0,
            "wage_growth": 0.0
        }"#;
        let response = route(&runner, "POST", "/v1/calculate", Some(body), false);

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        let value = body_json(&response);
        assert_eq!(value["bridge_cost_lump_sum"], 85200.0);
        assert_eq!(value["breakeven_age_economic"], 82);
        assert_eq!(value["recommendation"], "Delay to 70");
    }

    #[test]
    fn test_malformed_json_is_400() {
        let runner = ScenarioRunner::new();
        let response = route(&runner, "POST", "/v1/calculate", Some("{not json"), false);
        assert_eq!(response.status_code, 400);
        assert!(body_json(&response)["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_validation_failure_is_422_with_field() {
        let runner = ScenarioRunner::new();
        let body = r#"{"current_age": 130, "cpp_estimate_at_65": 1000.0, "rrsp_savings": 0.0}"#;
        let response = route(&runner, "POST", "/v1/calculate", Some(body), false);

        assert_eq!(response.status_code, 422);
        assert_eq!(body_json(&response)["field"], "current_age");
    }

    #[test]
    fn test_health_and_preflight() {
        let runner = ScenarioRunner::new();

        let health = route(&runner, "GET", "/health", None, false);
        assert_eq!(health.status_code, 200);
        assert_eq!(body_json(&health)["status"], "ok");

        let preflight = route(&runner, "OPTIONS", "/v1/calculate", None, false);
        assert_eq!(preflight.status_code, 200);
        assert!(preflight.body.is_none());
        assert!(preflight.headers.contains_key("Access-Control-Allow-Methods"));
    }

    #[test]
    fn test_unknown_route_is_404() {
        let runner = ScenarioRunner::new();
        let response = route(&runner, "GET", "/v1/calculate", None, false);
        assert_eq!(response.status_code, 404);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    }

    #[test]
    fn test_base64_body_is_400() {
        let runner = ScenarioRunner::new();
        let response = route(&runner, "POST", "/v1/calculate", Some("e30="), true);
        assert_eq!(response.status_code, 400);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    }
}
