use axum::{
    Router,
    extract::{Json, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    AmortizationResult, AmortizationYear, CalculatorKind, CalculatorResult, amortization_schedule,
    calculate, calculate_amortization, format_result,
};
use crate::error::ApiError;

mod payload;

pub use payload::{
    AmortizationPayload, CalculatePayload, InsuranceMode, LoanTerms, MAX_TERM_YEARS, NumericField,
};

#[derive(Debug, Clone, Serialize)]
pub struct FormattedResult {
    #[serde(flatten)]
    pub result: CalculatorResult,
    pub display: String,
}

impl From<CalculatorResult> for FormattedResult {
    fn from(result: CalculatorResult) -> Self {
        let display = format_result(&result);
        Self { result, display }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub calculator: CalculatorKind,
    pub results: Vec<FormattedResult>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationResponse {
    #[serde(flatten)]
    pub summary: AmortizationResult,
    pub years: Vec<AmortizationYear>,
}

#[derive(Debug, Serialize)]
struct CalculatorInfo {
    slug: &'static str,
    title: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn run_calculation(payload: CalculatePayload) -> CalculateResponse {
    let scenario = payload.into_scenario();
    let calculator = scenario.kind();
    let results = calculate(&scenario);
    debug!(
        calculator = calculator.slug(),
        results = results.len(),
        "calculated scenario"
    );
    CalculateResponse {
        calculator,
        results: results.into_iter().map(FormattedResult::from).collect(),
    }
}

pub fn run_amortization(terms: LoanTerms) -> AmortizationResponse {
    AmortizationResponse {
        summary: calculate_amortization(
            terms.loan_amount,
            terms.interest_rate,
            terms.term_in_months,
            terms.extra_monthly_payment,
        ),
        years: amortization_schedule(
            terms.loan_amount,
            terms.interest_rate,
            terms.term_in_months,
            terms.extra_monthly_payment,
        ),
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/calculators", get(calculators_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/amortization", post(amortization_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "mortgage calculator API listening");
    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn calculators_handler() -> Response {
    let calculators: Vec<CalculatorInfo> = CalculatorKind::ALL
        .iter()
        .map(|kind| CalculatorInfo {
            slug: kind.slug(),
            title: kind.title(),
        })
        .collect();
    json_response(StatusCode::OK, calculators)
}

async fn calculate_handler(
    payload: Result<Json<CalculatePayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(reject_payload)?;
    Ok(json_response(StatusCode::OK, run_calculation(payload)))
}

async fn amortization_handler(
    payload: Result<Json<AmortizationPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload.map_err(reject_payload)?;
    Ok(json_response(
        StatusCode::OK,
        run_amortization(payload.into_terms()),
    ))
}

async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

fn reject_payload(rejection: JsonRejection) -> ApiError {
    let message = rejection.body_text();
    warn!(error = %message, "rejected request payload");
    ApiError::InvalidPayload(message)
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const EPS: f64 = 1e-6;

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    async fn read_json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    #[test]
    fn run_calculation_formats_every_result() {
        let payload: CalculatePayload = serde_json::from_value(json!({
            "calculator": "purchase",
            "homePrice": 350000,
            "downPayment": 70000,
            "interestRate": 7.0,
            "loanTermYears": 30
        }))
        .expect("payload should parse");
        let response = run_calculation(payload);

        assert_eq!(response.calculator, CalculatorKind::Purchase);
        let headline: Vec<_> = response
            .results
            .iter()
            .filter(|line| line.result.highlight)
            .collect();
        assert_eq!(headline.len(), 1);
        assert_eq!(headline[0].result.label, "Monthly Payment");
        assert!(headline[0].display.starts_with('$'));

        let down = response
            .results
            .iter()
            .find(|line| line.result.label == "Down Payment")
            .expect("down payment line");
        assert_eq!(down.display, "20.00%");
    }

    #[test]
    fn response_serialization_flattens_results() {
        let payload: CalculatePayload =
            serde_json::from_value(json!({"calculator": "dscr"})).expect("payload should parse");
        let json = serde_json::to_string(&run_calculation(payload)).expect("should serialize");
        assert!(json.contains("\"calculator\":\"dscr\""));
        assert!(json.contains("\"label\":\"Debt Service Coverage Ratio\""));
        assert!(json.contains("\"format\":\"number\""));
        assert!(json.contains("\"highlight\":true"));
        assert!(json.contains("\"display\""));
        assert!(json.contains("\"decimals\":2"));
    }

    #[test]
    fn run_amortization_returns_summary_and_schedule() {
        let payload: AmortizationPayload = serde_json::from_value(json!({
            "loanAmount": 280000,
            "interestRate": 7,
            "loanTermYears": 30
        }))
        .expect("payload should parse");
        let response = run_amortization(payload.into_terms());
        assert_approx_tol(response.summary.monthly_principal_and_interest, 1862.85, 0.01);
        assert_eq!(response.summary.actual_term_in_months, 360);
        assert_eq!(response.years.len(), 30);
    }

    #[tokio::test]
    async fn health_route_reports_ok() {
        let response = router()
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        assert_eq!(read_json_body(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn calculators_route_lists_every_calculator() {
        let response = router()
            .oneshot(
                Request::get("/api/calculators")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        let slugs: Vec<&str> = body
            .as_array()
            .expect("array body")
            .iter()
            .filter_map(|entry| entry["slug"].as_str())
            .collect();
        assert_eq!(
            slugs,
            [
                "purchase",
                "refinance",
                "affordability",
                "rent-vs-buy",
                "dscr",
                "va-purchase",
                "va-refinance"
            ]
        );
    }

    #[tokio::test]
    async fn calculate_route_returns_refinance_break_even() {
        let body = json!({
            "calculator": "refinance",
            "currentBalance": 200000,
            "currentMonthlyPayment": "$1,500",
            "newInterestRate": 5,
            "newLoanTermYears": 30,
            "closingCosts": 6000
        });
        let response = router()
            .oneshot(post_json("/api/calculate", &body))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json_body(response).await;
        assert_eq!(body["calculator"], "refinance");
        let results = body["results"].as_array().expect("results array");
        let savings = results
            .iter()
            .find(|line| line["label"] == "Monthly Savings")
            .and_then(|line| line["value"].as_f64())
            .expect("savings value");
        let break_even = results
            .iter()
            .find(|line| line["label"] == "Break-Even Point (months)")
            .and_then(|line| line["value"].as_f64())
            .expect("break-even value");
        assert!(savings > 0.0);
        assert_approx_tol(break_even, 6_000.0 / savings, EPS);
    }

    #[tokio::test]
    async fn calculate_route_rejects_unknown_calculator() {
        let response = router()
            .oneshot(post_json("/api/calculate", &json!({"calculator": "reverse"})))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json_body(response).await;
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    #[tokio::test]
    async fn calculate_route_rejects_malformed_json() {
        let request = Request::post("/api/calculate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("request should build");
        let response = router().oneshot(request).await.expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn amortization_route_returns_schedule() {
        let response = router()
            .oneshot(post_json(
                "/api/amortization",
                &json!({"loanAmount": 120000, "interestRate": 0, "loanTermYears": 10}),
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["monthlyPrincipalAndInterest"], 1000.0);
        assert_eq!(body["totalInterest"], 0.0);
        assert_eq!(body["actualTermInMonths"], 120);
        assert_eq!(body["years"].as_array().map(Vec::len), Some(10));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = router()
            .oneshot(
                Request::get("/nope")
                    .body(Body::empty())
                    .expect("request should build"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json_body(response).await, json!({"error": "Not found"}));
    }
}
