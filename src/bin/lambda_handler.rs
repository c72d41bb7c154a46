//! AWS Lambda handler for mortgage calculations
//!
//! Accepts loan terms as JSON and returns the monthly payment, lifetime totals,
//! yearly views and optionally the full schedule (as JSON or as a CSV download).
//!
//! Supports Lambda Function URLs for direct HTTP access.

use std::time::Instant;

use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use mortgage_calculator::{
    amortization::{effective_annual_rate_percent, PaymentRecord, YearlyBalance, YearlyTotals},
    report::{self, BalancePoint, PaymentBreakdown},
    CalculatorConfig, LoanTerms, MortgageResult, ScenarioRunner, ScheduleSummary,
};

#[derive(Debug, Default, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum ResponseFormat {
    #[default]
    Json,
    Csv,
}

/// Input for one calculation
#[derive(Debug, Deserialize)]
struct ScheduleRequest {
    /// Loan amount; takes precedence over home value and deposit
    #[serde(default)]
    principal: Option<f64>,

    #[serde(default)]
    home_value: Option<f64>,

    #[serde(default)]
    deposit: Option<f64>,

    /// Annual rate in percent (default from configuration)
    #[serde(default)]
    annual_rate_percent: Option<f64>,

    #[serde(default)]
    term_years: Option<u32>,

    /// Include every payment in the JSON response
    #[serde(default)]
    include_schedule: bool,

    #[serde(default)]
    format: ResponseFormat,
}

impl ScheduleRequest {
    fn terms(&self, config: &CalculatorConfig) -> MortgageResult<LoanTerms> {
        let rate = self.annual_rate_percent.unwrap_or(config.annual_rate_percent);
        let years = self.term_years.unwrap_or(config.term_years);

        match (self.principal, self.home_value) {
            (Some(principal), _) => LoanTerms::new(principal, rate, years),
            (None, Some(home_value)) => {
                LoanTerms::from_home_value(home_value, self.deposit.unwrap_or(0.0), rate, years)
            }
            (None, None) => LoanTerms::new(config.loan_amount, rate, years),
        }
    }
}

/// Output for one calculation
#[derive(Debug, Serialize)]
struct ScheduleResponse {
    terms: LoanTerms,
    summary: ScheduleSummary,
    effective_annual_rate_pct: f64,
    yearly_balances: Vec<YearlyBalance>,
    yearly_totals: Vec<YearlyTotals>,
    balance_points: Vec<BalancePoint>,
    payment_breakdown: PaymentBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<PaymentRecord>>,
    execution_time_ms: u64,
}

enum Reply {
    Json(ScheduleResponse),
    Csv(Vec<u8>),
}

fn calculate(request: &ScheduleRequest, config: &CalculatorConfig) -> MortgageResult<Reply> {
    let start = Instant::now();

    let terms = request.terms(config)?;
    let schedule = ScenarioRunner::new()
        .with_limits(config.limits.clone())
        .run(&terms)?;

    if request.format == ResponseFormat::Csv {
        return Ok(Reply::Csv(report::schedule_to_csv(&schedule)?));
    }

    Ok(Reply::Json(ScheduleResponse {
        terms,
        summary: schedule.summary(),
        effective_annual_rate_pct: effective_annual_rate_percent(terms.annual_rate_percent),
        yearly_balances: schedule.yearly_balances(),
        yearly_totals: schedule.yearly_totals(),
        balance_points: report::balance_points(&schedule),
        payment_breakdown: report::payment_breakdown(&schedule),
        schedule: request.include_schedule.then(|| schedule.records.clone()),
        execution_time_ms: start.elapsed().as_millis() as u64,
    }))
}

fn response(
    status: i64,
    content_type: &str,
    body: Option<String>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut response = LambdaFunctionUrlResponse {
        status_code: status,
        headers: Default::default(),
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    };
    response.headers.insert("content-type", content_type.parse()?);
    response.headers.insert("access-control-allow-origin", "*".parse()?);
    response.headers.insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    response.headers.insert("access-control-allow-headers", "Content-Type".parse()?);
    Ok(response)
}

fn error_response(status: i64, message: &str) -> Result<LambdaFunctionUrlResponse, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    response(status, "application/json", Some(body))
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return response(200, "text/plain", None);
    }

    if request.is_base64_encoded {
        return error_response(400, "binary request bodies are not supported");
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let parsed: ScheduleRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("rejecting malformed request: {}", e);
            return error_response(400, &format!("Invalid JSON: {}", e));
        }
    };

    let config = CalculatorConfig::from_env();
    match calculate(&parsed, &config) {
        Ok(Reply::Json(body)) => {
            response(200, "application/json", Some(serde_json::to_string(&body)?))
        }
        Ok(Reply::Csv(bytes)) => {
            let mut reply = response(200, "text/csv", Some(String::from_utf8(bytes)?))?;
            reply.headers.insert(
                "content-disposition",
                format!("attachment; filename=\"{}\"", mortgage_calculator::config::DEFAULT_EXPORT_FILE)
                    .parse()?,
            );
            Ok(reply)
        }
        Err(e) if e.is_input_error() => {
            log::warn!("rejecting loan terms: {}", e);
            error_response(400, &e.to_string())
        }
        Err(e) => {
            log::error!("calculation failed: {}", e);
            error_response(500, &e.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
