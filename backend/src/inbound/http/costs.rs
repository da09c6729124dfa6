//! Monthly cost allocation handlers.
//!
//! ```text
//! GET /api/v1/costs?month=2024-05
//! GET /api/v1/costs/report?month=2024-05
//! ```

use actix_web::{HttpResponse, get, http::header::ContentType, web};

use crate::domain::{Error, MonthlyCosts, MonthlyReport};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_user;
use crate::inbound::http::members::MonthQuery;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

async fn costs_for(
    state: &HttpState,
    session: &SessionContext,
    query: MonthQuery,
) -> ApiResult<MonthlyCosts> {
    current_user(state, session).await?;
    let month = query.resolve(state)?;
    state.household_query.monthly_costs(&month).await
}

/// Split a month's shopping spend by meals and add unpaid rent shares.
#[utoipa::path(
    get,
    path = "/api/v1/costs",
    params(MonthQuery),
    responses(
        (status = 200, description = "Monthly costs", body = MonthlyCosts),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["costs"],
    operation_id = "monthlyCosts"
)]
#[get("/costs")]
pub async fn monthly_costs(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<MonthQuery>,
) -> ApiResult<web::Json<MonthlyCosts>> {
    costs_for(&state, &session, query.into_inner())
        .await
        .map(web::Json)
}

/// The same figures rendered as a plain-text calculation view.
#[utoipa::path(
    get,
    path = "/api/v1/costs/report",
    params(MonthQuery),
    responses(
        (status = 200, description = "Monthly report", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["costs"],
    operation_id = "monthlyReport"
)]
#[get("/costs/report")]
pub async fn monthly_report(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<MonthQuery>,
) -> ApiResult<HttpResponse> {
    let costs = costs_for(&state, &session, query.into_inner()).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(MonthlyReport::new(&costs).to_string()))
}
