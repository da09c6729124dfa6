//! Whole-ledger read handler.

use actix_web::{get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_user;
use crate::inbound::http::dto::LedgerResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Every ledger collection in storage order.
#[utoipa::path(
    get,
    path = "/api/v1/ledger",
    responses(
        (status = 200, description = "Ledger", body = LedgerResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["ledger"],
    operation_id = "getLedger"
)]
#[get("/ledger")]
pub async fn get_ledger(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LedgerResponse>> {
    current_user(&state, &session).await?;
    let ledger = state.household_query.ledger().await?;
    Ok(web::Json(ledger.into()))
}
