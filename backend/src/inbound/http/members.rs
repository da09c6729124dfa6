//! Household member handlers.
//!
//! ```text
//! GET /api/v1/members
//! POST /api/v1/members {"name":"Alice"}
//! PATCH /api/v1/members/{id}/role {"role":"manager"}
//! GET /api/v1/members/{id}/meals?month=2024-05
//! ```

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{BillingMonth, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_user;
use crate::inbound::http::dto::{MealEntryResponse, MemberResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_member_id, parse_member_name, parse_member_role, parse_month, require,
};

/// Body for `POST /api/v1/members`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[schema(example = "Alice")]
    pub name: Option<String>,
}

/// Body for `PATCH /api/v1/members/{id}/role`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[schema(example = "manager")]
    pub role: Option<String>,
}

/// Month selector shared by monthly read endpoints.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MonthQuery {
    /// `YYYY-MM`; defaults to the current UTC month.
    #[param(example = "2024-05")]
    pub month: Option<String>,
}

impl MonthQuery {
    pub(crate) fn resolve(self, state: &HttpState) -> Result<BillingMonth, Error> {
        match self.month {
            Some(raw) => parse_month(raw, FieldName::new("month")),
            None => Ok(state.current_month()),
        }
    }
}

/// Members in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/members",
    responses(
        (status = 200, description = "Members", body = [MemberResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["members"],
    operation_id = "listMembers"
)]
#[get("/members")]
pub async fn list_members(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<MemberResponse>>> {
    current_user(&state, &session).await?;
    let ledger = state.household_query.ledger().await?;
    Ok(web::Json(
        ledger.members.into_iter().map(MemberResponse::from).collect(),
    ))
}

/// Add a member with the default role. Admins only.
#[utoipa::path(
    post,
    path = "/api/v1/members",
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member created", body = MemberResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["members"],
    operation_id = "addMember"
)]
#[post("/members")]
pub async fn add_member(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddMemberRequest>,
) -> ApiResult<HttpResponse> {
    let actor = current_user(&state, &session).await?;
    let field = FieldName::new("name");
    let raw = require(payload.into_inner().name, field)?;
    let name = parse_member_name(&raw, field)?;
    let member = state.household.add_member(&actor, name).await?;
    Ok(HttpResponse::Created().json(MemberResponse::from(member)))
}

/// Change a member's household role. Admins only.
#[utoipa::path(
    patch,
    path = "/api/v1/members/{id}/role",
    params(("id" = String, Path, description = "Member identifier")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Member updated", body = MemberResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown member", body = Error)
    ),
    tags = ["members"],
    operation_id = "updateMemberRole"
)]
#[patch("/members/{id}/role")]
pub async fn update_member_role(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateRoleRequest>,
) -> ApiResult<web::Json<MemberResponse>> {
    let actor = current_user(&state, &session).await?;
    let member_id = parse_member_id(path.into_inner(), FieldName::new("id"))?;
    let field = FieldName::new("role");
    let raw = require(payload.into_inner().role, field)?;
    let role = parse_member_role(&raw, field)?;
    let member = state
        .household
        .update_member_role(&actor, &member_id, role)
        .await?;
    Ok(web::Json(member.into()))
}

/// A member's meal entries for a month, sorted by date.
#[utoipa::path(
    get,
    path = "/api/v1/members/{id}/meals",
    params(("id" = String, Path, description = "Member identifier"), MonthQuery),
    responses(
        (status = 200, description = "Meal entries", body = [MealEntryResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["members"],
    operation_id = "memberMeals"
)]
#[get("/members/{id}/meals")]
pub async fn member_meals(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<MonthQuery>,
) -> ApiResult<web::Json<Vec<MealEntryResponse>>> {
    current_user(&state, &session).await?;
    let member_id = parse_member_id(path.into_inner(), FieldName::new("id"))?;
    let month = query.into_inner().resolve(&state)?;
    let entries = state.household_query.member_meals(&member_id, &month).await?;
    Ok(web::Json(
        entries.into_iter().map(MealEntryResponse::from).collect(),
    ))
}
