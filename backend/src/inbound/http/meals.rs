//! Meal entry handlers.
//!
//! ```text
//! PUT /api/v1/meals {"memberId":"1","date":"2024-05-01","count":2}
//! PATCH /api/v1/meals/{id} {"count":1.5}
//! DELETE /api/v1/meals/{id}
//! ```

use actix_web::{HttpResponse, delete, patch, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::RecordMealsRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_user;
use crate::inbound::http::dto::MealEntryResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_date, parse_meal_count, parse_member_id, parse_record_id, require,
};

/// Body for `PUT /api/v1/meals`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordMealsBody {
    #[schema(example = "1")]
    pub member_id: Option<String>,
    #[schema(example = "2024-05-01")]
    pub date: Option<String>,
    #[schema(example = 2.0)]
    pub count: Option<f64>,
}

impl TryFrom<RecordMealsBody> for RecordMealsRequest {
    type Error = Error;

    fn try_from(body: RecordMealsBody) -> Result<Self, Self::Error> {
        let member_field = FieldName::new("memberId");
        let date_field = FieldName::new("date");
        let count_field = FieldName::new("count");
        Ok(Self {
            member_id: parse_member_id(require(body.member_id, member_field)?, member_field)?,
            date: parse_date(require(body.date, date_field)?, date_field)?,
            count: parse_meal_count(require(body.count, count_field)?, count_field)?,
        })
    }
}

/// Body for `PATCH /api/v1/meals/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealCountBody {
    #[schema(example = 1.5)]
    pub count: Option<f64>,
}

/// Set a member's meals for a day, replacing any existing count.
#[utoipa::path(
    put,
    path = "/api/v1/meals",
    request_body = RecordMealsBody,
    responses(
        (status = 200, description = "Meal entry stored", body = MealEntryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown member", body = Error)
    ),
    tags = ["meals"],
    operation_id = "recordMeals"
)]
#[put("/meals")]
pub async fn record_meals(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecordMealsBody>,
) -> ApiResult<web::Json<MealEntryResponse>> {
    let actor = current_user(&state, &session).await?;
    let request = RecordMealsRequest::try_from(payload.into_inner())?;
    let entry = state.household.record_meals(&actor, request).await?;
    Ok(web::Json(entry.into()))
}

/// Change the count on an existing entry.
#[utoipa::path(
    patch,
    path = "/api/v1/meals/{id}",
    params(("id" = String, Path, description = "Meal entry identifier")),
    request_body = UpdateMealCountBody,
    responses(
        (status = 200, description = "Meal entry updated", body = MealEntryResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown entry", body = Error)
    ),
    tags = ["meals"],
    operation_id = "updateMealCount"
)]
#[patch("/meals/{id}")]
pub async fn update_meal_count(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateMealCountBody>,
) -> ApiResult<web::Json<MealEntryResponse>> {
    let actor = current_user(&state, &session).await?;
    let entry_id = parse_record_id(path.into_inner(), FieldName::new("id"))?;
    let field = FieldName::new("count");
    let count = parse_meal_count(require(payload.into_inner().count, field)?, field)?;
    let entry = state
        .household
        .update_meal_count(&actor, &entry_id, count)
        .await?;
    Ok(web::Json(entry.into()))
}

/// Remove a meal entry.
#[utoipa::path(
    delete,
    path = "/api/v1/meals/{id}",
    params(("id" = String, Path, description = "Meal entry identifier")),
    responses(
        (status = 204, description = "Meal entry removed"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown entry", body = Error)
    ),
    tags = ["meals"],
    operation_id = "deleteMealEntry"
)]
#[delete("/meals/{id}")]
pub async fn delete_meal_entry(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = current_user(&state, &session).await?;
    let entry_id = parse_record_id(path.into_inner(), FieldName::new("id"))?;
    state.household.delete_meal_entry(&actor, &entry_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
