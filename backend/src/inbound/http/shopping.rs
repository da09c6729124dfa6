//! Shopping list handlers.
//!
//! ```text
//! GET /api/v1/shopping
//! POST /api/v1/shopping {"name":"Rice","cost":12.5,"date":"2024-05-02"}
//! PUT /api/v1/shopping/{id} {"name":"Rice","cost":13,"date":"2024-05-02"}
//! DELETE /api/v1/shopping/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::ShoppingItemDraft;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_user;
use crate::inbound::http::dto::ShoppingItemResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_amount, parse_date, parse_item_name, parse_record_id, require,
};

/// Body for creating or replacing a purchase.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItemBody {
    #[schema(example = "Rice")]
    pub name: Option<String>,
    #[schema(example = 12.5)]
    pub cost: Option<f64>,
    #[schema(example = "2024-05-02")]
    pub date: Option<String>,
}

impl TryFrom<ShoppingItemBody> for ShoppingItemDraft {
    type Error = Error;

    fn try_from(body: ShoppingItemBody) -> Result<Self, Self::Error> {
        let name_field = FieldName::new("name");
        let cost_field = FieldName::new("cost");
        let date_field = FieldName::new("date");
        Ok(Self {
            name: parse_item_name(&require(body.name, name_field)?, name_field)?,
            cost: parse_amount(require(body.cost, cost_field)?, cost_field)?,
            date: parse_date(require(body.date, date_field)?, date_field)?,
        })
    }
}

/// Purchases in storage order.
#[utoipa::path(
    get,
    path = "/api/v1/shopping",
    responses(
        (status = 200, description = "Shopping list", body = [ShoppingItemResponse]),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["shopping"],
    operation_id = "listShoppingItems"
)]
#[get("/shopping")]
pub async fn list_shopping_items(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ShoppingItemResponse>>> {
    current_user(&state, &session).await?;
    let ledger = state.household_query.ledger().await?;
    Ok(web::Json(
        ledger
            .shopping_items
            .into_iter()
            .map(ShoppingItemResponse::from)
            .collect(),
    ))
}

/// Record a purchase.
#[utoipa::path(
    post,
    path = "/api/v1/shopping",
    request_body = ShoppingItemBody,
    responses(
        (status = 201, description = "Purchase recorded", body = ShoppingItemResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["shopping"],
    operation_id = "addShoppingItem"
)]
#[post("/shopping")]
pub async fn add_shopping_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ShoppingItemBody>,
) -> ApiResult<HttpResponse> {
    let actor = current_user(&state, &session).await?;
    let draft = ShoppingItemDraft::try_from(payload.into_inner())?;
    let item = state.household.add_shopping_item(&actor, draft).await?;
    Ok(HttpResponse::Created().json(ShoppingItemResponse::from(item)))
}

/// Replace the fields of a purchase.
#[utoipa::path(
    put,
    path = "/api/v1/shopping/{id}",
    params(("id" = String, Path, description = "Purchase identifier")),
    request_body = ShoppingItemBody,
    responses(
        (status = 200, description = "Purchase updated", body = ShoppingItemResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown purchase", body = Error)
    ),
    tags = ["shopping"],
    operation_id = "updateShoppingItem"
)]
#[put("/shopping/{id}")]
pub async fn update_shopping_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ShoppingItemBody>,
) -> ApiResult<web::Json<ShoppingItemResponse>> {
    let actor = current_user(&state, &session).await?;
    let item_id = parse_record_id(path.into_inner(), FieldName::new("id"))?;
    let draft = ShoppingItemDraft::try_from(payload.into_inner())?;
    let item = state
        .household
        .update_shopping_item(&actor, &item_id, draft)
        .await?;
    Ok(web::Json(item.into()))
}

/// Remove a purchase.
#[utoipa::path(
    delete,
    path = "/api/v1/shopping/{id}",
    params(("id" = String, Path, description = "Purchase identifier")),
    responses(
        (status = 204, description = "Purchase removed"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown purchase", body = Error)
    ),
    tags = ["shopping"],
    operation_id = "deleteShoppingItem"
)]
#[delete("/shopping/{id}")]
pub async fn delete_shopping_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = current_user(&state, &session).await?;
    let item_id = parse_record_id(path.into_inner(), FieldName::new("id"))?;
    state.household.delete_shopping_item(&actor, &item_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
