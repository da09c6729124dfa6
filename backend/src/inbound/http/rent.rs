//! Rent handlers.
//!
//! ```text
//! PUT /api/v1/rent {"month":"2024-05","amount":900}
//! GET /api/v1/rent/payments?month=2024-05
//! POST /api/v1/rent/payments/{memberId}/toggle {"month":"2024-05"}
//! ```

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::RentStatus;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_user;
use crate::inbound::http::dto::{RentCostResponse, RentPaymentResponse};
use crate::inbound::http::error::malformed;
use crate::inbound::http::members::MonthQuery;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_amount, parse_member_id, parse_month, require,
};

/// Body for `PUT /api/v1/rent`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetRentBody {
    #[schema(example = "2024-05")]
    pub month: Option<String>,
    #[schema(example = 900.0)]
    pub amount: Option<f64>,
}

/// Body for `POST /api/v1/rent/payments/{memberId}/toggle`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TogglePaymentBody {
    /// `YYYY-MM`; defaults to the current UTC month.
    #[schema(example = "2024-05")]
    pub month: Option<String>,
}

impl TogglePaymentBody {
    /// Decode an optional JSON body; an empty body means no overrides.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes).map_err(|err| malformed("body", err))
    }
}

/// Set the household rent for a month.
#[utoipa::path(
    put,
    path = "/api/v1/rent",
    request_body = SetRentBody,
    responses(
        (status = 200, description = "Rent stored", body = RentCostResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["rent"],
    operation_id = "setRent"
)]
#[put("/rent")]
pub async fn set_rent(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SetRentBody>,
) -> ApiResult<web::Json<RentCostResponse>> {
    let actor = current_user(&state, &session).await?;
    let SetRentBody { month, amount } = payload.into_inner();
    let month_field = FieldName::new("month");
    let amount_field = FieldName::new("amount");
    let month = parse_month(require(month, month_field)?, month_field)?;
    let amount = parse_amount(require(amount, amount_field)?, amount_field)?;
    let rent = state.household.set_rent(&actor, &month, amount).await?;
    Ok(web::Json(rent.into()))
}

/// Payment state of every member for a month.
#[utoipa::path(
    get,
    path = "/api/v1/rent/payments",
    params(MonthQuery),
    responses(
        (status = 200, description = "Payment state per member", body = [RentStatus]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["rent"],
    operation_id = "rentStatus"
)]
#[get("/rent/payments")]
pub async fn rent_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<MonthQuery>,
) -> ApiResult<web::Json<Vec<RentStatus>>> {
    current_user(&state, &session).await?;
    let month = query.into_inner().resolve(&state)?;
    let statuses = state.household_query.rent_status(&month).await?;
    Ok(web::Json(statuses))
}

/// Flip whether a member has paid a month's rent.
///
/// The first toggle for a member and month records a payment.
#[utoipa::path(
    post,
    path = "/api/v1/rent/payments/{memberId}/toggle",
    params(("memberId" = String, Path, description = "Member identifier")),
    request_body = TogglePaymentBody,
    responses(
        (status = 200, description = "Payment flipped", body = RentPaymentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown member", body = Error)
    ),
    tags = ["rent"],
    operation_id = "toggleRentPayment"
)]
#[post("/rent/payments/{member_id}/toggle")]
pub async fn toggle_rent_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Bytes,
) -> ApiResult<web::Json<RentPaymentResponse>> {
    let actor = current_user(&state, &session).await?;
    let member_id = parse_member_id(path.into_inner(), FieldName::new("memberId"))?;
    let body = TogglePaymentBody::from_bytes(&payload)?;
    let month = MonthQuery { month: body.month }.resolve(&state)?;
    let payment = state
        .household
        .toggle_rent_payment(&actor, &member_id, &month)
        .await?;
    Ok(web::Json(payment.into()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{
        BillingMonth, MemberId, MemberName, RecordId, RentCost, RentPayment, UserRole,
    };
    use crate::inbound::http::test_utils::{
        MockPorts, login_cookie, signed_in_as, state_from_mocks, test_app, user_with_role,
    };

    fn manager_ports() -> MockPorts {
        MockPorts {
            login: signed_in_as(&user_with_role(UserRole::Manager)),
            ..MockPorts::default()
        }
    }

    #[actix_web::test]
    async fn set_rent_stores_month_and_amount() {
        let mut ports = manager_ports();
        ports
            .command
            .expect_set_rent()
            .withf(|_, month, amount| month.as_str() == "2024-05" && amount.value() == 900.0)
            .times(1)
            .returning(|_, month, amount| {
                Ok(RentCost {
                    id: RecordId::new("r1").expect("id"),
                    month: month.as_str().to_owned(),
                    amount,
                    created_by: "manager-user".to_owned(),
                })
            });
        let app = actix_test::init_service(test_app(state_from_mocks(ports))).await;
        let cookie = login_cookie!(&app);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/rent")
                .cookie(cookie)
                .set_json(json!({ "month": "2024-05", "amount": 900 }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["month"], "2024-05");
        assert_eq!(body["amount"], 900.0);
    }

    #[rstest]
    #[case(json!({ "amount": 900 }), "month", "missing_field")]
    #[case(json!({ "month": "2024-00", "amount": 900 }), "month", "invalid_month")]
    #[case(json!({ "month": "2024-05", "amount": -1 }), "amount", "invalid_amount")]
    #[actix_web::test]
    async fn set_rent_validates_fields(
        #[case] body: Value,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(test_app(state_from_mocks(manager_ports()))).await;
        let cookie = login_cookie!(&app);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/rent")
                .cookie(cookie)
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["field"], field);
        assert_eq!(value["details"]["code"], code);
    }

    #[actix_web::test]
    async fn rent_status_lists_members() {
        let mut ports = manager_ports();
        ports
            .query
            .expect_rent_status()
            .withf(|month| month.as_str() == "2024-04")
            .returning(|_| {
                Ok(vec![RentStatus {
                    member_id: MemberId::new("1").expect("id"),
                    name: MemberName::new("Alice").expect("name"),
                    paid: true,
                }])
            });
        let app = actix_test::init_service(test_app(state_from_mocks(ports))).await;
        let cookie = login_cookie!(&app);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/rent/payments?month=2024-04")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!([{ "memberId": "1", "name": "Alice", "paid": true }]));
    }

    #[actix_web::test]
    async fn toggle_without_body_uses_current_month() {
        let mut ports = manager_ports();
        let expected = BillingMonth::parse("2024-05").expect("month");
        ports
            .command
            .expect_toggle_rent_payment()
            .withf(move |_, member, month| member.as_str() == "1" && *month == expected)
            .times(1)
            .returning(|_, member, month| {
                Ok(RentPayment {
                    id: RecordId::new("p1").expect("id"),
                    member_id: member.clone(),
                    month: month.first_day_key(),
                    paid: true,
                    created_by: "manager-user".to_owned(),
                })
            });
        let app = actix_test::init_service(test_app(state_from_mocks(ports))).await;
        let cookie = login_cookie!(&app);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/rent/payments/1/toggle")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["month"], "2024-05-01");
        assert_eq!(body["paid"], true);
    }

    #[rstest]
    #[case(json!({ "month": 202405 }).to_string())]
    #[case("{\"month\":".to_owned())]
    #[actix_web::test]
    async fn toggle_rejects_malformed_bodies(#[case] body: String) {
        let mut ports = manager_ports();
        ports.command.expect_toggle_rent_payment().never();
        let app = actix_test::init_service(test_app(state_from_mocks(ports))).await;
        let cookie = login_cookie!(&app);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/rent/payments/1/toggle")
                .cookie(cookie)
                .insert_header(("content-type", "application/json"))
                .set_payload(body)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["code"], "invalid_request");
        assert_eq!(value["details"]["part"], "body");
    }

    #[rstest]
    fn blank_toggle_body_keeps_defaults() {
        let body = TogglePaymentBody::from_bytes(b" \n").expect("blank body");
        assert_eq!(body.month, None);
    }
}
