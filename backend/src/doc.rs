//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, the
//! request/response bodies and the session cookie security scheme. Swagger
//! UI serves it in debug builds; `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::RentStatus;
use crate::domain::{Error, ErrorCode, MemberCost, MonthlyCosts, User, UserRole};
use crate::inbound::http::dto::{
    LedgerResponse, MealEntryResponse, MemberResponse, RentCostResponse, RentPaymentResponse,
    ShoppingItemResponse,
};
use crate::inbound::http::meals::{RecordMealsBody, UpdateMealCountBody};
use crate::inbound::http::members::{AddMemberRequest, UpdateRoleRequest};
use crate::inbound::http::rent::{SetRentBody, TogglePaymentBody};
use crate::inbound::http::shopping::ShoppingItemBody;
use crate::inbound::http::users::{LoginRequest, RegisterRequest};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /api/v1/register.",
            ))),
        );
    }
}

/// OpenAPI document for the household book API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Messbook API",
        description = "Shared meal, shopping and rent ledger with monthly cost allocation."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user_profile,
        crate::inbound::http::ledger::get_ledger,
        crate::inbound::http::members::list_members,
        crate::inbound::http::members::add_member,
        crate::inbound::http::members::update_member_role,
        crate::inbound::http::members::member_meals,
        crate::inbound::http::meals::record_meals,
        crate::inbound::http::meals::update_meal_count,
        crate::inbound::http::meals::delete_meal_entry,
        crate::inbound::http::shopping::list_shopping_items,
        crate::inbound::http::shopping::add_shopping_item,
        crate::inbound::http::shopping::update_shopping_item,
        crate::inbound::http::shopping::delete_shopping_item,
        crate::inbound::http::rent::set_rent,
        crate::inbound::http::rent::rent_status,
        crate::inbound::http::rent::toggle_rent_payment,
        crate::inbound::http::costs::monthly_costs,
        crate::inbound::http::costs::monthly_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        UserRole,
        RegisterRequest,
        LoginRequest,
        AddMemberRequest,
        UpdateRoleRequest,
        RecordMealsBody,
        UpdateMealCountBody,
        ShoppingItemBody,
        SetRentBody,
        TogglePaymentBody,
        MemberResponse,
        MealEntryResponse,
        ShoppingItemResponse,
        RentCostResponse,
        RentPaymentResponse,
        LedgerResponse,
        RentStatus,
        MonthlyCosts,
        MemberCost,
    )),
    tags(
        (name = "users", description = "Accounts and sessions"),
        (name = "ledger", description = "Whole-ledger reads"),
        (name = "members", description = "Household members"),
        (name = "meals", description = "Daily meal counts"),
        (name = "shopping", description = "Shared grocery purchases"),
        (name = "rent", description = "Monthly rent and payments"),
        (name = "costs", description = "Monthly cost allocation"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
