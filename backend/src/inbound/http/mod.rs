//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every handler under `/api/v1` is registered by [`configure`], so the
//! server and the handler tests mount the same routes.

use actix_web::web;

pub mod auth;
pub mod costs;
pub mod dto;
pub mod error;
pub mod health;
pub mod ledger;
pub mod meals;
pub mod members;
pub mod rent;
pub mod session;
pub mod session_config;
pub mod shopping;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the `/api/v1` handlers on `cfg`.
///
/// Session middleware and shared state are the caller's concern.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user_profile)
        .service(ledger::get_ledger)
        .service(members::list_members)
        .service(members::add_member)
        .service(members::update_member_role)
        .service(members::member_meals)
        .service(meals::record_meals)
        .service(meals::update_meal_count)
        .service(meals::delete_meal_entry)
        .service(shopping::list_shopping_items)
        .service(shopping::add_shopping_item)
        .service(shopping::update_shopping_item)
        .service(shopping::delete_shopping_item)
        .service(rent::set_rent)
        .service(rent::rent_status)
        .service(rent::toggle_rent_payment)
        .service(costs::monthly_costs)
        .service(costs::monthly_report);
}
