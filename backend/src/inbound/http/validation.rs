//! Parsing of raw request fields into validated domain values.
//!
//! Every failure becomes `invalid_request` with `details` naming the
//! offending field and a stable machine-readable code.

use std::fmt::Display;

use serde_json::json;

use crate::domain::{
    Amount, BillingMonth, Error, ItemName, LedgerDate, MealCount, MemberId, MemberName,
    MemberRole, RecordId, UserRole,
};

/// Validation codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidId,
    InvalidName,
    InvalidDate,
    InvalidMonth,
    InvalidAmount,
    InvalidCount,
    InvalidRole,
}

impl ValidationCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidId => "invalid_id",
            Self::InvalidName => "invalid_name",
            Self::InvalidDate => "invalid_date",
            Self::InvalidMonth => "invalid_month",
            Self::InvalidAmount => "invalid_amount",
            Self::InvalidCount => "invalid_count",
            Self::InvalidRole => "invalid_role",
        }
    }
}

/// JSON field name as the client sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }
}

pub(crate) fn field_error(field: FieldName, code: ValidationCode, reason: impl Display) -> Error {
    Error::invalid_request(format!("{}: {reason}", field.0)).with_details(json!({
        "field": field.0,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(field, ValidationCode::MissingField, "missing required field")
}

/// Unwrap an optional field or report it missing.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_member_id(value: String, field: FieldName) -> Result<MemberId, Error> {
    MemberId::new(value).map_err(|err| field_error(field, ValidationCode::InvalidId, err))
}

pub(crate) fn parse_record_id(value: String, field: FieldName) -> Result<RecordId, Error> {
    RecordId::new(value).map_err(|err| field_error(field, ValidationCode::InvalidId, err))
}

pub(crate) fn parse_member_name(value: &str, field: FieldName) -> Result<MemberName, Error> {
    MemberName::new(value).map_err(|err| field_error(field, ValidationCode::InvalidName, err))
}

pub(crate) fn parse_item_name(value: &str, field: FieldName) -> Result<ItemName, Error> {
    ItemName::new(value).map_err(|err| field_error(field, ValidationCode::InvalidName, err))
}

pub(crate) fn parse_date(value: String, field: FieldName) -> Result<LedgerDate, Error> {
    LedgerDate::parse(value).map_err(|err| field_error(field, ValidationCode::InvalidDate, err))
}

pub(crate) fn parse_month(value: String, field: FieldName) -> Result<BillingMonth, Error> {
    BillingMonth::parse(value).map_err(|err| field_error(field, ValidationCode::InvalidMonth, err))
}

pub(crate) fn parse_amount(value: f64, field: FieldName) -> Result<Amount, Error> {
    Amount::new(value).map_err(|err| field_error(field, ValidationCode::InvalidAmount, err))
}

pub(crate) fn parse_meal_count(value: f64, field: FieldName) -> Result<MealCount, Error> {
    MealCount::new(value).map_err(|err| field_error(field, ValidationCode::InvalidCount, err))
}

pub(crate) fn parse_member_role(value: &str, field: FieldName) -> Result<MemberRole, Error> {
    value
        .parse()
        .map_err(|err| field_error(field, ValidationCode::InvalidRole, err))
}

pub(crate) fn parse_user_role(value: &str, field: FieldName) -> Result<UserRole, Error> {
    value
        .parse()
        .map_err(|err| field_error(field, ValidationCode::InvalidRole, err))
}
