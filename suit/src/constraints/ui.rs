//! Constraints for user-facing form fields.

use super::Constraint;
use crate::core::value::display_value;
use crate::core::Rejection;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is a valid regex")
});

/// Returns true if `candidate` looks like an email address with a dotted domain.
///
/// The local part may contain any Unicode letters or digits; the domain is ASCII.
#[must_use]
pub fn is_email(candidate: &str) -> bool {
    let local_ok = candidate
        .split_once('@')
        .is_some_and(|(local, _)| !local.starts_with('.') && !local.ends_with('.') && !local.contains(".."));
    local_ok && EMAIL.is_match(candidate)
}

/// Strings that look like email addresses pass.
#[must_use]
pub fn email() -> Constraint {
    Constraint::new("email", |value| match value {
        Value::Null => Ok(Value::Null),
        Value::String(s) if is_email(s) => Ok(value.clone()),
        other => Err(Rejection::new(format!(
            "Not a valid email: {}",
            display_value(other)
        ))),
    })
}

/// Placeholder for currency codes; accepts anything for now.
#[must_use]
pub fn paypal_currency() -> Constraint {
    Constraint::new("paypalCurrency", |value| Ok(value.clone()))
}
