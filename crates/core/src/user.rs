//! User record model.
//!
//! Request bodies arrive as a loosely shaped [`UserPayload`]: every field optional, `age`
//! untyped, unknown fields ignored. [`UserPayload::into_fields`] projects that into the strictly
//! typed [`UserFields`], which is all the store ever sees.
//!
//! ## Required fields
//! `username` and `age` must be *truthy*: present and not `null`, `false`, numeric zero or the
//! empty string. A falsy value is rejected exactly like a missing one, so `"age": 0` is refused.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use users_uuid::UserId;
use utoipa::ToSchema;

/// A stored user record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Assigned by the server on create, never taken from a request body.
    #[schema(value_type = String, example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: UserId,
    pub username: String,
    /// Presence-checked only; any truthy JSON value is stored as given.
    #[schema(value_type = Object)]
    pub age: Value,
    pub hobbies: Vec<String>,
}

impl User {
    /// Builds a record from an identifier and a full set of fields.
    pub fn from_fields(id: UserId, fields: UserFields) -> Self {
        Self {
            id,
            username: fields.username,
            age: fields.age,
            hobbies: fields.hobbies,
        }
    }
}

/// Every field of a user except its identity.
#[derive(Clone, Debug, PartialEq)]
pub struct UserFields {
    pub username: String,
    pub age: Value,
    pub hobbies: Vec<String>,
}

/// Request body for create and update.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UserPayload {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "alice")]
    pub username: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Object>, example = 30)]
    pub age: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<String>>)]
    pub hobbies: Option<Value>,
}

impl UserPayload {
    /// Validate the payload and project it into [`UserFields`].
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingRequiredFields`] if `username` or `age` is falsy, or `username` is
    ///   not a string.
    /// - [`CoreError::InvalidHobbies`] if `hobbies` is truthy but not an array of strings.
    pub fn into_fields(self) -> CoreResult<UserFields> {
        let username = self.username.filter(is_truthy);
        let age = self.age.filter(is_truthy);

        let (username, age) = match (username, age) {
            (Some(Value::String(username)), Some(age)) => (username, age),
            _ => return Err(CoreError::MissingRequiredFields),
        };

        let hobbies = match self.hobbies.filter(is_truthy) {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    _ => Err(CoreError::InvalidHobbies),
                })
                .collect::<CoreResult<Vec<_>>>()?,
            Some(_) => return Err(CoreError::InvalidHobbies),
        };

        Ok(UserFields {
            username,
            age,
            hobbies,
        })
    }
}

/// Returns true unless `value` is `null`, `false`, numeric zero or the empty string.
///
/// Arrays and objects are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
