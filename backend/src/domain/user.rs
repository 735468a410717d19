//! User data model.
//!
//! Identifiers are assigned by the store and never supplied by clients, so
//! [`UserDraft`] carries only the mutable fields while [`User`] pairs them
//! with a [`UserId`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-assigned numeric user identifier.
///
/// # Examples
/// ```
/// use user_registry::domain::UserId;
///
/// let id = UserId::new(3);
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Client-supplied user fields used by create and update.
///
/// Both fields are required; an `id` in the incoming JSON is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserDraft {
    #[schema(example = "Ann")]
    pub name: String,
    #[schema(example = "a@x.com")]
    pub email: String,
}

impl UserDraft {
    /// Build a draft from borrowed parts.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Registered user.
///
/// ## Invariants
/// - `id` is unique within a store and never changes after assignment.
///
/// Serialised as `{"id": 1, "name": "...", "email": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(value_type = u64, example = 1)]
    id: UserId,
    #[schema(example = "John Doe")]
    name: String,
    #[schema(example = "john@example.com")]
    email: String,
}

impl User {
    /// Attach an identifier to a draft.
    #[must_use]
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        let UserDraft { name, email } = draft;
        Self { id, name, email }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Contact email, unvalidated.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Replace the mutable fields, keeping the identifier.
    pub fn apply(&mut self, draft: UserDraft) {
        let UserDraft { name, email } = draft;
        self.name = name;
        self.email = email;
    }
}

#[cfg(test)]
mod tests {
    //! Serialisation and mutation coverage for the user model.

    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn user_serialises_with_flat_numeric_id() {
        let user = User::from_draft(UserId::new(7), UserDraft::new("Ann", "a@x.com"));

        let value = serde_json::to_value(&user).expect("serialise user");
        assert_eq!(value, json!({ "id": 7, "name": "Ann", "email": "a@x.com" }));
    }

    #[rstest]
    fn draft_ignores_client_supplied_id() {
        let draft: UserDraft =
            serde_json::from_value(json!({ "id": 99, "name": "Ann", "email": "a@x.com" }))
                .expect("draft parses");

        assert_eq!(draft, UserDraft::new("Ann", "a@x.com"));
    }

    #[rstest]
    #[case(json!({ "email": "a@x.com" }))]
    #[case(json!({ "name": "Ann" }))]
    #[case(json!({ "name": null, "email": "a@x.com" }))]
    fn draft_requires_name_and_email(#[case] payload: Value) {
        let result = serde_json::from_value::<UserDraft>(payload);
        assert!(result.is_err());
    }

    #[rstest]
    fn apply_keeps_identifier() {
        let mut user = User::from_draft(UserId::new(3), UserDraft::new("Ann", "a@x.com"));

        user.apply(UserDraft::new("Ann B.", "ab@x.com"));

        assert_eq!(user.id(), UserId::new(3));
        assert_eq!(user.name(), "Ann B.");
        assert_eq!(user.email(), "ab@x.com");
    }
}
