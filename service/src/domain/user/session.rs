//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::DateTimeOf;
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::User;
use crate::domain::user;

/// Authenticated [`User`] session, carried as [JWT] claims.
///
/// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    /// ID of the [`User`] this [`Session`] belongs to.
    #[serde(rename = "id")]
    pub user_id: user::Id,

    /// Display name of the [`User`] this [`Session`] belongs to.
    pub name: String,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The provided `token` must be a valid [`Token`] representation.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(token: String) -> Self {
        Self(token)
    }
}

/// Marker type describing a [`Session`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, Expiration)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use crate::domain::user;

    use super::Session;

    #[test]
    fn claims_round_trip_through_json() {
        let session = Session {
            user_id: user::Id::new(),
            name: "Jane Realtor".to_owned(),
            expires_at: DateTime::from_unix_timestamp(2_000_000_000)
                .unwrap()
                .coerce(),
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["exp"], 2_000_000_000);
        assert_eq!(json["name"], "Jane Realtor");

        let decoded: Session = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.user_id, session.user_id);
        assert_eq!(decoded.expires_at, session.expires_at);
    }
}
