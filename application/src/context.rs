//! [`Session`]-related definitions.

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use common::DateTime;
use service::{
    command::{self, Command as _},
    domain::user::{self, session},
};

use crate::{define_error, AsError, Error, Service};

/// Authenticated administrator session, extracted from the
/// `Authorization: Bearer` header of the request.
#[derive(Clone, Debug)]
pub struct Session {
    /// ID of the authenticated [`User`].
    ///
    /// [`User`]: service::domain::User
    pub user_id: user::Id,

    /// Display name of the authenticated [`User`].
    ///
    /// [`User`]: service::domain::User
    pub name: String,

    /// Bearer token this [`Session`] was authenticated with.
    pub token: session::Token,

    /// [`DateTime`] when this [`Session`] expires.
    pub expires_at: DateTime,
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service = parts
            .extensions
            .get::<Service>()
            .cloned()
            .ok_or_else(|| Error::internal(&"missing `Service` extension"))?;

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|e| {
                if e.is_missing() {
                    AuthError::AccessDenied.into()
                } else {
                    e.into_error()
                }
            })?;

        #[expect(unsafe_code, reason = "specified in correct header")]
        let token = unsafe {
            session::Token::new_unchecked(bearer.token().to_owned())
        };

        service
            .execute(command::AuthorizeUserSession {
                token: token.clone(),
            })
            .await
            .map(|s| Self {
                user_id: s.user_id,
                name: s.name,
                token,
                expires_at: s.expires_at.coerce(),
            })
            .map_err(AsError::into_error)
    }
}

impl AsError for command::authorize_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenDecodeError(_) | Self::UserNotExists(_) => {
                Some(AuthError::InvalidToken.into())
            }
        }
    }
}

define_error! {
    enum AuthError {
        #[code = "ACCESS_DENIED"]
        #[status = UNAUTHORIZED]
        #[message = "Access Denied"]
        AccessDenied,

        #[code = "INVALID_TOKEN"]
        #[status = BAD_REQUEST]
        #[message = "Invalid Token"]
        InvalidToken,
    }
}
