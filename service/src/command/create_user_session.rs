//! [`Command`] for creating a new [`Session`].

use common::{
    operations::{By, Select},
    DateTime,
};
use derive_more::{Debug, Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Password};
use crate::{
    domain::{
        user::{self, session, Session},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Session`] from credentials.
#[derive(Debug)]
pub struct CreateUserSession {
    /// [`Email`] of the [`User`] to authenticate.
    pub email: user::Email,

    /// [`Password`] of the [`User`] to authenticate.
    pub password: SecretBox<user::Password>,
}

/// Output of a [`CreateUserSession`] [`Command`] execution.
#[derive(Clone, Debug)]
pub struct Output {
    /// Authenticated [`User`].
    pub user: User,

    /// Signed [`session::Token`].
    pub token: session::Token,

    /// [`DateTime`] when the issued [`Session`] expires.
    pub expires_at: session::ExpirationDateTime,
}

impl<Db> Command<CreateUserSession> for Service<Db>
where
    Db: for<'e> Database<
        Select<By<Option<User>, &'e user::Email>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUserSession { email, password } = cmd;

        let user = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::WrongCredentials))?;

        if !user.password_hash.matches(password.expose_secret()) {
            return Err(tracerr::new!(E::WrongCredentials));
        }

        let expires_at =
            (DateTime::now() + self.config.session_expiry).coerce();
        let claims = Session {
            user_id: user.id,
            name: user.display_name(),
            expires_at,
        };

        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &self.config.jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;
        #[expect(unsafe_code, reason = "freshly signed")]
        let token = unsafe { session::Token::new_unchecked(token) };

        Ok(Output {
            user,
            token,
            expires_at,
        })
    }
}

/// Error of [`CreateUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// Provided credentials do not match any [`User`].
    #[display("Provided credentials do not match any `User`")]
    WrongCredentials,
}
