//! Authentication handlers.

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::user,
};

use crate::{
    api::require, define_error, AsError, Error, Service,
};

/// Payload of the `POST /auth/signup` endpoint.
#[derive(Debug, Deserialize)]
pub struct SignupPayload {
    /// User to register.
    user: SignupUser,
}

/// User block of a [`SignupPayload`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SignupUser {
    /// First name of the user.
    first_name: Option<String>,

    /// Last name of the user.
    last_name: Option<String>,

    /// Email of the user.
    email: Option<String>,

    /// Password of the user.
    password: Option<String>,
}

/// Response of the `POST /auth/signup` endpoint.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SignupResponse {
    /// Human-readable outcome message.
    response: &'static str,
}

/// `POST /auth/signup` handler.
#[tracing::instrument(skip_all, fields(http.route = "POST /auth/signup"))]
pub async fn signup(
    Extension(service): Extension<Service>,
    Json(payload): Json<SignupPayload>,
) -> Result<Json<SignupResponse>, Error> {
    let SignupPayload { user } = payload;

    let first_name =
        user::Name::new(require("user.firstName", user.first_name)?)
            .ok_or_else(|| {
                Error::validation("`user.firstName` is malformed")
            })?;
    let last_name = user::Name::new(require("user.lastName", user.last_name)?)
        .ok_or_else(|| Error::validation("`user.lastName` is malformed"))?;
    let email = user::Email::new(require("user.email", user.email)?)
        .ok_or_else(|| Error::validation("`user.email` is malformed"))?;
    let password = user::Password::new(require("user.password", user.password)?)
        .ok_or_else(|| Error::validation("`user.password` is malformed"))?;

    drop(
        service
            .execute(command::CreateUser {
                first_name,
                last_name,
                email,
                password: secrecy::SecretBox::init_with(move || password),
            })
            .await
            .map_err(AsError::into_error)?,
    );

    Ok(Json(SignupResponse {
        response: "User Registered Successfully",
    }))
}

/// Payload of the `POST /auth/login` endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    /// Credentials to authenticate with.
    user: LoginUser,
}

/// User block of a [`LoginPayload`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoginUser {
    /// Email of the user.
    email: Option<String>,

    /// Password of the user.
    password: Option<String>,
}

/// Response of the `POST /auth/login` endpoint.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed bearer token.
    token: String,
}

/// `POST /auth/login` handler.
#[tracing::instrument(skip_all, fields(http.route = "POST /auth/login"))]
pub async fn login(
    Extension(service): Extension<Service>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, Error> {
    let LoginPayload { user } = payload;

    let email = user::Email::new(require("user.email", user.email)?)
        .ok_or_else(|| Error::validation("`user.email` is malformed"))?;
    let password = user::Password::new(require("user.password", user.password)?)
        .ok_or_else(|| Error::validation("`user.password` is malformed"))?;

    let output = service
        .execute(command::CreateUserSession {
            email,
            password: secrecy::SecretBox::init_with(move || password),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(LoginResponse {
        token: output.token.to_string(),
    }))
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(AuthApiError::EmailOccupied.into()),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::WrongCredentials => {
                Some(AuthApiError::WrongCredentials.into())
            }
        }
    }
}

define_error! {
    enum AuthApiError {
        #[code = "EMAIL_OCCUPIED"]
        #[status = FORBIDDEN]
        #[message = "Email already registered!"]
        EmailOccupied,

        #[code = "WRONG_CREDENTIALS"]
        #[status = FORBIDDEN]
        #[message = "Invalid credentials"]
        WrongCredentials,
    }
}
