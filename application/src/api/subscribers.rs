//! Newsletter subscription handlers.

use axum::{Extension, Json};
use serde::Deserialize;
use service::{
    command::{self, subscribe::Outcome, Command as _},
    domain::Subscriber,
};

use crate::{
    api::{require, Message},
    define_error, AsError, Error, Service,
};

/// Payload of the subscription endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubscriptionPayload {
    /// Email to subscribe or unsubscribe.
    email: Option<String>,
}

/// `POST /subscribe` handler.
///
/// Subscribing an already subscribed email is not an error.
#[tracing::instrument(skip_all, fields(http.route = "POST /subscribe"))]
pub async fn subscribe(
    Extension(service): Extension<Service>,
    Json(payload): Json<SubscriptionPayload>,
) -> Result<(http::StatusCode, Json<Message>), Error> {
    let email = require("email", payload.email)?;

    let outcome = service
        .execute(command::Subscribe { email })
        .await
        .map_err(AsError::into_error)?;

    Ok(match outcome {
        Outcome::Subscribed => (
            http::StatusCode::CREATED,
            Json(Message {
                message: "User successfully subscribed to the newsletter!",
            }),
        ),
        Outcome::AlreadySubscribed => (
            http::StatusCode::OK,
            Json(Message {
                message: "User has already subscribed!",
            }),
        ),
    })
}

/// `POST /unsubscribe` handler.
#[tracing::instrument(skip_all, fields(http.route = "POST /unsubscribe"))]
pub async fn unsubscribe(
    Extension(service): Extension<Service>,
    Json(payload): Json<SubscriptionPayload>,
) -> Result<Json<Message>, Error> {
    let email = payload
        .email
        .ok_or_else(|| Error::from(SubscriberError::NoEmail))?;

    let found = service
        .execute(command::DeleteRecord::<Subscriber, _>::by(email))
        .await
        .map_err(AsError::into_error)?;
    if !found {
        return Err(SubscriberError::NotFound.into());
    }

    Ok(Json(Message {
        message: "Successfully unsubscribed",
    }))
}

define_error! {
    enum SubscriberError {
        #[code = "NO_EMAIL"]
        #[status = FORBIDDEN]
        #[message = "No email found"]
        NoEmail,

        #[code = "SUBSCRIBER_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Email not found in subscribers list"]
        NotFound,
    }
}
