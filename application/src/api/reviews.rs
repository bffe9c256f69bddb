//! Review handlers.

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{review, Review},
    query, Query as _,
};

use crate::{
    api::{form, require, Message},
    AsError, Error, Service,
};

/// Payload of the `POST /reviews` endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReviewPayload {
    /// Name of the reviewer.
    name: Option<String>,

    /// Email of the reviewer.
    email: Option<String>,

    /// Rating given in the review.
    rating: Option<form::Num>,

    /// Text of the review.
    review: Option<String>,
}

/// `POST /reviews` handler.
///
/// Rejects the request when any field is missing.
#[tracing::instrument(skip_all, fields(http.route = "POST /reviews"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Json(payload): Json<ReviewPayload>,
) -> Result<(http::StatusCode, Json<Message>), Error> {
    let ReviewPayload {
        name,
        email,
        rating,
        review,
    } = payload;

    let review = Review {
        id: review::Id::new(),
        name: require("name", name)?,
        email: require("email", email)?,
        rating: require("rating", rating)?.0,
        review: require("review", review)?,
    };

    service
        .execute(command::CreateRecord(review))
        .await
        .map_err(AsError::into_error)?;

    Ok((
        http::StatusCode::CREATED,
        Json(Message {
            message: "Succesfully added Review!",
        }),
    ))
}

/// `GET /reviews` handler.
#[tracing::instrument(skip_all, fields(http.route = "GET /reviews"))]
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<ReviewBody>>, Error> {
    service
        .execute(query::records::All::<Review>::by(()))
        .await
        .map_err(AsError::into_error)
        .map(|records| Json(records.into_iter().map(Into::into).collect()))
}

/// Wire shape of a [`Review`].
#[derive(Debug, Serialize)]
pub struct ReviewBody {
    /// ID of the review.
    id: review::Id,

    /// Name of the reviewer.
    name: String,

    /// Email of the reviewer.
    email: String,

    /// Rating given in the review.
    rating: f64,

    /// Text of the review.
    review: String,
}

impl From<Review> for ReviewBody {
    fn from(review: Review) -> Self {
        let Review {
            id,
            name,
            email,
            rating,
            review,
        } = review;
        Self {
            id,
            name,
            email,
            rating,
            review,
        }
    }
}
