//! Testimonial handlers.

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{testimonial, Testimonial},
    query, Query as _,
};

use crate::{
    api::{form, require, Message},
    AsError, Error, Service,
};

/// Payload of the `POST /testimonials` endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TestimonialPayload {
    /// Name of the person giving the testimonial.
    name: Option<String>,

    /// Text of the testimonial.
    text: Option<String>,

    /// Role of the person giving the testimonial.
    role: Option<String>,

    /// Rating given along the testimonial.
    rating: Option<form::Num>,
}

/// `POST /testimonials` handler.
#[tracing::instrument(skip_all, fields(http.route = "POST /testimonials"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Json(payload): Json<TestimonialPayload>,
) -> Result<(http::StatusCode, Json<Message>), Error> {
    let TestimonialPayload {
        name,
        text,
        role,
        rating,
    } = payload;

    let testimonial = Testimonial {
        id: testimonial::Id::new(),
        name: require("name", name)?,
        text: require("text", text)?,
        role,
        rating: require("rating", rating)?.0,
    };

    service
        .execute(command::CreateRecord(testimonial))
        .await
        .map_err(AsError::into_error)?;

    Ok((
        http::StatusCode::CREATED,
        Json(Message {
            message: "Successfully added Testimonial!",
        }),
    ))
}

/// `GET /testimonials` handler.
#[tracing::instrument(skip_all, fields(http.route = "GET /testimonials"))]
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<TestimonialBody>>, Error> {
    service
        .execute(query::records::All::<Testimonial>::by(()))
        .await
        .map_err(AsError::into_error)
        .map(|records| Json(records.into_iter().map(Into::into).collect()))
}

/// Wire shape of a [`Testimonial`].
#[derive(Debug, Serialize)]
pub struct TestimonialBody {
    /// ID of the testimonial.
    id: testimonial::Id,

    /// Name of the person giving the testimonial.
    name: String,

    /// Text of the testimonial.
    text: String,

    /// Role of the person giving the testimonial.
    role: Option<String>,

    /// Rating given along the testimonial.
    rating: f64,
}

impl From<Testimonial> for TestimonialBody {
    fn from(testimonial: Testimonial) -> Self {
        let Testimonial {
            id,
            name,
            text,
            role,
            rating,
        } = testimonial;
        Self {
            id,
            name,
            text,
            role,
            rating,
        }
    }
}
