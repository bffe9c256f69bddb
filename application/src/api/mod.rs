//! REST API definitions.

pub mod auth;
pub mod contacts;
pub mod docs;
pub mod form;
pub mod houses;
pub mod reviews;
pub mod services;
pub mod stats;
pub mod subscribers;
pub mod testimonials;

use std::{str::FromStr, sync::Arc};

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Extension, Router,
};
use serde::Serialize;
use service::infra::storage;

use crate::{Error, Service};

/// Response carrying a human-readable outcome message.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Message {
    /// Human-readable outcome message.
    pub message: &'static str,
}

/// Response wrapping its payload into a `data` field.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Data<T> {
    /// Wrapped payload.
    pub data: T,
}

/// Checks the presence of a required payload `field`.
pub(crate) fn require<T>(
    field: &'static str,
    value: Option<T>,
) -> Result<T, Error> {
    value.ok_or_else(|| Error::validation(format!("`{field}` is required")))
}

/// Parses a kind `field` out of its textual representation.
pub(crate) fn parse_kind<K: FromStr>(
    field: &'static str,
    repr: &str,
) -> Result<K, Error> {
    repr.parse().map_err(|_| {
        Error::validation(format!("`{field}` has an unknown `{repr}` value"))
    })
}

/// Maximum size of an inbound request body.
const MAX_BODY_SIZE: usize = 50 * 1024 * 1024;

/// Builds the REST [`Router`] of the application.
#[must_use]
pub fn router(
    service: Service,
    uploader: Arc<dyn storage::Uploader>,
) -> Router {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/houses", get(houses::list).post(houses::create))
        .route("/houses/search", post(houses::search))
        .route(
            "/houses/:id",
            get(houses::get).put(houses::update).delete(houses::delete),
        )
        .route(
            "/testimonials",
            get(testimonials::list).post(testimonials::create),
        )
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route("/subscribe", post(subscribers::subscribe))
        .route("/unsubscribe", post(subscribers::unsubscribe))
        .route("/contact", post(contacts::create))
        .route("/contacts", get(contacts::list))
        .route("/contact/:id", delete(contacts::delete))
        .route("/services", get(services::list).post(services::create))
        .route(
            "/services/:id",
            get(services::get)
                .put(services::update)
                .delete(services::delete),
        )
        .route(
            "/stats",
            get(stats::get).post(stats::create).put(stats::update),
        )
        .route("/docs", get(docs::docs))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(Extension(service))
        .layer(Extension(uploader))
}
