//! Site statistics handlers.

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{
        site_stats::{self, Stat},
        SiteStats,
    },
    query, Query as _,
};

use crate::{
    api::Message, context::Session, define_error, AsError, Error, Service,
};

/// Payload of the `POST /stats` and `PUT /stats` endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatsPayload {
    /// Statistic entries, in display order.
    stats: Vec<Stat>,
}

impl StatsPayload {
    /// Returns the entries of this [`StatsPayload`], rejecting an empty
    /// sequence.
    fn into_stats(self) -> Result<Vec<Stat>, Error> {
        if self.stats.is_empty() {
            return Err(StatsError::InvalidPayload.into());
        }
        Ok(self.stats)
    }
}

/// `POST /stats` handler.
///
/// Requires a verified identity.
#[tracing::instrument(skip_all, fields(http.route = "POST /stats"))]
pub async fn create(
    _session: Session,
    Extension(service): Extension<Service>,
    Json(payload): Json<StatsPayload>,
) -> Result<(http::StatusCode, Json<Message>), Error> {
    let stats = SiteStats {
        id: site_stats::Id::new(),
        stats: payload.into_stats()?,
    };

    service
        .execute(command::CreateRecord(stats))
        .await
        .map_err(AsError::into_error)?;

    Ok((
        http::StatusCode::CREATED,
        Json(Message {
            message: "Uploaded successfully!",
        }),
    ))
}

/// Response of the `PUT /stats` endpoint.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    /// Human-readable outcome message.
    message: &'static str,

    /// Updated statistic entries.
    stats: Vec<Stat>,
}

/// `PUT /stats` handler.
///
/// Requires a verified identity; fails when no statistics exist yet.
#[tracing::instrument(skip_all, fields(http.route = "PUT /stats"))]
pub async fn update(
    _session: Session,
    Extension(service): Extension<Service>,
    Json(payload): Json<StatsPayload>,
) -> Result<Json<UpdateResponse>, Error> {
    let updated = service
        .execute(command::UpdateSiteStats {
            stats: payload.into_stats()?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(UpdateResponse {
        message: "Stats updated successfully!",
        stats: updated.stats,
    }))
}

/// `GET /stats` handler.
#[tracing::instrument(skip_all, fields(http.route = "GET /stats"))]
pub async fn get(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<Stat>>, Error> {
    service
        .execute(query::records::One::<SiteStats, _>::by(()))
        .await
        .map_err(AsError::into_error)?
        .map(|stats| Json(stats.stats))
        .ok_or_else(|| StatsError::NotFound.into())
}

impl AsError for command::update_site_stats::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists => Some(StatsError::NotFoundToUpdate.into()),
        }
    }
}

define_error! {
    enum StatsError {
        #[code = "INVALID_PAYLOAD"]
        #[status = BAD_REQUEST]
        #[message = "Invalid payload!"]
        InvalidPayload,

        #[code = "STATS_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "No stats found!"]
        NotFound,

        #[code = "STATS_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Stats not found to update!"]
        NotFoundToUpdate,
    }
}
