//! Service request handlers.

use axum::{
    extract::Path,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{service_request, ServiceRequest},
    query, Query as _,
};

use crate::{
    api::{parse_kind, require, Data, Message},
    define_error, AsError, Error, Service,
};

/// Payload of the service request endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicePayload {
    /// First name of the requester.
    first_name: Option<String>,

    /// Last name of the requester.
    last_name: Option<String>,

    /// Type of the property the request concerns.
    property_type: Option<String>,

    /// Condition of the property.
    condition: Option<String>,

    /// What the requester wants to do.
    do_you_want: Option<String>,

    /// Email of the requester.
    email: Option<String>,

    /// Phone number of the requester.
    phone: Option<String>,

    /// Free-form message.
    message: Option<String>,
}

impl ServicePayload {
    /// Validates the required fields and parses this [`ServicePayload`]
    /// into a [`ServiceRequest`] with the provided `id`.
    fn into_request(
        self,
        id: service_request::Id,
    ) -> Result<ServiceRequest, Error> {
        let Self {
            first_name,
            last_name,
            property_type,
            condition,
            do_you_want,
            email,
            phone,
            message,
        } = self;

        Ok(ServiceRequest {
            id,
            first_name: require("firstName", first_name)?,
            last_name: require("lastName", last_name)?,
            property_type: parse_kind(
                "propertyType",
                &require("propertyType", property_type)?,
            )?,
            condition: parse_kind(
                "condition",
                &require("condition", condition)?,
            )?,
            intent: parse_kind(
                "doYouWant",
                &require("doYouWant", do_you_want)?,
            )?,
            email: require("email", email)?,
            phone,
            message,
        })
    }
}

/// `POST /services` handler.
#[tracing::instrument(skip_all, fields(http.route = "POST /services"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Json(payload): Json<ServicePayload>,
) -> Result<(http::StatusCode, Json<CreateResponse>), Error> {
    let request = payload.into_request(service_request::Id::new())?;

    service
        .execute(command::CreateRecord(request.clone()))
        .await
        .map_err(AsError::into_error)?;

    Ok((
        http::StatusCode::CREATED,
        Json(CreateResponse {
            message: "Service request created successfully",
            data: request.into(),
        }),
    ))
}

/// `GET /services` handler.
#[tracing::instrument(skip_all, fields(http.route = "GET /services"))]
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Json<Data<Vec<ServiceBody>>>, Error> {
    service
        .execute(query::records::All::<ServiceRequest>::by(()))
        .await
        .map_err(AsError::into_error)
        .map(|records| {
            Json(Data {
                data: records.into_iter().map(Into::into).collect(),
            })
        })
}

/// `GET /services/:id` handler.
#[tracing::instrument(skip_all, fields(http.route = "GET /services/:id"))]
pub async fn get(
    Extension(service): Extension<Service>,
    Path(id): Path<service_request::Id>,
) -> Result<Json<Data<ServiceBody>>, Error> {
    service
        .execute(query::records::One::<ServiceRequest, _>::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|request| {
            Json(Data {
                data: request.into(),
            })
        })
        .ok_or_else(|| ServiceError::NotFound.into())
}

/// `PUT /services/:id` handler.
///
/// Replaces the stored request wholesale with the provided payload.
#[tracing::instrument(skip_all, fields(http.route = "PUT /services/:id"))]
pub async fn update(
    Extension(service): Extension<Service>,
    Path(id): Path<service_request::Id>,
    Json(payload): Json<ServicePayload>,
) -> Result<Json<CreateResponse>, Error> {
    let request = payload.into_request(id)?;

    let found = service
        .execute(command::ReplaceRecord(request.clone()))
        .await
        .map_err(AsError::into_error)?;
    if !found {
        return Err(ServiceError::NotFound.into());
    }

    Ok(Json(CreateResponse {
        message: "Service request updated successfully",
        data: request.into(),
    }))
}

/// `DELETE /services/:id` handler.
#[tracing::instrument(skip_all, fields(http.route = "DELETE /services/:id"))]
pub async fn delete(
    Extension(service): Extension<Service>,
    Path(id): Path<service_request::Id>,
) -> Result<Json<Message>, Error> {
    let found = service
        .execute(command::DeleteRecord::<ServiceRequest, _>::by(id))
        .await
        .map_err(AsError::into_error)?;
    if !found {
        return Err(ServiceError::NotFound.into());
    }

    Ok(Json(Message {
        message: "Service request deleted successfully",
    }))
}

/// Response of the service request mutation endpoints.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    /// Human-readable outcome message.
    message: &'static str,

    /// Affected service request.
    data: ServiceBody,
}

/// Wire shape of a [`ServiceRequest`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBody {
    /// ID of the service request.
    id: service_request::Id,

    /// First name of the requester.
    first_name: String,

    /// Last name of the requester.
    last_name: String,

    /// Type of the property the request concerns.
    property_type: &'static str,

    /// Condition of the property.
    condition: &'static str,

    /// What the requester wants to do.
    do_you_want: &'static str,

    /// Email of the requester.
    email: String,

    /// Phone number of the requester.
    phone: Option<String>,

    /// Free-form message.
    message: Option<String>,
}

impl From<ServiceRequest> for ServiceBody {
    fn from(request: ServiceRequest) -> Self {
        let ServiceRequest {
            id,
            first_name,
            last_name,
            property_type,
            condition,
            intent,
            email,
            phone,
            message,
        } = request;
        Self {
            id,
            first_name,
            last_name,
            property_type: property_type.as_str(),
            condition: condition.as_str(),
            do_you_want: intent.as_str(),
            email,
            phone,
            message,
        }
    }
}

define_error! {
    enum ServiceError {
        #[code = "SERVICE_REQUEST_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Service request not found"]
        NotFound,
    }
}
