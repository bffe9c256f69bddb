//! Contact message handlers.

use axum::{
    extract::Path,
    Extension, Json,
};
use common::DateTime;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{contact, Contact},
    query, Query as _,
};

use crate::{
    api::{require, Data, Message},
    define_error, AsError, Error, Service,
};

/// Payload of the `POST /contact` endpoint.
#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    /// Contact message to submit.
    contact: ContactFields,
}

/// Contact block of a [`ContactPayload`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ContactFields {
    /// First name of the sender.
    first_name: Option<String>,

    /// Last name of the sender.
    last_name: Option<String>,

    /// Email of the sender.
    email: Option<String>,

    /// Phone number of the sender.
    phone: Option<String>,

    /// Message text.
    message: Option<String>,
}

/// `POST /contact` handler.
#[tracing::instrument(skip_all, fields(http.route = "POST /contact"))]
pub async fn create(
    Extension(service): Extension<Service>,
    Json(payload): Json<ContactPayload>,
) -> Result<(http::StatusCode, Json<Message>), Error> {
    let ContactPayload { contact } = payload;

    let contact = Contact {
        id: contact::Id::new(),
        first_name: require("contact.firstName", contact.first_name)?,
        last_name: require("contact.lastName", contact.last_name)?,
        email: require("contact.email", contact.email)?,
        phone: contact.phone,
        message: require("contact.message", contact.message)?,
        created_at: DateTime::now().coerce(),
    };

    service
        .execute(command::CreateRecord(contact))
        .await
        .map_err(AsError::into_error)?;

    Ok((
        http::StatusCode::CREATED,
        Json(Message {
            message: "Contact message submitted successfully!",
        }),
    ))
}

/// `GET /contacts` handler.
///
/// Newest messages first.
#[tracing::instrument(skip_all, fields(http.route = "GET /contacts"))]
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Json<Data<Vec<ContactBody>>>, Error> {
    service
        .execute(query::records::All::<Contact>::by(()))
        .await
        .map_err(AsError::into_error)
        .map(|records| {
            Json(Data {
                data: records.into_iter().map(Into::into).collect(),
            })
        })
}

/// `DELETE /contact/:id` handler.
#[tracing::instrument(skip_all, fields(http.route = "DELETE /contact/:id"))]
pub async fn delete(
    Extension(service): Extension<Service>,
    Path(id): Path<contact::Id>,
) -> Result<Json<Message>, Error> {
    let found = service
        .execute(command::DeleteRecord::<Contact, _>::by(id))
        .await
        .map_err(AsError::into_error)?;
    if !found {
        return Err(ContactError::NotFound.into());
    }

    Ok(Json(Message {
        message: "Contact deleted successfully",
    }))
}

/// Wire shape of a [`Contact`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactBody {
    /// ID of the contact message.
    id: contact::Id,

    /// First name of the sender.
    first_name: String,

    /// Last name of the sender.
    last_name: String,

    /// Email of the sender.
    email: String,

    /// Phone number of the sender.
    phone: Option<String>,

    /// Message text.
    message: String,

    /// Submission timestamp, RFC 3339.
    #[serde(with = "common::datetime::serde::rfc3339")]
    created_at: contact::CreationDateTime,
}

impl From<Contact> for ContactBody {
    fn from(contact: Contact) -> Self {
        let Contact {
            id,
            first_name,
            last_name,
            email,
            phone,
            message,
            created_at,
        } = contact;
        Self {
            id,
            first_name,
            last_name,
            email,
            phone,
            message,
            created_at,
        }
    }
}

define_error! {
    enum ContactError {
        #[code = "CONTACT_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Contact not found"]
        NotFound,
    }
}
