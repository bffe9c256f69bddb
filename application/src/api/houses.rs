//! House listing handlers.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path},
    Extension, Json,
};
use common::{datetime, money::Currency, DateTime, Money};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::{
    command::{self, Command as _},
    domain::{
        listing::{self, address, media},
        user, Listing,
    },
    infra::storage,
    query, read, Query as _,
};

use crate::{
    api::{form, parse_kind, require, Message},
    context::Session,
    define_error, AsError, Error, Service,
};

/// Payload of the house creation and update endpoints.
///
/// Mirrors the multipart form: array-like, numeric and boolean fields
/// arrive loosely typed and normalize through [`form`]; the address block
/// arrives flattened under `address.`-prefixed keys.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HousePayload {
    /// Title of the house.
    title: Option<String>,

    /// Price of the house.
    price: Option<form::Amount>,

    /// Currency unit of the price, defaults to USD.
    price_unit: Option<String>,

    /// Billing frequency of the price.
    price_frequency: Option<String>,

    /// Market status of the house.
    status: Option<String>,

    /// Type of the property.
    property_type: Option<String>,

    /// Number of bedrooms.
    bedrooms: Option<form::Num>,

    /// Number of bathrooms.
    bathrooms: Option<form::Num>,

    /// Interior area in square feet.
    square_footage: Option<form::Num>,

    /// Lot size.
    lot_size: Option<form::Num>,

    /// Short overview.
    overview: Option<String>,

    /// Full description.
    description: Option<String>,

    /// Additional notes.
    additional_notes: Option<String>,

    /// Virtual tour URL.
    virtual_tour_url: Option<String>,

    /// Features of the house.
    features: form::List,

    /// Amenities of the house.
    amenities: form::List,

    /// Labels of the house.
    labels: form::List,

    /// Availability date, RFC 3339.
    available_from: Option<String>,

    /// Featured flag, defaults to `false`.
    is_featured: Option<form::Flag>,

    /// Active flag, defaults to `true`.
    is_active: Option<form::Flag>,

    /// Street of the address block.
    #[serde(rename = "address.street")]
    street: Option<String>,

    /// City of the address block.
    #[serde(rename = "address.city")]
    city: Option<String>,

    /// State of the address block.
    #[serde(rename = "address.state")]
    state: Option<String>,

    /// Zip code of the address block.
    #[serde(rename = "address.zip")]
    zip: Option<String>,

    /// Country of the address block.
    #[serde(rename = "address.country")]
    country: Option<String>,

    /// Longitude of the house.
    longitude: Option<form::Num>,

    /// Latitude of the house.
    latitude: Option<form::Num>,
}

/// Typed listing fields parsed out of a [`HousePayload`].
struct Fields {
    /// Parsed title.
    title: listing::Title,

    /// Parsed price with its currency unit.
    price: Money,

    /// Parsed price frequency.
    price_frequency: listing::PriceFrequency,

    /// Parsed market status.
    status: listing::Status,

    /// Parsed property type.
    property_type: listing::PropertyType,

    /// Parsed number of bedrooms.
    bedrooms: f64,

    /// Parsed number of bathrooms.
    bathrooms: f64,

    /// Parsed square footage.
    square_footage: Option<f64>,

    /// Parsed lot size.
    lot_size: Option<f64>,

    /// Overview free text.
    overview: Option<String>,

    /// Description free text.
    description: Option<String>,

    /// Additional notes free text.
    additional_notes: Option<String>,

    /// Virtual tour URL.
    virtual_tour_url: Option<String>,

    /// Parsed features.
    features: Vec<String>,

    /// Parsed amenities.
    amenities: Vec<String>,

    /// Parsed labels.
    labels: Vec<String>,

    /// Parsed availability date.
    available_from: Option<DateTime>,

    /// Featured flag.
    is_featured: bool,

    /// Active flag.
    is_active: bool,

    /// Raw address block, not yet normalized.
    address: address::Input,
}

impl HousePayload {
    /// Validates the required fields and parses this [`HousePayload`] into
    /// typed [`Fields`].
    ///
    /// # Errors
    ///
    /// Errors if a required field is missing or malformed.
    fn into_fields(self) -> Result<Fields, Error> {
        let Self {
            title,
            price,
            price_unit,
            price_frequency,
            status,
            property_type,
            bedrooms,
            bathrooms,
            square_footage,
            lot_size,
            overview,
            description,
            additional_notes,
            virtual_tour_url,
            features,
            amenities,
            labels,
            available_from,
            is_featured,
            is_active,
            street,
            city,
            state,
            zip,
            country,
            longitude,
            latitude,
        } = self;

        let title = listing::Title::new(require("title", title)?)
            .ok_or_else(|| Error::validation("`title` is malformed"))?;
        let price = Money {
            amount: require("price", price)?.0,
            currency: match price_unit {
                Some(unit) => parse_kind::<Currency>("priceUnit", &unit)?,
                None => Currency::default(),
            },
        };
        let price_frequency = parse_kind(
            "priceFrequency",
            &require("priceFrequency", price_frequency)?,
        )?;
        let status = parse_kind("status", &require("status", status)?)?;
        let property_type = parse_kind(
            "propertyType",
            &require("propertyType", property_type)?,
        )?;
        let bedrooms =
            non_negative("bedrooms", require("bedrooms", bedrooms)?.0)?;
        let bathrooms =
            non_negative("bathrooms", require("bathrooms", bathrooms)?.0)?;
        let square_footage = square_footage
            .map(|n| non_negative("squareFootage", n.0))
            .transpose()?;
        let lot_size =
            lot_size.map(|n| non_negative("lotSize", n.0)).transpose()?;
        let available_from = available_from
            .map(|s| {
                DateTime::from_rfc3339(&s).map_err(|_| {
                    Error::validation(
                        "`availableFrom` is not a valid RFC 3339 date",
                    )
                })
            })
            .transpose()?;

        Ok(Fields {
            title,
            price,
            price_frequency,
            status,
            property_type,
            bedrooms,
            bathrooms,
            square_footage,
            lot_size,
            overview,
            description,
            additional_notes,
            virtual_tour_url,
            features: features.0,
            amenities: amenities.0,
            labels: labels.0,
            available_from,
            is_featured: is_featured.map_or(false, |f| f.0),
            is_active: is_active.map_or(true, |f| f.0),
            address: address::Input {
                street,
                city,
                state,
                zip,
                country,
                longitude: longitude.map(|n| n.0),
                latitude: latitude.map(|n| n.0),
            },
        })
    }
}

/// Checks that the numeric `field` is not negative.
fn non_negative(field: &'static str, value: f64) -> Result<f64, Error> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::validation(format!("`{field}` must not be negative")))
    }
}

/// Parses the text fields collected from a multipart payload into a
/// [`HousePayload`].
fn payload_from(
    fields: serde_json::Map<String, Value>,
) -> Result<HousePayload, Error> {
    HousePayload::deserialize(Value::Object(fields))
        .map_err(|e| Error::validation(e.to_string()))
}

/// Uploads the collected file parts into the object storage and associates
/// them into listing media.
async fn upload_media(
    uploader: &Arc<dyn storage::Uploader>,
    files: Vec<form::FilePart>,
) -> Result<(Vec<listing::Image>, Option<listing::Image>), Error> {
    let mut uploads = Vec::with_capacity(files.len());
    for file in files {
        let form::FilePart {
            field,
            filename,
            bytes,
        } = file;

        let stored = uploader
            .upload(storage::File {
                filename: filename.clone(),
                bytes,
            })
            .await
            .map_err(|e| e.into_error())?;

        uploads.push(media::Upload {
            field,
            url: stored.url,
            public_id: stored.public_id,
            filename,
        });
    }
    Ok(media::associate(uploads))
}

/// `GET /houses` handler.
///
/// Public. Returns active listings only.
#[tracing::instrument(skip_all, fields(http.route = "GET /houses"))]
pub async fn list(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<HouseBody>>, Error> {
    service
        .execute(query::listings::Active::by(read::listing::Active))
        .await
        .map_err(AsError::into_error)
        .map(|listings| {
            Json(listings.into_iter().map(Into::into).collect())
        })
}

/// `GET /houses/:id` handler.
///
/// Public. Retrieves regardless of the active flag.
#[tracing::instrument(skip_all, fields(http.route = "GET /houses/:id"))]
pub async fn get(
    Extension(service): Extension<Service>,
    Path(id): Path<listing::Id>,
) -> Result<Json<HouseBody>, Error> {
    service
        .execute(query::listing::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .map(|listing| Json(listing.into()))
        .ok_or_else(|| HouseError::NotFound.into())
}

/// `POST /houses` handler.
///
/// Requires a verified identity; accepts a multipart payload with `images`
/// (≤ 15) and `coverImg` (≤ 1) file fields.
#[tracing::instrument(skip_all, fields(http.route = "POST /houses"))]
pub async fn create(
    session: Session,
    Extension(service): Extension<Service>,
    Extension(uploader): Extension<Arc<dyn storage::Uploader>>,
    multipart: Multipart,
) -> Result<(http::StatusCode, Json<CreateResponse>), Error> {
    let (text_fields, files) = form::collect(multipart).await?;
    let fields = payload_from(text_fields)?.into_fields()?;

    // Address normalization must fail before any persistence or upload.
    let address = listing::Address::normalize(fields.address)
        .map_err(|e| Error::validation(e.to_string()))?;

    let (images, cover_img) = upload_media(&uploader, files).await?;

    let listing = service
        .execute(command::CreateListing {
            title: fields.title,
            price: fields.price,
            price_frequency: fields.price_frequency,
            status: fields.status,
            property_type: fields.property_type,
            address,
            bedrooms: fields.bedrooms,
            bathrooms: fields.bathrooms,
            square_footage: fields.square_footage,
            lot_size: fields.lot_size,
            overview: fields.overview,
            description: fields.description,
            additional_notes: fields.additional_notes,
            virtual_tour_url: fields.virtual_tour_url,
            cover_img,
            images,
            features: fields.features,
            amenities: fields.amenities,
            labels: fields.labels,
            available_from: fields.available_from,
            is_featured: fields.is_featured,
            is_active: fields.is_active,
            created_by: session.user_id,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((
        http::StatusCode::CREATED,
        Json(CreateResponse {
            message: "House created successfully",
            house: listing.into(),
        }),
    ))
}

/// `PUT /houses/:id` handler.
///
/// Requires a verified identity; same payload shape as the creation. An
/// absent address block keeps the stored address, a partial one is
/// rejected; absent files keep the stored media, supplied files replace it
/// outright.
#[tracing::instrument(skip_all, fields(http.route = "PUT /houses/:id"))]
pub async fn update(
    _session: Session,
    Extension(service): Extension<Service>,
    Extension(uploader): Extension<Arc<dyn storage::Uploader>>,
    Path(id): Path<listing::Id>,
    multipart: Multipart,
) -> Result<Json<HouseBody>, Error> {
    let (text_fields, files) = form::collect(multipart).await?;
    let fields = payload_from(text_fields)?.into_fields()?;

    let address = listing::Address::normalize_partial(fields.address)
        .map_err(|e| Error::validation(e.to_string()))?;

    let (images, cover_img) = upload_media(&uploader, files).await?;
    let images = (!images.is_empty()).then_some(images);

    service
        .execute(command::UpdateListing {
            id,
            title: fields.title,
            price: fields.price,
            price_frequency: fields.price_frequency,
            status: fields.status,
            property_type: fields.property_type,
            address,
            bedrooms: fields.bedrooms,
            bathrooms: fields.bathrooms,
            square_footage: fields.square_footage,
            lot_size: fields.lot_size,
            overview: fields.overview,
            description: fields.description,
            additional_notes: fields.additional_notes,
            virtual_tour_url: fields.virtual_tour_url,
            cover_img,
            images,
            features: fields.features,
            amenities: fields.amenities,
            labels: fields.labels,
            available_from: fields.available_from,
            is_featured: fields.is_featured,
            is_active: fields.is_active,
        })
        .await
        .map_err(AsError::into_error)
        .map(|listing| Json(listing.into()))
}

/// `DELETE /houses/:id` handler.
///
/// Requires a verified identity; hard-deletes the listing.
#[tracing::instrument(skip_all, fields(http.route = "DELETE /houses/:id"))]
pub async fn delete(
    _session: Session,
    Extension(service): Extension<Service>,
    Path(id): Path<listing::Id>,
) -> Result<Json<Message>, Error> {
    service
        .execute(command::DeleteListing { id })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(Message {
        message: "House deleted successfully",
    }))
}

/// Payload of the `POST /houses/search` endpoint.
///
/// Every field is optional; absence means "no constraint".
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchPayload {
    /// City substring.
    city: Option<String>,

    /// State substring.
    state: Option<String>,

    /// Zip code substring.
    zip: Option<String>,

    /// Country substring.
    country: Option<String>,

    /// Status substring.
    status: Option<String>,

    /// Property type substring.
    property_type: Option<String>,

    /// Lower price bound.
    min_price: Option<form::Amount>,

    /// Upper price bound.
    max_price: Option<form::Amount>,

    /// Lower bedrooms bound.
    min_bedrooms: Option<form::Num>,

    /// Upper bedrooms bound.
    max_bedrooms: Option<form::Num>,

    /// Lower bathrooms bound.
    min_bathrooms: Option<form::Num>,

    /// Upper bathrooms bound.
    max_bathrooms: Option<form::Num>,

    /// Lower square footage bound.
    min_area: Option<form::Num>,

    /// Upper square footage bound.
    max_area: Option<form::Num>,

    /// Featured flag.
    is_featured: Option<form::Flag>,

    /// Active flag.
    is_active: Option<form::Flag>,
}

impl From<SearchPayload> for read::listing::Filter {
    fn from(payload: SearchPayload) -> Self {
        let SearchPayload {
            city,
            state,
            zip,
            country,
            status,
            property_type,
            min_price,
            max_price,
            min_bedrooms,
            max_bedrooms,
            min_bathrooms,
            max_bathrooms,
            min_area,
            max_area,
            is_featured,
            is_active,
        } = payload;

        Self {
            city,
            state,
            zip,
            country,
            status,
            property_type,
            min_price: min_price.map(|a| a.0),
            max_price: max_price.map(|a| a.0),
            min_bedrooms: min_bedrooms.map(|n| n.0),
            max_bedrooms: max_bedrooms.map(|n| n.0),
            min_bathrooms: min_bathrooms.map(|n| n.0),
            max_bathrooms: max_bathrooms.map(|n| n.0),
            min_area: min_area.map(|n| n.0),
            max_area: max_area.map(|n| n.0),
            is_featured: is_featured.map(|f| f.0),
            is_active: is_active.map(|f| f.0),
        }
    }
}

/// `POST /houses/search` handler.
///
/// Public. An empty payload returns every listing.
#[tracing::instrument(skip_all, fields(http.route = "POST /houses/search"))]
pub async fn search(
    Extension(service): Extension<Service>,
    Json(payload): Json<SearchPayload>,
) -> Result<Json<Vec<HouseBody>>, Error> {
    service
        .execute(query::listings::Search::by(payload.into()))
        .await
        .map_err(AsError::into_error)
        .map(|listings| {
            Json(listings.into_iter().map(Into::into).collect())
        })
}

/// Response of the `POST /houses` endpoint.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    /// Human-readable outcome message.
    message: &'static str,

    /// Created house.
    house: HouseBody,
}

/// Wire shape of a [`Listing`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseBody {
    /// Storage-assigned ID.
    id: listing::Id,

    /// Short public identifier.
    property_id: listing::PropertyId,

    /// Title of the house.
    title: String,

    /// Price of the house.
    price: f64,

    /// Currency unit of the price.
    price_unit: &'static str,

    /// Billing frequency of the price.
    price_frequency: &'static str,

    /// Market status.
    status: &'static str,

    /// Type of the property.
    property_type: &'static str,

    /// Address of the house.
    address: AddressBody,

    /// Number of bedrooms.
    bedrooms: f64,

    /// Number of bathrooms.
    bathrooms: f64,

    /// Interior area in square feet.
    square_footage: Option<f64>,

    /// Lot size.
    lot_size: Option<f64>,

    /// Short overview.
    overview: Option<String>,

    /// Full description.
    description: Option<String>,

    /// Additional notes.
    additional_notes: Option<String>,

    /// Virtual tour URL.
    virtual_tour_url: Option<String>,

    /// Designated cover image.
    cover_img: Option<listing::Image>,

    /// Ordered gallery images.
    images: Vec<listing::Image>,

    /// Features of the house.
    features: Vec<String>,

    /// Amenities of the house.
    amenities: Vec<String>,

    /// Labels of the house.
    labels: Vec<String>,

    /// Availability date, RFC 3339.
    available_from: Option<String>,

    /// Featured flag.
    is_featured: bool,

    /// Active flag.
    is_active: bool,

    /// ID of the creating administrator.
    created_by: Option<user::Id>,

    /// Creation timestamp, RFC 3339.
    #[serde(with = "datetime::serde::rfc3339")]
    created_at: listing::CreationDateTime,

    /// Last update timestamp, RFC 3339.
    #[serde(with = "datetime::serde::rfc3339")]
    updated_at: listing::UpdateDateTime,
}

/// Wire shape of a [`listing::Address`].
#[derive(Debug, Serialize)]
pub struct AddressBody {
    /// Street of the address.
    street: String,

    /// City of the address.
    city: String,

    /// State of the address.
    state: String,

    /// Zip code of the address.
    zip: String,

    /// Country of the address.
    country: String,

    /// `[longitude, latitude]` pair.
    coordinates: [f64; 2],
}

impl From<Listing> for HouseBody {
    fn from(listing: Listing) -> Self {
        let address = listing.address;
        Self {
            id: listing.id,
            property_id: listing.property_id,
            title: listing.title.to_string(),
            price: listing.price.amount_f64(),
            price_unit: listing.price.currency.as_str(),
            price_frequency: listing.price_frequency.as_str(),
            status: listing.status.as_str(),
            property_type: listing.property_type.as_str(),
            address: AddressBody {
                street: address.street.to_string(),
                city: address.city.to_string(),
                state: address.state.to_string(),
                zip: address.zip.to_string(),
                country: address.country.to_string(),
                coordinates: [
                    address.coordinates.longitude,
                    address.coordinates.latitude,
                ],
            },
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            square_footage: listing.square_footage,
            lot_size: listing.lot_size,
            overview: listing.overview,
            description: listing.description,
            additional_notes: listing.additional_notes,
            virtual_tour_url: listing.virtual_tour_url,
            cover_img: listing.cover_img,
            images: listing.images,
            features: listing.features,
            amenities: listing.amenities,
            labels: listing.labels,
            available_from: listing
                .available_from
                .map(|dt| dt.to_rfc3339()),
            is_featured: listing.is_featured,
            is_active: listing.is_active,
            created_by: listing.created_by,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

impl AsError for command::update_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(HouseError::NotFound.into()),
        }
    }
}

impl AsError for command::delete_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists(_) => Some(HouseError::NotFound.into()),
        }
    }
}

define_error! {
    enum HouseError {
        #[code = "HOUSE_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "House not found"]
        NotFound,
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::{payload_from, read, SearchPayload};

    #[test]
    fn empty_search_payload_imposes_no_constraint() {
        let payload: SearchPayload = serde_json::from_value(json!({})).unwrap();

        assert_eq!(
            read::listing::Filter::from(payload),
            read::listing::Filter::default(),
        );
    }

    #[test]
    fn search_payload_coerces_string_encoded_values() {
        let payload: SearchPayload = serde_json::from_value(json!({
            "city": "spring",
            "minBedrooms": "2",
            "maxPrice": 300_000,
            "isActive": "true",
        }))
        .unwrap();

        let filter = read::listing::Filter::from(payload);
        assert_eq!(filter.city.as_deref(), Some("spring"));
        assert_eq!(filter.min_bedrooms, Some(2.0));
        assert_eq!(filter.max_price, Some(300_000.into()));
        assert_eq!(filter.is_active, Some(true));
    }

    #[test]
    fn multipart_fields_deserialize_into_payload() {
        let mut fields = serde_json::Map::new();
        for (key, value) in [
            ("title", "Cozy cottage"),
            ("price", "250000"),
            ("priceFrequency", "One-Time"),
            ("status", "Sale"),
            ("propertyType", "Single Family"),
            ("bedrooms", "3"),
            ("bathrooms", "2"),
            ("features", "[\"pool\",\"garage\"]"),
            ("address.street", "12 Elm St"),
            ("address.city", "Springfield"),
            ("address.state", "IL"),
            ("address.zip", "62704"),
            ("longitude", "-89.65"),
            ("latitude", "39.78"),
        ] {
            drop(fields.insert(
                key.to_owned(),
                serde_json::Value::String(value.to_owned()),
            ));
        }

        let fields = payload_from(fields).unwrap().into_fields().unwrap();
        assert_eq!(fields.bedrooms, 3.0);
        assert_eq!(fields.features, ["pool", "garage"]);
        assert_eq!(fields.address.street.as_deref(), Some("12 Elm St"));
        assert_eq!(fields.address.longitude, Some(-89.65));
        assert!(fields.is_active);
        assert!(!fields.is_featured);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let fields = serde_json::Map::new();

        assert!(payload_from(fields).unwrap().into_fields().is_err());
    }
}
