//! [`Command`] for creating a new [`Listing`].

use common::{operations::Insert, DateTime, Money};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::{
    Address, Image, PriceFrequency, PropertyType, Status, Title,
};
use crate::{
    domain::{listing, user, Listing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Listing`].
///
/// The payload is already normalized: the [`Address`] passed the address
/// normalizer and the media passed the associator.
#[derive(Clone, Debug)]
pub struct CreateListing {
    /// [`Title`] of a new [`Listing`].
    pub title: listing::Title,

    /// Price of a new [`Listing`].
    pub price: Money,

    /// [`PriceFrequency`] of a new [`Listing`].
    pub price_frequency: listing::PriceFrequency,

    /// [`Status`] of a new [`Listing`].
    pub status: listing::Status,

    /// [`PropertyType`] of a new [`Listing`].
    pub property_type: listing::PropertyType,

    /// Normalized [`Address`] of a new [`Listing`].
    pub address: listing::Address,

    /// Number of bedrooms of a new [`Listing`].
    pub bedrooms: f64,

    /// Number of bathrooms of a new [`Listing`].
    pub bathrooms: f64,

    /// Square footage of a new [`Listing`].
    pub square_footage: Option<f64>,

    /// Lot size of a new [`Listing`].
    pub lot_size: Option<f64>,

    /// Overview of a new [`Listing`].
    pub overview: Option<String>,

    /// Description of a new [`Listing`].
    pub description: Option<String>,

    /// Additional notes of a new [`Listing`].
    pub additional_notes: Option<String>,

    /// Virtual tour URL of a new [`Listing`].
    pub virtual_tour_url: Option<String>,

    /// Cover [`Image`] of a new [`Listing`].
    pub cover_img: Option<listing::Image>,

    /// Ordered gallery [`Image`]s of a new [`Listing`].
    pub images: Vec<listing::Image>,

    /// Features of a new [`Listing`].
    pub features: Vec<String>,

    /// Amenities of a new [`Listing`].
    pub amenities: Vec<String>,

    /// Labels of a new [`Listing`].
    pub labels: Vec<String>,

    /// [`DateTime`] since when a new [`Listing`] is available.
    pub available_from: Option<DateTime>,

    /// Featured flag of a new [`Listing`].
    pub is_featured: bool,

    /// Active flag of a new [`Listing`].
    pub is_active: bool,

    /// ID of the [`user::User`] creating the [`Listing`].
    pub created_by: user::Id,
}

impl<Db> Command<CreateListing> for Service<Db>
where
    Db: Database<Insert<Listing>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateListing,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateListing {
            title,
            price,
            price_frequency,
            status,
            property_type,
            address,
            bedrooms,
            bathrooms,
            square_footage,
            lot_size,
            overview,
            description,
            additional_notes,
            virtual_tour_url,
            cover_img,
            images,
            features,
            amenities,
            labels,
            available_from,
            is_featured,
            is_active,
            created_by,
        } = cmd;

        let now = DateTime::now();
        let listing = Listing {
            id: listing::Id::new(),
            property_id: listing::PropertyId::new(),
            title,
            price,
            price_frequency,
            status,
            property_type,
            address,
            bedrooms,
            bathrooms,
            square_footage,
            lot_size,
            overview,
            description,
            additional_notes,
            virtual_tour_url,
            cover_img,
            images,
            features,
            amenities,
            labels,
            available_from,
            is_featured,
            is_active,
            created_by: Some(created_by),
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        self.database()
            .execute(Insert(listing.clone()))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(listing)
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
pub type ExecutionError = database::Error;
