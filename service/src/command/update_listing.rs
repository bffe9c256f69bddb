//! [`Command`] for updating an existing [`Listing`].

use common::{
    operations::{By, Select, Update},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::{
    Address, Image, PriceFrequency, PropertyType, Status, Title,
};
use crate::{
    domain::{listing, Listing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Listing`].
///
/// Every update re-supplies the full payload: scalar fields and the
/// categorical sets are overwritten wholesale. The [`Address`] and the
/// media are the exceptions: [`None`] keeps the stored value, while a
/// supplied value replaces it outright — a partial address block never
/// reaches this [`Command`], the normalizer rejects it beforehand.
#[derive(Clone, Debug)]
pub struct UpdateListing {
    /// ID of the [`Listing`] to update.
    pub id: listing::Id,

    /// New [`Title`] of the [`Listing`].
    pub title: listing::Title,

    /// New price of the [`Listing`].
    pub price: Money,

    /// New [`PriceFrequency`] of the [`Listing`].
    pub price_frequency: listing::PriceFrequency,

    /// New [`Status`] of the [`Listing`].
    pub status: listing::Status,

    /// New [`PropertyType`] of the [`Listing`].
    pub property_type: listing::PropertyType,

    /// New [`Address`] of the [`Listing`], if resupplied.
    pub address: Option<listing::Address>,

    /// New number of bedrooms of the [`Listing`].
    pub bedrooms: f64,

    /// New number of bathrooms of the [`Listing`].
    pub bathrooms: f64,

    /// New square footage of the [`Listing`].
    pub square_footage: Option<f64>,

    /// New lot size of the [`Listing`].
    pub lot_size: Option<f64>,

    /// New overview of the [`Listing`].
    pub overview: Option<String>,

    /// New description of the [`Listing`].
    pub description: Option<String>,

    /// New additional notes of the [`Listing`].
    pub additional_notes: Option<String>,

    /// New virtual tour URL of the [`Listing`].
    pub virtual_tour_url: Option<String>,

    /// New cover [`Image`], if a new file was uploaded.
    pub cover_img: Option<listing::Image>,

    /// New gallery [`Image`]s, if new files were uploaded.
    ///
    /// Replaces the stored sequence outright; there is no incremental
    /// add/remove of individual images.
    pub images: Option<Vec<listing::Image>>,

    /// New features of the [`Listing`].
    pub features: Vec<String>,

    /// New amenities of the [`Listing`].
    pub amenities: Vec<String>,

    /// New labels of the [`Listing`].
    pub labels: Vec<String>,

    /// New availability [`DateTime`] of the [`Listing`].
    pub available_from: Option<DateTime>,

    /// New featured flag of the [`Listing`].
    pub is_featured: bool,

    /// New active flag of the [`Listing`].
    pub is_active: bool,
}

impl<Db> Command<UpdateListing> for Service<Db>
where
    Db: Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<Update<Listing>, Ok = bool, Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListing {
            id,
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
        } = cmd;

        let stored = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::NotExists(id)))?;

        let listing = Listing {
            id: stored.id,
            property_id: stored.property_id,
            title,
            price,
            price_frequency,
            status,
            property_type,
            address: address.unwrap_or(stored.address),
            bedrooms,
            bathrooms,
            square_footage,
            lot_size,
            overview,
            description,
            additional_notes,
            virtual_tour_url,
            cover_img: cover_img.or(stored.cover_img),
            images: images.unwrap_or(stored.images),
            features,
            amenities,
            labels,
            available_from,
            is_featured,
            is_active,
            created_by: stored.created_by,
            created_at: stored.created_at,
            updated_at: DateTime::now().coerce(),
        };

        let found = self
            .database()
            .execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !found {
            // Deleted between the select and the update.
            return Err(tracerr::new!(E::NotExists(id)));
        }

        Ok(listing)
    }
}

/// Error of [`UpdateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Listing`] does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    NotExists(#[error(not(source))] listing::Id),
}
