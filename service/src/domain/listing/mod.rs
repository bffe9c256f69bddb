//! [`Listing`] definitions.

pub mod address;
pub mod media;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xxhash_rust::xxh3;

use crate::domain::user;

pub use self::{address::Address, media::Image};

/// House listing exposed by the platform.
#[derive(Clone, Debug)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// Short public identifier of this [`Listing`], distinct from its
    /// storage-assigned [`Id`].
    pub property_id: PropertyId,

    /// [`Title`] of this [`Listing`].
    pub title: Title,

    /// Price of this [`Listing`].
    pub price: Money,

    /// [`PriceFrequency`] of this [`Listing`].
    pub price_frequency: PriceFrequency,

    /// [`Status`] of this [`Listing`].
    pub status: Status,

    /// [`PropertyType`] of this [`Listing`].
    pub property_type: PropertyType,

    /// [`Address`] of this [`Listing`].
    pub address: Address,

    /// Number of bedrooms in this [`Listing`].
    pub bedrooms: f64,

    /// Number of bathrooms in this [`Listing`], halves allowed.
    pub bathrooms: f64,

    /// Interior area of this [`Listing`] in square feet.
    pub square_footage: Option<f64>,

    /// Lot size of this [`Listing`].
    pub lot_size: Option<f64>,

    /// Short overview of this [`Listing`].
    pub overview: Option<String>,

    /// Full description of this [`Listing`].
    pub description: Option<String>,

    /// Additional notes on this [`Listing`].
    pub additional_notes: Option<String>,

    /// Virtual tour URL of this [`Listing`].
    pub virtual_tour_url: Option<String>,

    /// Designated cover [`Image`] of this [`Listing`].
    pub cover_img: Option<Image>,

    /// Ordered gallery [`Image`]s of this [`Listing`].
    pub images: Vec<Image>,

    /// Features of this [`Listing`].
    pub features: Vec<String>,

    /// Amenities of this [`Listing`].
    pub amenities: Vec<String>,

    /// Labels of this [`Listing`].
    pub labels: Vec<String>,

    /// [`DateTime`] since when this [`Listing`] is available.
    pub available_from: Option<common::DateTime>,

    /// Indicator whether this [`Listing`] is featured on the landing page.
    pub is_featured: bool,

    /// Indicator whether this [`Listing`] is visible in the public feed.
    ///
    /// Inactive [`Listing`]s remain retrievable by [`Id`].
    pub is_active: bool,

    /// ID of the [`user::User`] who created this [`Listing`].
    pub created_by: Option<user::Id>,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Listing`] was last updated.
    ///
    /// Stamped on every mutation.
    pub updated_at: UpdateDateTime,
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Short public identifier of a [`Listing`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct PropertyId(String);

impl PropertyId {
    /// Generates a new random [`PropertyId`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Derives a [`PropertyId`] from the provided [`Uuid`].
    ///
    /// The derivation is deterministic: the [`Uuid`] bytes are hashed with
    /// xxh3 and rendered in base 36, yielding at most 13 characters.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

        let mut hash = xxh3::xxh3_64(uuid.as_bytes());
        let mut id = String::with_capacity(13);
        if hash == 0 {
            id.push('0');
        }
        while hash > 0 {
            id.push(char::from(ALPHABET[(hash % 36) as usize]));
            hash /= 36;
        }
        Self(id)
    }
}

impl Default for PropertyId {
    fn default() -> Self {
        Self::new()
    }
}

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

define_kind! {
    #[doc = "Billing frequency of a [`Listing`] price."]
    enum PriceFrequency {
        #[doc = "Price is due monthly."]
        Monthly = "Monthly",

        #[doc = "Price is due yearly."]
        Yearly = "Yearly",

        #[doc = "Price is due once."]
        OneTime = "One-Time",
    }
}

define_kind! {
    #[doc = "Market status of a [`Listing`]."]
    enum Status {
        #[doc = "Offered for rent."]
        Rent = "Rent",

        #[doc = "Offered for sale."]
        Sale = "Sale",

        #[doc = "Deal is pending."]
        Pending = "Pending",

        #[doc = "Already sold or rented out."]
        SoldRented = "Sold/Rented",
    }
}

define_kind! {
    #[doc = "Type of the property a [`Listing`] offers."]
    enum PropertyType {
        #[doc = "A townhouse."]
        Townhouse = "Townhouse",

        #[doc = "An apartment."]
        Apartment = "Apartment",

        #[doc = "A single family house."]
        SingleFamily = "Single Family",

        #[doc = "A condominium."]
        Condo = "Condo",

        #[doc = "A villa."]
        Villa = "Villa",

        #[doc = "Anything else."]
        Other = "Other",
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

/// [`DateTime`] when a [`Listing`] was last updated.
pub type UpdateDateTime = DateTimeOf<(Listing, unit::Update)>;

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use uuid::Uuid;

    use super::{PriceFrequency, PropertyId, PropertyType, Status, Title};

    #[test]
    fn property_id_is_short_and_deterministic() {
        let uuid = Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef);

        let id = PropertyId::from_uuid(uuid);
        assert_eq!(id, PropertyId::from_uuid(uuid));

        let repr: &str = id.as_ref();
        assert!(!repr.is_empty());
        assert!(repr.len() <= 13);
        assert!(repr.chars().all(|c| c.is_ascii_lowercase()
            || c.is_ascii_digit()));
    }

    #[test]
    fn property_id_is_unique_per_uuid() {
        assert_ne!(
            PropertyId::from_uuid(Uuid::from_u128(1)),
            PropertyId::from_uuid(Uuid::from_u128(2)),
        );
    }

    #[test]
    fn kinds_round_trip_canonical_reprs() {
        assert_eq!(Status::SoldRented.as_str(), "Sold/Rented");
        assert_eq!(
            Status::from_str("Sold/Rented").unwrap(),
            Status::SoldRented,
        );

        assert_eq!(PriceFrequency::OneTime.as_str(), "One-Time");
        assert_eq!(
            PriceFrequency::from_str("One-Time").unwrap(),
            PriceFrequency::OneTime,
        );

        assert_eq!(PropertyType::SingleFamily.as_str(), "Single Family");
        assert_eq!(
            PropertyType::from_str("Single Family").unwrap(),
            PropertyType::SingleFamily,
        );

        assert!(Status::from_str("sold").is_err());
    }

    #[test]
    fn title_rejects_blank_and_padded() {
        assert!(Title::new("Cozy cottage").is_some());
        assert!(Title::new("").is_none());
        assert!(Title::new("  padded  ").is_none());
    }
}
