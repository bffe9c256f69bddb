//! [`ServiceRequest`] definitions.

use common::define_kind;
use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for an agency service left by a visitor.
#[derive(Clone, Debug)]
pub struct ServiceRequest {
    /// ID of this [`ServiceRequest`].
    pub id: Id,

    /// First name of the requester.
    pub first_name: String,

    /// Last name of the requester.
    pub last_name: String,

    /// [`PropertyType`] the request concerns.
    pub property_type: PropertyType,

    /// [`Condition`] of the property.
    pub condition: Condition,

    /// [`Intent`] of the requester.
    pub intent: Intent,

    /// Email of the requester.
    pub email: String,

    /// Phone number of the requester.
    pub phone: Option<String>,

    /// Free-form message.
    pub message: Option<String>,
}

/// ID of a [`ServiceRequest`].
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

define_kind! {
    #[doc = "Type of the property a [`ServiceRequest`] concerns."]
    enum PropertyType {
        #[doc = "A commercial property."]
        Commercial = "Commercial",

        #[doc = "A condominium."]
        Condo = "Condo",

        #[doc = "A house."]
        House = "House",

        #[doc = "A residential property."]
        Residential = "Residential",

        #[doc = "An apartment."]
        Apartment = "Apartment",
    }
}

define_kind! {
    #[doc = "Condition of the property a [`ServiceRequest`] concerns."]
    enum Condition {
        #[doc = "Excellent condition."]
        Excellent = "Excellent",

        #[doc = "Good condition."]
        Good = "Good",

        #[doc = "Fair condition."]
        Fair = "Fair",

        #[doc = "Poor condition."]
        Poor = "Poor",
    }
}

define_kind! {
    #[doc = "What the requester of a [`ServiceRequest`] wants to do."]
    enum Intent {
        #[doc = "Buy a property."]
        Buy = "Buy a Property",

        #[doc = "Sell a property."]
        Sell = "Sell a Property",

        #[doc = "Rent a property."]
        Rent = "Rent a Property",
    }
}
