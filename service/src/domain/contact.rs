//! [`Contact`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact message left by a visitor.
#[derive(Clone, Debug)]
pub struct Contact {
    /// ID of this [`Contact`].
    pub id: Id,

    /// First name of the sender.
    pub first_name: String,

    /// Last name of the sender.
    pub last_name: String,

    /// Email of the sender.
    pub email: String,

    /// Phone number of the sender.
    pub phone: Option<String>,

    /// Message text.
    pub message: String,

    /// [`DateTime`] when this [`Contact`] was received.
    pub created_at: CreationDateTime,
}

/// ID of a [`Contact`].
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

/// [`DateTime`] when a [`Contact`] was received.
pub type CreationDateTime = DateTimeOf<(Contact, unit::Creation)>;
