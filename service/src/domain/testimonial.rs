//! [`Testimonial`] definitions.

use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client testimonial shown on the site.
#[derive(Clone, Debug)]
pub struct Testimonial {
    /// ID of this [`Testimonial`].
    pub id: Id,

    /// Name of the person giving this [`Testimonial`].
    pub name: String,

    /// Text of this [`Testimonial`].
    pub text: String,

    /// Role of the person giving this [`Testimonial`].
    pub role: Option<String>,

    /// Rating given along this [`Testimonial`].
    pub rating: f64,
}

/// ID of a [`Testimonial`].
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
