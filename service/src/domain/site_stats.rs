//! [`SiteStats`] definitions.

use derive_more::{Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Singleton record holding the landing page statistics.
#[derive(Clone, Debug)]
pub struct SiteStats {
    /// ID of this [`SiteStats`] record.
    pub id: Id,

    /// Statistic entries, in display order.
    pub stats: Vec<Stat>,
}

/// Single statistic entry of [`SiteStats`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Stat {
    /// Title of this [`Stat`].
    pub title: String,

    /// Value of this [`Stat`].
    pub value: f64,

    /// Icon identifier of this [`Stat`].
    pub icon: Option<String>,

    /// Display color of this [`Stat`].
    pub color: String,
}

/// ID of a [`SiteStats`] record.
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
