//! [`Address`] definitions of a [`Listing`].

use derive_more::{AsRef, Display, Error};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

#[cfg(doc)]
use crate::domain::Listing;

/// Postal address of a [`Listing`] with its geospatial point.
#[derive(Clone, Debug, PartialEq)]
pub struct Address {
    /// [`Street`] of this [`Address`].
    pub street: Street,

    /// [`City`] of this [`Address`].
    pub city: City,

    /// [`State`] of this [`Address`].
    pub state: State,

    /// [`Zip`] code of this [`Address`].
    pub zip: Zip,

    /// [`Country`] of this [`Address`].
    pub country: Country,

    /// [`GeoPoint`] of this [`Address`].
    pub coordinates: GeoPoint,
}

impl Address {
    /// Normalizes the provided [`Input`] into an [`Address`].
    ///
    /// Street, city, state and zip are required; country defaults to
    /// [`Country::default()`]; coordinates degrade to
    /// [`GeoPoint::FALLBACK`] unless both are finite.
    ///
    /// # Errors
    ///
    /// Errors if a required field is missing or malformed. No persistence
    /// may be attempted once this fails.
    pub fn normalize(input: Input) -> Result<Self, InvalidAddress> {
        use InvalidAddress as E;

        let Input {
            street,
            city,
            state,
            zip,
            country,
            longitude,
            latitude,
        } = input;

        let street = Street::new(street.ok_or(E::Missing("street"))?)
            .ok_or(E::Malformed("street"))?;
        let city = City::new(city.ok_or(E::Missing("city"))?)
            .ok_or(E::Malformed("city"))?;
        let state = State::new(state.ok_or(E::Missing("state"))?)
            .ok_or(E::Malformed("state"))?;
        let zip =
            Zip::new(zip.ok_or(E::Missing("zip"))?).ok_or(E::Malformed("zip"))?;
        let country = match country {
            Some(c) => Country::new(c).ok_or(E::Malformed("country"))?,
            None => Country::default(),
        };

        Ok(Self {
            street,
            city,
            state,
            zip,
            country,
            coordinates: GeoPoint::from_parts(longitude, latitude),
        })
    }

    /// Normalizes the [`Input`] of an update request.
    ///
    /// [`None`] is returned when the address block is absent entirely, so
    /// the stored [`Address`] stays untouched. A complete block replaces it.
    ///
    /// # Errors
    ///
    /// Errors if the block is supplied partially: updates either resupply
    /// the whole address or none of it.
    pub fn normalize_partial(
        input: Input,
    ) -> Result<Option<Self>, InvalidAddress> {
        if input.street.is_none()
            && input.city.is_none()
            && input.state.is_none()
            && input.zip.is_none()
        {
            return Ok(None);
        }
        Self::normalize(input).map(Some)
    }
}

/// Raw address block as it arrives in a request payload.
#[derive(Clone, Debug, Default)]
pub struct Input {
    /// Street, required on creation.
    pub street: Option<String>,

    /// City, required on creation.
    pub city: Option<String>,

    /// State, required on creation.
    pub state: Option<String>,

    /// Zip code, required on creation.
    pub zip: Option<String>,

    /// Country, defaults to [`Country::default()`].
    pub country: Option<String>,

    /// Raw longitude.
    pub longitude: Option<f64>,

    /// Raw latitude.
    pub latitude: Option<f64>,
}

/// Error of normalizing an [`Input`] into an [`Address`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum InvalidAddress {
    /// Required address field is missing.
    #[display("`address.{_0}` is required")]
    Missing(#[error(not(source))] &'static str),

    /// Address field is present but malformed.
    #[display("`address.{_0}` is malformed")]
    Malformed(#[error(not(source))] &'static str),
}

/// Geospatial point of an [`Address`].
///
/// Both coordinates are finite, or the whole point is
/// [`GeoPoint::FALLBACK`]. Never partially valid: the stored schema
/// requires a well-formed point at all times.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    /// Longitude of this [`GeoPoint`].
    pub longitude: f64,

    /// Latitude of this [`GeoPoint`].
    pub latitude: f64,
}

impl GeoPoint {
    /// Valid-but-meaningless point substituted when no usable coordinates
    /// are supplied.
    pub const FALLBACK: Self = Self {
        longitude: 0.0,
        latitude: 0.0,
    };

    /// Builds a [`GeoPoint`] from raw optional coordinates.
    ///
    /// Degrades to [`GeoPoint::FALLBACK`] unless both coordinates are
    /// finite numbers.
    #[must_use]
    pub fn from_parts(longitude: Option<f64>, latitude: Option<f64>) -> Self {
        match (longitude, latitude) {
            (Some(longitude), Some(latitude))
                if longitude.is_finite() && latitude.is_finite() =>
            {
                Self {
                    longitude,
                    latitude,
                }
            }
            (Some(_) | None, Some(_) | None) => Self::FALLBACK,
        }
    }
}

/// Street of an [`Address`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Street(String);

impl Street {
    /// Creates a new [`Street`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `street` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(street: impl Into<String>) -> Self {
        Self(street.into())
    }

    /// Creates a new [`Street`] if the given `street` is valid.
    #[must_use]
    pub fn new(street: impl Into<String>) -> Option<Self> {
        let street = street.into();
        Self::check(&street).then_some(Self(street))
    }

    /// Checks whether the given `street` is a valid [`Street`].
    fn check(street: impl AsRef<str>) -> bool {
        let street = street.as_ref();
        street.trim() == street && !street.is_empty() && street.len() <= 512
    }
}

/// City of an [`Address`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct City(String);

impl City {
    /// Creates a new [`City`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `city` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(city: impl Into<String>) -> Self {
        Self(city.into())
    }

    /// Creates a new [`City`] if the given `city` is valid.
    #[must_use]
    pub fn new(city: impl Into<String>) -> Option<Self> {
        let city = city.into();
        Self::check(&city).then_some(Self(city))
    }

    /// Checks whether the given `city` is a valid [`City`].
    fn check(city: impl AsRef<str>) -> bool {
        let city = city.as_ref();
        city.trim() == city && !city.is_empty() && city.len() <= 512
    }
}

/// State of an [`Address`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct State(String);

impl State {
    /// Creates a new [`State`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `state` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(state: impl Into<String>) -> Self {
        Self(state.into())
    }

    /// Creates a new [`State`] if the given `state` is valid.
    #[must_use]
    pub fn new(state: impl Into<String>) -> Option<Self> {
        let state = state.into();
        Self::check(&state).then_some(Self(state))
    }

    /// Checks whether the given `state` is a valid [`State`].
    fn check(state: impl AsRef<str>) -> bool {
        let state = state.as_ref();
        state.trim() == state && !state.is_empty() && state.len() <= 512
    }
}

/// Zip code of an [`Address`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Zip(String);

impl Zip {
    /// Creates a new [`Zip`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `zip` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(zip: impl Into<String>) -> Self {
        Self(zip.into())
    }

    /// Creates a new [`Zip`] if the given `zip` is valid.
    #[must_use]
    pub fn new(zip: impl Into<String>) -> Option<Self> {
        let zip = zip.into();
        Self::check(&zip).then_some(Self(zip))
    }

    /// Checks whether the given `zip` is a valid [`Zip`].
    fn check(zip: impl AsRef<str>) -> bool {
        let zip = zip.as_ref();
        zip.trim() == zip && !zip.is_empty() && zip.len() <= 64
    }
}

/// Country of an [`Address`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Country(String);

impl Country {
    /// Creates a new [`Country`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `country` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(country: impl Into<String>) -> Self {
        Self(country.into())
    }

    /// Creates a new [`Country`] if the given `country` is valid.
    #[must_use]
    pub fn new(country: impl Into<String>) -> Option<Self> {
        let country = country.into();
        Self::check(&country).then_some(Self(country))
    }

    /// Checks whether the given `country` is a valid [`Country`].
    fn check(country: impl AsRef<str>) -> bool {
        let country = country.as_ref();
        country.trim() == country && !country.is_empty() && country.len() <= 512
    }
}

impl Default for Country {
    fn default() -> Self {
        Self("USA".to_owned())
    }
}

#[cfg(test)]
mod spec {
    use super::{Address, GeoPoint, Input, InvalidAddress};

    fn complete_input() -> Input {
        Input {
            street: Some("12 Elm St".to_owned()),
            city: Some("Springfield".to_owned()),
            state: Some("IL".to_owned()),
            zip: Some("62704".to_owned()),
            country: None,
            longitude: Some(-89.65),
            latitude: Some(39.78),
        }
    }

    #[test]
    fn keeps_supplied_finite_coordinates() {
        let address = Address::normalize(complete_input()).unwrap();

        assert_eq!(
            address.coordinates,
            GeoPoint {
                longitude: -89.65,
                latitude: 39.78,
            },
        );
        let country: &str = address.country.as_ref();
        assert_eq!(country, "USA");
    }

    #[test]
    fn degrades_unusable_coordinates_to_fallback() {
        for (longitude, latitude) in [
            (None, None),
            (Some(-89.65), None),
            (None, Some(39.78)),
            (Some(f64::NAN), Some(39.78)),
            (Some(-89.65), Some(f64::INFINITY)),
        ] {
            assert_eq!(
                GeoPoint::from_parts(longitude, latitude),
                GeoPoint::FALLBACK,
            );
        }
    }

    #[test]
    fn rejects_incomplete_block_before_persistence() {
        for missing in ["street", "city", "state", "zip"] {
            let mut input = complete_input();
            match missing {
                "street" => input.street = None,
                "city" => input.city = None,
                "state" => input.state = None,
                "zip" => input.zip = None,
                _ => unreachable!(),
            }

            assert!(matches!(
                Address::normalize(input),
                Err(InvalidAddress::Missing(field)) if field == missing,
            ));
        }
    }

    #[test]
    fn partial_update_block_is_rejected_not_ignored() {
        let input = Input {
            zip: None,
            ..complete_input()
        };

        assert!(matches!(
            Address::normalize_partial(input),
            Err(InvalidAddress::Missing("zip")),
        ));
    }

    #[test]
    fn absent_update_block_keeps_stored_address() {
        let input = Input {
            longitude: Some(1.0),
            latitude: Some(2.0),
            ..Input::default()
        };

        assert!(Address::normalize_partial(input).unwrap().is_none());
    }
}
