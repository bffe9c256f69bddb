//! [`Listing`]-related read definitions.

use rust_decimal::Decimal;

#[cfg(doc)]
use crate::domain::Listing;

/// Marker selecting [`Listing`]s visible in the public feed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Active;

/// Sparse search filter over [`Listing`]s.
///
/// Every field is optional. An absent field imposes no constraint at all,
/// so the empty [`Filter`] selects every [`Listing`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    /// City substring to match, case-insensitively.
    pub city: Option<String>,

    /// State substring to match, case-insensitively.
    pub state: Option<String>,

    /// Zip code substring to match, case-insensitively.
    pub zip: Option<String>,

    /// Country substring to match, case-insensitively.
    pub country: Option<String>,

    /// Status substring to match, case-insensitively.
    pub status: Option<String>,

    /// Property type substring to match, case-insensitively.
    pub property_type: Option<String>,

    /// Lower price bound, inclusive.
    pub min_price: Option<Decimal>,

    /// Upper price bound, inclusive.
    pub max_price: Option<Decimal>,

    /// Lower bedrooms bound, inclusive.
    pub min_bedrooms: Option<f64>,

    /// Upper bedrooms bound, inclusive.
    pub max_bedrooms: Option<f64>,

    /// Lower bathrooms bound, inclusive.
    pub min_bathrooms: Option<f64>,

    /// Upper bathrooms bound, inclusive.
    pub max_bathrooms: Option<f64>,

    /// Lower square footage bound, inclusive.
    pub min_area: Option<f64>,

    /// Upper square footage bound, inclusive.
    pub max_area: Option<f64>,

    /// Exact featured flag to match.
    pub is_featured: Option<bool>,

    /// Exact active flag to match.
    pub is_active: Option<bool>,
}
