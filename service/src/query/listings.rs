//! [`Query`] collection related to multiple [`Listing`]s.

use common::operations::By;

use crate::{domain::Listing, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`Listing`]s visible in the public feed.
pub type Active = DatabaseQuery<By<Vec<Listing>, read::listing::Active>>;

/// Queries [`Listing`]s matching a sparse [`Filter`].
///
/// [`Filter`]: read::listing::Filter
pub type Search = DatabaseQuery<By<Vec<Listing>, read::listing::Filter>>;
