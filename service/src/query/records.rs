//! Generic [`Query`] collection over repository-backed flat records.

use common::operations::By;

#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all records of type `R`.
pub type All<R> = DatabaseQuery<By<Vec<R>, ()>>;

/// Queries a single record of type `R` by `B`.
pub type One<R, B> = DatabaseQuery<By<Option<R>, B>>;
