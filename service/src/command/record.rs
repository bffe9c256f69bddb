//! Generic [`Command`]s over repository-backed flat records.
//!
//! Every plain resource (testimonials, reviews, contacts, service
//! requests, site statistics) shares these instead of hand-duplicated
//! per-resource commands.

use common::operations::{By, Delete, Insert, Update};
use tracerr::Traced;

use crate::{
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new record of type `R`.
#[derive(Clone, Copy, Debug)]
pub struct CreateRecord<R>(pub R);

impl<Db, R> Command<CreateRecord<R>> for Service<Db>
where
    Db: Database<Insert<R>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CreateRecord(record): CreateRecord<R>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Insert(record))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Command`] replacing an existing record of type `R` wholesale.
///
/// Resolves to `false` when no record matches the replacement.
#[derive(Clone, Copy, Debug)]
pub struct ReplaceRecord<R>(pub R);

impl<Db, R> Command<ReplaceRecord<R>> for Service<Db>
where
    Db: Database<Update<R>, Ok = bool, Err = Traced<database::Error>>,
{
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        ReplaceRecord(record): ReplaceRecord<R>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Update(record))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// [`Command`] deleting a record of type `W` by `B`.
///
/// Resolves to `false` when no record matches.
#[derive(Clone, Copy, Debug)]
pub struct DeleteRecord<W, B>(pub By<W, B>);

impl<W, B> DeleteRecord<W, B> {
    /// Creates a new [`DeleteRecord`] deleting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<Db, W, B> Command<DeleteRecord<W, B>> for Service<Db>
where
    Db: Database<Delete<By<W, B>>, Ok = bool, Err = Traced<database::Error>>,
{
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        DeleteRecord(by): DeleteRecord<W, B>,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Delete(by))
            .await
            .map_err(tracerr::wrap!())
    }
}

/// Error of a generic record [`Command`] execution.
pub type ExecutionError = database::Error;
