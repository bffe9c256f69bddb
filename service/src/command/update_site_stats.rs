//! [`Command`] for updating the [`SiteStats`] singleton.

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{site_stats, SiteStats},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] replacing the entries of the [`SiteStats`] singleton.
#[derive(Clone, Debug)]
pub struct UpdateSiteStats {
    /// New statistic entries, in display order.
    pub stats: Vec<site_stats::Stat>,
}

impl<Db> Command<UpdateSiteStats> for Service<Db>
where
    Db: Database<
            Select<By<Option<SiteStats>, ()>>,
            Ok = Option<SiteStats>,
            Err = Traced<database::Error>,
        > + Database<Update<SiteStats>, Ok = bool, Err = Traced<database::Error>>,
{
    type Ok = SiteStats;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateSiteStats,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateSiteStats { stats } = cmd;

        let stored = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::NotExists))?;

        let updated = SiteStats {
            id: stored.id,
            stats,
        };

        let found = self
            .database()
            .execute(Update(updated.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !found {
            return Err(tracerr::new!(E::NotExists));
        }

        Ok(updated)
    }
}

/// Error of [`UpdateSiteStats`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`SiteStats`] record exists to update.
    #[display("No `SiteStats` exist yet")]
    NotExists,
}
