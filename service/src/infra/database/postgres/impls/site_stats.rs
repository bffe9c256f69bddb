//! [`SiteStats`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use postgres_types::Json;
use tracerr::Traced;

use crate::{
    domain::{site_stats::Stat, SiteStats},
    infra::{
        database::{
            self,
            postgres::{Connection as _, Postgres},
        },
        Database,
    },
};

impl Database<Insert<SiteStats>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(stats): Insert<SiteStats>,
    ) -> Result<Self::Ok, Self::Err> {
        let SiteStats { id, stats } = stats;
        let stats = Json(stats);

        const SQL: &str = "\
            INSERT INTO site_stats (id, stats) \
            VALUES ($1::UUID, $2::JSONB)";
        self.exec(SQL, &[&id, &stats])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl Database<Select<By<Option<SiteStats>, ()>>> for Postgres {
    type Ok = Option<SiteStats>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Option<SiteStats>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, stats \
            FROM site_stats \
            LIMIT 1";
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map(|row| SiteStats {
                    id: row.get("id"),
                    stats: row.get::<_, Json<Vec<Stat>>>("stats").0,
                })
            })
    }
}

impl Database<Update<SiteStats>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(stats): Update<SiteStats>,
    ) -> Result<Self::Ok, Self::Err> {
        let SiteStats { id, stats } = stats;
        let stats = Json(stats);

        const SQL: &str = "\
            UPDATE site_stats \
            SET stats = $2::JSONB \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id, &stats])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
