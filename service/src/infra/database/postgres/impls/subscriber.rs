//! [`Subscriber`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::Subscriber,
    infra::{
        database::{
            self,
            postgres::{Connection as _, Postgres},
        },
        Database,
    },
};

impl Database<Insert<Subscriber>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(subscriber): Insert<Subscriber>,
    ) -> Result<Self::Ok, Self::Err> {
        let Subscriber { id, email } = subscriber;

        const SQL: &str = "\
            INSERT INTO subscribers (id, email) \
            VALUES ($1::UUID, $2::VARCHAR)";
        self.exec(SQL, &[&id, &email])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<'e> Database<Select<By<Option<Subscriber>, &'e str>>> for Postgres {
    type Ok = Option<Subscriber>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Subscriber>, &'e str>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let email: &str = by.into_inner();

        const SQL: &str = "\
            SELECT id, email \
            FROM subscribers \
            WHERE email = $1::VARCHAR \
            LIMIT 1";
        self.query_opt(SQL, &[&email])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map(|row| Subscriber {
                    id: row.get("id"),
                    email: row.get("email"),
                })
            })
    }
}

impl Database<Delete<By<Subscriber, String>>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Subscriber, String>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let email: String = by.into_inner();

        const SQL: &str = "\
            DELETE FROM subscribers \
            WHERE email = $1::VARCHAR";
        self.exec(SQL, &[&email])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
