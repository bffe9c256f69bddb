//! [`Review`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::Review,
    infra::{
        database::{
            self,
            postgres::{Connection as _, Postgres},
        },
        Database,
    },
};

impl Database<Insert<Review>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(review): Insert<Review>,
    ) -> Result<Self::Ok, Self::Err> {
        let Review {
            id,
            name,
            email,
            rating,
            review,
        } = review;

        const SQL: &str = "\
            INSERT INTO reviews (id, name, email, rating, review) \
            VALUES ($1::UUID, $2::VARCHAR, $3::VARCHAR, $4::FLOAT8, \
                    $5::VARCHAR)";
        self.exec(SQL, &[&id, &name, &email, &rating, &review])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl Database<Select<By<Vec<Review>, ()>>> for Postgres {
    type Ok = Vec<Review>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Review>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, email, rating, review \
            FROM reviews";
        self.query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| {
                rows.iter()
                    .map(|row| Review {
                        id: row.get("id"),
                        name: row.get("name"),
                        email: row.get("email"),
                        rating: row.get("rating"),
                        review: row.get("review"),
                    })
                    .collect()
            })
    }
}
