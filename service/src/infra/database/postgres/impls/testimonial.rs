//! [`Testimonial`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::Testimonial,
    infra::{
        database::{
            self,
            postgres::{Connection as _, Postgres},
        },
        Database,
    },
};

impl Database<Insert<Testimonial>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(testimonial): Insert<Testimonial>,
    ) -> Result<Self::Ok, Self::Err> {
        let Testimonial {
            id,
            name,
            text,
            role,
            rating,
        } = testimonial;

        const SQL: &str = "\
            INSERT INTO testimonials (id, name, text, role, rating) \
            VALUES ($1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                    $5::FLOAT8)";
        self.exec(SQL, &[&id, &name, &text, &role, &rating])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl Database<Select<By<Vec<Testimonial>, ()>>> for Postgres {
    type Ok = Vec<Testimonial>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Testimonial>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, text, role, rating \
            FROM testimonials";
        self.query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| {
                rows.iter()
                    .map(|row| Testimonial {
                        id: row.get("id"),
                        name: row.get("name"),
                        text: row.get("text"),
                        role: row.get("role"),
                        rating: row.get("rating"),
                    })
                    .collect()
            })
    }
}
