//! [`Contact`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{contact, Contact},
    infra::{
        database::{
            self,
            postgres::{Connection as _, Postgres},
        },
        Database,
    },
};

impl Database<Insert<Contact>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(contact): Insert<Contact>,
    ) -> Result<Self::Ok, Self::Err> {
        let Contact {
            id,
            first_name,
            last_name,
            email,
            phone,
            message,
            created_at,
        } = contact;

        const SQL: &str = "\
            INSERT INTO contacts (\
                id, first_name, last_name, email, phone, message, created_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, $7::TIMESTAMPTZ \
            )";
        self.exec(
            SQL,
            &[
                &id,
                &first_name,
                &last_name,
                &email,
                &phone,
                &message,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl Database<Select<By<Vec<Contact>, ()>>> for Postgres {
    type Ok = Vec<Contact>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Contact>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, first_name, last_name, email, phone, message, \
                   created_at \
            FROM contacts \
            ORDER BY created_at DESC";
        self.query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| {
                rows.iter()
                    .map(|row| Contact {
                        id: row.get("id"),
                        first_name: row.get("first_name"),
                        last_name: row.get("last_name"),
                        email: row.get("email"),
                        phone: row.get("phone"),
                        message: row.get("message"),
                        created_at: row.get("created_at"),
                    })
                    .collect()
            })
    }
}

impl Database<Delete<By<Contact, contact::Id>>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Contact, contact::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: contact::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM contacts \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}
