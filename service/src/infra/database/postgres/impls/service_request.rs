//! [`ServiceRequest`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{service_request, ServiceRequest},
    infra::{
        database::{
            self,
            postgres::{Connection as _, Postgres},
        },
        Database,
    },
};

/// Maps a full `service_requests` row into a [`ServiceRequest`].
fn from_row(row: &Row) -> ServiceRequest {
    ServiceRequest {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        property_type: row.get("property_type"),
        condition: row.get("condition"),
        intent: row.get("intent"),
        email: row.get("email"),
        phone: row.get("phone"),
        message: row.get("message"),
    }
}

impl Database<Insert<ServiceRequest>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(request): Insert<ServiceRequest>,
    ) -> Result<Self::Ok, Self::Err> {
        let ServiceRequest {
            id,
            first_name,
            last_name,
            property_type,
            condition,
            intent,
            email,
            phone,
            message,
        } = request;

        const SQL: &str = "\
            INSERT INTO service_requests (\
                id, first_name, last_name, property_type, condition, \
                intent, email, phone, message \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, \
                $9::VARCHAR \
            )";
        self.exec(
            SQL,
            &[
                &id,
                &first_name,
                &last_name,
                &property_type,
                &condition,
                &intent,
                &email,
                &phone,
                &message,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl Database<Update<ServiceRequest>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(request): Update<ServiceRequest>,
    ) -> Result<Self::Ok, Self::Err> {
        let ServiceRequest {
            id,
            first_name,
            last_name,
            property_type,
            condition,
            intent,
            email,
            phone,
            message,
        } = request;

        const SQL: &str = "\
            UPDATE service_requests \
            SET first_name = $2::VARCHAR, \
                last_name = $3::VARCHAR, \
                property_type = $4::VARCHAR, \
                condition = $5::VARCHAR, \
                intent = $6::VARCHAR, \
                email = $7::VARCHAR, \
                phone = $8::VARCHAR, \
                message = $9::VARCHAR \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &id,
                &first_name,
                &last_name,
                &property_type,
                &condition,
                &intent,
                &email,
                &phone,
                &message,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|affected| affected > 0)
    }
}

impl Database<Delete<By<ServiceRequest, service_request::Id>>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<ServiceRequest, service_request::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: service_request::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM service_requests \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}

impl Database<Select<By<Option<ServiceRequest>, service_request::Id>>>
    for Postgres
{
    type Ok = Option<ServiceRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<ServiceRequest>, service_request::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: service_request::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, first_name, last_name, property_type, condition, \
                   intent, email, phone, message \
            FROM service_requests \
            WHERE id = $1::UUID \
            LIMIT 1";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl Database<Select<By<Vec<ServiceRequest>, ()>>> for Postgres {
    type Ok = Vec<ServiceRequest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<ServiceRequest>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, first_name, last_name, property_type, condition, \
                   intent, email, phone, message \
            FROM service_requests";
        self.query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(from_row).collect())
    }
}
