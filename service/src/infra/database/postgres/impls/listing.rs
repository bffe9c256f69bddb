//! [`Listing`]-related [`Database`] implementations.

use std::error::Error as StdError;

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use postgres_types::{
    private::BytesMut, to_sql_checked, IsNull, Json, ToSql, Type,
};
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        listing::{
            self,
            address::{Address, GeoPoint},
            Image,
        },
        Listing,
    },
    infra::{
        database::{
            self,
            postgres::{Connection as _, LikePattern, Postgres},
        },
        Database,
    },
    read,
};

/// Column list of a full `listings` row.
const COLUMNS: &str = "\
    id, property_id, title, \
    price, price_unit, price_frequency, \
    status, property_type, \
    street, city, state, zip, country, longitude, latitude, \
    bedrooms, bathrooms, square_footage, lot_size, \
    overview, description, additional_notes, virtual_tour_url, \
    cover_img, images, \
    features, amenities, labels, \
    available_from, is_featured, is_active, \
    created_by, created_at, updated_at";

/// Maps a full `listings` row into a [`Listing`].
fn from_row(row: &Row) -> Listing {
    Listing {
        id: row.get("id"),
        property_id: row.get("property_id"),
        title: row.get("title"),
        price: Money {
            amount: row.get("price"),
            currency: row.get("price_unit"),
        },
        price_frequency: row.get("price_frequency"),
        status: row.get("status"),
        property_type: row.get("property_type"),
        address: Address {
            street: row.get("street"),
            city: row.get("city"),
            state: row.get("state"),
            zip: row.get("zip"),
            country: row.get("country"),
            coordinates: GeoPoint {
                longitude: row.get("longitude"),
                latitude: row.get("latitude"),
            },
        },
        bedrooms: row.get("bedrooms"),
        bathrooms: row.get("bathrooms"),
        square_footage: row.get("square_footage"),
        lot_size: row.get("lot_size"),
        overview: row.get("overview"),
        description: row.get("description"),
        additional_notes: row.get("additional_notes"),
        virtual_tour_url: row.get("virtual_tour_url"),
        cover_img: row
            .get::<_, Option<Json<Image>>>("cover_img")
            .map(|Json(img)| img),
        images: row.get::<_, Json<Vec<Image>>>("images").0,
        features: row.get("features"),
        amenities: row.get("amenities"),
        labels: row.get("labels"),
        available_from: row.get("available_from"),
        is_featured: row.get("is_featured"),
        is_active: row.get("is_active"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Database<Insert<Listing>> for Postgres {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let Listing {
            id,
            property_id,
            title,
            price: Money {
                amount: price,
                currency: price_unit,
            },
            price_frequency,
            status,
            property_type,
            address:
                Address {
                    street,
                    city,
                    state,
                    zip,
                    country,
                    coordinates: GeoPoint {
                        longitude,
                        latitude,
                    },
                },
            bedrooms,
            bathrooms,
            square_footage,
            lot_size,
            overview,
            description,
            additional_notes,
            virtual_tour_url,
            cover_img,
            images,
            features,
            amenities,
            labels,
            available_from,
            is_featured,
            is_active,
            created_by,
            created_at,
            updated_at,
        } = listing;

        let cover_img = cover_img.map(Json);
        let images = Json(images);

        const SQL: &str = "\
            INSERT INTO listings (\
                id, property_id, title, \
                price, price_unit, price_frequency, \
                status, property_type, \
                street, city, state, zip, country, longitude, latitude, \
                bedrooms, bathrooms, square_footage, lot_size, \
                overview, description, additional_notes, virtual_tour_url, \
                cover_img, images, \
                features, amenities, labels, \
                available_from, is_featured, is_active, \
                created_by, created_at, updated_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, \
                $4::NUMERIC, $5::VARCHAR, $6::VARCHAR, \
                $7::VARCHAR, $8::VARCHAR, \
                $9::VARCHAR, $10::VARCHAR, $11::VARCHAR, $12::VARCHAR, \
                $13::VARCHAR, $14::FLOAT8, $15::FLOAT8, \
                $16::FLOAT8, $17::FLOAT8, $18::FLOAT8, $19::FLOAT8, \
                $20::VARCHAR, $21::VARCHAR, $22::VARCHAR, $23::VARCHAR, \
                $24::JSONB, $25::JSONB, \
                $26::VARCHAR[], $27::VARCHAR[], $28::VARCHAR[], \
                $29::TIMESTAMPTZ, $30::BOOL, $31::BOOL, \
                $32::UUID, $33::TIMESTAMPTZ, $34::TIMESTAMPTZ \
            )";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &title,
                &price,
                &price_unit,
                &price_frequency,
                &status,
                &property_type,
                &street,
                &city,
                &state,
                &zip,
                &country,
                &longitude,
                &latitude,
                &bedrooms,
                &bathrooms,
                &square_footage,
                &lot_size,
                &overview,
                &description,
                &additional_notes,
                &virtual_tour_url,
                &cover_img,
                &images,
                &features,
                &amenities,
                &labels,
                &available_from,
                &is_featured,
                &is_active,
                &created_by,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl Database<Update<Listing>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(listing): Update<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let Listing {
            id,
            property_id,
            title,
            price: Money {
                amount: price,
                currency: price_unit,
            },
            price_frequency,
            status,
            property_type,
            address:
                Address {
                    street,
                    city,
                    state,
                    zip,
                    country,
                    coordinates: GeoPoint {
                        longitude,
                        latitude,
                    },
                },
            bedrooms,
            bathrooms,
            square_footage,
            lot_size,
            overview,
            description,
            additional_notes,
            virtual_tour_url,
            cover_img,
            images,
            features,
            amenities,
            labels,
            available_from,
            is_featured,
            is_active,
            created_by,
            created_at,
            updated_at,
        } = listing;

        let cover_img = cover_img.map(Json);
        let images = Json(images);

        const SQL: &str = "\
            UPDATE listings \
            SET property_id = $2::VARCHAR, \
                title = $3::VARCHAR, \
                price = $4::NUMERIC, \
                price_unit = $5::VARCHAR, \
                price_frequency = $6::VARCHAR, \
                status = $7::VARCHAR, \
                property_type = $8::VARCHAR, \
                street = $9::VARCHAR, \
                city = $10::VARCHAR, \
                state = $11::VARCHAR, \
                zip = $12::VARCHAR, \
                country = $13::VARCHAR, \
                longitude = $14::FLOAT8, \
                latitude = $15::FLOAT8, \
                bedrooms = $16::FLOAT8, \
                bathrooms = $17::FLOAT8, \
                square_footage = $18::FLOAT8, \
                lot_size = $19::FLOAT8, \
                overview = $20::VARCHAR, \
                description = $21::VARCHAR, \
                additional_notes = $22::VARCHAR, \
                virtual_tour_url = $23::VARCHAR, \
                cover_img = $24::JSONB, \
                images = $25::JSONB, \
                features = $26::VARCHAR[], \
                amenities = $27::VARCHAR[], \
                labels = $28::VARCHAR[], \
                available_from = $29::TIMESTAMPTZ, \
                is_featured = $30::BOOL, \
                is_active = $31::BOOL, \
                created_by = $32::UUID, \
                created_at = $33::TIMESTAMPTZ, \
                updated_at = $34::TIMESTAMPTZ \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &id,
                &property_id,
                &title,
                &price,
                &price_unit,
                &price_frequency,
                &status,
                &property_type,
                &street,
                &city,
                &state,
                &zip,
                &country,
                &longitude,
                &latitude,
                &bedrooms,
                &bathrooms,
                &square_footage,
                &lot_size,
                &overview,
                &description,
                &additional_notes,
                &virtual_tour_url,
                &cover_img,
                &images,
                &features,
                &amenities,
                &labels,
                &available_from,
                &is_featured,
                &is_active,
                &created_by,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|affected| affected > 0)
    }
}

impl Database<Delete<By<Listing, listing::Id>>> for Postgres {
    type Ok = bool;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Listing, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: listing::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM listings \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|affected| affected > 0)
    }
}

impl Database<Select<By<Option<Listing>, listing::Id>>> for Postgres {
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: listing::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM listings \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl Database<Select<By<Vec<Listing>, read::listing::Active>>> for Postgres {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Listing>, read::listing::Active>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {COLUMNS} \
             FROM listings \
             WHERE is_active \
             ORDER BY created_at DESC",
        );
        self.query(&sql, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(from_row).collect())
    }
}

impl Database<Select<By<Vec<Listing>, read::listing::Filter>>> for Postgres {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, read::listing::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let (sql, binds) = search_sql(&filter);
        let params = binds
            .iter()
            .map(|bind| -> &(dyn ToSql + Sync) { bind })
            .collect::<Vec<_>>();

        self.query(&sql, &params)
            .await
            .map_err(tracerr::wrap!())
            .map(|rows| rows.iter().map(from_row).collect())
    }
}

/// Builds the SQL of a [`read::listing::Filter`] search.
///
/// Every present field contributes exactly one clause and one [`Bind`]; an
/// absent field contributes nothing, so the empty filter selects every
/// row.
fn search_sql(filter: &read::listing::Filter) -> (String, Vec<Bind>) {
    let read::listing::Filter {
        city,
        state,
        zip,
        country,
        status,
        property_type,
        min_price,
        max_price,
        min_bedrooms,
        max_bedrooms,
        min_bathrooms,
        max_bathrooms,
        min_area,
        max_area,
        is_featured,
        is_active,
    } = filter;

    let mut sql = format!(
        "SELECT {COLUMNS} \
         FROM listings \
         WHERE true",
    );
    let mut binds = Vec::new();

    for (column, value) in [
        ("city", city),
        ("state", state),
        ("zip", zip),
        ("country", country),
        ("status", status),
        ("property_type", property_type),
    ] {
        if let Some(value) = value {
            binds.push(Bind::Pattern(LikePattern::contains(value)));
            sql.push_str(&format!(
                " AND {column} ILIKE ${}::VARCHAR",
                binds.len(),
            ));
        }
    }

    for (op, bound) in [(">=", min_price), ("<=", max_price)] {
        if let Some(bound) = bound {
            binds.push(Bind::Amount(*bound));
            sql.push_str(&format!(" AND price {op} ${}::NUMERIC", binds.len()));
        }
    }

    for (column, op, bound) in [
        ("bedrooms", ">=", min_bedrooms),
        ("bedrooms", "<=", max_bedrooms),
        ("bathrooms", ">=", min_bathrooms),
        ("bathrooms", "<=", max_bathrooms),
        ("square_footage", ">=", min_area),
        ("square_footage", "<=", max_area),
    ] {
        if let Some(bound) = bound {
            binds.push(Bind::Number(*bound));
            sql.push_str(&format!(
                " AND {column} {op} ${}::FLOAT8",
                binds.len(),
            ));
        }
    }

    for (column, flag) in [("is_featured", is_featured), ("is_active", is_active)]
    {
        if let Some(flag) = flag {
            binds.push(Bind::Flag(*flag));
            sql.push_str(&format!(" AND {column} = ${}::BOOL", binds.len()));
        }
    }

    (sql, binds)
}

/// Owned SQL parameter of a dynamically built search query.
#[derive(Clone, Debug, PartialEq)]
enum Bind {
    /// Substring pattern bound to an `ILIKE` match.
    Pattern(LikePattern),

    /// Price bound.
    Amount(Decimal),

    /// Numeric bound.
    Number(f64),

    /// Boolean flag.
    Flag(bool),
}

impl ToSql for Bind {
    to_sql_checked!();

    fn to_sql(
        &self,
        ty: &Type,
        w: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn StdError + Sync + Send>> {
        match self {
            Self::Pattern(v) => v.to_sql(ty, w),
            Self::Amount(v) => v.to_sql(ty, w),
            Self::Number(v) => v.to_sql(ty, w),
            Self::Flag(v) => v.to_sql(ty, w),
        }
    }

    fn accepts(ty: &Type) -> bool {
        <LikePattern as ToSql>::accepts(ty)
            || <Decimal as ToSql>::accepts(ty)
            || <f64 as ToSql>::accepts(ty)
            || <bool as ToSql>::accepts(ty)
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use crate::{infra::database::postgres::LikePattern, read};

    use super::{search_sql, Bind, COLUMNS};

    #[test]
    fn empty_filter_imposes_no_constraint() {
        let (sql, binds) = search_sql(&read::listing::Filter::default());

        assert_eq!(
            sql,
            format!("SELECT {COLUMNS} FROM listings WHERE true"),
        );
        assert!(binds.is_empty());
    }

    #[test]
    fn textual_fields_match_as_substring_patterns() {
        let filter = read::listing::Filter {
            city: Some("spring".to_owned()),
            property_type: Some("apart".to_owned()),
            ..read::listing::Filter::default()
        };

        let (sql, binds) = search_sql(&filter);

        assert!(sql.ends_with(
            " AND city ILIKE $1::VARCHAR \
             AND property_type ILIKE $2::VARCHAR",
        ));
        assert_eq!(
            binds,
            [
                Bind::Pattern(LikePattern::contains("spring")),
                Bind::Pattern(LikePattern::contains("apart")),
            ],
        );
    }

    #[test]
    fn bounds_are_independent_and_open_ended() {
        let filter = read::listing::Filter {
            min_bedrooms: Some(2.0),
            max_price: Some(Decimal::from(300_000)),
            ..read::listing::Filter::default()
        };

        let (sql, binds) = search_sql(&filter);

        assert!(sql.ends_with(
            " AND price <= $1::NUMERIC AND bedrooms >= $2::FLOAT8",
        ));
        assert_eq!(
            binds,
            [
                Bind::Amount(Decimal::from(300_000)),
                Bind::Number(2.0),
            ],
        );
    }

    #[test]
    fn flags_match_exactly() {
        let filter = read::listing::Filter {
            is_active: Some(true),
            ..read::listing::Filter::default()
        };

        let (sql, binds) = search_sql(&filter);

        assert!(sql.ends_with(" AND is_active = $1::BOOL"));
        assert_eq!(binds, [Bind::Flag(true)]);
    }

    #[test]
    fn every_field_contributes_one_clause() {
        let filter = read::listing::Filter {
            city: Some("Springfield".to_owned()),
            state: Some("IL".to_owned()),
            zip: Some("62704".to_owned()),
            country: Some("USA".to_owned()),
            status: Some("Rent".to_owned()),
            property_type: Some("Condo".to_owned()),
            min_price: Some(Decimal::from(1_000)),
            max_price: Some(Decimal::from(2_000)),
            min_bedrooms: Some(1.0),
            max_bedrooms: Some(4.0),
            min_bathrooms: Some(1.0),
            max_bathrooms: Some(3.0),
            min_area: Some(500.0),
            max_area: Some(2_500.0),
            is_featured: Some(false),
            is_active: Some(true),
        };

        let (sql, binds) = search_sql(&filter);

        assert_eq!(binds.len(), 16);
        assert_eq!(sql.matches(" AND ").count(), 16);
    }
}
