//! Write path used by the importer.
//!
//! Every insert runs inside a caller-owned transaction so that an import pass
//! commits all of its rows at once or none of them.

use anyhow::Result;
use sqlx::{Row, Sqlite, Transaction};

use crate::models::{NewRoute, NewStop};

/// Owner of a set of accessibility labels.
#[derive(Debug, Clone, Copy)]
enum LabelOwner {
    Route(i64),
    Stop(i64),
}

/// Insert a route and a fresh label row for each of its labels.
///
/// Returns the id of the new route.
pub async fn insert_route(tx: &mut Transaction<'_, Sqlite>, route: &NewRoute) -> Result<i64> {
    let route_id = sqlx::query(
        r#"
        INSERT INTO bus_routes (name, description, origin, destination, stif_code)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&route.name)
    .bind(&route.description)
    .bind(&route.origin)
    .bind(&route.destination)
    .bind(&route.stif_code)
    .fetch_one(&mut **tx)
    .await?
    .get::<i64, _>(0);

    insert_labels(tx, LabelOwner::Route(route_id), &route.accessibility).await?;
    Ok(route_id)
}

/// Insert a stop and a fresh label row for each of its labels.
///
/// Returns the id of the new stop.
pub async fn insert_stop(tx: &mut Transaction<'_, Sqlite>, stop: &NewStop) -> Result<i64> {
    let stop_id = sqlx::query(
        r#"
        INSERT INTO bus_stops (name, direction, route_stif_code)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(&stop.name)
    .bind(&stop.direction)
    .bind(&stop.route_stif_code)
    .fetch_one(&mut **tx)
    .await?
    .get::<i64, _>(0);

    insert_labels(tx, LabelOwner::Stop(stop_id), &stop.accessibility).await?;
    Ok(stop_id)
}

async fn insert_labels(
    tx: &mut Transaction<'_, Sqlite>,
    owner: LabelOwner,
    labels: &[String],
) -> Result<()> {
    let (route_id, stop_id) = match owner {
        LabelOwner::Route(id) => (Some(id), None),
        LabelOwner::Stop(id) => (None, Some(id)),
    };

    for label in labels {
        sqlx::query("INSERT INTO accessibility (description, route_id, stop_id) VALUES (?, ?, ?)")
            .bind(label)
            .bind(route_id)
            .bind(stop_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}
