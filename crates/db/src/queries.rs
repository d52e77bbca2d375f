//! Read-only lookups over the imported data.

use anyhow::Result;
use sqlx::Row;
use tracing::debug;

use crate::models::{Route, Stop};
use crate::pool::DbPool;

/// SQLite treats a negative `LIMIT` as no limit at all.
fn sql_limit(limit: i64) -> i64 {
    if limit > 0 {
        limit
    } else {
        -1
    }
}

/// Return the available routes ordered by id.
///
/// # Arguments
/// * `db` - Database pool
/// * `limit` - Maximum number of routes, `<= 0` for all of them
pub async fn fetch_routes(db: &DbPool, limit: i64) -> Result<Vec<Route>> {
    debug!(limit, "Fetching routes");
    let mut routes: Vec<Route> = sqlx::query_as(
        "SELECT id, name, description, origin, destination, stif_code
         FROM bus_routes ORDER BY id LIMIT ?",
    )
    .bind(sql_limit(limit))
    .fetch_all(db.pool())
    .await?;

    for route in &mut routes {
        route.accessibility = labels_for(db, "route_id", route.id).await?;
    }
    Ok(routes)
}

/// Return the stops of the route(s) named `route_number`.
///
/// Stops are matched through the route's `stif_code`, not through a key.
///
/// # Arguments
/// * `db` - Database pool
/// * `route_number` - Route display name, e.g. `54`
/// * `limit` - Maximum number of stops, `<= 0` for all of them
pub async fn fetch_stops(db: &DbPool, route_number: &str, limit: i64) -> Result<Vec<Stop>> {
    debug!(route_number, limit, "Fetching stops");
    let mut stops: Vec<Stop> = sqlx::query_as(
        "SELECT id, name, description, direction, route_stif_code
         FROM bus_stops
         WHERE route_stif_code IN (SELECT stif_code FROM bus_routes WHERE name = ?)
         ORDER BY id LIMIT ?",
    )
    .bind(route_number)
    .bind(sql_limit(limit))
    .fetch_all(db.pool())
    .await?;

    for stop in &mut stops {
        stop.accessibility = labels_for(db, "stop_id", stop.id).await?;
    }
    Ok(stops)
}

/// Find the first route with the given display name.
pub async fn find_route_by_name(db: &DbPool, name: &str) -> Result<Option<Route>> {
    let route: Option<Route> = sqlx::query_as(
        "SELECT id, name, description, origin, destination, stif_code
         FROM bus_routes WHERE name = ? ORDER BY id LIMIT 1",
    )
    .bind(name)
    .fetch_optional(db.pool())
    .await?;

    match route {
        Some(mut route) => {
            route.accessibility = labels_for(db, "route_id", route.id).await?;
            Ok(Some(route))
        }
        None => Ok(None),
    }
}

/// Count every stored route.
pub async fn count_routes(db: &DbPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bus_routes")
        .fetch_one(db.pool())
        .await?;
    Ok(count)
}

/// Count every stored stop.
pub async fn count_stops(db: &DbPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bus_stops")
        .fetch_one(db.pool())
        .await?;
    Ok(count)
}

/// Count the stops whose `route_stif_code` equals `stif_code`.
pub async fn count_stops_for_stif_code(db: &DbPool, stif_code: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bus_stops WHERE route_stif_code = ?")
        .bind(stif_code)
        .fetch_one(db.pool())
        .await?;
    Ok(count)
}

// `owner_column` is always one of the two static column names above.
async fn labels_for(db: &DbPool, owner_column: &'static str, owner_id: i64) -> Result<Vec<String>> {
    let sql = format!(
        "SELECT description FROM accessibility WHERE {} = ? ORDER BY id",
        owner_column
    );
    let rows = sqlx::query(&sql)
        .bind(owner_id)
        .fetch_all(db.pool())
        .await?;

    Ok(rows.iter().map(|row| row.get::<String, _>(0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inserts::{insert_route, insert_stop};
    use crate::models::{NewRoute, NewStop};
    use crate::SCHEMA;

    fn route(name: &str, stif_code: &str, labels: &[&str]) -> NewRoute {
        NewRoute {
            name: name.to_string(),
            description: stif_code.to_string(),
            origin: format!("{} origin", name),
            destination: format!("{} destination", name),
            stif_code: stif_code.to_string(),
            accessibility: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn stop(name: &str, stif_code: &str) -> NewStop {
        NewStop {
            name: name.to_string(),
            direction: "A".to_string(),
            route_stif_code: stif_code.to_string(),
            accessibility: vec!["Accessible en fauteuil roulant".to_string()],
        }
    }

    async fn seeded_db() -> DbPool {
        let db = DbPool::new(":memory:").await.unwrap();
        db.ensure_schema(SCHEMA).await.unwrap();

        let mut tx = db.pool().begin().await.unwrap();
        let labels = ["Accessible en fauteuil roulant", "Annonce visuelle prochain arrêt"];
        insert_route(&mut tx, &route("54", "1001000540001", &labels))
            .await
            .unwrap();
        insert_route(&mut tx, &route("58", "1001000580001", &[])).await.unwrap();
        insert_route(&mut tx, &route("N1", "1001001010001", &[])).await.unwrap();
        for i in 0..4 {
            insert_stop(&mut tx, &stop(&format!("Arret 54-{}", i), "1001000540001"))
                .await
                .unwrap();
        }
        insert_stop(&mut tx, &stop("Arret 58", "1001000580001")).await.unwrap();
        insert_stop(&mut tx, &stop("Orpheline", "42")).await.unwrap();
        tx.commit().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_fetch_routes_limit() {
        let db = seeded_db().await;
        assert_eq!(fetch_routes(&db, 2).await.unwrap().len(), 2);
        assert_eq!(fetch_routes(&db, -1).await.unwrap().len(), 3);
        assert_eq!(fetch_routes(&db, 0).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_routes_attaches_labels_in_order() {
        let db = seeded_db().await;
        let routes = fetch_routes(&db, 1).await.unwrap();
        assert_eq!(routes[0].name, "54");
        assert_eq!(
            routes[0].accessibility,
            vec!["Accessible en fauteuil roulant", "Annonce visuelle prochain arrêt"]
        );
    }

    #[tokio::test]
    async fn test_fetch_stops_joins_by_stif_code() {
        let db = seeded_db().await;
        let stops = fetch_stops(&db, "54", -1).await.unwrap();
        assert_eq!(stops.len(), 4);
        assert!(stops.iter().all(|s| s.route_stif_code == "1001000540001"));
        assert_eq!(stops[0].accessibility, vec!["Accessible en fauteuil roulant"]);

        assert_eq!(fetch_stops(&db, "54", 2).await.unwrap().len(), 2);
        assert!(fetch_stops(&db, "99", -1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_counts_and_lookup() {
        let db = seeded_db().await;
        assert_eq!(count_routes(&db).await.unwrap(), 3);
        assert_eq!(count_stops(&db).await.unwrap(), 6);
        assert_eq!(count_stops_for_stif_code(&db, "42").await.unwrap(), 1);

        let route = find_route_by_name(&db, "58").await.unwrap().unwrap();
        assert_eq!(route.stif_code, "1001000580001");
        assert!(find_route_by_name(&db, "nope").await.unwrap().is_none());
    }
}
