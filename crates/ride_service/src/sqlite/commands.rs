/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use rusqlite::{params, Connection, Row};

use crate::{
    common::types::*,
    sqlite::{error::StoreError, queries::*, store::RideStore},
};

fn ride_from_row(row: &Row) -> rusqlite::Result<Ride> {
    Ok(Ride {
        ride_id: RideId(row.get("rideID")?),
        start_lat: Latitude(row.get("startLat")?),
        start_long: Longitude(row.get("startLong")?),
        end_lat: Latitude(row.get("endLat")?),
        end_long: Longitude(row.get("endLong")?),
        rider_name: RiderName(row.get("riderName")?),
        driver_name: DriverName(row.get("driverName")?),
        driver_vehicle: DriverVehicle(row.get("driverVehicle")?),
    })
}

fn query_rides<P: rusqlite::Params>(
    connection: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Ride>, StoreError> {
    let mut stmt = connection.prepare(sql)?;
    let rides = stmt
        .query_map(params, ride_from_row)?
        .collect::<Result<Vec<Ride>, rusqlite::Error>>()?;
    Ok(rides)
}

/// Parses a ride id taken from a request path.
///
/// Only integers are accepted; anything else is rejected here so that it never
/// reaches the database.
pub fn parse_ride_id(id: &str) -> Result<RideId, StoreError> {
    id.trim()
        .parse::<i64>()
        .map(RideId)
        .map_err(|_| StoreError::InvalidId(id.to_string()))
}

/// Persists a new ride and returns the identifier SQLite generated for it.
pub async fn insert_ride(store: &RideStore, ride: NewRide) -> Result<RideId, StoreError> {
    store
        .run(move |connection| {
            connection.execute(
                INSERT_RIDE,
                params![
                    ride.start_lat.inner(),
                    ride.start_long.inner(),
                    ride.end_lat.inner(),
                    ride.end_long.inner(),
                    ride.rider_name.inner(),
                    ride.driver_name.inner(),
                    ride.driver_vehicle.inner(),
                ],
            )?;
            Ok(RideId(connection.last_insert_rowid()))
        })
        .await
}

/// Returns the ride with the given id, as a list of zero or one rows.
///
/// A non-numeric `id` fails with [`StoreError::InvalidId`] before the database is touched.
pub async fn fetch_ride_by_id(store: &RideStore, id: &str) -> Result<Vec<Ride>, StoreError> {
    let ride_id = parse_ride_id(id)?;
    fetch_ride(store, ride_id).await
}

pub async fn fetch_ride(store: &RideStore, ride_id: RideId) -> Result<Vec<Ride>, StoreError> {
    store
        .run(move |connection| {
            query_rides(connection, SELECT_RIDE_BY_ID, params![ride_id.inner()])
        })
        .await
}

pub async fn fetch_all_rides(store: &RideStore) -> Result<Vec<Ride>, StoreError> {
    store
        .run(|connection| query_rides(connection, SELECT_ALL_RIDES, params![]))
        .await
}

/// Returns at most `count` rides ordered by id, skipping the first `offset`.
///
/// Both values are bound as statement parameters. Callers are expected to
/// have rejected non-positive page numbers and sizes already.
pub async fn fetch_rides_page(
    store: &RideStore,
    count: i64,
    offset: i64,
) -> Result<Vec<Ride>, StoreError> {
    store
        .run(move |connection| {
            query_rides(connection, SELECT_RIDES_PAGE, params![count, offset])
        })
        .await
}

pub async fn count_rides(store: &RideStore) -> Result<i64, StoreError> {
    store
        .run(|connection| Ok(connection.query_row(COUNT_RIDES, [], |row| row.get(0))?))
        .await
}
