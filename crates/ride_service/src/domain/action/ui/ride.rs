/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::web::Data;
use tracing::{error, info, warn};

use crate::{
    common::{types::*, validator::validated_ride},
    domain::types::ui::ride::*,
    environment::AppState,
    sqlite::{commands::*, error::StoreError},
    tools::{error::AppError, prometheus::RIDES_CREATED},
};

pub const PAGE_EXCEEDS_MESSAGE: &str = "Page number provided exceeds total number of ride details";
pub const INVALID_PAGE_MESSAGE: &str = "Page number and count must be positive integers";

/// Logs a store failure with its full detail and turns it into the public error.
fn store_failure(err: StoreError) -> AppError {
    match err.code() {
        ResultCode::ValidationError => {
            warn!(tag = "[Ride Store Rejected Input]", code = %err.code(), error = %err)
        }
        _ => error!(tag = "[Ride Store Error]", code = %err.code(), error = %err),
    }
    AppError::from(err)
}

fn positive_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|value| *value > 0)
}

/// Validates the ride, stores it, then reads it back by its generated id.
pub async fn create_ride(
    data: Data<AppState>,
    request_body: CreateRideRequest,
) -> Result<Vec<Ride>, AppError> {
    let new_ride = validated_ride(RideCandidate::from(request_body)).map_err(|verdict| {
        warn!(tag = "[Invalid Ride Details]", code = %verdict.code, message = %verdict.message);
        AppError::ValidationError(verdict.message)
    })?;

    let ride_id = insert_ride(&data.store, new_ride)
        .await
        .map_err(store_failure)?;

    let rides = fetch_ride(&data.store, ride_id)
        .await
        .map_err(store_failure)?;

    RIDES_CREATED.inc();
    info!(tag = "[Ride Created]", ride_id = ride_id.inner());

    Ok(rides)
}

pub async fn get_rides(data: Data<AppState>) -> Result<RidesResponse, AppError> {
    let rides = fetch_all_rides(&data.store)
        .await
        .map_err(store_failure)?;

    if rides.is_empty() {
        warn!(tag = "[Rides Not Found]");
        return Err(AppError::RidesNotFoundError);
    }

    info!(tag = "[Rides Retrieved]", count = rides.len());
    Ok(RidesResponse { data: rides })
}

/// Serves a 1-based page of rides ordered by id.
pub async fn get_rides_page(
    data: Data<AppState>,
    page: String,
    count: String,
) -> Result<RidesResponse, AppError> {
    let (page, count) = positive_integer(&page)
        .zip(positive_integer(&count))
        .ok_or_else(|| AppError::ValidationError(INVALID_PAGE_MESSAGE.to_string()))?;

    let total = count_rides(&data.store).await.map_err(store_failure)?;
    if total == 0 {
        warn!(tag = "[Rides Not Found]");
        return Err(AppError::RidesNotFoundError);
    }

    let offset = match (page - 1).checked_mul(count) {
        Some(offset) if offset < total => offset,
        _ => {
            warn!(tag = "[Page Out Of Range]", page, count, total);
            return Err(AppError::ValidationError(PAGE_EXCEEDS_MESSAGE.to_string()));
        }
    };

    let rides = fetch_rides_page(&data.store, count, offset)
        .await
        .map_err(store_failure)?;

    info!(tag = "[Rides Page Retrieved]", page, count, rows = rides.len());
    Ok(RidesResponse { data: rides })
}

pub async fn get_ride_by_id(data: Data<AppState>, id: String) -> Result<RidesResponse, AppError> {
    let rides = fetch_ride_by_id(&data.store, &id)
        .await
        .map_err(store_failure)?;

    if rides.is_empty() {
        warn!(tag = "[Ride Not Found]", ride_id = %id);
        return Err(AppError::RidesNotFoundError);
    }

    info!(tag = "[Ride Retrieved]", ride_id = %id);
    Ok(RidesResponse { data: rides })
}
