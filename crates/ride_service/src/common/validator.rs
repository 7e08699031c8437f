/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::ops::RangeInclusive;

use crate::common::types::*;

pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

pub const VALID_RIDE_MESSAGE: &str = "Valid ride details";
pub const INVALID_START_MESSAGE: &str =
    "Start latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively";
pub const INVALID_END_MESSAGE: &str =
    "End latitude and longitude must be between -90 - 90 and -180 to 180 degrees respectively";
pub const INVALID_RIDER_NAME_MESSAGE: &str = "Rider name must be a non empty string";
pub const INVALID_DRIVER_NAME_MESSAGE: &str = "Driver name must be a non empty string";
pub const INVALID_DRIVER_VEHICLE_MESSAGE: &str = "Driver vehicle must be a non empty string";

fn is_valid_point(latitude: f64, longitude: f64) -> bool {
    // `contains` is false for NaN.
    LATITUDE_RANGE.contains(&latitude) && LONGITUDE_RANGE.contains(&longitude)
}

fn is_non_empty(name: &Option<String>) -> bool {
    name.as_deref().is_some_and(|name| !name.is_empty())
}

/// Checks a ride candidate against the domain rules.
///
/// Rules run in a fixed order and the first failing one decides the verdict:
/// start point, end point, rider name, driver name, driver vehicle.
pub fn validate(candidate: &RideCandidate) -> Verdict {
    let failure = if !is_valid_point(candidate.start_latitude, candidate.start_longitude) {
        Some(INVALID_START_MESSAGE)
    } else if !is_valid_point(candidate.end_latitude, candidate.end_longitude) {
        Some(INVALID_END_MESSAGE)
    } else if !is_non_empty(&candidate.rider_name) {
        Some(INVALID_RIDER_NAME_MESSAGE)
    } else if !is_non_empty(&candidate.driver_name) {
        Some(INVALID_DRIVER_NAME_MESSAGE)
    } else if !is_non_empty(&candidate.driver_vehicle) {
        Some(INVALID_DRIVER_VEHICLE_MESSAGE)
    } else {
        None
    };

    match failure {
        Some(message) => Verdict {
            code: ResultCode::ValidationError,
            message: message.to_string(),
        },
        None => Verdict {
            code: ResultCode::Success,
            message: VALID_RIDE_MESSAGE.to_string(),
        },
    }
}

/// Validates the candidate and, on success, turns it into a [`NewRide`] ready to insert.
pub fn validated_ride(candidate: RideCandidate) -> Result<NewRide, Verdict> {
    let verdict = validate(&candidate);
    if !verdict.is_success() {
        return Err(verdict);
    }

    match (
        candidate.rider_name,
        candidate.driver_name,
        candidate.driver_vehicle,
    ) {
        (Some(rider_name), Some(driver_name), Some(driver_vehicle)) => Ok(NewRide {
            start_lat: Latitude(candidate.start_latitude),
            start_long: Longitude(candidate.start_longitude),
            end_lat: Latitude(candidate.end_latitude),
            end_long: Longitude(candidate.end_longitude),
            rider_name: RiderName(rider_name),
            driver_name: DriverName(driver_name),
            driver_vehicle: DriverVehicle(driver_vehicle),
        }),
        _ => Err(verdict),
    }
}
