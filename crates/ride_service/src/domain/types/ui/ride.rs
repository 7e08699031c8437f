/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::types::*;

#[derive(Deserialize, Debug, Default)]
pub struct CreateRideRequest {
    #[serde(default)]
    pub start_lat: Degrees,
    #[serde(default)]
    pub start_long: Degrees,
    #[serde(default)]
    pub end_lat: Degrees,
    #[serde(default)]
    pub end_long: Degrees,
    #[serde(default)]
    pub rider_name: Option<Value>,
    #[serde(default)]
    pub driver_name: Option<Value>,
    #[serde(default)]
    pub driver_vehicle: Option<Value>,
}

fn as_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

impl From<CreateRideRequest> for RideCandidate {
    fn from(request: CreateRideRequest) -> Self {
        RideCandidate {
            start_latitude: request.start_lat.0,
            start_longitude: request.start_long.0,
            end_latitude: request.end_lat.0,
            end_longitude: request.end_long.0,
            rider_name: as_text(request.rider_name),
            driver_name: as_text(request.driver_name),
            driver_vehicle: as_text(request.driver_vehicle),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct RidesResponse {
    pub data: Vec<Ride>,
}
