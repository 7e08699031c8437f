/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use serde::{
    de::{IgnoredAny, MapAccess, SeqAccess},
    Deserialize, Deserializer, Serialize,
};
use strum_macros::{Display, EnumString};

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[macros::impl_getter]
pub struct RideId(pub i64);
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Copy)]
#[macros::impl_getter]
pub struct Latitude(pub f64);
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Copy)]
#[macros::impl_getter]
pub struct Longitude(pub f64);
#[derive(Deserialize, Serialize, Clone, Debug, Eq, PartialEq)]
#[macros::impl_getter]
pub struct RiderName(pub String);
#[derive(Deserialize, Serialize, Clone, Debug, Eq, PartialEq)]
#[macros::impl_getter]
pub struct DriverName(pub String);
#[derive(Deserialize, Serialize, Clone, Debug, Eq, PartialEq)]
#[macros::impl_getter]
pub struct DriverVehicle(pub String);

/// A coordinate as received over the wire.
///
/// Accepts a JSON number or a string holding one. Anything that cannot be read
/// as a number (a non-numeric string, a boolean, an array or object, `null`, a
/// missing field) becomes `NaN`, which then fails the coordinate range checks
/// instead of the body parse.
#[derive(Serialize, Clone, Debug, PartialEq, Copy)]
pub struct Degrees(pub f64);

impl Default for Degrees {
    fn default() -> Self {
        Degrees(f64::NAN)
    }
}

impl<'de> Deserialize<'de> for Degrees {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DegreesVisitor;

        impl<'de> serde::de::Visitor<'de> for DegreesVisitor {
            type Value = Degrees;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number (integer/float) or a string containing one")
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Degrees(value))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Degrees(v as f64))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Degrees(v as f64))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Degrees(value.trim().parse::<f64>().unwrap_or(f64::NAN)))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Degrees::default())
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Degrees::default())
            }

            fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E> {
                Ok(Degrees::default())
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Degrees::default())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(Degrees::default())
            }
        }

        deserializer.deserialize_any(DegreesVisitor)
    }
}

#[derive(Debug, Clone, Copy, EnumString, Display, Serialize, Deserialize, Eq, Hash, PartialEq)]
pub enum ResultCode {
    #[strum(serialize = "SUCCESS")]
    #[serde(rename = "SUCCESS")]
    Success,
    #[strum(serialize = "VALIDATION_ERROR")]
    #[serde(rename = "VALIDATION_ERROR")]
    ValidationError,
    #[strum(serialize = "SERVER_ERROR")]
    #[serde(rename = "SERVER_ERROR")]
    ServerError,
}

/// Outcome of checking a ride candidate against the domain rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    pub code: ResultCode,
    pub message: String,
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        self.code == ResultCode::Success
    }
}

/// Ride fields after wire coercion and before validation.
///
/// A name is `None` when it was absent or not a JSON string.
#[derive(Debug, Clone, PartialEq)]
pub struct RideCandidate {
    pub start_latitude: f64,
    pub start_longitude: f64,
    pub end_latitude: f64,
    pub end_longitude: f64,
    pub rider_name: Option<String>,
    pub driver_name: Option<String>,
    pub driver_vehicle: Option<String>,
}

/// A validated ride that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRide {
    pub start_lat: Latitude,
    pub start_long: Longitude,
    pub end_lat: Latitude,
    pub end_long: Longitude,
    pub rider_name: RiderName,
    pub driver_name: DriverName,
    pub driver_vehicle: DriverVehicle,
}

/// A row of the `Rides` table, serialized with the column names.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    #[serde(rename = "rideID")]
    pub ride_id: RideId,
    pub start_lat: Latitude,
    pub start_long: Longitude,
    pub end_lat: Latitude,
    pub end_long: Longitude,
    pub rider_name: RiderName,
    pub driver_name: DriverName,
    pub driver_vehicle: DriverVehicle,
}
