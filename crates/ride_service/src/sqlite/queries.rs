/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/

pub const CREATE_RIDES_TABLE: &str = "CREATE TABLE IF NOT EXISTS Rides (
    rideID INTEGER PRIMARY KEY AUTOINCREMENT,
    startLat REAL NOT NULL,
    startLong REAL NOT NULL,
    endLat REAL NOT NULL,
    endLong REAL NOT NULL,
    riderName TEXT NOT NULL,
    driverName TEXT NOT NULL,
    driverVehicle TEXT NOT NULL
)";

pub const INSERT_RIDE: &str = "INSERT INTO Rides (startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

pub const SELECT_RIDE_BY_ID: &str = "SELECT rideID, startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle FROM Rides WHERE rideID = ?1";

pub const SELECT_ALL_RIDES: &str = "SELECT rideID, startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle FROM Rides";

pub const SELECT_RIDES_PAGE: &str = "SELECT rideID, startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle FROM Rides ORDER BY rideID ASC LIMIT ?1 OFFSET ?2";

pub const COUNT_RIDES: &str = "SELECT COUNT(*) FROM Rides";

pub const PING: &str = "SELECT 1";
