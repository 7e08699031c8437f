/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::{
    get, post,
    web::{Data, Json, Path},
};

use crate::{
    common::types::Ride,
    domain::{action::ui::ride, types::ui::ride::*},
    environment::AppState,
    tools::error::AppError,
};

#[post("/rides")]
pub async fn create_ride(
    data: Data<AppState>,
    param_obj: Json<CreateRideRequest>,
) -> Result<Json<Vec<Ride>>, AppError> {
    let request_body = param_obj.into_inner();

    Ok(Json(ride::create_ride(data, request_body).await?))
}

#[get("/rides")]
pub async fn get_rides(data: Data<AppState>) -> Result<Json<RidesResponse>, AppError> {
    Ok(Json(ride::get_rides(data).await?))
}

#[get("/rides/{page}/{count}")]
pub async fn get_rides_page(
    data: Data<AppState>,
    path: Path<(String, String)>,
) -> Result<Json<RidesResponse>, AppError> {
    let (page, count) = path.into_inner();

    Ok(Json(ride::get_rides_page(data, page, count).await?))
}

#[get("/rides/{rideId}")]
pub async fn get_ride_by_id(
    data: Data<AppState>,
    path: Path<String>,
) -> Result<Json<RidesResponse>, AppError> {
    let ride_id = path.into_inner();

    Ok(Json(ride::get_ride_by_id(data, ride_id).await?))
}
