/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
pub mod ui;

use actix_web::web::{JsonConfig, PayloadConfig, ServiceConfig};

use crate::tools::error::AppError;

/// JSON extractor settings: malformed bodies become `UNPROCESSIBLE_REQUEST`.
pub fn json_config(max_allowed_req_size: usize) -> JsonConfig {
    JsonConfig::default()
        .limit(max_allowed_req_size)
        .error_handler(|err, _| AppError::UnprocessibleRequest(err.to_string()).into())
}

/// Raw body extractor limit, used when request bodies are buffered for logging.
pub fn payload_config(max_allowed_req_size: usize) -> PayloadConfig {
    PayloadConfig::new(max_allowed_req_size)
}

pub fn handler(config: &mut ServiceConfig) {
    config
        .service(ui::healthcheck::health_check)
        .service(ui::ride::create_ride)
        .service(ui::ride::get_rides)
        .service(ui::ride::get_rides_page)
        .service(ui::ride::get_ride_by_id);
}
