/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/

use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use serde::{Deserialize, Serialize};

use crate::{
    common::types::ResultCode,
    sqlite::error::{StoreError, UNKNOWN_ERROR_MESSAGE},
};

pub const RIDES_NOT_FOUND_MESSAGE: &str = "Could not find any rides";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
}

#[macros::add_error]
pub enum AppError {
    ValidationError(String),
    /// Carries the underlying failure for logs; never rendered to the caller.
    ServerError(String),
    RidesNotFoundError,
    UnprocessibleRequest(String),
    LargePayloadSize(usize, usize),
}

impl AppError {
    fn error_message(&self) -> ErrorBody {
        ErrorBody {
            error_code: self.code(),
            message: self.message(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::ValidationError(err) => err.to_string(),
            AppError::ServerError(_) => UNKNOWN_ERROR_MESSAGE.to_string(),
            AppError::RidesNotFoundError => RIDES_NOT_FOUND_MESSAGE.to_string(),
            AppError::UnprocessibleRequest(err) => err.to_string(),
            AppError::LargePayloadSize(length, limit) => {
                format!("Content length ({length} Bytes) greater than allowed maximum limit : ({limit} Bytes)")
            }
        }
    }

    /// Stable machine-readable code, identical to the `Display` output.
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self.error_message())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RidesNotFoundError => StatusCode::NOT_FOUND,
            AppError::UnprocessibleRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::LargePayloadSize(_, _) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error.code() {
            ResultCode::ValidationError => AppError::ValidationError(error.message().to_string()),
            _ => AppError::ServerError(error.to_string()),
        }
    }
}
