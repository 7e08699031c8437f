/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//!
//! Errors surfaced by the ride store.
//!
//! Every variant maps onto one of two public codes. `Display` keeps the raw
//! detail for internal logs, `message` is the only text safe to hand to a caller.
//!

use crate::common::types::ResultCode;

pub const INVALID_ID_MESSAGE: &str = "Id must be of type Number";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Ride id is not numeric: {0:?}")]
    InvalidId(String),
    #[error("SQLite failure: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Ride store connection mutex poisoned")]
    ConnectionPoisoned,
    #[error("Ride store worker failed: {0}")]
    Worker(String),
}

impl StoreError {
    pub fn code(&self) -> ResultCode {
        match self {
            StoreError::InvalidId(_) => ResultCode::ValidationError,
            _ => ResultCode::ServerError,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StoreError::InvalidId(_) => INVALID_ID_MESSAGE,
            _ => UNKNOWN_ERROR_MESSAGE,
        }
    }
}
