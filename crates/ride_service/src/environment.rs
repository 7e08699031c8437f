/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use serde::Deserialize;

use crate::{
    sqlite::{error::StoreError, store::RideStore},
    tools::logger::LoggerConfig,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub workers: usize,
    pub logger_cfg: LoggerConfig,
    pub database_cfg: DatabaseConfig,
    pub log_unprocessible_req_body: Vec<String>,
    pub max_allowed_req_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Path of the SQLite file, or `:memory:`.
    pub path: String,
}

pub fn read_dhall_config(config_path: &str) -> Result<AppConfig, String> {
    serde_dhall::from_file(config_path)
        .parse::<AppConfig>()
        .map_err(|err| format!("Error reading config: {err}"))
}

#[derive(Clone)]
pub struct AppState {
    pub store: RideStore,
    pub log_unprocessible_req_body: Vec<String>,
    pub max_allowed_req_size: usize,
}

impl AppState {
    pub fn new(app_config: AppConfig) -> Result<AppState, StoreError> {
        let store = RideStore::new(&app_config.database_cfg.path)?;

        Ok(AppState {
            store,
            log_unprocessible_req_body: app_config.log_unprocessible_req_body,
            max_allowed_req_size: app_config.max_allowed_req_size,
        })
    }

    pub fn with_store(store: RideStore) -> AppState {
        AppState {
            store,
            log_unprocessible_req_body: vec![],
            max_allowed_req_size: usize::MAX,
        }
    }
}
