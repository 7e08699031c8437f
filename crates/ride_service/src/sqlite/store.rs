/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::sqlite::{error::StoreError, queries::*};

pub const IN_MEMORY: &str = ":memory:";

/// Handle on the SQLite database holding the `Rides` table.
///
/// Cloning is cheap and every clone shares the same connection. Statements run
/// on tokio's blocking pool so request workers never wait on disk I/O.
#[derive(Clone)]
pub struct RideStore {
    connection: Arc<Mutex<Connection>>,
}

impl RideStore {
    /// Opens (or creates) the database at `path` and makes sure the `Rides` table exists.
    ///
    /// `":memory:"` opens a private in-memory database.
    pub fn new(path: &str) -> Result<Self, StoreError> {
        let connection = if path == IN_MEMORY {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        connection.execute_batch(CREATE_RIDES_TABLE)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::new(IN_MEMORY)
    }

    /// Runs `operation` against the connection on the blocking pool.
    pub(crate) async fn run<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();
        tokio::task::spawn_blocking(move || {
            let guard = connection
                .lock()
                .map_err(|_| StoreError::ConnectionPoisoned)?;
            operation(&guard)
        })
        .await
        .map_err(|err| StoreError::Worker(err.to_string()))?
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.run(|connection| {
            connection.query_row(PING, [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }
}
