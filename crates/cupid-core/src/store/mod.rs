//! SQLite persistence.
//!
//! The accessors in the submodules are stateless free functions taking a
//! connection (or transaction) handle per call; `Store` only owns the
//! connection and its schema. Read-modify-write sequences (ledger insert-or-
//! skip, cursor claim) are driven by the engine inside explicit transactions.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::{Mutex, MutexGuard};

use crate::Result;

pub mod exclusions;
pub mod interests;
pub mod ledger;
pub mod photos;
pub mod profiles;
pub mod schema;

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        schema::init(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Exclusive handle to the underlying connection. Accessor calls and
    /// transactions for one request happen under a single guard.
    pub async fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().await
    }
}
