use std::path::Path;
use rusqlite::{Connection, Transaction, params};
use anyhow::{Result, Context};
use tracing::{info, warn};
use crate::database::schema::{SCHEMA, MD5_INDEX_NAME, CREATE_MD5_INDEX, DROP_MD5_INDEX};
use crate::error::LineError;

/// How the output database came to be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioning {
    Created,
    Existing,
}

pub struct HashDatabase {
    conn: Connection,
}

impl HashDatabase {
    /// Opens the database at `path`, creating the file and the schema when it
    /// does not exist yet. No index is created here.
    pub fn open(path: &Path) -> Result<(Self, Provisioning)> {
        let existed = path.is_file();
        if existed {
            info!("Connecting to database: {}", path.display());
        } else {
            info!("Creating database: {}", path.display());
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {:?}", path))?;
        let db = Self { conn };

        if !existed {
            db.conn.execute_batch(SCHEMA).context("Failed to initialize schema")?;
            info!("Database Created.");
            return Ok((db, Provisioning::Created));
        }

        // A first run that died before committing leaves an empty file behind.
        if !db.table_exists("hashes")? {
            warn!("Database {} has no hashes table, creating schema.", path.display());
            db.conn.execute_batch(SCHEMA).context("Failed to initialize schema")?;
        }

        Ok((db, Provisioning::Existing))
    }

    fn table_exists(&self, name: &str) -> Result<bool> {
        self.conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                params![name],
                |row| row.get(0),
            )
            .with_context(|| format!("Failed to look up table {}", name))
    }

    pub fn md5_index_exists(&self) -> Result<bool> {
        self.conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = ?1)",
                params![MD5_INDEX_NAME],
                |row| row.get(0),
            )
            .context("Failed to look up md5 index")
    }

    /// Drops the md5 index if there is one. Returns whether anything was dropped.
    pub fn drop_md5_index(&self) -> Result<bool> {
        if !self.md5_index_exists()? {
            return Ok(false);
        }
        self.conn.execute(DROP_MD5_INDEX, []).context("Failed to drop md5 index")?;
        Ok(true)
    }

    pub fn create_md5_index(&self) -> Result<()> {
        self.conn.execute(CREATE_MD5_INDEX, []).context("Failed to create md5 index")?;
        Ok(())
    }

    pub fn hash_count(&self) -> Result<u64> {
        let count: i64 = self.conn
            .query_row("SELECT COUNT(*) FROM hashes", [], |row| row.get(0))
            .context("Failed to count hashes")?;
        Ok(count as u64)
    }

    /// Starts the single transaction that holds every insert of a run.
    pub fn begin_import(&mut self) -> Result<ImportBatch<'_>> {
        let tx = self.conn.transaction().context("Failed to begin transaction")?;
        Ok(ImportBatch { tx })
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Pending inserts of one run. Dropping it without `commit` rolls everything back.
pub struct ImportBatch<'conn> {
    tx: Transaction<'conn>,
}

impl ImportBatch<'_> {
    /// Inserts one hex encoded MD5 as a 16 byte blob.
    pub fn insert_md5(&self, hash: &str) -> Result<(), LineError> {
        let md5 = hex::decode(hash).map_err(|source| LineError::InvalidHex {
            hash: hash.to_string(),
            source,
        })?;

        let mut stmt = self.tx.prepare_cached("INSERT INTO hashes (md5) VALUES (?1)")?;
        stmt.execute(params![md5])
            .map_err(|e| LineError::from_insert(hash, e))?;
        Ok(())
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit().context("Failed to commit transaction")
    }
}
