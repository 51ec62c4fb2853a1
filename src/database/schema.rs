pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS db_properties (
        name TEXT NOT NULL,
        value TEXT
    );

    CREATE TABLE IF NOT EXISTS hashes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        md5 BINARY(16) UNIQUE,
        sha1 BINARY(20),
        sha2_256 BINARY(32)
    );

    CREATE TABLE IF NOT EXISTS file_names (
        name TEXT NOT NULL,
        hash_id INTEGER NOT NULL,
        PRIMARY KEY(name, hash_id)
    );

    CREATE TABLE IF NOT EXISTS comments (
        comment TEXT NOT NULL,
        hash_id INTEGER NOT NULL,
        PRIMARY KEY(comment, hash_id)
    );
";

/// Name of the lookup index on `hashes.md5`. Later runs find it by this name.
pub const MD5_INDEX_NAME: &str = "md5_index";

pub const CREATE_MD5_INDEX: &str = "CREATE INDEX IF NOT EXISTS md5_index ON hashes(md5)";

pub const DROP_MD5_INDEX: &str = "DROP INDEX md5_index";
