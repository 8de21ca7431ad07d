//! SQL schema for the Rolodex SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The whole book lives in a single row (`id = 1`) as the same JSON payload
/// the file backend writes.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS address_book (
    id        INTEGER PRIMARY KEY CHECK (id = 1),
    payload   TEXT NOT NULL,   -- JSON-encoded AddressBook
    saved_at  TEXT NOT NULL    -- RFC 3339 UTC
);

PRAGMA user_version = 1;
";
