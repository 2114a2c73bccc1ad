mod versioned_schema;

pub use versioned_schema::{
    open_versioned_db, Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
    BASE_DB_VERSION, DEFAULT_TIMESTAMP,
};

/// `LIMIT` and `OFFSET` bind values for a 1-based page.
///
/// Both saturate at `i64::MAX`; a page past the end of the table is empty.
pub fn limit_offset(page: usize, limit: usize) -> (i64, i64) {
    let offset = page.saturating_sub(1).saturating_mul(limit);
    (
        i64::try_from(limit).unwrap_or(i64::MAX),
        i64::try_from(offset).unwrap_or(i64::MAX),
    )
}
