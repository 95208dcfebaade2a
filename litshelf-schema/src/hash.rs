// SPDX-License-Identifier: MIT

//! Content hash over the canonical DDL text.

use sha2::{Digest, Sha256};

/// Version literal stamped into `schema_meta` at creation time.
pub const SCHEMA_VERSION: &str = "v1";

/// SHA-256 of the schema text as lowercase hex.
///
/// Line endings are normalized and surrounding whitespace trimmed so the
/// hash is stable across checkouts with different newline conventions.
pub fn schema_hash(canonical_schema_sql: &str) -> String {
    let normalized = canonical_schema_sql.replace("\r\n", "\n");
    let digest = Sha256::digest(normalized.trim().as_bytes());
    hex::encode(digest)
}
