// SPDX-License-Identifier: MIT

//! Canonical schema registry for litshelf library databases.
//!
//! This crate is pure data: the v1 DDL text, the expected table/column
//! shape derived from it, and a content hash over the DDL. It performs
//! no I/O and holds no state; callers pass the schema explicitly into
//! every workspace operation so that multiple schema versions can be
//! exercised side by side in tests.

mod ddl;
mod expected;
mod hash;

pub use ddl::CANONICAL_SCHEMA_SQL;
pub use expected::{ExpectedSchema, ExpectedTable, expected_schema};
pub use hash::{SCHEMA_VERSION, schema_hash};
