// SPDX-License-Identifier: MIT

//! Expected table/column shape of a v1 library database.

/// A single table and its column names (column names only in v1; types
/// and constraints are not part of shape validation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedTable {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// The full table set a v1 database must contain, no more and no less.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSchema {
    pub tables: Vec<ExpectedTable>,
}

/// Descriptor matching [`crate::CANONICAL_SCHEMA_SQL`].
pub fn expected_schema() -> ExpectedSchema {
    ExpectedSchema {
        tables: vec![
            ExpectedTable {
                name: "schema_meta",
                columns: &["key", "value"],
            },
            ExpectedTable {
                name: "papers",
                columns: &[
                    "paper_id",
                    "source",
                    "title",
                    "authors_json",
                    "year",
                    "venue",
                    "doi",
                    "pmcid",
                    "landing_url",
                    "pdf_url",
                    "pdf_path",
                    "sha256",
                    "status",
                    "status_detail",
                    "added_at",
                    "updated_at",
                ],
            },
            ExpectedTable {
                name: "ingests",
                columns: &[
                    "paper_id",
                    "ingested_json_path",
                    "pages",
                    "sections_json",
                    "created_at",
                    "updated_at",
                ],
            },
            ExpectedTable {
                name: "chunks",
                columns: &[
                    "chunk_id",
                    "paper_id",
                    "page_num",
                    "section",
                    "text",
                    "start_char",
                    "end_char",
                    "embedding_ref",
                    "created_at",
                ],
            },
            ExpectedTable {
                name: "citations",
                columns: &[
                    "cite_id",
                    "paper_id",
                    "chunk_id",
                    "page_num",
                    "section",
                    "excerpt",
                    "start_char",
                    "end_char",
                    "excerpt_sha256",
                    "created_at",
                ],
            },
            ExpectedTable {
                name: "drafts",
                columns: &[
                    "draft_id",
                    "title",
                    "doc_type",
                    "content_md",
                    "citation_style",
                    "created_at",
                    "updated_at",
                ],
            },
            ExpectedTable {
                name: "draft_citation_map",
                columns: &["draft_id", "ref_number", "cite_id"],
            },
            ExpectedTable {
                name: "indexes",
                columns: &[
                    "index_id",
                    "kind",
                    "path",
                    "params_json",
                    "created_at",
                    "updated_at",
                ],
            },
        ],
    }
}
