// SPDX-License-Identifier: MIT

//! Canonical DDL for the per-project library database (schema v1).
//!
//! Idempotent `create table if not exists` statements throughout, so
//! re-application against an already initialized database is harmless.

/// Full v1 schema SQL (schema_meta guard table plus the domain tables).
pub const CANONICAL_SCHEMA_SQL: &str = r#"
PRAGMA foreign_keys = ON;

-- Schema guard (v1 only; no migrations). The creator inserts
-- schema_version and schema_hash exactly once; every open verifies them.
CREATE TABLE IF NOT EXISTS schema_meta (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL
);

-- Papers: one row per paper in the project library
CREATE TABLE IF NOT EXISTS papers (
  paper_id TEXT PRIMARY KEY,
  source TEXT NOT NULL CHECK (source IN ('pmc','biorxiv')),
  title TEXT NOT NULL,
  authors_json TEXT NOT NULL,
  year INTEGER,
  venue TEXT,
  doi TEXT,
  pmcid TEXT,
  landing_url TEXT,
  pdf_url TEXT,
  pdf_path TEXT,
  sha256 TEXT,
  status TEXT NOT NULL CHECK (status IN ('found','downloaded','ingested','indexed','error')),
  status_detail TEXT,
  added_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_papers_source ON papers(source);
CREATE INDEX IF NOT EXISTS idx_papers_year ON papers(year);
CREATE INDEX IF NOT EXISTS idx_papers_status ON papers(status);
CREATE INDEX IF NOT EXISTS idx_papers_doi ON papers(doi);
CREATE INDEX IF NOT EXISTS idx_papers_pmcid ON papers(pmcid);
CREATE INDEX IF NOT EXISTS idx_papers_sha256 ON papers(sha256);

-- Per-paper ingest artifact metadata (paths, page counts, sections)
CREATE TABLE IF NOT EXISTS ingests (
  paper_id TEXT PRIMARY KEY,
  ingested_json_path TEXT NOT NULL,
  pages INTEGER NOT NULL,
  sections_json TEXT NOT NULL,
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL,
  FOREIGN KEY (paper_id) REFERENCES papers(paper_id) ON DELETE CASCADE
);

-- Chunks: citeable / retrievable spans, each mapped to a page and char span
CREATE TABLE IF NOT EXISTS chunks (
  chunk_id TEXT PRIMARY KEY,
  paper_id TEXT NOT NULL,
  page_num INTEGER NOT NULL,
  section TEXT,
  text TEXT NOT NULL,
  start_char INTEGER NOT NULL,
  end_char INTEGER NOT NULL,
  embedding_ref TEXT,
  created_at TEXT NOT NULL,
  FOREIGN KEY (paper_id) REFERENCES papers(paper_id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_chunks_paper_page ON chunks(paper_id, page_num);
CREATE INDEX IF NOT EXISTS idx_chunks_section ON chunks(section);

-- Citations: excerpts selected from chunks or raw page spans.
-- ref_number is intentionally not stored here; Vancouver numbering is
-- draft-specific and lives in draft_citation_map.
CREATE TABLE IF NOT EXISTS citations (
  cite_id TEXT PRIMARY KEY,
  paper_id TEXT NOT NULL,
  chunk_id TEXT,
  page_num INTEGER NOT NULL,
  section TEXT,
  excerpt TEXT NOT NULL,
  start_char INTEGER NOT NULL,
  end_char INTEGER NOT NULL,
  excerpt_sha256 TEXT NOT NULL,
  created_at TEXT NOT NULL,
  FOREIGN KEY (paper_id) REFERENCES papers(paper_id) ON DELETE CASCADE,
  FOREIGN KEY (chunk_id) REFERENCES chunks(chunk_id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_citations_paper_page ON citations(paper_id, page_num);
CREATE INDEX IF NOT EXISTS idx_citations_chunk ON citations(chunk_id);
CREATE INDEX IF NOT EXISTS idx_citations_excerpt_hash ON citations(excerpt_sha256);

-- Drafts: stored markdown with inline [n] references
CREATE TABLE IF NOT EXISTS drafts (
  draft_id TEXT PRIMARY KEY,
  title TEXT NOT NULL,
  doc_type TEXT NOT NULL,
  content_md TEXT NOT NULL,
  citation_style TEXT NOT NULL CHECK (citation_style IN ('vancouver')),
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_drafts_doc_type ON drafts(doc_type);

-- Draft <-> citation map: makes Vancouver numbering reproducible per draft
CREATE TABLE IF NOT EXISTS draft_citation_map (
  draft_id TEXT NOT NULL,
  ref_number INTEGER NOT NULL,
  cite_id TEXT NOT NULL,
  PRIMARY KEY (draft_id, ref_number),
  FOREIGN KEY (draft_id) REFERENCES drafts(draft_id) ON DELETE CASCADE,
  FOREIGN KEY (cite_id) REFERENCES citations(cite_id) ON DELETE RESTRICT
);

CREATE INDEX IF NOT EXISTS idx_dcm_cite_id ON draft_citation_map(cite_id);

-- Retrieval index metadata
CREATE TABLE IF NOT EXISTS indexes (
  index_id TEXT PRIMARY KEY,
  kind TEXT NOT NULL CHECK (kind IN ('bm25','vector')),
  path TEXT NOT NULL,
  params_json TEXT NOT NULL,
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_indexes_kind ON indexes(kind);
"#;
