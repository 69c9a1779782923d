//! Record types and readers for the line-delimited JSON files passed between
//! pipeline stages.
//!
//! Each stage reads one JSON object per line and writes either CSV tables or
//! further JSON lines. Readers report the offending path and 1-based line
//! number on failure so malformed inputs can be fixed by hand.

pub mod jsonl;
pub mod records;
