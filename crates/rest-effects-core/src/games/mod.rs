// Game log ingestion: raw rows -> enriched per-team game records.

pub mod filter;
pub mod loader;
pub mod record;
pub mod teams;
