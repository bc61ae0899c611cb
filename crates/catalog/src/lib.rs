//! Product catalog library: slug derivation, the catalog store and the slug backfill

pub mod config;
pub mod db;
pub mod migration;
pub mod product;
pub mod slug;
pub mod validation;

pub mod test_helpers;
