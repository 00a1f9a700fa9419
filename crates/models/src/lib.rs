//! Entities, query primitives and connection helpers for the relation tables.

pub mod errors;
pub mod db;
pub mod disk;
pub mod security_group;
pub mod disk_cvm_rel;
pub mod security_group_cvm_rel;
pub mod filter;
pub mod page;
pub mod vendor;

#[cfg(test)]
mod tests;
