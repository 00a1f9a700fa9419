//! Service layer for the cvm relation tables.
//! - Repositories own the SQL; services validate, open transactions and shape responses.
//! - Repositories are injected at construction time.

pub mod errors;
pub mod kit;
pub mod txn;
pub mod query;
pub mod disk_cvm_rel;
pub mod sg_cvm_rel;
#[cfg(test)]
pub mod test_support;
