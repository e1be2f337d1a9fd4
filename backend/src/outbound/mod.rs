//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters translate between domain types and storage representations and
//! carry no business rules. The only adapter today is PostgreSQL persistence.

pub mod persistence;
