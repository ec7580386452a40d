//! Outbound adapters implementing the domain store ports.
//!
//! Adapters are thin translators between domain types and the backing
//! store's representation; they enforce the store-level constraints (field
//! validation, the unique identity index) but contain no graph logic.

pub mod memory;
