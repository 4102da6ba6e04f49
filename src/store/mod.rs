//! Client for the hosted datastore's REST interface.
//!
//! The datastore owns the policy table entirely; this application only ever
//! appends rows (with the privileged key) and reads them back (with the
//! anonymous key). There is no update or delete path.

mod client;
mod types;

pub use client::PolicyStore;
pub use types::{NewPolicy, Policy, StoreError};
