//! policyhub — a small policy-listing service.
//!
//! Two leaves over one external datastore: an update endpoint that appends a
//! placeholder policy record through the datastore's REST interface, and a
//! listing surface that fetches all records ordered by date descending and
//! filters them in memory by a case-insensitive substring over title and
//! content. There is no state shared between the two beyond the datastore
//! itself.

pub mod config;
pub mod filter;
pub mod server;
pub mod store;
pub mod util;
