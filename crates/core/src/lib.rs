//! Domain logic shared by the API server and the storefront client.
//!
//! Nothing in here touches the network or the database.

pub mod error;
pub mod fetch;
pub mod filter;
pub mod icons;
pub mod search;
pub mod storage;
pub mod types;
pub mod validation;
