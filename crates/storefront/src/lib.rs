//! Storefront client for the Tech Hub API.
//!
//! Every page of the site follows one pattern: fetch a whole collection
//! newest first, filter it locally, mutate single rows through the admin
//! forms and re-fetch afterwards. The pieces of that pattern live here,
//! written against the [`backend::Backend`] trait so they can run against
//! the HTTP API ([`http::HttpBackend`]) or an in-memory store in tests.
//!
//! Shared state (notifications and the signed-in session) is carried by
//! an explicit [`context::AppContext`].

pub mod admin;
pub mod auth;
pub mod backend;
pub mod catalog;
pub mod contact;
pub mod context;
pub mod deletion;
pub mod error;
pub mod featured;
pub mod fetcher;
mod guard;
pub mod http;
pub mod inbox;
pub mod notify;
pub mod records;
pub mod samples;
