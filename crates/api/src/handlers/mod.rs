pub mod assets;
pub mod auth;
pub mod contact;
pub mod electronics;
pub mod messages;
pub mod services;
pub mod software;
