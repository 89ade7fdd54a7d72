//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod contact_message_repo;
pub mod electronics_repo;
pub mod service_repo;
pub mod session_repo;
pub mod software_repo;
pub mod user_repo;

pub use contact_message_repo::ContactMessageRepo;
pub use electronics_repo::ElectronicsRepo;
pub use service_repo::ServiceRepo;
pub use session_repo::SessionRepo;
pub use software_repo::SoftwareRepo;
pub use user_repo::UserRepo;
