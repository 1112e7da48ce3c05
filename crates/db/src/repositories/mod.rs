//! Repository structs, one per table.

mod admin_repo;
mod application_repo;
mod hero_repo;
mod mission_repo;
mod review_repo;

pub use admin_repo::AdminRepo;
pub use application_repo::ApplicationRepo;
pub use hero_repo::HeroRepo;
pub use mission_repo::MissionRepo;
pub use review_repo::ReviewRepo;
