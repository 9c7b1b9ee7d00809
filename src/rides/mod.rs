mod repo;
mod repo_types;

#[cfg(test)]
pub use memory::InMemoryRideRepository;
pub use repo::{PgRideRepository, RepoError, RepoResult, RideRepository};
pub use repo_types::{NewRide, Ride};
