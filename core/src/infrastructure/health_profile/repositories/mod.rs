mod health_profile_repository;

pub use health_profile_repository::PostgresHealthProfileRepository;
