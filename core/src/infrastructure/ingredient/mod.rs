pub mod in_memory;
pub mod mappers;
pub mod repositories;

pub use in_memory::InMemoryIngredientRepository;
pub use repositories::postgres_ingredient_repository::PostgresIngredientRepository;
