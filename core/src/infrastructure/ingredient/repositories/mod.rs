pub mod postgres_ingredient_repository;
