pub mod analyze_ingredients;
pub mod analyze_product;
pub mod extract_ingredients;
pub mod get_ingredient;
pub mod refresh_ingredient;
