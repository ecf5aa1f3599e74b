pub mod entities;
pub mod rules;
pub mod services;

pub use entities::*;
pub use rules::*;
pub use services::*;
