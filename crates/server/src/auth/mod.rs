pub mod extract;
pub mod tokens;
