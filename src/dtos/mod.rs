pub mod help;
pub mod product;
