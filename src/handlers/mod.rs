pub mod help;
pub mod products;
