pub mod adapter;
pub mod infrastructure;
