pub mod error;
pub mod gateway;
pub mod pagination;
pub mod posts;
