pub mod connection;
pub mod repository;
pub mod summary_repository;
