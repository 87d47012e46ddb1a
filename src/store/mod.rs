pub mod kv;
pub mod lock;
pub mod repository;
pub mod task_store;
pub mod workspace;
