pub mod memory_key_store;
pub mod raw;
pub mod shared;
