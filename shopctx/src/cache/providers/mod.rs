//! Cache provider implementations.

mod memory;

pub use memory::MemoryCacheProvider;
