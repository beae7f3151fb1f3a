pub mod no_cache;

pub use no_cache::no_cache;
