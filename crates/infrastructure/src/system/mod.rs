pub mod host_lookup;

pub use host_lookup::SystemHostLookup;
