pub mod config;
pub mod stub;

pub use config::StubResolverConfig;
pub use stub::StubResolver;
