pub mod mail;
pub mod reverse;

pub use mail::ResolveMailHostsUseCase;
pub use reverse::ReverseLookupUseCase;
