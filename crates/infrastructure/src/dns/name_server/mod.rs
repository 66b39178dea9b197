mod registry;

pub use registry::{NameServer, NameServerRegistry, SelectedServer};
