mod lookup;
mod mx;
mod ptr;

pub use lookup::run_lookup;
pub use mx::run_mx;
pub use ptr::run_ptr;
