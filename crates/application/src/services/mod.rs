mod domain_literal;
mod reverse_name;

pub use domain_literal::parse_domain_literal;
pub use reverse_name::reverse_name;
