mod record;
mod record_type;
mod response_code;

pub use record::{DnsRecord, RecordData};
pub use record_type::RecordType;
pub use response_code::ResponseCode;

/// Query/record class IN.
pub const CLASS_IN: u16 = 1;
