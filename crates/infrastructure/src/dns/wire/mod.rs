//! RFC 1035 wire format: the subset a stub resolver needs.

mod buffer;
mod codec;

pub use buffer::WireBuffer;
pub use codec::{decode_message, encode_name, encode_query, HEADER_LEN, MAX_UDP_MESSAGE_SIZE};

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_LABEL_LEN: usize = 63;
