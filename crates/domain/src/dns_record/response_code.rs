use std::fmt;

/// Outcome code of a lookup.
///
/// The first six variants mirror the RCODE nibble of a DNS header. `IoFailure`
/// and `WrongId` never appear on the wire: they are synthesized locally when
/// no usable response could be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Other(u8),
    IoFailure,
    WrongId,
}

impl ResponseCode {
    pub fn from_wire(code: u8) -> Self {
        match code & 0x0F {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }

    /// Wire value, or `None` for locally synthesized codes.
    pub fn to_wire(&self) -> Option<u8> {
        match self {
            ResponseCode::NoError => Some(0),
            ResponseCode::FormatError => Some(1),
            ResponseCode::ServerFailure => Some(2),
            ResponseCode::NameError => Some(3),
            ResponseCode::NotImplemented => Some(4),
            ResponseCode::Refused => Some(5),
            ResponseCode::Other(code) => Some(*code),
            ResponseCode::IoFailure | ResponseCode::WrongId => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseCode::NoError)
    }

    pub fn is_local(&self) -> bool {
        self.to_wire().is_none()
    }

    /// A server answer the resolver accepts as final: data or an authoritative "no such name".
    pub fn is_acceptable_answer(&self) -> bool {
        matches!(self, ResponseCode::NoError | ResponseCode::NameError)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormatError => "FORMERR",
            ResponseCode::ServerFailure => "SERVFAIL",
            ResponseCode::NameError => "NXDOMAIN",
            ResponseCode::NotImplemented => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "RCODE",
            ResponseCode::IoFailure => "IO_FAILURE",
            ResponseCode::WrongId => "WRONG_ID",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::Other(code) => write!(f, "RCODE{}", code),
            known => write!(f, "{}", known.as_str()),
        }
    }
}
