use super::MAX_NAME_LEN;
use ferrous_mx_domain::DomainError;

const POINTER_MASK: u8 = 0xC0;

/// Read cursor over a received DNS message.
///
/// Fixed-size reads never fail: past the end they yield zero bytes and keep
/// advancing `offset`, so a decoder can walk a whole message and check
/// [`is_past_end`](Self::is_past_end) once afterwards. A read ending exactly
/// at `length` is legal.
pub struct WireBuffer<'a> {
    bytes: &'a [u8],
    length: usize,
    offset: usize,
}

impl<'a> WireBuffer<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            length: bytes.len(),
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_past_end(&self) -> bool {
        self.offset > self.length
    }

    pub fn remaining(&self) -> usize {
        self.length.saturating_sub(self.offset)
    }

    pub fn read_u8(&mut self) -> u8 {
        let value = self.byte_at(self.offset).unwrap_or(0);
        self.offset = self.offset.saturating_add(1);
        value
    }

    pub fn read_u16(&mut self) -> u16 {
        u16::from_be_bytes([self.read_u8(), self.read_u8()])
    }

    pub fn read_u32(&mut self) -> u32 {
        u32::from_be_bytes([
            self.read_u8(),
            self.read_u8(),
            self.read_u8(),
            self.read_u8(),
        ])
    }

    pub fn skip(&mut self, count: usize) {
        self.offset = self.offset.saturating_add(count);
    }

    /// Moves the cursor to an absolute position, e.g. the end of a record's RDATA.
    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Decodes a possibly compressed domain name starting at the cursor.
    ///
    /// Labels are joined with `.`, without a trailing dot; the root name
    /// decodes to an empty string. After a compression pointer the cursor
    /// resumes just past the first pointer. Pointer chains are bounded by the
    /// message length, so a cycle fails instead of spinning forever.
    pub fn read_name(&mut self) -> Result<String, DomainError> {
        let mut name = String::new();
        let mut pos = self.offset;
        let mut resume_at: Option<usize> = None;
        let mut hops = 0usize;

        loop {
            let len = self
                .byte_at(pos)
                .ok_or_else(|| format_error("name runs past end of message"))?;

            if len == 0 {
                pos += 1;
                break;
            }

            match len & POINTER_MASK {
                POINTER_MASK => {
                    let low = self
                        .byte_at(pos + 1)
                        .ok_or_else(|| format_error("compression pointer runs past end"))?;
                    hops += 1;
                    if hops > self.length {
                        return Err(format_error("compression pointer loop"));
                    }
                    if resume_at.is_none() {
                        resume_at = Some(pos + 2);
                    }
                    let target = (usize::from(len & !POINTER_MASK) << 8) | usize::from(low);
                    if target >= self.length {
                        return Err(format_error("compression pointer out of range"));
                    }
                    pos = target;
                }
                0 => {
                    let len = usize::from(len);
                    let start = pos + 1;
                    let end = start + len;
                    let label = self
                        .bytes
                        .get(start..end)
                        .filter(|_| end <= self.length)
                        .ok_or_else(|| format_error("label runs past end of message"))?;

                    if !name.is_empty() {
                        name.push('.');
                    }
                    name.push_str(&String::from_utf8_lossy(label));
                    if name.len() > MAX_NAME_LEN {
                        return Err(format_error("name longer than 255 bytes"));
                    }
                    pos = end;
                }
                _ => return Err(format_error("unsupported label type")),
            }
        }

        self.offset = resume_at.unwrap_or(pos);
        Ok(name)
    }

    fn byte_at(&self, pos: usize) -> Option<u8> {
        if pos < self.length {
            self.bytes.get(pos).copied()
        } else {
            None
        }
    }
}

fn format_error(reason: &str) -> DomainError {
    DomainError::FormatError(reason.to_string())
}
