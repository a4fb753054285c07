use crate::error::{CodecError, CodecResult};

/// Encode a u64 as a variable-length base-128 integer (continuation bit),
/// smallest unsigned representation.
pub fn encode_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value > 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if value == 0 {
            break;
        }
    }
}

/// Decode a variable-length integer. Returns (value, bytes_consumed).
pub fn decode_varint(data: &[u8]) -> CodecResult<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0;
    for (i, &byte) in data.iter().enumerate() {
        value |= ((byte & 0x7F) as u64) << shift;
        shift += 7;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        if shift >= 64 {
            return Err(CodecError::CorruptFile {
                offset: 0,
                reason: "varint overflow".into(),
            });
        }
    }
    Err(CodecError::CorruptFile {
        offset: 0,
        reason: "truncated varint".into(),
    })
}
