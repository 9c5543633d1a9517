use {
    crate::DecodeError,
    log::{debug, trace},
};

/// Default cap on the number of percent-decoding passes.
pub const DEFAULT_MAX_DECODE_PASSES: usize = 8;

/// Repeatedly percent-decode `text` until a pass leaves it unchanged.
///
/// Policy documents retrieved from AWS are sometimes encoded twice, so a single pass is not enough. Decoding
/// follows query-string rules: `%XX` becomes the byte `0xXX` and `+` becomes a space. A text that still changes
/// after `max_passes` passes is rejected.
///
/// The input is only borrowed; on failure the caller still holds the original text.
pub fn decode(text: &str, max_passes: usize) -> Result<String, DecodeError> {
    let mut current = text.to_string();

    for pass in 1..=max_passes {
        let next = unescape(&current, pass)?;
        trace!("Decode pass {}: {} bytes -> {} bytes", pass, current.len(), next.len());

        if next == current {
            debug!("Policy text decoded after {} passes", pass);
            return Ok(next);
        }

        current = next;
    }

    debug!("Policy text still changing after {} decode passes", max_passes);
    Err(DecodeError::NotConverged {
        passes: max_passes,
    })
}

/// A single query-unescape pass.
fn unescape(text: &str, pass: usize) -> Result<String, DecodeError> {
    let bytes = text.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let high = bytes.get(i + 1).copied().and_then(hex_value);
                let low = bytes.get(i + 2).copied().and_then(hex_value);

                match (high, low) {
                    (Some(high), Some(low)) => {
                        result.push((high << 4) | low);
                        i += 3;
                    }
                    _ => {
                        let end = (i + 3).min(bytes.len());
                        return Err(DecodeError::InvalidEscape {
                            offset: i,
                            sequence: String::from_utf8_lossy(&bytes[i..end]).into_owned(),
                        });
                    }
                }
            }
            b'+' => {
                result.push(b' ');
                i += 1;
            }
            c => {
                result.push(c);
                i += 1;
            }
        }
    }

    String::from_utf8(result).map_err(|_| DecodeError::InvalidUtf8 {
        pass,
    })
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
