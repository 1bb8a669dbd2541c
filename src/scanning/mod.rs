//! Byte-level decoding of source input. Problems with the encoding are
//! repaired in place and reported; they never stop the document from being
//! parsed.

use tracing::debug;

const BYTE_ORDER_MARK: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    IllegalNul(usize),
    IllegalByteOrderMark(usize),
    InvalidEncoding(usize),
}

impl Diagnostic {
    /// Byte offset into the raw input.
    pub fn offset(&self) -> usize {
        match self {
            Diagnostic::IllegalNul(offset) => *offset,
            Diagnostic::IllegalByteOrderMark(offset) => *offset,
            Diagnostic::InvalidEncoding(offset) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Diagnostic::IllegalNul(_) => "illegal NUL character, replaced".to_string(),
            Diagnostic::IllegalByteOrderMark(_) => {
                "byte order mark only permitted at start of input, skipped".to_string()
            }
            Diagnostic::InvalidEncoding(_) => "invalid UTF-8 encoding, skipped".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Decode input, collecting every diagnostic.
pub fn decode(bytes: &[u8]) -> Decoded {
    let mut diagnostics = Vec::new();
    let text = decode_with(bytes, &mut |diagnostic| diagnostics.push(diagnostic));

    debug!(count = diagnostics.len(), "Decoded input");

    Decoded { text, diagnostics }
}

/// Decode input, handing each diagnostic to the supplied callback as it is
/// encountered. Returns the repaired text.
pub fn decode_with(bytes: &[u8], report: &mut dyn FnMut(Diagnostic)) -> String {
    let mut text = String::with_capacity(bytes.len());

    // a leading byte order mark is legal and simply dropped
    let mut i = if bytes.starts_with(BYTE_ORDER_MARK) {
        BYTE_ORDER_MARK.len()
    } else {
        0
    };

    while i < bytes.len() {
        match std::str::from_utf8(&bytes[i..]) {
            Ok(valid) => {
                push_checked(&mut text, valid, i, report);
                break;
            }
            Err(error) => {
                let good = error.valid_up_to();
                let valid = std::str::from_utf8(&bytes[i..i + good]).unwrap_or_default();
                push_checked(&mut text, valid, i, report);

                report(Diagnostic::InvalidEncoding(i + good));

                // error_len() is None when input ends mid-sequence
                let skip = error
                    .error_len()
                    .unwrap_or(bytes.len() - i - good);
                i += good + skip;
            }
        }
    }

    text
}

fn push_checked(text: &mut String, valid: &str, base: usize, report: &mut dyn FnMut(Diagnostic)) {
    for (offset, c) in valid.char_indices() {
        match c {
            '\0' => {
                report(Diagnostic::IllegalNul(base + offset));
                text.push(char::REPLACEMENT_CHARACTER);
            }
            '\u{FEFF}' => {
                report(Diagnostic::IllegalByteOrderMark(base + offset));
            }
            _ => text.push(c),
        }
    }
}
