//! Recognize the body of a bare link: a domain, then whatever path, query,
//! or fragment follows it up to whitespace, less any trailing punctuation
//! that more likely belongs to the surrounding sentence.

fn is_segment_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_trailing_punctuation(b: u8) -> bool {
    matches!(b, b'?' | b'!' | b'.' | b',' | b':' | b'*' | b'_' | b'~' | b'\'' | b'"')
}

/// Length of the domain at the start of input, or None if there isn't a
/// valid one. Underscores are tolerated in subdomains but not in the last
/// two segments.
fn domain(input: &[u8]) -> Option<usize> {
    let mut segments: Vec<&[u8]> = Vec::new();
    let mut i = 0;

    loop {
        let start = i;
        while i < input.len() && is_segment_byte(input[i]) {
            i += 1;
        }
        if i == start {
            break;
        }
        segments.push(&input[start..i]);

        // only continue past a dot if another segment follows it
        if i + 1 < input.len() && input[i] == b'.' && is_segment_byte(input[i + 1]) {
            i += 1;
        } else {
            break;
        }
    }

    if segments.is_empty() {
        return None;
    }

    let invalid = segments
        .iter()
        .rev()
        .take(2)
        .any(|segment| segment.contains(&b'_'));
    if invalid {
        return None;
    }

    Some(i)
}

pub fn autolink(input: &[u8]) -> usize {
    let start = match domain(input) {
        Some(length) => length,
        None => return 0,
    };

    let mut end = start
        + input[start..]
            .iter()
            .take_while(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
            .count();

    while end > 0 {
        let last = input[end - 1];
        if is_trailing_punctuation(last) {
            end -= 1;
        } else if last == b')' {
            let prefix = &input[..end];
            let opens = prefix
                .iter()
                .filter(|b| **b == b'(')
                .count();
            let closes = prefix
                .iter()
                .filter(|b| **b == b')')
                .count();
            if opens >= closes {
                break;
            }
            end -= 1;
        } else {
            break;
        }
    }

    end
}
