//! Minimal HTML entity decoding.
//!
//! The trivia API escapes question and answer text with HTML entities
//! (`&quot;`, `&#039;`, ...). This handles the named entities the API is
//! known to emit plus decimal and hex character references; anything
//! unrecognized passes through verbatim.

pub fn decode_html_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        // An entity candidate runs from '&' to the next ';'.
        if let Some(end) = tail.find(';') {
            if end > 1 {
                if let Some(decoded) = decode_entity(&tail[1..end]) {
                    out.push(decoded);
                    rest = &tail[end + 1..];
                    continue;
                }
            }
        }

        // Not an entity; keep the ampersand and move on.
        out.push('&');
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        let code = u32::from_str_radix(hex, 16).ok()?;
        return char::from_u32(code);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        let code: u32 = dec.parse().ok()?;
        return char::from_u32(code);
    }

    let ch = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "deg" => '\u{b0}',
        "eacute" => '\u{e9}',
        "auml" => '\u{e4}',
        "ouml" => '\u{f6}',
        "uuml" => '\u{fc}',
        "ntilde" => '\u{f1}',
        _ => return None,
    };
    Some(ch)
}
