//! Parses raw barcode payload strings into typed intents by prefix and
//! pattern matching (WIFI:, tel:, SMSTO:, MECARD:/VCARD, VEVENT, GTIN digits).

use lasso_types::observation::BarcodePayload;

pub fn parse_payload(payload: &str) -> BarcodePayload {
    let trimmed = payload.trim();

    if let Some(rest) = strip_prefix_ci(trimmed, "WIFI:") {
        return parse_wifi(rest, trimmed);
    }
    if starts_with_ci(trimmed, "http://") || starts_with_ci(trimmed, "https://") {
        return BarcodePayload::Url(trimmed.to_string());
    }
    if let Some(rest) = strip_prefix_ci(trimmed, "TEL:") {
        return BarcodePayload::Phone(rest.trim().to_string());
    }
    if let Some(rest) = strip_prefix_ci(trimmed, "SMSTO:").or_else(|| strip_prefix_ci(trimmed, "SMS:"))
    {
        let (number, body) = match rest.split_once(':') {
            Some((number, body)) if !body.is_empty() => (number, Some(body.to_string())),
            Some((number, _)) => (number, None),
            None => (rest, None),
        };
        return BarcodePayload::Sms {
            number: number.trim().to_string(),
            body,
        };
    }
    if let Some(rest) = strip_prefix_ci(trimmed, "MECARD:") {
        return parse_mecard(rest);
    }
    if contains_ci(trimmed, "BEGIN:VEVENT") {
        return parse_vevent(trimmed);
    }
    if contains_ci(trimmed, "BEGIN:VCARD") {
        return parse_vcard(trimmed);
    }
    if is_gtin(trimmed) {
        return BarcodePayload::Product {
            gtin: trimmed.to_string(),
        };
    }

    BarcodePayload::Text(trimmed.to_string())
}

/// `WIFI:S:<ssid>;T:<security>;P:<password>;H:<hidden>;;` with `\`-escaped
/// separators inside values. A payload without an SSID falls back to text.
fn parse_wifi(fields: &str, original: &str) -> BarcodePayload {
    let mut ssid = None;
    let mut password = None;
    let mut security = None;
    let mut hidden = false;

    for segment in split_unescaped(fields, ';') {
        let Some((key, value)) = segment.split_once(':') else {
            continue;
        };
        let value = unescape(value);
        match key.to_ascii_uppercase().as_str() {
            "S" => ssid = Some(value),
            "P" if !value.is_empty() => password = Some(value),
            "T" if !value.is_empty() => security = Some(value),
            "H" => hidden = value.eq_ignore_ascii_case("true"),
            _ => {}
        }
    }

    match ssid {
        Some(ssid) if !ssid.is_empty() => BarcodePayload::Wifi {
            ssid,
            password,
            security,
            hidden,
        },
        _ => BarcodePayload::Text(original.to_string()),
    }
}

fn parse_mecard(fields: &str) -> BarcodePayload {
    let mut name = None;
    let mut phone = None;
    let mut email = None;
    for segment in split_unescaped(fields, ';') {
        let Some((key, value)) = segment.split_once(':') else {
            continue;
        };
        let value = unescape(value);
        if value.is_empty() {
            continue;
        }
        match key.to_ascii_uppercase().as_str() {
            "N" => name = Some(value),
            "TEL" => phone = Some(value),
            "EMAIL" => email = Some(value),
            _ => {}
        }
    }
    BarcodePayload::Contact { name, phone, email }
}

fn parse_vcard(text: &str) -> BarcodePayload {
    let mut name = None;
    let mut phone = None;
    let mut email = None;
    for line in text.lines() {
        let line = line.trim();
        if let Some(value) = vcard_value(line, "FN") {
            name = Some(value);
        } else if let Some(value) = vcard_value(line, "TEL") {
            phone = Some(value);
        } else if let Some(value) = vcard_value(line, "EMAIL") {
            email = Some(value);
        }
    }
    BarcodePayload::Contact { name, phone, email }
}

fn parse_vevent(text: &str) -> BarcodePayload {
    let mut summary = None;
    let mut starts = None;
    let mut ends = None;
    for line in text.lines() {
        let line = line.trim();
        if let Some(value) = vcard_value(line, "SUMMARY") {
            summary = Some(value);
        } else if let Some(value) = vcard_value(line, "DTSTART") {
            starts = Some(value);
        } else if let Some(value) = vcard_value(line, "DTEND") {
            ends = Some(value);
        }
    }
    BarcodePayload::CalendarEvent {
        summary,
        starts,
        ends,
    }
}

/// Matches `KEY:value` and parameterized `KEY;PARAM=..:value` lines.
fn vcard_value(line: &str, key: &str) -> Option<String> {
    let (head, value) = line.split_once(':')?;
    let head = head.split(';').next().unwrap_or(head);
    if head.eq_ignore_ascii_case(key) && !value.is_empty() {
        Some(value.trim().to_string())
    } else {
        None
    }
}

fn is_gtin(s: &str) -> bool {
    matches!(s.len(), 8 | 12 | 13 | 14) && s.bytes().all(|b| b.is_ascii_digit())
}

fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    starts_with_ci(s, prefix).then(|| &s[prefix.len()..])
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_uppercase().contains(needle)
}

/// Split on `separator` while honoring backslash escapes, dropping empty
/// segments (the `;;` terminator).
fn split_unescaped(s: &str, separator: char) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for c in s.chars() {
        if escaped {
            current.push('\\');
            current.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == separator {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if escaped {
        current.push('\\');
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;
    for c in s.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            out.push(c);
        }
    }
    out
}
