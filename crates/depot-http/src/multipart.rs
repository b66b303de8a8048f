//! Multipart form data parser for object uploads.
//!
//! Parses `multipart/form-data` bodies and extracts the single `data` part:
//! its body bytes, its `Content-Type` header, and its filename. The parser is
//! synchronous and works on the already-collected body bytes.

use bytes::Bytes;

use depot_model::ObjectPayload;

use crate::request::BodyError;

/// Extract the boundary from a `multipart/form-data; boundary=...` value.
///
/// # Errors
///
/// Returns [`BodyError::Malformed`] if the boundary parameter is absent or
/// empty.
pub fn extract_boundary(content_type: &str) -> Result<String, BodyError> {
    for part in content_type.split(';') {
        let trimmed = part.trim();
        if let Some(val) = trimmed.strip_prefix("boundary=") {
            let boundary = val.trim_matches('"').to_owned();
            if boundary.is_empty() {
                return Err(BodyError::Malformed {
                    message: "empty multipart boundary".to_owned(),
                });
            }
            return Ok(boundary);
        }
    }

    Err(BodyError::Malformed {
        message: "missing multipart boundary".to_owned(),
    })
}

/// Parse a multipart body and extract the `data` part as an object payload.
///
/// Parts other than `data` are ignored. The part's filename, when present,
/// becomes the payload name; the part's own `Content-Type` header becomes the
/// payload content type.
///
/// # Errors
///
/// Returns [`BodyError::MissingData`] if no `data` part is present.
pub fn parse_data_part(body: &[u8], boundary: &str) -> Result<ObjectPayload, BodyError> {
    let delimiter = format!("--{boundary}");
    let end_delimiter = format!("--{boundary}--");

    let parts = split_parts(body, delimiter.as_bytes(), end_delimiter.as_bytes());
    for part in parts {
        let Some((headers, part_body)) = split_headers_body(part) else {
            continue;
        };

        let disposition = parse_content_disposition(headers);
        if disposition.name.as_deref() != Some("data") {
            continue;
        }

        return Ok(ObjectPayload::new(
            Bytes::copy_from_slice(part_body),
            parse_part_content_type(headers),
            disposition.filename,
        ));
    }

    Err(BodyError::MissingData)
}

/// Split the multipart body into individual parts by boundary.
fn split_parts<'a>(body: &'a [u8], delimiter: &[u8], end_delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut parts = Vec::new();
    let mut remaining = body;

    // Skip the preamble before the first delimiter.
    if let Some(pos) = find_bytes(remaining, delimiter) {
        remaining = skip_crlf(&remaining[pos + delimiter.len()..]);
    } else {
        return parts;
    }

    loop {
        if remaining.starts_with(end_delimiter)
            || remaining
                .strip_prefix(b"\r\n")
                .is_some_and(|r| r.starts_with(end_delimiter))
        {
            break;
        }

        if let Some(pos) = find_bytes(remaining, delimiter) {
            parts.push(strip_trailing_crlf(&remaining[..pos]));
            remaining = skip_crlf(&remaining[pos + delimiter.len()..]);
        } else {
            // No closing delimiter; treat the rest as the last part.
            let part = strip_trailing_crlf(remaining);
            if !part.is_empty() {
                parts.push(part);
            }
            break;
        }
    }

    parts
}

/// Split a part into its headers section and body at the first `\r\n\r\n`.
fn split_headers_body(part: &[u8]) -> Option<(&[u8], &[u8])> {
    let separator = b"\r\n\r\n";
    find_bytes(part, separator).map(|pos| (&part[..pos], &part[pos + separator.len()..]))
}

/// Parsed `Content-Disposition` header fields.
struct ContentDisposition {
    name: Option<String>,
    filename: Option<String>,
}

fn parse_content_disposition(headers: &[u8]) -> ContentDisposition {
    let headers_str = String::from_utf8_lossy(headers);
    let mut name = None;
    let mut filename = None;

    for line in headers_str.split("\r\n") {
        if !line
            .to_ascii_lowercase()
            .starts_with("content-disposition:")
        {
            continue;
        }
        if let Some(n) = extract_quoted_param(line, "name") {
            name = Some(n);
        }
        if let Some(f) = extract_quoted_param(line, "filename") {
            filename = Some(f);
        }
    }

    ContentDisposition { name, filename }
}

/// Extract the `Content-Type` from a part's headers section.
fn parse_part_content_type(headers: &[u8]) -> Option<String> {
    let headers_str = String::from_utf8_lossy(headers);
    for line in headers_str.split("\r\n") {
        let lower = line.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("content-type:") {
            return Some(rest.trim().to_owned());
        }
    }
    None
}

/// Extract a `param="value"` or `param=value` parameter from a header line.
fn extract_quoted_param(header_line: &str, param_name: &str) -> Option<String> {
    let quoted_pattern = format!("{param_name}=\"");
    let unquoted_pattern = format!("{param_name}=");
    let lower_line = header_line.to_ascii_lowercase();

    if let Some(pos) = lower_line.find(&quoted_pattern) {
        let rest = &header_line[pos + quoted_pattern.len()..];
        if let Some(end) = rest.find('"') {
            return Some(rest[..end].to_owned());
        }
    }

    if let Some(pos) = lower_line.find(&unquoted_pattern) {
        let rest = &header_line[pos + unquoted_pattern.len()..];
        let end = rest.find(';').unwrap_or(rest.len());
        let val = rest[..end].trim().to_owned();
        if !val.is_empty() {
            return Some(val);
        }
    }

    None
}

/// Find the position of a needle in a haystack.
fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn skip_crlf(data: &[u8]) -> &[u8] {
    data.strip_prefix(b"\r\n").unwrap_or(data)
}

fn strip_trailing_crlf(data: &[u8]) -> &[u8] {
    data.strip_suffix(b"\r\n").unwrap_or(data)
}
