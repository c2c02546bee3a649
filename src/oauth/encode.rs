//! RFC 3986 percent-encoding as OAuth 1.0a uses it.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except the RFC 3986 unreserved set (`ALPHA DIGIT - . _ ~`).
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes a parameter key or value.
///
/// Existing well-formed `%XX` triplets are kept (hex digits uppercased) rather than encoded a
/// second time, so a value that arrives already encoded is not turned into `%25XX`. A `%`
/// that does not start a triplet is encoded as `%25`.
pub fn encode(value: &str) -> String {
	let bytes = value.as_bytes();
	let mut out = String::with_capacity(value.len());
	let mut start = 0;
	let mut idx = 0;

	while idx < bytes.len() {
		if bytes[idx] == b'%' && is_hex_triplet(bytes, idx) {
			out.extend(utf8_percent_encode(&value[start..idx], OAUTH_ENCODE_SET));
			out.push('%');
			out.push(char::from(bytes[idx + 1].to_ascii_uppercase()));
			out.push(char::from(bytes[idx + 2].to_ascii_uppercase()));

			idx += 3;
			start = idx;
		} else {
			idx += 1;
		}
	}

	out.extend(utf8_percent_encode(&value[start..], OAUTH_ENCODE_SET));

	out
}

/// Percent-encodes every byte outside the unreserved set, `%` included.
///
/// Used for the base-string components, where the already-encoded parameter string must be
/// encoded once more.
pub fn encode_strict(value: &str) -> String {
	utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

fn is_hex_triplet(bytes: &[u8], idx: usize) -> bool {
	matches!(
		(bytes.get(idx + 1), bytes.get(idx + 2)),
		(Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
	)
}
