//! API key authorization for mutating operations.
//!
//! Create, update, and delete require the configured key to be presented
//! verbatim in the `Authorization` header. Reads and listings are open. When
//! no key is configured the check always passes; the server binary warns
//! about that at startup.

use subtle::ConstantTimeEq;

/// Check a presented `Authorization` header value against the configured key.
///
/// The comparison is constant-time in the key contents. A missing header or
/// a length mismatch returns early; only the length is observable, never the
/// position of a differing byte.
#[must_use]
pub fn is_authorized(configured: Option<&str>, presented: Option<&str>) -> bool {
    let Some(expected) = configured else {
        return true;
    };
    let Some(presented) = presented else {
        return false;
    };

    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
