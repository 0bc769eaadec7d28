/// iCalendar content lines end with CRLF (RFC 5545 §3.1).
pub const LINE_BREAK: &str = "\r\n";

/// Domain part of every generated UID.
pub const UID_DOMAIN: &str = "almanac";
pub const UID_SUFFIX: &str = const_str::concat!("@", UID_DOMAIN);

pub const PRODUCT_NAME: &str = "almanac";
pub const DEFAULT_PRODID: &str = const_str::concat!("-//", PRODUCT_NAME, "//Calendar//EN");

/// File extension appended to calendar output paths that lack one.
pub const ICS_EXTENSION: &str = "ics";

/// Width, in characters, at which escaped descriptions are folded.
///
/// Leaves room for the `DESCRIPTION:` prefix within the 75-octet line limit.
pub const DESCRIPTION_FOLD_WIDTH: usize = 63;
