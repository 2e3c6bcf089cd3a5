/*!
# Charsets

Charset names resolve through the WHATWG encoding labels.
*/

use encoding_rs::Encoding;

/// Charset used when the `charset` attribute is absent
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Resolve an encoding name such as `UTF-8`, `ISO-8859-1` or `windows-1252`
///
/// Only encodings usable in both directions resolve: labels mapped to the
/// `replacement` encoding and encodings written out as another encoding
/// (UTF-16) resolve to `None`.
pub fn charset_for(name: &str) -> Option<&'static Encoding> {
    Encoding::for_label_no_replacement(name.trim().as_bytes())
        .filter(|encoding| encoding.output_encoding() == *encoding)
}
