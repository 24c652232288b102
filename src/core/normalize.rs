//! Field-level normalization for raw CSV values.
//!
//! Vendor extracts are not consistent between revisions: product codes carry
//! per-variant suffixes (`IB220A`, `IB220AX`), colors change accents and
//! punctuation between files (`Écru`, `ecru`, `Off-White`, `off white`), and
//! quantities may carry thousands separators. Everything that touches a raw
//! field goes through the helpers in this module so that the same value always
//! lands in the same index bucket.

/// Fold a raw product reference to its base code.
///
/// Takes the leading run of ASCII letters followed by the leading run of
/// digits and discards any trailing variant suffix, so `IB220A`, `IB220AX`
/// and `IB220` all fold to `IB220`. Values that do not match this shape are
/// returned trimmed but otherwise unchanged.
#[must_use]
pub fn base_ref(raw: &str) -> String {
    let trimmed = raw.trim();

    let letters = trimmed
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .count();
    let digits = trimmed[letters..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();

    if letters > 0 && digits > 0 {
        trimmed[..letters + digits].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalize a color for display: trimmed, internal whitespace collapsed to
/// single spaces. The first spelling seen for a given key is what the index
/// keeps, so this is only cosmetic cleanup, not identity.
#[must_use]
pub fn display_color(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fold a color to its matching key: lower-cased, accents stripped, anything
/// that is not alphanumeric removed. `"Off-White"`, `"off white"` and
/// `"OFF WHITE"` all share the key `offwhite`.
#[must_use]
pub fn color_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    for c in raw.chars().flat_map(char::to_lowercase) {
        if let Some(folded) = strip_accent(c) {
            key.push_str(folded);
        } else if c.is_alphanumeric() {
            key.push(c);
        }
    }
    key
}

/// Map an accented (already lower-cased) character to its ASCII base form.
///
/// Covers the Latin-1 range seen in the French/Spanish/German vendor exports.
/// Returns `None` for characters that need no folding.
pub(crate) fn strip_accent(c: char) -> Option<&'static str> {
    Some(match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        _ => return None,
    })
}

/// Coerce a raw quantity field to a non-negative integer.
///
/// Internal whitespace is stripped first (thousands separators, including
/// non-breaking spaces); anything that still fails a strict integer parse
/// coerces to `0`. A bad cell must never take down the whole file.
#[must_use]
pub fn parse_quantity(raw: &str) -> u32 {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact.parse().unwrap_or(0)
}
