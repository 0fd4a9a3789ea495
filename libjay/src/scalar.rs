//! Plain-scalar type resolution and quoting policy.
//!
//! YAML plain scalars are untyped text; whether `no` is a boolean or a
//! string is decided by the YAML 1.1 core schema's resolution rules.
//! [`classify`] implements those rules as a fixed rule list evaluated
//! top-down: null literals, then boolean literals, then the integer
//! grammar, then the float grammar, then string.
//!
//! [`needs_quoting`] is the inverse question, asked when emitting YAML:
//! would this text, written without quotes, resolve to something other
//! than itself on re-parse or break the scalar syntax?

/// Literals that resolve to null. The empty string is one of them, so a
/// mapping entry with no value (`key:`) resolves to null.
const NULL_LITERALS: [&str; 5] = ["", "~", "null", "Null", "NULL"];

const TRUE_LITERALS: [&str; 11] = [
    "true", "True", "TRUE", "yes", "Yes", "YES", "on", "On", "ON", "y", "Y",
];

const FALSE_LITERALS: [&str; 11] = [
    "false", "False", "FALSE", "no", "No", "NO", "off", "Off", "OFF", "n", "N",
];

const NAN_LITERALS: [&str; 3] = [".nan", ".NaN", ".NAN"];

const INF_LITERALS: [&str; 9] = [
    ".inf", ".Inf", ".INF", "+.inf", "+.Inf", "+.INF", "-.inf", "-.Inf", "-.INF",
];

/// Characters that start a YAML syntax construct when they begin a plain
/// scalar. A plain scalar beginning with one of these must be quoted.
const LEADING_INDICATORS: [char; 14] = [
    ' ', '|', '*', '&', '!', '\'', '"', '{', '}', '>', '-', '@', '`', '%',
];

/// The resolved type of one scalar span.
///
/// Transient: computed from one scalar event and consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// One of the null literals.
    Null,
    /// One of the boolean literals.
    Bool(bool),
    /// A signed 64-bit integer (decimal, `0o` octal, or `0x` hex).
    Int(i64),
    /// A 64-bit float, including NaN and the infinities.
    Float(f64),
    /// Anything else: the text stands for itself.
    Str(&'a str),
}

/// Resolve the type of a plain scalar's text.
///
/// The rule order is load-bearing: later rules apply only when earlier
/// ones do not match. An integer-shaped literal whose magnitude exceeds
/// `i64::MAX` resolves to [`Scalar::Str`], never to a float.
pub fn classify(text: &str) -> Scalar<'_> {
    if NULL_LITERALS.contains(&text) {
        Scalar::Null
    } else if TRUE_LITERALS.contains(&text) {
        Scalar::Bool(true)
    } else if FALSE_LITERALS.contains(&text) {
        Scalar::Bool(false)
    } else if is_int_syntax(text) {
        match parse_int(text) {
            Some(i) => Scalar::Int(i),
            None => Scalar::Str(text),
        }
    } else if let Some(f) = parse_float(text) {
        Scalar::Float(f)
    } else {
        Scalar::Str(text)
    }
}

/// Whether a string value must be quoted to survive a YAML re-parse as
/// the same string.
///
/// True when the text matches a reserved literal set, begins with a
/// syntax indicator or the document separator, carries whitespace a
/// plain scalar cannot preserve, contains a character that would start
/// a comment or break flow syntax, or matches the integer or float
/// grammar (and would silently change type on re-read).
pub fn needs_quoting(text: &str) -> bool {
    NULL_LITERALS.contains(&text)
        || TRUE_LITERALS.contains(&text)
        || FALSE_LITERALS.contains(&text)
        || NAN_LITERALS.contains(&text)
        || INF_LITERALS.contains(&text)
        || text
            .chars()
            .next()
            .is_some_and(|c| LEADING_INDICATORS.contains(&c))
        || text.starts_with("---")
        || text.ends_with(' ')
        || text.contains(['\n', '\t', '#', ','])
        || is_int_syntax(text)
        || is_float_syntax(text)
}

/// Whether the whole span matches the integer grammar: an optional sign,
/// then decimal digits, `0o` + octal digits, or `0x` + hex digits.
fn is_int_syntax(text: &str) -> bool {
    let rest = strip_sign(text);
    if let Some(hex) = rest.strip_prefix("0x") {
        !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit())
    } else if let Some(oct) = rest.strip_prefix("0o") {
        !oct.is_empty() && oct.bytes().all(|b| (b'0'..=b'7').contains(&b))
    } else {
        !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Parse an integer-shaped span. `None` when the magnitude exceeds
/// `i64::MAX`, which is a classification failure rather than a wrap or
/// a float promotion.
fn parse_int(text: &str) -> Option<i64> {
    let negative = text.starts_with('-');
    let rest = strip_sign(text);

    let magnitude: u64 = if let Some(hex) = rest.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()?
    } else if let Some(oct) = rest.strip_prefix("0o") {
        u64::from_str_radix(oct, 8).ok()?
    } else {
        rest.parse::<u64>().ok()?
    };

    if magnitude > i64::MAX as u64 {
        return None;
    }
    let magnitude = magnitude as i64;
    Some(if negative { -magnitude } else { magnitude })
}

/// Whether the whole span matches the decimal float grammar: optional
/// sign, digits with an optional fractional part and optional exponent,
/// with at least one digit present in the mantissa.
fn is_float_syntax(text: &str) -> bool {
    let rest = strip_sign(text);
    let bytes = rest.as_bytes();
    let mut i = 0;
    let mut saw_digit = false;
    let mut saw_point = false;

    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => saw_digit = true,
            b'.' if !saw_point => saw_point = true,
            _ => break,
        }
        i += 1;
    }
    if !saw_digit {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Parse a float-shaped span: the NaN and infinity literal sets first,
/// then the decimal grammar. A decimal whose value overflows to infinity
/// is rejected; only the explicit literals produce non-finite floats.
fn parse_float(text: &str) -> Option<f64> {
    if NAN_LITERALS.contains(&text) {
        return Some(f64::NAN);
    }
    if INF_LITERALS.contains(&text) {
        return Some(if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if !is_float_syntax(text) {
        return None;
    }
    let f: f64 = text.parse().ok()?;
    if f.is_infinite() {
        return None;
    }
    Some(f)
}

fn strip_sign(text: &str) -> &str {
    text.strip_prefix(['+', '-']).unwrap_or(text)
}
