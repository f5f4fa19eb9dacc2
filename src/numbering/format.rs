//! Numeral rendering for list counters.

use super::catalog::NumeralKind;

const ROMAN_SYMBOLS: &[(u32, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Render `value` (>= 1) in the numeral system `kind`.
///
/// Bullet and unrecognized kinds render as decimal.
pub fn format(value: u32, kind: NumeralKind) -> String {
    debug_assert!(value >= 1, "list counters start at 1");
    match kind {
        NumeralKind::Decimal | NumeralKind::Bullet | NumeralKind::Other => value.to_string(),
        NumeralKind::UpperRoman => to_roman(value),
        NumeralKind::LowerRoman => to_roman(value).to_lowercase(),
        NumeralKind::UpperLetter => to_letters(value),
        NumeralKind::LowerLetter => to_letters(value).to_lowercase(),
    }
}

/// Render `value` at a level whose shallower neighbour uses `parent`.
///
/// Lower-case letters are only kept under a letter-numbered parent; under
/// anything else (or at the top level) the value is shown as a decimal.
pub fn format_under(value: u32, kind: NumeralKind, parent: Option<NumeralKind>) -> String {
    if kind == NumeralKind::LowerLetter && !parent.is_some_and(|p| p.is_letter()) {
        return value.to_string();
    }
    format(value, kind)
}

/// Additive-subtractive Roman numeral; large values repeat "M".
pub fn to_roman(mut value: u32) -> String {
    let mut out = String::new();
    for &(weight, symbol) in ROMAN_SYMBOLS {
        while value >= weight {
            out.push_str(symbol);
            value -= weight;
        }
    }
    out
}

/// Bijective base-26: A..Z, AA, AB, ...
pub fn to_letters(value: u32) -> String {
    let mut letters = Vec::new();
    let mut n = value;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}
