//! Invoice filename parsing.
//!
//! Filenames follow `{CODE}-{MONTH}-{YEAR}-{INVOICE_NUMBER}.pdf`:
//!
//! - `CODE`: 1 to 3 of `[A-Z0-9]` followed by exactly 6 digits
//! - `MONTH`: three-letter abbreviation, `Jan` through `Dec`
//! - `YEAR`: four digits within 2000..=2100
//! - `INVOICE_NUMBER`: one or more of `[A-Za-z0-9]`
//!
//! Every rejection yields `None`; no partial result is ever produced.

use serde::{Deserialize, Serialize};

use crate::invoice::month::Month;

const PDF_EXTENSION: &[u8] = b".pdf";
const CODE_DIGITS: usize = 6;
const MAX_CODE_PREFIX: usize = 3;
const YEAR_RANGE: std::ops::RangeInclusive<u16> = 2000..=2100;

/// The decoded fields of a valid invoice filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedInvoiceFilename {
    pub code: String,
    pub month: Month,
    pub year: u16,
    pub invoice_number: String,
}

/// Decode `filename`, or `None` if any segment breaks the grammar.
pub fn parse(filename: &str) -> Option<ParsedInvoiceFilename> {
    let stem = strip_pdf_extension(filename);

    let mut segments = stem.split('-');
    let (code, month, year, invoice_number) = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(code), Some(month), Some(year), Some(number), None) => {
            (trim(code), trim(month), trim(year), trim(number))
        }
        _ => return None,
    };

    if !is_valid_code(code) {
        return None;
    }
    let month = Month::from_abbreviation(month)?;
    let year = parse_year(year)?;
    if !is_valid_invoice_number(invoice_number) {
        return None;
    }

    Some(ParsedInvoiceFilename {
        code: code.to_string(),
        month,
        year,
        invoice_number: invoice_number.to_string(),
    })
}

/// True iff `parse` succeeds.
pub fn is_valid(filename: &str) -> bool {
    parse(filename).is_some()
}

/// Remove every `.pdf` occurrence, ignoring ASCII case, in one left-to-right pass.
/// The removal is not anchored to the end of the name.
fn strip_pdf_extension(filename: &str) -> String {
    let bytes = filename.as_bytes();
    let mut stripped = String::with_capacity(filename.len());
    let mut copied_from = 0;
    let mut i = 0;

    while i + PDF_EXTENSION.len() <= bytes.len() {
        if bytes[i..i + PDF_EXTENSION.len()].eq_ignore_ascii_case(PDF_EXTENSION) {
            stripped.push_str(&filename[copied_from..i]);
            i += PDF_EXTENSION.len();
            copied_from = i;
        } else {
            i += 1;
        }
    }
    stripped.push_str(&filename[copied_from..]);
    stripped
}

/// Strip space, tab, newline, carriage return, NUL and vertical tab.
/// Other Unicode whitespace such as U+00A0 is kept, so the segment fails its own rule.
fn trim(segment: &str) -> &str {
    segment.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

fn is_valid_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    if bytes.len() <= CODE_DIGITS || bytes.len() > CODE_DIGITS + MAX_CODE_PREFIX {
        return false;
    }
    let (prefix, digits) = bytes.split_at(bytes.len() - CODE_DIGITS);
    prefix
        .iter()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && digits.iter().all(u8::is_ascii_digit)
}

fn parse_year(year: &str) -> Option<u16> {
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: u16 = year.parse().ok()?;
    YEAR_RANGE.contains(&year).then_some(year)
}

fn is_valid_invoice_number(number: &str) -> bool {
    !number.is_empty() && number.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(code: &str, month: Month, year: u16, number: &str) -> ParsedInvoiceFilename {
        ParsedInvoiceFilename {
            code: code.into(),
            month,
            year,
            invoice_number: number.into(),
        }
    }

    #[test]
    fn test_known_good_filenames() {
        assert_eq!(
            parse("AA001001-Jan-2025-001.pdf"),
            Some(parsed("AA001001", Month::January, 2025, "001"))
        );
        assert_eq!(
            parse("TOG002020-Dec-2025-002.pdf"),
            Some(parsed("TOG002020", Month::December, 2025, "002"))
        );
        assert_eq!(
            parse("3I001003-Dec-2024-123.pdf"),
            Some(parsed("3I001003", Month::December, 2024, "123"))
        );
    }

    #[test]
    fn test_known_bad_filenames() {
        assert_eq!(parse("BAD-Jan-2025-001.pdf"), None);
        assert_eq!(parse("AA001001-Foo-2025-001.pdf"), None);
        assert_eq!(parse("AA001001-Jan-1999-001.pdf"), None);
    }

    #[test]
    fn test_extension_is_case_insensitive_and_optional() {
        assert!(is_valid("AA001001-Jan-2025-001.PDF"));
        assert!(is_valid("AA001001-Jan-2025-001.Pdf"));
        assert!(is_valid("AA001001-Jan-2025-001"));
        assert!(!is_valid("AA001001-Jan-2025-001.txt"));
    }

    #[test]
    fn test_extension_removed_wherever_it_occurs() {
        assert_eq!(strip_pdf_extension("a.pdfb.PDF"), "ab");
        assert_eq!(
            parse("AA001001-Jan-2025-0.pdf01.pdf"),
            Some(parsed("AA001001", Month::January, 2025, "001"))
        );
        // single pass: a match that only forms after a removal stays
        assert_eq!(strip_pdf_extension("x.p.pdfdf"), "x.pdf");
    }

    #[test]
    fn test_segment_count_must_be_four() {
        assert_eq!(parse(""), None);
        assert_eq!(parse(".pdf"), None);
        assert_eq!(parse("AA001001-Jan-2025.pdf"), None);
        assert_eq!(parse("AA001001-Jan-2025-001-X.pdf"), None);
        assert_eq!(parse("AA001001--Jan-2025-001.pdf"), None);
    }

    #[test]
    fn test_segments_are_trimmed() {
        assert_eq!(
            parse(" AA001001 - Jan - 2025 - 001 .pdf"),
            Some(parsed("AA001001", Month::January, 2025, "001"))
        );
        assert_eq!(
            parse("AA001001\t-\x0BJan\r\n-2025\0-001.pdf"),
            Some(parsed("AA001001", Month::January, 2025, "001"))
        );
    }

    #[test]
    fn test_non_ascii_whitespace_is_not_trimmed() {
        assert_eq!(parse("AA001001\u{a0}-Jan-2025-001.pdf"), None);
        assert_eq!(parse("AA001001-\u{2003}Jan-2025-001.pdf"), None);
        assert_eq!(parse("AA001001-Jan-2025-001\u{3000}.pdf"), None);
    }

    #[test]
    fn test_code_rules() {
        assert!(is_valid_code("A123456"));
        assert!(is_valid_code("123456789"));
        assert!(is_valid_code("Z9Z123456"));
        assert!(!is_valid_code("123456"));
        assert!(!is_valid_code("1234567890"));
        assert!(!is_valid_code("ABCD123456"));
        assert!(!is_valid_code("aa001001"));
        assert!(!is_valid_code("AA00100X"));
        assert!(!is_valid_code("A-123456"));
        assert!(!is_valid_code("ÄA001001"));
    }

    #[test]
    fn test_year_rules() {
        assert_eq!(parse_year("2000"), Some(2000));
        assert_eq!(parse_year("2100"), Some(2100));
        assert_eq!(parse_year("1999"), None);
        assert_eq!(parse_year("2101"), None);
        assert_eq!(parse_year("0999"), None);
        assert_eq!(parse_year("999"), None);
        assert_eq!(parse_year("20250"), None);
        assert_eq!(parse_year("+202"), None);
    }

    #[test]
    fn test_invoice_number_rules() {
        assert!(is_valid("AA001001-Jan-2025-abcXYZ09.pdf"));
        assert!(!is_valid("AA001001-Jan-2025-.pdf"));
        assert!(!is_valid("AA001001-Jan-2025-00_1.pdf"));
        assert!(!is_valid("AA001001-Jan-2025-00 1.pdf"));
    }

    #[test]
    fn test_month_is_case_sensitive() {
        assert!(!is_valid("AA001001-jan-2025-001.pdf"));
        assert!(!is_valid("AA001001-JAN-2025-001.pdf"));
    }

    #[test]
    fn test_constructed_names_round_trip() {
        let cases = [
            ("A000000", "Feb", Month::February, 2000, "1"),
            ("XY9123456", "Jul", Month::July, 2100, "INV42"),
            ("123456789", "Sep", Month::September, 2050, "z"),
        ];
        for (code, abbr, month, year, number) in cases {
            let filename = format!("{code}-{abbr}-{year}-{number}.pdf");
            assert_eq!(parse(&filename), Some(parsed(code, month, year, number)));
            assert_eq!(parse(&filename), parse(&filename));
        }
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(parse("AA001001-Jan-2025-001.pdf").unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "code": "AA001001",
                "month": "January",
                "year": 2025,
                "invoice_number": "001"
            })
        );
    }
}
