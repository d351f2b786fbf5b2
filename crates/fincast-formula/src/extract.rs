//! Formula reference extraction
//!
//! Walks a formula string and enumerates every cell/range reference it
//! contains, tagged with an explicit sheet name when qualified. This is not
//! an expression parser: validation only needs the reference tokens, so
//! everything between them (operators, numbers, function names, string
//! literals) is skipped.

use fincast_core::{CellAddress, CellRange};
use lazy_regex::regex;

use crate::error::{Error, Result};

/// One reference found in a formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaRef {
    /// Explicit sheet qualifier, if present (`Sheet!B9`)
    pub sheet: Option<String>,
    /// The referenced cells; a single cell is a one-cell range
    pub range: CellRange,
}

impl FormulaRef {
    /// Whether the reference targets the given sheet, treating an
    /// unqualified reference as targeting `current_sheet`
    pub fn targets(&self, current_sheet: &str) -> bool {
        match &self.sheet {
            Some(name) => name.eq_ignore_ascii_case(current_sheet),
            None => true,
        }
    }
}

/// Extract every cell/range reference from a formula string
///
/// The leading `=` is optional. Recognized tokens:
/// - `B9`, `$B$6` — cell in the current sheet
/// - `B5:B7` — range in the current sheet
/// - `Assumptions!B11`, `'My Sheet'!B2:C4` — sheet-qualified
///
/// Letters followed by `(` are function calls; bare identifiers (`TRUE`,
/// named ranges) are not references. A sheet qualifier followed by a token
/// that does not match the `[A-Z]+[0-9]+` grammar is a [`Error::Parse`].
///
/// # Example
/// ```
/// use fincast_formula::extract_refs;
///
/// let refs = extract_refs("=Revenue_Forecast!B9*Assumptions!B18").unwrap();
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].sheet.as_deref(), Some("Revenue_Forecast"));
/// ```
pub fn extract_refs(formula: &str) -> Result<Vec<FormulaRef>> {
    // Optional sheet qualifier, cell, optional range tail. Anchored: applied
    // at each candidate position, not searched.
    let ref_re = regex!(
        r"^(?:([A-Za-z_][A-Za-z0-9_]*)!)?(\$?[A-Za-z]{1,3}\$?[0-9]{1,7})(?::(\$?[A-Za-z]{1,3}\$?[0-9]{1,7}))?"
    );
    // Reference token after a quoted sheet name
    let bare_re = regex!(r"^(\$?[A-Za-z]{1,3}\$?[0-9]{1,7})(?::(\$?[A-Za-z]{1,3}\$?[0-9]{1,7}))?");

    let src = formula.strip_prefix('=').unwrap_or(formula);
    let bytes = src.as_bytes();
    let mut refs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];

        if c == b'"' {
            i = skip_string_literal(bytes, i);
        } else if c == b'\'' {
            // Quoted sheet name: 'Name'!Ref
            let close = src[i + 1..]
                .find('\'')
                .map(|p| i + 1 + p)
                .ok_or_else(|| Error::Parse(format!("unterminated sheet quote in '{formula}'")))?;
            let sheet = &src[i + 1..close];
            if bytes.get(close + 1) != Some(&b'!') {
                return Err(Error::Parse(format!(
                    "expected '!' after quoted sheet name '{sheet}'"
                )));
            }
            let rest = &src[close + 2..];
            let caps = bare_re.captures(rest).ok_or_else(|| {
                Error::Parse(format!("invalid reference after '{sheet}!' in '{formula}'"))
            })?;
            let matched = caps.get(0).unwrap();
            refs.push(make_ref(
                Some(sheet.to_string()),
                &caps[1],
                caps.get(2).map(|m| m.as_str()),
            )?);
            i = close + 2 + matched.end();
        } else if c.is_ascii_digit() {
            i = skip_number(bytes, i);
        } else if c.is_ascii_alphabetic() || c == b'$' || c == b'_' {
            let rest = &src[i..];
            match ref_re.captures(rest) {
                Some(caps) => {
                    let matched = caps.get(0).unwrap();
                    let end = i + matched.end();
                    let boundary = bytes.get(end).copied();
                    let qualified = caps.get(1).is_some();

                    if boundary == Some(b'(') && !qualified {
                        // Function call whose name happens to fit the
                        // reference grammar (e.g. LOG10)
                        i = skip_identifier(bytes, i).max(i + 1);
                    } else if is_token_char(boundary) {
                        if qualified {
                            return Err(Error::Parse(format!(
                                "invalid reference '{}' in '{formula}'",
                                &rest[..matched.end() + 1]
                            )));
                        }
                        // Identifier with a numeric tail, not a reference
                        i = skip_identifier(bytes, i).max(i + 1);
                    } else {
                        refs.push(make_ref(
                            caps.get(1).map(|m| m.as_str().to_string()),
                            &caps[2],
                            caps.get(3).map(|m| m.as_str()),
                        )?);
                        i = end;
                    }
                }
                None => {
                    let end = skip_identifier(bytes, i);
                    if end > i && bytes.get(end) == Some(&b'!') {
                        // Qualifier present but the token after it is not a
                        // valid reference (the anchored regex would have
                        // consumed both otherwise)
                        return Err(Error::Parse(format!(
                            "invalid reference after '{}!' in '{formula}'",
                            &src[i..end]
                        )));
                    }
                    i = end.max(i + 1);
                }
            }
        } else {
            i += 1;
        }
    }

    Ok(refs)
}

fn make_ref(sheet: Option<String>, start: &str, end: Option<&str>) -> Result<FormulaRef> {
    let start = CellAddress::parse(start).map_err(|e| Error::Parse(e.to_string()))?;
    let range = match end {
        Some(end) => {
            let end = CellAddress::parse(end).map_err(|e| Error::Parse(e.to_string()))?;
            CellRange::new(start, end)
        }
        None => CellRange::single(start),
    };
    Ok(FormulaRef { sheet, range })
}

fn is_token_char(b: Option<u8>) -> bool {
    matches!(b, Some(b) if b.is_ascii_alphanumeric() || b == b'_' || b == b'!')
}

fn skip_string_literal(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == b'"' {
            // "" is an escaped quote inside the literal
            if bytes.get(i + 1) == Some(&b'"') {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    i
}

fn skip_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    // Exponent tail, so "1e5" is not scanned as a reference
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(|b| b.is_ascii_digit()) {
            i = j;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    i
}

fn skip_identifier(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len()
        && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.')
    {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn refs(formula: &str) -> Vec<(Option<String>, String)> {
        extract_refs(formula)
            .unwrap()
            .into_iter()
            .map(|r| (r.sheet, r.range.to_string()))
            .collect()
    }

    #[test]
    fn local_cells_and_ranges() {
        assert_eq!(refs("=SUM(B5:B7)"), [(None, "B5:B7".to_string())]);
        assert_eq!(
            refs("=B18-B19"),
            [(None, "B18".to_string()), (None, "B19".to_string())]
        );
        assert_eq!(refs("=1/(1+B5)^2"), [(None, "B5".to_string())]);
    }

    #[test]
    fn qualified_references() {
        assert_eq!(
            refs("=Revenue_Forecast!B9*Assumptions!B18"),
            [
                (Some("Revenue_Forecast".to_string()), "B9".to_string()),
                (Some("Assumptions".to_string()), "B18".to_string()),
            ]
        );
        assert_eq!(
            refs("=NPV(A10,Capital_Budgeting!B11:B15)+Capital_Budgeting!B10"),
            [
                (None, "A10".to_string()),
                (Some("Capital_Budgeting".to_string()), "B11:B15".to_string()),
                (Some("Capital_Budgeting".to_string()), "B10".to_string()),
            ]
        );
    }

    #[test]
    fn absolute_markers() {
        let found = extract_refs("=B10/(1+$B$6)^A10").unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[1].range.to_string(), "B6");
        assert!(found[1].sheet.is_none());
    }

    #[test]
    fn functions_and_literals_are_not_references() {
        assert_eq!(refs("=IF(B18>0,\"Accept Project\",\"Reject Project\")").len(), 1);
        assert!(refs("=TRUE").is_empty());
        assert!(refs("=LOG10(100)").is_empty());
        // "B19" inside a string literal is not a reference
        assert_eq!(refs("=IF(B18>0,\"see B19\",0)"), [(None, "B18".to_string())]);
    }

    #[test]
    fn nested_function_arguments() {
        let found = refs(
            "=MATCH(0,D10:D15,1)-1+ABS(INDEX(D10:D15,MATCH(0,D10:D15,1)-1))/INDEX(B10:B15,MATCH(0,D10:D15,1))",
        );
        assert_eq!(found.iter().filter(|(_, r)| r == "D10:D15").count(), 4);
        assert_eq!(found.iter().filter(|(_, r)| r == "B10:B15").count(), 1);
    }

    #[test]
    fn quoted_sheet_names() {
        assert_eq!(
            refs("='Cash Flow'!B22+1"),
            [(Some("Cash Flow".to_string()), "B22".to_string())]
        );
    }

    #[test]
    fn malformed_qualified_reference_is_a_parse_error() {
        assert!(matches!(
            extract_refs("=Appendix!notacell"),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            extract_refs("='Broken'!!B2"),
            Err(Error::Parse(_))
        ));
        assert!(matches!(
            extract_refs("='Unterminated!B2"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn scientific_literals_are_skipped() {
        assert_eq!(refs("=1e5+B2"), [(None, "B2".to_string())]);
    }
}
