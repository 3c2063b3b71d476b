use crate::model::Cell;

/// Parse a quantity cell, best effort.
///
/// Handles:
/// - `Int(3)` -> 3
/// - `Float(2.9)` -> 2 (truncated toward zero)
/// - `"4"`, `" 4 "`, `"4.0"` -> 4
/// - `"1,200"` -> 1200 (thousands separator)
///
/// Anything else (empty, text, NaN) returns `None`; the caller coerces that to 0.
///
/// Commas are always stripped, so a hand-typed `"1,200"` counts as a bulk
/// quantity instead of falling back to 0 like other non-numeric text.
pub fn parse_quantity(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Int(i) => Some(*i),
        Cell::Float(f) => float_to_quantity(*f),
        Cell::Bool(b) => Some(i64::from(*b)),
        Cell::Text(s) => parse_quantity_str(s),
        Cell::Empty => None,
    }
}

fn parse_quantity_str(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let cleaned = s.replace(',', "");
    if let Ok(i) = cleaned.parse::<i64>() {
        return Some(i);
    }
    cleaned.parse::<f64>().ok().and_then(float_to_quantity)
}

fn float_to_quantity(f: f64) -> Option<i64> {
    if f.is_finite() {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_cells() {
        assert_eq!(parse_quantity(&Cell::Int(3)), Some(3));
        assert_eq!(parse_quantity(&Cell::Float(5.0)), Some(5));
    }

    #[test]
    fn test_float_truncates() {
        assert_eq!(parse_quantity(&Cell::Float(2.9)), Some(2));
        assert_eq!(parse_quantity(&Cell::from("3.7")), Some(3));
    }

    #[test]
    fn test_text_numbers() {
        assert_eq!(parse_quantity(&Cell::from(" 4 ")), Some(4));
        assert_eq!(parse_quantity(&Cell::from("1,200")), Some(1200));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(parse_quantity(&Cell::from("two")), None);
        assert_eq!(parse_quantity(&Cell::from("")), None);
        assert_eq!(parse_quantity(&Cell::Empty), None);
        assert_eq!(parse_quantity(&Cell::Float(f64::NAN)), None);
    }
}
