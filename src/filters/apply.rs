use super::ast::{FieldFilter, FilterExpr, FilterOperator};
use crate::models::Frame;

/// Keep the rows of `frame` that satisfy `filter`
///
/// Filter logic:
/// - Same-field OR: region:Africa region:Asia → (Africa OR Asia)
/// - Cross-field AND: region:Africa income:Low → (Africa AND Low)
/// - Explicit operators override defaults
///
/// Filters are evaluated left-to-right. An empty expression keeps every row.
pub fn apply_filters(frame: &Frame, filter: &FilterExpr) -> Frame {
    if filter.is_empty() {
        return frame.clone();
    }

    frame.filter_rows(|frame, row| evaluate_filter(frame, row, filter))
}

/// Evaluate filter expression against a single row
fn evaluate_filter(frame: &Frame, row: usize, filter: &FilterExpr) -> bool {
    let Some(first) = filter.first() else {
        return true;
    };

    let mut result = evaluate_field_filter(frame, row, first);
    for (operator, next) in filter.rest() {
        let next_result = evaluate_field_filter(frame, row, next);
        result = match operator {
            FilterOperator::And => result && next_result,
            FilterOperator::Or => result || next_result,
        };
    }

    result
}

/// Exact, case-insensitive match on the cell's display form; a missing column never matches
fn evaluate_field_filter(frame: &Frame, row: usize, filter: &FieldFilter) -> bool {
    match frame.get(row, filter.field.column()) {
        Some(value) if !value.is_empty() => {
            value.to_string().trim().eq_ignore_ascii_case(filter.value.trim())
        }
        _ => false,
    }
}
