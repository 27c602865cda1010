use crate::models::{Frame, Value};

/// Rewrite Yes/No columns as 1/0
///
/// A column qualifies when it has at least one non-empty cell and every non-empty cell is
/// exactly `"Yes"` or `"No"`. Empty cells stay empty. Returns the recoded column names.
pub fn recode_yes_no(frame: &mut Frame) -> Vec<String> {
    let targets: Vec<usize> = (0..frame.columns().len())
        .filter(|&idx| {
            let mut non_empty = frame.column_values(idx).filter(|v| !v.is_empty()).peekable();
            non_empty.peek().is_some()
                && non_empty.all(|v| matches!(v.as_str(), Some("Yes") | Some("No")))
        })
        .collect();

    for &idx in &targets {
        frame.map_column(idx, |v| match v.as_str() {
            Some("Yes") => Value::Int(1),
            Some("No") => Value::Int(0),
            _ => v.clone(),
        });
    }

    targets.iter().map(|&idx| frame.columns()[idx].clone()).collect()
}
