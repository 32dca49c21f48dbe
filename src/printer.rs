/// How many trailing values each result line reports.
const TAIL: usize = 3;

pub fn format_tail(values: &[f64]) -> String {
    let tail = &values[values.len().saturating_sub(TAIL)..];
    tail.iter()
        .map(|v| format!("{v:.6}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints the last values of a result vector, e.g.
/// `Last 3 values of Y: 0.5, 0.5, 0.5` (fewer when the vector is shorter).
pub fn print_tail(label: &str, values: &[f64]) {
    let count = values.len().min(TAIL);
    println!("Last {count} values of {label}: {}", format_tail(values));
}
