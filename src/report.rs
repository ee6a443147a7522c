//! Console rendering for the demo: a boxed banner and a boxed table of
//! estimates.

use crate::result::OrderEstimate;

/// Format `value` like printf's `%g` with `precision` significant digits.
pub fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let precision = precision.max(1);
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match sci.find('e') {
        Some(pos) => (&sci[..pos], sci[pos + 1..].parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value))
    }
}

fn trim_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// Render `text` inside a box.
pub fn banner(text: &str) -> String {
    let width = text.chars().count() + 2;
    let line = "═".repeat(width);
    format!("╒{}╕\n│ {} │\n╘{}╛\n", line, text, line)
}

fn table_rule(left: &str, mid: &str, right: &str, ncols: usize, width: usize) -> String {
    let cells: Vec<String> = (0..ncols).map(|_| "─".repeat(width + 2)).collect();
    format!("{}{}{}\n", left, cells.join(mid), right)
}

fn table_row(cells: &[&str], width: usize) -> String {
    let cells: Vec<String> = cells
        .iter()
        .map(|c| format!(" {:>width$} ", c, width = width))
        .collect();
    format!("│{}│\n", cells.join("│"))
}

/// Render a table with right aligned cells of `width` characters.
pub fn table(headers: &[&str], rows: &[Vec<String>], width: usize) -> String {
    let ncols = headers.len();
    let mut out = table_rule("╭", "┬", "╮", ncols, width);
    out.push_str(&table_row(headers, width));
    out.push_str(&table_rule("├", "┼", "┤", ncols, width));
    for r in rows {
        let cells: Vec<&str> = r.iter().map(String::as_str).collect();
        out.push_str(&table_row(&cells, width));
    }
    out.push_str(&table_rule("╰", "┴", "╯", ncols, width));
    out
}

/// Table of order sweep estimates, one `N number` / `Integral` row per order.
pub fn estimates_table(estimates: &[OrderEstimate], width: usize) -> String {
    let rows: Vec<Vec<String>> = estimates
        .iter()
        .map(|e| vec![e.order.to_string(), format_general(e.val, 6)])
        .collect();
    table(&["N number", "Integral"], &rows, width)
}
