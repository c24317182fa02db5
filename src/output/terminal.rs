//! Column helpers for terminal output.

/// Side a padded field is pushed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Pad a value to `width` columns. Longer values are returned unchanged.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
/// * `align` - Which side the text sits on
pub fn format_field<T: ToString>(value: T, width: usize, align: Align) -> String {
    let value_str = value.to_string();
    match align {
        Align::Left => format!("{value_str:<width$}"),
        Align::Right => format!("{value_str:>width$}"),
    }
}
