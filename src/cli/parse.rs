use kpoint_core::format::OutputFormat;

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse a number in [0, 1]
pub fn parse_unit_interval(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}: {}", s, e))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("{} is not between 0 and 1", value));
    }
    Ok(value)
}
