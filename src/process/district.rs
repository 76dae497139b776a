/// States with a single at-large congressional district.
pub const AT_LARGE_STATES: &[&str] = &["AK", "WY", "MT", "ND", "SD", "VT", "DE"];

/// Derive a district code such as `"WA-07"` from the place-of-performance
/// field, whose district number sits just before its last two characters.
/// Returns an empty string when no district can be read.
pub fn resolve_district(state: &str, place_of_performance: &str) -> String {
    if AT_LARGE_STATES.contains(&state) {
        return format!("{}-00", state);
    }

    let chars: Vec<char> = place_of_performance.chars().collect();
    if chars.len() < 4 {
        return String::new();
    }
    let digits = &chars[chars.len() - 4..chars.len() - 2];
    if !digits.iter().all(char::is_ascii_digit) || digits.iter().all(|&c| c == '0') {
        return String::new();
    }
    format!("{}-{}{}", state, digits[0], digits[1])
}
