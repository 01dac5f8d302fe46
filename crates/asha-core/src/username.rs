//! Login-handle derivation from worker display names.

/// Base login handle for a display name: lowercased, whitespace stripped.
/// Collisions are resolved by the store, which appends a numeric suffix.
pub fn base_handle(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_handle_lowercases_and_strips_spaces() {
        assert_eq!(base_handle("Priya Sharma"), "priyasharma");
        assert_eq!(base_handle("  Anil  Kumar "), "anilkumar");
    }

    #[test]
    fn test_base_handle_keeps_non_latin_names() {
        assert_eq!(base_handle("आशा देवी"), "आशादेवी");
    }
}
