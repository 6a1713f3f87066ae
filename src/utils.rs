use std::collections::HashSet;

/// Distinct letters of `words` in first-occurrence order, uppercased.
pub fn unique_letters<S: AsRef<str>>(words: &[S]) -> Vec<char> {
    let mut seen = HashSet::new();
    words
        .iter()
        .flat_map(|w| w.as_ref().chars())
        .flat_map(char::to_uppercase)
        .filter(|c| seen.insert(*c))
        .collect()
}

/// `m:ss` for a number of seconds.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_letters() {
        assert_eq!(unique_letters(&["hello", "WORLD"]), vec!['H', 'E', 'L', 'O', 'W', 'R', 'D']);
        assert!(unique_letters::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(300), "5:00");
    }
}
