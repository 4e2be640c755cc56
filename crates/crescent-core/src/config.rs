//! Line-oriented configuration text.

/// Meaningful lines of a configuration text.
///
/// Everything from a `#` to the end of its line is a comment. Lines
/// that are empty after comment removal and trimming are skipped. The
/// returned lines are trimmed.
pub fn config_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_blank_lines() {
        let text = "# masses\n\nsun 1.989e30  # kg\n   \nearth 5.972e24\n#moon 7.3e22\n";
        let lines: Vec<_> = config_lines(text).collect();
        assert_eq!(lines, ["sun 1.989e30", "earth 5.972e24"]);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert_eq!(config_lines("").count(), 0);
        assert_eq!(config_lines("# only a comment").count(), 0);
    }
}
