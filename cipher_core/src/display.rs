/// Shortens a long (usually decimal) string for display, keeping its head and
/// tail around `"..."`. Strings of at most `max_len` characters are returned
/// unchanged.
pub fn ellipsize(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len || max_len < 6 {
        return s.to_string();
    }
    let head = max_len / 2 - 1;
    let tail = max_len / 2 - 2;
    let mut out: String = s.chars().take(head).collect();
    out.push_str("...");
    out.extend(s.chars().skip(len - tail));
    out
}

#[cfg(test)]
mod tests {
    use super::ellipsize;

    #[test]
    fn short_values_are_untouched() {
        assert_eq!(ellipsize("3233", 40), "3233");
    }

    #[test]
    fn long_values_keep_head_and_tail() {
        let digits = "1234567890".repeat(5);
        let shown = ellipsize(&digits, 20);
        assert_eq!(shown, "123456789...34567890");
        assert!(shown.len() < digits.len());
    }
}
