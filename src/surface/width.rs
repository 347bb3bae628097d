/// Display width of `text` in terminal cells, ignoring ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_escape_sequences() {
        assert_eq!(display_width("\u{1b}[1mBack\u{1b}[0m"), 4);
    }

    #[test]
    fn counts_wide_characters() {
        assert_eq!(display_width("画面"), 4);
    }
}
