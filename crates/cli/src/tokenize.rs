use unicode_segmentation::UnicodeSegmentation;

/// Split raw text into word tokens on Unicode word boundaries; punctuation and
/// whitespace are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_sentence() {
        assert_eq!(
            tokenize("I withdrew cash from the bank."),
            vec!["I", "withdrew", "cash", "from", "the", "bank"]
        );
    }

    #[test]
    fn test_tokenize_keeps_non_ascii_words() {
        assert_eq!(tokenize("Die Bank, am Ufer!"), vec!["Die", "Bank", "am", "Ufer"]);
        assert_eq!(tokenize("  "), Vec::<String>::new());
    }
}
