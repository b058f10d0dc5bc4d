//! Character classification and word-boundary scanning for navigation
//! and word-wise deletion.

/// Character class for word movement. A word is a maximal run of
/// characters of the same class, with whitespace separating rather than
/// forming words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Word,
    Symbol,
}

pub fn classify(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Whitespace
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Symbol
    }
}

/// Column of the start of the word ending at or before `column`.
/// Skips trailing whitespace first, then consumes the run of same-class
/// characters. Returns 0 at or before the first word.
pub fn word_start_before(text: &str, column: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut col = column.min(chars.len());
    while col > 0 && classify(chars[col - 1]) == CharClass::Whitespace {
        col -= 1;
    }
    if col == 0 {
        return 0;
    }
    let class = classify(chars[col - 1]);
    while col > 0 && classify(chars[col - 1]) == class {
        col -= 1;
    }
    col
}

/// Column just past the end of the word starting at or after `column`.
/// Skips leading whitespace first. Returns the line length when no word
/// remains.
pub fn word_end_after(text: &str, column: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut col = column.min(chars.len());
    while col < chars.len() && classify(chars[col]) == CharClass::Whitespace {
        col += 1;
    }
    if col == chars.len() {
        return col;
    }
    let class = classify(chars[col]);
    while col < chars.len() && classify(chars[col]) == class {
        col += 1;
    }
    col
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify('a'), CharClass::Word);
        assert_eq!(classify('_'), CharClass::Word);
        assert_eq!(classify('9'), CharClass::Word);
        assert_eq!(classify(' '), CharClass::Whitespace);
        assert_eq!(classify('\t'), CharClass::Whitespace);
        assert_eq!(classify('+'), CharClass::Symbol);
        assert_eq!(classify('('), CharClass::Symbol);
    }

    #[test]
    fn test_word_start_before() {
        //          012345678901
        let text = "foo bar_2 ++";
        assert_eq!(word_start_before(text, 12), 10); // inside "++"
        assert_eq!(word_start_before(text, 10), 4); // whitespace skipped back to "bar_2"
        assert_eq!(word_start_before(text, 9), 4);
        assert_eq!(word_start_before(text, 6), 4); // mid-word
        assert_eq!(word_start_before(text, 4), 0);
        assert_eq!(word_start_before(text, 0), 0);
    }

    #[test]
    fn test_word_end_after() {
        let text = "foo bar_2 ++";
        assert_eq!(word_end_after(text, 0), 3);
        assert_eq!(word_end_after(text, 1), 3); // mid-word
        assert_eq!(word_end_after(text, 3), 9); // whitespace skipped into "bar_2"
        assert_eq!(word_end_after(text, 9), 12);
        assert_eq!(word_end_after(text, 12), 12);
    }

    #[test]
    fn test_symbol_runs_are_words() {
        assert_eq!(word_start_before("a+=b", 3), 1);
        assert_eq!(word_end_after("a+=b", 1), 3);
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(word_start_before("", 0), 0);
        assert_eq!(word_end_after("", 0), 0);
    }
}
