// A simple invertible tokenizer.
//
// Text is split at every boundary between an alphanumeric character
// (Unicode general category L* or N*) and a non-alphanumeric one, giving a
// list that alternates between word runs and punctuation/space runs. A run
// made of exactly one space is dropped unless it is the first token or the
// final run: it is implied by the two word runs on either side, and
// `decode` puts it back.
//
//   "Dude - that's so cool."
//     -> ["Dude", " - ", "that", "'", "s", "so", "cool", "."]

use unicode_general_category::{get_general_category, GeneralCategory};

/// True iff `c` is a letter or a number (general category L* or N*).
pub fn is_alphanumeric(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphanumeric();
    }
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// True iff `c` is alphanumeric but not a decimal digit.
///
/// This is the notion of "alphabetic" used by the word filter: digits and
/// underscores disqualify a word, other numeric symbols (Ⅻ, ½) do not.
pub fn is_letter(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_alphabetic();
    }
    is_alphanumeric(c) && get_general_category(c) != GeneralCategory::DecimalNumber
}

/// Split `text` into alternating alphanumeric / non-alphanumeric tokens.
pub fn encode(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices();
    let Some((_, first)) = chars.next() else {
        return tokens;
    };

    let mut token_start = 0;
    let mut prev_alnum = is_alphanumeric(first);
    for (pos, c) in chars {
        let alnum = is_alphanumeric(c);
        if alnum != prev_alnum {
            let token = &text[token_start..pos];
            if token != " " || token_start == 0 {
                tokens.push(token.to_string());
            }
            token_start = pos;
            prev_alnum = alnum;
        }
    }
    tokens.push(text[token_start..].to_string());
    tokens
}

/// Join tokens produced by [`encode`] back into the original text.
///
/// A single space goes back between every two adjacent alphanumeric tokens.
/// A token's class is the class of its first character; an empty token
/// counts as non-alphanumeric.
pub fn decode<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut text = String::new();
    let mut prev_alnum = false;
    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let alnum = token.chars().next().is_some_and(is_alphanumeric);
        if i > 0 && prev_alnum && alnum {
            text.push(' ');
        }
        text.push_str(token);
        prev_alnum = alnum;
    }
    text
}
