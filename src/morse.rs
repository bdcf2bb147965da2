// morse-txt -- a text based morse code practice tone generator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Translation of text into morse code.

use std::fmt;

use snafu::Snafu;

/// The characters that can be sent, together with their ITU patterns.
const ALPHABET: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
];

pub const LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const PUNCTUATION: &str = ".,?'!/()&:;=+-_\"$@";

/// Marker for a word break in the compact textual representation.
pub const WORD_GAP_SYMBOL: char = '_';

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum EncodeError {
    #[snafu(display("Character {:?} not supported in Morse code", character))]
    UnsupportedCharacter { character: char },
}

/// A single symbol of encoded text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token {
    Dot,
    Dash,
    /// Separates two characters of the same word.
    CharGap,
    /// Separates two words.
    WordGap,
}

impl Token {
    pub fn is_element(self) -> bool {
        matches!(self, Token::Dot | Token::Dash)
    }
}

/// Look up the ITU pattern of a character, ignoring case.
///
/// ```
/// use morse_txt::morse::pattern;
///
/// assert_eq!(pattern('s'), Some("..."));
/// assert_eq!(pattern('#'), None);
/// ```
pub fn pattern(c: char) -> Option<&'static str> {
    let upper = c.to_ascii_uppercase();
    ALPHABET
        .iter()
        .find(|(key, _)| *key == upper)
        .map(|(_, pattern)| *pattern)
}

/// Reverse lookup of [`pattern`].
pub fn char_for(pattern: &str) -> Option<char> {
    ALPHABET
        .iter()
        .find(|(_, p)| *p == pattern)
        .map(|(c, _)| *c)
}

/// Translate text into morse tokens.
///
/// Characters within a word are separated by a [`Token::CharGap`], a space
/// becomes a single [`Token::WordGap`] in place of the surrounding character gaps.
/// Fails on the first character that has no morse representation.
pub fn encode(text: &str) -> Result<Vec<Token>, EncodeError> {
    let mut tokens = Vec::new();
    for c in text.chars() {
        if c == ' ' {
            tokens.push(Token::WordGap);
            continue;
        }
        let pattern = pattern(c).ok_or(EncodeError::UnsupportedCharacter {
            character: c.to_ascii_uppercase(),
        })?;
        if tokens.last().map_or(false, |t| t.is_element()) {
            tokens.push(Token::CharGap);
        }
        tokens.extend(pattern.chars().map(|symbol| match symbol {
            '.' => Token::Dot,
            _ => Token::Dash,
        }));
    }
    Ok(tokens)
}

/// The compact textual form of `text`: one pattern per character, separated
/// by single spaces, with `_` standing in for a space.
///
/// ```
/// use morse_txt::morse::to_morse_string;
///
/// assert_eq!(to_morse_string("SOS").unwrap(), "... --- ...");
/// assert_eq!(to_morse_string("e t").unwrap(), ". _ -");
/// ```
pub fn to_morse_string(text: &str) -> Result<String, EncodeError> {
    let patterns = text
        .chars()
        .map(|c| {
            if c == ' ' {
                Ok("_")
            } else {
                pattern(c).ok_or(EncodeError::UnsupportedCharacter {
                    character: c.to_ascii_uppercase(),
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(patterns.join(" "))
}

/// Displays tokens in their compact textual form.
pub struct Compact<'a>(pub &'a [Token]);

impl<'a> fmt::Display for Compact<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, token) in self.0.iter().enumerate() {
            match token {
                Token::Dot => write!(f, ".")?,
                Token::Dash => write!(f, "-")?,
                Token::CharGap => write!(f, " ")?,
                Token::WordGap => {
                    if index > 0 && self.0[index - 1] != Token::WordGap {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", WORD_GAP_SYMBOL)?;
                    if index + 1 < self.0.len() {
                        write!(f, " ")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Translate the compact textual form back to plain text.
/// Returns `None` if a pattern is not part of the alphabet.
pub fn decode(morse: &str) -> Option<String> {
    morse
        .split(' ')
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p == "_" {
                Some(' ')
            } else {
                char_for(p)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use super::Token::*;

    #[test]
    fn sos() {
        assert_eq!(
            encode("SOS").unwrap(),
            vec![Dot, Dot, Dot, CharGap, Dash, Dash, Dash, CharGap, Dot, Dot, Dot]
        );
        assert_eq!(to_morse_string("SOS").unwrap(), "... --- ...");
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(encode("hello world"), encode("HELLO WORLD"));
        assert_eq!(encode("sos").unwrap(), encode("SOS").unwrap());
    }

    #[test]
    fn space_is_word_gap() {
        let tokens = encode("hello world").unwrap();
        assert_eq!(tokens.iter().filter(|t| **t == WordGap).count(), 1);
        expect![[".... . .-.. .-.. --- _ .-- --- .-. .-.. -.."]]
            .assert_eq(&Compact(&tokens).to_string());
        expect![[".... . .-.. .-.. --- _ .-- --- .-. .-.. -.."]]
            .assert_eq(&to_morse_string("hello world").unwrap());
    }

    #[test]
    fn word_gap_replaces_char_gaps() {
        assert_eq!(encode("E T").unwrap(), vec![Dot, WordGap, Dash]);
        assert_eq!(encode("E  T").unwrap(), vec![Dot, WordGap, WordGap, Dash]);
        assert_eq!(encode(" E").unwrap(), vec![WordGap, Dot]);
        for text in &["E  T", " E", "E "] {
            let tokens = encode(text).unwrap();
            assert_eq!(Compact(&tokens).to_string(), to_morse_string(text).unwrap());
        }
    }

    #[test]
    fn one_pattern_per_character() {
        let text = "CQ CQ DE 73, QRZ?";
        let morse = to_morse_string(text).unwrap();
        assert_eq!(morse.split(' ').count(), text.chars().count());
        for (c, p) in text.chars().zip(morse.split(' ')) {
            if c == ' ' {
                assert_eq!(p, "_");
            } else {
                assert_eq!(char_for(p), Some(c));
            }
        }
    }

    #[test]
    fn unsupported_character() {
        assert_eq!(
            encode("#"),
            Err(EncodeError::UnsupportedCharacter { character: '#' })
        );
        assert_eq!(
            encode("SOS#SOS"),
            Err(EncodeError::UnsupportedCharacter { character: '#' })
        );
        assert_eq!(
            to_morse_string("tab\there"),
            Err(EncodeError::UnsupportedCharacter { character: '\t' })
        );
        assert_eq!(
            EncodeError::UnsupportedCharacter { character: '#' }.to_string(),
            "Character '#' not supported in Morse code"
        );
    }

    #[test]
    fn empty_text() {
        assert!(encode("").unwrap().is_empty());
        assert_eq!(to_morse_string("").unwrap(), "");
    }

    #[test]
    fn alphabet_is_consistent() {
        for c in LETTERS.chars().chain(DIGITS.chars()).chain(PUNCTUATION.chars()) {
            let p = pattern(c).unwrap_or_else(|| panic!("{:?} has no pattern", c));
            assert!(p.chars().all(|s| s == '.' || s == '-'));
            assert_eq!(char_for(p), Some(c), "pattern {} is ambiguous", p);
        }
        assert_eq!(
            ALPHABET.len(),
            LETTERS.len() + DIGITS.len() + PUNCTUATION.len()
        );
    }

    #[test]
    fn decode_compact() {
        assert_eq!(
            decode(".... . .-.. .-.. --- _ .-- --- .-. .-.. -..").as_deref(),
            Some("HELLO WORLD")
        );
        assert_eq!(decode(".-.-.-.-"), None);
    }
}
