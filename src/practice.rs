// morse-txt -- a text based morse code practice tone generator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Random practice text, sent in groups of characters.

use rand::Rng;
use snafu::Snafu;

use crate::morse::{DIGITS, LETTERS, PUNCTUATION};

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum PracticeError {
    #[snafu(display("No characters are enabled for practice"))]
    EmptyCharset,
}

/// Which parts of the alphabet practice text may draw from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Charset {
    pub letters: bool,
    pub digits: bool,
    pub punctuation: bool,
}

impl Default for Charset {
    fn default() -> Self {
        Self {
            letters: true,
            digits: false,
            punctuation: false,
        }
    }
}

impl Charset {
    /// All enabled characters, letters first.
    pub fn characters(&self) -> Vec<char> {
        let mut chars = Vec::new();
        if self.letters {
            chars.extend(LETTERS.chars());
        }
        if self.digits {
            chars.extend(DIGITS.chars());
        }
        if self.punctuation {
            chars.extend(PUNCTUATION.chars());
        }
        chars
    }
}

pub struct PracticeText {
    characters: Vec<char>,
}

impl PracticeText {
    pub fn new(charset: Charset) -> Result<Self, PracticeError> {
        let characters = charset.characters();
        if characters.is_empty() {
            return Err(PracticeError::EmptyCharset);
        }
        Ok(Self { characters })
    }

    /// Generate `groups` groups of `group_size` random characters, separated by spaces.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        groups: usize,
        group_size: usize,
    ) -> String {
        let mut text = String::with_capacity(groups * (group_size + 1));
        for group in 0..groups {
            if group > 0 {
                text.push(' ');
            }
            for _ in 0..group_size {
                text.push(self.characters[rng.gen_range(0..self.characters.len())]);
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morse;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn empty_charset() {
        let none = Charset {
            letters: false,
            digits: false,
            punctuation: false,
        };
        assert!(matches!(
            PracticeText::new(none),
            Err(PracticeError::EmptyCharset)
        ));
    }

    #[test]
    fn group_layout() {
        let practice = PracticeText::new(Charset::default()).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let text = practice.generate(&mut rng, 4, 5);
        let groups: Vec<_> = text.split(' ').collect();
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|g| g.chars().count() == 5));
        assert!(text.chars().all(|c| c == ' ' || LETTERS.contains(c)));

        assert_eq!(practice.generate(&mut rng, 0, 5), "");
    }

    #[test]
    fn respects_charset() {
        let digits = Charset {
            letters: false,
            digits: true,
            punctuation: false,
        };
        let practice = PracticeText::new(digits).unwrap();
        let mut rng = Pcg32::seed_from_u64(2);
        let text = practice.generate(&mut rng, 20, 5);
        assert!(text.chars().all(|c| c == ' ' || c.is_ascii_digit()));
    }

    #[test]
    fn seeded_output_is_reproducible() {
        let all = Charset {
            letters: true,
            digits: true,
            punctuation: true,
        };
        let practice = PracticeText::new(all).unwrap();
        let a = practice.generate(&mut Pcg32::seed_from_u64(73), 10, 5);
        let b = practice.generate(&mut Pcg32::seed_from_u64(73), 10, 5);
        assert_eq!(a, b);
        // everything generated can be sent
        assert!(morse::encode(&a).is_ok());
    }

    #[test]
    fn charset_contents() {
        assert_eq!(Charset::default().characters().len(), 26);
        let all = Charset {
            letters: true,
            digits: true,
            punctuation: true,
        };
        assert_eq!(
            all.characters().len(),
            LETTERS.len() + DIGITS.len() + PUNCTUATION.len()
        );
    }
}
