// morse-txt -- a text based morse code practice tone generator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Turn morse tokens into waveforms.
//!
//! Synthesis happens in two steps. The tokens are first scheduled into a
//! sequence of tone and silence [`Segment`]s according to a [`Timing`],
//! which are then rendered into an [`AudioBuffer`].
//!
//! Every dot and dash is followed by one unit of silence. Character and word
//! gaps replace that trailing unit instead of adding to it, so the silence
//! between two characters is exactly [`Timing::char_gap`] and the silence
//! between two words exactly [`Timing::word_gap`].

use log::{debug, trace};
use snafu::Snafu;

use crate::morse::{Token, WORD_GAP_SYMBOL};
use crate::timing::Timing;
use crate::wave::{sample_count, AudioBuffer};

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum SynthError {
    #[snafu(display("Unsupported Morse code symbol: {:?}", symbol))]
    UnsupportedSymbol { symbol: char },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    Tone,
    Silence,
}

/// A stretch of either tone or silence.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    /// Length in seconds.
    pub duration: f64,
}

impl Segment {
    pub fn tone(duration: f64) -> Self {
        Self {
            kind: SegmentKind::Tone,
            duration,
        }
    }

    pub fn silence(duration: f64) -> Self {
        Self {
            kind: SegmentKind::Silence,
            duration,
        }
    }
}

/// Lay out the tokens in time.
pub fn schedule(tokens: &[Token], timing: &Timing) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(2 * tokens.len());
    // Whether the previous segment is the unit gap following a dot or dash.
    let mut after_element = false;

    for token in tokens {
        match token {
            Token::Dot | Token::Dash => {
                let length = if *token == Token::Dot {
                    timing.dot()
                } else {
                    timing.dash()
                };
                segments.push(Segment::tone(length));
                segments.push(Segment::silence(timing.unit()));
                after_element = true;
            }
            Token::CharGap | Token::WordGap => {
                let gap = if *token == Token::CharGap {
                    timing.char_gap()
                } else {
                    timing.word_gap()
                };
                // Widen the unit gap of the last element into the full gap so
                // the pause is rounded to samples only once.
                if after_element {
                    segments.pop();
                }
                segments.push(Segment::silence(gap));
                after_element = false;
            }
        }
    }
    segments
}

/// Total length of the segments in seconds.
pub fn total_duration(segments: &[Segment]) -> f64 {
    segments.iter().map(|s| s.duration).sum()
}

/// Sample the segments into a single buffer, in order.
pub fn render(segments: &[Segment], timing: &Timing) -> AudioBuffer {
    let capacity = segments
        .iter()
        .map(|s| sample_count(timing.sample_rate(), s.duration))
        .sum();
    let mut buffer = AudioBuffer::with_capacity(timing.sample_rate(), capacity);
    for segment in segments {
        trace!("{:?} for {:.4}s", segment.kind, segment.duration);
        match segment.kind {
            SegmentKind::Tone => {
                buffer.push_tone(timing.frequency(), timing.amplitude(), segment.duration)
            }
            SegmentKind::Silence => buffer.push_silence(segment.duration),
        }
    }
    buffer
}

/// Synthesize the audio for a sequence of morse tokens.
pub fn synthesize(tokens: &[Token], timing: &Timing) -> AudioBuffer {
    let segments = schedule(tokens, timing);
    debug!(
        "scheduled {} tokens into {} segments ({:.2} seconds)",
        tokens.len(),
        segments.len(),
        total_duration(&segments)
    );
    render(&segments, timing)
}

/// Parse the compact textual form of morse code into tokens.
///
/// A space between two patterns separates characters, `_` separates words
/// and absorbs the spaces around it.
///
/// ```
/// use morse_txt::morse::Token::*;
/// use morse_txt::synth::parse_compact;
///
/// assert_eq!(parse_compact(". _ -").unwrap(), vec![Dot, WordGap, Dash]);
/// ```
pub fn parse_compact(symbols: &str) -> Result<Vec<Token>, SynthError> {
    let mut tokens = Vec::with_capacity(symbols.len());
    for symbol in symbols.chars() {
        match symbol {
            '.' => tokens.push(Token::Dot),
            '-' => tokens.push(Token::Dash),
            ' ' => {
                if tokens.last().map_or(false, |t| t.is_element()) {
                    tokens.push(Token::CharGap);
                }
            }
            WORD_GAP_SYMBOL => {
                if tokens.last() == Some(&Token::CharGap) {
                    tokens.pop();
                }
                tokens.push(Token::WordGap);
            }
            _ => return Err(SynthError::UnsupportedSymbol { symbol }),
        }
    }
    Ok(tokens)
}

/// Synthesize the audio for morse code in its compact textual form.
/// Nothing is rendered if the input contains an unsupported symbol.
pub fn synthesize_str(symbols: &str, timing: &Timing) -> Result<AudioBuffer, SynthError> {
    let tokens = parse_compact(symbols)?;
    Ok(synthesize(&tokens, timing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morse::{encode, Token::*};

    const EPSILON: f64 = 1e-9;

    fn timing(wpm: u32, farnsworth_wpm: Option<u32>) -> Timing {
        Timing::new(wpm, farnsworth_wpm, 0.5, 440.0, 44100).unwrap()
    }

    fn silence_between_tones(segments: &[Segment]) -> Vec<f64> {
        let mut gaps = Vec::new();
        let mut current: Option<f64> = None;
        for segment in segments {
            match segment.kind {
                SegmentKind::Tone => {
                    if let Some(gap) = current.take() {
                        gaps.push(gap);
                    }
                }
                SegmentKind::Silence => {
                    current = Some(current.unwrap_or(0.0) + segment.duration);
                }
            }
        }
        gaps
    }

    #[test]
    fn empty_input() {
        let t = timing(20, None);
        assert!(schedule(&[], &t).is_empty());
        let buffer = synthesize(&[], &t);
        assert!(buffer.is_empty());
        assert_eq!(buffer.sample_rate(), 44100);
        assert!(synthesize_str("", &t).unwrap().is_empty());
    }

    #[test]
    fn element_layout() {
        let t = timing(20, None);
        assert_eq!(
            schedule(&[Dot, Dash], &t),
            vec![
                Segment::tone(t.dot()),
                Segment::silence(t.unit()),
                Segment::tone(t.dash()),
                Segment::silence(t.unit()),
            ]
        );
    }

    #[test]
    fn gaps_replace_element_spacing() {
        let t = timing(20, None);
        let gaps = silence_between_tones(&schedule(&encode("EE E").unwrap(), &t));
        assert_eq!(gaps.len(), 2);
        assert!((gaps[0] - 0.18).abs() < EPSILON);
        assert!((gaps[1] - 0.42).abs() < EPSILON);

        let gaps = silence_between_tones(&schedule(&encode("S").unwrap(), &t));
        assert!(gaps.iter().all(|g| (g - 0.06).abs() < EPSILON));
    }

    #[test]
    fn gap_is_rounded_once() {
        // At 11 wpm, unit and remaining char gap rounded separately lose a sample.
        let t = timing(11, None);
        let segments = schedule(&[Dot, CharGap, Dot], &t);
        assert_eq!(
            segments,
            vec![
                Segment::tone(t.dot()),
                Segment::silence(t.char_gap()),
                Segment::tone(t.dot()),
                Segment::silence(t.unit()),
            ]
        );
        let buffer = render(&segments, &t);
        let dot = sample_count(t.sample_rate(), t.dot());
        let gap = sample_count(t.sample_rate(), t.char_gap());
        assert_eq!(gap, 14432);
        assert!(buffer.samples()[dot..dot + gap].iter().all(|s| *s == 0.0));
        assert!(buffer.samples()[dot + gap + 1] != 0.0);
        assert_eq!(
            buffer.len(),
            2 * dot + gap + sample_count(t.sample_rate(), t.unit())
        );
    }

    #[test]
    fn leading_word_gap_is_complete() {
        let t = timing(20, None);
        let segments = schedule(&[WordGap, Dot], &t);
        assert_eq!(segments[0], Segment::silence(t.word_gap()));
    }

    #[test]
    fn paris_is_one_word() {
        // "PARIS " lasts exactly one minute divided by the speed, which is
        // how the Farnsworth gaps are defined.
        let paris = encode("PARIS ").unwrap();
        for wpm in &[5, 13, 20, 35] {
            let t = timing(*wpm, None);
            let duration = total_duration(&schedule(&paris, &t));
            assert!((duration - 60.0 / *wpm as f64).abs() < EPSILON);
        }
        for (wpm, farnsworth) in &[(20, 5), (18, 10), (25, 25)] {
            let t = timing(*wpm, Some(*farnsworth));
            let duration = total_duration(&schedule(&paris, &t));
            assert!((duration - 60.0 / *farnsworth as f64).abs() < EPSILON);
        }
    }

    #[test]
    fn farnsworth_keeps_tones() {
        let tokens = encode("CQ DE").unwrap();
        let tones = |t: &Timing| -> Vec<Segment> {
            schedule(&tokens, t)
                .into_iter()
                .filter(|s| s.kind == SegmentKind::Tone)
                .collect()
        };
        assert_eq!(tones(&timing(20, None)), tones(&timing(20, Some(8))));
        let standard = total_duration(&schedule(&tokens, &timing(20, None)));
        let slow = total_duration(&schedule(&tokens, &timing(20, Some(8))));
        assert!(slow > standard);
    }

    #[test]
    fn sample_count_follows_schedule() {
        let t = timing(20, Some(15));
        let tokens = encode("SOS").unwrap();
        let segments = schedule(&tokens, &t);
        let expected: usize = segments
            .iter()
            .map(|s| sample_count(t.sample_rate(), s.duration))
            .sum();
        let buffer = synthesize(&tokens, &t);
        assert_eq!(buffer.len(), expected);
        assert!(buffer.peak() <= t.amplitude() + EPSILON);
        assert!(buffer.peak() > 0.0);
    }

    #[test]
    fn deterministic() {
        let t = timing(22, Some(12));
        let tokens = encode("The quick brown fox 73").unwrap();
        assert_eq!(synthesize(&tokens, &t), synthesize(&tokens, &t));
    }

    #[test]
    fn compact_form() {
        assert_eq!(
            parse_compact(".... . _ .--").unwrap(),
            encode("HE W").unwrap()
        );
        assert_eq!(
            parse_compact("... --- ...").unwrap(),
            encode("SOS").unwrap()
        );
        let t = timing(20, None);
        assert_eq!(
            synthesize_str("... --- ...", &t).unwrap(),
            synthesize(&encode("sos").unwrap(), &t)
        );
    }

    #[test]
    fn unsupported_symbol() {
        let t = timing(20, None);
        assert_eq!(
            synthesize_str("..#", &t),
            Err(SynthError::UnsupportedSymbol { symbol: '#' })
        );
        assert_eq!(
            parse_compact("...x---"),
            Err(SynthError::UnsupportedSymbol { symbol: 'x' })
        );
        assert_eq!(
            SynthError::UnsupportedSymbol { symbol: '#' }.to_string(),
            "Unsupported Morse code symbol: '#'"
        );
    }
}
