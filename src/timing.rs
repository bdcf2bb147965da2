// morse-txt -- a text based morse code practice tone generator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Durations of morse elements derived from the keying speed.
//!
//! All durations are measured in seconds. The speed of a single element is
//! always determined by `wpm`. When a Farnsworth speed is set, only the gaps
//! between characters and between words are stretched.

use snafu::Snafu;

/// Duration of one dot at one word per minute, following the PARIS convention
/// of 50 units per word.
const UNIT_SECONDS_AT_ONE_WPM: f64 = 1.2;

#[derive(Debug, PartialEq, Snafu)]
pub enum TimingError {
    #[snafu(display("Speed must be at least 1 wpm"))]
    WpmNotPositive,
    #[snafu(display(
        "Farnsworth speed {} wpm must not exceed the character speed {} wpm",
        farnsworth,
        wpm
    ))]
    FarnsworthTooFast { farnsworth: u32, wpm: u32 },
    #[snafu(display("Amplitude {} is outside of 0.0..=1.0", amplitude))]
    AmplitudeOutOfRange { amplitude: f64 },
    #[snafu(display("Tone frequency must be a positive finite number"))]
    FrequencyNotPositive,
    #[snafu(display("Sample rate must be positive"))]
    SampleRateNotPositive,
}

/// Everything needed to turn morse tokens into samples.
///
/// A `Timing` can only be obtained from [`Timing::new`], which rejects
/// configurations that would produce negative gaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    wpm: u32,
    farnsworth_wpm: Option<u32>,
    amplitude: f64,
    frequency: f64,
    sample_rate: u32,
}

impl Timing {
    pub const DEFAULT_WPM: u32 = 20;
    pub const DEFAULT_AMPLITUDE: f64 = 0.5;
    pub const DEFAULT_FREQUENCY: f64 = 440.0;
    pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

    /// A Farnsworth speed of zero means standard timing.
    pub fn new(
        wpm: u32,
        farnsworth_wpm: Option<u32>,
        amplitude: f64,
        frequency: f64,
        sample_rate: u32,
    ) -> Result<Self, TimingError> {
        if wpm == 0 {
            return Err(TimingError::WpmNotPositive);
        }
        let farnsworth_wpm = farnsworth_wpm.filter(|&f| f > 0);
        if let Some(farnsworth) = farnsworth_wpm {
            if farnsworth > wpm {
                return Err(TimingError::FarnsworthTooFast { farnsworth, wpm });
            }
        }
        if !(0.0..=1.0).contains(&amplitude) {
            return Err(TimingError::AmplitudeOutOfRange { amplitude });
        }
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(TimingError::FrequencyNotPositive);
        }
        if sample_rate == 0 {
            return Err(TimingError::SampleRateNotPositive);
        }
        Ok(Self {
            wpm,
            farnsworth_wpm,
            amplitude,
            frequency,
            sample_rate,
        })
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn farnsworth_wpm(&self) -> Option<u32> {
        self.farnsworth_wpm
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration of one dot, which is also the gap between two elements of a character.
    ///
    /// ```
    /// use morse_txt::timing::Timing;
    ///
    /// let timing = Timing::new(20, None, 0.5, 440.0, 44100).unwrap();
    /// assert!((timing.unit() - 0.06).abs() < 1e-12);
    /// ```
    pub fn unit(&self) -> f64 {
        UNIT_SECONDS_AT_ONE_WPM / self.wpm as f64
    }

    pub fn dot(&self) -> f64 {
        self.unit()
    }

    pub fn dash(&self) -> f64 {
        3.0 * self.unit()
    }

    /// Silence between two characters of the same word.
    pub fn char_gap(&self) -> f64 {
        match self.farnsworth_addition() {
            Some(addition) => 3.0 * addition / 19.0,
            None => 3.0 * self.unit(),
        }
    }

    /// Silence between two words.
    pub fn word_gap(&self) -> f64 {
        match self.farnsworth_addition() {
            Some(addition) => 7.0 * addition / 19.0,
            None => 7.0 * self.unit(),
        }
    }

    /// Total delay that is spread over the 19 gap units of a PARIS word
    /// to slow it down to the Farnsworth speed.
    fn farnsworth_addition(&self) -> Option<f64> {
        self.farnsworth_wpm.map(|farnsworth| {
            let wpm = self.wpm as f64;
            let farnsworth = farnsworth as f64;
            (60.0 * wpm - 37.2 * farnsworth) / (wpm * farnsworth)
        })
    }

    /// Number of samples covering `duration` seconds, rounded down.
    pub fn samples(&self, duration: f64) -> usize {
        crate::wave::sample_count(self.sample_rate, duration)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            wpm: Self::DEFAULT_WPM,
            farnsworth_wpm: None,
            amplitude: Self::DEFAULT_AMPLITUDE,
            frequency: Self::DEFAULT_FREQUENCY,
            sample_rate: Self::DEFAULT_SAMPLE_RATE,
        }
    }
}
