// morse-txt -- a text based morse code practice tone generator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! This is the namespace for all parts dealing with data in sampled waves.

/// Number of samples covering `duration` seconds, rounded down.
///
/// Negative durations yield no samples.
///
/// ```
/// use morse_txt::wave::sample_count;
///
/// assert_eq!(sample_count(44100, 0.5), 22050);
/// assert_eq!(sample_count(8000, -1.0), 0);
/// ```
pub fn sample_count(sample_rate: u32, duration: f64) -> usize {
    (sample_rate as f64 * duration).floor().max(0.0) as usize
}

/// A mono buffer holding floating point audio data.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    samples: Vec<f64>,
}

impl AudioBuffer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            samples: Vec::new(),
        }
    }

    pub fn with_capacity(sample_rate: u32, capacity: usize) -> Self {
        Self {
            sample_rate,
            samples: Vec::with_capacity(capacity),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Size of the buffer in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Size of the buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.len() * std::mem::size_of::<f64>()
    }

    /// Length of the buffer in seconds.
    pub fn duration(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Largest absolute sample value, zero for an empty buffer.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |peak, s| s.abs().max(peak))
    }

    /// Append a sine tone.
    ///
    /// The tone is sampled at `sample_count(duration)` evenly spaced points of
    /// the half-open interval `[0, duration)`, so consecutive segments line up
    /// without a duplicated boundary sample.
    pub fn push_tone(&mut self, frequency: f64, amplitude: f64, duration: f64) {
        let count = sample_count(self.sample_rate, duration);
        if count == 0 {
            return;
        }
        let step = duration / count as f64;
        use std::f64::consts::PI;
        self.samples.extend(
            (0..count).map(|i| amplitude * (2.0 * PI * frequency * i as f64 * step).sin()),
        );
    }

    /// Append silence.
    pub fn push_silence(&mut self, duration: f64) {
        let count = sample_count(self.sample_rate, duration);
        self.samples.resize(self.samples.len() + count, 0.0);
    }

    /// Copy the `f64` samples to little endian bytes.
    ///
    /// Returns the number of samples that were actually copied.
    /// Might be less than the number of input samples if the output buffer was not large enough.
    pub fn copy_bytes_to(&self, bytes: &mut [u8]) -> usize {
        let mut processed = 0;
        for (sample, target) in self.samples.iter().zip(bytes.chunks_exact_mut(8)) {
            target.copy_from_slice(&sample.to_le_bytes());
            processed += 1;
        }
        processed
    }
}
