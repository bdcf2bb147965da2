// morse-txt -- a text based morse code practice tone generator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Per-run settings and parsing of interactive menu input.
//!
//! Every setting has its own setter that parses and validates user input.
//! A setter leaves the settings untouched when it fails.

use std::fmt;
use std::str::FromStr;

use snafu::Snafu;

use crate::practice::{Charset, PracticeError};
use crate::timing::{Timing, TimingError};

#[derive(Debug, PartialEq, Snafu)]
pub enum SettingsError {
    #[snafu(display("{:?} is not a valid value for {}", value, field))]
    Parse { field: Field, value: String },
    #[snafu(display("{}", source))]
    Invalid { source: TimingError },
    #[snafu(display("{}", source))]
    Practice { source: PracticeError },
    #[snafu(display("{} must be at least 1", field))]
    Zero { field: Field },
}

/// The settings that can be changed interactively.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Wpm,
    FarnsworthWpm,
    Amplitude,
    Frequency,
    SampleRate,
    Letters,
    Digits,
    Punctuation,
    Groups,
    GroupSize,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Wpm,
        Field::FarnsworthWpm,
        Field::Amplitude,
        Field::Frequency,
        Field::SampleRate,
        Field::Letters,
        Field::Digits,
        Field::Punctuation,
        Field::Groups,
        Field::GroupSize,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Wpm => "wpm",
            Field::FarnsworthWpm => "farnsworth",
            Field::Amplitude => "amplitude",
            Field::Frequency => "frequency",
            Field::SampleRate => "samplerate",
            Field::Letters => "letters",
            Field::Digits => "digits",
            Field::Punctuation => "punctuation",
            Field::Groups => "groups",
            Field::GroupSize => "groupsize",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either the position in [`Field::ALL`] (starting at 1) or the name.
impl FromStr for Field {
    type Err = MenuError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let by_index = input
            .parse::<usize>()
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| Field::ALL.get(i).copied());
        by_index
            .or_else(|| {
                Field::ALL
                    .iter()
                    .copied()
                    .find(|f| f.name().eq_ignore_ascii_case(input))
            })
            .ok_or_else(|| MenuError::UnknownChoice {
                input: input.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    timing: Timing,
    charset: Charset,
    groups: usize,
    group_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timing: Timing::default(),
            charset: Charset::default(),
            groups: 10,
            group_size: 5,
        }
    }
}

impl Settings {
    /// Practice needs at least one group of at least one character.
    pub fn new(
        timing: Timing,
        charset: Charset,
        groups: usize,
        group_size: usize,
    ) -> Result<Self, SettingsError> {
        if groups == 0 {
            return Err(SettingsError::Zero {
                field: Field::Groups,
            });
        }
        if group_size == 0 {
            return Err(SettingsError::Zero {
                field: Field::GroupSize,
            });
        }
        Ok(Self {
            timing,
            charset,
            groups,
            group_size,
        })
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn groups(&self) -> usize {
        self.groups
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    /// Update a single field from user input.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), SettingsError> {
        match field {
            Field::Wpm => self.set_wpm(value),
            Field::FarnsworthWpm => self.set_farnsworth_wpm(value),
            Field::Amplitude => self.set_amplitude(value),
            Field::Frequency => self.set_frequency(value),
            Field::SampleRate => self.set_sample_rate(value),
            Field::Letters => self.set_letters(value),
            Field::Digits => self.set_digits(value),
            Field::Punctuation => self.set_punctuation(value),
            Field::Groups => self.set_groups(value),
            Field::GroupSize => self.set_group_size(value),
        }
    }

    pub fn set_wpm(&mut self, value: &str) -> Result<(), SettingsError> {
        let wpm = parse(Field::Wpm, value)?;
        let t = self.timing;
        self.update_timing(
            wpm,
            t.farnsworth_wpm(),
            t.amplitude(),
            t.frequency(),
            t.sample_rate(),
        )
    }

    /// `off`, `none` or `0` disable Farnsworth timing.
    pub fn set_farnsworth_wpm(&mut self, value: &str) -> Result<(), SettingsError> {
        let farnsworth = match value.trim().to_ascii_lowercase().as_str() {
            "off" | "none" | "" => None,
            _ => Some(parse(Field::FarnsworthWpm, value)?),
        };
        let t = self.timing;
        self.update_timing(
            t.wpm(),
            farnsworth,
            t.amplitude(),
            t.frequency(),
            t.sample_rate(),
        )
    }

    pub fn set_amplitude(&mut self, value: &str) -> Result<(), SettingsError> {
        let amplitude = parse(Field::Amplitude, value)?;
        let t = self.timing;
        self.update_timing(
            t.wpm(),
            t.farnsworth_wpm(),
            amplitude,
            t.frequency(),
            t.sample_rate(),
        )
    }

    pub fn set_frequency(&mut self, value: &str) -> Result<(), SettingsError> {
        let frequency = parse(Field::Frequency, value)?;
        let t = self.timing;
        self.update_timing(
            t.wpm(),
            t.farnsworth_wpm(),
            t.amplitude(),
            frequency,
            t.sample_rate(),
        )
    }

    pub fn set_sample_rate(&mut self, value: &str) -> Result<(), SettingsError> {
        let sample_rate = parse(Field::SampleRate, value)?;
        let t = self.timing;
        self.update_timing(
            t.wpm(),
            t.farnsworth_wpm(),
            t.amplitude(),
            t.frequency(),
            sample_rate,
        )
    }

    pub fn set_letters(&mut self, value: &str) -> Result<(), SettingsError> {
        let letters = parse_switch(Field::Letters, value)?;
        self.update_charset(Charset {
            letters,
            ..self.charset
        })
    }

    pub fn set_digits(&mut self, value: &str) -> Result<(), SettingsError> {
        let digits = parse_switch(Field::Digits, value)?;
        self.update_charset(Charset {
            digits,
            ..self.charset
        })
    }

    pub fn set_punctuation(&mut self, value: &str) -> Result<(), SettingsError> {
        let punctuation = parse_switch(Field::Punctuation, value)?;
        self.update_charset(Charset {
            punctuation,
            ..self.charset
        })
    }

    pub fn set_groups(&mut self, value: &str) -> Result<(), SettingsError> {
        self.groups = parse_count(Field::Groups, value)?;
        Ok(())
    }

    pub fn set_group_size(&mut self, value: &str) -> Result<(), SettingsError> {
        self.group_size = parse_count(Field::GroupSize, value)?;
        Ok(())
    }

    fn update_timing(
        &mut self,
        wpm: u32,
        farnsworth_wpm: Option<u32>,
        amplitude: f64,
        frequency: f64,
        sample_rate: u32,
    ) -> Result<(), SettingsError> {
        self.timing = Timing::new(wpm, farnsworth_wpm, amplitude, frequency, sample_rate)
            .map_err(|source| SettingsError::Invalid { source })?;
        Ok(())
    }

    fn update_charset(&mut self, charset: Charset) -> Result<(), SettingsError> {
        if charset.characters().is_empty() {
            return Err(SettingsError::Practice {
                source: PracticeError::EmptyCharset,
            });
        }
        self.charset = charset;
        Ok(())
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let on_off = |b: bool| if b { "on" } else { "off" };
        let t = &self.timing;
        for (index, field) in Field::ALL.iter().enumerate() {
            let value = match field {
                Field::Wpm => t.wpm().to_string(),
                Field::FarnsworthWpm => t
                    .farnsworth_wpm()
                    .map_or_else(|| "off".to_string(), |wpm| wpm.to_string()),
                Field::Amplitude => t.amplitude().to_string(),
                Field::Frequency => format!("{} Hz", t.frequency()),
                Field::SampleRate => format!("{} Hz", t.sample_rate()),
                Field::Letters => on_off(self.charset.letters).to_string(),
                Field::Digits => on_off(self.charset.digits).to_string(),
                Field::Punctuation => on_off(self.charset.punctuation).to_string(),
                Field::Groups => self.groups.to_string(),
                Field::GroupSize => self.group_size.to_string(),
            };
            writeln!(f, "{:2}) {:<12} {}", index + 1, field.name(), value)?;
        }
        Ok(())
    }
}

fn parse<T: FromStr>(field: Field, value: &str) -> Result<T, SettingsError> {
    value.trim().parse().map_err(|_| SettingsError::Parse {
        field,
        value: value.to_string(),
    })
}

fn parse_count(field: Field, value: &str) -> Result<usize, SettingsError> {
    match parse(field, value)? {
        0 => Err(SettingsError::Zero { field }),
        n => Ok(n),
    }
}

fn parse_switch(field: Field, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "yes" | "y" | "true" | "1" => Ok(true),
        "off" | "no" | "n" | "false" | "0" => Ok(false),
        _ => Err(SettingsError::Parse {
            field,
            value: value.to_string(),
        }),
    }
}

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum MenuError {
    #[snafu(display("Unknown choice {:?}", input))]
    UnknownChoice { input: String },
}

/// Entries of the interactive main menu.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    SendText,
    Practice,
    ChangeSetting,
    ShowSettings,
    Quit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::SendText,
        MenuChoice::Practice,
        MenuChoice::ChangeSetting,
        MenuChoice::ShowSettings,
        MenuChoice::Quit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuChoice::SendText => "1",
            MenuChoice::Practice => "2",
            MenuChoice::ChangeSetting => "3",
            MenuChoice::ShowSettings => "4",
            MenuChoice::Quit => "q",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuChoice::SendText => "Send text",
            MenuChoice::Practice => "Random practice",
            MenuChoice::ChangeSetting => "Change a setting",
            MenuChoice::ShowSettings => "Show settings",
            MenuChoice::Quit => "Quit",
        }
    }

    pub fn parse(line: &str) -> Result<MenuChoice, MenuError> {
        let input = line.trim();
        match input.to_ascii_lowercase().as_str() {
            "1" | "send" => Ok(MenuChoice::SendText),
            "2" | "practice" => Ok(MenuChoice::Practice),
            "3" | "set" => Ok(MenuChoice::ChangeSetting),
            "4" | "show" => Ok(MenuChoice::ShowSettings),
            "q" | "quit" | "exit" => Ok(MenuChoice::Quit),
            _ => Err(MenuError::UnknownChoice {
                input: input.to_string(),
            }),
        }
    }
}
