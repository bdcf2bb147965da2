// morse-txt -- a text based morse code practice tone generator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Glue between text, the synthesizer and a player, including the interactive menu.

use std::io::{self, BufRead, Write};

use log::{debug, error, info};
use rand::Rng;

use crate::morse::{self, Compact, EncodeError};
use crate::practice::PracticeText;
use crate::settings::{Field, MenuChoice, Settings};
use crate::synth;
use crate::timing::Timing;
use crate::wave::AudioBuffer;

/// Encoded text, ready to be played.
pub struct Transmission {
    /// The compact textual form of the morse code.
    pub morse: String,
    pub audio: AudioBuffer,
}

/// Encode and synthesize `text`. No audio is generated if the text cannot be encoded.
pub fn prepare(text: &str, timing: &Timing) -> Result<Transmission, EncodeError> {
    let tokens = morse::encode(text)?;
    let morse = Compact(&tokens).to_string();
    debug!("{:?} encodes as {}", text, morse);
    if log::log_enabled!(log::Level::Debug) {
        if let Some(decoded) = morse::decode(&morse) {
            debug!("decodes back to {:?}", decoded);
        }
    }
    let audio = synth::synthesize(&tokens, timing);
    Ok(Transmission { morse, audio })
}

/// Menu-driven practice session reading commands line by line from `input`.
///
/// Returns when the user quits or the input ends.
/// Errors while encoding or playing a text are reported and the menu is shown again.
pub fn run_interactive<R, W, G, P>(
    settings: &mut Settings,
    rng: &mut G,
    mut input: R,
    mut output: W,
    mut player: P,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
    P: FnMut(&AudioBuffer) -> io::Result<()>,
{
    loop {
        writeln!(output)?;
        for choice in MenuChoice::ALL.iter() {
            writeln!(output, "{}) {}", choice.key(), choice.description())?;
        }
        let line = match prompt(&mut input, &mut output, "> ")? {
            Some(line) => line,
            None => return Ok(()),
        };
        let choice = match MenuChoice::parse(&line) {
            Ok(choice) => choice,
            Err(err) => {
                writeln!(output, "{}", err)?;
                continue;
            }
        };
        match choice {
            MenuChoice::SendText => {
                if let Some(text) = prompt(&mut input, &mut output, "text> ")? {
                    send(&text, settings.timing(), &mut output, &mut player)?;
                }
            }
            MenuChoice::Practice => match PracticeText::new(settings.charset()) {
                Ok(practice) => {
                    let text =
                        practice.generate(&mut *rng, settings.groups(), settings.group_size());
                    writeln!(output, "{}", text)?;
                    send(&text, settings.timing(), &mut output, &mut player)?;
                }
                Err(err) => writeln!(output, "{}", err)?,
            },
            MenuChoice::ChangeSetting => change_setting(settings, &mut input, &mut output)?,
            MenuChoice::ShowSettings => write!(output, "{}", settings)?,
            MenuChoice::Quit => return Ok(()),
        }
    }
}

/// Ask for a field and a new value until both are valid.
/// An empty line cancels.
fn change_setting<R: BufRead, W: Write>(
    settings: &mut Settings,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    write!(output, "{}", settings)?;
    let field = loop {
        match prompt(input, output, "setting> ")? {
            None => return Ok(()),
            Some(line) if line.trim().is_empty() => return Ok(()),
            Some(line) => match line.parse::<Field>() {
                Ok(field) => break field,
                Err(err) => writeln!(output, "{}", err)?,
            },
        }
    };
    loop {
        match prompt(input, output, &format!("{}> ", field))? {
            None => return Ok(()),
            Some(line) if line.trim().is_empty() => return Ok(()),
            Some(line) => match settings.set(field, &line) {
                Ok(()) => {
                    info!("{} set to {}", field, line.trim());
                    return Ok(());
                }
                Err(err) => writeln!(output, "{}", err)?,
            },
        }
    }
}

fn send<W, P>(text: &str, timing: &Timing, output: &mut W, player: &mut P) -> io::Result<()>
where
    W: Write,
    P: FnMut(&AudioBuffer) -> io::Result<()>,
{
    match prepare(text, timing) {
        Ok(transmission) => {
            writeln!(output, "{}", transmission.morse)?;
            if let Err(err) = player(&transmission.audio) {
                error!("Failed to play audio: {}", err);
                writeln!(output, "Failed to play audio: {}", err)?;
            }
        }
        Err(err) => {
            error!("{}", err);
            writeln!(output, "{}", err)?;
        }
    }
    Ok(())
}

/// Read one line, without its line terminator. Returns `None` at the end of the input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(|c| c == '\n' || c == '\r');
    Ok(Some(trimmed.to_string()))
}
