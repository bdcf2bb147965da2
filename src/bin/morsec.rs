// morse-txt -- a text based morse code practice tone generator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! `morsec` - pronounced *morse-c*, plays text as morse code.

use std::io;

use log::{debug, error, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use structopt::StructOpt;

use morse_txt::morse::{self, Compact};
use morse_txt::output;
use morse_txt::practice::{Charset, PracticeText};
use morse_txt::session;
use morse_txt::settings::Settings;
use morse_txt::synth;
use morse_txt::timing::Timing;
use morse_txt::wave::AudioBuffer;

#[derive(Debug, StructOpt)]
#[structopt(name = "morsec", about = "Playing text as morse code")]
struct Opt {
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,

    /// Character speed in words per minute.
    #[structopt(short, long, default_value = "20")]
    wpm: u32,

    /// Effective speed in words per minute, stretching the gaps between characters and words.
    #[structopt(short, long)]
    farnsworth: Option<u32>,

    /// Volume of the tone between 0.0 and 1.0.
    #[structopt(short, long, default_value = "0.5")]
    amplitude: f64,

    /// Pitch of the tone in Hz.
    #[structopt(long, default_value = "440")]
    frequency: f64,

    #[structopt(long, default_value = "44100")]
    sample_rate: u32,

    /// Leave letters out of random practice text.
    #[structopt(long)]
    no_letters: bool,

    /// Include digits in random practice text.
    #[structopt(long)]
    digits: bool,

    /// Include punctuation in random practice text.
    #[structopt(long)]
    punctuation: bool,

    /// Play this many random groups instead of the given text.
    #[structopt(short, long)]
    random: Option<usize>,

    /// Number of characters per random group.
    #[structopt(long, default_value = "5")]
    group_size: usize,

    /// Seed for random practice text, for repeating a session.
    #[structopt(long)]
    seed: Option<u64>,

    /// Start the practice menu.
    #[structopt(short, long)]
    interactive: bool,

    /// Only print the morse code and its length, without playing it.
    #[structopt(long)]
    dry_run: bool,

    /// The text to play.
    text: Vec<String>,
}

fn invalid_input<E: Into<Box<dyn std::error::Error + Send + Sync>>>(err: E) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err)
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();

    let level = match opt.verbose {
        0 => log::Level::Info,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    simple_logger::init_with_level(level).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let timing = Timing::new(
        opt.wpm,
        opt.farnsworth,
        opt.amplitude,
        opt.frequency,
        opt.sample_rate,
    )
    .map_err(invalid_input)?;
    if timing.frequency() >= timing.sample_rate() as f64 / 2.0 {
        log::warn!(
            "tone frequency {} Hz is above the Nyquist frequency of {} Hz",
            timing.frequency(),
            timing.sample_rate() / 2
        );
    }
    let charset = Charset {
        letters: !opt.no_letters,
        digits: opt.digits,
        punctuation: opt.punctuation,
    };
    let mut settings = Settings::new(
        timing,
        charset,
        opt.random.unwrap_or(10),
        opt.group_size,
    )
    .map_err(invalid_input)?;

    let seed = opt.seed.unwrap_or_else(rand::random);
    debug!("practice seed {}", seed);
    let mut rng = Pcg32::seed_from_u64(seed);

    let dry_run = opt.dry_run;
    let player = |audio: &AudioBuffer| {
        if dry_run {
            Ok(())
        } else {
            output::sox::play(audio)
        }
    };

    if opt.interactive {
        let stdin = io::stdin();
        return session::run_interactive(
            &mut settings,
            &mut rng,
            stdin.lock(),
            io::stdout(),
            player,
        );
    }

    let text = match opt.random {
        Some(groups) => {
            let practice = PracticeText::new(charset).map_err(invalid_input)?;
            let text = practice.generate(&mut rng, groups, settings.group_size());
            println!("{}", text);
            text
        }
        None if !opt.text.is_empty() => opt.text.join(" "),
        None => return Err(invalid_input("no text given, use --random or --interactive")),
    };

    if dry_run {
        let tokens = morse::encode(&text).map_err(|err| {
            error!("{}", err);
            invalid_input(err)
        })?;
        let segments = synth::schedule(&tokens, &timing);
        println!("{}", Compact(&tokens));
        info!(
            "{} segments, {:.2} seconds",
            segments.len(),
            synth::total_duration(&segments)
        );
        return Ok(());
    }

    let transmission = session::prepare(&text, &timing).map_err(|err| {
        error!("{}", err);
        invalid_input(err)
    })?;
    println!("{}", transmission.morse);
    output::sox::play(&transmission.audio)
}
