// morse-txt -- a text based morse code practice tone generator
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Easy interface for getting sound to play using a sox subprocess.

use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::wave::AudioBuffer;

/// Path of the sox `play` binary.
fn play_command() -> PathBuf {
    // For properly recording the sox dependency on nix:
    if let Some(sox_bin) = option_env!("NIX_SOX_BIN") {
        debug!("using sox from nix store {}", sox_bin);
        PathBuf::from(sox_bin).join("play")
    } else {
        "play".into()
    }
}

/// Arguments describing the raw mono `f64` stream written to the player.
fn input_args(sample_rate: u32) -> Vec<String> {
    vec![
        "-q".into(),
        "--channels".into(),
        "1".into(),
        "--rate".into(),
        sample_rate.to_string(),
        "--type".into(),
        "f64".into(),
        "/dev/stdin".into(),
    ]
}

/// Play the buffer on the default speakers.
/// Blocks until the player has finished.
pub fn play(audio: &AudioBuffer) -> io::Result<()> {
    if audio.is_empty() {
        debug!("nothing to play");
        return Ok(());
    }
    info!(
        "playing {} samples ({:.2} seconds) at {} Hz",
        audio.len(),
        audio.duration(),
        audio.sample_rate()
    );

    let mut player = Command::new(play_command())
        .args(input_args(audio.sample_rate()))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let mut audio_stream = player
        .stdin
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "sox stdin not captured"))?;
    let mut bytes = vec![0u8; audio.byte_len()];
    audio.copy_bytes_to(&mut bytes);
    let written = audio_stream
        .write_all(&bytes)
        .and_then(|_| audio_stream.flush());

    // sox exits once the input stream is closed
    drop(audio_stream);
    let status = player.wait()?;
    written?;

    if status.success() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("sox player exited with {}", status),
        ))
    }
}
