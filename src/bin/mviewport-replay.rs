// mviewport -- Zoom, rotate, pan and swipe gesture engine for media viewers
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of mviewport.
//
// mviewport is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use log::error;
use mviewport::{replay::Script, ViewportConfig};

/// Replays a JSON input script against a viewport and prints what it emitted
#[derive(Parser, Debug)]
#[command(name = "mviewport-replay")]
#[command(version)]
struct Cli {
    /// Script with layout sizes, item count and timed steps
    script: PathBuf,

    /// Viewport config file (defaults to the user config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the emitted events as they would be delivered, one per line
    #[arg(short, long, default_value_t = false)]
    events: bool,
}

fn run(cli: &Cli) -> mviewport::Result<()> {
    let config = match &cli.config {
        Some(path) => ViewportConfig::from_path(path)?,
        None => ViewportConfig::load(),
    };
    let script = Script::from_path(&cli.script)?;
    let report = script.run(config);

    if cli.events {
        for timed in &report.events {
            println!("{:>6} ms  {:?}", timed.t_ms, timed.event);
        }
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("mviewport-replay: {e}");
            ExitCode::FAILURE
        }
    }
}
