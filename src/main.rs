// toot - A command-line client for Mastodon
// Copyright (C) 2025 toot Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! toot - a command-line client for Mastodon

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use toot::cli::{self, Cli};
use toot::logger::{Logger, LoggerConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = Logger::init_with_config(LoggerConfig::for_cli(cli.verbose, cli.log_dir.clone())) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    info!("toot {} starting", env!("CARGO_PKG_VERSION"));

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
