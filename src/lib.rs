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
//!
//! The binary is a thin wrapper over [`cli::run`]; the modules are public so
//! integration tests can seed account stores and drive the retry harness.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod output;
pub mod retry;
pub mod store;
