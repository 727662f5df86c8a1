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

//! User-facing errors
//!
//! Everything else travels as `anyhow::Error` with context attached; these
//! are the conditions whose message is part of the command-line contract.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TootError {
    #[error("Only one of --public, --tag, --account, or --list can be used at one time.")]
    ConflictingTimelines,

    #[error("The --local option is only valid alongside --public or --tag.")]
    LocalWithoutPublicOrTag,

    #[error("The --instance option is only valid alongside --public or --tag.")]
    InstanceWithoutPublicOrTag,

    #[error("You are not logged in to any accounts")]
    NotLoggedIn,

    #[error("Account \"{0}\" not found")]
    AccountNotFound(String),

    #[error("List \"{0}\" not found")]
    ListNotFound(String),
}
