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

//! Command implementations
//!
//! Everything that talks to a server takes a `&dyn MastodonApi` and writes
//! to a caller-supplied writer, so commands run the same against a real
//! instance and in unit tests.

pub mod accounts;
pub mod auth;
pub mod lists;
pub mod notifications;
pub mod statuses;
pub mod timeline;

#[cfg(test)]
pub(crate) mod fake;

pub use lists::ListCommand;
pub use notifications::NotificationOptions;
pub use statuses::PostOptions;
pub use timeline::{TimelineOptions, TimelineQuery, TimelineScope};
