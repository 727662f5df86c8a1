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

//! Data models for toot
//!
//! These models represent the records the server hands back (posts, users,
//! notifications, lists) and the local state the client persists.

mod account;
mod list;
mod media;
mod notification;
mod post;
mod timeline;
mod user;

pub use account::*;
pub use list::*;
pub use media::*;
pub use notification::*;
pub use post::*;
pub use timeline::*;
pub use user::*;
