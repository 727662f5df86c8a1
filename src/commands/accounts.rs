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

//! Account and instance commands

use std::io::Write;

use anyhow::Result;
use tracing::info;

use crate::api::MastodonApi;
use crate::output;

/// `toot follow`
pub async fn follow<W: Write>(api: &dyn MastodonApi, acct: &str, out: &mut W) -> Result<()> {
    let user = api.lookup_account(acct).await?;
    let relationship = api.follow(&user.id).await?;
    info!("Followed {} ({})", user.acct, user.id);

    if relationship.requested && !relationship.following {
        writeln!(out, "✓ Follow request sent to {}", acct)?;
    } else {
        writeln!(out, "✓ You are now following {}", acct)?;
    }
    Ok(())
}

/// `toot unfollow`
pub async fn unfollow<W: Write>(api: &dyn MastodonApi, acct: &str, out: &mut W) -> Result<()> {
    let user = api.lookup_account(acct).await?;
    api.unfollow(&user.id).await?;
    info!("Unfollowed {} ({})", user.acct, user.id);

    writeln!(out, "✓ You are no longer following {}", acct)?;
    Ok(())
}

/// `toot whoami`
pub async fn whoami<W: Write>(api: &dyn MastodonApi, out: &mut W) -> Result<()> {
    let me = api.verify_credentials().await?;
    output::print_account(out, &me)?;
    Ok(())
}

/// `toot instance`
pub async fn instance<W: Write>(api: &dyn MastodonApi, out: &mut W) -> Result<()> {
    let info = api.get_instance_info().await?;
    output::print_instance(out, &info)?;
    Ok(())
}
