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

//! Posting and bookmarking statuses

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::{debug, info};

use crate::api::MastodonApi;
use crate::models::{MediaUploadRequest, NewPost, Visibility};

#[derive(Debug, Clone, Default, Args)]
pub struct PostOptions {
    /// Text of the status
    #[arg(default_value = "")]
    pub text: String,

    /// Who can see the status
    #[arg(long, value_enum, ignore_case = true, default_value_t = Visibility::Public)]
    pub visibility: Visibility,

    /// Content warning shown in place of the text
    #[arg(short, long)]
    pub spoiler_text: Option<String>,

    /// ID of the status to reply to
    #[arg(short, long)]
    pub reply_to: Option<String>,

    /// ISO 639 language code
    #[arg(long)]
    pub language: Option<String>,

    /// Mark attached media as sensitive
    #[arg(long)]
    pub sensitive: bool,

    /// File to attach; may be repeated
    #[arg(short, long)]
    pub media: Vec<PathBuf>,

    /// Alt text for the matching --media file; may be repeated
    #[arg(short, long)]
    pub description: Vec<String>,
}

/// `toot post`
pub async fn post<W: Write>(api: &dyn MastodonApi, options: &PostOptions, out: &mut W) -> Result<()> {
    if options.text.trim().is_empty() && options.media.is_empty() {
        bail!("You must specify either text or media to post.");
    }

    if options.description.len() > options.media.len() {
        bail!("More --description options given than --media files.");
    }

    let mut media_ids = Vec::with_capacity(options.media.len());
    for (i, path) in options.media.iter().enumerate() {
        let request = MediaUploadRequest {
            file_path: path.display().to_string(),
            description: options.description.get(i).cloned(),
        };
        let attachment = api.upload_media(&request).await?;
        debug!("Uploaded {} as {}", request.file_path, attachment.id);
        media_ids.push(attachment.id);
    }

    let new_post = NewPost {
        content: options.text.clone(),
        spoiler_text: options.spoiler_text.clone(),
        visibility: options.visibility,
        sensitive: options.sensitive,
        language: options.language.clone(),
        in_reply_to_id: options.reply_to.clone(),
        media_ids,
    };

    let post = api.create_post(&new_post).await?;
    info!("Posted status {}", post.id);

    writeln!(out, "Toot posted: {}", post.url.as_deref().unwrap_or(&post.uri))?;
    Ok(())
}

/// `toot bookmark`
pub async fn bookmark<W: Write>(api: &dyn MastodonApi, status_id: &str, out: &mut W) -> Result<()> {
    api.bookmark(status_id).await?;
    writeln!(out, "✓ Status bookmarked")?;
    Ok(())
}

/// `toot unbookmark`
pub async fn unbookmark<W: Write>(api: &dyn MastodonApi, status_id: &str, out: &mut W) -> Result<()> {
    api.unbookmark(status_id).await?;
    writeln!(out, "✓ Status unbookmarked")?;
    Ok(())
}
