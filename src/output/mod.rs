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

//! Plain-text rendering of posts, notifications and accounts
//!
//! Every printer writes to a caller-supplied `Write` so commands can be
//! exercised against a buffer.

use std::io::{self, Write};

use chrono::{DateTime, Local, Utc};

use crate::models::{InstanceInfo, Notification, Post, StoredAccount, User, UserList};

/// Width of dividers and headers
pub const WIDTH: usize = 80;

const DIVIDER: char = '─';

pub fn divider() -> String {
    DIVIDER.to_string().repeat(WIDTH)
}

/// Print a timeline: a divider, then every post followed by a divider.
/// An empty timeline is a single divider.
pub fn print_timeline<W: Write>(out: &mut W, posts: &[Post]) -> io::Result<()> {
    writeln!(out, "{}", divider())?;
    for post in posts {
        print_post(out, post)?;
        writeln!(out, "{}", divider())?;
    }
    Ok(())
}

/// Print a single post without surrounding dividers
pub fn print_post<W: Write>(out: &mut W, post: &Post) -> io::Result<()> {
    let status = post.original();

    writeln!(
        out,
        "{}",
        spread(&account_label(&status.account), &format_time(&status.created_at))
    )?;

    if status.id != post.id {
        writeln!(out, "↻ @{} boosted", post.account.acct)?;
    }

    writeln!(out)?;

    if !status.spoiler_text.is_empty() {
        writeln!(out, "CW: {}", status.spoiler_text)?;
        writeln!(out)?;
    }

    writeln!(out, "{}", status.plain_content.trim_end())?;

    for media in &status.media_attachments {
        match &media.description {
            Some(description) if !description.is_empty() => {
                writeln!(out, "Media: {} ({})", media.url, description)?
            }
            _ => writeln!(out, "Media: {}", media.url)?,
        }
    }

    writeln!(out)?;

    let mut footer = format!("ID {}", status.id);
    if let Some(reply_to) = &status.in_reply_to_id {
        footer.push_str(&format!("  ↲ In reply to {}", reply_to));
    }
    footer.push_str(&format!("  {}", status.visibility));
    writeln!(out, "{}", footer)
}

/// Print notifications, or a notice when there are none
pub fn print_notifications<W: Write>(out: &mut W, notifications: &[Notification]) -> io::Result<()> {
    if notifications.is_empty() {
        return writeln!(out, "You have no notifications");
    }

    for notification in notifications {
        writeln!(out, "{}", divider())?;
        writeln!(
            out,
            "{} {}",
            account_label(&notification.account),
            notification.notification_type.action()
        )?;
        if let Some(status) = &notification.status {
            writeln!(out)?;
            print_post(out, status)?;
        }
    }
    writeln!(out, "{}", divider())
}

pub fn print_account<W: Write>(out: &mut W, user: &User) -> io::Result<()> {
    writeln!(out, "@{} {}", user.acct, user.name())?;
    writeln!(out, "ID: {}", user.id)?;
    writeln!(out, "Since: {}", user.created_at.format("%Y-%m-%d"))?;

    let note = html_to_text(&user.note);
    if !note.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", note)?;
    }

    writeln!(out)?;
    writeln!(out, "Followers: {}", user.followers_count)?;
    writeln!(out, "Following: {}", user.following_count)?;
    writeln!(out, "Statuses: {}", user.statuses_count)?;
    writeln!(out)?;
    writeln!(out, "{}", user.url)
}

pub fn print_lists<W: Write>(out: &mut W, lists: &[UserList]) -> io::Result<()> {
    if lists.is_empty() {
        return writeln!(out, "You have no lists defined.");
    }
    for list in lists {
        writeln!(out, "{:>10}  {}", list.id, list.title)?;
    }
    Ok(())
}

/// Print stored logins, marking the active one with `*`
pub fn print_stored_accounts<W: Write>(
    out: &mut W,
    accounts: &[StoredAccount],
    active_id: Option<&str>,
) -> io::Result<()> {
    if accounts.is_empty() {
        return writeln!(out, "You are not logged in to any accounts");
    }
    for account in accounts {
        let marker = if Some(account.id.as_str()) == active_id { "*" } else { " " };
        writeln!(out, "{} {}  {}", marker, account.acct, account.instance_url)?;
    }
    Ok(())
}

pub fn print_instance<W: Write>(out: &mut W, instance: &InstanceInfo) -> io::Result<()> {
    writeln!(out, "{}", instance.title)?;
    writeln!(out, "{}", instance.url)?;
    writeln!(out)?;

    let description = html_to_text(&instance.description);
    if !description.is_empty() {
        writeln!(out, "{}", description)?;
        writeln!(out)?;
    }

    writeln!(out, "Mastodon version: {}", instance.version)?;
    if let Some(users) = instance.user_count {
        writeln!(out, "Users: {}", users)?;
    }
    if let Some(statuses) = instance.status_count {
        writeln!(out, "Statuses: {}", statuses)?;
    }
    if let Some(domains) = instance.domain_count {
        writeln!(out, "Known domains: {}", domains)?;
    }
    if let Some(chars) = instance.max_toot_chars {
        writeln!(out, "Max status length: {}", chars)?;
    }
    if !instance.languages.is_empty() {
        writeln!(out, "Languages: {}", instance.languages.join(", "))?;
    }

    let registrations = match (instance.registrations, instance.approval_required) {
        (false, _) => "closed",
        (true, true) => "open (approval required)",
        (true, false) => "open",
    };
    writeln!(out, "Registrations: {}", registrations)
}

fn account_label(user: &User) -> String {
    format!("{} @{}", user.name(), user.acct)
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// `left` and `right` on one line, padded to `WIDTH` when they fit
fn spread(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let gap = WIDTH.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

/// Convert status HTML to plain text.
///
/// Line breaks and paragraph boundaries become newlines, remaining tags are
/// dropped and the common entities decoded.
pub fn html_to_text(html: &str) -> String {
    let html = html
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("</p><p>", "\n\n");

    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    // &amp; last so "&amp;lt;" stays "&lt;"
    result
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::models::NotificationType;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_timeline_is_a_single_divider() {
        let out = render(|w| print_timeline(w, &[]));
        assert_eq!(out.trim(), "─".repeat(80));
    }

    #[test]
    fn timeline_shows_ids_in_order() {
        let alice = user("1", "alice");
        let posts = vec![post("200", &alice, "<p>second</p>"), post("100", &alice, "<p>first</p>")];

        let out = render(|w| print_timeline(w, &posts));
        assert!(out.find("ID 200").unwrap() < out.find("ID 100").unwrap());
        assert!(out.contains("alice @alice"));
        assert_eq!(out.matches(&divider()).count(), 3);
    }

    #[test]
    fn boost_shows_original_and_booster() {
        let alice = user("1", "alice");
        let bob = user("2", "bob");
        let mut boost = post("300", &bob, "");
        boost.reblog = Some(Box::new(post("299", &alice, "<p>original</p>")));

        let out = render(|w| print_post(w, &boost));
        assert!(out.contains("↻ @bob boosted"));
        assert!(out.contains("ID 299"));
        assert!(out.contains("original"));
    }

    #[test]
    fn reply_and_spoiler_are_shown() {
        let alice = user("1", "alice");
        let mut reply = post("5", &alice, "<p>hidden</p>");
        reply.in_reply_to_id = Some("4".to_string());
        reply.spoiler_text = "spoilers".to_string();

        let out = render(|w| print_post(w, &reply));
        assert!(out.contains("CW: spoilers"));
        assert!(out.contains("↲ In reply to 4"));
    }

    #[test]
    fn no_notifications_notice() {
        let out = render(|w| print_notifications(w, &[]));
        assert_eq!(out.trim(), "You have no notifications");
    }

    #[test]
    fn mention_and_follow_lines() {
        let bob = user("2", "bob");
        let status = post("77", &bob, "<p>Paging doctor <span class=\"h-card\"><a href=\"#\">@<span>alice</span></a></span></p>");
        let notifications = vec![
            notification("n2", NotificationType::Mention, &bob, Some(status)),
            notification("n1", NotificationType::Follow, &bob, None),
        ];

        let out = render(|w| print_notifications(w, &notifications));
        assert!(out.contains("@bob mentioned you"));
        assert!(out.contains("Paging doctor @alice"));
        assert!(out.contains("ID 77"));
        assert!(out.contains("@bob now follows you"));
    }

    #[test]
    fn html_paragraphs_and_entities() {
        let text = html_to_text("<p>one &amp; two</p><p>three<br />four &lt;5&gt;</p>");
        assert_eq!(text, "one & two\n\nthree\nfour <5>");
    }

    #[test]
    fn header_is_padded_to_width() {
        let line = spread("left", "right");
        assert_eq!(line.chars().count(), WIDTH);
        assert!(line.starts_with("left ") && line.ends_with(" right"));
    }
}
