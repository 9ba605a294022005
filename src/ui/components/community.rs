//! Forum thread and reading list listings.

use crate::community::{ForumThread, ReadingEntry};
use crate::ui::helpers::{pad, push_rule, truncate};
use crate::ui::theme::Theme;

const STATUS_WIDTH: usize = 20;

/// One block per thread: title, byline, then the first line of content.
pub fn render_threads(out: &mut String, threads: &[(String, ForumThread)], theme: &Theme, cols: usize) {
    for (id, thread) in threads {
        out.push_str(theme.bold());
        out.push_str(&theme.fg(&theme.colors.header_fg));
        out.push_str(&truncate(&thread.title, cols));
        out.push_str(theme.reset());
        out.push('\n');

        out.push_str(&theme.fg(&theme.colors.text_dim));
        out.push_str(&format!(
            "[{}] by {} on {} | {} replies | {} likes | id {id}",
            thread.category,
            thread.author_name,
            thread.created_at.get(..10).unwrap_or(&thread.created_at),
            thread.reply_count,
            thread.likes,
        ));
        out.push_str(theme.reset());
        out.push('\n');

        let preview = thread.content.lines().next().unwrap_or_default();
        out.push_str(&truncate(preview, cols));
        out.push('\n');
        push_rule(out, theme, cols);
    }
}

pub fn render_reading_list(out: &mut String, entries: &[ReadingEntry], theme: &Theme, cols: usize) {
    for entry in entries {
        out.push_str(&theme.fg(&theme.colors.notice_fg));
        out.push_str(&pad(entry.status.label(), STATUS_WIDTH));
        out.push_str(&theme.fg(&theme.colors.text_normal));
        out.push_str(&truncate(&entry.title, cols.saturating_sub(STATUS_WIDTH + 12)));
        out.push_str(&theme.fg(&theme.colors.text_dim));
        out.push_str(&format!("  ({})", entry.manhwa_id));
        out.push_str(theme.reset());
        out.push('\n');
    }
}
