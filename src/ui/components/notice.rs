//! Transient notifications.

use crate::ui::theme::Theme;

/// Appends `title: description` in the notice color.
pub fn render_notice(out: &mut String, title: &str, description: &str, theme: &Theme) {
    out.push_str(theme.bold());
    out.push_str(&theme.fg(&theme.colors.notice_fg));
    out.push_str(title);
    out.push_str(theme.reset());
    out.push_str(": ");
    out.push_str(description);
    out.push('\n');
}

/// Appends an error line in the error color.
pub fn render_error(out: &mut String, message: &str, theme: &Theme) {
    out.push_str(&theme.fg(&theme.colors.error_fg));
    out.push_str("error: ");
    out.push_str(message);
    out.push_str(theme.reset());
    out.push('\n');
}
