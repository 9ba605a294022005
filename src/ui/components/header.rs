//! Page title bar.

use crate::ui::helpers::{center_offset, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Appends the centered title and, when present, the dimmed criteria line.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let title_len = header.title.chars().count();

    out.push_str(theme.bold());
    out.push_str(&theme.fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&theme.bg(bg));
    }
    out.push_str(&" ".repeat(center_offset(title_len, cols)));
    out.push_str(&header.title);
    out.push_str(theme.reset());
    out.push('\n');

    if !header.subtitle.is_empty() {
        let subtitle = truncate(&header.subtitle, cols);
        out.push_str(theme.dim());
        out.push_str(&theme.fg(&theme.colors.text_dim));
        out.push_str(&" ".repeat(center_offset(subtitle.chars().count(), cols)));
        out.push_str(&subtitle);
        out.push_str(theme.reset());
        out.push('\n');
    }
}
