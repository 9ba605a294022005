//! Footer line with the list summary.

use crate::ui::helpers::center_offset;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render_footer(out: &mut String, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let text_len = footer.summary.chars().count();

    out.push_str(&theme.fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(center_offset(text_len, cols)));
    out.push_str(&footer.summary);
    out.push_str(theme.reset());
    out.push('\n');
}
