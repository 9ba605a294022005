//! Detail page for one title.

use crate::ui::helpers::{center_offset, pad, push_rule};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailViewModel;

const LABEL_WIDTH: usize = 10;

pub fn render_detail(out: &mut String, detail: &DetailViewModel, theme: &Theme, cols: usize) {
    out.push_str(theme.bold());
    out.push_str(&theme.fg(&theme.colors.header_fg));
    out.push_str(&" ".repeat(center_offset(detail.title.chars().count(), cols)));
    out.push_str(&detail.title);
    out.push_str(theme.reset());
    out.push('\n');
    push_rule(out, theme, cols);

    for (label, value) in &detail.facts {
        out.push_str(&theme.fg(&theme.colors.text_dim));
        out.push_str(&pad(label, LABEL_WIDTH));
        out.push_str(&theme.fg(&theme.colors.text_normal));
        out.push_str(value);
        out.push_str(theme.reset());
        out.push('\n');
    }

    out.push('\n');
    for line in wrap(&detail.synopsis, cols.max(20)) {
        out.push_str(&line);
        out.push('\n');
    }
}

/// Greedy word wrap on character counts. Paragraph breaks are kept.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() { 0 } else { 1 } + word.chars().count();
            if !line.is_empty() && line.chars().count() + needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }
    lines
}
