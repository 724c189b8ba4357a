//! Word wrapping for the two-line description preview.

/// Description lines shown per row.
pub const MAX_DESCRIPTION_LINES: usize = 2;

/// Link text drawn after a truncated description.
pub const READ_MORE: &str = " Read More";

/// Space kept free to the right of the link.
pub const READ_MORE_PADDING: f32 = 10.0;

/// Measures rendered text width in pixels.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> f32;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedText {
    pub lines: Vec<String>,
    /// Text was left over after the last line.
    pub truncated: bool,
    /// A "Read More" link follows the last line.
    pub read_more: bool,
}

/// Greedily wrap `text` to `max_width`, breaking at whitespace where
/// possible and always at newlines, keeping at most
/// [`MAX_DESCRIPTION_LINES`] lines.
///
/// When text is cut off and `has_link` is set, the last line is shortened
/// word by word until the link fits beside it.
pub fn wrap_description(
    text: &str,
    max_width: f32,
    has_link: bool,
    measure: &impl TextMeasure,
) -> WrappedText {
    let mut lines = Vec::new();
    let mut truncated = false;

    for paragraph in text.split('\n') {
        let mut rest = paragraph.trim();
        while !rest.is_empty() {
            if lines.len() == MAX_DESCRIPTION_LINES {
                truncated = true;
                break;
            }
            let (line, tail) = split_line(rest, max_width, measure);
            lines.push(line.to_string());
            rest = tail;
        }
        if truncated {
            break;
        }
    }

    let read_more = truncated && has_link;
    if read_more {
        let reserve = measure.text_width(READ_MORE) + READ_MORE_PADDING;
        if let Some(last) = lines.last_mut() {
            while !last.is_empty() && measure.text_width(last) + reserve > max_width {
                let keep = match last.rfind(char::is_whitespace) {
                    Some(pos) => last[..pos].trim_end().len(),
                    None => 0,
                };
                last.truncate(keep);
            }
        }
    }

    WrappedText {
        lines,
        truncated,
        read_more,
    }
}

/// Split off the first line of `text`. Returns the line and the remainder,
/// both without surrounding whitespace at the break.
fn split_line<'a>(text: &'a str, max_width: f32, measure: &impl TextMeasure) -> (&'a str, &'a str) {
    if measure.text_width(text) <= max_width {
        return (text, "");
    }

    let mut fit = 0;
    for (i, c) in text.char_indices() {
        let end = i + c.len_utf8();
        if measure.text_width(&text[..end]) > max_width {
            break;
        }
        fit = end;
    }
    // A single glyph wider than the line still has to go somewhere.
    if fit == 0 {
        fit = text.chars().next().map_or(0, char::len_utf8);
    }

    let break_at = if text[fit..].starts_with(char::is_whitespace) {
        Some(fit)
    } else {
        text[..fit].rfind(char::is_whitespace)
    };

    match break_at {
        Some(pos) if pos > 0 => (text[..pos].trim_end(), text[pos..].trim_start()),
        _ => (&text[..fit], text[fit..].trim_start()),
    }
}

/// Glyph-advance measurement against an egui font.
pub struct FontMeasure<'a> {
    ctx: &'a egui::Context,
    font: egui::FontId,
}

impl<'a> FontMeasure<'a> {
    pub fn new(ctx: &'a egui::Context, font: egui::FontId) -> Self {
        Self { ctx, font }
    }
}

impl TextMeasure for FontMeasure<'_> {
    fn text_width(&self, text: &str) -> f32 {
        self.ctx
            .fonts(|fonts| text.chars().map(|c| fonts.glyph_width(&self.font, c)).sum())
    }
}

#[cfg(test)]
#[path = "tests/wrap_tests.rs"]
mod tests;
