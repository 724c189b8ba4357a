use egui::{Align2, CursorIcon, Pos2, Rect, Sense, TextureHandle, Ui, pos2, vec2};
use romshelf_core::GameMetadata;

use super::{LINK, SELECTED, TEXT, body_font};
use crate::wrap::{FontMeasure, READ_MORE, wrap_description};

pub const ROW_HEIGHT: f32 = 140.0;
pub const ROW_SPACING: f32 = 20.0;
pub const COVER_SIZE: f32 = 100.0;
pub const LINE_HEIGHT: f32 = 25.0;
const MARGIN: f32 = 10.0;
const TEXT_INDENT: f32 = 20.0;
const TEXT_INDENT_WITH_COVER: f32 = 130.0;
const READ_MORE_GAP: f32 = 5.0;

/// What happened to one row this frame.
pub struct RowResponse {
    pub response: egui::Response,
    pub read_more_clicked: bool,
}

/// Draw one game entry: cover, title, `year | publisher | genre`, and a
/// two-line description preview with an optional "Read More" link.
pub fn show(
    ui: &mut Ui,
    game: &GameMetadata,
    selected: bool,
    cover: Option<&TextureHandle>,
) -> RowResponse {
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(vec2(width, ROW_HEIGHT), Sense::click());
    let mut read_more_clicked = false;

    if !ui.is_rect_visible(rect) {
        return RowResponse {
            response,
            read_more_clicked,
        };
    }

    let painter = ui.painter_at(rect);
    if selected {
        painter.rect_filled(rect.shrink2(vec2(MARGIN, 0.0)), 4.0, SELECTED);
    }

    let top = rect.top() + MARGIN;
    let mut text_x = rect.left() + TEXT_INDENT;
    if let Some(texture) = cover {
        let cover_rect = Rect::from_min_size(pos2(rect.left() + TEXT_INDENT, top), vec2(COVER_SIZE, COVER_SIZE));
        let uv = Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0));
        painter.image(texture.id(), cover_rect, uv, egui::Color32::WHITE);
        text_x = rect.left() + TEXT_INDENT_WITH_COVER;
    }

    let font = body_font();
    painter.text(pos2(text_x, top), Align2::LEFT_TOP, &game.title, font.clone(), TEXT);
    painter.text(
        pos2(text_x, top + LINE_HEIGHT),
        Align2::LEFT_TOP,
        game.summary_line(),
        font.clone(),
        TEXT,
    );

    let max_width = rect.right() - TEXT_INDENT - text_x;
    let measure = FontMeasure::new(ui.ctx(), font.clone());
    let wrapped = wrap_description(&game.description, max_width, game.has_catalog_entry(), &measure);

    let mut y = top + 2.0 * LINE_HEIGHT;
    let line_count = wrapped.lines.len();
    for (n, line) in wrapped.lines.iter().enumerate() {
        let line_rect = painter.text(pos2(text_x, y), Align2::LEFT_TOP, line, font.clone(), TEXT);

        if wrapped.read_more && n + 1 == line_count {
            let link_rect = painter.text(
                pos2(line_rect.right() + READ_MORE_GAP, y),
                Align2::LEFT_TOP,
                READ_MORE.trim_start(),
                font.clone(),
                LINK,
            );
            let link = ui
                .interact(link_rect, response.id.with("read_more"), Sense::click())
                .on_hover_cursor(CursorIcon::PointingHand);
            read_more_clicked = link.clicked();
        }
        y += LINE_HEIGHT;
    }

    RowResponse {
        response,
        read_more_clicked,
    }
}
