pub mod error_dialog;
pub mod game_row;

use egui::Color32;

pub const BACKGROUND: Color32 = Color32::from_rgb(32, 32, 32);
pub const TEXT: Color32 = Color32::from_rgb(200, 200, 200);
pub const SELECTED: Color32 = Color32::BLACK;
pub const ERROR: Color32 = Color32::from_rgb(255, 0, 0);
pub const LINK: Color32 = Color32::from_rgb(0, 120, 215);

/// Font used for every line of text.
pub fn body_font() -> egui::FontId {
    egui::FontId::proportional(18.0)
}
