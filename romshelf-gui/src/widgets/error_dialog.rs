use egui::{Align2, RichText};

use super::{ERROR, TEXT};

/// Centered message box over the list. Returns true when dismissed with
/// the OK button; Enter and Escape are routed through the list input.
pub fn show(ctx: &egui::Context, message: &str) -> bool {
    let mut dismissed = false;
    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new(format!("Error: {message}")).color(ERROR));
            ui.add_space(8.0);
            ui.label(RichText::new("Press Enter or Esc to continue").color(TEXT));
            ui.add_space(4.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}

/// Full-window message shown when the launcher cannot start at all.
pub fn show_fatal(ui: &mut egui::Ui, message: &str) {
    ui.add_space(20.0);
    ui.label(RichText::new(format!("Error: {message}")).color(ERROR));
    ui.add_space(4.0);
    ui.label(RichText::new("Press ESC to exit").color(TEXT));
}
