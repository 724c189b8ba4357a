use std::path::Path;
use std::time::Duration;

use romshelf_lib::Spawner;
use romshelf_scraper::Catalog;

use crate::cache::{EguiTextureLoader, ImageCache};
use crate::library::Library;
use crate::state::{Flow, ListInput, Shelf};
use crate::widgets::{self, BACKGROUND, TEXT, game_row};

pub const APP_NAME: &str = "NES Game Launcher";

/// About 60 frames per second.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size(WINDOW_SIZE),
        ..Default::default()
    }
}

/// Main window: the scrollable game list.
pub struct ShelfApp<C: Catalog, S: Spawner> {
    shelf: Shelf<S>,
    library: Library<C>,
    images: ImageCache<EguiTextureLoader>,
    /// Keyboard moved the cursor; bring it into view on the next draw.
    scroll_to_cursor: bool,
}

impl<C: Catalog, S: Spawner> ShelfApp<C, S> {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        shelf: Shelf<S>,
        library: Library<C>,
        assets_dir: &Path,
    ) -> Self {
        apply_style(&cc.egui_ctx);
        Self {
            shelf,
            library,
            images: ImageCache::new(EguiTextureLoader::new(cc.egui_ctx.clone()), assets_dir),
            scroll_to_cursor: false,
        }
    }

    /// Scan the games directory again and re-resolve everything.
    fn rescan(&mut self) {
        log::info!("Rescanning {}", self.library.games_dir().display());
        match self.library.load() {
            Ok(entries) => {
                self.shelf.replace_games(entries);
                self.images.forget_failures();
            }
            Err(e) => self.shelf.show_error(e.to_string()),
        }
    }

    fn show_list(&mut self, ui: &mut egui::Ui, inputs: &mut Vec<ListInput>) {
        let list = self.shelf.list();
        let cursor = list.cursor();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.y = game_row::ROW_SPACING;
                for (index, game) in list.entries().iter().enumerate() {
                    let cover = game
                        .image_path
                        .as_deref()
                        .and_then(|path| self.images.get_or_load(path));
                    let row = game_row::show(ui, game, index == cursor, cover.as_ref());

                    if row.read_more_clicked {
                        inputs.push(ListInput::OpenLink(index));
                    } else if row.response.double_clicked() {
                        inputs.push(ListInput::Click(index));
                        inputs.push(ListInput::Confirm);
                    } else if row.response.clicked() {
                        inputs.push(ListInput::Click(index));
                    }

                    if index == cursor && self.scroll_to_cursor {
                        row.response.scroll_to_me(None);
                        self.scroll_to_cursor = false;
                    }
                }
            });
    }
}

impl<C: Catalog, S: Spawner> eframe::App for ShelfApp<C, S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.shelf.reap_children();

        let mut inputs = keyboard_inputs(ctx);
        if inputs
            .iter()
            .any(|input| matches!(input, ListInput::Up | ListInput::Down))
        {
            self.scroll_to_cursor = true;
        }

        if self.shelf.error().is_none() && ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.rescan();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND).inner_margin(10.0))
            .show(ctx, |ui| {
                if self.shelf.list().is_empty() {
                    ui.colored_label(TEXT, "No games to show");
                } else {
                    self.show_list(ui, &mut inputs);
                }
            });

        if let Some(message) = self.shelf.error().map(str::to_owned) {
            if widgets::error_dialog::show(ctx, &message) {
                self.shelf.acknowledge_error();
            }
        }

        for input in inputs {
            if let Some(effect) = self.shelf.handle(input) {
                self.shelf.apply(effect);
            }
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.shelf.close();
        }

        if self.shelf.settle() == Flow::Exit {
            log::info!("Exiting");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        ctx.request_repaint_after(FRAME_INTERVAL);
    }
}

impl<C: Catalog, S: Spawner> Drop for ShelfApp<C, S> {
    fn drop(&mut self) {
        self.images.clear();
    }
}

/// Shows a fatal error until Escape is pressed or the window is closed.
pub struct FatalErrorApp {
    message: String,
}

impl FatalErrorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, message: impl Into<String>) -> Self {
        apply_style(&cc.egui_ctx);
        Self {
            message: message.into(),
        }
    }
}

impl eframe::App for FatalErrorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND).inner_margin(10.0))
            .show(ctx, |ui| widgets::error_dialog::show_fatal(ui, &self.message));

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        ctx.request_repaint_after(FRAME_INTERVAL);
    }
}

fn keyboard_inputs(ctx: &egui::Context) -> Vec<ListInput> {
    ctx.input(|i| {
        let mut inputs = Vec::new();
        if i.key_pressed(egui::Key::ArrowUp) {
            inputs.push(ListInput::Up);
        }
        if i.key_pressed(egui::Key::ArrowDown) {
            inputs.push(ListInput::Down);
        }
        if i.key_pressed(egui::Key::Enter) {
            inputs.push(ListInput::Confirm);
        }
        if i.key_pressed(egui::Key::Escape) {
            inputs.push(ListInput::Cancel);
        }
        inputs
    })
}

fn apply_style(ctx: &egui::Context) {
    ctx.style_mut(|style| {
        style.visuals.panel_fill = BACKGROUND;
        style.visuals.window_fill = BACKGROUND;
        style.visuals.override_text_color = Some(TEXT);
        style.text_styles.insert(egui::TextStyle::Body, widgets::body_font());
        style.text_styles.insert(egui::TextStyle::Button, widgets::body_font());
    });
}
