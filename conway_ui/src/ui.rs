// ui.rs - Control panel and workspace rendering

use std::time::Instant;

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tracing::warn;

use conway::patterns::PATTERNS;
use conway::{CellSize, Coord, Speed, StopReason};

use crate::GameOfLife;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Space bar toggles play
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.message = None;
            if let Some(reason) = self.session.toggle_play(Instant::now()) {
                self.report_stop(reason);
            }
        }

        // Auto-advance if running
        if let Some(reason) = self.session.tick(Instant::now()) {
            self.report_stop(reason);
        }

        egui::SidePanel::left("control_panel")
            .resizable(false)
            .min_width(240.0)
            .show(ctx, |ui| self.control_panel(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::from_gray(120)))
            .show(ctx, |ui| self.workspace(ui));

        if self.session.is_playing() {
            ctx.request_repaint_after(self.session.settings().speed.interval());
        }
    }
}

impl GameOfLife {
    fn report_stop(&mut self, reason: StopReason) {
        self.message = Some(format!("Paused: {reason}"));
    }

    fn control_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Game of Life");
        ui.label("Control panel");
        ui.separator();

        // Dashboard
        let engine = self.session.engine();
        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", engine.generation()));
            ui.separator();
            ui.label(format!("Live cells: {}", engine.live_cells().len()));
        });
        let size = engine.size();
        ui.label(format!("Grid: {} x {}", size.width, size.height));
        ui.separator();

        // Play / Pause / Clear
        ui.horizontal(|ui| {
            let playing = self.session.is_playing();
            if ui.selectable_label(playing, "▶ Play").clicked() && !playing {
                self.message = None;
                if let Some(reason) = self.session.play(Instant::now()) {
                    self.report_stop(reason);
                }
            }
            if ui.selectable_label(!playing, "⏸ Pause").clicked() {
                self.session.pause();
            }
            if ui.button("⟲ Clear").clicked() {
                self.message = None;
                self.session.clear();
            }
        });

        if let Some(message) = &self.message {
            ui.colored_label(Color32::from_rgb(220, 160, 0), message);
        }
        ui.separator();

        let playing = self.session.is_playing();

        // Speed control
        ui.label("Generation speed (gen/sec)");
        let mut speed = self.session.settings().speed.per_second();
        let slider = egui::Slider::new(&mut speed, Speed::MIN..=Speed::MAX).step_by(1.0);
        if ui.add_enabled(!playing, slider).changed() {
            self.apply_speed(speed);
        }

        // Cell size control
        ui.label("Cell size (px)");
        let mut cell_px = self.session.settings().cell_size.pixels();
        let slider = egui::Slider::new(&mut cell_px, CellSize::MIN..=CellSize::MAX)
            .step_by(f64::from(CellSize::STEP));
        if ui.add_enabled(!playing, slider).changed() {
            self.apply_cell_size(cell_px);
        }
        ui.separator();

        // Pattern dropdown
        ui.horizontal(|ui| {
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
        });
        ui.horizontal(|ui| {
            if ui.button("Apply Pattern").clicked() {
                self.message = None;
                let pattern = &PATTERNS[self.selected_pattern];
                if let Err(err) = self.session.load_pattern(pattern) {
                    warn!(pattern = pattern.name, %err, "pattern does not fit");
                    self.message = Some(format!("{} does not fit: {err}", pattern.name));
                }
            }
            if ui.button("🎲 Random").clicked() {
                self.message = None;
                self.random_seed = self.random_seed.wrapping_add(1);
                if let Err(err) = self.session.randomize(self.random_seed) {
                    warn!(%err, "random fill failed");
                }
            }
        });
        ui.separator();

        // Show current colors
        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
        ui.separator();

        ui.label("Click a cell to toggle it. Play stops by itself when the population dies out or stops changing.");
    }

    fn apply_speed(&mut self, speed: u8) {
        match Speed::new(speed).map(|speed| self.session.set_speed(speed)) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(%err, "speed not changed"),
            Err(err) => warn!(%err, "speed not changed"),
        }
    }

    fn apply_cell_size(&mut self, pixels: u16) {
        match CellSize::new(pixels).map(|cell_size| self.session.set_cell_size(cell_size)) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(%err, "cell size not changed"),
            Err(err) => warn!(%err, "cell size not changed"),
        }
    }

    fn workspace(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        if let Err(err) = self.session.fit_viewport(available.x, available.y) {
            warn!(%err, "could not fit grid to window");
        }

        let (response, painter) = ui.allocate_painter(available, egui::Sense::click());

        let cell_px = f32::from(self.session.settings().cell_size.pixels());
        let grid = self.session.engine().grid();
        let size = grid.size();
        let total_size = Vec2::new(size.width as f32, size.height as f32) * cell_px;
        let start_pos = response.rect.center() - total_size / 2.0;

        // Fill background
        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

        let mut clicked = None;
        for y in 0..size.height {
            for x in 0..size.width {
                let pos = start_pos + Vec2::new(x as f32, y as f32) * cell_px;
                let rect = Rect::from_min_size(pos, Vec2::splat(cell_px - 1.0));

                // Choose color based on cell state
                let cell_color = if grid.is_alive(Coord::new(x, y)) {
                    self.live_color
                } else {
                    self.dead_color
                };
                painter.rect_filled(rect, 1.0, cell_color);
                painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));

                if response.clicked() {
                    if let Some(pointer) = response.interact_pointer_pos() {
                        if rect.contains(pointer) {
                            clicked = Some((x, y));
                        }
                    }
                }
            }
        }

        if let Some((x, y)) = clicked {
            if let Err(err) = self.session.toggle_cell(i64::from(x), i64::from(y)) {
                warn!(%err, "toggle ignored");
            }
        }
    }
}
