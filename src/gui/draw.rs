use super::{App, Config, FieldLayout};
use crate::{Cell, Resampling};
use eframe::egui::{Button, RichText, Sense, Slider, Stroke, Ui, Vec2};

impl App {
    fn new_text(text: &str) -> RichText {
        RichText::new(text)
            .color(Config::TEXT_COLOR)
            .size(Config::TEXT_SIZE)
    }

    fn new_button(text: &str) -> Button {
        Button::new(Self::new_text(text))
            .fill(Config::BUTTON_FILL_COLOR)
            .stroke(Stroke::new(
                Config::BUTTON_STROKE_WIDTH,
                Config::BUTTON_STROKE_COLOR,
            ))
    }

    fn draw_simulation_controls(&mut self, ui: &mut Ui) {
        let text = if self.session.is_running() {
            "Stop"
        } else {
            "Start"
        };
        if ui.add(Self::new_button(text)).clicked() {
            self.toggle_running();
        }

        let stopped = !self.session.is_running();
        if ui
            .add_enabled(stopped, Self::new_button("Next step"))
            .clicked()
        {
            if let Err(err) = self.session.step_once() {
                self.report(err);
            }
        }

        ui.horizontal(|ui| {
            ui.label(Self::new_text("Generations/s: "));
            ui.add(Slider::new(&mut self.sim_fps, Config::SIM_FPS_RANGE).logarithmic(true));
        });
        if self.sim_fps != self.session.config().fps {
            if let Err(err) = self.session.set_fps(self.sim_fps) {
                self.report(err);
            }
        }

        ui.horizontal(|ui| {
            if ui.add(Self::new_button("Clear")).clicked() {
                self.message = None;
                self.session.clear();
            }
            if ui.add(Self::new_button("Randomize")).clicked() {
                self.message = None;
                if let Err(err) = self.session.randomize() {
                    self.report(err);
                }
            }
        });
    }

    fn draw_image_controls(&mut self, ui: &mut Ui) {
        if ui.add(Self::new_button("Load image")).clicked() {
            self.open_file_dialog();
        }
        ui.label(Self::new_text("or drop an image onto the window"));

        ui.horizontal(|ui| {
            ui.label(Self::new_text("Threshold: "));
            ui.add(Slider::new(&mut self.threshold, 1..=255));
        });
        if self.threshold != self.session.config().brightness_threshold {
            if let Err(err) = self.session.set_threshold(self.threshold) {
                self.report(err);
            }
        }

        let mut resampling = self.session.config().resampling;
        ui.horizontal(|ui| {
            ui.label(Self::new_text("Resampling: "));
            ui.radio_value(
                &mut resampling,
                Resampling::Smooth,
                Self::new_text("Smooth"),
            );
            ui.radio_value(
                &mut resampling,
                Resampling::Nearest,
                Self::new_text("Nearest"),
            );
        });
        if resampling != self.session.config().resampling {
            self.session.set_resampling(resampling);
        }

        if self.session.has_pending_loads() {
            ui.label(Self::new_text("Loading..."));
        }
    }

    fn draw_stats(&mut self, ui: &mut Ui) {
        let grid = self.session.grid();
        ui.label(Self::new_text(&format!(
            "Generation: {}\nPopulation: {}\nGrid: {}x{}\nFPS: {:3}",
            self.session.generation(),
            grid.population(),
            grid.size(),
            grid.size(),
            self.fps_limiter.fps().round() as u32
        )));

        if let Some(message) = &self.message {
            ui.label(
                RichText::new(message)
                    .color(Config::ERROR_COLOR)
                    .size(Config::TEXT_SIZE),
            );
        }
    }

    fn draw_controls(&mut self, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.set_width(Config::CONTROL_PANEL_WIDTH);

            ui.group(|ui| {
                ui.vertical(|ui| {
                    self.draw_simulation_controls(ui);
                });
            });

            ui.add_space(Config::WIDGET_GAP);

            ui.group(|ui| {
                ui.vertical(|ui| {
                    self.draw_image_controls(ui);
                });
            });

            ui.add_space(Config::WIDGET_GAP);

            self.draw_stats(ui);
        });
    }

    fn draw_field(&mut self, ui: &mut Ui, size_px: f32) {
        let (response, painter) = ui.allocate_painter(Vec2::splat(size_px), Sense::click());
        let grid = self.session.grid();
        let layout = FieldLayout::new(response.rect, grid.size());

        let with_lines = layout.cell_size().min_elem() >= Config::MIN_CELL_PX_FOR_LINES;
        let line = Stroke::new(Config::GRID_LINE_WIDTH, Config::GRID_LINE_COLOR);
        for row in 0..grid.size() {
            for col in 0..grid.size() {
                let rect = layout.cell_rect(Cell::new(row, col));
                let color = if grid.get_wrapped(row, col) {
                    Config::ALIVE_COLOR
                } else {
                    Config::DEAD_COLOR
                };
                painter.rect_filled(rect, 0., color);
                if with_lines {
                    painter.rect_stroke(rect, 0., line);
                }
            }
        }

        if response.clicked() {
            self.clicked_at = response.interact_pointer_pos();
        }
        self.layout = Some(layout);
    }

    pub fn draw(&mut self, ui: &mut Ui) {
        let area = ui.available_size();

        let size_px = area
            .y
            .min(area.x - Config::CONTROL_PANEL_WIDTH - Config::FRAME_MARGIN)
            .max(1.);
        ui.horizontal(|ui| {
            self.draw_controls(ui);

            ui.add_space(Config::FRAME_MARGIN);

            self.draw_field(ui, size_px);
        });
    }
}
