use super::{Config, FieldLayout, FpsLimiter};
use crate::{LifeError, LoadOutcome, Session};
use eframe::egui::{CentralPanel, Context, Frame, Key, Margin, Pos2};
use egui_file::FileDialog;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{debug, info};

pub struct App {
    pub(super) session: Session,               // Owner of the current grid.
    pub(super) layout: Option<FieldLayout>,     // Part of the window displaying the grid.
    pub(super) fps_limiter: FpsLimiter,         // Limits the frame rate of the window.
    pub(super) file_dialog: Option<FileDialog>, // Open "Load image" dialog, if any.
    pub(super) last_opened: Option<PathBuf>,    // Starting point for the next dialog.
    pub(super) message: Option<String>,         // Last error shown to the user.
    pub(super) clicked_at: Option<Pos2>,        // Unhandled click on the field.

    pub(super) sim_fps: f64,
    pub(super) threshold: u8,
}

impl App {
    pub fn new(session: Session) -> Self {
        let config = session.config().clone();
        Self {
            session,
            layout: None,
            fps_limiter: FpsLimiter::default(),
            file_dialog: None,
            last_opened: None,
            message: None,
            clicked_at: None,
            sim_fps: config.fps,
            threshold: config.brightness_threshold,
        }
    }

    pub(super) fn report(&mut self, err: LifeError) {
        self.message = Some(err.to_string());
    }

    pub(super) fn toggle_running(&mut self) {
        if self.session.is_running() {
            self.session.stop();
        } else {
            self.session.start(Instant::now());
        }
    }

    pub(super) fn open_file_dialog(&mut self) {
        let mut dialog = FileDialog::open_file(self.last_opened.clone());
        dialog.open();
        self.file_dialog = Some(dialog);
    }

    pub(super) fn load_file(&mut self, path: PathBuf) {
        info!(path = %path.display(), "loading image");
        self.message = None;
        self.last_opened = Some(path.clone());
        self.session.load_image_file(path);
    }

    fn update_file_dialog(&mut self, ctx: &Context) {
        let mut selected = None;
        if let Some(dialog) = &mut self.file_dialog {
            if dialog.show(ctx).selected() {
                selected = dialog.path().map(|p| p.to_path_buf());
            }
        }
        if let Some(path) = selected {
            self.file_dialog = None;
            self.load_file(path);
        }
    }

    fn handle_input(&mut self, ctx: &Context) {
        let (dropped, step, run) = ctx.input(|input| {
            (
                input.raw.dropped_files.clone(),
                input.key_pressed(Key::Space),
                input.key_pressed(Key::E) && !input.modifiers.ctrl,
            )
        });

        if let (Some(pos), Some(layout)) = (self.clicked_at.take(), self.layout) {
            let cell = layout.cell_at(pos);
            match self.session.toggle(cell.row, cell.col) {
                Ok(()) => {}
                Err(LifeError::SimulationRunning) => {
                    debug!(row = cell.row, col = cell.col, "click ignored while running");
                }
                Err(err) => self.report(err),
            }
        }

        for file in dropped {
            if let Some(path) = file.path {
                self.load_file(path);
            } else if let Some(bytes) = file.bytes {
                info!(name = %file.name, "loading dropped image");
                self.message = None;
                self.session.load_image_bytes(bytes.to_vec());
            }
        }

        if step {
            if let Err(err) = self.session.step_once() {
                debug!(error = %err, "step ignored");
            }
        }
        if run {
            self.toggle_running();
        }
    }

    fn update_session(&mut self) {
        for outcome in self.session.poll_loads() {
            if let LoadOutcome::Failed(_, err) = outcome {
                self.report(err);
            }
        }
        self.session.tick(Instant::now());
    }

    /// Wake up for the next generation, or keep polling while a load is in flight.
    fn schedule_repaint(&self, ctx: &Context) {
        if self.session.has_pending_loads() {
            ctx.request_repaint_after(Duration::from_secs_f64(1. / Config::MAX_FPS));
        }
        if let Some(wait) = self.session.clock().time_until_next(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        // full-window panel
        CentralPanel::default()
            .frame(
                Frame::default()
                    .inner_margin(Margin::same(Config::FRAME_MARGIN))
                    .fill(Config::BACKGROUND_COLOR),
            )
            .show(ctx, |ui| {
                self.draw(ui);
            });

        self.update_file_dialog(ctx);
        self.handle_input(ctx);
        self.update_session();
        self.schedule_repaint(ctx);

        self.fps_limiter.sleep(Config::MAX_FPS);
    }
}
