use eframe::egui::Color32;

pub struct Config;

impl Config {
    pub const MAX_FPS: f64 = 60.;

    pub const FRAME_MARGIN: f32 = 20.;
    pub const CONTROL_PANEL_WIDTH: f32 = 320.;
    pub const TEXT_SIZE: f32 = 16.;
    pub const TEXT_COLOR: Color32 = Color32::BLACK;
    pub const ERROR_COLOR: Color32 = Color32::DARK_RED;
    pub const BUTTON_STROKE_WIDTH: f32 = 3.;
    pub const BUTTON_STROKE_COLOR: Color32 = Color32::DARK_GRAY;
    pub const BUTTON_FILL_COLOR: Color32 = Color32::LIGHT_GRAY;

    pub const BACKGROUND_COLOR: Color32 = Color32::from_rgb(0xfa, 0xfa, 0xfa);
    pub const ALIVE_COLOR: Color32 = Color32::BLACK;
    pub const DEAD_COLOR: Color32 = Color32::WHITE;
    pub const GRID_LINE_COLOR: Color32 = Color32::from_rgb(0xe5, 0xe5, 0xe5);
    pub const GRID_LINE_WIDTH: f32 = 1.;
    /// Grid lines are skipped when cells get smaller than this many pixels.
    pub const MIN_CELL_PX_FOR_LINES: f32 = 4.;

    pub const WIDGET_GAP: f32 = 20.;
    pub const SIM_FPS_RANGE: std::ops::RangeInclusive<f64> = 1.0..=120.0;
}
