use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub output_dir: PathBuf,
    pub plot: PlotConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            plot: PlotConfig::default(),
        }
    }
}

/// Canvas geometry and colours used by the bitmap renderer. Sizes are in pixels.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    /// Room for tick labels and axis descriptions on each axis.
    pub label_area: u32,
    /// Caption font size.
    pub title_size: f64,
    pub point_radius: u32,
    pub draw_fit: bool,
    pub background: [u8; 3],
    pub point_color: [u8; 3],
    pub fit_color: [u8; 3],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            // 5in x 5in at 96 dpi
            width: 480,
            height: 480,
            margin: 10,
            label_area: 40,
            title_size: 22.0,
            point_radius: 4,
            draw_fit: true,
            background: [255, 255, 255],
            point_color: [31, 119, 180],
            fit_color: [214, 39, 40],
        }
    }
}
