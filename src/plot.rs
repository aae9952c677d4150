use std::{
    fmt::Display,
    fs::{self, File},
    io::BufWriter,
    ops::Range,
    path::Path,
};

use image::RgbImage;
use itertools::{Itertools, MinMaxResult};
use log::debug;
use plotters::prelude::*;
use thiserror::Error;

use crate::{config::PlotConfig, dataset::SampleSeries, lin_reg::Regression};

const PADDING: f64 = 0.05;
const FONT: &str = "sans-serif";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no points to plot")]
    EmptyData,
    #[error("size mismatch: {x_len} x values but {y_len} y values")]
    MismatchedLength { x_len: usize, y_len: usize },
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("drawing failed: {0}")]
    Drawing(String),
    #[error("could not write plot: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode png: {0}")]
    Encoding(#[from] png::EncodingError),
}

fn drawing_error(err: impl Display) -> RenderError {
    RenderError::Drawing(err.to_string())
}

/// Everything needed to draw one scatter plot.
#[derive(Debug, Clone)]
pub struct PlotRequest<'a> {
    pub title: String,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub xs: &'a [f64],
    pub ys: &'a [f64],
    pub fit: Option<Regression>,
}

impl<'a> PlotRequest<'a> {
    pub fn for_series(series: &'a SampleSeries, fit: Option<Regression>) -> Self {
        Self {
            title: series.title(),
            x_label: &series.x_label,
            y_label: &series.y_label,
            xs: &series.xs,
            ys: &series.ys,
            fit,
        }
    }
}

pub trait Renderer {
    fn render(&self, request: &PlotRequest<'_>, path: &Path) -> Result<(), RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, request: &PlotRequest<'_>, path: &Path) -> Result<(), RenderError> {
        (**self).render(request, path)
    }
}

fn padded(range: MinMaxResult<f64>) -> Option<Range<f64>> {
    let (lo, hi) = match range {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(v) => (v, v),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    let pad = if hi > lo { (hi - lo) * PADDING } else { 1.0 };
    Some(lo - pad..hi + pad)
}

/// Draws scatter plots with `plotters` and writes them as PNG.
///
/// The title, axis labels and fitted equation are drawn on the chart and also
/// stored in `tEXt` chunks (`Title`, `X Label`, `Y Label`, `Description`).
#[derive(Debug, Clone, Default)]
pub struct BitmapRenderer {
    config: PlotConfig,
}

impl BitmapRenderer {
    pub fn new(config: PlotConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn draw(&self, request: &PlotRequest<'_>) -> Result<RgbImage, RenderError> {
        let (xs, ys) = (request.xs, request.ys);
        if xs.len() != ys.len() {
            return Err(RenderError::MismatchedLength {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        if xs.iter().chain(ys).any(|v| !v.is_finite()) {
            return Err(RenderError::InvalidGeometry(
                "non-finite coordinate".to_string(),
            ));
        }
        let x_range = padded(xs.iter().copied().minmax()).ok_or(RenderError::EmptyData)?;
        let fit = request.fit.filter(|_| self.config.draw_fit);
        // the fitted line must stay inside the chart at both ends
        let fit_ends = fit
            .map(|fit| [fit.predict(x_range.start), fit.predict(x_range.end)])
            .unwrap_or_default();
        let y_values = ys.iter().copied().chain(fit.iter().flat_map(|_| fit_ends));
        let y_range = padded(y_values.minmax()).ok_or(RenderError::EmptyData)?;

        let config = &self.config;
        let (width, height) = (config.width, config.height);
        let reserved = 2 * config.margin + config.label_area;
        if width <= reserved || height <= reserved {
            return Err(RenderError::InvalidGeometry(format!(
                "{}x{} canvas leaves no plot area",
                width, height
            )));
        }

        let mut buf = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            let [r, g, b] = config.background;
            root.fill(&RGBColor(r, g, b)).map_err(drawing_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&request.title, (FONT, config.title_size).into_font())
                .margin(config.margin)
                .x_label_area_size(config.label_area)
                .y_label_area_size(config.label_area)
                .build_cartesian_2d(x_range.clone(), y_range)
                .map_err(drawing_error)?;

            chart
                .configure_mesh()
                .x_desc(request.x_label)
                .y_desc(request.y_label)
                .draw()
                .map_err(drawing_error)?;

            if let Some(fit) = fit {
                let [r, g, b] = config.fit_color;
                let fit_color = RGBColor(r, g, b);
                chart
                    .draw_series(LineSeries::new(
                        [(x_range.start, fit_ends[0]), (x_range.end, fit_ends[1])],
                        fit_color.stroke_width(2),
                    ))
                    .map_err(drawing_error)?
                    .label(fit.to_string())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], fit_color.stroke_width(2))
                    });
            }

            let [r, g, b] = config.point_color;
            let point_style = RGBColor(r, g, b).filled();
            chart
                .draw_series(
                    xs.iter()
                        .zip(ys)
                        .map(|(x, y)| Circle::new((*x, *y), config.point_radius, point_style)),
                )
                .map_err(drawing_error)?;

            if fit.is_some() {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperLeft)
                    .background_style(&WHITE.mix(0.8))
                    .border_style(&BLACK)
                    .draw()
                    .map_err(drawing_error)?;
            }

            root.present().map_err(drawing_error)?;
        }

        RgbImage::from_raw(width, height, buf)
            .ok_or_else(|| RenderError::InvalidGeometry("pixel buffer size".to_string()))
    }
}

impl Renderer for BitmapRenderer {
    fn render(&self, request: &PlotRequest<'_>, path: &Path) -> Result<(), RenderError> {
        let img = self.draw(request)?;
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        write_png(&img, request, path)?;
        debug!("wrote {}x{} plot to {:?}", img.width(), img.height(), path);
        Ok(())
    }
}

fn write_png(img: &RgbImage, request: &PlotRequest<'_>, path: &Path) -> Result<(), RenderError> {
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(file, img.width(), img.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    encoder.add_text_chunk("Title".to_string(), request.title.clone())?;
    encoder.add_text_chunk("X Label".to_string(), request.x_label.to_string())?;
    encoder.add_text_chunk("Y Label".to_string(), request.y_label.to_string())?;
    if let Some(fit) = request.fit {
        encoder.add_text_chunk("Description".to_string(), fit.to_string())?;
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(img.as_raw())?;
    writer.finish()?;
    Ok(())
}
