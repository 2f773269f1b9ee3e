//! Weight tracking tools
//!
//! Weigh-in logging, the weight history series and its PNG line chart.

use std::path::Path;

use serde::Serialize;

use super::days::resolve_date;
use crate::error::{NutritionError, NutritionResult};
use crate::log::{weight_series, Session, WeightPoint};
use crate::models::WeightLogEntry;
use crate::nutrition::to_kg;

/// Largest chart edge we are willing to allocate a buffer for
const MAX_CHART_EDGE: u32 = 4096;

// ============================================================================
// Response Types
// ============================================================================

/// Response for log_weight
#[derive(Debug, Serialize)]
pub struct LogWeightResponse {
    pub entry: WeightLogEntry,
    pub change_since_previous_kg: Option<f64>,
    pub series_length: usize,
}

/// Response for get_weight_history
#[derive(Debug, Serialize)]
pub struct WeightHistoryResponse {
    pub points: Vec<WeightPoint>,
    pub count: usize,
    pub first_kg: Option<f64>,
    pub latest_kg: Option<f64>,
    pub total_change_kg: Option<f64>,
}

/// Response for render_weight_chart
#[derive(Debug, Serialize)]
pub struct RenderChartResponse {
    pub success: bool,
    pub file_path: String,
    pub points: usize,
    pub bytes: usize,
}

// ============================================================================
// Tool Functions
// ============================================================================

pub fn log_weight(
    session: &mut Session,
    weight: f64,
    unit: Option<&str>,
    date: Option<&str>,
) -> NutritionResult<LogWeightResponse> {
    let date = resolve_date(date)?;
    let weight_kg = to_kg(weight, unit.unwrap_or("kg"))?;
    let entry = WeightLogEntry::new(date, weight_kg)?;

    let previous = session.weights().last().map(|w| w.weight_kg);
    session.append_weight(entry.clone());
    tracing::info!("Logged weight {:.1} kg on {}", entry.weight_kg, date);

    Ok(LogWeightResponse {
        change_since_previous_kg: previous.map(|p| entry.weight_kg - p),
        series_length: session.weights().len(),
        entry,
    })
}

pub fn get_weight_history(session: &Session) -> WeightHistoryResponse {
    let points = weight_series(session.weights().entries());
    let first_kg = points.first().map(|p| p.weight_kg);
    let latest_kg = points.last().map(|p| p.weight_kg);

    WeightHistoryResponse {
        count: points.len(),
        total_change_kg: first_kg.zip(latest_kg).map(|(first, latest)| latest - first),
        first_kg,
        latest_kg,
        points,
    }
}

/// Render the weight chart and write it to `output_path`
pub fn render_weight_chart(
    session: &Session,
    output_path: &Path,
    width: u32,
    height: u32,
) -> NutritionResult<RenderChartResponse> {
    let points = weight_series(session.weights().entries());
    let png = generate_weight_chart(&points, width, height)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(chart_err)?;
    }
    std::fs::write(output_path, &png).map_err(chart_err)?;
    tracing::info!("Wrote weight chart with {} points to {}", points.len(), output_path.display());

    Ok(RenderChartResponse {
        success: true,
        file_path: output_path.display().to_string(),
        points: points.len(),
        bytes: png.len(),
    })
}

// ============================================================================
// Chart Generation (plotters)
// ============================================================================

fn chart_err<E: std::fmt::Display>(e: E) -> NutritionError {
    NutritionError::Chart(e.to_string())
}

/// Generate the weight-over-time line chart as PNG bytes
///
/// Points are plotted in insertion order, one x step per weigh-in.
pub fn generate_weight_chart(points: &[WeightPoint], width: u32, height: u32) -> NutritionResult<Vec<u8>> {
    use plotters::prelude::*;
    use plotters_bitmap::BitMapBackend;

    if points.is_empty() {
        return Err(NutritionError::Chart("No weight entries to chart".to_string()));
    }
    if width == 0 || height == 0 || width > MAX_CHART_EDGE || height > MAX_CHART_EDGE {
        return Err(NutritionError::InvalidInput(format!(
            "Chart size must be between 1 and {} pixels per edge, got {}x{}",
            MAX_CHART_EDGE, width, height
        )));
    }

    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let (lowest, highest) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.weight_kg), hi.max(p.weight_kg))
        });
        let y_min = (lowest - 1.0).max(0.0);
        let y_max = highest + 1.0;
        let x_max = (points.len() as i32 - 1).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption("Weight History", ("sans-serif", 20))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..x_max, y_min..y_max)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .x_labels(points.len().min(10))
            .x_label_formatter(&|x| {
                usize::try_from(*x)
                    .ok()
                    .and_then(|i| points.get(i))
                    .map(|p| p.date.format("%m/%d").to_string())
                    .unwrap_or_default()
            })
            .y_desc("kg")
            .draw()
            .map_err(chart_err)?;

        let series: Vec<(i32, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as i32, p.weight_kg))
            .collect();

        chart
            .draw_series(LineSeries::new(series.clone(), RGBColor(0, 112, 192).stroke_width(2)))
            .map_err(chart_err)?;

        chart
            .draw_series(series.iter().map(|(x, y)| Circle::new((*x, *y), 4, RGBColor(0, 112, 192).filled())))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    let img = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| NutritionError::Chart("Failed to create image from buffer".to_string()))?;

    let mut png_bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), image::ImageFormat::Png)
        .map_err(chart_err)?;

    Ok(png_bytes)
}
