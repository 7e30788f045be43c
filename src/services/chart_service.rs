use std::path::Path;

use lazy_static::lazy_static;
use plotters::prelude::*;
use plotters::style::FontTransform;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::{ChartKind, PriceBar, PriceSeries, RenderedCharts};
use crate::utils::font;
use crate::utils::format_axis_price;

lazy_static! {
    // Chart files have fixed names shared by every request; one writer at a time.
    static ref CHART_WRITE_LOCK: Mutex<()> = Mutex::new(());
}

const UP_COLOR: RGBColor = RED;
const DOWN_COLOR: RGBColor = BLUE;
const LINE_COLOR: RGBColor = RGBColor(0, 128, 0);

const TWO_DAY_SIZE: (u32, u32) = (800, 500);
const WEEKLY_SIZE: (u32, u32) = (1000, 500);

/// Errors while drawing a chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Not enough price data to draw chart (need {needed}, have {actual})")]
    InsufficientData { needed: usize, actual: usize },
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

fn drawing_error<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Drawing(e.to_string())
}

/// Render both charts into `images_dir`, holding the write lock for the pass.
///
/// Drawing and PNG encoding run on the blocking pool.
pub async fn render_charts(series: &PriceSeries, label: &str, images_dir: &Path) -> RenderedCharts {
    let _guard = CHART_WRITE_LOCK.lock().await;

    let series = series.clone();
    let label = label.to_string();
    let images_dir = images_dir.to_path_buf();
    let family = font::chart_font();

    let task = tokio::task::spawn_blocking(move || RenderedCharts {
        two_day: render_two_day_chart(
            &series,
            &label,
            family,
            &images_dir.join(ChartKind::TwoDay.file_name()),
        ),
        weekly: render_weekly_line_chart(
            &series,
            &label,
            family,
            &images_dir.join(ChartKind::Weekly.file_name()),
        ),
    });

    match task.await {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!("Chart rendering task failed: {}", e);
            RenderedCharts::default()
        }
    }
}

/// Candle-style chart of the last two trading days. Returns whether the file was written.
///
/// With no `family` the chart is drawn without caption, axes or labels.
pub fn render_two_day_chart(
    series: &PriceSeries,
    label: &str,
    family: Option<&str>,
    path: &Path,
) -> bool {
    let result = draw_two_day_chart(series, label, family, path, &format_axis_price);
    report(ChartKind::TwoDay, label, path, result)
}

/// Closing price line over every bar in the series. Returns whether the file was written.
pub fn render_weekly_line_chart(
    series: &PriceSeries,
    label: &str,
    family: Option<&str>,
    path: &Path,
) -> bool {
    let result = draw_weekly_line_chart(series, label, family, path, &format_axis_price);
    report(ChartKind::Weekly, label, path, result)
}

fn report(kind: ChartKind, label: &str, path: &Path, result: Result<(), ChartError>) -> bool {
    match result {
        Ok(()) => {
            debug!("🎨 {:?} chart for {} written to {}", kind, label, path.display());
            true
        }
        Err(e @ ChartError::InsufficientData { .. }) => {
            info!("Skipping {:?} chart for {}: {}", kind, label, e);
            false
        }
        Err(e) => {
            warn!("{:?} chart for {} failed: {}", kind, label, e);
            false
        }
    }
}

/// Padded y range covering every value, floored at zero
fn price_range(values: impl Iterator<Item = i64>) -> (f64, f64) {
    let (min, max) = values.fold((i64::MAX, i64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let (min, max) = (min as f64, max as f64);

    let span = (max - min).max(max.abs() * 0.01).max(1.0);
    let padding = span * 0.1;
    ((min - padding).max(0.0), max + padding)
}

/// X positions run from -1 to `len`, one empty slot either side of the bars
fn x_range(len: usize) -> std::ops::Range<i32> {
    -1..len as i32
}

fn date_label(bars: &[PriceBar], index: i32) -> String {
    usize::try_from(index)
        .ok()
        .and_then(|i| bars.get(i))
        .map(|bar| bar.date.format("%m-%d").to_string())
        .unwrap_or_default()
}

type PriceFormatter<'a> = &'a dyn Fn(&f64) -> String;

fn draw_two_day_chart(
    series: &PriceSeries,
    label: &str,
    family: Option<&str>,
    path: &Path,
    y_formatter: PriceFormatter<'_>,
) -> Result<(), ChartError> {
    let bars = series.tail(2);
    if bars.len() < 2 {
        return Err(ChartError::InsufficientData {
            needed: 2,
            actual: bars.len(),
        });
    }

    let (y_min, y_max) = price_range(bars.iter().flat_map(|b| [b.open, b.high, b.low, b.close]));

    // Drawing area and backend are dropped at the end of this scope on every path.
    let root = BitMapBackend::new(path, TWO_DAY_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(drawing_error)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if let Some(family) = family {
        builder
            .caption(format!("{} 최근 2일 캔들 주가", label), (family, 28.0))
            .x_label_area_size(40)
            .y_label_area_size(90);
    }
    let mut chart = builder
        .build_cartesian_2d(x_range(bars.len()), y_min..y_max)
        .map_err(drawing_error)?;

    // Without a font there is nothing to label; the mesh pass is skipped entirely.
    if let Some(family) = family {
        let x_formatter = |v: &i32| date_label(bars, *v);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .light_line_style(WHITE)
            .bold_line_style(BLACK.mix(0.15))
            .x_labels(bars.len() + 2)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(y_formatter)
            .label_style((family, 14.0))
            .axis_desc_style((family, 16.0))
            .y_desc("가격 (원)")
            .draw()
            .map_err(drawing_error)?;
    }

    for (i, bar) in bars.iter().enumerate() {
        let x = i as i32;
        let color = if bar.close >= bar.open { UP_COLOR } else { DOWN_COLOR };

        // Body: open to close
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x, bar.open as f64), (x, bar.close as f64)],
                color.stroke_width(14),
            )))
            .map_err(drawing_error)?;
        // Wick: low to high
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x, bar.low as f64), (x, bar.high as f64)],
                color.stroke_width(2),
            )))
            .map_err(drawing_error)?;
    }

    root.present().map_err(drawing_error)?;
    Ok(())
}

fn draw_weekly_line_chart(
    series: &PriceSeries,
    label: &str,
    family: Option<&str>,
    path: &Path,
    y_formatter: PriceFormatter<'_>,
) -> Result<(), ChartError> {
    let bars = series.bars();
    if bars.is_empty() {
        return Err(ChartError::InsufficientData { needed: 1, actual: 0 });
    }

    let (y_min, y_max) = price_range(bars.iter().map(|b| b.close));

    let root = BitMapBackend::new(path, WEEKLY_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(drawing_error)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if let Some(family) = family {
        builder
            .caption(
                format!("{} 최근 {}거래일 종가 추이", label, bars.len()),
                (family, 28.0),
            )
            .x_label_area_size(60)
            .y_label_area_size(90);
    }
    let mut chart = builder
        .build_cartesian_2d(x_range(bars.len()), y_min..y_max)
        .map_err(drawing_error)?;

    if let Some(family) = family {
        let x_formatter = |v: &i32| date_label(bars, *v);
        chart
            .configure_mesh()
            .light_line_style(WHITE)
            .bold_line_style(BLACK.mix(0.15))
            .x_labels(bars.len() + 2)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(y_formatter)
            .x_label_style((family, 13.0).into_font().transform(FontTransform::Rotate90))
            .label_style((family, 14.0))
            .axis_desc_style((family, 16.0))
            .y_desc("종가 (원)")
            .draw()
            .map_err(drawing_error)?;
    }

    let points: Vec<(i32, f64)> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| (i as i32, bar.close as f64))
        .collect();

    chart
        .draw_series(LineSeries::new(points.clone(), LINE_COLOR.stroke_width(2)))
        .map_err(drawing_error)?;
    chart
        .draw_series(
            points
                .into_iter()
                .map(|point| Circle::new(point, 5, LINE_COLOR.filled())),
        )
        .map_err(drawing_error)?;

    root.present().map_err(drawing_error)?;
    Ok(())
}
