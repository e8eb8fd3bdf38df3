// ============================================================================
// CHARTS - Inline SVG sparklines and CSS bar charts
// ============================================================================

use maud::{html, Markup};
use crate::utils::format::compact_number;

const PADDING: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Flat => "▬",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Up => "trend-up",
            Self::Down => "trend-down",
            Self::Flat => "trend-flat",
        }
    }
}

/// Direction from the first to the last sample.
pub fn trend(values: &[f64]) -> Trend {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) if values.len() > 1 => {
            if (last - first).abs() < f64::EPSILON {
                Trend::Flat
            } else if last > first {
                Trend::Up
            } else {
                Trend::Down
            }
        }
        _ => Trend::Flat,
    }
}

/// `x,y` pairs scaled into a `width` x `height` box with 1px padding.
pub fn sparkline_points(values: &[f64], width: u32, height: u32) -> Vec<(f64, f64)> {
    let (w, h) = (width as f64, height as f64);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let inner_w = (w - 2.0 * PADDING).max(0.0);
    let inner_h = (h - 2.0 * PADDING).max(0.0);
    let step = if finite.len() > 1 {
        inner_w / (finite.len() - 1) as f64
    } else {
        0.0
    };

    finite
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if finite.len() > 1 { PADDING + step * i as f64 } else { w / 2.0 };
            let y = if (max - min).abs() < f64::EPSILON {
                h / 2.0
            } else {
                PADDING + (max - v) / (max - min) * inner_h
            };
            (x, y)
        })
        .collect()
}

pub fn sparkline(values: &[f64], width: u32, height: u32) -> Markup {
    let points = sparkline_points(values, width, height)
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ");
    let view_box = format!("0 0 {} {}", width, height);
    let class = format!("sparkline {}", trend(values).css_class());

    html! {
        svg class=(class) width=(width) height=(height) viewBox=(view_box) xmlns="http://www.w3.org/2000/svg" {
            @if !points.is_empty() {
                polyline fill="none" stroke="currentColor" stroke-width="1.5" points=(points) {}
            }
        }
    }
}

/// Horizontal bars, each scaled against the largest value.
pub fn bar_chart(pairs: &[(String, f64)]) -> Markup {
    let max = pairs.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    html! {
        div.bar-chart {
            @for (label, value) in pairs {
                @let percent = if max > 0.0 { (value.max(0.0) / max * 100.0).min(100.0) } else { 0.0 };
                div.bar-row {
                    span.bar-label { (label) }
                    div.bar-track {
                        div.bar-fill style=(format!("width: {:.1}%", percent)) {}
                    }
                    span.bar-value { (compact_number(*value)) }
                }
            }
        }
    }
}
