use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::axis_label_format::validate_date_pattern;

/// Reserved pixel margins inside the main surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 0.0,
            right: 0.0,
            top: 50.0,
            bottom: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartSection {
    #[serde(default)]
    pub padding: Padding,
    /// Fill under pointer-selection markers.
    #[serde(default = "default_fill")]
    pub fill: Color,
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            padding: Padding::default(),
            fill: default_fill(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YAxisLabels {
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YAxisConfig {
    /// Number of gridline intervals; `ticks + 1` gridlines are drawn.
    pub ticks: u32,
    pub labels: YAxisLabels,
    /// Gridline color, also used for the pointer guide line.
    pub stroke: Color,
}

impl Default for YAxisConfig {
    fn default() -> Self {
        Self {
            ticks: 5,
            labels: YAxisLabels {
                color: Color::rgb(154.0 / 255.0, 166.0 / 255.0, 173.0 / 255.0),
            },
            stroke: Color::rgb(221.0 / 255.0, 221.0 / 255.0, 221.0 / 255.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XAxisLabels {
    /// `chrono` strftime pattern applied to UTC millisecond timestamps.
    pub format: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XAxisConfig {
    /// Label slots across the window; `ticks - 1` labels are drawn.
    pub ticks: u32,
    pub labels: XAxisLabels,
}

impl Default for XAxisConfig {
    fn default() -> Self {
        Self {
            ticks: 6,
            labels: XAxisLabels {
                format: "%b %-d".to_owned(),
                color: Color::rgb(166.0 / 255.0, 176.0 / 255.0, 183.0 / 255.0),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSection {
    #[serde(default)]
    pub x: XAxisConfig,
    #[serde(default)]
    pub y: YAxisConfig,
}

/// Full chart configuration with every leaf resolved.
///
/// Serializable so hosts can persist the effective setup; partial updates go
/// through [`ChartConfigPatch`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub chart: ChartSection,
    #[serde(default)]
    pub axis: AxisSection,
}

impl ChartConfig {
    pub fn validate(&self) -> ChartResult<()> {
        let padding = self.chart.padding;
        if ![padding.left, padding.right, padding.top, padding.bottom]
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
        {
            return Err(ChartError::InvalidConfig(
                "chart.padding values must be finite and >= 0".to_owned(),
            ));
        }
        if self.axis.y.ticks == 0 {
            return Err(ChartError::InvalidConfig(
                "axis.y.ticks must be >= 1".to_owned(),
            ));
        }
        if self.axis.x.ticks == 0 {
            return Err(ChartError::InvalidConfig(
                "axis.x.ticks must be >= 1".to_owned(),
            ));
        }
        if self.axis.x.labels.format.trim().is_empty() {
            return Err(ChartError::InvalidConfig(
                "axis.x.labels.format must not be empty".to_owned(),
            ));
        }
        validate_date_pattern(&self.axis.x.labels.format)?;
        self.chart.fill.validate()?;
        self.axis.y.labels.color.validate()?;
        self.axis.y.stroke.validate()?;
        self.axis.x.labels.color.validate()
    }

    /// Returns a copy with every leaf present in `patch` overridden.
    #[must_use]
    pub fn merged(&self, patch: &ChartConfigPatch) -> Self {
        let mut next = self.clone();
        next.merge(patch);
        next
    }

    /// Deep merge: present leaves override, absent leaves keep their value.
    pub fn merge(&mut self, patch: &ChartConfigPatch) {
        if let Some(chart) = &patch.chart {
            if let Some(padding) = &chart.padding {
                let target = &mut self.chart.padding;
                merge_leaf(&mut target.left, padding.left);
                merge_leaf(&mut target.right, padding.right);
                merge_leaf(&mut target.top, padding.top);
                merge_leaf(&mut target.bottom, padding.bottom);
            }
            merge_leaf(&mut self.chart.fill, chart.fill);
        }
        if let Some(axis) = &patch.axis {
            if let Some(y) = &axis.y {
                merge_leaf(&mut self.axis.y.ticks, y.ticks);
                merge_leaf(&mut self.axis.y.stroke, y.stroke);
                if let Some(labels) = &y.labels {
                    merge_leaf(&mut self.axis.y.labels.color, labels.color);
                }
            }
            if let Some(x) = &axis.x {
                merge_leaf(&mut self.axis.x.ticks, x.ticks);
                if let Some(labels) = &x.labels {
                    if let Some(format) = &labels.format {
                        self.axis.x.labels.format.clone_from(format);
                    }
                    merge_leaf(&mut self.axis.x.labels.color, labels.color);
                }
            }
        }
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes a full config; missing sections take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn merge_leaf<T: Copy>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn default_fill() -> Color {
    Color::rgb(1.0, 1.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaddingPatch {
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
    #[serde(default)]
    pub top: Option<f64>,
    #[serde(default)]
    pub bottom: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSectionPatch {
    #[serde(default)]
    pub padding: Option<PaddingPatch>,
    #[serde(default)]
    pub fill: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YAxisLabelsPatch {
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct YAxisPatch {
    #[serde(default)]
    pub ticks: Option<u32>,
    #[serde(default)]
    pub labels: Option<YAxisLabelsPatch>,
    #[serde(default)]
    pub stroke: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct XAxisLabelsPatch {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct XAxisPatch {
    #[serde(default)]
    pub ticks: Option<u32>,
    #[serde(default)]
    pub labels: Option<XAxisLabelsPatch>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSectionPatch {
    #[serde(default)]
    pub x: Option<XAxisPatch>,
    #[serde(default)]
    pub y: Option<YAxisPatch>,
}

/// Partial configuration mirroring [`ChartConfig`] with every leaf optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartConfigPatch {
    #[serde(default)]
    pub chart: Option<ChartSectionPatch>,
    #[serde(default)]
    pub axis: Option<AxisSectionPatch>,
}

impl ChartConfigPatch {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config patch: {e}")))
    }

    /// Light palette; also the defaults of a fresh config.
    #[must_use]
    pub fn day_theme() -> Self {
        Self::palette("#fff", "#9aa6ad", "#ddd", "#a6b0b7")
    }

    #[must_use]
    pub fn night_theme() -> Self {
        Self::palette("#242f3e", "#516374", "#343f4e", "#516374")
    }

    fn palette(fill: &str, y_labels: &str, y_stroke: &str, x_labels: &str) -> Self {
        let color = |hex: &str| Color::from_hex(hex).ok();
        Self {
            chart: Some(ChartSectionPatch {
                padding: None,
                fill: color(fill),
            }),
            axis: Some(AxisSectionPatch {
                x: Some(XAxisPatch {
                    ticks: None,
                    labels: Some(XAxisLabelsPatch {
                        format: None,
                        color: color(x_labels),
                    }),
                }),
                y: Some(YAxisPatch {
                    ticks: None,
                    labels: Some(YAxisLabelsPatch {
                        color: color(y_labels),
                    }),
                    stroke: color(y_stroke),
                }),
            }),
        }
    }
}
