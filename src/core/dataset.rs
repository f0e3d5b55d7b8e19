use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

const X_ROLE: &str = "x";

/// One plotted series aligned index-for-index with the dataset x values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub id: String,
    pub name: String,
    pub color: Color,
    pub values: Vec<f64>,
}

impl Series {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: Color,
        values: Vec<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
            values,
        }
    }
}

/// Immutable chart input: strictly ascending x values plus aligned series.
///
/// Built once and shared read-only by the engine and its running transitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x_values: Vec<f64>,
    series: Vec<Series>,
}

impl Dataset {
    /// Validates shape and finiteness of pre-stripped columns.
    ///
    /// X values must be strictly ascending; that ordering is a caller
    /// precondition and only checked in debug builds.
    pub fn new(x_values: Vec<f64>, series: Vec<Series>) -> ChartResult<Self> {
        if x_values.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        if series.is_empty() {
            return Err(ChartError::NoSeries);
        }
        if let Some(index) = x_values.iter().position(|value| !value.is_finite()) {
            return Err(ChartError::NonNumericValue {
                id: X_ROLE.to_owned(),
                index,
            });
        }
        debug_assert!(
            x_values.windows(2).all(|pair| pair[0] < pair[1]),
            "x values must be strictly ascending"
        );

        for entry in &series {
            if entry.values.len() != x_values.len() {
                return Err(ChartError::ColumnLengthMismatch {
                    id: entry.id.clone(),
                    expected: x_values.len(),
                    actual: entry.values.len(),
                });
            }
            if let Some(index) = entry.values.iter().position(|value| !value.is_finite()) {
                return Err(ChartError::NonNumericValue {
                    id: entry.id.clone(),
                    index,
                });
            }
            entry.color.validate()?;
        }

        Ok(Self { x_values, series })
    }

    /// Normalizes the loader record into a dataset.
    pub fn from_raw(raw: RawDataset) -> ChartResult<Self> {
        let columns = raw.columns.into_keyed()?;

        let x_id = raw
            .types
            .iter()
            .find(|(_, role)| role.as_str() == X_ROLE)
            .map(|(id, _)| id.clone())
            .ok_or(ChartError::MissingXColumn)?;
        let x_values = numeric_column(&columns, &x_id)?;

        let mut series = Vec::with_capacity(raw.types.len().saturating_sub(1));
        for (id, _) in raw.types.iter().filter(|(_, role)| role.as_str() != X_ROLE) {
            let values = numeric_column(&columns, id)?;
            let name = raw
                .names
                .get(id)
                .cloned()
                .ok_or_else(|| ChartError::MissingSeriesMetadata {
                    id: id.clone(),
                    field: "name",
                })?;
            let color = raw
                .colors
                .get(id)
                .ok_or_else(|| ChartError::MissingSeriesMetadata {
                    id: id.clone(),
                    field: "color",
                })
                .and_then(|hex| Color::from_hex(hex))?;
            series.push(Series::new(id.clone(), name, color, values));
        }

        Self::new(x_values, series)
    }

    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }

    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn series_at(&self, index: usize) -> ChartResult<&Series> {
        self.series
            .get(index)
            .ok_or(ChartError::SeriesIndexOutOfRange {
                index,
                len: self.series.len(),
            })
    }
}

/// Dataset record as produced by the external loader.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDataset {
    pub columns: RawColumns,
    /// Column id to role; exactly one column carries the `x` role.
    pub types: IndexMap<String, String>,
    #[serde(default)]
    pub names: IndexMap<String, String>,
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}

/// Column payloads either labelled by their first element or keyed by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawColumns {
    Labelled(Vec<Vec<Value>>),
    Keyed(IndexMap<String, Vec<Value>>),
}

impl RawColumns {
    fn into_keyed(self) -> ChartResult<IndexMap<String, Vec<Value>>> {
        match self {
            Self::Keyed(columns) => Ok(columns),
            Self::Labelled(columns) => columns
                .into_iter()
                .map(|mut column| {
                    let label = match column.first() {
                        Some(Value::String(label)) => label.clone(),
                        _ => {
                            return Err(ChartError::InvalidData(
                                "labelled column must start with its string id".to_owned(),
                            ));
                        }
                    };
                    column.remove(0);
                    Ok((label, column))
                })
                .collect(),
        }
    }
}

fn numeric_column(columns: &IndexMap<String, Vec<Value>>, id: &str) -> ChartResult<Vec<f64>> {
    let column = columns.get(id).ok_or_else(|| ChartError::MissingColumn {
        id: id.to_owned(),
    })?;
    column
        .iter()
        .enumerate()
        .map(|(index, value)| {
            value.as_f64().ok_or_else(|| ChartError::NonNumericValue {
                id: id.to_owned(),
                index,
            })
        })
        .collect()
}
