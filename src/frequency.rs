//! Per-column value frequency summaries, for eyeballing a frame.

use polars::prelude::*;
use std::io::{self, Write};

/// Columns with more distinct values than this get top/bottom listings instead of a full table.
pub const FULL_LISTING_LIMIT: usize = 10;

const NULL_LABEL: &str = "null";

/// Value counts for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFrequency {
    pub column: String,
    pub distinct: usize,
    /// Most frequent first. Holds every value when `distinct <= FULL_LISTING_LIMIT`,
    /// otherwise only the top ten.
    pub most_frequent: Vec<(String, usize)>,
    /// Least frequent first; empty when the full distribution fits in `most_frequent`.
    pub least_frequent: Vec<(String, usize)>,
}

impl ColumnFrequency {
    fn from_counts(column: String, mut sorted: Vec<(String, usize)>) -> Self {
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let distinct = sorted.len();

        if distinct <= FULL_LISTING_LIMIT {
            return Self {
                column,
                distinct,
                most_frequent: sorted,
                least_frequent: Vec::new(),
            };
        }

        let most_frequent = sorted[..FULL_LISTING_LIMIT].to_vec();
        sorted.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        sorted.truncate(FULL_LISTING_LIMIT);
        Self {
            column,
            distinct,
            most_frequent,
            least_frequent: sorted,
        }
    }
}

/// Text shown for one distinct value. Strings print bare, everything else
/// (numbers, dates, lists, structs, binary) uses the polars display form.
fn value_label(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => NULL_LABEL.to_string(),
        other => match other.get_str() {
            Some(text) => text.to_string(),
            None => other.to_string(),
        },
    }
}

/// Counts the distinct values of one column with polars' `value_counts`.
fn count_values(column: &Column) -> PolarsResult<Vec<(String, usize)>> {
    let series = column.as_materialized_series();
    let count_name: PlSmallStr = if series.name().as_str() == "count" {
        "counts".into()
    } else {
        "count".into()
    };
    let counted = series.value_counts(false, false, count_name.clone(), false)?;
    let values = counted.column(series.name().as_str())?.as_materialized_series();
    let counts = counted.column(count_name.as_str())?.idx()?;

    (0..counted.height())
        .map(|i| {
            let count = counts.get(i).unwrap_or(0) as usize;
            Ok((value_label(&values.get(i)?), count))
        })
        .collect()
}

/// Counts the values of every column, treating nulls as one value.
///
/// Works on columns of any dtype, nested ones included. Ties in count are
/// broken by the value's text so the listing is stable across runs.
///
/// # Arguments
///
/// * `df` - The frame to summarize.
///
/// # Returns
///
/// One [`ColumnFrequency`] per column, in column order.
///
/// # Errors
///
/// Returns a `PolarsError` if polars cannot group a column.
pub fn column_frequencies(df: &DataFrame) -> PolarsResult<Vec<ColumnFrequency>> {
    df.get_columns()
        .iter()
        .map(|column| {
            let counts = count_values(column)?;
            Ok(ColumnFrequency::from_counts(column.name().to_string(), counts))
        })
        .collect()
}

/// Prints the summary of each column of `df` to `out`.
pub fn print_frequencies(df: &DataFrame, out: &mut impl Write) -> io::Result<()> {
    let frequencies = column_frequencies(df).map_err(io::Error::other)?;
    for freq in &frequencies {
        writeln!(out, "======================")?;
        writeln!(out, "{}", freq.column)?;
        writeln!(out, "{} unique values", freq.distinct)?;
        if freq.least_frequent.is_empty() {
            write_counts(out, &freq.most_frequent)?;
        } else {
            writeln!(out, "Top {}", FULL_LISTING_LIMIT)?;
            write_counts(out, &freq.most_frequent)?;
            writeln!(out, "Bottom {}", FULL_LISTING_LIMIT)?;
            write_counts(out, &freq.least_frequent)?;
        }
    }
    Ok(())
}

fn write_counts(out: &mut impl Write, counts: &[(String, usize)]) -> io::Result<()> {
    let width = counts.iter().map(|(value, _)| value.len()).max().unwrap_or(0);
    for (value, count) in counts {
        writeln!(out, "{:<width$}  {}", value, count, width = width)?;
    }
    Ok(())
}
