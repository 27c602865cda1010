use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use rayon::prelude::*;

use crate::models::{Frame, Row, Value};

/// Summary statistic computed per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Statistic {
    #[default]
    Mean,
    Median,
}

impl Statistic {
    fn compute(self, values: &mut [f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        match self {
            Statistic::Mean => Some(values.iter().sum::<f64>() / values.len() as f64),
            Statistic::Median => {
                values.sort_by(f64::total_cmp);
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    Some((values[mid - 1] + values[mid]) / 2.0)
                } else {
                    Some(values[mid])
                }
            }
        }
    }
}

impl FromStr for Statistic {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" | "avg" | "average" => Ok(Statistic::Mean),
            "median" => Ok(Statistic::Median),
            _ => Err(anyhow!("Unknown statistic: '{}' (valid: mean, median)", s)),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::Mean => f.write_str("mean"),
            Statistic::Median => f.write_str("median"),
        }
    }
}

/// Column rows are grouped on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Country,
    Region,
    Income,
}

impl GroupBy {
    pub fn column(self) -> &'static str {
        match self {
            GroupBy::Country => "Country",
            GroupBy::Region => "Region",
            GroupBy::Income => "Income",
        }
    }
}

impl FromStr for GroupBy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "country" => Ok(GroupBy::Country),
            "region" => Ok(GroupBy::Region),
            "income" => Ok(GroupBy::Income),
            _ => Err(anyhow!("Unknown grouping: '{}' (valid: country, region, income)", s)),
        }
    }
}

/// One row per distinct `group_by` value with `statistic` of each indicator
///
/// Rows whose group cell is empty are left out and groups come back sorted by key.
/// Indicator cells that are not numeric are ignored; a group with no numeric cell
/// for an indicator gets [`Value::Empty`] there.
///
/// # Errors
///
/// Returns an error if the frame has no `group_by` column or lacks one of `indicators`.
pub fn aggregate(
    frame: &Frame,
    group_by: GroupBy,
    indicators: &[String],
    statistic: Statistic,
) -> Result<Frame> {
    let Some(key_idx) = frame.column_index(group_by.column()) else {
        bail!("Cannot group by {}: column not present", group_by.column());
    };
    let indicator_idx = indicators
        .iter()
        .map(|name| {
            frame.column_index(name).ok_or_else(|| anyhow!("Unknown indicator: '{}'", name))
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, key) in frame.column_values(key_idx).enumerate() {
        if key.is_empty() {
            continue;
        }
        let key = key.to_string().trim().to_string();
        if !key.is_empty() {
            groups.entry(key).or_default().push(i);
        }
    }

    let rows: Vec<Row> = groups
        .into_par_iter()
        .map(|(key, members)| {
            let mut row = Vec::with_capacity(indicator_idx.len() + 1);
            row.push(Value::Text(key));
            for &col in &indicator_idx {
                let mut values: Vec<f64> =
                    members.iter().filter_map(|&r| frame.rows()[r][col].as_f64()).collect();
                row.push(statistic.compute(&mut values).map_or(Value::Empty, Value::Float));
            }
            row
        })
        .collect();

    let mut columns = vec![group_by.column().to_string()];
    columns.extend(indicators.iter().cloned());
    Ok(Frame::from_rows(columns, rows))
}
