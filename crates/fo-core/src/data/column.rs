//! Soft-schema columns of mixed-type cells
//!
//! A `DynamicColumn` records the kind of the first present cell it stores
//! (its established kind) and reconciles every later insertion against it.
//! Statistics read the numeric interpretation of the cells and report NaN
//! instead of failing, so table-wide summaries never abort on one column.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::*;

use super::stats;

/// What to do with a present cell that cannot be coerced to the column's
/// established kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoercionPolicy {
    /// Store an absent slot instead
    #[default]
    SilentNull,
    /// Fail with `DataError::TypeMismatch`
    Reject,
}

/// A nullable series of `Cell`s with an advisory established kind
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicColumn {
    series: NullableSeries<Cell>,
    established: Option<CellKind>,
    policy: CoercionPolicy,
}

impl DynamicColumn {
    /// Create an empty column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            series: NullableSeries::new(name),
            established: None,
            policy: CoercionPolicy::default(),
        }
    }

    /// Create a column from cells, reconciling each one in order
    pub fn from_cells<I>(name: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = Option<Cell>>,
    {
        let mut column = Self::new(name);
        for cell in cells {
            // SilentNull never fails
            let cell = column.reconcile(cell).unwrap_or(None);
            column.store(cell);
        }
        column
    }

    /// Convert a typed series into a column
    pub fn from_series<T>(series: &NullableSeries<T>) -> Self
    where
        T: Clone + Into<Cell>,
    {
        Self::from_cells(
            series.name(),
            series.values().iter().map(|v| v.clone().map(Into::into)),
        )
    }

    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CoercionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: CoercionPolicy) {
        self.policy = policy;
    }

    /// Kind of the first present cell ever stored
    pub fn established_kind(&self) -> Option<CellKind> {
        self.established
    }

    /// Rename a free column; a table-owned one is renamed through
    /// `Table::rename_column`
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.series.ensure_detached()?;
        self.series.set_name(name);
        Ok(())
    }

    pub(crate) fn rename_unchecked(&mut self, name: impl Into<String>) {
        self.series.set_name(name);
    }

    /// The underlying series
    pub fn series(&self) -> &NullableSeries<Cell> {
        &self.series
    }

    pub fn into_series(self) -> NullableSeries<Cell> {
        self.series
    }

    /// Map `cell` onto the established kind without storing it
    pub fn reconcile(&self, cell: Option<Cell>) -> Result<Option<Cell>> {
        let Some(kind) = self.established else {
            return Ok(cell);
        };
        let Some(cell) = cell else {
            return Ok(None);
        };

        match cell.coerce_to(kind) {
            Some(coerced) => Ok(Some(coerced)),
            None => match self.policy {
                CoercionPolicy::SilentNull => {
                    tracing::debug!(
                        column = %self.name(),
                        expected = %kind,
                        actual = %cell.kind(),
                        "storing absent for cell of foreign kind"
                    );
                    Ok(None)
                }
                CoercionPolicy::Reject => Err(DataError::TypeMismatch {
                    column: self.name().to_string(),
                    expected: kind,
                    actual: cell.kind(),
                }),
            },
        }
    }

    fn establish(&mut self, cell: Option<&Cell>) {
        if self.established.is_none() {
            self.established = cell.map(Cell::kind);
        }
    }

    fn store(&mut self, cell: Option<Cell>) {
        self.establish(cell.as_ref());
        self.series.push_unchecked(cell);
    }

    pub fn append(&mut self, cell: Option<Cell>) -> Result<()> {
        self.series.ensure_detached()?;
        let cell = self.reconcile(cell)?;
        self.store(cell);
        Ok(())
    }

    pub fn insert_at(&mut self, idx: usize, cell: Option<Cell>) -> Result<()> {
        self.series.ensure_detached()?;
        if idx > self.len() {
            return Err(DataError::IndexOutOfBounds {
                index: idx,
                len: self.len(),
            });
        }
        let cell = self.reconcile(cell)?;
        self.insert_reconciled(idx, cell);
        Ok(())
    }

    pub fn remove_at(&mut self, idx: usize) -> Result<Option<Cell>> {
        self.series.remove_at(idx)
    }

    pub fn remove_value(&mut self, cell: &Cell) -> Result<bool> {
        self.series.remove_value(cell)
    }

    pub fn remove_all_value(&mut self, cell: &Cell) -> Result<usize> {
        self.series.remove_all_value(cell)
    }

    pub fn remove_absent(&mut self) -> Result<usize> {
        self.series.remove_absent()
    }

    /// Overwrite one slot; allowed while the column belongs to a table
    pub fn replace_at(&mut self, idx: usize, cell: Option<Cell>) -> Result<Option<Cell>> {
        self.series.check_index(idx)?;
        let cell = self.reconcile(cell)?;
        self.establish(cell.as_ref());
        self.series.replace_at(idx, cell)
    }

    /// Replace every occurrence of `old` with `new`
    pub fn replace_value(&mut self, old: &Cell, new: Cell) -> Result<usize> {
        match self.reconcile(Some(new))? {
            Some(new) => {
                self.establish(Some(&new));
                Ok(self.series.replace_value(old, new))
            }
            None => Ok(0),
        }
    }

    /// Fill absent slots with `cell`, coerced to the established kind
    pub fn fill_absent(&mut self, cell: Cell) -> Result<usize> {
        match self.reconcile(Some(cell))? {
            Some(cell) => {
                self.establish(Some(&cell));
                Ok(self.series.fill_absent(cell))
            }
            None => Ok(0),
        }
    }

    /// Fill absent slots with the default of the established kind; a column
    /// without one is left untouched
    pub fn fill_absent_with_default(&mut self) -> usize {
        match self.established {
            Some(kind) => self.series.fill_absent(Cell::default_for(kind)),
            None => 0,
        }
    }

    /// Set present cells that fail `predicate` to absent
    pub fn mask<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&Cell) -> bool,
    {
        let mut masked = 0;
        for slot in self.series.values_mut() {
            if slot.as_ref().is_some_and(|cell| !predicate(cell)) {
                *slot = None;
                masked += 1;
            }
        }
        masked
    }

    /// Stable sort into a new column
    pub fn sort(&self, ascending: bool) -> Self {
        self.derive(self.series.sort(ascending))
    }

    /// Keep only present cells that satisfy `predicate`
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Cell) -> bool,
    {
        self.derive(self.series.filter(predicate))
    }

    pub(crate) fn take(&self, indices: &[usize]) -> Result<Self> {
        Ok(self.derive(self.series.take(indices)?))
    }

    fn derive(&self, series: NullableSeries<Cell>) -> Self {
        Self {
            series,
            established: self.established,
            policy: self.policy,
        }
    }

    /// A copy detached from any table; same as `clone`
    pub fn detached(&self) -> Self {
        self.clone()
    }

    pub(crate) fn set_owned(&mut self, owned: bool) {
        self.series.set_owned(owned);
    }

    pub(crate) fn push_reconciled(&mut self, cell: Option<Cell>) {
        self.store(cell);
    }

    pub(crate) fn remove_row(&mut self, idx: usize) -> Option<Cell> {
        self.series.remove_unchecked(idx)
    }

    pub(crate) fn insert_reconciled(&mut self, idx: usize, cell: Option<Cell>) {
        self.establish(cell.as_ref());
        self.series.insert_unchecked(idx, cell);
    }

    /// Numeric interpretation of every present numeric cell
    pub fn numeric_values(&self) -> Vec<f64> {
        self.series.present().filter_map(Cell::as_f64).collect()
    }

    fn numeric_cells(&self) -> impl Iterator<Item = &Cell> {
        self.series.present().filter(|cell| cell.is_numeric())
    }

    pub fn sum(&self) -> f64 {
        let values = self.numeric_values();
        if values.is_empty() {
            return f64::NAN;
        }
        stats::sum(&values)
    }

    pub fn mean(&self) -> f64 {
        stats::mean(&self.numeric_values()).unwrap_or(f64::NAN)
    }

    pub fn median(&self) -> f64 {
        stats::median(&stats::sorted(&self.numeric_values())).unwrap_or(f64::NAN)
    }

    pub fn sample_var(&self) -> f64 {
        stats::sample_var(&self.numeric_values()).unwrap_or(f64::NAN)
    }

    pub fn sample_std(&self) -> f64 {
        stats::sample_std(&self.numeric_values()).unwrap_or(f64::NAN)
    }

    /// Linear-interpolation percentile; NaN without numeric values
    pub fn percentile(&self, p: f64) -> Result<f64> {
        stats::check_fraction(p)?;
        Ok(stats::percentile(&stats::sorted(&self.numeric_values()), p).unwrap_or(f64::NAN))
    }

    pub fn skewness(&self) -> f64 {
        stats::skewness(&self.numeric_values()).unwrap_or(f64::NAN)
    }

    /// Smallest numeric cell, in its own kind
    pub fn min(&self) -> Option<Cell> {
        self.numeric_cells()
            .min_by(|a, b| cmp_numeric(a, b))
            .cloned()
    }

    /// Largest numeric cell, in its own kind
    pub fn max(&self) -> Option<Cell> {
        self.numeric_cells()
            .max_by(|a, b| cmp_numeric(a, b))
            .cloned()
    }

    pub fn range(&self) -> f64 {
        match (self.min(), self.max()) {
            (Some(min), Some(max)) => {
                max.as_f64().unwrap_or(f64::NAN) - min.as_f64().unwrap_or(f64::NAN)
            }
            _ => f64::NAN,
        }
    }

    /// Equal-width bin counts over the numeric cells; empty without any
    pub fn histogram(&self, bins: usize) -> Result<Vec<usize>> {
        if bins == 0 {
            return Err(DataError::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        let values = self.numeric_values();
        let sorted = stats::sorted(&values);
        match (sorted.first(), sorted.last()) {
            (Some(&min), Some(&max)) => Ok(stats::histogram(&values, min, max, bins)),
            _ => Ok(vec![0; bins]),
        }
    }
}

fn cmp_numeric(a: &Cell, b: &Cell) -> std::cmp::Ordering {
    let a = a.as_f64().unwrap_or(f64::NAN);
    let b = b.as_f64().unwrap_or(f64::NAN);
    a.total_cmp(&b)
}

impl Deref for DynamicColumn {
    type Target = NullableSeries<Cell>;

    fn deref(&self) -> &Self::Target {
        &self.series
    }
}

impl<T> From<NullableSeries<T>> for DynamicColumn
where
    T: Clone + Into<Cell>,
{
    fn from(series: NullableSeries<T>) -> Self {
        Self::from_series(&series)
    }
}
