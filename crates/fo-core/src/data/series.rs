//! Series data structure for holding homogeneous nullable data
//!
//! A `NullableSeries<T>` is a named one-dimensional sequence where every
//! slot is either a value of `T` or absent. It is the building block of
//! dynamic columns and, through them, of tables.

use super::*;

use std::cmp::Ordering;

use super::stats;

/// A named, ordered sequence of optional values
///
/// Clones are never owned by a table, and equality ignores ownership.
#[derive(Debug)]
pub struct NullableSeries<T> {
    name: String,
    values: Vec<Option<T>>,
    owned: bool,
}

impl<T: Clone> Clone for NullableSeries<T> {
    fn clone(&self) -> Self {
        Self::from_values(self.name.clone(), self.values.clone())
    }
}

impl<T: PartialEq> PartialEq for NullableSeries<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.values == other.values
    }
}

/// Total order over a partial order: values unordered with themselves (NaN)
/// are equal to each other and rank after everything else
fn total_cmp<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b)
        .unwrap_or_else(|| is_unordered(a).cmp(&is_unordered(b)))
}

fn is_unordered<T: PartialOrd>(value: &T) -> bool {
    value.partial_cmp(value).is_none()
}

impl<T> NullableSeries<T> {
    /// Create an empty series
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            owned: false,
        }
    }

    /// Create a series from optional values
    pub fn from_values(name: impl Into<String>, values: Vec<Option<T>>) -> Self {
        Self {
            name: name.into(),
            values,
            owned: false,
        }
    }

    /// Create a series where every slot is present
    pub fn from_present<I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::from_values(name, values.into_iter().map(Some).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the length of the series, absent slots included
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether a table currently owns this series
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Get the value at `idx`; `None` when absent or out of range
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.values.get(idx).and_then(Option::as_ref)
    }

    /// Check whether the slot at `idx` is absent
    pub fn is_absent(&self, idx: usize) -> Result<bool> {
        self.values
            .get(idx)
            .map(Option::is_none)
            .ok_or(DataError::IndexOutOfBounds {
                index: idx,
                len: self.len(),
            })
    }

    /// All slots in order
    pub fn values(&self) -> &[Option<T>] {
        &self.values
    }

    /// Iterate over present values, skipping absent slots
    pub fn present(&self) -> impl Iterator<Item = &T> {
        self.values.iter().flatten()
    }

    pub fn count_present(&self) -> usize {
        self.present().count()
    }

    pub fn count_absent(&self) -> usize {
        self.len() - self.count_present()
    }

    pub fn append(&mut self, value: Option<T>) -> Result<()> {
        self.ensure_detached()?;
        self.values.push(value);
        Ok(())
    }

    /// Insert before position `idx`; `idx == len` appends
    pub fn insert_at(&mut self, idx: usize, value: Option<T>) -> Result<()> {
        self.ensure_detached()?;
        if idx > self.len() {
            return Err(DataError::IndexOutOfBounds {
                index: idx,
                len: self.len(),
            });
        }
        self.values.insert(idx, value);
        Ok(())
    }

    pub fn remove_at(&mut self, idx: usize) -> Result<Option<T>> {
        self.ensure_detached()?;
        self.check_index(idx)?;
        Ok(self.values.remove(idx))
    }

    /// Drop every absent slot
    pub fn remove_absent(&mut self) -> Result<usize> {
        self.ensure_detached()?;
        let before = self.len();
        self.values.retain(Option::is_some);
        Ok(before - self.len())
    }

    /// Overwrite the slot at `idx`. Allowed on table-owned series.
    pub fn replace_at(&mut self, idx: usize, value: Option<T>) -> Result<Option<T>> {
        self.check_index(idx)?;
        Ok(std::mem::replace(&mut self.values[idx], value))
    }

    pub(crate) fn check_index(&self, idx: usize) -> Result<()> {
        if idx >= self.len() {
            return Err(DataError::IndexOutOfBounds {
                index: idx,
                len: self.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn ensure_detached(&self) -> Result<()> {
        if self.owned {
            return Err(DataError::OwnershipViolation(self.name.clone()));
        }
        Ok(())
    }

    pub(crate) fn set_owned(&mut self, owned: bool) {
        self.owned = owned;
    }

    // Table-side structural access; the table keeps all columns in step.

    pub(crate) fn push_unchecked(&mut self, value: Option<T>) {
        self.values.push(value);
    }

    pub(crate) fn remove_unchecked(&mut self, idx: usize) -> Option<T> {
        self.values.remove(idx)
    }

    pub(crate) fn insert_unchecked(&mut self, idx: usize, value: Option<T>) {
        self.values.insert(idx, value);
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Option<T>] {
        &mut self.values
    }

    fn present_or_err(&self) -> Result<()> {
        if self.is_empty() {
            return Err(DataError::EmptySeries(self.name.clone()));
        }
        if self.values.iter().all(Option::is_none) {
            return Err(DataError::NoPresentValues(self.name.clone()));
        }
        Ok(())
    }
}

impl<T: Clone> NullableSeries<T> {
    /// Replace every absent slot with `value`
    pub fn fill_absent(&mut self, value: T) -> usize {
        let mut filled = 0;
        for slot in self.values.iter_mut().filter(|slot| slot.is_none()) {
            *slot = Some(value.clone());
            filled += 1;
        }
        filled
    }

    /// Keep only present values that satisfy `predicate`
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool,
    {
        let values = self
            .present()
            .filter(|v| predicate(v))
            .cloned()
            .map(Some)
            .collect();
        Self::from_values(self.name.clone(), values)
    }

    /// Build a new series from the slots at `indices`, in that order
    pub(crate) fn take(&self, indices: &[usize]) -> Result<Self> {
        let mut values = Vec::with_capacity(indices.len());
        for &idx in indices {
            self.check_index(idx)?;
            values.push(self.values[idx].clone());
        }
        Ok(Self::from_values(self.name.clone(), values))
    }
}

impl<T: PartialEq + Clone> NullableSeries<T> {
    /// Remove the first slot equal to `value`
    pub fn remove_value(&mut self, value: &T) -> Result<bool> {
        self.ensure_detached()?;
        match self.values.iter().position(|v| v.as_ref() == Some(value)) {
            Some(idx) => {
                self.values.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every slot equal to `value`
    pub fn remove_all_value(&mut self, value: &T) -> Result<usize> {
        self.ensure_detached()?;
        let before = self.len();
        self.values.retain(|v| v.as_ref() != Some(value));
        Ok(before - self.len())
    }

    /// Replace every occurrence of `old` with `new`
    pub fn replace_value(&mut self, old: &T, new: T) -> usize {
        let mut replaced = 0;
        for slot in self.values.iter_mut() {
            if slot.as_ref() == Some(old) {
                *slot = Some(new.clone());
                replaced += 1;
            }
        }
        replaced
    }
}

impl<T: PartialOrd + Clone> NullableSeries<T> {
    fn sorted_present(&self) -> Vec<T> {
        let mut present: Vec<T> = self.present().cloned().collect();
        present.sort_by(total_cmp);
        present
    }

    /// Number of distinct present values
    pub fn count_distinct(&self) -> usize {
        self.value_counts().len()
    }

    /// Distinct present values with their occurrence counts, ascending by value
    pub fn value_counts(&self) -> Vec<(T, usize)> {
        let mut counts: Vec<(T, usize)> = Vec::new();
        for value in self.sorted_present() {
            if let Some((last, count)) = counts.last_mut() {
                if total_cmp(last, &value) == Ordering::Equal {
                    *count += 1;
                    continue;
                }
            }
            counts.push((value, 1));
        }
        counts
    }

    /// Most frequent present value; ties go to the smallest
    pub fn mode(&self) -> Result<T> {
        self.present_or_err()?;
        let mut best: Option<(T, usize)> = None;
        for (value, count) in self.value_counts() {
            if best.as_ref().is_none_or(|(_, top)| count > *top) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
            .ok_or_else(|| DataError::NoPresentValues(self.name.clone()))
    }

    /// Stable sort into a new series; absent slots lead when ascending and
    /// trail when descending
    pub fn sort(&self, ascending: bool) -> Self {
        let mut values = self.values.clone();
        values.sort_by(|a, b| {
            let ord = match (a, b) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => total_cmp(a, b),
            };
            if ascending { ord } else { ord.reverse() }
        });
        Self::from_values(self.name.clone(), values)
    }
}

impl<T: Numeric> NullableSeries<T> {
    fn present_f64(&self) -> Result<Vec<f64>> {
        self.present_or_err()?;
        Ok(self.present().map(|v| v.to_f64()).collect())
    }

    pub fn min(&self) -> Result<T> {
        self.present_or_err()?;
        self.present()
            .copied()
            .reduce(|a, b| if b < a { b } else { a })
            .ok_or_else(|| DataError::NoPresentValues(self.name.clone()))
    }

    pub fn max(&self) -> Result<T> {
        self.present_or_err()?;
        self.present()
            .copied()
            .reduce(|a, b| if b > a { b } else { a })
            .ok_or_else(|| DataError::NoPresentValues(self.name.clone()))
    }

    /// `max - min`
    pub fn range(&self) -> Result<T> {
        let (min, max) = (self.min()?, self.max()?);
        max.try_sub(min).ok_or_else(|| {
            DataError::InvalidParameter(format!("range of '{}' overflows", self.name))
        })
    }

    pub fn sum(&self) -> Result<f64> {
        Ok(stats::sum(&self.present_f64()?))
    }

    pub fn mean(&self) -> Result<f64> {
        let values = self.present_f64()?;
        stats::mean(&values).ok_or_else(|| DataError::NoPresentValues(self.name.clone()))
    }

    pub fn median(&self) -> Result<f64> {
        let values = stats::sorted(&self.present_f64()?);
        stats::median(&values).ok_or_else(|| DataError::NoPresentValues(self.name.clone()))
    }

    /// Bessel-corrected sample variance
    pub fn sample_var(&self) -> Result<f64> {
        let values = self.present_f64()?;
        stats::sample_var(&values).ok_or_else(|| self.too_few("sample variance", 2, values.len()))
    }

    /// Bessel-corrected sample standard deviation
    pub fn sample_std(&self) -> Result<f64> {
        self.sample_var().map(f64::sqrt)
    }

    /// Linear-interpolation percentile, `p` in `[0, 1]`
    pub fn percentile(&self, p: f64) -> Result<f64> {
        stats::check_fraction(p)?;
        let values = stats::sorted(&self.present_f64()?);
        stats::percentile(&values, p).ok_or_else(|| DataError::NoPresentValues(self.name.clone()))
    }

    /// Adjusted sample skewness
    pub fn skewness(&self) -> Result<f64> {
        let values = self.present_f64()?;
        stats::skewness(&values).ok_or_else(|| self.too_few("skewness", 3, values.len()))
    }

    /// Equal-width bin counts between `min` and `max`
    pub fn histogram(&self, bins: usize) -> Result<Vec<usize>> {
        if bins == 0 {
            return Err(DataError::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        let values = self.present_f64()?;
        let min = self.min()?.to_f64();
        let max = self.max()?.to_f64();
        Ok(stats::histogram(&values, min, max, bins))
    }

    /// Replace every absent slot with the mean of the present values
    pub fn fill_absent_with_mean(&mut self) -> Result<usize> {
        let mean = self.mean()?;
        Ok(self.fill_absent(T::from_f64(mean)))
    }

    fn too_few(&self, what: &str, required: usize, actual: usize) -> DataError {
        DataError::InvalidParameter(format!(
            "{what} of '{}' needs at least {required} present values, got {actual}",
            self.name
        ))
    }

    /// Combine every present value with `scalar`
    pub fn apply<F>(&self, scalar: T, op: F) -> Self
    where
        F: Fn(T, T) -> Option<T>,
    {
        let values = self
            .values
            .iter()
            .map(|slot| slot.and_then(|v| op(v, scalar)))
            .collect();
        Self::from_values(self.name.clone(), values)
    }

    /// Combine two equally long series slot by slot; absent on either side
    /// stays absent
    pub fn zip_with<F>(&self, other: &Self, op: F) -> Result<Self>
    where
        F: Fn(T, T) -> Option<T>,
    {
        if self.len() != other.len() {
            return Err(DataError::DimensionMismatch {
                expected: format!("length {}", self.len()),
                actual: format!("length {}", other.len()),
            });
        }

        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => op(*a, *b),
                _ => None,
            })
            .collect();
        Ok(Self::from_values(self.name.clone(), values))
    }

    pub fn add(&self, scalar: T) -> Self {
        self.apply(scalar, T::try_add)
    }

    pub fn sub(&self, scalar: T) -> Self {
        self.apply(scalar, T::try_sub)
    }

    pub fn mul(&self, scalar: T) -> Self {
        self.apply(scalar, T::try_mul)
    }

    pub fn div(&self, scalar: T) -> Self {
        self.apply(scalar, T::try_div)
    }

    pub fn add_series(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, T::try_add)
    }

    pub fn sub_series(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, T::try_sub)
    }

    pub fn mul_series(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, T::try_mul)
    }

    pub fn div_series(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, T::try_div)
    }
}

impl NullableSeries<String> {
    /// Join the present values with `separator`
    pub fn concatenate(&self, separator: &str) -> String {
        self.present()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}
