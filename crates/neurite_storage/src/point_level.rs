//! Per-section point data.

use neurite_foundation::{Error, Point, Result, SectionId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The geometry of one section (or of a whole flattened table).
///
/// `perimeters` is either empty or as long as `points`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointLevel {
    /// Sample positions, in order from the section's start.
    pub points: Vec<Point>,
    /// Sample diameters, one per point.
    pub diameters: Vec<f64>,
    /// Sample perimeters, one per point, or empty.
    pub perimeters: Vec<f64>,
}

impl PointLevel {
    /// Creates a validated point level.
    ///
    /// # Errors
    ///
    /// Returns `RawData` if the columns disagree in length, a coordinate is not
    /// finite, or a diameter or perimeter is negative or not finite.
    pub fn new(points: Vec<Point>, diameters: Vec<f64>, perimeters: Vec<f64>) -> Result<Self> {
        if points.len() != diameters.len() {
            return Err(Error::raw_data(format!(
                "{} points but {} diameters",
                points.len(),
                diameters.len()
            )));
        }
        if !perimeters.is_empty() && perimeters.len() != points.len() {
            return Err(Error::raw_data(format!(
                "{} points but {} perimeters",
                points.len(),
                perimeters.len()
            )));
        }
        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(Error::raw_data(format!("non-finite coordinate {p}")));
        }
        check_non_negative("diameter", &diameters)?;
        check_non_negative("perimeter", &perimeters)?;
        Ok(Self {
            points,
            diameters,
            perimeters,
        })
    }

    /// Creates a level without perimeters.
    ///
    /// # Errors
    ///
    /// See [`PointLevel::new`].
    pub fn without_perimeters(points: Vec<Point>, diameters: Vec<f64>) -> Result<Self> {
        Self::new(points, diameters, Vec::new())
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if perimeters are present.
    #[must_use]
    pub fn has_perimeters(&self) -> bool {
        !self.perimeters.is_empty()
    }

    /// First point, if any.
    #[must_use]
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Inserts a sample at the front.
    pub fn prepend(&mut self, point: Point, diameter: f64, perimeter: Option<f64>) {
        let takes_perimeter = self.has_perimeters() || self.is_empty();
        self.points.insert(0, point);
        self.diameters.insert(0, diameter);
        if let Some(perimeter) = perimeter.filter(|_| takes_perimeter) {
            self.perimeters.insert(0, perimeter);
        }
    }

    /// Removes the first sample.
    pub fn remove_first(&mut self) {
        if self.is_empty() {
            return;
        }
        self.points.remove(0);
        self.diameters.remove(0);
        if !self.perimeters.is_empty() {
            self.perimeters.remove(0);
        }
    }

    /// Appends every sample of `other`.
    pub fn extend(&mut self, other: &PointLevel) {
        self.points.extend_from_slice(&other.points);
        self.diameters.extend_from_slice(&other.diameters);
        self.perimeters.extend_from_slice(&other.perimeters);
    }

    /// Keeps only the first and last samples.
    pub fn keep_endpoints(&mut self) {
        let n = self.len();
        if n <= 2 {
            return;
        }
        let keep = |column: &mut Vec<f64>| {
            if !column.is_empty() {
                let last = column[n - 1];
                column.truncate(1);
                column.push(last);
            }
        };
        keep(&mut self.diameters);
        keep(&mut self.perimeters);
        let last = self.points[n - 1];
        self.points.truncate(1);
        self.points.push(last);
    }
}

fn check_non_negative(what: &str, values: &[f64]) -> Result<()> {
    match values.iter().find(|v| !v.is_finite() || **v < 0.0) {
        Some(v) => Err(Error::raw_data(format!("invalid {what} {v}"))),
        None => Ok(()),
    }
}

/// The points of one mitochondrial section.
///
/// Each point lies on a host section of the primary tree, at a relative path
/// length in `[0, 1]` along it.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MitoPointLevel {
    /// Host section of each point.
    pub section_ids: Vec<SectionId>,
    /// Position of each point along its host, from 0 (start) to 1 (end).
    pub relative_path_lengths: Vec<f64>,
    /// Diameter of each point.
    pub diameters: Vec<f64>,
}

impl MitoPointLevel {
    /// Creates a validated mito point level.
    ///
    /// # Errors
    ///
    /// Returns `RawData` if the columns disagree in length, a relative path
    /// length lies outside `[0, 1]`, or a diameter is invalid.
    pub fn new(
        section_ids: Vec<SectionId>,
        relative_path_lengths: Vec<f64>,
        diameters: Vec<f64>,
    ) -> Result<Self> {
        if section_ids.len() != relative_path_lengths.len() || section_ids.len() != diameters.len()
        {
            return Err(Error::raw_data(format!(
                "mitochondria columns disagree: {} hosts, {} path lengths, {} diameters",
                section_ids.len(),
                relative_path_lengths.len(),
                diameters.len()
            )));
        }
        if let Some(r) = relative_path_lengths
            .iter()
            .find(|r| !(0.0..=1.0).contains(*r))
        {
            return Err(Error::raw_data(format!(
                "relative path length {r} is outside [0, 1]"
            )));
        }
        check_non_negative("diameter", &diameters)?;
        Ok(Self {
            section_ids,
            relative_path_lengths,
            diameters,
        })
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.section_ids.len()
    }

    /// Returns true if there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.section_ids.is_empty()
    }

    /// Appends every point of `other`.
    pub fn extend(&mut self, other: &MitoPointLevel) {
        self.section_ids.extend_from_slice(&other.section_ids);
        self.relative_path_lengths
            .extend_from_slice(&other.relative_path_lengths);
        self.diameters.extend_from_slice(&other.diameters);
    }
}
