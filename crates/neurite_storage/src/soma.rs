//! Read access to the soma and its geometry.

use std::f64::consts::PI;

use neurite_foundation::{Point, SomaType};

use crate::properties::SomaData;

/// The soma of a morphology.
#[derive(Copy, Clone, Debug)]
pub struct Soma<'a> {
    data: &'a SomaData,
}

impl<'a> Soma<'a> {
    pub(crate) fn new(data: &'a SomaData) -> Self {
        Self { data }
    }

    /// How the points are interpreted.
    #[must_use]
    pub fn soma_type(&self) -> SomaType {
        self.data.soma_type
    }

    /// Soma sample positions.
    #[must_use]
    pub fn points(&self) -> &'a [Point] {
        &self.data.points
    }

    /// Soma sample diameters.
    #[must_use]
    pub fn diameters(&self) -> &'a [f64] {
        &self.data.diameters
    }

    /// Returns true if the morphology has no soma.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Centroid of the soma points.
    #[must_use]
    pub fn center(&self) -> Option<Point> {
        Point::centroid(&self.data.points)
    }

    /// Largest distance from the center to a soma point.
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        let Some(center) = self.center() else {
            return 0.0;
        };
        self.data
            .points
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0, f64::max)
    }

    /// Surface area of the soma according to its type.
    ///
    /// - single point, three-point cylinders: sphere of the first diameter
    /// - cylinders: lateral area of the truncated cones between points
    /// - simple contour: sphere whose radius is the mean contour distance
    /// - undefined: 0
    #[must_use]
    pub fn surface(&self) -> f64 {
        let points = &self.data.points;
        let diameters = &self.data.diameters;
        if points.is_empty() {
            return 0.0;
        }
        match self.data.soma_type {
            SomaType::Undefined => 0.0,
            SomaType::SinglePoint | SomaType::ThreePointCylinders => {
                let r = diameters[0] / 2.0;
                4.0 * PI * r * r
            }
            SomaType::Cylinders => points
                .windows(2)
                .zip(diameters.windows(2))
                .map(|(p, d)| {
                    let (r0, r1) = (d[0] / 2.0, d[1] / 2.0);
                    let h = p[0].distance(p[1]);
                    PI * (r0 + r1) * ((r0 - r1).powi(2) + h * h).sqrt()
                })
                .sum(),
            SomaType::SimpleContour => {
                let Some(center) = self.center() else {
                    return 0.0;
                };
                #[allow(clippy::cast_precision_loss)]
                let r = points.iter().map(|p| p.distance(center)).sum::<f64>()
                    / points.len() as f64;
                4.0 * PI * r * r
            }
        }
    }
}
