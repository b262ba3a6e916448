//! Soma shape resolution.
//!
//! The declared soma type (if any) must agree with the number of soma
//! points. An undeclared type is inferred from the points:
//!
//! | points | inferred type |
//! |--------|---------------|
//! | 0      | undefined (no soma) |
//! | 1      | single point |
//! | 3      | three-point cylinders if conforming, else cylinders |
//! | other  | cylinders |

use neurite_diagnostics::Diagnostics;
use neurite_foundation::{EPSILON, Error, Point, Result, SomaType, WarningKind};
use neurite_storage::SomaData;

use crate::options::BuildOptions;

/// Resolves the soma type and validates the soma points.
///
/// # Errors
///
/// Returns `Soma` if a declared type has no points or the wrong number of
/// points, or (in strict mode) if a three-point soma does not conform.
pub fn resolve_soma(
    declared: SomaType,
    points: Vec<Point>,
    diameters: Vec<f64>,
    options: &BuildOptions,
    diagnostics: &mut Diagnostics,
) -> Result<SomaData> {
    let n = points.len();
    let soma_type = match (declared, n) {
        (SomaType::Undefined, 0) => SomaType::Undefined,
        (_, 0) => {
            return Err(Error::soma(format!(
                "soma declared as {declared} has no points"
            )));
        }
        (SomaType::Undefined | SomaType::SinglePoint, 1) => SomaType::SinglePoint,
        (SomaType::SinglePoint, _) => {
            return Err(Error::soma(format!(
                "single point soma described by {n} points"
            )));
        }
        (SomaType::Undefined | SomaType::ThreePointCylinders, 3) => {
            if is_conforming_three_point(&points, &diameters) {
                SomaType::ThreePointCylinders
            } else if options.is_strict() {
                return Err(Error::soma(
                    "three-point soma does not follow the NeuroMorpho convention",
                ));
            } else {
                diagnostics.warn(
                    WarningKind::SomaNonConform,
                    "three-point soma does not follow the NeuroMorpho convention; using cylinders",
                );
                if declared == SomaType::ThreePointCylinders {
                    SomaType::ThreePointCylinders
                } else {
                    SomaType::Cylinders
                }
            }
        }
        (SomaType::ThreePointCylinders, _) => {
            return Err(Error::soma(format!(
                "three-point soma described by {n} points"
            )));
        }
        (SomaType::SimpleContour, n) if n < 3 => {
            return Err(Error::soma(format!(
                "contour soma needs at least 3 points, got {n}"
            )));
        }
        (SomaType::SimpleContour, _) => SomaType::SimpleContour,
        (SomaType::Cylinders, 1) => {
            return Err(Error::soma("cylinder soma needs at least 2 points"));
        }
        (SomaType::Undefined | SomaType::Cylinders, _) => SomaType::Cylinders,
    };

    tracing::trace!(%soma_type, points = n, "soma resolved");
    SomaData::new(soma_type, points, diameters)
}

/// NeuroMorpho three-point soma: a center point and two points offset by
/// plus and minus the radius along one axis, all with the same diameter.
fn is_conforming_three_point(points: &[Point], diameters: &[f64]) -> bool {
    let [center, a, b] = points else {
        return false;
    };
    let r = diameters[0] / 2.0;
    let tolerance = EPSILON * r.max(1.0) * 1e3;
    let same_diameter = diameters.iter().all(|d| (d - diameters[0]).abs() <= tolerance);
    let da = *a - *center;
    let db = *b - *center;
    same_diameter
        && (da.norm() - r).abs() <= tolerance
        && (db.norm() - r).abs() <= tolerance
        && (da + db).norm() <= tolerance
}
