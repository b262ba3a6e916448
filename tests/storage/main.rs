//! Integration tests for Layer 1: Storage
//!
//! Tests for forests, point tables, immutable morphology views and traversal.


use neurite_foundation::{CellFamily, Point, SectionId, SectionType, SomaType};
use neurite_storage::{Morphology, PointLevel, Properties, SomaData};

/// A straight run of points along `x` starting at `start`.
pub fn run(start: Point, n: usize) -> PointLevel {
    let points: Vec<Point> = (0..n)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let dx = i as f64;
            Point::new(start.x + dx, start.y, start.z)
        })
        .collect();
    let diameters = vec![1.0; points.len()];
    PointLevel::without_perimeters(points, diameters).unwrap()
}

/// Soma at the origin, then:
///
/// ```text
/// 0 (basal) -> 1 (basal), 2 (basal) -> 3 (basal)
/// 4 (axon)
/// ```
pub fn sample_morphology() -> Morphology {
    let mut builder = Properties::<SectionType>::builder(CellFamily::Neuron).with_soma(
        SomaData::new(SomaType::SinglePoint, vec![Point::origin()], vec![2.0]).unwrap(),
    );
    let s0 = builder.push_section(None, SectionType::BasalDendrite, &run(Point::new(1.0, 0.0, 0.0), 3));
    let end0 = Point::new(3.0, 0.0, 0.0);
    builder.push_section(Some(s0), SectionType::BasalDendrite, &run(end0, 2));
    let s2 = builder.push_section(Some(s0), SectionType::BasalDendrite, &run(end0, 4));
    builder.push_section(Some(s2), SectionType::BasalDendrite, &run(Point::new(6.0, 0.0, 0.0), 2));
    builder.push_section(None, SectionType::Axon, &run(Point::new(0.0, 0.0, -1.0), 2));
    Morphology::from_properties(builder.finish().unwrap())
}

pub fn id(raw: u32) -> SectionId {
    SectionId::new(raw)
}
