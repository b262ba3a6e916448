//! A minimal plain-text SWC codec used to exercise the registry.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use neurite::builder::{RawMorphology, SampleRecord};
use neurite::foundation::{CellFamily, Error, Point, Result};
use neurite::io::{FileFormat, FormatReader, FormatWriter};

/// `id type x y z radius parent`, one sample per line, `#` comments.
pub struct TextSwc;

impl FormatReader for TextSwc {
    fn format(&self) -> FileFormat {
        FileFormat::Swc
    }

    fn read(&self, bytes: &[u8]) -> Result<RawMorphology> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::raw_data(format!("not utf-8: {e}")))?;
        let mut raw = RawMorphology::new(CellFamily::Neuron);
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [id, code, x, y, z, radius, parent] = fields[..] else {
                return Err(Error::raw_data(format!("line {}: expected 7 fields", number + 1)));
            };
            let line = number + 1;
            raw.push_sample(SampleRecord::new(
                field(id, line)?,
                field(code, line)?,
                Point::new(field(x, line)?, field(y, line)?, field(z, line)?),
                field(radius, line)?,
                field(parent, line)?,
            ));
        }
        Ok(raw)
    }
}

fn field<T>(text: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    text.parse()
        .map_err(|e| Error::raw_data(format!("line {line}: '{text}': {e}")))
}

impl FormatWriter for TextSwc {
    fn format(&self) -> FileFormat {
        FileFormat::Swc
    }

    fn write(&self, raw: &RawMorphology) -> Result<Vec<u8>> {
        let mut out = String::from("# id type x y z radius parent\n");
        for s in &raw.samples {
            let _ = writeln!(
                out,
                "{} {} {} {} {} {} {}",
                s.id, s.type_code, s.point.x, s.point.y, s.point.z, s.radius, s.parent
            );
        }
        Ok(out.into_bytes())
    }
}
