//! YOLO label files: one `class cx cy w h` row per object, no header.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{CropError, Result};
use crate::models::NormalizedBox;

const FIELDS_PER_ROW: usize = 5;

/// Parse the contents of a label file. Blank lines are ignored.
pub fn parse_labels(text: &str) -> Result<Vec<NormalizedBox>> {
    let mut boxes = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let row = raw.trim();
        if row.is_empty() {
            continue;
        }

        let fields: Vec<&str> = row.split_whitespace().collect();
        if fields.len() != FIELDS_PER_ROW {
            return Err(CropError::Annotation {
                line,
                reason: format!("expected {FIELDS_PER_ROW} fields, found {}", fields.len()),
            });
        }

        let class_id = parse_class(fields[0]).ok_or_else(|| CropError::Annotation {
            line,
            reason: format!("invalid class id '{}'", fields[0]),
        })?;

        let mut coords = [0.0f64; 4];
        for (slot, field) in coords.iter_mut().zip(&fields[1..]) {
            *slot = field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CropError::Annotation {
                    line,
                    reason: format!("invalid coordinate '{field}'"),
                })?;
        }

        let [cx, cy, w, h] = coords;
        if w < 0.0 || h < 0.0 {
            return Err(CropError::Annotation {
                line,
                reason: format!("negative box size {w} x {h}"),
            });
        }
        boxes.push(NormalizedBox::new(class_id, cx, cy, w, h));
    }

    Ok(boxes)
}

// Some exporters write the class as a float ("0.0").
fn parse_class(field: &str) -> Option<u32> {
    if let Ok(id) = field.parse::<u32>() {
        return Some(id);
    }
    let value = field.parse::<f64>().ok()?;
    if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

/// Render boxes with fixed six-decimal precision, one row per box.
pub fn format_labels(boxes: &[NormalizedBox]) -> String {
    let mut out = String::new();
    for b in boxes {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{} {:.6} {:.6} {:.6} {:.6}",
            b.class_id, b.cx, b.cy, b.w, b.h
        );
    }
    out
}

pub fn read_labels(path: &Path) -> Result<Vec<NormalizedBox>> {
    let text = std::fs::read_to_string(path).map_err(|e| CropError::io(path, e))?;
    parse_labels(&text)
}

pub fn write_labels(path: &Path, boxes: &[NormalizedBox]) -> Result<()> {
    std::fs::write(path, format_labels(boxes)).map_err(|e| CropError::io(path, e))
}

/// The label file that sits beside an image (`a.b.jpg` -> `a.b.txt`).
pub fn label_path_for(image_path: &Path) -> PathBuf {
    image_path.with_extension("txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_class_ids_are_accepted() {
        assert_eq!(parse_class("3"), Some(3));
        assert_eq!(parse_class("3.0"), Some(3));
        assert_eq!(parse_class("-1"), None);
        assert_eq!(parse_class("2.5"), None);
    }

    #[test]
    fn label_path_replaces_last_extension() {
        let path = label_path_for(Path::new("/data/frame.0001.JPG"));
        assert_eq!(path, PathBuf::from("/data/frame.0001.txt"));
    }
}
