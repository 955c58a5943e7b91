mod common;

use roadcrop::annotations::{format_labels, parse_labels, read_labels, write_labels};

use common::*;

#[test]
fn test_parse_rows_and_skip_blank_lines() -> anyhow::Result<()> {
    let boxes = parse_labels("0 0.5 0.5 0.2 0.2\n\n  7 0.1 0.25 0.05 0.1  \n")?;

    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0], NormalizedBox::new(0, 0.5, 0.5, 0.2, 0.2));
    assert_eq!(boxes[1].class_id, 7);
    assert_close(boxes[1].cy, 0.25);
    Ok(())
}

#[test]
fn test_empty_file_has_no_boxes() -> anyhow::Result<()> {
    assert!(parse_labels("")?.is_empty());
    Ok(())
}

#[test]
fn test_wrong_field_count_reports_line() {
    let err = parse_labels("0 0.5 0.5 0.2 0.2\n1 0.5 0.5\n").unwrap_err();
    match err {
        CropError::Annotation { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_non_numeric_fields_are_rejected() {
    assert!(matches!(
        parse_labels("car 0.5 0.5 0.2 0.2"),
        Err(CropError::Annotation { line: 1, .. })
    ));
    assert!(matches!(
        parse_labels("0 0.5 abc 0.2 0.2"),
        Err(CropError::Annotation { line: 1, .. })
    ));
    assert!(matches!(
        parse_labels("0 0.5 NaN 0.2 0.2"),
        Err(CropError::Annotation { line: 1, .. })
    ));
}

#[test]
fn test_negative_sizes_are_rejected() {
    assert!(matches!(
        parse_labels("0 0.5 0.5 0.2 0.2\n0 0.5 0.5 -0.2 0.2\n"),
        Err(CropError::Annotation { line: 2, .. })
    ));
    assert!(matches!(
        parse_labels("0 0.5 0.5 0.2 -0.1"),
        Err(CropError::Annotation { line: 1, .. })
    ));
}

#[test]
fn test_format_uses_six_decimals() {
    let text = format_labels(&[
        NormalizedBox::new(0, 0.5, 0.5, 200.0 / 300.0, 200.0 / 300.0),
        NormalizedBox::new(4, 0.125, 1.0, 0.0, 0.25),
    ]);
    assert_eq!(
        text,
        "0 0.500000 0.500000 0.666667 0.666667\n4 0.125000 1.000000 0.000000 0.250000\n"
    );
}

#[test]
fn test_write_then_read_label_file() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("frame.txt");
    let boxes = vec![NormalizedBox::new(2, 0.25, 0.75, 0.1, 0.2)];

    write_labels(&path, &boxes)?;
    assert_eq!(read_labels(&path)?, boxes);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = read_labels(&dir.path().join("absent.txt"));
    assert!(matches!(result, Err(CropError::Io { .. })));
}
