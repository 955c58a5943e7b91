use image::{GrayImage, imageops};
use imageproc::point::Point;

use crate::models::Contour;

/// Trace the borders of every foreground region in a binary mask, holes included.
///
/// The mask is traced inside a one-pixel background frame so regions touching
/// the image edges still get an outer border.
pub fn find_contours(mask: &GrayImage) -> Vec<Contour> {
    let mut padded = GrayImage::new(mask.width() + 2, mask.height() + 2);
    imageops::replace(&mut padded, mask, 1, 1);

    imageproc::contours::find_contours::<u32>(&padded)
        .into_iter()
        .filter(|c| !c.points.is_empty())
        .map(|c| {
            let points = c
                .points
                .into_iter()
                .map(|p| Point::new(p.x - 1, p.y - 1))
                .collect();
            Contour::new(points)
        })
        .collect()
}

/// Contour with the largest enclosed area. Ties go to the earliest one.
pub fn largest(contours: &[Contour]) -> Option<&Contour> {
    let mut best: Option<(&Contour, f64)> = None;
    for contour in contours {
        let area = contour.area();
        match best {
            Some((_, best_area)) if area <= best_area => {}
            _ => best = Some((contour, area)),
        }
    }
    best.map(|(contour, _)| contour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn full_frame_region_is_traced() {
        let mask = GrayImage::from_pixel(8, 5, Luma([255]));
        let contours = find_contours(&mask);

        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].bounding_rect().unwrap().describe(), (0, 0, 8, 5));
    }

    #[test]
    fn frame_with_hole_keeps_outer_border() {
        let mut mask = GrayImage::from_pixel(10, 10, Luma([255]));
        for y in 3..6 {
            for x in 3..6 {
                mask.put_pixel(x, y, Luma([0]));
            }
        }
        let contours = find_contours(&mask);

        let best = largest(&contours).unwrap();
        assert_eq!(best.bounding_rect().unwrap().describe(), (0, 0, 10, 10));
    }
}
