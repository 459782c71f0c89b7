//! Feet-to-pixel transform and marker composition
//!
//! The scale factor is computed independently per axis because floor plans
//! are not always scaled identically in both directions.

use crate::core::{FloorDescriptor, FloorPosition};
use image::imageops::FilterType;
use image::{DynamicImage, Rgba};
use imageproc::drawing::draw_filled_circle_mut;
use log::{debug, warn};
use nalgebra::Vector2;
use std::fmt;

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Rendering error types
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Floor dimensions that would produce a meaningless scale factor
    InvalidDimensions { width_feet: f64, length_feet: f64 },
    /// Output image could not be encoded or written
    WriteFailure { path: String, details: String },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidDimensions {
                width_feet,
                length_feet,
            } => {
                write!(
                    f,
                    "floor dimensions {} x {} ft cannot be used as a scale basis; both must be positive",
                    width_feet, length_feet
                )
            }
            RenderError::WriteFailure { path, details } => {
                write!(f, "could not write output image '{}': {}", path, details)
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Visual style of the client marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub color: [u8; 3],
    pub radius_px: u32,
}

/// Map a position in feet to pixel coordinates on the floor image.
///
/// Rejects non-positive floor dimensions before any arithmetic so a bad
/// descriptor can never divide by zero further down.
pub fn feet_to_pixels(
    position: FloorPosition,
    descriptor: &FloorDescriptor,
) -> RenderResult<Vector2<f64>> {
    if descriptor.width_feet <= 0.0 || descriptor.length_feet <= 0.0 {
        return Err(RenderError::InvalidDimensions {
            width_feet: descriptor.width_feet,
            length_feet: descriptor.length_feet,
        });
    }

    let scale = Vector2::new(
        descriptor.image_width_px as f64 / descriptor.width_feet,
        descriptor.image_height_px as f64 / descriptor.length_feet,
    );

    Ok(Vector2::new(position.x_feet, position.y_feet).component_mul(&scale))
}

/// Shrink the image so neither dimension exceeds `max_px`, preserving the
/// aspect ratio. Images already within the cap are returned untouched.
pub fn fit_within(image: DynamicImage, max_px: u32) -> DynamicImage {
    if image.width() <= max_px && image.height() <= max_px {
        return image;
    }
    image.resize(max_px, max_px, FilterType::Lanczos3)
}

/// Draw the client marker at its transformed position and downsample to the
/// output size cap.
///
/// Marker pixels falling outside the canvas are clipped, not an error, so a
/// client observed at the very edge of a floor still renders. Returns the
/// composed image together with the computed pixel position.
pub fn compose(
    image: DynamicImage,
    position: FloorPosition,
    descriptor: &FloorDescriptor,
    marker: MarkerStyle,
    max_output_px: u32,
) -> RenderResult<(DynamicImage, Vector2<f64>)> {
    let pixel = feet_to_pixels(position, descriptor)?;

    if image.width() != descriptor.image_width_px || image.height() != descriptor.image_height_px {
        warn!(
            "floor image is {}x{} px but its descriptor reports {}x{} px; scaling by the descriptor",
            image.width(),
            image.height(),
            descriptor.image_width_px,
            descriptor.image_height_px
        );
    }

    let mut canvas = image.into_rgba8();
    let center = (pixel.x.round() as i32, pixel.y.round() as i32);
    let [r, g, b] = marker.color;
    draw_filled_circle_mut(&mut canvas, center, marker.radius_px as i32, Rgba([r, g, b, 255]));
    debug!(
        "marker drawn at ({}, {}) px with radius {} px",
        center.0, center.1, marker.radius_px
    );

    let composed = fit_within(DynamicImage::ImageRgba8(canvas), max_output_px);
    Ok((composed, pixel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: [u8; 3] = [255, 0, 0];

    fn descriptor(
        width_feet: f64,
        length_feet: f64,
        image_width_px: u32,
        image_height_px: u32,
    ) -> FloorDescriptor {
        FloorDescriptor {
            width_feet,
            length_feet,
            image_width_px,
            image_height_px,
        }
    }

    fn white_canvas(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, WHITE))
    }

    #[test]
    fn test_feet_to_pixels_reference_values() {
        // 100 ft mapped onto 1000 px puts 25 ft at pixel 250
        let d = descriptor(100.0, 50.0, 1000, 400);
        let pixel = feet_to_pixels(
            FloorPosition {
                x_feet: 25.0,
                y_feet: 10.0,
            },
            &d,
        )
        .unwrap();

        assert!((pixel.x - 250.0).abs() < 1e-9);
        assert!((pixel.y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_feet_to_pixels_axes_scale_independently() {
        // Deliberately non-uniform scaling: 2 px/ft in x, 8 px/ft in y
        let d = descriptor(50.0, 25.0, 100, 200);
        let pixel = feet_to_pixels(
            FloorPosition {
                x_feet: 10.0,
                y_feet: 10.0,
            },
            &d,
        )
        .unwrap();

        assert!((pixel.x - 20.0).abs() < 1e-9);
        assert!((pixel.y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_width_rejected_before_drawing() {
        let d = descriptor(0.0, 50.0, 1000, 400);
        let result = feet_to_pixels(
            FloorPosition {
                x_feet: 1.0,
                y_feet: 1.0,
            },
            &d,
        );

        assert_eq!(
            result,
            Err(RenderError::InvalidDimensions {
                width_feet: 0.0,
                length_feet: 50.0,
            })
        );
    }

    #[test]
    fn test_negative_length_rejected() {
        let d = descriptor(100.0, -3.0, 1000, 400);
        assert!(matches!(
            feet_to_pixels(
                FloorPosition {
                    x_feet: 1.0,
                    y_feet: 1.0
                },
                &d
            ),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_compose_rejects_bad_descriptor_without_touching_the_image() {
        let d = descriptor(0.0, 0.0, 100, 100);
        let marker = MarkerStyle {
            color: RED,
            radius_px: 5,
        };
        let result = compose(
            white_canvas(100, 100),
            FloorPosition {
                x_feet: 1.0,
                y_feet: 1.0,
            },
            &d,
            marker,
            800,
        );
        assert!(matches!(result, Err(RenderError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_compose_draws_marker_at_transformed_position() {
        // 100x100 ft onto 100x100 px: 1 px per foot
        let d = descriptor(100.0, 100.0, 100, 100);
        let marker = MarkerStyle {
            color: RED,
            radius_px: 3,
        };

        let (composed, pixel) = compose(
            white_canvas(100, 100),
            FloorPosition {
                x_feet: 50.0,
                y_feet: 50.0,
            },
            &d,
            marker,
            800,
        )
        .unwrap();

        assert!((pixel.x - 50.0).abs() < 1e-9);
        let rgba = composed.into_rgba8();
        assert_eq!(rgba.get_pixel(50, 50), &Rgba([255, 0, 0, 255]));
        // Well outside the marker radius the canvas is untouched
        assert_eq!(rgba.get_pixel(10, 10), &WHITE);
    }

    #[test]
    fn test_marker_at_border_clips_instead_of_failing() {
        let d = descriptor(100.0, 100.0, 100, 100);
        let marker = MarkerStyle {
            color: RED,
            radius_px: 4,
        };

        let (composed, _) = compose(
            white_canvas(100, 100),
            FloorPosition {
                x_feet: 0.0,
                y_feet: 0.0,
            },
            &d,
            marker,
            800,
        )
        .unwrap();

        let rgba = composed.into_rgba8();
        assert_eq!(rgba.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_marker_fully_off_canvas_leaves_image_unchanged() {
        let d = descriptor(100.0, 100.0, 100, 100);
        let marker = MarkerStyle {
            color: RED,
            radius_px: 5,
        };

        let (composed, pixel) = compose(
            white_canvas(100, 100),
            FloorPosition {
                x_feet: -50.0,
                y_feet: -50.0,
            },
            &d,
            marker,
            800,
        )
        .unwrap();

        assert!(pixel.x < 0.0);
        let rgba = composed.into_rgba8();
        assert!(rgba.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_fit_within_caps_max_dimension_and_keeps_aspect() {
        let resized = fit_within(white_canvas(2000, 2000), 800);
        assert_eq!((resized.width(), resized.height()), (800, 800));

        let resized = fit_within(white_canvas(2000, 1000), 800);
        assert_eq!((resized.width(), resized.height()), (800, 400));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let resized = fit_within(white_canvas(300, 200), 800);
        assert_eq!((resized.width(), resized.height()), (300, 200));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let d = descriptor(169.5, 99.1, 1200, 700);
        let marker = MarkerStyle {
            color: [0, 128, 255],
            radius_px: 12,
        };
        let position = FloorPosition {
            x_feet: 118.73,
            y_feet: 70.16,
        };

        // Two independently constructed copies of the same bitmap
        let (first, _) = compose(white_canvas(1200, 700), position, &d, marker, 800).unwrap();
        let (second, _) = compose(white_canvas(1200, 700), position, &d, marker, 800).unwrap();

        assert_eq!(first.into_rgba8().into_raw(), second.into_rgba8().into_raw());
    }
}
