// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Letterbox preprocessing for YOLO detectors

use image::{imageops, DynamicImage, GenericImageView, Rgb, RgbImage};
use ndarray::Array4;

/// Default square input size for exported YOLO models
pub const YOLO_INPUT_SIZE: u32 = 640;

/// Gray value used for letterbox padding
pub const PAD_VALUE: u8 = 114;

/// Geometry of a letterbox transform, needed to map boxes back
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Scale applied to the original image
    pub gain: f32,
    /// Left padding in model-input pixels
    pub pad_x: f32,
    /// Top padding in model-input pixels
    pub pad_y: f32,
    /// Original image width
    pub orig_width: u32,
    /// Original image height
    pub orig_height: u32,
}

impl Letterbox {
    /// Compute the transform that fits `orig_width x orig_height` into a square
    pub fn new(orig_width: u32, orig_height: u32, target_size: u32) -> Self {
        let gain = (target_size as f32 / orig_width.max(1) as f32)
            .min(target_size as f32 / orig_height.max(1) as f32);

        let new_w = (orig_width as f32 * gain).round();
        let new_h = (orig_height as f32 * gain).round();

        let dw = (target_size as f32 - new_w) / 2.0;
        let dh = (target_size as f32 - new_h) / 2.0;

        Self {
            gain,
            pad_x: (dw - 0.1).round().max(0.0),
            pad_y: (dh - 0.1).round().max(0.0),
            orig_width,
            orig_height,
        }
    }

    /// Map a model-space box back to original pixels, clipped to the image
    pub fn restore_box(&self, xyxy: [f32; 4]) -> [f32; 4] {
        let w = self.orig_width as f32;
        let h = self.orig_height as f32;
        [
            ((xyxy[0] - self.pad_x) / self.gain).clamp(0.0, w),
            ((xyxy[1] - self.pad_y) / self.gain).clamp(0.0, h),
            ((xyxy[2] - self.pad_x) / self.gain).clamp(0.0, w),
            ((xyxy[3] - self.pad_y) / self.gain).clamp(0.0, h),
        ]
    }
}

/// Resize with aspect ratio preserved and pad to a square canvas
///
/// Returns the padded RGB canvas and the transform that produced it.
pub fn letterbox_image(image: &DynamicImage, target_size: u32) -> (RgbImage, Letterbox) {
    let (orig_w, orig_h) = image.dimensions();
    let letterbox = Letterbox::new(orig_w, orig_h, target_size);

    let mut canvas = RgbImage::from_pixel(target_size, target_size, Rgb([PAD_VALUE; 3]));

    if orig_w == 0 || orig_h == 0 {
        return (canvas, letterbox);
    }

    let new_w = ((orig_w as f32 * letterbox.gain).round() as u32).clamp(1, target_size);
    let new_h = ((orig_h as f32 * letterbox.gain).round() as u32).clamp(1, target_size);

    let resized = image
        .resize_exact(new_w, new_h, imageops::FilterType::Triangle)
        .to_rgb8();

    imageops::replace(
        &mut canvas,
        &resized,
        letterbox.pad_x as i64,
        letterbox.pad_y as i64,
    );

    (canvas, letterbox)
}

/// Preprocess an image for YOLO inference
///
/// Steps:
/// 1. Letterbox to `target_size x target_size` with gray padding
/// 2. Scale pixel values to 0.0-1.0
/// 3. Convert to NCHW tensor format [1, 3, H, W]
pub fn preprocess_for_yolo(image: &DynamicImage, target_size: u32) -> (Array4<f32>, Letterbox) {
    let (canvas, letterbox) = letterbox_image(image, target_size);

    let size = target_size as usize;
    let mut tensor = Array4::zeros((1, 3, size, size));

    for (x, y, pixel) in canvas.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, c, y as usize, x as usize]] = pixel[c] as f32 / 255.0;
        }
    }

    (tensor, letterbox)
}
