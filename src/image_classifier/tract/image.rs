use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Letterboxes non-square images onto a black canvas so the aspect ratio
/// survives the resize.
pub fn resize_image(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.width() == image.height() {
        return image.resize_exact(width, height, imageops::FilterType::Triangle);
    }

    let scaled = image
        .resize(width, height, imageops::FilterType::Triangle)
        .to_rgb8();

    let mut padded = DynamicImage::new_rgb8(width, height).to_rgb8();
    let x_offset = (width - scaled.width().min(width)) / 2;
    let y_offset = (height - scaled.height().min(height)) / 2;
    imageops::replace(&mut padded, &scaled, i64::from(x_offset), i64::from(y_offset));

    DynamicImage::from(padded)
}

fn image_to_tensor(
    image: &DynamicImage,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let tensor = tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        let pixel = rgb.get_pixel(x as u32, y as u32);
        (pixel[c] as f32 / 255.0 - IMAGENET_MEAN[c]) / IMAGENET_STD[c]
    });

    Ok(tensor.into_tensor())
}

pub fn resize_image_to_tensor(
    image: &DynamicImage,
    width: u32,
    height: u32,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let resized = resize_image(image, width, height);
    image_to_tensor(&resized)
}

/// All-zero NCHW tensor of the model's input shape.
pub fn blank_tensor(
    width: u32,
    height: u32,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    Ok(Tensor::zero::<f32>(&[1, 3, height as usize, width as usize])?)
}
