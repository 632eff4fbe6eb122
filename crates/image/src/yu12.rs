use {crate::*, base::Vec2};

/// Borrowed views of the three planes of a YU12 frame.
#[derive(Debug, Clone, Copy)]
pub struct Yu12Planes<'a> {
    pub y: &'a [u8],
    pub u: &'a [u8],
    pub v: &'a [u8],
}

/// Split a YU12 buffer into its luma and chroma planes.
///
/// The buffer must hold exactly `W*H` luma bytes followed by two chroma
/// planes of `(W/2)*(H/2)` bytes each. Anything else is a corrupt frame.
pub fn split_yu12(size: Vec2<usize>, data: &[u8]) -> Result<Yu12Planes<'_>, ImageError> {
    let expected = PixelFormat::Yu12
        .frame_len(size)
        .ok_or(ImageError::InvalidSize(size))?;
    if data.len() != expected {
        return Err(ImageError::CorruptFrame {
            expected,
            got: data.len(),
        });
    }

    let y_len = size.area();
    let uv_len = (size.x / 2) * (size.y / 2);
    let (y, chroma) = data.split_at(y_len);
    let (u, v) = chroma.split_at(uv_len);
    Ok(Yu12Planes { y, u, v })
}

/// Upsample a subsampled chroma plane to `size` by repeating every sample
/// into a 2x2 block.
pub fn upsample_chroma(size: Vec2<usize>, plane: &[u8]) -> Vec<u8> {
    let uv_w = size.x / 2;
    let mut full = Vec::with_capacity(size.area());
    for row in 0..size.y {
        let src = &plane[(row / 2) * uv_w..(row / 2 + 1) * uv_w];
        for &sample in src {
            full.push(sample);
            full.push(sample);
        }
    }
    full
}

/// Expand a YU12 frame into an interleaved full-resolution YUV image.
pub fn yu12_to_yuv444(image: &Image) -> Result<Image, ImageError> {
    image.format.ensure_format(PixelFormat::Yu12)?;
    let planes = split_yu12(image.size, &image.data)?;

    let u = upsample_chroma(image.size, planes.u);
    let v = upsample_chroma(image.size, planes.v);

    let mut data = Vec::with_capacity(image.size.area() * 3);
    for ((&y, &u), &v) in planes.y.iter().zip(&u).zip(&v) {
        data.extend_from_slice(&[y, u, v]);
    }

    Ok(Image::new(image.size, data, PixelFormat::Yuv444))
}
