use {crate::*, base::Vec2};

/// Where one plane of a frame buffer sits inside the buffer's mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneSpan {
    pub offset: usize,
    pub length: usize,
}

impl PlaneSpan {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Bytes that must be mapped from the start of the buffer to reach every plane.
pub fn mapping_len(planes: &[PlaneSpan]) -> usize {
    planes.iter().map(PlaneSpan::end).max().unwrap_or(0)
}

/// Reject drivers that pad luma rows past the frame width.
///
/// Frames are read as tightly packed YU12, so a wider stride would skew every row.
pub fn check_stride(stride: usize, size: Vec2<usize>) -> Result<(), VideoError> {
    if stride != size.x {
        return Err(VideoError::Device(format!(
            "rows are {} bytes apart for a width of {}",
            stride, size.x
        )));
    }
    Ok(())
}

/// Check the plane layout of a YU12 buffer of `size`.
///
/// Either three packed planes (Y, U, V) or a single plane holding all of them.
pub fn check_yu12_planes(planes: &[PlaneSpan], size: Vec2<usize>) -> Result<(), VideoError> {
    let luma = size.area();
    let chroma = (size.x / 2) * (size.y / 2);
    match planes {
        [y, u, v] => {
            if size.y > 0 {
                check_stride(y.length / size.y, size)?;
            }
            if y.length != luma || u.length != chroma || v.length != chroma {
                return Err(VideoError::Device(format!(
                    "unexpected YU12 plane lengths {}/{}/{} for {}",
                    y.length, u.length, v.length, size
                )));
            }
            Ok(())
        }
        [single] if single.length >= luma + 2 * chroma => Ok(()),
        [single] => Err(VideoError::Device(format!(
            "YU12 buffer of {} bytes is too small for {}",
            single.length, size
        ))),
        _ => Err(VideoError::Device(format!(
            "YU12 buffer has {} planes",
            planes.len()
        ))),
    }
}

/// Copy the planes out of `mapping` back to back and keep one frame's worth of bytes.
pub fn gather_planes(
    mapping: &[u8],
    planes: &[PlaneSpan],
    frame_len: usize,
) -> Result<Vec<u8>, VideoError> {
    let mut data = Vec::with_capacity(frame_len);
    for plane in planes {
        let bytes = mapping.get(plane.offset..plane.end()).ok_or_else(|| {
            VideoError::Stream(format!(
                "plane {}..{} is outside the {} byte mapping",
                plane.offset,
                plane.end(),
                mapping.len()
            ))
        })?;
        data.extend_from_slice(bytes);
    }
    // single-plane buffers may be padded past the last chroma row
    data.truncate(frame_len);
    Ok(data)
}
