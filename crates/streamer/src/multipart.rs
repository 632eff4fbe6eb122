use bytes::{BufMut, Bytes, BytesMut};

/// Boundary token separating the parts of the MJPEG response.
pub const BOUNDARY: &str = "frame";

/// Content type of the `/video_feed` response.
pub const CONTENT_TYPE: &str = "multipart/x-mixed-replace; boundary=frame";

const PART_HEADER: &[u8] = b"--frame\r\nContent-Type: image/jpeg\r\n\r\n";

/// Wrap one JPEG as a multipart part: boundary line, part header, the JPEG bytes, CRLF.
pub fn encode_part(jpeg: &[u8]) -> Bytes {
    let mut part = BytesMut::with_capacity(PART_HEADER.len() + jpeg.len() + 2);
    part.put_slice(PART_HEADER);
    part.put_slice(jpeg);
    part.put_slice(b"\r\n");
    part.freeze()
}
