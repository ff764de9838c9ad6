//! Frame data handed from the capture worker to the UI thread

/// One decoded video frame, tightly packed RGBA.
#[derive(Debug, Clone)]
pub struct FrameData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameData {
    /// Expand a tightly packed RGB buffer to opaque RGBA.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Self {
        let pixels = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixels * 4);
        for chunk in rgb.chunks_exact(3) {
            data.extend_from_slice(chunk);
            data.push(0xFF);
        }
        Self { width, height, data }
    }
}
