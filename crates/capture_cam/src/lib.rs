//! Camera capture module for CircleCam
//!
//! Enumerates video capture devices by name, opens a live preview session
//! on a worker thread, and hands frames to the UI thread through a
//! depth-1 latest-frame-wins slot.

pub mod devices;
pub mod frame;
pub mod manager;
pub mod session;

pub use devices::{list_devices, resolve_preferred, DeviceRef};
pub use frame::FrameData;
pub use manager::{CaptureManager, NokhwaOpener, SourceOpener};
pub use session::CaptureSession;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("capture device not found: {0}")]
    NotFound(String),

    #[error("camera access denied by the OS")]
    PermissionDenied,

    #[error("capture device is busy")]
    DeviceBusy,

    #[error("camera backend error: {0}")]
    Backend(String),
}

pub type CaptureResult<T> = Result<T, CaptureError>;

impl CaptureError {
    /// Map a backend open failure onto the error taxonomy. The backend
    /// reports everything as strings, so this is a message heuristic with
    /// `Backend` as the catch-all.
    pub fn classify_open_error(device: &str, message: String) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("permission") || lower.contains("denied") || lower.contains("access") {
            CaptureError::PermissionDenied
        } else if lower.contains("busy") || lower.contains("in use") {
            CaptureError::DeviceBusy
        } else if lower.contains("not found") || lower.contains("no device") {
            CaptureError::NotFound(device.to_owned())
        } else {
            CaptureError::Backend(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CaptureError;

    #[test]
    fn open_errors_classify_by_message() {
        assert!(matches!(
            CaptureError::classify_open_error("cam", "Permission denied by user".into()),
            CaptureError::PermissionDenied
        ));
        assert!(matches!(
            CaptureError::classify_open_error("cam", "Device is busy".into()),
            CaptureError::DeviceBusy
        ));
        assert!(matches!(
            CaptureError::classify_open_error("cam", "device not found".into()),
            CaptureError::NotFound(_)
        ));
        assert!(matches!(
            CaptureError::classify_open_error("cam", "ioctl failed".into()),
            CaptureError::Backend(_)
        ));
    }
}
