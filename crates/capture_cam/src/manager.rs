//! Capture source management
//!
//! Owns at most one live preview session. Switching devices closes the
//! current session before opening the new one, so no two sessions ever
//! overlap and no torn frames from different devices can be displayed.

use crate::session::CaptureSession;
use crate::{CaptureResult, DeviceRef};

/// Opens preview sessions for a device. The seam exists so tests can
/// observe open/close ordering without hardware.
pub trait SourceOpener {
    type Session;

    fn open(&mut self, device: &DeviceRef) -> CaptureResult<Self::Session>;
}

/// Opens real camera-backed sessions.
#[derive(Debug, Default)]
pub struct NokhwaOpener;

impl SourceOpener for NokhwaOpener {
    type Session = CaptureSession;

    fn open(&mut self, device: &DeviceRef) -> CaptureResult<CaptureSession> {
        CaptureSession::open(device.clone())
    }
}

pub struct CaptureManager<O: SourceOpener> {
    opener: O,
    session: Option<O::Session>,
    active: Option<DeviceRef>,
}

impl<O: SourceOpener> CaptureManager<O> {
    pub fn new(opener: O) -> Self {
        Self { opener, session: None, active: None }
    }

    pub fn active_device(&self) -> Option<&DeviceRef> {
        self.active.as_ref()
    }

    pub fn session(&self) -> Option<&O::Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut O::Session> {
        self.session.as_mut()
    }

    /// Tear down the current session, then open `device`. On failure the
    /// preview stays blank (no session) rather than keeping the old one
    /// alive; the error is returned for surfacing.
    pub fn switch(&mut self, device: DeviceRef) -> CaptureResult<()> {
        self.session = None;
        self.active = None;

        match self.opener.open(&device) {
            Ok(session) => {
                self.session = Some(session);
                self.active = Some(device);
                Ok(())
            }
            Err(err) => {
                log::warn!("could not open camera \"{}\": {err}", device.name);
                Err(err)
            }
        }
    }

    pub fn close(&mut self) {
        self.session = None;
        self.active = None;
    }
}
