//! Live preview session
//!
//! The nokhwa camera runs on a dedicated worker thread and never crosses a
//! thread boundary. Frames travel to the UI thread through a bounded(1)
//! channel where a full slot drops the stale frame: preview freshness
//! matters more than completeness, so older frames are discarded rather
//! than queued.

use crate::frame::FrameData;
use crate::{CaptureError, CaptureResult, DeviceRef};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraFormat, FrameFormat, RequestedFormat, RequestedFormatType, Resolution};
use nokhwa::Camera;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

const REQUESTED_WIDTH: u32 = 640;
const REQUESTED_HEIGHT: u32 = 480;
const REQUESTED_FPS: u32 = 30;

pub struct CaptureSession {
    device: DeviceRef,
    frames: Receiver<FrameData>,
    running: Arc<AtomicBool>,
    last_error: Arc<Mutex<Option<CaptureError>>>,
    worker: Option<JoinHandle<()>>,
}

impl CaptureSession {
    /// Open a live preview for `device`. Blocks until the worker reports
    /// that the stream is up, so a failed open is synchronous.
    pub fn open(device: DeviceRef) -> CaptureResult<Self> {
        let (frame_tx, frame_rx) = bounded::<FrameData>(1);
        let (ready_tx, ready_rx) = bounded::<CaptureResult<()>>(1);
        let running = Arc::new(AtomicBool::new(true));
        let last_error = Arc::new(Mutex::new(None));

        let worker = {
            let device = device.clone();
            let running = running.clone();
            let last_error = last_error.clone();
            let frame_rx = frame_rx.clone();
            std::thread::Builder::new()
                .name("circlecam-capture".into())
                .spawn(move || {
                    worker_loop(device, running, ready_tx, frame_tx, frame_rx, last_error)
                })
                .map_err(|e| CaptureError::Backend(e.to_string()))?
        };

        let opened = ready_rx
            .recv()
            .map_err(|_| CaptureError::Backend("capture worker terminated during startup".into()));

        match opened {
            Ok(Ok(())) => Ok(Self {
                device,
                frames: frame_rx,
                running,
                last_error,
                worker: Some(worker),
            }),
            Ok(Err(err)) | Err(err) => {
                running.store(false, Ordering::SeqCst);
                let _ = worker.join();
                Err(err)
            }
        }
    }

    pub fn device(&self) -> &DeviceRef {
        &self.device
    }

    /// The newest frame produced since the last call, if any. Stale frames
    /// have already been dropped on the worker side.
    pub fn try_latest_frame(&self) -> Option<FrameData> {
        self.frames.try_iter().last()
    }

    /// A read error recorded by the worker, if one occurred.
    pub fn take_error(&self) -> Option<CaptureError> {
        self.last_error.lock().take()
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn worker_loop(
    device: DeviceRef,
    running: Arc<AtomicBool>,
    ready_tx: Sender<CaptureResult<()>>,
    frame_tx: Sender<FrameData>,
    frame_rx: Receiver<FrameData>,
    last_error: Arc<Mutex<Option<CaptureError>>>,
) {
    let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
        CameraFormat::new(
            Resolution::new(REQUESTED_WIDTH, REQUESTED_HEIGHT),
            FrameFormat::YUYV,
            REQUESTED_FPS,
        ),
    ));

    let mut camera = match Camera::new(device.index.clone(), requested) {
        Ok(camera) => camera,
        Err(err) => {
            let _ = ready_tx.send(Err(CaptureError::classify_open_error(
                &device.name,
                err.to_string(),
            )));
            return;
        }
    };

    if let Err(err) = camera.open_stream() {
        let _ = ready_tx.send(Err(CaptureError::classify_open_error(
            &device.name,
            err.to_string(),
        )));
        return;
    }

    let _ = ready_tx.send(Ok(()));
    log::info!("camera \"{}\" streaming", device.name);

    while running.load(Ordering::SeqCst) {
        match camera.frame() {
            Ok(buffer) => match buffer.decode_image::<RgbFormat>() {
                Ok(image) => {
                    let frame =
                        FrameData::from_rgb(image.width(), image.height(), image.as_raw());
                    send_latest(&frame_tx, &frame_rx, frame);
                }
                Err(err) => {
                    *last_error.lock() =
                        Some(CaptureError::Backend(format!("frame decode: {err}")));
                }
            },
            Err(err) => {
                if running.load(Ordering::SeqCst) {
                    *last_error.lock() =
                        Some(CaptureError::Backend(format!("frame read: {err}")));
                }
            }
        }
    }

    let _ = camera.stop_stream();
    log::info!("camera \"{}\" stopped", device.name);
}

/// Latest-frame-wins handoff: a full slot means the UI has not consumed
/// the previous frame yet, so it is replaced rather than queued behind.
fn send_latest(tx: &Sender<FrameData>, rx: &Receiver<FrameData>, frame: FrameData) {
    match tx.try_send(frame) {
        Ok(()) => {}
        Err(TrySendError::Full(frame)) => {
            let _ = rx.try_recv();
            let _ = tx.try_send(frame);
        }
        Err(TrySendError::Disconnected(_)) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::send_latest;
    use crate::frame::FrameData;
    use crossbeam_channel::bounded;

    fn frame(tag: u8) -> FrameData {
        FrameData { width: 1, height: 1, data: vec![tag, 0, 0, 255] }
    }

    #[test]
    fn slow_consumer_sees_only_the_newest_frame() {
        let (tx, rx) = bounded(1);
        send_latest(&tx, &rx, frame(1));
        send_latest(&tx, &rx, frame(2));
        send_latest(&tx, &rx, frame(3));

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].data[0], 3);
    }

    #[test]
    fn empty_slot_accepts_the_frame_directly() {
        let (tx, rx) = bounded(1);
        send_latest(&tx, &rx, frame(7));
        assert_eq!(rx.try_iter().last().unwrap().data[0], 7);
    }
}
