//! Capture device enumeration
//!
//! Devices are identified by their human-readable name. The name is both
//! the menu label and the persisted selector; enumeration order is not
//! stable across calls, so an index is never stored.

use crate::{CaptureError, CaptureResult};
use nokhwa::utils::{ApiBackend, CameraIndex};

/// One enumerated capture device. The index is only valid for the
/// enumeration it came from; identity across runs is the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRef {
    pub name: String,
    pub index: CameraIndex,
}

/// List the capture devices currently attached.
pub fn list_devices() -> CaptureResult<Vec<DeviceRef>> {
    let cameras = nokhwa::query(ApiBackend::Auto)
        .map_err(|e| CaptureError::Backend(e.to_string()))?;
    Ok(cameras
        .into_iter()
        .map(|info| DeviceRef {
            name: info.human_name(),
            index: info.index().clone(),
        })
        .collect())
}

/// Pick the device matching the persisted name, falling back to the first
/// enumerated device when the name is absent. The fallback is a documented
/// policy, not an error; it is logged so the substitution is visible.
/// Returns None only when no devices exist at all.
pub fn resolve_preferred(devices: &[DeviceRef], preferred: Option<&str>) -> Option<DeviceRef> {
    match preferred {
        Some(name) => devices.iter().find(|d| d.name == name).cloned().or_else(|| {
            let fallback = devices.first().cloned();
            if let Some(ref device) = fallback {
                log::warn!("camera \"{name}\" not attached, falling back to \"{}\"", device.name);
            }
            fallback
        }),
        None => devices.first().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_preferred, DeviceRef};
    use nokhwa::utils::CameraIndex;

    fn device(name: &str, index: u32) -> DeviceRef {
        DeviceRef {
            name: name.to_owned(),
            index: CameraIndex::Index(index),
        }
    }

    #[test]
    fn preferred_name_wins_regardless_of_order() {
        let devices = vec![device("Built-in Camera", 0), device("Elgato Facecam", 1)];
        let chosen = resolve_preferred(&devices, Some("Elgato Facecam")).unwrap();
        assert_eq!(chosen.name, "Elgato Facecam");
    }

    #[test]
    fn missing_preferred_falls_back_to_first() {
        let devices = vec![device("Built-in Camera", 0)];
        let chosen = resolve_preferred(&devices, Some("Elgato Facecam")).unwrap();
        assert_eq!(chosen.name, "Built-in Camera");
    }

    #[test]
    fn no_preference_takes_first_enumerated() {
        let devices = vec![device("Built-in Camera", 0), device("Elgato Facecam", 1)];
        let chosen = resolve_preferred(&devices, None).unwrap();
        assert_eq!(chosen.name, "Built-in Camera");
    }

    #[test]
    fn empty_enumeration_yields_none() {
        assert_eq!(resolve_preferred(&[], Some("Elgato Facecam")), None);
        assert_eq!(resolve_preferred(&[], None), None);
    }
}
