//! Default-output volume enforcement over the Core Audio endpoint API
//!
//! Each enforcement call stands alone: COM is initialized, the endpoint
//! interfaces are acquired, and everything is released again before the
//! call returns, on success and failure alike. The interface chain is
//! enumerator -> default render device -> endpoint volume control.

use std::ptr;
use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
use windows::Win32::Media::Audio::{
    IMMDevice, IMMDeviceEnumerator, MMDeviceEnumerator, eConsole, eRender,
};
use windows::Win32::System::Com::{
    CLSCTX_ALL, COINIT_APARTMENTTHREADED, COINIT_DISABLE_OLE1DDE, CoCreateInstance, CoInitializeEx,
    CoUninitialize,
};
use windows::core::GUID;

/// Error types for audio endpoint operations
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("COM initialization failed")]
    ComInit(#[source] windows::core::Error),

    #[error("Audio device enumerator unavailable")]
    EnumeratorUnavailable(#[source] windows::core::Error),

    #[error("No default audio render endpoint")]
    NoDefaultEndpoint(#[source] windows::core::Error),

    #[error("Failed to activate endpoint volume control")]
    ActivationFailed(#[source] windows::core::Error),

    #[error("Failed to set master volume")]
    VolumeWriteFailed(#[source] windows::core::Error),

    #[error("Failed to change mute state")]
    MuteWriteFailed(#[source] windows::core::Error),

    #[error("Failed to read endpoint state")]
    ReadFailed(#[source] windows::core::Error),
}

/// Scoped COM apartment.
///
/// Constructed only when `CoInitializeEx` succeeds, so the matching
/// `CoUninitialize` never runs against an apartment that was not set up.
/// S_FALSE (already initialized on this thread) still must be balanced
/// and therefore also yields a guard.
struct ComSession;

impl ComSession {
    fn new() -> Result<Self, AudioError> {
        let hr = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE) };
        hr.map_err(AudioError::ComInit)?;
        Ok(Self)
    }
}

impl Drop for ComSession {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}

/// Volume control for the default audio render endpoint.
///
/// Field order is load-bearing: the COM interface must drop before the
/// session uninitializes the apartment.
pub struct EndpointVolume {
    endpoint: IAudioEndpointVolume,
    _session: ComSession,
}

impl EndpointVolume {
    /// Opens the volume control of the default render endpoint for the
    /// console role.
    ///
    /// Any step's failure releases whatever was acquired before it and
    /// nothing else.
    pub fn open_default_output() -> Result<Self, AudioError> {
        let session = ComSession::new()?;
        let endpoint = unsafe {
            let enumerator: IMMDeviceEnumerator =
                CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)
                    .map_err(AudioError::EnumeratorUnavailable)?;
            let device: IMMDevice = enumerator
                .GetDefaultAudioEndpoint(eRender, eConsole)
                .map_err(AudioError::NoDefaultEndpoint)?;
            device
                .Activate::<IAudioEndpointVolume>(CLSCTX_ALL, None)
                .map_err(AudioError::ActivationFailed)?
        };
        Ok(Self {
            endpoint,
            _session: session,
        })
    }

    /// Sets the master volume, where 1.0 is full scale.
    pub fn set_master_scalar(&self, level: f32) -> Result<(), AudioError> {
        unsafe {
            self.endpoint
                .SetMasterVolumeLevelScalar(level, ptr::null::<GUID>())
                .map_err(AudioError::VolumeWriteFailed)
        }
    }

    /// Sets or clears the endpoint mute flag.
    pub fn set_mute(&self, mute: bool) -> Result<(), AudioError> {
        unsafe {
            self.endpoint
                .SetMute(mute, ptr::null::<GUID>())
                .map_err(AudioError::MuteWriteFailed)
        }
    }

    /// Reads the current master volume scalar.
    pub fn master_scalar(&self) -> Result<f32, AudioError> {
        unsafe {
            self.endpoint
                .GetMasterVolumeLevelScalar()
                .map_err(AudioError::ReadFailed)
        }
    }

    /// Reads the current mute flag.
    pub fn is_muted(&self) -> Result<bool, AudioError> {
        unsafe {
            self.endpoint
                .GetMute()
                .map(|muted| muted.as_bool())
                .map_err(AudioError::ReadFailed)
        }
    }
}

/// Drives the default output to full volume and clears the mute flag.
///
/// Unmute runs only after the volume write succeeds.
pub fn enforce_max_volume() -> Result<(), AudioError> {
    let output = EndpointVolume::open_default_output()?;
    output.set_master_scalar(1.0)?;
    output.set_mute(false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforcement_leaves_output_at_full_volume_unmuted() {
        // Headless environments have no default endpoint; a typed error on
        // open is the expected outcome there and nothing is leaked.
        match EndpointVolume::open_default_output() {
            Ok(output) => {
                if output.set_master_scalar(1.0).is_ok() && output.set_mute(false).is_ok() {
                    let level = output.master_scalar().unwrap();
                    assert!((level - 1.0).abs() < 1e-3);
                    assert!(!output.is_muted().unwrap());
                }
            }
            Err(
                AudioError::ComInit(_)
                | AudioError::EnumeratorUnavailable(_)
                | AudioError::NoDefaultEndpoint(_),
            ) => {}
            Err(e) => panic!("Unexpected error: {e}"),
        }
    }

    #[test]
    fn enforcement_is_repeatable() {
        // Back-to-back calls each set up and tear down their own COM
        // session; the second must behave exactly like the first.
        let first = enforce_max_volume();
        let second = enforce_max_volume();
        assert_eq!(first.is_ok(), second.is_ok());
    }
}
