use core::{
    cmp::Ordering,
    ffi::{c_int, CStr},
};
use std::{ptr, rc::Rc};

use glfw30_sys as sys;

use crate::{
    error::{self, checked, Error, ErrorKind},
    raw_slice, Terminate,
};

pub const GAMMA_RAMP_SIZE: usize = sys::GLFW_GAMMA_RAMP_SIZE;

#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonitorId(pub(crate) usize);

impl MonitorId {
    pub fn monitor_ptr(self) -> *const sys::GLFWmonitor {
        self.0 as *const _
    }

    pub fn monitor_mut_ptr(self) -> *mut sys::GLFWmonitor {
        self.0 as *mut _
    }
}

/// A connected display. The handle keeps GLFW initialized while it is alive, but
/// the native monitor itself may be disconnected at any time.
#[derive(Debug)]
pub struct Monitor {
    pub(crate) monitor_ptr: *mut sys::GLFWmonitor,
    pub(crate) _terminate: Rc<Terminate>,
}

impl Monitor {
    pub fn monitor_id(&self) -> MonitorId {
        MonitorId(self.monitor_ptr as usize)
    }

    #[doc(alias = "glfwGetMonitorName")]
    pub fn get_name(&self) -> Result<String, Error> {
        let name_ptr = checked(|| unsafe { sys::glfwGetMonitorName(self.monitor_ptr) })?;
        if name_ptr.is_null() {
            return Err(error::unknown_error("glfwGetMonitorName"));
        }
        Ok(unsafe { CStr::from_ptr(name_ptr) }.to_string_lossy().into_owned())
    }

    /// Position, in screen coordinates, of the upper-left corner of the monitor.
    #[doc(alias = "glfwGetMonitorPos")]
    pub fn get_pos(&self) -> Result<(i32, i32), Error> {
        let mut xpos = 0;
        let mut ypos = 0;
        checked(|| unsafe { sys::glfwGetMonitorPos(self.monitor_ptr, &mut xpos, &mut ypos) })?;
        Ok((xpos, ypos))
    }

    /// Physical size of the display area in millimetres.
    #[doc(alias = "glfwGetMonitorPhysicalSize")]
    pub fn get_physical_size(&self) -> Result<(i32, i32), Error> {
        let mut width = 0;
        let mut height = 0;
        checked(|| unsafe {
            sys::glfwGetMonitorPhysicalSize(self.monitor_ptr, &mut width, &mut height)
        })?;
        Ok((width, height))
    }

    #[doc(alias = "glfwGetVideoModes")]
    pub fn get_video_modes(&self) -> Result<Vec<VidMode>, Error> {
        let mut count = 0;
        let modes_ptr = checked(|| unsafe { sys::glfwGetVideoModes(self.monitor_ptr, &mut count) })?;
        video_modes(modes_ptr, count)
    }

    #[doc(alias = "glfwGetVideoMode")]
    pub fn get_video_mode(&self) -> Result<VidMode, Error> {
        let mode = checked(|| unsafe { sys::glfwGetVideoMode(self.monitor_ptr) })?;
        current_video_mode(mode)
    }

    /// Sets a gamma ramp generated from `gamma`; see [`GammaRamp::from_exponent`].
    #[doc(alias = "glfwSetGamma")]
    pub fn set_gamma(&self, gamma: f32) -> Result<(), Error> {
        validate_gamma(gamma)?;
        checked(|| unsafe { sys::glfwSetGamma(self.monitor_ptr, gamma) })
    }

    #[doc(alias = "glfwGetGammaRamp")]
    pub fn get_gamma_ramp(&self) -> Result<GammaRamp, Error> {
        let mut ramp = sys::GLFWgammaramp::default();
        checked(|| unsafe { sys::glfwGetGammaRamp(self.monitor_ptr, &mut ramp) })?;
        Ok(ramp.into())
    }

    #[doc(alias = "glfwSetGammaRamp")]
    pub fn set_gamma_ramp(&self, ramp: &GammaRamp) -> Result<(), Error> {
        let ramp = sys::GLFWgammaramp::from(*ramp);
        checked(|| unsafe { sys::glfwSetGammaRamp(self.monitor_ptr, &ramp) })
    }
}

// The array is owned by GLFW and only valid until the monitor configuration changes.
fn video_modes(modes_ptr: *const sys::GLFWvidmode, count: c_int) -> Result<Vec<VidMode>, Error> {
    if modes_ptr.is_null() {
        return Err(error::unknown_error("glfwGetVideoModes"));
    }
    let modes = unsafe { raw_slice(modes_ptr, count) };
    Ok(modes.iter().copied().map(VidMode::from).collect())
}

/// GLFW signals failure with a zeroed mode.
fn current_video_mode(mode: sys::GLFWvidmode) -> Result<VidMode, Error> {
    if mode == sys::GLFWvidmode::default() {
        Err(error::unknown_error("glfwGetVideoMode"))
    } else {
        Ok(mode.into())
    }
}

impl PartialEq for Monitor {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.monitor_ptr, other.monitor_ptr)
    }
}

impl Eq for Monitor {}

/// One display configuration supported by a monitor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct VidMode {
    pub width: i32,
    pub height: i32,
    pub red_bits: i32,
    pub green_bits: i32,
    pub blue_bits: i32,
}

impl VidMode {
    pub fn bits_per_pixel(&self) -> i32 {
        self.red_bits + self.green_bits + self.blue_bits
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }
}

/// Orders by color depth first, then by area, then by width: the order in which
/// GLFW lists video modes.
impl Ord for VidMode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bits_per_pixel()
            .cmp(&other.bits_per_pixel())
            .then_with(|| self.area().cmp(&other.area()))
            .then_with(|| self.width.cmp(&other.width))
            .then_with(|| self.height.cmp(&other.height))
            .then_with(|| self.red_bits.cmp(&other.red_bits))
            .then_with(|| self.green_bits.cmp(&other.green_bits))
    }
}

impl PartialOrd for VidMode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<sys::GLFWvidmode> for VidMode {
    fn from(mode: sys::GLFWvidmode) -> Self {
        VidMode {
            width: mode.width,
            height: mode.height,
            red_bits: mode.redBits,
            green_bits: mode.greenBits,
            blue_bits: mode.blueBits,
        }
    }
}

impl From<VidMode> for sys::GLFWvidmode {
    fn from(mode: VidMode) -> Self {
        sys::GLFWvidmode {
            width: mode.width,
            height: mode.height,
            redBits: mode.red_bits,
            greenBits: mode.green_bits,
            blueBits: mode.blue_bits,
        }
    }
}

/// A per-channel lookup table mapping linear intensities to display intensities.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GammaRamp {
    pub red: [u16; GAMMA_RAMP_SIZE],
    pub green: [u16; GAMMA_RAMP_SIZE],
    pub blue: [u16; GAMMA_RAMP_SIZE],
}

impl Default for GammaRamp {
    fn default() -> Self {
        GammaRamp {
            red: [0; GAMMA_RAMP_SIZE],
            green: [0; GAMMA_RAMP_SIZE],
            blue: [0; GAMMA_RAMP_SIZE],
        }
    }
}

fn validate_gamma(gamma: f32) -> Result<(), Error> {
    if gamma.is_finite() && gamma > 0.0 {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::InvalidValue,
            format!("Invalid gamma value {}", gamma),
        ))
    }
}

impl GammaRamp {
    /// The ramp `glfwSetGamma` generates for `gamma`, identical on all channels.
    pub fn from_exponent(gamma: f32) -> Result<GammaRamp, Error> {
        validate_gamma(gamma)?;
        let mut channel = [0u16; GAMMA_RAMP_SIZE];
        let exponent = 1.0 / f64::from(gamma);
        for (i, entry) in channel.iter_mut().enumerate() {
            let value = i as f64 / (GAMMA_RAMP_SIZE - 1) as f64;
            let value = value.powf(exponent) * 65535.0 + 0.5;
            *entry = value.min(65535.0) as u16;
        }
        Ok(GammaRamp {
            red: channel,
            green: channel,
            blue: channel,
        })
    }
}

impl From<sys::GLFWgammaramp> for GammaRamp {
    fn from(ramp: sys::GLFWgammaramp) -> Self {
        GammaRamp {
            red: ramp.red,
            green: ramp.green,
            blue: ramp.blue,
        }
    }
}

impl From<GammaRamp> for sys::GLFWgammaramp {
    fn from(ramp: GammaRamp) -> Self {
        sys::GLFWgammaramp {
            red: ramp.red,
            green: ramp.green,
            blue: ramp.blue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(width: i32, height: i32, bits: i32) -> VidMode {
        VidMode {
            width,
            height,
            red_bits: bits,
            green_bits: bits,
            blue_bits: bits,
        }
    }

    #[test]
    fn linear_gamma_ramp() {
        let ramp = GammaRamp::from_exponent(1.0).unwrap();
        assert_eq!(0, ramp.red[0]);
        assert_eq!(257, ramp.red[1]);
        assert_eq!(32896, ramp.green[128]);
        assert_eq!(65535, ramp.blue[255]);
        assert_eq!(ramp.red, ramp.green);
        assert_eq!(ramp.green, ramp.blue);
    }

    #[test]
    fn gamma_ramp_is_monotonic_and_bounded() {
        for gamma in [0.5f32, 1.8, 2.2, 10.0] {
            let ramp = GammaRamp::from_exponent(gamma).unwrap();
            assert_eq!(0, ramp.red[0]);
            assert_eq!(65535, ramp.red[GAMMA_RAMP_SIZE - 1]);
            assert!(ramp.red.windows(2).all(|pair| pair[0] <= pair[1]), "gamma {}", gamma);
        }
        let bright = GammaRamp::from_exponent(2.2).unwrap();
        let dark = GammaRamp::from_exponent(0.5).unwrap();
        assert!(bright.red[64] > dark.red[64]);
    }

    #[test]
    fn invalid_gamma_is_rejected() {
        for gamma in [0.0f32, -1.0, f32::NAN, f32::INFINITY] {
            let err = GammaRamp::from_exponent(gamma).unwrap_err();
            assert_eq!(Some(ErrorKind::InvalidValue), err.kind());
        }
    }

    #[test]
    fn gamma_ramp_converts_to_raw() {
        let ramp = GammaRamp::from_exponent(2.2).unwrap();
        let raw = sys::GLFWgammaramp::from(ramp);
        assert_eq!(ramp.red, raw.red);
        assert_eq!(ramp, GammaRamp::from(raw));
    }

    #[test]
    fn vidmode_from_raw() {
        let raw = sys::GLFWvidmode {
            width: 1920,
            height: 1080,
            redBits: 8,
            greenBits: 8,
            blueBits: 8,
        };
        let converted = VidMode::from(raw);
        assert_eq!(mode(1920, 1080, 8), converted);
        assert_eq!(24, converted.bits_per_pixel());
        assert_eq!(raw, sys::GLFWvidmode::from(converted));
    }

    #[test]
    fn vidmodes_sort_by_depth_then_area() {
        let mut modes = vec![
            mode(1920, 1080, 8),
            mode(640, 480, 8),
            mode(1920, 1080, 5),
            mode(800, 600, 8),
        ];
        modes.sort();
        assert_eq!(
            vec![
                mode(1920, 1080, 5),
                mode(640, 480, 8),
                mode(800, 600, 8),
                mode(1920, 1080, 8),
            ],
            modes
        );
    }

    #[test]
    fn gamma_ramp_matches_double_precision_pow() {
        for gamma in [0.8f32, 1.8, 2.2] {
            let ramp = GammaRamp::from_exponent(gamma).unwrap();
            for (i, &entry) in ramp.red.iter().enumerate() {
                let value = (i as f64 / 255.0).powf(1.0 / f64::from(gamma)) * 65535.0 + 0.5;
                assert_eq!(value.min(65535.0) as u16, entry, "gamma {} entry {}", gamma, i);
            }
        }
    }

    #[test]
    fn zeroed_video_mode_is_an_error() {
        let err = current_video_mode(sys::GLFWvidmode::default()).unwrap_err();
        assert_eq!(-1, err.code);
        let raw = sys::GLFWvidmode {
            width: 800,
            height: 600,
            redBits: 8,
            greenBits: 8,
            blueBits: 8,
        };
        assert_eq!(Ok(mode(800, 600, 8)), current_video_mode(raw));
    }

    #[test]
    fn video_mode_arrays() {
        let raw = [
            sys::GLFWvidmode { width: 640, height: 480, redBits: 8, greenBits: 8, blueBits: 8 },
            sys::GLFWvidmode { width: 800, height: 600, redBits: 8, greenBits: 8, blueBits: 8 },
        ];
        assert_eq!(
            Ok(vec![mode(640, 480, 8), mode(800, 600, 8)]),
            video_modes(raw.as_ptr(), 2)
        );
        assert_eq!(Ok(Vec::new()), video_modes(raw.as_ptr(), 0));
        assert!(video_modes(ptr::null(), 2).is_err());
    }

    #[test]
    fn monitor_id_round_trips_pointer() {
        let id = MonitorId(0x1000);
        assert_eq!(0x1000 as *mut sys::GLFWmonitor, id.monitor_mut_ptr());
        assert_eq!(0x1000 as *const sys::GLFWmonitor, id.monitor_ptr());
    }
}
