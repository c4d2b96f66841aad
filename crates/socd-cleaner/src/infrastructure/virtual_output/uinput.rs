//! uinput-backed virtual keyboard.
//!
//! # What is uinput? (for beginners)
//!
//! `uinput` is the Linux kernel's interface for creating input devices from
//! user space.  A process opens `/dev/uinput`, declares which event types
//! and key codes the device will be able to emit, submits a name and a
//! bus/vendor/product identity, and asks the kernel to create the device.
//! From that point on, anything written to it is indistinguishable from
//! input produced by real hardware – which is exactly what lets the cleaned
//! key stream reach games as if it came from a keyboard.
//!
//! The `evdev` crate wraps the ioctl sequence (`UI_SET_EVBIT`,
//! `UI_SET_KEYBIT` per key, `UI_DEV_SETUP`, `UI_DEV_CREATE`); dropping the
//! handle issues the destroy.  The virtual device declares capability for
//! exactly the four tracked key codes and nothing else.

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, BusType, EventType, InputEvent, InputId, Key};
use tracing::{info, warn};

use socd_core::TrackedKey;

use super::{KeySink, OutputError};

/// Name the virtual device registers under.
const DEVICE_NAME: &str = "socd-cleaner";

/// Fixed identity for the virtual device.  Arbitrary but stable values, so
/// udev rules and diagnostics can match the device across runs.
const VENDOR_ID: u16 = 0x1234;
const PRODUCT_ID: u16 = 0x5678;
const VERSION: u16 = 0x1;

/// The synthetic keyboard the cleaned keystate is broadcast through.
///
/// Owns the device lifecycle: creation is all-or-nothing (any declaration
/// step failing aborts without a partial device left registered) and
/// [`UinputKeyboard::destroy`] is idempotent, so every shutdown path can
/// call it unconditionally.
pub struct UinputKeyboard {
    device: Option<VirtualDevice>,
}

impl UinputKeyboard {
    /// Creates the virtual device, declaring capability for `keys` only.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::CreateFailed`] if `/dev/uinput` cannot be
    /// opened or any declaration/creation step fails.
    pub fn create(keys: &[TrackedKey]) -> Result<Self, OutputError> {
        let mut key_set = AttributeSet::<Key>::new();
        for key in keys {
            key_set.insert(Key::new(key.code()));
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(OutputError::CreateFailed)?
            .name(DEVICE_NAME)
            .input_id(InputId::new(BusType::BUS_USB, VENDOR_ID, PRODUCT_ID, VERSION))
            .with_keys(&key_set)
            .map_err(OutputError::CreateFailed)?
            .build()
            .map_err(OutputError::CreateFailed)?;

        info!("virtual output device \"{DEVICE_NAME}\" created");
        Ok(Self {
            device: Some(device),
        })
    }

    /// Destroys the virtual device.  Safe to call more than once; only the
    /// first call does anything.
    pub fn destroy(&mut self) {
        if let Some(device) = self.device.take() {
            // Dropping the handle closes /dev/uinput, which makes the kernel
            // unregister the device.
            drop(device);
            info!("virtual output device destroyed");
        }
    }
}

impl Drop for UinputKeyboard {
    fn drop(&mut self) {
        if self.device.is_some() {
            warn!("virtual device dropped without explicit destroy");
            self.destroy();
        }
    }
}

impl KeySink for UinputKeyboard {
    fn write_key(&mut self, code: u16, pressed: bool) -> Result<(), OutputError> {
        let device = self.device.as_mut().ok_or(OutputError::Destroyed)?;
        let event = InputEvent::new(EventType::KEY, code, i32::from(pressed));
        // emit() appends the SYN_REPORT marker required after each record,
        // satisfying the KeySink contract of one marker per key write.
        device.emit(&[event]).map_err(OutputError::WriteFailed)
    }
}
