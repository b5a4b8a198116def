//! Lifecycle of all configured devices.

use tuya_leds_core::{LedPosition, Milliseconds};

use crate::{
    Canvas, ConfigError, DeviceConfig, DeviceDisplay, RenderMode, Transport, VirtualDevice,
};

/// Owns every initialized device and drives them on host ticks.
///
/// Failures of a single device are logged and never stop the other ones.
pub struct App<T> {
    devices: Vec<VirtualDevice<T>>,
}

impl<T> Default for App<T> {
    fn default() -> Self {
        Self {
            devices: Vec::new(),
        }
    }
}

impl<T: Transport> App<T> {
    /// Creates an application without devices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers a new device.
    ///
    /// On failure no device is added.
    pub fn initialize<D>(
        &mut self,
        config: DeviceConfig,
        transport: T,
        display: &mut D,
    ) -> Result<&mut VirtualDevice<T>, ConfigError>
    where
        D: DeviceDisplay + ?Sized,
    {
        let debug_mode = config.debug_mode;
        let device = VirtualDevice::new(config, transport, display).map_err(|err| {
            log::error!("Error during initialization: {err}");
            err
        })?;

        log::info!(
            "Initialized successfully with {} LEDs",
            device.led_count()
        );
        if debug_mode {
            let config = device.config();
            log::info!("Debug mode enabled");
            log::info!("Refresh rate: {}ms", config.refresh_rate);
            match config.custom_led_count {
                0 => log::info!("Custom LED count: Auto"),
                count => log::info!("Custom LED count: {count}"),
            }
        }

        let index = self.devices.len();
        self.devices.push(device);
        Ok(&mut self.devices[index])
    }

    /// Renders the canvas on every device.
    ///
    /// Returns the number of sent frames.
    pub fn render(&mut self, canvas: &dyn Canvas, now: Milliseconds) -> usize {
        let mut sent = 0;
        for device in &mut self.devices {
            match device.render(RenderMode::Canvas(canvas), now) {
                Ok(Some(_)) => sent += 1,
                Ok(None) => {}
                Err(err) => {
                    log::warn!(
                        "Skipped frame for {}: {err}",
                        device.config().device_ip
                    );
                }
            }
        }
        sent
    }

    /// Switches off and removes all devices.
    ///
    /// Returns the removed devices, so their transports can be released.
    pub fn shutdown(&mut self, now: Milliseconds) -> Vec<VirtualDevice<T>> {
        log::info!("Shutting down Tuya devices...");
        for device in &mut self.devices {
            if let Err(err) = device.shutdown(now) {
                log::error!(
                    "Error during shutdown of {}: {err}",
                    device.config().device_ip
                );
            }
        }

        let devices = std::mem::take(&mut self.devices);
        log::info!("Shutdown complete");
        devices
    }

    pub fn devices(&self) -> &[VirtualDevice<T>] {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut [VirtualDevice<T>] {
        &mut self.devices
    }

    /// LED names of the first device, a single LED if there are no devices.
    pub fn led_names(&self) -> Vec<String> {
        self.devices.first().map_or_else(
            || vec!["Led 1".to_owned()],
            VirtualDevice::led_names,
        )
    }

    /// LED positions of the first device, a single LED if there are no devices.
    pub fn led_positions(&self) -> Vec<LedPosition> {
        self.devices.first().map_or_else(
            || vec![LedPosition::default()],
            |device| device.led_positions().to_vec(),
        )
    }
}
