//! A single virtual LED device.

use tuya_leds_core::{
    Error, Frame, Hsv, LedCount, LedPosition, LedSource, LedTopology, Milliseconds,
    RenderScheduler, RGB8,
};

use crate::{Canvas, ConfigError, DeviceConfig, DeviceDisplay, PipelineResult, Transport};

/// Where the colors of the next frame come from.
#[derive(Clone, Copy)]
pub enum RenderMode<'a> {
    /// Sample every LED from the host canvas.
    Canvas(&'a dyn Canvas),
    /// Paint every LED with the same color.
    Forced(RGB8),
}

/// A configured device with its own LED layout and transport.
pub struct VirtualDevice<T> {
    config: DeviceConfig,
    source: LedSource,
    topology: LedTopology,
    scheduler: RenderScheduler,
    transport: T,
}

impl<T: Transport> VirtualDevice<T> {
    /// Creates a device and registers its layout with the host display.
    ///
    /// The configuration must be valid, no device is created otherwise.
    pub fn new<D>(
        config: DeviceConfig,
        transport: T,
        display: &mut D,
    ) -> Result<Self, ConfigError>
    where
        D: DeviceDisplay + ?Sized,
    {
        config.validate()?;
        let source = config.led_source()?;

        let device = Self {
            scheduler: RenderScheduler::new(config.frame_delay()),
            topology: LedTopology::resolve(source),
            source,
            config,
            transport,
        };
        device.register(display);
        Ok(device)
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn topology(&self) -> &LedTopology {
        &self.topology
    }

    pub fn led_count(&self) -> LedCount {
        self.topology.led_count()
    }

    /// Returns the LED names, starting from `Led 1`.
    pub fn led_names(&self) -> Vec<String> {
        self.topology.led_names()
    }

    pub fn led_positions(&self) -> &[LedPosition] {
        self.topology.positions()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Replaces the LED layout with `count` LEDs.
    ///
    /// An out of range count leaves the current layout untouched.
    pub fn set_led_count<D>(&mut self, count: u32, display: &mut D) -> PipelineResult<()>
    where
        D: DeviceDisplay + ?Sized,
    {
        let led_count = LedCount::new(count).map_err(|err| {
            log::warn!("Invalid LED count: {count}. Must be between 1 and 2000.");
            err
        })?;

        self.source = LedSource::Custom(led_count);
        self.topology = LedTopology::resolve(self.source);
        self.register(display);
        log::info!("LED count changed to {led_count}");
        Ok(())
    }

    /// Handles a single host tick.
    ///
    /// Returns the sent frame, or `None` if the tick was skipped by the frame
    /// rate limit or the transport was busy.
    ///
    /// A frame dropped by a busy transport still counts for the frame rate
    /// limit, so the next frame is not sent earlier than `frame_delay` later.
    pub fn render(
        &mut self,
        mode: RenderMode<'_>,
        now: Milliseconds,
    ) -> PipelineResult<Option<Frame>> {
        if !self.scheduler.poll(now) {
            return Ok(None);
        }

        let frame = self.encode(mode)?;
        self.send(frame)
    }

    /// Switches all LEDs off.
    ///
    /// Unlike [`Self::render`] this ignores the frame rate limit and hands the
    /// frame over with [`Transport::send_final`]. The transport is asked only
    /// once, a busy transport is reported as [`Error::TransportBusy`].
    pub fn shutdown(&mut self, now: Milliseconds) -> PipelineResult<Frame> {
        self.scheduler.force(now);

        let frame = self.encode(RenderMode::Forced(RGB8::default()))?;
        match self.transport.send_final(&frame) {
            Ok(()) => {
                log::debug!("Sent shutdown frame to {}", self.config.device_ip);
                Ok(frame)
            }
            Err(nb::Error::WouldBlock) => {
                log::warn!("Transport is busy, {} stays lit", self.config.device_ip);
                Err(Error::TransportBusy)
            }
            Err(nb::Error::Other(err)) => Err(Error::transport(err)),
        }
    }

    fn encode(&self, mode: RenderMode<'_>) -> PipelineResult<Frame> {
        let colors: Vec<Hsv> = match mode {
            RenderMode::Canvas(canvas) => self
                .topology
                .positions()
                .iter()
                .map(|position| Hsv::from_rgb(canvas.color(*position)))
                .collect(),
            RenderMode::Forced(color) => {
                vec![Hsv::from_rgb(color); usize::from(self.led_count())]
            }
        };
        Frame::build(&colors, self.led_count())
    }

    fn send(&mut self, frame: Frame) -> PipelineResult<Option<Frame>> {
        match self.transport.send_colors(&frame) {
            Ok(()) => {
                if self.config.debug_mode {
                    log::debug!("Sent frame {frame} to {}", self.config.device_ip);
                }
                Ok(Some(frame))
            }
            Err(nb::Error::WouldBlock) => {
                log::trace!("Transport is busy, dropping frame");
                Ok(None)
            }
            Err(nb::Error::Other(err)) => Err(Error::transport(err)),
        }
    }

    fn register<D>(&self, display: &mut D)
    where
        D: DeviceDisplay + ?Sized,
    {
        let (columns, rows) = self.topology.size();
        display.set_name(self.source.display_name());
        display.set_size(columns, rows);
        display.set_controllable_leds(&self.topology.led_names(), self.topology.positions());
        log::info!(
            "Device setup complete with {} LEDs",
            self.topology.led_count()
        );
    }
}
