// SmartLedWriter für den ESP32-C6: WS2812/SK6812-Strip über das RMT Peripheral

use esp_hal::Blocking;
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use led_hub_core::{ColorMode, HubError, Pixel, SmartLedWriter};
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::NUM_LEDS;

/// RMT-Puffer: 24 Pulse pro LED + 1 Reset
pub const RMT_BUFFER_SIZE: usize = NUM_LEDS * 24 + 1;

/// Real Hardware Strip Writer
///
/// Der Adapter kennt nur RGB8. Im RGBW-Modus wird der Weiß-Kanal deshalb
/// auf alle drei Farbkanäle addiert (sättigend).
///
/// Hinweis: Der Buffer muss länger leben als der Writer, daher wird er im
/// Task erstellt und als Parameter übergeben.
pub struct RmtStripWriter<'a> {
    led: SmartLedsAdapter<'a, RMT_BUFFER_SIZE>,
}

impl<'a> RmtStripWriter<'a> {
    /// Erstellt einen neuen RmtStripWriter
    ///
    /// # Parameter
    /// - `pin`: Datenleitung des Strips
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit `smart_led_buffer!` Macro)
    pub fn new(
        pin: impl PeripheralOutput<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [PulseCode; RMT_BUFFER_SIZE],
    ) -> Result<Self, esp_hal::rmt::Error> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))?;
        let led = SmartLedsAdapter::new(rmt.channel0, pin, buffer);
        Ok(Self { led })
    }
}

/// Pixel → RGB8 für den Adapter
fn to_rgb8(pixel: &Pixel, mode: ColorMode) -> RGB8 {
    match mode {
        ColorMode::Rgb => pixel.color,
        ColorMode::Rgbw => RGB8 {
            r: pixel.color.r.saturating_add(pixel.white),
            g: pixel.color.g.saturating_add(pixel.white),
            b: pixel.color.b.saturating_add(pixel.white),
        },
    }
}

impl SmartLedWriter for RmtStripWriter<'_> {
    fn write(&mut self, pixels: &[Pixel], mode: ColorMode) -> Result<(), HubError> {
        self.led
            .write(pixels.iter().map(|pixel| to_rgb8(pixel, mode)))
            .map_err(|_| HubError::WriteFailed)
    }
}
