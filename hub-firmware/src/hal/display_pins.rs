// DisplayPins für den ESP32-C6: Segment- und Ground-Pins als GPIO-Ausgänge

use esp_hal::gpio::{Level, Output};
use heapless::Vec;
use led_hub_core::{DisplayPins, MAX_DISPLAYS, SEGMENT_COUNT, Segments};

/// Pins der 7-Segment-Bank
///
/// Segment-Pins sind aktiv HIGH. Die Polarität der Ground-Pins hängt von
/// der Beschaltung ab (`active_low`).
pub struct GpioDisplayPins {
    segments: [Output<'static>; SEGMENT_COUNT],
    grounds: Vec<Output<'static>, MAX_DISPLAYS>,
    active_low: bool,
}

impl GpioDisplayPins {
    /// Übernimmt die Pins und schaltet alle Anzeigen ab
    pub fn new(
        segments: [Output<'static>; SEGMENT_COUNT],
        grounds: Vec<Output<'static>, MAX_DISPLAYS>,
        active_low: bool,
    ) -> Self {
        let mut pins = Self {
            segments,
            grounds,
            active_low,
        };
        for display in 0..pins.grounds.len() {
            pins.set_ground(display, false);
        }
        pins.set_segments(Segments::BLANK);
        pins
    }

    pub fn displays(&self) -> usize {
        self.grounds.len()
    }
}

impl DisplayPins for GpioDisplayPins {
    fn set_segments(&mut self, segments: Segments) {
        for (bit, pin) in self.segments.iter_mut().enumerate() {
            pin.set_level(Level::from(segments.is_lit(bit)));
        }
    }

    fn set_ground(&mut self, display: usize, active: bool) {
        if let Some(pin) = self.grounds.get_mut(display) {
            // active_low: aktiv = LOW
            pin.set_level(Level::from(active != self.active_low));
        }
    }
}
