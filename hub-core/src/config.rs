//! Laufzeit-Konfiguration des Hubs
//!
//! Wird einmal beim Start erzeugt und per Referenz an alle Komponenten
//! übergeben. Die Firmware baut sie aus ihren Pin-Konstanten, Tests aus
//! synthetischen Werten.

use crate::error::ConfigError;
use crate::logic::{percent_to_level, tick_period_us};
use crate::types::ColorMode;

/// Maximale Anzahl LEDs im Strip
pub const MAX_LEDS: usize = 300;

/// Maximale Anzahl 7-Segment-Anzeigen
pub const MAX_DISPLAYS: usize = 8;

/// Segment-Pins: a-g plus Dezimalpunkt
pub const SEGMENT_COUNT: usize = 8;

/// Kombinierte Aktivierungsrate ab der nichts mehr flackert (Hz)
pub const FLICKER_FUSION_HZ: u32 = 100;

/// Einstellungen für den Boot-Fade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootFadeConfig {
    /// Die ersten `led_count` LEDs werden gefadet (auf `num_leds` begrenzt)
    pub led_count: usize,
    /// Endhelligkeit in Prozent
    pub ceiling_percent: u8,
    /// Anzahl Rampen-Schritte nach dem Startwert 0
    pub steps: u16,
    /// Abstand zwischen zwei Schritten
    pub step_interval_ms: u32,
}

impl Default for BootFadeConfig {
    fn default() -> Self {
        Self {
            led_count: 50,
            ceiling_percent: 25,
            steps: 64,
            step_interval_ms: 20,
        }
    }
}

impl BootFadeConfig {
    /// Endhelligkeit als Kanalwert
    pub fn ceiling(&self) -> u8 {
        percent_to_level(self.ceiling_percent)
    }
}

/// Hub-Konfiguration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HubConfig {
    /// Anzahl LEDs im Strip
    pub num_leds: usize,
    pub color_mode: ColorMode,
    /// Datenpin des Strips
    pub strip_pin: u8,
    /// Ein Ground-Pin pro Anzeige, von links nach rechts. Leer = Anzeige aus.
    pub ground_pins: &'static [u8],
    /// Gemeinsame Segment-Pins a-g, dp
    pub segment_pins: [u8; SEGMENT_COUNT],
    /// Sweeps pro Sekunde über alle Anzeigen
    pub multiplex_frequency_hz: u32,
    pub baud_rate: u32,
    /// `None` = Boot-Fade deaktiviert
    pub boot_fade: Option<BootFadeConfig>,
    /// Aufrufe des Decoders (Bytes + Leerlauf-Polls) bis ein Frame verfällt
    pub frame_timeout_polls: u16,
    /// Spätestens nach dieser Zeit wird ein geänderter Strip übertragen
    pub strip_refresh_ms: u32,
    /// Status-Bytes (READY/ACK/NACK) an den Host senden
    pub echo_status: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            num_leds: 55,
            color_mode: ColorMode::Rgb,
            strip_pin: 10,
            ground_pins: &[18, 19, 20, 21],
            segment_pins: [0, 1, 2, 3, 4, 5, 6, 7],
            multiplex_frequency_hz: 120,
            baud_rate: 9600,
            boot_fade: Some(BootFadeConfig::default()),
            frame_timeout_polls: 256,
            strip_refresh_ms: 20,
            echo_status: true,
        }
    }
}

impl HubConfig {
    pub fn with_num_leds(mut self, num_leds: usize) -> Self {
        self.num_leds = num_leds;
        self
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }

    pub fn with_ground_pins(mut self, ground_pins: &'static [u8]) -> Self {
        self.ground_pins = ground_pins;
        self
    }

    pub fn with_multiplex_frequency(mut self, hz: u32) -> Self {
        self.multiplex_frequency_hz = hz;
        self
    }

    pub fn with_boot_fade(mut self, boot_fade: Option<BootFadeConfig>) -> Self {
        self.boot_fade = boot_fade;
        self
    }

    pub fn with_frame_timeout(mut self, polls: u16) -> Self {
        self.frame_timeout_polls = polls;
        self
    }

    pub fn with_echo_status(mut self, echo_status: bool) -> Self {
        self.echo_status = echo_status;
        self
    }

    /// Anzahl der 7-Segment-Anzeigen
    pub fn displays(&self) -> usize {
        self.ground_pins.len()
    }

    /// Tick-Periode der Multiplex-Engine in Mikrosekunden
    pub fn tick_period_us(&self) -> u32 {
        tick_period_us(self.displays(), self.multiplex_frequency_hz)
    }

    /// `DISPLAYS * frequency >= 100 Hz`
    pub fn is_flicker_free(&self) -> bool {
        (self.displays() as u32).saturating_mul(self.multiplex_frequency_hz) >= FLICKER_FUSION_HZ
    }

    /// Prüft die Konfiguration auf Konsistenz
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_leds == 0 || self.num_leds > MAX_LEDS {
            return Err(ConfigError::LedCount);
        }
        if self.displays() > MAX_DISPLAYS {
            return Err(ConfigError::DisplayCount);
        }
        if self.multiplex_frequency_hz == 0 {
            return Err(ConfigError::MultiplexFrequency);
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::BaudRate);
        }
        if let Some(fade) = &self.boot_fade
            && (fade.steps == 0 || fade.ceiling_percent > 100)
        {
            return Err(ConfigError::BootFade);
        }

        // Segment- und Ground-Pins teilen sich keine Leitung
        let mut seen = [false; u8::MAX as usize + 1];
        let pins = self
            .segment_pins
            .iter()
            .chain(self.ground_pins)
            .chain(core::iter::once(&self.strip_pin));
        for &pin in pins {
            if seen[pin as usize] {
                return Err(ConfigError::PinConflict(pin));
            }
            seen[pin as usize] = true;
        }
        Ok(())
    }
}
