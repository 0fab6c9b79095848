//! Boot-Fade: einmalige Helligkeitsrampe nach dem Einschalten

use crate::buffers::LedBuffer;
use crate::config::BootFadeConfig;
use crate::logic::fade_level;
use crate::types::{ColorMode, Pixel};

/// Ergebnis eines Fade-Schritts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeStatus {
    /// Helligkeit `level` geschrieben, weitere Schritte folgen
    Running { level: u8 },
    /// Letzter Schritt mit der Endhelligkeit geschrieben
    Finished { level: u8 },
    /// Fade ist vorbei oder deaktiviert, nichts geschrieben
    Retired,
}

/// Boot-Fade-Controller
///
/// `progress` läuft von 0 bis `steps` und wird danach nie wieder
/// zurückgesetzt.
#[derive(Debug, Clone)]
pub struct BootFade {
    config: Option<BootFadeConfig>,
    mode: ColorMode,
    progress: u16,
}

impl BootFade {
    /// `None` = deaktiviert, [`step`](Self::step) tut dann nie etwas
    pub fn new(config: Option<BootFadeConfig>, mode: ColorMode) -> Self {
        Self {
            config,
            mode,
            progress: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.config.is_some()
    }

    /// Abstand zwischen zwei Schritten, solange der Fade aktiv ist
    pub fn step_interval_ms(&self) -> Option<u32> {
        self.config.map(|c| c.step_interval_ms)
    }

    /// Schreibt den nächsten Rampenwert in die ersten `led_count` LEDs
    pub fn step(&mut self, leds: &mut LedBuffer) -> FadeStatus {
        let Some(config) = self.config else {
            return FadeStatus::Retired;
        };

        let level = fade_level(self.progress, config.steps, config.ceiling());
        let count = config.led_count.min(leds.len());
        let pixel = Pixel::gray(level, self.mode);
        for index in 0..count {
            // Index liegt nach dem min() immer im Puffer
            let _ = leds.set(index, pixel);
        }

        if self.progress >= config.steps {
            // Endgültig aus, kommt nie wieder
            self.config = None;
            FadeStatus::Finished { level }
        } else {
            self.progress += 1;
            FadeStatus::Running { level }
        }
    }
}
