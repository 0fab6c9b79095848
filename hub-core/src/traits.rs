//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::error::HubError;
use crate::types::{ColorMode, Pixel, Segments};

/// Trait für SmartLED Hardware-Zugriff
///
/// Überträgt den kompletten Farbpuffer mit dem Bit-Timing des Strips.
///
/// # Implementierungen
/// - **Production:** RmtStripWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockStripWriter (in-memory Mock)
pub trait SmartLedWriter {
    /// Schreibt alle Pixel in Strip-Reihenfolge
    ///
    /// # Fehlerbehandlung
    /// Gibt `HubError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, pixels: &[Pixel], mode: ColorMode) -> Result<(), HubError>;
}

/// Trait für die Pins einer gemultiplexten 7-Segment-Bank
///
/// "Aktiv" heißt bei Ground-Pins: die Anzeige leuchtet. Ob das elektrisch
/// High oder Low ist, entscheidet die Implementierung.
pub trait DisplayPins {
    /// Legt die Segment-Bits auf die gemeinsamen Segment-Pins
    fn set_segments(&mut self, segments: Segments);

    /// Aktiviert oder deaktiviert den Ground-Pin einer Anzeige
    fn set_ground(&mut self, display: usize, active: bool);
}

/// Periodischer Tick-Timer der Multiplex-Engine
///
/// `mask` / `unmask` bilden die Critical Section für die
/// Strip-Übertragung. Ein während `mask` fälliger Tick darf nachgeholt
/// werden, aber nie während der Maskierung laufen.
pub trait TickTimer {
    /// Startet periodische Ticks mit der gegebenen Periode
    fn start(&mut self, period_us: u32);

    /// Unterdrückt den Tick
    fn mask(&mut self);

    /// Gibt den Tick wieder frei
    fn unmask(&mut self);
}

/// RAII-Guard: Tick ist maskiert, solange der Guard lebt
pub struct TickBlackout<'a, T: TickTimer> {
    timer: &'a mut T,
}

impl<'a, T: TickTimer> TickBlackout<'a, T> {
    pub fn new(timer: &'a mut T) -> Self {
        timer.mask();
        Self { timer }
    }
}

impl<T: TickTimer> Drop for TickBlackout<'_, T> {
    fn drop(&mut self) {
        self.timer.unmask();
    }
}

/// Führt `f` mit maskiertem Tick aus
pub fn with_tick_masked<T: TickTimer, R>(timer: &mut T, f: impl FnOnce() -> R) -> R {
    let _blackout = TickBlackout::new(timer);
    f()
}
