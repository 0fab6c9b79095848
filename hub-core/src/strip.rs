//! Strip Transmitter: überträgt den Farbpuffer mit maskiertem Tick

use crate::buffers::LedBuffer;
use crate::error::HubError;
use crate::traits::{SmartLedWriter, TickTimer, with_tick_masked};
use crate::types::ColorMode;

/// Kapselt den [`SmartLedWriter`] und das Busy-Flag
///
/// Die Übertragung läuft immer komplett in einer Tick-Blackout. Multiplex-
/// Tick und Übertragung laufen damit nie gleichzeitig.
pub struct StripTransmitter<W: SmartLedWriter> {
    writer: W,
    mode: ColorMode,
    busy: bool,
    transmissions: u32,
}

impl<W: SmartLedWriter> StripTransmitter<W> {
    pub fn new(writer: W, mode: ColorMode) -> Self {
        Self {
            writer,
            mode,
            busy: false,
            transmissions: 0,
        }
    }

    /// Anzahl erfolgreicher Übertragungen seit dem Start
    pub fn transmissions(&self) -> u32 {
        self.transmissions
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Überträgt den kompletten Puffer, unabhängig vom Dirty-Flag
    pub fn transmit<T: TickTimer>(
        &mut self,
        leds: &LedBuffer,
        timer: &mut T,
    ) -> Result<(), HubError> {
        if self.busy {
            return Err(HubError::HardwareBusy);
        }
        self.busy = true;

        let writer = &mut self.writer;
        let mode = self.mode;
        let result = with_tick_masked(timer, || writer.write(leds.as_slice(), mode));

        self.busy = false;
        if result.is_ok() {
            self.transmissions = self.transmissions.wrapping_add(1);
        }
        result
    }

    /// Überträgt nur, wenn sich der Puffer geändert hat
    ///
    /// `Ok(true)` wenn übertragen wurde. Schlägt die Übertragung fehl, bleibt
    /// der Puffer dirty und wird beim nächsten Mal erneut gesendet.
    pub fn flush<T: TickTimer>(
        &mut self,
        leds: &mut LedBuffer,
        timer: &mut T,
    ) -> Result<bool, HubError> {
        if !leds.take_dirty() {
            return Ok(false);
        }
        match self.transmit(leds, timer) {
            Ok(()) => Ok(true),
            Err(e) => {
                leds.mark_dirty();
                Err(e)
            }
        }
    }
}
