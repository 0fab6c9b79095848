//! Multiplex-Engine für die 7-Segment-Bank
//!
//! Läuft im Tick-Interrupt. Pro Tick wird genau eine Anzeige aktiviert,
//! Reihenfolge links nach rechts mit Umlauf.
//!
//! Reihenfolge innerhalb eines Ticks (gegen Ghosting):
//! 1. Ground-Pin der aktiven Anzeige deaktivieren
//! 2. Index weiterschalten
//! 3. Segment-Pins setzen
//! 4. Ground-Pin der neuen Anzeige aktivieren

use crate::buffers::DisplayFrame;
use crate::traits::DisplayPins;

/// Zustand der Engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MuxState {
    /// Noch kein Tick oder keine Anzeigen konfiguriert
    Idle,
    /// Diese Anzeige leuchtet gerade
    Active(usize),
}

#[derive(Debug)]
pub struct MultiplexEngine {
    state: MuxState,
}

impl Default for MultiplexEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiplexEngine {
    pub const fn new() -> Self {
        Self {
            state: MuxState::Idle,
        }
    }

    pub fn state(&self) -> MuxState {
        self.state
    }

    /// Aktuell leuchtende Anzeige
    pub fn active(&self) -> Option<usize> {
        match self.state {
            MuxState::Idle => None,
            MuxState::Active(display) => Some(display),
        }
    }

    /// Ein Tick: nächste Anzeige aktivieren
    ///
    /// Ohne Anzeigen bleibt die Engine `Idle` und fasst keine Pins an.
    pub fn tick<P: DisplayPins>(&mut self, frame: &DisplayFrame, pins: &mut P) {
        let displays = frame.len();
        if displays == 0 {
            self.state = MuxState::Idle;
            return;
        }

        let next = match self.state {
            MuxState::Idle => 0,
            MuxState::Active(current) => {
                pins.set_ground(current, false);
                (current + 1) % displays
            }
        };

        pins.set_segments(frame.get(next).unwrap_or_default());
        pins.set_ground(next, true);
        self.state = MuxState::Active(next);
    }
}
