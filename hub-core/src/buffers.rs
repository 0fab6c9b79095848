//! LED-Farbpuffer und Display-Framebuffer
//!
//! Die beiden einzigen dauerhaft veränderlichen Zustände des Hubs.
//! Beide werden nur vom Hauptloop geschrieben.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

use crate::config::{MAX_DISPLAYS, MAX_LEDS};
use crate::error::HubError;
use crate::types::{Pixel, Segments};

/// Farbpuffer des LED-Strips
///
/// Länge wird einmal bei der Initialisierung festgelegt und danach nie
/// geändert. `dirty` merkt sich, ob seit der letzten Übertragung etwas
/// geschrieben wurde.
#[derive(Debug, Clone)]
pub struct LedBuffer {
    pixels: Vec<Pixel, MAX_LEDS>,
    dirty: bool,
}

impl LedBuffer {
    /// Erstellt einen Puffer mit `num_leds` ausgeschalteten Pixeln
    ///
    /// `num_leds` wird auf [`MAX_LEDS`] begrenzt.
    pub fn new(num_leds: usize) -> Self {
        let mut pixels = Vec::new();
        // Kann nach dem min() nicht fehlschlagen
        let _ = pixels.resize(num_leds.min(MAX_LEDS), Pixel::OFF);
        Self {
            pixels,
            dirty: false,
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.pixels.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Setzt ein einzelnes Pixel
    pub fn set(&mut self, index: usize, pixel: Pixel) -> Result<(), HubError> {
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(HubError::IndexOutOfRange)?;
        *slot = pixel;
        self.dirty = true;
        Ok(())
    }

    /// Setzt `pixels` ab `start`
    ///
    /// Liegt irgendein Index außerhalb, wird nichts geschrieben.
    pub fn set_range(&mut self, start: usize, pixels: &[Pixel]) -> Result<(), HubError> {
        let end = start
            .checked_add(pixels.len())
            .ok_or(HubError::IndexOutOfRange)?;
        let target = self
            .pixels
            .get_mut(start..end)
            .ok_or(HubError::IndexOutOfRange)?;
        target.copy_from_slice(pixels);
        self.dirty = true;
        Ok(())
    }

    /// Setzt alle Pixel auf denselben Wert
    pub fn fill(&mut self, pixel: Pixel) {
        self.pixels.iter_mut().for_each(|slot| *slot = pixel);
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Liefert das Dirty-Flag und setzt es zurück
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

/// Segment-Zustände aller Anzeigen, Index = Position von links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFrame {
    cells: [Segments; MAX_DISPLAYS],
    len: usize,
}

impl DisplayFrame {
    /// Leerer Frame mit `displays` Anzeigen (auf [`MAX_DISPLAYS`] begrenzt)
    pub const fn new(displays: usize) -> Self {
        let len = if displays > MAX_DISPLAYS {
            MAX_DISPLAYS
        } else {
            displays
        };
        Self {
            cells: [Segments::BLANK; MAX_DISPLAYS],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, display: usize) -> Option<Segments> {
        self.as_slice().get(display).copied()
    }

    pub fn set(&mut self, display: usize, segments: Segments) -> Result<(), HubError> {
        let len = self.len;
        let slot = self.cells[..len]
            .get_mut(display)
            .ok_or(HubError::IndexOutOfRange)?;
        *slot = segments;
        Ok(())
    }

    pub fn as_slice(&self) -> &[Segments] {
        &self.cells[..self.len]
    }
}

/// Display-Framebuffer, geteilt zwischen Hauptloop und Multiplex-Tick
///
/// Jeder Zugriff läuft in einer Critical Section. Ein Tick sieht damit nie
/// einen halb geschriebenen Zustand, auch nicht bei `write_all`.
pub struct SharedDisplayFrame {
    frame: Mutex<RefCell<DisplayFrame>>,
}

impl SharedDisplayFrame {
    pub const fn new(displays: usize) -> Self {
        Self {
            frame: Mutex::new(RefCell::new(DisplayFrame::new(displays))),
        }
    }

    /// Setzt die Anzahl der Anzeigen neu und löscht alle Segmente
    ///
    /// Für `static`-Instanzen, deren Größe erst zur Laufzeit bekannt ist.
    pub fn init(&self, displays: usize) {
        critical_section::with(|cs| {
            *self.frame.borrow_ref_mut(cs) = DisplayFrame::new(displays);
        });
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.frame.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unteilbarer Schreibzugriff auf eine Anzeige
    pub fn write(&self, display: usize, segments: Segments) -> Result<(), HubError> {
        critical_section::with(|cs| self.frame.borrow_ref_mut(cs).set(display, segments))
    }

    /// Schreibt alle Anzeigen auf einmal
    ///
    /// `segments` muss genau so viele Einträge haben wie Anzeigen existieren.
    pub fn write_all(&self, segments: &[Segments]) -> Result<(), HubError> {
        critical_section::with(|cs| {
            let mut frame = self.frame.borrow_ref_mut(cs);
            if segments.len() != frame.len() {
                return Err(HubError::IndexOutOfRange);
            }
            frame.cells[..segments.len()].copy_from_slice(segments);
            Ok(())
        })
    }

    pub fn read(&self, display: usize) -> Option<Segments> {
        critical_section::with(|cs| self.frame.borrow_ref(cs).get(display))
    }

    /// Kopie des gesamten Frames
    pub fn snapshot(&self) -> DisplayFrame {
        critical_section::with(|cs| *self.frame.borrow_ref(cs))
    }

    /// Zugriff aus einer bereits offenen Critical Section (Tick-Interrupt)
    pub fn with<R>(
        &self,
        cs: critical_section::CriticalSection,
        f: impl FnOnce(&DisplayFrame) -> R,
    ) -> R {
        f(&self.frame.borrow_ref(cs))
    }
}
