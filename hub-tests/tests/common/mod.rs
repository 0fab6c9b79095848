//! Gemeinsame Mocks für die Host-Tests
//!
//! - `MockStripWriter`: merkt sich jede Übertragung, kann Fehler simulieren
//! - `MockDisplayPins`: prüft bei jedem Pin-Wechsel die Anti-Ghosting-Regeln
//! - `SimClock` / `SimTimer`: simulierte Uhr, die den Multiplex-Tick feuert

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use led_hub_core::{
    ColorMode, DisplayPins, HubError, MultiplexEngine, Pixel, Segments, SharedDisplayFrame,
    SmartLedWriter, TickTimer,
};

// ============================================================================
// Mock Strip Writer
// ============================================================================

#[derive(Default)]
pub struct MockStripWriter {
    /// Kopie jeder erfolgreichen Übertragung
    pub frames: Vec<Vec<Pixel>>,
    pub write_count: usize,
    pub fail_next_write: bool,
    /// Optional: Übertragung verbraucht simulierte Zeit
    pub clock: Option<Rc<RefCell<SimClock>>>,
    pub us_per_pixel: u64,
}

impl MockStripWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer, der pro Pixel `us_per_pixel` auf der simulierten Uhr verbraucht
    pub fn timed(clock: Rc<RefCell<SimClock>>, us_per_pixel: u64) -> Self {
        Self {
            clock: Some(clock),
            us_per_pixel,
            ..Self::default()
        }
    }

    pub fn last_frame(&self) -> Option<&[Pixel]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl SmartLedWriter for MockStripWriter {
    fn write(&mut self, pixels: &[Pixel], _mode: ColorMode) -> Result<(), HubError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(HubError::WriteFailed);
        }

        if let Some(clock) = &self.clock {
            let mut clock = clock.borrow_mut();
            clock.transmitting = true;
            clock.advance(pixels.len() as u64 * self.us_per_pixel);
            clock.transmitting = false;
        }

        self.frames.push(pixels.to_vec());
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Mock Display Pins
// ============================================================================

pub struct MockDisplayPins {
    pub grounds: Vec<bool>,
    pub segments: Segments,
    /// Reihenfolge der aktivierten Anzeigen
    pub activations: Vec<usize>,
    /// Segment-Wert beim Aktivieren, parallel zu `activations`
    pub rendered: Vec<Segments>,
    /// Zwei Ground-Pins gleichzeitig aktiv
    pub overlaps: usize,
    /// Segmente geändert während eine Anzeige leuchtet
    pub ghosting: usize,
}

impl MockDisplayPins {
    pub fn new(displays: usize) -> Self {
        Self {
            grounds: vec![false; displays],
            segments: Segments::BLANK,
            activations: Vec::new(),
            rendered: Vec::new(),
            overlaps: 0,
            ghosting: 0,
        }
    }

    pub fn active_count(&self) -> usize {
        self.grounds.iter().filter(|&&g| g).count()
    }
}

impl DisplayPins for MockDisplayPins {
    fn set_segments(&mut self, segments: Segments) {
        if self.active_count() > 0 {
            self.ghosting += 1;
        }
        self.segments = segments;
    }

    fn set_ground(&mut self, display: usize, active: bool) {
        if active {
            if self.active_count() > 0 {
                self.overlaps += 1;
            }
            self.activations.push(display);
            self.rendered.push(self.segments);
        }
        self.grounds[display] = active;
    }
}

// ============================================================================
// Simulierte Uhr + Tick-Timer
// ============================================================================

/// Simulierte Zeit mit periodischem Multiplex-Tick
///
/// Ein während `mask` fälliger Tick wird wie ein Pending-Interrupt genau
/// einmal beim `unmask` nachgeholt.
pub struct SimClock {
    pub now_us: u64,
    period_us: u32,
    next_tick_us: u64,
    masked: bool,
    pending: bool,
    pub transmitting: bool,
    pub engine: MultiplexEngine,
    pub pins: MockDisplayPins,
    display: Rc<SharedDisplayFrame>,
    pub ticks: usize,
    pub ticks_during_transmission: usize,
    pub deferred_ticks: usize,
}

impl SimClock {
    pub fn new(display: Rc<SharedDisplayFrame>, displays: usize) -> Self {
        Self {
            now_us: 0,
            period_us: 0,
            next_tick_us: 0,
            masked: false,
            pending: false,
            transmitting: false,
            engine: MultiplexEngine::new(),
            pins: MockDisplayPins::new(displays),
            display,
            ticks: 0,
            deferred_ticks: 0,
            ticks_during_transmission: 0,
        }
    }

    pub fn shared(display: Rc<SharedDisplayFrame>, displays: usize) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(display, displays)))
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// Lässt `us` Mikrosekunden vergehen und feuert fällige Ticks
    pub fn advance(&mut self, us: u64) {
        let target = self.now_us + us;
        while self.period_us > 0 && self.next_tick_us <= target {
            self.now_us = self.next_tick_us;
            if self.masked {
                if self.pending {
                    self.deferred_ticks += 1;
                }
                self.pending = true;
            } else {
                self.fire();
            }
            self.next_tick_us += self.period_us as u64;
        }
        self.now_us = target;
    }

    pub fn now_ms(&self) -> u64 {
        self.now_us / 1000
    }

    fn fire(&mut self) {
        if self.transmitting {
            self.ticks_during_transmission += 1;
        }
        let engine = &mut self.engine;
        let pins = &mut self.pins;
        critical_section::with(|cs| self.display.with(cs, |frame| engine.tick(frame, pins)));
        self.ticks += 1;
    }
}

/// [`TickTimer`] über einer geteilten [`SimClock`]
#[derive(Clone)]
pub struct SimTimer(pub Rc<RefCell<SimClock>>);

impl TickTimer for SimTimer {
    fn start(&mut self, period_us: u32) {
        let mut clock = self.0.borrow_mut();
        clock.period_us = period_us;
        clock.next_tick_us = clock.now_us + period_us as u64;
    }

    fn mask(&mut self) {
        self.0.borrow_mut().masked = true;
    }

    fn unmask(&mut self) {
        let mut clock = self.0.borrow_mut();
        clock.masked = false;
        if clock.pending {
            clock.pending = false;
            clock.fire();
        }
    }
}

/// Timer ohne Zeitmodell, zählt nur Mask/Unmask-Paare
#[derive(Default)]
pub struct CountingTimer {
    pub masked: bool,
    pub blackouts: usize,
}

impl TickTimer for CountingTimer {
    fn start(&mut self, _period_us: u32) {}

    fn mask(&mut self) {
        assert!(!self.masked, "nested mask");
        self.masked = true;
    }

    fn unmask(&mut self) {
        assert!(self.masked, "unmask without mask");
        self.masked = false;
        self.blackouts += 1;
    }
}

// ============================================================================
// Frame-Helfer
// ============================================================================

/// Kodiert ein Kommando in einen Byte-Vektor
pub fn encode(command: &led_hub_core::CommandFrame, mode: ColorMode) -> Vec<u8> {
    let mut buffer = [0u8; led_hub_core::MAX_FRAME_LEN];
    let len = command.encode(mode, &mut buffer).unwrap();
    buffer[..len].to_vec()
}

pub fn set_digit(display: u8, bits: u8) -> led_hub_core::CommandFrame {
    led_hub_core::CommandFrame::SetDigit {
        display,
        segments: Segments(bits),
    }
}

pub fn set_pixels(start: u16, pixels: &[Pixel]) -> led_hub_core::CommandFrame {
    led_hub_core::CommandFrame::SetPixels {
        start,
        pixels: heapless::Vec::from_slice(pixels).unwrap(),
    }
}
