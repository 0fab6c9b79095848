// Multiplex-Tick: TIMG1 PeriodicTimer mit Interrupt-Handler
//
// Der Handler läuft im Interrupt-Kontext und braucht Zugriff auf Timer,
// Engine und Pins. Alles liegt deshalb in einem statischen Kontext hinter
// einer Critical Section. Der Hauptloop erreicht den Timer nur über
// `MuxTickTimer` (Start, Maskieren, Demaskieren).

use core::cell::RefCell;

use critical_section::Mutex;
use defmt::{error, info};
use esp_hal::Blocking;
use esp_hal::handler;
use esp_hal::time::Duration;
use esp_hal::timer::PeriodicTimer;
use led_hub_core::{MultiplexEngine, TickTimer};

use crate::DISPLAY_FRAME;
use crate::hal::GpioDisplayPins;

/// Alles, was der Tick-Interrupt anfasst
struct MuxContext {
    timer: PeriodicTimer<'static, Blocking>,
    engine: MultiplexEngine,
    pins: GpioDisplayPins,
}

static MUX: Mutex<RefCell<Option<MuxContext>>> = Mutex::new(RefCell::new(None));

/// Tick-Interrupt: eine Anzeige weiterschalten
#[handler]
fn mux_tick() {
    critical_section::with(|cs| {
        let mut mux = MUX.borrow_ref_mut(cs);
        let Some(ctx) = mux.as_mut() else {
            return;
        };
        ctx.timer.clear_interrupt();
        DISPLAY_FRAME.with(cs, |frame| ctx.engine.tick(frame, &mut ctx.pins));
    });
}

/// [`TickTimer`] über dem statischen Multiplex-Kontext
///
/// Es gibt genau einen Tick-Interrupt, `install` darf nur einmal laufen.
pub struct MuxTickTimer {
    _private: (),
}

impl MuxTickTimer {
    /// Registriert den Interrupt-Handler und übergibt Timer und Pins an den
    /// Interrupt-Kontext. Der Timer läuft erst nach [`TickTimer::start`].
    pub fn install(mut timer: PeriodicTimer<'static, Blocking>, pins: GpioDisplayPins) -> Self {
        timer.set_interrupt_handler(mux_tick);
        info!("Multiplex: {} displays", pins.displays());
        critical_section::with(|cs| {
            MUX.borrow_ref_mut(cs).replace(MuxContext {
                timer,
                engine: MultiplexEngine::new(),
                pins,
            });
        });
        Self { _private: () }
    }

    fn with_timer(&mut self, f: impl FnOnce(&mut PeriodicTimer<'static, Blocking>)) {
        critical_section::with(|cs| {
            if let Some(ctx) = MUX.borrow_ref_mut(cs).as_mut() {
                f(&mut ctx.timer);
            }
        });
    }
}

impl TickTimer for MuxTickTimer {
    fn start(&mut self, period_us: u32) {
        self.with_timer(|timer| {
            if let Err(e) = timer.start(Duration::from_micros(period_us as u64)) {
                error!("Failed to start multiplex timer: {:?}", e);
                return;
            }
            timer.listen();
        });
    }

    fn mask(&mut self) {
        self.with_timer(|timer| timer.unlisten());
    }

    fn unmask(&mut self) {
        // Ein während der Blackout fälliger Tick bleibt im Status-Register
        // stehen und feuert direkt nach listen()
        self.with_timer(|timer| timer.listen());
    }
}
