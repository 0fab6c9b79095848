// Hardware Abstraction Layer (HAL) Module
//
// Implementierungen der Traits aus led-hub-core für den ESP32-C6:
// - RmtStripWriter: LED-Strip über RMT
// - GpioDisplayPins: Segment- und Ground-Pins der 7-Segment-Bank
// - MuxTickTimer: Multiplex-Tick im TIMG1-Interrupt

pub mod display_pins;
pub mod led_writer;
pub mod mux_timer;

pub use display_pins::GpioDisplayPins;
pub use led_writer::RmtStripWriter;
pub use mux_timer::MuxTickTimer;
