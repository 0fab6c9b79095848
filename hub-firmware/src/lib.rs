// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

use led_hub_core::SharedDisplayFrame;

/// Display-Framebuffer, geteilt zwischen Hub Task und Multiplex-Interrupt
///
/// Startet leer, `Hub::new` setzt die Anzahl der Anzeigen.
pub static DISPLAY_FRAME: SharedDisplayFrame = SharedDisplayFrame::new(0);
