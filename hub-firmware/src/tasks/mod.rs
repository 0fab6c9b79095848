// Task-Modul: Enthält alle Embassy Tasks
//
// Der Multiplex-Tick läuft nicht als Task, sondern im Timer-Interrupt
// (siehe hal::mux_timer).

pub mod hub;

// Re-export Tasks für einfachen Import
pub use hub::hub_task;
