//! LED Hub Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Puffer, Frame-Decoder, Dispatcher, Multiplex-Engine, Boot-Fade und die
//! Hauptloop-Logik laufen damit auch auf dem Host (Tests).

#![no_std]

pub mod buffers;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fade;
pub mod frame;
pub mod logic;
pub mod multiplex;
pub mod runtime;
pub mod strip;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use buffers::{DisplayFrame, LedBuffer, SharedDisplayFrame};
pub use config::{BootFadeConfig, HubConfig, MAX_DISPLAYS, MAX_LEDS, SEGMENT_COUNT};
pub use dispatch::{Target, dispatch};
pub use error::{ConfigError, HubError, RejectReason};
pub use fade::{BootFade, FadeStatus};
pub use frame::{CommandFrame, CommandKind, FRAME_START, FrameDecoder, MAX_FRAME_LEN};
pub use logic::{checksum, fade_level, percent_to_level, tick_period_us};
pub use multiplex::{MultiplexEngine, MuxState};
pub use runtime::{Event, Hub, Status};
pub use strip::StripTransmitter;
pub use traits::{DisplayPins, SmartLedWriter, TickBlackout, TickTimer, with_tick_masked};
pub use types::{ColorMode, Pixel, Segments};
