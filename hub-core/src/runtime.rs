//! Hub-Logik für den Hauptloop - testbar ohne Hardware
//!
//! Bündelt Decoder, Dispatcher, Boot-Fade und Strip-Übertragung. Die
//! Firmware liefert Bytes, Zeitstempel und einen [`TickTimer`], der Rest
//! passiert hier.

use crate::buffers::{LedBuffer, SharedDisplayFrame};
use crate::config::HubConfig;
use crate::dispatch::{Target, dispatch};
use crate::error::HubError;
use crate::fade::{BootFade, FadeStatus};
use crate::frame::{CommandKind, FrameDecoder};
use crate::strip::StripTransmitter;
use crate::traits::{SmartLedWriter, TickTimer};

/// Status-Bytes an den Host (Flow Control)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Status {
    /// Einmal nach dem Boot
    Ready = 0x03,
    /// Frame angewendet, Host darf den nächsten senden
    Ack = 0x05,
    /// Frame verworfen
    Nack = 0x15,
}

/// Ergebnis eines abgeschlossenen (oder verworfenen) Frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    Applied { kind: CommandKind, target: Target },
    Rejected(HubError),
}

impl Event {
    pub fn status(&self) -> Status {
        match self {
            Event::Applied { .. } => Status::Ack,
            Event::Rejected(_) => Status::Nack,
        }
    }
}

/// Laufzeit-Zustand des Hauptloops
///
/// Besitzt den LED-Farbpuffer exklusiv. Der Display-Framebuffer wird mit dem
/// Tick-Interrupt geteilt und deshalb nur per Referenz gehalten.
pub struct Hub<'a, W: SmartLedWriter> {
    config: &'a HubConfig,
    display: &'a SharedDisplayFrame,
    leds: LedBuffer,
    decoder: FrameDecoder,
    strip: StripTransmitter<W>,
    fade: BootFade,
    next_fade_ms: u64,
    last_transmit_ms: Option<u64>,
}

impl<'a, W: SmartLedWriter> Hub<'a, W> {
    /// Initialisiert beide Puffer passend zur Konfiguration
    pub fn new(config: &'a HubConfig, display: &'a SharedDisplayFrame, writer: W) -> Self {
        display.init(config.displays());
        Self {
            config,
            display,
            leds: LedBuffer::new(config.num_leds),
            decoder: FrameDecoder::new(config.color_mode, config.frame_timeout_polls),
            strip: StripTransmitter::new(writer, config.color_mode),
            fade: BootFade::new(config.boot_fade, config.color_mode),
            next_fade_ms: 0,
            last_transmit_ms: None,
        }
    }

    pub fn config(&self) -> &HubConfig {
        self.config
    }

    pub fn leds(&self) -> &LedBuffer {
        &self.leds
    }

    pub fn strip(&self) -> &StripTransmitter<W> {
        &self.strip
    }

    pub fn fade_active(&self) -> bool {
        self.fade.is_active()
    }

    /// READY-Byte für den Boot, falls Status-Echo aktiv ist
    pub fn ready_byte(&self) -> Option<u8> {
        self.config.echo_status.then_some(Status::Ready as u8)
    }

    /// Status-Byte für ein Event, falls Status-Echo aktiv ist
    pub fn status_byte(&self, event: &Event) -> Option<u8> {
        self.config.echo_status.then_some(event.status() as u8)
    }

    /// Ein empfangenes Byte verarbeiten
    ///
    /// Liefert ein [`Event`] sobald ein Frame abgeschlossen oder verworfen
    /// wurde. Fehler verändern keinen Puffer.
    pub fn on_byte(&mut self, byte: u8) -> Option<Event> {
        match self.decoder.push(byte) {
            Ok(None) => None,
            Ok(Some(command)) => {
                let kind = command.kind();
                Some(match dispatch(&command, &mut self.leds, self.display) {
                    Ok(target) => Event::Applied { kind, target },
                    Err(e) => Event::Rejected(e),
                })
            }
            Err(e) => Some(Event::Rejected(e)),
        }
    }

    /// Leerlauf-Aufruf, wenn kein Byte anliegt (Frame-Timeout)
    pub fn on_idle(&mut self) -> Option<Event> {
        self.decoder.idle().err().map(Event::Rejected)
    }

    /// Führt einen Boot-Fade-Schritt aus, wenn er fällig ist
    pub fn fade_step(&mut self, now_ms: u64) -> Option<FadeStatus> {
        let interval = self.fade.step_interval_ms()?;
        if now_ms < self.next_fade_ms {
            return None;
        }
        self.next_fade_ms = now_ms + interval as u64;
        Some(self.fade.step(&mut self.leds))
    }

    /// Überträgt den Strip, wenn er dirty ist und das Mindestintervall seit
    /// der letzten Übertragung abgelaufen ist
    ///
    /// Änderungen aus mehreren Kommandos innerhalb eines Intervalls gehen so
    /// in einer einzigen Übertragung raus.
    pub fn refresh<T: TickTimer>(
        &mut self,
        now_ms: u64,
        timer: &mut T,
    ) -> Result<bool, HubError> {
        if !self.leds.is_dirty() {
            return Ok(false);
        }
        if let Some(last) = self.last_transmit_ms
            && now_ms.saturating_sub(last) < self.config.strip_refresh_ms as u64
        {
            return Ok(false);
        }

        let sent = self.strip.flush(&mut self.leds, timer)?;
        if sent {
            self.last_transmit_ms = Some(now_ms);
        }
        Ok(sent)
    }
}
