//! Serieller Frame-Decoder und Kommando-Frames
//!
//! Frame-Format:
//! - START (1 Byte): 0xAA
//! - CMD (1 Byte): Kommando-Typ
//! - LEN (1 Byte): Payload-Länge (0-64)
//! - PAYLOAD (LEN Bytes)
//! - CHECKSUM (1 Byte): Summe aller vorherigen Frame-Bytes modulo 256
//!
//! Innerhalb eines Frames ist 0xAA ein normales Datenbyte.

use heapless::Vec;

use crate::config::MAX_DISPLAYS;
use crate::error::{HubError, RejectReason};
use crate::logic::checksum;
use crate::types::{ColorMode, Pixel, Segments};

/// Synchronisations-Byte
pub const FRAME_START: u8 = 0xAA;

/// Maximale Payload in Bytes
pub const MAX_PAYLOAD_LEN: usize = 64;

/// Maximaler Frame (START + CMD + LEN + Payload + CHECKSUM)
pub const MAX_FRAME_LEN: usize = 3 + MAX_PAYLOAD_LEN + 1;

/// Maximale Pixel pro SET_PIXELS-Frame (RGB, 2 Bytes Startindex)
pub const MAX_PIXELS_PER_FRAME: usize = (MAX_PAYLOAD_LEN - 2) / 3;

/// Kommando-Typen auf der Leitung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CommandKind {
    SetPixels = 0x01,
    SetDigit = 0x02,
    Fill = 0x03,
    SetDisplays = 0x04,
}

impl TryFrom<u8> for CommandKind {
    type Error = RejectReason;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0x01 => Ok(Self::SetPixels),
            0x02 => Ok(Self::SetDigit),
            0x03 => Ok(Self::Fill),
            0x04 => Ok(Self::SetDisplays),
            _ => Err(RejectReason::UnknownCommand),
        }
    }
}

/// Vollständig empfangenes und geprüftes Kommando
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFrame {
    /// Pixel ab `start` setzen
    SetPixels {
        start: u16,
        pixels: Vec<Pixel, MAX_PIXELS_PER_FRAME>,
    },
    /// Eine Anzeige setzen
    SetDigit { display: u8, segments: Segments },
    /// Alle LEDs auf eine Farbe
    Fill(Pixel),
    /// Alle Anzeigen auf einmal, ein Eintrag pro Anzeige
    SetDisplays(Vec<Segments, MAX_DISPLAYS>),
}

impl CommandFrame {
    pub fn kind(&self) -> CommandKind {
        match self {
            CommandFrame::SetPixels { .. } => CommandKind::SetPixels,
            CommandFrame::SetDigit { .. } => CommandKind::SetDigit,
            CommandFrame::Fill(_) => CommandKind::Fill,
            CommandFrame::SetDisplays(_) => CommandKind::SetDisplays,
        }
    }

    /// Interpretiert die Payload eines Frames mit gültiger Prüfsumme
    pub fn parse(
        kind: CommandKind,
        payload: &[u8],
        mode: ColorMode,
    ) -> Result<Self, RejectReason> {
        let channels = mode.channels();
        match kind {
            CommandKind::SetPixels => {
                let (start, data) = match payload {
                    [lo, hi, data @ ..] if !data.is_empty() => {
                        (u16::from_le_bytes([*lo, *hi]), data)
                    }
                    _ => return Err(RejectReason::Payload),
                };
                if data.len() % channels != 0 {
                    return Err(RejectReason::Payload);
                }
                let mut pixels = Vec::new();
                for chunk in data.chunks_exact(channels) {
                    let pixel = Pixel::from_wire(chunk, mode).ok_or(RejectReason::Payload)?;
                    pixels.push(pixel).map_err(|_| RejectReason::Payload)?;
                }
                Ok(CommandFrame::SetPixels { start, pixels })
            }
            CommandKind::SetDigit => match payload {
                &[display, bits] => Ok(CommandFrame::SetDigit {
                    display,
                    segments: Segments(bits),
                }),
                _ => Err(RejectReason::Payload),
            },
            CommandKind::Fill => Pixel::from_wire(payload, mode)
                .map(CommandFrame::Fill)
                .ok_or(RejectReason::Payload),
            CommandKind::SetDisplays => {
                let mut cells = Vec::new();
                for &bits in payload {
                    cells.push(Segments(bits)).map_err(|_| RejectReason::Payload)?;
                }
                Ok(CommandFrame::SetDisplays(cells))
            }
        }
    }

    /// Kodiert das Kommando als kompletten Frame (Host-Seite)
    ///
    /// Gibt die Anzahl geschriebener Bytes zurück.
    pub fn encode(&self, mode: ColorMode, buffer: &mut [u8]) -> Result<usize, HubError> {
        let mut payload = [0u8; MAX_PAYLOAD_LEN];
        let len = match self {
            CommandFrame::SetPixels { start, pixels } => {
                payload[..2].copy_from_slice(&start.to_le_bytes());
                let mut pos = 2;
                for pixel in pixels {
                    if pos + mode.channels() > MAX_PAYLOAD_LEN {
                        return Err(RejectReason::Length.into());
                    }
                    pos += pixel.to_wire(mode, &mut payload[pos..]);
                }
                pos
            }
            CommandFrame::SetDigit { display, segments } => {
                payload[0] = *display;
                payload[1] = segments.bits();
                2
            }
            CommandFrame::Fill(pixel) => pixel.to_wire(mode, &mut payload),
            CommandFrame::SetDisplays(cells) => {
                for (slot, cell) in payload.iter_mut().zip(cells) {
                    *slot = cell.bits();
                }
                cells.len()
            }
        };

        let frame_len = 3 + len + 1;
        if buffer.len() < frame_len {
            return Err(RejectReason::Length.into());
        }
        buffer[0] = FRAME_START;
        buffer[1] = self.kind() as u8;
        buffer[2] = len as u8;
        buffer[3..3 + len].copy_from_slice(&payload[..len]);
        buffer[3 + len] = checksum(&buffer[..3 + len]);
        Ok(frame_len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Warte auf START
    Idle,
    /// START empfangen, warte auf CMD
    Command,
    /// CMD empfangen, warte auf LEN
    Length,
    /// Payload-Bytes lesen
    Payload,
    /// Warte auf CHECKSUM
    Checksum,
}

/// Inkrementeller Decoder, ein Byte pro Aufruf
///
/// Jeder Aufruf von [`push`](Self::push) oder [`idle`](Self::idle) während
/// eines laufenden Frames verbraucht einen Schritt des Budgets. Ist es
/// aufgebraucht, wird der Frame verworfen und der Decoder fängt neu an.
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    state: DecodeState,
    mode: ColorMode,
    kind: CommandKind,
    expected_len: usize,
    payload: Vec<u8, MAX_PAYLOAD_LEN>,
    sum: u8,
    calls: u16,
    timeout_polls: u16,
}

impl FrameDecoder {
    pub fn new(mode: ColorMode, timeout_polls: u16) -> Self {
        Self {
            state: DecodeState::Idle,
            mode,
            kind: CommandKind::SetPixels,
            expected_len: 0,
            payload: Vec::new(),
            sum: 0,
            calls: 0,
            timeout_polls: timeout_polls.max(MAX_FRAME_LEN as u16),
        }
    }

    /// Verwirft einen angefangenen Frame
    pub fn reset(&mut self) {
        self.state = DecodeState::Idle;
        self.expected_len = 0;
        self.payload.clear();
        self.sum = 0;
        self.calls = 0;
    }

    /// `true` solange ein Frame angefangen, aber nicht abgeschlossen ist
    pub fn in_frame(&self) -> bool {
        self.state != DecodeState::Idle
    }

    /// Leerlauf-Aufruf ohne neues Byte
    ///
    /// Meldet `Timeout`, wenn der laufende Frame sein Budget überschreitet.
    pub fn idle(&mut self) -> Result<(), HubError> {
        if self.in_frame() {
            self.spend_call()?;
        }
        Ok(())
    }

    /// Verarbeitet ein Byte
    ///
    /// `Ok(Some(frame))` bei vollständigem Frame, `Ok(None)` wenn weitere Bytes
    /// fehlen, `Err(FrameRejected)` wenn der Frame verworfen wurde.
    pub fn push(&mut self, byte: u8) -> Result<Option<CommandFrame>, HubError> {
        if self.in_frame()
            && let Err(timeout) = self.spend_call()
        {
            // Das auslösende Byte kann schon der nächste Frame sein
            self.start_if_marker(byte);
            return Err(timeout);
        }

        match self.state {
            DecodeState::Idle => {
                // Rauschen außerhalb eines Frames ignorieren
                self.start_if_marker(byte);
                Ok(None)
            }
            DecodeState::Command => {
                match CommandKind::try_from(byte) {
                    Ok(kind) => self.kind = kind,
                    Err(reason) => return self.reject(reason),
                }
                self.sum = self.sum.wrapping_add(byte);
                self.state = DecodeState::Length;
                Ok(None)
            }
            DecodeState::Length => {
                if byte as usize > MAX_PAYLOAD_LEN {
                    return self.reject(RejectReason::Length);
                }
                self.expected_len = byte as usize;
                self.sum = self.sum.wrapping_add(byte);
                self.state = if self.expected_len == 0 {
                    DecodeState::Checksum
                } else {
                    DecodeState::Payload
                };
                Ok(None)
            }
            DecodeState::Payload => {
                if self.payload.push(byte).is_err() {
                    return self.reject(RejectReason::Length);
                }
                self.sum = self.sum.wrapping_add(byte);
                if self.payload.len() == self.expected_len {
                    self.state = DecodeState::Checksum;
                }
                Ok(None)
            }
            DecodeState::Checksum => {
                if byte != self.sum {
                    return self.reject(RejectReason::Checksum);
                }
                let parsed = CommandFrame::parse(self.kind, &self.payload, self.mode);
                self.reset();
                parsed.map(Some).map_err(HubError::from)
            }
        }
    }

    fn start_if_marker(&mut self, byte: u8) {
        if byte == FRAME_START {
            self.reset();
            self.sum = byte;
            self.state = DecodeState::Command;
        }
    }

    fn spend_call(&mut self) -> Result<(), HubError> {
        self.calls = self.calls.saturating_add(1);
        if self.calls > self.timeout_polls {
            self.reset();
            return Err(RejectReason::Timeout.into());
        }
        Ok(())
    }

    fn reject(&mut self, reason: RejectReason) -> Result<Option<CommandFrame>, HubError> {
        self.reset();
        Err(reason.into())
    }
}
