//! Core Types für LED-Strip und 7-Segment-Anzeigen
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB8;

/// Farbmodus des LED-Strips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorMode {
    /// 3 Kanäle pro LED
    #[default]
    Rgb,
    /// 4 Kanäle pro LED (zusätzlicher Weiß-Kanal)
    Rgbw,
}

impl ColorMode {
    /// Anzahl der Bytes pro Pixel auf der seriellen Leitung
    pub const fn channels(self) -> usize {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Rgbw => 4,
        }
    }
}

/// Ein Pixel des LED-Strips
///
/// Im RGB-Modus bleibt `white` immer 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    pub color: RGB8,
    pub white: u8,
}

impl Pixel {
    pub const OFF: Pixel = Pixel::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: RGB8 { r, g, b },
            white: 0,
        }
    }

    pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self {
            color: RGB8 { r, g, b },
            white: w,
        }
    }

    /// Graustufe mit gegebener Helligkeit
    ///
    /// RGBW-Strips nutzen dafür nur den Weiß-Kanal.
    pub const fn gray(level: u8, mode: ColorMode) -> Self {
        match mode {
            ColorMode::Rgb => Self::rgb(level, level, level),
            ColorMode::Rgbw => Self::rgbw(0, 0, 0, level),
        }
    }

    /// Liest ein Pixel aus den Wire-Bytes (r, g, b[, w])
    ///
    /// `bytes` muss genau `mode.channels()` lang sein.
    pub fn from_wire(bytes: &[u8], mode: ColorMode) -> Option<Self> {
        match (mode, bytes) {
            (ColorMode::Rgb, &[r, g, b]) => Some(Self::rgb(r, g, b)),
            (ColorMode::Rgbw, &[r, g, b, w]) => Some(Self::rgbw(r, g, b, w)),
            _ => None,
        }
    }

    /// Schreibt das Pixel im Wire-Format, gibt die Anzahl Bytes zurück
    pub fn to_wire(&self, mode: ColorMode, out: &mut [u8]) -> usize {
        out[0] = self.color.r;
        out[1] = self.color.g;
        out[2] = self.color.b;
        if mode == ColorMode::Rgbw {
            out[3] = self.white;
        }
        mode.channels()
    }
}

/// Segment-Zustand einer 7-Segment-Anzeige
///
/// Bit 0 = Segment a ... Bit 6 = Segment g, Bit 7 = Dezimalpunkt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segments(pub u8);

/// Glyphen für die Ziffern 0-9
const DIGIT_GLYPHS: [u8; 10] = [63, 6, 91, 79, 102, 109, 125, 7, 127, 111];

impl Segments {
    pub const BLANK: Segments = Segments(0);
    pub const DECIMAL_POINT: u8 = 1 << 7;

    /// Glyph für eine Ziffer, `None` für Werte > 9
    pub fn digit(value: u8) -> Option<Self> {
        DIGIT_GLYPHS.get(value as usize).map(|&bits| Segments(bits))
    }

    pub const fn with_decimal_point(self) -> Self {
        Segments(self.0 | Self::DECIMAL_POINT)
    }

    /// Prüft, ob ein einzelnes Segment (0..8) leuchtet
    pub const fn is_lit(self, segment: usize) -> bool {
        segment < 8 && self.0 & (1 << segment) != 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl From<u8> for Segments {
    fn from(bits: u8) -> Self {
        Segments(bits)
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for ColorMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ColorMode::Rgb => defmt::write!(fmt, "RGB"),
            ColorMode::Rgbw => defmt::write!(fmt, "RGBW"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Pixel {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Pixel {{ rgb: ({}, {}, {}), w: {} }}",
            self.color.r,
            self.color.g,
            self.color.b,
            self.white
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Segments {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Segments({=u8:#b})", self.0)
    }
}
