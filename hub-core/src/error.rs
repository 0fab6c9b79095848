//! Fehler-Typen für Decoder, Dispatcher und Strip

/// Grund, warum ein serieller Frame verworfen wurde
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RejectReason {
    /// LEN größer als die maximale Payload
    Length,
    /// Prüfsumme stimmt nicht
    Checksum,
    /// Unbekannter Kommando-Typ
    UnknownCommand,
    /// Payload passt nicht zum Kommando (Länge, Pixel-Raster)
    Payload,
    /// Frame nicht innerhalb des Aufruf-Budgets vollständig
    Timeout,
}

/// Fehler-Typ für alle Laufzeit-Operationen
///
/// Kein Fehler ist fatal: die Multiplex-Engine tickt in jedem Fall weiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HubError {
    /// Frame verworfen, Puffer unverändert
    FrameRejected(RejectReason),
    /// Index außerhalb von `[0, NUM_LEDS)` bzw. `[0, DISPLAYS)`
    IndexOutOfRange,
    /// Strip-Übertragung gestartet während eine andere noch läuft
    HardwareBusy,
    /// Hardware-Zugriff auf den Strip fehlgeschlagen
    WriteFailed,
}

impl From<RejectReason> for HubError {
    fn from(reason: RejectReason) -> Self {
        HubError::FrameRejected(reason)
    }
}

/// Fehler bei der Validierung von [`crate::HubConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `num_leds` ist 0 oder größer als [`crate::MAX_LEDS`]
    LedCount,
    /// Mehr Ground-Pins als [`crate::MAX_DISPLAYS`]
    DisplayCount,
    /// Multiplex-Frequenz ist 0
    MultiplexFrequency,
    /// Baudrate ist 0
    BaudRate,
    /// Boot-Fade mit 0 Schritten oder Decke über 100 %
    BootFade,
    /// Ein Pin ist doppelt vergeben
    PinConflict(u8),
}
