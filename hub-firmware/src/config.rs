// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Die Pin-Nummern hier müssen zu den GPIO-Peripherals passen, die
// `main.rs` an die Tasks übergibt (dort per `const`-Assertion geprüft).
// `hub_config()` prüft nur auf Konflikte.

use led_hub_core::{BootFadeConfig, ColorMode, HubConfig, SEGMENT_COUNT};

// ============================================================================
// LED-Strip Konfiguration
// ============================================================================

/// GPIO-Pin für die Datenleitung des Strips (WS2812/SK6812)
pub const STRIP_GPIO_PIN: u8 = 10;

/// Anzahl der LEDs im Strip
pub const NUM_LEDS: usize = 55;

/// RGB (WS2812) oder RGBW (SK6812)
pub const COLOR_MODE: ColorMode = ColorMode::Rgb;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Mindestabstand zwischen zwei Strip-Übertragungen
pub const STRIP_REFRESH_MS: u32 = 20;

// ============================================================================
// Boot-Fade
// ============================================================================

/// `false` = Strip bleibt nach dem Boot aus
pub const FADE_IN_ON_BOOT: bool = true;

pub const BOOT_FADE: BootFadeConfig = BootFadeConfig {
    led_count: 50,
    ceiling_percent: 25,
    steps: 64,
    step_interval_ms: 20,
};

// ============================================================================
// 7-Segment-Anzeigen
// ============================================================================

/// Ground-Pins der Anzeigen, links nach rechts
/// Leeres Array = Anzeige deaktiviert
pub const GROUND_PINS: [u8; 4] = [18, 19, 20, 21];

/// Segment-Pins a, b, c, d, e, f, g, dp
pub const SEGMENT_PINS: [u8; SEGMENT_COUNT] = [0, 1, 2, 3, 4, 5, 6, 7];

/// Ground-Pin zieht bei aktiver Anzeige auf LOW (gemeinsame Kathode)
pub const GROUND_ACTIVE_LOW: bool = true;

/// Bildwiederholrate pro Anzeige in Hz
pub const MULTIPLEX_FREQUENCY_HZ: u32 = 120;

// ============================================================================
// Serielle Schnittstelle
// ============================================================================

/// Baudrate, muss auf dem Host identisch sein
pub const BAUD_RATE: u32 = 9600;

/// UART1 TX (Status-Bytes an den Host)
pub const UART_TX_PIN: u8 = 22;

/// UART1 RX (Kommandos vom Host)
pub const UART_RX_PIN: u8 = 23;

/// Größe des Lesepuffers pro UART-Abfrage
pub const UART_RX_CHUNK: usize = 32;

/// Frame-Timeout in Abfragen ohne vollständigen Frame
pub const FRAME_TIMEOUT_POLLS: u16 = 256;

/// `false` = keine READY/ACK/NACK-Bytes an den Host
pub const ECHO_STATUS: bool = true;

/// Pause zwischen zwei leeren UART-Abfragen: etwa eine Byte-Zeit
/// (Startbit + 8 Datenbits + Stoppbit)
///
/// Damit entspricht [`FRAME_TIMEOUT_POLLS`] ungefähr Byte-Zeiten, und ein
/// kompletter Frame passt immer ins Budget.
pub const fn poll_interval_us(baud_rate: u32) -> u64 {
    10_000_000 / baud_rate as u64
}

/// Baut die [`HubConfig`] aus den Konstanten oben
pub fn hub_config() -> HubConfig {
    HubConfig {
        num_leds: NUM_LEDS,
        color_mode: COLOR_MODE,
        strip_pin: STRIP_GPIO_PIN,
        ground_pins: &GROUND_PINS,
        segment_pins: SEGMENT_PINS,
        multiplex_frequency_hz: MULTIPLEX_FREQUENCY_HZ,
        baud_rate: BAUD_RATE,
        boot_fade: FADE_IN_ON_BOOT.then_some(BOOT_FADE),
        frame_timeout_polls: FRAME_TIMEOUT_POLLS,
        strip_refresh_ms: STRIP_REFRESH_MS,
        echo_status: ECHO_STATUS,
    }
}
