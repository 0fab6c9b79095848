//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

/// Prüfsumme eines Frames: Summe aller Bytes modulo 256
///
/// # Beispiele
///
/// ```
/// # use led_hub_core::checksum;
/// assert_eq!(checksum(&[0xAA, 0x02, 0x02, 0x01, 0x40]), 0xEF);
/// assert_eq!(checksum(&[0xFF, 0x02]), 0x01);
/// ```
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte))
}

/// Rechnet eine Prozentangabe (0-100) in einen Kanalwert (0-255) um
///
/// ```
/// # use led_hub_core::percent_to_level;
/// assert_eq!(percent_to_level(25), 63);
/// assert_eq!(percent_to_level(100), 255);
/// ```
pub fn percent_to_level(percent: u8) -> u8 {
    let percent = percent.min(100) as u16;
    (255 * percent / 100) as u8
}

/// Helligkeit des Boot-Fades bei Schritt `step` von `steps`
///
/// Linear von 0 bis `ceiling`, monoton nicht fallend, `step >= steps` liefert
/// genau `ceiling`.
pub fn fade_level(step: u16, steps: u16, ceiling: u8) -> u8 {
    if steps == 0 || step >= steps {
        return ceiling;
    }
    (ceiling as u32 * step as u32 / steps as u32) as u8
}

/// Tick-Periode der Multiplex-Engine in Mikrosekunden
///
/// `1 / (displays * frequency)` Sekunden, mindestens 1 µs.
pub fn tick_period_us(displays: usize, frequency_hz: u32) -> u32 {
    let ticks_per_second = (displays.max(1) as u32).saturating_mul(frequency_hz.max(1));
    (1_000_000 / ticks_per_second).max(1)
}
