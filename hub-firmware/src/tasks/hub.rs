// Hub Task - liest Kommandos von der UART und treibt Strip und Boot-Fade
use defmt::{debug, info, warn};
use embassy_time::{Instant, Timer};
use esp_hal::Blocking;
use esp_hal::uart::Uart;
use esp_hal_smartled::smart_led_buffer;
use led_hub_core::{Event, FadeStatus, Hub, HubConfig, SmartLedWriter, TickTimer};

use crate::DISPLAY_FRAME;
use crate::config::{NUM_LEDS, RMT_CLOCK_MHZ, UART_RX_CHUNK, poll_interval_us};
use crate::hal::{MuxTickTimer, RmtStripWriter};

/// Hub Logic - Hauptloop ohne Hardware-Initialisierung
///
/// Pro Durchlauf:
/// - anliegende Bytes an den Decoder geben, sonst einen Leerlauf-Aufruf
/// - fälligen Boot-Fade-Schritt ausführen
/// - Strip übertragen, wenn er sich geändert hat
///
/// # Trait-basierte Abstraktion
/// `W: SmartLedWriter` und `T: TickTimer` sind auf dem Board
/// `RmtStripWriter` und `MuxTickTimer`.
pub async fn hub_logic<W: SmartLedWriter, T: TickTimer>(
    mut hub: Hub<'_, W>,
    mut uart: Uart<'static, Blocking>,
    mut timer: T,
) -> ! {
    let idle_delay_us = poll_interval_us(hub.config().baud_rate);
    let mut rx = [0u8; UART_RX_CHUNK];

    if let Some(byte) = hub.ready_byte() {
        send_status(&mut uart, byte);
    }
    info!("Hub ready: {} LEDs", hub.leds().len());

    loop {
        let mut received = false;
        if uart.read_ready() {
            match uart.read(&mut rx) {
                Ok(n) => {
                    received = n > 0;
                    for &byte in &rx[..n] {
                        if let Some(event) = hub.on_byte(byte) {
                            report(&hub, &mut uart, &event);
                        }
                    }
                }
                Err(e) => warn!("UART read error: {:?}", e),
            }
        } else if let Some(event) = hub.on_idle() {
            report(&hub, &mut uart, &event);
        }

        let now_ms = Instant::now().as_millis();
        if let Some(FadeStatus::Finished { level }) = hub.fade_step(now_ms) {
            info!("Boot fade finished (level {})", level);
        }
        if let Err(e) = hub.refresh(now_ms, &mut timer) {
            warn!("Strip transmission failed: {}", e);
        }

        // Nur warten, wenn nichts anlag: volle FIFO zuerst abarbeiten
        if !received {
            Timer::after_micros(idle_delay_us).await;
        }
    }
}

/// Protokolliert ein Event und schickt das Status-Byte an den Host
fn report<W: SmartLedWriter>(
    hub: &Hub<'_, W>,
    uart: &mut Uart<'static, Blocking>,
    event: &Event,
) {
    match event {
        Event::Applied { kind, target } => debug!("{} -> {}", kind, target),
        Event::Rejected(e) => warn!("Frame rejected: {}", e),
    }
    if let Some(byte) = hub.status_byte(event) {
        send_status(uart, byte);
    }
}

fn send_status(uart: &mut Uart<'static, Blocking>, byte: u8) {
    if let Err(e) = uart.write(&[byte]) {
        warn!("Failed to send status byte: {:?}", e);
    }
}

/// Hub Task - Embassy Task für parallele Ausführung
///
/// Dieser Task übernimmt die Strip-Initialisierung und ruft dann
/// die testbare Logik in `hub_logic()` auf.
///
/// # Parameter
/// - `strip_pin`: GPIO für die Datenleitung des Strips
/// - `rmt_peripheral`: RMT Peripheral für präzises Timing
/// - `uart`: serielle Verbindung zum Host
/// - `timer`: Multiplex-Tick (für die Blackout während der Übertragung)
/// - `config`: geprüfte Hub-Konfiguration
#[embassy_executor::task]
pub async fn hub_task(
    strip_pin: esp_hal::peripherals::GPIO10<'static>,
    rmt_peripheral: esp_hal::peripherals::RMT<'static>,
    uart: Uart<'static, Blocking>,
    timer: MuxTickTimer,
    config: &'static HubConfig,
) {
    // Buffer für SmartLED Daten erstellen
    // Macro allokiert Speicher im richtigen Format für RMT
    let mut rmt_buffer = smart_led_buffer!(NUM_LEDS);

    let writer = RmtStripWriter::new(strip_pin, rmt_peripheral, RMT_CLOCK_MHZ, &mut rmt_buffer);
    let writer = match writer {
        Ok(writer) => writer,
        Err(e) => defmt::panic!("Failed to initialize RMT: {:?}", e),
    };

    let hub = Hub::new(config, &DISPLAY_FRAME, writer);
    hub_logic(hub, uart, timer).await
}
