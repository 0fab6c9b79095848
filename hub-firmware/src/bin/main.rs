// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::timer::PeriodicTimer;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{Config as UartConfig, Uart};

// Backtrace bei Panic und println!() Support
use defmt::{info, warn};
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use led_hub::config::{
    BAUD_RATE, GROUND_ACTIVE_LOW, GROUND_PINS, SEGMENT_PINS, STRIP_GPIO_PIN, UART_RX_PIN,
    UART_TX_PIN, hub_config,
};
use led_hub::hal::{GpioDisplayPins, MuxTickTimer};
use led_hub::tasks::hub_task;
use led_hub_core::{HubConfig, TickTimer};

// Die Peripherals in main() sind fest verdrahtet und müssen zu config.rs passen
const _: () = assert!(matches!(SEGMENT_PINS, [0, 1, 2, 3, 4, 5, 6, 7]));
const _: () = assert!(matches!(GROUND_PINS, [18, 19, 20, 21]));
const _: () = assert!(STRIP_GPIO_PIN == 10);
const _: () = assert!(UART_TX_PIN == 22 && UART_RX_PIN == 23);

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, startet den Multiplex-Tick und spawnt den Hub Task.
/// Danach schläft main() - alle Arbeit läuft im Task und im Interrupt.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Hub-Konfiguration prüfen, bevor irgendein Pin angefasst wird
    static HUB_CONFIG: static_cell::StaticCell<HubConfig> = static_cell::StaticCell::new();
    let hub_config = &*HUB_CONFIG.init(hub_config());
    if let Err(e) = hub_config.validate() {
        defmt::panic!("Invalid hub configuration: {}", e);
    }
    if !hub_config.is_flicker_free() {
        warn!(
            "{} displays x {} Hz is below 100 Hz, display will flicker",
            hub_config.displays(),
            hub_config.multiplex_frequency_hz
        );
    }

    // 7-Segment-Bank: Segmente a-g, dp auf GPIO0-7
    let out = OutputConfig::default();
    let segments = [
        Output::new(peripherals.GPIO0, Level::Low, out),
        Output::new(peripherals.GPIO1, Level::Low, out),
        Output::new(peripherals.GPIO2, Level::Low, out),
        Output::new(peripherals.GPIO3, Level::Low, out),
        Output::new(peripherals.GPIO4, Level::Low, out),
        Output::new(peripherals.GPIO5, Level::Low, out),
        Output::new(peripherals.GPIO6, Level::Low, out),
        Output::new(peripherals.GPIO7, Level::Low, out),
    ];

    // Ground-Pins GPIO18-21, starten inaktiv
    let inactive = Level::from(GROUND_ACTIVE_LOW);
    let mut grounds = heapless::Vec::new();
    for ground in [
        Output::new(peripherals.GPIO18, inactive, out),
        Output::new(peripherals.GPIO19, inactive, out),
        Output::new(peripherals.GPIO20, inactive, out),
        Output::new(peripherals.GPIO21, inactive, out),
    ]
    .into_iter()
    .take(hub_config.displays())
    {
        // Kapazität ist MAX_DISPLAYS, validate() hat die Anzahl geprüft
        let _ = grounds.push(ground);
    }
    let pins = GpioDisplayPins::new(segments, grounds, GROUND_ACTIVE_LOW);

    // Multiplex-Tick auf TIMG1 (TIMG0 gehört esp-rtos)
    let timg1 = TimerGroup::new(peripherals.TIMG1);
    let mut tick_timer = MuxTickTimer::install(PeriodicTimer::new(timg1.timer0), pins);
    if hub_config.displays() > 0 {
        tick_timer.start(hub_config.tick_period_us());
        info!("Multiplex tick every {} us", hub_config.tick_period_us());
    } else {
        info!("No displays configured, multiplexing disabled");
    }

    // UART1 zum Host: GPIO22 = TX, GPIO23 = RX
    let uart = Uart::new(
        peripherals.UART1,
        UartConfig::default().with_baudrate(BAUD_RATE),
    )
    .expect("Failed to initialize UART1")
    .with_tx(peripherals.GPIO22)
    .with_rx(peripherals.GPIO23);

    // Spawn Hub Task (Strip auf GPIO10)
    spawner
        .spawn(hub_task(
            peripherals.GPIO10,
            peripherals.RMT,
            uart,
            tick_timer,
            hub_config,
        ))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft im Task und im Interrupt)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
