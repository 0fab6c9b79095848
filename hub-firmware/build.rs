// Build-Script: Linker-Skripte für den ESP32-C6
//
// Der Linker ruft dieses Binary bei Fehlern erneut auf
// (`--error-handling-script`), dann werden nur Hinweise ausgegeben.

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if let [_, kind, what, ..] = args.as_slice() {
        explain_link_error(kind, what);
    }

    println!(
        "cargo:rustc-link-arg=--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );

    // defmt.x: Symbole für das binäre Log-Format
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    // linkall.x: Flash/RAM-Layout, muss als letztes kommen
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

/// Gibt einen Hinweis zum fehlenden Symbol aus und beendet den Prozess
fn explain_link_error(kind: &str, what: &str) -> ! {
    if kind != "undefined-symbol" {
        std::process::exit(1);
    }

    let hint = match what {
        w if w.starts_with("_defmt_") => {
            Some("`defmt` not found - is `defmt.x` passed to the linker and `esp-println` linked?")
        }
        "_stack_start" => Some("Is the linker script `linkall.x` missing?"),
        w if w.starts_with("esp_rtos_") => {
            Some("`esp-rtos` symbols missing - call `esp_rtos::start()` before spawning tasks.")
        }
        _ => None,
    };
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("💡 {hint}");
        eprintln!();
    }
    std::process::exit(0);
}
