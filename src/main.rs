use std::process::ExitCode;

use eframe::egui;
use signpad::app::SignPadApp;
use signpad::{cli, i18n, log_err, logger, t};

fn main() -> ExitCode {
    // -- CLI / headless mode ------------------------------------------
    if cli::CliArgs::is_cli_mode() {
        use clap::Parser;
        // Initialize i18n so any deeply-nested t!() calls resolve cleanly
        i18n::init();
        let args = cli::CliArgs::parse();
        return cli::run(args);
    }

    // -- GUI mode -------------------------------------------------------

    // Session log first so startup problems are captured
    logger::init();
    i18n::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 520.0])
            .with_min_inner_size([380.0, 300.0])
            .with_title(t!("app.title")),
        ..Default::default()
    };

    match eframe::run_native(
        "SignPad",
        options,
        Box::new(|cc| Box::new(SignPadApp::new(cc))),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_err!("Failed to start GUI: {}", e);
            eprintln!("error: failed to start GUI: {}", e);
            ExitCode::FAILURE
        }
    }
}
