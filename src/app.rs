//! The SignPad application shell: a toolbar, the signing form, and a status
//! bar around a single [`SignaturePad`] bound to the encoded-signature field.

use eframe::egui;
use std::time::{Duration, Instant};

use crate::pad::SignaturePad;
use crate::settings::{AppSettings, ThemeMode};
use crate::stroke::Ink;
use crate::{log_err, log_info, t};

/// How long a status-bar notice stays visible.
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Transient status-bar notice (save/copy feedback).
struct Notice {
    text: String,
    expires_at: Instant,
}

pub struct SignPadApp {
    pad: SignaturePad,
    /// The bound output field: holds the data URI of the most recently
    /// completed stroke, exactly as a consuming form would read it.
    signature_value: String,
    settings: AppSettings,
    notice: Option<Notice>,
}

impl SignPadApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = AppSettings::load();

        // Apply saved language preference (or auto-detect on first boot)
        if settings.language.is_empty() {
            let detected = crate::i18n::detect_system_language();
            crate::i18n::set_language(&detected);
        } else {
            crate::i18n::set_language(&settings.language);
        }

        apply_theme(&cc.egui_ctx, settings.theme_mode);

        let mut pad = SignaturePad::new();
        pad.set_ink(Ink::new(settings.ink_color, settings.pen_width));

        log_info!(
            "SignPad started (language '{}')",
            crate::i18n::current_language()
        );

        Self {
            pad,
            signature_value: String::new(),
            settings,
            notice: None,
        }
    }

    fn notify(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            expires_at: Instant::now() + NOTICE_TTL,
        });
    }

    fn save_png(&mut self) {
        if self.pad.surface().is_blank() {
            self.notify(t!("toast.nothing_to_save"));
            return;
        }
        let Some(path) = crate::io::prompt_save_png_path("signature.png") else {
            return;
        };
        let path = crate::io::with_png_extension(path);
        match crate::io::save_png(self.pad.surface().image(), &path) {
            Ok(()) => {
                log_info!("Saved signature PNG to {}", path.display());
                self.notify(t!("toast.saved", path = path.display()));
            }
            Err(e) => {
                log_err!("PNG save to {} failed: {}", path.display(), e);
                self.notify(t!("toast.save_failed", error = e));
            }
        }
    }

    fn copy_data_uri(&mut self) {
        if self.signature_value.is_empty() {
            self.notify(t!("toast.nothing_to_save"));
            return;
        }
        let result = arboard::Clipboard::new()
            .and_then(|mut clip| clip.set_text(self.signature_value.clone()));
        match result {
            Ok(()) => self.notify(t!("toast.copied")),
            Err(e) => {
                log_err!("Clipboard copy failed: {}", e);
                self.notify(t!("toast.copy_failed", error = e));
            }
        }
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(t!("toolbar.clear")).clicked() {
                self.pad.clear();
                self.signature_value.clear();
                log_info!("Pad cleared");
            }
            if ui.button(t!("toolbar.save_png")).clicked() {
                self.save_png();
            }
            if ui.button(t!("toolbar.copy_uri")).clicked() {
                self.copy_data_uri();
            }

            ui.separator();

            // Pen color and width feed straight into the pad's ink.
            let c = self.settings.ink_color;
            let mut c32 = egui::Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]);
            if ui.color_edit_button_srgba(&mut c32).changed() {
                self.settings.ink_color = c32.to_array();
                self.pad
                    .set_ink(Ink::new(self.settings.ink_color, self.settings.pen_width));
                self.settings.save();
            }
            let mut width = self.settings.pen_width;
            if ui
                .add(egui::Slider::new(&mut width, 0.5..=16.0).fixed_decimals(1))
                .changed()
            {
                self.settings.pen_width = width;
                self.pad
                    .set_ink(Ink::new(self.settings.ink_color, self.settings.pen_width));
                self.settings.save();
            }

            ui.separator();

            self.show_language_selector(ui);

            let mut dark = self.settings.theme_mode == ThemeMode::Dark;
            if ui.checkbox(&mut dark, t!("toolbar.theme_dark")).changed() {
                self.settings.theme_mode = if dark { ThemeMode::Dark } else { ThemeMode::Light };
                apply_theme(ui.ctx(), self.settings.theme_mode);
                self.settings.save();
            }
        });
    }

    fn show_language_selector(&mut self, ui: &mut egui::Ui) {
        let current_code = if self.settings.language.is_empty() {
            "auto".to_string()
        } else {
            self.settings.language.clone()
        };
        let display_text = if current_code == "auto" {
            format!("{} (auto)", t!("toolbar.language"))
        } else {
            crate::i18n::LANGUAGES
                .iter()
                .find(|(c, _)| *c == current_code.as_str())
                .map(|(_, name)| name.to_string())
                .unwrap_or_else(|| current_code.clone())
        };
        egui::ComboBox::from_id_source("language_select")
            .selected_text(display_text)
            .show_ui(ui, |ui| {
                if ui
                    .selectable_label(current_code == "auto", "Auto (System)")
                    .clicked()
                {
                    self.settings.language = String::new();
                    let detected = crate::i18n::detect_system_language();
                    crate::i18n::set_language(&detected);
                    self.settings.save();
                }
                for &(code, name) in crate::i18n::LANGUAGES {
                    if ui
                        .selectable_label(current_code.as_str() == code, name)
                        .clicked()
                    {
                        self.settings.language = code.to_string();
                        crate::i18n::set_language(code);
                        self.settings.save();
                    }
                }
            });
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.heading(t!("form.heading"));
        ui.label(egui::RichText::new(t!("form.hint")).weak());
        ui.add_space(6.0);

        // Reserve room below the pad for the output-field view. The pad
        // tracks the laid-out size, so resizing the window resizes the
        // surface (clipping or padding the drawing, never rescaling it).
        let output_view_height = 64.0;
        let pad_size = egui::vec2(
            ui.available_width(),
            (ui.available_height() - output_view_height).max(80.0),
        );
        self.pad.show(ui, pad_size, Some(&mut self.signature_value));

        ui.add_space(6.0);
        ui.label(egui::RichText::new(t!("form.output_label")).small().weak());
        let preview = if self.signature_value.is_empty() {
            t!("form.output_empty")
        } else {
            field_preview(&self.signature_value)
        };
        ui.label(egui::RichText::new(preview).monospace().weak());
    }

    fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.signature_value.is_empty() {
                ui.label(egui::RichText::new(t!("status.blank")).weak());
            } else {
                ui.label(t!("status.signed"));
            }
            ui.separator();
            ui.label(t!(
                "status.size",
                width = self.pad.surface().width(),
                height = self.pad.surface().height()
            ));

            if let Some(notice) = &self.notice {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&notice.text).weak());
                });
            }
        });
    }
}

impl eframe::App for SignPadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(notice) = &self.notice
            && Instant::now() >= notice.expires_at
        {
            self.notice = None;
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| self.show_toolbar(ui));
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| self.show_status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.show_form(ui));

        // Keep repainting while a notice is pending so it expires on time.
        if self.notice.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.settings.save();
        log_info!("SignPad exiting");
    }
}

fn apply_theme(ctx: &egui::Context, mode: ThemeMode) {
    ctx.set_visuals(match mode {
        ThemeMode::Light => egui::Visuals::light(),
        ThemeMode::Dark => egui::Visuals::dark(),
    });
}

/// Shorten a data URI for on-screen display.
fn field_preview(value: &str) -> String {
    const SHOWN: usize = 64;
    if value.len() <= SHOWN {
        value.to_string()
    } else {
        let head: String = value.chars().take(SHOWN).collect();
        format!("{}… ({} chars)", head, value.len())
    }
}
