// src/ui/upload.rs
use eframe::egui;
use rfd::FileDialog;

use super::DashboardSession;

/// Draws the file picker, spinner and error banner. Returns true when the
/// user asked for an analysis.
pub fn draw_upload_panel(ui: &mut egui::Ui, session: &mut DashboardSession) -> bool {
    let mut submit = false;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui.button("Seleccionar archivo…").clicked() {
            let file_dialog = FileDialog::new()
                .add_filter("Logs", &["log", "txt"])
                .add_filter("Todos los archivos", &["*"])
                .set_title("Seleccionar archivo de log");

            if let Some(path) = file_dialog.pick_file() {
                tracing::debug!("Selected {}", path.display());
                session.selected_file = Some(path);
            }
        }

        match &session.selected_file {
            Some(path) => {
                let name = path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(name).on_hover_text(path.display().to_string());
            }
            None => {
                ui.weak("Ningún archivo seleccionado");
            }
        }

        ui.separator();

        if ui.button("Analizar").clicked() {
            submit = true;
        }

        if session.view.spinner_visible() {
            ui.add(egui::Spinner::new());
            ui.label("Analizando…");
        }
    });

    if let Some(message) = session.view.error_text() {
        ui.colored_label(egui::Color32::from_rgb(198, 40, 40), format!("Error: {}", message));
    }
    ui.add_space(6.0);

    submit
}
