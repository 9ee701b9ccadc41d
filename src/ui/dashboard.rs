// src/ui/dashboard.rs
use eframe::egui;

use super::DashboardSession;

const MAP_HEIGHT: f32 = 380.0;

pub fn draw_dashboard(ui: &mut egui::Ui, session: &mut DashboardSession) {
    let Some(summary) = &session.summary else {
        return;
    };

    // Summary cards
    ui.horizontal(|ui| {
        let cards = [
            ("Total de fallos", &summary.total_failures),
            ("Principal atacante", &summary.top_attacker),
            ("Usuario más atacado", &summary.top_user),
        ];
        let width = ui.available_width() / cards.len() as f32 - 12.0;

        for (title, value) in cards {
            ui.group(|ui| {
                ui.set_min_width(width);
                ui.vertical(|ui| {
                    ui.heading(title);
                    ui.add_space(4.0);
                    ui.strong(value.as_str());
                });
            });
        }
    });

    ui.add_space(16.0);

    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.heading("Top 5 IPs atacantes");
            if let Some(chart) = session.chart.current() {
                chart.show(ui);
            }
        });
    });

    ui.add_space(16.0);

    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.heading("Mapa de ataques");

            // Laid out with a real size now, so the map can fix its bounds
            let size = [ui.available_width(), MAP_HEIGHT];
            session.map.observe_container(size);

            if let Some(map) = session.map.current_mut() {
                if map.marker_count() == 0 {
                    ui.weak("Ninguna dirección pudo ser geolocalizada");
                }
                map.show(ui, MAP_HEIGHT);
            }
        });
    });

    ui.add_space(8.0);
    ui.weak(format!(
        "Último análisis: {}",
        summary.completed_at.format("%Y-%m-%d %H:%M:%S")
    ));
}
