// src/app.rs
use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::analysis::{HttpTransport, Submitter};
use crate::config::{AnalysisResult, Settings};
use crate::errors::AnalysisError;
use crate::state::{RequestTicket, Session, ViewState};
use crate::ui::{self, DashboardSession, EguiChartBackend, EguiMapBackend};

/// What a worker hands back to the UI thread.
struct Completion {
    ticket: RequestTicket,
    outcome: Result<AnalysisResult, AnalysisError>,
}

/// Counts workers that have not reported back yet. Abandoned requests keep
/// running until the server answers or the timeout hits.
#[derive(Debug, Default)]
struct InFlight {
    count: usize,
}

impl InFlight {
    fn started(&mut self, ticket: RequestTicket) {
        if self.count > 0 {
            tracing::warn!(
                "Request #{} started while {} earlier request(s) are still running",
                ticket.seq(),
                self.count
            );
        }
        self.count += 1;
    }

    fn finished(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    fn count(&self) -> usize {
        self.count
    }
}

pub struct FailwatchApp {
    session: DashboardSession,
    submitter: Arc<Submitter<HttpTransport>>,
    completions_tx: Sender<Completion>,
    completions_rx: Receiver<Completion>,
    in_flight: InFlight,
}

impl FailwatchApp {
    pub fn new(settings: &Settings) -> Result<Self> {
        let submitter = Submitter::from_settings(&settings.server)?;
        tracing::info!("Analysis endpoint: {}", submitter.url());

        let (completions_tx, completions_rx) = crossbeam_channel::unbounded();

        Ok(Self {
            session: Session::new(
                EguiChartBackend::default(),
                EguiMapBackend::default(),
                &settings.map,
            ),
            submitter: Arc::new(submitter),
            completions_tx,
            completions_rx,
            in_flight: InFlight::default(),
        })
    }

    fn submit(&mut self, ctx: &egui::Context, now: Instant) {
        let Some((ticket, path)) = self.session.begin_submission(now) else {
            return;
        };

        let submitter = Arc::clone(&self.submitter);
        let sender = self.completions_tx.clone();
        let ctx = ctx.clone();

        let spawned = thread::Builder::new()
            .name(format!("analyze-{}", ticket.seq()))
            .spawn(move || {
                let outcome = submitter.submit_file(&path);
                // The window may have closed while we were waiting
                if sender.send(Completion { ticket, outcome }).is_ok() {
                    ctx.request_repaint();
                }
            });

        match spawned {
            Ok(_) => self.in_flight.started(ticket),
            Err(e) => {
                let err = AnalysisError::Network { message: e.to_string() };
                self.session.complete(ticket, Err(err), now);
            }
        }
    }

    fn drain_completions(&mut self, now: Instant) {
        while let Ok(Completion { ticket, outcome }) = self.completions_rx.try_recv() {
            self.in_flight.finished();
            self.session.complete(ticket, outcome, now);
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if let Some(deadline) = self.session.map.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        } else if self.session.view.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl eframe::App for FailwatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.drain_completions(now);
        self.session.map.poll(now);

        let submit = egui::TopBottomPanel::top("upload_panel")
            .show(ctx, |ui| ui::upload::draw_upload_panel(ui, &mut self.session))
            .inner;
        if submit {
            self.submit(ctx, now);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.view.dashboard_visible() {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui::dashboard::draw_dashboard(ui, &mut self.session);
                });
            } else if *self.session.view.state() == ViewState::Idle {
                ui.centered_and_justified(|ui| {
                    ui.label("Selecciona un archivo de log y pulsa «Analizar»");
                });
            }
        });

        self.schedule_repaint(ctx, now);
    }
}

impl Drop for FailwatchApp {
    fn drop(&mut self) {
        self.session.chart.clear();
        self.session.map.clear();
    }
}
