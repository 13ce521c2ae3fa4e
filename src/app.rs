use eframe::egui;

use crate::data::model::SignalSet;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CircuitScopeApp {
    pub state: AppState,
}

impl CircuitScopeApp {
    pub fn new(signals: SignalSet) -> Self {
        Self {
            state: AppState::new(signals),
        }
    }
}

impl eframe::App for CircuitScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: selected signal ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Bottom panel: navigation buttons ----
        egui::TopBottomPanel::bottom("nav_bar").show(ctx, |ui| {
            panels::nav_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::signal_plot(ui, &self.state);
        });
    }
}
