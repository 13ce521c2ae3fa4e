use eframe::egui::Ui;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar – selected signal
// ---------------------------------------------------------------------------

/// Render the header naming the signal under the cursor.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    let entry = state.current();
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(entry.name);
        ui.separator();
        ui.label(format!("signal {} of {}", state.cursor + 1, state.signals.len()));
        ui.separator();
        ui.label(format!(
            "{} baseline / {} reference samples",
            entry.baseline.len(),
            entry.reference.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Bottom bar – the two navigation buttons
// ---------------------------------------------------------------------------

/// Render the navigation buttons. These are the only mutators of the cursor.
pub fn nav_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("◀ Back").clicked() {
            state.retreat();
            log::debug!("showing {}", state.current().name);
        }
        ui.add_space(40.0);
        if ui.button("Forward ▶").clicked() {
            state.advance();
            log::debug!("showing {}", state.current().name);
        }
    });
}
