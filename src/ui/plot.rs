use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Signal plot (central panel)
// ---------------------------------------------------------------------------

/// Draw both curves of the signal under the cursor against their time axes.
///
/// The two series may differ in length; `zip` truncates the longer side, so
/// the shorter curve just ends early.
pub fn signal_plot(ui: &mut Ui, state: &AppState) {
    let entry = state.current();
    let (baseline_color, reference_color) = color::trace_colors();

    Plot::new("signal_plot")
        .legend(Legend::default())
        .x_axis_label("t")
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let baseline: PlotPoints = state
                .signals
                .baseline_t
                .iter()
                .zip(entry.baseline.iter())
                .map(|(&t, &y)| [t, y])
                .collect();
            plot_ui.line(
                Line::new(baseline)
                    .name(entry.name)
                    .color(baseline_color)
                    .width(1.5),
            );

            let reference: PlotPoints = state
                .signals
                .reference_t
                .iter()
                .zip(entry.reference.iter())
                .map(|(&t, &y)| [t, y])
                .collect();
            plot_ui.line(
                Line::new(reference)
                    .name(format!("{}_pa9", entry.name))
                    .color(reference_color)
                    .width(1.5),
            );
        });
}
