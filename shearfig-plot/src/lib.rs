//! Interactive presentation of the composed flow figure.

use eframe::egui;
use egui_plot::{Arrows, Line, Plot, PlotPoints, Points};
use shearfig_core::figure::{FlowFigure, Panel};

/// A runnable egui application showing the eight figure panels in a 4×2 grid.
pub struct FigureApp {
    figure: FlowFigure,
}

impl FigureApp {
    #[must_use]
    pub fn new(figure: FlowFigure) -> Self {
        Self { figure }
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn run(self, name: &str) -> Result<(), eframe::Error> {
        eframe::run_native(
            name,
            eframe::NativeOptions::default(),
            Box::new(|cc| {
                // The figure is black-on-white, like the printed page.
                cc.egui_ctx.set_visuals(egui::Visuals::light());
                Ok(Box::new(self))
            }),
        )
    }
}

impl eframe::App for FigureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("flow-figure").show(ui, |ui| {
                    for (index, panel) in self.figure.panels().iter().enumerate() {
                        panel_plot(ui, panel);
                        if index % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });
            });
        });
    }
}

fn panel_plot(ui: &mut egui::Ui, panel: &Panel) {
    let color = egui::Color32::BLACK;

    ui.vertical(|ui| {
        ui.strong(format!("{}  {}", panel.spec.tag, panel.spec.y_label));

        Plot::new(panel.spec.tag)
            .width(320.0)
            .height(320.0)
            .data_aspect(1.0)
            .include_x(panel.spec.x_range.0)
            .include_x(panel.spec.x_range.1)
            .include_y(panel.spec.y_range.0)
            .include_y(panel.spec.y_range.1)
            .show_axes(false)
            .show_grid(false)
            .show(ui, |plot_ui| {
                for run in panel.clipped_curve() {
                    plot_ui.line(Line::new(PlotPoints::from(run)).color(color).width(2.0));
                }
                plot_ui.points(Points::new(vec![panel.marker]).radius(5.0).color(color));

                if !panel.flow_arrows.is_empty() {
                    let origins: Vec<[f64; 2]> =
                        panel.flow_arrows.iter().map(|arrow| arrow.from).collect();
                    let tips: Vec<[f64; 2]> =
                        panel.flow_arrows.iter().map(|arrow| arrow.to).collect();
                    plot_ui.arrows(Arrows::new(origins, tips).color(color));
                }
            });
    });
}
