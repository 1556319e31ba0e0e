/*!
 * Desktop dashboard for gapdash - the Gapminder country table explorer
 *
 * Five tabs, each an independent panel:
 * - Dataset: the whole table
 * - Population / GDP per Capita / Life Expectancy: top-15 bar rankings
 * - Choropleth Map: one metric for one year, per country
 *
 * Every selector change is dispatched through the library's binding layer;
 * the app only paints whatever chart was last published for the open tab.
 */

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use gapdash::chart::{BarChart, ChoroplethMap, TableView};
use gapdash::config::AppConfig;
use gapdash::controls::Control;
use gapdash::palette::Rgb8;
use gapdash::viz::text::truncate_to_width;
use gapdash::{
    ChartSpec, ControlEvent, CsvDataset, Dashboard, DatasetProvider, MemorySurface, PanelId,
    plotly, viz,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "gapdash-gui", version, about = "Gapminder dashboard (desktop)")]
struct GuiArgs {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    dataset: Option<PathBuf>,
}

const TABLE_COL_W: f32 = 110.0;

fn main() -> Result<()> {
    env_logger::init();
    let args = GuiArgs::parse();

    let mut config = AppConfig::resolve(args.config.as_deref())?;
    if let Some(path) = args.dataset {
        config.dataset = Some(path);
    }
    let dataset_path = config.dataset_path();
    let dataset = CsvDataset::new(&dataset_path)
        .load_dataset()
        .with_context(|| format!("cannot start without data ({})", dataset_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([720.0, 520.0])
            .with_title("Gapminder Dashboard"),
        ..Default::default()
    };

    let width = config.render.width;
    eframe::run_native(
        "Gapminder Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashApp::new(Arc::new(dataset), width)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Main application state
struct DashApp {
    dash: Dashboard,
    surface: MemorySurface,
    tab: PanelId,
    export_dir: PathBuf,
    image_width: u32,

    status_message: String,
    error_message: String,
}

impl DashApp {
    fn new(dataset: Arc<gapdash::Dataset>, image_width: u32) -> Self {
        let mut surface = MemorySurface::new();
        let mut dash = Dashboard::new(dataset);
        dash.start(&mut surface);
        Self {
            dash,
            surface,
            tab: PanelId::Dataset,
            export_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            image_width,
            status_message: String::new(),
            error_message: String::new(),
        }
    }

    fn dispatch(&mut self, event: ControlEvent) {
        match self.dash.dispatch(&event, &mut self.surface) {
            Ok(_) => self.error_message.clear(),
            Err(err) => self.error_message = format!("Selection rejected: {err}"),
        }
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        let controls: Vec<Control> = self.dash.controls_for(self.tab).cloned().collect();
        let criteria = self.dash.panel(self.tab).map(|p| *p.criteria());
        let mut picked: Vec<ControlEvent> = Vec::new();

        for control in &controls {
            let current = criteria
                .and_then(|c| c.value_of(control.id.field()))
                .unwrap_or_default();
            let current_label = control
                .options
                .iter()
                .find(|o| o.value == current)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| current.clone());

            ui.label(egui::RichText::new(control.id.label()).strong());
            egui::ComboBox::from_id_salt(control.id.as_str())
                .selected_text(current_label)
                .width(180.0)
                .show_ui(ui, |ui| {
                    for opt in &control.options {
                        if ui
                            .selectable_label(opt.value == current, &opt.label)
                            .clicked()
                            && opt.value != current
                        {
                            picked.push(ControlEvent::from_control(control.id, opt.value.clone()));
                        }
                    }
                });
            ui.add_space(12.0);
        }

        for event in picked {
            self.dispatch(event);
        }
    }

    fn export_ui(&mut self, ui: &mut egui::Ui) {
        let Some(spec) = self.surface.latest(self.tab).cloned() else {
            return;
        };
        ui.horizontal(|ui| {
            if matches!(spec, ChartSpec::Bar(_)) && ui.button("Save image…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .set_directory(&self.export_dir)
                    .set_file_name(format!("{}.png", self.tab.key()))
                    .add_filter("Image", &["png", "svg"])
                    .save_file()
                {
                    self.report(
                        viz::render_chart(&spec, &path, self.image_width),
                        format!("Wrote {}", path.display()),
                    );
                }
            }
            if ui.button("Export HTML…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .set_directory(&self.export_dir)
                    .set_file_name(format!("{}.html", self.tab.key()))
                    .save_file()
                {
                    self.report(
                        plotly::write_html(&path, "Gapminder Dashboard", &[(self.tab.label(), &spec)]),
                        format!("Wrote {}", path.display()),
                    );
                }
            }
        });
    }

    fn report(&mut self, result: Result<()>, ok: String) {
        match result {
            Ok(()) => {
                self.status_message = ok;
                self.error_message.clear();
            }
            Err(err) => {
                self.error_message = format!("Export failed: {err:#}");
                self.status_message.clear();
            }
        }
    }
}

impl eframe::App for DashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| ui.heading("Gapminder Dashboard"));
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                for id in PanelId::ALL {
                    ui.selectable_value(&mut self.tab, id, id.label());
                }
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            }
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
        });

        if self.tab != PanelId::Dataset {
            egui::SidePanel::left("controls")
                .resizable(false)
                .exact_width(210.0)
                .show(ctx, |ui| {
                    ui.add_space(10.0);
                    self.controls_ui(ui);
                    ui.separator();
                    self.export_ui(ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.surface.latest(self.tab) {
            Some(ChartSpec::Bar(chart)) => paint_bars(ui, chart),
            Some(ChartSpec::Choropleth(map)) => paint_map(ui, map),
            Some(ChartSpec::Table(table)) => paint_table(ui, table),
            None => {
                ui.label("Nothing published yet.");
            }
        });
    }
}

fn color32(c: Rgb8) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

fn paint_bars(ui: &mut egui::Ui, chart: &BarChart) {
    if let Some(title) = &chart.layout.title {
        ui.heading(title);
    }
    let size = egui::vec2(ui.available_width(), chart.layout.height as f32);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 6.0, egui::Color32::WHITE);

    if chart.bars.is_empty() {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "No data",
            egui::FontId::proportional(16.0),
            egui::Color32::GRAY,
        );
        return;
    }

    let plot = egui::Rect::from_min_max(
        rect.min + egui::vec2(20.0, 30.0),
        rect.max - egui::vec2(20.0, 48.0),
    );
    let max = chart.bars.iter().map(|b| b.value).fold(0.0f64, f64::max);
    let slot = plot.width() / chart.bars.len() as f32;
    let mut hovered = None;

    for (i, bar) in chart.bars.iter().enumerate() {
        let h = if max > 0.0 {
            (bar.value / max) as f32 * plot.height()
        } else {
            0.0
        };
        let x0 = plot.left() + slot * i as f32 + slot * 0.1;
        let bar_rect = egui::Rect::from_min_max(
            egui::pos2(x0, plot.bottom() - h),
            egui::pos2(x0 + slot * 0.8, plot.bottom()),
        );
        painter.rect_filled(bar_rect, 0.0, color32(bar.color));
        painter.text(
            egui::pos2(bar_rect.center().x, bar_rect.top() - 2.0),
            egui::Align2::CENTER_BOTTOM,
            &bar.label,
            egui::FontId::proportional(11.0),
            egui::Color32::DARK_GRAY,
        );
        painter.text(
            egui::pos2(bar_rect.center().x, plot.bottom() + 6.0),
            egui::Align2::CENTER_TOP,
            truncate_to_width(&bar.category, 11, slot.max(8.0) as u32),
            egui::FontId::proportional(11.0),
            egui::Color32::BLACK,
        );
        if response
            .hover_pos()
            .is_some_and(|p| p.x >= bar_rect.left() && p.x <= bar_rect.right())
        {
            hovered = Some(bar);
        }
    }
    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        egui::Stroke::new(1.0, egui::Color32::GRAY),
    );

    if let Some(bar) = hovered {
        response.on_hover_text_at_pointer(format!("{}\n{}: {}", bar.category, chart.y_title, bar.label));
    }
}

fn paint_map(ui: &mut egui::Ui, map: &ChoroplethMap) {
    if let Some(title) = &map.layout.title {
        ui.heading(title);
    }
    ui.label(format!(
        "{} countries with data; countries not listed have no data. Export HTML for the world map.",
        map.regions.len()
    ));

    // color scale legend
    if let Some((lo, hi)) = map.range {
        let size = egui::vec2(ui.available_width().min(480.0), 18.0);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let steps = 64;
        let w = rect.width() / steps as f32;
        for s in 0..steps {
            let t = s as f64 / (steps - 1) as f64;
            let r = egui::Rect::from_min_size(
                egui::pos2(rect.left() + w * s as f32, rect.top()),
                egui::vec2(w + 0.5, rect.height()),
            );
            painter.rect_filled(r, 0.0, color32(map.color_scale.sample(t)));
        }
        ui.horizontal(|ui| {
            ui.label(format!("{lo:.2}"));
            ui.add_space((size.x - 120.0).max(0.0));
            ui.label(format!("{hi:.2}"));
        });
    }
    ui.add_space(8.0);

    let mut regions: Vec<_> = map.regions.iter().collect();
    regions.sort_by(|a, b| a.country.cmp(&b.country));
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("map_regions").striped(true).show(ui, |ui| {
                for r in regions {
                    let (swatch, _) =
                        ui.allocate_exact_size(egui::vec2(28.0, 14.0), egui::Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, color32(r.color));
                    ui.monospace(&r.location);
                    ui.label(r.hover.replace('\n', " | "));
                    ui.end_row();
                }
            });
        });
}

fn paint_table(ui: &mut egui::Ui, table: &TableView) {
    let row_h = ui.text_style_height(&egui::TextStyle::Body);
    egui::ScrollArea::horizontal().show(ui, |ui| {
        ui.vertical(|ui| {
            egui::Grid::new("dataset_header")
                .min_col_width(TABLE_COL_W)
                .max_col_width(TABLE_COL_W)
                .show(ui, |ui| {
                    for c in &table.columns {
                        ui.label(egui::RichText::new(c).strong());
                    }
                    ui.end_row();
                });
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show_rows(ui, row_h, table.rows.len(), |ui, range| {
                    egui::Grid::new("dataset_rows")
                        .striped(true)
                        .min_col_width(TABLE_COL_W)
                        .max_col_width(TABLE_COL_W)
                        .start_row(range.start)
                        .show(ui, |ui| {
                            for row in &table.rows[range] {
                                for cell in row {
                                    ui.label(cell);
                                }
                                ui.end_row();
                            }
                        });
                });
        });
    });
}
