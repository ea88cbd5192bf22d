use std::collections::BTreeSet;
use std::time::Duration;

use eframe::{egui, Frame};
use egui::{Context, RichText};

use reqwest::blocking::Client;
use reqwest::Result;
use serde::Deserialize;

const SERVER: &str = "http://127.0.0.1:5000";

/// Window-width breakpoints (upper bound, columns), narrowest first.
const COLUMN_BREAKPOINTS: [(f32, usize); 4] = [(380.0, 3), (576.0, 4), (768.0, 5), (992.0, 7)];
/// Columns once the window is wider than every breakpoint.
const MAX_COLUMNS: usize = 10;

/// Number of grid columns for an available width.
fn columns_for_width(width: f32) -> usize {
    COLUMN_BREAKPOINTS
        .iter()
        .find(|(limit, _)| width < *limit)
        .map_or(MAX_COLUMNS, |(_, columns)| *columns)
}

/// A kana card as returned by the server.
#[derive(Debug, Deserialize)]
struct Cell {
    kana: String,
    romaji: String,
}

/// The subset of `/v1/grid` the UI displays.
#[derive(Debug, Deserialize)]
struct GridView {
    seed: String,
    cells: Vec<Cell>,
    link: String,
}

/// Script choice on the UI side, sent as the `type` parameter.
#[derive(Debug, PartialEq, Clone, Copy)]
enum KanaChoice {
    Hiragana,
    Katakana,
}

/// REST context holding a reusable blocking HTTP client.
struct RESTContext {
    client: Client,
}

impl RESTContext {
    /// Creates a new REST context with a timeout.
    fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::new(5, 0))
            .build()?;
        Ok(Self { client })
    }

    /// Sends a GET request to `/v1/grid` with query parameters.
    fn get_grid(&self, params: &[(String, String)]) -> Result<GridView> {
        self.client
            .get(format!("{SERVER}/v1/grid"))
            .query(params)
            .send()?
            .error_for_status()?
            .json::<GridView>()
    }

    /// Sends a GET request to `/v1/rows`.
    fn get_rows(&self) -> Result<String> {
        let response = self.client
            .get(format!("{SERVER}/v1/rows"))
            .send()?
            .error_for_status()?;
        response.text()
    }
}

/// Global UI state (MUST persist between frames in egui).
struct ShuffleUI {
    rest: RESTContext,
    grid: Option<GridView>,
    status: Option<String>,

    kana: KanaChoice,
    dakuten: bool,
    available_rows: Vec<String>,
    selected_rows: BTreeSet<String>,

    seed: String,
    show_romaji: bool,
}

impl ShuffleUI {
    /// Initializes the UI with the server's row groups and a first grid.
    fn new() -> Result<Self> {
        let mut ui = Self {
            rest: RESTContext::new()?,
            grid: None,
            status: None,

            kana: KanaChoice::Hiragana,
            dakuten: false,
            available_rows: Vec::new(),
            selected_rows: BTreeSet::new(),

            seed: String::new(),
            show_romaji: false,
        };
        ui.get_rows();
        ui.get_grid();
        Ok(ui)
    }

    /// Builds the query parameters for the API.
    ///
    /// Defaults are left out, the server fills them in.
    /// An empty seed asks for the daily seed.
    fn build_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if self.kana == KanaChoice::Katakana {
            params.push(("type".into(), "katakana".into()));
        }
        if !self.seed.trim().is_empty() {
            params.push(("seed".into(), self.seed.trim().to_owned()));
        }
        if self.dakuten {
            params.push(("d".into(), "1".into()));
        }
        if !self.selected_rows.is_empty() {
            // Server reorders the keys canonically
            let rows: Vec<&str> = self.selected_rows.iter().map(String::as_str).collect();
            params.push(("rows".into(), rows.join(",")));
        }
        if self.show_romaji {
            params.push(("r".into(), "1".into()));
        }

        params
    }

    /// Performs the grid request.
    fn get_grid(&mut self) {
        let params = self.build_query();
        match self.rest.get_grid(&params) {
            Ok(grid) => {
                self.status = None;
                self.grid = Some(grid);
            }
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }

    /// Performs the row groups request.
    fn get_rows(&mut self) {
        match self.rest.get_rows() {
            Ok(rows) => self.available_rows = rows.lines().map(|s| s.trim().to_owned()).collect(),
            Err(e) => self.status = Some(format!("Error: {e}")),
        }
    }
}

impl eframe::App for ShuffleUI {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        let mut changed = false;

        egui::SidePanel::left("settings").show(ctx, |ui| {
            ui.heading("Settings");

            ui.label("Kana type");
            changed |= ui.radio_value(&mut self.kana, KanaChoice::Hiragana, "Hiragana").changed();
            changed |= ui.radio_value(&mut self.kana, KanaChoice::Katakana, "Katakana").changed();
            ui.separator();

            changed |= ui.checkbox(&mut self.dakuten, "Dakuten / handakuten").changed();
            ui.separator();

            ui.label("Rows (none = all)");
            for row in &self.available_rows {
                let mut checked = self.selected_rows.contains(row);
                if ui.checkbox(&mut checked, row).changed() {
                    changed = true;
                    if checked {
                        self.selected_rows.insert(row.clone());
                    } else {
                        self.selected_rows.remove(row);
                    }
                }
            }
            ui.horizontal(|ui| {
                if ui.button("All").clicked() {
                    self.selected_rows = self.available_rows.iter().cloned().collect();
                    changed = true;
                }
                if ui.button("None").clicked() {
                    self.selected_rows.clear();
                    changed = true;
                }
            });
            ui.separator();

            ui.label("Seed (empty = today)");
            ui.text_edit_singleline(&mut self.seed);
            if ui.button("Shuffle").clicked() {
                changed = true;
            }
            if ui.button("Random seed").clicked() {
                self.seed = "random:0".to_owned();
                changed = true;
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                // The share link carries the romaji flag, so it needs a refresh too
                changed |= ui.checkbox(&mut self.show_romaji, "Show romaji").changed();
                if let Some(grid) = &self.grid {
                    ui.label(format!("Seed: {}", grid.seed));
                    if ui.button("Copy link").clicked() {
                        ctx.copy_text(grid.link.clone());
                        self.status = Some("Link copied".to_owned());
                    }
                }
            });

            if let Some(status) = &self.status {
                ui.label(status);
            }
            ui.separator();

            let Some(grid) = &self.grid else {
                ui.label("Click Shuffle to start");
                return;
            };

            let columns = columns_for_width(ui.available_width());
            egui::Grid::new("kana_grid")
                .num_columns(columns)
                .spacing([18.0, 12.0])
                .show(ui, |ui| {
                    for (i, cell) in grid.cells.iter().enumerate() {
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(&cell.kana).size(36.0));
                            if self.show_romaji {
                                ui.label(RichText::new(&cell.romaji).weak());
                            }
                        });
                        if (i + 1) % columns == 0 {
                            ui.end_row();
                        }
                    }
                });
        });

        if changed {
            self.get_grid();
            // A random request resolves to a concrete seed; keep it so the grid stays put
            if self.seed.starts_with("random:") {
                if let Some(grid) = &self.grid {
                    self.seed = grid.seed.clone();
                }
            }
        }
    }
}

/// Application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 520.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "kana-shuffle",
        options,
        Box::new(|_| Ok(Box::new(ShuffleUI::new()?))),
    )
}
