// Desktop host for the file list: renders the listing and the action bar,
// runs directory loads on the worker thread and keeps the selection
// across restarts.

use crate::config::Config;
use crate::controller::FileListController;
use crate::entry::FileEntry;
use crate::host::{EntryActions, FileChooserHost};
use crate::io::{spawn_worker, DirectoryWatcher, IoCommand, IoResult, ListingOptions};
use crate::persist::SavedSelection;
use crate::state::SelectionMode;
use crate::style;
use chrono::{DateTime, Local};
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Records what the user picked.
#[derive(Default)]
pub struct ChosenFiles {
    pub last_selection: Vec<FileEntry>,
    pub action_title: Option<String>,
}

impl FileChooserHost for ChosenFiles {
    fn on_file_selected(&mut self, entry: &FileEntry) {
        debug!("Opened {}", entry.path.display());
    }

    fn on_files_selected(&mut self, entries: Vec<FileEntry>) {
        for entry in &entries {
            println!("{}", entry.path.display());
        }
        self.last_selection = entries;
    }

    fn on_selection_changed(&mut self, mode: SelectionMode, count: usize) {
        self.action_title = match mode {
            SelectionMode::Multi => Some(count.to_string()),
            SelectionMode::Single => None,
        };
    }
}

enum RowAction {
    Select(FileEntry),
    LongSelect(FileEntry),
}

pub struct FileChooserApp {
    controller: FileListController<ChosenFiles>,
    config: Config,
    config_dirty: bool,
    options: ListingOptions,
    command_tx: Sender<IoCommand>,
    result_rx: Receiver<IoResult>,
    watcher: Option<DirectoryWatcher>,
    ctx: egui::Context,
    error_message: Option<(String, Instant)>,
    session_path: Option<PathBuf>,
}

impl FileChooserApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: Config,
        start_path: PathBuf,
        session_path: Option<PathBuf>,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        style::apply(&ctx, config.is_dark(), config.font.font_size);

        let repaint_ctx = ctx.clone();
        let (command_tx, result_rx) = spawn_worker(move || repaint_ctx.request_repaint());

        let mut app = Self {
            controller: FileListController::new(ChosenFiles::default(), start_path),
            options: config.listing_options(),
            config,
            config_dirty: false,
            command_tx,
            result_rx,
            watcher: None,
            ctx,
            error_message: None,
            session_path,
        };
        app.restore_session();
        app
    }

    fn restore_session(&mut self) {
        let Some(path) = self.session_path.clone() else {
            return;
        };
        match SavedSelection::load_from(&path) {
            Ok(saved) if !saved.is_empty() => {
                let report = self.controller.restore_state(&saved);
                info!(
                    "Restored {} selected entries ({} skipped)",
                    report.entries.len(),
                    report.skipped.len()
                );
            }
            Ok(_) => {}
            Err(e) => warn!("Ignoring saved session: {}", e),
        }
    }

    fn save_session(&self) {
        let Some(path) = &self.session_path else {
            return;
        };
        if let Err(e) = self.controller.save_state().save_to(path) {
            warn!("Failed to save session: {}", e);
        }
    }

    fn set_error(&mut self, message: String) {
        self.error_message = Some((message, Instant::now()));
    }

    fn dispatch_load(&mut self) {
        let Some(ticket) = self.controller.take_load_request() else {
            return;
        };

        let watching = self
            .watcher
            .as_ref()
            .is_some_and(|w| w.path() == ticket.path.as_path());
        if !watching {
            let repaint_ctx = self.ctx.clone();
            self.watcher = match DirectoryWatcher::watch(&ticket.path, move || {
                repaint_ctx.request_repaint()
            }) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    warn!("Not watching {}: {}", ticket.path.display(), e);
                    None
                }
            };
        }

        let options = self.options;
        if self
            .command_tx
            .send(IoCommand::LoadDirectory { ticket, options })
            .is_err()
        {
            self.set_error("Directory worker stopped".to_string());
        }
    }

    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                IoResult::DirectoryLoaded { ticket, entries } => {
                    self.controller.finish_load(&ticket, entries);
                }
                IoResult::Error { ticket, message } => {
                    if self.controller.finish_load(&ticket, Vec::new()) {
                        self.set_error(message);
                    }
                }
            }
        }

        if self.watcher.as_ref().is_some_and(|w| w.changed()) {
            self.controller.refresh();
        }

        if let Some((_, time)) = &self.error_message {
            if time.elapsed().as_secs() >= style::MESSAGE_TIMEOUT_SECS {
                self.error_message = None;
            }
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.dismiss();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Backspace)) {
            self.controller.navigate_up();
        }
        if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowLeft)) {
            self.controller.navigate_back();
        }
        if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowRight)) {
            self.controller.navigate_forward();
        }
        if ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::A)) {
            self.controller.toggle_select_all();
        }
    }

    fn render_action_bar(&mut self, ui: &mut egui::Ui) {
        let title = self
            .controller
            .host()
            .action_title
            .clone()
            .unwrap_or_default();
        ui.horizontal(|ui| {
            if ui.button("\u{2715}").on_hover_text("Cancel").clicked() {
                self.controller.dismiss();
            }
            ui.label(egui::RichText::new(format!("{} selected", title)).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Upload").clicked() {
                    self.controller.upload();
                }
                if ui.button("Select all").clicked() {
                    self.controller.toggle_select_all();
                }
            });
        });
    }

    fn render_path_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("\u{2B06} Up").clicked() {
                self.controller.navigate_up();
            }
            if ui.button("\u{2B05}").on_hover_text("Back").clicked() {
                self.controller.navigate_back();
            }
            if ui.button("\u{27F3}").on_hover_text("Refresh").clicked() {
                self.controller.refresh();
            }
            ui.label(self.controller.current_path().display().to_string());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.checkbox(&mut self.options.show_hidden, "Hidden").changed() {
                    self.config.ui.show_hidden = self.options.show_hidden;
                    self.config_dirty = true;
                    self.controller.refresh();
                }
            });
        });
    }

    fn render_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!("{} items", self.controller.entries().len()));
            if self.controller.is_loading() {
                ui.spinner();
            }
            let chosen = &self.controller.host().last_selection;
            if !chosen.is_empty() {
                let names: Vec<_> = chosen.iter().map(|e| e.name.as_str()).collect();
                ui.label(format!("| Chosen: {}", names.join(", ")));
            }
            if let Some((err, _)) = &self.error_message {
                ui.colored_label(egui::Color32::RED, format!("| {}", err));
            }
        });
    }

    fn render_listing(&self, ui: &mut egui::Ui) -> Option<RowAction> {
        use egui_extras::{Column, TableBuilder};

        let mut action = None;
        let entries = self.controller.entries();
        let multi = self.controller.mode().is_multi();

        TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::exact(style::ICON_COL_WIDTH))
            .column(Column::remainder().clip(true))
            .column(Column::exact(style::SIZE_COL_WIDTH))
            .column(Column::exact(style::MODIFIED_COL_WIDTH))
            .header(style::HEADER_HEIGHT, |mut header| {
                header.col(|_| {});
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    ui.strong("Size");
                });
                header.col(|ui| {
                    ui.strong("Modified");
                });
            })
            .body(|body| {
                body.rows(style::ROW_HEIGHT, entries.len(), |mut row| {
                    let entry = &entries[row.index()];
                    let is_selected = multi && self.controller.is_selected(entry);
                    row.set_selected(is_selected);

                    row.col(|ui| {
                        ui.label(entry.get_icon());
                    });
                    row.col(|ui| {
                        let text = if is_selected {
                            egui::RichText::new(entry.display_name()).color(style::ACCENT)
                        } else {
                            egui::RichText::new(entry.display_name())
                        };
                        let response =
                            style::truncated_label_with_sense(ui, text, egui::Sense::click());
                        if response.secondary_clicked() || response.long_touched() {
                            action = Some(RowAction::LongSelect(entry.clone()));
                        } else if response.clicked() {
                            action = Some(RowAction::Select(entry.clone()));
                        }
                    });
                    row.col(|ui| {
                        if !entry.is_dir {
                            ui.label(bytesize::ByteSize(entry.size).to_string());
                        }
                    });
                    row.col(|ui| {
                        let datetime: DateTime<Local> = entry.modified.into();
                        ui.label(datetime.format("%Y-%m-%d %H:%M").to_string());
                    });
                });
            });

        action
    }
}

impl eframe::App for FileChooserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.handle_input(ctx);

        let multi = self.controller.mode().is_multi();
        let mut top_frame = egui::Frame::side_top_panel(&ctx.style());
        if multi {
            top_frame = top_frame.fill(style::ACTION_BAR_FILL);
        }

        egui::TopBottomPanel::top("top_panel").frame(top_frame).show(ctx, |ui| {
            ui.add_space(4.0);
            if multi {
                self.render_action_bar(ui);
            } else {
                self.render_path_bar(ui);
            }
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if !self.controller.is_loading() && self.controller.entries().is_empty() {
                    ui.centered_and_justified(|ui| {
                        ui.label("Empty directory");
                    });
                    return None;
                }
                self.render_listing(ui)
            })
            .inner;

        if let Some(action) = action {
            let actions: &mut dyn EntryActions = &mut self.controller;
            match action {
                RowAction::Select(entry) => actions.on_select(&entry),
                RowAction::LongSelect(entry) => {
                    actions.on_long_select(&entry);
                }
            }
        }

        // Navigation from this frame's events starts loading right away
        self.dispatch_load();
    }
}

impl Drop for FileChooserApp {
    fn drop(&mut self) {
        self.save_session();
        if self.config_dirty {
            if let Err(e) = self.config.save() {
                warn!("Failed to save config: {}", e);
            }
        }
    }
}
