use std::path::PathBuf;

use crossbeam_channel::{Receiver, Sender};
use delivery_core::{
    attachment::IMAGE_EXTENSIONS, view::ledger_rows, AttachmentPreview, DeliveryForm,
    FieldUpdate, PenStyle, SignaturePad,
};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::previews::{PreviewCache, PreviewKey};
use crate::ui::widgets::{option_combo, signature_pad};

const ATTACHMENT_PREVIEW_WIDTH: f32 = 128.0;

pub struct DeliveryFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    form: DeliveryForm,
    previews: PreviewCache,
    // Bumped whenever the signature slot changes so its texture is rebuilt.
    signature_revision: u64,

    status: String,
}

impl DeliveryFormApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
    ) -> Self {
        let pad = SignaturePad::new(
            settings.signature_width,
            settings.signature_height,
            PenStyle {
                width: settings.pen_width,
                ..PenStyle::default()
            },
        );
        Self {
            cmd_tx,
            ui_rx,
            form: DeliveryForm::with_signature_pad(pad),
            previews: PreviewCache::default(),
            signature_revision: 0,
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::AttachmentDecoded { generation, result } => {
                    let (result, preview) = match result {
                        Ok(decoded) => (Ok(decoded.uri), Some(decoded.preview)),
                        Err(err) => (Err(err), None),
                    };
                    let failure = result
                        .as_ref()
                        .err()
                        .map(|err| UiError::from_capture(UiErrorContext::AttachmentDecode, err));
                    if self.form.complete_attachment(generation, result) {
                        if let Some(preview) = preview {
                            self.previews
                                .insert_image(PreviewKey::DraftAttachment(generation), preview);
                        }
                        if let Some(err) = failure {
                            self.report(err);
                        }
                    }
                }
                UiEvent::Error(err) => self.report(err),
            }
        }
    }

    fn report(&mut self, err: UiError) {
        tracing::warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
        self.status = err.status_text();
    }

    fn attach(&mut self, path: PathBuf) {
        self.previews.forget_draft();
        let ticket = self.form.select_attachment(&path);
        if dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::DecodeAttachment(ticket.clone()),
            &mut self.status,
        ) {
            self.status.clear();
        } else {
            let reason = self.status.clone();
            self.form.complete_attachment(
                ticket.generation,
                Err(shared::error::CaptureError::read(
                    ticket.path,
                    std::io::Error::other(reason),
                )),
            );
        }
    }

    fn save_signature(&mut self) {
        match self.form.save_signature() {
            Ok(_) => {
                self.signature_revision += 1;
                self.previews.forget_signature();
            }
            Err(err) => self.report(UiError::from_capture(UiErrorContext::SignatureSave, &err)),
        }
    }

    fn clear_signature(&mut self) {
        if self.form.clear_signature() {
            self.signature_revision += 1;
            self.previews.forget_signature();
        }
    }

    fn submit(&mut self) {
        let generation = self.form.attachment_generation();
        let index = self.form.submit();
        self.previews.promote_draft(generation, index);
        self.signature_revision += 1;
        self.previews.forget_draft();
        self.status = format!("Venta {} registrada", index + 1);
    }

    fn cancel(&mut self) {
        self.form.reset_draft();
        self.signature_revision += 1;
        self.previews.forget_draft();
        self.status.clear();
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Actas de Entrega");
        ui.add_space(8.0);

        let draft = self.form.draft().clone();

        ui.label(egui::RichText::new("Código de vendedor:").strong());
        if let Some(value) = option_combo(ui, "seller_code", draft.seller_code) {
            self.form.set_field(FieldUpdate::SellerCode(value));
        }
        ui.add_space(6.0);

        ui.label(egui::RichText::new("Código de cliente:").strong());
        if let Some(value) = option_combo(ui, "client_code", draft.client_code) {
            self.form.set_field(FieldUpdate::ClientCode(value));
        }
        ui.add_space(6.0);

        ui.label(egui::RichText::new("Marca:").strong());
        if let Some(value) = option_combo(ui, "brand", draft.brand) {
            self.form.set_field(FieldUpdate::Brand(value));
        }
        ui.add_space(6.0);

        ui.label(egui::RichText::new("Actividad:").strong());
        if let Some(value) = option_combo(ui, "activity", draft.activity) {
            self.form.set_field(FieldUpdate::Activity(value));
        }
        ui.add_space(6.0);

        ui.label(egui::RichText::new("Descripción:").strong());
        let mut description = draft.description;
        let response = ui.add(
            egui::TextEdit::multiline(&mut description)
                .id_salt("description")
                .desired_width(f32::INFINITY)
                .hint_text("Descripción sobre el producto"),
        );
        if response.changed() {
            self.form.set_field(FieldUpdate::Description(description));
        }
        ui.add_space(10.0);

        self.show_attachment_input(ui, draft.attachment_name.as_deref());
        ui.add_space(10.0);
        self.show_signature_input(ui);
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if ui.button("Aceptar").clicked() {
                self.submit();
            }
            if ui.button("Cancelar").clicked() {
                self.cancel();
            }
        });
    }

    fn show_attachment_input(&mut self, ui: &mut egui::Ui, attachment_name: Option<&str>) {
        ui.label(egui::RichText::new("Agregar Foto").strong());
        ui.horizontal(|ui| {
            if ui.button("📎 Seleccionar archivo").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Imágenes", IMAGE_EXTENSIONS)
                    .pick_file()
                {
                    self.attach(path);
                }
            }
            ui.small(attachment_name.unwrap_or("Ningún archivo seleccionado"));
        });

        let generation = self.form.attachment_generation();
        match self.form.attachment_preview() {
            AttachmentPreview::Empty => {}
            AttachmentPreview::Loading { .. } => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Cargando vista previa…");
                });
            }
            AttachmentPreview::Ready(uri) => {
                self.previews.show(
                    ui,
                    PreviewKey::DraftAttachment(generation),
                    uri,
                    ATTACHMENT_PREVIEW_WIDTH,
                );
            }
            AttachmentPreview::Failed(reason) => {
                ui.colored_label(
                    ui.visuals().error_fg_color,
                    format!("No se pudo leer la foto: {reason}"),
                );
            }
        }
    }

    fn show_signature_input(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Agregar Firma").strong());
        if let Some(pad) = self.form.signature_pad_mut() {
            signature_pad(ui, pad).on_hover_text("Firme aquí");
        }
        ui.horizontal(|ui| {
            if ui.button("Guardar Firma").clicked() {
                self.save_signature();
            }
            if ui.button("Limpiar").clicked() {
                self.clear_signature();
            }
        });
        if let Some(uri) = self.form.signature_preview() {
            let width = ui.available_width();
            self.previews
                .show(ui, PreviewKey::Signature(self.signature_revision), uri, width);
        }
    }

    fn show_ledger(&mut self, ui: &mut egui::Ui) {
        ui.heading("Submissions:");
        let rows = ledger_rows(self.form.ledger());
        if rows.is_empty() {
            ui.weak("Sin registros todavía.");
            return;
        }
        for row in rows {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&row.heading).strong().size(16.0));
                    ui.weak(&row.submitted_at);
                });
                for line in row.summary_lines() {
                    ui.label(line);
                }
                if let Some(uri) = &row.attachment {
                    self.previews.show(
                        ui,
                        PreviewKey::Ledger(row.index),
                        uri,
                        ATTACHMENT_PREVIEW_WIDTH,
                    );
                }
            });
            ui.add_space(4.0);
        }
    }
}

impl eframe::App for DeliveryFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(if self.status.is_empty() {
                    "Listo"
                } else {
                    self.status.as_str()
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_form(ui);
                    ui.separator();
                    self.show_ledger(ui);
                });
        });

        if matches!(
            self.form.attachment_preview(),
            AttachmentPreview::Loading { .. }
        ) {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::{error::CaptureError, DataUri};

    use super::*;
    use crate::controller::events::DecodedAttachment;
    use crate::ui::previews::PreviewImage;

    fn decoded(uri: DataUri) -> DecodedAttachment {
        DecodedAttachment {
            uri,
            preview: Ok(PreviewImage {
                width: 1,
                height: 1,
                rgba: vec![255, 255, 255, 255],
            }),
        }
    }

    fn app() -> (DeliveryFormApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = DeliveryFormApp::new(cmd_tx, ui_rx, &Settings::default());
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn mounts_pad_with_configured_size() {
        let (app, _cmd_rx, _ui_tx) = app();
        assert_eq!(app.form.signature_pad().expect("pad").size(), (325, 200));
    }

    #[test]
    fn attaching_queues_decode_and_applies_latest_result() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.attach(PathBuf::from("/tmp/uno.png"));
        app.attach(PathBuf::from("/tmp/dos.png"));

        let generations: Vec<u64> = cmd_rx
            .try_iter()
            .map(|cmd| match cmd {
                BackendCommand::DecodeAttachment(ticket) => ticket.generation,
            })
            .collect();
        assert_eq!(generations.len(), 2);

        let latest = DataUri::encode("image/png", b"dos");
        ui_tx
            .send(UiEvent::AttachmentDecoded {
                generation: generations[1],
                result: Ok(decoded(latest.clone())),
            })
            .expect("send");
        ui_tx
            .send(UiEvent::AttachmentDecoded {
                generation: generations[0],
                result: Ok(decoded(DataUri::encode("image/png", b"uno"))),
            })
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.form.attachment_preview().ready(), Some(&latest));
        assert_eq!(app.form.draft().attachment_name.as_deref(), Some("dos.png"));
        assert!(app
            .previews
            .contains(PreviewKey::DraftAttachment(generations[1])));
        assert!(!app
            .previews
            .contains(PreviewKey::DraftAttachment(generations[0])));
    }

    #[test]
    fn submitted_attachment_reuses_the_worker_preview() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.attach(PathBuf::from("/tmp/foto.png"));
        let Ok(BackendCommand::DecodeAttachment(ticket)) = cmd_rx.try_recv() else {
            panic!("decode command queued");
        };
        ui_tx
            .send(UiEvent::AttachmentDecoded {
                generation: ticket.generation,
                result: Ok(decoded(DataUri::encode("image/png", b"foto"))),
            })
            .expect("send");
        app.process_ui_events();

        app.save_signature();
        assert!(app
            .previews
            .contains(PreviewKey::DraftAttachment(ticket.generation)));

        app.submit();
        assert!(app.previews.contains(PreviewKey::Ledger(0)));
        assert!(!app
            .previews
            .contains(PreviewKey::DraftAttachment(ticket.generation)));
    }

    #[test]
    fn failed_decode_shows_status() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.attach(PathBuf::from("/tmp/rota.png"));
        let Ok(BackendCommand::DecodeAttachment(ticket)) = cmd_rx.try_recv() else {
            panic!("decode command queued");
        };

        ui_tx
            .send(UiEvent::AttachmentDecoded {
                generation: ticket.generation,
                result: Err(CaptureError::read(
                    &ticket.path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                )),
            })
            .expect("send");
        app.process_ui_events();

        assert!(matches!(
            app.form.attachment_preview(),
            AttachmentPreview::Failed(_)
        ));
        assert!(app.status.starts_with("No se pudo leer la foto"));
    }

    #[test]
    fn disconnected_worker_marks_attachment_failed() {
        let (mut app, cmd_rx, _ui_tx) = app();
        drop(cmd_rx);

        app.attach(PathBuf::from("/tmp/foto.png"));

        assert!(matches!(
            app.form.attachment_preview(),
            AttachmentPreview::Failed(_)
        ));
        assert!(app.status.contains("se detuvo"));
    }

    #[test]
    fn submit_and_cancel_reset_the_draft() {
        let (mut app, _cmd_rx, _ui_tx) = app();
        app.form
            .set_field(FieldUpdate::Description("primera".to_string()));
        app.save_signature();
        app.submit();

        assert_eq!(app.form.ledger().len(), 1);
        assert!(app.form.draft().is_empty());
        assert!(app.form.ledger().records()[0].signature.is_some());
        assert_eq!(app.status, "Venta 1 registrada");

        app.form
            .set_field(FieldUpdate::Description("descartada".to_string()));
        app.cancel();
        assert!(app.form.draft().is_empty());
        assert_eq!(app.form.ledger().len(), 1);
    }

    #[test]
    fn signature_changes_bump_revision() {
        let (mut app, _cmd_rx, _ui_tx) = app();
        let start = app.signature_revision;
        app.save_signature();
        app.clear_signature();
        assert_eq!(app.signature_revision, start + 2);
        assert!(app.form.signature_preview().is_none());
    }
}
