use delivery_core::{view::selected_label, Point, SignaturePad};
use eframe::egui;
use shared::domain::FormOption;

const PAD_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(229, 231, 235);
const PAD_BORDER: egui::Color32 = egui::Color32::from_rgb(209, 213, 219);

/// Combo box over a closed option set. Returns the new selection when it changed.
pub fn option_combo<T: FormOption>(
    ui: &mut egui::Ui,
    id: &str,
    current: Option<T>,
) -> Option<Option<T>> {
    let mut selected = current;
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_label(current))
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for option in T::ALL {
                ui.selectable_value(&mut selected, Some(*option), option.label());
            }
        });
    (selected != current).then_some(selected)
}

/// Drawing surface backed by `pad`; pointer drags become strokes.
pub fn signature_pad(ui: &mut egui::Ui, pad: &mut SignaturePad) -> egui::Response {
    let (width, height) = pad.size();
    let surface = egui::vec2(width as f32, height as f32);
    let (response, painter) = ui.allocate_painter(surface, egui::Sense::click_and_drag());
    let rect = response.rect;
    let scale = egui::vec2(surface.x / rect.width(), surface.y / rect.height());

    let to_surface = |pos: egui::Pos2| {
        Point::new((pos.x - rect.min.x) * scale.x, (pos.y - rect.min.y) * scale.y)
    };
    let to_screen =
        |point: &Point| egui::pos2(rect.min.x + point.x / scale.x, rect.min.y + point.y / scale.y);

    if response.drag_started() {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or(response.interact_pointer_pos());
        if let Some(pos) = origin {
            pad.begin_stroke(to_surface(pos));
        }
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            pad.extend_stroke(to_surface(pos));
        }
    }
    if response.drag_stopped() {
        pad.end_stroke();
    }
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            pad.begin_stroke(to_surface(pos));
            pad.end_stroke();
        }
    }

    painter.rect_filled(rect, 4.0, PAD_BACKGROUND);
    painter.rect_stroke(
        rect,
        4.0,
        egui::Stroke::new(1.0, PAD_BORDER),
        egui::StrokeKind::Inside,
    );

    let pen = pad.pen();
    let [r, g, b, a] = pen.color;
    let color = egui::Color32::from_rgba_unmultiplied(r, g, b, a);
    let pen_width = pen.width / scale.x;
    for stroke in pad.strokes() {
        match stroke.as_slice() {
            [] => {}
            [dot] => {
                painter.circle_filled(to_screen(dot), pen_width / 2.0, color);
            }
            points => {
                let line: Vec<egui::Pos2> = points.iter().map(to_screen).collect();
                painter.add(egui::Shape::line(line, egui::Stroke::new(pen_width, color)));
            }
        }
    }

    response
}
