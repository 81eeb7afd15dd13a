use super::*;

fn pad() -> SignaturePad {
    SignaturePad::new(40, 20, PenStyle::default())
}

fn inked_pixels(image: &RgbaImage) -> usize {
    image.pixels().filter(|pixel| pixel.0[3] > 0).count()
}

#[test]
fn blank_pad_still_encodes_a_png() {
    let uri = pad().to_data_uri().expect("encode blank pad");
    assert!(uri.as_str().starts_with("data:image/png;base64,"));
    assert_eq!(uri.mime(), "image/png");

    let png = uri.decode().expect("base64 payload");
    let decoded = image::load_from_memory(&png).expect("valid png").to_rgba8();
    assert_eq!(decoded.dimensions(), (40, 20));
    assert_eq!(inked_pixels(&decoded), 0);
}

#[test]
fn strokes_render_in_pen_color() {
    let mut pad = pad();
    pad.begin_stroke(Point::new(2.0, 10.0));
    pad.extend_stroke(Point::new(30.0, 10.0));
    pad.end_stroke();

    let image = pad.render();
    assert_eq!(image.get_pixel(15, 10).0, [0, 0, 0, 255]);
    assert_eq!(image.get_pixel(15, 2).0[3], 0);
}

#[test]
fn single_tap_leaves_a_dot() {
    let mut pad = pad();
    pad.begin_stroke(Point::new(10.0, 10.0));
    pad.end_stroke();

    let image = pad.render();
    assert!(inked_pixels(&image) > 0);
    assert_eq!(image.get_pixel(10, 10).0[3], 255);
}

#[test]
fn points_outside_the_surface_are_clipped() {
    let mut pad = pad();
    pad.begin_stroke(Point::new(-50.0, -50.0));
    pad.extend_stroke(Point::new(100.0, 100.0));
    pad.end_stroke();

    let image = pad.render();
    assert_eq!(image.dimensions(), (40, 20));
    assert!(inked_pixels(&image) > 0);
}

#[test]
fn extend_without_begin_is_ignored() {
    let mut pad = pad();
    pad.extend_stroke(Point::new(5.0, 5.0));
    assert!(pad.is_empty());

    pad.begin_stroke(Point::new(1.0, 1.0));
    pad.end_stroke();
    pad.extend_stroke(Point::new(9.0, 9.0));
    assert_eq!(pad.strokes(), &[vec![Point::new(1.0, 1.0)]]);
}

#[test]
fn clear_erases_every_stroke() {
    let mut pad = pad();
    pad.begin_stroke(Point::new(1.0, 1.0));
    pad.extend_stroke(Point::new(8.0, 8.0));
    pad.clear();

    assert!(pad.is_empty());
    assert!(!pad.is_drawing());
    assert_eq!(inked_pixels(&pad.render()), 0);
}

#[test]
fn zero_sized_pad_is_bumped_to_one_pixel() {
    let pad = SignaturePad::new(0, 0, PenStyle::default());
    assert_eq!(pad.size(), (1, 1));
    assert!(pad.to_data_uri().is_ok());
}
