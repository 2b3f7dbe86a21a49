use super::*;
use crate::{
    compile::compile_seal,
    config::{BorderStyle, SealConfig, SealOptions},
};

fn render(opts: SealOptions) -> FrameRGBA {
    let cfg = SealConfig::resolve(&opts).unwrap();
    let plan = compile_seal(&cfg).unwrap();
    let fonts = FontSet::empty();
    CpuRenderer::new(&fonts).render_plan(&plan).unwrap()
}

fn ring_pixel(frame: &FrameRGBA, radius: f64, angle_deg: f64) -> [u8; 4] {
    let c = f64::from(frame.width) / 2.0;
    let t = angle_deg.to_radians();
    let x = (c + radius * t.cos()).floor() as u32;
    let y = (c + radius * t.sin()).floor() as u32;
    frame.pixel(x, y).unwrap()
}

#[test]
fn solid_ring_is_painted_and_background_stays_transparent() {
    let frame = render(SealOptions {
        show_inner_circle: Some(false),
        ..SealOptions::default()
    });
    assert_eq!((frame.width, frame.height), (400, 400));
    assert!(!frame.premultiplied);

    let px = frame.pixel(380, 200).unwrap();
    assert!(px[3] > 240, "ring pixel {px:?}");
    assert!(px[0] > 200 && px[1] < 40 && px[2] < 40, "ring pixel {px:?}");

    assert_eq!(frame.pixel(0, 0).unwrap(), [0, 0, 0, 0]);
    assert_eq!(frame.pixel(399, 399).unwrap(), [0, 0, 0, 0]);
    // No font: no star, nothing at the center.
    assert_eq!(frame.pixel(200, 200).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn inner_ring_adds_a_second_circle() {
    let with_inner = render(SealOptions::default());
    let without = render(SealOptions {
        show_inner_circle: Some(false),
        ..SealOptions::default()
    });
    assert!(with_inner.pixel(368, 200).unwrap()[3] > 200);
    assert_eq!(without.pixel(368, 200).unwrap()[3], 0);
}

#[test]
fn global_opacity_scales_alpha() {
    let frame = render(SealOptions {
        opacity: Some(0.5),
        show_inner_circle: Some(false),
        ..SealOptions::default()
    });
    let a = i32::from(frame.pixel(380, 200).unwrap()[3]);
    assert!((a - 128).abs() <= 10, "alpha {a}");
}

#[test]
fn dashed_ring_alternates_ink_and_gaps() {
    let frame = render(SealOptions {
        border_style: Some(BorderStyle::Dashed),
        show_inner_circle: Some(false),
        ..SealOptions::default()
    });
    for k in 0..36 {
        let base = 10.0 * f64::from(k);
        assert!(ring_pixel(&frame, 180.0, base + 2.5)[3] > 200, "dash {k}");
        assert_eq!(ring_pixel(&frame, 180.0, base + 7.5)[3], 0, "gap {k}");
    }
}

#[test]
fn rotation_turns_the_dash_pattern() {
    let frame = render(SealOptions {
        border_style: Some(BorderStyle::Dashed),
        show_inner_circle: Some(false),
        rotation: Some(5.0),
        ..SealOptions::default()
    });
    assert!(ring_pixel(&frame, 180.0, 7.5)[3] > 200);
    assert_eq!(ring_pixel(&frame, 180.0, 2.5)[3], 0);
}

#[test]
fn border_shadow_leaves_a_faint_halo_outside_the_stroke() {
    let frame = render(SealOptions {
        show_inner_circle: Some(false),
        ..SealOptions::default()
    });
    // Stroke covers r in [177, 183]; one pixel past it only the blurred shadow reaches.
    let halo = frame.pixel(384, 200).unwrap();
    assert!(halo[3] > 0 && halo[3] < 30, "halo {halo:?}");
    assert_eq!(frame.pixel(390, 200).unwrap()[3], 0);
}

#[test]
fn rendering_is_deterministic() {
    let opts = SealOptions {
        border_style: Some(BorderStyle::Dashed),
        rotation: Some(12.5),
        ..SealOptions::default()
    };
    assert_eq!(render(opts.clone()), render(opts));
}

fn fixture_fonts() -> FontSet {
    let load = |p: &str| FontFace::from_path(std::path::Path::new(p)).unwrap();
    FontSet::from_faces(
        Some(load("tests/data/fonts/DejaVuSans.ttf")),
        Some(load("tests/data/fonts/DejaVuSans-Bold.ttf")),
    )
}

fn render_with_fonts(opts: SealOptions) -> (SealPlan, FrameRGBA) {
    let cfg = SealConfig::resolve(&opts).unwrap();
    let plan = compile_seal(&cfg).unwrap();
    let fonts = fixture_fonts();
    let frame = CpuRenderer::new(&fonts).render_plan(&plan).unwrap();
    (plan, frame)
}

/// Alpha-weighted centroid of the ink within `radius` of `center`.
fn ink_centroid(frame: &FrameRGBA, center: kurbo::Point, radius: f64) -> Option<kurbo::Point> {
    let (mut sx, mut sy, mut sw) = (0.0, 0.0, 0.0);
    for y in 0..frame.height {
        for x in 0..frame.width {
            let p = kurbo::Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if p.distance(center) > radius {
                continue;
            }
            let a = f64::from(frame.pixel(x, y).unwrap()[3]);
            sx += p.x * a;
            sy += p.y * a;
            sw += a;
        }
    }
    (sw > 0.0).then(|| kurbo::Point::new(sx / sw, sy / sw))
}

#[test]
fn star_is_centered_on_the_canvas() {
    let (_, frame) = render_with_fonts(SealOptions {
        company: Some(String::new()),
        ..SealOptions::default()
    });
    let px = frame.pixel(200, 200).unwrap();
    assert!(px[3] > 240 && px[0] > 200 && px[1] < 40, "center {px:?}");

    let c = ink_centroid(&frame, kurbo::Point::new(200.0, 200.0), 40.0).unwrap();
    assert!(
        c.distance(kurbo::Point::new(200.0, 200.0)) < 3.0,
        "star centroid {c:?}"
    );
}

#[test]
fn company_glyphs_are_inked_on_their_slots() {
    let (plan, frame) = render_with_fonts(SealOptions {
        company: Some("HHHH".to_string()),
        ..SealOptions::default()
    });
    assert_eq!(plan.layout.company.len(), 4);
    for slot in &plan.layout.company {
        let at = plan.global * slot.position;
        let c = ink_centroid(&frame, at, 24.0)
            .unwrap_or_else(|| panic!("no ink near slot {at:?}"));
        assert!(c.distance(at) < 4.0, "slot {at:?} centroid {c:?}");
    }
}

#[test]
fn title_is_laid_out_left_to_right_around_its_anchor() {
    let (plan, frame) = render_with_fonts(SealOptions {
        company: Some(String::new()),
        title: Some("HHHHH".to_string()),
        ..SealOptions::default()
    });
    let anchor = plan.global * plan.layout.title;
    assert_eq!(anchor, kurbo::Point::new(200.0, 299.0));

    let c = ink_centroid(&frame, anchor, 60.0).unwrap();
    assert!(c.distance(anchor) < 4.0, "title centroid {c:?}");

    // Five 22px capitals span far more than a single glyph would.
    let inked: Vec<u32> = (140..260)
        .filter(|&x| (285..313).any(|y| frame.pixel(x, y).unwrap()[3] > 128))
        .collect();
    let span = inked.last().unwrap() - inked.first().unwrap();
    assert!(span > 60, "title ink span {span}px");
}

#[test]
fn semi_transparent_star_outline_blends_over_its_fill() {
    let (_, opaque) = render_with_fonts(SealOptions {
        company: Some(String::new()),
        ..SealOptions::default()
    });
    let (_, faded) = render_with_fonts(SealOptions {
        company: Some(String::new()),
        opacity: Some(0.5),
        ..SealOptions::default()
    });
    // Where outline and fill overlap, two half-alpha layers stack to ~75% coverage.
    let overlap = (0..400u32)
        .flat_map(|y| (0..400u32).map(move |x| (x, y)))
        .filter(|&(x, y)| {
            let p = opaque.pixel(x, y).unwrap();
            p[3] == 255 && p[0] > 140 && p[0] < 200 && p[1] == 0
        })
        .find(|&(x, y)| faded.pixel(x, y).unwrap()[3] > 160);
    assert!(overlap.is_some());
}
