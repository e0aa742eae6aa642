//! End-to-end checks of the capture pipeline: scripted input in, decoded
//! PNG pixels out, through the same translator/pad/codec path the GUI uses.

use signpad::snapshot::decode_data_uri;
use signpad::{InputEvent, StrokeScript};

fn script(width: u32, height: u32, events: Vec<InputEvent>) -> StrokeScript {
    StrokeScript {
        width,
        height,
        ink: None,
        events,
    }
}

fn alpha(img: &image::RgbaImage, x: u32, y: u32) -> u8 {
    img.get_pixel(x, y)[3]
}

/// The canonical scenario: a 300×150 pad, one diagonal stroke from (10,10)
/// to (290,140), release. The captured value must decode to a 300×150 image
/// with visible ink at both endpoints and along the path.
#[test]
fn diagonal_stroke_decodes_to_expected_image() {
    let (_, output) = script(
        300,
        150,
        vec![
            InputEvent::MouseDown { x: 10.0, y: 10.0 },
            InputEvent::MouseMove { x: 290.0, y: 140.0 },
            InputEvent::MouseUp,
        ],
    )
    .replay();

    assert!(output.starts_with("data:image/png;base64,"));
    let img = decode_data_uri(&output).expect("captured value decodes");
    assert_eq!(img.dimensions(), (300, 150));

    assert!(alpha(&img, 10, 10) > 0, "ink at the stroke start");
    assert!(alpha(&img, 290, 140) > 0, "ink at the stroke end");
    assert!(alpha(&img, 150, 75) > 0, "ink along the path");
    assert_eq!(alpha(&img, 290, 10), 0, "far corner stays blank");
}

/// Touch-driven and mouse-driven strokes over the same coordinates produce
/// byte-identical captured images.
#[test]
fn touch_and_mouse_input_render_identically() {
    let points = [(20.0, 120.0), (80.0, 40.0), (150.0, 90.0), (260.0, 30.0)];

    let mut mouse_events = vec![InputEvent::MouseDown {
        x: points[0].0,
        y: points[0].1,
    }];
    let mut touch_events = vec![InputEvent::TouchStart {
        id: 11,
        x: points[0].0,
        y: points[0].1,
    }];
    for &(x, y) in &points[1..] {
        mouse_events.push(InputEvent::MouseMove { x, y });
        touch_events.push(InputEvent::TouchMove { id: 11, x, y });
    }
    mouse_events.push(InputEvent::MouseUp);
    touch_events.push(InputEvent::TouchEnd { id: 11 });

    let (_, mouse_out) = script(300, 150, mouse_events).replay();
    let (_, touch_out) = script(300, 150, touch_events).replay();

    let mouse_img = decode_data_uri(&mouse_out).expect("mouse capture decodes");
    let touch_img = decode_data_uri(&touch_out).expect("touch capture decodes");
    assert_eq!(mouse_img.as_raw(), touch_img.as_raw());
}

/// A second finger joining mid-stroke changes nothing: the capture equals
/// the one produced with the first finger alone.
#[test]
fn second_finger_does_not_disturb_the_stroke() {
    let solo = vec![
        InputEvent::TouchStart { id: 1, x: 30.0, y: 60.0 },
        InputEvent::TouchMove { id: 1, x: 120.0, y: 60.0 },
        InputEvent::TouchMove { id: 1, x: 240.0, y: 100.0 },
        InputEvent::TouchEnd { id: 1 },
    ];
    let with_intruder = vec![
        InputEvent::TouchStart { id: 1, x: 30.0, y: 60.0 },
        InputEvent::TouchMove { id: 1, x: 120.0, y: 60.0 },
        InputEvent::TouchStart { id: 2, x: 10.0, y: 10.0 },
        InputEvent::TouchMove { id: 2, x: 280.0, y: 20.0 },
        InputEvent::TouchMove { id: 1, x: 240.0, y: 100.0 },
        InputEvent::TouchEnd { id: 2 },
        InputEvent::TouchEnd { id: 1 },
    ];

    let (_, solo_out) = script(300, 150, solo).replay();
    let (_, intruded_out) = script(300, 150, with_intruder).replay();

    let solo_img = decode_data_uri(&solo_out).expect("solo capture decodes");
    let intruded_img = decode_data_uri(&intruded_out).expect("intruded capture decodes");
    assert_eq!(solo_img.as_raw(), intruded_img.as_raw());
}

/// Growing the surface mid-session keeps earlier ink at its coordinates;
/// the next capture shows both strokes on the enlarged canvas.
#[test]
fn resize_preserves_earlier_strokes_in_later_captures() {
    let (_, output) = script(
        120,
        80,
        vec![
            InputEvent::MouseDown { x: 10.0, y: 10.0 },
            InputEvent::MouseMove { x: 100.0, y: 10.0 },
            InputEvent::MouseUp,
            InputEvent::Resize {
                width: 240,
                height: 160,
            },
            InputEvent::MouseDown { x: 10.0, y: 140.0 },
            InputEvent::MouseMove { x: 220.0, y: 140.0 },
            InputEvent::MouseUp,
        ],
    )
    .replay();

    let img = decode_data_uri(&output).expect("capture decodes");
    assert_eq!(img.dimensions(), (240, 160));
    assert!(alpha(&img, 50, 10) > 0, "pre-resize stroke survives");
    assert!(alpha(&img, 120, 140) > 0, "post-resize stroke lands");
    assert_eq!(alpha(&img, 200, 40), 0, "expanded region stays blank");
}

/// Shrinking clips: ink outside the new bounds is gone from the capture,
/// and the capture itself has the reduced dimensions.
#[test]
fn shrink_clips_ink_from_later_captures() {
    let (_, output) = script(
        200,
        100,
        vec![
            InputEvent::MouseDown { x: 10.0, y: 50.0 },
            InputEvent::MouseMove { x: 190.0, y: 50.0 },
            InputEvent::MouseUp,
            InputEvent::Resize {
                width: 100,
                height: 100,
            },
            InputEvent::MouseLeave,
        ],
    )
    .replay();

    let img = decode_data_uri(&output).expect("capture decodes");
    assert_eq!(img.dimensions(), (100, 100));
    assert!(alpha(&img, 50, 50) > 0, "ink inside the new bounds survives");
}

/// Resizes alone never produce a captured value.
#[test]
fn resize_only_session_captures_nothing() {
    let (pad, output) = script(
        150,
        100,
        vec![
            InputEvent::Resize {
                width: 300,
                height: 200,
            },
            InputEvent::Resize {
                width: 80,
                height: 40,
            },
        ],
    )
    .replay();

    assert!(output.is_empty());
    assert_eq!((pad.surface().width(), pad.surface().height()), (80, 40));
}

/// Hand-written JSON in the documented wire format parses and replays.
#[test]
fn documented_json_format_replays() {
    let json = r#"{
        "width": 300,
        "height": 150,
        "ink": { "color": [0, 0, 160, 255], "width": 3.0 },
        "events": [
            { "type": "mouse_down", "x": 10.0, "y": 10.0 },
            { "type": "mouse_move", "x": 290.0, "y": 140.0 },
            { "type": "mouse_leave" }
        ]
    }"#;

    let script = StrokeScript::from_json(json).expect("documented format parses");
    let (_, output) = script.replay();

    let img = decode_data_uri(&output).expect("capture decodes");
    assert_eq!(img.dimensions(), (300, 150));
    // Leave ends the stroke exactly like a release, so ink is captured.
    assert_eq!(img.get_pixel(150, 75).0, [0, 0, 160, 255]);
}
