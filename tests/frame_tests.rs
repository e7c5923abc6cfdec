//! End-to-end rendering tests.
//!
//! All frames use the built-in bitmap face so results do not depend on the
//! fonts installed on the machine running the tests. Its advance is half the
//! font size per character and its line height equals the font size.

use pretty_assertions::assert_eq;
use slotframe::{
    SlotframeError,
    config::{Config, Padding},
    fonts::FontSet,
    layout::{Align, Measure, SizeMode},
    markup::{self, Style, StyledRun},
    render::{
        self, Background, Color, GradientDirection, GradientSpec, Stroke, StrokeRequest,
        TextFrame, encode,
    },
};

fn generate(frame: &TextFrame) -> Result<render::Frame, SlotframeError> {
    render::generate(frame, &Config::default(), &FontSet::builtin())
}

#[test]
fn test_single_word_is_auto_sized_and_centered() {
    let frame = generate(&TextFrame::new("Hello")).unwrap();
    let plan = &frame.plan;

    // 5 glyphs at floor(size / 2) px must fit 240 px
    assert_eq!(plan.font_size, 97);
    assert_eq!(plan.lines.len(), 1);
    assert_eq!(plan.lines[0].width, 240);
    assert_eq!(plan.lines[0].x, 0);
    assert_eq!(plan.top, (215 - 97) / 2);
    assert!(plan.degraded.is_none());
    assert_eq!(frame.image.dimensions(), (240, 240));
}

#[test]
fn test_markup_runs_reach_layout() {
    let parsed = markup::parse_auto("<b>Hi</b> there", false);
    assert_eq!(
        parsed.runs,
        vec![StyledRun::new("Hi", Style::BOLD), StyledRun::plain(" there")]
    );
    assert_eq!(parsed.plain, "Hi there");

    let frame = generate(&TextFrame::new("<b>Hi</b> there").with_size(SizeMode::Fixed(20))).unwrap();
    let words = &frame.plan.lines[0].words;
    assert_eq!(words.len(), 2);
    assert_eq!(words[0].pieces[0].style, Style::BOLD);
    assert_eq!(words[1].text(), "there");
}

#[test]
fn test_red_text_gets_white_outline() {
    let red = Color::rgb(255, 0, 0);
    let request = TextFrame::new("Alert")
        .with_colors(red, Background::Solid(Color::BLACK))
        .with_stroke(StrokeRequest {
            enabled: true,
            ..Default::default()
        });
    let frame = generate(&request).unwrap();

    assert_eq!(
        frame.stroke,
        Some(Stroke {
            width: 1,
            color: Color::WHITE
        })
    );
    assert_eq!(frame.plan.line_spacing, 12);
    let pixels: Vec<Color> = frame.image.pixels().map(|px| Color::from(*px)).collect();
    assert!(pixels.contains(&red));
    assert!(pixels.contains(&Color::WHITE));
}

#[test]
fn test_justified_lines_fill_the_box() {
    let text = "This is a longer text that will be justified across the full width";
    let frame = generate(&TextFrame::new(text).with_align(Align::Justify)).unwrap();
    let plan = &frame.plan;
    let bx = plan.layout_box;

    assert!(plan.lines.len() >= 2);
    let (last, rest) = plan.lines.split_last().unwrap();
    for line in rest {
        if line.words.len() < 2 {
            continue;
        }
        assert_eq!(line.width, bx.width);
        assert_eq!(line.words[0].x, bx.left as i32);
        assert_eq!(line.words.last().unwrap().right(), bx.right() as i32);
    }
    // Last line keeps natural spacing
    assert!(last.justified_gap.is_none());
    assert_eq!(last.x, bx.left as i32);

    let words: Vec<String> = plan
        .lines
        .iter()
        .flat_map(|line| line.words.iter().map(|w| w.text()))
        .collect();
    assert_eq!(words.join(" "), text);
}

#[test]
fn test_right_aligned_italic_stays_inside_box() {
    let padding = Padding {
        top: 0,
        bottom: 25,
        left: 40,
        right: 40,
    };
    let frame = generate(
        &TextFrame::new("<i>Hello</i>")
            .with_align(Align::Right)
            .with_padding(padding),
    )
    .unwrap();
    let right = frame.plan.layout_box.right();

    // 5 cells of floor(size / 2) plus the ceil(size * 0.2) shear must fit 160 px
    assert_eq!(frame.plan.font_size, 59);
    assert_eq!(frame.plan.lines[0].words[0].right(), right as i32);

    let outside = frame
        .image
        .enumerate_pixels()
        .filter(|(x, _, px)| *x >= right && px.0 != [0, 0, 0])
        .count();
    assert_eq!(outside, 0);
}

#[test]
fn test_rendering_is_deterministic() {
    let request = TextFrame::new("<i>same</i> <u>input</u>")
        .with_align(Align::Right)
        .with_stroke(StrokeRequest {
            width: 2,
            ..Default::default()
        });
    let first = generate(&request).unwrap();
    let second = generate(&request).unwrap();
    assert!(first.image == second.image);
    assert_eq!(first.plan, second.plan);
}

#[test]
fn test_gradient_background_corners() {
    let gradient = GradientSpec {
        start: Color::rgb(0, 50, 100),
        end: Color::rgb(0, 0, 128),
        direction: GradientDirection::Vertical,
    };
    let request = TextFrame::new(".")
        .with_colors(Color::WHITE, Background::Gradient(gradient))
        .with_padding(Padding::uniform(100));
    let frame = generate(&request).unwrap();

    assert_eq!(Color::from(*frame.image.get_pixel(0, 0)), gradient.start);
    assert_eq!(Color::from(*frame.image.get_pixel(239, 239)), gradient.end);
}

#[test]
fn test_overflow_degrades_instead_of_failing() {
    let long = "W".repeat(80);
    let frame = generate(&TextFrame::new(long.as_str())).unwrap();
    let degraded = frame.plan.degraded.expect("overflow should be reported");
    assert_eq!(degraded.font_size, 10);
    assert!(degraded.widest_line > degraded.box_width);
}

#[test]
fn test_fixed_size_errors() {
    let too_big = generate(&TextFrame::new("Hello").with_size(SizeMode::Fixed(150)));
    match too_big {
        Err(SlotframeError::TextTooLarge {
            size,
            largest_fitting,
        }) => {
            assert_eq!(size, 150);
            assert_eq!(largest_fitting, Some(97));
        }
        other => panic!("expected TextTooLarge, got {:?}", other.map(|f| f.plan)),
    }

    assert!(matches!(
        generate(&TextFrame::new("x").with_size(SizeMode::Fixed(500))),
        Err(SlotframeError::InvalidFontSize(500))
    ));
}

#[test]
fn test_builtin_measure_matches_plan() {
    let fonts = FontSet::builtin();
    let frame = generate(&TextFrame::new("abc").with_size(SizeMode::Fixed(40))).unwrap();
    let spec = slotframe::fonts::FontSpec::new(Style::PLAIN, 40);
    assert_eq!(frame.plan.lines[0].width, fonts.text_width("abc", spec));
    assert_eq!(frame.plan.line_height, fonts.line_height(40));
}

#[test]
fn test_frame_encodes_to_device_jpeg() {
    let frame = generate(&TextFrame::new("jpeg")).unwrap();
    let jpeg = encode::to_jpeg(&frame.image, 70).unwrap();
    let decoded = image::load_from_memory(&jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (240, 240));
}
