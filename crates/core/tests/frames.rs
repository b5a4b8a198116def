use tuya_leds_core::{
    frame::{groups_count, LEDS_PER_GROUP, SINGLE_COLOR_FRAME_LEN},
    Error, Frame, HexColor, Hsv, LedCount, LedSource, LedTopology, RGB8,
};

fn encode(colors: &[RGB8], led_count: LedCount) -> Result<Frame, Error> {
    let colors: Vec<Hsv> = colors.iter().copied().map(Hsv::from).collect();
    Frame::build(&colors, led_count)
}

fn topology(custom_led_count: u32) -> LedTopology {
    LedTopology::resolve(LedSource::from_override(custom_led_count, None).unwrap())
}

#[test]
fn test_single_red_led() {
    let topology = topology(1);
    let frame = encode(&[RGB8::new(255, 0, 0)], topology.led_count()).unwrap();

    assert_eq!(Hsv::from(RGB8::new(255, 0, 0)).saturation_percent(), 100);
    assert_eq!(frame.as_str(), "0000646400000100");
}

#[test]
fn test_eight_black_leds() {
    let topology = topology(8);
    let colors = vec![RGB8::default(); topology.positions().len()];
    let frame = encode(&colors, topology.led_count()).unwrap();

    let frame = frame.as_str();
    assert!(frame.starts_with("0004"));
    assert_eq!(&frame[4..100], "0".repeat(96));
    assert_eq!(&frame[100..104], "0008");
    assert_eq!(&frame[104..], "0101010102020202");
}

#[test]
fn test_single_color_frame_has_fixed_length() {
    for color in ["000000", "ffffff", "ff8000", "0a0b0c", "123456"] {
        let HexColor(color) = color.parse().unwrap();
        for led_count in [1, 4, 300] {
            let frame = encode(&[color], LedCount::new(led_count).unwrap()).unwrap();
            assert_eq!(frame.len(), SINGLE_COLOR_FRAME_LEN, "{frame}");
            assert!(frame.as_str().ends_with("00000100"));
        }
    }
}

#[test]
fn test_group_map_of_legacy_strip() {
    let led_count = LedCount::new(16).unwrap();
    let colors = vec![RGB8::new(0, 0, 255); 16];
    let frame = encode(&colors, led_count).unwrap();

    assert_eq!(groups_count(led_count), 16 / LEDS_PER_GROUP);
    assert!(frame
        .as_str()
        .ends_with(concat!("0010", "01010101020202020303030304040404")));
    assert!(frame.as_str().starts_with("000400f003e803e8"));
}

#[test]
fn test_frame_grows_with_led_count() {
    for led_count in [2_u32, 5, 64, 500] {
        let colors = vec![RGB8::new(10, 20, 30); led_count as usize];
        let frame = encode(&colors, LedCount::new(led_count).unwrap()).unwrap();
        assert_eq!(frame.len(), 4 + 12 * led_count as usize + 4 + 2 * led_count as usize);
    }
}

#[test]
fn test_largest_strip_shares_last_group() {
    let led_count = LedCount::new(2000).unwrap();
    let colors = vec![RGB8::default(); 2000];
    let frame = encode(&colors, led_count).unwrap();

    let map_start = 4 + 12 * 2000 + 4;
    let frame = frame.as_str();
    assert!(frame[4..map_start - 4].bytes().all(|b| b == b'0'));
    assert_eq!(&frame[map_start - 4..map_start], "07d0");

    let group_map = &frame[map_start..];
    assert_eq!(group_map.len(), 2 * 2000);
    assert!(group_map.starts_with("0101010102020202"));
    // LEDs 1017..=2000 all land in group 0xff.
    assert_eq!(&group_map[2 * 1016..], "ff".repeat(984));
    assert_eq!(&group_map[2 * 1012..2 * 1016], "fefefefe");
}

#[test]
fn test_color_count_must_match_strip() {
    let colors = vec![RGB8::new(1, 2, 3); 3];
    assert_eq!(
        encode(&colors, LedCount::new(8).unwrap()),
        Err(Error::StripLengthMismatch {
            expected: 8,
            actual: 3
        })
    );
}
