mod common;

use common::synthetic_bmp::BmpBuilder;
use zenbmp::{
    BitmapImage, BmpError, Decoder, Limits, LinePoints, RGB8, decode_file, encode_file, probe,
};

const BLACK: RGB8 = RGB8::new(0, 0, 0);
const WHITE: RGB8 = RGB8::new(255, 255, 255);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn roundtrip_is_byte_identical() {
    init_logging();
    for bits in [24, 32] {
        for width in 1..=6 {
            for height in [1, 2, 5] {
                let data = BmpBuilder::new(width, height, bits).build_noise(width as u32 * 31);
                let image = BitmapImage::from_bytes(&data).unwrap();
                assert_eq!(
                    image.to_bytes().unwrap(),
                    data,
                    "{width}x{height} {bits}-bit"
                );
            }
        }
    }
}

#[test]
fn roundtrip_normalizes_nonzero_padding() {
    init_logging();
    let mut builder = BmpBuilder::new(3, 2, 24);
    builder.pad_byte = 0xAB;
    let dirty = builder.build_noise(7);
    builder.pad_byte = 0;
    let clean = builder.build_noise(7);
    assert_ne!(dirty, clean);

    let image = BitmapImage::from_bytes(&dirty).unwrap();
    assert_eq!(image.to_bytes().unwrap(), clean);
}

#[test]
fn roundtrip_keeps_gap_before_pixels() {
    let mut builder = BmpBuilder::new(2, 2, 32);
    builder.gap = 12;
    let data = builder.build_noise(3);
    let image = BitmapImage::from_bytes(&data).unwrap();
    assert_eq!(image.file_header().pixel_offset, 66);
    assert_eq!(image.to_bytes().unwrap(), data);
}

#[test]
fn preview_dimensions() {
    for (width, height) in [(1, 1), (4, 2), (7, 3), (13, 9)] {
        let data = BmpBuilder::new(width, height, 24).build_noise(1);
        let image = BitmapImage::from_bytes(&data).unwrap();
        let lines: Vec<String> = image.preview().collect();
        assert_eq!(lines.len(), height as usize);
        for line in &lines {
            assert_eq!(line.chars().count(), width as usize);
        }
    }
}

#[test]
fn preview_is_restartable_and_top_first() {
    // stored row 0 (visual bottom) white, stored row 1 (visual top) red
    let data = BmpBuilder::new(3, 2, 32).build_with(|_, y| {
        if y == 0 {
            vec![255, 255, 255, 0]
        } else {
            vec![0, 0, 200, 0]
        }
    });
    let image = BitmapImage::from_bytes(&data).unwrap();
    let first: Vec<String> = image.preview().collect();
    assert_eq!(first, ["XXX", "@@@"]);
    assert_eq!(image.preview().collect::<Vec<_>>(), first);
    assert_eq!(image.preview().to_string(), "XXX\n@@@\n");
}

#[test]
fn set_pixel_outside_leaves_buffer_unchanged() {
    let data = BmpBuilder::new(4, 3, 24).build_noise(5);
    let mut image = BitmapImage::from_bytes(&data).unwrap();
    let before = image.pixels().to_vec();
    for (x, y) in [(-1, -1), (4, 0), (0, 3), (100, 100), (-5, 1)] {
        image.set_pixel(x, y, WHITE);
    }
    assert_eq!(image.pixels(), &before[..]);
}

#[test]
fn lines_clip_at_the_edges() {
    let data = BmpBuilder::new(4, 4, 24).build_solid([0, 0, 0, 0]);
    let mut image = BitmapImage::from_bytes(&data).unwrap();
    image.draw_line(-3, -3, 6, 6, WHITE);
    for i in 0..4 {
        assert_eq!(image.get_pixel(i, i).unwrap(), WHITE);
    }
    let lit = image.preview().map(|l| l.matches('@').count()).sum::<usize>();
    assert_eq!(lit, 4);
}

#[test]
fn line_point_count_matches_chebyshev_distance() {
    for (a, b) in [((0, 0), (3, 1)), ((0, 1), (3, 0)), ((5, -2), (-4, 7)), ((2, 2), (2, 9))] {
        let pts: Vec<_> = LinePoints::new(a, b).collect();
        let expected = (b.0 - a.0).abs().max((b.1 - a.1).abs()) as usize + 1;
        assert_eq!(pts.len(), expected);
        assert_eq!(pts[0], a);
        assert_eq!(pts[pts.len() - 1], b);
    }
}

#[test]
fn rejects_ppm_signature() {
    let mut builder = BmpBuilder::new(2, 2, 24);
    builder.signature = *b"P6";
    let err = BitmapImage::from_bytes(&builder.build_solid([0; 4])).unwrap_err();
    assert!(matches!(err, BmpError::BadSignature { found: 0x3650 }));
}

#[test]
fn rejects_8_bit() {
    let data = BmpBuilder::new(2, 2, 8).build_solid([0; 4]);
    let err = BitmapImage::from_bytes(&data).unwrap_err();
    assert!(matches!(err, BmpError::UnsupportedBitDepth { bits: 8 }));
}

#[test]
fn rejects_top_down() {
    let data = BmpBuilder::new(4, -10, 24).build_solid([0; 4]);
    let err = BitmapImage::from_bytes(&data).unwrap_err();
    assert!(matches!(err, BmpError::UnsupportedOrientation { height: -10 }));
}

#[test]
fn rejects_other_header_fields() {
    let mut builder = BmpBuilder::new(2, 2, 24);
    builder.header_size = 124;
    assert!(matches!(
        BitmapImage::from_bytes(&builder.build_solid([0; 4])),
        Err(BmpError::UnsupportedHeaderVariant { size: 124 })
    ));

    let mut builder = BmpBuilder::new(2, 2, 24);
    builder.planes = 3;
    assert!(matches!(
        BitmapImage::from_bytes(&builder.build_solid([0; 4])),
        Err(BmpError::UnsupportedPlaneCount { planes: 3 })
    ));

    let mut builder = BmpBuilder::new(2, 2, 32);
    builder.compression = 3;
    assert!(matches!(
        BitmapImage::from_bytes(&builder.build_solid([0; 4])),
        Err(BmpError::UnsupportedCompression { method: 3 })
    ));
}

#[test]
fn rejects_truncated_rows() {
    let data = BmpBuilder::new(5, 5, 24).build_noise(9);
    let err = BitmapImage::from_bytes(&data[..data.len() - 20]).unwrap_err();
    assert!(matches!(err, BmpError::TruncatedData { .. }));
}

#[test]
fn probe_agrees_with_decode() {
    let data = BmpBuilder::new(7, 3, 24).build_noise(2);
    let info = probe(&data).unwrap();
    let image = BitmapImage::from_bytes(&data).unwrap();
    assert_eq!(&info, image.info());
    assert_eq!(info.row_padding, 3);
}

#[test]
fn limits_reject_large_images() {
    let data = BmpBuilder::new(10, 10, 32).build_noise(4);
    let err = Decoder::new()
        .with_limits(Limits::none().with_max_width(8))
        .decode_bytes(&data)
        .unwrap_err();
    assert!(matches!(err, BmpError::LimitExceeded(_)));

    assert!(
        Decoder::new()
            .with_limits(Limits::none().with_max_memory(400))
            .decode_bytes(&data)
            .is_ok()
    );
}

#[test]
fn end_to_end_4x2_diagonals() {
    init_logging();
    let data = BmpBuilder::new(4, 2, 24).build_solid([0, 0, 0, 0]);
    let mut image = BitmapImage::from_bytes(&data).unwrap();
    assert_eq!(image.preview().collect::<Vec<_>>(), ["    ", "    "]);

    // Paint white first so the black diagonals below have something to show on.
    for y in 0..2 {
        for x in 0..4 {
            image.set_pixel(x, y, WHITE);
        }
    }
    image.draw_line(0, 0, 3, 1, BLACK);
    image.draw_line(0, 1, 3, 0, BLACK);
    for (x, y) in [(0, 0), (3, 1), (0, 1), (3, 0)] {
        assert_eq!(image.get_pixel(x, y).unwrap(), BLACK);
    }

    let encoded = image.to_bytes().unwrap();
    let decoded = BitmapImage::from_bytes(&encoded).unwrap();
    assert_eq!(decoded.pixels(), image.pixels());
    assert_eq!(decoded.to_bytes().unwrap(), encoded);
}

#[test]
fn end_to_end_diagonals_show_in_preview() {
    let data = BmpBuilder::new(4, 2, 24).build_solid([0, 0, 0, 0]);
    let mut image = BitmapImage::from_bytes(&data).unwrap();
    let red = RGB8::new(255, 0, 0);
    image.draw_line(0, 0, 3, 1, red);
    image.draw_line(0, 1, 3, 0, red);

    let lines: Vec<String> = image.preview().collect();
    assert_eq!(lines.len(), 2);
    for (x1, y1, x2, y2) in [(0, 0, 3, 1), (0, 1, 3, 0)] {
        for (x, y) in LinePoints::new((x1, y1), (x2, y2)) {
            let glyph = lines[y as usize].chars().nth(x as usize).unwrap();
            assert_eq!(glyph, 'X', "({x}, {y})");
        }
    }

    let reread = BitmapImage::from_bytes(&image.to_bytes().unwrap()).unwrap();
    assert_eq!(reread.pixels(), image.pixels());
}

#[test]
fn file_roundtrip_through_disk() {
    init_logging();
    let dir = std::env::temp_dir().join(format!("zenbmp-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("in.bmp");
    let output = dir.join("out.bmp");

    let data = BmpBuilder::new(5, 3, 24).build_noise(11);
    std::fs::write(&input, &data).unwrap();

    let mut image = decode_file(&input).unwrap();
    image.draw_diagonals(BLACK);
    encode_file(&image, &output).unwrap();

    let reread = decode_file(&output).unwrap();
    assert_eq!(reread.pixels(), image.pixels());
    assert_eq!(reread.file_header(), image.file_header());
    assert_eq!(reread.info_header(), image.info_header());

    std::fs::remove_dir_all(&dir).unwrap();
}
