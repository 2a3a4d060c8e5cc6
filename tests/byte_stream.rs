//! Read semantics of the signed byte stream over real render output.

use funcplot::plot::VectorImage;
use funcplot::{GraphRenderer, PlotError, ReadOutcome, SignedByteInput, SvgByteStream, SvgGraphRenderer};
use std::io::Read;

fn rendered() -> SvgByteStream {
    SvgGraphRenderer::default().render("x", 10).unwrap()
}

#[test]
fn test_exhaustion_is_sticky_across_operations() {
    let mut stream = SvgByteStream::new(VectorImage::new(b"ab".to_vec()));
    let mut buf = [0i8; 8];
    assert_eq!(stream.read_into(&mut buf), ReadOutcome::Data(2));
    assert_eq!(stream.read_byte(), ReadOutcome::EndOfStream);
    for _ in 0..3 {
        assert_eq!(stream.read_byte(), ReadOutcome::EndOfStream);
        assert_eq!(stream.read_into(&mut buf), ReadOutcome::EndOfStream);
        assert_eq!(
            stream.read_into_range(&mut buf, 2, 4).unwrap(),
            ReadOutcome::EndOfStream
        );
    }
    assert!(stream.is_exhausted());
}

#[test]
fn test_oversized_buffer_returns_remaining_count() {
    let mut stream = rendered();
    let total = stream.len();
    let mut first = [0i8; 10];
    assert_eq!(stream.read_into(&mut first), ReadOutcome::Data(10));

    let mut rest = vec![0i8; total * 2];
    assert_eq!(stream.read_into(&mut rest), ReadOutcome::Data(total - 10));
    assert!(!stream.is_exhausted());
    assert_eq!(stream.read_into(&mut rest), ReadOutcome::EndOfStream);
}

#[test]
fn test_mixed_operations_share_one_cursor() {
    let image = VectorImage::new((0u8..=255).collect());
    let mut stream = SvgByteStream::new(image);

    assert_eq!(stream.read_byte(), ReadOutcome::Data(0));
    let mut buf = [0i8; 8];
    assert_eq!(stream.read_into_range(&mut buf, 4, 4).unwrap(), ReadOutcome::Data(4));
    assert_eq!(buf, [0, 0, 0, 0, 1, 2, 3, 4]);

    let mut rest = vec![0i8; 300];
    assert_eq!(stream.read_into(&mut rest), ReadOutcome::Data(251));
    assert_eq!(rest[122], 127);
    assert_eq!(rest[123], -128);
    assert_eq!(rest[250], -1);
}

#[test]
fn test_short_range_read_at_tail() {
    let mut stream = SvgByteStream::new(VectorImage::new(vec![200, 201, 202]));
    let mut buf = [0i8; 10];
    assert_eq!(stream.read_into_range(&mut buf, 5, 5).unwrap(), ReadOutcome::Data(3));
    assert_eq!(&buf[5..8], &[-56, -55, -54]);
    assert_eq!(&buf[8..], &[0, 0]);
}

#[test]
fn test_bad_range_leaves_stream_untouched() {
    let mut stream = rendered();
    let total = stream.remaining();
    let mut buf = [0i8; 4];
    assert!(matches!(
        stream.read_into_range(&mut buf, 2, 3),
        Err(PlotError::InvalidArgument(_))
    ));
    assert!(matches!(
        stream.read_into_range(&mut buf, 5, 0),
        Err(PlotError::InvalidArgument(_))
    ));
    assert_eq!(stream.remaining(), total);
    assert!(!stream.is_exhausted());
}

#[test]
fn test_io_read_and_signed_reads_agree() {
    let mut unsigned = Vec::new();
    rendered().read_to_end(&mut unsigned).unwrap();

    let mut stream = rendered();
    let mut signed = Vec::new();
    let mut chunk = [0i8; 333];
    while let ReadOutcome::Data(n) = stream.read_into(&mut chunk) {
        signed.extend_from_slice(&chunk[..n]);
    }

    assert_eq!(unsigned.len(), signed.len());
    assert!(unsigned.iter().zip(&signed).all(|(&u, &s)| u as i8 == s));
    assert_eq!(stream.mime_type(), "image/svg+xml");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn signed_reads_reconstruct_bytes(bytes in prop::collection::vec(any::<u8>(), 0..2048)) {
            let mut stream = SvgByteStream::new(VectorImage::new(bytes.clone()));
            let mut signed = Vec::new();
            while let ReadOutcome::Data(b) = stream.read_byte() {
                signed.push(b);
            }
            prop_assert_eq!(signed.len(), bytes.len());
            for (&s, &b) in signed.iter().zip(&bytes) {
                let expected = if b > 127 { i16::from(b) - 256 } else { i16::from(b) };
                prop_assert_eq!(i16::from(s), expected);
            }
            prop_assert!(stream.is_exhausted());
            prop_assert_eq!(stream.read_byte(), ReadOutcome::EndOfStream);
        }

        #[test]
        fn chunked_reads_count_remaining(
            bytes in prop::collection::vec(any::<u8>(), 1..2048),
            chunk in 1usize..512,
        ) {
            let total = bytes.len();
            let mut stream = SvgByteStream::new(VectorImage::new(bytes));
            let mut buf = vec![0i8; chunk];
            let mut read = 0;
            while let ReadOutcome::Data(n) = stream.read_into(&mut buf) {
                prop_assert_eq!(n, chunk.min(total - read));
                read += n;
            }
            prop_assert_eq!(read, total);
        }
    }
}
