use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premul_scales_color_channels_only() {
    assert_eq!(premul_rgba8([255, 255, 255, 128]), [128, 128, 128, 128]);
    assert_eq!(premul_rgba8([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(premul_rgba8([10, 20, 30, 0]), [0, 0, 0, 0]);
}

#[test]
fn unit_to_u8_handles_nan() {
    assert_eq!(unit_to_u8(f32::NAN), 0);
    assert_eq!(unit_to_u8(0.5), 128);
}
