use crypto_bubbles_wasm::domain::bubble::{ChangeBucket, color_for_change};
use insta::assert_json_snapshot;
use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;

#[test]
fn palette_snapshot() {
    let palette: Vec<String> = ChangeBucket::iter().map(|bucket| bucket.hsl().css()).collect();
    assert_json_snapshot!(palette, @r###"
    [
      "hsl(142, 76%, 45%)",
      "hsl(142, 76%, 36%)",
      "hsl(142, 60%, 30%)",
      "hsl(45, 93%, 47%)",
      "hsl(0, 70%, 50%)",
      "hsl(0, 84%, 60%)",
      "hsl(0, 90%, 70%)"
    ]
    "###);
}

#[quickcheck]
fn hue_follows_sign(change: f64) -> bool {
    let hue = color_for_change(change).hue;
    if change.is_nan() || change == 0.0 {
        hue == 45
    } else if change > 0.0 {
        hue == 142
    } else {
        hue == 0
    }
}

#[quickcheck]
fn larger_gains_never_get_darker(a: u16, b: u16) -> bool {
    let (small, large) = if a <= b { (a, b) } else { (b, a) };
    let lightness = |pct: u16| color_for_change(f64::from(pct) / 10.0).lightness;
    small == 0 || lightness(small) <= lightness(large)
}

#[test]
fn every_bucket_has_a_distinct_color() {
    let mut colors: Vec<String> = ChangeBucket::iter().map(|b| b.hsl().css()).collect();
    colors.sort();
    colors.dedup();
    assert_eq!(colors.len(), 7);
}
