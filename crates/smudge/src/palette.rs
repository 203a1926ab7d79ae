//! Light and dark color sampling for backgrounds, glyphs, and noise.
//!
//! Colors are built one hex digit per channel, like a 3-digit `#rgb` value,
//! then widened to 8 bits. The `spread` argument bounds how far a channel
//! may drift from its extreme: light colors sample digits in
//! `[16 - spread, 15]`, dark colors in `[1, spread]`. Valid spreads are
//! 1 through 15.

use image::Rgb;
use rand::Rng;

/// A random color near white.
pub fn random_light_color(rng: &mut impl Rng, spread: u8) -> Rgb<u8> {
    Rgb([
        widen(light_digit(rng, spread)),
        widen(light_digit(rng, spread)),
        widen(light_digit(rng, spread)),
    ])
}

/// A random color near black.
pub fn random_dark_color(rng: &mut impl Rng, spread: u8) -> Rgb<u8> {
    Rgb([
        widen(dark_digit(rng, spread)),
        widen(dark_digit(rng, spread)),
        widen(dark_digit(rng, spread)),
    ])
}

fn light_digit(rng: &mut impl Rng, spread: u8) -> u8 {
    16 - rng.random_range(1..=spread)
}

fn dark_digit(rng: &mut impl Rng, spread: u8) -> u8 {
    rng.random_range(1..=spread)
}

/// `#rgb` -> `#rrggbb` digit expansion.
fn widen(digit: u8) -> u8 {
    digit * 17
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn light_channels_stay_near_white() {
        let mut rng = StdRng::seed_from_u64(1);
        for spread in 1..=15u8 {
            let floor = (16 - spread) * 17;
            for _ in 0..50 {
                let Rgb(channels) = random_light_color(&mut rng, spread);
                for c in channels {
                    assert!(c >= floor, "channel {c} below {floor}");
                    assert_eq!(c % 17, 0);
                }
            }
        }
    }

    #[test]
    fn dark_channels_stay_near_black() {
        let mut rng = StdRng::seed_from_u64(2);
        for spread in 1..=15u8 {
            let ceil = spread * 17;
            for _ in 0..50 {
                let Rgb(channels) = random_dark_color(&mut rng, spread);
                for c in channels {
                    assert!(c >= 17 && c <= ceil, "channel {c} out of range");
                    assert_eq!(c % 17, 0);
                }
            }
        }
    }

    #[test]
    fn spread_one_pins_both_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(random_light_color(&mut rng, 1), Rgb([255, 255, 255]));
        assert_eq!(random_dark_color(&mut rng, 1), Rgb([17, 17, 17]));
    }
}
