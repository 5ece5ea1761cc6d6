//! Decimal round-half-up.
//!
//! Values are rounded on their shortest decimal representation rather than
//! on the binary float, so `2.25` rounds to `2.3` and `0.125` to `0.13`.

/// Rounds to `places` decimals, ties away from zero.
pub fn round_half_up(value: f64, places: u32) -> f64 {
    round_scaled(value, 0, places)
}

/// Divides by `10^shift` and rounds to `places` decimals, ties away from
/// zero. The division is a decimal point shift, so no binary error is
/// introduced before rounding. Non-finite values pass through unchanged.
pub fn round_scaled(value: f64, shift: u32, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let text = format!("{}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();

    // Position of the decimal point within `digits` after the shift.
    let shifted = int_part.len() as i64 - i64::from(shift);
    let mut point = if shifted < 1 {
        let pad = (1 - shifted) as usize;
        digits.splice(0..0, std::iter::repeat_n(0u8, pad));
        1
    } else {
        shifted as usize
    };

    let keep = point + places as usize;
    if digits.len() > keep {
        let round_up = digits[keep] >= 5;
        digits.truncate(keep);
        if round_up && increment(&mut digits) {
            digits.insert(0, 1);
            point += 1;
        }
    }

    let mut out = String::with_capacity(digits.len() + 1);
    for (index, digit) in digits.iter().enumerate() {
        if index == point {
            out.push('.');
        }
        out.push(char::from(b'0' + digit));
    }

    let magnitude: f64 = out.parse().unwrap_or(0.0);
    if magnitude == 0.0 {
        0.0
    } else if value.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// Adds one to the last digit. Returns true when the carry runs off the
/// front.
fn increment(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return false;
        }
    }
    true
}
