use rust_decimal::prelude::ToPrimitive;

use crate::error::{ForecastError, Result};
use crate::payment::Payment;

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Display color for a payment: the configured one, otherwise a shade that
/// saturates towards red (expenses) or green (income) as the amount grows.
pub fn payment_color(payment: &Payment) -> Result<String> {
    if let Some(color) = payment.color().filter(|c| !c.is_empty()) {
        return Ok(color.to_string());
    }

    let amount = payment.amount();
    if amount.is_zero() {
        return Err(ForecastError::DegenerateAmount {
            description: payment.description().to_string(),
        });
    }

    let magnitude = amount.abs().to_f64().unwrap_or(f64::MAX);
    let intensity = (200.0 - magnitude.log2().powi(2)).max(0.0) as u8;
    Ok(if amount.is_sign_negative() {
        rgb_to_hex(255, intensity, intensity)
    } else {
        rgb_to_hex(intensity, 255, intensity)
    })
}
