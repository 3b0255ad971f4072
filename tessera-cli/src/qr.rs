//! Terminal QR codes for addresses.

use qrcode::types::QrError;
use qrcode::{Color, QrCode};

/// Light modules around the code.
const QUIET_ZONE: usize = 2;

const INDENT: &str = "      ";

/// Render `data` as rows of half-block characters, two modules per line.
pub fn render(data: &str) -> Result<String, QrError> {
    let code = QrCode::new(data)?;
    let colors = code.to_colors();
    let width = code.width();
    let size = width + QUIET_ZONE * 2;

    let dark = |x: usize, y: usize| -> bool {
        if x < QUIET_ZONE || y < QUIET_ZONE || x >= width + QUIET_ZONE || y >= width + QUIET_ZONE {
            return false;
        }
        colors[(y - QUIET_ZONE) * width + (x - QUIET_ZONE)] == Color::Dark
    };

    let mut out = String::new();
    for y in (0..size).step_by(2) {
        out.push_str(INDENT);
        for x in 0..size {
            out.push(match (dark(x, y), dark(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push('\n');
    }
    Ok(out)
}

/// Print the QR code for `data`, or a warning if it cannot be encoded.
pub fn print(data: &str) {
    match render(data) {
        Ok(code) => {
            println!();
            print!("{code}");
        }
        Err(e) => tracing::warn!(error = %e, "failed to generate QR code"),
    }
}
