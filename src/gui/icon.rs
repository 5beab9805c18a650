//! Window icon decoding

use std::io::Cursor;

use anyhow::{anyhow, Context, Result};
use eframe::egui;

const ICON_BYTES: &[u8] = include_bytes!("../../assets/icon.png");

/// Decode the bundled PNG into RGBA for the viewport icon
pub fn load_window_icon() -> Result<egui::IconData> {
    decode_rgba(ICON_BYTES)
}

fn decode_rgba(bytes: &[u8]) -> Result<egui::IconData> {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder.read_info().context("Failed to read icon PNG header")?;
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != png::BitDepth::Eight {
        return Err(anyhow!("Unsupported icon bit depth {:?} (expected 8)", bit_depth));
    }
    let (width, height) = reader.info().size();
    let mut buf = vec![0; width as usize * height as usize * color_type.samples()];
    let info = reader.next_frame(&mut buf).context("Failed to decode icon PNG")?;
    let pixels = &buf[..info.buffer_size()];

    let rgba = match info.color_type {
        png::ColorType::Rgba => pixels.to_vec(),
        png::ColorType::Rgb => {
            let mut rgba = Vec::with_capacity(pixels.len() / 3 * 4);
            for chunk in pixels.chunks_exact(3) {
                rgba.extend_from_slice(chunk);
                rgba.push(0xFF);
            }
            rgba
        }
        other => {
            return Err(anyhow!(
                "Unsupported icon color type {:?} (expected RGB or RGBA)",
                other
            ))
        }
    };

    Ok(egui::IconData {
        rgba,
        width: info.width,
        height: info.height,
    })
}
