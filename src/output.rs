// src/output.rs

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use log::warn;

use crate::gemini::GenerateResponse;

/// Replaces path separators so a column name is safe as a filename stem.
pub fn sanitize_column_name(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

/// Writes every inline image in the response to `output_dir`, one file per
/// (candidate, part) position: `{base_name}_c{candidate}_p{part}.jpg`.
/// Returns the number of files written. Decode and write failures are
/// logged and skipped, never propagated.
pub fn save_images(response: &GenerateResponse, output_dir: &Path, base_name: &str) -> usize {
    let mut saved = 0;
    for (c_idx, candidate) in response.candidates.iter().enumerate() {
        let Some(content) = &candidate.content else {
            continue;
        };
        for (p_idx, part) in content.parts.iter().enumerate() {
            let Some(inline) = &part.inline_data else {
                continue;
            };
            let bytes = match BASE64.decode(inline.data.as_bytes()) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("skipping candidate {c_idx} part {p_idx}: bad image data: {e}");
                    continue;
                }
            };
            let filename = format!("{base_name}_c{c_idx}_p{p_idx}.jpg");
            match fs::write(output_dir.join(&filename), bytes) {
                Ok(()) => {
                    println!("  Saved: {filename}");
                    saved += 1;
                }
                Err(e) => warn!("failed to write {filename}: {e}"),
            }
        }
    }
    saved
}
