use erythro_count::image::ImageRgbU8;
use erythro_count::{CellCounter, CountParams};

const BACKGROUND: u8 = 204;
const CELL: u8 = 102;

fn main() {
    env_logger::init();

    // Demo: synthetic smear with a 4x3 grid of dark discs of radius 15.
    let (w, h) = (320usize, 240usize);
    let centres: Vec<(f32, f32)> = (0..3)
        .flat_map(|row| (0..4).map(move |col| (50.0 + col as f32 * 75.0, 45.0 + row as f32 * 75.0)))
        .collect();
    let mut rgb = vec![BACKGROUND; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let inside = centres.iter().any(|&(cx, cy)| {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                dx * dx + dy * dy <= 15.0 * 15.0
            });
            if inside {
                let i = (y * w + x) * 3;
                rgb[i..i + 3].fill(CELL);
            }
        }
    }

    let counter = CellCounter::new(CountParams::default());
    match counter.process_seeded(ImageRgbU8::packed(w, h, &rgb), 42) {
        Ok(out) => println!(
            "count={} (expected {}) latency_ms={:.3}",
            out.count(),
            centres.len(),
            out.result.latency_ms
        ),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
