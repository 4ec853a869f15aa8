use erythro_count::config::count::{load_config, RuntimeConfig};
use erythro_count::diagnostics::{CountOutput, CountReport};
use erythro_count::image::io::{load_rgb_image, save_trace_image, write_json_file};
use erythro_count::CellCounter;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: count_demo <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config: RuntimeConfig = load_config(Path::new(&config_path))
        .map_err(|e| format!("Failed to load config {config_path}: {e}"))?;

    let rgb = load_rgb_image(&config.input_path)
        .map_err(|e| format!("Failed to load {}: {e}", config.input_path.display()))?;

    let counter = CellCounter::new(config.params.clone());
    let output = counter
        .process_seeded(rgb.as_view(), config.seed)
        .map_err(|e| e.to_string())?;
    let report = output.report(Some(config.seed));

    print_text_summary(&report);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report).map_err(|e| e.to_string())?;
        println!("\nJSON report written to {}", path.display());
    }
    if let Some(dir) = &config.output.trace_dir {
        save_trace(dir, &output)?;
        println!("Trace images written to {}", dir.display());
    }

    Ok(())
}

fn print_text_summary(report: &CountReport) {
    let res = &report.result;
    println!("Count summary");
    println!("  image: {}x{}", report.input.width, report.input.height);
    println!("  erythrocytes: {}", res.count);
    println!("  components labeled: {}", res.components_total);
    println!("  latency_ms: {:.3}", res.latency_ms);
    for cell in &res.cells {
        println!(
            "  #{:<4} area={:<6} centroid=({:.1}, {:.1}) mean_mask={:.3}",
            cell.id.get(),
            cell.area,
            cell.centroid.x,
            cell.centroid.y,
            cell.mean_mask
        );
    }

    println!("\nTrace");
    for entry in &report.trace {
        println!(
            "  {:02} {:<45} {}ch mean={:.4}",
            entry.index, entry.label, entry.channels, entry.mean_intensity
        );
    }

    let stages = report
        .timings
        .stages
        .iter()
        .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
        .collect::<Vec<_>>()
        .join(" ");
    println!("\nTimings (ms): {stages} total={:.3}", report.timings.total_ms);
}

fn save_trace(dir: &Path, output: &CountOutput) -> Result<(), String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create trace dir {}: {e}", dir.display()))?;
    for (i, entry) in output.trace.iter().enumerate() {
        let name = format!("{:02}_{}.png", i, file_stem(&entry.label));
        save_trace_image(&entry.image, &dir.join(name)).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn file_stem(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
