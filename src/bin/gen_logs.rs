//! Multi-host log generator for stress testing logmerge.
//!
//! Writes one file per host, named `<n>-<name>`, each in chronological order
//! with overlapping time ranges so merging has to interleave them. Records
//! carry stack traces, blank lines and non-ASCII payloads as continuations.
//!
//! Usage: cargo run --bin gen_logs --features gen-logs -- [records] [hosts] [dir] [name]
//! Example: cargo run --bin gen_logs --features gen-logs -- 100000 4 ./logs app.log
//!
//! Matching mode:
//! `"date_regex": "^(\\d{4}-\\d{2}-\\d{2} \\d{2}:\\d{2}:\\d{2}\\.\\d{3})"`,
//! `"date_format": "%Y-%m-%d %H:%M:%S%.3f"`

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const LEVELS: &[&str] = &["INFO", "INFO", "INFO", "DEBUG", "WARN", "ERROR"];

const COMPONENTS: &[&str] = &[
    "http::server",
    "db::pool",
    "auth",
    "scheduler",
    "cache",
    "worker[3]",
];

const PAYLOADS: &[&str] = &[
    "request completed",
    "connection acquired",
    "token refreshed",
    "job queued",
    "cache miss for key user:42",
    "Привет мир",
    "日本語のログ",
    "emoji 🔥 in payload",
    "value with ; semicolons ; inside",
    "line with\ttabs",
];

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let hosts: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(4)
        .max(1);
    let dir = args.get(3).map(|s| s.as_str()).unwrap_or("logs");
    let name = args.get(4).map(|s| s.as_str()).unwrap_or("app.log");

    println!("🧪 Log Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Records:  {}", count);
    println!("   Hosts:    {}", hosts);
    println!("   Output:   {}/<n>-{}", dir, name);
    println!();

    fs::create_dir_all(dir).expect("Failed to create output directory");

    let start = std::time::Instant::now();
    let mut bytes_written: usize = 0;
    let per_host = count / hosts;

    for host in 1..=hosts {
        let records = if host == hosts {
            count - per_host * (hosts - 1)
        } else {
            per_host
        };
        let path = Path::new(dir).join(format!("{}-{}", host, name));
        bytes_written += generate_host(&path, host, records);
        eprintln!("   Wrote {} ({} records)", path.display(), records);
    }

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} records/s",
        count as f64 / elapsed.as_secs_f64()
    );
}

fn generate_host(path: &Path, host: usize, count: usize) -> usize {
    let file = File::create(path).expect("Failed to create output file");
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

    let mut rng = rand::thread_rng();
    let mut ts: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start date");
    let mut bytes_written = 0;

    for i in 0..count {
        // Equal steps on every host produce identical timestamps across files.
        let step = if i % 50 == 0 { 1000 } else { rng.gen_range(0..2000) };
        ts += Duration::milliseconds(step);

        for line in generate_record(&mut rng, ts, host, i) {
            bytes_written += line.len() + 1;
            writeln!(writer, "{}", line).unwrap();
        }
    }

    writer.flush().unwrap();
    bytes_written
}

fn generate_record(rng: &mut impl Rng, ts: NaiveDateTime, host: usize, index: usize) -> Vec<String> {
    let level = LEVELS.choose(rng).unwrap();
    let component = COMPONENTS.choose(rng).unwrap();
    let payload = PAYLOADS.choose(rng).unwrap();

    let mut lines = vec![format!(
        "{} {:<5} [host{}] {}: {} #{}",
        ts.format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        host,
        component,
        payload,
        index
    )];

    match index % 10 {
        // Stack trace
        0 => {
            lines.push("Traceback (most recent call last):".to_string());
            for depth in 0..rng.gen_range(1..=8) {
                lines.push(format!("  at frame_{}(src/module_{}.rs:{})", depth, depth, rng.gen_range(1..500)));
            }
            lines.push(format!("Error: operation {} failed", index));
        }
        // Blank continuation
        3 => lines.push(String::new()),
        // Wrapped payload that mentions a date mid-line
        6 => lines.push(format!("    retry scheduled at {}", ts.format("%Y-%m-%d %H:%M:%S"))),
        // Multi-line JSON body
        8 => {
            lines.push("{".to_string());
            lines.push(format!("  \"host\": {},", host));
            lines.push(format!("  \"index\": {}", index));
            lines.push("}".to_string());
        }
        _ => {}
    }

    lines
}
