use clap::Parser;
use nomads_data::{DeathCause, LiveEvent, PopulationStats};
use std::collections::BTreeMap;
use std::fmt::Write as _;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "stats.csv")]
    stats: String,

    #[arg(short, long, default_value = "logs/live.jsonl")]
    live_log: String,

    /// Also write the report to this markdown file
    #[arg(short, long)]
    output: Option<String>,
}

fn trait_line(label: &str, s: &PopulationStats) -> String {
    format!(
        "- **{label}** (tick {}): sense {:.2}, stamina {:.2}, allegiance {:.2}, tribal loyalty {:.2}\n",
        s.time, s.mean_sense, s.mean_stamina, s.mean_allegiance, s.mean_tribal_loyalty
    )
}

fn summarize_stats(rows: &[PopulationStats]) -> String {
    let mut report = String::from("## Population\n");
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        report.push_str("- No rows recorded\n");
        return report;
    };
    let peak = rows
        .iter()
        .max_by_key(|s| s.population)
        .unwrap_or(first);

    let _ = writeln!(report, "- **Rows**: {}", rows.len());
    let _ = writeln!(
        report,
        "- **Peak Population**: {} at tick {}",
        peak.population, peak.time
    );
    let _ = writeln!(
        report,
        "- **Final Female Ratio**: {:.2}",
        last.female_ratio()
    );
    let _ = writeln!(
        report,
        "- **Final Vegetation Cover**: {:.1}%",
        last.vegetation_fraction() * 100.0
    );
    report.push_str("\n## Traits\n");
    report.push_str(&trait_line("Start", first));
    report.push_str(&trait_line("End", last));
    report
}

fn summarize_events(events: &[LiveEvent]) -> String {
    let mut births = 0;
    let mut max_gen = 0;
    let mut total_age = 0;
    let mut causes: BTreeMap<String, usize> = BTreeMap::new();
    let mut extinct_at = None;

    for event in events {
        match event {
            LiveEvent::Birth { generation, .. } => {
                births += 1;
                max_gen = max_gen.max(*generation);
            }
            LiveEvent::Death { age, cause, .. } => {
                total_age += age;
                *causes.entry(cause.to_string()).or_default() += 1;
            }
            LiveEvent::Extinction { tick, .. } => extinct_at = Some(*tick),
        }
    }
    let deaths: usize = causes.values().sum();
    let avg_lifespan = if deaths > 0 {
        total_age as f64 / deaths as f64
    } else {
        0.0
    };

    let mut report = String::from("\n## Events\n");
    let _ = writeln!(report, "- **Total Births**: {births}");
    let _ = writeln!(report, "- **Total Deaths**: {deaths}");
    let _ = writeln!(report, "- **Average Lifespan**: {avg_lifespan:.2} ticks");
    let _ = writeln!(report, "- **Max Generation**: {max_gen}");
    for cause in [
        DeathCause::Thirst,
        DeathCause::Hunger,
        DeathCause::OldAge,
        DeathCause::Overcrowding,
    ] {
        let name = cause.to_string();
        let count = causes.get(&name).copied().unwrap_or(0);
        let _ = writeln!(report, "  - {name}: {count}");
    }
    if let Some(tick) = extinct_at {
        let _ = writeln!(report, "- **Extinct At**: tick {tick}");
    }
    report
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("Analyzing Nomads run...");

    let rows = nomads_io::read_stats(&args.stats)?;
    let events = nomads_io::read_events(&args.live_log)?;

    let mut report = String::from("# Nomads Run Report\n\n");
    report.push_str(&summarize_stats(&rows));
    if !events.is_empty() {
        report.push_str(&summarize_events(&events));
    }

    println!("{report}");
    if let Some(path) = &args.output {
        std::fs::write(path, &report)?;
        println!("Report generated: {path}");
    }

    Ok(())
}
