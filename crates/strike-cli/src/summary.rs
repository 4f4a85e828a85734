use console::Style;
use strike_core::pipeline::config::DetectionConfig;
use strike_core::pipeline::DetectionReport;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    strike: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            strike: Style::new().yellow().bold(),
        }
    }
}

pub fn print_config_summary(config: &DetectionConfig, source_kind: &str) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Strike Detection"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(16)));
    println!();

    println!(
        "  {:<14}{} {}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display()),
        s.label.apply_to(format!("({source_kind})"))
    );
    match config.cache_path() {
        Some(path) => println!(
            "  {:<14}{}",
            s.label.apply_to("Cache"),
            s.path.apply_to(path.display())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Cache"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Classification"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Strategy"),
        s.method.apply_to(config.strategy)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Window"),
        s.value.apply_to(format!("{} frames", config.moving_window))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Cutoff"),
        s.value.apply_to(config.binary_threshold)
    );
    if config.auto_thresholds {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Thresholds"),
            s.method.apply_to("automatic")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Thresholds"),
            s.value.apply_to(config.thresholds)
        );
    }
    println!();
}

pub fn print_detection_report(report: &DetectionReport) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(report.frame_count),
        if report.from_cache {
            format!(" {}", s.disabled.apply_to("(cached analysis)"))
        } else {
            String::new()
        }
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Thresholds"),
        s.value.apply_to(report.thresholds)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Strikes"),
        s.strike.apply_to(report.detected.len())
    );

    if !report.detected.is_empty() {
        let indices: Vec<String> = report.detected.iter().map(|i| i.to_string()).collect();
        println!("    {:<12}{}", s.label.apply_to("Indices"), indices.join(", "));
    }
    println!();
}
