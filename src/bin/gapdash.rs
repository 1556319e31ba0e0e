use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gapdash::config::AppConfig;
use gapdash::numfmt::format_value;
use gapdash::query::{rank, slice_by_year};
use gapdash::views::{build_choropleth, build_ranking_chart, build_table_view, ranking_title};
use gapdash::{
    ChartSpec, Continent, ControlEvent, ControlId, CsvDataset, Dashboard, Dataset,
    DatasetProvider, MemorySurface, Metric, PanelId, plotly, stats, storage, viz,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "gapdash",
    version,
    about = "Rank, map & export the Gapminder country table"
)]
struct Cli {
    /// Config file (TOML). Defaults to the user config dir or ./gapdash.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Gapminder CSV (overrides config and GAPDASH_DATASET).
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,
    /// Number locale for printed values (en, de, fr, ...).
    #[arg(long, global = true)]
    locale: Option<String>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Top 15 countries of a continent in a year by one metric.
    Rank(RankArgs),
    /// One year of a metric on the world map.
    Map(MapArgs),
    /// The whole dataset as a table.
    Table(ExportArgs),
    /// Per-continent statistics of a metric in a year.
    Stats(StatsArgs),
    /// List continents, years and controls.
    Options,
    /// Replay control events (`cont_pop=Europe`) through a dashboard session.
    Session(SessionArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Write the chart spec as JSON.
    #[arg(long)]
    spec: Option<PathBuf>,
    /// Write the chart as a Plotly figure JSON.
    #[arg(long)]
    figure: Option<PathBuf>,
    /// Write a standalone HTML page with the chart.
    #[arg(long)]
    html: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Metric column (pop, gdpPercap, lifeExp).
    #[arg(short, long, default_value = "pop")]
    metric: Metric,
    #[arg(short, long, default_value = "Asia")]
    continent: Continent,
    /// Defaults to the earliest year in the dataset.
    #[arg(short, long)]
    year: Option<i32>,
    /// Render the bar chart to an image (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Save the ranked rows (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Image width in pixels (overrides config).
    #[arg(long)]
    width: Option<u32>,
    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Args, Debug)]
struct MapArgs {
    #[arg(short, long, default_value = "lifeExp")]
    metric: Metric,
    #[arg(short, long)]
    year: Option<i32>,
    #[command(flatten)]
    export: ExportArgs,
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[arg(short, long, default_value = "lifeExp")]
    metric: Metric,
    #[arg(short, long)]
    year: Option<i32>,
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Control event as `control_id=value`; repeatable, applied in order.
    #[arg(short, long = "event")]
    events: Vec<String>,
    /// Write every panel's final chart to one HTML page.
    #[arg(long)]
    html: Option<PathBuf>,
    /// Write every panel's final chart spec as JSON into this directory.
    #[arg(long)]
    spec_dir: Option<PathBuf>,
}

struct Ctx {
    config: AppConfig,
    dataset: Arc<Dataset>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = AppConfig::resolve(cli.config.as_deref())?;
    if let Some(path) = cli.dataset {
        config.dataset = Some(path);
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    let dataset_path = config.dataset_path();
    let dataset = CsvDataset::new(&dataset_path)
        .load_dataset()
        .with_context(|| format!("cannot start without data ({})", dataset_path.display()))?;
    let ctx = Ctx {
        config,
        dataset: Arc::new(dataset),
    };

    match cli.cmd {
        Command::Rank(args) => cmd_rank(&ctx, args),
        Command::Map(args) => cmd_map(&ctx, args),
        Command::Table(args) => cmd_table(&ctx, args),
        Command::Stats(args) => cmd_stats(&ctx, args),
        Command::Options => cmd_options(&ctx),
        Command::Session(args) => cmd_session(&ctx, args),
    }
}

fn write_exports(spec: &ChartSpec, heading: &str, args: &ExportArgs) -> Result<()> {
    if let Some(path) = &args.spec {
        std::fs::write(path, spec.to_json_pretty()?)
            .with_context(|| format!("write {}", path.display()))?;
        eprintln!("Wrote chart spec to {}", path.display());
    }
    if let Some(path) = &args.figure {
        plotly::write_figure_json(spec, path)?;
        eprintln!("Wrote Plotly figure to {}", path.display());
    }
    if let Some(path) = &args.html {
        plotly::write_html(path, "Gapminder Dashboard", &[(heading, spec)])?;
        eprintln!("Wrote HTML to {}", path.display());
    }
    Ok(())
}

fn cmd_rank(ctx: &Ctx, args: RankArgs) -> Result<()> {
    let ds = &ctx.dataset;
    let year = args.year.unwrap_or_else(|| ds.earliest_year());
    let rows = rank(ds, args.continent, year, args.metric);
    let title = ranking_title(args.metric, args.continent, year);

    println!("{title}");
    if rows.is_empty() {
        println!("(no rows)");
    }
    for (i, r) in rows.iter().enumerate() {
        println!(
            "{:>2}. {:<28} {:>18}",
            i + 1,
            r.country,
            format_value(args.metric, args.metric.value(r), &ctx.config.locale)
        );
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&rows, path)?,
            "json" => storage::save_json(&rows, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }

    let spec = build_ranking_chart(&rows, args.metric, &title);
    if let Some(plot_path) = args.plot.as_ref() {
        let width = args.width.unwrap_or(ctx.config.render.width);
        let height = ctx.config.render.height.unwrap_or(spec.layout().height);
        if let ChartSpec::Bar(chart) = &spec {
            viz::plot_bars(chart, plot_path, width, height)?;
        }
        eprintln!("Wrote plot to {}", plot_path.display());
    }
    write_exports(&spec, &title, &args.export)
}

fn cmd_map(ctx: &Ctx, args: MapArgs) -> Result<()> {
    let ds = &ctx.dataset;
    let year = args.year.unwrap_or_else(|| ds.earliest_year());
    let rows = slice_by_year(ds, year);
    let spec = build_choropleth(&rows, args.metric, year);
    let heading = spec.title().unwrap_or("Map").to_string();

    println!("{heading}: {} countries with data", spec.mark_count());
    if let Some(s) = stats::summarize(&rows, args.metric) {
        let loc = &ctx.config.locale;
        println!(
            "range {} .. {}",
            format_value(args.metric, s.min, loc),
            format_value(args.metric, s.max, loc)
        );
    }
    write_exports(&spec, &heading, &args.export)
}

fn cmd_table(ctx: &Ctx, args: ExportArgs) -> Result<()> {
    let spec = build_table_view(&ctx.dataset);
    if let Some(table) = spec.as_table() {
        println!("{}", table.columns.join(","));
        println!("{} rows", table.rows.len());
    }
    write_exports(&spec, "Dataset", &args)
}

fn cmd_stats(ctx: &Ctx, args: StatsArgs) -> Result<()> {
    let year = args.year.unwrap_or_else(|| ctx.dataset.earliest_year());
    let loc = &ctx.config.locale;
    let m = args.metric;
    for s in stats::continent_summary(&ctx.dataset, year, m) {
        println!(
            "{} • {} {}  count={}  min={} max={} mean={} median={}",
            s.continent,
            m.column(),
            s.year,
            s.summary.count,
            format_value(m, s.summary.min, loc),
            format_value(m, s.summary.max, loc),
            format_value(m, s.summary.mean, loc),
            format_value(m, s.summary.median, loc),
        );
    }
    Ok(())
}

fn cmd_options(ctx: &Ctx) -> Result<()> {
    let ds = &ctx.dataset;
    let continents: Vec<String> = ds.continents().iter().map(|c| c.to_string()).collect();
    let years: Vec<String> = ds.years().iter().map(|y| y.to_string()).collect();
    println!("records:    {}", ds.len());
    println!("continents: {}", continents.join(", "));
    println!("years:      {}", years.join(", "));
    println!("metrics:    {}", Metric::ALL.map(|m| m.column()).join(", "));
    println!("controls:");
    for id in ControlId::ALL {
        println!("  {:<14} {} / {}", id.as_str(), id.panel(), id.field());
    }
    Ok(())
}

fn cmd_session(ctx: &Ctx, args: SessionArgs) -> Result<()> {
    let mut surface = MemorySurface::new();
    let mut dash = Dashboard::new(Arc::clone(&ctx.dataset));
    dash.start(&mut surface);

    for raw in &args.events {
        let event: ControlEvent = raw.parse()?;
        dash.dispatch(&event, &mut surface)
            .with_context(|| format!("event {raw:?}"))?;
    }

    for panel in dash.panels() {
        let title = panel
            .published()
            .and_then(|s| s.title())
            .unwrap_or_default();
        println!(
            "{:<16} {:<8} {}",
            panel.id().label(),
            surface.revision(panel.id()),
            title
        );
    }

    if let Some(path) = &args.html {
        let sections: Vec<(&str, &ChartSpec)> = PanelId::ALL
            .iter()
            .filter_map(|id| surface.latest(*id).map(|s| (id.label(), s)))
            .collect();
        plotly::write_html(path, "Gapminder Dashboard", &sections)?;
        eprintln!("Wrote dashboard to {}", path.display());
    }
    if let Some(dir) = &args.spec_dir {
        write_spec_dir(&surface, dir)?;
    }
    Ok(())
}

fn write_spec_dir(surface: &MemorySurface, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    for (id, spec) in surface.iter() {
        let path = dir.join(format!("{}.json", id.key()));
        std::fs::write(&path, spec.to_json_pretty()?)
            .with_context(|| format!("write {}", path.display()))?;
    }
    eprintln!("Wrote chart specs to {}", dir.display());
    Ok(())
}
