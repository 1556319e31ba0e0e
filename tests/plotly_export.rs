use gapdash::plotly::{dashboard_html, figure, write_figure_json};
use gapdash::query::{rank, slice_by_year};
use gapdash::views::{build_choropleth, build_ranking_chart, build_table_view, ranking_title};
use gapdash::{Continent, Dataset, Metric, Record};
use tempfile::tempdir;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/gapminder_sample.csv");

fn dataset() -> Dataset {
    Dataset::load_csv(FIXTURE).unwrap()
}

#[test]
fn bar_figure_has_one_trace_per_country() {
    let ds = dataset();
    let rows = rank(&ds, Continent::Asia, 1952, Metric::Population);
    let spec = build_ranking_chart(
        &rows,
        Metric::Population,
        &ranking_title(Metric::Population, Continent::Asia, 1952),
    );
    let fig = figure(&spec);
    let data = fig["data"].as_array().unwrap();
    assert_eq!(data.len(), 15);
    assert_eq!(data[0]["type"], "bar");
    assert_eq!(data[0]["name"], "China");
    assert_eq!(data[0]["marker"]["color"], "#66C2A5");
    assert_eq!(data[0]["text"][0], "556,263,527");
    assert_eq!(fig["layout"]["height"], 500);
    assert_eq!(fig["layout"]["margin"]["t"], 50);
    assert_eq!(fig["layout"]["title"]["text"], "Top 15 Populations in Asia (1952)");
    assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "country");
}

#[test]
fn choropleth_figure_uses_iso3_and_range() {
    let ds = dataset();
    let rows = slice_by_year(&ds, 1952);
    let spec = build_choropleth(&rows, Metric::GdpPerCapita, 1952);
    let fig = figure(&spec);
    let trace = &fig["data"][0];
    assert_eq!(trace["type"], "choropleth");
    assert_eq!(trace["locationmode"], "ISO-3");
    assert_eq!(trace["locations"].as_array().unwrap().len(), 35);
    assert_eq!(trace["zmin"], 331.0);
    assert_eq!(trace["colorscale"].as_array().unwrap().len(), 11);
    assert!(trace["text"][0].as_str().unwrap().contains("<br>GDP per Capita: "));
    assert_eq!(fig["layout"]["paper_bgcolor"], "#F8F9FA");
}

#[test]
fn table_figure_is_column_major() {
    let ds = dataset();
    let fig = figure(&build_table_view(&ds));
    let cells = fig["data"][0]["cells"]["values"].as_array().unwrap();
    assert_eq!(cells.len(), Record::COLUMNS.len());
    assert!(cells.iter().all(|col| col.as_array().unwrap().len() == 70));
    assert_eq!(fig["data"][0]["header"]["values"][3], "lifeExp");
    assert_eq!(fig["data"][0]["cells"]["align"], "left");
}

#[test]
fn html_escapes_headings_and_script_breakouts() {
    let evil = Record {
        country: "</script><b>".into(),
        continent: Continent::Asia,
        year: 1952,
        life_exp: 1.0,
        pop: 1.0,
        gdp_percap: 1.0,
        iso_alpha: "XXX".into(),
        iso_num: None,
    };
    let spec = build_ranking_chart(&[&evil], Metric::Population, "t");
    let html = dashboard_html("A & B", &[("x<y", &spec)]).unwrap();
    assert!(html.contains("<title>A &amp; B</title>"));
    assert!(html.contains("<h2>x&lt;y</h2>"));
    // the CDN tag and the inline block
    assert_eq!(html.matches("</script>").count(), 2);
    assert!(html.contains("Plotly.newPlot(\"chart-0\""));
}

#[test]
fn figure_json_written_to_disk() {
    let ds = dataset();
    let dir = tempdir().unwrap();
    let path = dir.path().join("table.json");
    write_figure_json(&build_table_view(&ds), &path).unwrap();
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v["data"][0]["type"], "table");
}
