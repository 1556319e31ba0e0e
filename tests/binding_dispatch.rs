use gapdash::{
    ChartSpec, ControlEvent, ControlId, Continent, Dashboard, Dataset, DisplaySurface, Field,
    FilterCriteria, MemorySurface, Metric, PanelId, PanelState, SelectionError,
};
use std::sync::Arc;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/gapminder_sample.csv");

fn session() -> (Dashboard, MemorySurface) {
    let ds = Arc::new(Dataset::load_csv(FIXTURE).expect("fixture loads"));
    let mut surface = MemorySurface::new();
    let mut dash = Dashboard::new(ds);
    dash.start(&mut surface);
    (dash, surface)
}

/// Records every publish in order.
#[derive(Default)]
struct Recorder {
    log: Vec<(PanelId, String)>,
}

impl DisplaySurface for Recorder {
    fn publish(&mut self, panel: PanelId, spec: &ChartSpec) {
        self.log
            .push((panel, spec.title().unwrap_or(spec.kind()).to_string()));
    }
}

#[test]
fn start_publishes_defaults_for_every_panel() {
    let (dash, surface) = session();
    for id in PanelId::ALL {
        assert_eq!(surface.revision(id), 1, "{id}");
    }
    assert_eq!(
        surface.latest(PanelId::Population).unwrap().title(),
        Some("Top 15 Populations in Asia (1952)")
    );
    assert_eq!(
        surface.latest(PanelId::Map).unwrap().title(),
        Some("lifeExp Map (1952)")
    );
    assert_eq!(surface.latest(PanelId::Dataset), Some(dash.table()));
    assert!(dash.panels().all(|p| p.state() == PanelState::Idle));
}

#[test]
fn event_republishes_only_its_panel() {
    let (mut dash, mut surface) = session();
    let gdp_before = surface.latest(PanelId::Gdp).cloned();

    let panel = dash.dispatch_str("cont_pop=Europe", &mut surface).unwrap();
    assert_eq!(panel, PanelId::Population);
    assert_eq!(
        surface.latest(PanelId::Population).unwrap().title(),
        Some("Top 15 Populations in Europe (1952)")
    );
    assert_eq!(surface.revision(PanelId::Population), 2);
    assert_eq!(surface.revision(PanelId::Gdp), 1);
    assert_eq!(surface.latest(PanelId::Gdp).cloned(), gdp_before);
    assert_eq!(
        *dash.panel(PanelId::Gdp).unwrap().criteria(),
        FilterCriteria::Ranking {
            continent: Continent::Asia,
            year: 1952,
            metric: Metric::GdpPerCapita
        }
    );
}

#[test]
fn only_the_target_panel_receives_a_publish() {
    let ds = Arc::new(Dataset::load_csv(FIXTURE).unwrap());
    let mut dash = Dashboard::new(ds);
    let mut rec = Recorder::default();
    dash.start(&mut rec);
    rec.log.clear();

    dash.dispatch(
        &ControlEvent::from_control(ControlId::YearGdp, "2007"),
        &mut rec,
    )
    .unwrap();
    dash.dispatch_str("var_map=gdpPercap", &mut rec).unwrap();
    assert_eq!(
        rec.log,
        vec![
            (PanelId::Gdp, "Top 15 GDP per Capita in Asia (2007)".to_string()),
            (PanelId::Map, "gdpPercap Map (1952)".to_string()),
        ]
    );
}

#[test]
fn repeating_an_event_is_idempotent() {
    let (mut dash, mut surface) = session();
    dash.dispatch_str("year_life_exp=2007", &mut surface).unwrap();
    let first = surface.latest(PanelId::LifeExpectancy).cloned();
    dash.dispatch_str("year_life_exp=2007", &mut surface).unwrap();
    let second = surface.latest(PanelId::LifeExpectancy).cloned();
    assert_eq!(second, first);
    assert_eq!(
        second.unwrap().to_json_pretty().unwrap(),
        first.unwrap().to_json_pretty().unwrap()
    );
    assert_eq!(surface.revision(PanelId::LifeExpectancy), 3);
}

#[test]
fn rejected_events_leave_state_untouched() {
    let (mut dash, mut surface) = session();
    let before = *dash.panel(PanelId::Population).unwrap().criteria();

    let err = dash
        .dispatch_str("cont_pop=Antarctica", &mut surface)
        .unwrap_err();
    assert!(matches!(err, SelectionError::NotAnOption { control: "cont_pop", .. }));

    let err = dash.dispatch_str("year_pop=1953", &mut surface).unwrap_err();
    assert!(matches!(err, SelectionError::NotAnOption { .. }));

    let err = dash
        .dispatch(
            &ControlEvent::new(PanelId::Population, Field::Metric, "gdpPercap"),
            &mut surface,
        )
        .unwrap_err();
    assert_eq!(
        err,
        SelectionError::Unbound {
            panel: PanelId::Population,
            field: Field::Metric
        }
    );

    let err = dash
        .dispatch(
            &ControlEvent::new(PanelId::Dataset, Field::Year, "1952"),
            &mut surface,
        )
        .unwrap_err();
    assert!(matches!(err, SelectionError::Unbound { .. }));

    let pop = dash.panel(PanelId::Population).unwrap();
    assert_eq!(*pop.criteria(), before);
    assert_eq!(pop.state(), PanelState::Idle);
    assert_eq!(surface.revision(PanelId::Population), 1);
}

#[test]
fn malformed_and_unknown_event_strings() {
    let (mut dash, mut surface) = session();
    assert_eq!(
        dash.dispatch_str("cont_pop", &mut surface).unwrap_err(),
        SelectionError::Malformed("cont_pop".into())
    );
    assert_eq!(
        dash.dispatch_str("cont_area=Asia", &mut surface).unwrap_err(),
        SelectionError::UnknownControl("cont_area".into())
    );
}

#[test]
fn selector_values_match_case_insensitively() {
    let (mut dash, mut surface) = session();
    dash.dispatch_str("cont_gdp=europe", &mut surface).unwrap();
    assert_eq!(
        dash.panel(PanelId::Gdp).unwrap().criteria().continent(),
        Some(Continent::Europe)
    );
}

#[test]
fn sessions_share_the_dataset_but_not_state() {
    let ds = Arc::new(Dataset::load_csv(FIXTURE).unwrap());
    let mut a = Dashboard::new(Arc::clone(&ds));
    let mut b = Dashboard::new(Arc::clone(&ds));
    assert_eq!(Arc::strong_count(&ds), 3);

    let (mut sa, mut sb) = (MemorySurface::new(), MemorySurface::new());
    a.start(&mut sa);
    b.start(&mut sb);
    a.dispatch_str("year_map=2007", &mut sa).unwrap();

    assert_eq!(a.panel(PanelId::Map).unwrap().criteria().year(), 2007);
    assert_eq!(b.panel(PanelId::Map).unwrap().criteria().year(), 1952);
    assert_eq!(sb.latest(PanelId::Map).unwrap().title(), Some("lifeExp Map (1952)"));
}

#[test]
fn registry_binds_each_control_to_one_field() {
    let (dash, _) = session();
    for id in ControlId::ALL {
        let control = dash.control(id).unwrap();
        assert_eq!(ControlId::bound_to(id.panel(), id.field()), Some(id));
        assert!(!control.options.is_empty());
    }
    let map_ids: Vec<ControlId> = dash.controls_for(PanelId::Map).map(|c| c.id).collect();
    assert_eq!(map_ids, [ControlId::VarMap, ControlId::YearMap]);
    let years: Vec<&str> = dash
        .control(ControlId::YearPop)
        .unwrap()
        .options
        .iter()
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(years, ["1952", "2007"]);
    assert_eq!(dash.controls_for(PanelId::Dataset).count(), 0);
}
