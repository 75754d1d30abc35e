use chrono::NaiveDate;
use hoverchart::viz::axis::tick_labels;
use hoverchart::{ChartConfig, ChartController, ChartError, Loader, PointerEvent};

const WEIGHT: &str = "tests/data/weight.json";

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, m, day).unwrap()
}

fn weight_chart(width: u32) -> ChartController {
    ChartController::load(
        &Loader::default(),
        WEIGHT,
        "weight",
        width,
        ChartConfig::default(),
    )
    .unwrap()
}

/// Plot-area x of a date on the 600px-wide weight chart.
fn x_of(chart: &ChartController, date: NaiveDate) -> f64 {
    chart.scales().x.map(date)
}

#[test]
fn layout_for_600px_container() {
    let chart = weight_chart(600);
    let layout = chart.layout();
    assert_eq!(layout.plot_width, 510.0);
    assert_eq!(layout.plot_height, 145.0);
    assert_eq!(chart.surface().size(), (600, 255));
    assert_eq!(chart.surface().id(), "weight");

    let x = chart.scales().x;
    assert_eq!(x.map(d(3, 1)), 0.0);
    assert_eq!(x.map(d(3, 20)), 510.0);

    let y = chart.scales().y;
    assert_eq!(y.domain(), (0.0, 18.4 + 1.0));
    assert_eq!(y.map(0.0), 145.0);
}

#[test]
fn wide_container_caps_plot_height() {
    let chart = weight_chart(1400);
    assert_eq!(chart.layout().plot_height, 300.0);
    assert_eq!(chart.surface().size(), (1400, 410));
}

#[test]
fn narrow_container_is_rejected() {
    let err = ChartController::load(
        &Loader::default(),
        WEIGHT,
        "weight",
        80,
        ChartConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ChartError::InvalidLayout { width: 80 }));
}

#[test]
fn axes_carry_labels_and_ticks() {
    let chart = weight_chart(600);
    let surface = chart.surface();
    let axes = chart.axes();

    let y_labels = tick_labels(surface, axes.y_axis);
    assert_eq!(y_labels.first().map(String::as_str), Some("0"));
    assert_eq!(y_labels.last().map(String::as_str), Some("18"));
    assert!(tick_labels(surface, axes.x_axis).len() >= 2);

    assert_eq!(surface.node(axes.title).text_content(), Some("Body weight"));
    assert_eq!(surface.node(axes.x_title).text_content(), Some("Date"));
    assert_eq!(surface.node(axes.y_title).text_content(), Some("Weight"));
}

#[test]
fn one_marker_per_sample() {
    let chart = weight_chart(600);
    assert_eq!(chart.surface().find_by_class("marker").len(), 4);
    assert_eq!(chart.surface().find_by_class("line").len(), 1);
}

#[test]
fn hover_shows_nearest_sample() {
    let mut chart = weight_chart(600);
    assert!(!chart.tooltip().is_visible());

    chart.handle(PointerEvent::Enter);
    assert!(chart.tooltip().is_visible());
    assert!(chart.surface().is_visible(chart.tooltip().marker_node()));

    let px = x_of(&chart, d(3, 5)) + 10.0;
    let anchored = chart.handle(PointerEvent::Move { x: px }).unwrap();
    assert_eq!(anchored.timestamp, d(3, 5));
    assert_eq!(chart.value_label_text(), "17 kg");
    assert_eq!(chart.date_label_text(), "05 Mar");

    let marker = chart.surface().node(chart.tooltip().marker_node());
    assert_eq!(
        marker.translate,
        chart.scales().project(anchored.timestamp, anchored.value)
    );

    // Outline and fill copies always agree.
    let surface = chart.surface();
    for [outline, fill] in [chart.tooltip().value_nodes(), chart.tooltip().date_nodes()] {
        assert_eq!(
            surface.node(outline).text_content(),
            surface.node(fill).text_content()
        );
        assert_eq!(surface.node(outline).translate, surface.node(fill).translate);
    }

    chart.handle(PointerEvent::Leave);
    assert!(!chart.tooltip().is_visible());
    assert!(!chart.surface().is_visible(chart.tooltip().marker_node()));
}

#[test]
fn later_neighbour_wins_only_when_closer() {
    let mut chart = weight_chart(600);
    chart.handle(PointerEvent::Enter);

    let (a, b) = (x_of(&chart, d(3, 10)), x_of(&chart, d(3, 20)));
    let s = chart.handle(PointerEvent::Move { x: a + (b - a) * 0.4 }).unwrap();
    assert_eq!(s.timestamp, d(3, 10));
    let s = chart.handle(PointerEvent::Move { x: a + (b - a) * 0.6 }).unwrap();
    assert_eq!(s.timestamp, d(3, 20));
}

#[test]
fn outside_the_domain_anchors_on_last_sample() {
    let mut chart = weight_chart(600);
    chart.handle(PointerEvent::Enter);

    let right = chart.handle(PointerEvent::Move { x: 2000.0 }).unwrap();
    assert_eq!(right.timestamp, d(3, 20));
    let left = chart.handle(PointerEvent::Move { x: -40.0 }).unwrap();
    assert_eq!(left.timestamp, d(3, 20));
    assert_eq!(chart.value_label_text(), "18 kg");
    assert_eq!(chart.date_label_text(), "20 Mar");
}

#[test]
fn move_without_enter_is_ignored() {
    let mut chart = weight_chart(600);
    assert!(chart.handle(PointerEvent::Move { x: 100.0 }).is_none());
    assert_eq!(chart.value_label_text(), "");
    assert!(chart.tooltip().state().anchored.is_none());
}

#[test]
fn leave_keeps_last_anchor_until_next_move() {
    let mut chart = weight_chart(600);
    chart.handle(PointerEvent::Enter);
    let px = x_of(&chart, d(3, 10));
    chart.handle(PointerEvent::Move { x: px });
    chart.handle(PointerEvent::Leave);

    assert_eq!(chart.date_label_text(), "10 Mar");
    chart.handle(PointerEvent::Enter);
    assert_eq!(chart.date_label_text(), "10 Mar");
}

#[test]
fn raw_pointer_positions_drive_enter_and_leave() {
    let mut chart = weight_chart(600);
    let left = chart.layout().margins.left;
    let top = chart.layout().margins.top;
    let px = x_of(&chart, d(3, 5));

    let s = chart.pointer_at(left + px, top + 20.0).unwrap();
    assert_eq!(s.timestamp, d(3, 5));
    assert!(chart.tooltip().is_visible());

    // Top-left margin is outside the overlay.
    assert!(chart.pointer_at(10.0, 10.0).is_none());
    assert!(!chart.tooltip().is_visible());

    chart.pointer_at(left + 1.0, top + 1.0);
    assert!(chart.tooltip().is_visible());
    chart.pointer_left();
    assert!(!chart.tooltip().is_visible());
}

#[test]
fn single_sample_chart() {
    let doc = hoverchart::loader::parse_document(
        "inline",
        r#"{"points":[{"datetime":"2021-03-05","y":4}],"unit":"%","xlabel":"x","ylabel":"y","title":"one"}"#,
    )
    .unwrap();
    let mut chart = ChartController::build("one", 600, doc, ChartConfig::default()).unwrap();
    chart.handle(PointerEvent::Enter);
    let s = chart.handle(PointerEvent::Move { x: 300.0 }).unwrap();
    assert_eq!(s.value, 4.0);
    assert_eq!(chart.value_label_text(), "4 %");
}
