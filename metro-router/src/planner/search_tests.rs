//! Unit tests for the route search.

use chrono::{NaiveDate, NaiveDateTime};

use super::*;
use crate::domain::{CrowdLevel, OperatingHours, StationName};
use crate::network::Network;

fn at(hhmm: &str) -> NaiveDateTime {
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    date.and_time(crate::domain::parse_hhmm(hhmm).unwrap())
}

fn noon() -> NaiveDateTime {
    at("12:00")
}

fn names(route: &Route) -> Vec<&str> {
    route.stations().map(StationName::as_str).collect()
}

fn lines(route: &Route) -> Vec<Option<&str>> {
    route
        .path
        .iter()
        .map(|step| step.line.as_ref().map(|line| line.as_str()))
        .collect()
}

fn network_of(stations: &[&str], connections: &[(&str, &str, f64, f64, &str)]) -> Network {
    let mut network = Network::new();
    for station in stations {
        network.add_station(station);
    }
    for (a, b, time, cost, line) in connections {
        assert!(network.add_connection(a, b, *time, *cost, *line));
    }
    network
}

fn set_crowd(network: &mut Network, name: &str, level: i64) {
    assert!(network.set_crowd_level(name, CrowdLevel::new(level).unwrap()));
}

fn set_hours(network: &mut Network, name: &str, first: &str, last: &str) {
    assert!(network.set_schedule(name, OperatingHours::parse(first, last).unwrap()));
}

/// A - B - C along one line.
fn straight_line(bc_line: &str) -> Network {
    network_of(
        &["A", "B", "C"],
        &[("A", "B", 5.0, 2.0, "L1"), ("B", "C", 7.0, 3.0, bc_line)],
    )
}

#[test]
fn same_line_has_no_penalty() {
    let network = straight_line("L1");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let route = planner.find_path("A", "C", "time", noon()).unwrap().unwrap();

    assert_eq!(names(&route), vec!["A", "B", "C"]);
    assert_eq!(lines(&route), vec![None, Some("L1"), Some("L1")]);
    assert_eq!(route.time, 12.0);
    assert_eq!(route.cost, 5.0);
    assert_eq!(route.line_changes(), 0);
}

#[test]
fn line_change_adds_time_and_cost_penalty() {
    let network = straight_line("L2");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let route = planner.find_path("A", "C", "time", noon()).unwrap().unwrap();

    assert_eq!(names(&route), vec!["A", "B", "C"]);
    assert_eq!(route.time, 17.0);
    assert_eq!(route.cost, 15.0);
    assert_eq!(route.line_changes(), 1);
}

#[test]
fn penalty_applies_in_crowd_mode() {
    let network = straight_line("L2");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let route = planner
        .find_path("A", "C", "least_crowded", noon())
        .unwrap()
        .unwrap();

    assert_eq!(route.time, 17.0);
    assert_eq!(route.cost, 15.0);
}

#[test]
fn penalties_come_from_config() {
    let network = straight_line("L2");
    let config = SearchConfig::new(2.0, 1.5, 1000, 0);
    let planner = Planner::new(&network, &config);

    let route = planner.find_path("A", "C", "time", noon()).unwrap().unwrap();

    assert_eq!(route.time, 14.0);
    assert_eq!(route.cost, 6.5);
}

#[test]
fn route_to_self_is_single_station() {
    let mut network = straight_line("L1");
    set_crowd(&mut network, "B", 4);
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    for mode in ["time", "least_crowded", "cost"] {
        let route = planner.find_path("B", "b", mode, noon()).unwrap().unwrap();
        assert_eq!(names(&route), vec!["B"]);
        assert_eq!(lines(&route), vec![None]);
        assert_eq!(route.time, 0.0);
        assert_eq!(route.cost, 0.0);
        assert_eq!(route.crowd_score, 4.0);
    }
}

#[test]
fn route_to_self_ignores_own_schedule() {
    let mut network = straight_line("L1");
    set_hours(&mut network, "A", "06:00", "07:00");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let route = planner.find_path("A", "A", "time", noon()).unwrap();
    assert!(route.is_some());
}

#[test]
fn names_are_normalized() {
    let network = network_of(
        &["MG Road", "Trinity"],
        &[("mg road", "TRINITY", 2.0, 10.0, "Purple")],
    );
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let messy = planner.find_path(" mg road ", "MG ROAD", "time", noon()).unwrap();
    let clean = planner.find_path("Mg Road", "Mg Road", "time", noon()).unwrap();
    assert_eq!(messy, clean);

    let route = planner
        .find_path("  mg ROAD", "trinity ", "time", noon())
        .unwrap()
        .unwrap();
    assert_eq!(names(&route), vec!["Mg Road", "Trinity"]);
}

#[test]
fn unknown_start_is_error() {
    let network = straight_line("L1");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let err = planner.find_path("nowhere", "C", "time", noon()).unwrap_err();
    assert_eq!(
        err,
        SearchError::StationNotFound {
            names: vec![StationName::new("Nowhere")]
        }
    );
    assert_eq!(err.to_string(), "station not found: \"Nowhere\"");
}

#[test]
fn unknown_end_is_error() {
    let network = straight_line("L1");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let err = planner.find_path("A", "elsewhere", "least_crowded", noon()).unwrap_err();
    assert_eq!(
        err,
        SearchError::StationNotFound {
            names: vec![StationName::new("Elsewhere")]
        }
    );
}

#[test]
fn both_unknown_are_listed() {
    let network = straight_line("L1");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let err = planner.find_path("foo", "bar", "time", noon()).unwrap_err();
    assert_eq!(err.to_string(), "station not found: \"Foo\", \"Bar\"");

    // The same unknown name is reported once
    let err = planner.find_path("foo", " FOO ", "time", noon()).unwrap_err();
    assert_eq!(err.to_string(), "station not found: \"Foo\"");
}

#[test]
fn disconnected_is_none() {
    let network = network_of(&["Island", "Mainland"], &[]);
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    assert_eq!(planner.find_path("Island", "Mainland", "time", noon()), Ok(None));
    assert_eq!(
        planner.find_path("Island", "Mainland", "least_crowded", noon()),
        Ok(None)
    );
}

#[test]
fn closed_station_is_avoided() {
    // A - B - D is quicker, A - C - D is open
    let mut network = network_of(
        &["A", "B", "C", "D"],
        &[
            ("A", "B", 1.0, 1.0, "L1"),
            ("B", "D", 1.0, 1.0, "L1"),
            ("A", "C", 5.0, 1.0, "L1"),
            ("C", "D", 5.0, 1.0, "L1"),
        ],
    );
    set_hours(&mut network, "B", "13:00", "23:00");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let route = planner.find_path("A", "D", "time", noon()).unwrap().unwrap();
    assert_eq!(names(&route), vec!["A", "C", "D"]);

    // Once B opens the quicker route is back
    let route = planner.find_path("A", "D", "time", at("13:00")).unwrap().unwrap();
    assert_eq!(names(&route), vec!["A", "B", "D"]);
}

#[test]
fn closed_destination_is_unreachable() {
    let mut network = straight_line("L1");
    set_hours(&mut network, "C", "05:00", "11:59");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    assert_eq!(planner.find_path("A", "C", "time", noon()), Ok(None));
    assert!(planner.find_path("A", "C", "time", at("11:59")).unwrap().is_some());
}

#[test]
fn default_hours_close_late_at_night() {
    let network = straight_line("L1");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    assert!(planner.find_path("A", "C", "time", at("23:30")).unwrap().is_some());
    assert_eq!(planner.find_path("A", "C", "time", at("23:45")), Ok(None));
    assert_eq!(planner.find_path("A", "C", "time", at("04:30")), Ok(None));
}

#[test]
fn only_time_of_day_matters() {
    let network = straight_line("L1");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let other_day = NaiveDate::from_ymd_opt(2031, 12, 1)
        .unwrap()
        .and_time(noon().time());
    assert_eq!(
        planner.find_path("A", "C", "time", noon()),
        planner.find_path("A", "C", "time", other_day)
    );
}

/// Fast but crowded via B, slow but quiet via C.
fn two_routes() -> Network {
    let mut network = network_of(
        &["Start", "Busy", "Quiet", "End"],
        &[
            ("Start", "Busy", 2.0, 10.0, "Purple"),
            ("Busy", "End", 2.0, 10.0, "Purple"),
            ("Start", "Quiet", 10.0, 20.0, "Purple"),
            ("Quiet", "End", 10.0, 20.0, "Purple"),
        ],
    );
    set_crowd(&mut network, "Start", 2);
    set_crowd(&mut network, "Busy", 5);
    set_crowd(&mut network, "Quiet", 1);
    set_crowd(&mut network, "End", 3);
    network
}

#[test]
fn time_mode_takes_fastest() {
    let network = two_routes();
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let route = planner.find_path("Start", "End", "time", noon()).unwrap().unwrap();

    assert_eq!(names(&route), vec!["Start", "Busy", "End"]);
    assert_eq!(route.time, 4.0);
    assert_eq!(route.optimization, Optimize::Time);
    assert_eq!(route.crowd_score, (2.0 + 5.0 + 3.0) / 3.0);
}

#[test]
fn least_crowded_mode_takes_quietest() {
    let network = two_routes();
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let route = planner
        .find_path("Start", "End", "least_crowded", noon())
        .unwrap()
        .unwrap();

    assert_eq!(names(&route), vec!["Start", "Quiet", "End"]);
    assert_eq!(route.time, 20.0);
    assert_eq!(route.cost, 40.0);
    assert_eq!(route.optimization, Optimize::LeastCrowded);
    assert_eq!(route.crowd_score, (2.0 + 1.0 + 3.0) / 3.0);
}

#[test]
fn cost_mode_orders_by_crowd() {
    let network = two_routes();
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let route = planner.find_path("Start", "End", "cost", noon()).unwrap().unwrap();

    // Not the cheapest route: there is no cost ordering
    assert_eq!(names(&route), vec!["Start", "Quiet", "End"]);
    assert_eq!(route.cost, 40.0);
    assert_eq!(route.optimization.as_str(), "cost");
}

#[test]
fn station_is_finalized_once_whatever_the_line() {
    // A-B direct on L1 takes 5; A-X-B on L2 takes 2 and so reaches B first.
    // Continuing to C on L1 then costs a line change, and the L1 label at B
    // is never expanded.
    let network = network_of(
        &["A", "B", "C", "X"],
        &[
            ("A", "B", 5.0, 1.0, "L1"),
            ("A", "X", 1.0, 1.0, "L2"),
            ("X", "B", 1.0, 1.0, "L2"),
            ("B", "C", 1.0, 1.0, "L1"),
        ],
    );
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let route = planner.find_path("A", "C", "time", noon()).unwrap().unwrap();

    assert_eq!(names(&route), vec!["A", "X", "B", "C"]);
    assert_eq!(route.time, 8.0);
    assert_eq!(route.cost, 13.0);
}

#[test]
fn ties_break_on_station_name() {
    let network = network_of(
        &["Origin", "Charlie", "Bravo", "Dest"],
        &[
            ("Origin", "Charlie", 1.0, 1.0, "L1"),
            ("Origin", "Bravo", 1.0, 1.0, "L1"),
            ("Charlie", "Dest", 1.0, 1.0, "L1"),
            ("Bravo", "Dest", 1.0, 1.0, "L1"),
        ],
    );
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    let route = planner.find_path("Origin", "Dest", "time", noon()).unwrap().unwrap();
    assert_eq!(names(&route), vec!["Origin", "Bravo", "Dest"]);
}

#[test]
fn label_limit_fails_search() {
    let network = network_of(
        &["S1", "S2", "S3", "S4", "S5"],
        &[
            ("S1", "S2", 1.0, 1.0, "L1"),
            ("S2", "S3", 1.0, 1.0, "L1"),
            ("S3", "S4", 1.0, 1.0, "L1"),
            ("S4", "S5", 1.0, 1.0, "L1"),
        ],
    );
    let config = SearchConfig::new(5.0, 10.0, 3, 330);
    let planner = Planner::new(&network, &config);

    let err = planner.find_path("S1", "S5", "time", noon()).unwrap_err();
    assert_eq!(err, SearchError::ExplorationLimit { limit: 3 });
    assert_eq!(err.to_string(), "search exceeded 3 labels");

    // Short hops fit within the limit
    assert!(planner.find_path("S1", "S3", "time", noon()).unwrap().is_some());
}

#[test]
fn find_path_now_resolves_stations() {
    let network = straight_line("L1");
    let config = SearchConfig::default();
    let planner = Planner::new(&network, &config);

    assert!(planner.find_path_now("A", "A", "time").unwrap().is_some());
    assert!(matches!(
        planner.find_path_now("A", "Z", "time"),
        Err(SearchError::StationNotFound { .. })
    ));
}

#[test]
fn searches_share_a_network_across_threads() {
    let network = two_routes();
    let config = SearchConfig::default();

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["time", "least_crowded"]
            .into_iter()
            .map(|mode| {
                let (network, config) = (&network, &config);
                scope.spawn(move || {
                    Planner::new(network, config)
                        .find_path("Start", "End", mode, noon())
                        .unwrap()
                        .unwrap()
                })
            })
            .collect();

        let routes: Vec<Route> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(names(&routes[0]), vec!["Start", "Busy", "End"]);
        assert_eq!(names(&routes[1]), vec!["Start", "Quiet", "End"]);
    });
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A chain S0 - S1 - ... - Sn with the given (time, line, crowd) per hop.
    fn chain(hops: &[(u8, u8, u8)]) -> Network {
        let mut network = Network::new();
        network.add_station("S0");
        for (i, (time, line, crowd)) in hops.iter().enumerate() {
            let from = format!("S{i}");
            let to = format!("S{}", i + 1);
            network.add_station(&to);
            network.set_crowd_level(&to, CrowdLevel::new(i64::from(*crowd)).unwrap());
            network.add_connection(&from, &to, f64::from(*time), 1.0, format!("L{line}"));
        }
        network
    }

    fn hops() -> impl proptest::strategy::Strategy<Value = Vec<(u8, u8, u8)>> {
        proptest::collection::vec((0u8..30, 0u8..3, 1u8..=5), 1..12)
    }

    proptest! {
        /// On a single path, time is the edge sum plus 5 per line change
        #[test]
        fn time_is_edges_plus_penalties(hops in hops()) {
            let network = chain(&hops);
            let config = SearchConfig::default();
            let planner = Planner::new(&network, &config);
            let end = format!("S{}", hops.len());

            let route = planner.find_path("S0", &end, "time", noon()).unwrap().unwrap();

            let edges: f64 = hops.iter().map(|(t, _, _)| f64::from(*t)).sum();
            let changes = hops.windows(2).filter(|w| w[0].1 != w[1].1).count();
            prop_assert_eq!(route.len(), hops.len() + 1);
            prop_assert_eq!(route.line_changes(), changes);
            prop_assert_eq!(route.time, edges + 5.0 * changes as f64);
            prop_assert_eq!(route.cost, hops.len() as f64 + 10.0 * changes as f64);
        }

        /// Crowd score is the mean crowd level over every station on the path
        #[test]
        fn crowd_score_is_mean_of_path(hops in hops()) {
            let network = chain(&hops);
            let config = SearchConfig::default();
            let planner = Planner::new(&network, &config);
            let end = format!("S{}", hops.len());

            let route = planner.find_path("S0", &end, "least_crowded", noon()).unwrap().unwrap();

            let total: u32 = 3 + hops.iter().map(|(_, _, c)| u32::from(*c)).sum::<u32>();
            prop_assert_eq!(route.crowd_score, f64::from(total) / route.len() as f64);
        }

        /// A closed station never appears on a returned route
        #[test]
        fn closed_stations_never_on_route(closed in proptest::collection::vec(any::<bool>(), 6)) {
            // Ring of six stations, each closed at noon when flagged
            let names = ["R0", "R1", "R2", "R3", "R4", "R5"];
            let mut network = Network::new();
            for name in names {
                network.add_station(name);
            }
            for i in 0..names.len() {
                network.add_connection(names[i], names[(i + 1) % names.len()], 1.0, 1.0, "Ring");
            }
            for (name, shut) in names.iter().zip(&closed) {
                if *shut {
                    set_hours(&mut network, name, "18:00", "23:00");
                }
            }
            let config = SearchConfig::default();
            let planner = Planner::new(&network, &config);

            if let Some(route) = planner.find_path("R0", "R3", "time", noon()).unwrap() {
                for step in route.path.iter().skip(1) {
                    let index: usize = step.station.as_str()[1..].parse().unwrap();
                    prop_assert!(!closed[index]);
                }
            } else {
                // Both ways round must be blocked
                prop_assert!(closed[1] || closed[2] || closed[3]);
                prop_assert!(closed[5] || closed[4] || closed[3]);
            }
        }
    }
}
