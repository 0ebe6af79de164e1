//! End-to-end runs against a loopback HTTP server standing in for the data portal.

use plant_harm::{
    top_plants, yearly_trend, Fetcher, Pipeline, PipelineConfig, PlantHarm, YearHarm,
};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

const PORTAL_BODY: &str = r#"{
  "_type": "datasets/gov/lzukt/Ivertis",
  "_data": [
    {"_id": "1", "augalo_pavadinimas": "Wheat", "zalingumo_ivertis": "10", "stebejimo_data": "01/02/2023", "savivaldybe": "Kėdainių r. sav."},
    {"_id": "2", "augalo_pavadinimas": "Wheat", "zalingumo_ivertis": "5", "stebejimo_data": "03/02/2023", "savivaldybe": "Kėdainių r. sav."},
    {"_id": "3", "augalo_pavadinimas": "Corn", "zalingumo_ivertis": "abc", "stebejimo_data": "01/01/2023"},
    {"_id": "4", "augalo_pavadinimas": "Rapeseed", "zalingumo_ivertis": 2.5, "stebejimo_data": "12/06/2022", "pazeidimo_lygis": "vidutinis"},
    {"_id": "5", "augalo_pavadinimas": "Rapeseed", "zalingumo_ivertis": "4", "stebejimo_data": "birželio mėn."},
    {"_id": "6", "augalo_pavadinimas": null, "zalingumo_ivertis": "8", "stebejimo_data": "12/06/2022"}
  ]
}"#;

fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 {
            if line == "\r\n" {
                break;
            }
            line.clear();
        }
        let mut stream = stream;
        write!(
            stream,
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
        .unwrap();
    });
    format!("http://{}/datasets/gov/lzukt/Ivertis", addr)
}

#[test]
fn test_full_run_against_portal_stub() {
    let url = serve_once("HTTP/1.1 200 OK", PORTAL_BODY);
    let config = PipelineConfig::builder()
        .source_url(url)
        .timeout(Duration::from_secs(5))
        .skip_charts(true)
        .build();

    let report = Pipeline::new(config).unwrap().run().unwrap();

    assert_eq!(
        report.raw_columns,
        [
            "_id",
            "augalo_pavadinimas",
            "zalingumo_ivertis",
            "stebejimo_data",
            "savivaldybe",
            "pazeidimo_lygis"
        ]
    );
    assert_eq!(report.cleaned.height(), 3);

    let top = PlantHarm::from_view(&report.top_plants).unwrap();
    assert_eq!(
        top,
        vec![
            PlantHarm { plant_name: "Wheat".into(), total_harm: 15.0 },
            PlantHarm { plant_name: "Rapeseed".into(), total_harm: 2.5 },
        ]
    );

    let trend = YearHarm::from_view(&report.yearly_trend).unwrap();
    assert_eq!(
        trend,
        vec![
            YearHarm { year: 2022, total_harm: 2.5 },
            YearHarm { year: 2023, total_harm: 15.0 },
        ]
    );
}

#[test]
fn test_failed_fetch_runs_on_empty_table() {
    let url = serve_once("HTTP/1.1 503 Service Unavailable", "{}");
    let config = PipelineConfig::builder()
        .source_url(url)
        .timeout(Duration::from_secs(5))
        .skip_charts(true)
        .build();

    let report = Pipeline::new(config).unwrap().run().unwrap();
    assert!(report.raw_columns.is_empty());
    assert_eq!(report.cleaned.height(), 0);
    assert_eq!(report.top_plants.height(), 0);
    assert_eq!(report.yearly_trend.height(), 0);
}

#[test]
fn test_fetched_table_feeds_aggregates_directly() {
    let url = serve_once("HTTP/1.1 200 OK", PORTAL_BODY);
    let fetcher = Fetcher::builder()
        .source_url(url)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let raw = fetcher.try_fetch().unwrap();
    assert_eq!(raw.height(), 6);

    let cleaned = plant_harm::clean(raw, &plant_harm::CleanOptions::default()).unwrap();
    assert_eq!(top_plants(&cleaned, 1).unwrap().height(), 1);
    assert_eq!(yearly_trend(&cleaned).unwrap().height(), 2);
}
