use camino::Utf8PathBuf;
use danby::benchmark::bench_run::{run_benchmark, BenchConfig};
use danby::benchmark::result_file::{read_results, write_csv, write_results, ResultRecord};
use danby::kepler::kepler_residual;
use danby::kepler_errors::KeplerError;
use danby::kepler_params::KeplerParams;

fn temp_path(name: &str) -> Utf8PathBuf {
    let dir = Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("UTF-8 temp dir");
    dir.join(format!("danby-{}-{name}", std::process::id()))
}

#[test]
fn test_benchmark_to_result_file() {
    let params = KeplerParams::builder().max_error(1e-13).build().unwrap();
    let config = BenchConfig::builder()
        .n_orbits(5_000)
        .n_save(500)
        .seed(1)
        .params(params)
        .build()
        .unwrap();
    let report = run_benchmark(&config);
    assert_eq!(report.n_not_converged, 0);

    let path = temp_path("keplers_eqn.dat");
    write_results(&path, &report).unwrap();
    assert_eq!(
        std::fs::metadata(&path).unwrap().len() as usize,
        ResultRecord::encoded_len(500)
    );

    let record = read_results(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(record, ResultRecord::try_from(&report).unwrap());
    for i in 0..record.saved_count() {
        let e = record.eccentricities[i];
        let m = record.mean_anomalies[i];
        let ecc_anom = record.eccentric_anomalies[i];
        assert!((0.0..1.0).contains(&e));
        assert!((0..15).contains(&record.iterations[i]));
        assert!(kepler_residual(e, ecc_anom, m).abs() < 1e-13);
    }
}

#[test]
fn test_csv_export_has_one_row_per_saved_solution() {
    let config = BenchConfig::builder().n_orbits(100).n_save(20).build().unwrap();
    let report = run_benchmark(&config);

    let path = temp_path("saved.csv");
    write_csv(&path, &report).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(text.lines().count(), 21);
}

#[test]
fn test_missing_result_file() {
    let res = read_results(&temp_path("does-not-exist.dat"));
    assert!(matches!(res, Err(KeplerError::IoError(_))));
}
