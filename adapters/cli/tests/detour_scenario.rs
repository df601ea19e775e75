use std::process::Command;

fn run_detour(extra_args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_tilepath"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .arg("scenarios/detour.toml")
        .args(extra_args)
        .output()
        .expect("failed to run tilepath");

    assert!(output.status.success(), "tilepath exited with {}", output.status);
    String::from_utf8(output.stdout).expect("utf-8 output")
}

#[test]
fn detour_scenario_routes_through_the_gap() {
    let stdout = run_detour(&["--no-map"]);

    assert!(stdout.contains("(5, 6)"), "path should use the gap:\n{stdout}");
    assert!(stdout.starts_with("path of "), "unexpected output:\n{stdout}");
}

#[test]
fn map_is_printed_north_up() {
    let stdout = run_detour(&[]);
    let rows: Vec<&str> = stdout.lines().take(8).collect();

    assert_eq!(rows.len(), 8);
    assert!(rows.iter().all(|row| row.len() == 12));
    assert_eq!(&rows[0][5..6], "o");
    assert_eq!(&rows[3][5..6], "T");
    assert_eq!(&rows[6][1..2], "S");
    assert_eq!(&rows[6][10..11], "E");
}

#[test]
fn unreachable_target_reports_no_path() {
    let stdout = run_detour(&["--no-map", "--to", "40,1"]);

    assert!(stdout.starts_with("no path from (1, 1) to (40, 1)"), "{stdout}");
}

#[test]
fn segments_follow_the_path() {
    let stdout = run_detour(&["--no-map", "--segments"]);

    assert!(stdout.lines().any(|line| line.starts_with("line (1.50, 1.50) -> ")));
}
