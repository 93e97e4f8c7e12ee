use clap::Parser;
use gpa_tracker::cli::{Command, ImproveArgs, OutputFormat, RootArgs};
use gpa_tracker::commands::run_improve;

fn improve_args(argv: &[&str]) -> ImproveArgs {
    let mut full = vec!["gpa-tracker", "improve"];
    full.extend_from_slice(argv);
    match RootArgs::try_parse_from(full).unwrap().command {
        Command::Improve(args) => args,
        other => panic!("unexpected command: {other:?}"),
    }
}

fn report_json(argv: &[&str]) -> eyre::Result<serde_json::Value> {
    let mut out = Vec::new();
    run_improve(&improve_args(argv), OutputFormat::Json, &mut out)?;
    Ok(serde_json::from_slice(&out)?)
}

fn report_text(argv: &[&str]) -> eyre::Result<String> {
    let mut out = Vec::new();
    run_improve(&improve_args(argv), OutputFormat::Pretty, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn single_entry_projection() -> eyre::Result<()> {
    let value = report_json(&[
        "--current-cgpa",
        "3.0",
        "--total-credits",
        "30",
        "--course",
        "Econ:3:C:A",
    ])?;
    let projected = value["entries"][0]["projected_cgpa"].as_f64().unwrap();
    assert!((projected - 3.2).abs() < 1e-9);
    let final_cgpa = value["final_cgpa"].as_f64().unwrap();
    assert!((final_cgpa - 3.2).abs() < 1e-9);
    Ok(())
}

#[test]
fn zero_credits_means_not_computed() -> eyre::Result<()> {
    let args = [
        "--current-cgpa",
        "3.0",
        "--total-credits",
        "0",
        "--course",
        "Econ:3:C:A",
    ];
    let value = report_json(&args)?;
    assert!(value["baseline"].is_null());
    assert!(value["final_cgpa"].is_null());
    assert!(value["total_improvement"].is_null());
    assert!(value["entries"][0]["projected_cgpa"].is_null());
    assert!(value["entries"][0]["improvement"].is_null());

    let text = report_text(&args)?;
    assert!(text.contains("Final CGPA after improvements: N/A"));
    assert!(text.contains("Total GPA improvement: N/A"));
    assert!(!text.contains("inf"));
    assert!(!text.contains("NaN"));
    Ok(())
}

#[test]
fn missing_baseline_is_not_computed() -> eyre::Result<()> {
    let value = report_json(&["--course", "Econ:3:C:A"])?;
    assert!(value["final_cgpa"].is_null());
    Ok(())
}

#[test]
fn plan_file_and_flags_are_combined() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let plan = dir.path().join("plan.json");
    std::fs::write(
        &plan,
        r#"[{"name": "Art", "credits": 2, "oldGrade": "B", "newGrade": "A"}]"#,
    )?;
    let plan_arg = plan.to_string_lossy().into_owned();

    let text = report_text(&[
        "--current-cgpa",
        "3.0",
        "--total-credits",
        "30",
        "--plan",
        &plan_arg,
        "--course",
        "Econ:3:C:A",
    ])?;
    assert!(text.contains("Current CGPA: 3.000 over 30 credits"));
    assert!(text.contains("Art"));
    assert!(text.contains("Econ"));
    assert!(text.contains("+0.200"));
    // (90 + 2 + 6) / 30
    assert!(text.contains("Final CGPA after improvements: 3.267"));
    assert!(text.contains("Total GPA improvement: +0.267"));
    Ok(())
}

#[test]
fn invalid_plan_entry_is_rejected() -> eyre::Result<()> {
    let dir = tempfile::tempdir()?;
    let plan = dir.path().join("plan.json");
    std::fs::write(
        &plan,
        r#"[{"name": "Art", "credits": 0, "oldGrade": "B", "newGrade": "A"}]"#,
    )?;
    let plan_arg = plan.to_string_lossy().into_owned();
    assert!(report_json(&["--plan", &plan_arg]).is_err());
    Ok(())
}

#[test]
fn no_entries_leaves_final_at_current() -> eyre::Result<()> {
    let value = report_json(&["--current-cgpa", "2.75", "--total-credits", "45"])?;
    assert_eq!(value["final_cgpa"].as_f64(), Some(2.75));
    assert_eq!(value["total_improvement"].as_f64(), Some(0.0));
    Ok(())
}
