//! End-to-end tests for the rewrite fold over whole programs.

use gcode_rapid::rewrite::LONG_COMMENT_PLACEHOLDER;
use gcode_rapid::{RewriteOptions, rewrite_program};

fn rewrite(lines: &[&str]) -> gcode_rapid::RewriteOutput {
    rewrite_program(lines, &RewriteOptions::default()).expect("rewrite program")
}

#[test]
fn test_cam_style_travel_sequence() {
    // The pattern this tool exists for: a CAM export that climbs,
    // traverses and plunges using implicit G1 moves at full feed.
    let program = [
        "(Simple travel demo)",
        "G90",
        "M3 S12000",
        "G1 Z2 F300",
        "G1 X10 Y0 F600",
        "F3000 Z15",
        "X40 Y20",
        "Z2",
        "G1 X60 Y20",
        "M5",
    ];

    let out = rewrite(&program);

    assert_eq!(
        out.lines,
        vec![
            "(Simple travel demo)".to_string(),
            "G90".to_string(),
            "M3 S12000".to_string(),
            "G1 Z2 F300".to_string(),
            "G1 X10 Y0 F600".to_string(),
            // The fast implicit climb becomes a rapid, F dropped.
            "G0 Z15".to_string(),
            "X40 Y20".to_string(),
            // The long plunge splits: rapid to one unit above, then cut
            // at the remembered cutting feed.
            "G0 Z3".to_string(),
            "G1 Z2 F3000".to_string(),
            "G1 X60 Y20".to_string(),
            "M5".to_string(),
        ]
    );

    // One annotation record per non-empty input line, regardless of
    // how many output lines a record produced.
    assert_eq!(out.annotations.len(), program.len());
    assert_eq!(
        out.annotations[5],
        "F3000 Z15 (Going up) (Move upwards into rapid)"
    );
    assert_eq!(
        out.annotations[6],
        "X40 Y20 (Should be rapid) (Move in horizontal plane at Z=15)"
    );
    assert_eq!(
        out.annotations[7],
        "Z2 (Going down) (Down a long way) (End rapid move)"
    );
}

#[test]
fn test_second_pass_rewrites_nothing_further() {
    let program = [
        "(Simple travel demo)",
        "G90",
        "G1 Z2 F300",
        "G1 X10 Y0 F600",
        "F3000 Z15",
        "X40 Y20",
        "Z2",
        "M5",
    ];

    let first = rewrite(&program);
    let first_lines: Vec<&str> = first.lines.iter().map(String::as_str).collect();
    let second = rewrite(&first_lines);

    // Rewritten lines are now explicit G moves and skip inference;
    // everything else passes through untouched.
    assert_eq!(second.lines, first.lines);
}

#[test]
fn test_empty_and_blank_lines_are_filtered() {
    let out = rewrite(&["", "G0 X1 Y1", "   ", "", "M30", "\t"]);
    assert_eq!(out.lines, vec!["G0 X1 Y1".to_string(), "M30".to_string()]);
    assert_eq!(out.annotations.len(), 2);
}

#[test]
fn test_comment_and_control_streams_pass_through() {
    let long = format!("({})", "detail ".repeat(12));
    let program = ["(setup)", long.as_str(), "M3 S8000", "T2"];
    let out = rewrite(&program);
    assert_eq!(
        out.lines,
        vec![
            "(setup)".to_string(),
            LONG_COMMENT_PLACEHOLDER.to_string(),
            "M3 S8000".to_string(),
            "T2".to_string(),
        ]
    );
    assert_eq!(out.annotations[1], format!("{long} (Too long line)"));
}

#[test]
fn test_relative_and_absolute_positioning() {
    let out = rewrite(&["G90", "G1 X10 Y0 Z0 F500", "G91", "X5", "G90", "X5"]);
    // Relative X5 from x=10 lands at 15; absolute X5 moves back down.
    assert!(out.annotations[3].contains("(Move in horizontal plane at Z=0)"));
    assert!(out.annotations[5].contains("(Move in horizontal plane at Z=0)"));
    assert_eq!(out.lines.len(), 6);
}

#[test]
fn test_upward_inference_blocked_by_z_in_next_line() {
    let out = rewrite(&["G1 Z10 F1000", "F2000 Z20", "G1 Z5 X3"]);
    assert_eq!(out.lines[1], "F2000 Z20");
    assert!(out.annotations[1].contains("(Move update, but not into rapid)"));
}

#[test]
fn test_last_line_climb_has_no_successor() {
    // End-of-input behaves as "next line carries no Z".
    let out = rewrite(&["G1 Z10 F1000", "F2000 Z20"]);
    assert_eq!(out.lines[1], "G0 Z20");
}

#[test]
fn test_parse_error_names_the_input_line() {
    let err = rewrite_program(
        &["G0 X1", "", "(note)", "G1 X-+5"],
        &RewriteOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.line_number, 4);
    assert_eq!(err.line, "G1 X-+5");
    let message = err.to_string();
    assert!(message.contains("line 4"));
    assert!(message.contains("-+5"));
}

#[test]
fn test_descent_threshold_option_is_honored() {
    let opts = RewriteOptions {
        descent_threshold: 5.0,
        ..RewriteOptions::default()
    };
    let out = rewrite_program(&["G1 Z10 F1000", "F2000 Z20", "X30", "Z17"], &opts).unwrap();
    // A 3-unit drop is below the widened threshold: closed in place,
    // not split.
    assert_eq!(out.lines[3], "G1 Z17 F2000");

    let out = rewrite_program(&["G1 Z10 F1000", "F2000 Z20", "X30", "Z12"], &opts).unwrap();
    // An 8-unit drop splits, stopping threshold units above target.
    assert_eq!(out.lines[3], "G0 Z17");
    assert_eq!(out.lines[4], "G1 Z12 F2000");
}
