//! End-to-end CLI tests for xml2ly and xml2brl

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn xml2ly() -> Command {
    cargo_bin_cmd!("xml2ly")
}

fn xml2brl() -> Command {
    cargo_bin_cmd!("xml2brl")
}

fn report(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("binary runs");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is a JSON report")
}

// ============================================
// Help
// ============================================

mod help {
    use super::*;

    #[test]
    fn shows_full_help() {
        xml2ly()
            .arg("-help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage: xml2ly"))
            .stdout(predicate::str::contains("-lpv, -lilypond-version VERSION"))
            .stdout(predicate::str::contains("-t=<SHORT_NAME>, -trace=<LONG_NAME>"));
    }

    #[test]
    fn help_runs_print_no_report() {
        xml2ly()
            .args(["-hs", "score.xml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("MSR (-msr, -msr-group)"))
            .stdout(predicate::str::contains("\"arguments\"").not());
    }

    #[test]
    fn shows_version() {
        xml2brl()
            .arg("-version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn option_name_help_explains_any_option() {
        xml2ly()
            .args(["-onh", "octave-entry"])
            .assert()
            .success()
            .stdout(predicate::str::contains("-oe, -octave-entry KIND"))
            .stdout(predicate::str::contains("relative, absolute, fixed"));
    }

    #[test]
    fn option_name_help_on_unknown_name_is_not_an_error() {
        xml2ly()
            .args(["-onh", "sometopic"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"sometopic\" is unknown"));
    }

    #[test]
    fn find_searches_descriptions() {
        xml2brl()
            .args(["-find", "BRAILLE LINE"])
            .assert()
            .success()
            .stdout(predicate::str::contains("-cpl, -cells-per-line"));
    }

    #[test]
    fn group_name_shows_group_help() {
        xml2brl()
            .arg("-bsr")
            .assert()
            .success()
            .stdout(predicate::str::contains("-bok, -braille-output-kind KIND"));
    }

    #[test]
    fn introspection_lists() {
        xml2ly()
            .arg("-display-prefixes")
            .assert()
            .success()
            .stdout(predicate::str::contains("-trace=  stands for -trace-"));
        xml2ly()
            .arg("-display-single-character-options")
            .assert()
            .success()
            .stdout(predicate::str::contains("-d -h -s"));
    }
}

// ============================================
// Settings report
// ============================================

mod settings {
    use super::*;

    #[test]
    fn defaults_and_arguments() {
        let value = report(xml2ly().arg("score.xml"));
        assert_eq!(value["program"], "xml2ly");
        assert_eq!(value["arguments"], serde_json::json!(["score.xml"]));
        assert_eq!(value["settings"]["lilypond"]["octave_entry"], "absolute");
        assert_eq!(value["settings"]["msr"]["ties"], true);
    }

    #[test]
    fn prefixes_clusters_and_values() {
        let value = report(xml2ly().args([
            "-t=notes,voices",
            "-ds",
            "-oe",
            "relative",
            "-mt",
            "8.=60",
            "-blam",
            "12",
            "-blam",
            "4",
            "-",
        ]));
        let msr = &value["settings"]["msr"];
        assert_eq!(msr["trace_notes"], true);
        assert_eq!(msr["trace_voices"], true);
        assert_eq!(msr["trace_parts"], false);
        assert_eq!(msr["display_msr"], true);
        assert_eq!(msr["display_msr_summary"], true);
        let lily = &value["settings"]["lilypond"];
        assert_eq!(lily["octave_entry"], "relative");
        assert_eq!(lily["midi_tempo"]["duration"], "8.");
        assert_eq!(lily["break_line_after_measures"], serde_json::json!([4, 12]));
        assert_eq!(value["arguments"], serde_json::json!(["-"]));
    }

    #[test]
    fn double_dash_ends_options() {
        let value = report(xml2brl().args(["-cpl", "32", "--", "-cpl", "x"]));
        assert_eq!(value["settings"]["braille"]["cells_per_line"], 32);
        assert_eq!(value["arguments"], serde_json::json!(["-cpl", "x"]));
    }

    #[test]
    fn repeated_options_warn() {
        let value = report(xml2brl().args(["-npn", "-npn"]));
        assert_eq!(value["warnings"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn include_file_supplies_options() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("braille.opts");
        fs::write(&path, "# layout\n-cells-per-line 40\n-bok utf8\nscore.xml\n").unwrap();

        let value = report(xml2brl().arg("-include").arg(&path));
        assert_eq!(value["settings"]["braille"]["cells_per_line"], 40);
        assert_eq!(value["settings"]["braille"]["output_kind"], "utf8");
        assert_eq!(value["arguments"], serde_json::json!(["score.xml"]));
    }

    #[test]
    fn show_options_and_arguments_before_the_report() {
        xml2ly()
            .args(["-soa", "-lpv", "2.25.1", "a.xml"])
            .assert()
            .success()
            .stdout(predicate::str::contains("-lpv 2.25.1"))
            .stdout(predicate::str::contains("\"lilypond_version\": \"2.25.1\""));
    }
}

// ============================================
// Errors
// ============================================

mod errors {
    use super::*;

    #[test]
    fn unknown_option_suggests_a_name() {
        xml2ly()
            .arg("-lilypond-versio")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("error: option \"lilypond-versio\" is unknown"))
            .stderr(predicate::str::contains("did you mean \"-lilypond-version\""));
    }

    #[test]
    fn ill_formed_values_name_the_option() {
        xml2brl()
            .args(["-cpl", "12x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"12x\""))
            .stderr(predicate::str::contains("-cpl, -cells-per-line"));
    }

    #[test]
    fn unknown_choice_lists_choices() {
        xml2brl()
            .args(["-bok", "utf32"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("ascii, utf8, utf8d, utf16"));
    }

    #[test]
    fn missing_value_at_end() {
        xml2ly()
            .arg("-lpv")
            .assert()
            .failure()
            .stderr(predicate::str::contains("expects a value"));
    }

    #[test]
    fn inconsistent_layout_is_rejected() {
        xml2brl()
            .args(["-lpp", "2"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("lines per page is 2"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_arguments_are_rejected_cleanly() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        xml2ly()
            .arg(OsString::from_vec(vec![b's', 0xff, b'.', b'x', b'm', b'l']))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("error: argument"))
            .stderr(predicate::str::contains("is not valid UTF-8"));
    }
}
