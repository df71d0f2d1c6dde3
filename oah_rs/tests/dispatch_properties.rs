//! Dispatch properties of a small handler, driven through the public API.

use std::fs;

use num_rational::Rational64;
use oah::values::MidiTempo;
use oah::{
    AtomDef, AtomValue, ContainerDef, ElementRef, Handler, HandlerInfo, HelpUsage, OahError,
    OptionalValuesStyle, Prefix,
};
use tempfile::TempDir;

fn always_inconsistent(_: &Handler) -> Result<(), String> {
    Err("this group never accepts a run".to_string())
}

fn build(check: bool) -> Handler {
    let mut handler = Handler::new(HandlerInfo::new("prog", "prog for tests"));
    handler.add_prefix(Prefix::new("t", "trace-", "")).unwrap();

    let mut def = ContainerDef::new("Main", "", "main-group", "");
    if check {
        def = def.with_consistency_check(always_inconsistent);
    }
    let group = handler.add_group(def).unwrap();
    let sub = handler
        .add_subgroup(group, ContainerDef::new("Atoms", "", "atoms", ""))
        .unwrap();
    for def in [
        AtomDef::boolean("v", "verbose", ""),
        AtomDef::boolean("a", "all", ""),
        AtomDef::boolean("c", "check", ""),
        AtomDef::boolean("", "trace-abc", ""),
        AtomDef::boolean("", "trace-def", ""),
        AtomDef::integer("n", "number", "", 0),
        AtomDef::valued("", "ratio", "", AtomValue::Rational(Rational64::from_integer(1))),
        AtomDef::valued("", "midiTempo", "", AtomValue::MidiTempo(MidiTempo::new("8", 60))),
        AtomDef::string_with_default("", "title", "", "untitled"),
        AtomDef::option_name_help("onh", "option-name-help", ""),
        AtomDef::control("", "include", "", oah::ControlKind::IncludeOptionsFile),
    ] {
        handler.add_atom(sub, def).unwrap();
    }
    handler
}

fn handler() -> Handler {
    build(false)
}

fn run(handler: &mut Handler, args: &[&str]) -> oah::Result<HelpUsage> {
    run_with_output(handler, args).0
}

fn run_with_output(handler: &mut Handler, args: &[&str]) -> (oah::Result<HelpUsage>, String) {
    let mut argv = vec!["prog"];
    argv.extend_from_slice(args);
    let mut out = Vec::new();
    let result = handler.apply_options_and_arguments_from_argv(&argv, &mut out);
    (result, String::from_utf8_lossy(&out).into_owned())
}

fn elements_of(args: &[&str]) -> Vec<ElementRef> {
    let mut handler = handler();
    run(&mut handler, args).unwrap();
    handler.command_line_elements().to_vec()
}

// ============================================
// Registration invariants
// ============================================

mod registration {
    use super::*;

    #[test]
    fn names_must_exist_and_differ() {
        let mut handler = handler();
        let sub = handler.subgroup_ids().next().unwrap();
        assert!(matches!(
            handler.add_atom(sub, AtomDef::boolean("", "", "nameless")),
            Err(OahError::EmptyNames { .. })
        ));
        assert!(matches!(
            handler.add_atom(sub, AtomDef::boolean("x", "x", "twice")),
            Err(OahError::SameShortAndLongName { .. })
        ));
    }

    #[test]
    fn overlapping_names_are_fatal() {
        let mut handler = handler();
        let sub = handler.subgroup_ids().next().unwrap();
        handler
            .add_atom(sub, AtomDef::integer("verbose", "", "", 0))
            .unwrap();
        let err = handler.register().unwrap_err();
        assert!(matches!(err, OahError::DuplicateName { ref name, .. } if name == "verbose"));
        assert!(err.is_definition_error());
        assert!(matches!(
            run(&mut handler, &["-v"]),
            Err(OahError::DuplicateName { .. })
        ));
    }
}

// ============================================
// Dispatch
// ============================================

mod dispatch {
    use super::*;

    #[test]
    fn repeated_boolean_warns_once() {
        let mut handler = handler();
        assert!(run(&mut handler, &["-v", "-v"]).is_ok());
        assert_eq!(handler.boolean("verbose"), Some(true));
        assert_eq!(handler.warnings().len(), 1);
    }

    #[test]
    fn cluster_equals_separate_options() {
        assert_eq!(elements_of(&["-vac"]), elements_of(&["-v", "-a", "-c"]));

        let mut handler = handler();
        assert!(matches!(
            run(&mut handler, &["-vad"]),
            Err(OahError::UnknownOption { name, .. }) if name == "vad"
        ));
        assert_eq!(handler.boolean("verbose"), Some(false));
    }

    #[test]
    fn prefix_expansion_keeps_order() {
        assert_eq!(
            elements_of(&["-t=abc,def"]),
            elements_of(&["-trace-abc", "-trace-def"])
        );
        let mut handler = handler();
        run(&mut handler, &["-t=def,abc"]).unwrap();
        let names: Vec<&str> = handler
            .options_and_arguments()
            .options
            .iter()
            .map(|option| option.name.as_str())
            .collect();
        assert_eq!(names, ["trace-def", "trace-abc"]);
    }

    #[test]
    fn integer_grammar_is_total() {
        let mut handler = handler();
        assert!(matches!(
            run(&mut handler, &["-n", "12x"]),
            Err(OahError::InvalidValue { value, .. }) if value == "12x"
        ));
        assert_eq!(handler.integer("number"), Some(0));
    }

    #[test]
    fn rational_spacing_and_zero_denominator() {
        for raw in ["3 / 4", "3/4"] {
            let mut handler = handler();
            run(&mut handler, &["-ratio", raw]).unwrap();
            assert_eq!(
                handler.value("ratio"),
                Some(&AtomValue::Rational(Rational64::new(3, 4)))
            );
        }
        let mut handler = handler();
        assert!(matches!(
            run(&mut handler, &["-ratio", "3/0"]),
            Err(OahError::InvalidValue { .. })
        ));
    }

    #[test]
    fn optional_value_last_applies_default_once() {
        let mut handler = handler();
        assert!(run(&mut handler, &["file.xml", "-title"]).is_ok());
        assert_eq!(handler.string("title"), Some("untitled"));
        let uses = handler
            .options_and_arguments()
            .options
            .iter()
            .filter(|option| option.name == "title")
            .count();
        assert_eq!(uses, 1);
    }

    #[test]
    fn midi_tempo_scenario() {
        let mut handler = handler();
        let usage = run(&mut handler, &["-v", "-midiTempo", "4=120", "file.xml"]).unwrap();
        assert_eq!(usage, HelpUsage::HelpOptionsHaveNotBeenUsed);
        assert_eq!(handler.boolean("v"), Some(true));
        assert_eq!(
            handler.value("midiTempo"),
            Some(&AtomValue::MidiTempo(MidiTempo::new("4", 120)))
        );
        assert_eq!(handler.arguments(), ["file.xml"]);
    }

    #[test]
    fn option_name_help_scenario_skips_consistency_checks() {
        let mut handler = build(true);
        let (result, out) = run_with_output(&mut handler, &["-onh", "sometopic"]);
        assert_eq!(result.unwrap(), HelpUsage::HelpOptionsHaveBeenUsed);
        assert!(out.contains("sometopic"));

        let mut handler = build(true);
        assert!(matches!(
            run(&mut handler, &["-v"]),
            Err(OahError::Inconsistent { .. })
        ));
    }

    #[test]
    fn unknown_option_is_fatal() {
        let mut handler = handler();
        assert!(matches!(
            run(&mut handler, &["-unknownOpt", "file.xml"]),
            Err(OahError::UnknownOption { name, .. }) if name == "unknownOpt"
        ));
        assert!(handler.arguments().is_empty());
    }
}

// ============================================
// Optional values styles
// ============================================

mod optional_values {
    use super::*;

    fn styled(style: OptionalValuesStyle) -> Handler {
        let mut handler = handler();
        handler.set_optional_values_style(style);
        handler
    }

    #[test]
    fn equals_sign() {
        let mut gnu = styled(OptionalValuesStyle::Gnu);
        run(&mut gnu, &["-title=Ode"]).unwrap();
        assert_eq!(gnu.string("title"), Some("Ode"));

        let mut oah = styled(OptionalValuesStyle::Oah);
        assert!(matches!(
            run(&mut oah, &["-title=Ode"]),
            Err(OahError::EqualsNotUsable { .. })
        ));
    }

    #[test]
    fn separate_value() {
        let mut gnu = styled(OptionalValuesStyle::Gnu);
        run(&mut gnu, &["-title", "Ode"]).unwrap();
        assert_eq!(gnu.string("title"), Some("untitled"));
        assert_eq!(gnu.arguments(), ["Ode"]);

        let mut oah = styled(OptionalValuesStyle::Oah);
        run(&mut oah, &["-title", "Ode"]).unwrap();
        assert_eq!(oah.string("title"), Some("Ode"));
        assert!(oah.arguments().is_empty());
    }

    #[test]
    fn followed_by_another_option() {
        for style in [OptionalValuesStyle::Gnu, OptionalValuesStyle::Oah] {
            let mut handler = styled(style);
            run(&mut handler, &["-title", "-v"]).unwrap();
            assert_eq!(handler.string("title"), Some("untitled"));
            assert_eq!(handler.boolean("verbose"), Some(true));
        }
    }
}

// ============================================
// Options vectors and include files
// ============================================

mod options_vectors {
    use super::*;

    #[test]
    fn vector_matches_command_line() {
        let mut from_vector = handler();
        from_vector
            .apply_options_vector(
                &[
                    ("v".to_string(), String::new()),
                    ("midiTempo".to_string(), "4=72".to_string()),
                ],
                &["file.xml".to_string()],
                &mut Vec::new(),
            )
            .unwrap();

        let mut from_argv = handler();
        run(&mut from_argv, &["-v", "-midiTempo", "4=72", "file.xml"]).unwrap();

        assert_eq!(from_vector.value("midiTempo"), from_argv.value("midiTempo"));
        assert_eq!(from_vector.options_and_arguments(), from_argv.options_and_arguments());
    }

    #[test]
    fn json_include() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("opts.json");
        fs::write(
            &path,
            r#"{"options":[{"name":"n","value":"5"},{"name":"all"}],"arguments":["in.xml"]}"#,
        )
        .unwrap();

        let mut handler = handler();
        run(&mut handler, &["-include", path.to_str().unwrap(), "-v"]).unwrap();
        assert_eq!(handler.integer("number"), Some(5));
        assert_eq!(handler.boolean("all"), Some(true));
        assert_eq!(handler.boolean("verbose"), Some(true));
        assert_eq!(handler.arguments(), ["in.xml"]);
    }

    #[test]
    fn recursive_include_is_bounded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("loop.opts");
        fs::write(&path, format!("-include {}\n", path.display())).unwrap();

        let mut handler = handler();
        assert!(matches!(
            run(&mut handler, &["-include", path.to_str().unwrap()]),
            Err(OahError::IncludeDepthExceeded { max: 8, .. })
        ));
    }

    #[test]
    fn missing_include_file_is_an_io_error() {
        let mut handler = handler();
        assert!(matches!(
            run(&mut handler, &["-include", "/definitely/not/here.opts"]),
            Err(OahError::Io(_))
        ));
    }
}
