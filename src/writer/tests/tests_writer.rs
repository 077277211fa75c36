//! Tests for the SDF writer

use super::super::{EmitOptions, emit};
use crate::error::Error;
use crate::model::{
    Builder, CondEquation, CondScope, Condition, DelayMode, DelayPathSet, EntryKind, Header,
    Model, PortSpec, Slot, TimeUnit, Timescale, TimingEntry, Triple,
};
use crate::parser::parse;
use rstest::rstest;

/// Parse then emit with default options
fn rewrite(source: &str) -> String {
    let model = parse(source).unwrap();
    emit(&model, &EmitOptions::default()).unwrap()
}

const ENTRY_KEYWORDS: &[&str] = &[
    "IOPATH",
    "INTERCONNECT",
    "PORT",
    "DEVICE",
    "COND",
    "SETUP",
    "HOLD",
    "RECOVERY",
    "REMOVAL",
    "RECREM",
    "WIDTH",
    "PERIOD",
    "NOCHANGE",
    "PATHCONSTRAINT",
];

/// Assert that the emitted entry lines match `expected`, indentation ignored
fn assert_entries(source: &str, expected: &[&str]) {
    let output = rewrite(source);
    let lines: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|line| {
            ENTRY_KEYWORDS
                .iter()
                .any(|kw| line.strip_prefix('(').is_some_and(|rest| rest.starts_with(kw)))
        })
        .collect();
    assert_eq!(
        lines, expected,
        "\n=== Input ===\n{}\n=== Got ===\n{}",
        source, output
    );
}

fn wrap_cell(body: &str) -> String {
    format!(r#"(DELAYFILE (CELL (CELLTYPE "C") (INSTANCE i) {body}))"#)
}

fn delay(paths: &[(Slot, Triple)]) -> DelayPathSet {
    paths.iter().copied().collect()
}

fn single_cell_model(entries: Vec<TimingEntry>) -> Model {
    let mut builder = Builder::new();
    builder.begin_cell("C".to_string(), None);
    builder.add_entries(entries).unwrap();
    builder.finish()
}

// ============================================================================
// Whole-file layout
// ============================================================================

#[test]
fn test_emit_minimal() {
    assert_eq!(
        rewrite(r#"(DELAYFILE (SDFVERSION "3.0"))"#),
        "(DELAYFILE\n  (SDFVERSION \"3.0\")\n)\n"
    );
}

#[test]
fn test_emit_empty_model() {
    assert_eq!(
        emit(&Model::default(), &EmitOptions::default()).unwrap(),
        "(DELAYFILE\n)\n"
    );
}

#[test]
fn test_emit_full_layout() {
    let output = rewrite(
        r#"(DELAYFILE (SDFVERSION "3.0") (TIMESCALE 100ps)
            (CELL (CELLTYPE "INV") (INSTANCE u1)
                (DELAY (ABSOLUTE (IOPATH a y (1:2:3) (4:5:6))))
                (TIMINGCHECK (SETUP d (posedge clk) (1)))))"#,
    );
    let expected = "\
(DELAYFILE
  (SDFVERSION \"3.0\")
  (TIMESCALE 100 ps)
  (CELL
    (CELLTYPE \"INV\")
    (INSTANCE u1)
    (DELAY
      (ABSOLUTE
        (IOPATH a y (1:2:3)(4:5:6))
      )
    )
    (TIMINGCHECK
      (SETUP d (posedge clk) (1))
    )
  )
)
";
    assert_eq!(output, expected);
}

#[test]
fn test_emit_header_order() {
    let output = rewrite(
        r#"(DELAYFILE
            (SDFVERSION "3.0")
            (DESIGN "BIGCHIP")
            (DATE "March 12, 1995 09:46")
            (VENDOR "Southwestern ASIC")
            (PROGRAM "Fast program")
            (VERSION "1.2a")
            (DIVIDER /)
            (VOLTAGE 5.5:5.0:4.5)
            (PROCESS "best:nom:worst")
            (TEMPERATURE -40:25:125)
            (TIMESCALE 100 ps))"#,
    );
    let lines: Vec<&str> = output.lines().map(str::trim).collect();
    assert_eq!(
        lines,
        [
            "(DELAYFILE",
            "(SDFVERSION \"3.0\")",
            "(DESIGN \"BIGCHIP\")",
            "(DATE \"March 12, 1995 09:46\")",
            "(VENDOR \"Southwestern ASIC\")",
            "(PROGRAM \"Fast program\")",
            "(VERSION \"1.2a\")",
            "(DIVIDER /)",
            "(VOLTAGE 5.5:5:4.5)",
            "(PROCESS \"best:nom:worst\")",
            "(TEMPERATURE -40:25:125)",
            "(TIMESCALE 100 ps)",
            ")",
        ]
    );
}

#[test]
fn test_cells_sorted_by_identity() {
    let output = rewrite(
        r#"(DELAYFILE
            (CELL (CELLTYPE "B") (INSTANCE x))
            (CELL (CELLTYPE "A") (INSTANCE z))
            (CELL (CELLTYPE "A") (INSTANCE))
            (CELL (CELLTYPE "A") (INSTANCE y)))"#,
    );
    let instances: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("(CELLTYPE") || line.starts_with("(INSTANCE"))
        .collect();
    assert_eq!(
        instances,
        [
            "(CELLTYPE \"A\")",
            "(INSTANCE)",
            "(CELLTYPE \"A\")",
            "(INSTANCE y)",
            "(CELLTYPE \"A\")",
            "(INSTANCE z)",
            "(CELLTYPE \"B\")",
            "(INSTANCE x)",
        ]
    );
}

#[test]
fn test_increment_after_absolute() {
    let output = rewrite(&wrap_cell(
        "(DELAY (INCREMENT (IOPATH a y (2))) (ABSOLUTE (IOPATH b y (1))))",
    ));
    let absolute = output.find("(ABSOLUTE").unwrap();
    let increment = output.find("(INCREMENT").unwrap();
    assert!(absolute < increment);
    assert_eq!(output.matches("(DELAY\n").count(), 1);
}

// ============================================================================
// Entries
// ============================================================================

#[rstest]
#[case::scalar("(IOPATH a y (1))", "(IOPATH a y (1))")]
#[case::fast_slow("(IOPATH a y (1) (2))", "(IOPATH a y (1)(2))")]
#[case::missing_components("(IOPATH a y (1::3) (:2:))", "(IOPATH a y (1::3)(:2:))")]
#[case::absent("(IOPATH a y () (1:2:3) ())", "(IOPATH a y ()(1:2:3)())")]
#[case::shortest_numbers("(IOPATH a y (5.0:61.500:100))", "(IOPATH a y (5:61.5:100))")]
#[case::edges("(IOPATH (posedge a) (negedge y) (1))", "(IOPATH (posedge a) (negedge y) (1))")]
#[case::retain(
    "(IOPATH a y (RETAIN (0:1:2)) (1:2:3))",
    "(IOPATH a y (RETAIN (0:1:2)) (1:2:3))"
)]
#[case::interconnect("(INTERCONNECT u1/y u2/a (1))", "(INTERCONNECT u1/y u2/a (1))")]
#[case::port("(PORT a (1) (2))", "(PORT a (1)(2))")]
#[case::device("(DEVICE y (1))", "(DEVICE y (1))")]
#[case::cond("(COND a==1'b1 (IOPATH b y (1)))", "(COND a == 1'b1 (IOPATH b y (1)))")]
fn test_emit_delay_entries(#[case] del: &str, #[case] expected: &str) {
    assert_entries(
        &wrap_cell(&format!("(DELAY (ABSOLUTE {del}))")),
        &[expected],
    );
}

#[rstest]
#[case::setup("(SETUP d (posedge clk) (1:2:3))", "(SETUP d (posedge clk) (1:2:3))")]
#[case::setuphold("(SETUPHOLD d clk (1) (2))", "(SETUPHOLD d clk (1)(2))")]
#[case::recrem("(RECREM rst clk (1) (2))", "(RECREM rst clk (1)(2))")]
#[case::width("(WIDTH (negedge clk) (4.4:7.5:11.3))", "(WIDTH (negedge clk) (4.4:7.5:11.3))")]
#[case::period_cond("(PERIOD (COND en clk) (10))", "(PERIOD (COND en clk) (10))")]
#[case::cond_first_port(
    "(NOCHANGE (COND 1'b0 por) (posedge rst) (1) (2))",
    "(NOCHANGE (COND 1'b0 por) (posedge rst) (1)(2))"
)]
#[case::cond_second_port(
    "(HOLD d (COND ~en (posedge clk)) (1))",
    "(HOLD d (COND ~ en (posedge clk)) (1))"
)]
fn test_emit_timing_checks(#[case] check: &str, #[case] expected: &str) {
    assert_entries(&wrap_cell(&format!("(TIMINGCHECK {check})")), &[expected]);
}

#[test]
fn test_emit_path_constraint() {
    assert_entries(
        &wrap_cell("(TIMINGENV (PATHCONSTRAINT a y (1:2:3) (4:5:6)))"),
        &["(PATHCONSTRAINT a y (1:2:3)(4:5:6))"],
    );
}

#[test]
fn test_duplicate_names_sort_numerically() {
    let dels: String = (0..12).map(|n| format!("(IOPATH a y ({n}))")).collect();
    let source = wrap_cell(&format!("(DELAY (ABSOLUTE {dels}))"));
    let expected: Vec<String> = (0..12).map(|n| format!("(IOPATH a y ({n}))")).collect();
    let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
    assert_entries(&source, &expected);
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_timescale_override() {
    let model = parse(r#"(DELAYFILE (SDFVERSION "3.0") (TIMESCALE 1ns))"#).unwrap();
    let options = EmitOptions::default().with_timescale(Timescale::new(10, TimeUnit::Ps).unwrap());
    let output = emit(&model, &options).unwrap();
    assert!(output.contains("(TIMESCALE 10 ps)"));
    assert!(!output.contains("ns"));
}

#[test]
fn test_timescale_override_without_header_value() {
    let options = EmitOptions::default().with_timescale(Timescale::default());
    let output = emit(&Model::default(), &options).unwrap();
    assert_eq!(output, "(DELAYFILE\n  (TIMESCALE 1 ps)\n)\n");
}

#[test]
fn test_uppercase_celltype() {
    let model = parse(r#"(DELAYFILE (CELL (CELLTYPE "inv_x1") (INSTANCE)))"#).unwrap();
    let options = EmitOptions::default().with_uppercase_celltype(true);
    let output = emit(&model, &options).unwrap();
    assert!(output.contains("(CELLTYPE \"INV_X1\")"));
}

#[test]
fn test_indent_unit() {
    let model = parse(r#"(DELAYFILE (SDFVERSION "3.0"))"#).unwrap();
    let options = EmitOptions::default().with_indent_unit("\t");
    assert_eq!(
        emit(&model, &options).unwrap(),
        "(DELAYFILE\n\t(SDFVERSION \"3.0\")\n)\n"
    );
}

// ============================================================================
// Models the writer cannot express
// ============================================================================

#[test]
fn test_absent_header_triple_is_error() {
    let model = Model::new(Header {
        voltage: Some(Triple::Absent),
        ..Header::default()
    });
    assert!(matches!(
        emit(&model, &EmitOptions::default()),
        Err(Error::Semantic { .. })
    ));
}

#[rstest]
#[case::infinite_scalar(Triple::scalar(f64::INFINITY))]
#[case::nan_in_triple(Triple::min_typ_max(Some(1.0), Some(f64::NAN), None))]
fn test_non_finite_header_triple_is_error(#[case] voltage: Triple) {
    let model = Model::new(Header {
        voltage: Some(voltage),
        ..Header::default()
    });
    let err = emit(&model, &EmitOptions::default()).unwrap_err();
    assert_eq!(err, Error::semantic("value is not a finite number", "VOLTAGE"));
}

#[rstest]
#[case::delay(Triple::scalar(f64::INFINITY), None)]
#[case::retain(Triple::scalar(1.0), Some(Triple::scalar(f64::NEG_INFINITY)))]
fn test_non_finite_delay_is_error(#[case] value: Triple, #[case] retain: Option<Triple>) {
    let mut iopath = TimingEntry::new(
        EntryKind::Iopath,
        PortSpec::new("a", None),
        PortSpec::new("y", None),
        delay(&[(Slot::Nominal, value)]),
    );
    iopath.mode = Some(DelayMode::Absolute);
    iopath.retain_paths = retain.map(|triple| delay(&[(Slot::Nominal, triple)]));
    let err = emit(&single_cell_model(vec![iopath]), &EmitOptions::default()).unwrap_err();
    assert_eq!(
        err,
        Error::semantic("value is not a finite number", "entry 'iopath_a_y'")
    );
}

#[test]
fn test_non_finite_check_value_is_error() {
    let setup = TimingEntry::new(
        EntryKind::Setup,
        PortSpec::new("clk", None),
        PortSpec::new("d", None),
        delay(&[(Slot::Nominal, Triple::min_typ_max(None, None, Some(f64::INFINITY)))]),
    );
    assert!(matches!(
        emit(&single_cell_model(vec![setup]), &EmitOptions::default()),
        Err(Error::Semantic { .. })
    ));
}

#[test]
fn test_quote_in_celltype_is_error() {
    let model = single_cell_model(Vec::new());
    let mut cell = model.cells.values().next().unwrap().clone();
    cell.celltype = "a\"b".to_string();
    let mut model = Model::default();
    model.insert_cell(cell);
    assert!(emit(&model, &EmitOptions::default()).is_err());
}

#[test]
fn test_delay_without_mode_is_error() {
    let entry = TimingEntry::new(
        EntryKind::Iopath,
        PortSpec::new("a", None),
        PortSpec::new("y", None),
        delay(&[(Slot::Nominal, Triple::scalar(1.0))]),
    );
    let err = emit(&single_cell_model(vec![entry]), &EmitOptions::default()).unwrap_err();
    assert!(err.to_string().contains("iopath_a_y"));
}

#[test]
fn test_mismatched_slots_are_error() {
    let mut iopath = TimingEntry::new(
        EntryKind::Iopath,
        PortSpec::new("a", None),
        PortSpec::new("y", None),
        delay(&[(Slot::Setup, Triple::scalar(1.0))]),
    );
    iopath.mode = Some(DelayMode::Absolute);
    assert!(emit(&single_cell_model(vec![iopath]), &EmitOptions::default()).is_err());

    let hold = TimingEntry::new(
        EntryKind::Hold,
        PortSpec::new("clk", None),
        PortSpec::new("d", None),
        delay(&[(Slot::Fast, Triple::scalar(1.0)), (Slot::Slow, Triple::scalar(2.0))]),
    );
    assert!(emit(&single_cell_model(vec![hold]), &EmitOptions::default()).is_err());
}

#[test]
fn test_path_scoped_check_condition_is_error() {
    let mut setup = TimingEntry::new(
        EntryKind::Setup,
        PortSpec::new("clk", None),
        PortSpec::new("d", None),
        delay(&[(Slot::Nominal, Triple::scalar(1.0))]),
    );
    setup.condition = Some(Condition::new(
        ["en"].into_iter().collect::<CondEquation>(),
        CondScope::Path,
    ));
    assert!(emit(&single_cell_model(vec![setup]), &EmitOptions::default()).is_err());
}

#[test]
fn test_manual_model_round_trips() {
    let mut iopath = TimingEntry::new(
        EntryKind::Iopath,
        PortSpec::new("a", Some(crate::model::Edge::Posedge)),
        PortSpec::new("y", None),
        delay(&[
            (Slot::Fast, Triple::min_typ_max(Some(1.0), None, Some(3.0))),
            (Slot::Slow, Triple::Absent),
        ]),
    );
    iopath.mode = Some(DelayMode::Increment);
    let model = single_cell_model(vec![iopath]);
    let text = emit(&model, &EmitOptions::default()).unwrap();
    assert_eq!(parse(&text).unwrap(), model);
}
