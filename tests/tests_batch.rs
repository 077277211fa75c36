//! Batch and Serialization Tests
//!
//! Parses are independent of each other, so a batch parsed in parallel must
//! give the same models as parsing each input alone.

use rstest::rstest;
use sdf_timing::{Error, parse, parse_batch};

fn cell_file(celltype: &str, delay: u32) -> String {
    format!(
        r#"(DELAYFILE (SDFVERSION "3.0")
            (CELL (CELLTYPE "{celltype}") (INSTANCE u{delay})
                (DELAY (ABSOLUTE (IOPATH a y ({delay}) ({delay}))))))"#
    )
}

#[test]
fn test_batch_matches_sequential() {
    let inputs: Vec<String> = (0..64).map(|n| cell_file(&format!("CELL{n}"), n)).collect();
    let batch = parse_batch(&inputs);
    assert_eq!(batch.len(), inputs.len());
    for (input, result) in inputs.iter().zip(&batch) {
        assert_eq!(result, &parse(input));
    }
}

#[test]
fn test_batch_keeps_failures_separate() {
    let inputs = [
        cell_file("A", 1),
        "(DELAYFILE #)".to_string(),
        cell_file("B", 2),
        "(DELAYFILE (CELL))".to_string(),
    ];
    let batch = parse_batch(&inputs);
    assert!(batch[0].is_ok());
    assert!(matches!(batch[1], Err(Error::Lex { ch: '#', .. })));
    assert!(batch[2].as_ref().unwrap().cell("B", Some("u2")).is_some());
    assert!(matches!(batch[3], Err(Error::Parse { .. })));
}

#[rstest]
#[case::empty(&[])]
#[case::str_slices(&[r#"(DELAYFILE (SDFVERSION "3.0"))"#, "(DELAYFILE)"])]
fn test_batch_of_str(#[case] inputs: &[&str]) {
    let batch = parse_batch(inputs);
    assert_eq!(batch.len(), inputs.len());
    assert!(batch.iter().all(Result::is_ok));
}

#[cfg(feature = "serde")]
mod serde_model {
    use sdf_timing::{Model, parse};

    const SOURCE: &str = r#"(DELAYFILE
        (SDFVERSION "3.0")
        (DIVIDER .)
        (VOLTAGE :1.8:)
        (TIMESCALE 10 ps)
        (CELL (CELLTYPE "DFF") (INSTANCE top.ff)
            (DELAY (INCREMENT
                (COND en (IOPATH (posedge clk) q (RETAIN (1)) (1:2:3) ()))))
            (TIMINGCHECK (SETUPHOLD (COND rst d) (posedge clk) (1) (2)))))"#;

    #[test]
    fn test_json_round_trip() {
        let model = parse(SOURCE).unwrap();
        let json = serde_json::to_string(&model).unwrap();
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn test_json_shape() {
        let model = parse(SOURCE).unwrap();
        let value = serde_json::to_value(&model).unwrap();
        assert_eq!(value["header"]["timescale"], "10 ps");
        assert_eq!(value["header"]["divider"], ".");
        let cells = value["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0]["celltype"], "DFF");
        let entry = &cells[0]["entries"]["iopath_clk_q"];
        assert_eq!(entry["kind"], "iopath");
        assert_eq!(entry["mode"], "increment");
        assert_eq!(entry["from_edge"], "posedge");
        assert_eq!(entry["condition"]["equation"][0], "en");
        assert_eq!(entry["condition"]["scope"], "path");
    }
}
