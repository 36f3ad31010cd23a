//! The built-in reference form.
//!
//! Ships a complete two-section calibration so the engine is usable out of
//! the box, without pointing the CLI at a forms directory. The same data
//! lives in `forms/standard-2024a.toml` for tooling that wants a file copy.

use std::path::Path;

use anyhow::Result;

use crate::file::{parse_form_str, TestForm};

/// Form id the CLI falls back to when none is given.
pub const REFERENCE_FORM_ID: &str = "standard-2024a";

const REFERENCE_FORM_TOML: &str = r##"
[form]
id = "standard-2024a"
name = "Standard Practice Form 2024-A"
version = "2024.1"

[[sections]]
id = "listening"
name = "Listening"
max_raw = 100
min_scaled = 5
max_scaled = 495
entries = [
    [0, 5], [1, 5], [2, 5], [3, 5], [4, 5], [5, 5], [6, 10],
    [7, 15], [8, 20], [9, 25], [10, 30], [11, 35], [12, 40], [13, 50],
    [14, 55], [15, 60], [16, 65], [17, 70], [18, 80], [19, 85], [20, 90],
    [21, 95], [22, 100], [23, 110], [24, 115], [25, 120], [26, 125], [27, 130],
    [28, 140], [29, 145], [30, 150], [31, 155], [32, 160], [33, 165], [34, 170],
    [35, 180], [36, 185], [37, 190], [38, 195], [39, 200], [40, 205], [41, 210],
    [42, 215], [43, 220], [44, 225], [45, 230], [46, 240], [47, 245], [48, 250],
    [49, 255], [50, 260], [51, 265], [52, 270], [53, 275], [54, 280], [55, 285],
    [56, 290], [57, 295], [58, 300], [59, 305], [60, 310], [61, 315], [62, 320],
    [63, 325], [64, 330], [65, 335], [66, 340], [67, 345], [68, 350], [69, 355],
    [70, 360], [71, 365], [72, 370], [73, 375], [74, 380], [75, 385], [76, 390],
    [77, 395], [78, 400], [79, 405], [80, 410], [81, 415], [82, 420], [83, 425],
    [84, 430], [85, 435], [86, 440], [87, 445], [88, 450], [89, 455], [90, 460],
    [91, 465], [92, 470], [93, 480], [94, 485], [95, 490], [96, 495], [97, 495],
    [98, 495], [99, 495], [100, 495]
]

[[sections]]
id = "reading"
name = "Reading"
max_raw = 100
min_scaled = 5
max_scaled = 495
entries = [
    [0, 5], [1, 5], [2, 5], [3, 5], [4, 5], [5, 5], [6, 5],
    [7, 5], [8, 10], [9, 10], [10, 15], [11, 20], [12, 25], [13, 35],
    [14, 40], [15, 45], [16, 50], [17, 55], [18, 65], [19, 70], [20, 75],
    [21, 80], [22, 85], [23, 95], [24, 100], [25, 105], [26, 110], [27, 115],
    [28, 125], [29, 130], [30, 135], [31, 140], [32, 145], [33, 150], [34, 155],
    [35, 160], [36, 170], [37, 175], [38, 180], [39, 185], [40, 190], [41, 195],
    [42, 200], [43, 205], [44, 210], [45, 220], [46, 225], [47, 230], [48, 235],
    [49, 240], [50, 245], [51, 250], [52, 255], [53, 260], [54, 265], [55, 270],
    [56, 275], [57, 280], [58, 285], [59, 290], [60, 295], [61, 300], [62, 305],
    [63, 310], [64, 315], [65, 320], [66, 325], [67, 330], [68, 335], [69, 340],
    [70, 345], [71, 350], [72, 355], [73, 360], [74, 365], [75, 370], [76, 375],
    [77, 380], [78, 385], [79, 390], [80, 395], [81, 400], [82, 405], [83, 410],
    [84, 415], [85, 420], [86, 425], [87, 430], [88, 435], [89, 440], [90, 445],
    [91, 450], [92, 460], [93, 465], [94, 475], [95, 480], [96, 490], [97, 495],
    [98, 495], [99, 495], [100, 495]
]

[[bands]]
threshold = 860
label = "Advanced"
narrative = "Communicates effectively in almost any professional context, with only occasional imprecision."
color = "#16a34a"

[[bands]]
threshold = 730
label = "High Intermediate"
narrative = "Handles most everyday and routine work situations confidently, though complex material still causes difficulty."
color = "#3b82f6"

[[bands]]
threshold = 470
label = "Intermediate"
narrative = "Manages familiar topics and simple exchanges but breaks down under unfamiliar demands."
color = "#eab308"

[[bands]]
threshold = 220
label = "Elementary"
narrative = "Covers immediate needs with memorized phrases and simple sentences."
color = "#f97316"

[[bands]]
threshold = 0
label = "Beginner"
narrative = "Recognizes isolated words and set expressions but cannot yet sustain communication."
color = "#ef4444"
"##;

/// Parses the embedded reference form.
pub fn reference_form() -> Result<TestForm> {
    parse_form_str(REFERENCE_FORM_TOML, Path::new("<embedded standard-2024a>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{audit_form, build_engine};
    use scalemark_core::model::Attempt;
    use scalemark_core::table::CalibrationTable;

    #[test]
    fn reference_form_has_the_expected_shape() {
        let form = reference_form().unwrap();
        assert_eq!(form.id, REFERENCE_FORM_ID);
        assert_eq!(form.name, "Standard Practice Form 2024-A");
        assert_eq!(form.version, "2024.1");
        assert_eq!(form.sections.len(), 2);
        assert_eq!(form.bands.len(), 5);
        assert_eq!(form.max_composite(), 990);
    }

    #[test]
    fn reference_form_audits_clean() {
        let audit = audit_form(&reference_form().unwrap());
        assert!(audit.is_valid(), "issues: {:?}", audit.issue_lines());
    }

    #[test]
    fn anchor_conversions_hold() {
        let form = reference_form().unwrap();
        let listening =
            CalibrationTable::new(form.sections[0].spec, &form.sections[0].entries).unwrap();
        let reading =
            CalibrationTable::new(form.sections[1].spec, &form.sections[1].entries).unwrap();

        assert_eq!(listening.lookup(0), 5);
        assert_eq!(listening.lookup(75), 385);
        assert_eq!(listening.lookup(100), 495);
        assert_eq!(reading.lookup(0), 5);
        assert_eq!(reading.lookup(80), 395);
        assert_eq!(reading.lookup(100), 495);
    }

    #[test]
    fn reference_attempt_scores_end_to_end() {
        let engine = build_engine(&reference_form().unwrap()).unwrap();
        let score = engine.score(&Attempt::new(&[("listening", 75), ("reading", 80)], 200));

        assert_eq!(score.composite.total, 780);
        assert_eq!(score.composite.total_correct, 155);
        assert_eq!(score.composite.percent, 78);
        assert_eq!(score.band.label, "High Intermediate");
        assert!(!score.has_diagnostics());
    }

    #[test]
    fn perfect_attempt_reaches_the_ceiling() {
        let engine = build_engine(&reference_form().unwrap()).unwrap();
        let score = engine.score(&Attempt::new(&[("listening", 100), ("reading", 100)], 200));

        assert_eq!(score.composite.total, 990);
        assert_eq!(score.composite.percent, 100);
        assert_eq!(score.band.label, "Advanced");
    }
}
