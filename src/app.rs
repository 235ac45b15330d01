use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::loader::load_data;
use crate::data::model::{student_entries, StudentRoster};
use crate::ui::{listing, prompt};

// ---------------------------------------------------------------------------
// How a run ended
// ---------------------------------------------------------------------------

/// Where a run stopped. Every variant is a normal, successful exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// File missing, unparsable, or without a usable `students` list.
    NoData,
    /// A student entry lacked a field or had one of the wrong shape.
    InvalidRecord,
    /// The GPA answer was not a number; nothing was filtered.
    InvalidInput,
    /// The filtered listing was printed with this many students.
    Filtered { shown: usize },
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

pub struct RosterApp {
    pub data_path: PathBuf,
}

impl RosterApp {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    /// Load the roster, list it, ask for a threshold and list the matches.
    ///
    /// Only failures to read from `input` or write to `out` are errors.
    pub fn run(&self, input: &mut impl BufRead, out: &mut impl Write) -> Result<RunOutcome> {
        let doc = load_data(&self.data_path, out).context("writing load report")?;

        let Some(entries) = doc.as_ref().and_then(student_entries) else {
            writeln!(out, "No valid student data found.")?;
            return Ok(RunOutcome::NoData);
        };

        let roster = match StudentRoster::from_values(entries) {
            Ok(roster) => roster,
            Err(err) => {
                log::warn!("{err:?}");
                writeln!(out, "Error: {err}")?;
                return Ok(RunOutcome::InvalidRecord);
            }
        };
        log::info!("{} students in {}", roster.len(), self.data_path.display());

        listing::display_students(out, &roster.students).context("writing student list")?;

        let Some(min_gpa) = prompt::ask_min_gpa(input, out).context("reading GPA")? else {
            writeln!(out, "Invalid input! Please enter a valid GPA.")?;
            return Ok(RunOutcome::InvalidInput);
        };

        let shown = listing::filter_students_by_gpa(out, &roster.students, min_gpa)
            .context("writing filtered list")?;
        Ok(RunOutcome::Filtered { shown })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use tempfile::TempDir;

    const ROSTER_YAML: &str = "\
students:
  - name: Alice
    age: 20
    major: Computer Science
    gpa: 3.8
  - name: Bob
    age: 22
    major: Mathematics
    gpa: 3.2
  - name: Carol
    age: 21
    major: Physics
    gpa: 3.95
";

    const ALL_STUDENTS: &str = "\nAll Students:\n\
        Name: Alice, Age: 20, Major: Computer Science, GPA: 3.8\n\
        Name: Bob, Age: 22, Major: Mathematics, GPA: 3.2\n\
        Name: Carol, Age: 21, Major: Physics, GPA: 3.95\n";

    const PROMPT: &str = "\nEnter minimum GPA to filter students: ";

    fn run_with(file: &str, contents: Option<&str>, answer: &str) -> (RunOutcome, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(file);
        if let Some(contents) = contents {
            std::fs::write(&path, contents).unwrap();
        }
        let mut input = Cursor::new(answer.to_string());
        let mut out = Vec::new();
        let outcome = RosterApp::new(&path).run(&mut input, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn lists_all_then_filters_by_threshold() {
        let (outcome, text) = run_with("students.yaml", Some(ROSTER_YAML), "3.5\n");
        assert_eq!(outcome, RunOutcome::Filtered { shown: 2 });
        let expected = format!(
            "{ALL_STUDENTS}{PROMPT}\nStudents with GPA >= 3.5:\n\
             Name: Alice, Age: 20, Major: Computer Science, GPA: 3.8\n\
             Name: Carol, Age: 21, Major: Physics, GPA: 3.95\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn no_match_prints_no_students_found() {
        let (outcome, text) = run_with("students.yaml", Some(ROSTER_YAML), "4\n");
        assert_eq!(outcome, RunOutcome::Filtered { shown: 0 });
        assert!(text.ends_with("\nStudents with GPA >= 4.0:\nNo students found.\n"), "{text}");
    }

    #[test]
    fn non_numeric_answer_skips_filter() {
        let (outcome, text) = run_with("students.yaml", Some(ROSTER_YAML), "high\n");
        assert_eq!(outcome, RunOutcome::InvalidInput);
        assert_eq!(
            text,
            format!("{ALL_STUDENTS}{PROMPT}Invalid input! Please enter a valid GPA.\n")
        );
        assert!(!text.contains("Students with GPA"));
    }

    #[test]
    fn missing_file_stops_before_listing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.yaml");
        let mut out = Vec::new();
        let outcome = RosterApp::new(&path)
            .run(&mut Cursor::new("3.5\n"), &mut out)
            .unwrap();
        assert_eq!(outcome, RunOutcome::NoData);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "Error: The file '{}' was not found.\nNo valid student data found.\n",
                path.display()
            )
        );
    }

    #[test]
    fn malformed_file_stops_before_listing() {
        let (outcome, text) = run_with("students.yaml", Some("students: [\n"), "3.5\n");
        assert_eq!(outcome, RunOutcome::NoData);
        assert!(text.starts_with("Error parsing YAML file: "), "{text}");
        assert!(text.ends_with("No valid student data found.\n"), "{text}");
        assert!(!text.contains("All Students"));
    }

    #[test]
    fn missing_students_key_is_no_data() {
        let (outcome, text) = run_with("students.yaml", Some("teachers: []\n"), "3.5\n");
        assert_eq!(outcome, RunOutcome::NoData);
        assert_eq!(text, "No valid student data found.\n");
    }

    #[test]
    fn empty_file_is_no_data() {
        let (outcome, text) = run_with("students.yaml", Some(""), "3.5\n");
        assert_eq!(outcome, RunOutcome::NoData);
        assert_eq!(text, "No valid student data found.\n");
    }

    #[test]
    fn empty_students_list_still_prompts() {
        let (outcome, text) = run_with("students.yaml", Some("students: []\n"), "3.0\n");
        assert_eq!(outcome, RunOutcome::Filtered { shown: 0 });
        assert_eq!(
            text,
            format!("\nAll Students:\n{PROMPT}\nStudents with GPA >= 3.0:\nNo students found.\n")
        );
    }

    #[test]
    fn numeric_name_and_blank_major_are_listed() {
        let yaml = "students:\n  - name: 123\n    age: 20\n    major:\n    gpa: 3.8\n";
        let (outcome, text) = run_with("students.yaml", Some(yaml), "3.5\n");
        assert_eq!(outcome, RunOutcome::Filtered { shown: 1 });
        assert_eq!(
            text,
            format!(
                "\nAll Students:\nName: 123, Age: 20, Major: None, GPA: 3.8\n{PROMPT}\
                 \nStudents with GPA >= 3.5:\nName: 123, Age: 20, Major: None, GPA: 3.8\n"
            )
        );
    }

    #[test]
    fn duplicate_keys_keep_the_last_value() {
        let yaml = "students:\n  - name: Alice\n    name: Alicia\n    age: 20\n    major: CS\n    gpa: 3.8\n";
        let (outcome, text) = run_with("students.yaml", Some(yaml), "5\n");
        assert_eq!(outcome, RunOutcome::Filtered { shown: 0 });
        assert!(text.starts_with("\nAll Students:\nName: Alicia, Age: 20, Major: CS, GPA: 3.8\n"), "{text}");
    }

    #[test]
    fn unreadable_path_is_reported_as_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.yaml");
        std::fs::create_dir(&path).unwrap();
        let mut out = Vec::new();
        let outcome = RosterApp::new(&path)
            .run(&mut Cursor::new("3.5\n"), &mut out)
            .unwrap();
        assert_eq!(outcome, RunOutcome::NoData);
        let text = String::from_utf8(out).unwrap();
        let prefix = format!("Error reading file '{}': ", path.display());
        assert!(text.starts_with(&prefix), "{text}");
        assert!(text.ends_with("\nNo valid student data found.\n"), "{text}");
        assert_eq!(text.lines().count(), 2, "{text}");
    }

    #[test]
    fn incomplete_record_is_reported_without_listing() {
        let yaml = "students:\n  - name: Alice\n    age: 20\n    major: CS\n";
        let (outcome, text) = run_with("students.yaml", Some(yaml), "3.5\n");
        assert_eq!(outcome, RunOutcome::InvalidRecord);
        assert!(text.starts_with("Error: student record #1 is invalid: "), "{text}");
        assert!(!text.contains("All Students"));
    }

    #[test]
    fn csv_roster_runs_the_same_pipeline() {
        let csv = "name,age,major,gpa\nAlice,20,Computer Science,3.8\nBob,22,Mathematics,3.2\n";
        let (outcome, text) = run_with("students.csv", Some(csv), "3.5\n");
        assert_eq!(outcome, RunOutcome::Filtered { shown: 1 });
        assert!(text.ends_with(
            "\nStudents with GPA >= 3.5:\nName: Alice, Age: 20, Major: Computer Science, GPA: 3.8\n"
        ));
    }

    #[test]
    fn json_roster_runs_the_same_pipeline() {
        let json = r#"{"students": [{"name": "Carol", "age": 21, "major": "Physics", "gpa": 3.95}]}"#;
        let (outcome, _) = run_with("students.json", Some(json), "3.95\n");
        assert_eq!(outcome, RunOutcome::Filtered { shown: 1 });
    }
}
