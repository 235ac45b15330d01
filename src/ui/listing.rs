use std::io::{self, Write};

use crate::data::filter::filtered_indices;
use crate::data::model::{format_float, StudentRecord};

// ---------------------------------------------------------------------------
// Student listings
// ---------------------------------------------------------------------------

/// Print every student under the "All Students:" header, in input order.
pub fn display_students(out: &mut impl Write, students: &[StudentRecord]) -> io::Result<()> {
    writeln!(out, "\nAll Students:")?;
    for student in students {
        writeln!(out, "{student}")?;
    }
    Ok(())
}

/// Print the students whose GPA is at least `min_gpa`.
///
/// Returns how many students were listed.
pub fn filter_students_by_gpa(
    out: &mut impl Write,
    students: &[StudentRecord],
    min_gpa: f64,
) -> io::Result<usize> {
    let matches = filtered_indices(students, min_gpa);
    log::debug!("{} of {} students have GPA >= {min_gpa}", matches.len(), students.len());

    writeln!(out, "\nStudents with GPA >= {}:", format_float(min_gpa))?;
    if matches.is_empty() {
        writeln!(out, "No students found.")?;
    }
    for &i in &matches {
        writeln!(out, "{}", students[i])?;
    }
    Ok(matches.len())
}
