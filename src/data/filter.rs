use super::model::StudentRecord;

// ---------------------------------------------------------------------------
// GPA threshold filter
// ---------------------------------------------------------------------------

/// Return indices of students whose GPA meets or exceeds `min_gpa`.
///
/// The threshold is inclusive and the result keeps the input order. A NaN
/// threshold matches nothing.
pub fn filtered_indices(students: &[StudentRecord], min_gpa: f64) -> Vec<usize> {
    students
        .iter()
        .enumerate()
        .filter(|(_, st)| st.gpa.as_f64() >= min_gpa)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FieldValue, Number};

    fn student(name: &str, gpa: Number) -> StudentRecord {
        StudentRecord {
            name: name.into(),
            age: FieldValue::from(20_i64),
            major: "Undeclared".into(),
            gpa,
        }
    }

    fn roster() -> Vec<StudentRecord> {
        vec![
            student("Alice", Number::Float(3.8)),
            student("Bob", Number::Float(3.2)),
            student("Carol", Number::Float(3.95)),
        ]
    }

    #[test]
    fn keeps_matches_in_original_order() {
        assert_eq!(filtered_indices(&roster(), 3.5), vec![0, 2]);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(filtered_indices(&roster(), 3.2), vec![0, 1, 2]);
        assert_eq!(filtered_indices(&roster(), 3.95), vec![2]);
    }

    #[test]
    fn nothing_passes_a_high_threshold() {
        assert!(filtered_indices(&roster(), 4.5).is_empty());
        assert!(filtered_indices(&roster(), f64::INFINITY).is_empty());
        assert!(filtered_indices(&roster(), f64::NAN).is_empty());
    }

    #[test]
    fn integer_gpa_compares_numerically() {
        let students = vec![student("Dan", Number::Integer(4)), student("Eve", Number::Integer(2))];
        assert_eq!(filtered_indices(&students, 3.0), vec![0]);
    }

    #[test]
    fn duplicates_are_all_kept() {
        let students = vec![student("Sam", Number::Float(3.0)), student("Sam", Number::Float(3.0))];
        assert_eq!(filtered_indices(&students, 3.0), vec![0, 1]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(filtered_indices(&[], 0.0).is_empty());
    }
}
