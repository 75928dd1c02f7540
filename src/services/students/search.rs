//! 学生列表搜索

use crate::models::students::entities::StudentWithClass;

/// 按姓氏或学号做不区分大小写的子串匹配，空搜索词返回全部
pub fn filter_students(students: Vec<StudentWithClass>, term: &str) -> Vec<StudentWithClass> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return students;
    }

    students
        .into_iter()
        .filter(|s| matches_term(s, &term))
        .collect()
}

fn matches_term(s: &StudentWithClass, term: &str) -> bool {
    s.student.last_name.to_lowercase().contains(term)
        || s.student.admission_no.to_lowercase().contains(term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::{Gender, Student};

    fn student(id: &str, first: &str, last: &str, admission_no: &str) -> StudentWithClass {
        StudentWithClass {
            student: Student {
                id: id.to_string(),
                admission_no: admission_no.to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                dob: "2015-05-20".to_string(),
                gender: Gender::Male,
                class_id: None,
                teacher_id: None,
                roll_no: "1".to_string(),
                photo_path: None,
                notes: None,
            },
            class_label: None,
            photo_url: None,
        }
    }

    fn roster() -> Vec<StudentWithClass> {
        vec![
            student("s1", "John", "Doe", "ADM001"),
            student("s2", "Jane", "Smith", "ADM002"),
        ]
    }

    #[test]
    fn test_matches_last_name_case_insensitive() {
        let found = filter_students(roster(), "doe");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].student.id, "s1");
    }

    #[test]
    fn test_matches_admission_no() {
        let found = filter_students(roster(), "ADM002");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].student.id, "s2");

        assert_eq!(filter_students(roster(), "adm").len(), 2);
    }

    #[test]
    fn test_first_name_is_not_searched() {
        assert!(filter_students(roster(), "john").is_empty());
    }

    #[test]
    fn test_blank_term_keeps_everything() {
        assert_eq!(filter_students(roster(), "").len(), 2);
        assert_eq!(filter_students(roster(), "   ").len(), 2);
    }
}
