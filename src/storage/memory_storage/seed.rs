//! 演示模式示例数据

use crate::models::{
    classes::entities::Class,
    students::entities::{Gender, Student},
    teachers::entities::Teacher,
};

pub(super) fn students() -> Vec<Student> {
    vec![
        Student {
            id: "1".to_string(),
            admission_no: "ADM001".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            dob: "2015-05-15".to_string(),
            gender: Gender::Male,
            class_id: Some("1".to_string()),
            teacher_id: None,
            roll_no: "101".to_string(),
            photo_path: None,
            notes: Some("Excellent in mathematics".to_string()),
        },
        Student {
            id: "2".to_string(),
            admission_no: "ADM002".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            dob: "2016-02-20".to_string(),
            gender: Gender::Female,
            class_id: Some("2".to_string()),
            teacher_id: None,
            roll_no: "102".to_string(),
            photo_path: None,
            notes: Some("Needs improvement in reading".to_string()),
        },
    ]
}

pub(super) fn teachers() -> Vec<Teacher> {
    vec![
        Teacher {
            id: "1".to_string(),
            teacher_no: "T001".to_string(),
            full_name: "Sarah Connor".to_string(),
            phone: "555-0123".to_string(),
            email: "sarah@school.edu".to_string(),
            qualifications: "M.Ed Mathematics".to_string(),
            hire_date: "2020-01-15".to_string(),
            photo_path: None,
        },
        Teacher {
            id: "2".to_string(),
            teacher_no: "T002".to_string(),
            full_name: "James Logan".to_string(),
            phone: "555-0987".to_string(),
            email: "logan@school.edu".to_string(),
            qualifications: "B.Sc Physics".to_string(),
            hire_date: "2021-08-20".to_string(),
            photo_path: None,
        },
    ]
}

pub(super) fn classes() -> Vec<Class> {
    vec![
        Class {
            id: "1".to_string(),
            grade: "5".to_string(),
            section: "A".to_string(),
            academic_year: "2024".to_string(),
            class_teacher_id: Some("1".to_string()),
        },
        Class {
            id: "2".to_string(),
            grade: "6".to_string(),
            section: "B".to_string(),
            academic_year: "2024".to_string(),
            class_teacher_id: Some("2".to_string()),
        },
    ]
}
