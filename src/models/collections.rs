//! 集合名称与通用载荷
//!
//! `/api/v1/{collection}` 路由按集合名分派，未知集合一律拒绝。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    classes::{
        entities::{Class, ClassWithTeacher},
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    students::{
        entities::{Student, StudentWithClass},
        requests::{CreateStudentRequest, UpdateStudentRequest},
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, UpdateSubjectRequest},
    },
    teachers::{
        entities::{Teacher, TeacherView},
        requests::{CreateTeacherRequest, UpdateTeacherRequest},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/collection.ts")]
pub enum Collection {
    Students,
    Teachers,
    Classes,
    Subjects,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Students,
        Collection::Teachers,
        Collection::Classes,
        Collection::Subjects,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Students => "students",
            Collection::Teachers => "teachers",
            Collection::Classes => "classes",
            Collection::Subjects => "subjects",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Collection {
    type Err = SchoolAdminError;

    fn from_str(s: &str) -> Result<Self> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SchoolAdminError::unknown_collection(format!("Unknown collection: {s}")))
    }
}

/// 单条记录（不含关联字段）
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/collection.ts")]
pub enum EntityRecord {
    Student(Student),
    Teacher(Teacher),
    Class(Class),
    Subject(Subject),
}

impl EntityRecord {
    pub fn id(&self) -> &str {
        match self {
            EntityRecord::Student(s) => &s.id,
            EntityRecord::Teacher(t) => &t.id,
            EntityRecord::Class(c) => &c.id,
            EntityRecord::Subject(s) => &s.id,
        }
    }

    pub fn collection(&self) -> Collection {
        match self {
            EntityRecord::Student(_) => Collection::Students,
            EntityRecord::Teacher(_) => Collection::Teachers,
            EntityRecord::Class(_) => Collection::Classes,
            EntityRecord::Subject(_) => Collection::Subjects,
        }
    }
}

/// 列表结果，各集合附带各自的关联字段
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/collection.ts")]
pub enum EntityList {
    Students(Vec<StudentWithClass>),
    Teachers(Vec<TeacherView>),
    Classes(Vec<ClassWithTeacher>),
    Subjects(Vec<Subject>),
}

impl EntityList {
    pub fn len(&self) -> usize {
        match self {
            EntityList::Students(v) => v.len(),
            EntityList::Teachers(v) => v.len(),
            EntityList::Classes(v) => v.len(),
            EntityList::Subjects(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> Vec<&str> {
        match self {
            EntityList::Students(v) => v.iter().map(|s| s.student.id.as_str()).collect(),
            EntityList::Teachers(v) => v.iter().map(|t| t.teacher.id.as_str()).collect(),
            EntityList::Classes(v) => v.iter().map(|c| c.class.id.as_str()).collect(),
            EntityList::Subjects(v) => v.iter().map(|s| s.id.as_str()).collect(),
        }
    }
}

/// 创建载荷，按集合解析
#[derive(Debug, Clone)]
pub enum CreatePayload {
    Student(CreateStudentRequest),
    Teacher(CreateTeacherRequest),
    Class(CreateClassRequest),
    Subject(CreateSubjectRequest),
}

impl CreatePayload {
    /// 从 JSON 解析并校验
    pub fn from_json(collection: Collection, value: serde_json::Value) -> Result<Self> {
        let payload = match collection {
            Collection::Students => {
                CreatePayload::Student(parse_body::<CreateStudentRequest>(value)?.validate()?)
            }
            Collection::Teachers => {
                CreatePayload::Teacher(parse_body::<CreateTeacherRequest>(value)?.validate()?)
            }
            Collection::Classes => {
                CreatePayload::Class(parse_body::<CreateClassRequest>(value)?.validate()?)
            }
            Collection::Subjects => {
                CreatePayload::Subject(parse_body::<CreateSubjectRequest>(value)?.validate()?)
            }
        };
        Ok(payload)
    }

    pub fn collection(&self) -> Collection {
        match self {
            CreatePayload::Student(_) => Collection::Students,
            CreatePayload::Teacher(_) => Collection::Teachers,
            CreatePayload::Class(_) => Collection::Classes,
            CreatePayload::Subject(_) => Collection::Subjects,
        }
    }
}

/// 部分更新载荷
#[derive(Debug, Clone)]
pub enum UpdatePayload {
    Student(UpdateStudentRequest),
    Teacher(UpdateTeacherRequest),
    Class(UpdateClassRequest),
    Subject(UpdateSubjectRequest),
}

impl UpdatePayload {
    pub fn from_json(collection: Collection, value: serde_json::Value) -> Result<Self> {
        let payload = match collection {
            Collection::Students => {
                UpdatePayload::Student(parse_body::<UpdateStudentRequest>(value)?.validate()?)
            }
            Collection::Teachers => {
                UpdatePayload::Teacher(parse_body::<UpdateTeacherRequest>(value)?.validate()?)
            }
            Collection::Classes => {
                UpdatePayload::Class(parse_body::<UpdateClassRequest>(value)?.validate()?)
            }
            Collection::Subjects => {
                UpdatePayload::Subject(parse_body::<UpdateSubjectRequest>(value)?.validate()?)
            }
        };
        Ok(payload)
    }

    pub fn collection(&self) -> Collection {
        match self {
            UpdatePayload::Student(_) => Collection::Students,
            UpdatePayload::Teacher(_) => Collection::Teachers,
            UpdatePayload::Class(_) => Collection::Classes,
            UpdatePayload::Subject(_) => Collection::Subjects,
        }
    }
}

// 载荷结构错误按校验失败处理
fn parse_body<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| SchoolAdminError::validation(e.to_string()))
}

/// 列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/collection.ts")]
pub struct ListQuery {
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_parse() {
        assert_eq!("students".parse::<Collection>().unwrap(), Collection::Students);
        assert_eq!("subjects".parse::<Collection>().unwrap(), Collection::Subjects);

        let err = "guardians".parse::<Collection>().unwrap_err();
        assert!(matches!(err, SchoolAdminError::UnknownCollection(_)));
        assert!("Students".parse::<Collection>().is_err());
    }

    #[test]
    fn test_create_payload_dispatch() {
        let payload =
            CreatePayload::from_json(Collection::Subjects, json!({"name": "Maths", "code": "MTH"}))
                .unwrap();
        assert_eq!(payload.collection(), Collection::Subjects);

        let err = CreatePayload::from_json(Collection::Classes, json!({"grade": "5"})).unwrap_err();
        assert!(matches!(err, SchoolAdminError::Validation(_)));
    }

    #[test]
    fn test_update_payload_allows_partial() {
        let payload =
            UpdatePayload::from_json(Collection::Students, json!({"notes": "Moved seats"})).unwrap();
        match payload {
            UpdatePayload::Student(req) => {
                assert_eq!(req.notes.as_deref(), Some("Moved seats"));
                assert!(req.first_name.is_none());
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }
}
