//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub gender: String,
    pub class_id: Option<String>,
    pub teacher_id: Option<String>,
    pub roll_no: String,
    pub photo_path: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id",
        on_delete = "SetNull"
    )]
    Class,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{Gender, Student};

        Student {
            id: self.id,
            admission_no: self.admission_no,
            first_name: self.first_name,
            last_name: self.last_name,
            dob: self.dob,
            gender: self.gender.parse::<Gender>().unwrap_or_default(),
            class_id: self.class_id,
            teacher_id: self.teacher_id,
            roll_no: self.roll_no,
            photo_path: self.photo_path,
            notes: self.notes,
        }
    }
}
