//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub teacher_no: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub qualifications: String,
    pub hire_date: String,
    pub photo_path: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::classes::Entity")]
    Classes,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(self) -> crate::models::teachers::entities::Teacher {
        use crate::models::teachers::entities::Teacher;

        Teacher {
            id: self.id,
            teacher_no: self.teacher_no,
            full_name: self.full_name,
            phone: self.phone,
            email: self.email,
            qualifications: self.qualifications,
            hire_date: self.hire_date,
            photo_path: self.photo_path,
        }
    }
}
