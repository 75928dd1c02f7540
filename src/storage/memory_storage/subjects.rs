//! 科目内存操作

use super::{MemoryStorage, new_id, read, remove_by_id, set_field, write};
use crate::models::subjects::{
    entities::Subject,
    requests::{CreateSubjectRequest, UpdateSubjectRequest},
};

impl MemoryStorage {
    pub(super) fn list_subjects_impl(&self) -> Vec<Subject> {
        let mut subjects = read(&self.subjects).clone();
        subjects.sort_by(|a, b| a.name.cmp(&b.name));
        subjects
    }

    pub(super) fn get_subject_by_id_impl(&self, id: &str) -> Option<Subject> {
        read(&self.subjects).iter().find(|s| s.id == id).cloned()
    }

    pub(super) fn create_subject_impl(&self, req: CreateSubjectRequest) -> Subject {
        let subject = Subject {
            id: new_id(),
            name: req.name,
            code: req.code,
        };
        write(&self.subjects).push(subject.clone());
        subject
    }

    pub(super) fn update_subject_impl(
        &self,
        id: &str,
        update: UpdateSubjectRequest,
    ) -> Option<Subject> {
        let mut subjects = write(&self.subjects);
        let subject = subjects.iter_mut().find(|s| s.id == id)?;

        set_field(&mut subject.name, update.name);
        set_field(&mut subject.code, update.code);

        Some(subject.clone())
    }

    pub(super) fn delete_subject_impl(&self, id: &str) -> bool {
        remove_by_id(&mut write(&self.subjects), id, |s| s.id.as_str())
    }
}
