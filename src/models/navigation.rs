//! 导航外壳：页面标识与菜单

use serde::Serialize;
use ts_rs::TS;

/// 页面标识（前端传入的 current page 字符串）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub enum Page {
    Dashboard,
    StudentsList,
    StudentsAdd,
    TeachersList,
    TeachersAdd,
    ClassesList,
    SubjectsList,
    ReportStudents,
    ReportRoster,
}

impl Page {
    pub const ALL: [Page; 9] = [
        Page::Dashboard,
        Page::StudentsList,
        Page::StudentsAdd,
        Page::TeachersList,
        Page::TeachersAdd,
        Page::ClassesList,
        Page::SubjectsList,
        Page::ReportStudents,
        Page::ReportRoster,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::StudentsList => "students_list",
            Page::StudentsAdd => "students_add",
            Page::TeachersList => "teachers_list",
            Page::TeachersAdd => "teachers_add",
            Page::ClassesList => "classes_list",
            Page::SubjectsList => "subjects_list",
            Page::ReportStudents => "report_students",
            Page::ReportRoster => "report_roster",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Page::ALL.into_iter().find(|p| p.token() == token)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::StudentsList => "Student List",
            Page::StudentsAdd => "Add Student",
            Page::TeachersList => "Teacher List",
            Page::TeachersAdd => "Add Teacher",
            Page::ClassesList => "Classes",
            Page::SubjectsList => "Subjects",
            Page::ReportStudents => "Student Directory",
            Page::ReportRoster => "Class Roster",
        }
    }

    /// 页面对应的屏幕，未完成的页面落到 UnderConstruction
    pub fn screen(&self) -> Screen {
        match self {
            Page::Dashboard => Screen::Dashboard,
            Page::StudentsList => Screen::StudentList,
            Page::StudentsAdd => Screen::StudentAdd,
            // 新增教师暂复用列表页
            Page::TeachersList | Page::TeachersAdd => Screen::TeacherList,
            Page::ClassesList => Screen::ClassList,
            Page::SubjectsList | Page::ReportStudents | Page::ReportRoster => {
                Screen::UnderConstruction
            }
        }
    }
}

/// 实际渲染的屏幕
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub enum Screen {
    Dashboard,
    StudentList,
    StudentAdd,
    TeacherList,
    ClassList,
    UnderConstruction,
}

impl Screen {
    /// 屏幕加载时读取的集合
    pub fn data_sources(&self) -> &'static [&'static str] {
        match self {
            Screen::Dashboard => &["students", "teachers", "classes"],
            Screen::StudentList | Screen::StudentAdd => &["students", "classes", "teachers"],
            Screen::TeacherList => &["teachers"],
            Screen::ClassList => &["classes"],
            Screen::UnderConstruction => &[],
        }
    }
}

/// 解析页面标识，未知标识也返回 UnderConstruction
pub fn resolve(token: &str) -> Screen {
    Page::from_token(token)
        .map(|p| p.screen())
        .unwrap_or(Screen::UnderConstruction)
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct NavItem {
    pub label: String,
    pub key: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct NavGroup {
    pub label: String,
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct NavigationMenu {
    pub title: String,
    pub home: NavItem,
    pub groups: Vec<NavGroup>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/navigation.ts")]
pub struct ResolvedPage {
    pub token: String,
    pub screen: Screen,
    pub data_sources: Vec<String>,
}

impl ResolvedPage {
    pub fn new(token: &str) -> Self {
        let screen = resolve(token);
        Self {
            token: token.to_string(),
            screen,
            data_sources: screen.data_sources().iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn item(page: Page) -> NavItem {
    NavItem {
        label: page.label().to_string(),
        key: page.token().to_string(),
    }
}

fn group(label: &str, pages: &[Page]) -> NavGroup {
    NavGroup {
        label: label.to_string(),
        items: pages.iter().copied().map(item).collect(),
    }
}

impl NavigationMenu {
    pub fn build(title: &str) -> Self {
        Self {
            title: title.to_string(),
            home: item(Page::Dashboard),
            groups: vec![
                group("Students", &[Page::StudentsList, Page::StudentsAdd]),
                group("Teachers", &[Page::TeachersList, Page::TeachersAdd]),
                group("Academics", &[Page::ClassesList, Page::SubjectsList]),
                group("Reports", &[Page::ReportStudents, Page::ReportRoster]),
            ],
        }
    }
}
